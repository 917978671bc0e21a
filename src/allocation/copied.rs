//! Heap-copied allocation
//!
//! 堆拷贝分配

use super::config::AllocationConfig;
use super::contract::Allocation;
use super::error::{Error, Result};
use super::reporter::{report_error, ErrorReporter};
use log::{debug, trace};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::ptr;

/// Read-only allocation backed by a heap copy of the whole file
///
/// 由整个文件的堆拷贝支撑的只读分配
///
/// The file handle only lives for the duration of construction. Afterwards the
/// allocation owns nothing but an immutable buffer of exactly
/// [`bytes`](Allocation::bytes) bytes, or no buffer at all if any step failed.
/// A partially filled buffer is never exposed.
///
/// 文件句柄仅在构造期间存在。之后分配只拥有一个恰好 [`bytes`](Allocation::bytes)
/// 字节的不可变缓冲区；任何步骤失败时则没有缓冲区。部分填充的缓冲区永远不会暴露。
///
/// Use this strategy where [`is_supported`](super::is_supported) is false, or when
/// the file may change underneath a long-lived reader.
///
/// 在 [`is_supported`](super::is_supported) 为 false 的平台上，
/// 或文件可能在长期读取期间被修改时，使用此策略。
///
/// # Examples
///
/// ```
/// use model_allocation::{Allocation, CollectingReporter, CopiedAllocation};
/// # use tempfile::tempdir;
/// # fn main() -> std::io::Result<()> {
/// # let dir = tempdir()?;
/// let reporter = CollectingReporter::new();
///
/// let missing = CopiedAllocation::open(dir.path().join("missing.bin"), &reporter);
/// assert!(!missing.valid());
/// assert!(missing.base().is_null());
/// assert_eq!(reporter.len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct CopiedAllocation {
    buffer: Option<Box<[u8]>>,
    len: usize,
}

impl CopiedAllocation {
    /// Copy `path` into memory, reporting any failure to `reporter`
    ///
    /// 将 `path` 拷贝到内存，任何失败都报告给 `reporter`
    pub fn open(path: impl AsRef<Path>, reporter: &dyn ErrorReporter) -> Self {
        Self::open_with_config(path, &AllocationConfig::default(), reporter)
    }

    /// Copy `path` into memory with explicit options
    ///
    /// 使用指定选项将 `path` 拷贝到内存
    pub fn open_with_config(
        path: impl AsRef<Path>,
        config: &AllocationConfig,
        reporter: &dyn ErrorReporter,
    ) -> Self {
        let path = path.as_ref();
        let mut allocation = Self::unfilled();

        match allocation.acquire(path, config) {
            Ok(()) => debug!("copied '{}' ({} bytes)", path.display(), allocation.len),
            Err(err) => report_error(reporter, &err),
        }

        allocation
    }

    /// Copy `path` into memory, returning the failure instead of reporting it
    ///
    /// 将 `path` 拷贝到内存，直接返回错误而不是报告
    ///
    /// # Errors
    /// - `Open` if the file cannot be opened
    /// - `FileSize` if the size query fails
    /// - `Alloc` if the buffer cannot be allocated
    /// - `ShortRead` if fewer bytes than the file size could be read
    ///
    /// # Errors
    /// - 无法打开文件时返回 `Open`
    /// - 查询大小失败时返回 `FileSize`
    /// - 无法分配缓冲区时返回 `Alloc`
    /// - 读取字节数少于文件大小时返回 `ShortRead`
    pub fn try_open(path: impl AsRef<Path>) -> Result<Self> {
        Self::try_open_with_config(path, &AllocationConfig::default())
    }

    /// Like [`try_open`](Self::try_open) with explicit options
    ///
    /// 同 [`try_open`](Self::try_open)，使用指定选项
    pub fn try_open_with_config(path: impl AsRef<Path>, config: &AllocationConfig) -> Result<Self> {
        let mut allocation = Self::unfilled();
        allocation.acquire(path.as_ref(), config)?;
        Ok(allocation)
    }

    pub(super) fn unfilled() -> Self {
        Self { buffer: None, len: 0 }
    }

    fn acquire(&mut self, path: &Path, config: &AllocationConfig) -> Result<()> {
        trace!("opening '{}' for copying", path.display());
        // Closed when this function returns, on every path
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let size = file
            .metadata()
            .map_err(|source| Error::FileSize {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        let len = usize::try_from(size).map_err(|_| Error::Alloc {
            path: path.to_path_buf(),
            requested: size,
        })?;

        self.fill(file, len, path, config)
    }

    /// Record `len` and take ownership of exactly that many bytes from `reader`
    ///
    /// 记录 `len` 并从 `reader` 获取恰好这么多字节
    ///
    /// On failure the recorded length stays and no buffer is kept.
    pub(super) fn fill(
        &mut self,
        reader: impl Read,
        len: usize,
        path: &Path,
        config: &AllocationConfig,
    ) -> Result<()> {
        self.len = len;
        self.buffer = Some(read_exact_len(reader, len, path)?);

        config.check_policy.check(
            self.as_slice().map(<[u8]>::len) == Some(self.bytes()),
            format_args!("copy of '{}' does not span {} bytes", path.display(), self.len),
        );
        Ok(())
    }
}

/// Read exactly `len` bytes from `reader` into a freshly allocated buffer
///
/// 从 `reader` 读取恰好 `len` 字节到新分配的缓冲区
///
/// A source that ends early, or errors part way, yields `ShortRead` and the
/// partial buffer is dropped.
pub(super) fn read_exact_len(reader: impl Read, len: usize, path: &Path) -> Result<Box<[u8]>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| Error::Alloc {
        path: path.to_path_buf(),
        requested: len as u64,
    })?;

    // `take` keeps a file that grew since the size query from overrunning the
    // reservation
    let result = reader.take(len as u64).read_to_end(&mut buffer);
    if buffer.len() != len || result.is_err() {
        return Err(Error::ShortRead {
            path: path.to_path_buf(),
            expected: len,
            actual: buffer.len(),
            source: result.err(),
        });
    }

    trace!("read {len} bytes from '{}'", path.display());
    Ok(buffer.into_boxed_slice())
}

impl Allocation for CopiedAllocation {
    #[inline]
    fn base(&self) -> *const u8 {
        self.buffer.as_deref().map_or(ptr::null(), <[u8]>::as_ptr)
    }

    #[inline]
    fn bytes(&self) -> usize {
        self.len
    }

    #[inline]
    fn valid(&self) -> bool {
        self.buffer.is_some()
    }

    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        self.buffer.as_deref()
    }
}

/// Implement Debug for CopiedAllocation
///
/// 为 CopiedAllocation 实现 Debug
impl std::fmt::Debug for CopiedAllocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopiedAllocation")
            .field("len", &self.len)
            .field("buffer", &self.buffer.as_ref().map(|_| "Box<[u8]>"))
            .finish()
    }
}
