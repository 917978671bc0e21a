//! Memory-mapped allocation based on memmap2
//!
//! 基于 memmap2 的内存映射分配

use super::config::AllocationConfig;
use super::contract::Allocation;
use super::error::{Error, Result};
use super::reporter::{report_error, ErrorReporter};
use log::{debug, trace};
use memmap2::{Mmap, MmapOptions};
use std::fs::File;
use std::io;
use std::path::Path;
use std::ptr::{self, NonNull};

/// Whether the host platform offers memory mapping at all
///
/// 宿主平台是否支持内存映射
///
/// A static capability probe: it takes no input, has no side effect, and returns
/// the same answer on every call. Callers use it to choose between
/// [`MappedAllocation`] and [`CopiedAllocation`](super::CopiedAllocation).
///
/// 静态能力探测：无输入、无副作用，每次调用返回相同结果。
/// 调用方据此在 [`MappedAllocation`] 和 [`CopiedAllocation`](super::CopiedAllocation) 之间选择。
#[inline]
pub const fn is_supported() -> bool {
    cfg!(any(unix, windows))
}

/// State of the mapped view
///
/// 映射视图的状态
enum Region {
    /// Construction stopped before a view existed
    Unmapped,
    /// Zero-length file, nothing to map
    Empty,
    Mapped(Mmap),
}

/// Read-only allocation backed by a shared memory mapping of the whole file
///
/// 由整个文件的共享内存映射支撑的只读分配
///
/// The descriptor and the mapping are acquired during construction and released
/// when the allocation is dropped, unmap first and close second, whichever step
/// construction stopped at.
///
/// 描述符和映射在构造期间获取，在分配被 drop 时释放：先解除映射，再关闭描述符，
/// 无论构造停在哪一步。
///
/// # Construction Steps
///
/// 1. Open the file read-only, reporting `Could not open '<path>'.` on failure
/// 2. Query the file size from the open descriptor's metadata
/// 3. Map the full length read-only and shared at offset 0, reporting
///    `Mmap of '<path>' failed.` on failure
///
/// # 构造步骤
///
/// 1. 以只读方式打开文件，失败时报告 `Could not open '<path>'.`
/// 2. 通过已打开描述符的元数据查询文件大小
/// 3. 以只读共享方式从偏移 0 映射全部长度，失败时报告 `Mmap of '<path>' failed.`
///
/// # Examples
///
/// ```
/// use model_allocation::{Allocation, LogReporter, MappedAllocation};
/// # use tempfile::tempdir;
/// # fn main() -> std::io::Result<()> {
/// # let dir = tempdir()?;
/// # let path = dir.path().join("model.bin");
/// std::fs::write(&path, b"model bytes")?;
///
/// let allocation = MappedAllocation::open(&path, &LogReporter);
/// assert!(allocation.valid());
/// assert_eq!(allocation.bytes(), 11);
/// assert_eq!(allocation.as_slice(), Some(&b"model bytes"[..]));
/// # Ok(())
/// # }
/// ```
pub struct MappedAllocation {
    // Field order is drop order: the view goes before the descriptor
    region: Region,
    file: Option<File>,
    len: usize,
}

impl MappedAllocation {
    /// Map `path`, reporting any failure to `reporter`
    ///
    /// 映射 `path`，任何失败都报告给 `reporter`
    ///
    /// Never fails: a failed construction yields an allocation whose
    /// [`valid`](Allocation::valid) is false.
    ///
    /// 不会失败：构造失败时返回 [`valid`](Allocation::valid) 为 false 的分配。
    pub fn open(path: impl AsRef<Path>, reporter: &dyn ErrorReporter) -> Self {
        Self::open_with_config(path, &AllocationConfig::default(), reporter)
    }

    /// Map `path` with explicit options
    ///
    /// 使用指定选项映射 `path`
    pub fn open_with_config(
        path: impl AsRef<Path>,
        config: &AllocationConfig,
        reporter: &dyn ErrorReporter,
    ) -> Self {
        let path = path.as_ref();
        let mut allocation = Self::unmapped();

        match allocation.acquire(path, config) {
            Ok(()) => debug!("mapped '{}' ({} bytes)", path.display(), allocation.len),
            Err(err) => report_error(reporter, &err),
        }

        allocation
    }

    /// Map `path`, returning the failure instead of reporting it
    ///
    /// 映射 `path`，直接返回错误而不是报告
    ///
    /// # Errors
    /// - `Open` if the file cannot be opened
    /// - `FileSize` if the size query fails
    /// - `Map` if the mapping fails
    ///
    /// # Errors
    /// - 无法打开文件时返回 `Open`
    /// - 查询大小失败时返回 `FileSize`
    /// - 映射失败时返回 `Map`
    pub fn try_open(path: impl AsRef<Path>) -> Result<Self> {
        Self::try_open_with_config(path, &AllocationConfig::default())
    }

    /// Like [`try_open`](Self::try_open) with explicit options
    ///
    /// 同 [`try_open`](Self::try_open)，使用指定选项
    pub fn try_open_with_config(path: impl AsRef<Path>, config: &AllocationConfig) -> Result<Self> {
        let mut allocation = Self::unmapped();
        allocation.acquire(path.as_ref(), config)?;
        Ok(allocation)
    }

    /// See [`is_supported`]
    #[inline]
    pub const fn is_supported() -> bool {
        is_supported()
    }

    fn unmapped() -> Self {
        Self {
            region: Region::Unmapped,
            file: None,
            len: 0,
        }
    }

    /// Run the construction steps, recording each acquired resource in `self`
    /// so a later failure still leaves it owned and released on drop
    fn acquire(&mut self, path: &Path, config: &AllocationConfig) -> Result<()> {
        trace!("opening '{}' for mapping", path.display());
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let file = self.file.insert(file);

        let size = file
            .metadata()
            .map_err(|source| Error::FileSize {
                path: path.to_path_buf(),
                source,
            })?
            .len();
        let len = usize::try_from(size).map_err(|_| Error::Map {
            path: path.to_path_buf(),
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                "file length exceeds the address space",
            ),
        })?;
        self.len = len;

        // Zero-length mappings are rejected by POSIX mmap
        if len == 0 {
            trace!("'{}' is empty, skipping mmap", path.display());
            self.region = Region::Empty;
            return Ok(());
        }

        let mut options = MmapOptions::new();
        options.len(len);
        if config.populate {
            options.populate();
        }

        // Safety: the view is read-only. Another process truncating or rewriting
        // the file while mapped is outside what this type can guard against,
        // the same caveat as every file-backed memmap2 view.
        // Safety: 视图是只读的。其他进程在映射期间截断或改写文件不在本类型的保护范围内，
        // 这与所有基于文件的 memmap2 视图相同。
        let mmap = unsafe { options.map(&*file) }.map_err(|source| Error::Map {
            path: path.to_path_buf(),
            source,
        })?;

        config.check_policy.check(
            mmap.len() == len,
            format_args!("mapped {} bytes of '{}', expected {len}", mmap.len(), path.display()),
        );

        self.region = Region::Mapped(mmap);
        Ok(())
    }
}

impl Allocation for MappedAllocation {
    #[inline]
    fn base(&self) -> *const u8 {
        match &self.region {
            Region::Mapped(mmap) => mmap.as_ptr(),
            Region::Empty => NonNull::<u8>::dangling().as_ptr(),
            Region::Unmapped => ptr::null(),
        }
    }

    #[inline]
    fn bytes(&self) -> usize {
        self.len
    }

    #[inline]
    fn valid(&self) -> bool {
        !matches!(self.region, Region::Unmapped)
    }

    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        match &self.region {
            Region::Mapped(mmap) => Some(&mmap[..]),
            Region::Empty => Some(&[]),
            Region::Unmapped => None,
        }
    }
}

/// Implement Debug for MappedAllocation
///
/// 为 MappedAllocation 实现 Debug
impl std::fmt::Debug for MappedAllocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let region = match self.region {
            Region::Unmapped => "Unmapped",
            Region::Empty => "Empty",
            Region::Mapped(_) => "Mmap",
        };
        f.debug_struct("MappedAllocation")
            .field("len", &self.len)
            .field("open", &self.file.is_some())
            .field("region", &region)
            .finish()
    }
}
