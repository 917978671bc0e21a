//! Error types for model-allocation
//!
//! model-allocation 的错误类型

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for allocation construction
///
/// 分配构造过程的错误类型
///
/// The `Display` text of every variant is the diagnostic handed to the
/// [`ErrorReporter`](super::ErrorReporter) when construction fails.
///
/// 每个变体的 `Display` 文本即构造失败时交给
/// [`ErrorReporter`](super::ErrorReporter) 的诊断信息。
#[derive(Debug)]
pub enum Error {
    /// The file could not be opened for reading
    ///
    /// 无法以只读方式打开文件
    Open {
        path: PathBuf,
        source: io::Error,
    },

    /// The metadata query for the file size failed
    ///
    /// 查询文件大小失败
    FileSize {
        path: PathBuf,
        source: io::Error,
    },

    /// Memory mapping the file failed
    ///
    /// 内存映射失败
    Map {
        path: PathBuf,
        source: io::Error,
    },

    /// The buffer holding the copy could not be allocated
    ///
    /// 无法分配存放副本的缓冲区
    Alloc {
        path: PathBuf,
        requested: u64,
    },

    /// Fewer bytes than the file size were read
    ///
    /// 读取的字节数少于文件大小
    ShortRead {
        path: PathBuf,
        expected: usize,
        actual: usize,
        source: Option<io::Error>,
    },
}

impl Error {
    /// Path of the file the failed construction was opened on
    ///
    /// 构造失败时对应的文件路径
    pub fn path(&self) -> &Path {
        match self {
            Error::Open { path, .. }
            | Error::FileSize { path, .. }
            | Error::Map { path, .. }
            | Error::Alloc { path, .. }
            | Error::ShortRead { path, .. } => path,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Open { path, .. } => write!(f, "Could not open '{}'.", path.display()),
            Error::FileSize { path, .. } => {
                write!(f, "Failed to get file size of '{}'.", path.display())
            }
            Error::Map { path, .. } => write!(f, "Mmap of '{}' failed.", path.display()),
            Error::Alloc { path, .. } => write!(
                f,
                "Malloc of buffer to hold copy of '{}' failed.",
                path.display()
            ),
            Error::ShortRead { path, .. } => write!(
                f,
                "Read of '{}' failed (too few bytes read).",
                path.display()
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Open { source, .. }
            | Error::FileSize { source, .. }
            | Error::Map { source, .. } => Some(source),
            Error::ShortRead { source: Some(source), .. } => Some(source),
            _ => None,
        }
    }
}

/// Convert from Error to io::Error for compatibility
///
/// 从 Error 转换到 io::Error 以保持兼容性
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match &err {
            Error::Open { source, .. }
            | Error::FileSize { source, .. }
            | Error::Map { source, .. } => source.kind(),
            Error::Alloc { .. } => io::ErrorKind::OutOfMemory,
            Error::ShortRead { .. } => io::ErrorKind::UnexpectedEof,
        };
        io::Error::new(kind, err)
    }
}

/// Result type alias using our custom Error type
///
/// 使用自定义 Error 类型的 Result 类型别名
pub type Result<T> = std::result::Result<T, Error>;
