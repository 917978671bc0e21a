//! Read-only byte regions backing model files
//!
//! 支撑模型文件的只读字节区域
//!
//! Provides two strategies behind the one [`Allocation`] contract:
//! - [`MappedAllocation`]: Shared read-only memory mapping of the file, no copy
//! - [`CopiedAllocation`]: Full synchronous read of the file into a heap buffer
//!
//! 在同一 [`Allocation`] 契约下提供两种策略：
//! - [`MappedAllocation`]: 文件的只读共享内存映射，无拷贝
//! - [`CopiedAllocation`]: 将文件完整同步读入堆缓冲区
//!
//! [`ModelAllocation`] wraps either one and picks between them with the
//! [`is_supported`] capability probe.
//!
//! [`ModelAllocation`] 包装任一策略，并通过 [`is_supported`] 能力探测进行选择。
//!
//! # Failure Model
//!
//! Construction never fails outright. Each step (open, size query, map or read)
//! that fails is reported once to the [`ErrorReporter`] with a message naming the
//! path, and the resulting allocation reports `valid() == false`. Invalid
//! allocations are inert and safe to query and drop. Callers that prefer a
//! [`Result`] use the `try_open` constructors instead.
//!
//! # 失败模型
//!
//! 构造本身不会失败。任何失败的步骤（打开、查询大小、映射或读取）都会以包含路径的信息
//! 向 [`ErrorReporter`] 报告一次，得到的分配 `valid() == false`。
//! 无效分配是惰性的，可以安全地查询和 drop。偏好 [`Result`] 的调用方可使用 `try_open` 构造函数。
//!
//! ```
//! use model_allocation::{Allocation, CollectingReporter, ModelAllocation};
//! # use tempfile::tempdir;
//! # fn main() -> std::io::Result<()> {
//! # let dir = tempdir()?;
//! let reporter = CollectingReporter::new();
//! let path = dir.path().join("absent.tflite");
//!
//! let allocation = ModelAllocation::open(&path, &reporter);
//! assert!(!allocation.valid());
//! assert_eq!(allocation.as_slice(), None);
//! assert_eq!(
//!     reporter.messages(),
//!     vec![format!("Could not open '{}'.", path.display())]
//! );
//! # Ok(())
//! # }
//! ```

mod config;
mod contract;
mod copied;
mod error;
mod mapped;
mod model;
mod reporter;


// Re-export public API
// 重新导出公共 API
pub use config::{AllocationConfig, CheckPolicy, Strategy};
pub use contract::Allocation;
pub use copied::CopiedAllocation;
pub use error::{Error, Result};
pub use mapped::{is_supported, MappedAllocation};
pub use model::ModelAllocation;
pub use reporter::{CollectingReporter, ErrorReporter, LogReporter, StderrReporter};
