//! Read-only byte regions backing serialized model files
//!
//! 支撑序列化模型文件的只读字节区域
//!
//! A model interpreter needs a stable, read-only view of the serialized model
//! without caring whether the bytes came from a memory mapping or from an
//! in-process copy. This crate provides that view and reports missing,
//! unreadable or truncated files without panicking.
//!
//! 模型解释器需要一个稳定的只读视图来访问序列化模型，而不关心这些字节来自内存映射
//! 还是进程内拷贝。本库提供该视图，并在文件缺失、不可读或被截断时报告错误而不会 panic。
//!
//! # Features
//!
//! - **Zero-copy loading**: [`MappedAllocation`] maps the file read-only and shared
//! - **Portable fallback**: [`CopiedAllocation`] reads the whole file into the heap
//! - **One contract**: both implement [`Allocation`] (`base`, `bytes`, `valid`)
//! - **Non-panicking construction**: failures go to an [`ErrorReporter`], the object stays inert
//! - **Guaranteed release**: descriptors and mappings are released on drop, on every path
//!
//! # 特性
//!
//! - **零拷贝加载**：[`MappedAllocation`] 以只读共享方式映射文件
//! - **可移植回退**：[`CopiedAllocation`] 将整个文件读入堆内存
//! - **统一契约**：两者都实现 [`Allocation`]（`base`、`bytes`、`valid`）
//! - **构造不 panic**：失败交给 [`ErrorReporter`]，对象保持惰性
//! - **保证释放**：描述符和映射在 drop 时释放，无论走哪条路径
//!
//! # Quick Start
//!
//! ```
//! use model_allocation::{Allocation, LogReporter, ModelAllocation};
//! # use tempfile::tempdir;
//! # fn main() -> std::io::Result<()> {
//! # let dir = tempdir()?;
//! # let path = dir.path().join("model.tflite");
//! # std::fs::write(&path, vec![7u8; 4096])?;
//!
//! // Pick mapped or copied access based on the platform
//! // 根据平台选择映射或拷贝访问
//! let allocation = ModelAllocation::open(&path, &LogReporter);
//!
//! // Always check validity before touching the bytes
//! // 访问字节前总是先检查有效性
//! if let Some(bytes) = allocation.as_slice() {
//!     assert_eq!(bytes.len(), allocation.bytes());
//!     assert!(bytes.iter().all(|&b| b == 7));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Main Types
//!
//! - [`Allocation`]: The read-only region contract
//! - [`MappedAllocation`]: Memory-mapped strategy
//! - [`CopiedAllocation`]: Heap-copy strategy
//! - [`ModelAllocation`]: Either strategy, selected at runtime
//! - [`ErrorReporter`]: Diagnostic sink for construction failures
//! - [`AllocationConfig`]: Strategy, prefault and invariant-check options
//!
//! # 主要类型
//!
//! - [`Allocation`]: 只读区域契约
//! - [`MappedAllocation`]: 内存映射策略
//! - [`CopiedAllocation`]: 堆拷贝策略
//! - [`ModelAllocation`]: 运行时选择的任一策略
//! - [`ErrorReporter`]: 构造失败时的诊断输出
//! - [`AllocationConfig`]: 策略、预加载和不变量检查选项

mod allocation;

pub use allocation::{
    is_supported, Allocation, AllocationConfig, CheckPolicy, CollectingReporter, CopiedAllocation,
    Error, ErrorReporter, LogReporter, MappedAllocation, ModelAllocation, Result, StderrReporter,
    Strategy,
};
