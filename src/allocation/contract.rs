//! The shared read-only region contract
//!
//! 共享的只读区域契约

/// A read-only block of bytes backing a model file
///
/// 支撑模型文件的只读字节块
///
/// All state is computed during construction; every method is a pure read and
/// returns the same value on each call.
///
/// 所有状态都在构造期间计算完成；每个方法都是纯读取，每次调用返回相同的值。
///
/// # Caller Contract
///
/// Check [`valid`](Allocation::valid) before trusting [`base`](Allocation::base)
/// and [`bytes`](Allocation::bytes). [`as_slice`](Allocation::as_slice) performs
/// that check for you.
///
/// # 调用方约定
///
/// 在信任 [`base`](Allocation::base) 和 [`bytes`](Allocation::bytes) 之前先检查
/// [`valid`](Allocation::valid)。[`as_slice`](Allocation::as_slice) 会替你完成此检查。
pub trait Allocation {
    /// Start address of the backing bytes
    ///
    /// 后备字节的起始地址
    ///
    /// Stable for the lifetime of the allocation when valid. Null when construction
    /// failed; never dereference it in that case.
    ///
    /// 有效时在分配生命周期内保持不变。构造失败时为空指针，此时切勿解引用。
    fn base(&self) -> *const u8;

    /// Length of the backing region in bytes
    ///
    /// 后备区域的字节长度
    ///
    /// When invalid this is whatever length was recorded before the failing step,
    /// possibly zero.
    ///
    /// 无效时为失败步骤之前记录的长度，可能为零。
    fn bytes(&self) -> usize;

    /// Whether construction fully succeeded
    ///
    /// 构造是否完全成功
    fn valid(&self) -> bool;

    /// The backing bytes, or `None` when invalid
    ///
    /// 后备字节，无效时返回 `None`
    fn as_slice(&self) -> Option<&[u8]>;
}
