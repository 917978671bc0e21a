//! Construction options
//!
//! 构造选项

use std::fmt;

/// Which backing strategy to build
///
/// 选择使用哪种后备策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Mapped when the platform supports it, copied otherwise
    ///
    /// 平台支持时使用映射，否则使用拷贝
    #[default]
    Auto,

    /// Memory-map the file
    ///
    /// 内存映射文件
    Mapped,

    /// Read the whole file into a heap buffer
    ///
    /// 将整个文件读入堆缓冲区
    Copied,
}

impl Strategy {
    /// Resolve `Auto` against the capability probe
    ///
    /// 根据能力探测解析 `Auto`
    ///
    /// Never returns `Auto`.
    ///
    /// 永远不会返回 `Auto`。
    #[inline]
    pub const fn resolve(self) -> Self {
        match self {
            Strategy::Auto if super::mapped::is_supported() => Strategy::Mapped,
            Strategy::Auto => Strategy::Copied,
            other => other,
        }
    }
}

/// How internal invariants are asserted after construction
///
/// 构造完成后如何断言内部不变量
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CheckPolicy {
    /// Skip invariant checks
    ///
    /// 跳过不变量检查
    Off,

    /// Check in debug builds only, like `debug_assert!`
    ///
    /// 仅在 debug 构建中检查，同 `debug_assert!`
    #[default]
    Debug,

    /// Check in every build and panic on violation
    ///
    /// 在所有构建中检查，违反时 panic
    Always,
}

impl CheckPolicy {
    /// Assert `condition` according to the policy
    ///
    /// 按策略断言 `condition`
    ///
    /// # Panics
    /// Panics with `what` when the condition is false and the policy enforces it.
    ///
    /// # Panics
    /// 条件为假且策略要求检查时，以 `what` 为信息 panic。
    #[inline]
    #[track_caller]
    pub fn check(self, condition: bool, what: fmt::Arguments<'_>) {
        match self {
            CheckPolicy::Off => {}
            CheckPolicy::Debug => debug_assert!(condition, "invariant violated: {what}"),
            CheckPolicy::Always => assert!(condition, "invariant violated: {what}"),
        }
    }
}

/// Options for building an allocation
///
/// 构建分配时使用的选项
///
/// # Examples
///
/// ```
/// use model_allocation::{AllocationConfig, CheckPolicy, Strategy};
///
/// let config = AllocationConfig::new()
///     .strategy(Strategy::Copied)
///     .check_policy(CheckPolicy::Always);
///
/// assert_eq!(config.strategy, Strategy::Copied);
/// assert!(!config.populate);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AllocationConfig {
    /// Backing strategy
    ///
    /// 后备策略
    pub strategy: Strategy,

    /// Prefault mapped pages at construction. Ignored by the copy strategy and
    /// on platforms without support.
    ///
    /// 构造时预先加载映射页。拷贝策略及不支持的平台会忽略此项。
    pub populate: bool,

    /// Invariant checking policy
    ///
    /// 不变量检查策略
    pub check_policy: CheckPolicy,
}

impl AllocationConfig {
    /// Default options: `Auto` strategy, no prefault, debug-only checks
    ///
    /// 默认选项：`Auto` 策略、不预加载、仅 debug 检查
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backing strategy
    ///
    /// 设置后备策略
    #[must_use]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set whether mapped pages are prefaulted
    ///
    /// 设置是否预先加载映射页
    #[must_use]
    pub fn populate(mut self, populate: bool) -> Self {
        self.populate = populate;
        self
    }

    /// Set the invariant checking policy
    ///
    /// 设置不变量检查策略
    #[must_use]
    pub fn check_policy(mut self, check_policy: CheckPolicy) -> Self {
        self.check_policy = check_policy;
        self
    }
}
