//! Strategy-agnostic allocation
//!
//! 与策略无关的分配

use super::config::{AllocationConfig, Strategy};
use super::contract::Allocation;
use super::copied::CopiedAllocation;
use super::error::Result;
use super::mapped::MappedAllocation;
use super::reporter::ErrorReporter;
use std::path::Path;

/// Either backing strategy behind the one [`Allocation`] contract
///
/// 在同一 [`Allocation`] 契约之后的任一后备策略
///
/// Model loaders hold this type and never need to know which variant they got.
///
/// 模型加载器持有此类型，无需关心具体是哪种变体。
///
/// # Examples
///
/// ```
/// use model_allocation::{Allocation, AllocationConfig, LogReporter, ModelAllocation, Strategy};
/// # use tempfile::tempdir;
/// # fn main() -> std::io::Result<()> {
/// # let dir = tempdir()?;
/// # let path = dir.path().join("model.tflite");
/// std::fs::write(&path, [0x1c, 0x00, 0x00, 0x00, b'T', b'F', b'L', b'3'])?;
///
/// // Let the capability probe decide
/// // 由能力探测决定
/// let auto = ModelAllocation::open(&path, &LogReporter);
/// assert!(auto.valid());
///
/// // Force a heap copy
/// // 强制使用堆拷贝
/// let config = AllocationConfig::new().strategy(Strategy::Copied);
/// let copied = ModelAllocation::open_with_config(&path, &config, &LogReporter);
/// assert_eq!(copied.strategy(), Strategy::Copied);
/// assert_eq!(auto.as_slice(), copied.as_slice());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub enum ModelAllocation {
    Mapped(MappedAllocation),
    Copied(CopiedAllocation),
}

impl ModelAllocation {
    /// Build the strategy chosen by the capability probe
    ///
    /// 构建由能力探测选定的策略
    pub fn open(path: impl AsRef<Path>, reporter: &dyn ErrorReporter) -> Self {
        Self::open_with_config(path, &AllocationConfig::default(), reporter)
    }

    /// Build the strategy named by `config`
    ///
    /// 构建 `config` 指定的策略
    pub fn open_with_config(
        path: impl AsRef<Path>,
        config: &AllocationConfig,
        reporter: &dyn ErrorReporter,
    ) -> Self {
        match config.strategy.resolve() {
            Strategy::Mapped => {
                ModelAllocation::Mapped(MappedAllocation::open_with_config(path, config, reporter))
            }
            _ => ModelAllocation::Copied(CopiedAllocation::open_with_config(path, config, reporter)),
        }
    }

    /// Build the strategy chosen by the capability probe, returning the failure
    ///
    /// 构建由能力探测选定的策略，直接返回错误
    pub fn try_open(path: impl AsRef<Path>) -> Result<Self> {
        Self::try_open_with_config(path, &AllocationConfig::default())
    }

    /// Build the strategy named by `config`, returning the failure instead of reporting it
    ///
    /// 构建 `config` 指定的策略，直接返回错误而不是报告
    pub fn try_open_with_config(path: impl AsRef<Path>, config: &AllocationConfig) -> Result<Self> {
        Ok(match config.strategy.resolve() {
            Strategy::Mapped => {
                ModelAllocation::Mapped(MappedAllocation::try_open_with_config(path, config)?)
            }
            _ => ModelAllocation::Copied(CopiedAllocation::try_open_with_config(path, config)?),
        })
    }

    /// Which strategy this allocation was built with; never `Auto`
    ///
    /// 此分配使用的策略；永远不是 `Auto`
    #[inline]
    pub fn strategy(&self) -> Strategy {
        match self {
            ModelAllocation::Mapped(_) => Strategy::Mapped,
            ModelAllocation::Copied(_) => Strategy::Copied,
        }
    }

    #[inline]
    fn as_dyn(&self) -> &dyn Allocation {
        match self {
            ModelAllocation::Mapped(mapped) => mapped,
            ModelAllocation::Copied(copied) => copied,
        }
    }
}

impl Allocation for ModelAllocation {
    #[inline]
    fn base(&self) -> *const u8 {
        self.as_dyn().base()
    }

    #[inline]
    fn bytes(&self) -> usize {
        self.as_dyn().bytes()
    }

    #[inline]
    fn valid(&self) -> bool {
        self.as_dyn().valid()
    }

    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        self.as_dyn().as_slice()
    }
}

impl From<MappedAllocation> for ModelAllocation {
    fn from(mapped: MappedAllocation) -> Self {
        ModelAllocation::Mapped(mapped)
    }
}

impl From<CopiedAllocation> for ModelAllocation {
    fn from(copied: CopiedAllocation) -> Self {
        ModelAllocation::Copied(copied)
    }
}
