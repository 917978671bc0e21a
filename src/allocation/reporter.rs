//! Diagnostic sinks for construction failures
//!
//! 构造失败时使用的诊断输出

use std::fmt;
use std::io::Write;
use std::sync::{Arc, Mutex, PoisonError};

/// Receiver of human-readable failure messages
///
/// 人类可读失败信息的接收者
///
/// Allocations report every failed construction step here exactly once, with the
/// message already formatted by the caller. Implementations must not panic: the
/// report is fire-and-forget and its outcome is never inspected.
///
/// 分配在每个失败的构造步骤上恰好报告一次，信息已由调用方格式化。
/// 实现不得 panic：报告是即发即弃的，结果不会被检查。
///
/// # Examples
///
/// ```
/// use model_allocation::{CollectingReporter, ErrorReporter};
///
/// let reporter = CollectingReporter::new();
/// reporter.report(format_args!("Could not open '{}'.", "missing.bin"));
/// assert_eq!(reporter.messages(), vec!["Could not open 'missing.bin'.".to_string()]);
/// ```
pub trait ErrorReporter {
    /// Report a formatted message
    ///
    /// 报告一条格式化信息
    fn report(&self, message: fmt::Arguments<'_>);
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for &R {
    fn report(&self, message: fmt::Arguments<'_>) {
        (**self).report(message)
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for Box<R> {
    fn report(&self, message: fmt::Arguments<'_>) {
        (**self).report(message)
    }
}

impl<R: ErrorReporter + ?Sized> ErrorReporter for Arc<R> {
    fn report(&self, message: fmt::Arguments<'_>) {
        (**self).report(message)
    }
}

/// Forwards reports to the `log` facade at error level
///
/// 以 error 级别转发到 `log` 门面
///
/// This is the default sink. Nothing is printed unless the host installs a logger.
///
/// 这是默认输出。宿主未安装 logger 时不会输出任何内容。
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, message: fmt::Arguments<'_>) {
        log::error!(target: "model_allocation", "{message}");
    }
}

/// Writes each report as one line to standard error
///
/// 将每条报告作为一行写入标准错误
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrReporter;

impl ErrorReporter for StderrReporter {
    fn report(&self, message: fmt::Arguments<'_>) {
        // A closed stderr must not turn a report into a panic
        let _ = writeln!(std::io::stderr().lock(), "{message}");
    }
}

/// Keeps every report in memory
///
/// 在内存中保存所有报告
#[derive(Debug, Default)]
pub struct CollectingReporter {
    messages: Mutex<Vec<String>>,
}

impl CollectingReporter {
    /// Create an empty collector
    ///
    /// 创建空的收集器
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected messages, oldest first
    ///
    /// 已收集信息的快照，按时间先后排序
    pub fn messages(&self) -> Vec<String> {
        self.lock().clone()
    }

    /// Number of collected messages
    ///
    /// 已收集的信息数量
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing has been reported yet
    ///
    /// 是否尚未收到任何报告
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discard all collected messages
    ///
    /// 丢弃所有已收集的信息
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A panicking reader elsewhere leaves the Vec itself intact
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ErrorReporter for CollectingReporter {
    fn report(&self, message: fmt::Arguments<'_>) {
        self.lock().push(message.to_string());
    }
}

/// Absorb a construction error: log it and hand its text to the sink once
pub(super) fn report_error(reporter: &dyn ErrorReporter, err: &super::Error) {
    log::warn!("allocation of '{}' failed: {err:?}", err.path().display());
    reporter.report(format_args!("{err}"));
}
