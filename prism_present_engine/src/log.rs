//! Internal logging system for the Prism present engine
//!
//! This module provides a flexible logging system with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default, with a minimum-severity filter
//! - Thread-safe logging with RwLock
//! - File and line information for detailed ERROR logs

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// Implement this trait to create custom loggers (file logging, in-memory
/// capture for tests, etc.)
///
/// # Example
///
/// ```no_run
/// use prism_present_engine::prism::log::{Logger, LogEntry};
///
/// struct FileLogger {
///     file: std::fs::File,
/// }
///
/// impl Logger for FileLogger {
///     fn log(&self, entry: &LogEntry) {
///         // Write to file...
///     }
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    ///
    /// # Arguments
    ///
    /// * `entry` - The log entry to process
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level (Trace, Debug, Info, Warn, Error)
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source module (e.g., "prism::Presenter", "prism::vulkan::Swapchain")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for detailed ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for detailed ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose debug information (typically disabled in release)
    Trace,

    /// Development/debugging information
    Debug,

    /// Important informational messages
    Info,

    /// Warning messages (potential issues)
    Warn,

    /// Error messages (critical issues with file:line details)
    Error,
}

/// Default logger implementation using colored console output
///
/// Entries below `min_severity` are dropped. Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger {
    /// Entries below this severity are not printed
    pub min_severity: LogSeverity,
}

impl DefaultLogger {
    /// Create a logger that prints everything from `min_severity` up
    pub fn new(min_severity: LogSeverity) -> Self {
        Self { min_severity }
    }
}

impl Default for DefaultLogger {
    fn default() -> Self {
        // Trace output is overwhelming in a render loop; opt in explicitly
        Self::new(LogSeverity::Debug)
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        if entry.severity < self.min_severity {
            return;
        }

        // Format timestamp as YYYY-MM-DD HH:MM:SS.mmm
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        // Color severity string
        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        // Color source
        let source = entry.source.bright_blue();

        // Print with or without file:line
        if let (Some(file), Some(line)) = (entry.file, entry.line) {
            println!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp,
                severity_str,
                source,
                entry.message,
                file,
                line
            );
        } else {
            println!(
                "[{}] [{}] [{}] {}",
                timestamp,
                severity_str,
                source,
                entry.message
            );
        }
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message (very verbose, typically disabled)
///
/// # Example
///
/// ```no_run
/// use prism_present_engine::present_trace;
///
/// present_trace!("prism::vulkan", "Polling surface transform");
/// ```
#[macro_export]
macro_rules! present_trace {
    ($source:expr, $($arg:tt)*) => {
        $crate::prism::Presenter::log(
            $crate::prism::log::LogSeverity::Trace,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a DEBUG message (development information)
///
/// # Example
///
/// ```no_run
/// use prism_present_engine::present_debug;
///
/// let count = 3;
/// present_debug!("prism::vulkan", "Swapchain created with {} images", count);
/// ```
#[macro_export]
macro_rules! present_debug {
    ($source:expr, $($arg:tt)*) => {
        $crate::prism::Presenter::log(
            $crate::prism::log::LogSeverity::Debug,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an INFO message (important events)
///
/// # Example
///
/// ```no_run
/// use prism_present_engine::present_info;
///
/// present_info!("prism::vulkan", "Swapchain ready");
/// ```
#[macro_export]
macro_rules! present_info {
    ($source:expr, $($arg:tt)*) => {
        $crate::prism::Presenter::log(
            $crate::prism::log::LogSeverity::Info,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log a WARN message (potential issues)
///
/// # Example
///
/// ```no_run
/// use prism_present_engine::present_warn;
///
/// present_warn!("prism::vulkan", "Present returned SUBOPTIMAL_KHR");
/// ```
#[macro_export]
macro_rules! present_warn {
    ($source:expr, $($arg:tt)*) => {
        $crate::prism::Presenter::log(
            $crate::prism::log::LogSeverity::Warn,
            $source,
            format!($($arg)*)
        )
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```no_run
/// use prism_present_engine::present_error;
///
/// let error = "VK_ERROR_SURFACE_LOST_KHR";
/// present_error!("prism::vulkan", "Failed to create swapchain: {}", error);
/// ```
#[macro_export]
macro_rules! present_error {
    ($source:expr, $($arg:tt)*) => {
        $crate::prism::Presenter::log_detailed(
            $crate::prism::log::LogSeverity::Error,
            $source,
            format!($($arg)*),
            file!(),
            line!()
        )
    };
}

/// Log an ERROR message and produce a `BackendError` carrying the same text
///
/// # Example
///
/// ```no_run
/// use prism_present_engine::{present_err, prism};
///
/// fn check(code: i32) -> prism::Result<()> {
///     if code != 0 {
///         return Err(present_err!("prism::vulkan", "Unexpected result: {:?}", code));
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! present_err {
    ($source:expr, $($arg:tt)*) => {{
        $crate::present_error!($source, $($arg)*);
        $crate::prism::Error::BackendError(format!($($arg)*))
    }};
}

/// Log an ERROR message and return early with a `BackendError`
///
/// # Example
///
/// ```no_run
/// use prism_present_engine::{present_bail, prism};
///
/// fn check(index: usize, count: usize) -> prism::Result<()> {
///     if index >= count {
///         present_bail!("prism::vulkan", "image index {} out of range", index);
///     }
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! present_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::present_err!($source, $($arg)*))
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
