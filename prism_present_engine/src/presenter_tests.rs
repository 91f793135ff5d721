//! Unit tests for presenter.rs
//!
//! All tests are marked with #[serial] because they swap the global logger.

use std::sync::{Arc, Mutex};
use serial_test::serial;

use crate::log::{Logger, LogEntry, LogSeverity};
use crate::presenter::Presenter;

struct CapturingLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CapturingLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install_capture() -> Arc<Mutex<Vec<LogEntry>>> {
    let entries = Arc::new(Mutex::new(Vec::new()));
    Presenter::set_logger(CapturingLogger {
        entries: entries.clone(),
    });
    entries
}

// ============================================================================
// LOGGER ROUTING TESTS
// ============================================================================

#[test]
#[serial]
fn test_log_routes_to_installed_logger() {
    let entries = install_capture();

    Presenter::log(LogSeverity::Info, "prism::test", "hello".to_string());

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "prism::test");
        assert_eq!(captured[0].message, "hello");
        assert!(captured[0].file.is_none());
    }

    Presenter::reset_logger();
}

#[test]
#[serial]
fn test_log_detailed_carries_location() {
    let entries = install_capture();

    Presenter::log_detailed(
        LogSeverity::Error,
        "prism::test",
        "boom".to_string(),
        "presenter_tests.rs",
        7,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("presenter_tests.rs"));
        assert_eq!(captured[0].line, Some(7));
    }

    Presenter::reset_logger();
}

#[test]
#[serial]
fn test_reset_logger_detaches_custom_logger() {
    let entries = install_capture();
    Presenter::reset_logger();

    Presenter::log(LogSeverity::Info, "prism::test", "after reset".to_string());
    assert!(entries.lock().unwrap().is_empty());
}

// ============================================================================
// MACRO TESTS
// ============================================================================

#[test]
#[serial]
fn test_present_macros_route_through_presenter() {
    let entries = install_capture();

    crate::present_info!("prism::test", "chain has {} images", 3);
    crate::present_warn!("prism::test", "suboptimal");
    crate::present_error!("prism::test", "lost: {}", "gone");

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 3);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].message, "chain has 3 images");
        assert_eq!(captured[1].severity, LogSeverity::Warn);
        assert_eq!(captured[2].severity, LogSeverity::Error);
        // present_error! records the call site
        assert!(captured[2].file.is_some());
        assert!(captured[2].line.is_some());
    }

    Presenter::reset_logger();
}

#[test]
#[serial]
fn test_present_err_macro_logs_and_returns_error() {
    let entries = install_capture();

    let err = crate::present_err!("prism::test", "index {} out of range", 9);
    match err {
        crate::prism::Error::BackendError(msg) => assert_eq!(msg, "index 9 out of range"),
        other => panic!("expected BackendError, got {:?}", other),
    }
    assert_eq!(entries.lock().unwrap().len(), 1);

    Presenter::reset_logger();
}

#[test]
#[serial]
fn test_present_bail_macro_returns_early() {
    let entries = install_capture();

    fn failing() -> crate::prism::Result<u32> {
        crate::present_bail!("prism::test", "bailing out");
    }

    let result = failing();
    assert!(result.is_err());
    assert_eq!(entries.lock().unwrap().len(), 1);

    Presenter::reset_logger();
}
