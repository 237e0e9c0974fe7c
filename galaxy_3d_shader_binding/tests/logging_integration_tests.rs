//! Integration tests for the Engine logging sink
//!
//! No GPU required.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_shader_binding::galaxy3d::Engine;
use galaxy_3d_shader_binding::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use galaxy_3d_shader_binding::{engine_err, engine_warn};
use galaxy_3d_shader_binding::galaxy3d::Error;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_custom_logger() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test::module", "Test info message".to_string());
    Engine::log(LogSeverity::Warn, "test::module", "Test warning message".to_string());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].severity, LogSeverity::Info);
    assert_eq!(captured[1].message, "Test warning message");
    assert_eq!(captured[1].file, None);

    drop(captured);
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_error_logging_with_location() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log_detailed(
        LogSeverity::Error,
        "test::error",
        "Critical error occurred".to_string(),
        "test_file.rs",
        42,
    );

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].file, Some("test_file.rs"));
    assert_eq!(captured[0].line, Some(42));

    drop(captured);
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_macros() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    engine_warn!("galaxy3d::ShaderObject", "{} stage disabled", "hull");
    let error = engine_err!("galaxy3d::ConstantBufferStore", "size {} too large", 1 << 20);

    assert!(matches!(error, Error::BackendError(ref m) if m == "size 1048576 too large"));
    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].source, "galaxy3d::ShaderObject");
    assert_eq!(captured[0].message, "hull stage disabled");
    assert_eq!(captured[1].severity, LogSeverity::Error);
    assert!(captured[1].line.is_some());

    drop(captured);
    Engine::reset_logger();
}

#[test]
#[serial]
fn test_integration_logger_reset() {
    let (test_logger, entries) = TestLogger::new();
    Engine::set_logger(test_logger);

    Engine::log(LogSeverity::Info, "test", "Message 1".to_string());
    Engine::reset_logger();
    Engine::log(LogSeverity::Info, "test", "Message 2".to_string());

    assert_eq!(entries.lock().unwrap().len(), 1);
}
