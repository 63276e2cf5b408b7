//! Config files and the log sink.
//!
//! The log path is process-wide and can only be set once, so exactly one
//! test in this binary initializes it.

use fpkit::config::{self, Config};
use fpkit::log::{self, LogLevel};
use fpkit::task::{self, Task};
use fpkit::Error;
use tempfile::TempDir;

use crate::fixtures::delayed;

/// Test: config file roundtrip through the filesystem
/// Given a non-default config saved under a fresh directory
/// When loaded back
/// Then it matches, and a missing file loads as defaults
#[test]
fn test_config_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("fpkit.toml");

    let config = Config {
        detach_discarded: true,
        log_level: LogLevel::Debug,
        log_file: Some("~/fpkit.log".to_string()),
    };
    config.save_to(&path).unwrap();
    assert_eq!(Config::load_from(&path).unwrap(), config);

    let missing = dir.path().join("absent.toml");
    assert_eq!(Config::load_from(&missing).unwrap(), Config::default());
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fpkit.toml");
    std::fs::write(&path, "log_file = \"  \"\n").unwrap();
    assert!(matches!(Config::load_from(&path), Err(Error::Validation(_))));

    std::fs::write(&path, "log_level = \"loud\"\n").unwrap();
    assert!(matches!(Config::load_from(&path), Err(Error::TomlParse(_))));
}

/// Test: combinators write trace lines once logging is on
/// Given a config with a log file and trace level, installed globally
/// When a race and a failing ap run
/// Then the log file records who settled first and the caught rejection
#[tokio::test(start_paused = true)]
async fn test_trace_log_records_settle_points() {
    let dir = TempDir::new().unwrap();
    let log_file = dir.path().join("fpkit.log");

    let config = Config::from_toml_str(&format!(
        "log_level = \"trace\"\nlog_file = \"{}\"\n",
        log_file.display()
    ))
    .unwrap();
    assert!(config.detach_discarded);
    log::init_with_config(&config).unwrap();
    config.install().unwrap();

    assert!(log::is_active());
    assert_eq!(log::get_level(), LogLevel::Trace);
    assert!(config::current().detach_discarded);

    let raced = task::race(&delayed("slow", 50), &delayed("fast", 5));
    assert_eq!(raced.run().await.unwrap(), "fast");

    let caught = Task::<u8>::rejected("logged").attempt(|e| e.to_string());
    assert!(caught.run().await.unwrap().is_left());

    let contents = std::fs::read_to_string(&log_file).unwrap();
    assert!(contents.contains("[TRACE] race: right operand settled first (ok=true)"));
    assert!(contents.contains("[DEBUG] race: detaching discarded future"));
    assert!(contents.contains("[DEBUG] try_catch: caught Rejected: logged"));
}
