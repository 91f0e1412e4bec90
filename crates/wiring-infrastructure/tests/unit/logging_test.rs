//! Logging Tests

use tracing::Level;
use wiring_domain::error::Error;
use wiring_infrastructure::config::LoggingConfig;
use wiring_infrastructure::logging::{init_logging, parse_log_level};

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("info").unwrap(), Level::INFO);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
}

#[test]
fn test_parse_invalid_log_level() {
    match parse_log_level("verbose") {
        Err(Error::Config { message, .. }) => assert!(message.contains("verbose")),
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_logging_installs_once() {
    let config = LoggingConfig::default();

    init_logging(&config).unwrap();
    match init_logging(&config) {
        Err(Error::Infrastructure { .. }) => {}
        _ => panic!("Expected Infrastructure error on second install"),
    }
}
