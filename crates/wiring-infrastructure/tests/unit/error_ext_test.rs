//! Error Extension Tests

use std::io;
use wiring_domain::error::{Error, Result};
use wiring_infrastructure::error_ext::ErrorContext;

fn not_found() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "file not found")
}

#[test]
fn test_io_context() {
    let result: Result<()> = Err(not_found()).io_context("failed to read snapshot");

    match result {
        Err(Error::Io { message, source }) => {
            assert_eq!(message, "failed to read snapshot: file not found");
            assert!(source.is_some());
        }
        _ => panic!("Expected Io error"),
    }
}

#[test]
fn test_context_is_infrastructure() {
    let result: Result<()> = Err(not_found()).context("failed to write report");

    match result {
        Err(Error::Infrastructure { message, .. }) => {
            assert!(message.starts_with("failed to write report"));
        }
        _ => panic!("Expected Infrastructure error"),
    }
}

#[test]
fn test_with_context_is_lazy() {
    let ok: std::result::Result<u8, io::Error> = Ok(7);
    let value = ok
        .with_context(|| -> String { panic!("context must not be built on success") })
        .unwrap();
    assert_eq!(value, 7);

    let result: Result<u8> =
        Err(not_found()).with_context(|| format!("failed to open {}", "wiring.toml"));
    match result {
        Err(Error::Infrastructure { message, .. }) => assert!(message.contains("wiring.toml")),
        _ => panic!("Expected Infrastructure error"),
    }
}

#[test]
fn test_config_context() {
    let result: Result<()> = Err(not_found()).config_context("failed to extract configuration");

    match result {
        Err(Error::Config { message, source }) => {
            assert!(message.contains("failed to extract configuration"));
            assert!(source.is_some());
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_error_display() {
    let error = Error::invalid_input("declaration App.Cache appears more than once");
    assert_eq!(
        error.to_string(),
        "Invalid input: declaration App.Cache appears more than once"
    );
}
