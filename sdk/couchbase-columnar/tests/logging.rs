use couchbase_columnar::error::ErrorKind;
use couchbase_columnar::logging::{
    configure_logging, console_subscriber, create_console_logger, init_from_env, LOG_LEVEL_ENV,
};
use serial_test::serial;
use tracing::Level;

// Only one global logger can exist per process, these tests run in order against it.

#[test]
#[serial]
fn init_from_env_without_level_does_nothing() {
    std::env::remove_var(LOG_LEVEL_ENV);

    assert!(!init_from_env().unwrap());
}

#[test]
#[serial]
fn unknown_level_is_rejected() {
    let err = create_console_logger("verbose").unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::InvalidArgument(_)));
}

#[test]
#[serial]
fn only_one_logger_can_be_installed() {
    std::env::set_var(LOG_LEVEL_ENV, "debug");
    let first = init_from_env();
    std::env::remove_var(LOG_LEVEL_ENV);
    // Another test in this binary may have installed the logger first.
    match first {
        Ok(installed) => assert!(installed),
        Err(e) => assert!(matches!(e.kind(), ErrorKind::Generic(_))),
    }

    let err = create_console_logger("info").unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::Generic(_)));
    assert!(err.message().contains("another logger has already been initialized"));
}

#[test]
#[serial]
fn custom_sink_is_refused_once_a_logger_exists() {
    // Installs the console logger if no earlier test did.
    let _ = create_console_logger("info");

    let err = configure_logging(console_subscriber(Level::WARN)).unwrap_err();

    assert!(matches!(err.kind(), ErrorKind::Generic(_)));
    assert!(err.message().contains("another logger has already been initialized"));
}
