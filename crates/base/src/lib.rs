//! Shared plumbing for the ikshana crates.
//!
//! Currently this is the logging backend: every crate logs through the `log`
//! facade, and binaries pick a sink with [`init_stdout_logger`] or
//! [`init_file_logger`].

pub mod logging;

pub use logging::{
    FileLogger, LEVEL_VAR, StdoutLogger, init_file_logger, init_stdout_logger, log_file_name,
    resolve_level,
};

// Re-export log crate so downstream crates can use base::log::*
pub use log;
