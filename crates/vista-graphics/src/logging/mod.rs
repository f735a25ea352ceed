//! Logging setup.
//!
//! Library code only emits through the `log` facade: handle lifecycle at
//! `debug`, transform recomputation at `trace`, native backend misuse at
//! `warn`. Applications and tests install a backend with [`init_logging`].

mod init;

pub use init::{init_logging, LoggingConfig};
