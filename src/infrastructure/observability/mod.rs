//! Logging setup shared by the GUI and the headless CLI.
//!
//! Verbosity follows `RUST_LOG`, defaulting to `info`.

pub mod logging;

pub use logging::{LogStyle, init_tracing};
