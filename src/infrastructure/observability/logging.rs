use tracing::Level;
use tracing_subscriber::prelude::*;

/// Where and how log lines are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStyle {
    /// Multi-line, coloured output on stdout (desktop app).
    Pretty,
    /// One line per event on stderr, leaving stdout for results (CLI).
    CompactStderr,
}

pub fn init_tracing(style: LogStyle) {
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into());

    match style {
        LogStyle::Pretty => {
            let stdout_layer = tracing_subscriber::fmt::layer()
                .with_target(false) // cleaner
                .pretty();
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .init();
        }
        LogStyle::CompactStderr => {
            let stderr_layer = tracing_subscriber::fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
        }
    }
}
