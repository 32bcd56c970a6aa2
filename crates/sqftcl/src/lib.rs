//! sqftcl command-line tool: configuration, argument database and commands.

pub mod argdb;
pub mod commands;
pub mod config;

pub use argdb::{ArgDatabase, ArgDbError, ArgEntry};
pub use commands::{Cli, Command, exit_code, run};
pub use config::SqftclConfig;

/// Install the stderr tracing subscriber. `RUST_LOG` wins over `debug`.
pub fn init_logging(debug: bool) {
    use tracing_subscriber::EnvFilter;

    let default = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
