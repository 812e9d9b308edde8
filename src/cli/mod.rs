/// CLI layer: argument parsing, logging setup and output formatting.
pub mod args;
pub mod logging;
pub mod output;

pub use args::Cli;
pub use logging::init_tracing;
pub use output::{OutputCtx, write_error, write_progress, write_table};
