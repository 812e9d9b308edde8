/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::Parser;

/// plfit-tablegen — fit every structure data file in a directory and tabulate the results.
#[derive(Debug, Parser)]
#[command(
    name = "plfit-tablegen",
    about = "Run plfit on every <tag>_<frame>_<type>_<period>_<tag>_<struct>.dat file in a directory and print a table",
    version,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Directory holding the data files. Not searched recursively.
    #[arg(value_name = "SOURCE_PATH")]
    pub source: PathBuf,

    /// Suppress the per-file "Processing <path>" lines.
    #[arg(long)]
    pub silent: bool,
}
