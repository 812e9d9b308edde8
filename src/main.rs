#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! plfit-tablegen — run `plfit` over a directory of data files and tabulate the fits.

mod cli;
mod commands;
mod fit;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use cli::{Cli, OutputCtx, init_tracing, write_error};
use fit::{FileNamePattern, SystemRunner};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if err.kind() == ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = Cli::command().print_help();
            std::process::exit(1);
        }
        Err(err) => err.exit(),
    };

    init_tracing();

    let ctx = OutputCtx::new(cli.silent);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let result = FileNamePattern::new().and_then(|pattern| {
        commands::tablegen::run(&cli, &ctx, &pattern, &SystemRunner, &mut out)
    });

    if let Err(err) = result {
        write_error(&mut out, &err);
        std::process::exit(err.exit_code());
    }
}
