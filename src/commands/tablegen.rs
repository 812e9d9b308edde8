/// The tabulation run: collect data files, fit each one, print the table.
use std::io::Write;

use tracing::{debug, info};

use crate::cli::{Cli, OutputCtx, write_error, write_progress, write_table};
use crate::fit::{FileNamePattern, FitError, FitInvoker, ProcessRunner, Record, collect};

/// Run `plfit-tablegen <SOURCE_PATH>`.
///
/// Per-file fit failures are written to `out` and the run continues; the
/// table always includes every collected file.
///
/// # Errors
///
/// Returns the fatal `FitError` when the source directory cannot be read or
/// holds no matching files.
pub fn run<R: ProcessRunner, W: Write>(
    args: &Cli,
    ctx: &OutputCtx,
    pattern: &FileNamePattern,
    runner: &R,
    out: &mut W,
) -> Result<(), FitError> {
    let mut records = collect(&args.source, pattern)?;
    info!(count = records.len(), source = %args.source.display(), "collected data files");

    fit_all(&mut records, &FitInvoker::new(runner), ctx, out);
    let failed = records.iter().filter(|r| !r.is_fitted()).count();
    if failed > 0 {
        debug!(failed, total = records.len(), "some fits failed");
    }

    write_table(out, &records, &ctx.layout);
    Ok(())
}

/// Fit records in order, reporting each failure to `out` as it happens.
///
/// `out` is the one place failures are reported; the log only gets them at
/// debug level.
fn fit_all<R: ProcessRunner, W: Write>(
    records: &mut [Record],
    invoker: &FitInvoker<'_, R>,
    ctx: &OutputCtx,
    out: &mut W,
) {
    for record in records.iter_mut() {
        write_progress(out, record, ctx);
        if let Err(err) = invoker.run_fit(record) {
            debug!(path = %record.path().display(), error = %err, "fit failed");
            write_error(out, &err);
        }
    }
}
