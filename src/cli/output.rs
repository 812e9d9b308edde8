/// Output formatting: progress lines, error reports and the results table.
use std::fmt::Display;
use std::io::Write;

use comfy_table::{Cell, CellAlignment, ColumnConstraint, Table, Width, presets::NOTHING};

use crate::fit::{FitError, Record};

/// Column labels, in display order.
///
/// `DP` is `xmin`, `n` is the shifted `alpha`, `L` the log-likelihood.
pub const HEADERS: [&str; 7] = ["Frame", "H2/Ht", "Period", "Structure", "DP", "n", "L"];

/// Fixed table formatting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Minimum column width in characters.
    pub min_width: u16,
    /// Spaces to the left of every cell.
    pub padding: u16,
    /// Decimal places for floating-point columns.
    pub precision: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            min_width: 5,
            padding: 2,
            precision: 6,
        }
    }
}

/// Output context passed to the command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputCtx {
    /// When true, per-file progress lines are not printed.
    pub silent: bool,
    /// Formatting for the results table.
    pub layout: TableLayout,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(silent: bool) -> Self {
        Self {
            silent,
            layout: TableLayout::default(),
        }
    }
}

// --- Progress ---

/// Announce that `record` is about to be fitted, unless silenced.
pub fn write_progress<W: Write>(out: &mut W, record: &Record, ctx: &OutputCtx) {
    if !ctx.silent {
        let _ = writeln!(out, "Processing {}", record.path().display());
    }
}

// --- Error output ---

/// Write an error, plus any output the fitting tool produced before failing.
pub fn write_error<W: Write>(out: &mut W, err: &FitError) {
    let _ = writeln!(out, "Error: {err}");
    if let Some((stdout, stderr)) = err.captured_output() {
        for (label, text) in [("stdout", stdout), ("stderr", stderr)] {
            let text = text.trim_end();
            if text.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {label}:");
            for line in text.lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
    }
}

// --- Results table ---

/// Render `records` as a right-aligned table and flush `out`.
///
/// Rows keep the order of `records`. Unfitted records show zeros.
pub fn write_table<W: Write>(out: &mut W, records: &[Record], layout: &TableLayout) {
    let table = build_table(records, layout);
    let _ = writeln!(out, "{table}");
    let _ = out.flush();
}

fn build_table(records: &[Record], layout: &TableLayout) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_header(HEADERS.map(right));

    for record in records {
        let meta = record.meta();
        let fit = record.fit();
        let precision = layout.precision;
        table.add_row([
            right(meta.frame),
            right(&meta.kind),
            right(meta.period),
            right(meta.struct_no),
            right(format!("{:.precision$}", fit.xmin)),
            right(format!("{:.precision$}", fit.alpha)),
            right(format!("{:.precision$}", fit.likelihood)),
        ]);
    }

    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
        column.set_padding((layout.padding, 0));
        column.set_constraint(ColumnConstraint::LowerBoundary(Width::Fixed(layout.min_width)));
    }

    table
}

fn right<T: Display>(content: T) -> Cell {
    Cell::new(content).set_alignment(CellAlignment::Right)
}
