/// Output formatting: table, list and JSON renderings, notices and errors.
use std::io::{IsTerminal, Write};

use colored::{Color, Colorize};
use comfy_table::{Cell, CellAlignment, Color as CellColor, Table, presets::UTF8_BORDERS_ONLY};
use rust_decimal::Decimal;

use super::args::OutputFormat;
use crate::transactions::{Status, Summary, Transaction};
use crate::types::{ErrorOutput, TransactionReport};

const TABLE_TITLE: &str = "Bank Transactions";
const NO_MERCHANT: &str = "N/A";
const NO_TRANSACTIONS: &str = "No transactions found.";

/// Output context passed to all writers.
pub struct OutputCtx {
    pub format: OutputFormat,
    /// Whether ANSI colors may be emitted.
    pub color: bool,
    /// When true, log timing spans at debug level.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args. Color is off when stdout is piped or `NO_COLOR` is set.
    #[must_use]
    pub fn new(format: OutputFormat, no_color: bool, debug: bool) -> Self {
        let color = !no_color
            && std::env::var_os("NO_COLOR").is_none()
            && std::io::stdout().is_terminal();
        Self {
            format,
            color,
            debug,
        }
    }

    /// Start a named debug timer. Logs elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

// --- Shared cell formatting ---

/// `-$45.23` for debits, `+$500.00` for credits.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        '-'
    } else {
        '+'
    };
    format!("{sign}${:.2}", amount.abs())
}

fn amount_color(txn: &Transaction) -> Color {
    if txn.is_debit() { Color::Red } else { Color::Green }
}

fn tint(text: &str, color: Color, enabled: bool) -> String {
    if enabled {
        text.color(color).to_string()
    } else {
        text.to_owned()
    }
}

// --- Table ---

/// Render transactions as a bordered table followed by the summary block.
#[must_use]
pub fn render_table(transactions: &[Transaction], color: bool) -> String {
    if transactions.is_empty() {
        return format!("{}\n", tint(NO_TRANSACTIONS, Color::Yellow, color));
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    if color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
    table.set_header(["DATE", "AMOUNT", "DESCRIPTION", "MERCHANT", "CATEGORY", "STATUS"]);

    for txn in transactions {
        let cell_color = if txn.is_debit() {
            CellColor::Red
        } else {
            CellColor::Green
        };
        let status = match txn.status {
            Status::Pending => Cell::new(txn.status).fg(CellColor::Yellow),
            Status::Posted => Cell::new(txn.status).fg(CellColor::Green),
        };
        table.add_row(vec![
            Cell::new(txn.date).fg(CellColor::Cyan),
            Cell::new(format_amount(txn.amount)).fg(cell_color),
            Cell::new(&txn.description),
            Cell::new(txn.merchant.as_deref().unwrap_or(NO_MERCHANT)).fg(CellColor::Blue),
            Cell::new(&txn.category),
            status,
        ]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    let title = if color {
        TABLE_TITLE.bold().to_string()
    } else {
        TABLE_TITLE.to_owned()
    };
    format!(
        "{title}\n{table}\n\n{}",
        render_summary(&Summary::of(transactions), color)
    )
}

// --- List ---

/// Render one numbered line per transaction, without borders.
#[must_use]
pub fn render_list(transactions: &[Transaction], color: bool) -> String {
    if transactions.is_empty() {
        return format!("{}\n", tint(NO_TRANSACTIONS, Color::Yellow, color));
    }

    let mut out = String::new();
    for (i, txn) in transactions.iter().enumerate() {
        let amount = tint(&format_amount(txn.amount), amount_color(txn), color);
        let pending = match txn.status {
            Status::Pending => format!(" {}", tint("(Pending)", Color::Yellow, color)),
            Status::Posted => String::new(),
        };
        out.push_str(&format!(
            "{}. {} | {amount} | {}{pending}\n",
            i + 1,
            txn.date,
            txn.description
        ));
        if let Some(merchant) = &txn.merchant {
            out.push_str(&format!("   Merchant: {merchant}\n"));
        }
        out.push_str(&format!("   Category: {}\n\n", txn.category));
    }
    out.push_str(&render_summary(&Summary::of(transactions), color));
    out
}

// --- Summary ---

fn render_summary(summary: &Summary, color: bool) -> String {
    let heading = if color {
        "Summary:".bold().to_string()
    } else {
        "Summary:".to_owned()
    };
    let debits = tint(&format!("-${:.2}", summary.debits.abs()), Color::Red, color);
    let credits = tint(&format!("+${:.2}", summary.credits.abs()), Color::Green, color);
    format!(
        "{heading}\n  Total Debits:  {debits}\n  Total Credits: {credits}\n  Net Change:    {}\n  Transactions:  {}\n",
        format_amount(summary.net),
        summary.count
    )
}

// --- JSON ---

/// Render the transactions and their summary as a pretty-printed JSON document.
///
/// # Errors
///
/// Returns `serde_json::Error` if serialization fails.
pub fn render_json(transactions: &[Transaction]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&TransactionReport::new(transactions))
}

/// Write transactions to stdout in the context's format.
pub fn write_transactions(transactions: &[Transaction], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Table => print!("{}", render_table(transactions, ctx.color)),
        OutputFormat::List => print!("{}", render_list(transactions, ctx.color)),
        OutputFormat::Json => match render_json(transactions) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("JSON serialization error: {e}"),
        },
    }
}

// --- Notices ---

/// Write an informational message that is not an error.
///
/// JSON mode keeps stdout machine-readable: the message goes to stderr.
pub fn write_notice(message: &str, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => eprintln!("{message}"),
        OutputFormat::Table | OutputFormat::List => {
            println!("{}", tint(message, Color::Yellow, ctx.color));
        }
    }
}

/// Write a pass/fail status line.
pub fn write_status(ok: bool, message: &str, ctx: &OutputCtx) {
    let (mark, color) = if ok {
        ("✓", Color::Green)
    } else {
        ("✗", Color::Red)
    };
    println!("{} {message}", tint(mark, color, ctx.color));
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &ErrorOutput, format: OutputFormat) {
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match format {
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        OutputFormat::Table | OutputFormat::List => {
            let _ = writeln!(out, "Error: {}", err.error.message);
            if let Some(request_id) = &err.error.request_id {
                let _ = writeln!(out, "  Request ID: {request_id}");
            }
            if let Some(hint) = &err.error.hint {
                let _ = writeln!(out, "  Hint: {hint}");
            }
        }
    }
}

// --- Debug timer ---

/// A RAII timer that logs elapsed milliseconds on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            tracing::debug!(label = self.label, "{ms:.2}ms");
        }
    }
}
