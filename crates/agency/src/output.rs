//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Toasts and the loading spinner go to stderr so stdout stays scriptable.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};
use tracing::debug;

use agency_core::{ApplicationStatus, Notifier, ReadStatus, Toast, ToastLevel};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

pub fn paint_read_status(status: ReadStatus, color: bool) -> String {
    let label = status.to_string();
    if !color {
        return label;
    }
    match status {
        ReadStatus::Unread => label.yellow().bold().to_string(),
        ReadStatus::Read => label.dimmed().to_string(),
    }
}

pub fn paint_stage(status: ApplicationStatus, color: bool) -> String {
    let label = status.to_string();
    if !color {
        return label;
    }
    match status {
        ApplicationStatus::Pending => label.yellow().to_string(),
        ApplicationStatus::Reviewed => label.cyan().to_string(),
        ApplicationStatus::Shortlisted => label.blue().bold().to_string(),
        ApplicationStatus::Rejected => label.red().to_string(),
        ApplicationStatus::Hired => label.green().bold().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted string.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> String
where
    T: serde::Serialize + ?Sized,
{
    match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => id_fn(data),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a status footer (page position, "more available") to stderr.
///
/// Only in table mode, so structured output is never interleaved.
pub fn print_footer(global: &GlobalOpts, footer: &str) {
    if global.quiet || footer.is_empty() || !matches!(global.output, OutputFormat::Table) {
        return;
    }
    if should_color(&global.color) {
        eprintln!("{}", footer.dimmed());
    } else {
        eprintln!("{footer}");
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    if rows.is_empty() {
        return "No items.".into();
    }
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> String {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}"))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> String {
    serde_yaml::to_string(data).unwrap_or_else(|e| format!("# serialization failed: {e}"))
}

// ── Toasts ───────────────────────────────────────────────────────────

/// Prints success/info toasts to stderr. Error toasts are only logged:
/// the failing command returns a `CliError` that miette renders.
pub struct CliNotifier {
    quiet: bool,
    color: bool,
}

impl CliNotifier {
    pub fn new(global: &GlobalOpts) -> Self {
        Self {
            quiet: global.quiet,
            color: should_color(&global.color),
        }
    }
}

impl Notifier for CliNotifier {
    fn notify(&self, toast: Toast) {
        if toast.level == ToastLevel::Error {
            debug!(message = %toast.message, "error toast");
            return;
        }
        if self.quiet {
            return;
        }
        if self.color {
            eprintln!("{} {}", "✓".green().bold(), toast.message);
        } else {
            eprintln!("✓ {}", toast.message);
        }
    }
}

// ── Loading indicator ────────────────────────────────────────────────

/// Spinner shown while a collection loads; hidden when stderr is not a
/// terminal or `--quiet` is set.
pub fn spinner(global: &GlobalOpts, message: &str) -> ProgressBar {
    if global.quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}
