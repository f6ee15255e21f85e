//! Palette and semantic styles for the console.

use ratatui::style::{Color, Modifier, Style};

use agency_core::{ApplicationStatus, ReadStatus, ToastLevel};

// ── Core Palette ──────────────────────────────────────────────────────

pub const ACCENT: Color = Color::Rgb(225, 53, 255); // #e135ff
pub const CYAN: Color = Color::Rgb(128, 255, 234); // #80ffea
pub const CORAL: Color = Color::Rgb(255, 106, 193); // #ff6ac1
pub const YELLOW: Color = Color::Rgb(241, 250, 140); // #f1fa8c
pub const GREEN: Color = Color::Rgb(80, 250, 123); // #50fa7b
pub const RED: Color = Color::Rgb(255, 99, 99); // #ff6363

// ── Extended Palette ──────────────────────────────────────────────────

pub const DIM_WHITE: Color = Color::Rgb(189, 193, 207); // #bdc1cf
pub const BORDER_GRAY: Color = Color::Rgb(98, 114, 164); // #6272a4
pub const BG_HIGHLIGHT: Color = Color::Rgb(40, 42, 54); // #282a36
pub const BG_DARK: Color = Color::Rgb(30, 31, 41); // #1e1f29

// ── Semantic Styles ───────────────────────────────────────────────────

pub fn title_style() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

pub fn border_focused() -> Style {
    Style::default().fg(ACCENT)
}

pub fn border_default() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn table_header() -> Style {
    Style::default()
        .fg(CYAN)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

pub fn table_row() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn table_selected() -> Style {
    Style::default()
        .fg(ACCENT)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Rows with a mutation in flight.
pub fn table_busy() -> Style {
    Style::default().fg(BORDER_GRAY).add_modifier(Modifier::ITALIC)
}

pub fn tab_active() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn tab_inactive() -> Style {
    Style::default().fg(DIM_WHITE)
}

pub fn key_hint() -> Style {
    Style::default().fg(BORDER_GRAY)
}

pub fn key_hint_key() -> Style {
    Style::default().fg(CYAN).add_modifier(Modifier::BOLD)
}

/// Filter bar chip; the active option is highlighted.
pub fn chip(active: bool) -> Style {
    if active {
        Style::default()
            .fg(BG_DARK)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DIM_WHITE)
    }
}

// ── Status colours ────────────────────────────────────────────────────

pub fn read_status(status: ReadStatus) -> Style {
    match status {
        ReadStatus::Unread => Style::default().fg(YELLOW).add_modifier(Modifier::BOLD),
        ReadStatus::Read => Style::default().fg(BORDER_GRAY),
    }
}

pub fn stage(status: ApplicationStatus) -> Style {
    let color = match status {
        ApplicationStatus::Pending => YELLOW,
        ApplicationStatus::Reviewed => CYAN,
        ApplicationStatus::Shortlisted => ACCENT,
        ApplicationStatus::Rejected => RED,
        ApplicationStatus::Hired => GREEN,
    };
    Style::default().fg(color)
}

/// Border colour and icon for a toast.
pub fn toast(level: ToastLevel) -> (Color, &'static str) {
    match level {
        ToastLevel::Success => (GREEN, "✓"),
        ToastLevel::Error => (RED, "✗"),
        ToastLevel::Info => (CYAN, "·"),
    }
}
