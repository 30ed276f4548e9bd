//! Warehouse Amber palette and semantic styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

// ── Core Palette ──────────────────────────────────────────────────────

pub const AMBER: Color = Color::Rgb(255, 179, 71); // #ffb347
pub const STEEL_BLUE: Color = Color::Rgb(120, 170, 210); // #78aad2
pub const MOSS_GREEN: Color = Color::Rgb(140, 200, 120); // #8cc878
pub const BRICK_RED: Color = Color::Rgb(224, 90, 80); // #e05a50

// ── Extended Palette ──────────────────────────────────────────────────

pub const FOG_WHITE: Color = Color::Rgb(210, 212, 220); // #d2d4dc
pub const GRID_GRAY: Color = Color::Rgb(95, 105, 125); // #5f697d
pub const BG_HIGHLIGHT: Color = Color::Rgb(44, 48, 58); // #2c303a
pub const BG_DARK: Color = Color::Rgb(26, 28, 34); // #1a1c22

// ── Semantic Styles ───────────────────────────────────────────────────

/// Title text for blocks/panels.
pub fn title_style() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Border for a focused panel.
pub fn border_focused() -> Style {
    Style::default().fg(AMBER)
}

/// Border for an unfocused panel.
pub fn border_default() -> Style {
    Style::default().fg(GRID_GRAY)
}

/// Table header row.
pub fn table_header() -> Style {
    Style::default()
        .fg(STEEL_BLUE)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// Normal table row text.
pub fn table_row() -> Style {
    Style::default().fg(FOG_WHITE)
}

/// Selected / highlighted table row.
pub fn table_selected() -> Style {
    Style::default()
        .fg(AMBER)
        .bg(BG_HIGHLIGHT)
        .add_modifier(Modifier::BOLD)
}

/// Label of the form field that currently has the cursor.
pub fn field_active() -> Style {
    Style::default().fg(AMBER).add_modifier(Modifier::BOLD)
}

/// Label of an inactive form field.
pub fn field_inactive() -> Style {
    Style::default().fg(FOG_WHITE)
}

/// Key hint text (e.g., "q quit  ? help").
pub fn key_hint() -> Style {
    Style::default().fg(GRID_GRAY)
}

/// Key hint key character.
pub fn key_hint_key() -> Style {
    Style::default().fg(STEEL_BLUE).add_modifier(Modifier::BOLD)
}
