//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Header and status bar background.
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Text drawn on top of `GOLD`.
pub const INK: Color = Color::Rgb(20, 20, 20);
/// Background of destructive confirmations.
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);
/// Background of alerts.
pub const DARK_BLUE: Color = Color::Rgb(0, 40, 110);
/// Pending status label.
pub const AMBER: Color = Color::Rgb(243, 156, 18);
/// Done status label and the active filter toggle.
pub const GREEN: Color = Color::Rgb(46, 204, 113);
