//! Common styling utilities for TUI components

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders};

/// Standard color for focused panels
pub const FOCUS_COLOR: Color = Color::Yellow;

/// Standard color for help text
pub const HELP_COLOR: Color = Color::DarkGray;

/// Standard color for headers
pub const HEADER_COLOR: Color = Color::Cyan;

/// Standard color for positive values
pub const POSITIVE_COLOR: Color = Color::Green;

/// Standard color for negative values
pub const NEGATIVE_COLOR: Color = Color::Red;

/// Standard color for warning/caution values
pub const WARNING_COLOR: Color = Color::Yellow;

/// Observations without a value for the plotted column
pub const MISSING_COLOR: Color = Color::Rgb(204, 204, 204);

/// Accent per region in the comparison view
pub const URBAN_COLOR: Color = Color::Blue;
pub const RURAL_COLOR: Color = Color::Green;

/// Create a block with a title that shows focused state via border color.
///
/// When focused, the border is yellow. When unfocused, it's the default color.
///
/// # Example
/// ```ignore
/// let block = focused_block("Parameters", is_focused);
/// frame.render_widget(Paragraph::new("...").block(block), area);
/// ```
pub fn focused_block(title: &str, focused: bool) -> Block<'static> {
    let border_style = if focused {
        Style::default().fg(FOCUS_COLOR)
    } else {
        Style::default()
    };

    Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title.to_string())
}

/// Create a block with title and bottom help text that shows focused state.
///
/// The help text is only shown when the panel is focused.
pub fn focused_block_with_help(title: &str, focused: bool, help_text: &str) -> Block<'static> {
    let mut block = focused_block(title, focused);

    if focused && !help_text.is_empty() {
        block = block.title_bottom(Line::from(format!(" {} ", help_text)).fg(HELP_COLOR));
    }

    block
}

/// Green for gains, red for losses, gray for no change
pub fn delta_color(delta: i64) -> Color {
    match delta.signum() {
        1 => POSITIVE_COLOR,
        -1 => NEGATIVE_COLOR,
        _ => HELP_COLOR,
    }
}

/// Ramp for a normalized coefficient value.
///
/// `0.0` is magenta, fading through light blue to yellow at `0.5` and red
/// at `1.0`. Input is clamped to `[0, 1]`.
pub fn coefficient_color(normalized: f64) -> Color {
    let t = normalized.clamp(0.0, 1.0);
    if t < 0.5 {
        let r = (255.0 * (1.0 - t * 2.0)).floor() as u8;
        let g = (255.0 * t * 2.0).floor() as u8;
        Color::Rgb(r, g, 255)
    } else {
        let g = (255.0 * (2.0 - t * 2.0)).floor() as u8;
        Color::Rgb(255, g, 0)
    }
}

/// Yellow-orange-purple ramp for a normalized local R²
pub fn r2_color(normalized: f64) -> Color {
    let t = normalized.clamp(0.0, 1.0);
    if t < 0.5 {
        let s = t * 2.0;
        let g = (224.0 - s * (224.0 - 159.0)).floor() as u8;
        let b = (71.0 - s * 71.0).floor() as u8;
        Color::Rgb(253, g, b)
    } else {
        let s = (t - 0.5) * 2.0;
        let r = (251.0 - s * (251.0 - 168.0)).floor() as u8;
        let g = (146.0 - s * 146.0).floor() as u8;
        let b = (59.0 + s * (168.0 - 59.0)).floor() as u8;
        Color::Rgb(r, g, b)
    }
}
