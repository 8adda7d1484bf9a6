//! Color constants and auto-scaling helpers for the chart.

use ratatui::style::Color;

/// Series colors, cycled by column position.
pub const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
];
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text and hidden series color.
pub const FOOTER_FG: Color = Color::DarkGray;

/// Color of the series at `position`.
pub fn series_color(position: usize) -> Color {
    SERIES_COLORS[position % SERIES_COLORS.len()]
}

/// Computes Y-axis bounds with 10% padding above; demand never drops below 0.
pub fn auto_bounds_y<'a>(series: impl IntoIterator<Item = &'a [(f64, f64)]>) -> [f64; 2] {
    let max = series
        .into_iter()
        .flat_map(|points| points.iter().map(|&(_, y)| y))
        .fold(f64::NEG_INFINITY, f64::max);
    if !max.is_finite() || max <= 0.0 {
        return [0.0, 1.0];
    }
    [0.0, max * 1.1]
}
