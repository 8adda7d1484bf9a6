//! Chart layout and widget rendering.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use super::style;
use super::viewer::PlotViewer;

/// Axis label date format.
const LABEL_FORMAT: &str = "%Y-%m-%d";

/// Renders the full frame.
pub fn render(frame: &mut Frame, viewer: &PlotViewer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(10),   // chart
            Constraint::Length(1), // legend
            Constraint::Length(1), // footer
        ])
        .split(frame.area());

    render_header(frame, viewer, chunks[0]);
    render_chart(frame, viewer, chunks[1]);
    render_legend(frame, viewer, chunks[2]);
    render_footer(frame, chunks[3]);
}

/// Header bar: visible date range and window width.
fn render_header(frame: &mut Frame, viewer: &PlotViewer, area: Rect) {
    let (start, end) = viewer.range();
    let span = match (viewer.timestamp(start), viewer.timestamp(end.saturating_sub(1))) {
        (Some(a), Some(b)) => format!(
            " {} → {} │ {} h ",
            a.format(LABEL_FORMAT),
            b.format(LABEL_FORMAT),
            end - start
        ),
        _ => " no data ".to_string(),
    };
    let header = Line::from(vec![
        Span::styled(
            " HEAT DEMAND ",
            Style::default()
                .fg(style::HEADER_FG)
                .bg(style::HEADER_BG)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(span),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

/// Line chart of every visible series.
fn render_chart(frame: &mut Frame, viewer: &PlotViewer, area: Rect) {
    let data: Vec<(usize, Vec<(f64, f64)>)> = viewer
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.visible)
        .map(|(i, _)| (i, viewer.points(i)))
        .collect();

    let y_bounds = style::auto_bounds_y(data.iter().map(|(_, points)| points.as_slice()));
    let (start, end) = viewer.range();
    let x_lo = start as f64;
    let x_hi = (end.saturating_sub(1) as f64).max(x_lo + 1.0);

    let datasets: Vec<Dataset> = data
        .iter()
        .map(|(i, points)| {
            Dataset::default()
                .name(viewer.series[*i].label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(style::series_color(*i)))
                .data(points)
        })
        .collect();

    let mid = start + (end - start) / 2;
    let x_labels: Vec<String> = [start, mid, end.saturating_sub(1)]
        .into_iter()
        .map(|h| {
            viewer
                .timestamp(h)
                .map_or_else(String::new, |t| t.format(LABEL_FORMAT).to_string())
        })
        .collect();
    let y_labels = vec![
        format!("{:.1}", y_bounds[0]),
        format!("{:.1}", (y_bounds[0] + y_bounds[1]) / 2.0),
        format!("{:.1}", y_bounds[1]),
    ];

    let chart = Chart::new(datasets)
        .block(Block::default().title(" Hourly heat demand ").borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title("Date")
                .bounds([x_lo, x_hi])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Heat demand in kW")
                .bounds(y_bounds)
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Series keys with their toggle numbers; hidden series are dimmed.
fn render_legend(frame: &mut Frame, viewer: &PlotViewer, area: Rect) {
    let spans: Vec<Span> = viewer
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let color = if s.visible {
                style::series_color(i)
            } else {
                style::FOOTER_FG
            };
            Span::styled(format!(" {}:{} ", i + 1, s.label), Style::default().fg(color))
        })
        .collect();
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Footer with keybinding hints.
fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new(Line::from(Span::styled(
        " q:Quit  ←/→:Pan  +/-:Zoom  1-9:Toggle series  Home:Reset",
        Style::default().fg(style::FOOTER_FG),
    )));
    frame.render_widget(footer, area);
}
