//! Block-character histogram over pre-binned counts.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use visitcast_core::dataset::HistogramBin;

/// Block characters for sub-character precision (from empty to full)
const BIN_CHARS: [&str; 9] = [" ", "▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Glyph for one cell of a bar `bar_units` eighths tall, at the row whose
/// bottom edge sits `row_base` eighths above the axis.
fn cell_glyph(bar_units: usize, row_base: usize) -> &'static str {
    if bar_units >= row_base + 8 {
        BIN_CHARS[8]
    } else if bar_units > row_base {
        BIN_CHARS[bar_units - row_base]
    } else {
        BIN_CHARS[0]
    }
}

/// Bar heights in eighths of a row, scaled so the tallest bin fills `rows`
fn bar_units(bins: &[HistogramBin], rows: usize) -> Vec<usize> {
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0);
    if max_count == 0 {
        return vec![0; bins.len()];
    }
    let height_units = rows * 8;
    bins.iter()
        .map(|b| ((b.count as f64 / max_count as f64) * height_units as f64).round() as usize)
        .collect()
}

/// Render `bins` as vertical bars with the value range underneath.
pub fn render_histogram(
    frame: &mut Frame,
    area: Rect,
    bins: &[HistogramBin],
    color: Color,
    precision: usize,
) {
    let height = area.height.saturating_sub(2) as usize;
    if bins.is_empty() {
        let msg = Paragraph::new("No values").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, area);
        return;
    }
    if height < 2 || (area.width as usize) < bins.len() {
        let msg = Paragraph::new("Area too small").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, area);
        return;
    }

    let column_width = (area.width as usize / bins.len()).max(1);
    let bar_width = column_width.saturating_sub(1).max(1);
    let units = bar_units(bins, height);
    let style = Style::default().fg(color);

    for row in 0..height {
        let row_base = (height - 1 - row) * 8;
        let spans: Vec<Span> = units
            .iter()
            .flat_map(|&u| {
                let glyph = cell_glyph(u, row_base);
                [
                    Span::styled(glyph.repeat(bar_width), style),
                    Span::raw(" ".repeat(column_width - bar_width)),
                ]
            })
            .collect();
        let row_area = Rect::new(area.x, area.y + row as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }

    // Bin counts under each bar
    let counts: Vec<Span> = bins
        .iter()
        .map(|b| {
            Span::styled(
                format!("{:^width$}", b.count, width = column_width),
                Style::default().fg(Color::DarkGray),
            )
        })
        .collect();
    let counts_area = Rect::new(area.x, area.y + height as u16, area.width, 1);
    frame.render_widget(Paragraph::new(Line::from(counts)), counts_area);

    let first = bins.first().map(|b| b.start).unwrap_or(0.0);
    let last = bins.last().map(|b| b.end).unwrap_or(0.0);
    let left = format!("{first:.precision$}");
    let right = format!("{last:.precision$}");
    let gap = (area.width as usize).saturating_sub(left.len() + right.len());
    let label_line = Line::from(vec![
        Span::styled(left, Style::default().fg(Color::DarkGray)),
        Span::raw(" ".repeat(gap)),
        Span::styled(right, Style::default().fg(Color::DarkGray)),
    ]);
    let label_area = Rect::new(area.x, area.y + height as u16 + 1, area.width, 1);
    frame.render_widget(Paragraph::new(label_line), label_area);
}
