//! Scatter plots: longitude/latitude value maps and predicted-vs-actual fit.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    symbols,
    text::Span,
    widgets::{Axis, Block, Chart, Dataset, GraphType},
};
use visitcast_core::dataset::{CoordinateBounds, ScatterPoint, ValueRange};

use crate::util::styles::MISSING_COLOR;

/// Number of discrete colours a continuous ramp is split into
const COLOR_BANDS: usize = 8;

/// One observation on the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapPoint {
    pub longitude: f64,
    pub latitude: f64,
    pub value: Option<f64>,
}

/// Colour band of a normalized value
fn band_index(normalized: f64) -> usize {
    ((normalized.clamp(0.0, 1.0) * COLOR_BANDS as f64) as usize).min(COLOR_BANDS - 1)
}

/// Split points into one coordinate list per colour band plus the points
/// without a finite value.
fn group_by_band(points: &[MapPoint], range: &ValueRange) -> (Vec<Vec<(f64, f64)>>, Vec<(f64, f64)>) {
    let mut bands = vec![Vec::new(); COLOR_BANDS];
    let mut missing = Vec::new();
    for p in points {
        let coord = (p.longitude, p.latitude);
        match p.value.filter(|v| v.is_finite()) {
            Some(v) => bands[band_index(range.normalize(v))].push(coord),
            None => missing.push(coord),
        }
    }
    (bands, missing)
}

/// Pad a degenerate range so the chart has a non-zero extent
fn padded(range: &ValueRange) -> [f64; 2] {
    let pad = ((range.max - range.min).abs() * 0.02).max(0.5);
    [range.min - pad, range.max + pad]
}

/// Render points at their coordinates, coloured by `ramp(range.normalize(value))`.
pub fn render_value_map(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    points: &[MapPoint],
    range: &ValueRange,
    bounds: &CoordinateBounds,
    ramp: fn(f64) -> Color,
) {
    let (bands, missing) = group_by_band(points, range);

    let mut datasets: Vec<Dataset> = bands
        .iter()
        .enumerate()
        .filter(|(_, coords)| !coords.is_empty())
        .map(|(i, coords)| {
            let centre = (i as f64 + 0.5) / COLOR_BANDS as f64;
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(ramp(centre)))
                .data(coords)
        })
        .collect();
    if !missing.is_empty() {
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(MISSING_COLOR))
                .data(&missing),
        );
    }

    let x_bounds = padded(&bounds.longitude);
    let y_bounds = padded(&bounds.latitude);

    let x_axis = Axis::default()
        .title("Longitude".dark_gray())
        .bounds(x_bounds)
        .labels(vec![
            Span::raw(format!("{:.0}", x_bounds[0])),
            Span::raw(format!("{:.0}", x_bounds[1])),
        ]);
    let y_axis = Axis::default()
        .title("Latitude".dark_gray())
        .bounds(y_bounds)
        .labels(vec![
            Span::raw(format!("{:.0}", y_bounds[0])),
            Span::raw(format!("{:.0}", y_bounds[1])),
        ]);

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);
    frame.render_widget(chart, area);
}

/// Render actual against predicted log-visits with the `y = x` reference line.
pub fn render_fit_scatter(frame: &mut Frame, area: Rect, block: Block, points: &[ScatterPoint]) {
    let data: Vec<(f64, f64)> = points.iter().map(|p| (p.actual, p.predicted)).collect();

    let range = ValueRange::of(points.iter().flat_map(|p| [p.actual, p.predicted]))
        .unwrap_or_default();
    let axis_bounds = padded(&range);
    let diagonal = [(axis_bounds[0], axis_bounds[0]), (axis_bounds[1], axis_bounds[1])];

    let datasets = vec![
        Dataset::default()
            .name("y = x")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::DarkGray))
            .data(&diagonal),
        Dataset::default()
            .name("libraries")
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Cyan))
            .data(&data),
    ];

    let labels = || {
        vec![
            Span::raw(format!("{:.1}", axis_bounds[0])),
            Span::raw(format!("{:.1}", (axis_bounds[0] + axis_bounds[1]) / 2.0)),
            Span::raw(format!("{:.1}", axis_bounds[1])),
        ]
    };

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Actual log visits".dark_gray())
                .bounds(axis_bounds)
                .labels(labels()),
        )
        .y_axis(
            Axis::default()
                .title("Predicted".dark_gray())
                .bounds(axis_bounds)
                .labels(labels()),
        );
    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(value: Option<f64>) -> MapPoint {
        MapPoint {
            longitude: -96.0,
            latitude: 41.0,
            value,
        }
    }

    #[test]
    fn test_band_index_covers_range() {
        assert_eq!(band_index(0.0), 0);
        assert_eq!(band_index(0.49), 3);
        assert_eq!(band_index(1.0), COLOR_BANDS - 1);
        assert_eq!(band_index(-2.0), 0);
    }

    #[test]
    fn test_missing_values_are_kept_apart() {
        let range = ValueRange { min: 0.0, max: 1.0 };
        let (bands, missing) = group_by_band(
            &[point(Some(0.0)), point(Some(1.0)), point(None), point(Some(f64::NAN))],
            &range,
        );

        assert_eq!(bands[0].len(), 1);
        assert_eq!(bands[COLOR_BANDS - 1].len(), 1);
        assert_eq!(missing.len(), 2);
    }

    #[test]
    fn test_degenerate_range_is_padded() {
        let [lo, hi] = padded(&ValueRange { min: 40.0, max: 40.0 });
        assert!(lo < 40.0 && hi > 40.0);
    }
}
