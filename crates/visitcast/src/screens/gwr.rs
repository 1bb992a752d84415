use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use visitcast_core::dataset::{
    CoefficientField, DEFAULT_BINS, Dataset, DatasetSummary, GwrObservation, ValueRange, histogram,
};

use super::Screen;
use crate::components::charts::{MapPoint, render_fit_scatter, render_histogram, render_value_map};
use crate::components::{Component, EventResult};
use crate::state::{AppState, DatasetState};
use crate::util::format::format_count;
use crate::util::styles::{HELP_COLOR, coefficient_color, r2_color};

/// Map points carrying one value column
fn map_points(dataset: &Dataset, value: impl Fn(&GwrObservation) -> Option<f64>) -> Vec<MapPoint> {
    dataset
        .observations()
        .iter()
        .filter_map(|o| {
            Some(MapPoint {
                longitude: o.longitude?,
                latitude: o.latitude?,
                value: value(o),
            })
        })
        .collect()
}

/// Colour scale drawn under a map: low label, ramp, high label
fn legend(range: &ValueRange, ramp: fn(f64) -> Color) -> Line<'static> {
    let mut spans = vec![Span::raw(format!(" {:.3} ", range.min))];
    for i in 0..8 {
        spans.push(Span::styled("█", Style::default().fg(ramp((i as f64 + 0.5) / 8.0))));
    }
    spans.push(Span::raw(format!(" {:.3} ", range.max)));
    Line::from(spans)
}

pub struct GwrScreen;

impl GwrScreen {
    pub fn new() -> Self {
        Self
    }

    fn render_summary(
        &self,
        frame: &mut Frame,
        area: Rect,
        dataset: &Dataset,
        summary: &DatasetSummary,
        source: &str,
    ) {
        let stat = |label: &'static str, value: String, color: Color| {
            vec![
                Span::styled(label, Style::default().fg(HELP_COLOR)),
                Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
                Span::raw("   "),
            ]
        };

        let mut spans = Vec::new();
        spans.extend(stat("Libraries ", format_count(summary.observations as u64), Color::Blue));
        spans.extend(stat("Mean Local R² ", format!("{:.3}", summary.mean_local_r2), Color::Green));
        spans.extend(stat("RMSE ", format!("{:.3}", summary.rmse), Color::Magenta));
        spans.extend(stat("Max Local R² ", format!("{:.3}", summary.max_local_r2), Color::LightRed));

        let mut lines = vec![Line::from(spans)];
        let mut detail = format!("Source: {source}");
        if dataset.discarded() > 0 {
            detail.push_str(&format!(
                "  ({} rows without location or visits skipped)",
                dataset.discarded()
            ));
        }
        lines.push(Line::from(Span::styled(detail, Style::default().fg(HELP_COLOR))));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" GWR ANALYSIS RESULTS ");
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_coefficient_map(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        dataset: &Dataset,
        summary: &DatasetSummary,
    ) {
        let field = state.coefficient;
        let range = summary.coefficient_range(field);
        let points = map_points(dataset, |o| field.value(o));

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Coefficient: {} ", field.label()))
            .title_bottom(legend(&range, coefficient_color))
            .title_bottom(Line::from(" c: next coefficient ").fg(HELP_COLOR).right_aligned());

        render_value_map(frame, area, block, &points, &range, &summary.bounds, coefficient_color);
    }

    fn render_r2_map(
        &self,
        frame: &mut Frame,
        area: Rect,
        dataset: &Dataset,
        summary: &DatasetSummary,
    ) {
        let range = ValueRange::of(dataset.local_r2_values()).unwrap_or_default();
        let points = map_points(dataset, |o| o.local_r2);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Local R² ")
            .title_bottom(legend(&range, r2_color));

        render_value_map(frame, area, block, &points, &range, &summary.bounds, r2_color);
    }

    fn render_histograms(&self, frame: &mut Frame, area: Rect, dataset: &Dataset) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let panels = [
            (" Residual Distribution ", dataset.residual_values(), Color::Cyan, 2),
            (" Local R² Distribution ", dataset.local_r2_values(), Color::Yellow, 3),
        ];
        for ((title, values, color, precision), chunk) in panels.into_iter().zip(chunks.iter()) {
            let block = Block::default().borders(Borders::ALL).title(title);
            let inner = block.inner(*chunk);
            frame.render_widget(block, *chunk);
            render_histogram(frame, inner, &histogram(&values, DEFAULT_BINS), color, precision);
        }
    }

    fn render_fit(&self, frame: &mut Frame, area: Rect, dataset: &Dataset) {
        let points = dataset.scatter_actual_vs_predicted();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Actual vs Predicted ({}) ", format_count(points.len() as u64)));
        render_fit_scatter(frame, area, block, &points);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

impl Default for GwrScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for GwrScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char('c') if key.modifiers.is_empty() => {
                state.cycle_coefficient();
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let (source, dataset, summary) = match &state.dataset {
            DatasetState::Loading { source } => {
                self.render_message(
                    frame,
                    area,
                    " LOADING ",
                    vec![
                        Line::from(""),
                        Line::from("Loading GWR results…"),
                        Line::from(Span::styled(source.as_str(), Style::default().fg(HELP_COLOR))),
                    ],
                );
                return;
            }
            DatasetState::Failed { source, message } => {
                self.render_message(
                    frame,
                    area,
                    " ERROR ",
                    vec![
                        Line::from(""),
                        Line::from(Span::styled(
                            "Could not load the GWR results.",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )),
                        Line::from(""),
                        Line::from(message.as_str()),
                        Line::from(""),
                        Line::from(Span::styled(
                            format!("Source: {source}"),
                            Style::default().fg(HELP_COLOR),
                        )),
                        Line::from(Span::styled(
                            "Set `dataset` in config.yaml or pass --dataset, then restart.",
                            Style::default().fg(HELP_COLOR),
                        )),
                    ],
                );
                return;
            }
            DatasetState::Empty { source, discarded } => {
                self.render_message(
                    frame,
                    area,
                    " NO DATA ",
                    vec![
                        Line::from(""),
                        Line::from(Span::styled(
                            "The dataset has no usable observations.",
                            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                        )),
                        Line::from(""),
                        Line::from(format!(
                            "{discarded} rows were skipped for a missing location or visit count."
                        )),
                        Line::from(Span::styled(
                            format!("Source: {source}"),
                            Style::default().fg(HELP_COLOR),
                        )),
                    ],
                );
                return;
            }
            DatasetState::Ready {
                source,
                dataset,
                summary,
            } => (source, dataset, summary),
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Percentage(55),
                Constraint::Min(8),
            ])
            .split(area);

        self.render_summary(frame, rows[0], dataset, summary, source);

        let maps = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        self.render_coefficient_map(frame, maps[0], state, dataset, summary);
        self.render_r2_map(frame, maps[1], dataset, summary);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[2]);
        self.render_histograms(frame, bottom[0], dataset);
        self.render_fit(frame, bottom[1], dataset);
    }
}

impl Screen for GwrScreen {
    fn title(&self) -> &str {
        "GWR Analysis"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visitcast_core::dataset::parse_observations;

    #[test]
    fn test_map_points_keep_missing_values() {
        let csv = "LATITUDE,LONGITUD,log_VISITS,gwr_coef_log_TOTSTAFF\n\
                   41.0,-96.0,10.0,0.4\n\
                   42.0,-97.0,11.0,\n";
        let dataset = parse_observations(csv.as_bytes()).unwrap();

        let points = map_points(&dataset, |o| CoefficientField::LogStaff.value(o));
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].value, Some(0.4));
        assert_eq!(points[1].value, None);
        assert_eq!(points[1].longitude, -97.0);
    }

    #[test]
    fn test_legend_shows_range() {
        let line = legend(&ValueRange { min: 0.1, max: 0.9 }, r2_color);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with(" 0.100 "));
        assert!(text.ends_with(" 0.900 "));
    }
}
