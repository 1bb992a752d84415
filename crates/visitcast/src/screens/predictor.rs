use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap,
    },
};
use visitcast_core::advice::Priority;
use visitcast_core::model::ParameterField;
use visitcast_core::pipeline::Evaluation;

use super::Screen;
use crate::components::{Component, EventResult};
use crate::controls::{COARSE_FACTOR, SliderSpec};
use crate::state::AppState;
use crate::util::format::{format_count, format_currency_short, format_delta, format_number};
use crate::util::styles::{
    HEADER_COLOR, HELP_COLOR, WARNING_COLOR, delta_color, focused_block_with_help,
};

/// Width of the slider track in the parameter panel
const TRACK_WIDTH: usize = 16;

const MODEL_FACTORS: [&str; 5] = [
    "Staff levels (strongest predictor)",
    "Operating budget and income",
    "Service hours",
    "Collection size",
    "Geographic location effects",
];

/// Footer for a sweep with points outside the model's domain
fn rejected_note(evaluation: &Evaluation) -> Option<String> {
    let first = evaluation.rejected_scenarios.first()?;
    Some(format!(
        " {} skipped: {} ",
        evaluation.rejected_scenarios.len(),
        first.reason
    ))
}

/// Display form of a parameter value
fn format_parameter(field: ParameterField, value: f64) -> String {
    match field {
        ParameterField::TotalIncome => format_currency_short(value),
        ParameterField::Latitude | ParameterField::Longitude => format!("{value:.2}"),
        _ => format_number(value),
    }
}

/// `[████░░░░]` style track for a slider position in `[0, 1]`
fn slider_track(position: f64, width: usize) -> String {
    let filled = (position.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
    }
}

pub struct PredictorScreen;

impl PredictorScreen {
    pub fn new() -> Self {
        Self
    }

    fn render_parameters(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = focused_block_with_help(
            &format!(" {} ", state.params.library_name),
            true,
            "j/k select  h/l adjust  H/L ×10",
        );

        let selected = state.selected_field();
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{}, {}", state.params.city, state.params.state),
                Style::default().fg(HELP_COLOR),
            )),
            Line::from(""),
        ];

        for field in ParameterField::ALL {
            let value = state.params.get(field);
            let spec = SliderSpec::for_field(field);
            let is_selected = field == selected;

            let label_style = if is_selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if is_selected { "▶ " } else { "  " };

            lines.push(Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(format!("{:<20}", field.label()), label_style),
                Span::styled(format_parameter(field, value), Style::default().fg(HEADER_COLOR)),
            ]));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    slider_track(spec.position(value), TRACK_WIDTH),
                    if is_selected {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default().fg(HELP_COLOR)
                    },
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_model_info(&self, frame: &mut Frame, area: Rect, evaluation: Option<&Evaluation>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" MODEL FACTORS ");

        let mut lines: Vec<Line> = MODEL_FACTORS
            .iter()
            .map(|f| Line::from(format!("• {f}")))
            .collect();

        if let Some(eval) = evaluation {
            let t = &eval.terms;
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Model terms",
                Style::default().fg(HEADER_COLOR),
            )));
            lines.push(Line::from(format!("ln(staff+1)       {:.4}", t.log_staff)));
            lines.push(Line::from(format!("ln(income+1)      {:.4}", t.log_income)));
            lines.push(Line::from(format!("ln(collection+1)  {:.4}", t.log_collection)));
            lines.push(Line::from(format!("spatial factor    {:.4}", t.spatial_factor)));
            lines.push(Line::from(format!("log visits        {:.4}", t.log_visits)));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Estimates from historical patterns; local factors may differ.",
            Style::default().fg(HELP_COLOR),
        )));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_cards(&self, frame: &mut Frame, area: Rect, evaluation: &Evaluation) {
        let p = &evaluation.prediction;
        let cards = [
            ("Annual Visits", format_count(p.total_visits), Color::Blue),
            ("Visits per Capita", format!("{:.3}", p.visits_per_capita), Color::Green),
            ("Staff Efficiency", format!("{:.2}", p.efficiency_score), Color::Magenta),
            ("Collection Use", format!("{:.3}", p.collection_utilization), Color::LightRed),
        ];

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(area);

        for ((label, value, color), chunk) in cards.into_iter().zip(chunks.iter()) {
            let lines = vec![
                Line::from(Span::styled(
                    value,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .centered(),
                Line::from(Span::styled(label, Style::default().fg(HELP_COLOR))).centered(),
            ];
            let card = Paragraph::new(lines).block(Block::default().borders(Borders::ALL));
            frame.render_widget(card, *chunk);
        }
    }

    fn render_sweep(&self, frame: &mut Frame, area: Rect, evaluation: &Evaluation) {
        let dimension = evaluation.dimension;
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", dimension.label()))
            .title_bottom(Line::from(" d: next dimension ").fg(HELP_COLOR));
        if let Some(note) = rejected_note(evaluation) {
            block = block.title_bottom(Line::from(note).fg(WARNING_COLOR).right_aligned());
        }

        let data: Vec<(f64, f64)> = evaluation
            .scenarios
            .iter()
            .map(|s| (s.control_value, s.visits as f64))
            .collect();
        if data.is_empty() {
            frame.render_widget(Paragraph::new("No sweep points").block(block), area);
            return;
        }

        let current = [(
            evaluation.parameters.get(dimension.field()),
            evaluation.prediction.total_visits as f64,
        )];

        let x_min = data.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
        let x_max = data.iter().map(|(x, _)| *x).fold(f64::NEG_INFINITY, f64::max);
        let y_max = data.iter().map(|(_, y)| *y).fold(0.0, f64::max);
        let x_padding = ((x_max - x_min).abs() * 0.02).max(0.5);
        let y_top = (y_max * 1.1).max(1.0);

        let datasets = vec![
            Dataset::default()
                .name("Predicted Visits")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Cyan))
                .data(&data),
            Dataset::default()
                .name("Current")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Yellow))
                .data(&current),
        ];

        let x_axis = Axis::default()
            .title(dimension.axis_label().dark_gray())
            .bounds([x_min - x_padding, x_max + x_padding])
            .labels(vec![
                Span::raw(format_number(x_min)),
                Span::raw(format_number((x_min + x_max) / 2.0)),
                Span::raw(format_number(x_max)),
            ]);
        let y_axis = Axis::default()
            .title("Predicted Visits".dark_gray())
            .bounds([0.0, y_top])
            .labels(vec![
                Span::raw("0"),
                Span::raw(format_number(y_top / 2.0)),
                Span::raw(format_number(y_top)),
            ]);

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(x_axis)
            .y_axis(y_axis);
        frame.render_widget(chart, area);
    }

    fn render_recommendations(&self, frame: &mut Frame, area: Rect, evaluation: &Evaluation) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" OPTIMIZATION RECOMMENDATIONS ");

        let mut lines = Vec::new();
        if evaluation.recommendations.is_empty() {
            lines.push(Line::from(""));
            lines.push(
                Line::from(Span::styled(
                    "Your library appears to be well-optimized!",
                    Style::default().fg(Color::Green),
                ))
                .centered(),
            );
            lines.push(
                Line::from(Span::styled(
                    "Current metrics are within recommended ranges.",
                    Style::default().fg(HELP_COLOR),
                ))
                .centered(),
            );
        }
        for rec in &evaluation.recommendations {
            let color = priority_color(rec.priority);
            lines.push(Line::from(vec![
                Span::styled("▌ ", Style::default().fg(color)),
                Span::styled(
                    format!("{} Optimization", rec.category.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  [{} Priority]", rec.priority.label()),
                    Style::default().fg(color),
                ),
            ]));
            lines.push(Line::from(vec![
                Span::styled("▌ ", Style::default().fg(color)),
                Span::raw(rec.message.as_str()),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "What-If: Quick Scenarios",
            Style::default().fg(HEADER_COLOR),
        )));
        for scenario in &evaluation.quick_scenarios {
            lines.push(Line::from(vec![
                Span::raw(format!("{:<18}", scenario.adjustment.label())),
                Span::styled(
                    format!("{} visits", format_delta(scenario.delta)),
                    Style::default().fg(delta_color(scenario.delta)),
                ),
            ]));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    /// Each metric as a percentage of its benchmark, next to the 100% bar
    fn render_breakdown(&self, frame: &mut Frame, area: Rect, evaluation: &Evaluation) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" PERFORMANCE VS BENCHMARK (%) ");

        let groups: Vec<BarGroup> = evaluation
            .breakdown
            .iter()
            .map(|b| {
                let pct = (b.ratio() * 100.0).round().max(0.0) as u64;
                BarGroup::default()
                    .label(Line::from(b.metric.as_str()))
                    .bars(&[
                        Bar::default()
                            .value(pct)
                            .text_value(format!("{}", b.value))
                            .style(Style::default().fg(Color::Blue)),
                        Bar::default()
                            .value(100)
                            .text_value(format!("{}", b.benchmark))
                            .style(Style::default().fg(Color::Green)),
                    ])
            })
            .collect();

        let mut chart = BarChart::default()
            .block(block)
            .bar_width(5)
            .bar_gap(1)
            .group_gap(3)
            .direction(Direction::Vertical);
        for group in groups {
            chart = chart.data(group);
        }

        frame.render_widget(chart, area);
    }

    fn render_invalid(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let message = state
            .error_message
            .as_deref()
            .unwrap_or("Parameters are outside the model's domain");
        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No prediction for the current parameters.",
                Style::default().fg(Color::Red),
            )),
            Line::from(""),
            Line::from(message),
            Line::from(""),
            Line::from(Span::styled("Press r to reset.", Style::default().fg(HELP_COLOR))),
        ];
        let paragraph = Paragraph::new(content)
            .block(Block::default().borders(Borders::ALL).title(" PREDICTED PERFORMANCE "));
        frame.render_widget(paragraph, area);
    }
}

impl Default for PredictorScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PredictorScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => state.select_next_field(),
            KeyCode::Char('k') | KeyCode::Up => state.select_prev_field(),
            KeyCode::Char('l') | KeyCode::Right => state.adjust_selected(1.0),
            KeyCode::Char('h') | KeyCode::Left => state.adjust_selected(-1.0),
            KeyCode::Char('L') => state.adjust_selected(COARSE_FACTOR),
            KeyCode::Char('H') => state.adjust_selected(-COARSE_FACTOR),
            KeyCode::Char('d') => state.cycle_dimension(),
            KeyCode::Char('r') => state.reset_parameters(),
            KeyCode::Char('e') => match state.export_evaluation() {
                Ok(path) => {
                    tracing::info!(path = %path.display(), "exported evaluation");
                    state.set_status(format!("Exported to {}", path.display()));
                }
                Err(e) => state.set_error(e),
            },
            _ => return EventResult::NotHandled,
        }
        EventResult::Handled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(44), Constraint::Min(40)])
            .split(area);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(18), Constraint::Min(6)])
            .split(columns[0]);

        let evaluation = state.current_evaluation();
        self.render_parameters(frame, left[0], state);
        self.render_model_info(frame, left[1], evaluation);

        let Some(evaluation) = evaluation else {
            self.render_invalid(frame, columns[1], state);
            return;
        };

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Percentage(45),
                Constraint::Min(8),
            ])
            .split(columns[1]);

        self.render_cards(frame, right[0], evaluation);
        self.render_sweep(frame, right[1], evaluation);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(right[2]);
        self.render_recommendations(frame, bottom[0], evaluation);
        self.render_breakdown(frame, bottom[1], evaluation);
    }
}

impl Screen for PredictorScreen {
    fn title(&self) -> &str {
        "Predictor"
    }
}
