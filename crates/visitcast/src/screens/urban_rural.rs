use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Tabs, Wrap},
};
use visitcast_core::regional::{
    COEFFICIENTS, IMPLICATIONS, MODEL_PERFORMANCE, RURAL_FINDINGS, Region, URBAN_FINDINGS,
    VISIT_STATISTICS, better_fit, model_performance, share_of_total, visit_ratio,
    visit_statistics,
};

use super::Screen;
use crate::components::{Component, EventResult};
use crate::state::{AppState, RegionalTab};
use crate::util::format::{format_compact, format_count, format_percentage};
use crate::util::styles::{HELP_COLOR, RURAL_COLOR, URBAN_COLOR};

/// Fixed-point scale used to draw fractional values as bars
const BAR_SCALE: f64 = 1000.0;

fn region_color(region: Region) -> Color {
    match region {
        Region::Urban => URBAN_COLOR,
        Region::Rural => RURAL_COLOR,
    }
}

fn scaled(value: f64) -> u64 {
    (value * BAR_SCALE).round().max(0.0) as u64
}

/// Fit summary lines derived from the performance table
fn performance_insights() -> Vec<String> {
    let best = better_fit();
    let mut lines: Vec<String> = [best, other(best)]
        .into_iter()
        .map(|region| {
            let perf = model_performance(region);
            let verdict = if region == best { "better fit" } else { "good fit" };
            format!("{} R²: {:.3} ({verdict})", region.label(), perf.r2)
        })
        .collect();

    let floor = MODEL_PERFORMANCE
        .iter()
        .map(|p| p.r2)
        .fold(f64::INFINITY, f64::min);
    let explained = ((floor * 100.0) / 5.0).floor() * 5.0;
    lines.push(format!("Both models explain >{explained:.0}% of variation"));
    lines.push(format!("{} patterns more predictable", best.label()));
    lines
}

fn other(region: Region) -> Region {
    match region {
        Region::Urban => Region::Rural,
        Region::Rural => Region::Urban,
    }
}

fn bullet_list(items: impl IntoIterator<Item = String>) -> Vec<Line<'static>> {
    items
        .into_iter()
        .map(|item| Line::from(format!("• {item}")))
        .collect()
}

pub struct UrbanRuralScreen;

impl UrbanRuralScreen {
    pub fn new() -> Self {
        Self
    }

    fn render_sub_tabs(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let titles: Vec<Line> = RegionalTab::ALL
            .iter()
            .map(|tab| Line::from(tab.name()))
            .collect();
        let tabs = Tabs::new(titles)
            .block(Block::default().borders(Borders::BOTTOM))
            .select(state.regional_tab.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, area);
    }

    fn render_overview(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(5), Constraint::Min(8), Constraint::Length(7)])
            .split(area);

        let best = better_fit();
        let cards = [
            (
                "Urban Libraries",
                format_count(visit_statistics(Region::Urban).count),
                format!("{:.0}% of total", share_of_total(Region::Urban) * 100.0),
                URBAN_COLOR,
            ),
            (
                "Rural Libraries",
                format_count(visit_statistics(Region::Rural).count),
                format!("{:.0}% of total", share_of_total(Region::Rural) * 100.0),
                RURAL_COLOR,
            ),
            (
                "Visit Ratio",
                format!("{:.2}x", visit_ratio()),
                "Urban vs Rural average".to_string(),
                Color::Magenta,
            ),
            (
                "Better Model Fit",
                best.label().to_string(),
                format!(
                    "R² = {:.3} vs {:.3}",
                    model_performance(best).r2,
                    model_performance(other(best)).r2
                ),
                Color::LightRed,
            ),
        ];

        let card_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, 4); 4])
            .split(rows[0]);
        for ((title, value, subtitle, color), chunk) in cards.into_iter().zip(card_areas.iter()) {
            let lines = vec![
                Line::from(Span::styled(
                    value,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ))
                .centered(),
                Line::from(Span::styled(subtitle, Style::default().fg(HELP_COLOR))).centered(),
            ];
            let card = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title(format!(" {title} ")));
            frame.render_widget(card, *chunk);
        }

        let findings = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        for (region, items, chunk) in [
            (Region::Urban, URBAN_FINDINGS, findings[0]),
            (Region::Rural, RURAL_FINDINGS, findings[1]),
        ] {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(region_color(region)))
                .title(format!(" {} Libraries ", region.label()));
            let paragraph = Paragraph::new(bullet_list(items.iter().map(|s| s.to_string())))
                .block(block)
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, chunk);
        }

        let implications = Paragraph::new(bullet_list(IMPLICATIONS.iter().map(|s| s.to_string())))
            .block(Block::default().borders(Borders::ALL).title(" Implications "))
            .wrap(Wrap { trim: true });
        frame.render_widget(implications, rows[2]);
    }

    fn render_visit_patterns(&self, frame: &mut Frame, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Min(7)])
            .split(area);

        let mut chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Visit Statistics Comparison (mean | median) "),
            )
            .bar_width(9)
            .bar_gap(1)
            .group_gap(4)
            .direction(Direction::Vertical);
        for stats in &VISIT_STATISTICS {
            let color = region_color(stats.region);
            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(stats.region.label()))
                    .bars(&[
                        Bar::default()
                            .value(stats.mean)
                            .text_value(format_compact(stats.mean as f64))
                            .style(Style::default().fg(color)),
                        Bar::default()
                            .value(stats.median)
                            .text_value(format_compact(stats.median as f64))
                            .style(Style::default().fg(Color::Gray)),
                    ]),
            );
        }
        frame.render_widget(chart, rows[0]);

        let tables = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        for (stats, chunk) in VISIT_STATISTICS.iter().zip(tables.iter()) {
            let row = |label: &'static str, value: String| {
                Line::from(vec![
                    Span::styled(format!("{label:<12}"), Style::default().fg(HELP_COLOR)),
                    Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
                ])
            };
            let lines = vec![
                row("Mean:", format!("{} visits", format_count(stats.mean))),
                row("Median:", format!("{} visits", format_count(stats.median))),
                row("Std Dev:", format_count(stats.std_dev)),
                row("Libraries:", format_count(stats.count)),
            ];
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(region_color(stats.region)))
                .title(format!(" {} Library Distribution ", stats.region.label()));
            frame.render_widget(Paragraph::new(lines).block(block), *chunk);
        }
    }

    fn render_coefficients(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let mut chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Factor Impact Comparison (urban | rural) "),
            )
            .bar_width(6)
            .bar_gap(1)
            .group_gap(3)
            .direction(Direction::Vertical);
        for coef in &COEFFICIENTS {
            let short = coef.factor.split_whitespace().next().unwrap_or(coef.factor);
            chart = chart.data(
                BarGroup::default().label(Line::from(short)).bars(&[
                    Bar::default()
                        .value(scaled(coef.urban))
                        .text_value(format!("{:.3}", coef.urban))
                        .style(Style::default().fg(URBAN_COLOR)),
                    Bar::default()
                        .value(scaled(coef.rural))
                        .text_value(format!("{:.3}", coef.rural))
                        .style(Style::default().fg(RURAL_COLOR)),
                ]),
            );
        }
        frame.render_widget(chart, columns[0]);

        let mut lines = Vec::new();
        for coef in &COEFFICIENTS {
            let favored = coef.favors();
            lines.push(Line::from(Span::styled(
                coef.factor,
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("Urban {:.3}", coef.urban),
                    Style::default().fg(URBAN_COLOR),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("Rural {:.3}", coef.rural),
                    Style::default().fg(RURAL_COLOR),
                ),
                Span::raw("  "),
                Span::styled(
                    format!("Δ {:+.3}", coef.difference),
                    Style::default().fg(region_color(favored)),
                ),
            ]));
            lines.push(Line::from(Span::styled(
                coef.interpretation,
                Style::default().fg(HELP_COLOR),
            )));
            lines.push(Line::from(""));
        }
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Key Factors "))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, columns[1]);
    }

    fn render_performance(&self, frame: &mut Frame, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let mut chart = BarChart::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" GWR Model Performance (R² | RMSE) "),
            )
            .bar_width(8)
            .bar_gap(1)
            .group_gap(4)
            .direction(Direction::Vertical);
        for perf in &MODEL_PERFORMANCE {
            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(perf.region.label()))
                    .bars(&[
                        Bar::default()
                            .value(scaled(perf.r2))
                            .text_value(format!("{:.3}", perf.r2))
                            .style(Style::default().fg(Color::Magenta)),
                        Bar::default()
                            .value(scaled(perf.rmse))
                            .text_value(format!("{:.3}", perf.rmse))
                            .style(Style::default().fg(region_color(perf.region))),
                    ]),
            );
        }
        frame.render_widget(chart, columns[0]);

        let mut lines = vec![Line::from(Span::styled(
            "Performance Metrics",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ))];
        lines.extend(bullet_list(performance_insights()));
        for perf in &MODEL_PERFORMANCE {
            lines.push(Line::from(format!(
                "• {} explained variance {}, RMSE {:.3}",
                perf.region.label(),
                format_percentage(perf.r2),
                perf.rmse
            )));
        }
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Implications",
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        )));
        lines.extend(bullet_list(IMPLICATIONS.iter().map(|s| s.to_string())));

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Model Insights "))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, columns[1]);
    }
}

impl Default for UrbanRuralScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for UrbanRuralScreen {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        match key.code {
            KeyCode::Right | KeyCode::Char('l') => {
                state.regional_tab = state.regional_tab.next();
                EventResult::Handled
            }
            KeyCode::Left | KeyCode::Char('h') => {
                state.regional_tab = state.regional_tab.prev();
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(0)])
            .split(area);

        self.render_sub_tabs(frame, chunks[0], state);
        match state.regional_tab {
            RegionalTab::Overview => self.render_overview(frame, chunks[1]),
            RegionalTab::VisitPatterns => self.render_visit_patterns(frame, chunks[1]),
            RegionalTab::Coefficients => self.render_coefficients(frame, chunks[1]),
            RegionalTab::Performance => self.render_performance(frame, chunks[1]),
        }
    }
}

impl Screen for UrbanRuralScreen {
    fn title(&self) -> &str {
        "Urban vs Rural"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_performance_insights() {
        assert_eq!(
            performance_insights(),
            vec![
                "Rural R²: 0.883 (better fit)".to_string(),
                "Urban R²: 0.853 (good fit)".to_string(),
                "Both models explain >85% of variation".to_string(),
                "Rural patterns more predictable".to_string(),
            ]
        );
    }

    #[test]
    fn test_negative_coefficients_draw_empty_bars() {
        assert_eq!(scaled(-0.037), 0);
        assert_eq!(scaled(0.422), 422);
    }
}
