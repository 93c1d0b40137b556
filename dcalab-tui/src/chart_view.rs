//! Chart view: portfolio value vs. invested amount over a date axis.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph,
};
use ratatui::Frame;

use dcalab_core::chart::{ChartData, INVESTED_SERIES};

use crate::theme::Theme;

const X_TICKS: usize = 5;
const Y_TICKS: usize = 5;

pub const CLOSE_HINT: &str = "q / Esc / Enter: close";

pub fn render(f: &mut Frame, area: Rect, chart: &ChartData, theme: &Theme) {
    let [chart_area, footer_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(area);

    if chart.is_empty() {
        render_empty(f, chart_area, chart, theme);
    } else {
        render_chart(f, chart_area, chart, theme);
    }
    render_footer(f, footer_area, chart, theme);
}

fn render_empty(f: &mut Frame, area: Rect, chart: &ChartData, theme: &Theme) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "No contribution events: the price series was empty for this range.",
            theme.muted_style(),
        )),
    ];
    let block = Block::default()
        .title(Span::styled(format!(" {} ", chart.title), theme.title()))
        .borders(Borders::ALL);
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(f: &mut Frame, area: Rect, chart: &ChartData, theme: &Theme) {
    let [x_min, x_max] = chart.x_bounds;
    let [y_min, y_max] = chart.y_bounds;

    // Horizontal then vertical grid lines, drawn first so data sits on top.
    let grid_lines: Vec<[(f64, f64); 2]> = chart
        .y_ticks(Y_TICKS)
        .into_iter()
        .map(|y| [(x_min, y), (x_max, y)])
        .chain(
            chart
                .x_ticks(X_TICKS)
                .into_iter()
                .map(|x| [(x, y_min), (x, y_max)]),
        )
        .collect();

    let mut datasets: Vec<Dataset> = grid_lines
        .iter()
        .map(|line| {
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Line)
                .style(theme.grid_style())
                .data(&line[..])
        })
        .collect();

    for series in &chart.series {
        let color = if series.name == INVESTED_SERIES {
            theme.warning
        } else {
            theme.accent
        };
        datasets.push(
            Dataset::default()
                .name(series.name.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color))
                .data(&series.points),
        );
    }

    let x_labels: Vec<Span> = chart
        .x_labels(X_TICKS)
        .into_iter()
        .map(|l| Span::styled(l, theme.muted_style()))
        .collect();
    let y_labels: Vec<Span> = chart
        .y_labels(Y_TICKS)
        .into_iter()
        .map(|l| Span::styled(l, theme.muted_style()))
        .collect();

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::styled(format!(" {} ", chart.title), theme.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent)),
        )
        .x_axis(
            Axis::default()
                .title(Span::styled(chart.x_label.clone(), theme.muted_style()))
                .style(theme.muted_style())
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled(chart.y_label.clone(), theme.muted_style()))
                .style(theme.muted_style())
                .bounds([y_min, y_max])
                .labels(y_labels),
        )
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)));

    f.render_widget(widget, area);
}

fn render_footer(f: &mut Frame, area: Rect, chart: &ChartData, theme: &Theme) {
    let last = |i: usize| chart.series.get(i).and_then(|s| s.points.last()).map(|p| p.1);

    let mut spans = Vec::new();
    if let (Some(value), Some(invested)) = (last(0), last(1)) {
        let gain = value - invested;
        spans.push(Span::styled(
            format!("Value {value:.0}  Invested {invested:.0}  "),
            theme.muted_style(),
        ));
        spans.push(Span::styled(
            format!("Gain {gain:+.0}  "),
            Style::default().fg(theme.gain_color(gain)),
        ));
    }
    spans.push(Span::styled(CLOSE_HINT, theme.muted_style()));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dcalab_core::ContributionEvent;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn events() -> Vec<ContributionEvent> {
        [(2024, 1, 2, 100.0, 100.0), (2024, 4, 1, 300.0, 200.0), (2024, 7, 1, 700.0, 300.0)]
            .into_iter()
            .map(|(y, m, d, value, invested)| ContributionEvent {
                date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
                price: 1.0,
                shares_bought: 1.0,
                cumulative_shares: value,
                cumulative_invested: invested,
                portfolio_value: value,
            })
            .collect()
    }

    fn draw(chart: &ChartData) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render(f, f.area(), chart, &Theme::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_title_axes_and_legend() {
        let chart = ChartData::from_events("TSLA", &events());
        let screen = draw(&chart);
        assert!(screen.contains("Dollar Cost Averaging for TSLA"));
        assert!(screen.contains("Portfolio Value"));
        assert!(screen.contains("Invested Amount"));
        assert!(screen.contains("Date"));
        assert!(screen.contains("2024-01"));
    }

    #[test]
    fn footer_shows_last_gain() {
        let chart = ChartData::from_events("TSLA", &events());
        let screen = draw(&chart);
        assert!(screen.contains("Gain +400"));
        assert!(screen.contains(CLOSE_HINT));
    }

    #[test]
    fn empty_chart_renders_message() {
        let chart = ChartData::from_events("TSLA", &[]);
        let screen = draw(&chart);
        assert!(screen.contains("No contribution events"));
        assert!(screen.contains("Dollar Cost Averaging for TSLA"));
    }
}
