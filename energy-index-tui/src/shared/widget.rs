//! Ratatui rendering of a composed [`DashboardView`]

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, List, ListItem, Paragraph, Wrap},
    Frame,
};

use super::metrics::ActivityClass;
use super::view::{
    ActivityPanel, ChartPanel, ChartState, ComponentCard, DashboardView, DegradedView, FullView,
    MetricCard, StatusBanner, Tone,
};

const C_UP: Color = Color::Rgb(16, 185, 129);
const C_DOWN: Color = Color::Rgb(239, 68, 68);
const C_DIM: Color = Color::Rgb(120, 120, 120);
const C_BRIGHT: Color = Color::Rgb(220, 220, 220);
const C_ACCENT: Color = Color::Rgb(102, 126, 234);
const C_CYCLE: Color = Color::Rgb(139, 92, 246);

// Component card accents: oil, gas, xle, rigs
const C_COMPONENTS: [Color; 4] = [
    Color::Rgb(251, 191, 36),
    Color::Rgb(59, 130, 246),
    Color::Rgb(16, 185, 129),
    Color::Rgb(139, 92, 246),
];

const TITLE: &str = " BSE ENERGY INDEX ";

pub fn render_dashboard(f: &mut Frame, view: &DashboardView) {
    match view {
        DashboardView::Full(full) => render_full(f, full),
        DashboardView::Degraded(degraded) => {
            let area = f.area();
            render_degraded(f, area, degraded)
        }
    }
}

fn render_full(f: &mut Frame, view: &FullView) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(2),
        ])
        .split(f.area());

    render_banner(f, rows[0], &view.banner);

    let cards = quarters(rows[1]);
    for (card, area) in view.metric_cards.iter().zip(cards.iter()) {
        render_metric_card(f, *area, card);
    }

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);
    render_chart(f, charts[0], &view.price_chart, C_ACCENT);
    render_chart(f, charts[1], &view.score_chart, C_UP);

    let components = quarters(rows[3]);
    for (i, (card, area)) in view.components.iter().zip(components.iter()).enumerate() {
        render_component_card(f, *area, card, C_COMPONENTS[i % C_COMPONENTS.len()]);
    }

    render_activity(f, rows[4], &view.activity);

    let footer = vec![
        Line::from(Span::styled(view.network.as_str(), Style::default().fg(C_DIM))),
        Line::from(Span::styled(view.footer.as_str(), Style::default().fg(C_DIM))),
    ];
    f.render_widget(Paragraph::new(footer).alignment(Alignment::Center), rows[5]);
}

fn quarters(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area)
}

fn render_banner(f: &mut Frame, area: Rect, banner: &StatusBanner) {
    let live = banner.refresh_count.is_some();
    let status_color = if live { C_DOWN } else { C_UP };

    let block = Block::default()
        .title(TITLE)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_ACCENT));

    let mut spans = vec![
        Span::styled("● ", Style::default().fg(status_color)),
        Span::styled(
            banner.status,
            Style::default().fg(status_color).add_modifier(Modifier::BOLD),
        ),
    ];
    if live {
        spans.push(Span::styled(
            format!("   CYCLE #{}", banner.total_cycles),
            Style::default().fg(C_CYCLE).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(status) = banner.service_status {
        spans.push(Span::styled(
            format!("   STATUS {}", status),
            Style::default().fg(C_UP).add_modifier(Modifier::BOLD),
        ));
    }
    spans.push(Span::styled(
        format!("   Uptime: {}h", banner.uptime_hours),
        Style::default().fg(C_DIM),
    ));
    match banner.refresh_count {
        Some(count) => spans.push(Span::styled(
            format!("   Updates: {}", count),
            Style::default().fg(C_DIM),
        )),
        None => spans.push(Span::styled(
            format!("   Cycles: {}", banner.total_cycles),
            Style::default().fg(C_DIM),
        )),
    }

    f.render_widget(
        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

fn render_metric_card(f: &mut Frame, area: Rect, card: &MetricCard) {
    let delta_color = match card.tone {
        Tone::Positive => C_UP,
        Tone::Negative => C_DOWN,
        Tone::Neutral => C_DIM,
    };

    let lines = vec![
        Line::from(Span::styled(
            card.value.as_str(),
            Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.delta.as_str(), Style::default().fg(delta_color))),
    ];

    let block = Block::default()
        .title(format!(" {} ", card.label))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_DIM));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_chart(f: &mut Frame, area: Rect, panel: &ChartPanel, color: Color) {
    let block = Block::default()
        .title(format!(" {} ", panel.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_DIM));

    let series = match &panel.state {
        ChartState::Building(message) => {
            let placeholder = Paragraph::new(Span::styled(message.as_str(), Style::default().fg(C_DIM)))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(placeholder, area);
            return;
        }
        ChartState::Ready(series) => series,
    };

    let points: Vec<(f64, f64)> = series
        .iter()
        .enumerate()
        .map(|(i, value)| (i as f64, *value))
        .collect();
    let (y_min, y_max) = value_bounds(series);
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    // one point cannot form a line segment
    let graph_type = if points.len() < 2 {
        GraphType::Scatter
    } else {
        GraphType::Line
    };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(graph_type)
        .style(Style::default().fg(color))
        .data(&points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(
            Axis::default()
                .style(Style::default().fg(C_DIM))
                .bounds([y_min, y_max])
                .labels(vec![Span::raw(format_axis(y_min)), Span::raw(format_axis(y_max))]),
        );

    f.render_widget(chart, area);
}

/// Y range with a little headroom, never zero-width
fn value_bounds(series: &[f64]) -> (f64, f64) {
    let (min, max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let span = max - min;
    let pad = if span > 0.0 {
        span * 0.05
    } else if min != 0.0 {
        min.abs() * 0.01
    } else {
        1.0
    };
    (min - pad, max + pad)
}

fn format_axis(value: f64) -> String {
    if value.abs() < 1.0 {
        format!("{:.6}", value)
    } else {
        format!("{:.2}", value)
    }
}

fn render_component_card(f: &mut Frame, area: Rect, card: &ComponentCard, color: Color) {
    let block = Block::default()
        .title(format!(" {} ({}%) ", card.label, card.weight_pct))
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let value = Paragraph::new(Span::styled(
        card.value.as_str(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center)
    .block(block);

    f.render_widget(value, area);
}

fn activity_style(class: ActivityClass, highlight: bool) -> Style {
    if !highlight {
        return Style::default().fg(C_BRIGHT);
    }
    match class {
        ActivityClass::Trade => Style::default().fg(C_UP).add_modifier(Modifier::BOLD),
        ActivityClass::Error => Style::default().fg(C_DOWN),
        ActivityClass::CycleBoundary => Style::default().fg(C_CYCLE).add_modifier(Modifier::BOLD),
        ActivityClass::Normal => Style::default().fg(C_BRIGHT),
    }
}

fn render_activity(f: &mut Frame, area: Rect, panel: &ActivityPanel) {
    let items: Vec<ListItem> = panel
        .lines
        .iter()
        .map(|line| {
            let mut spans = vec![Span::styled("│ ", Style::default().fg(C_ACCENT))];
            if let Some(stamp) = &panel.stamp {
                spans.push(Span::styled(format!("[{}] ", stamp), Style::default().fg(C_ACCENT)));
            }
            spans.push(Span::styled(
                line.text.as_str(),
                activity_style(line.class, panel.highlight),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let block = Block::default()
        .title(format!(" {} ", panel.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_DIM));

    f.render_widget(List::new(items).block(block), area);
}

fn render_degraded(f: &mut Frame, area: Rect, view: &DegradedView) {
    let block = Block::default()
        .title(TITLE)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_DOWN));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "⚠ Connection Error",
            Style::default().fg(C_DOWN).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            view.headline,
            Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(detail) = view.detail {
        lines.push(Line::from(Span::styled(detail, Style::default().fg(C_DIM))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        view.cause.as_str(),
        Style::default().fg(C_DIM),
    )));

    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}
