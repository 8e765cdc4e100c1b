use anyhow::Result;
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use moneyboard_api::{BudgetSource, Dashboard};
use moneyboard_core::{AreaSeries, CategoryView, Panel, PanelState};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset, Gauge, GraphType, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use std::time::Duration;

use crate::render::day_label;

const DAY_MS: f64 = 86_400_000.0;

/// `#RRGGBB` to a terminal colour; anything else falls back to white.
fn hex_color(hex: &str) -> Color {
    let h = hex.trim().trim_start_matches('#');
    if h.len() != 6 || !h.is_ascii() {
        return Color::White;
    }
    let channel = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
    match (channel(0), channel(2), channel(4)) {
        (Some(r), Some(g), Some(b)) => Color::Rgb(r, g, b),
        _ => Color::White,
    }
}

/// Horizontal extent of the series. Points are not necessarily in date order,
/// so this scans all of them; a single day still gets a day-wide axis.
fn x_bounds(data: &[(f64, f64)]) -> [f64; 2] {
    let Some(&(first, _)) = data.first() else {
        return [0.0, DAY_MS];
    };
    let (lo, hi) = data
        .iter()
        .fold((first, first), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
    [lo, hi.max(lo + DAY_MS)]
}

pub async fn run_dashboard<S: BudgetSource>(dashboard: Dashboard<S>, today: NaiveDate) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = dashboard_loop(&mut terminal, dashboard, today).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn dashboard_loop<S: BudgetSource>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut dashboard: Dashboard<S>,
    today: NaiveDate,
) -> Result<()> {
    let mut refreshing = true;
    loop {
        terminal.draw(|f| draw(f, &dashboard, refreshing))?;

        if refreshing {
            dashboard.refresh_all(today).await;
            refreshing = false;
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('r') => refreshing = true,
                    _ => {}
                }
            }
        }
    }
    Ok(())
}

fn draw<S: BudgetSource>(f: &mut Frame, dashboard: &Dashboard<S>, refreshing: bool) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(8), Constraint::Length(1)])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "moneyboard",
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(rows[1]);

    draw_categories(f, cols[0], &dashboard.categories);
    draw_trend(f, cols[1], &dashboard.trend, &dashboard.settings().currency_symbol);

    let status = if refreshing { "refreshing..." } else { "r refresh   q quit" };
    f.render_widget(
        Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
        rows[2],
    );
}

/// Error line shown above stale data when the last refresh failed.
fn error_line<T>(panel: &Panel<T>) -> Option<Line<'static>> {
    match panel.state() {
        PanelState::Failed { error, stale } => {
            let suffix = if stale.is_some() { " (showing last good data)" } else { "" };
            Some(Line::from(Span::styled(
                format!("refresh failed: {error}{suffix}"),
                Style::default().fg(Color::Red),
            )))
        }
        _ => None,
    }
}

fn draw_categories(f: &mut Frame, area: Rect, panel: &Panel<CategoryView>) {
    let title = panel
        .data()
        .map(|v| v.title.clone())
        .unwrap_or_else(|| "Spending".to_string());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let Some(view) = panel.data() else {
        let lines = error_line(panel)
            .map(|l| vec![l])
            .unwrap_or_else(|| vec![Line::from("loading...")]);
        f.render_widget(Paragraph::new(Text::from(lines)).wrap(Wrap { trim: true }), inner);
        return;
    };

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    let mut header = Vec::new();
    if let Some(err) = error_line(panel) {
        header.push(err);
    }
    header.push(Line::from(Span::styled(
        view.header.amount.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    header.push(Line::from(view.header.caption.clone()));
    f.render_widget(Paragraph::new(Text::from(header)), parts[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(view.progress.fill_percent.round().clamp(0.0, 100.0) as u16)
        .label(view.progress.ratio_label.clone());
    f.render_widget(gauge, parts[1]);
    f.render_widget(
        Paragraph::new(format!("of {}", view.progress.budget_label))
            .style(Style::default().fg(Color::DarkGray)),
        parts[2],
    );

    let cards: Vec<Line> = view
        .cards
        .iter()
        .map(|card| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(hex_color(&card.color))),
                Span::raw(format!("{:<18}", card.name)),
                Span::styled(card.amount.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(Text::from(cards)), parts[3]);
}

fn draw_trend(f: &mut Frame, area: Rect, panel: &Panel<AreaSeries>, currency: &str) {
    let title = match panel.data() {
        Some(series) if !series.is_empty() => format!("Expenses ({currency}{:.2})", series.total),
        _ => "Expenses".to_string(),
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    let series = match panel.data() {
        Some(series) if !series.is_empty() => series,
        data => {
            let inner = block.inner(area);
            f.render_widget(block, area);
            let line = error_line(panel).unwrap_or_else(|| {
                Line::from(if data.is_some() {
                    "no expenses in this window"
                } else {
                    "loading..."
                })
            });
            f.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), inner);
            return;
        }
    };

    let data = series.xy();
    let [x_min, x_max] = x_bounds(&data);
    let y_max = if series.max_y > 0.0 { series.max_y * 1.1 } else { 1.0 };

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&data);

    let x_labels = vec![
        Span::raw(day_label(x_min as i64)),
        Span::raw(day_label(x_max as i64)),
    ];
    let block = match error_line(panel) {
        Some(err) => block.title_bottom(err),
        None => block,
    };
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(Axis::default().bounds([x_min, x_max]).labels(x_labels))
        .y_axis(Axis::default().bounds([0.0, y_max]));
    f.render_widget(chart, area);
}
