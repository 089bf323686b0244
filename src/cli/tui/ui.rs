//! UI rendering for the TUI.

use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Gauge, Paragraph, Row, Table},
};

use crate::core::aggregate::{format_count, format_duration, format_last_execution, period_stats};
use crate::core::controller::ResourceState;
use crate::core::models::{DashboardSnapshot, EtlExecution, ExecutionStatus};

use super::app::{TuiApp, View};

/// Main render function - dispatches to view-specific renderers.
pub fn render(
    frame: &mut Frame,
    app: &TuiApp,
    dashboard: &ResourceState<DashboardSnapshot>,
    executions: &ResourceState<Vec<EtlExecution>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Footer/help
        ])
        .split(frame.area());

    render_header(frame, app, dashboard, chunks[0]);

    match app.view {
        View::Dashboard => render_dashboard(frame, dashboard, chunks[1]),
        View::History { selected } => render_history(frame, executions, chunks[1], selected),
    }

    render_footer(frame, app, chunks[2]);
}

fn render_header(
    frame: &mut Frame,
    app: &TuiApp,
    dashboard: &ResourceState<DashboardSnapshot>,
    area: Rect,
) {
    let mode = if app.mock { " [MOCK]" } else { " [LIVE]" };
    let refreshing = if dashboard.is_loading && dashboard.data.is_some() {
        "  refreshing..."
    } else {
        ""
    };

    let block = Block::default()
        .title(format!("ETL Pipeline Monitor{}{}", mode, refreshing))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(block, area);
}

fn render_dashboard(frame: &mut Frame, state: &ResourceState<DashboardSnapshot>, area: Rect) {
    // Errors replace the data pane; prior data stays in the controller for
    // the next successful refresh.
    if let Some(error) = &state.error {
        render_message(frame, area, "Dashboard", error, Color::Red, "[r] Retry");
        return;
    }

    let snapshot = match &state.data {
        Some(s) => s,
        None => {
            render_message(
                frame,
                area,
                "Dashboard",
                "Loading dashboard...",
                Color::DarkGray,
                "",
            );
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // KPI cards
            Constraint::Min(8),    // Charts
            Constraint::Length(9), // Recent executions
        ])
        .split(area);

    render_kpis(frame, snapshot, chunks[0]);
    render_charts(frame, snapshot, chunks[1]);
    render_recent_executions(frame, snapshot, chunks[2]);
}

fn render_kpis(frame: &mut Frame, snapshot: &DashboardSnapshot, area: Rect) {
    let kpis = &snapshot.kpis;
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_kpi_card(
        frame,
        cards[0],
        "Total Records",
        format_count(kpis.total_records),
        "last 7 days".to_string(),
        Color::Cyan,
    );
    render_kpi_card(
        frame,
        cards[1],
        "Successful",
        format_count(kpis.success_records),
        format!("{:.2}%", kpis.success_rate),
        Color::Green,
    );
    render_kpi_card(
        frame,
        cards[2],
        "With Errors",
        format_count(kpis.error_records),
        format!("{:.2}%", 100.0 - kpis.success_rate),
        Color::Red,
    );
    render_kpi_card(
        frame,
        cards[3],
        "Last Execution",
        format_last_execution(kpis.last_execution, Utc::now()),
        format!("avg {}", format_duration(kpis.average_duration_secs)),
        Color::Magenta,
    );
}

fn render_kpi_card(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    subtitle: String,
    color: Color,
) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let lines = vec![
        Line::from(Span::styled(
            format!("  {}", value),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  {}", subtitle),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_charts(frame: &mut Frame, snapshot: &DashboardSnapshot, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_time_series(frame, snapshot, chunks[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(chunks[1]);

    render_success_gauge(frame, snapshot, right[0]);
    render_distribution(frame, snapshot, right[1]);
}

fn render_time_series(frame: &mut Frame, snapshot: &DashboardSnapshot, area: Rect) {
    let labels: Vec<String> = snapshot
        .time_series
        .iter()
        .map(|p| p.date.format("%m-%d").to_string())
        .collect();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .zip(&snapshot.time_series)
        .map(|(label, point)| (label.as_str(), point.processed))
        .collect();

    let chart = BarChart::default()
        .block(
            Block::default()
                .title("Processed per Day")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .data(&data)
        .bar_width(7)
        .bar_gap(1)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));

    frame.render_widget(chart, area);
}

fn render_success_gauge(frame: &mut Frame, snapshot: &DashboardSnapshot, area: Rect) {
    let rate = snapshot.kpis.success_rate.clamp(0.0, 100.0);

    let gauge = Gauge::default()
        .block(Block::default().title("Success Rate").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(rate / 100.0)
        .label(format!("{:.2}%", rate));

    frame.render_widget(gauge, area);
}

fn render_distribution(frame: &mut Frame, snapshot: &DashboardSnapshot, area: Rect) {
    let total = snapshot.kpis.total_records.max(1);

    let lines: Vec<Line> = snapshot
        .status_distribution
        .iter()
        .map(|slice| {
            let pct = slice.value as f64 / total as f64 * 100.0;
            Line::from(vec![
                Span::styled("  ● ", Style::default().fg(slice_color(&slice.color))),
                Span::raw(format!("{:<12}", slice.name)),
                Span::styled(
                    format!("{:>10}", format_count(slice.value)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {:.2}%", pct),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    let block = Block::default()
        .title("Status Distribution")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_recent_executions(frame: &mut Frame, snapshot: &DashboardSnapshot, area: Rect) {
    let block = Block::default()
        .title("Recent Executions")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if snapshot.recent_executions.is_empty() {
        let text = Paragraph::new("  No executions recorded")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let rows: Vec<Row> = snapshot
        .recent_executions
        .iter()
        .map(|exec| {
            Row::new(vec![
                Cell::from(exec.execution_date.format("%Y-%m-%d %H:%M").to_string()),
                Cell::from(Span::styled(
                    format!("{} {}", status_icon(exec.status), exec.status.as_str()),
                    Style::default().fg(status_color(exec.status)),
                )),
                Cell::from(format_duration(exec.duration_secs)),
                Cell::from(format_count(exec.records_processed)),
                Cell::from(exec.id.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(17),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Min(10),
        ],
    )
    .header(table_header(&["Date", "Status", "Duration", "Processed", "ID"]))
    .block(block);

    frame.render_widget(table, area);
}

fn render_history(
    frame: &mut Frame,
    state: &ResourceState<Vec<EtlExecution>>,
    area: Rect,
    selected: usize,
) {
    if let Some(error) = &state.error {
        render_message(frame, area, "Execution History", error, Color::Red, "[r] Retry");
        return;
    }

    let records = match &state.data {
        Some(r) => r,
        None => {
            render_message(
                frame,
                area,
                "Execution History",
                "Loading execution history...",
                Color::DarkGray,
                "",
            );
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)])
        .split(area);

    render_period_stats(frame, records, chunks[0]);

    let block = Block::default()
        .title("Execution History")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if records.is_empty() {
        let text = Paragraph::new("  No executions recorded")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, chunks[1]);
        return;
    }

    let rows: Vec<Row> = records
        .iter()
        .enumerate()
        .map(|(i, exec)| execution_row(exec, i == selected))
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(17),
            Constraint::Length(10),
            Constraint::Length(9),
            Constraint::Length(11),
            Constraint::Length(11),
            Constraint::Length(9),
            Constraint::Min(10),
        ],
    )
    .header(table_header(&[
        "Date", "Status", "Duration", "Processed", "Success", "Errors", "ID",
    ]))
    .block(block);

    frame.render_widget(table, chunks[1]);
}

fn render_period_stats(frame: &mut Frame, records: &[EtlExecution], area: Rect) {
    let stats = period_stats(records);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    render_kpi_card(
        frame,
        cards[0],
        "Executions",
        stats.total.to_string(),
        "this period".to_string(),
        Color::Cyan,
    );
    render_kpi_card(
        frame,
        cards[1],
        "Successful",
        stats.successful.to_string(),
        String::new(),
        Color::Green,
    );
    render_kpi_card(
        frame,
        cards[2],
        "With Errors",
        stats.with_errors.to_string(),
        String::new(),
        Color::Red,
    );
    render_kpi_card(
        frame,
        cards[3],
        "Total Records",
        format_count(stats.total_records),
        String::new(),
        Color::Magenta,
    );
}

fn render_footer(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let help_text = match app.view {
        View::Dashboard => "[h] History  [r] Refresh  [t] Trigger  [q] Quit",
        View::History { .. } => "[↑↓] Navigate  [r] Refresh  [Esc] Back  [q] Quit",
    };

    let mut spans = vec![Span::raw(format!("  {}", help_text))];

    if let Some(notice) = &app.notice {
        spans.push(Span::styled(
            format!("  {}", notice),
            Style::default().fg(Color::Yellow),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_message(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    message: &str,
    color: Color,
    hint: &str,
) {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(color),
        )),
    ];
    if !hint.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            hint.to_string(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, area);
}

fn execution_row(exec: &EtlExecution, is_selected: bool) -> Row<'static> {
    let style = if is_selected {
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    Row::new(vec![
        Cell::from(exec.execution_date.format("%Y-%m-%d %H:%M").to_string()),
        Cell::from(Span::styled(
            format!("{} {}", status_icon(exec.status), exec.status.as_str()),
            Style::default().fg(status_color(exec.status)),
        )),
        Cell::from(format_duration(exec.duration_secs)),
        Cell::from(format_count(exec.records_processed)),
        Cell::from(format_count(exec.records_success)),
        Cell::from(format_count(exec.records_error)),
        Cell::from(exec.id.clone()),
    ])
    .style(style)
}

fn table_header(titles: &[&'static str]) -> Row<'static> {
    Row::new(
        titles
            .iter()
            .map(|t| Cell::from(*t))
            .collect::<Vec<Cell>>(),
    )
    .style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

fn status_icon(status: ExecutionStatus) -> &'static str {
    match status {
        ExecutionStatus::Success => "✓",
        ExecutionStatus::Warning => "!",
        ExecutionStatus::Error => "✗",
        ExecutionStatus::Running => "•",
    }
}

fn status_color(status: ExecutionStatus) -> Color {
    match status {
        ExecutionStatus::Success => Color::Green,
        ExecutionStatus::Warning => Color::Yellow,
        ExecutionStatus::Error => Color::Red,
        ExecutionStatus::Running => Color::Blue,
    }
}

fn slice_color(token: &str) -> Color {
    match token {
        "#10b981" => Color::Green,
        "#ef4444" => Color::Red,
        "#f59e0b" => Color::Yellow,
        _ => Color::White,
    }
}
