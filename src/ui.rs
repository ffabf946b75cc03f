use crate::app::{Action, App, Control, Tab};
use crate::charts::{field_color, ChartData, Slice, COVERAGE_COLOR};
use crate::config::LayoutMode;
use crate::inputs::{format_amount, Field};
use crate::planner::{hero_journey_text, spending_allocation, spending_plan_text};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// How long the loop waits for a key before running timers again
const TICK_RATE: Duration = Duration::from_millis(250);

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    loop_outcome(res)
}

/// Log a failed loop and hand the error to the caller once the terminal is
/// restored
fn loop_outcome(res: io::Result<()>) -> Result<()> {
    if let Err(err) = &res {
        tracing::error!(error = %err, "UI loop failed");
    }
    res.map_err(Into::into)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    let start = Instant::now();

    loop {
        app.tick(start.elapsed());
        terminal.draw(|f| ui(f, app))?;

        if !event::poll(TICK_RATE)? {
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(action) = map_key(key, app) {
                if app.dispatch(action, start.elapsed()) == Control::Quit {
                    return Ok(());
                }
            }
        }
    }
}

/// Translate a key press into an action. Editing keys only apply where the
/// form is visible.
pub fn map_key(key: KeyEvent, app: &App) -> Option<Action> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let form_visible = app.layout() == LayoutMode::Single || app.current_tab == Tab::Input;

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('q') if ctrl => Some(Action::Quit),
        KeyCode::Esc => Some(Action::DismissOrQuit),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::F(5) => Some(Action::RandomEvent),
        KeyCode::F(n @ 1..=3) if app.layout() == LayoutMode::Tabbed => {
            Tab::ALL.get(n as usize - 1).map(|tab| Action::SelectTab(*tab))
        }
        KeyCode::Tab | KeyCode::Down if form_visible => Some(Action::NextField),
        KeyCode::BackTab | KeyCode::Up if form_visible => Some(Action::PreviousField),
        KeyCode::Backspace if form_visible => Some(Action::Backspace),
        KeyCode::Char(c) if form_visible && !ctrl => Some(Action::Type(c)),
        _ => None,
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with tabs
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.layout() {
        LayoutMode::Tabbed => match app.current_tab {
            Tab::Input => render_form(f, chunks[1], app),
            Tab::Results => render_results_tab(f, chunks[1], app),
            Tab::Charts => render_charts(f, chunks[1], app),
        },
        LayoutMode::Single => render_single(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
    render_popups(f, app);
}

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} ", app.layout().window_title()));

    if app.layout() == LayoutMode::Tabbed {
        let titles: Vec<&str> = Tab::ALL.iter().map(|t| t.title()).collect();
        let tabs = Tabs::new(titles)
            .block(block)
            .select(app.current_tab.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider(" │ ");
        f.render_widget(tabs, area);
    } else {
        let stage = match &app.assessment {
            Some(a) => Span::styled(a.stage.name(), Style::default().fg(Color::Green)),
            None => Span::styled("not calculated", Style::default().fg(Color::DarkGray)),
        };
        let header = Paragraph::new(Line::from(vec![Span::raw(" Stage: "), stage])).block(block);
        f.render_widget(header, area);
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let currency = &app.config.currency;
    let mut content = vec![Line::from("")];

    for field in Field::ALL.iter() {
        let focused = *field == app.focus;
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let cursor = if focused { "▏" } else { " " };

        content.push(Line::from(vec![
            Span::raw(if focused { " → " } else { "   " }),
            Span::styled(format!("{:<22}", format!("{} ({}):", field.label(), currency)), label_style),
            Span::styled(
                format!("[{}{}]", app.entry(*field), cursor),
                Style::default().fg(Color::White),
            ),
        ]));
    }

    let submit_label = match app.layout() {
        LayoutMode::Tabbed => "Calculate",
        LayoutMode::Single => "Submit",
    };

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::raw("   "),
        Span::styled(" Enter ", Style::default().fg(Color::Black).bg(Color::Yellow)),
        Span::raw(format!(" {}   ", submit_label)),
        Span::styled(" F5 ", Style::default().fg(Color::Black).bg(Color::Yellow)),
        Span::raw(" Trigger Random Event"),
    ]));

    let form = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Input "),
    );

    f.render_widget(form, area);
}

fn stage_lines(app: &App) -> Vec<Line<'static>> {
    match &app.assessment {
        Some(a) => vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "  Financial Stage: ",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    a.stage.name(),
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Description: ", Style::default().fg(Color::Cyan)),
                Span::raw(a.stage.description()),
            ]),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Financial Stage:",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
        ],
    }
}

fn render_results_tab(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(5)])
        .split(area);

    let results = Paragraph::new(stage_lines(app))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Results "),
        );

    f.render_widget(results, chunks[0]);
    render_progress(f, chunks[1], app);
}

fn render_single(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(rows[0]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(columns[0]);

    render_form(f, left[0], app);
    render_guidance(f, left[1], app);
    render_charts(f, columns[1], app);
    render_progress(f, rows[1], app);
}

fn render_guidance(f: &mut Frame, area: Rect, app: &App) {
    let mut content = stage_lines(app);

    if let Some(a) = &app.assessment {
        content.push(Line::from(""));
        for line in spending_plan_text().lines() {
            content.push(Line::from(format!("  {}", line)));
        }
        for line in spending_allocation(a.inputs.income, &app.config.currency) {
            content.push(Line::from(Span::styled(
                format!("    {}", line),
                Style::default().fg(Color::Green),
            )));
        }
        content.push(Line::from(""));
        for line in hero_journey_text().lines() {
            content.push(Line::from(format!("  {}", line)));
        }
    }

    let guidance = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Results "),
        );

    f.render_widget(guidance, area);
}

fn render_progress(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Critical Mass Progress ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let (ratio, caption) = match &app.assessment {
        Some(a) => (
            a.progress_percent() / 100.0,
            a.progress_caption(&app.config.currency),
        ),
        None => (0.0, String::new()),
    };

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Green).bg(Color::DarkGray))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{:.1}%", ratio * 100.0));

    f.render_widget(gauge, rows[0]);
    f.render_widget(Paragraph::new(caption), rows[1]);
}

fn render_charts(f: &mut Frame, area: Rect, app: &App) {
    let Some(assessment) = &app.assessment else {
        let empty = Paragraph::new("  Submit your figures to see the charts.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Charts "),
            );
        f.render_widget(empty, area);
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(75), Constraint::Percentage(25)])
        .split(rows[1]);

    render_proportions(f, rows[0], &assessment.chart, &app.config.currency);
    render_magnitudes(f, columns[0], &assessment.chart, &app.config.currency);
    render_coverage(f, columns[1], &assessment.chart);
}

/// Split `width` cells between slices by share. Rounding leftovers go to the
/// largest slice so the bar always fills the width.
pub fn proportion_segments(slices: &[Slice], width: u16) -> Vec<(Field, u16)> {
    let mut segments: Vec<(Field, u16)> = slices
        .iter()
        .map(|s| (s.field, (s.percent / 100.0 * width as f64).floor() as u16))
        .collect();

    let used: u16 = segments.iter().map(|(_, w)| *w).sum();
    let largest = slices
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.percent.total_cmp(&b.1.percent))
        .map(|(i, _)| i);

    if let Some(i) = largest {
        segments[i].1 += width.saturating_sub(used);
    }
    segments
}

fn render_proportions(f: &mut Frame, area: Rect, chart: &ChartData, currency: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Financial Overview ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let slices = match chart.proportions() {
        Ok(slices) => slices,
        Err(e) => {
            let msg = Paragraph::new(format!(" {}", e)).style(Style::default().fg(Color::Red));
            f.render_widget(msg, inner);
            return;
        }
    };

    let bar_width = inner.width.saturating_sub(2);
    let bar: Vec<Span> = proportion_segments(&slices, bar_width)
        .into_iter()
        .map(|(field, w)| {
            Span::styled(
                " ".repeat(w as usize),
                Style::default().bg(rgb(field_color(field))),
            )
        })
        .collect();

    let mut content = vec![Line::from(""), Line::from([vec![Span::raw(" ")], bar].concat())];
    content.push(Line::from(""));
    for slice in &slices {
        content.push(Line::from(vec![
            Span::raw(" "),
            Span::styled("■ ", Style::default().fg(rgb(field_color(slice.field)))),
            Span::styled(format!("{:<12}", slice.field.label()), Style::default().fg(Color::Cyan)),
            Span::raw(format!("{:>5.1}%  ", slice.percent)),
            Span::styled(
                format!("{} {}", currency, format_amount(slice.value as i128)),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    f.render_widget(Paragraph::new(content), inner);
}

/// Largest value ratatui can multiply by a bar height and 8 without overflow
const MAX_BAR_VALUE: u64 = u64::MAX / (8 * u16::MAX as u64);

/// Divide every value by the same factor so the largest fits MAX_BAR_VALUE.
/// Returns the scaled values and the chart maximum (never 0).
pub fn scale_bar_values(values: &[u64]) -> (Vec<u64>, u64) {
    let max = values.iter().copied().max().unwrap_or(0);
    let divisor = max / MAX_BAR_VALUE + 1;
    let scaled = values.iter().map(|v| v / divisor).collect();
    (scaled, (max / divisor).max(1))
}

fn render_magnitudes(f: &mut Frame, area: Rect, chart: &ChartData, currency: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Financial Breakdown ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(Field::ALL.len() as u16)])
        .split(inner);

    let bars = chart.bars();
    let raw: Vec<u64> = bars.iter().map(|b| b.value.max(0) as u64).collect();
    let (scaled, max) = scale_bar_values(&raw);

    let chart_bars: Vec<Bar> = bars
        .iter()
        .zip(scaled)
        .map(|(b, value)| {
            Bar::default()
                .value(value)
                .text_value(format_amount(b.value as i128))
                .label(Line::from(b.field.label()))
                .style(Style::default().fg(rgb(field_color(b.field))))
        })
        .collect();

    let barchart = BarChart::default()
        .data(BarGroup::default().bars(&chart_bars))
        .max(max)
        .bar_width(12)
        .bar_gap(2)
        .value_style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD));

    f.render_widget(barchart, rows[0]);

    // Bars truncate long labels, so the exact amounts are listed underneath
    let amounts: Vec<Line> = bars
        .iter()
        .map(|b| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<12}", b.field.label()),
                    Style::default().fg(rgb(field_color(b.field))),
                ),
                Span::raw(format!("{} {}", currency, format_amount(b.value as i128))),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(amounts), rows[1]);
}

fn render_coverage(f: &mut Frame, area: Rect, chart: &ChartData) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White))
        .title(" Number of Months ");

    match chart.coverage_months() {
        Ok(months) => {
            let inner = block.inner(area);
            f.render_widget(block, area);

            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(1)])
                .split(inner);

            // `as` saturates, so huge or negative months stay in range
            let (scaled, max) = scale_bar_values(&[months.max(0.0).round() as u64]);
            let bar = [Bar::default()
                .value(scaled[0])
                .text_value(format!("{:.1}", months))
                .label(Line::from("Savings (Months)"))
                .style(Style::default().fg(rgb(COVERAGE_COLOR)))];

            let barchart = BarChart::default()
                .data(BarGroup::default().bars(&bar))
                .max(max)
                .bar_width(rows[0].width.max(1))
                .value_style(Style::default().fg(Color::Black).add_modifier(Modifier::BOLD));
            f.render_widget(barchart, rows[0]);

            let caption = Paragraph::new(format!("{:.1} months", months))
                .style(Style::default().fg(rgb(COVERAGE_COLOR)));
            f.render_widget(caption, rows[1]);
        }
        Err(e) => {
            let msg = Paragraph::new(format!(" {}", e))
                .wrap(Wrap { trim: true })
                .style(Style::default().fg(Color::Red))
                .block(block);
            f.render_widget(msg, area);
        }
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Submit | "),
        Span::styled("F5", Style::default().fg(Color::Yellow)),
        Span::raw(" Random Event | "),
        Span::styled("Tab/↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Field | "),
    ];

    if app.layout() == LayoutMode::Tabbed {
        status_spans.push(Span::styled("F1-F3", Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(" Tabs | "));
    }

    status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Close/Quit"));

    let status_bar = Paragraph::new(Line::from(status_spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn render_popups(f: &mut Frame, app: &App) {
    let popups = app.notifications.active();
    if popups.is_empty() {
        return;
    }

    let area = centered_rect(60, 80, f.size());
    let mut constraints: Vec<Constraint> = popups
        .iter()
        .map(|p| Constraint::Length(p.message.lines().count() as u16 + 4))
        .collect();
    constraints.push(Constraint::Min(0));

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (popup, slot) in popups.iter().zip(slots.iter()) {
        let color = if popup.title == crate::app::INPUT_ERROR_TITLE {
            Color::Red
        } else {
            Color::Yellow
        };

        let body = Paragraph::new(popup.message.as_str())
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(format!(" {} ", popup.title)),
            );

        f.render_widget(Clear, *slot);
        f.render_widget(body, *slot);
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::inputs::FinancialInputs;
    use ratatui::backend::TestBackend;

    fn app(layout: LayoutMode) -> App {
        App::new(AppConfig {
            layout,
            rng_seed: Some(5),
            ..AppConfig::default()
        })
    }

    fn fill(app: &mut App, values: [&str; 4]) {
        for (field, value) in Field::ALL.iter().zip(values.iter()) {
            app.set_entry(*field, value);
        }
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 48)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_tabbed_results_render() {
        let mut app = app(LayoutMode::Tabbed);
        fill(&mut app, ["130000", "50000", "0", "0"]);
        app.submit(Duration::ZERO);

        let screen = draw(&app);
        assert!(screen.contains("Financial Independence Tracker"));
        assert!(screen.contains("Debt Freedom"));
        assert!(screen.contains("Progress: 50.0%"));
    }

    #[test]
    fn test_charts_show_coverage_error() {
        let mut app = app(LayoutMode::Tabbed);
        fill(&mut app, ["1000", "0", "500", "0"]);
        app.submit(Duration::ZERO);
        app.dispatch(Action::SelectTab(Tab::Charts), Duration::ZERO);

        let screen = draw(&app);
        assert!(screen.contains("Financial Overview"));
        assert!(screen.contains("division by zero"));
    }

    #[test]
    fn test_single_layout_shows_plan_and_journey() {
        let mut app = app(LayoutMode::Single);
        fill(&mut app, ["120000", "60000", "30000", "1"]);
        app.submit(Duration::ZERO);

        let screen = draw(&app);
        assert!(screen.contains("Financial Adventure"));
        assert!(screen.contains("Financial Stability"));
        assert!(screen.contains("Conscious Spending Plan:"));
        assert!(screen.contains("Financial Breakdown"));
    }

    #[test]
    fn test_popup_is_drawn() {
        let mut app = app(LayoutMode::Tabbed);
        app.tick(Duration::ZERO);
        let screen = draw(&app);
        assert!(screen.contains("Financial Tip"));
    }

    #[test]
    fn test_map_key() {
        let mut app = app(LayoutMode::Tabbed);
        assert_eq!(map_key(key(KeyCode::Char('7')), &app), Some(Action::Type('7')));
        assert_eq!(map_key(key(KeyCode::Enter), &app), Some(Action::Submit));
        assert_eq!(map_key(key(KeyCode::F(5)), &app), Some(Action::RandomEvent));
        assert_eq!(
            map_key(key(KeyCode::F(3)), &app),
            Some(Action::SelectTab(Tab::Charts))
        );
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &app),
            Some(Action::Quit)
        );

        // Form is hidden on the Results tab
        app.current_tab = Tab::Results;
        assert_eq!(map_key(key(KeyCode::Char('7')), &app), None);

        let single = self::app(LayoutMode::Single);
        assert_eq!(map_key(key(KeyCode::F(1)), &single), None);
    }

    #[test]
    fn test_proportion_segments_fill_width() {
        let chart = ChartData::new(FinancialInputs::new(1, 1, 1, 0));
        let slices = chart.proportions().unwrap();
        let segments = proportion_segments(&slices, 100);

        let total: u16 = segments.iter().map(|(_, w)| *w).sum();
        assert_eq!(total, 100);
        assert_eq!(segments[3], (Field::Liabilities, 0));
    }

    #[test]
    fn test_scale_bar_values_keeps_ratios_in_range() {
        let (scaled, max) = scale_bar_values(&[u64::MAX, u64::MAX / 2, 0]);
        assert!(max <= MAX_BAR_VALUE);
        assert_eq!(scaled[0], max);
        assert!(scaled[1] * 2 <= scaled[0] && scaled[1] * 2 + 2 >= scaled[0]);
        assert_eq!(scaled[2], 0);

        // Small values are left alone
        assert_eq!(scale_bar_values(&[3, 7]), (vec![3, 7], 7));
        // All-zero charts still get a usable maximum
        assert_eq!(scale_bar_values(&[0, 0]), (vec![0, 0], 1));
    }

    #[test]
    fn test_huge_income_charts_render() {
        let mut app = app(LayoutMode::Tabbed);
        fill(&mut app, ["100000000000000000", "1000", "1000", "0"]);
        app.submit(Duration::ZERO);
        app.dispatch(Action::SelectTab(Tab::Charts), Duration::ZERO);

        let screen = draw(&app);
        assert!(screen.contains("100,000,000,000,000,000"));
    }

    #[test]
    fn test_extreme_values_render_in_both_layouts() {
        let max = i64::MAX.to_string();
        let min = i64::MIN.to_string();
        let cases = [
            [max.as_str(), "1", max.as_str(), min.as_str()],
            [min.as_str(), min.as_str(), min.as_str(), min.as_str()],
            [max.as_str(), max.as_str(), max.as_str(), max.as_str()],
        ];

        for layout in [LayoutMode::Tabbed, LayoutMode::Single] {
            for values in cases.iter() {
                let mut app = app(layout);
                fill(&mut app, *values);
                app.submit(Duration::ZERO);
                assert!(app.assessment.is_some());

                if layout == LayoutMode::Tabbed {
                    // Results tab first, then the charts
                    draw(&app);
                    app.dispatch(Action::SelectTab(Tab::Charts), Duration::ZERO);
                }

                let screen = draw(&app);
                let first = format_amount(values[0].parse::<i64>().unwrap() as i128);
                assert!(screen.contains(&first), "missing {} in\n{}", first, screen);
            }
        }
    }

    #[test]
    fn test_large_savings_small_expenses_coverage() {
        let mut app = app(LayoutMode::Tabbed);
        fill(&mut app, ["0", "12", "100000000000000000", "0"]);
        app.submit(Duration::ZERO);
        app.dispatch(Action::SelectTab(Tab::Charts), Duration::ZERO);

        let screen = draw(&app);
        assert!(screen.contains("100000000000000000.0"));
        assert!(screen.contains("100,000,000,000,000,000"));
    }

    #[test]
    fn test_loop_failure_is_returned() {
        assert!(loop_outcome(Ok(())).is_ok());

        let failed = loop_outcome(Err(io::Error::new(io::ErrorKind::Other, "terminal gone")));
        let err = failed.unwrap_err();
        assert!(err.to_string().contains("terminal gone"));
    }
}
