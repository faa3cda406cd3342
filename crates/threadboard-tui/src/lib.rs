// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use threadboard_app::{
    AppCommand, AppEvent, Dashboard, DashboardState, FilterSelector, InputMode,
    PROCESSED_PLACEHOLDER_PERCENT, ThreadRecord, ThreadStats,
};

const CARD_HEIGHT: usize = 7;
const TEXT_WIDTH: usize = 110;
const STATUS_CLEAR_DELAY: Duration = Duration::from_secs(4);
const DEFAULT_REFRESH_DELAY: Duration = Duration::from_secs(2);
const SEARCH_PLACEHOLDER: &str = "Search emails, senders, or keywords...";
const SELECTED_MARK: &str = "▌ ";
const UNSELECTED_MARK: &str = "  ";

pub trait AppRuntime {
    fn source_name(&self) -> String;
    fn load_threads(&mut self) -> Result<Vec<ThreadRecord>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TuiOptions {
    pub refresh_delay: Duration,
}

impl Default for TuiOptions {
    fn default() -> Self {
        Self {
            refresh_delay: DEFAULT_REFRESH_DELAY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
    RefreshElapsed { generation: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    dashboard: Dashboard,
    selected: usize,
    help_visible: bool,
    status_token: u64,
    refresh_delay: Duration,
}

pub fn run_app<R: AppRuntime>(
    state: &mut DashboardState,
    runtime: &mut R,
    options: TuiOptions,
) -> Result<()> {
    let mut view_data = ViewData {
        refresh_delay: options.refresh_delay,
        ..ViewData::default()
    };
    let (internal_tx, internal_rx) = mpsc::channel();

    match runtime.load_threads() {
        Ok(threads) => {
            tracing::info!(source = %runtime.source_name(), count = threads.len(), "threads loaded");
            view_data.dashboard.replace_threads(threads);
        }
        Err(error) => {
            tracing::warn!(error = %format!("{error:#}"), "initial thread load failed");
            emit_status(
                state,
                &mut view_data,
                &internal_tx,
                format!("load failed: {error:#}"),
            );
        }
    }

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let result = Terminal::new(backend)
        .context("create terminal")
        .and_then(|mut terminal| {
            event_loop(
                &mut terminal,
                state,
                runtime,
                &mut view_data,
                &internal_tx,
                &internal_rx,
            )
        });

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn event_loop<B: Backend, R: AppRuntime>(
    terminal: &mut Terminal<B>,
    state: &mut DashboardState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    internal_rx: &Receiver<InternalEvent>,
) -> Result<()> {
    loop {
        process_internal_events(state, runtime, view_data, internal_tx, internal_rx);

        terminal
            .draw(|frame| render(frame, state, view_data))
            .context("draw frame")?;

        if !event::poll(Duration::from_millis(120)).context("poll event")? {
            continue;
        }
        if let Event::Key(key) = event::read().context("read event")?
            && handle_key_event(state, view_data, internal_tx, key)
        {
            return Ok(());
        }
    }
}

fn process_internal_events<R: AppRuntime>(
    state: &mut DashboardState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::RefreshElapsed { generation } => {
                handle_refresh_elapsed(state, runtime, view_data, tx, generation);
            }
        }
    }
}

fn handle_refresh_elapsed<R: AppRuntime>(
    state: &mut DashboardState,
    runtime: &mut R,
    view_data: &mut ViewData,
    tx: &Sender<InternalEvent>,
    generation: u64,
) {
    let events = state.dispatch(AppCommand::CompleteRefresh { generation });
    let finished = events
        .iter()
        .any(|event| matches!(event, AppEvent::RefreshFinished { .. }));
    if !finished {
        tracing::debug!(generation, "stale refresh completion ignored");
        return;
    }

    match runtime.load_threads() {
        Ok(threads) => {
            let count = threads.len();
            view_data.dashboard.replace_threads(threads);
            clamp_selection(state, view_data);
            tracing::info!(generation, count, "refresh completed");
            emit_status(
                state,
                view_data,
                tx,
                format!("refreshed {count} threads from {}", runtime.source_name()),
            );
        }
        Err(error) => {
            tracing::warn!(generation, error = %format!("{error:#}"), "refresh failed");
            emit_status(
                state,
                view_data,
                tx,
                format!("refresh failed: {error:#}; showing previous threads"),
            );
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_DELAY);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn schedule_refresh_completion(internal_tx: &Sender<InternalEvent>, generation: u64, delay: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(InternalEvent::RefreshElapsed { generation });
    });
}

fn emit_status(
    state: &mut DashboardState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    dispatch(
        state,
        view_data,
        internal_tx,
        AppCommand::SetStatus(message.into()),
    );
}

fn dispatch(
    state: &mut DashboardState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    for event in &events {
        match event {
            AppEvent::QueryChanged(_) | AppEvent::FilterChanged(_) => {
                view_data.selected = 0;
            }
            AppEvent::RefreshStarted { generation } => {
                tracing::debug!(generation, "refresh started");
                schedule_refresh_completion(internal_tx, *generation, view_data.refresh_delay);
            }
            AppEvent::StatusUpdated(_) => {
                view_data.status_token = view_data.status_token.saturating_add(1);
                schedule_status_clear(internal_tx, view_data.status_token);
            }
            AppEvent::ModeChanged(_)
            | AppEvent::RefreshFinished { .. }
            | AppEvent::StatusCleared => {}
        }
    }
}

fn handle_key_event(
    state: &mut DashboardState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    match state.mode {
        InputMode::Search => {
            handle_search_key(state, view_data, internal_tx, key);
            false
        }
        InputMode::Nav => handle_nav_key(state, view_data, internal_tx, key),
    }
}

fn handle_search_key(
    state: &mut DashboardState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let command = match (key.code, key.modifiers) {
        (KeyCode::Enter, _) | (KeyCode::Esc, _) => AppCommand::ExitSearch,
        (KeyCode::Backspace, _) => AppCommand::PopQueryChar,
        (KeyCode::Char('u'), modifiers) if modifiers.contains(KeyModifiers::CONTROL) => {
            AppCommand::ClearQuery
        }
        (KeyCode::Char(ch), modifiers)
            if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            AppCommand::PushQueryChar(ch)
        }
        _ => return,
    };
    dispatch(state, view_data, internal_tx, command);
}

fn handle_nav_key(
    state: &mut DashboardState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    let command = match (key.code, key.modifiers) {
        (KeyCode::Char('q'), KeyModifiers::NONE) => return true,
        (KeyCode::Char('?'), _) => {
            view_data.help_visible = true;
            return false;
        }
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
            move_selection(state, view_data, 1);
            return false;
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
            move_selection(state, view_data, -1);
            return false;
        }
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
            view_data.selected = 0;
            return false;
        }
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
            view_data.selected = visible_count(state, view_data).saturating_sub(1);
            return false;
        }
        (KeyCode::Char('/'), KeyModifiers::NONE) => AppCommand::EnterSearch,
        (KeyCode::Char('f'), KeyModifiers::NONE) => AppCommand::NextFilter,
        (KeyCode::Char('F'), _) => AppCommand::PrevFilter,
        (KeyCode::Char('a'), KeyModifiers::NONE) => AppCommand::SetFilter(FilterSelector::All),
        (KeyCode::Char('u'), KeyModifiers::NONE) => quick_filter(state, FilterSelector::Unread),
        (KeyCode::Char('i'), KeyModifiers::NONE) => {
            quick_filter(state, FilterSelector::Important)
        }
        (KeyCode::Char('s'), KeyModifiers::NONE) => quick_filter(state, FilterSelector::Starred),
        (KeyCode::Char('t'), KeyModifiers::NONE) => AppCommand::SetFilter(FilterSelector::Today),
        (KeyCode::Char('w'), KeyModifiers::NONE) => AppCommand::SetFilter(FilterSelector::Week),
        (KeyCode::Char('r'), KeyModifiers::NONE) => AppCommand::BeginRefresh,
        (KeyCode::Esc, _) => {
            if state.query.is_empty() {
                AppCommand::ClearStatus
            } else {
                AppCommand::ClearQuery
            }
        }
        _ => return false,
    };
    dispatch(state, view_data, internal_tx, command);
    false
}

/// Badge behavior: selecting the active quick filter goes back to all.
fn quick_filter(state: &DashboardState, target: FilterSelector) -> AppCommand {
    if state.filter == target {
        AppCommand::SetFilter(FilterSelector::All)
    } else {
        AppCommand::SetFilter(target)
    }
}

fn visible_count(state: &DashboardState, view_data: &ViewData) -> usize {
    view_data.dashboard.visible(&state.query, state.filter).len()
}

fn move_selection(state: &DashboardState, view_data: &mut ViewData, delta: isize) {
    let count = visible_count(state, view_data);
    if count == 0 {
        view_data.selected = 0;
        return;
    }
    let max = count as isize - 1;
    let next = (view_data.selected as isize + delta).clamp(0, max);
    view_data.selected = next as usize;
}

fn clamp_selection(state: &DashboardState, view_data: &mut ViewData) {
    let count = visible_count(state, view_data);
    view_data.selected = view_data.selected.min(count.saturating_sub(1));
}

fn render(frame: &mut ratatui::Frame<'_>, state: &DashboardState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let stats = view_data.dashboard.stats();
    render_header(frame, layout[0], state);
    render_stats(frame, layout[1], &stats);

    let search = Paragraph::new(search_bar_lines(state, &stats))
        .block(Block::default().borders(Borders::ALL).title("search"));
    frame.render_widget(search, layout[2]);

    render_thread_list(frame, layout[3], state, view_data);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status, layout[4]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("help").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_header(frame: &mut ratatui::Frame<'_>, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title("threadboard")
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(18)])
        .split(inner);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            "Email Dashboard",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Smart email thread management for busy professionals"),
    ]);
    frame.render_widget(title, columns[0]);

    let refresh_style = if state.refresh.is_refreshing() {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let refresh = Paragraph::new(Line::from(Span::styled(
        refresh_label(state),
        refresh_style,
    )))
    .alignment(Alignment::Right);
    frame.render_widget(refresh, columns[1]);
}

fn refresh_label(state: &DashboardState) -> &'static str {
    if state.refresh.is_refreshing() {
        "Refreshing..."
    } else {
        "r Refresh"
    }
}

fn render_stats(frame: &mut ratatui::Frame<'_>, area: Rect, stats: &ThreadStats) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((value, label, color), column) in stats_cards(stats).into_iter().zip(columns.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(
                value,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(label, Style::default().fg(Color::Gray))),
        ])
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(card, *column);
    }
}

fn stats_cards(stats: &ThreadStats) -> [(String, &'static str, Color); 4] {
    [
        (stats.total.to_string(), "Total Threads", Color::Cyan),
        (stats.unread.to_string(), "Unread", Color::Blue),
        (stats.important.to_string(), "Important", Color::Red),
        (
            format!("{PROCESSED_PLACEHOLDER_PERCENT}%"),
            "Processed (placeholder)",
            Color::Green,
        ),
    ]
}

fn search_bar_lines(state: &DashboardState, stats: &ThreadStats) -> Vec<Line<'static>> {
    let searching = state.mode == InputMode::Search;
    let mut query_spans = vec![Span::raw("/ ")];
    if state.query.is_empty() && !searching {
        query_spans.push(Span::styled(
            SEARCH_PLACEHOLDER,
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        query_spans.push(Span::raw(state.query.clone()));
    }
    if searching {
        query_spans.push(Span::styled(
            "_",
            Style::default().add_modifier(Modifier::SLOW_BLINK),
        ));
    }

    let mut filter_spans = vec![
        Span::raw("filter: "),
        Span::styled(
            state.filter.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("   quick filters:"),
    ];
    for selector in FilterSelector::QUICK {
        let count = stats.count_for(selector).unwrap_or(0);
        let style = if state.filter == selector {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        filter_spans.push(Span::raw(" "));
        filter_spans.push(Span::styled(
            format!("{} ({count})", selector.badge_label()),
            style,
        ));
    }

    vec![Line::from(query_spans), Line::from(filter_spans)]
}

fn list_title(visible: usize, filter: FilterSelector) -> String {
    format!("Email Threads ({})", Dashboard::listing_label(visible, filter))
}

fn render_thread_list(
    frame: &mut ratatui::Frame<'_>,
    area: Rect,
    state: &DashboardState,
    view_data: &ViewData,
) {
    let visible = view_data.dashboard.visible(&state.query, state.filter);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(list_title(visible.len(), state.filter));

    if visible.is_empty() {
        let empty = Paragraph::new(empty_list_lines(&state.query))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let inner_height = usize::from(block.inner(area).height);
    let lines = visible
        .iter()
        .enumerate()
        .flat_map(|(index, record)| thread_card_lines(record, index == view_data.selected))
        .collect::<Vec<_>>();
    let offset = list_scroll_offset(view_data.selected, inner_height);
    let list = Paragraph::new(lines)
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0))
        .block(block);
    frame.render_widget(list, area);
}

fn empty_list_lines(query: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "No email threads found",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            Dashboard::empty_message(query),
            Style::default().fg(Color::Gray),
        )),
    ]
}

/// First line to show so the selected card is fully in view.
fn list_scroll_offset(selected: usize, inner_height: usize) -> usize {
    let card_bottom = (selected + 1) * CARD_HEIGHT;
    card_bottom.saturating_sub(inner_height)
}

fn thread_card_lines(record: &ThreadRecord, selected: bool) -> Vec<Line<'static>> {
    let mark = if selected { SELECTED_MARK } else { UNSELECTED_MARK };
    let mark_style = Style::default().fg(Color::Cyan);
    let dim = Style::default().fg(Color::Gray);

    let mut heading = vec![
        Span::styled(mark, mark_style),
        Span::styled(
            format!("[{}] ", avatar_label(record)),
            Style::default().fg(Color::Magenta),
        ),
        Span::styled(
            record.sender.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    if record.is_unread {
        heading.push(Span::styled(
            " New",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ));
    }
    if record.is_important {
        heading.push(Span::styled(" !", Style::default().fg(Color::Red)));
    }
    if record.is_starred {
        heading.push(Span::styled(" *", Style::default().fg(Color::Yellow)));
    }
    heading.push(Span::styled(format!("  {}", record.last_activity), dim));

    let subject_style = if record.is_unread {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    vec![
        Line::from(heading),
        Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(record.sender.email.clone(), dim),
        ]),
        Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(truncate_label(&record.subject, TEXT_WIDTH), subject_style),
        ]),
        Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(truncate_label(&record.preview, TEXT_WIDTH), dim),
        ]),
        Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(
                "AI Summary: ",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(truncate_label(&record.summary, TEXT_WIDTH)),
        ]),
        Line::from(vec![
            Span::styled(mark, mark_style),
            Span::styled(record.message_count_label(), dim),
            Span::styled("  | Email Thread", dim),
        ]),
        Line::from(""),
    ]
}

/// Terminal cards always show initials; `sender.avatar` is never rendered.
fn avatar_label(record: &ThreadRecord) -> String {
    let initials = record.sender.initials();
    if initials.is_empty() {
        "?".to_owned()
    } else {
        initials
    }
}

fn truncate_label(value: &str, max_chars: usize) -> String {
    let mut chars = value.chars();
    let truncated: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{truncated}…")
    } else {
        truncated
    }
}

fn status_text(state: &DashboardState) -> String {
    let (mode, hints) = match state.mode {
        InputMode::Nav => (
            "NAV",
            "/ search | f/F filter | u/i/s quick | a/t/w all/today/week | r refresh | j/k move | ? help | q quit",
        ),
        InputMode::Search => (
            "SEARCH",
            "type to filter | backspace delete | ctrl+u clear | enter/esc done",
        ),
    };
    match &state.status_line {
        Some(status) => format!("{mode} | {status} | {hints}"),
        None => format!("{mode} | {hints}"),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q quit | ? help\n\
nav: / search | esc clear query | q quit\n\
nav: f/F next/prev filter | a all | t today | w this week\n\
nav: u unread | i important | s starred (again to clear)\n\
nav: j/k or up/down move | g/G first/last | r refresh\n\
search: type to filter name, subject, preview | backspace delete | ctrl+u clear | enter/esc done"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
