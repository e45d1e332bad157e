// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use misprofes_app::{
    AppCommand, AppState, CellValue, Column, ConversationSession, DEFAULT_PAGE_WINDOW,
    DEFAULT_ROWS_PER_PAGE, EMPTY_PLACEHOLDER, LoadingIndicator, PageToken, Pagination, RowKey,
    Sender, ServiceReply, Submission, TabKind, TableEvent, TableView, TurnFailure, TurnId,
    TurnRequest,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};

const WELCOME_PROMPT: &str = "¿Qué te gustaría saber sobre tus profesores?";
const INPUT_PLACEHOLDER: &str = "Escribe aquí tu pregunta";
const STATUS_CLEAR_AFTER: Duration = Duration::from_secs(4);
const PREVIEW_CHARS: usize = 80;

pub trait AppRuntime {
    fn answer_turn(&mut self, request: &TurnRequest) -> Result<ServiceReply, TurnFailure>;

    /// Runs the turn and reports back over `tx`. Runtimes that talk to a real
    /// service override this to keep the UI responsive.
    fn spawn_turn(&mut self, request: TurnRequest, tx: mpsc::Sender<InternalEvent>) -> Result<()> {
        let outcome = self.answer_turn(&request);
        tx.send(InternalEvent::TurnSettled {
            turn: request.turn,
            outcome,
        })
        .map_err(|_| anyhow!("turn event channel closed"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus {
        token: u64,
    },
    TurnSettled {
        turn: TurnId,
        outcome: Result<ServiceReply, TurnFailure>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub rows_per_page: usize,
    pub page_window: usize,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            page_window: DEFAULT_PAGE_WINDOW,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HistoryRow {
    position: usize,
    sender: Sender,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HistoryField {
    Position,
    Sender,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct InputHistory {
    entries: Vec<String>,
    cursor: Option<usize>,
    buffer: String,
}

struct ViewData {
    session: ConversationSession,
    history: TableView<HistoryRow, HistoryField>,
    history_cursor: usize,
    input_history: InputHistory,
    loading: LoadingIndicator,
    help_visible: bool,
    status_token: u64,
}

impl ViewData {
    fn new(options: UiOptions) -> Result<Self> {
        let history = TableView::new(history_columns())
            .with_rows_per_page(options.rows_per_page)
            .context("ui.rows_per_page")?
            .with_page_window(options.page_window)
            .with_row_key(|row: &HistoryRow| RowKey::Id(row.position as i64));
        Ok(Self {
            session: ConversationSession::new(),
            history,
            history_cursor: 0,
            input_history: InputHistory::default(),
            loading: LoadingIndicator::default(),
            help_visible: false,
            status_token: 0,
        })
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    let mut view_data = ViewData::new(options)?;

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    let (internal_tx, internal_rx) = mpsc::channel();

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_tx, &internal_rx);

        let now = Instant::now();
        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data, now)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = match event::poll(Duration::from_millis(120)).context("poll event") {
            Ok(has_event) => has_event,
            Err(error) => {
                result = Err(error);
                break;
            }
        };
        if has_event {
            match event::read().context("read event") {
                Ok(Event::Key(key)) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Ok(_) => {}
                Err(error) => {
                    result = Err(error);
                    break;
                }
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &mpsc::Sender<InternalEvent>,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::TurnSettled { turn, outcome } => {
                settle_turn(state, view_data, tx, turn, outcome);
            }
        }
    }
}

fn settle_turn(
    state: &mut AppState,
    view_data: &mut ViewData,
    tx: &mpsc::Sender<InternalEvent>,
    turn: TurnId,
    outcome: Result<ServiceReply, TurnFailure>,
) {
    let Some(settlement) = view_data.session.settle(turn, outcome) else {
        tracing::debug!(turn = turn.get(), "ignoring stale turn outcome");
        return;
    };
    view_data.loading.stop();
    sync_history_rows(view_data);

    if let Some(id) = &settlement.adopted {
        tracing::info!(turn = turn.get(), conversation_id = %id, "conversation id assigned");
    }
    match settlement.failure {
        Some(failure) => {
            tracing::warn!(turn = turn.get(), %failure, "turn failed");
            emit_status(state, view_data, tx, format!("consulta fallida: {failure}"));
        }
        None => {
            tracing::info!(turn = turn.get(), "turn answered");
        }
    }
}

fn schedule_status_clear(internal_tx: &mpsc::Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(STATUS_CLEAR_AFTER);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &mpsc::Sender<InternalEvent>,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &mpsc::Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        return true;
    }

    if key.code == KeyCode::F(1) {
        view_data.help_visible = !view_data.help_visible;
        return false;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc {
            view_data.help_visible = false;
        }
        return false;
    }

    match key.code {
        KeyCode::Tab => {
            state.dispatch(AppCommand::NextTab);
            return false;
        }
        KeyCode::BackTab => {
            state.dispatch(AppCommand::PrevTab);
            return false;
        }
        _ => {}
    }

    match state.active_tab() {
        TabKind::Chat => handle_chat_key(state, runtime, view_data, internal_tx, key),
        TabKind::History => handle_history_key(state, view_data, internal_tx, key),
    }
    false
}

fn handle_chat_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &mpsc::Sender<InternalEvent>,
    key: KeyEvent,
) {
    // input is frozen while a turn is in flight
    if view_data.session.is_awaiting() {
        return;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => submit_chat_input(state, runtime, view_data, internal_tx),
        (KeyCode::Up, _) => input_history_prev(view_data),
        (KeyCode::Down, _) => input_history_next(view_data),
        (KeyCode::Backspace, _) => {
            view_data.session.pop_input();
            view_data.input_history.cursor = None;
        }
        (KeyCode::Char(ch), modifiers) => {
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                view_data.session.push_input(ch);
                view_data.input_history.cursor = None;
            }
        }
        _ => {}
    }
}

fn submit_chat_input<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &mpsc::Sender<InternalEvent>,
) {
    let request = match view_data.session.submit_pending() {
        Submission::Dispatched(request) => request,
        Submission::Rejected(reason) => {
            tracing::debug!(?reason, "submission discarded");
            return;
        }
    };

    let history = &mut view_data.input_history;
    if history.entries.last() != Some(&request.text) {
        history.entries.push(request.text.clone());
    }
    history.cursor = None;
    history.buffer.clear();

    state.dispatch(AppCommand::EnableHistory);
    sync_history_rows(view_data);
    view_data.loading.start(Instant::now());

    tracing::info!(
        turn = request.turn.get(),
        history_len = request.history.len(),
        has_conversation = request.conversation_id.is_some(),
        "turn dispatched"
    );

    let turn = request.turn;
    if let Err(error) = runtime.spawn_turn(request, internal_tx.clone()) {
        settle_turn(
            state,
            view_data,
            internal_tx,
            turn,
            Err(TurnFailure::Transport(format!("{error:#}"))),
        );
    }
}

fn input_history_prev(view_data: &mut ViewData) {
    let history = &mut view_data.input_history;
    if history.entries.is_empty() {
        return;
    }
    let next = match history.cursor {
        None => {
            history.buffer = view_data.session.pending_input().to_owned();
            history.entries.len() - 1
        }
        Some(0) => 0,
        Some(index) => index - 1,
    };
    history.cursor = Some(next);
    view_data
        .session
        .set_pending_input(history.entries[next].clone());
}

fn input_history_next(view_data: &mut ViewData) {
    let history = &mut view_data.input_history;
    let Some(index) = history.cursor else {
        return;
    };
    if index + 1 < history.entries.len() {
        history.cursor = Some(index + 1);
        view_data
            .session
            .set_pending_input(history.entries[index + 1].clone());
    } else {
        history.cursor = None;
        let buffer = std::mem::take(&mut history.buffer);
        view_data.session.set_pending_input(buffer);
    }
}

fn handle_history_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &mpsc::Sender<InternalEvent>,
    key: KeyEvent,
) {
    let events = match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.history_cursor = view_data.history_cursor.saturating_sub(1);
            Vec::new()
        }
        KeyCode::Down | KeyCode::Char('j') => {
            view_data.history_cursor = view_data.history_cursor.saturating_add(1);
            clamp_history_cursor(view_data);
            Vec::new()
        }
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('l') => view_data.history.next_page(),
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('h') => view_data.history.prev_page(),
        KeyCode::Home => view_data.history.request_page(1),
        KeyCode::End => {
            let last = view_data.history.total_pages();
            view_data.history.request_page(last)
        }
        KeyCode::Enter => view_data.history.click_row(view_data.history_cursor),
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            let column = ch
                .to_digit(10)
                .and_then(|digit| (digit as usize).checked_sub(1))
                .and_then(|index| view_data.history.columns().get(index))
                .map(|column| column.key);
            match column {
                Some(field) => view_data.history.click_header(field),
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    };

    for event in events {
        apply_history_event(state, view_data, internal_tx, event);
    }
}

fn apply_history_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &mpsc::Sender<InternalEvent>,
    event: TableEvent<HistoryField>,
) {
    match event {
        TableEvent::SortChanged(sort) => {
            let label = view_data
                .history
                .columns()
                .iter()
                .find(|column| column.key == sort.key)
                .map(|column| column.label.clone())
                .unwrap_or_default();
            view_data.history_cursor = 0;
            emit_status(
                state,
                view_data,
                internal_tx,
                format!("orden {label} {}", sort.direction.as_str()),
            );
        }
        TableEvent::PageChanged(page) | TableEvent::PageChangeRequested(page) => {
            view_data.history_cursor = 0;
            emit_status(state, view_data, internal_tx, format!("página {page}"));
        }
        TableEvent::RowClicked(key) => {
            let preview = view_data
                .history
                .visible_rows()
                .into_iter()
                .find(|visible| visible.key == key)
                .map(|visible| {
                    format!(
                        "#{} {}: {}",
                        visible.row.position,
                        sender_label(visible.row.sender),
                        preview_text(&visible.row.text, 120)
                    )
                });
            if let Some(preview) = preview {
                emit_status(state, view_data, internal_tx, preview);
            }
        }
    }
}

fn sync_history_rows(view_data: &mut ViewData) {
    let rows = view_data
        .session
        .log()
        .iter()
        .enumerate()
        .map(|(index, message)| HistoryRow {
            position: index + 1,
            sender: message.sender,
            text: message.text.clone(),
        })
        .collect();
    view_data.history.set_rows(rows);
    clamp_history_cursor(view_data);
}

fn clamp_history_cursor(view_data: &mut ViewData) {
    let visible = view_data.history.visible_rows().len();
    view_data.history_cursor = view_data.history_cursor.min(visible.saturating_sub(1));
}

fn history_columns() -> Vec<Column<HistoryRow, HistoryField>> {
    vec![
        Column::new(HistoryField::Position, "#", |row: &HistoryRow| {
            CellValue::Integer(row.position as i64)
        })
        .with_width(4),
        Column::new(HistoryField::Sender, "quién", |row: &HistoryRow| {
            CellValue::from(sender_label(row.sender))
        })
        .with_width(10),
        Column::new(HistoryField::Text, "mensaje", |row: &HistoryRow| {
            CellValue::from(row.text.as_str())
        })
        .with_render(|_value, row| preview_text(&row.text, PREVIEW_CHARS)),
    ]
}

const fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "tú",
        Sender::Assistant => "asistente",
    }
}

fn preview_text(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().find(|line| !line.trim().is_empty()).unwrap_or("");
    let first_line = first_line.trim();
    let multiline = text.trim().lines().count() > 1;
    if first_line.chars().count() <= max_chars && !multiline {
        return first_line.to_owned();
    }
    let mut out: String = first_line.chars().take(max_chars).collect();
    out.push('…');
    out
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData, now: Instant) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let tab_titles = state
        .tabs
        .tabs()
        .iter()
        .map(|tab| {
            let style = if tab.disabled {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(tab.display_title(), style))
        })
        .collect::<Vec<_>>();
    let tabs = Tabs::new(tab_titles)
        .block(Block::default().title("misprofes").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(state.tabs.active_index().unwrap_or(0));
    frame.render_widget(tabs, layout[0]);

    match state.active_tab() {
        TabKind::Chat => render_chat(frame, layout[1], view_data),
        TabKind::History => render_history(frame, layout[1], view_data),
    }

    let input = Paragraph::new(input_line(view_data, now))
        .block(Block::default().title("pregunta").borders(Borders::ALL));
    frame.render_widget(input, layout[2]);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, layout[3]);

    if view_data.help_visible {
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("ayuda").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_chat(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let lines = transcript_lines(&view_data.session);
    let visible_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible_height);
    let chat = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(chat, area);
}

fn transcript_lines(session: &ConversationSession) -> Vec<Line<'static>> {
    if session.log().is_empty() {
        return vec![Line::from(Span::styled(
            WELCOME_PROMPT,
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))];
    }

    let mut lines = Vec::new();
    for message in session.log() {
        let label = Span::styled(
            format!("{}:", sender_label(message.sender)),
            Style::default()
                .fg(match message.sender {
                    Sender::User => Color::Green,
                    Sender::Assistant => Color::Cyan,
                })
                .add_modifier(Modifier::BOLD),
        );
        lines.push(Line::from(label));
        match message.sender {
            Sender::User => {
                lines.extend(
                    message
                        .text
                        .lines()
                        .map(|line| Line::from(Span::raw(format!("  {line}")))),
                );
            }
            Sender::Assistant => lines.extend(rich_text_lines(&message.text)),
        }
        lines.push(Line::default());
    }
    lines
}

/// Light formatting for assistant replies: headings, bullets and `**bold**`.
fn rich_text_lines(text: &str) -> Vec<Line<'static>> {
    text.lines()
        .map(|raw| {
            let trimmed = raw.trim_start();
            if trimmed.starts_with('#') {
                let heading = trimmed.trim_start_matches('#').trim();
                return Line::from(Span::styled(
                    format!("  {heading}"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                ));
            }

            let (prefix, body) = match trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
            {
                Some(rest) => ("  • ".to_owned(), rest),
                None => ("  ".to_owned(), raw),
            };
            let mut spans = vec![Span::raw(prefix)];
            spans.extend(emphasis_spans(body));
            Line::from(spans)
        })
        .collect()
}

fn emphasis_spans(text: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (index, segment) in text.split("**").enumerate() {
        if segment.is_empty() {
            continue;
        }
        if index % 2 == 1 {
            spans.push(Span::styled(
                segment.to_owned(),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(segment.to_owned()));
        }
    }
    spans
}

fn input_line(view_data: &ViewData, now: Instant) -> Line<'static> {
    if view_data.session.is_awaiting() {
        let frame = view_data.loading.frame_at(now).unwrap_or("…");
        return Line::from(Span::styled(
            format!("{frame} consultando..."),
            Style::default().fg(Color::DarkGray),
        ));
    }
    let input = view_data.session.pending_input();
    if input.is_empty() {
        return Line::from(vec![
            Span::raw("> "),
            Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray)),
        ]);
    }
    Line::from(format!("> {input}"))
}

fn render_history(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let table_view = &view_data.history;
    let columns = table_view.columns();
    let widths = columns
        .iter()
        .map(|column| match column.width {
            Some(width) => Constraint::Length(width),
            None => Constraint::Fill(1),
        })
        .collect::<Vec<_>>();

    let header = Row::new(columns.iter().map(|column| {
        Cell::from(header_label(table_view, column.key, &column.label)).style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
    }));

    let rows: Vec<Row> = if table_view.is_empty() {
        vec![Row::new(vec![Cell::from(EMPTY_PLACEHOLDER)]).style(Style::default().fg(Color::DarkGray))]
    } else {
        table_view
            .visible_rows()
            .into_iter()
            .enumerate()
            .map(|(index, visible)| {
                let cells = columns
                    .iter()
                    .map(|column| Cell::from(column.render_cell(visible.row)))
                    .collect::<Vec<_>>();
                let style = if index == view_data.history_cursor {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default()
                };
                Row::new(cells).style(style)
            })
            .collect()
    };

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(history_title(table_view.pagination()))
                .borders(Borders::ALL),
        );
    frame.render_widget(table, area);
}

fn header_label(
    table_view: &TableView<HistoryRow, HistoryField>,
    key: HistoryField,
    label: &str,
) -> String {
    match table_view.sort_direction_for(key) {
        Some(direction) => format!("{label} {}", direction.marker()),
        None => label.to_owned(),
    }
}

fn history_title(pagination: Option<Pagination>) -> String {
    match pagination {
        Some(pagination) => format!("historial {}", pagination_text(&pagination)),
        None => "historial".to_owned(),
    }
}

fn pagination_text(pagination: &Pagination) -> String {
    let mut parts = Vec::new();
    parts.push(if pagination.prev_disabled() { "·" } else { "«" }.to_owned());
    for token in pagination.tokens() {
        parts.push(match token {
            PageToken::Page(page) if page == pagination.current_page() => format!("[{page}]"),
            PageToken::Page(page) => page.to_string(),
            PageToken::Ellipsis => "…".to_owned(),
        });
    }
    parts.push(if pagination.next_disabled() { "·" } else { "»" }.to_owned());
    parts.join(" ")
}

fn status_text(state: &AppState) -> String {
    if let Some(status) = &state.status_line {
        return status.clone();
    }
    match state.active_tab() {
        TabKind::Chat => "enter enviar | ↑/↓ preguntas previas | tab historial | F1 ayuda | ctrl+q salir"
            .to_owned(),
        TabKind::History => {
            "1-3 ordenar | ←/→ página | ↑/↓ fila | enter ver | tab chat | ctrl+q salir".to_owned()
        }
    }
}

fn help_overlay_text() -> &'static str {
    "chat\n  enter        enviar pregunta\n  ↑/↓          preguntas anteriores\n\nhistorial\n  1 2 3        ordenar por columna (asc/desc)\n  ←/→ pgup/dn  cambiar de página\n  home/end     primera/última página\n  ↑/↓ j/k      mover fila\n  enter        ver mensaje completo en la barra\n\ngeneral\n  tab          cambiar pestaña\n  F1           ayuda\n  ctrl+q       salir"
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
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
        .split(vertical[1])[1]
}
