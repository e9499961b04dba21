// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use projetos_app::{
    ApiError, AppCommand, AppEvent, AppState, CreateOutcome, CreateProjectForm, DELETE_LABEL,
    DELETING_LABEL, DeleteConfirmation, EditModal, FilterState, FormField, HomeEntry, HomeList,
    ModalCommand, ModalEvent, NewProject, PointerTarget, Project, ProjectId, ProjectTable,
    ProjectType, ProjectUpdate, Route, TABLE_COLUMNS, TableRow, TypeFilter, UPDATE_SUCCESS_MESSAGE,
    UpdateRequest,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use url::Url;

pub const DEFAULT_HOME_LIMIT: u32 = 15;

const NAV_ROUTES: [Route; 3] = [Route::Home, Route::History, Route::CreateProject];
const MODAL_WIDTH_PERCENT: u16 = 64;
const MODAL_HEIGHT_PERCENT: u16 = 60;
const DELETE_CANCELLED_MESSAGE: &str = "Exclusão cancelada.";
const DETAIL_MISSING_MESSAGE: &str = "Projeto não encontrado.";
const RELOAD_SUCCESS_MESSAGE: &str = "Lista atualizada.";
const RELOAD_FAILURE_MESSAGE: &str = "Não foi possível atualizar a lista.";

/// The seam between the terminal front end and the projetos API.
pub trait AppRuntime {
    fn list_projects(&mut self, limit: Option<u32>) -> Result<Vec<Project>, ApiError>;
    fn create_project(&mut self, project: &NewProject) -> Result<Project, ApiError>;
    fn update_project(
        &mut self,
        id: ProjectId,
        update: &ProjectUpdate,
    ) -> Result<Project, ApiError>;
    fn delete_project(&mut self, id: ProjectId) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiOptions {
    pub home_limit: u32,
    pub base_url: Url,
}

impl UiOptions {
    pub fn new(base_url: Url) -> Self {
        Self {
            home_limit: DEFAULT_HOME_LIMIT,
            base_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    ClearStatus { token: u64 },
}

/// Work queued by a key handler and run after the next frame, so busy labels are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingRequest {
    Update(UpdateRequest),
    Create(NewProject),
    Delete(ProjectId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ViewData {
    options: UiOptions,
    home: HomeList,
    home_records: Vec<Project>,
    history: ProjectTable,
    filter: FilterState,
    search_active: bool,
    selected: usize,
    modal: EditModal,
    create_form: CreateProjectForm,
    delete: Option<DeleteConfirmation>,
    detail: Option<Project>,
    help_visible: bool,
    screen: Rect,
    status_token: u64,
    pending: Option<PendingRequest>,
}

impl ViewData {
    fn new(options: UiOptions) -> Self {
        Self {
            options,
            home: HomeList::default(),
            home_records: Vec::new(),
            history: ProjectTable::default(),
            filter: FilterState::default(),
            search_active: false,
            selected: 0,
            modal: EditModal::default(),
            create_form: CreateProjectForm::default(),
            delete: None,
            detail: None,
            help_visible: false,
            screen: Rect::default(),
            status_token: 0,
            pending: None,
        }
    }
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen, EnableMouseCapture)
        .context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::new(options);
    let (internal_tx, internal_rx) = mpsc::channel();

    enter_route(state, runtime, &mut view_data);

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        match terminal.draw(|frame| render(frame, state, &view_data)) {
            Ok(completed) => view_data.screen = completed.area,
            Err(error) => {
                result = Err(error).context("draw frame");
                break;
            }
        }

        if view_data.pending.is_some() {
            run_pending_request(state, runtime, &mut view_data, &internal_tx);
            continue;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(state, &mut view_data, &internal_tx, mouse);
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(
        io::stdout(),
        DisableMouseCapture,
        terminal::LeaveAlternateScreen
    )
    .context("leave alternate screen")?;
    result
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
        }
    }
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_secs(4));
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    message: impl Into<String>,
) {
    let message = message.into().replace('\n', " | ");
    state.dispatch(AppCommand::SetStatus(message));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token);
}

fn navigate<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    if events
        .iter()
        .any(|event| matches!(event, AppEvent::RouteChanged(_)))
    {
        enter_route(state, runtime, view_data);
    }
}

/// Returns false when the route's list could not be fetched.
fn enter_route<R: AppRuntime>(
    state: &AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
) -> bool {
    view_data.selected = 0;
    view_data.search_active = false;
    view_data.delete = None;
    match state.route {
        Route::Home => load_home(runtime, view_data),
        Route::History => load_history(runtime, view_data),
        Route::CreateProject => true,
        Route::ProjectDetail(id) => {
            let found = view_data
                .detail
                .as_ref()
                .filter(|project| project.id == id)
                .or_else(|| find_project(view_data, id))
                .cloned();
            view_data.detail = found;
            true
        }
    }
}

fn load_home<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> bool {
    let result = runtime.list_projects(Some(view_data.options.home_limit));
    match &result {
        Ok(projects) => {
            tracing::info!(count = projects.len(), "home list loaded");
            view_data.home_records.clone_from(projects);
        }
        Err(error) => {
            tracing::error!(%error, "load home list");
            view_data.home_records.clear();
        }
    }
    let loaded = result.is_ok();
    view_data.home = HomeList::load(result);
    loaded
}

fn load_history<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> bool {
    let result = runtime.list_projects(None);
    match &result {
        Ok(projects) => tracing::info!(count = projects.len(), "history loaded"),
        Err(error) => tracing::error!(%error, "load history"),
    }
    let loaded = result.is_ok();
    view_data.history.load(result);
    loaded
}

fn find_project(view_data: &ViewData, id: ProjectId) -> Option<&Project> {
    view_data
        .history
        .get(id)
        .or_else(|| view_data.home_records.iter().find(|project| project.id == id))
}

fn visible_history_rows(view_data: &ViewData) -> Vec<TableRow> {
    view_data.filter.visible_rows(&view_data.history)
}

fn selectable_count(state: &AppState, view_data: &ViewData) -> usize {
    match state.route {
        Route::Home => view_data.home.items().count(),
        Route::History => visible_history_rows(view_data).len(),
        Route::CreateProject | Route::ProjectDetail(_) => 0,
    }
}

fn selected_project_id(state: &AppState, view_data: &ViewData) -> Option<ProjectId> {
    match state.route {
        Route::Home => view_data
            .home
            .items()
            .nth(view_data.selected)
            .map(|item| item.id),
        Route::History => visible_history_rows(view_data)
            .get(view_data.selected)
            .and_then(TableRow::id),
        Route::CreateProject | Route::ProjectDetail(_) => None,
    }
}

fn move_selection(state: &AppState, view_data: &mut ViewData, delta: isize) {
    let count = selectable_count(state, view_data);
    if count == 0 {
        view_data.selected = 0;
        return;
    }
    let next = view_data.selected.saturating_add_signed(delta);
    view_data.selected = next.min(count - 1);
}

fn clamp_selection(state: &AppState, view_data: &mut ViewData) {
    move_selection(state, view_data, 0);
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if view_data.pending.is_some() {
        return false;
    }

    if view_data.help_visible {
        if key.code == KeyCode::Esc || key.code == KeyCode::Char('?') {
            view_data.help_visible = false;
        }
        return false;
    }

    if view_data.modal.is_open() {
        handle_modal_key(state, view_data, internal_tx, key);
        return false;
    }

    if view_data.delete.is_some() {
        handle_delete_key(state, view_data, internal_tx, key);
        return false;
    }

    if view_data.search_active {
        handle_search_key(state, view_data, key);
        return false;
    }

    if state.route == Route::CreateProject {
        handle_create_form_key(state, runtime, view_data, internal_tx, key);
        return false;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('?'), _) => view_data.help_visible = true,
        (KeyCode::Char('h'), KeyModifiers::NONE) => {
            navigate(state, runtime, view_data, AppCommand::Navigate(Route::Home));
        }
        (KeyCode::Char('p'), KeyModifiers::NONE) => {
            navigate(state, runtime, view_data, AppCommand::Navigate(Route::History));
        }
        (KeyCode::Char('a'), KeyModifiers::NONE) => {
            navigate(
                state,
                runtime,
                view_data,
                AppCommand::Navigate(Route::CreateProject),
            );
        }
        (KeyCode::Char('r'), KeyModifiers::NONE) => {
            let message = if enter_route(state, runtime, view_data) {
                RELOAD_SUCCESS_MESSAGE
            } else {
                RELOAD_FAILURE_MESSAGE
            };
            emit_status(state, view_data, internal_tx, message);
        }
        (KeyCode::Char('j') | KeyCode::Down, _) => move_selection(state, view_data, 1),
        (KeyCode::Char('k') | KeyCode::Up, _) => move_selection(state, view_data, -1),
        (KeyCode::Char('g'), KeyModifiers::NONE) => view_data.selected = 0,
        (KeyCode::Char('G'), _) => move_selection(state, view_data, isize::MAX),
        (KeyCode::Enter | KeyCode::Char('v'), _) => {
            if let Some(id) = selected_project_id(state, view_data) {
                view_data.detail = None;
                navigate(
                    state,
                    runtime,
                    view_data,
                    AppCommand::Navigate(Route::ProjectDetail(id)),
                );
            }
        }
        (KeyCode::Esc, _) => {
            if matches!(state.route, Route::ProjectDetail(_)) {
                navigate(state, runtime, view_data, AppCommand::Back);
            }
        }
        _ if state.route == Route::History => {
            handle_history_key(state, view_data, internal_tx, key);
        }
        _ => {}
    }
    false
}

fn handle_history_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Char('/') => view_data.search_active = true,
        KeyCode::Char('t') => {
            let next = view_data.filter.kind.next();
            set_type_filter(state, view_data, next);
        }
        KeyCode::Char('T') => {
            let prev = view_data.filter.kind.prev();
            set_type_filter(state, view_data, prev);
        }
        KeyCode::Char(ch) if ch.is_ascii_digit() => {
            if let Some(kind) = ch.to_digit(10).and_then(TypeFilter::from_digit) {
                set_type_filter(state, view_data, kind);
            }
        }
        KeyCode::Char('e') => {
            let Some(project) = selected_project_id(state, view_data)
                .and_then(|id| view_data.history.get(id))
                .cloned()
            else {
                return;
            };
            let events = view_data.modal.dispatch(ModalCommand::Open(project));
            for event in events {
                if let ModalEvent::Notice(message) = event {
                    emit_status(state, view_data, internal_tx, message);
                }
            }
        }
        KeyCode::Char('d') => {
            let confirmation = selected_project_id(state, view_data)
                .and_then(|id| view_data.history.get(id))
                .map(DeleteConfirmation::for_project);
            if confirmation.is_some() {
                view_data.delete = confirmation;
            }
        }
        _ => {}
    }
}

fn set_type_filter(state: &AppState, view_data: &mut ViewData, kind: TypeFilter) {
    view_data.filter.kind = kind;
    view_data.selected = 0;
    clamp_selection(state, view_data);
}

fn handle_search_key(state: &AppState, view_data: &mut ViewData, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => view_data.search_active = false,
        KeyCode::Backspace => {
            view_data.filter.search.pop();
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            view_data.filter.search.push(ch);
        }
        _ => return,
    }
    view_data.selected = 0;
    clamp_selection(state, view_data);
}

fn handle_modal_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let tipo_focused = view_data.modal.form().field == FormField::Tipo;
    let command = match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => Some(ModalCommand::Close),
        (KeyCode::Tab, _) => Some(ModalCommand::NextField),
        (KeyCode::BackTab, _) => Some(ModalCommand::PrevField),
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            submit_modal(state, view_data, internal_tx);
            None
        }
        (KeyCode::Backspace, _) => Some(ModalCommand::Backspace),
        (KeyCode::Left, _) if tipo_focused => {
            Some(ModalCommand::SelectType(step_type(view_data.modal.form().tipo, -1)))
        }
        (KeyCode::Right, _) if tipo_focused => {
            Some(ModalCommand::SelectType(step_type(view_data.modal.form().tipo, 1)))
        }
        (KeyCode::Char(ch), _) if tipo_focused => type_for_digit(ch).map(ModalCommand::SelectType),
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            Some(ModalCommand::Input(ch))
        }
        _ => None,
    };

    if let Some(command) = command {
        view_data.modal.dispatch(command);
    }
}

fn submit_modal(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    match view_data.modal.begin_submit() {
        Ok(request) => view_data.pending = Some(PendingRequest::Update(request)),
        Err(blocked) => {
            if let Some(message) = blocked.message() {
                emit_status(state, view_data, internal_tx, message);
            }
        }
    }
}

fn handle_delete_key(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    let Some(confirmation) = view_data.delete.as_mut() else {
        return;
    };
    if confirmation.in_flight {
        return;
    }
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('s') | KeyCode::Enter => {
            confirmation.in_flight = true;
            view_data.pending = Some(PendingRequest::Delete(confirmation.id));
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            view_data.delete = None;
            emit_status(state, view_data, internal_tx, DELETE_CANCELLED_MESSAGE);
        }
        _ => {}
    }
}

fn handle_create_form_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    key: KeyEvent,
) {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) => {
            navigate(state, runtime, view_data, AppCommand::Back);
            return;
        }
        (KeyCode::Enter, _) | (KeyCode::Char('s'), KeyModifiers::CONTROL) => {
            match view_data.create_form.begin_submit() {
                Ok(body) => view_data.pending = Some(PendingRequest::Create(body)),
                Err(blocked) => {
                    if let Some(message) = blocked.message() {
                        emit_status(state, view_data, internal_tx, message);
                    }
                }
            }
            return;
        }
        _ => {}
    }

    let form = &mut view_data.create_form;
    match (key.code, key.modifiers) {
        (KeyCode::Tab, _) => form.field = form.field.next(),
        (KeyCode::BackTab, _) => form.field = form.field.prev(),
        (KeyCode::Backspace, _) => form.backspace(),
        (KeyCode::Left, _) if form.field == FormField::Tipo => {
            form.select_type(step_type(form.tipo, -1));
        }
        (KeyCode::Right, _) if form.field == FormField::Tipo => {
            form.select_type(step_type(form.tipo, 1));
        }
        (KeyCode::Char(ch), _) if form.field == FormField::Tipo => {
            if let Some(kind) = type_for_digit(ch) {
                form.select_type(kind);
            }
        }
        (KeyCode::Char(ch), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
            form.input(ch);
        }
        _ => {}
    }
}

fn type_for_digit(ch: char) -> Option<ProjectType> {
    match ch.to_digit(10)? {
        0 => None,
        n => ProjectType::ALL.get(usize::try_from(n).ok()? - 1).copied(),
    }
}

fn step_type(current: Option<ProjectType>, delta: isize) -> ProjectType {
    let len = ProjectType::ALL.len() as isize;
    let index = match current {
        Some(kind) => (kind.position() as isize + delta).rem_euclid(len),
        None if delta < 0 => len - 1,
        None => 0,
    };
    ProjectType::ALL[index as usize]
}

fn handle_mouse_event(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    mouse: MouseEvent,
) {
    if !matches!(mouse.kind, MouseEventKind::Down(_)) || !view_data.modal.is_open() {
        return;
    }
    if view_data.pending.is_some() {
        return;
    }
    let panel = centered_rect(MODAL_WIDTH_PERCENT, MODAL_HEIGHT_PERCENT, view_data.screen);
    let target = if panel.contains(Position::new(mouse.column, mouse.row)) {
        PointerTarget::Content
    } else {
        PointerTarget::Backdrop
    };
    let events = view_data.modal.dispatch(ModalCommand::PointerDown(target));
    if events.contains(&ModalEvent::Closed) {
        emit_status(state, view_data, internal_tx, "Edição fechada.");
    }
}

fn run_pending_request<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
) {
    let Some(pending) = view_data.pending.take() else {
        return;
    };

    match pending {
        PendingRequest::Update(request) => {
            let result = runtime.update_project(request.id, &request.body);
            if let Err(error) = &result {
                tracing::error!(project_id = %request.id, %error, "update project");
            }
            for event in view_data.modal.finish_submit(result) {
                match event {
                    ModalEvent::Saved(project) => {
                        view_data.history.patch(request.id, &project);
                        if let Some(detail) = view_data.detail.as_mut()
                            && detail.id == request.id
                        {
                            detail.nome.clone_from(&project.nome);
                            detail.tipo.clone_from(&project.tipo);
                            detail.descricao.clone_from(&project.descricao);
                        }
                        tracing::info!(project_id = %request.id, "project updated");
                        emit_status(state, view_data, internal_tx, UPDATE_SUCCESS_MESSAGE);
                    }
                    ModalEvent::Notice(message) => {
                        emit_status(state, view_data, internal_tx, message);
                    }
                    ModalEvent::Opened(_) | ModalEvent::Closed => {}
                }
            }
            clamp_selection(state, view_data);
        }
        PendingRequest::Create(body) => {
            let result = runtime.create_project(&body);
            match &result {
                Ok(project) => {
                    tracing::info!(project_id = %project.id, "project created");
                    view_data.detail = Some(project.clone());
                }
                Err(error) => tracing::error!(%error, "create project"),
            }
            let outcome = view_data.create_form.finish_submit(result);
            emit_status(state, view_data, internal_tx, outcome.message());
            if let CreateOutcome::Created { route, .. } = outcome {
                navigate(state, runtime, view_data, AppCommand::Navigate(route));
            }
        }
        PendingRequest::Delete(id) => {
            let result = runtime.delete_project(id);
            let outcome = view_data.history.apply_delete(id, &result);
            match &result {
                Ok(()) => tracing::info!(project_id = %id, "project deleted"),
                Err(error) => tracing::error!(project_id = %id, %error, "delete project"),
            }
            view_data.delete = None;
            emit_status(state, view_data, internal_tx, outcome.message());
            clamp_selection(state, view_data);
        }
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let selected = NAV_ROUTES
        .iter()
        .position(|route| *route == state.route)
        .unwrap_or(1);
    let titles = NAV_ROUTES
        .iter()
        .map(|route| route.label().to_owned())
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .block(Block::default().title("projetos").borders(Borders::ALL))
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .select(selected);
    frame.render_widget(tabs, layout[0]);

    match state.route {
        Route::Home => render_home(frame, layout[1], view_data),
        Route::History => render_history(frame, layout[1], view_data),
        Route::CreateProject => {
            let body = Paragraph::new(render_create_form_text(&view_data.create_form))
                .wrap(Wrap { trim: false })
                .block(Block::default().title("novo projeto").borders(Borders::ALL));
            frame.render_widget(body, layout[1]);
        }
        Route::ProjectDetail(id) => {
            let body = Paragraph::new(render_detail_text(
                id,
                view_data.detail.as_ref(),
                &view_data.options.base_url,
            ))
            .wrap(Wrap { trim: false })
            .block(Block::default().title("projeto").borders(Borders::ALL));
            frame.render_widget(body, layout[1]);
        }
    }

    let status_widget = Paragraph::new(status_text(state, view_data))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(status_widget, layout[2]);

    if view_data.modal.is_open() {
        let area = centered_rect(MODAL_WIDTH_PERCENT, MODAL_HEIGHT_PERCENT, frame.area());
        frame.render_widget(Clear, area);
        let modal = Paragraph::new(render_modal_text(&view_data.modal))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("editar projeto")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(modal, area);
    }

    if let Some(confirmation) = &view_data.delete {
        let area = centered_rect(56, 24, frame.area());
        frame.render_widget(Clear, area);
        let prompt = Paragraph::new(render_delete_text(confirmation))
            .wrap(Wrap { trim: false })
            .block(
                Block::default()
                    .title("excluir projeto")
                    .borders(Borders::ALL)
                    .style(Style::default().fg(Color::Red)),
            );
        frame.render_widget(prompt, area);
    }

    if view_data.help_visible {
        let area = centered_rect(72, 60, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(help_overlay_text())
            .block(Block::default().title("ajuda").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

fn render_home(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let block = Block::default()
        .title("projetos recentes")
        .borders(Borders::ALL);

    if let Some(HomeEntry::Placeholder(placeholder)) = view_data.home.entries().first() {
        frame.render_widget(Paragraph::new(placeholder.list_message()).block(block), area);
        return;
    }

    let rows = view_data.home.items().enumerate().map(|(index, item)| {
        let style = if index == view_data.selected {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default()
        };
        Row::new(vec![Cell::from(item.date.clone()), Cell::from(item.nome.clone())]).style(style)
    });
    let table = Table::new(rows, [Constraint::Length(6), Constraint::Min(16)])
        .column_spacing(2)
        .block(block);
    frame.render_widget(table, area);
}

fn render_history(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let block = Block::default()
        .title(history_title(view_data))
        .borders(Borders::ALL);

    if let Some(placeholder) = view_data.history.placeholder() {
        frame.render_widget(
            Paragraph::new(placeholder.table_message()).block(block),
            area,
        );
        return;
    }

    let header = Row::new(
        TABLE_COLUMNS
            .iter()
            .copied()
            .chain(std::iter::once("Ações"))
            .map(|label| {
                Cell::from(label).style(
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                )
            }),
    );

    let rows = visible_history_rows(view_data)
        .into_iter()
        .enumerate()
        .filter_map(|(index, row)| {
            let TableRow::Data { id, cells } = row else {
                return None;
            };
            let mut values = cells
                .as_array()
                .iter()
                .map(|value| Cell::from((*value).to_owned()))
                .collect::<Vec<_>>();
            values.push(Cell::from(row_action_label(view_data, id)));
            let style = if index == view_data.selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Some(Row::new(values).style(style))
        });

    let widths = [
        Constraint::Length(8),
        Constraint::Min(16),
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(14),
        Constraint::Length(18),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(block);
    frame.render_widget(table, area);
}

fn row_action_label(view_data: &ViewData, id: ProjectId) -> String {
    match &view_data.delete {
        Some(confirmation) if confirmation.id == id && confirmation.in_flight => {
            DELETING_LABEL.to_owned()
        }
        _ => format!("e Editar | d {DELETE_LABEL}"),
    }
}

fn history_title(view_data: &ViewData) -> String {
    let cursor = if view_data.search_active { "_" } else { "" };
    format!(
        "histórico | busca: {}{cursor} | tipo: {}",
        view_data.filter.search,
        view_data.filter.kind.button_label()
    )
}

fn radio_line(choices: impl Iterator<Item = (ProjectType, bool)>) -> String {
    choices
        .enumerate()
        .map(|(index, (kind, checked))| {
            let mark = if checked { "(x)" } else { "( )" };
            format!("{mark} {} {}", index + 1, kind.label())
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn focus_marker(current: FormField, field: FormField) -> &'static str {
    if current == field { "> " } else { "  " }
}

fn render_create_form_text(form: &CreateProjectForm) -> String {
    let radios = radio_line(
        ProjectType::ALL
            .into_iter()
            .map(|kind| (kind, form.tipo == Some(kind))),
    );
    let button = if form.submit.enabled {
        format!("[ {} ]", form.submit.label)
    } else {
        format!("[ {} ] (aguarde)", form.submit.label)
    };
    [
        format!(
            "{}{}: {}",
            focus_marker(form.field, FormField::Nome),
            FormField::Nome.label(),
            form.nome
        ),
        format!(
            "{}{}: {}",
            focus_marker(form.field, FormField::Descricao),
            FormField::Descricao.label(),
            form.descricao
        ),
        format!(
            "{}{}: {radios}",
            focus_marker(form.field, FormField::Tipo),
            FormField::Tipo.label()
        ),
        String::new(),
        button,
    ]
    .join("\n")
}

fn render_modal_text(modal: &EditModal) -> String {
    let form = modal.form();
    let control = modal.submit_control();
    let radios = radio_line(modal.radios().into_iter());
    let button = if control.enabled {
        format!("[ {} ]", control.label)
    } else {
        format!("[ {} ] (aguarde)", control.label)
    };
    let mut lines = vec![
        format!(
            "{}{}: {}",
            focus_marker(form.field, FormField::Nome),
            FormField::Nome.label(),
            form.nome
        ),
        format!(
            "{}{}: {}",
            focus_marker(form.field, FormField::Descricao),
            FormField::Descricao.label(),
            form.descricao
        ),
        format!(
            "{}{}: {radios}",
            focus_marker(form.field, FormField::Tipo),
            FormField::Tipo.label()
        ),
        String::new(),
    ];
    if let Some(notice) = &form.notice {
        lines.push(notice.clone());
        lines.push(String::new());
    }
    lines.push(button);
    lines.join("\n")
}

fn render_delete_text(confirmation: &DeleteConfirmation) -> String {
    let actions = if confirmation.in_flight {
        DELETING_LABEL.to_owned()
    } else {
        "y confirmar | n cancelar".to_owned()
    };
    format!("{}\n\n{actions}", confirmation.prompt())
}

fn render_detail_text(id: ProjectId, project: Option<&Project>, base_url: &Url) -> String {
    let location = Route::ProjectDetail(id)
        .url(base_url)
        .map(|url| url.to_string())
        .unwrap_or_else(|_| Route::ProjectDetail(id).path());
    let Some(project) = project else {
        return format!("{DETAIL_MISSING_MESSAGE}\n\n{location}");
    };
    [
        format!("Nome: {}", project.nome),
        format!("Tipo: {}", project.tipo),
        format!("Descrição: {}", project.descricao),
        format!(
            "Criado em: {}",
            projetos_app::dates::format_created(
                &project.dt_created,
                projetos_app::dates::DateStyle::DayMonthYear
            )
        ),
        format!("Criado por: {}", project.user_created),
        String::new(),
        location,
    ]
    .join("\n")
}

fn status_text(state: &AppState, view_data: &ViewData) -> String {
    if view_data.help_visible {
        return String::new();
    }

    let hints = if view_data.modal.is_open() {
        "tab campo | 1-7 tipo | enter salvar | esc fechar"
    } else if view_data.delete.is_some() {
        "y confirmar | n cancelar"
    } else if view_data.search_active {
        "digite para buscar | enter/esc sair"
    } else {
        match state.route {
            Route::Home => "j/k | enter abrir | p histórico | a novo | r recarregar | ? | ctrl+q",
            Route::History => {
                "j/k | / busca | t/T 0-7 tipo | e editar | d excluir | enter abrir | h início | ? | ctrl+q"
            }
            Route::CreateProject => "tab campo | 1-7 tipo | enter criar | esc voltar",
            Route::ProjectDetail(_) => "esc voltar | h início | p histórico | ctrl+q",
        }
    };
    match &state.status_line {
        Some(status) => format!("{status} | {hints}"),
        None => hints.to_owned(),
    }
}

fn help_overlay_text() -> &'static str {
    "global: ctrl+q sair | ? ajuda | h início | p histórico | a novo projeto | r recarregar\n\
nav: j/k mover | g/G topo/fim | enter/v abrir | esc voltar\n\
histórico: / busca | t/T próximo/anterior tipo | 0 todos | 1-7 tipo | e editar | d excluir\n\
formulário: tab/shift+tab campo | 1-7 ou esq/dir tipo | enter ou ctrl+s enviar | esc fechar\n\
edição: clique fora do painel fecha"
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
