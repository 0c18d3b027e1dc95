//! Interactive terminal UI.
//!
//! A single worker thread owns the HTTP client and drains requests off an
//! mpsc channel; each mutation finishes its follow-up re-fetch before the
//! next request is handled, so no two mutations are ever in flight. The
//! UI thread owns the task snapshot and the view state.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::suggest::{self, Suggestion};
use crate::task::{self, Filter, Task, TaskView, ViewState};

use super::view;

const EVENT_POLL_MS: u64 = 120;

/// Requests handled by the network worker.
enum WorkRequest {
    Refresh,
    Add(String),
    Edit { id: u64, text: String },
    MarkDone(u64),
    Remove(u64),
}

/// Worker results delivered back to the UI thread.
enum UiMsg {
    Loaded(Vec<Task>),
    Added(Vec<Task>),
    Mutated(Vec<Task>, &'static str),
    Failed(String),
}

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

pub(crate) enum InputMode {
    Add,
    Edit { id: u64, current: String },
}

pub(crate) struct InputState {
    pub(crate) mode: InputMode,
    pub(crate) buffer: String,
}

pub(crate) struct DeleteConfirmState {
    pub(crate) task_id: u64,
    pub(crate) text: String,
}

pub(crate) struct SuggestState {
    pub(crate) picked: Vec<&'static Suggestion>,
    pub(crate) selected: usize,
}

pub struct AppState {
    pub(crate) tasks: Vec<Task>,
    pub(crate) view: ViewState,
    pub(crate) selected: usize,
    pub(crate) input: Option<InputState>,
    pub(crate) delete_confirm: Option<DeleteConfirmState>,
    pub(crate) suggest: Option<SuggestState>,
    pub(crate) busy: bool,
    pub(crate) loaded: bool,
    status_message: Option<String>,
    info_message: Option<String>,
}

impl AppState {
    fn new() -> Self {
        Self {
            tasks: Vec::new(),
            view: ViewState::default(),
            selected: 0,
            input: None,
            delete_confirm: None,
            suggest: None,
            busy: false,
            loaded: false,
            status_message: None,
            info_message: None,
        }
    }

    pub(crate) fn current_view(&self) -> TaskView {
        task::derive_view(&self.tasks, self.view)
    }

    pub(crate) fn selected_task(&self) -> Option<Task> {
        self.current_view().tasks.get(self.selected).cloned()
    }

    pub(crate) fn tab_counts(&self) -> (usize, usize, usize) {
        let done = self.tasks.iter().filter(|task| task.done).count();
        (self.tasks.len(), done, self.tasks.len() - done)
    }

    fn filtered_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| self.view.filter.matches(task))
            .count()
    }

    fn clamp_selection(&mut self) {
        let len = self.current_view().tasks.len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.current_view().tasks.len();
        if len == 0 {
            return;
        }
        let max = len as isize - 1;
        self.selected = (self.selected as isize + delta).clamp(0, max) as usize;
    }

    fn set_filter(&mut self, filter: Filter) {
        self.view.set_filter(filter);
        self.selected = 0;
    }

    fn cycle_filter(&mut self) {
        let next = match self.view.filter {
            Filter::All => Filter::Done,
            Filter::Done => Filter::Undone,
            Filter::Undone => Filter::All,
        };
        self.set_filter(next);
    }

    fn next_page(&mut self) {
        let count = task::page_count(self.filtered_count());
        if self.view.goto_page(self.view.page + 1, count) {
            self.selected = 0;
        }
    }

    fn prev_page(&mut self) {
        if self.view.page <= 1 {
            return;
        }
        let count = task::page_count(self.filtered_count());
        if self.view.goto_page(self.view.page - 1, count) {
            self.selected = 0;
        }
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.info_message = None;
    }

    fn set_info(&mut self, message: impl Into<String>) {
        self.info_message = Some(message.into());
        self.status_message = None;
    }

    fn clear_messages(&mut self) {
        self.status_message = None;
        self.info_message = None;
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        if let Some(message) = self.status_message.as_ref() {
            return Some((message.clone(), StatusKind::Error));
        }
        if let Some(info) = self.info_message.as_ref() {
            return Some((info.clone(), StatusKind::Info));
        }
        if self.busy {
            return Some(("working...".to_string(), StatusKind::Info));
        }
        None
    }

    pub(crate) fn footer_hint(&self) -> String {
        if self.delete_confirm.is_some() {
            return "y/enter confirm delete  esc cancel".to_string();
        }
        if self.suggest.is_some() {
            return "j/k move  r refresh  enter add  esc cancel".to_string();
        }
        if let Some(input) = self.input.as_ref() {
            return match input.mode {
                InputMode::Add => "type text  enter add  esc cancel".to_string(),
                InputMode::Edit { .. } => "type text  enter save  esc cancel".to_string(),
            };
        }
        "j/k move  1/2/3 filter  n/p page  a add  e edit  space done  x delete  s suggest  q quit"
            .to_string()
    }

    fn handle_ui_msg(&mut self, msg: UiMsg) {
        self.busy = false;
        match msg {
            UiMsg::Loaded(tasks) => {
                self.tasks = tasks;
                self.loaded = true;
                self.clamp_selection();
            }
            UiMsg::Added(tasks) => {
                self.tasks = tasks;
                self.loaded = true;
                self.view.reset();
                self.selected = 0;
                self.set_info("task added");
            }
            UiMsg::Mutated(tasks, message) => {
                self.tasks = tasks;
                self.clamp_selection();
                self.set_info(message);
            }
            UiMsg::Failed(message) => {
                self.loaded = true;
                self.set_error(message);
            }
        }
    }
}

/// Run the interactive UI against the given service.
pub fn run(api: ApiClient) -> Result<()> {
    let (ui_tx, ui_rx) = mpsc::channel();
    let (req_tx, req_rx) = mpsc::channel();

    spawn_worker(api, req_rx, ui_tx);

    if req_tx.send(WorkRequest::Refresh).is_err() {
        return Err(Error::OperationFailed(
            "failed to start network worker".to_string(),
        ));
    }

    let mut app = AppState::new();
    app.busy = true;
    run_terminal(&mut app, ui_rx, req_tx)
}

fn run_terminal(
    app: &mut AppState,
    ui_rx: Receiver<UiMsg>,
    req_tx: Sender<WorkRequest>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app, ui_rx, req_tx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
    ui_rx: Receiver<UiMsg>,
    req_tx: Sender<WorkRequest>,
) -> Result<()> {
    let mut dirty = true;
    loop {
        while let Ok(msg) = ui_rx.try_recv() {
            app.handle_ui_msg(msg);
            dirty = true;
        }

        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key(app, key, &req_tx) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => {
                    dirty = true;
                }
                _ => {}
            }
        }
    }
    Ok(())
}

fn send_request(app: &mut AppState, req_tx: &Sender<WorkRequest>, request: WorkRequest) {
    app.clear_messages();
    if req_tx.send(request).is_ok() {
        app.busy = true;
    } else {
        app.set_error("network worker is gone");
    }
}

/// Returns true when the UI should quit.
fn handle_key(app: &mut AppState, key: KeyEvent, req_tx: &Sender<WorkRequest>) -> bool {
    if app.input.is_some() {
        handle_input_key(app, key, req_tx);
        return false;
    }
    if app.delete_confirm.is_some() {
        handle_confirm_key(app, key, req_tx);
        return false;
    }
    if app.suggest.is_some() {
        handle_suggest_key(app, key, req_tx);
        return false;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('1') => app.set_filter(Filter::All),
        KeyCode::Char('2') => app.set_filter(Filter::Done),
        KeyCode::Char('3') => app.set_filter(Filter::Undone),
        KeyCode::Tab => app.cycle_filter(),
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('n') | KeyCode::Right => app.next_page(),
        KeyCode::Char('p') | KeyCode::Left => app.prev_page(),
        KeyCode::Char('a') => {
            app.input = Some(InputState {
                mode: InputMode::Add,
                buffer: String::new(),
            });
        }
        KeyCode::Char('e') => {
            if let Some(task) = app.selected_task() {
                app.input = Some(InputState {
                    mode: InputMode::Edit {
                        id: task.id,
                        current: task.text.clone(),
                    },
                    buffer: task.text,
                });
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('d') => {
            if app.busy {
                return false;
            }
            if let Some(task) = app.selected_task() {
                if task.done {
                    // The action is disabled once a task is done.
                    app.set_info("task is already done");
                } else {
                    send_request(app, req_tx, WorkRequest::MarkDone(task.id));
                }
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(task) = app.selected_task() {
                app.delete_confirm = Some(DeleteConfirmState {
                    task_id: task.id,
                    text: task.text,
                });
            }
        }
        KeyCode::Char('s') => {
            app.suggest = Some(SuggestState {
                picked: suggest::pick(suggest::PICK_COUNT),
                selected: 0,
            });
        }
        _ => {}
    }
    false
}

fn handle_input_key(app: &mut AppState, key: KeyEvent, req_tx: &Sender<WorkRequest>) {
    match key.code {
        KeyCode::Esc => {
            app.input = None;
        }
        KeyCode::Enter => {
            if app.busy {
                return;
            }
            let Some(input) = app.input.take() else {
                return;
            };
            let text = input.buffer.trim().to_string();
            match &input.mode {
                InputMode::Add => {
                    if text.is_empty() {
                        // Validation happens before any request is issued.
                        app.set_error("task text cannot be empty");
                        app.input = Some(input);
                        return;
                    }
                    send_request(app, req_tx, WorkRequest::Add(text));
                }
                InputMode::Edit { id, current } => {
                    if text.is_empty() || text == *current {
                        app.set_info("task unchanged");
                        return;
                    }
                    let id = *id;
                    send_request(app, req_tx, WorkRequest::Edit { id, text });
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(input) = app.input.as_mut() {
                input.buffer.pop();
            }
        }
        KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(input) = app.input.as_mut() {
                input.buffer.push(ch);
            }
        }
        _ => {}
    }
}

fn handle_confirm_key(app: &mut AppState, key: KeyEvent, req_tx: &Sender<WorkRequest>) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            if app.busy {
                return;
            }
            if let Some(confirm) = app.delete_confirm.take() {
                send_request(app, req_tx, WorkRequest::Remove(confirm.task_id));
            }
        }
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('q') => {
            // Declining sends nothing.
            app.delete_confirm = None;
            app.set_info("aborted, task kept");
        }
        _ => {}
    }
}

fn handle_suggest_key(app: &mut AppState, key: KeyEvent, req_tx: &Sender<WorkRequest>) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            app.suggest = None;
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if let Some(state) = app.suggest.as_mut() {
                if state.selected + 1 < state.picked.len() {
                    state.selected += 1;
                }
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if let Some(state) = app.suggest.as_mut() {
                state.selected = state.selected.saturating_sub(1);
            }
        }
        KeyCode::Char('r') => {
            if let Some(state) = app.suggest.as_mut() {
                state.picked = suggest::pick(suggest::PICK_COUNT);
                state.selected = 0;
            }
        }
        KeyCode::Enter => {
            if app.busy {
                return;
            }
            let Some(state) = app.suggest.take() else {
                return;
            };
            let Some(suggestion) = state.picked.get(state.selected) else {
                return;
            };
            if suggest::find_duplicate(&app.tasks, suggestion.text).is_some() {
                app.set_error(format!("\"{}\" is already on the list", suggestion.text));
                return;
            }
            send_request(app, req_tx, WorkRequest::Add(suggestion.text.to_string()));
        }
        _ => {}
    }
}

fn spawn_worker(api: ApiClient, req_rx: Receiver<WorkRequest>, ui_tx: Sender<UiMsg>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.send(UiMsg::Failed(format!(
                    "failed to start async runtime: {err}"
                )));
                return;
            }
        };

        while let Ok(request) = req_rx.recv() {
            let msg = runtime.block_on(handle_request(&api, request));
            if ui_tx.send(msg).is_err() {
                break;
            }
        }
    });
}

async fn handle_request(api: &ApiClient, request: WorkRequest) -> UiMsg {
    match request {
        WorkRequest::Refresh => match api.fetch_all().await {
            Ok(tasks) => UiMsg::Loaded(tasks),
            Err(err) => UiMsg::Failed(err.to_string()),
        },
        WorkRequest::Add(text) => match mutate_then_fetch(api.create(&text), api).await {
            Ok(tasks) => UiMsg::Added(tasks),
            Err(err) => UiMsg::Failed(err.to_string()),
        },
        WorkRequest::Edit { id, text } => {
            mutated(api.rename(id, &text), api, "task updated").await
        }
        WorkRequest::MarkDone(id) => mutated(api.complete(id), api, "task completed").await,
        WorkRequest::Remove(id) => mutated(api.delete(id), api, "task deleted").await,
    }
}

/// Run a mutation, then fetch the authoritative snapshot. A failure at
/// either step leaves the UI's previous snapshot in place.
async fn mutate_then_fetch<F>(op: F, api: &ApiClient) -> Result<Vec<Task>>
where
    F: std::future::Future<Output = Result<()>>,
{
    op.await?;
    api.fetch_all().await
}

async fn mutated<F>(op: F, api: &ApiClient, message: &'static str) -> UiMsg
where
    F: std::future::Future<Output = Result<()>>,
{
    match mutate_then_fetch(op, api).await {
        Ok(tasks) => UiMsg::Mutated(tasks, message),
        Err(err) => UiMsg::Failed(err.to_string()),
    }
}
