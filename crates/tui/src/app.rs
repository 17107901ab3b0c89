//! Application state and update logic
//!
//! The root `App` owns all state: the session tri-state, the auth form and
//! the task view. Key presses and network completions are folded into state
//! here and produce [`Effect`]s, which the main loop hands to the network
//! dispatcher. The update logic itself never touches the network, which
//! keeps it testable.

use chrono::{NaiveDate, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use tp_core::auth::User;
use tp_core::task::{self, Task, TaskDraft, TaskPriority, TaskStatus};
use tp_core::Error;

/// Banner shown while the task service is unreachable. Cleared only by a
/// later successful fetch.
pub const CONNECT_ERROR: &str = "Cannot connect to the API. Check that the server is running.";

/// Network work requested by the update logic
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    CheckSession,
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
    Logout,
    FetchTasks {
        generation: u64,
        status: Option<TaskStatus>,
    },
    CreateTask {
        draft: TaskDraft,
    },
    UpdateTask {
        id: i64,
        draft: TaskDraft,
    },
    DeleteTask {
        id: i64,
    },
    CompleteTask {
        id: i64,
    },
}

/// Completion events reported back by the network dispatcher
#[derive(Debug)]
pub enum AppEvent {
    /// Session check resolved; `None` covers both `{success: false}` and
    /// network failure.
    SessionChecked(Option<User>),
    /// Login or register finished; the error is already human-readable.
    AuthFinished(Result<User, String>),
    LoggedOut,
    TasksFetched {
        generation: u64,
        result: Result<Vec<Task>, Error>,
    },
    /// Create or update finished; `true` means the draft was accepted.
    TaskSaved(bool),
    /// Delete or complete finished; the list is refetched either way.
    TaskMutated,
}

/// Session tri-state resolved at startup
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Checking,
    Anonymous,
    Authenticated(User),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

/// Login / register form state
#[derive(Debug)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    pub error: Option<String>,
    pub loading: bool,
}

impl AuthForm {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            name: String::new(),
            email: String::new(),
            password: String::new(),
            focus: AuthField::Email,
            error: None,
            loading: false,
        }
    }

    /// Fields visible in the current mode, in focus order.
    pub fn fields(&self) -> &'static [AuthField] {
        match self.mode {
            AuthMode::Login => &[AuthField::Email, AuthField::Password],
            AuthMode::Register => &[AuthField::Name, AuthField::Email, AuthField::Password],
        }
    }

    pub fn value(&self, field: AuthField) -> &str {
        match field {
            AuthField::Name => &self.name,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
        }
    }

    fn value_mut(&mut self) -> &mut String {
        match self.focus {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    fn focus_next(&mut self, step: isize) {
        let fields = self.fields();
        let pos = fields.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (pos + step).rem_euclid(fields.len() as isize) as usize;
        self.focus = fields[next];
    }

    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
        if !self.fields().contains(&self.focus) {
            self.focus = AuthField::Email;
        }
    }

    /// All visible fields filled in; the only client-side validation.
    fn is_complete(&self) -> bool {
        self.fields().iter().all(|f| !self.value(*f).is_empty())
    }

    fn submit(&mut self) -> Option<Effect> {
        if self.loading || !self.is_complete() {
            return None;
        }
        self.error = None;
        self.loading = true;
        Some(match self.mode {
            AuthMode::Login => Effect::Login {
                email: self.email.clone(),
                password: self.password.clone(),
            },
            AuthMode::Register => Effect::Register {
                name: self.name.clone(),
                email: self.email.clone(),
                password: self.password.clone(),
            },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Priority,
    DueDate,
}

impl FormField {
    const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::Priority,
        FormField::DueDate,
    ];
}

/// Create/edit form hosted by the modal shell
#[derive(Debug, Clone, PartialEq)]
pub struct TaskForm {
    /// Id of the task being edited; `None` when creating.
    pub editing: Option<i64>,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: String,
    pub focus: FormField,
}

impl TaskForm {
    pub fn create() -> Self {
        Self {
            editing: None,
            title: String::new(),
            description: String::new(),
            priority: TaskPriority::default(),
            due_date: String::new(),
            focus: FormField::Title,
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            due_date: task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            focus: FormField::Title,
        }
    }

    fn focus_next(&mut self, step: isize) {
        let pos = FormField::ALL
            .iter()
            .position(|f| *f == self.focus)
            .unwrap_or(0) as isize;
        let next = (pos + step).rem_euclid(FormField::ALL.len() as isize) as usize;
        self.focus = FormField::ALL[next];
    }

    fn cycle_priority(&mut self, step: isize) {
        let pos = TaskPriority::ALL
            .iter()
            .position(|p| *p == self.priority)
            .unwrap_or(0) as isize;
        let next = (pos + step).rem_euclid(TaskPriority::ALL.len() as isize) as usize;
        self.priority = TaskPriority::ALL[next];
    }

    fn value_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::DueDate => Some(&mut self.due_date),
            FormField::Priority => None,
        }
    }

    /// Assemble the draft, or `None` while the required title is empty.
    /// Empty optional fields are dropped; an unparseable due date is treated
    /// as absent.
    pub fn draft(&self) -> Option<TaskDraft> {
        let title = self.title.trim();
        if title.is_empty() {
            return None;
        }
        Some(TaskDraft {
            title: title.to_string(),
            description: if self.description.is_empty() {
                None
            } else {
                Some(self.description.clone())
            },
            priority: self.priority,
            due_date: NaiveDate::parse_from_str(self.due_date.trim(), "%Y-%m-%d").ok(),
        })
    }
}

/// Overlay hosted above the task list
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    TaskForm(TaskForm),
    ConfirmDelete { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFocus {
    #[default]
    List,
    Search,
}

/// Task list screen state: the read-through cache of server tasks plus pure
/// UI state (search, filter, selection, modal).
#[derive(Debug)]
pub struct TasksView {
    pub tasks: Vec<Task>,
    pub loading: bool,
    pub saving: bool,
    pub error: Option<String>,
    pub search: String,
    pub status_filter: Option<TaskStatus>,
    pub selected: usize,
    pub focus: InputFocus,
    pub modal: Option<Modal>,
    generation: u64,
}

impl TasksView {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            loading: false,
            saving: false,
            error: None,
            search: String::new(),
            status_filter: None,
            selected: 0,
            focus: InputFocus::List,
            modal: None,
            generation: 0,
        }
    }

    /// Tasks matching the current search, in server order.
    pub fn visible(&self) -> Vec<&Task> {
        task::visible(&self.tasks, &self.search)
    }

    fn selected_task(&self) -> Option<&Task> {
        self.visible().get(self.selected).copied()
    }

    /// Bump the fetch generation and request a list refresh. Responses from
    /// older generations are discarded on arrival, so rapid filter toggling
    /// can never leave a stale list on screen.
    fn refresh(&mut self) -> Effect {
        self.generation += 1;
        self.loading = true;
        Effect::FetchTasks {
            generation: self.generation,
            status: self.status_filter,
        }
    }

    fn cycle_filter(&mut self) -> Effect {
        self.status_filter = match self.status_filter {
            None => Some(TaskStatus::ALL[0]),
            Some(current) => TaskStatus::ALL
                .iter()
                .position(|s| *s == current)
                .and_then(|pos| TaskStatus::ALL.get(pos + 1))
                .copied(),
        };
        self.refresh()
    }

    fn clamp_selection(&mut self) {
        let len = self.visible().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

/// Root application state
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub auth: AuthForm,
    pub view: TasksView,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            session: Session::Checking,
            auth: AuthForm::new(),
            view: TasksView::new(),
            should_quit: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Vec::new();
        }
        match self.session {
            Session::Checking => Vec::new(),
            Session::Anonymous => self.handle_auth_key(key),
            Session::Authenticated(_) => self.handle_tasks_key(key),
        }
    }

    fn handle_auth_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Tab | KeyCode::Down => {
                self.auth.focus_next(1);
                Vec::new()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.auth.focus_next(-1);
                Vec::new()
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.auth.toggle_mode();
                Vec::new()
            }
            KeyCode::Enter => self.auth.submit().into_iter().collect(),
            KeyCode::Char(c) => {
                self.auth.value_mut().push(c);
                Vec::new()
            }
            KeyCode::Backspace => {
                self.auth.value_mut().pop();
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn handle_tasks_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        if self.view.modal.is_some() {
            return self.handle_modal_key(key);
        }
        if self.view.focus == InputFocus::Search {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.view.focus = InputFocus::List,
                KeyCode::Char(c) => {
                    self.view.search.push(c);
                    self.view.clamp_selection();
                }
                KeyCode::Backspace => {
                    self.view.search.pop();
                    self.view.clamp_selection();
                }
                _ => {}
            }
            return Vec::new();
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('/') => {
                self.view.focus = InputFocus::Search;
                Vec::new()
            }
            KeyCode::Char('f') => vec![self.view.cycle_filter()],
            KeyCode::Char('r') => vec![self.view.refresh()],
            KeyCode::Char('n') => {
                self.view.modal = Some(Modal::TaskForm(TaskForm::create()));
                Vec::new()
            }
            KeyCode::Char('e') => {
                if let Some(task) = self.view.selected_task() {
                    self.view.modal = Some(Modal::TaskForm(TaskForm::edit(task)));
                }
                Vec::new()
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.view.selected_task().map(|t| t.id) {
                    self.view.modal = Some(Modal::ConfirmDelete { id });
                }
                Vec::new()
            }
            KeyCode::Char('c') | KeyCode::Char(' ') => {
                // Already-completed tasks are left alone; the transition is
                // one-way and server-authoritative.
                match self.view.selected_task() {
                    Some(task) if task.status != TaskStatus::Completed => {
                        vec![Effect::CompleteTask { id: task.id }]
                    }
                    _ => Vec::new(),
                }
            }
            KeyCode::Char('L') => vec![Effect::Logout],
            KeyCode::Up | KeyCode::Char('k') => {
                self.view.selected = self.view.selected.saturating_sub(1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.view.visible().len();
                if self.view.selected + 1 < len {
                    self.view.selected += 1;
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Key routing while a modal is open. The modal swallows everything, so
    /// list bindings cannot fire underneath it; Escape always closes.
    fn handle_modal_key(&mut self, key: KeyEvent) -> Vec<Effect> {
        let Some(modal) = self.view.modal.as_mut() else {
            return Vec::new();
        };
        match modal {
            Modal::ConfirmDelete { id } => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    let id = *id;
                    self.view.modal = None;
                    vec![Effect::DeleteTask { id }]
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.view.modal = None;
                    Vec::new()
                }
                _ => Vec::new(),
            },
            Modal::TaskForm(form) => match key.code {
                KeyCode::Esc => {
                    self.view.modal = None;
                    Vec::new()
                }
                KeyCode::Tab | KeyCode::Down => {
                    form.focus_next(1);
                    Vec::new()
                }
                KeyCode::BackTab | KeyCode::Up => {
                    form.focus_next(-1);
                    Vec::new()
                }
                KeyCode::Left if form.focus == FormField::Priority => {
                    form.cycle_priority(-1);
                    Vec::new()
                }
                KeyCode::Right if form.focus == FormField::Priority => {
                    form.cycle_priority(1);
                    Vec::new()
                }
                KeyCode::Enter => {
                    if self.view.saving {
                        return Vec::new();
                    }
                    let Some(draft) = form.draft() else {
                        return Vec::new();
                    };
                    let editing = form.editing;
                    self.view.saving = true;
                    match editing {
                        Some(id) => vec![Effect::UpdateTask { id, draft }],
                        None => vec![Effect::CreateTask { draft }],
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(value) = form.value_mut() {
                        value.push(c);
                    }
                    Vec::new()
                }
                KeyCode::Backspace => {
                    if let Some(value) = form.value_mut() {
                        value.pop();
                    }
                    Vec::new()
                }
                _ => Vec::new(),
            },
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::SessionChecked(Some(user)) => {
                self.session = Session::Authenticated(user);
                vec![self.view.refresh()]
            }
            AppEvent::SessionChecked(None) => {
                self.session = Session::Anonymous;
                Vec::new()
            }
            AppEvent::AuthFinished(Ok(user)) => {
                self.auth.loading = false;
                self.session = Session::Authenticated(user);
                self.view = TasksView::new();
                vec![self.view.refresh()]
            }
            AppEvent::AuthFinished(Err(message)) => {
                self.auth.loading = false;
                self.auth.error = Some(message);
                Vec::new()
            }
            AppEvent::LoggedOut => {
                self.session = Session::Anonymous;
                self.auth = AuthForm::new();
                self.view = TasksView::new();
                Vec::new()
            }
            AppEvent::TasksFetched { generation, result } => {
                if generation != self.view.generation {
                    debug!(generation, latest = self.view.generation, "discarding stale fetch");
                    return Vec::new();
                }
                self.view.loading = false;
                match result {
                    Ok(tasks) => {
                        self.view.tasks = tasks;
                        self.view.error = None;
                        self.view.clamp_selection();
                    }
                    Err(_) => {
                        self.view.error = Some(CONNECT_ERROR.to_string());
                    }
                }
                Vec::new()
            }
            AppEvent::TaskSaved(true) => {
                self.view.saving = false;
                self.view.modal = None;
                vec![self.view.refresh()]
            }
            // Failure keeps the modal open; nothing is surfaced on this path
            // (the dispatcher logs it).
            AppEvent::TaskSaved(false) => {
                self.view.saving = false;
                Vec::new()
            }
            AppEvent::TaskMutated => vec![self.view.refresh()],
        }
    }

    /// Current time, taken at render; used by the view for the overdue flag.
    pub fn now(&self) -> chrono::DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn user() -> User {
        User {
            id: 1,
            name: "A".to_string(),
            email: "a@b.com".to_string(),
        }
    }

    fn authed_app(tasks: Vec<Task>) -> App {
        let mut app = App::new();
        app.handle_event(AppEvent::SessionChecked(Some(user())));
        let generation = app.view.generation;
        app.handle_event(AppEvent::TasksFetched {
            generation,
            result: Ok(tasks),
        });
        app
    }

    #[test]
    fn test_failed_session_check_yields_anonymous() {
        let mut app = App::new();
        assert_eq!(app.session, Session::Checking);
        app.handle_event(AppEvent::SessionChecked(None));
        assert_eq!(app.session, Session::Anonymous);
    }

    #[test]
    fn test_successful_session_check_fetches_tasks() {
        let mut app = App::new();
        let effects = app.handle_event(AppEvent::SessionChecked(Some(user())));
        assert_eq!(app.session, Session::Authenticated(user()));
        assert!(matches!(effects[0], Effect::FetchTasks { generation: 1, status: None }));
    }

    #[test]
    fn test_login_success_shows_empty_task_list() {
        let mut app = App::new();
        app.handle_event(AppEvent::SessionChecked(None));
        let effects = app.handle_event(AppEvent::AuthFinished(Ok(user())));
        assert_eq!(app.session, Session::Authenticated(user()));
        assert_eq!(effects.len(), 1);

        app.handle_event(AppEvent::TasksFetched {
            generation: 1,
            result: Ok(Vec::new()),
        });
        let counts = task::counts(&app.view.tasks);
        assert_eq!(counts.total, 0);
        assert_eq!(counts.completed, 0);
    }

    #[test]
    fn test_login_failure_shows_message() {
        let mut app = App::new();
        app.handle_event(AppEvent::SessionChecked(None));
        app.handle_event(AppEvent::AuthFinished(Err("wrong password".to_string())));
        assert_eq!(app.session, Session::Anonymous);
        assert_eq!(app.auth.error.as_deref(), Some("wrong password"));
        assert!(!app.auth.loading);
    }

    #[test]
    fn test_incomplete_auth_form_does_not_submit() {
        let mut app = App::new();
        app.handle_event(AppEvent::SessionChecked(None));
        app.auth.email = "a@b.com".to_string();
        assert!(app.handle_key(key(KeyCode::Enter)).is_empty());

        app.auth.password = "secret".to_string();
        let effects = app.handle_key(key(KeyCode::Enter));
        assert_eq!(
            effects,
            vec![Effect::Login {
                email: "a@b.com".to_string(),
                password: "secret".to_string(),
            }]
        );
        assert!(app.auth.loading);
    }

    #[test]
    fn test_register_mode_requires_name() {
        let mut app = App::new();
        app.handle_event(AppEvent::SessionChecked(None));
        app.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(app.auth.mode, AuthMode::Register);

        app.auth.email = "a@b.com".to_string();
        app.auth.password = "secret".to_string();
        assert!(app.handle_key(key(KeyCode::Enter)).is_empty());

        app.auth.name = "A".to_string();
        let effects = app.handle_key(key(KeyCode::Enter));
        assert!(matches!(effects[0], Effect::Register { .. }));
    }

    #[test]
    fn test_declined_delete_dispatches_nothing() {
        let mut app = authed_app(vec![Task::new(7, "Buy milk")]);
        assert!(app.handle_key(key(KeyCode::Char('d'))).is_empty());
        assert!(matches!(app.view.modal, Some(Modal::ConfirmDelete { id: 7 })));

        let effects = app.handle_key(key(KeyCode::Esc));
        assert!(effects.is_empty());
        assert!(app.view.modal.is_none());
        assert_eq!(app.view.tasks.len(), 1);
    }

    #[test]
    fn test_confirmed_delete_dispatches_and_refreshes() {
        let mut app = authed_app(vec![Task::new(7, "Buy milk")]);
        app.handle_key(key(KeyCode::Char('d')));
        let effects = app.handle_key(key(KeyCode::Char('y')));
        assert_eq!(effects, vec![Effect::DeleteTask { id: 7 }]);

        // refresh follows regardless of outcome
        let effects = app.handle_event(AppEvent::TaskMutated);
        assert!(matches!(effects[0], Effect::FetchTasks { .. }));
    }

    #[test]
    fn test_complete_skips_completed_tasks() {
        let mut app = authed_app(vec![
            Task::new(1, "done").with_status(TaskStatus::Completed),
            Task::new(2, "open"),
        ]);
        assert!(app.handle_key(key(KeyCode::Char('c'))).is_empty());

        app.handle_key(key(KeyCode::Down));
        let effects = app.handle_key(key(KeyCode::Char('c')));
        assert_eq!(effects, vec![Effect::CompleteTask { id: 2 }]);
    }

    #[test]
    fn test_stale_fetch_response_is_discarded() {
        let mut app = authed_app(vec![Task::new(1, "first")]);

        // Two rapid filter changes: pending, then in_progress.
        let effects = app.handle_key(key(KeyCode::Char('f')));
        let Effect::FetchTasks { generation: gen_pending, .. } = effects[0].clone() else {
            panic!("expected fetch");
        };
        let effects = app.handle_key(key(KeyCode::Char('f')));
        let Effect::FetchTasks { generation: gen_progress, status } = effects[0].clone() else {
            panic!("expected fetch");
        };
        assert_eq!(status, Some(TaskStatus::InProgress));

        // The older response arrives last; it must not overwrite the list.
        app.handle_event(AppEvent::TasksFetched {
            generation: gen_progress,
            result: Ok(vec![Task::new(2, "in progress")]),
        });
        app.handle_event(AppEvent::TasksFetched {
            generation: gen_pending,
            result: Ok(vec![Task::new(3, "pending")]),
        });
        assert_eq!(app.view.tasks[0].id, 2);
        assert!(!app.view.loading);
    }

    #[test]
    fn test_fetch_failure_raises_persistent_banner() {
        let mut app = authed_app(vec![Task::new(1, "kept")]);
        let Effect::FetchTasks { generation, .. } = app.handle_key(key(KeyCode::Char('r')))[0].clone()
        else {
            panic!("expected fetch");
        };
        app.handle_event(AppEvent::TasksFetched {
            generation,
            result: Err(Error::Api("boom".to_string())),
        });
        assert_eq!(app.view.error.as_deref(), Some(CONNECT_ERROR));
        // previous list is kept on screen
        assert_eq!(app.view.tasks.len(), 1);

        // a later successful fetch clears the banner
        let Effect::FetchTasks { generation, .. } = app.handle_key(key(KeyCode::Char('r')))[0].clone()
        else {
            panic!("expected fetch");
        };
        app.handle_event(AppEvent::TasksFetched {
            generation,
            result: Ok(Vec::new()),
        });
        assert!(app.view.error.is_none());
    }

    #[test]
    fn test_create_success_closes_modal_and_refetches() {
        let mut app = authed_app(Vec::new());
        app.handle_key(key(KeyCode::Char('n')));
        for c in "Buy milk".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let effects = app.handle_key(key(KeyCode::Enter));
        assert!(matches!(effects[0], Effect::CreateTask { .. }));
        assert!(app.view.saving);

        let effects = app.handle_event(AppEvent::TaskSaved(true));
        assert!(app.view.modal.is_none());
        assert!(!app.view.saving);
        assert!(matches!(effects[0], Effect::FetchTasks { .. }));
    }

    #[test]
    fn test_create_failure_keeps_modal_open() {
        let mut app = authed_app(Vec::new());
        app.handle_key(key(KeyCode::Char('n')));
        for c in "x".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        let effects = app.handle_event(AppEvent::TaskSaved(false));
        assert!(effects.is_empty());
        assert!(app.view.modal.is_some());
        assert!(!app.view.saving);
    }

    #[test]
    fn test_empty_title_blocks_submit() {
        let mut app = authed_app(Vec::new());
        app.handle_key(key(KeyCode::Char('n')));
        let effects = app.handle_key(key(KeyCode::Enter));
        assert!(effects.is_empty());
        assert!(!app.view.saving);
    }

    #[test]
    fn test_edit_prefills_form() {
        let task = Task::new(9, "Old title")
            .with_description("notes")
            .with_priority(TaskPriority::High)
            .with_due_date(NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        let mut app = authed_app(vec![task]);
        app.handle_key(key(KeyCode::Char('e')));
        let Some(Modal::TaskForm(form)) = &app.view.modal else {
            panic!("expected task form");
        };
        assert_eq!(form.editing, Some(9));
        assert_eq!(form.title, "Old title");
        assert_eq!(form.description, "notes");
        assert_eq!(form.priority, TaskPriority::High);
        assert_eq!(form.due_date, "2026-05-01");
    }

    #[test]
    fn test_modal_swallows_list_keys() {
        let mut app = authed_app(vec![Task::new(1, "t")]);
        app.handle_key(key(KeyCode::Char('n')));
        // 'd' goes into the title buffer instead of opening the confirm modal
        app.handle_key(key(KeyCode::Char('d')));
        let Some(Modal::TaskForm(form)) = &app.view.modal else {
            panic!("expected task form");
        };
        assert_eq!(form.title, "d");
    }

    #[test]
    fn test_search_narrows_selection_but_not_counts() {
        let mut app = authed_app(vec![
            Task::new(1, "Buy milk"),
            Task::new(2, "Ship release").with_status(TaskStatus::Completed),
        ]);
        app.handle_key(key(KeyCode::Char('/')));
        for c in "ship".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(app.view.visible().len(), 1);
        let counts = task::counts(&app.view.tasks);
        assert_eq!(counts.total, 2);
        assert_eq!(counts.completed, 1);
    }

    #[test]
    fn test_logout_returns_to_fresh_auth_form() {
        let mut app = authed_app(vec![Task::new(1, "t")]);
        let effects = app.handle_key(key(KeyCode::Char('L')));
        assert_eq!(effects, vec![Effect::Logout]);

        app.handle_event(AppEvent::LoggedOut);
        assert_eq!(app.session, Session::Anonymous);
        assert!(app.view.tasks.is_empty());
        assert!(app.auth.email.is_empty());
    }
}
