use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::auth_client::HttpAuthBackend;
use crate::io::paths::PmsPaths;
use crate::io::storage::LocalStorage;
use crate::model::config::AppConfig;
use crate::model::record::{Draft, Record};
use crate::model::route::Route;
use crate::model::task::{Priority, TaskStatus};
use crate::ops::auth::AuthService;
use crate::ops::calendar::YearMonth;
use crate::ops::entity_list::EntityList;
use crate::ops::task_query::{SortKey, TaskFilter, TaskPage, TaskQuery};
use crate::ops::workspace::Workspace;
use crate::util::line_input::LineInput;

use super::form::{EntityKind, FormState, FormTarget};
use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing into the task search box
    Search,
    /// A modal add/edit form is open
    Form,
    /// Waiting for y/n on a delete
    Confirm,
    /// Typing into the login or register form
    Auth,
}

/// A delete waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub kind: EntityKind,
    pub id: u64,
    pub label: String,
}

/// Main application state
pub struct App {
    pub route: Route,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub hide_key_hints: bool,
    pub show_help: bool,
    pub auth: AuthService,
    pub workspace: Workspace,
    pub task_query: TaskQuery,
    pub users_cursor: usize,
    pub projects_cursor: usize,
    /// Row within the current task page
    pub tasks_cursor: usize,
    pub search_input: LineInput,
    pub form: Option<FormState>,
    pub pending_delete: Option<PendingDelete>,
    pub login_form: FormState,
    pub register_form: FormState,
    pub show_calendar: bool,
    pub calendar_month: YearMonth,
    /// `o` was pressed; the next key picks a sort column
    pub sort_prefix: bool,
    /// One-shot message for the status row, cleared on the next key
    pub status_message: Option<String>,
}

impl App {
    pub fn new(workspace: Workspace, auth: AuthService, config: &AppConfig) -> Self {
        let calendar_month = YearMonth::of(workspace.today);
        App {
            route: Route::Home,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            hide_key_hints: config.ui.hide_key_hints,
            show_help: false,
            auth,
            workspace,
            task_query: TaskQuery::with_page_size(config.tasks.page_size),
            users_cursor: 0,
            projects_cursor: 0,
            tasks_cursor: 0,
            search_input: LineInput::default(),
            form: None,
            pending_delete: None,
            login_form: FormState::login(),
            register_form: FormState::register(),
            show_calendar: false,
            calendar_month,
            sort_prefix: false,
            status_message: None,
        }
    }

    // -----------------------------------------------------------------------
    // Routing
    // -----------------------------------------------------------------------

    /// Switch screens. The login and register screens take keyboard focus
    /// straight away.
    pub fn navigate(&mut self, route: Route) {
        if route != self.route {
            tracing::debug!(from = %self.route, to = %route, "navigate");
        }
        self.route = route;
        self.sort_prefix = false;
        self.auth.clear_error();
        self.mode = match route {
            Route::Login | Route::Register => Mode::Auth,
            _ => Mode::Navigate,
        };
    }

    /// Step through the sidebar, wrapping at either end
    pub fn cycle_route(&mut self, forward: bool) {
        let n = Route::ALL.len();
        let idx = Route::ALL
            .iter()
            .position(|r| *r == self.route)
            .unwrap_or(0);
        let next = if forward { (idx + 1) % n } else { (idx + n - 1) % n };
        self.navigate(Route::ALL[next]);
    }

    // -----------------------------------------------------------------------
    // Tasks screen
    // -----------------------------------------------------------------------

    /// The page the Tasks screen shows, derived fresh from the full list
    pub fn task_page(&self) -> TaskPage<'_> {
        self.task_query.run(self.workspace.tasks.records())
    }

    fn update_filter(&mut self, f: impl FnOnce(&mut TaskFilter)) {
        let mut filter = self.task_query.filter.clone();
        f(&mut filter);
        self.task_query.set_filter(filter);
        self.tasks_cursor = 0;
    }

    pub fn set_search(&mut self, text: &str) {
        self.update_filter(|f| f.search = text.to_string());
    }

    /// none → todo → in-progress → completed → none
    pub fn cycle_status_filter(&mut self) {
        let next = next_choice(&TaskStatus::CHOICES, self.task_query.filter.statuses.first());
        self.update_filter(|f| f.statuses = next.into_iter().collect());
    }

    /// none → high → medium → low → none
    pub fn cycle_priority_filter(&mut self) {
        let next = next_choice(&Priority::CHOICES, self.task_query.filter.priorities.first());
        self.update_filter(|f| f.priorities = next.into_iter().collect());
    }

    /// none → each project in list order → none
    pub fn cycle_project_filter(&mut self) {
        let names = self.workspace.project_names();
        let next = next_choice(&names, self.task_query.filter.projects.first());
        self.update_filter(|f| f.projects = next.into_iter().collect());
    }

    pub fn clear_filters(&mut self) {
        self.search_input.clear();
        self.update_filter(|f| *f = TaskFilter::default());
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.task_query.toggle_sort(key);
        self.tasks_cursor = 0;
    }

    pub fn next_page(&mut self) {
        let total = self.task_page().total_pages;
        if self.task_query.page < total {
            self.task_query.page += 1;
            self.tasks_cursor = 0;
        }
    }

    pub fn prev_page(&mut self) {
        if self.task_query.page > 1 {
            self.task_query.page -= 1;
            self.tasks_cursor = 0;
        }
    }

    pub fn selected_task_id(&self) -> Option<u64> {
        self.task_page().items.get(self.tasks_cursor).map(|t| t.id)
    }

    // -----------------------------------------------------------------------
    // Cursors
    // -----------------------------------------------------------------------

    fn list_len(&self) -> usize {
        match self.route {
            Route::Users => self.workspace.users.len(),
            Route::Projects => self.workspace.projects.len(),
            Route::Tasks => self.task_page().items.len(),
            _ => 0,
        }
    }

    fn cursor_mut(&mut self) -> Option<&mut usize> {
        match self.route {
            Route::Users => Some(&mut self.users_cursor),
            Route::Projects => Some(&mut self.projects_cursor),
            Route::Tasks => Some(&mut self.tasks_cursor),
            _ => None,
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.list_len();
        if let Some(cursor) = self.cursor_mut() {
            let max = len.saturating_sub(1) as isize;
            *cursor = (*cursor as isize + delta).clamp(0, max) as usize;
        }
    }

    pub fn cursor_to_end(&mut self, end: bool) {
        let len = self.list_len();
        if let Some(cursor) = self.cursor_mut() {
            *cursor = if end { len.saturating_sub(1) } else { 0 };
        }
    }

    /// Pull every cursor (and the task page) back inside its list after a
    /// delete or a filter change
    pub fn clamp_cursors(&mut self) {
        self.users_cursor = self
            .users_cursor
            .min(self.workspace.users.len().saturating_sub(1));
        self.projects_cursor = self
            .projects_cursor
            .min(self.workspace.projects.len().saturating_sub(1));
        let total = self.task_page().total_pages;
        self.task_query.page = self.task_query.page.clamp(1, total);
        let on_page = self.task_page().items.len();
        self.tasks_cursor = self.tasks_cursor.min(on_page.saturating_sub(1));
    }

    fn selected(&self) -> Option<(EntityKind, u64)> {
        match self.route {
            Route::Users => self
                .workspace
                .users
                .records()
                .get(self.users_cursor)
                .map(|u| (EntityKind::User, u.id)),
            Route::Projects => self
                .workspace
                .projects
                .records()
                .get(self.projects_cursor)
                .map(|p| (EntityKind::Project, p.id)),
            Route::Tasks => self.selected_task_id().map(|id| (EntityKind::Task, id)),
            _ => None,
        }
    }

    // -----------------------------------------------------------------------
    // Add / edit / delete
    // -----------------------------------------------------------------------

    fn screen_kind(&self) -> Option<EntityKind> {
        match self.route {
            Route::Users => Some(EntityKind::User),
            Route::Projects => Some(EntityKind::Project),
            Route::Tasks => Some(EntityKind::Task),
            _ => None,
        }
    }

    fn build_form(&self, target: FormTarget, kind: EntityKind, id: Option<u64>) -> Option<FormState> {
        let ws = &self.workspace;
        Some(match kind {
            EntityKind::User => {
                let draft = draft_for(&ws.users, id)?;
                FormState::user(target, &draft)
            }
            EntityKind::Project => {
                let draft = draft_for(&ws.projects, id)?;
                FormState::project(target, &draft)
            }
            EntityKind::Task => {
                let draft = draft_for(&ws.tasks, id)?;
                FormState::task(target, &draft, &ws.project_names(), &ws.user_names())
            }
        })
    }

    pub fn open_add_form(&mut self) {
        if let Some(kind) = self.screen_kind() {
            self.form = self.build_form(FormTarget::Add(kind), kind, None);
            self.mode = Mode::Form;
        }
    }

    pub fn open_edit_form(&mut self) {
        if let Some((kind, id)) = self.selected() {
            self.form = self.build_form(FormTarget::Edit(kind, id), kind, Some(id));
            if self.form.is_some() {
                self.mode = Mode::Form;
            }
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.mode = Mode::Navigate;
    }

    /// Validate and save the open form. On failure the form stays open with
    /// the message shown inline.
    pub fn submit_form(&mut self) {
        let Some(form) = &mut self.form else {
            return;
        };
        match apply_form(&mut self.workspace, form) {
            Ok(message) => {
                let added = match form.target {
                    FormTarget::Add(kind) => Some(kind),
                    _ => None,
                };
                self.form = None;
                self.mode = Mode::Navigate;
                self.status_message = Some(message);
                if let Some(kind) = added {
                    self.select_added(kind);
                }
                self.clamp_cursors();
            }
            Err(message) => form.error = Some(message),
        }
    }

    /// Put the cursor on the record just appended. A new task may land on
    /// another page, or be hidden by the filters, in which case the page is
    /// left alone.
    fn select_added(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::User => self.users_cursor = self.workspace.users.len().saturating_sub(1),
            EntityKind::Project => {
                self.projects_cursor = self.workspace.projects.len().saturating_sub(1)
            }
            EntityKind::Task => {
                let tasks = self.workspace.tasks.records();
                let Some(new_id) = tasks.last().map(|t| t.id) else {
                    return;
                };
                let position = self
                    .task_query
                    .matching(tasks)
                    .iter()
                    .position(|t| t.id == new_id);
                if let Some(pos) = position {
                    let page_size = self.task_query.page_size.max(1);
                    self.task_query.page = pos / page_size + 1;
                    self.tasks_cursor = pos % page_size;
                }
            }
        }
    }

    pub fn request_delete(&mut self) {
        let Some((kind, id)) = self.selected() else {
            return;
        };
        let ws = &self.workspace;
        let label = match kind {
            EntityKind::User => ws.users.get(id).map(|u| u.name.clone()),
            EntityKind::Project => ws.projects.get(id).map(|p| p.name.clone()),
            EntityKind::Task => ws.tasks.get(id).map(|t| t.title.clone()),
        }
        .unwrap_or_default();
        self.pending_delete = Some(PendingDelete { kind, id, label });
        self.mode = Mode::Confirm;
    }

    pub fn confirm_delete(&mut self) {
        let Some(pending) = self.pending_delete.take() else {
            return;
        };
        self.mode = Mode::Navigate;
        let ws = &mut self.workspace;
        let result = match pending.kind {
            EntityKind::User => ws.users.delete(pending.id).map(|_| ()),
            EntityKind::Project => ws.projects.delete(pending.id).map(|_| ()),
            EntityKind::Task => ws.tasks.delete(pending.id).map(|_| ()),
        };
        self.status_message = Some(match result {
            Ok(()) => format!("Deleted {}", pending.label),
            Err(e) => e.to_string(),
        });
        self.clamp_cursors();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Navigate;
    }

    // -----------------------------------------------------------------------
    // Session
    // -----------------------------------------------------------------------

    /// The login or register form, whichever screen is showing
    pub fn auth_form_mut(&mut self) -> Option<&mut FormState> {
        match self.route {
            Route::Login => Some(&mut self.login_form),
            Route::Register => Some(&mut self.register_form),
            _ => None,
        }
    }

    /// Submit login or register. Success lands on the dashboard; failure
    /// keeps the typed values and shows the message above the form.
    pub fn submit_auth(&mut self) {
        let result = match self.route {
            Route::Login => self.auth.login(&self.login_form.login_credentials()),
            Route::Register => self.auth.register(self.register_form.register_form()),
            _ => return,
        };
        match result {
            Ok(user) => {
                self.status_message = Some(format!("Signed in as {}", user.name));
                self.login_form.reset();
                self.register_form.reset();
                self.route = Route::Dashboard;
                self.mode = Mode::Navigate;
            }
            Err(_) => {
                // message is kept on AuthService and rendered from there
            }
        }
    }

    pub fn logout(&mut self) {
        if !self.auth.is_authenticated() {
            return;
        }
        self.status_message = Some(match self.auth.logout() {
            Ok(()) => "Signed out".to_string(),
            Err(e) => e.to_string(),
        });
    }
}

/// Next value after `current` in `choices`, or None after the last one
fn next_choice<T: Clone + PartialEq>(choices: &[T], current: Option<&T>) -> Option<T> {
    match current.and_then(|c| choices.iter().position(|x| x == c)) {
        None if current.is_none() => choices.first().cloned(),
        None => None,
        Some(i) => choices.get(i + 1).cloned(),
    }
}

/// Prefill for a form: the record's fields for edit, defaults for add.
/// None when the record vanished.
fn draft_for<R: Record>(list: &EntityList<R>, id: Option<u64>) -> Option<R::Draft> {
    match id {
        Some(id) => list.get(id).map(R::to_draft),
        None => Some(R::Draft::default()),
    }
}

fn save<R: Record>(
    list: &mut EntityList<R>,
    target: FormTarget,
    draft: R::Draft,
    label: &str,
) -> Result<String, String> {
    draft.validate().map_err(|e| e.to_string())?;
    match target {
        FormTarget::Edit(_, id) => {
            list.edit(id, draft).map_err(|e| e.to_string())?;
            Ok(format!("Updated {} {}", R::KIND, label))
        }
        _ => {
            list.add(draft);
            Ok(format!("Added {} {}", R::KIND, label))
        }
    }
}

fn apply_form(ws: &mut Workspace, form: &FormState) -> Result<String, String> {
    let kind = match form.target {
        FormTarget::Add(kind) | FormTarget::Edit(kind, _) => kind,
        FormTarget::Login | FormTarget::Register => return Err("not an entity form".into()),
    };
    match kind {
        EntityKind::User => {
            let draft = form.user_draft();
            let label = draft.name.clone();
            save(&mut ws.users, form.target, draft, &label)
        }
        EntityKind::Project => {
            let draft = form.project_draft();
            let label = draft.name.clone();
            save(&mut ws.projects, form.target, draft, &label)
        }
        EntityKind::Task => {
            let draft = form.task_draft()?;
            let label = draft.title.clone();
            save(&mut ws.tasks, form.target, draft, &label)
        }
    }
}

/// Run the TUI application
pub fn run(
    paths: PmsPaths,
    config: AppConfig,
    route: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let start = match route {
        Some(path) => {
            Route::from_path(path).ok_or_else(|| format!("unknown route: {}", path))?
        }
        None => Route::Home,
    };

    let auth = AuthService::new(
        Box::new(HttpAuthBackend::from_config(&config.api)),
        LocalStorage::new(paths.storage_file()),
    );
    let workspace = Workspace::seeded(chrono::Local::now().date_naive());
    let mut app = App::new(workspace, auth, &config);
    app.navigate(start);
    tracing::info!(route = %start, "tui started");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::ops::auth::tests::FakeBackend;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    pub(crate) fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    /// App over the seed data with a fake backend accepting "secret".
    /// Keep the TempDir alive for the session store.
    pub(crate) fn test_app() -> (App, TempDir) {
        let dir = TempDir::new().unwrap();
        let auth = AuthService::new(
            Box::new(FakeBackend::new("secret")),
            LocalStorage::new(dir.path().join("storage.json")),
        );
        let app = App::new(Workspace::seeded(today()), auth, &AppConfig::default());
        (app, dir)
    }

    #[test]
    fn next_choice_cycles_through_none() {
        let choices = ["a", "b"];
        assert_eq!(next_choice(&choices, None), Some("a"));
        assert_eq!(next_choice(&choices, Some(&"a")), Some("b"));
        assert_eq!(next_choice(&choices, Some(&"b")), None);
        // a value outside the list resets the filter
        assert_eq!(next_choice(&choices, Some(&"z")), None);
    }

    #[test]
    fn route_cycle_wraps() {
        let (mut app, _dir) = test_app();
        app.cycle_route(false);
        assert_eq!(app.route, Route::Register);
        assert_eq!(app.mode, Mode::Auth);
        app.cycle_route(true);
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn filter_change_returns_to_first_page() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Tasks);
        app.next_page();
        assert_eq!(app.task_query.page, 2);
        app.cycle_status_filter();
        assert_eq!(app.task_query.page, 1);
        assert_eq!(app.task_query.filter.statuses, vec![TaskStatus::Todo]);
        assert!(app.task_page().items.iter().all(|t| t.status == TaskStatus::Todo));
    }

    #[test]
    fn paging_stops_at_the_ends() {
        let (mut app, _dir) = test_app();
        app.prev_page();
        assert_eq!(app.task_query.page, 1);
        app.next_page();
        app.next_page();
        assert_eq!(app.task_query.page, 2);
    }

    #[test]
    fn add_form_validates_before_saving() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Projects);
        app.open_add_form();
        assert_eq!(app.mode, Mode::Form);
        app.submit_form();
        assert_eq!(
            app.form.as_ref().and_then(|f| f.error.as_deref()),
            Some("name is required")
        );
        assert_eq!(app.workspace.projects.len(), 4);

        let form = app.form.as_mut().unwrap();
        for c in "Docs Portal".chars() {
            form.focused_text_mut().unwrap().insert(c);
        }
        app.submit_form();
        assert!(app.form.is_none());
        assert_eq!(app.workspace.projects.len(), 5);
        assert_eq!(app.workspace.projects.records()[4].id, 5);
        assert_eq!(app.projects_cursor, 4);
        assert_eq!(app.status_message.as_deref(), Some("Added project Docs Portal"));
    }

    fn add_task_titled(app: &mut App, title: &str) {
        app.open_add_form();
        let form = app.form.as_mut().unwrap();
        for c in title.chars() {
            form.focused_text_mut().unwrap().insert(c);
        }
        app.submit_form();
    }

    #[test]
    fn added_task_is_selected_on_its_page() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Tasks);
        assert_eq!(app.task_query.page, 1);
        add_task_titled(&mut app, "Write changelog");
        assert_eq!(app.task_query.page, 2);
        assert_eq!(app.selected_task_id(), Some(13));

        app.toggle_sort(SortKey::Title);
        add_task_titled(&mut app, "AAA kickoff");
        assert_eq!(app.task_query.page, 1);
        assert_eq!(app.tasks_cursor, 0);
        assert_eq!(app.selected_task_id(), Some(14));
    }

    #[test]
    fn edit_form_keeps_id_and_position() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Users);
        app.move_cursor(1);
        app.open_edit_form();
        let form = app.form.as_mut().unwrap();
        assert_eq!(form.value(0), "Jane Smith");
        form.focus = 3;
        form.cycle_choice(true);
        app.submit_form();
        let jane = &app.workspace.users.records()[1];
        assert_eq!(jane.id, 2);
        assert_eq!(jane.status, crate::model::user::UserStatus::Inactive);
    }

    #[test]
    fn delete_needs_confirmation() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Users);
        app.cursor_to_end(true);
        app.request_delete();
        assert_eq!(app.mode, Mode::Confirm);
        app.cancel_delete();
        assert_eq!(app.workspace.users.len(), 3);

        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.workspace.users.len(), 2);
        assert_eq!(app.users_cursor, 1);
        assert_eq!(app.status_message.as_deref(), Some("Deleted Bob Johnson"));
    }

    #[test]
    fn deleting_last_task_on_last_page_steps_back() {
        let (mut app, _dir) = test_app();
        app.task_query.page_size = 11;
        app.navigate(Route::Tasks);
        app.next_page();
        assert_eq!(app.task_page().items.len(), 1);
        app.request_delete();
        app.confirm_delete();
        assert_eq!(app.task_query.page, 1);
        assert_eq!(app.task_page().total_pages, 1);
    }

    #[test]
    fn login_lands_on_dashboard() {
        let (mut app, _dir) = test_app();
        app.navigate(Route::Login);
        app.login_form.fields[0].input = crate::tui::form::FieldInput::Text(LineInput::new("ann@example.com"));
        app.login_form.fields[1].input = crate::tui::form::FieldInput::Text(LineInput::new("wrong"));
        app.submit_auth();
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.auth.error(), Some("Invalid credentials"));

        app.login_form.fields[1].input = crate::tui::form::FieldInput::Text(LineInput::new("secret"));
        app.submit_auth();
        assert_eq!(app.route, Route::Dashboard);
        assert!(app.auth.is_authenticated());
        assert_eq!(app.login_form.value(0), "");
    }
}
