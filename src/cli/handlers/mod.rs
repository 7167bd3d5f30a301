use std::error::Error;
use std::io::BufRead;

use chrono::NaiveDate;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::auth_client::HttpAuthBackend;
use crate::io::config_io;
use crate::io::paths::PmsPaths;
use crate::io::session_io::load_session;
use crate::io::storage::LocalStorage;
use crate::model::config::AppConfig;
use crate::model::session::{AuthUser, LoginCredentials, RegisterForm};
use crate::model::task::{Priority, TaskStatus};
use crate::ops::auth::AuthService;
use crate::ops::calendar::YearMonth;
use crate::ops::task_query::{SortSpec, TaskFilter, TaskQuery};
use crate::ops::workspace::Workspace;

type CmdResult = Result<(), Box<dyn Error>>;

/// What every command gets: where files live, the loaded config, and the
/// date used for overdue and upcoming checks
pub struct Context {
    pub paths: PmsPaths,
    pub config: AppConfig,
    pub today: NaiveDate,
}

impl Context {
    fn workspace(&self) -> Workspace {
        Workspace::seeded(self.today)
    }

    fn storage(&self) -> LocalStorage {
        LocalStorage::new(self.paths.storage_file())
    }

    fn auth(&self) -> AuthService {
        AuthService::new(
            Box::new(HttpAuthBackend::from_config(&self.config.api)),
            self.storage(),
        )
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(command: Commands, ctx: &Context, json: bool) -> CmdResult {
    match command {
        // Read commands
        Commands::Users => cmd_users(ctx, json),
        Commands::Projects => cmd_projects(ctx, json),
        Commands::Tasks(args) => cmd_tasks(ctx, args, json),
        Commands::Calendar(args) => cmd_calendar(ctx, args, json),
        Commands::Dashboard => cmd_dashboard(ctx, json),
        Commands::Home => cmd_home(ctx, json),
        Commands::Routes => cmd_routes(json),

        // Session
        Commands::Login(args) => cmd_login(ctx, args, json),
        Commands::Register(args) => cmd_register(ctx, args, json),
        Commands::Logout => cmd_logout(ctx),
        Commands::Whoami => cmd_whoami(ctx, json),

        Commands::Config(cmd) => cmd_config(ctx, cmd.action, json),
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_users(ctx: &Context, json: bool) -> CmdResult {
    let ws = ctx.workspace();
    if json {
        println!("{}", serde_json::to_string_pretty(ws.users.records())?);
    } else {
        print_lines(&format_user_table(ws.users.records()));
    }
    Ok(())
}

fn cmd_projects(ctx: &Context, json: bool) -> CmdResult {
    let ws = ctx.workspace();
    if json {
        println!("{}", serde_json::to_string_pretty(ws.projects.records())?);
    } else {
        print_lines(&format_project_list(ws.projects.records()));
    }
    Ok(())
}

/// Turn command-line filter flags into a query. Unknown status or priority
/// strings are kept as-is and simply match nothing.
fn build_query(args: TasksArgs, default_page_size: usize) -> Result<TaskQuery, Box<dyn Error>> {
    let mut query = TaskQuery::with_page_size(args.page_size.unwrap_or(default_page_size));
    query.set_filter(TaskFilter {
        search: args.search.unwrap_or_default(),
        statuses: args.status.iter().map(|s| TaskStatus::from(s.as_str())).collect(),
        priorities: args.priority.iter().map(|p| Priority::from(p.as_str())).collect(),
        projects: args.project,
    });
    if let Some(key) = args.sort {
        let key = key.parse()?;
        query.sort = Some(if args.desc {
            SortSpec::desc(key)
        } else {
            SortSpec::asc(key)
        });
    }
    query.page = args.page;
    Ok(query)
}

fn cmd_tasks(ctx: &Context, args: TasksArgs, json: bool) -> CmdResult {
    let ws = ctx.workspace();
    let query = build_query(args, ctx.config.tasks.page_size)?;
    let page = query.run(ws.tasks.records());
    tracing::debug!(
        matched = page.total_items,
        page = page.page,
        "ran task query"
    );
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&page_to_json(&page, query.sort))?
        );
    } else {
        print_lines(&format_task_page(&page, query.sort));
    }
    Ok(())
}

fn cmd_calendar(ctx: &Context, args: CalendarArgs, json: bool) -> CmdResult {
    let month = match args.month {
        Some(m) => m.parse::<YearMonth>()?,
        None => YearMonth::of(ctx.today),
    };
    let ws = ctx.workspace();
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&calendar_to_json(ws.tasks.records(), month))?
        );
    } else {
        print_lines(&format_calendar(ws.tasks.records(), month));
    }
    Ok(())
}

fn cmd_dashboard(ctx: &Context, json: bool) -> CmdResult {
    let ws = ctx.workspace();
    let stats = ws.dashboard_stats();
    let progress = ws.project_progress();
    if json {
        let out = DashboardJson { stats, progress };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_lines(&format_dashboard(&stats, &progress));
    }
    Ok(())
}

fn cmd_home(ctx: &Context, json: bool) -> CmdResult {
    let ws = ctx.workspace();
    let stats = ws.home_stats();
    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        let user = load_session(&ctx.storage());
        print_lines(&format_home(&stats, user.as_ref()));
    }
    Ok(())
}

fn cmd_routes(json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&routes_to_json())?);
    } else {
        print_lines(&format_routes());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

fn print_signed_in(user: &AuthUser, json: bool) -> CmdResult {
    if json {
        println!("{}", serde_json::to_string_pretty(&whoami_to_json(user))?);
    } else {
        println!("signed in as {}", format_whoami(user));
    }
    Ok(())
}

/// First line of stdin, without the trailing newline
fn read_password_line() -> Result<String, Box<dyn Error>> {
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn cmd_login(ctx: &Context, args: LoginArgs, json: bool) -> CmdResult {
    let password = match args.password {
        Some(p) => p,
        None => read_password_line()?,
    };
    let mut auth = ctx.auth();
    let user = auth.login(&LoginCredentials {
        email: args.email,
        password,
    })?;
    print_signed_in(user, json)
}

fn cmd_register(ctx: &Context, args: RegisterArgs, json: bool) -> CmdResult {
    let mut auth = ctx.auth();
    let user = auth.register(RegisterForm {
        name: args.name,
        email: args.email,
        password: args.password,
        confirm_password: args.confirm_password,
    })?;
    print_signed_in(user, json)
}

fn cmd_logout(ctx: &Context) -> CmdResult {
    let mut auth = ctx.auth();
    let was_signed_in = auth.is_authenticated();
    auth.logout()?;
    if was_signed_in {
        println!("signed out");
    } else {
        println!("not signed in");
    }
    Ok(())
}

fn cmd_whoami(ctx: &Context, json: bool) -> CmdResult {
    let user = load_session(&ctx.storage());
    match (user, json) {
        (Some(u), true) => println!("{}", serde_json::to_string_pretty(&whoami_to_json(&u))?),
        (Some(u), false) => println!("{}", format_whoami(&u)),
        (None, true) => println!("null"),
        (None, false) => println!("not signed in"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(ctx: &Context, action: ConfigAction, json: bool) -> CmdResult {
    let path = ctx.paths.config_file();
    match action {
        ConfigAction::Show => {
            if json {
                println!("{}", serde_json::to_string_pretty(&ctx.config)?);
            } else {
                print!("{}", toml::to_string_pretty(&ctx.config)?);
            }
        }
        ConfigAction::Set { key, value } => {
            let mut doc = config_io::read_config_doc(&path)?;
            config_io::set_value(&mut doc, &key, &value)?;
            config_io::write_config(&path, &doc)?;
            tracing::info!(%key, "config updated");
            println!("{} = {}", key, value);
        }
        ConfigAction::Path => println!("{}", path.display()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::task_query::{SortDirection, SortKey};

    #[test]
    fn build_query_maps_flags() {
        let args = TasksArgs {
            search: Some("design".into()),
            status: vec!["todo".into(), "done".into()],
            priority: vec!["high".into()],
            project: vec!["Website Redesign".into()],
            sort: Some("dueDate".into()),
            desc: true,
            page: 2,
            page_size: None,
        };
        let query = build_query(args, 5).unwrap();
        assert_eq!(query.page_size, 5);
        assert_eq!(query.page, 2);
        assert_eq!(query.filter.search, "design");
        assert_eq!(
            query.filter.statuses,
            vec![TaskStatus::Todo, TaskStatus::Other("done".into())]
        );
        assert_eq!(query.filter.priorities, vec![Priority::High]);
        assert_eq!(
            query.sort,
            Some(SortSpec {
                key: SortKey::DueDate,
                direction: SortDirection::Desc
            })
        );
    }

    #[test]
    fn build_query_rejects_unknown_sort_key() {
        let args = TasksArgs {
            sort: Some("colour".into()),
            ..Default::default()
        };
        let err = build_query(args, 9).unwrap_err();
        assert!(err.to_string().contains("unknown sort key: colour"));
    }

    #[test]
    fn explicit_page_size_wins() {
        let args = TasksArgs {
            page_size: Some(3),
            page: 1,
            ..Default::default()
        };
        assert_eq!(build_query(args, 9).unwrap().page_size, 3);
    }
}
