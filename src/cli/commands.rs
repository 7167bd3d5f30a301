use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pms", about = concat!("pms v", env!("CARGO_PKG_VERSION"), " - projects, tasks and people in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Directory holding config.toml and the session store
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Open the TUI at a route (/, /users, /dashboard, /projects, /tasks, /login, /register)
    #[arg(long)]
    pub route: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List users
    Users,
    /// List projects
    Projects,
    /// Filter, sort and page through tasks
    Tasks(TasksArgs),
    /// Show a month of tasks by due date
    Calendar(CalendarArgs),
    /// Project counters and progress chart
    Dashboard,
    /// Overview counters
    Home,
    /// Sign in and store the session
    Login(LoginArgs),
    /// Create an account and store the session
    Register(RegisterArgs),
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List the screens and their routes
    Routes,
    /// View or change settings
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args, Default)]
pub struct TasksArgs {
    /// Case-insensitive text to look for in title or description
    #[arg(long, short)]
    pub search: Option<String>,
    /// Keep tasks with this status (repeatable: todo, in-progress, completed)
    #[arg(long)]
    pub status: Vec<String>,
    /// Keep tasks with this priority (repeatable: low, medium, high)
    #[arg(long)]
    pub priority: Vec<String>,
    /// Keep tasks in this project (repeatable)
    #[arg(long)]
    pub project: Vec<String>,
    /// Sort key: dueDate, priority, status or title
    #[arg(long)]
    pub sort: Option<String>,
    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
    /// Page number, starting at 1
    #[arg(long, default_value = "1")]
    pub page: usize,
    /// Tasks per page (default from config)
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Args)]
pub struct CalendarArgs {
    /// Month to show as YYYY-MM (default: current month)
    #[arg(long)]
    pub month: Option<String>,
}

// ---------------------------------------------------------------------------
// Session command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,
    /// Password (read from stdin when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub password: String,
    #[arg(long)]
    pub confirm_password: String,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Set a value, e.g. `pms config set api.base_url http://host/api`
    Set {
        /// Dotted key (api.base_url, api.timeout_secs, tasks.page_size, log.level, ui.colors.<slot>)
        key: String,
        value: String,
    },
    /// Print the path of config.toml
    Path,
}
