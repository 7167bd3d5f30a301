use serde::Serialize;

use crate::model::project::Project;
use crate::model::route::Route;
use crate::model::session::AuthUser;
use crate::model::task::Task;
use crate::model::user::User;
use crate::ops::calendar::{CalendarCell, YearMonth, month_grid, tasks_for_day};
use crate::ops::dashboard::{DashboardStats, HomeStats, ProjectProgress};
use crate::ops::task_query::{SortDirection, SortSpec, TaskPage};
use crate::util::unicode::{display_width, fit_to_width};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPageJson<'a> {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortJson>,
    pub tasks: &'a [&'a Task],
}

#[derive(Serialize)]
pub struct SortJson {
    pub key: &'static str,
    pub direction: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardJson {
    #[serde(flatten)]
    pub stats: DashboardStats,
    pub progress: Vec<ProjectProgress>,
}

#[derive(Serialize)]
pub struct RouteJson {
    pub path: &'static str,
    pub title: &'static str,
}

#[derive(Serialize)]
pub struct CalendarDayJson<'a> {
    pub date: String,
    pub tasks: Vec<&'a Task>,
}

#[derive(Serialize)]
pub struct CalendarJson<'a> {
    pub month: String,
    pub days: Vec<CalendarDayJson<'a>>,
}

/// Session without the token; the token stays in the store
#[derive(Serialize)]
pub struct WhoamiJson<'a> {
    pub id: u64,
    pub email: &'a str,
    pub name: &'a str,
    pub role: &'static str,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn page_to_json<'a>(page: &'a TaskPage<'a>, sort: Option<SortSpec>) -> TaskPageJson<'a> {
    TaskPageJson {
        page: page.page,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
        sort: sort.map(|s| SortJson {
            key: s.key.as_str(),
            direction: match s.direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            },
        }),
        tasks: &page.items,
    }
}

pub fn routes_to_json() -> Vec<RouteJson> {
    Route::ALL
        .iter()
        .map(|r| RouteJson {
            path: r.path(),
            title: r.title(),
        })
        .collect()
}

pub fn calendar_to_json(tasks: &[Task], month: YearMonth) -> CalendarJson<'_> {
    let days = (1..=month.days_in_month())
        .filter_map(|day| {
            let hits = tasks_for_day(tasks, month, day);
            if hits.is_empty() {
                return None;
            }
            Some(CalendarDayJson {
                date: format!("{}-{:02}", month, day),
                tasks: hits,
            })
        })
        .collect();
    CalendarJson {
        month: month.to_string(),
        days,
    }
}

pub fn whoami_to_json(user: &AuthUser) -> WhoamiJson<'_> {
    WhoamiJson {
        id: user.id,
        email: &user.email,
        name: &user.name,
        role: user.role.as_str(),
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

const BAR_WIDTH: usize = 30;

fn column_width<'a>(values: impl Iterator<Item = &'a str>, header: &str) -> usize {
    values.map(display_width).max().unwrap_or(0).max(header.len())
}

pub fn format_user_table(users: &[User]) -> Vec<String> {
    let name_w = column_width(users.iter().map(|u| u.name.as_str()), "NAME");
    let email_w = column_width(users.iter().map(|u| u.email.as_str()), "EMAIL");
    let mut lines = vec![format!(
        "{:>3}  {}  {}  {:<5}  STATUS",
        "ID",
        fit_to_width("NAME", name_w),
        fit_to_width("EMAIL", email_w),
        "ROLE"
    )];
    for u in users {
        lines.push(format!(
            "{:>3}  {}  {}  {:<5}  {}",
            u.id,
            fit_to_width(&u.name, name_w),
            fit_to_width(&u.email, email_w),
            u.role.as_str(),
            u.status.as_str()
        ));
    }
    lines
}

pub fn format_project_list(projects: &[Project]) -> Vec<String> {
    let name_w = column_width(projects.iter().map(|p| p.name.as_str()), "NAME");
    let mut lines = Vec::new();
    for p in projects {
        let line = format!(
            "{:>3}  {}  [{}]  {}",
            p.id,
            fit_to_width(&p.name, name_w),
            p.status.label(),
            p.description
        );
        lines.push(line.trim_end().to_string());
    }
    lines
}

/// One task as a single line: id, status, priority, title, project, due date
pub fn format_task_line(task: &Task) -> String {
    let due = task
        .due_date
        .map(|d| format!("  due {}", d))
        .unwrap_or_default();
    let project = if task.project.is_empty() {
        String::new()
    } else {
        format!("  ({})", task.project)
    };
    format!(
        "#{:<3} {:<11} {:<6} {}{}{}",
        task.id,
        task.status.as_str(),
        task.priority.as_str(),
        task.title,
        project,
        due
    )
}

pub fn format_task_page(page: &TaskPage, sort: Option<SortSpec>) -> Vec<String> {
    let mut lines: Vec<String> = page.items.iter().map(|t| format_task_line(t)).collect();
    if page.items.is_empty() {
        lines.push("no tasks".to_string());
    }
    lines.push(String::new());
    let sort_str = sort
        .map(|s| format!(", sorted by {} {}", s.key.label(), s.direction.arrow()))
        .unwrap_or_default();
    lines.push(format!(
        "page {}/{} ({} tasks{})",
        page.page, page.total_pages, page.total_items, sort_str
    ));
    lines
}

/// `width`-cell bar, filled in proportion to `percent`
pub fn format_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn format_progress(progress: &[ProjectProgress]) -> Vec<String> {
    let name_w = column_width(progress.iter().map(|p| p.name.as_str()), "");
    progress
        .iter()
        .map(|p| {
            format!(
                "{}  {} {:>3}%  ({} tasks)",
                fit_to_width(&p.name, name_w),
                format_bar(p.progress, BAR_WIDTH),
                p.progress,
                p.total_tasks
            )
        })
        .collect()
}

pub fn format_dashboard(stats: &DashboardStats, progress: &[ProjectProgress]) -> Vec<String> {
    let mut lines = vec![
        format!("Total projects      {}", stats.total_projects),
        format!("Active projects     {}", stats.active_projects),
        format!("Completed projects  {}", stats.completed_projects),
        format!("Overdue tasks       {}", stats.overdue_tasks),
        String::new(),
        "Project progress".to_string(),
    ];
    lines.extend(format_progress(progress).into_iter().map(|l| format!("  {}", l)));
    lines
}

pub fn format_home(stats: &HomeStats, user: Option<&AuthUser>) -> Vec<String> {
    let greeting = match user {
        Some(u) => format!("Welcome back, {}", u.name),
        None => "Welcome to pms".to_string(),
    };
    vec![
        greeting,
        String::new(),
        format!("Users               {} ({} active)", stats.total_users, stats.active_users),
        format!("Active projects     {}", stats.active_projects),
        format!("Completed tasks     {}", stats.completed_tasks),
        format!("Upcoming deadlines  {}", stats.upcoming_deadlines),
    ]
}

/// Month grid (days with tasks marked `*`) followed by the tasks per day
pub fn format_calendar(tasks: &[Task], month: YearMonth) -> Vec<String> {
    let mut lines = vec![month.title(), "Su  Mo  Tu  We  Th  Fr  Sa".to_string()];
    for week in month_grid(tasks, month) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::Blank => "   ".to_string(),
                CalendarCell::Day { day, tasks } => {
                    let mark = if tasks.is_empty() { ' ' } else { '*' };
                    format!("{:>2}{}", day, mark)
                }
            })
            .collect();
        lines.push(row.join(" ").trim_end().to_string());
    }

    let mut listed = false;
    for day in 1..=month.days_in_month() {
        let hits = tasks_for_day(tasks, month, day);
        if hits.is_empty() {
            continue;
        }
        if !listed {
            lines.push(String::new());
            listed = true;
        }
        for t in hits {
            lines.push(format!("{:>2}  {} [{}]", day, t.title, t.status.label()));
        }
    }
    lines
}

pub fn format_routes() -> Vec<String> {
    Route::ALL
        .iter()
        .map(|r| format!("{:<10} {}", r.path(), r.title()))
        .collect()
}

pub fn format_whoami(user: &AuthUser) -> String {
    format!("{} <{}> ({})", user.name, user.email, user.role.as_str())
}
