//! Built-in sample data. There is no backend for entity lists, so every
//! session starts from these records.

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::model::project::{Project, ProjectStatus};
use crate::model::task::{Priority, Task, TaskStatus};
use crate::model::user::{Role, User, UserStatus};

pub fn seed_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "John Doe".into(),
            email: "john@example.com".into(),
            role: Role::Admin,
            status: UserStatus::Active,
        },
        User {
            id: 2,
            name: "Jane Smith".into(),
            email: "jane@example.com".into(),
            role: Role::User,
            status: UserStatus::Active,
        },
        User {
            id: 3,
            name: "Bob Johnson".into(),
            email: "bob@example.com".into(),
            role: Role::User,
            status: UserStatus::Inactive,
        },
    ]
}

pub fn seed_projects() -> Vec<Project> {
    vec![
        Project {
            id: 1,
            name: "Website Redesign".into(),
            description: "Redesign company website".into(),
            status: ProjectStatus::Active,
        },
        Project {
            id: 2,
            name: "Mobile App Development".into(),
            description: "Develop new mobile app".into(),
            status: ProjectStatus::Active,
        },
        Project {
            id: 3,
            name: "Database Migration".into(),
            description: "Migrate to new database".into(),
            status: ProjectStatus::Completed,
        },
        Project {
            id: 4,
            name: "API Integration".into(),
            description: "Integrate third-party APIs".into(),
            status: ProjectStatus::OnHold,
        },
    ]
}

/// (title, description, status, priority, project, assignee, due offset in days)
type TaskRow = (
    &'static str,
    &'static str,
    TaskStatus,
    Priority,
    &'static str,
    &'static str,
    Option<i64>,
);

fn task_rows() -> Vec<TaskRow> {
    use Priority::*;
    use TaskStatus::*;
    vec![
        ("Design Homepage", "Wireframes and visual design for the new landing page", InProgress, High, "Website Redesign", "Jane Smith", Some(3)),
        ("API Documentation", "Document every public endpoint", Completed, Medium, "API Integration", "John Doe", Some(-10)),
        ("Database Schema", "Draft the target schema and migration order", Todo, High, "Database Migration", "Bob Johnson", Some(-2)),
        ("User Authentication", "Login and registration flows for the app", InProgress, Medium, "Mobile App Development", "Jane Smith", Some(6)),
        ("Navigation Menu", "Responsive sidebar and header", Todo, Medium, "Website Redesign", "John Doe", Some(12)),
        ("Push Notifications", "Notify users about task changes", Todo, Low, "Mobile App Development", "Jane Smith", None),
        ("Data Backfill", "Copy historical records into the new store", Completed, High, "Database Migration", "Bob Johnson", Some(-20)),
        ("Webhook Receiver", "Accept partner callbacks", Todo, High, "API Integration", "John Doe", Some(-5)),
        ("Contact Form", "Form with spam protection", Completed, Low, "Website Redesign", "Jane Smith", Some(-1)),
        ("Offline Mode", "Cache recent tasks on the device", Todo, Medium, "Mobile App Development", "Bob Johnson", Some(25)),
        ("Index Tuning", "Review slow queries after the cut-over", InProgress, Low, "Database Migration", "John Doe", Some(1)),
        ("Rate Limiting", "Back off when partners throttle us", Todo, Medium, "API Integration", "Jane Smith", None),
    ]
}

/// Sample tasks with due dates spread around `today`
pub fn seed_tasks(today: NaiveDate) -> Vec<Task> {
    let created = Utc.from_utc_datetime(
        &(today - Duration::days(30)).and_time(NaiveTime::MIN),
    );
    task_rows()
        .into_iter()
        .enumerate()
        .map(
            |(i, (title, description, status, priority, project, assignee, due))| Task {
                id: i as u64 + 1,
                title: title.into(),
                description: description.into(),
                status,
                priority,
                project: project.into(),
                assignee: assignee.into(),
                due_date: due.map(|days| today + Duration::days(days)),
                created_at: created,
                updated_at: created,
            },
        )
        .collect()
}
