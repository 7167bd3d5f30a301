use chrono::NaiveDate;
use serde::Serialize;

use crate::model::project::{Project, ProjectStatus};
use crate::model::task::Task;
use crate::model::user::{User, UserStatus};

/// Days ahead of today that count as "upcoming" on the home screen
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Counters shown on the Dashboard screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub overdue_tasks: usize,
}

/// Counters shown on the Home screen
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeStats {
    pub total_users: usize,
    pub active_users: usize,
    pub active_projects: usize,
    pub completed_tasks: usize,
    pub upcoming_deadlines: usize,
}

/// One bar of the project progress chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectProgress {
    pub name: String,
    /// Percentage of the project's tasks that are completed, 0–100
    pub progress: u8,
    pub total_tasks: usize,
}

pub fn dashboard_stats(projects: &[Project], tasks: &[Task], today: NaiveDate) -> DashboardStats {
    DashboardStats {
        total_projects: projects.len(),
        active_projects: count_projects(projects, ProjectStatus::Active),
        completed_projects: count_projects(projects, ProjectStatus::Completed),
        overdue_tasks: tasks.iter().filter(|t| t.is_overdue(today)).count(),
    }
}

pub fn home_stats(users: &[User], projects: &[Project], tasks: &[Task], today: NaiveDate) -> HomeStats {
    let horizon = today + chrono::Duration::days(UPCOMING_WINDOW_DAYS);
    HomeStats {
        total_users: users.len(),
        active_users: users
            .iter()
            .filter(|u| u.status == UserStatus::Active)
            .count(),
        active_projects: count_projects(projects, ProjectStatus::Active),
        completed_tasks: tasks.iter().filter(|t| t.status.is_completed()).count(),
        upcoming_deadlines: tasks
            .iter()
            .filter(|t| !t.status.is_completed())
            .filter(|t| t.due_date.is_some_and(|d| d >= today && d <= horizon))
            .count(),
    }
}

fn count_projects(projects: &[Project], status: ProjectStatus) -> usize {
    projects.iter().filter(|p| p.status == status).count()
}

/// Completion percentage per project, in project list order. Tasks are
/// matched to projects by name; a project with no tasks shows 0.
pub fn project_progress(projects: &[Project], tasks: &[Task]) -> Vec<ProjectProgress> {
    projects
        .iter()
        .map(|p| {
            let (total, done) = tasks
                .iter()
                .filter(|t| t.project == p.name)
                .fold((0usize, 0usize), |(total, done), t| {
                    (total + 1, done + usize::from(t.status.is_completed()))
                });
            let progress = if total == 0 {
                0
            } else {
                ((done * 100) / total) as u8
            };
            ProjectProgress {
                name: p.name.clone(),
                progress,
                total_tasks: total,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{TaskDraft, TaskStatus};
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn project(id: u64, name: &str, status: ProjectStatus) -> Project {
        Project {
            id,
            name: name.into(),
            description: String::new(),
            status,
        }
    }

    fn task(id: u64, project: &str, status: TaskStatus, due: Option<(i32, u32, u32)>) -> Task {
        Task::from_draft_at(
            id,
            TaskDraft {
                title: format!("t{id}"),
                project: project.into(),
                status,
                due_date: due.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
                ..Default::default()
            },
            Utc::now(),
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn counts_projects_and_overdue_tasks() {
        let projects = vec![
            project(1, "A", ProjectStatus::Active),
            project(2, "B", ProjectStatus::Active),
            project(3, "C", ProjectStatus::Completed),
            project(4, "D", ProjectStatus::OnHold),
        ];
        let tasks = vec![
            task(1, "A", TaskStatus::Todo, Some((2024, 5, 1))),
            task(2, "A", TaskStatus::Completed, Some((2024, 5, 1))),
            task(3, "B", TaskStatus::InProgress, Some((2024, 6, 1))),
            task(4, "B", TaskStatus::Todo, None),
        ];
        assert_eq!(
            dashboard_stats(&projects, &tasks, today()),
            DashboardStats {
                total_projects: 4,
                active_projects: 2,
                completed_projects: 1,
                overdue_tasks: 1,
            }
        );
    }

    #[test]
    fn upcoming_window_is_inclusive() {
        let tasks = vec![
            task(1, "A", TaskStatus::Todo, Some((2024, 6, 1))),
            task(2, "A", TaskStatus::Todo, Some((2024, 6, 8))),
            task(3, "A", TaskStatus::Todo, Some((2024, 6, 9))),
            task(4, "A", TaskStatus::Completed, Some((2024, 6, 2))),
            task(5, "A", TaskStatus::Todo, Some((2024, 5, 31))),
        ];
        let stats = home_stats(&[], &[], &tasks, today());
        assert_eq!(stats.upcoming_deadlines, 2);
        assert_eq!(stats.completed_tasks, 1);
    }

    #[test]
    fn progress_is_share_of_completed_tasks() {
        let projects = vec![
            project(1, "A", ProjectStatus::Active),
            project(2, "Empty", ProjectStatus::Active),
        ];
        let tasks = vec![
            task(1, "A", TaskStatus::Completed, None),
            task(2, "A", TaskStatus::Todo, None),
            task(3, "A", TaskStatus::Completed, None),
            task(4, "Elsewhere", TaskStatus::Completed, None),
        ];
        let bars = project_progress(&projects, &tasks);
        assert_eq!(bars[0].progress, 66);
        assert_eq!(bars[0].total_tasks, 3);
        assert_eq!(bars[1].progress, 0);
        assert_eq!(bars[1].total_tasks, 0);
    }
}
