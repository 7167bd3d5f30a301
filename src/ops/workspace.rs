use chrono::NaiveDate;

use crate::model::project::Project;
use crate::model::task::Task;
use crate::model::user::User;
use crate::ops::dashboard::{self, DashboardStats, HomeStats, ProjectProgress};
use crate::ops::entity_list::EntityList;
use crate::ops::seed;

/// The three in-memory lists a session works on, plus the date used for
/// overdue and upcoming checks.
pub struct Workspace {
    pub users: EntityList<User>,
    pub projects: EntityList<Project>,
    pub tasks: EntityList<Task>,
    pub today: NaiveDate,
}

impl Workspace {
    /// Start from the built-in sample records
    pub fn seeded(today: NaiveDate) -> Self {
        Workspace {
            users: EntityList::from_records(seed::seed_users()),
            projects: EntityList::from_records(seed::seed_projects()),
            tasks: EntityList::from_records(seed::seed_tasks(today)),
            today,
        }
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        dashboard::dashboard_stats(self.projects.records(), self.tasks.records(), self.today)
    }

    pub fn home_stats(&self) -> HomeStats {
        dashboard::home_stats(
            self.users.records(),
            self.projects.records(),
            self.tasks.records(),
            self.today,
        )
    }

    pub fn project_progress(&self) -> Vec<ProjectProgress> {
        dashboard::project_progress(self.projects.records(), self.tasks.records())
    }

    /// Project names in list order, for filter and form choices
    pub fn project_names(&self) -> Vec<String> {
        self.projects.records().iter().map(|p| p.name.clone()).collect()
    }

    /// User names in list order, for the assignee choice
    pub fn user_names(&self) -> Vec<String> {
        self.users.records().iter().map(|u| u.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::ProjectDraft;

    #[test]
    fn counters_follow_list_changes() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let mut ws = Workspace::seeded(today);
        let before = ws.dashboard_stats().total_projects;
        ws.projects.add(ProjectDraft {
            name: "Docs Portal".into(),
            ..Default::default()
        });
        assert_eq!(ws.dashboard_stats().total_projects, before + 1);
        assert_eq!(ws.project_names().last().map(String::as_str), Some("Docs Portal"));
    }

    #[test]
    fn user_names_in_list_order() {
        let ws = Workspace::seeded(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(ws.user_names(), vec!["John Doe", "Jane Smith", "Bob Johnson"]);
    }
}
