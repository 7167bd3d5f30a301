use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::model::task::{Priority, Task, TaskStatus};

/// Default number of tasks per page
pub const DEFAULT_PAGE_SIZE: usize = 9;

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Criteria for narrowing the task list. Every empty criterion matches
/// everything; the non-empty ones are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Case-insensitive substring of title or description
    pub search: String,
    pub statuses: Vec<TaskStatus>,
    pub priorities: Vec<Priority>,
    pub projects: Vec<String>,
}

impl TaskFilter {
    pub fn is_active(&self) -> bool {
        !self.search.trim().is_empty()
            || !self.statuses.is_empty()
            || !self.priorities.is_empty()
            || !self.projects.is_empty()
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.matches_search(task)
            && (self.statuses.is_empty() || self.statuses.contains(&task.status))
            && (self.priorities.is_empty() || self.priorities.contains(&task.priority))
            && (self.projects.is_empty() || self.projects.iter().any(|p| *p == task.project))
    }

    fn matches_search(&self, task: &Task) -> bool {
        let needle = self.search.trim();
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        task.title.to_lowercase().contains(&needle)
            || task.description.to_lowercase().contains(&needle)
    }
}

/// Keep the tasks matching every active criterion, in input order
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    DueDate,
    Priority,
    Status,
    Title,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::DueDate,
        SortKey::Priority,
        SortKey::Status,
        SortKey::Title,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::DueDate => "dueDate",
            SortKey::Priority => "priority",
            SortKey::Status => "status",
            SortKey::Title => "title",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::DueDate => "Due date",
            SortKey::Priority => "Priority",
            SortKey::Status => "Status",
            SortKey::Title => "Title",
        }
    }

    /// Compare two tasks on this key, ascending
    pub fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortKey::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y),
                // Undated tasks go after dated ones
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            SortKey::Priority => a.priority.weight().cmp(&b.priority.weight()),
            SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    }
}

/// Error for a sort key string that names no [`SortKey`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0} (expected dueDate, priority, status or title)")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dueDate" | "due-date" | "due_date" | "due" => Ok(SortKey::DueDate),
            "priority" => Ok(SortKey::Priority),
            "status" => Ok(SortKey::Status),
            "title" => Ok(SortKey::Title),
            other => Err(UnknownSortKey(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "\u{2191}",
            SortDirection::Desc => "\u{2193}",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(key: SortKey) -> Self {
        SortSpec {
            key,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: SortKey) -> Self {
        SortSpec {
            key,
            direction: SortDirection::Desc,
        }
    }

    /// Sort-header click: the same key flips direction, a new key starts ascending
    pub fn toggle(current: Option<SortSpec>, key: SortKey) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec {
                key,
                direction: spec.direction.flipped(),
            },
            _ => SortSpec::asc(key),
        }
    }
}

/// Stable sort; equal keys keep their input order in both directions
pub fn sort_tasks(tasks: &mut [&Task], spec: SortSpec) {
    match spec.direction {
        SortDirection::Asc => tasks.sort_by(|a, b| spec.key.compare(a, b)),
        SortDirection::Desc => tasks.sort_by(|a, b| spec.key.compare(b, a)),
    }
}

// ---------------------------------------------------------------------------
// Paginate
// ---------------------------------------------------------------------------

/// One page of the derived task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPage<'a> {
    pub items: Vec<&'a Task>,
    /// 1-based page number actually served
    pub page: usize,
    pub page_size: usize,
    /// Number of tasks across all pages
    pub total_items: usize,
    /// Always at least 1, even for an empty result
    pub total_pages: usize,
}

pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    total_items.div_ceil(page_size).max(1)
}

/// Slice out page `page` (1-based). Page 0 is read as page 1; pages past the
/// end come back empty.
pub fn paginate<'a>(tasks: &[&'a Task], page: usize, page_size: usize) -> TaskPage<'a> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let start = (page - 1).saturating_mul(page_size);
    let items = tasks
        .iter()
        .skip(start)
        .take(page_size)
        .copied()
        .collect();
    TaskPage {
        items,
        page,
        page_size,
        total_items: tasks.len(),
        total_pages: total_pages(tasks.len(), page_size),
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Filter, sort and page settings for the Tasks screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    pub filter: TaskFilter,
    /// `None` keeps list order
    pub sort: Option<SortSpec>,
    pub page: usize,
    pub page_size: usize,
}

impl Default for TaskQuery {
    fn default() -> Self {
        TaskQuery {
            filter: TaskFilter::default(),
            sort: None,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl TaskQuery {
    pub fn with_page_size(page_size: usize) -> Self {
        TaskQuery {
            page_size,
            ..Default::default()
        }
    }

    /// Filtered and sorted tasks, before paging
    pub fn matching<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        let mut visible = filter_tasks(tasks, &self.filter);
        if let Some(spec) = self.sort {
            sort_tasks(&mut visible, spec);
        }
        visible
    }

    /// Derive the visible page from the full list. Recomputed on every call.
    pub fn run<'a>(&self, tasks: &'a [Task]) -> TaskPage<'a> {
        let visible = self.matching(tasks);
        paginate(&visible, self.page, self.page_size)
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort = Some(SortSpec::toggle(self.sort, key));
    }

    /// Changing the filter sends the view back to the first page
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::TaskDraft;
    use chrono::{NaiveDate, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn task(id: u64, title: &str, status: &str, priority: &str) -> Task {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        Task::from_draft_at(
            id,
            TaskDraft {
                title: title.into(),
                status: status.into(),
                priority: priority.into(),
                ..Default::default()
            },
            now,
        )
    }

    fn sample() -> Vec<Task> {
        let mut tasks = vec![
            task(1, "Design Homepage", "in-progress", "high"),
            task(2, "API Documentation", "completed", "medium"),
            task(3, "Database Schema", "todo", "high"),
            task(4, "User Authentication", "in-progress", "medium"),
            task(5, "load testing", "todo", "low"),
        ];
        tasks[0].project = "Website Redesign".into();
        tasks[1].project = "API Integration".into();
        tasks[2].project = "Database Migration".into();
        tasks[3].project = "Mobile App Development".into();
        tasks[4].project = "API Integration".into();
        tasks[0].description = "New landing page layout".into();
        tasks[4].description = "Stress the public API".into();
        tasks[0].due_date = NaiveDate::from_ymd_opt(2024, 6, 10);
        tasks[1].due_date = NaiveDate::from_ymd_opt(2024, 5, 2);
        tasks[3].due_date = NaiveDate::from_ymd_opt(2024, 7, 1);
        tasks
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id).collect()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let tasks = sample();
        let filter = TaskFilter::default();
        assert!(!filter.is_active());
        assert_eq!(ids(&filter_tasks(&tasks, &filter)), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn search_is_case_insensitive_over_title_and_description() {
        let tasks = sample();
        let filter = TaskFilter {
            search: "API".into(),
            ..Default::default()
        };
        // title "API Documentation", description "Stress the public API"
        assert_eq!(ids(&filter_tasks(&tasks, &filter)), vec![2, 5]);

        let filter = TaskFilter {
            search: "landing".into(),
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &filter)), vec![1]);
    }

    #[test]
    fn whitespace_search_is_inactive() {
        let tasks = sample();
        let filter = TaskFilter {
            search: "   ".into(),
            ..Default::default()
        };
        assert!(!filter.is_active());
        assert_eq!(filter_tasks(&tasks, &filter).len(), tasks.len());
    }

    #[test]
    fn criteria_are_and_combined() {
        let tasks = sample();
        let filter = TaskFilter {
            statuses: vec![TaskStatus::InProgress, TaskStatus::Todo],
            priorities: vec![Priority::High],
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &filter)), vec![1, 3]);

        let filter = TaskFilter {
            projects: vec!["API Integration".into()],
            statuses: vec![TaskStatus::Todo],
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &filter)), vec![5]);
    }

    #[test]
    fn filter_result_is_exact_subset() {
        let tasks = sample();
        let filter = TaskFilter {
            priorities: vec![Priority::Medium],
            ..Default::default()
        };
        let kept = filter_tasks(&tasks, &filter);
        for t in &tasks {
            let included = kept.iter().any(|k| k.id == t.id);
            assert_eq!(included, t.priority == Priority::Medium, "task {}", t.id);
        }
    }

    #[test]
    fn scenario_todo_and_done() {
        let tasks = vec![task(1, "a", "todo", "high"), task(2, "b", "done", "low")];

        let filter = TaskFilter {
            statuses: vec![TaskStatus::Todo],
            ..Default::default()
        };
        assert_eq!(ids(&filter_tasks(&tasks, &filter)), vec![1]);

        let mut all: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut all, SortSpec::desc(SortKey::Priority));
        assert_eq!(ids(&all), vec![1, 2]);
    }

    #[test]
    fn sort_by_priority_uses_weights() {
        let tasks = sample();
        let mut all: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut all, SortSpec::asc(SortKey::Priority));
        assert_eq!(ids(&all), vec![5, 2, 4, 1, 3]);
    }

    #[test]
    fn unknown_priority_sorts_lowest() {
        let tasks = vec![task(1, "a", "todo", "low"), task(2, "b", "todo", "urgent")];
        let mut all: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut all, SortSpec::asc(SortKey::Priority));
        assert_eq!(ids(&all), vec![2, 1]);
    }

    #[test]
    fn sort_by_status_is_lexicographic() {
        let tasks = sample();
        let mut all: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut all, SortSpec::asc(SortKey::Status));
        // completed < in-progress < todo
        assert_eq!(ids(&all), vec![2, 1, 4, 3, 5]);
    }

    #[test]
    fn sort_by_title_ignores_case() {
        let tasks = sample();
        let mut all: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut all, SortSpec::asc(SortKey::Title));
        assert_eq!(ids(&all), vec![2, 3, 1, 5, 4]);
    }

    #[test]
    fn undated_tasks_sort_after_dated_ascending() {
        let tasks = sample();
        let mut all: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut all, SortSpec::asc(SortKey::DueDate));
        assert_eq!(ids(&all), vec![2, 1, 4, 3, 5]);
    }

    #[test]
    fn asc_and_desc_are_reverses_for_distinct_keys() {
        let tasks = sample();
        for key in [SortKey::Title, SortKey::DueDate] {
            let dated: Vec<&Task> = tasks
                .iter()
                .filter(|t| key != SortKey::DueDate || t.due_date.is_some())
                .collect();
            let mut asc = dated.clone();
            let mut desc = dated.clone();
            sort_tasks(&mut asc, SortSpec::asc(key));
            sort_tasks(&mut desc, SortSpec::desc(key));
            let mut reversed = ids(&desc);
            reversed.reverse();
            assert_eq!(ids(&asc), reversed, "key {}", key);
        }
    }

    #[test]
    fn equal_keys_keep_input_order_both_ways() {
        let tasks = sample();
        let mut asc: Vec<&Task> = tasks.iter().collect();
        let mut desc: Vec<&Task> = tasks.iter().collect();
        sort_tasks(&mut asc, SortSpec::asc(SortKey::Priority));
        sort_tasks(&mut desc, SortSpec::desc(SortKey::Priority));
        // high: 1 before 3, medium: 2 before 4, in both directions
        assert_eq!(ids(&asc), vec![5, 2, 4, 1, 3]);
        assert_eq!(ids(&desc), vec![1, 3, 2, 4, 5]);
    }

    #[test]
    fn toggle_flips_same_key_and_resets_new_key() {
        let first = SortSpec::toggle(None, SortKey::Title);
        assert_eq!(first, SortSpec::asc(SortKey::Title));
        let second = SortSpec::toggle(Some(first), SortKey::Title);
        assert_eq!(second, SortSpec::desc(SortKey::Title));
        let third = SortSpec::toggle(Some(second), SortKey::Title);
        assert_eq!(third, SortSpec::asc(SortKey::Title));
        let other = SortSpec::toggle(Some(second), SortKey::Priority);
        assert_eq!(other, SortSpec::asc(SortKey::Priority));
    }

    #[test]
    fn sort_key_parses_wire_names() {
        assert_eq!("dueDate".parse::<SortKey>(), Ok(SortKey::DueDate));
        assert_eq!("priority".parse::<SortKey>(), Ok(SortKey::Priority));
        assert!("owner".parse::<SortKey>().is_err());
    }

    #[test]
    fn pages_reassemble_the_list() {
        let tasks: Vec<Task> = (1..=20)
            .map(|i| task(i, &format!("Task {i}"), "todo", "low"))
            .collect();
        let all: Vec<&Task> = tasks.iter().collect();
        let first = paginate(&all, 1, 9);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 20);

        let mut rebuilt = Vec::new();
        for page in 1..=first.total_pages {
            let p = paginate(&all, page, 9);
            assert!(p.items.len() <= 9);
            rebuilt.extend(ids(&p.items));
        }
        assert_eq!(rebuilt, (1..=20).collect::<Vec<u64>>());
    }

    #[test]
    fn paginate_is_idempotent() {
        let tasks = sample();
        let all: Vec<&Task> = tasks.iter().collect();
        assert_eq!(paginate(&all, 2, 2), paginate(&all, 2, 2));
        assert_eq!(ids(&paginate(&all, 2, 2).items), vec![3, 4]);
    }

    #[test]
    fn out_of_range_pages() {
        let tasks = sample();
        let all: Vec<&Task> = tasks.iter().collect();
        let past = paginate(&all, 7, 9);
        assert!(past.items.is_empty());
        assert_eq!(past.page, 7);
        assert_eq!(past.total_pages, 1);

        let zero = paginate(&all, 0, 9);
        assert_eq!(zero.page, 1);
        assert_eq!(zero.items.len(), 5);

        let empty = paginate(&[], 1, 9);
        assert_eq!(empty.total_pages, 1);
        assert!(empty.items.is_empty());
    }

    #[test]
    fn query_runs_all_three_steps() {
        let tasks = sample();
        let mut query = TaskQuery::with_page_size(2);
        query.set_filter(TaskFilter {
            statuses: vec![TaskStatus::InProgress, TaskStatus::Todo],
            ..Default::default()
        });
        query.toggle_sort(SortKey::Priority);
        query.toggle_sort(SortKey::Priority);
        let page = query.run(&tasks);
        assert_eq!(page.total_items, 4);
        assert_eq!(page.total_pages, 2);
        assert_eq!(ids(&page.items), vec![1, 3]);

        query.page = 2;
        assert_eq!(ids(&query.run(&tasks).items), vec![4, 5]);

        query.set_filter(TaskFilter::default());
        assert_eq!(query.page, 1);
    }
}
