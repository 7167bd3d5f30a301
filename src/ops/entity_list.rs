use crate::model::record::Record;

/// Error type for list operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: u64 },
}

/// Hands out ids for one list. Never goes backwards, so an id freed by a
/// delete is not handed out again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Start after the highest existing id, or at 1 for an empty list
    pub fn after<I: IntoIterator<Item = u64>>(ids: I) -> Self {
        let next = ids.into_iter().max().map_or(1, |max| max + 1);
        IdAllocator { next }
    }

    pub fn peek(&self) -> u64 {
        self.next
    }

    pub fn allocate(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        IdAllocator { next: 1 }
    }
}

/// An ordered in-memory list of records owned by one screen
#[derive(Debug, Clone)]
pub struct EntityList<R: Record> {
    records: Vec<R>,
    ids: IdAllocator,
}

impl<R: Record> Default for EntityList<R> {
    fn default() -> Self {
        EntityList {
            records: Vec::new(),
            ids: IdAllocator::default(),
        }
    }
}

impl<R: Record> EntityList<R> {
    pub fn from_records(records: Vec<R>) -> Self {
        let ids = IdAllocator::after(records.iter().map(Record::id));
        EntityList { records, ids }
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u64) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }

    /// Append a record built from `draft` and return its fresh id
    pub fn add(&mut self, draft: R::Draft) -> u64 {
        let id = self.ids.allocate();
        self.records.push(R::from_draft(id, draft));
        tracing::debug!(kind = R::KIND, id, "record added");
        id
    }

    /// Replace the non-id fields of record `id`, keeping its position
    pub fn edit(&mut self, id: u64, draft: R::Draft) -> Result<(), EntityError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(EntityError::NotFound { kind: R::KIND, id })?;
        record.apply(draft);
        tracing::debug!(kind = R::KIND, id, "record edited");
        Ok(())
    }

    /// Remove record `id` and hand it back
    pub fn delete(&mut self, id: u64) -> Result<R, EntityError> {
        let idx = self
            .position(id)
            .ok_or(EntityError::NotFound { kind: R::KIND, id })?;
        let removed = self.records.remove(idx);
        tracing::debug!(kind = R::KIND, id, "record deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::project::{Project, ProjectDraft, ProjectStatus};
    use crate::model::record::Record;
    use crate::model::task::{Priority, Task, TaskDraft, TaskStatus};
    use crate::model::user::{Role, User, UserDraft, UserStatus};
    use pretty_assertions::assert_eq;

    fn users() -> EntityList<User> {
        EntityList::from_records(vec![
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
        ])
    }

    fn draft(name: &str) -> UserDraft {
        UserDraft {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            ..Default::default()
        }
    }

    #[test]
    fn empty_list_starts_at_one() {
        let mut list: EntityList<Project> = EntityList::default();
        let id = list.add(ProjectDraft {
            name: "First".into(),
            ..Default::default()
        });
        assert_eq!(id, 1);
        assert_eq!(EntityList::<Project>::from_records(vec![]).ids.peek(), 1);
    }

    #[test]
    fn add_appends_after_highest_id() {
        let mut list = users();
        let id = list.add(draft("Ann"));
        assert_eq!(id, 4);
        assert_eq!(list.records().last().map(|u| u.name.as_str()), Some("Ann"));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut list = users();
        let id = list.add(draft("Ann"));
        list.delete(id).unwrap();
        let next = list.add(draft("Ben"));
        assert_eq!(next, id + 1);

        // Deleting the current maximum must not rewind the counter either.
        list.delete(next).unwrap();
        list.delete(3).unwrap();
        assert_eq!(list.add(draft("Cy")), next + 1);
    }

    #[test]
    fn add_then_delete_restores_list() {
        let mut list = users();
        let before = list.records().to_vec();
        let id = list.add(draft("Temp"));
        let removed = list.delete(id).unwrap();
        assert_eq!(removed.name, "Temp");
        assert_eq!(list.records(), before.as_slice());
    }

    #[test]
    fn delete_from_middle_keeps_order() {
        let mut list = users();
        list.delete(2).unwrap();
        let ids: Vec<u64> = list.records().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn edit_keeps_id_and_position() {
        let mut list = users();
        let replacement = UserDraft {
            name: "Janet Smith".into(),
            email: "janet@example.com".into(),
            role: Role::Admin,
            status: UserStatus::Inactive,
        };
        list.edit(2, replacement.clone()).unwrap();
        assert_eq!(list.position(2), Some(1));
        let edited = list.get(2).unwrap();
        assert_eq!(edited.to_draft(), replacement);
        assert_eq!(list.get(1).unwrap().name, "John Doe");
    }

    #[test]
    fn edit_task_bumps_updated_at_only() {
        let mut list: EntityList<Task> = EntityList::default();
        let id = list.add(TaskDraft {
            title: "Draft".into(),
            ..Default::default()
        });
        let created = list.get(id).unwrap().created_at;
        list.edit(
            id,
            TaskDraft {
                title: "Final".into(),
                status: TaskStatus::Completed,
                priority: Priority::High,
                ..Default::default()
            },
        )
        .unwrap();
        let task = list.get(id).unwrap();
        assert_eq!(task.title, "Final");
        assert_eq!(task.created_at, created);
        assert!(task.updated_at >= created);
    }

    #[test]
    fn unknown_id_is_an_error_and_changes_nothing() {
        let mut list = users();
        let before = list.records().to_vec();
        assert_eq!(
            list.delete(42),
            Err(EntityError::NotFound { kind: "user", id: 42 })
        );
        assert_eq!(
            list.edit(42, draft("Nobody")),
            Err(EntityError::NotFound { kind: "user", id: 42 })
        );
        assert_eq!(list.records(), before.as_slice());
        assert_eq!(
            EntityError::NotFound { kind: "project", id: 9 }.to_string(),
            "project not found: 9"
        );
    }

    #[test]
    fn project_status_edit() {
        let mut list = EntityList::from_records(vec![Project {
            id: 1,
            name: "Website Redesign".into(),
            description: "Redesign company website".into(),
            status: ProjectStatus::Active,
        }]);
        let mut d = list.get(1).unwrap().to_draft();
        d.status = ProjectStatus::OnHold;
        list.edit(1, d).unwrap();
        assert_eq!(list.get(1).unwrap().status, ProjectStatus::OnHold);
    }
}
