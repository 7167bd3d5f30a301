use chrono::NaiveDate;

use crate::model::project::{ProjectDraft, ProjectStatus};
use crate::model::session::{LoginCredentials, RegisterForm};
use crate::model::task::{Priority, TaskDraft, TaskStatus};
use crate::model::user::{Role, UserDraft, UserStatus};
use crate::util::line_input::LineInput;

/// Which list a modal form or delete confirmation works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Project,
    Task,
}

impl EntityKind {
    pub fn noun(self) -> &'static str {
        match self {
            EntityKind::User => "User",
            EntityKind::Project => "Project",
            EntityKind::Task => "Task",
        }
    }
}

/// What submitting a form does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Add(EntityKind),
    Edit(EntityKind, u64),
    Login,
    Register,
}

impl FormTarget {
    pub fn title(self) -> String {
        match self {
            FormTarget::Add(kind) => format!("Add {}", kind.noun()),
            FormTarget::Edit(kind, _) => format!("Edit {}", kind.noun()),
            FormTarget::Login => "Login".to_string(),
            FormTarget::Register => "Register".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(LineInput),
    /// Cycled with ←/→
    Choice { options: Vec<String>, selected: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub input: FieldInput,
    /// Render as bullets (passwords)
    pub masked: bool,
}

impl FormField {
    fn text(label: &'static str, value: &str) -> Self {
        FormField {
            label,
            input: FieldInput::Text(LineInput::new(value)),
            masked: false,
        }
    }

    fn secret(label: &'static str) -> Self {
        FormField {
            masked: true,
            ..FormField::text(label, "")
        }
    }

    /// A choice field; `current` is added to the options when missing so
    /// editing never silently changes a value
    fn choice(label: &'static str, mut options: Vec<String>, current: &str) -> Self {
        let selected = match options.iter().position(|o| o == current) {
            Some(i) => i,
            None => {
                options.push(current.to_string());
                options.len() - 1
            }
        };
        FormField {
            label,
            input: FieldInput::Choice { options, selected },
            masked: false,
        }
    }

    pub fn value(&self) -> &str {
        match &self.input {
            FieldInput::Text(input) => input.text(),
            FieldInput::Choice { options, selected } => {
                options.get(*selected).map(String::as_str).unwrap_or("")
            }
        }
    }
}

/// A modal (or full-screen, for login/register) form: labelled fields,
/// one focused at a time, plus the inline error from the last submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub target: FormTarget,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
}

fn strings<T>(items: impl IntoIterator<Item = T>, f: impl Fn(T) -> String) -> Vec<String> {
    items.into_iter().map(f).collect()
}

/// An empty choice first, for optional fields like project and assignee
fn optional(names: &[String]) -> Vec<String> {
    std::iter::once(String::new())
        .chain(names.iter().cloned())
        .collect()
}

impl FormState {
    fn new(target: FormTarget, fields: Vec<FormField>) -> Self {
        FormState {
            target,
            fields,
            focus: 0,
            error: None,
        }
    }

    pub fn user(target: FormTarget, draft: &UserDraft) -> Self {
        Self::new(
            target,
            vec![
                FormField::text("Name", &draft.name),
                FormField::text("Email", &draft.email),
                FormField::choice(
                    "Role",
                    strings(Role::CHOICES, |r| r.as_str().to_string()),
                    draft.role.as_str(),
                ),
                FormField::choice(
                    "Status",
                    strings(UserStatus::CHOICES, |s| s.as_str().to_string()),
                    draft.status.as_str(),
                ),
            ],
        )
    }

    pub fn project(target: FormTarget, draft: &ProjectDraft) -> Self {
        Self::new(
            target,
            vec![
                FormField::text("Name", &draft.name),
                FormField::text("Description", &draft.description),
                FormField::choice(
                    "Status",
                    strings(ProjectStatus::CHOICES, |s| s.as_str().to_string()),
                    draft.status.as_str(),
                ),
            ],
        )
    }

    pub fn task(target: FormTarget, draft: &TaskDraft, projects: &[String], users: &[String]) -> Self {
        let due = draft.due_date.map(|d| d.to_string()).unwrap_or_default();
        Self::new(
            target,
            vec![
                FormField::text("Title", &draft.title),
                FormField::text("Description", &draft.description),
                FormField::choice(
                    "Status",
                    strings(TaskStatus::CHOICES, |s| s.as_str().to_string()),
                    draft.status.as_str(),
                ),
                FormField::choice(
                    "Priority",
                    strings(Priority::CHOICES, |p| p.as_str().to_string()),
                    draft.priority.as_str(),
                ),
                FormField::choice("Project", optional(projects), &draft.project),
                FormField::choice("Assignee", optional(users), &draft.assignee),
                FormField::text("Due date", &due),
            ],
        )
    }

    pub fn login() -> Self {
        Self::new(
            FormTarget::Login,
            vec![FormField::text("Email", ""), FormField::secret("Password")],
        )
    }

    pub fn register() -> Self {
        Self::new(
            FormTarget::Register,
            vec![
                FormField::text("Name", ""),
                FormField::text("Email", ""),
                FormField::secret("Password"),
                FormField::secret("Confirm Password"),
            ],
        )
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focused_text_mut(&mut self) -> Option<&mut LineInput> {
        match self.fields.get_mut(self.focus).map(|f| &mut f.input) {
            Some(FieldInput::Text(input)) => Some(input),
            _ => None,
        }
    }

    pub fn next_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn prev_field(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Step the focused choice field; no-op on text fields
    pub fn cycle_choice(&mut self, forward: bool) {
        if let Some(FieldInput::Choice { options, selected }) =
            self.fields.get_mut(self.focus).map(|f| &mut f.input)
            && !options.is_empty()
        {
            *selected = if forward {
                (*selected + 1) % options.len()
            } else {
                (*selected + options.len() - 1) % options.len()
            };
        }
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(FormField::value).unwrap_or("")
    }

    /// Empty every text field and the error; choices keep their selection
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            if let FieldInput::Text(input) = &mut field.input {
                input.clear();
            }
        }
        self.focus = 0;
        self.error = None;
    }

    // -----------------------------------------------------------------------
    // Reading drafts back out
    // -----------------------------------------------------------------------

    pub fn user_draft(&self) -> UserDraft {
        UserDraft {
            name: self.value(0).trim().to_string(),
            email: self.value(1).trim().to_string(),
            role: Role::CHOICES
                .into_iter()
                .find(|r| r.as_str() == self.value(2))
                .unwrap_or_default(),
            status: UserStatus::CHOICES
                .into_iter()
                .find(|s| s.as_str() == self.value(3))
                .unwrap_or_default(),
        }
    }

    pub fn project_draft(&self) -> ProjectDraft {
        ProjectDraft {
            name: self.value(0).trim().to_string(),
            description: self.value(1).trim().to_string(),
            status: ProjectStatus::CHOICES
                .into_iter()
                .find(|s| s.as_str() == self.value(2))
                .unwrap_or_default(),
        }
    }

    /// Fails only on a due date that is neither empty nor `YYYY-MM-DD`
    pub fn task_draft(&self) -> Result<TaskDraft, String> {
        let due = self.value(6).trim();
        let due_date = if due.is_empty() {
            None
        } else {
            Some(
                NaiveDate::parse_from_str(due, "%Y-%m-%d")
                    .map_err(|_| "Due date must be YYYY-MM-DD".to_string())?,
            )
        };
        Ok(TaskDraft {
            title: self.value(0).trim().to_string(),
            description: self.value(1).trim().to_string(),
            status: TaskStatus::from(self.value(2)),
            priority: Priority::from(self.value(3)),
            project: self.value(4).to_string(),
            assignee: self.value(5).to_string(),
            due_date,
        })
    }

    pub fn login_credentials(&self) -> LoginCredentials {
        LoginCredentials {
            email: self.value(0).trim().to_string(),
            password: self.value(1).to_string(),
        }
    }

    pub fn register_form(&self) -> RegisterForm {
        RegisterForm {
            name: self.value(0).trim().to_string(),
            email: self.value(1).trim().to_string(),
            password: self.value(2).to_string(),
            confirm_password: self.value(3).to_string(),
        }
    }
}
