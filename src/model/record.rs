/// Client-side form validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// The editable part of a record, bound to a modal form
pub trait Draft: Clone + Default {
    /// Required-field checks run before a form is submitted
    fn validate(&self) -> Result<(), ValidationError>;
}

/// A row in one of the entity lists (users, projects, tasks)
pub trait Record: Clone {
    type Draft: Draft;

    /// Singular noun used in log lines and error messages
    const KIND: &'static str;

    fn id(&self) -> u64;

    /// Build a new record carrying `id` from a submitted draft
    fn from_draft(id: u64, draft: Self::Draft) -> Self;

    /// Replace every non-id field with the draft's values
    fn apply(&mut self, draft: Self::Draft);

    /// Copy the editable fields out, e.g. to prefill an edit form
    fn to_draft(&self) -> Self::Draft;
}
