#![forbid(unsafe_code)]

use ck_core::Violation;
use ck_storage::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// No employee match, or no checklist items for the role.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("validation failed ({} violation(s))", .0.len())]
    Validation(Vec<Violation>),

    #[error("storage: {0}")]
    Storage(#[source] StoreError),

    /// Identity drifted between session start and save.
    #[error("precondition failed: {0}")]
    Precondition(String),

    #[error("checklist already completed today")]
    AlreadyCompleted,

    #[error("config: {0}")]
    Config(String),
}

impl From<StoreError> for EngineError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::EmployeeNotFound { name, role } => {
                Self::Precondition(format!("employee {name} ({role}) no longer exists"))
            }
            other => Self::Storage(other),
        }
    }
}

impl EngineError {
    /// Text shown to the person using the form. Storage details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound(what) => format!("Nothing to show: {what}."),
            Self::Validation(violations) => violations
                .iter()
                .map(Violation::message)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Storage(_) => {
                "Something went wrong while reading or saving the checklist. Please try again.".to_string()
            }
            Self::Precondition(_) => {
                "Your employee record was not found. Please log in again.".to_string()
            }
            Self::AlreadyCompleted => "Today's checklist has already been submitted.".to_string(),
            Self::Config(message) => format!("Invalid configuration: {message}."),
        }
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Validation(violations) => violations,
            _ => &[],
        }
    }
}
