#![forbid(unsafe_code)]

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("employee not found (name={name}, role={role})")]
    EmployeeNotFound { name: String, role: String },

    #[error("unknown checklist item (item_id={item_id}, role={role})")]
    UnknownItem { item_id: i64, role: String },
}
