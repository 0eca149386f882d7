#![forbid(unsafe_code)]

//! Daily checklist engine: sign-in, per-session drafts, evidence uploads,
//! validated saves and the once-per-day completion gate.

pub mod config;
pub mod engine;
pub mod error;
pub mod session;
pub mod views;

pub use config::EngineConfig;
pub use engine::ChecklistEngine;
pub use error::EngineError;
pub use session::{Session, SessionId, SessionRegistry};
pub use views::{ChecklistView, EvidenceUpload, HistoryView, ItemInput, SubmitOutcome};
