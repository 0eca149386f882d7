#![forbid(unsafe_code)]

//! Domain model of the daily checklist: identities, catalog items, responses,
//! the per-session draft and the rules that decide what may be saved.

pub mod day;
pub mod draft;
pub mod gate;
pub mod ids;
pub mod model;
pub mod role;
pub mod validate;

pub use day::Day;
pub use draft::{ItemState, SessionDraft, StateSource};
pub use gate::CompletionCounts;
pub use ids::{EmployeeId, EmployeeName, ItemId, ResponseId};
pub use model::{ChecklistItem, ChecklistResponse, DraftAnswer, Employee};
pub use role::RoleLabel;
pub use validate::{
    ErrorDetail, ValidationMode, ValidationPolicy, ValidationReport, Violation, ViolationKind,
};
