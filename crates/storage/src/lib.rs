#![forbid(unsafe_code)]

//! Durable state of the daily checklist: the SQLite store (catalog, responses,
//! completion counts, history) and the evidence image store.

mod evidence;
mod store;

pub use evidence::{ALLOWED_EXTENSIONS, EvidenceFs, EvidenceStore, LocalFs};
pub use store::*;
