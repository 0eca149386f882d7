#![forbid(unsafe_code)]

use ck_core::{Day, ItemId};
use serde::Serialize;

/// A saved response joined with its employee and item, as listed on the history page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub employee_name: String,
    pub role: String,
    pub item_id: ItemId,
    pub description: String,
    pub done: bool,
    pub comment: Option<String>,
    pub evidence_path: Option<String>,
    pub submitted_at_ms: i64,
    pub submitted_at: String,
    pub day: Day,
}
