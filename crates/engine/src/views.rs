#![forbid(unsafe_code)]

use ck_core::{CompletionCounts, Day, ItemId, ItemState, Violation};
use ck_storage::HistoryEntry;
use serde::Serialize;

/// What the checklist page renders for the signed-in employee on `day`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChecklistView {
    pub employee: String,
    pub role: String,
    pub day: Day,
    pub counts: CompletionCounts,
    pub completed_today: bool,
    pub items: Vec<ItemState>,
}

/// One widget change on the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInput {
    pub item_id: ItemId,
    pub done: bool,
    pub comment: Option<String>,
    /// `None` keeps whatever evidence the draft already points at.
    pub upload: Option<EvidenceUpload>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvidenceUpload {
    pub bytes: Vec<u8>,
    /// As reported by the upload widget (`"png"`, `".JPG"`, ...).
    pub extension: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub inserted: Vec<ItemId>,
    pub updated: Vec<ItemId>,
    /// Accepted but identical to what is already saved for today.
    pub unchanged: Vec<ItemId>,
    pub skipped: Vec<ItemId>,
    /// Rejected entries of a partial save.
    pub violations: Vec<Violation>,
    pub counts: CompletionCounts,
    pub completed_today: bool,
}

impl SubmitOutcome {
    pub fn saved(&self) -> usize {
        self.inserted.len() + self.updated.len()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HistoryView {
    /// Days with saved responses, newest first.
    pub days: Vec<Day>,
    pub selected_day: Option<Day>,
    pub entries: Vec<HistoryEntry>,
}
