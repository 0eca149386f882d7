#![forbid(unsafe_code)]

use crate::day::Day;
use crate::ids::ItemId;
use crate::model::{ChecklistItem, ChecklistResponse, DraftAnswer};
use serde::Serialize;
use std::collections::BTreeMap;

/// In-progress answers of one session, keyed by item.
///
/// Each answer remembers the day it was captured on. Evidence captured on
/// another day never counts for the current one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionDraft {
    answers: BTreeMap<ItemId, DraftEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct DraftEntry {
    answer: DraftAnswer,
    day: Day,
}

impl SessionDraft {
    pub fn get(&self, item_id: ItemId) -> Option<&DraftAnswer> {
        self.answers.get(&item_id).map(|entry| &entry.answer)
    }

    pub fn captured_on(&self, item_id: ItemId) -> Option<Day> {
        self.answers.get(&item_id).map(|entry| entry.day)
    }

    /// The answer as it applies on `day`; evidence from another day is dropped.
    pub fn answer_on(&self, item_id: ItemId, day: Day) -> Option<DraftAnswer> {
        let entry = self.answers.get(&item_id)?;
        let mut answer = entry.answer.clone();
        if entry.day != day {
            answer.evidence_path = None;
        }
        Some(answer)
    }

    /// Replaces any previous answer for the same item.
    pub fn put(&mut self, answer: DraftAnswer, day: Day) {
        self.answers
            .insert(answer.item_id, DraftEntry { answer, day });
    }

    pub fn remove(&mut self, item_id: ItemId) -> Option<DraftAnswer> {
        self.answers.remove(&item_id).map(|entry| entry.answer)
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn answers(&self) -> impl Iterator<Item = &DraftAnswer> {
        self.answers.values().map(|entry| &entry.answer)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StateSource {
    Persisted,
    Draft,
    Default,
}

/// Render-ready state of one catalog item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ItemState {
    pub item: ChecklistItem,
    pub done: bool,
    pub comment: Option<String>,
    pub evidence_path: Option<String>,
    pub source: StateSource,
    /// Evidence was saved earlier today and is shown read-only.
    pub evidence_locked: bool,
    pub needs_upload: bool,
}

pub fn merge_item_states(
    items: &[ChecklistItem],
    persisted_today: &[ChecklistResponse],
    draft: &SessionDraft,
    today: Day,
) -> Vec<ItemState> {
    let persisted = index_persisted(persisted_today);

    items
        .iter()
        .map(|item| {
            let (answer, source) = if let Some(row) = persisted.get(&item.id) {
                (row.to_answer(), StateSource::Persisted)
            } else if let Some(answer) = draft.answer_on(item.id, today) {
                (answer, StateSource::Draft)
            } else {
                (DraftAnswer::empty(item.id), StateSource::Default)
            };

            let has_evidence = answer.has_evidence();
            ItemState {
                item: item.clone(),
                done: answer.done,
                comment: answer.comment,
                evidence_path: answer.evidence_path,
                source,
                evidence_locked: source == StateSource::Persisted && has_evidence,
                needs_upload: !has_evidence,
            }
        })
        .collect()
}

/// One entry per catalog item, in catalog order: the draft answer when the session
/// touched the item, else today's persisted row, else an empty answer.
///
/// A done draft answer without evidence of its own inherits the evidence saved
/// for the item earlier `today`. Draft evidence captured on another day is dropped.
pub fn submission_batch(
    items: &[ChecklistItem],
    persisted_today: &[ChecklistResponse],
    draft: &SessionDraft,
    today: Day,
) -> Vec<DraftAnswer> {
    let persisted = index_persisted(persisted_today);

    items
        .iter()
        .map(|item| {
            let saved = persisted.get(&item.id);
            match (draft.answer_on(item.id, today), saved) {
                (Some(mut answer), Some(row)) if answer.done && !answer.has_evidence() => {
                    answer.evidence_path = row.to_answer().evidence_path;
                    answer
                }
                (Some(answer), _) => answer,
                (None, Some(row)) => row.to_answer(),
                (None, None) => DraftAnswer::empty(item.id),
            }
        })
        .collect()
}

fn index_persisted(rows: &[ChecklistResponse]) -> BTreeMap<ItemId, &ChecklistResponse> {
    // Latest write wins if the caller hands us more than one row per item.
    let mut out: BTreeMap<ItemId, &ChecklistResponse> = BTreeMap::new();
    for row in rows {
        match out.get(&row.item_id) {
            Some(existing) if existing.submitted_at_ms > row.submitted_at_ms => {}
            _ => {
                out.insert(row.item_id, row);
            }
        }
    }
    out
}
