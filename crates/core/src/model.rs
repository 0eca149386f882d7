#![forbid(unsafe_code)]

use crate::day::Day;
use crate::ids::{EmployeeId, EmployeeName, ItemId, ResponseId};
use crate::role::RoleLabel;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: EmployeeName,
    pub role: RoleLabel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ItemId,
    pub role: RoleLabel,
    pub description: String,
}

/// One persisted row of `checklist_responses`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistResponse {
    pub id: ResponseId,
    pub item_id: ItemId,
    pub employee_id: EmployeeId,
    pub done: bool,
    pub comment: Option<String>,
    pub evidence_path: Option<String>,
    pub submitted_at_ms: i64,
    pub day: Day,
}

impl ChecklistResponse {
    pub fn to_answer(&self) -> DraftAnswer {
        DraftAnswer::new(
            self.item_id,
            self.done,
            self.comment.clone(),
            self.evidence_path.clone(),
        )
    }
}

/// Answer for a single item as captured from the user, before or after it is saved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAnswer {
    pub item_id: ItemId,
    pub done: bool,
    pub comment: Option<String>,
    pub evidence_path: Option<String>,
}

impl DraftAnswer {
    /// Blank comments and evidence paths collapse to `None`.
    pub fn new(
        item_id: ItemId,
        done: bool,
        comment: Option<String>,
        evidence_path: Option<String>,
    ) -> Self {
        Self {
            item_id,
            done,
            comment: non_blank(comment),
            evidence_path: non_blank(evidence_path),
        }
    }

    pub fn empty(item_id: ItemId) -> Self {
        Self {
            item_id,
            done: false,
            comment: None,
            evidence_path: None,
        }
    }

    pub fn evidence(&self) -> Option<&str> {
        self.evidence_path
            .as_deref()
            .map(str::trim)
            .filter(|path| !path.is_empty())
    }

    pub fn has_evidence(&self) -> bool {
        self.evidence().is_some()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}
