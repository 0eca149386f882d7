#![forbid(unsafe_code)]

use crate::ids::ItemId;
use crate::model::DraftAnswer;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Consistent entries are saved on their own; inconsistent ones are rejected one by one.
    #[default]
    PartialAllowed,
    /// The whole batch must be done with evidence or nothing is saved.
    StrictAll,
}

impl ValidationMode {
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value?.trim().to_ascii_lowercase().as_str() {
            "partial" | "partial_allowed" | "partial-allowed" => Some(Self::PartialAllowed),
            "strict" | "strict_all" | "strict-all" => Some(Self::StrictAll),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PartialAllowed => "partial_allowed",
            Self::StrictAll => "strict_all",
        }
    }
}

/// How StrictAll reports failures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorDetail {
    #[default]
    Aggregate,
    PerItem,
}

impl ErrorDetail {
    pub fn parse(value: Option<&str>) -> Option<Self> {
        match value?.trim().to_ascii_lowercase().as_str() {
            "aggregate" | "single" => Some(Self::Aggregate),
            "per_item" | "per-item" | "detailed" => Some(Self::PerItem),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aggregate => "aggregate",
            Self::PerItem => "per_item",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Marked done without a resolvable evidence file.
    MissingEvidence,
    /// Evidence attached to an item that is not marked done.
    EvidenceWithoutDone,
    /// StrictAll: item left incomplete.
    NotCompleted,
    /// StrictAll aggregate report.
    AllItemsRequired,
    UnknownItem,
    /// Upload rejected before it reached the evidence store (empty file, wrong type).
    InvalidUpload,
    NothingToSave,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub item_id: Option<ItemId>,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn for_item(item_id: ItemId, kind: ViolationKind) -> Self {
        Self {
            item_id: Some(item_id),
            kind,
        }
    }

    pub fn batch(kind: ViolationKind) -> Self {
        Self {
            item_id: None,
            kind,
        }
    }

    pub fn message(&self) -> String {
        let text = match self.kind {
            ViolationKind::MissingEvidence => "item is marked done but has no evidence image",
            ViolationKind::EvidenceWithoutDone => "item has an evidence image but is not marked done",
            ViolationKind::NotCompleted => "item must be completed with evidence",
            ViolationKind::AllItemsRequired => "all items must be completed with evidence",
            ViolationKind::UnknownItem => "item does not belong to this checklist",
            ViolationKind::InvalidUpload => "evidence must be a non-empty jpg, jpeg or png image",
            ViolationKind::NothingToSave => "no item marked as done with an evidence image",
        };
        match self.item_id {
            Some(item_id) => format!("item {item_id}: {text}"),
            None => text.to_string(),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub accepted: Vec<DraftAnswer>,
    /// Not done and no evidence: left out of the save without complaint.
    pub skipped: Vec<ItemId>,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub mode: ValidationMode,
    pub detail: ErrorDetail,
}

impl ValidationPolicy {
    pub fn new(mode: ValidationMode, detail: ErrorDetail) -> Self {
        Self { mode, detail }
    }

    /// `evidence_exists` resolves an evidence path against the evidence store.
    pub fn validate(
        &self,
        batch: &[DraftAnswer],
        evidence_exists: impl Fn(&str) -> bool,
    ) -> ValidationReport {
        match self.mode {
            ValidationMode::PartialAllowed => validate_partial(batch, evidence_exists),
            ValidationMode::StrictAll => validate_strict(batch, evidence_exists, self.detail),
        }
    }
}

fn validate_partial(
    batch: &[DraftAnswer],
    evidence_exists: impl Fn(&str) -> bool,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    for answer in batch {
        let evidence = answer.evidence();
        match (answer.done, evidence) {
            (true, Some(path)) if evidence_exists(path) => report.accepted.push(answer.clone()),
            (true, _) => report.violations.push(Violation::for_item(
                answer.item_id,
                ViolationKind::MissingEvidence,
            )),
            (false, Some(_)) => report.violations.push(Violation::for_item(
                answer.item_id,
                ViolationKind::EvidenceWithoutDone,
            )),
            (false, None) => report.skipped.push(answer.item_id),
        }
    }
    report
}

fn validate_strict(
    batch: &[DraftAnswer],
    evidence_exists: impl Fn(&str) -> bool,
    detail: ErrorDetail,
) -> ValidationReport {
    let mut failures = Vec::new();
    for answer in batch {
        let resolvable = answer.evidence().is_some_and(&evidence_exists);
        if !answer.done {
            failures.push(Violation::for_item(answer.item_id, ViolationKind::NotCompleted));
        } else if !resolvable {
            failures.push(Violation::for_item(
                answer.item_id,
                ViolationKind::MissingEvidence,
            ));
        }
    }

    if failures.is_empty() {
        return ValidationReport {
            accepted: batch.to_vec(),
            skipped: Vec::new(),
            violations: Vec::new(),
        };
    }

    let violations = match detail {
        ErrorDetail::Aggregate => vec![Violation::batch(ViolationKind::AllItemsRequired)],
        ErrorDetail::PerItem => failures,
    };
    ValidationReport {
        accepted: Vec::new(),
        skipped: Vec::new(),
        violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(id: i64, done: bool, evidence: Option<&str>) -> DraftAnswer {
        DraftAnswer::new(ItemId::new(id), done, None, evidence.map(str::to_string))
    }

    fn on_disk(path: &str) -> bool {
        path.starts_with("/ev/")
    }

    #[test]
    fn partial_accepts_skips_and_rejects() {
        let batch = vec![
            answer(1, true, Some("/ev/1.png")),
            answer(2, false, None),
            answer(3, true, None),
        ];

        let report = ValidationPolicy::default().validate(&batch, on_disk);

        assert_eq!(report.accepted, vec![batch[0].clone()]);
        assert_eq!(report.skipped, vec![ItemId::new(2)]);
        assert_eq!(
            report.violations(),
            &[Violation::for_item(
                ItemId::new(3),
                ViolationKind::MissingEvidence
            )]
        );
    }

    #[test]
    fn partial_rejects_evidence_on_unchecked_item() {
        let batch = vec![answer(4, false, Some("/ev/4.png"))];
        let report = ValidationPolicy::default().validate(&batch, on_disk);
        assert!(report.accepted.is_empty());
        assert_eq!(report.violations[0].kind, ViolationKind::EvidenceWithoutDone);
    }

    #[test]
    fn partial_rejects_unresolvable_evidence() {
        let batch = vec![answer(5, true, Some("/gone/5.png"))];
        let report = ValidationPolicy::default().validate(&batch, on_disk);
        assert_eq!(report.violations[0].kind, ViolationKind::MissingEvidence);
    }

    #[test]
    fn strict_aggregate_reports_one_message_and_accepts_nothing() {
        let batch = vec![
            answer(1, true, Some("/ev/1.png")),
            answer(2, false, None),
            answer(3, true, None),
        ];
        let policy = ValidationPolicy::new(ValidationMode::StrictAll, ErrorDetail::Aggregate);

        let report = policy.validate(&batch, on_disk);

        assert!(report.accepted.is_empty());
        assert_eq!(report.violations.len(), 1);
        assert_eq!(
            report.violations[0].message(),
            "all items must be completed with evidence"
        );
    }

    #[test]
    fn strict_per_item_lists_each_failure() {
        let batch = vec![
            answer(1, true, Some("/ev/1.png")),
            answer(2, false, None),
            answer(3, true, None),
        ];
        let policy = ValidationPolicy::new(ValidationMode::StrictAll, ErrorDetail::PerItem);

        let report = policy.validate(&batch, on_disk);

        let kinds: Vec<_> = report.violations.iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::NotCompleted, ViolationKind::MissingEvidence]
        );
    }

    #[test]
    fn strict_accepts_complete_batch() {
        let batch = vec![answer(1, true, Some("/ev/1.png")), answer(2, true, Some("/ev/2.png"))];
        let policy = ValidationPolicy::new(ValidationMode::StrictAll, ErrorDetail::Aggregate);
        let report = policy.validate(&batch, on_disk);
        assert!(report.is_clean());
        assert_eq!(report.accepted.len(), 2);
    }

    #[test]
    fn mode_and_detail_parse_config_values() {
        assert_eq!(
            ValidationMode::parse(Some("Strict")),
            Some(ValidationMode::StrictAll)
        );
        assert_eq!(
            ValidationMode::parse(Some("partial_allowed")),
            Some(ValidationMode::PartialAllowed)
        );
        assert_eq!(ValidationMode::parse(Some("other")), None);
        assert_eq!(ErrorDetail::parse(Some("detailed")), Some(ErrorDetail::PerItem));
        assert_eq!(ErrorDetail::parse(None), None);
    }
}
