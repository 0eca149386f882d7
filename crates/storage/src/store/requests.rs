#![forbid(unsafe_code)]

use ck_core::{Day, DraftAnswer, Employee, EmployeeId, EmployeeName, ItemId, RoleLabel};

/// One save batch. Every answer must already have passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveResponsesRequest {
    pub employee_name: EmployeeName,
    pub role: RoleLabel,
    pub answers: Vec<DraftAnswer>,
    pub submitted_at_ms: i64,
    pub day: Day,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRequest {
    pub employee_id: EmployeeId,
    /// `None` lists every day.
    pub day: Option<Day>,
    pub limit: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreEvidenceRequest<'a> {
    pub employee: &'a Employee,
    pub day: Day,
    pub item_id: ItemId,
    pub bytes: &'a [u8],
    /// File extension of the upload, with or without the leading dot.
    pub extension: &'a str,
}
