#![forbid(unsafe_code)]

//! Typed mapping between SQLite rows and domain records.

use super::super::StoreError;
use ck_core::{
    ChecklistItem, ChecklistResponse, Day, Employee, EmployeeId, EmployeeName, ItemId, ResponseId,
    RoleLabel,
};
use rusqlite::Row;

pub(in crate::store) const EMPLOYEE_COLUMNS: &str = "id, name, role";
pub(in crate::store) const ITEM_COLUMNS: &str = "id, role, description";
pub(in crate::store) const RESPONSE_COLUMNS: &str =
    "id, item_id, employee_id, done, comment, evidence_path, submitted_at_ms, submitted_day";

pub(in crate::store) struct EmployeeRow {
    id: i64,
    name: String,
    role: String,
}

impl EmployeeRow {
    pub(in crate::store) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            role: row.get(2)?,
        })
    }

    pub(in crate::store) fn into_employee(self) -> Result<Employee, StoreError> {
        Ok(Employee {
            id: EmployeeId::new(self.id),
            name: EmployeeName::try_new(self.name)
                .map_err(|_| StoreError::InvalidInput("invalid employee row"))?,
            role: RoleLabel::try_new(self.role)
                .map_err(|_| StoreError::InvalidInput("invalid employee row"))?,
        })
    }
}

pub(in crate::store) struct ItemRow {
    id: i64,
    role: String,
    description: String,
}

impl ItemRow {
    pub(in crate::store) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            role: row.get(1)?,
            description: row.get(2)?,
        })
    }

    pub(in crate::store) fn into_item(self) -> Result<ChecklistItem, StoreError> {
        Ok(ChecklistItem {
            id: ItemId::new(self.id),
            role: RoleLabel::try_new(self.role)
                .map_err(|_| StoreError::InvalidInput("invalid checklist item row"))?,
            description: self.description,
        })
    }
}

pub(in crate::store) struct ResponseRow {
    id: i64,
    item_id: i64,
    employee_id: i64,
    done: bool,
    comment: Option<String>,
    evidence_path: Option<String>,
    submitted_at_ms: i64,
    submitted_day: String,
}

impl ResponseRow {
    pub(in crate::store) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            item_id: row.get(1)?,
            employee_id: row.get(2)?,
            done: row.get(3)?,
            comment: row.get(4)?,
            evidence_path: row.get(5)?,
            submitted_at_ms: row.get(6)?,
            submitted_day: row.get(7)?,
        })
    }

    pub(in crate::store) fn into_response(self) -> Result<ChecklistResponse, StoreError> {
        Ok(ChecklistResponse {
            id: ResponseId::new(self.id),
            item_id: ItemId::new(self.item_id),
            employee_id: EmployeeId::new(self.employee_id),
            done: self.done,
            comment: self.comment,
            evidence_path: self.evidence_path,
            submitted_at_ms: self.submitted_at_ms,
            day: parse_day(&self.submitted_day)?,
        })
    }
}

pub(in crate::store) fn parse_day(raw: &str) -> Result<Day, StoreError> {
    Day::parse_key(raw).map_err(|_| StoreError::InvalidInput("invalid submitted_day"))
}

pub(in crate::store) fn to_sqlite_i64(value: usize) -> Result<i64, StoreError> {
    i64::try_from(value).map_err(|_| StoreError::InvalidInput("value exceeds sqlite range"))
}
