#![forbid(unsafe_code)]

use ck_core::{EmployeeId, ItemId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaveResponsesResult {
    pub employee_id: Option<EmployeeId>,
    pub inserted: Vec<ItemId>,
    pub updated: Vec<ItemId>,
}

impl SaveResponsesResult {
    pub fn written(&self) -> usize {
        self.inserted.len() + self.updated.len()
    }
}
