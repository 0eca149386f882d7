#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reference data loaded into an empty store.
///
/// `items` maps a role label to its checklist descriptions, in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub employees: Vec<EmployeeSeed>,
    #[serde(default)]
    pub items: BTreeMap<String, Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSeed {
    pub name: String,
    pub role: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub employees_inserted: usize,
    pub items_inserted: usize,
}
