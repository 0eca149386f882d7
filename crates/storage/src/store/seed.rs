#![forbid(unsafe_code)]

use super::catalog::insert_item_tx;
use super::employees::insert_employee_tx;
use super::{CatalogSeed, SeedOutcome, SqliteStore, StoreError};
use ck_core::{EmployeeName, RoleLabel};
use rusqlite::Connection;
use std::path::Path;

const DEFAULT_SEED_JSON: &str = include_str!("../../seed/default_catalog.json");

pub fn load_catalog_seed(path: impl AsRef<Path>) -> Result<CatalogSeed, StoreError> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn default_catalog_seed() -> Result<CatalogSeed, StoreError> {
    Ok(serde_json::from_str(DEFAULT_SEED_JSON)?)
}

impl SqliteStore {
    pub fn seed_defaults(&mut self) -> Result<SeedOutcome, StoreError> {
        let seed = default_catalog_seed()?;
        self.seed_catalog(&seed)
    }

    /// Each table is filled only while it is still empty, so reseeding is a no-op.
    pub fn seed_catalog(&mut self, seed: &CatalogSeed) -> Result<SeedOutcome, StoreError> {
        let tx = self.conn.transaction()?;
        let mut outcome = SeedOutcome::default();

        if table_is_empty(&tx, "employees")? {
            for employee in &seed.employees {
                let name = EmployeeName::try_new(employee.name.as_str())
                    .map_err(|_| StoreError::InvalidInput("invalid seed employee name"))?;
                let role = RoleLabel::try_new(employee.role.as_str())
                    .map_err(|_| StoreError::InvalidInput("invalid seed employee role"))?;
                insert_employee_tx(&tx, &name, &role)?;
                outcome.employees_inserted += 1;
            }
        }

        if table_is_empty(&tx, "checklist_items")? {
            for (role, descriptions) in &seed.items {
                let role = RoleLabel::try_new(role.as_str())
                    .map_err(|_| StoreError::InvalidInput("invalid seed item role"))?;
                for description in descriptions {
                    let description = description.trim();
                    if description.is_empty() {
                        return Err(StoreError::InvalidInput("seed item description is empty"));
                    }
                    insert_item_tx(&tx, &role, description)?;
                    outcome.items_inserted += 1;
                }
            }
        }

        tx.commit()?;
        if outcome != SeedOutcome::default() {
            tracing::info!(
                employees = outcome.employees_inserted,
                items = outcome.items_inserted,
                "checklist catalog seeded"
            );
        }
        Ok(outcome)
    }
}

fn table_is_empty(conn: &Connection, table: &'static str) -> Result<bool, StoreError> {
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get::<_, i64>(0)
    })?;
    Ok(count == 0)
}
