#![forbid(unsafe_code)]

use super::support::{ITEM_COLUMNS, ItemRow};
use super::{SqliteStore, StoreError};
use ck_core::{ChecklistItem, ItemId, RoleLabel};
use rusqlite::{Connection, OptionalExtension, params};

impl SqliteStore {
    /// Catalog of one role, in insertion order. An unknown role yields an empty list.
    pub fn items_for_role(&self, role: &RoleLabel) -> Result<Vec<ChecklistItem>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM checklist_items WHERE role_key = ?1 ORDER BY id ASC"
        ))?;
        let rows = stmt
            .query_map(params![role.key()], ItemRow::read)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(ItemRow::into_item).collect()
    }

    pub fn item(&self, item_id: ItemId) -> Result<Option<ChecklistItem>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM checklist_items WHERE id = ?1"),
                params![item_id.get()],
                ItemRow::read,
            )
            .optional()?;
        row.map(ItemRow::into_item).transpose()
    }

    pub fn insert_item(
        &mut self,
        role: &RoleLabel,
        description: &str,
    ) -> Result<ChecklistItem, StoreError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(StoreError::InvalidInput("item description must not be empty"));
        }
        let id = insert_item_tx(&self.conn, role, description)?;
        Ok(ChecklistItem {
            id,
            role: role.clone(),
            description: description.to_string(),
        })
    }
}

pub(super) fn insert_item_tx(
    conn: &Connection,
    role: &RoleLabel,
    description: &str,
) -> Result<ItemId, StoreError> {
    conn.execute(
        "INSERT INTO checklist_items(role, role_key, description) VALUES (?1, ?2, ?3)",
        params![role.as_str(), role.key(), description],
    )?;
    Ok(ItemId::new(conn.last_insert_rowid()))
}

pub(super) fn item_role_key_tx(
    conn: &Connection,
    item_id: ItemId,
) -> Result<Option<String>, StoreError> {
    Ok(conn
        .query_row(
            "SELECT role_key FROM checklist_items WHERE id = ?1",
            params![item_id.get()],
            |row| row.get::<_, String>(0),
        )
        .optional()?)
}
