#![forbid(unsafe_code)]

use super::{SqliteStore, StoreError};
use ck_core::{CompletionCounts, Day, EmployeeId, RoleLabel};
use rusqlite::params;

impl SqliteStore {
    /// Counted from rows on every call; a new day starts from zero without any reset.
    pub fn completion_counts(
        &self,
        employee_id: EmployeeId,
        role: &RoleLabel,
        day: Day,
    ) -> Result<CompletionCounts, StoreError> {
        let total = self.conn.query_row(
            "SELECT COUNT(DISTINCT id) FROM checklist_items WHERE role_key = ?1",
            params![role.key()],
            |row| row.get::<_, i64>(0),
        )?;

        let done = self.conn.query_row(
            r#"
            SELECT COUNT(DISTINCT r.item_id)
            FROM checklist_responses r
            JOIN checklist_items i ON i.id = r.item_id
            WHERE r.employee_id = ?1
              AND i.role_key = ?2
              AND r.submitted_day = ?3
              AND r.done = 1
            "#,
            params![employee_id.get(), role.key(), day.as_key()],
            |row| row.get::<_, i64>(0),
        )?;

        Ok(CompletionCounts {
            total: u64::try_from(total).unwrap_or(0),
            done: u64::try_from(done).unwrap_or(0),
        })
    }

    pub fn already_completed_today(
        &self,
        employee_id: EmployeeId,
        role: &RoleLabel,
        day: Day,
    ) -> Result<bool, StoreError> {
        Ok(self.completion_counts(employee_id, role, day)?.is_complete())
    }
}
