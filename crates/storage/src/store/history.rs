#![forbid(unsafe_code)]

use super::support::{parse_day, to_sqlite_i64};
use super::{HistoryEntry, HistoryRequest, SqliteStore, StoreError};
use ck_core::day::ts_ms_to_rfc3339;
use ck_core::{Day, EmployeeId, ItemId};
use rusqlite::params;

impl SqliteStore {
    /// Days with at least one saved response, newest first.
    pub fn history_days(&self, employee_id: EmployeeId) -> Result<Vec<Day>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT submitted_day FROM checklist_responses \
             WHERE employee_id = ?1 \
             ORDER BY submitted_day DESC",
        )?;
        let rows = stmt
            .query_map(params![employee_id.get()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        rows.iter().map(|raw| parse_day(raw)).collect()
    }

    /// Saved responses joined with employee and item, newest first.
    pub fn history(&self, request: HistoryRequest) -> Result<Vec<HistoryEntry>, StoreError> {
        let limit = to_sqlite_i64(request.limit)?;
        let day_key = request.day.map(Day::as_key);

        let mut stmt = self.conn.prepare(
            r#"
            SELECT e.name, e.role, i.id, i.description, r.done, r.comment, r.evidence_path,
                   r.submitted_at_ms, r.submitted_day
            FROM checklist_responses r
            JOIN employees e ON e.id = r.employee_id
            JOIN checklist_items i ON i.id = r.item_id
            WHERE r.employee_id = ?1
              AND (?2 IS NULL OR r.submitted_day = ?2)
            ORDER BY r.submitted_at_ms DESC, r.id DESC
            LIMIT ?3
            "#,
        )?;

        let mut rows = stmt.query(params![request.employee_id.get(), day_key, limit])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let submitted_at_ms = row.get::<_, i64>(7)?;
            let raw_day = row.get::<_, String>(8)?;
            out.push(HistoryEntry {
                employee_name: row.get(0)?,
                role: row.get(1)?,
                item_id: ItemId::new(row.get(2)?),
                description: row.get(3)?,
                done: row.get(4)?,
                comment: row.get(5)?,
                evidence_path: row.get(6)?,
                submitted_at_ms,
                submitted_at: ts_ms_to_rfc3339(submitted_at_ms),
                day: parse_day(&raw_day)?,
            });
        }
        Ok(out)
    }

    /// Administrative reset: drops every response saved on `day`, for all employees.
    pub fn purge_day(&mut self, day: Day) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let deleted = tx.execute(
            "DELETE FROM checklist_responses WHERE submitted_day = ?1",
            params![day.as_key()],
        )?;
        tx.commit()?;
        tracing::warn!(day = %day, deleted, "purged checklist responses");
        Ok(deleted)
    }
}
