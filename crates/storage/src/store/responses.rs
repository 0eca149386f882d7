#![forbid(unsafe_code)]

use super::catalog::item_role_key_tx;
use super::employees::find_employee_tx;
use super::support::{RESPONSE_COLUMNS, ResponseRow};
use super::{SaveResponsesRequest, SaveResponsesResult, SqliteStore, StoreError};
use ck_core::{ChecklistResponse, Day, EmployeeId};
use rusqlite::{OptionalExtension, params};

impl SqliteStore {
    /// Upserts a validated batch keyed on (item, employee, day).
    ///
    /// All-or-nothing: an unknown employee or an item outside the employee's role
    /// aborts the batch before anything is committed.
    pub fn save_responses(
        &mut self,
        request: SaveResponsesRequest,
    ) -> Result<SaveResponsesResult, StoreError> {
        let SaveResponsesRequest {
            employee_name,
            role,
            answers,
            submitted_at_ms,
            day,
        } = request;

        let day_key = day.as_key();
        let tx = self.conn.transaction()?;

        let Some(employee) = find_employee_tx(&tx, &employee_name, &role)? else {
            return Err(StoreError::EmployeeNotFound {
                name: employee_name.as_str().to_string(),
                role: role.as_str().to_string(),
            });
        };

        let mut result = SaveResponsesResult {
            employee_id: Some(employee.id),
            ..SaveResponsesResult::default()
        };

        for answer in &answers {
            match item_role_key_tx(&tx, answer.item_id)? {
                Some(key) if key == role.key() => {}
                _ => {
                    return Err(StoreError::UnknownItem {
                        item_id: answer.item_id.get(),
                        role: role.as_str().to_string(),
                    });
                }
            }

            let existing = tx
                .query_row(
                    "SELECT id FROM checklist_responses \
                     WHERE item_id = ?1 AND employee_id = ?2 AND submitted_day = ?3",
                    params![answer.item_id.get(), employee.id.get(), &day_key],
                    |row| row.get::<_, i64>(0),
                )
                .optional()?;

            match existing {
                Some(response_id) => {
                    tx.execute(
                        r#"
                        UPDATE checklist_responses
                        SET done = ?2,
                            comment = ?3,
                            evidence_path = ?4,
                            submitted_at_ms = ?5
                        WHERE id = ?1
                        "#,
                        params![
                            response_id,
                            answer.done,
                            answer.comment.as_deref(),
                            answer.evidence(),
                            submitted_at_ms,
                        ],
                    )?;
                    result.updated.push(answer.item_id);
                }
                None => {
                    tx.execute(
                        r#"
                        INSERT INTO checklist_responses(
                          item_id, employee_id, done, comment, evidence_path, submitted_at_ms, submitted_day
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                        "#,
                        params![
                            answer.item_id.get(),
                            employee.id.get(),
                            answer.done,
                            answer.comment.as_deref(),
                            answer.evidence(),
                            submitted_at_ms,
                            &day_key,
                        ],
                    )?;
                    result.inserted.push(answer.item_id);
                }
            }
        }

        tx.commit()?;
        tracing::info!(
            employee = %employee.name,
            role = %role,
            day = %day_key,
            inserted = result.inserted.len(),
            updated = result.updated.len(),
            "checklist responses saved"
        );
        Ok(result)
    }

    /// Rows the employee saved on `day`, ordered by item.
    pub fn responses_for_day(
        &self,
        employee_id: EmployeeId,
        day: Day,
    ) -> Result<Vec<ChecklistResponse>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {RESPONSE_COLUMNS} FROM checklist_responses \
             WHERE employee_id = ?1 AND submitted_day = ?2 \
             ORDER BY item_id ASC"
        ))?;
        let rows = stmt
            .query_map(params![employee_id.get(), day.as_key()], ResponseRow::read)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(ResponseRow::into_response).collect()
    }

    pub fn response_count(&self) -> Result<u64, StoreError> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM checklist_responses",
            [],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(u64::try_from(count).unwrap_or(0))
    }
}
