#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS checklist_items (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          role TEXT NOT NULL,
          role_key TEXT NOT NULL,
          description TEXT NOT NULL
        );

        -- One row per (item, employee, submitted_day); later saves that day update it.
        CREATE TABLE IF NOT EXISTS checklist_responses (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          item_id INTEGER NOT NULL REFERENCES checklist_items(id),
          employee_id INTEGER NOT NULL REFERENCES employees(id),
          done INTEGER NOT NULL,
          comment TEXT,
          evidence_path TEXT,
          submitted_at_ms INTEGER NOT NULL,
          submitted_day TEXT NOT NULL
        );
"#;
