#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE UNIQUE INDEX IF NOT EXISTS idx_employees_name_role
          ON employees(name, role_key);

        CREATE INDEX IF NOT EXISTS idx_checklist_items_role
          ON checklist_items(role_key, id);

        CREATE UNIQUE INDEX IF NOT EXISTS idx_checklist_responses_day_key
          ON checklist_responses(item_id, employee_id, submitted_day);

        CREATE INDEX IF NOT EXISTS idx_checklist_responses_employee_day
          ON checklist_responses(employee_id, submitted_day);
"#;
