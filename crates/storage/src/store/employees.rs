#![forbid(unsafe_code)]

use super::support::{EMPLOYEE_COLUMNS, EmployeeRow};
use super::{SqliteStore, StoreError};
use ck_core::{Employee, EmployeeId, EmployeeName, RoleLabel};
use rusqlite::{Connection, ErrorCode, OptionalExtension, params};

impl SqliteStore {
    /// Exact name, case-insensitive role.
    pub fn find_employee(
        &self,
        name: &EmployeeName,
        role: &RoleLabel,
    ) -> Result<Option<Employee>, StoreError> {
        find_employee_tx(&self.conn, name, role)
    }

    pub fn employee(&self, employee_id: EmployeeId) -> Result<Option<Employee>, StoreError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = ?1"),
                params![employee_id.get()],
                EmployeeRow::read,
            )
            .optional()?;
        row.map(EmployeeRow::into_employee).transpose()
    }

    pub fn insert_employee(
        &mut self,
        name: &EmployeeName,
        role: &RoleLabel,
    ) -> Result<Employee, StoreError> {
        let id = insert_employee_tx(&self.conn, name, role)?;
        Ok(Employee {
            id,
            name: name.clone(),
            role: role.clone(),
        })
    }
}

pub(super) fn find_employee_tx(
    conn: &Connection,
    name: &EmployeeName,
    role: &RoleLabel,
) -> Result<Option<Employee>, StoreError> {
    let row = conn
        .query_row(
            &format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE name = ?1 AND role_key = ?2"),
            params![name.as_str(), role.key()],
            EmployeeRow::read,
        )
        .optional()?;
    row.map(EmployeeRow::into_employee).transpose()
}

pub(super) fn insert_employee_tx(
    conn: &Connection,
    name: &EmployeeName,
    role: &RoleLabel,
) -> Result<EmployeeId, StoreError> {
    let insert = conn.execute(
        "INSERT INTO employees(name, role, role_key) VALUES (?1, ?2, ?3)",
        params![name.as_str(), role.as_str(), role.key()],
    );
    match insert {
        Ok(_) => Ok(EmployeeId::new(conn.last_insert_rowid())),
        Err(rusqlite::Error::SqliteFailure(err, _)) if err.code == ErrorCode::ConstraintViolation => {
            Err(StoreError::InvalidInput("employee already exists for this role"))
        }
        Err(err) => Err(StoreError::Sql(err)),
    }
}
