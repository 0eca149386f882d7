#![forbid(unsafe_code)]

mod checklist;
mod core;
mod indexes;

pub(super) fn full_schema_sql() -> String {
    let mut sql = String::new();
    sql.push_str(core::SQL);
    sql.push_str(checklist::SQL);
    sql.push_str(indexes::SQL);
    sql
}
