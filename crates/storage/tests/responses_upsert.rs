#![forbid(unsafe_code)]

use ck_core::day::timestamp_ms;
use ck_core::{ChecklistItem, Day, DraftAnswer, Employee, EmployeeName, RoleLabel};
use ck_storage::{SaveResponsesRequest, SqliteStore, StoreError};
use rusqlite::{Connection, params};
use std::path::PathBuf;
use time::OffsetDateTime;
use time::macros::datetime;

fn temp_dir(test_name: &str) -> PathBuf {
    let base = std::env::temp_dir();
    let pid = std::process::id();
    let nonce = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    let dir = base.join(format!("ck_storage_{test_name}_{pid}_{nonce}"));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn seeded(test_name: &str) -> (SqliteStore, Employee, Vec<ChecklistItem>) {
    let mut store = SqliteStore::open(temp_dir(test_name)).expect("open store");
    store.seed_defaults().expect("seed");
    let role = RoleLabel::try_new("Repositor").expect("role");
    let bob = store
        .find_employee(&EmployeeName::try_new("Bob").expect("name"), &role)
        .expect("lookup")
        .expect("bob");
    let items = store.items_for_role(&role).expect("items");
    (store, bob, items)
}

fn save(
    store: &mut SqliteStore,
    employee: &Employee,
    answers: Vec<DraftAnswer>,
    now: OffsetDateTime,
) -> Result<ck_storage::SaveResponsesResult, StoreError> {
    store.save_responses(SaveResponsesRequest {
        employee_name: employee.name.clone(),
        role: employee.role.clone(),
        answers,
        submitted_at_ms: timestamp_ms(now),
        day: Day::of(now),
    })
}

fn done(item: &ChecklistItem, comment: &str, evidence: &str) -> DraftAnswer {
    DraftAnswer::new(
        item.id,
        true,
        Some(comment.to_string()),
        Some(evidence.to_string()),
    )
}

#[test]
fn saving_the_same_key_twice_updates_in_place() {
    let (mut store, bob, items) = seeded("saving_the_same_key_twice_updates_in_place");
    let morning = datetime!(2026-10-19 09:00 UTC);
    let noon = datetime!(2026-10-19 12:00 UTC);

    let first = save(
        &mut store,
        &bob,
        vec![done(&items[0], "first", "/ev/a.png")],
        morning,
    )
    .expect("first save");
    assert_eq!(first.inserted, vec![items[0].id]);
    assert!(first.updated.is_empty());
    assert_eq!(first.employee_id, Some(bob.id));

    let second = save(
        &mut store,
        &bob,
        vec![done(&items[0], "second", "/ev/b.png")],
        noon,
    )
    .expect("second save");
    assert!(second.inserted.is_empty());
    assert_eq!(second.updated, vec![items[0].id]);

    let rows = store
        .responses_for_day(bob.id, Day::of(noon))
        .expect("rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].comment.as_deref(), Some("second"));
    assert_eq!(rows[0].evidence_path.as_deref(), Some("/ev/b.png"));
    assert_eq!(rows[0].submitted_at_ms, timestamp_ms(noon));
    assert_eq!(store.response_count().expect("count"), 1);
}

#[test]
fn a_new_day_creates_a_fresh_row() {
    let (mut store, bob, items) = seeded("a_new_day_creates_a_fresh_row");
    let day_one = datetime!(2026-10-19 09:00 UTC);
    let day_two = datetime!(2026-10-20 09:00 UTC);

    save(&mut store, &bob, vec![done(&items[0], "d1", "/ev/1.png")], day_one).expect("day one");
    save(&mut store, &bob, vec![done(&items[0], "d2", "/ev/2.png")], day_two).expect("day two");

    assert_eq!(store.response_count().expect("count"), 2);
    let first_day = store
        .responses_for_day(bob.id, Day::of(day_one))
        .expect("rows");
    assert_eq!(first_day[0].comment.as_deref(), Some("d1"));
}

#[test]
fn missing_employee_aborts_the_batch() {
    let (mut store, bob, items) = seeded("missing_employee_aborts_the_batch");
    let ghost = Employee {
        name: EmployeeName::try_new("Ghost").expect("name"),
        ..bob
    };

    let err = save(
        &mut store,
        &ghost,
        vec![done(&items[0], "x", "/ev/x.png")],
        datetime!(2026-10-19 09:00 UTC),
    )
    .expect_err("unknown employee");
    match err {
        StoreError::EmployeeNotFound { name, role } => {
            assert_eq!(name, "Ghost");
            assert_eq!(role, "Repositor");
        }
        other => panic!("expected EmployeeNotFound, got {other:?}"),
    }
    assert_eq!(store.response_count().expect("count"), 0);
}

#[test]
fn item_outside_the_role_rolls_back_the_whole_batch() {
    let (mut store, bob, items) = seeded("item_outside_the_role_rolls_back_the_whole_batch");
    let manager_items = store
        .items_for_role(&RoleLabel::try_new("Gerente de Loja").expect("role"))
        .expect("manager items");

    let err = save(
        &mut store,
        &bob,
        vec![
            done(&items[0], "ok", "/ev/ok.png"),
            done(&manager_items[0], "wrong role", "/ev/bad.png"),
        ],
        datetime!(2026-10-19 09:00 UTC),
    )
    .expect_err("foreign item");
    assert!(
        matches!(err, StoreError::UnknownItem { item_id, .. } if item_id == manager_items[0].id.get()),
        "got {err:?}"
    );
    assert_eq!(store.response_count().expect("count"), 0);
}

#[test]
fn the_day_key_is_unique_at_the_schema_level() {
    let storage_dir = temp_dir("the_day_key_is_unique_at_the_schema_level");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    store.seed_defaults().expect("seed");
    let role = RoleLabel::try_new("Repositor").expect("role");
    let bob = store
        .find_employee(&EmployeeName::try_new("Bob").expect("name"), &role)
        .expect("lookup")
        .expect("bob");
    let items = store.items_for_role(&role).expect("items");
    save(
        &mut store,
        &bob,
        vec![done(&items[0], "once", "/ev/a.png")],
        datetime!(2026-10-19 09:00 UTC),
    )
    .expect("save");
    drop(store);

    let conn = Connection::open(storage_dir.join("checklist.db")).expect("open raw db");
    let duplicate = conn.execute(
        "INSERT INTO checklist_responses(item_id, employee_id, done, comment, evidence_path, submitted_at_ms, submitted_day) \
         VALUES (?1, ?2, 1, NULL, '/ev/dup.png', 0, '2026-10-19')",
        params![items[0].id.get(), bob.id.get()],
    );
    assert!(duplicate.is_err(), "duplicate day key must be rejected");
}
