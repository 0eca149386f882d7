#![forbid(unsafe_code)]

use ck_core::{EmployeeName, RoleLabel};
use ck_storage::{CatalogSeed, EmployeeSeed, SqliteStore, StoreError, load_catalog_seed};
use std::path::PathBuf;

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

fn role(label: &str) -> RoleLabel {
    RoleLabel::try_new(label).expect("role")
}

#[test]
fn default_seed_is_applied_once() {
    let storage_dir = temp_dir("default_seed_is_applied_once");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");

    let first = store.seed_defaults().expect("seed");
    assert_eq!(first.employees_inserted, 2);
    assert_eq!(first.items_inserted, 10);

    let second = store.seed_defaults().expect("reseed");
    assert_eq!(second.employees_inserted, 0);
    assert_eq!(second.items_inserted, 0);

    drop(store);
    let mut reopened = SqliteStore::open(&storage_dir).expect("reopen store");
    let third = reopened.seed_defaults().expect("seed after reopen");
    assert_eq!(third.items_inserted, 0);
    assert_eq!(
        reopened
            .items_for_role(&role("Repositor"))
            .expect("items")
            .len(),
        5
    );
}

#[test]
fn items_for_role_ignores_case_and_keeps_order() {
    let storage_dir = temp_dir("items_for_role_ignores_case_and_keeps_order");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    store.seed_defaults().expect("seed");

    let items = store.items_for_role(&role("rEPOSITOR")).expect("items");
    assert_eq!(items.len(), 5);
    assert_eq!(
        items[0].description,
        "Verificar validade dos produtos nas prateleiras"
    );
    assert_eq!(items[4].description, "Organização do estoque de fundo");
    assert!(items.windows(2).all(|pair| pair[0].id < pair[1].id));
    assert!(items.iter().all(|item| item.role.as_str() == "Repositor"));

    let manager = store
        .items_for_role(&role("gerente de loja"))
        .expect("manager items");
    assert_eq!(manager.len(), 5);

    let fetched = store.item(items[2].id).expect("item").expect("present");
    assert_eq!(fetched, items[2]);
}

#[test]
fn unknown_role_has_an_empty_catalog() {
    let storage_dir = temp_dir("unknown_role_has_an_empty_catalog");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    store.seed_defaults().expect("seed");

    let items = store.items_for_role(&role("Caixa")).expect("items");
    assert!(items.is_empty());
}

#[test]
fn employees_match_exact_name_and_any_role_case() {
    let storage_dir = temp_dir("employees_match_exact_name_and_any_role_case");
    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    store.seed_defaults().expect("seed");

    let bob = EmployeeName::try_new("Bob").expect("name");
    let found = store
        .find_employee(&bob, &role("REPOSITOR"))
        .expect("lookup")
        .expect("bob exists");
    assert_eq!(found.role.as_str(), "Repositor");
    assert_eq!(
        store.employee(found.id).expect("by id"),
        Some(found.clone())
    );

    let lowercase = EmployeeName::try_new("bob").expect("name");
    assert!(
        store
            .find_employee(&lowercase, &role("Repositor"))
            .expect("lookup")
            .is_none()
    );
    assert!(
        store
            .find_employee(&bob, &role("Gerente de Loja"))
            .expect("lookup")
            .is_none()
    );

    let err = store
        .insert_employee(&bob, &role("repositor"))
        .expect_err("duplicate employee");
    assert!(matches!(err, StoreError::InvalidInput(_)), "got {err:?}");
}

#[test]
fn catalog_seed_loads_from_json_file() {
    let storage_dir = temp_dir("catalog_seed_loads_from_json_file");
    let seed_path = storage_dir.join("seed.json");
    std::fs::write(
        &seed_path,
        r#"{
            "employees": [{"name": "Carla", "role": "Caixa"}],
            "items": {"Caixa": ["Abrir o caixa", "Conferir troco"]}
        }"#,
    )
    .expect("write seed");

    let seed = load_catalog_seed(&seed_path).expect("load seed");
    assert_eq!(
        seed.employees,
        vec![EmployeeSeed {
            name: "Carla".to_string(),
            role: "Caixa".to_string(),
        }]
    );

    let mut store = SqliteStore::open(storage_dir.join("db")).expect("open store");
    let outcome = store.seed_catalog(&seed).expect("seed");
    assert_eq!(outcome.employees_inserted, 1);
    assert_eq!(outcome.items_inserted, 2);

    let items = store.items_for_role(&role("caixa")).expect("items");
    assert_eq!(items[0].description, "Abrir o caixa");
}

#[test]
fn broken_seed_files_are_errors() {
    let storage_dir = temp_dir("broken_seed_files_are_errors");

    let missing = load_catalog_seed(storage_dir.join("missing.json")).expect_err("missing file");
    assert!(matches!(missing, StoreError::Io(_)), "got {missing:?}");

    let bad_path = storage_dir.join("bad.json");
    std::fs::write(&bad_path, "{ not json").expect("write");
    let bad = load_catalog_seed(&bad_path).expect_err("malformed");
    assert!(matches!(bad, StoreError::Json(_)), "got {bad:?}");

    let mut store = SqliteStore::open(&storage_dir).expect("open store");
    let mut seed = CatalogSeed::default();
    seed.items.insert("Caixa".to_string(), vec!["  ".to_string()]);
    let err = store.seed_catalog(&seed).expect_err("blank description");
    assert!(matches!(err, StoreError::InvalidInput(_)), "got {err:?}");
    assert!(store.items_for_role(&role("Caixa")).expect("items").is_empty());
}

#[test]
fn items_added_later_join_the_role_catalog() {
    let mut store = SqliteStore::open(temp_dir("items_added_later_join_the_role_catalog"))
        .expect("open store");
    store.seed_defaults().expect("seed");

    let added = store
        .insert_item(&role("REPOSITOR"), "  Conferir data de recebimento  ")
        .expect("insert item");
    assert_eq!(added.description, "Conferir data de recebimento");

    let items = store.items_for_role(&role("Repositor")).expect("items");
    assert_eq!(items.len(), 6);
    assert_eq!(items.last().map(|item| item.id), Some(added.id));

    let err = store
        .insert_item(&role("Repositor"), "   ")
        .expect_err("blank description");
    assert!(matches!(err, StoreError::InvalidInput(_)), "got {err:?}");
}
