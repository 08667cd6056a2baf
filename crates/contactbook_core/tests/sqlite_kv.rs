use contactbook_core::{
    ContactStore, KeyValueStore, LoadOutcome, SqliteKeyValueStore, CONTACTS_KEY,
};

#[test]
fn set_get_remove_roundtrip() {
    let mut kv = SqliteKeyValueStore::open_in_memory().unwrap();
    assert_eq!(kv.get_item("contacts").unwrap(), None);

    kv.set_item("contacts", "[]").unwrap();
    assert_eq!(kv.get_item("contacts").unwrap().as_deref(), Some("[]"));

    kv.remove_item("contacts").unwrap();
    assert_eq!(kv.get_item("contacts").unwrap(), None);
}

#[test]
fn set_item_overwrites_single_row() {
    let mut kv = SqliteKeyValueStore::open_in_memory().unwrap();
    kv.set_item("contacts", "first").unwrap();
    kv.set_item("contacts", "second").unwrap();

    let rows: i64 = kv
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
    assert_eq!(kv.get_item("contacts").unwrap().as_deref(), Some("second"));
}

#[test]
fn contacts_survive_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("contactbook.sqlite3");

    {
        let mut store = ContactStore::new(SqliteKeyValueStore::open(&path).unwrap());
        assert_eq!(store.load().unwrap(), LoadOutcome::Missing);
        store.add("Ann", "123", "a@x.com").unwrap();
        store.add("Bo", "456", "b@x.com").unwrap();
    }

    let mut reopened = ContactStore::new(SqliteKeyValueStore::open(&path).unwrap());
    assert_eq!(reopened.load().unwrap(), LoadOutcome::Restored { count: 2 });
    assert_eq!(reopened.contacts()[0].name, "Ann");
    assert_eq!(reopened.contacts()[1].name, "Bo");
}

#[test]
fn snapshot_is_stored_as_json_text() {
    let mut store = ContactStore::new(SqliteKeyValueStore::open_in_memory().unwrap());
    store.load().unwrap();
    store.add("Ann", "123", "a@x.com").unwrap();

    let raw = store.kv().get_item(CONTACTS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "name": "Ann", "number": "123", "email": "a@x.com" }])
    );
}
