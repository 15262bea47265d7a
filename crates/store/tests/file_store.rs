//! File store engine behaviour: on-disk format, failure modes, write modes,
//! and the in-process writer lock.

use std::fs;
use std::sync::Arc;
use std::thread;

use anyhow::Result;

use recordkeep_core::Entity;
use recordkeep_parties::{Address, Customer};
use recordkeep_store::{
    FileStore, Persist, PersistError, RecordStore, StoreConfig, StoreError, WriteMode,
};

fn mesa() -> Address {
    Address::new("56 Main St", "Mesa", "AZ", "34454")
}

#[test]
fn missing_file_loads_as_empty_store() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::open(dir.path().join("absent.json"));

    assert!(store.load_all()?.is_empty());
    assert!(!store.path().exists());
    Ok(())
}

#[test]
fn store_file_tags_every_record_with_its_kind() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::open(dir.path().join("records.json"));

    let mut customer = Customer::new("Bob", "Jones", mesa());
    customer.save(&store)?;
    let id = customer.id().expect("saved").to_string();

    let document: serde_json::Value = serde_json::from_slice(&fs::read(store.path())?)?;
    assert_eq!(document["format_version"], 1);
    assert!(document["saved_at"].is_string());
    assert_eq!(document["records"][&id]["kind"], "customer");
    assert_eq!(document["records"][&id]["payload"]["first_name"], "Bob");
    assert_eq!(
        document["records"][&id]["payload"]["address"]["city"],
        "Mesa"
    );
    Ok(())
}

#[test]
fn corrupt_file_is_fatal_for_every_operation() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::open(dir.path().join("records.json"));
    fs::write(store.path(), b"{ this is not json")?;

    assert!(matches!(store.load_all(), Err(StoreError::Corrupt { .. })));

    let err = mesa().save(&store).expect_err("save over corrupt file");
    assert!(matches!(err, PersistError::Store(StoreError::Corrupt { .. })));

    let err = Address::find(&store, recordkeep_core::EntityId::generate())
        .expect_err("find over corrupt file");
    assert!(matches!(err, PersistError::Store(StoreError::Corrupt { .. })));

    // Nothing was rewritten.
    assert_eq!(fs::read(store.path())?, b"{ this is not json");
    Ok(())
}

#[test]
fn truncated_file_is_reported_as_corrupt() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::open(dir.path().join("records.json"));
    fs::write(store.path(), b"")?;

    assert!(matches!(store.load_all(), Err(StoreError::Corrupt { .. })));
    Ok(())
}

#[test]
fn unreadable_store_fails_save_without_assigning_identifier() -> Result<()> {
    let dir = tempfile::tempdir()?;
    // The "file" is a directory, so reads fail with an IO error.
    let store = FileStore::open(dir.path());

    let mut address = mesa();
    let err = address.save(&store).expect_err("cannot use a directory as store");
    assert!(matches!(err, PersistError::Store(StoreError::Io { .. })));
    assert!(address.is_unsaved());
    Ok(())
}

#[test]
fn save_creates_missing_parent_directories() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = FileStore::open(dir.path().join("nested/deeper/records.json"));

    mesa().save(&store)?;
    assert!(store.path().is_file());
    Ok(())
}

#[test]
fn atomic_mode_replaces_file_without_leaving_temp_files() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("records.json");
    let store = FileStore::new(StoreConfig::new(&path).with_write_mode(WriteMode::Atomic));

    let mut address = mesa();
    address.save(&store)?;
    address.save(&store)?;

    assert!(path.is_file());
    assert!(!dir.path().join("records.json.tmp").exists());
    assert_eq!(Address::find(&store, address.identity())?, Some(address));
    Ok(())
}

/// Concurrent savers in one process go through the writer lock, so no
/// load-modify-save cycle overwrites another's insert.
#[test]
fn concurrent_saves_through_one_handle_lose_no_updates() -> Result<()> {
    const WRITERS: usize = 8;
    const SAVES_PER_WRITER: usize = 5;

    let dir = tempfile::tempdir()?;
    let store = Arc::new(FileStore::open(dir.path().join("records.json")));

    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let store = Arc::clone(&store);
            thread::spawn(move || -> Result<(), PersistError> {
                for n in 0..SAVES_PER_WRITER {
                    let mut address = Address::new(format!("{w}-{n} Main St"), "Mesa", "AZ", "34454");
                    address.save(&store)?;
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked")?;
    }

    let records = store.load_all()?;
    assert_eq!(records.len(), WRITERS * SAVES_PER_WRITER);
    assert_eq!(records.count_kind::<Address>(), WRITERS * SAVES_PER_WRITER);
    Ok(())
}
