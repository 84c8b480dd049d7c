// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable session file.

use akhmads_admin::error::SessionError;
use akhmads_admin::session::{keys, FileSessionStore, Session, SessionStore, TokenPair};
use std::sync::Arc;

fn tokens() -> TokenPair {
    TokenPair {
        access_token: "A1".to_string(),
        refresh_token: "R1".to_string(),
    }
}

#[test]
fn test_credentials_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("session.json");

    let session = Session::new(Arc::new(FileSessionStore::open(&path).unwrap()));
    session.store_tokens(&tokens());
    assert!(path.exists());

    let reopened = FileSessionStore::open(&path).unwrap();
    assert_eq!(reopened.get(keys::ACCESS_TOKEN).as_deref(), Some("A1"));
    assert_eq!(reopened.get(keys::REFRESH_TOKEN).as_deref(), Some("R1"));
}

#[test]
fn test_file_uses_fixed_slot_names() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileSessionStore::open(&path).unwrap();
    store.set(keys::ACCESS_TOKEN, "A1");
    store.set(keys::REFRESH_TOKEN, "R1");

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["accessToken"], "A1");
    assert_eq!(raw["refreshToken"], "R1");
    assert_eq!(raw.as_object().unwrap().len(), 2);
}

#[test]
fn test_expire_removes_session_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let session = Session::new(Arc::new(FileSessionStore::open(&path).unwrap()));
    session.store_tokens(&tokens());
    session.expire();

    assert!(!path.exists());
    assert_eq!(session.tokens(), None);

    let reopened = FileSessionStore::open(&path).unwrap();
    assert_eq!(reopened.get(keys::ACCESS_TOKEN), None);
}

#[test]
fn test_missing_or_empty_file_is_an_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileSessionStore::open(&path).unwrap();
    assert_eq!(store.get(keys::ACCESS_TOKEN), None);

    std::fs::write(&path, "  \n").unwrap();
    let store = FileSessionStore::open(&path).unwrap();
    assert_eq!(store.get(keys::REFRESH_TOKEN), None);
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, "{not json").unwrap();

    let err = FileSessionStore::open(&path).err().expect("Corrupt file should fail");
    assert!(matches!(err, SessionError::Corrupt(_)));
}

#[test]
fn test_stores_sharing_a_file_see_each_others_writes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let first = FileSessionStore::open(&path).unwrap();
    first.set(keys::REFRESH_TOKEN, "R1");
    let second = FileSessionStore::open(&path).unwrap();

    // Rotation through one store is what the other reads next
    first.set(keys::REFRESH_TOKEN, "R2");
    assert_eq!(second.get(keys::REFRESH_TOKEN).as_deref(), Some("R2"));

    // A write through the other keeps the rotated slot
    second.set(keys::ACCESS_TOKEN, "A2");
    assert_eq!(first.get(keys::ACCESS_TOKEN).as_deref(), Some("A2"));
    assert_eq!(first.get(keys::REFRESH_TOKEN).as_deref(), Some("R2"));

    // Logout through one store logs the other out
    Session::new(Arc::new(first)).clear();
    assert_eq!(second.get(keys::ACCESS_TOKEN), None);
    assert!(!path.exists());
}

#[test]
fn test_token_pair_lands_in_one_file_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let store = FileSessionStore::open(&path).unwrap();
    store.set_many(&[(keys::ACCESS_TOKEN, "A2"), (keys::REFRESH_TOKEN, "R2")]);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw, serde_json::json!({ "accessToken": "A2", "refreshToken": "R2" }));

    // No temp file left behind
    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(leftovers, vec![std::ffi::OsString::from("session.json")]);
}

#[test]
fn test_failed_write_keeps_previous_pair() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let session = Session::new(Arc::new(FileSessionStore::open(&path).unwrap()));
    session.store_tokens(&tokens());

    // A directory squatting on the temp name makes the next write fail
    let tmp = path.with_extension(format!("json.{}.tmp", std::process::id()));
    std::fs::create_dir(&tmp).unwrap();
    session.store_tokens(&TokenPair {
        access_token: "A2".to_string(),
        refresh_token: "R2".to_string(),
    });

    assert_eq!(session.tokens(), Some(tokens()));
}
