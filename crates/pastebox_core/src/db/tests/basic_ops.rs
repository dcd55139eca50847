//! Basic single-file paste tests.

use super::*;

#[test]
fn reopening_database_preserves_rows() {
    let (db, temp) = setup_temp_db();
    let id = db
        .pastes
        .create_single("T", "hello", "plaintext")
        .expect("create");
    drop(db);

    let path = temp.path().join("db");
    let reopened = Database::new(path.to_str().expect("db path")).expect("reopen");
    assert_eq!(reopened.pastes.get(&id).expect("get").content, "hello");
}

#[test]
fn second_open_of_same_path_is_rejected() {
    let (db, temp) = setup_temp_db();
    let path = temp.path().join("db");
    let err = Database::new(path.to_str().expect("db path"))
        .err()
        .expect("second open must fail while the first handle is alive");
    assert!(err.is_storage(), "unexpected error: {}", err);
    drop(db);
}

#[test]
fn share_reuses_underlying_database() {
    let (db, _temp) = setup_temp_db();
    let shared = db.share().expect("share");
    assert!(Arc::ptr_eq(&db.db, &shared.db));

    let id = shared
        .pastes
        .create_single("T", "from shared", "plaintext")
        .expect("create");
    assert_eq!(db.pastes.get(&id).expect("get").content, "from shared");
}

#[test]
fn create_single_get_roundtrip() {
    let (db, _temp) = setup_temp_db();

    let id = db
        .pastes
        .create_single("T", "hello", "plaintext")
        .expect("create");
    assert!(crate::ids::is_valid_id(&id));

    let paste = db.pastes.get(&id).expect("get");
    assert_eq!(paste.id, id);
    assert_eq!(paste.title, "T");
    assert_eq!(paste.content, "hello");
    assert_eq!(paste.language, "plaintext");
    assert!(!paste.is_directory);
    assert!(db.pastes.list_files(&id).expect("list files").is_empty());
}

#[test]
fn create_single_normalizes_blank_language() {
    let (db, _temp) = setup_temp_db();
    let id = db.pastes.create_single("T", "x = 1", "  ").expect("create");
    assert_eq!(db.pastes.get(&id).expect("get").language, "plaintext");

    let id = db.pastes.create_single("T", "x = 1", "Python").expect("create");
    assert_eq!(db.pastes.get(&id).expect("get").language, "python");
}

#[test]
fn create_single_rejects_blank_content_and_persists_nothing() {
    let (db, _temp) = setup_temp_db();
    for content in ["", "   ", "\n\t"] {
        let err = db
            .pastes
            .create_single("T", content, "plaintext")
            .expect_err("blank content must be rejected");
        assert!(matches!(err, AppError::Validation(_)), "unexpected: {}", err);
    }
    assert_eq!(db.pastes.count().expect("count"), 0);
}

#[test]
fn get_unknown_id_is_not_found() {
    let (db, _temp) = setup_temp_db();
    assert!(matches!(db.pastes.get("deadbeef"), Err(AppError::NotFound)));
    assert!(db.pastes.find("deadbeef").expect("find").is_none());
}

#[test]
fn list_recent_returns_newest_first_and_respects_limit() {
    let (db, _temp) = setup_temp_db();
    let mut ids = Vec::new();
    for i in 0..12 {
        let id = db
            .pastes
            .create_single(&format!("paste {}", i), "body", "plaintext")
            .expect("create");
        ids.push(id);
        thread::sleep(std::time::Duration::from_millis(2));
    }

    let recent = db
        .pastes
        .list_recent(crate::DEFAULT_RECENT_LIMIT)
        .expect("list recent");
    assert_eq!(recent.len(), 10);
    let expected: Vec<&String> = ids.iter().rev().take(10).collect();
    let actual: Vec<&String> = recent.iter().map(|summary| &summary.id).collect();
    assert_eq!(actual, expected);
    assert!(recent
        .windows(2)
        .all(|pair| pair[0].created_at >= pair[1].created_at));

    assert!(db.pastes.list_recent(0).expect("list recent").is_empty());
}
