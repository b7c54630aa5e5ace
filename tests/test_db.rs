//! Store handle and settings integration tests

use aa_questions::app::{Question, User};
use aa_questions::infra::db::{init_test_db, SCHEMA_SQL};
use aa_questions::infra::{get_connection, init_db, open_db, DbConfig, DbPool};
use std::sync::Arc;

// ──────────────────────── Helper ────────────────────────

fn apply_schema(pool: &DbPool) {
    get_connection(pool).unwrap().execute_batch(SCHEMA_SQL).unwrap();
}

// ══════════════════════════════════════════════════════════
//  on-disk store
// ══════════════════════════════════════════════════════════

#[test]
fn open_creates_parent_dir_and_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("questions.db");

    let id = {
        let pool = init_db(&path).unwrap();
        apply_schema(&pool);
        User::new("Ada", "Lovelace").create(&pool).unwrap()
    };
    assert!(path.exists());

    let pool = init_db(&path).unwrap();
    let user = User::find_by_id(&pool, id).unwrap().unwrap();
    assert_eq!(user.fname, "Ada");
}

#[test]
fn foreign_keys_enforced_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig {
        path: dir.path().join("fk.db"),
        enforce_foreign_keys: true,
    };
    let pool = open_db(&config).unwrap();
    apply_schema(&pool);

    let mut orphan = Question::new(999, "Orphan", "no author");
    let err = orphan.create(&pool).unwrap_err();
    assert_eq!(err.code(), "DB_ERROR");
    assert!(orphan.id().is_none());
}

#[test]
fn foreign_keys_off_when_not_configured() {
    let dir = tempfile::tempdir().unwrap();
    let config = DbConfig {
        path: dir.path().join("no-fk.db"),
        enforce_foreign_keys: false,
    };
    let pool = open_db(&config).unwrap();
    apply_schema(&pool);

    let on: bool = get_connection(&pool)
        .unwrap()
        .pragma_query_value(None, "foreign_keys", |r| r.get(0))
        .unwrap();
    assert!(!on);

    let mut orphan = Question::new(999, "Orphan", "no author");
    assert!(orphan.create(&pool).is_ok());
    assert!(orphan.author(&pool).unwrap().is_none());
}

#[test]
fn deleting_referenced_user_is_not_blocked_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let pool = init_db(&dir.path().join("default.db")).unwrap();
    apply_schema(&pool);

    let uid = User::new("Ada", "Lovelace").create(&pool).unwrap();
    let mut q = Question::new(uid, "Engines", "b");
    let qid = q.create(&pool).unwrap();
    get_connection(&pool)
        .unwrap()
        .execute("DELETE FROM users WHERE id = ?1", [uid])
        .unwrap();

    let left = Question::find_by_id(&pool, qid).unwrap().unwrap();
    assert!(left.author(&pool).unwrap().is_none());
}

#[test]
fn test_db_accepts_orphans() {
    let pool = init_test_db().unwrap();
    let mut orphan = Question::new(999, "Orphan", "no author");
    assert!(orphan.create(&pool).is_ok());
}

#[test]
fn config_loads_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("db.json");
    std::fs::write(
        &file,
        r#"{"path": "/var/lib/questions.db", "enforce_foreign_keys": true}"#,
    )
    .unwrap();

    let cfg = DbConfig::from_json_file(&file).unwrap();
    assert_eq!(cfg.path, std::path::PathBuf::from("/var/lib/questions.db"));
    assert!(cfg.enforce_foreign_keys);
}

#[test]
fn config_missing_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = DbConfig::from_json_file(&dir.path().join("absent.json")).unwrap_err();
    assert_eq!(err.code(), "CONFIG_ERROR");
}

// ══════════════════════════════════════════════════════════
//  shared handle
// ══════════════════════════════════════════════════════════

#[test]
fn shared_handle_serializes_writers() {
    let pool = Arc::new(init_test_db().unwrap());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let pool = Arc::clone(&pool);
            std::thread::spawn(move || {
                for i in 0..10 {
                    User::new(format!("T{}", t), format!("U{}", i))
                        .create(&pool)
                        .unwrap();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let all = User::all(&pool).unwrap();
    assert_eq!(all.len(), 40);
    let mut ids: Vec<i64> = all.iter().filter_map(|u| u.id()).collect();
    ids.dedup();
    assert_eq!(ids.len(), 40);
}
