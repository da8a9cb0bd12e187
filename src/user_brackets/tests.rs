use super::*;

use crate::db;
use crate::users;

fn registered_pool() -> db::DbPool {
    let pool = db::open_test_pool();
    {
        let conn = pool.get().expect("conn");
        users::claim(&conn, "jane").expect("register jane");
    }
    pool
}

#[test]
fn saved_picks_round_trip() {
    let pool = registered_pool();
    let conn = pool.get().expect("conn");

    let picks = serde_json::json!({ "championship": "connecticut", "upsets": 4 });
    let saved = upsert(&conn, "jane", 2025, &picks).expect("save bracket");
    assert_eq!(saved.year, 2025);
    assert_eq!(saved.picks, picks);

    let loaded = get(&conn, "jane", 2025).expect("load").expect("present");
    assert_eq!(loaded.picks, picks);
}

#[test]
fn second_save_replaces_picks_for_the_same_year() {
    let pool = registered_pool();
    let conn = pool.get().expect("conn");

    upsert(&conn, "jane", 2025, &serde_json::json!({ "championship": "duke" }))
        .expect("first save");
    let second = upsert(
        &conn,
        "jane",
        2025,
        &serde_json::json!({ "championship": "houston" }),
    )
    .expect("second save");

    assert_eq!(second.picks["championship"], "houston");
}

#[test]
fn years_are_independent() {
    let pool = registered_pool();
    let conn = pool.get().expect("conn");

    upsert(&conn, "jane", 2024, &serde_json::json!({ "championship": "connecticut" }))
        .expect("save 2024");
    assert!(get(&conn, "jane", 2025).expect("load 2025").is_none());
}

#[test]
fn unregistered_user_cannot_save() {
    let pool = db::open_test_pool();
    let conn = pool.get().expect("conn");

    let err = upsert(&conn, "ghost", 2025, &serde_json::json!({})).unwrap_err();
    assert!(err.starts_with("DB_NOT_FOUND"), "got: {err}");
}
