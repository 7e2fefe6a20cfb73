//! End-to-end tests against PostgreSQL. Needs `DATABASE_URL`; run with `cargo test -- --ignored`.
//! Each test owns a distinct id range so tests can share one database.

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{default_settings, send};
use serde_json::json;
use sqlx::PgPool;
use student_registry::{app, ensure_schema, AppState};

async fn setup() -> (Router, PgPool) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .unwrap();
    ensure_schema(&pool).await.unwrap();
    (app(AppState::new(pool.clone(), default_settings())), pool)
}

/// Remove rows in [lo, hi] from every table.
async fn reset(pool: &PgPool, lo: i32, hi: i32) {
    for sql in [
        "DELETE FROM student_subjects WHERE student_id BETWEEN $1 AND $2",
        "DELETE FROM student_classes WHERE student_id BETWEEN $1 AND $2",
        "DELETE FROM students WHERE id BETWEEN $1 AND $2",
        "DELETE FROM subjects WHERE id BETWEEN $1 AND $2",
        "DELETE FROM classes WHERE id BETWEEN $1 AND $2",
    ] {
        sqlx::query(sql).bind(lo).bind(hi).execute(pool).await.unwrap();
    }
}

async fn seed_class(pool: &PgPool, id: i32, level: i32) {
    sqlx::query("INSERT INTO classes (id, name, level) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(format!("class {}", id))
        .bind(level)
        .execute(pool)
        .await
        .unwrap();
}

async fn count(pool: &PgPool, sql: &str, a: i32, b: i32) -> i64 {
    sqlx::query_scalar(sql).bind(a).bind(b).fetch_one(pool).await.unwrap()
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn create_and_read_student() {
    let (app, pool) = setup().await;
    reset(&pool, 9100, 9199).await;

    let resp = send(&app, Method::POST, "/students", Some(json!({"id": 9101, "name": "Ada", "grade": "A"}))).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json(), json!({"id": 9101, "name": "Ada", "grade": "A"}));

    let resp = send(&app, Method::GET, "/students/9101", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["name"], "Ada");

    let resp = send(&app, Method::GET, "/students", None).await;
    assert!(resp.json().as_array().unwrap().iter().any(|s| s["id"] == 9101));

    let resp = send(&app, Method::GET, "/students/9199", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    // duplicate id has no dedicated handling
    let resp = send(&app, Method::POST, "/students", Some(json!({"id": 9101, "name": "Bob", "grade": "C"}))).await;
    assert_eq!(resp.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp.error_code(), "database_error");
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn delete_student_cascades_links() {
    let (app, pool) = setup().await;
    reset(&pool, 9200, 9299).await;
    seed_class(&pool, 9201, 1).await;
    send(&app, Method::POST, "/students", Some(json!({"id": 9202, "name": "Cy", "grade": "B"}))).await;
    send(&app, Method::POST, "/subjects", Some(json!({"id": 9203, "name": "Art"}))).await;
    send(&app, Method::POST, "/students/9202/subjects", Some(json!({"subjectId": 9203}))).await;
    send(&app, Method::POST, "/classes/9201/students", Some(json!({"studentId": 9202}))).await;

    let resp = send(&app, Method::DELETE, "/students/9299", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = send(&app, Method::DELETE, "/students/9202", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "Student with ID 9202 has been removed.");

    let resp = send(&app, Method::GET, "/students/9202", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM student_subjects WHERE student_id = $1 AND subject_id = $2", 9202, 9203).await,
        0
    );
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM student_classes WHERE student_id = $1 AND class_id = $2", 9202, 9201).await,
        0
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn upgrade_class_increments_level() {
    let (app, pool) = setup().await;
    reset(&pool, 9300, 9399).await;
    seed_class(&pool, 9301, 4).await;
    sqlx::query("ALTER TABLE classes ADD COLUMN IF NOT EXISTS capacity NUMERIC")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE classes SET capacity = 12.5 WHERE id = $1")
        .bind(9301)
        .execute(&pool)
        .await
        .unwrap();

    let resp = send(&app, Method::PATCH, "/classes/9301/upgrade", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    let body = resp.json();
    assert_eq!(body["message"], "Class 9301 upgraded successfully.");
    assert_eq!(body["classData"]["level"], 5);
    assert_eq!(body["classData"]["name"], "class 9301");
    assert_eq!(body["classData"]["capacity"], 12.5);

    let resp = send(&app, Method::PATCH, "/classes/9301/upgrade", None).await;
    assert_eq!(resp.json()["classData"]["level"], 6);

    let resp = send(&app, Method::PATCH, "/classes/9399/upgrade", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    let missing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM classes WHERE id = $1")
        .bind(9399)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(missing, 0);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn assign_subject_is_idempotent() {
    let (app, pool) = setup().await;
    reset(&pool, 9400, 9499).await;
    send(&app, Method::POST, "/students", Some(json!({"id": 9401, "name": "Di", "grade": "A"}))).await;
    send(&app, Method::POST, "/subjects", Some(json!({"id": 9402, "name": "Math"}))).await;

    for _ in 0..2 {
        let resp = send(&app, Method::POST, "/students/9401/subjects", Some(json!({"subjectId": 9402}))).await;
        assert_eq!(resp.status, StatusCode::OK);
        assert_eq!(resp.json()["message"], "Subject assigned successfully.");
    }
    assert_eq!(
        count(&pool, "SELECT COUNT(*) FROM student_subjects WHERE student_id = $1 AND subject_id = $2", 9401, 9402).await,
        1
    );

    let resp = send(&app, Method::POST, "/students/9499/subjects", Some(json!({"subjectId": 9402}))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    let resp = send(&app, Method::POST, "/students/9401/subjects", Some(json!({"subjectId": 9498}))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.json()["error"]["message"], "Invalid subject ID.");

    let resp = send(&app, Method::DELETE, "/students/9401/subjects/9402", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "Subject removed");
    let resp = send(&app, Method::DELETE, "/students/9401/subjects/9402", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn partial_update_touches_only_given_fields() {
    let (app, pool) = setup().await;
    reset(&pool, 9500, 9599).await;
    send(&app, Method::POST, "/students", Some(json!({"id": 9501, "name": "Eve", "grade": "A"}))).await;

    let resp = send(&app, Method::PUT, "/students/9501", Some(json!({}))).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    let resp = send(&app, Method::GET, "/students/9501", None).await;
    assert_eq!(resp.json(), json!({"id": 9501, "name": "Eve", "grade": "A"}));

    let resp = send(&app, Method::PUT, "/students/9501", Some(json!({"grade": "B"}))).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({"id": 9501, "name": "Eve", "grade": "B"}));

    let resp = send(&app, Method::PUT, "/students/9599", Some(json!({"name": "Nobody"}))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn subjects_crud() {
    let (app, pool) = setup().await;
    reset(&pool, 9600, 9699).await;

    let resp = send(&app, Method::POST, "/subjects", Some(json!({"id": 9601, "name": "Bio"}))).await;
    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json(), json!({"id": 9601, "name": "Bio"}));

    let resp = send(&app, Method::PUT, "/subjects/9601", Some(json!({"name": "Biology"}))).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.json(),
        json!({"message": "Subject updated successfully.", "subject": {"id": 9601, "name": "Biology"}})
    );

    let resp = send(&app, Method::GET, "/subjects/9601", None).await;
    assert_eq!(resp.json()["name"], "Biology");
    let resp = send(&app, Method::GET, "/subjects", None).await;
    assert!(resp.json().as_array().unwrap().iter().any(|s| s["id"] == 9601));

    let resp = send(&app, Method::GET, "/subjects/9699", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    let resp = send(&app, Method::PUT, "/subjects/9699", Some(json!({"name": "X"}))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn report_nests_subjects() {
    let (app, pool) = setup().await;
    reset(&pool, 9700, 9799).await;
    send(&app, Method::POST, "/students", Some(json!({"id": 9701, "name": "Fay", "grade": "A"}))).await;
    send(&app, Method::POST, "/subjects", Some(json!({"id": 9702, "name": "Chem"}))).await;
    send(&app, Method::POST, "/subjects", Some(json!({"id": 9703, "name": "Geo"}))).await;
    send(&app, Method::POST, "/students/9701/subjects", Some(json!({"subjectId": 9703}))).await;
    send(&app, Method::POST, "/students/9701/subjects", Some(json!({"subjectId": 9702}))).await;

    let resp = send(&app, Method::GET, "/students/report", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    let report = resp.json();
    let entry = report
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "Fay")
        .cloned()
        .unwrap();
    assert_eq!(
        entry,
        json!({
            "name": "Fay",
            "grade": "A",
            "subjects": [{"id": 9702, "name": "Chem"}, {"id": 9703, "name": "Geo"}]
        })
    );
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn class_membership() {
    let (app, pool) = setup().await;
    reset(&pool, 9800, 9899).await;
    seed_class(&pool, 9801, 1).await;
    send(&app, Method::POST, "/students", Some(json!({"id": 9802, "name": "Gus", "grade": "C"}))).await;

    let resp = send(&app, Method::GET, "/classes/9801/students", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!([]));
    let resp = send(&app, Method::GET, "/classes/9899/students", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);

    let resp = send(&app, Method::POST, "/classes/9899/students", Some(json!({"studentId": 9802}))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["error"]["message"], "Class not found.");
    let resp = send(&app, Method::POST, "/classes/9801/students", Some(json!({"studentId": 9898}))).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.json()["error"]["message"], "Student not found.");

    for _ in 0..2 {
        let resp = send(&app, Method::POST, "/classes/9801/students", Some(json!({"studentId": 9802}))).await;
        assert_eq!(resp.status, StatusCode::OK);
    }
    let resp = send(&app, Method::GET, "/classes/9801/students", None).await;
    assert_eq!(resp.json(), json!([{"id": 9802, "name": "Gus", "grade": "C"}]));

    let resp = send(&app, Method::DELETE, "/classes/9801/students/9802", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.text(), "Student 9802 removed from class 9801.");
    let resp = send(&app, Method::DELETE, "/classes/9801/students/9802", None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn ready_once_schema_exists() {
    let (app, _pool) = setup().await;
    let resp = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), json!({"status": "ok"}));
}
