use axum::http::StatusCode;
use serde_json::json;

use crate::tests::helper;

#[tokio::test]
async fn test_create_with_blank_title() {
    let mut app = helper::setup_test_app();

    let (status_code, note, errors) = helper::maybe_create_note(&mut app, "", "Milk, eggs").await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status_code);
    assert!(note.is_none());

    // the error is keyed by the blank field
    let errors = errors.unwrap();
    assert_eq!(json!(["can't be blank"]), errors["title"]);
    assert!(errors.get("body").is_none());

    // nothing was persisted
    let (_, notes) = helper::list_notes(&mut app).await;
    assert_eq!(0, notes.unwrap().len());
}

#[tokio::test]
async fn test_create_with_blank_body() {
    let mut app = helper::setup_test_app();

    let (status_code, _, errors) = helper::maybe_create_note(&mut app, "Groceries", "").await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status_code);
    assert_eq!(json!(["can't be blank"]), errors.unwrap()["body"]);
}

#[tokio::test]
async fn test_create_with_whitespace_only_fields() {
    let mut app = helper::setup_test_app();

    let (status_code, _, errors) = helper::maybe_create_note(&mut app, "   ", " \t ").await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status_code);

    let errors = errors.unwrap();
    assert_eq!(json!(["can't be blank"]), errors["title"]);
    assert_eq!(json!(["can't be blank"]), errors["body"]);

    let (_, notes) = helper::list_notes(&mut app).await;
    assert_eq!(0, notes.unwrap().len());
}

#[tokio::test]
async fn test_create_ignores_unknown_fields() {
    let mut app = helper::setup_test_app();

    // anything next to title and body is dropped before validation
    let payload = json!({
        "title": "Groceries",
        "body": "Milk, eggs",
        "id": "11111111-1111-1111-1111-111111111111",
        "admin": true,
    });

    let (status_code, note, _) =
        helper::maybe_create_note_with_payload(&mut app, &payload).await;
    assert_eq!(StatusCode::CREATED, status_code);

    let note = note.unwrap();
    assert_eq!("Groceries".to_string(), note.title);
    assert_ne!("11111111-1111-1111-1111-111111111111", note.id.to_string());
}

#[tokio::test]
async fn test_note_invalid_id() {
    let mut app = helper::setup_test_app();

    let (status_code, _, error) = helper::single_note_with_str(&mut app, "some-id").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("Invalid path parameter".to_string()), error);
}
