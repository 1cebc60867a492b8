use axum::body::Body;
use axum::http::header::ACCEPT;
use axum::http::header::LOCATION;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use tower::Service;
use uuid::Uuid;

use crate::tests::helper;

#[tokio::test]
async fn test_delete_is_not_idempotent() {
    let mut app = helper::setup_test_app();

    let (_, note, _) = helper::maybe_create_note(&mut app, "Groceries", "Milk").await;
    let note = note.unwrap();

    // first delete succeeds
    let (status_code, _) = helper::maybe_delete_note(&mut app, &note.id).await;
    assert_eq!(StatusCode::NO_CONTENT, status_code);

    // second delete finds nothing
    let (status_code, error) = helper::maybe_delete_note(&mut app, &note.id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Note not found".to_string()), error);
}

#[tokio::test]
async fn test_delete_unknown_note() {
    let mut app = helper::setup_test_app();

    let (status_code, error) = helper::maybe_delete_note(&mut app, &Uuid::new_v4()).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!(Some("Note not found".to_string()), error);
}

#[tokio::test]
async fn test_delete_from_the_list_view_returns_a_fragment() {
    let mut app = helper::setup_test_app();

    let (_, note, _) = helper::maybe_create_note(&mut app, "Groceries", "Milk").await;
    let note = note.unwrap();

    let (status_code, content_type, body) =
        helper::delete_note_from_list(&mut app, &note.id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(helper::TURBO_STREAM.to_string()), content_type);
    assert_eq!(
        format!(
            r#"<turbo-stream action="remove" target="note_{}"></turbo-stream>"#,
            note.id
        ),
        body
    );

    // the note is actually gone
    let (status_code, _, _) = helper::single_note(&mut app, &note.id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
}

#[tokio::test]
async fn test_delete_from_the_show_page_redirects_to_the_list() {
    let mut app = helper::setup_test_app();

    let (_, note, _) = helper::maybe_create_note(&mut app, "Groceries", "Milk").await;
    let note = note.unwrap();

    let request = Request::builder()
        .method(Method::DELETE)
        .uri(format!("/notes/{}", note.id))
        .header(ACCEPT, mime::TEXT_HTML.as_ref())
        .body(Body::empty())
        .unwrap();

    let response = app.call(request).await.unwrap();
    assert_eq!(StatusCode::SEE_OTHER, response.status());
    assert_eq!(
        "/notes",
        response.headers().get(LOCATION).unwrap().to_str().unwrap()
    );
}

#[tokio::test]
async fn test_delete_through_the_method_override() {
    let mut app = helper::setup_test_app();

    let (_, note, _) = helper::maybe_create_note(&mut app, "Groceries", "Milk").await;
    let note = note.unwrap();

    // plain HTML forms can only POST
    let (status_code, location, _) = helper::submit_form(
        &mut app,
        &format!("/notes/{}", note.id),
        &[("_method", "delete")],
    )
    .await;
    assert_eq!(StatusCode::SEE_OTHER, status_code);
    assert_eq!(Some("/notes".to_string()), location);

    let (status_code, _, _) = helper::single_note(&mut app, &note.id).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
}
