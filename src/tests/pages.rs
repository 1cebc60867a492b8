use axum::http::StatusCode;
use uuid::Uuid;

use crate::tests::helper;

#[tokio::test]
async fn test_index_page() {
    let mut app = helper::setup_test_app();

    let (_, note, _) = helper::maybe_create_note(&mut app, "Groceries", "Milk").await;
    let note = note.unwrap();

    for path in ["/", "/notes"] {
        let (status_code, body) = helper::get_page(&mut app, path).await;
        assert_eq!(StatusCode::OK, status_code);
        assert!(body.contains(r#"<ul id="notes">"#));
        assert!(body.contains(&format!(r#"<li id="note_{}">"#, note.id)));
        assert!(body.contains("Groceries"));
        assert!(body.contains(r#"<a href="/notes/new">"#));
    }
}

#[tokio::test]
async fn test_new_note_page() {
    let mut app = helper::setup_test_app();

    let (status_code, body) = helper::get_page(&mut app, "/notes/new").await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(body.contains(r#"<form method="post" action="/notes">"#));
    assert!(body.contains(r#"name="title""#));
    assert!(body.contains(r#"name="body""#));
}

#[tokio::test]
async fn test_create_note_through_the_form() {
    let mut app = helper::setup_test_app();

    let (status_code, location, _) = helper::submit_form(
        &mut app,
        "/notes",
        &[("title", "Groceries"), ("body", "Milk, eggs")],
    )
    .await;
    assert_eq!(StatusCode::SEE_OTHER, status_code);

    // the redirect leads to the new note's page
    let location = location.unwrap();
    let (status_code, body) = helper::get_page(&mut app, &location).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(body.contains("Groceries"));
    assert!(body.contains("Milk, eggs"));
}

#[tokio::test]
async fn test_invalid_form_is_re_rendered_with_errors() {
    let mut app = helper::setup_test_app();

    let (status_code, _, body) =
        helper::submit_form(&mut app, "/notes", &[("title", ""), ("body", "Milk")]).await;
    assert_eq!(StatusCode::UNPROCESSABLE_ENTITY, status_code);
    assert!(body.contains("can't be blank"));

    // the submitted body is kept in the form
    assert!(body.contains("Milk"));

    // nothing was persisted
    let (_, notes) = helper::list_notes(&mut app).await;
    assert_eq!(0, notes.unwrap().len());
}

#[tokio::test]
async fn test_edit_note_through_the_form() {
    let mut app = helper::setup_test_app();

    let (_, note, _) = helper::maybe_create_note(&mut app, "Groceries", "Milk").await;
    let note = note.unwrap();

    let (status_code, body) =
        helper::get_page(&mut app, &format!("/notes/{}/edit", note.id)).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(body.contains(r#"value="Groceries""#));
    assert!(body.contains(r#"name="_method" value="patch""#));

    let (status_code, location, _) = helper::submit_form(
        &mut app,
        &format!("/notes/{}", note.id),
        &[("_method", "patch"), ("title", "Chores"), ("body", "Laundry")],
    )
    .await;
    assert_eq!(StatusCode::SEE_OTHER, status_code);
    assert_eq!(Some(format!("/notes/{}", note.id)), location);

    let (_, fetched, _) = helper::single_note(&mut app, &note.id).await;
    assert_eq!("Chores".to_string(), fetched.unwrap().title);
}

#[tokio::test]
async fn test_unknown_note_page() {
    let mut app = helper::setup_test_app();

    let (status_code, body) =
        helper::get_page(&mut app, &format!("/notes/{}", Uuid::new_v4())).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert!(body.contains("404 Not Found"));
}

#[tokio::test]
async fn test_up() {
    let mut app = helper::setup_test_app();

    let (status_code, _) = helper::get_page(&mut app, "/up").await;
    assert_eq!(StatusCode::OK, status_code);
}
