//! One-shot commands and their exit codes

use biblioteca::cli::{
    commands::{execute, EXIT_DISCONNECTED, EXIT_FAILED, EXIT_OK},
    BookFields, Command, ListArgs,
};
use biblioteca::models::{SortKey, ViewMode};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app_for, book_json, mount_books, mount_health};

async fn run(server: &MockServer, command: Command) -> (u8, String) {
    let app = app_for(server);
    let mut out = Vec::new();
    let code = execute(&app, command, &mut out).await.expect("Command failed");
    (code, String::from_utf8(out).expect("Output is not UTF-8"))
}

#[tokio::test]
async fn test_commands_print_setup_when_disconnected() {
    let server = MockServer::start().await;
    mount_health(&server, 500).await;

    let (code, out) = run(&server, Command::List(ListArgs::default())).await;

    assert_eq!(code, EXIT_DISCONNECTED);
    assert!(out.contains("How to run the backend"));
    assert!(out.contains(&format!("API endpoints ({})", server.uri())));
}

#[tokio::test]
async fn test_list_applies_arguments() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .and(query_param("limit", "5"))
        .and(query_param("sort", "title"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "books": [
                book_json("b1", "Dune", "Frank Herbert"),
                book_json("b2", "Hyperion", "Dan Simmons"),
            ],
            "total": 17
        })))
        .expect(1)
        .mount(&server)
        .await;

    let args = ListArgs {
        limit: Some(5),
        sort: Some(SortKey::TitleAsc),
        search: Some("dune".to_string()),
        view: Some(ViewMode::List),
        ..Default::default()
    };
    let (code, out) = run(&server, Command::List(args)).await;

    assert_eq!(code, EXIT_OK);
    assert!(out.contains("Library catalog · 17 books registered"));
    assert!(out.contains("Sort: Title A-Z · View: list · Search: \"dune\""));
    assert!(out.contains("Frank Herbert"));
    assert!(!out.contains("Dan Simmons"));
}

#[tokio::test]
async fn test_add_with_invalid_fields_never_posts() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    Mock::given(method("POST"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let fields = BookFields {
        title: Some("Dune".to_string()),
        authors: Some(" , ".to_string()),
        pages: Some("0".to_string()),
        publish_year: Some("1965".to_string()),
        ..Default::default()
    };
    let (code, out) = run(&server, Command::Add(fields)).await;

    assert_eq!(code, EXIT_FAILED);
    assert!(out.contains("error: Author(s): At least one author is required"));
    assert!(out.contains("error: Pages: Enter a valid number of pages (>= 1)"));
}

#[tokio::test]
async fn test_edit_overlays_fields_on_the_stored_book() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    Mock::given(method("GET"))
        .and(path("/books/b1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(book_json("b1", "Dune", "Frank Herbert")),
        )
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/books/b1"))
        .and(body_json(json!({
            "title": "Dune",
            "authors": ["Frank Herbert"],
            "pages": 896,
            "publish_year": 1965,
            "isbn": "978-0441013593"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "b1",
            "title": "Dune",
            "authors": ["Frank Herbert"],
            "pages": 896,
            "publish_year": 1965,
            "created_at": "2024-03-09T10:15:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let fields = BookFields {
        pages: Some("896".to_string()),
        ..Default::default()
    };
    let (code, out) = run(
        &server,
        Command::Edit {
            id: "b1".to_string(),
            fields,
        },
    )
    .await;

    assert_eq!(code, EXIT_OK);
    assert!(out.contains("Pages:     896"));
    assert!(out.contains("[Success] Book updated successfully!"));
}

#[tokio::test]
async fn test_show_missing_book_fails_with_server_message() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    mount_books(&server, vec![]).await;
    Mock::given(method("GET"))
        .and(path("/books/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Book not found"})))
        .mount(&server)
        .await;

    let (code, out) = run(&server, Command::Show { id: "nope".to_string() }).await;

    assert_eq!(code, EXIT_FAILED);
    assert!(out.contains("[Error] Book not found"));
}

#[tokio::test]
async fn test_delete_with_yes_skips_confirmation() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    Mock::given(method("DELETE"))
        .and(path("/books/b1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (code, out) = run(
        &server,
        Command::Delete {
            id: "b1".to_string(),
            yes: true,
        },
    )
    .await;

    assert_eq!(code, EXIT_OK);
    assert!(out.contains("[Success] Book deleted successfully!"));
}
