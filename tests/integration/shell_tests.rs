//! Scripted interactive sessions

use biblioteca::cli::shell::Shell;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app_for, book_json, mount_books, mount_health};

async fn session(server: &MockServer, input: &str) -> String {
    let app = app_for(server);
    let out = Shell::new(&app, input.as_bytes(), Vec::new())
        .run()
        .await
        .expect("Shell session failed");
    app.shutdown();
    String::from_utf8(out).expect("Output is not UTF-8")
}

#[tokio::test]
async fn test_disconnected_shell_only_offers_setup() {
    let server = MockServer::start().await;
    mount_health(&server, 503).await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let out = session(&server, "list\nhelp\nquit\n").await;

    assert!(out.contains("API status: Disconnected"));
    assert!(out.contains("API not connected!"));
    assert!(out.contains("Unknown command 'list' while the API is disconnected"));
    assert!(out.contains("The API is not connected. Available commands:"));
}

#[tokio::test]
async fn test_catalog_renders_and_filters() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    mount_books(
        &server,
        vec![
            book_json("b1", "Dune", "Frank Herbert"),
            book_json("b2", "Hyperion", "Dan Simmons"),
        ],
    )
    .await;

    let out = session(&server, "search hyperion\nview list\nbogus\nquit\n").await;

    assert!(out.contains("API status: Connected"));
    assert!(out.contains("Library catalog · 2 books registered"));
    assert!(out.contains("Search: \"hyperion\""));
    assert!(out.contains("View: list"));
    assert!(out.contains("Dan Simmons"));
    assert!(out.contains("Unknown command 'bogus'. Type `help`."));
}

#[tokio::test]
async fn test_add_book_posts_and_refreshes() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    mount_books(&server, vec![book_json("b1", "Dune", "Frank Herbert")]).await;
    Mock::given(method("POST"))
        .and(path("/books"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(book_json("b9", "Neuromancer", "William Gibson")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let input = "add\nNeuromancer\nWilliam Gibson\n\n\nabc\n1984\n271\nquit\n";
    let out = session(&server, input).await;

    assert!(out.contains("New book"));
    assert!(out.contains("! Enter a valid number of pages (>= 1)"));
    assert!(out.contains("[Success] Book created successfully!"));
}

#[tokio::test]
async fn test_failed_create_offers_retry() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    mount_books(&server, vec![]).await;
    Mock::given(method("POST"))
        .and(path("/books"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({"detail": "Duplicate ISBN"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let input = "add\nNeuromancer\nWilliam Gibson\n\n\n271\n1984\nn\nquit\n";
    let out = session(&server, input).await;

    assert!(out.contains("No books registered"));
    assert!(out.contains("[Error] Duplicate ISBN"));
    assert!(out.contains("Try again? [y/N] "));
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    mount_books(&server, vec![book_json("b1", "Dune", "Frank Herbert")]).await;
    Mock::given(method("DELETE"))
        .and(path("/books/b1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let out = session(&server, "delete b1\nn\ndelete b1\nyes\nquit\n").await;

    assert!(out.contains("Are you sure you want to delete \"Dune\"?"));
    assert!(out.contains("Deletion cancelled."));
    assert!(out.contains("[Success] Book deleted successfully!"));
}

#[tokio::test]
async fn test_status_recheck_keeps_the_open_catalog() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([book_json(
            "b1",
            "Dune",
            "Frank Herbert"
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let out = session(&server, "status\nretry\nquit\n").await;

    assert_eq!(out.matches("API status: Connected").count(), 3);
    assert_eq!(out.matches("Library catalog · 1 book registered").count(), 1);
}
