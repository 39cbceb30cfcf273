//! HTTP client behaviour against a mocked backend

use biblioteca::{
    api::BookBackend,
    models::{BookCreate, BookUpdate, ListQuery, SortKey},
    AppError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{book_json, client_for, mount_health};

fn dune_payload() -> BookCreate {
    BookCreate {
        title: "Dune".to_string(),
        authors: vec!["Frank Herbert".to_string()],
        pages: 412,
        publish_year: 1965,
        cover_url: None,
        isbn: Some("978-0441013593".to_string()),
    }
}

#[tokio::test]
async fn test_list_sends_paging_and_sort() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "40"))
        .and(query_param("sort", "-publish_year"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "books": [book_json("b1", "Dune", "Frank Herbert")],
            "total": 41
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let query = ListQuery {
        limit: 20,
        offset: 40,
        sort: SortKey::YearDesc,
    };
    let page = client.list_books(&query).await.unwrap();

    assert_eq!(page.total, 41);
    assert_eq!(page.books.len(), 1);
    assert_eq!(page.books[0].title, "Dune");
}

#[tokio::test]
async fn test_list_accepts_bare_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            book_json("b1", "Dune", "Frank Herbert"),
            book_json("b2", "Hyperion", "Dan Simmons"),
        ])))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_books(&ListQuery::default())
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.books[1].id, "b2");
}

#[tokio::test]
async fn test_list_failure_uses_detail_or_status_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .and(query_param("sort", "title"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Invalid sort field"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .and(query_param("sort", "-created_at"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client
        .list_books(&ListQuery::sorted(SortKey::TitleAsc))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.user_message(), "Invalid sort field");

    let err = client.list_books(&ListQuery::default()).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to load books (503)");
}

#[tokio::test]
async fn test_list_rejects_unexpected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_books(&ListQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(_)));
    assert_eq!(err.user_message(), "The API returned an unexpected response");
}

#[tokio::test]
async fn test_get_book_and_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books/b1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(book_json("b1", "Dune", "Frank Herbert")),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/books/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Book not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let book = client.get_book("b1").await.unwrap();
    assert_eq!(book.authors, vec!["Frank Herbert".to_string()]);

    let err = client.get_book("missing").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.user_message(), "Book not found");
}

#[tokio::test]
async fn test_create_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/books"))
        .and(body_json(json!({
            "title": "Dune",
            "authors": ["Frank Herbert"],
            "pages": 412,
            "publish_year": 1965,
            "isbn": "978-0441013593"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(book_json("new-1", "Dune", "Frank Herbert")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let created = client_for(&server).create_book(&dune_payload()).await.unwrap();
    assert_eq!(created.id, "new-1");
}

#[tokio::test]
async fn test_invalid_payload_is_never_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let payload = BookCreate {
        publish_year: 3000,
        ..dune_payload()
    };
    let err = client_for(&server).create_book(&payload).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_invalid_update_is_never_sent() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/books/b1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let update = BookUpdate {
        cover_url: Some("ftp://example.com/c.jpg".to_string()),
        ..Default::default()
    };
    let err = client_for(&server).update_book("b1", &update).await.unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
async fn test_list_keeps_books_when_total_is_not_a_number() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "books": [book_json("b1", "Dune", "Frank Herbert")],
            "total": "5"
        })))
        .mount(&server)
        .await;

    let page = client_for(&server)
        .list_books(&ListQuery::default())
        .await
        .unwrap();

    assert_eq!(page.books.len(), 1);
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn test_update_sends_only_present_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/books/b1"))
        .and(body_json(json!({"pages": 500})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({
                "id": "b1",
                "title": "Dune",
                "authors": "Frank Herbert, Brian Herbert",
                "pages": 500,
                "publish_year": 1965,
                "created_at": "2024-03-09T10:15:00Z"
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let update = BookUpdate {
        pages: Some(500),
        ..Default::default()
    };
    let book = client_for(&server).update_book("b1", &update).await.unwrap();

    assert_eq!(book.pages, 500);
    assert_eq!(
        book.authors,
        vec!["Frank Herbert".to_string(), "Brian Herbert".to_string()]
    );
}

#[tokio::test]
async fn test_delete_ignores_body_and_reports_errors() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/books/b1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/books/b2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.delete_book("b1").await.unwrap();

    let err = client.delete_book("b2").await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to delete book");
}

#[tokio::test]
async fn test_health_reports_any_non_success() {
    let server = MockServer::start().await;
    mount_health(&server, 200).await;
    client_for(&server).health().await.unwrap();

    let down = MockServer::start().await;
    mount_health(&down, 502).await;
    let err = client_for(&down).health().await.unwrap_err();
    assert_eq!(err.user_message(), "API did not respond");
}
