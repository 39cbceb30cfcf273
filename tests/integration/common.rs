//! Shared fixtures

use biblioteca::{api::ApiClient, AppConfig, AppState};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn config_for(server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.api.base_url = server.uri();
    config.api.timeout_secs = Some(5);
    config
}

pub fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&config_for(server).api).expect("Failed to build client")
}

pub fn app_for(server: &MockServer) -> AppState {
    AppState::new(config_for(server)).expect("Failed to build app state")
}

pub fn book_json(id: &str, title: &str, author: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "authors": [author],
        "pages": 412,
        "publish_year": 1965,
        "created_at": "2024-03-09T10:15:00Z",
        "cover_url": null,
        "isbn": "978-0441013593"
    })
}

pub async fn mount_health(server: &MockServer, status: u16) {
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({"status": "ok"})))
        .mount(server)
        .await;
}

pub async fn mount_books(server: &MockServer, books: Vec<Value>) {
    let total = books.len();
    Mock::given(method("GET"))
        .and(path("/books"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"books": books, "total": total})),
        )
        .mount(server)
        .await;
}
