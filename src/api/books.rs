//! Book endpoints (`/books`)

use validator::Validate;

use super::{decode, ensure_success, ApiClient};
use crate::{
    error::AppResult,
    models::{Book, BookCreate, BookListResponse, BookPage, BookUpdate, ListQuery},
};

impl ApiClient {
    /// `GET /books?limit&offset&sort`
    pub async fn fetch_page(&self, query: &ListQuery) -> AppResult<BookPage> {
        tracing::debug!(
            "GET /books limit={} offset={} sort={} ({} {})",
            query.limit,
            query.offset,
            query.sort,
            query.sort.field(),
            if query.sort.is_descending() { "desc" } else { "asc" }
        );

        let response = self.http.get(self.url("/books")).query(query).send().await?;
        let status = response.status();
        let response =
            ensure_success(response, &format!("Failed to load books ({})", status.as_u16()))
                .await?;

        let page = decode::<BookListResponse>(response).await?.into_page();
        tracing::debug!("Received {} books (total {})", page.books.len(), page.total);
        Ok(page)
    }

    /// `GET /books/{id}`
    pub async fn fetch_book(&self, id: &str) -> AppResult<Book> {
        tracing::debug!("GET /books/{}", id);

        let response = self.http.get(self.book_url(id)).send().await?;
        let response = ensure_success(response, "Failed to load book").await?;
        decode(response).await
    }

    /// `POST /books`. Payloads failing the model rules never leave the client.
    pub async fn post_book(&self, payload: &BookCreate) -> AppResult<Book> {
        payload.validate()?;
        tracing::debug!("POST /books title={:?}", payload.title);

        let response = self
            .http
            .post(self.url("/books"))
            .json(payload)
            .send()
            .await?;
        let response = ensure_success(response, "Failed to create book").await?;
        decode(response).await
    }

    /// `PATCH /books/{id}` with only the fields present in `payload`
    pub async fn patch_book(&self, id: &str, payload: &BookUpdate) -> AppResult<Book> {
        payload.validate()?;
        tracing::debug!("PATCH /books/{}", id);

        let response = self
            .http
            .patch(self.book_url(id))
            .json(payload)
            .send()
            .await?;
        let response = ensure_success(response, "Failed to update book").await?;
        decode(response).await
    }

    /// `DELETE /books/{id}`; the response body is ignored
    pub async fn remove_book(&self, id: &str) -> AppResult<()> {
        tracing::debug!("DELETE /books/{}", id);

        let response = self.http.delete(self.book_url(id)).send().await?;
        ensure_success(response, "Failed to delete book").await?;
        Ok(())
    }

    fn book_url(&self, id: &str) -> String {
        self.url(&format!("/books/{}", id))
    }
}
