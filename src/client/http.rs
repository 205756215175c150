use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::client::{
    CategoryDraft, CategoryUpdate, ClientConfig, ClientError, ClientResult, NoteDraft, NoteUpdate,
    NotesApi,
};
use crate::dto::categories::CategoryDto;
use crate::dto::notes::{NoteDetailDto, NoteDto};

/// [`NotesApi`] implementation talking to the server over HTTP.
#[derive(Debug, Clone)]
pub struct HttpNotesClient {
    http: Client,
    base_url: String,
}

impl HttpNotesClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Reuse an existing `reqwest` client (connection pool, timeouts).
    pub fn with_client(http: Client, config: &ClientConfig) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send(&self, request: RequestBuilder, failure: &str) -> ClientResult<Response> {
        request
            .send()
            .await
            .and_then(Response::error_for_status)
            .map_err(|e| {
                log::error!("{failure} ({e})");
                ClientError::new(failure)
            })
    }

    async fn fetch<T>(&self, request: RequestBuilder, failure: &str) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(request, failure).await?;
        response.json::<T>().await.map_err(|e| {
            log::error!("{failure} ({e})");
            ClientError::new(failure)
        })
    }
}

impl NotesApi for HttpNotesClient {
    async fn list_notes(&self, active: bool) -> ClientResult<Vec<NoteDto>> {
        let path = if active { "notes/active" } else { "notes/archived" };
        self.fetch(self.http.get(self.url(path)), "Failed to fetch notes.")
            .await
    }

    async fn get_note(&self, id: i32) -> ClientResult<NoteDetailDto> {
        self.fetch(
            self.http.get(self.url(&format!("notes/{id}"))),
            "Failed to fetch note.",
        )
        .await
    }

    async fn create_note(&self, draft: &NoteDraft) -> ClientResult<NoteDto> {
        self.fetch(
            self.http.post(self.url("notes")).json(draft),
            "Failed to create note.",
        )
        .await
    }

    async fn update_note(&self, id: i32, update: &NoteUpdate) -> ClientResult<NoteDto> {
        self.fetch(
            self.http.put(self.url(&format!("notes/{id}"))).json(update),
            "Failed to update note.",
        )
        .await
    }

    async fn delete_note(&self, id: i32) -> ClientResult<()> {
        self.send(
            self.http.delete(self.url(&format!("notes/{id}"))),
            "Failed to delete note.",
        )
        .await
        .map(|_| ())
    }

    async fn toggle_archive(&self, id: i32) -> ClientResult<NoteDto> {
        self.fetch(
            self.http.put(self.url(&format!("notes/{id}/archive"))),
            "Failed to toggle archive status.",
        )
        .await
    }

    async fn add_category_to_note(&self, note_id: i32, category_id: i32) -> ClientResult<()> {
        self.send(
            self.http
                .post(self.url(&format!("notes/{note_id}/categories/{category_id}"))),
            "Failed to add category to note.",
        )
        .await
        .map(|_| ())
    }

    async fn remove_category_from_note(
        &self,
        note_id: i32,
        category_id: i32,
    ) -> ClientResult<()> {
        self.send(
            self.http
                .delete(self.url(&format!("notes/{note_id}/categories/{category_id}"))),
            "Failed to remove category from note.",
        )
        .await
        .map(|_| ())
    }

    async fn list_notes_by_category(
        &self,
        category_id: i32,
        active: bool,
    ) -> ClientResult<Vec<NoteDto>> {
        self.fetch(
            self.http
                .get(self.url(&format!("notes/category/{category_id}")))
                .query(&[("active", active)]),
            "Failed to fetch notes by category.",
        )
        .await
    }

    async fn list_categories(&self) -> ClientResult<Vec<CategoryDto>> {
        self.fetch(
            self.http.get(self.url("categories")),
            "Failed to fetch categories.",
        )
        .await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> ClientResult<CategoryDto> {
        self.fetch(
            self.http.post(self.url("categories")).json(draft),
            "Failed to create category.",
        )
        .await
    }

    async fn update_category(
        &self,
        id: i32,
        update: &CategoryUpdate,
    ) -> ClientResult<CategoryDto> {
        self.fetch(
            self.http
                .put(self.url(&format!("categories/{id}")))
                .json(update),
            "Failed to update category.",
        )
        .await
    }

    async fn delete_category(&self, id: i32) -> ClientResult<()> {
        self.send(
            self.http.delete(self.url(&format!("categories/{id}"))),
            "Failed to delete category.",
        )
        .await
        .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_url_and_path() {
        let client = HttpNotesClient::new(&ClientConfig::new("http://localhost:3001/api/"));
        assert_eq!(client.url("/notes/1"), "http://localhost:3001/api/notes/1");
        assert_eq!(client.url("categories"), "http://localhost:3001/api/categories");
    }

    #[actix_web::test]
    async fn unreachable_server_maps_to_client_error() {
        // Port 9 (discard) is not expected to serve HTTP.
        let client = HttpNotesClient::new(&ClientConfig::new("http://127.0.0.1:9/api"));
        let err = client.list_categories().await.unwrap_err();
        assert_eq!(err.message(), "Failed to fetch categories.");
    }
}
