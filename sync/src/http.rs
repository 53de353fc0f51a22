//! `NoteStore` over JSON/HTTP.
//!
//! Wire shape: notes are `{id, content, color, position_x, position_y,
//! created_at}`; mutations answer with the note or a
//! `{success: false, message}` envelope.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use board::note::{NewNote, Note, NoteId};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::store::{NoteStore, StoreError};

/// Environment variable naming the Note Store base URL.
pub const API_URL_VAR: &str = "STICKYBOARD_API_URL";

/// Base URL used when [`API_URL_VAR`] is unset.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3001";

#[derive(Serialize)]
struct PositionBody {
    position_x: f64,
    position_y: f64,
}

#[derive(Serialize)]
struct ZIndexBody {
    z_index: i64,
}

#[derive(Deserialize, Default)]
struct ErrorEnvelope {
    #[serde(default)]
    message: String,
}

pub struct HttpNoteStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpNoteStore {
    /// Build a store client for `base_url` (`http://` or `https://`).
    ///
    /// # Errors
    ///
    /// Returns `InvalidBaseUrl` for any other scheme, or `Http` if the
    /// underlying client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(StoreError::InvalidBaseUrl(base_url.to_owned()));
        }
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// Build from `STICKYBOARD_API_URL`, falling back to [`DEFAULT_API_URL`].
    ///
    /// # Errors
    ///
    /// Same as [`HttpNoteStore::new`].
    pub fn from_env() -> Result<Self, StoreError> {
        let base_url = std::env::var(API_URL_VAR).unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::new(&base_url)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        id: Option<NoteId>,
    ) -> Result<T, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let mut message = response.json::<ErrorEnvelope>().await.unwrap_or_default().message;
        if message.is_empty() {
            message = status.canonical_reason().unwrap_or("request failed").to_owned();
        }
        Err(match (status, id) {
            (StatusCode::NOT_FOUND, Some(id)) => StoreError::NotFound(id),
            (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => StoreError::Rejected(message),
            _ => StoreError::Server { status: status.as_u16(), message },
        })
    }
}

#[async_trait::async_trait]
impl NoteStore for HttpNoteStore {
    async fn list_notes(&self) -> Result<Vec<Note>, StoreError> {
        self.send(self.client.get(self.url("/api/notes")), None).await
    }

    async fn create_note(&self, note: &NewNote) -> Result<Note, StoreError> {
        self.send(self.client.post(self.url("/api/notes")).json(note), None).await
    }

    async fn update_position(&self, id: NoteId, x: f64, y: f64) -> Result<Note, StoreError> {
        let body = PositionBody { position_x: x, position_y: y };
        self.send(self.client.patch(self.url(&format!("/api/notes/{id}/position"))).json(&body), Some(id))
            .await
    }

    async fn update_z_index(&self, id: NoteId, z_index: i64) -> Result<Note, StoreError> {
        let body = ZIndexBody { z_index };
        self.send(self.client.patch(self.url(&format!("/api/notes/{id}/z-index"))).json(&body), Some(id))
            .await
    }
}
