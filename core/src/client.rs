//! Async CRUD client, generic over resource and transport.
//!
//! # Design
//! `Client<R, T>` pairs the sans-IO `ResourceRequests<R>` with a `Transport`.
//! Each method is one round-trip: build, send, parse. No state is kept
//! between calls, so concurrent calls on one client need no coordination.

use std::fmt;

use crate::config::{ClientConfig, ConfigError};
use crate::error::ApiError;
use crate::requests::ResourceRequests;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{Category, Note, Resource, Updatable};

/// CRUD accessors for notes: list, get, create, update, delete.
pub type NoteClient<T = ReqwestTransport> = Client<Note, T>;

/// CRUD accessors for categories: list, get, create, delete.
pub type CategoryClient<T = ReqwestTransport> = Client<Category, T>;

pub struct Client<R, T> {
    requests: ResourceRequests<R>,
    transport: T,
}

impl<R, T: Clone> Clone for Client<R, T> {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl<R: Resource, T: fmt::Debug> fmt::Debug for Client<R, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("requests", &self.requests)
            .field("transport", &self.transport)
            .finish()
    }
}

impl<R: Resource> Client<R, ReqwestTransport> {
    pub fn from_config(config: &ClientConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(&config.base_url, ReqwestTransport::from_config(config)?))
    }
}

impl<R: Resource, T: Transport> Client<R, T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            requests: ResourceRequests::new(base_url),
            transport,
        }
    }

    pub fn requests(&self) -> &ResourceRequests<R> {
        &self.requests
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET the collection endpoint.
    pub async fn list(&self) -> Result<Vec<R>, ApiError> {
        let response = self.transport.send(self.requests.build_list()).await?;
        self.requests.parse_list(response)
    }

    /// GET `{endpoint}/{id}`.
    pub async fn get_by_id(&self, id: &str) -> Result<R, ApiError> {
        let request = self.requests.build_get(id)?;
        let response = self.transport.send(request).await?;
        self.requests.parse_get(response)
    }

    /// POST `draft` to the collection endpoint; returns the entity with its
    /// server-assigned id.
    pub async fn create(&self, draft: &R::Draft) -> Result<R, ApiError> {
        let request = self.requests.build_create(draft)?;
        let response = self.transport.send(request).await?;
        self.requests.parse_create(response)
    }

    /// DELETE `{endpoint}/{id}`.
    pub async fn delete_by_id(&self, id: &str) -> Result<(), ApiError> {
        let request = self.requests.build_delete(id)?;
        let response = self.transport.send(request).await?;
        self.requests.parse_delete(response)
    }
}

impl<R: Updatable, T: Transport> Client<R, T> {
    /// PUT only the fields present in `patch` to `{endpoint}/{id}`.
    pub async fn update(&self, id: &str, patch: &R::Patch) -> Result<R, ApiError> {
        let request = self.requests.build_update(id, patch)?;
        let response = self.transport.send(request).await?;
        self.requests.parse_update(response)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use crate::types::{CategoryDraft, NoteDraft, NotePatch};

    /// Replays canned results and records every request it is handed.
    #[derive(Default)]
    struct Recording {
        replies: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl Recording {
        fn replying(replies: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                sent: Mutex::default(),
            }
        }

        fn sent(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Transport for Recording {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.sent.lock().unwrap().push(request);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("no reply queued")
        }
    }

    const NOTE_42: &str = r#"{"id":"42","title":"x","body":"y"}"#;

    fn note_42() -> Note {
        Note {
            id: "42".to_string(),
            title: "x".to_string(),
            body: "y".to_string(),
            category_id: None,
        }
    }

    fn notes(replies: Vec<Result<HttpResponse, ApiError>>) -> NoteClient<Recording> {
        Client::new("http://api.test", Recording::replying(replies))
    }

    fn categories(replies: Vec<Result<HttpResponse, ApiError>>) -> CategoryClient<Recording> {
        Client::new("http://api.test", Recording::replying(replies))
    }

    #[tokio::test]
    async fn get_by_id_issues_one_get() {
        let client = notes(vec![Ok(HttpResponse::new(200, NOTE_42))]);
        let note = client.get_by_id("42").await.unwrap();
        assert_eq!(note, note_42());

        let sent = client.transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Get);
        assert_eq!(sent[0].path, "http://api.test/notes/42");
    }

    #[tokio::test]
    async fn create_then_get_returns_same_note() {
        let client = notes(vec![
            Ok(HttpResponse::new(201, NOTE_42)),
            Ok(HttpResponse::new(200, NOTE_42)),
        ]);
        let draft = NoteDraft {
            title: "x".to_string(),
            body: "y".to_string(),
            category_id: None,
        };
        let created = client.create(&draft).await.unwrap();
        let fetched = client.get_by_id(&created.id).await.unwrap();
        assert_eq!(created, fetched);

        let sent = client.transport().sent();
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert_eq!(sent[0].path, "http://api.test/notes");
        let body: serde_json::Value =
            serde_json::from_str(sent[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"title": "x", "body": "y"}));
    }

    #[tokio::test]
    async fn update_sends_only_present_fields() {
        let client = notes(vec![Ok(HttpResponse::new(
            200,
            r#"{"id":"42","title":"x","body":"changed"}"#,
        ))]);
        let patch = NotePatch {
            body: Some("changed".to_string()),
            ..NotePatch::default()
        };
        let updated = client.update("42", &patch).await.unwrap();
        assert_eq!(updated.body, "changed");

        let sent = client.transport().sent();
        assert_eq!(sent[0].method, HttpMethod::Put);
        assert_eq!(sent[0].path, "http://api.test/notes/42");
        assert_eq!(sent[0].body.as_deref(), Some(r#"{"body":"changed"}"#));
    }

    #[tokio::test]
    async fn delete_resolves_to_unit() {
        let client = categories(vec![Ok(HttpResponse::new(204, ""))]);
        client.delete_by_id("c1").await.unwrap();

        let sent = client.transport().sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Delete);
        assert_eq!(sent[0].path, "http://api.test/categories/c1");
    }

    #[tokio::test]
    async fn deleting_missing_category_is_not_found() {
        let client = categories(vec![Ok(HttpResponse::new(404, "not found"))]);
        let err = client.delete_by_id("missing-id").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn list_and_create_categories() {
        let client = categories(vec![
            Ok(HttpResponse::new(200, "[]")),
            Ok(HttpResponse::new(201, r#"{"id":"c1","name":"Work"}"#)),
        ]);
        assert!(client.list().await.unwrap().is_empty());
        let created = client
            .create(&CategoryDraft {
                name: "Work".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(
            created,
            Category {
                id: "c1".to_string(),
                name: "Work".to_string()
            }
        );
    }

    #[tokio::test]
    async fn transport_failure_passes_through() {
        let client = notes(vec![Err(ApiError::Network("connection reset".to_string()))]);
        let err = client.list().await.unwrap_err();
        assert!(matches!(err, ApiError::Network(msg) if msg == "connection reset"));
    }

    #[tokio::test]
    async fn invalid_id_never_reaches_transport() {
        let client = notes(Vec::new());
        for id in ["", ".", "..", "a\\b"] {
            let err = client.delete_by_id(id).await.unwrap_err();
            assert!(matches!(err, ApiError::InvalidId(_)), "{id:?}");
        }
        assert!(client.transport().sent().is_empty());
    }

    #[tokio::test]
    async fn repeated_gets_are_equal() {
        let client = notes(vec![
            Ok(HttpResponse::new(200, NOTE_42)),
            Ok(HttpResponse::new(200, NOTE_42)),
        ]);
        let first = client.get_by_id("42").await.unwrap();
        let second = client.get_by_id("42").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(client.transport().sent().len(), 2);
    }
}
