//! Stateless request builder and response parser for one resource.
//!
//! # Design
//! `ResourceRequests<R>` holds only a `base_url` and carries no mutable state
//! between calls. Each CRUD operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller (or [`crate::Client`]) executes the round-trip
//! in between.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Resource, Updatable};

/// Sans-IO request/response logic for resource `R`.
pub struct ResourceRequests<R> {
    base_url: String,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceRequests<R> {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for ResourceRequests<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRequests")
            .field("base_url", &self.base_url)
            .field("endpoint", &R::ENDPOINT)
            .finish()
    }
}

impl<R: Resource> ResourceRequests<R> {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            _resource: PhantomData,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `{base}{endpoint}`
    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, R::ENDPOINT.path())
    }

    /// `{base}{endpoint}/{id}`, with `id` percent-encoded as one path segment.
    ///
    /// Ids that would be read as a separator or a dot segment are rejected.
    pub fn item_url(&self, id: &str) -> Result<String, ApiError> {
        if matches!(id, "" | "." | "..") || id.contains(['/', '\\', '?', '#']) {
            return Err(ApiError::InvalidId(id.to_string()));
        }
        let collection = self.collection_url();
        let mut url = reqwest::Url::parse(&collection)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{collection}: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidBaseUrl(collection.clone()))?
            .push(id);
        Ok(url.into())
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest::bare(HttpMethod::Get, self.collection_url())
    }

    pub fn build_get(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::bare(HttpMethod::Get, self.item_url(id)?))
    }

    pub fn build_create(&self, draft: &R::Draft) -> Result<HttpRequest, ApiError> {
        let body = encode(draft)?;
        Ok(HttpRequest::json(HttpMethod::Post, self.collection_url(), body))
    }

    pub fn build_delete(&self, id: &str) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest::bare(HttpMethod::Delete, self.item_url(id)?))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<R>, ApiError> {
        decode(response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<R, ApiError> {
        decode(response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<R, ApiError> {
        decode(response)
    }

    /// The response body of a successful delete is ignored.
    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(response).map(drop)
    }
}

impl<R: Updatable> ResourceRequests<R> {
    pub fn build_update(&self, id: &str, patch: &R::Patch) -> Result<HttpRequest, ApiError> {
        let url = self.item_url(id)?;
        Ok(HttpRequest::json(HttpMethod::Put, url, encode(patch)?))
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<R, ApiError> {
        decode(response)
    }
}

fn encode<T: Serialize>(payload: &T) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn decode<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    let response = check_status(response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
    if response.is_success() {
        return Ok(response);
    }
    tracing::warn!(status = response.status, "request failed");
    Err(ApiError::from_status(response.status, response.body))
}
