//! Domain DTOs for the notes API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration tests catch schema drift between the two crates.
//!
//! Each entity implements [`Resource`], which ties it to its endpoint and its
//! create payload. Entities that can be modified in place also implement
//! [`Updatable`]. The generic client is written once against these traits.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::endpoints::Endpoint;

/// An entity served from a collection endpoint.
pub trait Resource: DeserializeOwned {
    const ENDPOINT: Endpoint;

    /// Create payload: the entity without its server-assigned id.
    type Draft: Serialize;
}

/// A resource that accepts sparse updates via PUT.
pub trait Updatable: Resource {
    /// Only the fields present in the payload are changed on the server.
    type Patch: Serialize;
}

/// A category returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Request payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryDraft {
    pub name: String,
}

impl Resource for Category {
    const ENDPOINT: Endpoint = Endpoint::Categories;
    type Draft = CategoryDraft;
}

/// A note returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Request payload for creating a note.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

/// Request payload for updating a note. Fields left as `None` are omitted
/// from the JSON, never sent as `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl Resource for Note {
    const ENDPOINT: Endpoint = Endpoint::Notes;
    type Draft = NoteDraft;
}

impl Updatable for Note {
    type Patch = NotePatch;
}
