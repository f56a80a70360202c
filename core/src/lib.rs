//! Async API client for the notes service (notes and categories).
//!
//! # Overview
//! Each CRUD call composes an endpoint path, optionally a JSON body, and
//! hands the resulting `HttpRequest` to a `Transport`. The response is
//! classified by status and decoded into the resource type.
//!
//! # Design
//! - `ResourceRequests<R>` is the sans-IO half: `build_*` produces requests,
//!   `parse_*` consumes responses. Hosts doing their own I/O can use it
//!   directly.
//! - `Client<R, T>` runs one round-trip per call through a `Transport`.
//!   `NoteClient` and `CategoryClient` are the two instantiations; only
//!   resources implementing `Updatable` get `update`.
//! - Clients are stateless: a base URL and a transport, nothing else.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod requests;
pub mod transport;
pub mod types;

pub use client::{CategoryClient, Client, NoteClient};
pub use config::{ClientConfig, ConfigError};
pub use endpoints::Endpoint;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use requests::ResourceRequests;
pub use transport::{ReqwestTransport, Transport};
pub use types::{Category, CategoryDraft, Note, NoteDraft, NotePatch, Resource, Updatable};
