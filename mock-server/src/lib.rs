use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize)]
pub struct CreateCategory {
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateNote {
    pub title: String,
    pub body: String,
    pub category_id: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub body: Option<String>,
    pub category_id: Option<String>,
}

#[derive(Default)]
pub struct Store {
    pub notes: HashMap<String, Note>,
    pub categories: HashMap<String, Category>,
}

pub type Db = Arc<RwLock<Store>>;

type Rejection = (StatusCode, String);

pub fn app() -> Router {
    let db: Db = Arc::default();
    Router::new()
        .route("/notes", get(list_notes).post(create_note))
        .route("/notes/{id}", get(get_note).put(update_note).delete(delete_note))
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", get(get_category).delete(delete_category))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn require_non_blank(field: &str, value: &str) -> Result<(), Rejection> {
    if value.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{field} must not be blank"),
        ));
    }
    Ok(())
}

fn not_found(kind: &str, id: &str) -> Rejection {
    (StatusCode::NOT_FOUND, format!("{kind} {id} not found"))
}

// --- notes ---

async fn list_notes(State(db): State<Db>) -> Json<Vec<Note>> {
    let store = db.read().await;
    Json(store.notes.values().cloned().collect())
}

async fn create_note(
    State(db): State<Db>,
    Json(input): Json<CreateNote>,
) -> Result<(StatusCode, Json<Note>), Rejection> {
    require_non_blank("title", &input.title)?;
    let note = Note {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        body: input.body,
        category_id: input.category_id,
    };
    db.write().await.notes.insert(note.id.clone(), note.clone());
    tracing::debug!(id = %note.id, "note created");
    Ok((StatusCode::CREATED, Json(note)))
}

async fn get_note(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Note>, Rejection> {
    let store = db.read().await;
    store
        .notes
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("note", &id))
}

async fn update_note(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<UpdateNote>,
) -> Result<Json<Note>, Rejection> {
    if let Some(title) = &input.title {
        require_non_blank("title", title)?;
    }
    let mut store = db.write().await;
    let note = store.notes.get_mut(&id).ok_or_else(|| not_found("note", &id))?;
    if let Some(title) = input.title {
        note.title = title;
    }
    if let Some(body) = input.body {
        note.body = body;
    }
    if let Some(category_id) = input.category_id {
        note.category_id = Some(category_id);
    }
    tracing::debug!(%id, "note updated");
    Ok(Json(note.clone()))
}

async fn delete_note(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    store
        .notes
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found("note", &id))
}

// --- categories ---

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    let store = db.read().await;
    Json(store.categories.values().cloned().collect())
}

async fn create_category(
    State(db): State<Db>,
    Json(input): Json<CreateCategory>,
) -> Result<(StatusCode, Json<Category>), Rejection> {
    require_non_blank("name", &input.name)?;
    let category = Category {
        id: Uuid::new_v4().to_string(),
        name: input.name,
    };
    db.write()
        .await
        .categories
        .insert(category.id.clone(), category.clone());
    tracing::debug!(id = %category.id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

async fn get_category(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Category>, Rejection> {
    let store = db.read().await;
    store
        .categories
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("category", &id))
}

async fn delete_category(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<StatusCode, Rejection> {
    let mut store = db.write().await;
    store
        .categories
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| not_found("category", &id))
}
