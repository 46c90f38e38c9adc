//! JSON handlers for `/books`.

pub mod html;

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use libris_http::error::{AppError, AppResult};
use serde_json::json;

use super::{
    models::{Book, BookId, CreateBook, UpdateBook},
    store::{BookStore, CatalogError},
};

pub type SharedStore = Arc<BookStore>;

/// Routes served by the books module.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route("/books/html", get(html::list_page))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/books/{id}/html", get(html::detail_page))
        .with_state(store)
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation { field, reason } => AppError::validation(
                vec![json!({"field": field, "error": reason})],
                err.to_string(),
            ),
            CatalogError::NotFound(_) => AppError::not_found("Not Found"),
            CatalogError::Gone(_) => AppError::gone("Gone"),
            CatalogError::InvalidId(_) => AppError::bad_request("Invalid ID"),
            CatalogError::NoContent => AppError::NoContent,
        }
    }
}

/// Unwraps the `{id}` segment, turning a non-integer into a 422.
pub(crate) fn book_id(path: Result<Path<BookId>, PathRejection>) -> AppResult<BookId> {
    let Path(id) = path?;
    Ok(id)
}

async fn create_book(
    State(store): State<SharedStore>,
    payload: Result<Json<CreateBook>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let Json(input) = payload?;
    let book = store.create(input)?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(store): State<SharedStore>,
    path: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<UpdateBook>, JsonRejection>,
) -> AppResult<Json<Book>> {
    let id = book_id(path)?;
    let Json(patch) = payload?;
    Ok(Json(store.update(id, patch)?))
}

async fn list_books(State(store): State<SharedStore>) -> AppResult<Json<Vec<Book>>> {
    Ok(Json(store.list_active()?))
}

async fn get_book(
    State(store): State<SharedStore>,
    path: Result<Path<BookId>, PathRejection>,
) -> AppResult<Json<Book>> {
    let id = book_id(path)?;
    Ok(Json(store.get(id)?))
}

async fn delete_book(
    State(store): State<SharedStore>,
    path: Result<Path<BookId>, PathRejection>,
) -> AppResult<StatusCode> {
    let id = book_id(path)?;
    store.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}
