//! Book HTTP handlers.
//!
//! ```text
//! GET    /api/v1/books
//! POST   /api/v1/books
//! GET    /api/v1/books/{book_id}
//! PUT    /api/v1/books/{book_id}
//! DELETE /api/v1/books/{book_id}
//! ```
//!
//! Commands answer `200 OK` with an empty body on success. A recorded domain
//! error is returned with its own status and the `ErrorResult` body.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    BookCommand, BookSummary, CreateBook, DeleteBook, GetBook, ListBooks, RequestContext,
    UpdateBook, book_errors,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::OwnerSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_body, parse_uuid};

/// Request payload for registering a book.
///
/// Missing fields deserialise as empty strings so that validation reports
/// them alongside every other rule failure.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookRequest {
    /// Book title.
    pub title: String,
    /// Book author.
    pub author: String,
    /// Book genre.
    pub genre: String,
}

/// Request payload for replacing a book's fields.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateBookRequest {
    /// Must equal the id in the route.
    pub id: Option<String>,
    /// Replacement title.
    pub title: String,
    /// Replacement author.
    pub author: String,
    /// Replacement genre.
    pub genre: String,
}

/// Book returned by the read endpoints.
pub type BookResponse = BookSummary;

/// JSON extractor settings shared by the book routes.
///
/// Unparseable bodies are answered with `400 invalidfields`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|error, _req| invalid_body(format!("Request body is invalid: {error}")).into())
}

async fn run_command(
    state: &HttpState,
    session: &OwnerSession,
    command: impl Into<BookCommand> + Send,
) -> ApiResult<HttpResponse> {
    let identity = session.identity()?;
    let ctx = RequestContext::new(&identity);
    state.dispatcher.execute(command, &ctx).await??;
    Ok(HttpResponse::Ok().finish())
}

/// List the caller's books ordered by title.
#[get("/books")]
pub async fn list_books(
    state: web::Data<HttpState>,
    session: OwnerSession,
) -> ApiResult<web::Json<Vec<BookResponse>>> {
    let identity = session.identity()?;
    let ctx = RequestContext::new(&identity);
    let books = state.dispatcher.query(ListBooks, &ctx).await?;
    Ok(web::Json(books))
}

/// Fetch one of the caller's books.
#[get("/books/{book_id}")]
pub async fn get_book(
    state: web::Data<HttpState>,
    session: OwnerSession,
    path: web::Path<String>,
) -> ApiResult<web::Json<BookResponse>> {
    let book_id = parse_uuid(&path.into_inner(), FieldName::new("BookId"))?;
    let identity = session.identity()?;
    let ctx = RequestContext::new(&identity);
    let book = state
        .dispatcher
        .query(GetBook::new(book_id), &ctx)
        .await?
        .ok_or_else(book_errors::book_not_found)?;
    Ok(web::Json(book))
}

/// Register a book for the caller.
#[post("/books")]
pub async fn create_book(
    state: web::Data<HttpState>,
    session: OwnerSession,
    payload: web::Json<CreateBookRequest>,
) -> ApiResult<HttpResponse> {
    let CreateBookRequest {
        title,
        author,
        genre,
    } = payload.into_inner();
    run_command(&state, &session, CreateBook::new(title, author, genre)).await
}

/// Replace the fields of one of the caller's books.
///
/// The body id must match the route id; a missing body id never matches.
#[put("/books/{book_id}")]
pub async fn update_book(
    state: web::Data<HttpState>,
    session: OwnerSession,
    path: web::Path<String>,
    payload: web::Json<UpdateBookRequest>,
) -> ApiResult<HttpResponse> {
    let book_id = parse_uuid(&path.into_inner(), FieldName::new("BookId"))?;
    let UpdateBookRequest {
        id,
        title,
        author,
        genre,
    } = payload.into_inner();
    let body_id = match id {
        Some(raw) => Some(parse_uuid(&raw, FieldName::new("Id"))?),
        None => None,
    };
    if body_id != Some(book_id) {
        return Err(book_errors::book_id_mismatch().into());
    }
    run_command(
        &state,
        &session,
        UpdateBook::new(book_id, title, author, genre),
    )
    .await
}

/// Remove one of the caller's books.
#[delete("/books/{book_id}")]
pub async fn delete_book(
    state: web::Data<HttpState>,
    session: OwnerSession,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let book_id = parse_uuid(&path.into_inner(), FieldName::new("BookId"))?;
    run_command(&state, &session, DeleteBook::new(book_id)).await
}

/// Register every book route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(list_books)
        .service(get_book)
        .service(create_book)
        .service(update_book)
        .service(delete_book);
}

#[cfg(test)]
#[path = "books_tests.rs"]
mod tests;
