//! HTTP handlers for the books module.

use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use bookshelf_http::AppError;
use uuid::Uuid;

use super::models::{
    Book, BookInput, BookNoRating, DeleteConfirmation, LoginForm, ReadSomeParams, SeedReport,
};
use super::service::BookService;

type ApiResult<T> = Result<T, AppError>;

/// Routes relative to the module mount point.
pub fn router(service: BookService) -> Router {
    Router::new()
        .route("/", get(read_all_books).post(create_book))
        .route("/health", get(health_check))
        .route("/read_some_books", get(read_some_books))
        .route("/seed", post(seed_books))
        .route("/login", post(books_login))
        .route("/no_rating/{book_id}", get(read_book_no_rating))
        .route(
            "/{book_id}",
            get(get_book_by_id).put(update_book).delete(delete_book),
        )
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn read_all_books(State(service): State<BookService>) -> Json<Vec<Book>> {
    Json(service.list_all().await)
}

async fn read_some_books(
    State(service): State<BookService>,
    params: Result<Query<ReadSomeParams>, QueryRejection>,
) -> ApiResult<Json<Vec<Book>>> {
    let Query(params) = params?;
    let books = service.list_some(params.books_to_return).await?;
    Ok(Json(books))
}

async fn get_book_by_id(
    State(service): State<BookService>,
    book_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<Book>> {
    let Path(book_id) = book_id?;
    Ok(Json(service.get(book_id).await?))
}

async fn read_book_no_rating(
    State(service): State<BookService>,
    book_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<BookNoRating>> {
    let Path(book_id) = book_id?;
    Ok(Json(service.get_no_rating(book_id).await?))
}

async fn create_book(
    State(service): State<BookService>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let Json(input) = payload?;
    let book = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(service): State<BookService>,
    book_id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BookInput>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let Path(book_id) = book_id?;
    let Json(input) = payload?;
    Ok(Json(service.replace(book_id, input).await?))
}

async fn delete_book(
    State(service): State<BookService>,
    book_id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<DeleteConfirmation>> {
    let Path(book_id) = book_id?;
    let message = service.delete(book_id).await?;
    Ok(Json(DeleteConfirmation { message }))
}

async fn seed_books(State(service): State<BookService>) -> Json<SeedReport> {
    let inserted = service.seed().await;
    Json(SeedReport { inserted })
}

/// Echoes the submitted credentials. Nothing is authenticated.
async fn books_login(form: Result<Form<LoginForm>, FormRejection>) -> ApiResult<Json<LoginForm>> {
    let Form(login) = form?;
    tracing::debug!(username = %login.username, "login echo");
    Ok(Json(login))
}
