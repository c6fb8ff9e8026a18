use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use bookshelf_kernel::settings::Settings;
use serde_json::{json, Value};
use tower::ServiceExt;

const FIRST_ID: &str = "e57d756f-4ca3-46ee-a5dc-4d81000c36f7";
const SECOND_ID: &str = "6690321d-0882-4304-b38e-0a1d816d978a";

async fn app() -> Router {
    let settings = Settings::default();
    let registry = bookshelf_app::bootstrap(&settings).await.unwrap();
    bookshelf_http::build_router(&registry, &settings)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn ratings(books: &Value) -> Vec<i64> {
    books
        .as_array()
        .unwrap()
        .iter()
        .map(|book| book["rating"].as_i64().unwrap())
        .collect()
}

fn new_book(rating: i64) -> Value {
    json!({
        "id": "a12d756f-4ca3-46ee-a5dc-4d81000c36f7",
        "title": "book5 title",
        "author": "author5",
        "description": "description5",
        "rating": rating
    })
}

#[tokio::test]
async fn lists_seeded_books() {
    let app = app().await;
    let response = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ratings(&json_body(response).await), vec![90, 95, 100, 75]);
}

#[tokio::test]
async fn limited_listing_returns_prefix() {
    let app = app().await;
    let response = send(
        &app,
        Method::GET,
        "/api/books/read_some_books?books_to_return=2",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(ratings(&json_body(response).await), vec![90, 95]);

    let response = send(
        &app,
        Method::GET,
        "/api/books/read_some_books?books_to_return=10",
        None,
    )
    .await;
    assert_eq!(ratings(&json_body(response).await).len(), 4);
}

#[tokio::test]
async fn negative_limit_is_a_teapot() {
    let app = app().await;
    let response = send(
        &app,
        Method::GET,
        "/api/books/read_some_books?books_to_return=-1",
        None,
    )
    .await;
    assert_eq!(response.status().as_u16(), 418);

    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "negative_number");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("the input -1 is a Negative Number"));
}

#[tokio::test]
async fn non_numeric_limit_is_a_validation_error() {
    let app = app().await;
    let response = send(
        &app,
        Method::GET,
        "/api/books/read_some_books?books_to_return=many",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn gets_book_by_id_and_no_rating_view() {
    let app = app().await;
    let response = send(&app, Method::GET, &format!("/api/books/{FIRST_ID}"), None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let book = json_body(response).await;
    assert_eq!(book["rating"], 90);
    assert_eq!(book["title"], "book1 title");

    let response = send(
        &app,
        Method::GET,
        &format!("/api/books/no_rating/{FIRST_ID}"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let view = json_body(response).await;
    assert_eq!(view["author"], "author1");
    assert!(view.get("rating").is_none());
}

#[tokio::test]
async fn malformed_id_is_rejected() {
    let app = app().await;
    let response = send(&app, Method::GET, "/api/books/not-a-uuid", None).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let app = app().await;
    let uri = format!("/api/books/{SECOND_ID}");

    let response = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        format!("ID: {SECOND_ID} deleted.")
    );

    let response = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(ratings(&json_body(response).await), vec![90, 100, 75]);

    let response = send(&app, Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("x-header-error").unwrap(),
        "Nothing to be seen at UUID"
    );
    assert_eq!(json_body(response).await["error"]["message"], "Book not found");
}

#[tokio::test]
async fn create_with_bad_rating_is_rejected() {
    let app = app().await;
    let response = send(&app, Method::POST, "/api/books", Some(new_book(150))).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = json_body(response).await;
    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0]["field"], "rating");
    assert_eq!(details[0]["constraint"], "range");

    let response = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(ratings(&json_body(response).await).len(), 4);
}

#[tokio::test]
async fn create_then_get_returns_payload() {
    let app = app().await;
    let payload = new_book(42);
    let response = send(&app, Method::POST, "/api/books", Some(payload.clone())).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(json_body(response).await, payload);

    let uri = format!("/api/books/{}", payload["id"].as_str().unwrap());
    let response = send(&app, Method::GET, &uri, None).await;
    assert_eq!(json_body(response).await, payload);

    let response = send(&app, Method::POST, "/api/books", Some(payload)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn create_with_missing_field_is_rejected() {
    let app = app().await;
    let body = json!({ "title": "only a title", "rating": 10 });
    let response = send(&app, Method::POST, "/api/books", Some(body)).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json_body(response).await["error"]["code"], "validation_error");
}

#[tokio::test]
async fn replace_unknown_id_is_not_found() {
    let app = app().await;
    let body = json!({ "title": "t", "author": "a", "rating": 1 });
    let response = send(
        &app,
        Method::PUT,
        "/api/books/00000000-0000-4000-8000-000000000000",
        Some(body),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(ratings(&json_body(response).await), vec![90, 95, 100, 75]);
}

#[tokio::test]
async fn replace_overwrites_record() {
    let app = app().await;
    let uri = format!("/api/books/{FIRST_ID}");
    let body = json!({ "title": "retitled", "author": "someone", "rating": 12 });

    let response = send(&app, Method::PUT, &uri, Some(body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let stored = json_body(response).await;
    assert_eq!(stored["id"], FIRST_ID);
    assert_eq!(stored["title"], "retitled");
    assert!(stored.get("description").is_none());

    let response = send(&app, Method::GET, &uri, None).await;
    assert_eq!(json_body(response).await, stored);
}

#[tokio::test]
async fn seed_is_noop_on_populated_store() {
    let app = app().await;
    let response = send(&app, Method::POST, "/api/books/seed", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["inserted"], 0);
}

#[tokio::test]
async fn login_echoes_form_fields() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=reader&password=s3cret"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "username": "reader", "password": "s3cret" })
    );

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/books/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from("username=reader"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn serves_health_and_openapi() {
    let app = app().await;
    let response = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/api/books"]["post"].is_object());
    assert!(doc["paths"]["/api/books/{book_id}"]["delete"].is_object());
}

#[tokio::test]
async fn swagger_ui_serves_the_merged_document() {
    let settings = Settings::default();
    let registry = bookshelf_app::bootstrap(&settings).await.unwrap();

    // Swagger UI only gets the module paths if the merged document is a valid
    // typed OpenAPI object; otherwise it falls back to an empty stub.
    let merged = bookshelf_http::router::openapi_document(&registry);
    let typed: utoipa::openapi::OpenApi = serde_json::from_value(merged).unwrap();
    assert!(typed.paths.paths.contains_key("/api/books"));
    assert!(typed.paths.paths.contains_key("/api/books/{book_id}"));
    assert!(typed.paths.paths.contains_key("/api/books/read_some_books"));

    let app = bookshelf_http::build_router(&registry, &settings);
    let response = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/api/books/{book_id}"]["put"].is_object());
    assert!(doc["components"]["schemas"]["BookInput"].is_object());
}
