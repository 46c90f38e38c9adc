//! End-to-end tests driving the assembled router in-process.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use libris_kernel::settings::Settings;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    libris_app::build_app(&Settings::default()).unwrap()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, book) = send_json(app, Method::POST, "/books", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    book
}

#[tokio::test]
async fn dune_lifecycle() {
    let app = app();

    let book = create(&app, json!({"title": "Dune", "rating": 4.5})).await;
    assert_eq!(
        book,
        json!({"id": 1, "title": "Dune", "rating": 4.5, "description": null, "archived": false})
    );

    let (status, updated) = send_json(&app, Method::PUT, "/books/1", Some(json!({"rating": 5}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        updated,
        json!({"id": 1, "title": "Dune", "rating": 5.0, "description": null, "archived": false})
    );

    let (status, body) = send(&app, Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, error) = send_json(&app, Method::GET, "/books/1", None).await;
    assert_eq!(status, StatusCode::GONE);
    assert_eq!(error["error"]["code"], "gone");
    assert_eq!(error["error"]["message"], "Gone");

    let (status, body) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
}

#[tokio::test]
async fn list_returns_only_active_books_in_order() {
    let app = app();
    let (status, _) = send(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for title in ["A", "B", "C"] {
        create(&app, json!({"title": title, "rating": 3})).await;
    }
    let (status, _) = send(&app, Method::DELETE, "/books/2", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, books) = send_json(&app, Method::GET, "/books", None).await;
    assert_eq!(status, StatusCode::OK);
    let titles: Vec<_> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[tokio::test]
async fn create_validation_failures_are_422() {
    let app = app();

    for body in [
        json!({"title": "", "rating": 3}),
        json!({"title": "X", "rating": 7}),
        json!({"title": "X", "rating": -1}),
        json!({"rating": 3}),
        json!({"title": "X"}),
        json!({"title": "X", "rating": "high"}),
    ] {
        let (status, error) = send_json(&app, Method::POST, "/books", Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "body {body}");
        assert_eq!(error["error"]["code"], "validation_error");
    }

    // Rejected creates do not consume ids
    let book = create(&app, json!({"title": "First", "rating": 1})).await;
    assert_eq!(book["id"], 1);
}

#[tokio::test]
async fn validation_error_names_the_field() {
    let app = app();
    let (_, error) = send_json(&app, Method::POST, "/books", Some(json!({"title": "", "rating": 1}))).await;
    assert_eq!(error["error"]["details"][0]["field"], "title");
    assert_eq!(error["error"]["message"], "title must not be empty");
}

#[tokio::test]
async fn update_is_partial() {
    let app = app();
    create(
        &app,
        json!({"title": "Emma", "rating": 3.5, "description": "Matchmaking"}),
    )
    .await;

    let (status, book) = send_json(&app, Method::PUT, "/books/1", Some(json!({"title": "Persuasion"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book["title"], "Persuasion");
    assert_eq!(book["rating"], 3.5);
    assert_eq!(book["description"], "Matchmaking");

    let (_, book) = send_json(&app, Method::PUT, "/books/1", Some(json!({"description": null}))).await;
    assert_eq!(book["description"], Value::Null);
    assert_eq!(book["title"], "Persuasion");

    // archived is not updatable through PUT
    let (_, book) = send_json(&app, Method::PUT, "/books/1", Some(json!({"archived": true}))).await;
    assert_eq!(book["archived"], false);
}

#[tokio::test]
async fn update_errors() {
    let app = app();
    let (status, error) = send_json(&app, Method::PUT, "/books/9", Some(json!({"rating": 2}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["error"]["message"], "Not Found");

    create(&app, json!({"title": "Dune", "rating": 4.5})).await;
    for body in [json!({"rating": 6}), json!({"title": ""}), json!({"title": null})] {
        let (status, _) = send_json(&app, Method::PUT, "/books/1", Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    let (_, book) = send_json(&app, Method::GET, "/books/1", None).await;
    assert_eq!(book["title"], "Dune");
    assert_eq!(book["rating"], 4.5);
}

#[tokio::test]
async fn get_and_delete_id_errors() {
    let app = app();
    create(&app, json!({"title": "Dune", "rating": 4.5})).await;

    for method in [Method::GET, Method::DELETE] {
        let (status, error) = send_json(&app, method.clone(), "/books/-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["error"]["message"], "Invalid ID");

        let (status, _) = send_json(&app, method.clone(), "/books/404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_json(&app, method, "/books/abc", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    let (status, _) = send(&app, Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, "/books/1", None).await;
    assert_eq!(status, StatusCode::GONE);
}

#[tokio::test]
async fn html_views_render_catalog() {
    let app = app();

    let (status, page) = send(&app, Method::GET, "/books/html", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(page).unwrap().contains("No books available."));

    create(&app, json!({"title": "Dune & Sons", "rating": 4.5, "description": "Sand"})).await;
    create(&app, json!({"title": "Gone Girl", "rating": 3})).await;
    send(&app, Method::DELETE, "/books/2", None).await;

    let (_, page) = send(&app, Method::GET, "/books/html", None).await;
    let page = String::from_utf8(page).unwrap();
    assert!(page.contains("Dune &amp; Sons"));
    assert!(!page.contains("Gone Girl"));

    let (status, page) = send(&app, Method::GET, "/books/1/html", None).await;
    assert_eq!(status, StatusCode::OK);
    let page = String::from_utf8(page).unwrap();
    assert!(page.contains("<h1>Dune &amp; Sons</h1>"));
    assert!(page.contains("<p>Sand</p>"));

    let (status, _) = send(&app, Method::GET, "/books/2/html", None).await;
    assert_eq!(status, StatusCode::GONE);
    let (status, _) = send(&app, Method::GET, "/books/3/html", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn secure_data_requires_shared_secret() {
    let app = app();

    let (status, body) = send_json(&app, Method::GET, "/secure-data?token=secret123", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Secure data access granted"}));

    for uri in ["/secure-data", "/secure-data?token=wrong"] {
        let (status, error) = send_json(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error["error"]["message"], "Unauthorized");
    }
}

#[tokio::test]
async fn secure_data_uses_configured_secret() {
    let mut settings = Settings::default();
    settings.auth.shared_secret = "rotated".to_string();
    let app = libris_app::build_app(&settings).unwrap();

    let (status, _) = send(&app, Method::GET, "/secure-data?token=secret123", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = send(&app, Method::GET, "/secure-data?token=rotated", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn demo_endpoints() {
    let app = app();

    let (_, body) = send_json(&app, Method::GET, "/hello", None).await;
    assert_eq!(body, json!({"message": "Hello, world!"}));

    let (_, body) = send_json(&app, Method::GET, "/greet/Ada", None).await;
    assert_eq!(body, json!({"message": "Hello, Ada!"}));

    let (status, body) = send_json(&app, Method::GET, "/square?number=7", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"number": 7, "square": 49}));

    let (_, body) = send(&app, Method::GET, "/square?number=-3037000500", None).await;
    assert_eq!(
        String::from_utf8(body).unwrap(),
        r#"{"number":-3037000500,"square":9223372037000250000}"#
    );

    let (status, _) = send_json(&app, Method::GET, "/square?number=seven", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let (status, _) = send_json(&app, Method::GET, "/square", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, body) = send_json(&app, Method::GET, "/api/users", None).await;
    assert_eq!(body, json!([{"id": 1, "name": "Alice"}, {"id": 2, "name": "Bob"}]));

    let (_, body) = send_json(&app, Method::GET, "/api/users/5", None).await;
    assert_eq!(body, json!({"id": 5, "name": "User 5"}));
}

#[tokio::test]
async fn operational_endpoints() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/healthz", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok".to_vec());

    let (status, spec) = send_json(&app, Method::GET, "/docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    for path in ["/books", "/books/{id}", "/secure-data", "/square", "/api/users"] {
        assert!(spec["paths"][path].is_object(), "missing {path}");
    }
}
