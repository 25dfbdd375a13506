//! Integration tests for the web front end.

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, LOCATION};
use axum::http::{Request, Response, StatusCode};
use book_store::{Book, BookId, BookStore, InMemoryBookStore};
use common::NewBook;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use tower::ServiceExt;
use web::client::ReadinglistClient;
use web::source::{SourceError, StoreSource};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn dune() -> Book {
    Book {
        id: BookId::unassigned(),
        title: "Dune".to_string(),
        published: 1965,
        pages: 412,
        genres: vec!["sci-fi".to_string(), "classic".to_string()],
        rating: 4.8,
    }
}

/// Pages read from an in-memory store; submissions go to `endpoint`.
async fn setup_with_store(endpoint: &str) -> (axum::Router, InMemoryBookStore) {
    let store = InMemoryBookStore::new();
    let client = ReadinglistClient::new(endpoint).unwrap();
    let state = web::create_state_with_source(Arc::new(StoreSource(store.clone())), client);
    (web::create_app(state), store)
}

async fn get(app: &axum::Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn post_form(app: &axum::Router, body: &str) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/book/create")
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn body_text(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

fn created_response(id: i64) -> ResponseTemplate {
    ResponseTemplate::new(201)
        .insert_header("Location", format!("v1/books/{id}").as_str())
        .set_body_json(json!({
            "book": {
                "id": id,
                "title": "Dune",
                "published": 1965,
                "pages": 412,
                "genres": ["sci-fi", "classic"],
                "rating": 4.8
            }
        }))
}

#[tokio::test]
async fn test_home_lists_books() {
    let (app, store) = setup_with_store("http://127.0.0.1:9/v1/books").await;
    store.insert(&mut dune()).await.unwrap();

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );

    let html = body_text(response).await;
    assert!(html.contains("<a href=\"/book/view?id=1\">Dune</a>"));
}

#[tokio::test]
async fn test_home_with_no_books() {
    let (app, _) = setup_with_store("http://127.0.0.1:9/v1/books").await;

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("nothing to see here"));
}

#[tokio::test]
async fn test_view_book() {
    let (app, store) = setup_with_store("http://127.0.0.1:9/v1/books").await;
    store.insert(&mut dune()).await.unwrap();

    let response = get(&app, "/book/view?id=1").await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("<h2>Dune</h2>"));
    assert!(html.contains("<dd>sci-fi, classic</dd>"));
}

#[tokio::test]
async fn test_view_rejects_bad_ids_with_not_found() {
    let (app, store) = setup_with_store("http://127.0.0.1:9/v1/books").await;
    store.insert(&mut dune()).await.unwrap();

    for uri in [
        "/book/view",
        "/book/view?id=",
        "/book/view?id=abc",
        "/book/view?id=0",
        "/book/view?id=-4",
        "/book/view?id=2",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "uri {uri}");
    }
}

#[tokio::test]
async fn test_upstream_failures_are_internal_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/books"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/books/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReadinglistClient::new(format!("{}/v1/books", server.uri())).unwrap();
    let app = web::create_app(web::create_state(client));

    for uri in ["/", "/book/view?id=1"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "uri {uri}");
        assert_eq!(body_text(response).await, "Internal Server Error");
    }
}

#[tokio::test]
async fn test_unreadable_list_is_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/books"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = ReadinglistClient::new(format!("{}/v1/books", server.uri())).unwrap();
    let app = web::create_app(web::create_state(client));

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_create_form_renders() {
    let (app, _) = setup_with_store("http://127.0.0.1:9/v1/books").await;

    let response = get(&app, "/book/create").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<form"));
}

#[tokio::test]
async fn test_create_submit_forwards_json_and_redirects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/books"))
        .and(body_json(json!({
            "title": "Dune",
            "published": 1965,
            "pages": 412,
            "genres": ["sci-fi", "classic"],
            "rating": 4.8
        })))
        .respond_with(created_response(1))
        .expect(1)
        .mount(&server)
        .await;

    let (app, _) = setup_with_store(&format!("{}/v1/books", server.uri())).await;
    let body = "title=Dune&published=1965&pages=412&genres=sci-fi%2C+classic&rating=4.8";
    let response = post_form(&app, body).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[LOCATION], "/");
}

#[tokio::test]
async fn test_create_submit_rejects_bad_numbers_without_calling_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(created_response(1))
        .expect(0)
        .mount(&server)
        .await;

    let (app, _) = setup_with_store(&format!("{}/v1/books", server.uri())).await;

    for body in [
        "title=Dune&published=soon&pages=412&genres=&rating=4.8",
        "title=Dune&published=1965&pages=many&genres=&rating=4.8",
        "title=Dune&published=1965&pages=412&genres=&rating=",
        "title=Dune&published=+1965&pages=412&genres=&rating=4.8",
        "title=Dune",
    ] {
        let response = post_form(&app, body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {body}");
    }
}

#[tokio::test]
async fn test_create_submit_requires_form_encoding() {
    let (app, _) = setup_with_store("http://127.0.0.1:9/v1/books").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/book/create")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_submit_upstream_failure_is_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/books"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let (app, _) = setup_with_store(&format!("{}/v1/books", server.uri())).await;
    let response = post_form(
        &app,
        "title=&published=1965&pages=412&genres=sci-fi&rating=4.8",
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(response).await, "Internal Server Error");
}

#[tokio::test]
async fn test_unsupported_method_and_unknown_path() {
    let (app, _) = setup_with_store("http://127.0.0.1:9/v1/books").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/book/create")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    let response = get(&app, "/nowhere").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_client_reads_envelopes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "books": [{
                "id": 3,
                "title": "Solaris",
                "published": 1961,
                "pages": 204,
                "genres": [],
                "rating": 4.0
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/books/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = ReadinglistClient::new(format!("{}/v1/books", server.uri())).unwrap();

    let books = client.get_all().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].id, BookId::new(3));
    assert_eq!(books[0].title, "Solaris");

    let err = client.get(BookId::new(9)).await.unwrap_err();
    assert!(matches!(err, SourceError::NotFound));
}

#[tokio::test]
async fn test_client_create_returns_stored_book() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/books"))
        .respond_with(created_response(7))
        .mount(&server)
        .await;

    let client = ReadinglistClient::new(format!("{}/v1/books", server.uri())).unwrap();
    let new_book = NewBook {
        title: "Dune".to_string(),
        published: 1965,
        pages: 412,
        genres: vec!["sci-fi".to_string(), "classic".to_string()],
        rating: 4.8,
    };

    let book = client.create(&new_book).await.unwrap();
    assert_eq!(book.id, BookId::new(7));
}

#[tokio::test]
async fn test_end_to_end_against_api() {
    let api_state = api::create_state(
        InMemoryBookStore::new(),
        api::config::Environment::Development,
    );
    let metrics_handle = PrometheusBuilder::new().build_recorder().handle();
    let api_app = api::create_app(api_state, metrics_handle);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let api_addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, api_app).await.unwrap();
    });

    let client = ReadinglistClient::new(format!("http://{api_addr}/v1/books")).unwrap();
    let app = web::create_app(web::create_state(client));

    let response = post_form(
        &app,
        "title=Dune&published=1965&pages=412&genres=sci-fi&rating=4.8",
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = body_text(get(&app, "/").await).await;
    assert!(html.contains("<a href=\"/book/view?id=1\">Dune</a>"));

    let response = get(&app, "/book/view?id=1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("<dd>sci-fi</dd>"));

    let response = get(&app, "/book/view?id=2").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
