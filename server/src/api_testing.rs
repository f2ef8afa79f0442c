//! HTTP-level tests of the `/graphql` endpoint, in-process and over a real socket.
use crate::app::build_app;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header::{ACCEPT, ALLOW, CONTENT_TYPE}},
};
use bookshelf::{Store, build_schema};
use serde_json::{Value, json};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower::ServiceExt as _;

/// A router over a freshly seeded store.
fn fresh_app(graphiql: bool) -> Router {
    build_app(build_schema(Store::with_fixtures()), graphiql)
}

/// Builds a `POST /graphql` request carrying `document`.
/// # Panics
/// Panics if the request cannot be built.
fn graphql_request(document: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/graphql")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "query": document }).to_string()))
        .expect("Failed to build GraphQL request")
}

/// Reads a whole response body as JSON.
/// # Panics
/// Panics if the body cannot be read or is not JSON.
async fn json_body(body: Body) -> Value {
    let bytes = to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Failed to deserialize response body")
}

///# Panics
/// Panics if the TCP listener cannot bind to the requested address
/// or if the local address cannot be retrieved.
async fn spawn_app() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addrs = listener
        .local_addr()
        .expect("Failed to get local address from listener");
    let service = fresh_app(true);
    drop(tokio::spawn(async move {
        axum::serve(listener, service)
            .await
            .expect("Server failed to start");
    }));

    addrs
}

/// # Panics
/// Panics if the query fails or does not list the fixture books.
#[tokio::test]
async fn post_query_lists_books() {
    let response = fresh_app(true)
        .oneshot(graphql_request("{ books { id } }"))
        .await
        .expect("Failed to execute query request");

    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response.into_body()).await;
    let books = body["data"]["books"]
        .as_array()
        .expect("books should be a list");
    assert_eq!(books.len(), 8);
    assert_eq!(books[0], json!({ "id": 1 }));
    assert_eq!(books[7], json!({ "id": 8 }));
}

/// # Panics
/// Panics if the nested author lookup is wrong.
#[tokio::test]
async fn post_query_resolves_relations() {
    let response = fresh_app(false)
        .oneshot(graphql_request(
            "{ book(id: 7) { name author { name books { id } } } }",
        ))
        .await
        .expect("Failed to execute query request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response.into_body()).await,
        json!({
            "data": {
                "book": {
                    "name": "The Way of Shadows",
                    "author": { "name": "Brent Weeks", "books": [{ "id": 7 }, { "id": 8 }] }
                }
            }
        })
    );
}

/// # Panics
/// Panics if a malformed body is not rejected.
#[tokio::test]
async fn malformed_body_is_bad_request() {
    let response = fresh_app(true)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/graphql")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .expect("Failed to build request"),
        )
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Builds a `GET /graphql` request with the given query string and `Accept` header.
/// # Panics
/// Panics if the request cannot be built.
fn get_request(query_string: &str, accept: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/graphql{query_string}"))
        .header(ACCEPT, accept)
        .body(Body::empty())
        .expect("Failed to build GET request")
}

/// # Panics
/// Panics if a browser is not served the explorer as HTML.
#[tokio::test]
async fn get_from_browser_serves_explorer() {
    let response = fresh_app(true)
        .oneshot(get_request("", "text/html,application/xhtml+xml"))
        .await
        .expect("Failed to execute explorer request");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/html"), "{content_type}");
}

/// # Panics
/// Panics if a query in the URL is not executed, with or without the explorer.
#[tokio::test]
async fn get_query_is_executed() {
    for graphiql in [true, false] {
        let response = fresh_app(graphiql)
            .oneshot(get_request(
                "?query=%7Bbooks%7Bid%7D%7D",
                "application/json",
            ))
            .await
            .expect("Failed to execute query request");

        assert_eq!(response.status(), StatusCode::OK, "graphiql {graphiql}");
        let body = json_body(response.into_body()).await;
        assert_eq!(
            body["data"]["books"].as_array().map(Vec::len),
            Some(8),
            "graphiql {graphiql}"
        );
    }
}

/// # Panics
/// Panics if a mutation sent with GET is run instead of refused.
#[tokio::test]
async fn get_mutation_is_refused() {
    let store = Store::with_fixtures();
    let app = build_app(build_schema(store.clone()), true);

    // mutation { addBook(authorId: 2, name: "X") { id } }
    let response = app
        .oneshot(get_request(
            "?query=mutation%7BaddBook(authorId%3A2%2Cname%3A%22X%22)%7Bid%7D%7D",
            "application/json",
        ))
        .await
        .expect("Failed to execute mutation request");

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        response
            .headers()
            .get(ALLOW)
            .and_then(|value| value.to_str().ok()),
        Some("POST")
    );
    assert_eq!(store.list_books().len(), 8);
}

/// # Panics
/// Panics if a GET without a query is not rejected when the explorer is disabled.
#[tokio::test]
async fn get_without_query_is_bad_request() {
    let response = fresh_app(false)
        .oneshot(get_request("", "text/html"))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// # Panics
/// Panics if an unknown path is not answered with 404.
#[tokio::test]
async fn unknown_path_is_not_found() {
    let response = fresh_app(true)
        .oneshot(
            Request::builder()
                .uri("/books")
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
///# Panics
/// Panics if the application cannot be spawned, a request fails,
/// or the mutations do not behave as clients expect.
async fn mutations_over_http() {
    let addrs = spawn_app().await;
    let client = reqwest::Client::new();
    let url = format!("http://{addrs}/graphql");

    let added: Value = client
        .post(&url)
        .json(&json!({
            "query": "mutation Add($authorId: Int!, $name: String!) { addBook(authorId: $authorId, name: $name) { id name authorID } }",
            "variables": { "authorId": 2, "name": "The Silmarillion" }
        }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse add response");

    assert_eq!(
        added,
        json!({ "data": { "addBook": { "id": 9, "name": "The Silmarillion", "authorID": 2 } } })
    );

    let removed: Value = client
        .post(&url)
        .json(&json!({ "query": "mutation { removeBook(id: 1) { id } }" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse remove response");

    assert_eq!(removed, json!({ "data": { "removeBook": { "id": 1 } } }));

    let listed: Value = client
        .post(&url)
        .json(&json!({ "query": "{ book(id: 1) { id } author(id: 2) { books { id } } }" }))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse list response");

    assert_eq!(listed["data"]["book"], json!({ "id": 1 }));
    assert_eq!(
        listed["data"]["author"]["books"],
        json!([{ "id": 4 }, { "id": 5 }, { "id": 6 }, { "id": 9 }])
    );
}
