//! The HTTP surface: a single `/graphql` endpoint.
use async_graphql::{Request as GraphQLDocument, http::GraphiQLSource, parser::types::OperationType};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse, rejection::GraphQLRejection};
use axum::{
    Router,
    extract::State,
    http::{
        HeaderMap, StatusCode,
        header::{ACCEPT, ALLOW},
    },
    response::{Html, IntoResponse as _, Response},
    routing::get,
};
use bookshelf::BookshelfSchema;
use tower_http::trace::TraceLayer;

/// Where queries are accepted and the explorer is served.
pub(crate) const GRAPHQL_PATH: &str = "/graphql";

/// Runs a GraphQL request sent as a POST body.
async fn handler(
    State(schema): State<BookshelfSchema>,
    graphql_request: GraphQLRequest,
) -> GraphQLResponse {
    schema.execute(graphql_request.into_inner()).await.into()
}

/// Whether the operation the request asks to run is a mutation. Documents that do not parse
/// are left for the executor to report.
fn selects_mutation(document: &mut GraphQLDocument) -> bool {
    let operation_name = document.operation_name.clone();
    let Ok(parsed) = document.parsed_query() else {
        return false;
    };

    parsed.operations.iter().any(|(name, operation)| {
        operation.node.ty == OperationType::Mutation
            && operation_name.as_deref().is_none_or(|wanted| {
                name.is_some_and(|name| name.as_str() == wanted)
            })
    })
}

/// Runs a GraphQL request sent as URL parameters. A GET must not change anything, so
/// mutations answer 405 and point to POST.
async fn query_handler(
    State(schema): State<BookshelfSchema>,
    graphql_request: GraphQLRequest,
) -> Response {
    let mut document = graphql_request.into_inner();
    if document.query.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, "Must provide query string.").into_response();
    }
    if selects_mutation(&mut document) {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(ALLOW, "POST")],
            "Can only perform a mutation operation from a POST request.",
        )
            .into_response();
    }

    GraphQLResponse::from(schema.execute(document).await).into_response()
}

/// Serves the GraphiQL explorer, pointed at [`GRAPHQL_PATH`].
fn explorer() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// Whether the client asked for a web page rather than a GraphQL response.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains("text/html"))
}

/// Browsers get the explorer, every other client gets its query run.
async fn explorer_or_query_handler(
    schema: State<BookshelfSchema>,
    headers: HeaderMap,
    graphql_request: Result<GraphQLRequest, GraphQLRejection>,
) -> Response {
    if accepts_html(&headers) {
        return explorer().into_response();
    }

    match graphql_request {
        Ok(graphql_request) => query_handler(schema, graphql_request).await,
        Err(rejection) => rejection.into_response(),
    }
}

/// Builds the router. `GET /graphql` runs queries from the URL, and serves the explorer to
/// browsers when `graphiql` is set.
pub(crate) fn build_app(schema: BookshelfSchema, graphiql: bool) -> Router {
    let graphql = if graphiql {
        get(explorer_or_query_handler)
    } else {
        get(query_handler)
    };

    Router::new()
        .route(GRAPHQL_PATH, graphql.post(handler))
        .layer(TraceLayer::new_for_http())
        .with_state(schema)
}
