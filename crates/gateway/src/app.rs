//! HTTP surface: shared state, router and handlers.

use std::sync::Arc;

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::header::{AUTHORIZATION, CONTENT_TYPE},
    http::{HeaderValue, Method, StatusCode},
    middleware,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{self, RequestContext};
use crate::config::{CorsConfig, GatewayConfig};
use crate::datasources::{LaunchApi, UserApi};
use crate::db::{self, DbPool};
use crate::graphql::{build_schema, AppSchema};

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub schema: AppSchema,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(pool: DbPool, launch_api: Arc<LaunchApi>, config: GatewayConfig) -> Self {
        Self {
            pool,
            schema: build_schema(launch_api),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors);

    // Only GraphQL execution resolves the caller; the playground page does not.
    let graphql = get(graphql_playground).merge(post(graphql_handler).route_layer(
        middleware::from_fn_with_state(state.clone(), auth::middleware::context_middleware),
    ));

    Router::new()
        .route("/graphql", graphql)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();
    tracing::info!("CORS allowed origins: {:?}", config.allowed_origins);
    layer.allow_origin(AllowOrigin::list(origins)).allow_credentials(true)
}

async fn graphql_handler(
    State(state): State<AppState>,
    Extension(context): Extension<RequestContext>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let users = UserApi::new(state.pool.clone(), context.clone());
    let request = req.into_inner().data(users).data(context);
    state.schema.execute(request).await.into()
}

async fn graphql_playground(State(state): State<AppState>) -> Response {
    if !state.config.server.playground {
        return StatusCode::NOT_FOUND.into_response();
    }
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql"))).into_response()
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: &'static str,
    version: &'static str,
}

async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = db::health_check(&state.pool).await;
    let status = if database_ok { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (
        status,
        Json(HealthResponse {
            status: if database_ok { "ok" } else { "unhealthy" },
            database: if database_ok { "connected" } else { "unreachable" },
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::encode_token;
    use crate::config::LaunchesConfig;
    use crate::db::pool::test_pool;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app_with(pool: DbPool, config: GatewayConfig) -> Router {
        let launch_api = LaunchApi::new(&LaunchesConfig {
            base_url: "http://127.0.0.1:9/v2/".to_string(),
            ..LaunchesConfig::default()
        })
        .unwrap();
        build_router(AppState::new(pool, Arc::new(launch_api), config))
    }

    async fn test_app(config: GatewayConfig) -> Router {
        app_with(test_pool().await, config)
    }

    async fn user_count(pool: &DbPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    async fn post_graphql(app: Router, authorization: Option<&str>, query: &str) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/graphql")
            .header(CONTENT_TYPE, "application/json");
        if let Some(value) = authorization {
            builder = builder.header(AUTHORIZATION, value);
        }
        let request = builder
            .body(Body::from(json!({ "query": query }).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_authorization_header_sets_context_user() {
        let app = test_app(GatewayConfig::default()).await;
        let token = encode_token("a@a.a");

        let (status, body) = post_graphql(app, Some(&token), "{ me { id email } }").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": {"me": {"id": "1", "email": "a@a.a"}}}));
    }

    #[tokio::test]
    async fn test_bad_or_missing_header_is_anonymous() {
        let app = test_app(GatewayConfig::default()).await;
        let not_email = encode_token("hello");

        for header in [None, Some("!!!"), Some(not_email.as_str())] {
            let (status, body) = post_graphql(app.clone(), header, "{ me { email } }").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"data": {"me": null}}), "header {header:?}");
        }
    }

    #[tokio::test]
    async fn test_store_failure_during_context_resolution_is_500() {
        let pool = test_pool().await;
        sqlx::query("DROP TABLE trips").execute(&pool).await.unwrap();
        sqlx::query("DROP TABLE users").execute(&pool).await.unwrap();
        let app = app_with(pool, GatewayConfig::default());

        let token = encode_token("a@a.a");
        let (status, body) = post_graphql(app, Some(&token), "{ me { email } }").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], 500);
        assert!(body["error"].as_str().unwrap().starts_with("Database error"));
    }

    #[tokio::test]
    async fn test_playground_does_not_resolve_caller() {
        let pool = test_pool().await;
        let app = app_with(pool.clone(), GatewayConfig::default());

        let request = Request::builder()
            .uri("/graphql")
            .header(AUTHORIZATION, encode_token("a@a.a"))
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(user_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_health() {
        let app = test_app(GatewayConfig::default()).await;
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_playground_toggle() {
        let app = test_app(GatewayConfig::default()).await;
        let response = app
            .oneshot(Request::builder().uri("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let mut config = GatewayConfig::default();
        config.server.playground = false;
        let app = test_app(config).await;
        let response = app
            .oneshot(Request::builder().uri("/graphql").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
