//! Error types for the gateway.
//!
//! `GatewayError` covers store, auth and upstream failures. It converts
//! into an axum response for the HTTP layer and, through async-graphql's
//! blanket `From<Display>` conversion, into a GraphQL error inside resolvers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The operation needs a logged-in user
    #[error("Authentication error: {0}")]
    Unauthenticated(String),

    /// Launches provider failure
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            GatewayError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            GatewayError::Migration(e) => {
                tracing::error!(error = %e, "Migration error");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            GatewayError::Unauthenticated(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            GatewayError::Upstream(msg) => {
                tracing::warn!(error = %msg, "Upstream error");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
