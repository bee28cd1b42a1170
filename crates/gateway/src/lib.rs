//! Launchpad Gateway Library
//!
//! A GraphQL API gateway for browsing space launches and booking trips on them.
//!
//! - **Launches** come from an upstream REST provider (SpaceX v2 style) and are
//!   shaped into GraphQL types, with a short-lived response cache.
//! - **Users and trips** live in a SQLite store accessed through SQLx.
//! - **Authentication** is a per-request lookup: the `authorization` header is
//!   a base64-encoded email, resolved (or created) on every request.
//!
//! ## Modules
//!
//! - [`app`]: Router, shared state and HTTP handlers
//! - [`auth`]: Request context resolution and middleware
//! - [`config`]: Configuration loading from files and environment variables
//! - [`datasources`]: Launches REST client and users data source
//! - [`db`]: Pool, migrations, models and queries
//! - [`error`]: Error types with Axum integration
//! - [`graphql`]: Schema, resolvers and pagination

pub mod app;
pub mod auth;
pub mod config;
pub mod datasources;
pub mod db;
pub mod error;
pub mod graphql;
pub mod result_ext;

pub use error::{GatewayError, GatewayResult};
pub use result_ext::ResultExt;
