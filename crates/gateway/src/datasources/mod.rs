//! Data sources the resolvers read from: the launches REST API and the user store.

pub mod cache;
pub mod launch;
pub mod user;

pub use launch::LaunchApi;
pub use user::UserApi;
