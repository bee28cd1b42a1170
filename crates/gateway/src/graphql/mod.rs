pub mod pagination;
pub mod schema;
pub mod types;

pub use schema::{build_schema, AppSchema, MutationRoot, QueryRoot};
