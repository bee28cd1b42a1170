//! Store queries.
//!
//! Find-or-create is `INSERT ... ON CONFLICT DO NOTHING` followed by a
//! `SELECT`; the unique constraints on `users.email` and
//! `trips (user_id, launch_id)` keep concurrent callers from creating
//! duplicates.

pub mod trips;
pub mod users;
