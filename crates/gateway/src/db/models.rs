use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// CREATE TABLE users (
//     id INTEGER PRIMARY KEY AUTOINCREMENT,
//     email TEXT NOT NULL UNIQUE,
//     profile_image TEXT,
//     token TEXT,
//     created_at TEXT NOT NULL,
//     updated_at TEXT NOT NULL
// );

#[derive(sqlx::FromRow, Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub profile_image: Option<String>,
    pub token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// CREATE TABLE trips (
//     id INTEGER PRIMARY KEY AUTOINCREMENT,
//     launch_id INTEGER NOT NULL,
//     user_id INTEGER NOT NULL REFERENCES users (id),
//     created_at TEXT NOT NULL,
//     updated_at TEXT NOT NULL,
//     UNIQUE (user_id, launch_id)
// );

#[derive(sqlx::FromRow, Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TripRecord {
    pub id: i64,
    pub launch_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
