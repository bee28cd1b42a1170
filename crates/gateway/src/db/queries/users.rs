//! User queries.

use chrono::Utc;

use crate::db::models::UserRecord;
use crate::db::DbPool;
use crate::error::GatewayResult;

const USER_COLUMNS: &str = "id, email, profile_image, token, created_at, updated_at";

/// Return the user with this email, inserting it first when unknown.
pub async fn find_or_create_user(pool: &DbPool, email: &str) -> GatewayResult<UserRecord> {
    let now = Utc::now();
    let inserted = sqlx::query(
        r#"
        INSERT INTO users (email, created_at, updated_at)
        VALUES (?, ?, ?)
        ON CONFLICT (email) DO NOTHING
        "#,
    )
    .bind(email)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?
    .rows_affected();

    if inserted > 0 {
        tracing::info!(email = %email, "Created user");
    }

    let user = sqlx::query_as::<_, UserRecord>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
    ))
    .bind(email)
    .fetch_one(pool)
    .await?;

    Ok(user)
}
