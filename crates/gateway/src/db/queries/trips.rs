//! Trip (booking) queries.

use chrono::Utc;

use crate::db::models::TripRecord;
use crate::db::DbPool;
use crate::error::GatewayResult;

/// Book `user_id` onto `launch_id`, returning the existing booking if there is one.
pub async fn find_or_create_trip(pool: &DbPool, user_id: i64, launch_id: i64) -> GatewayResult<TripRecord> {
    let now = Utc::now();
    sqlx::query(
        r#"
        INSERT INTO trips (user_id, launch_id, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT (user_id, launch_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(launch_id)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;

    let trip = sqlx::query_as::<_, TripRecord>(
        r#"
        SELECT id, launch_id, user_id, created_at, updated_at
        FROM trips
        WHERE user_id = ? AND launch_id = ?
        "#,
    )
    .bind(user_id)
    .bind(launch_id)
    .fetch_one(pool)
    .await?;

    Ok(trip)
}

/// Delete a booking. Returns the number of rows removed.
pub async fn delete_trip(pool: &DbPool, user_id: i64, launch_id: i64) -> GatewayResult<u64> {
    let result = sqlx::query("DELETE FROM trips WHERE user_id = ? AND launch_id = ?")
        .bind(user_id)
        .bind(launch_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

/// Launch ids booked by a user, oldest booking first.
pub async fn launch_ids_for_user(pool: &DbPool, user_id: i64) -> GatewayResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT launch_id FROM trips WHERE user_id = ? ORDER BY id")
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(ids)
}

pub async fn is_booked(pool: &DbPool, user_id: i64, launch_id: i64) -> GatewayResult<bool> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM trips WHERE user_id = ? AND launch_id = ?")
        .bind(user_id)
        .bind(launch_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}
