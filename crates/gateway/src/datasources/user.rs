//! Users data source: user lookup and trip bookings for the current caller.

use crate::auth::{self, RequestContext};
use crate::db::queries::{trips, users};
use crate::db::{DbPool, TripRecord, UserRecord};
use crate::error::{GatewayError, GatewayResult};

/// Store access bound to one request's [`RequestContext`].
#[derive(Clone, Debug)]
pub struct UserApi {
    pool: DbPool,
    context: RequestContext,
}

impl UserApi {
    pub fn new(pool: DbPool, context: RequestContext) -> Self {
        Self { pool, context }
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    fn require_user_id(&self) -> GatewayResult<i64> {
        self.context
            .user_id()
            .ok_or_else(|| GatewayError::Unauthenticated("you must be logged in".to_string()))
    }

    /// Find or create the caller's user. An authenticated caller's own email
    /// wins over `email`; returns `None` when no valid email is available.
    pub async fn find_or_create_user(&self, email: Option<&str>) -> GatewayResult<Option<UserRecord>> {
        match self.context.email().or(email) {
            Some(email) if auth::is_email(email) => Ok(Some(users::find_or_create_user(&self.pool, email).await?)),
            _ => Ok(None),
        }
    }

    /// Book every launch. A store failure aborts the whole batch.
    pub async fn book_trips(&self, launch_ids: &[i64]) -> GatewayResult<Vec<TripRecord>> {
        self.require_user_id()?;

        let mut booked = Vec::with_capacity(launch_ids.len());
        for launch_id in launch_ids {
            booked.push(self.book_trip(*launch_id).await?);
        }
        Ok(booked)
    }

    pub async fn book_trip(&self, launch_id: i64) -> GatewayResult<TripRecord> {
        let user_id = self.require_user_id()?;
        trips::find_or_create_trip(&self.pool, user_id, launch_id).await
    }

    /// Cancel the caller's booking. `false` when there was nothing to cancel.
    pub async fn cancel_trip(&self, launch_id: i64) -> GatewayResult<bool> {
        let user_id = self.require_user_id()?;
        let removed = trips::delete_trip(&self.pool, user_id, launch_id).await?;
        Ok(removed > 0)
    }

    pub async fn launch_ids_for(&self, user_id: i64) -> GatewayResult<Vec<i64>> {
        trips::launch_ids_for_user(&self.pool, user_id).await
    }

    /// Always `false` for anonymous callers.
    pub async fn is_booked_on_launch(&self, launch_id: i64) -> GatewayResult<bool> {
        match self.context.user_id() {
            Some(user_id) => trips::is_booked(&self.pool, user_id, launch_id).await,
            None => Ok(false),
        }
    }
}
