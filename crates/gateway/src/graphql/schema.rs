//! GraphQL schema for the gateway.
//!
//! Query:    launches (paginated), launch, me
//! Mutation: bookTrips, cancelTrip, login
//!
//! Resolvers reach the data sources through the execution context:
//! `Arc<LaunchApi>` is schema-wide data, `UserApi` and `RequestContext` are
//! attached to each request by the HTTP handler.

use std::collections::HashSet;
use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, Object, Result as GqlResult, Schema, ID};

use super::pagination::{paginate, DEFAULT_PAGE_SIZE};
use super::types::*;
use crate::auth;
use crate::datasources::{LaunchApi, UserApi};

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(launch_api: Arc<LaunchApi>) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(launch_api)
        .finish()
}

// ============================================================================
// QUERY ROOT
// ============================================================================

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Launches, newest first, paginated by cursor.
    async fn launches(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "Number of launches per page (default 20)")] page_size: Option<i32>,
        #[graphql(desc = "Cursor of the last launch already seen")] after: Option<String>,
    ) -> GqlResult<LaunchConnection> {
        let launch_api = ctx.data::<Arc<LaunchApi>>()?;

        let mut all_launches = launch_api.all_launches().await?;
        all_launches.reverse();

        let launches = paginate(
            &all_launches,
            after.as_deref(),
            page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            |launch| Some(launch.cursor.as_str()),
        );

        let cursor = launches.last().map(|l| l.cursor.clone());
        let has_more = match (launches.last(), all_launches.last()) {
            (Some(last_on_page), Some(last_overall)) => last_on_page.cursor != last_overall.cursor,
            _ => false,
        };

        Ok(LaunchConnection {
            cursor,
            has_more,
            launches,
        })
    }

    /// A single launch by flight number.
    async fn launch(&self, ctx: &Context<'_>, id: ID) -> GqlResult<Option<Launch>> {
        let Ok(launch_id) = id.parse::<i64>() else {
            return Ok(None);
        };
        let launch_api = ctx.data::<Arc<LaunchApi>>()?;
        Ok(launch_api.launch_by_id(launch_id).await?)
    }

    /// The logged-in user, if any.
    async fn me(&self, ctx: &Context<'_>) -> GqlResult<Option<User>> {
        let users = ctx.data::<UserApi>()?;
        Ok(users.find_or_create_user(None).await?.map(User::from))
    }
}

// ============================================================================
// MUTATION ROOT
// ============================================================================

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Book the caller onto each launch.
    ///
    /// Example:
    /// ```graphql
    /// mutation {
    ///   bookTrips(launchIds: ["67", "68"]) {
    ///     success
    ///     message
    ///     launches { id isBooked }
    ///   }
    /// }
    /// ```
    async fn book_trips(&self, ctx: &Context<'_>, launch_ids: Vec<ID>) -> GqlResult<TripUpdateResponse> {
        let users = ctx.data::<UserApi>()?;
        let launch_api = ctx.data::<Arc<LaunchApi>>()?;

        let numeric_ids: Vec<i64> = launch_ids.iter().filter_map(|id| id.parse().ok()).collect();

        let booked = users.book_trips(&numeric_ids).await?;
        let launches = launch_api.launches_by_ids(&numeric_ids).await?;

        let booked_ids: HashSet<i64> = booked.iter().map(|trip| trip.launch_id).collect();
        let failed: Vec<&str> = launch_ids
            .iter()
            .filter(|id| !id.parse::<i64>().is_ok_and(|n| booked_ids.contains(&n)))
            .map(|id| id.as_str())
            .collect();

        let message = if failed.is_empty() {
            "trips booked successfully".to_string()
        } else {
            format!("the following launches couldn't be booked: {}", failed.join(","))
        };

        tracing::info!(
            user = ?users.context().email(),
            booked = booked.len(),
            requested = launch_ids.len(),
            "bookTrips"
        );

        Ok(TripUpdateResponse {
            success: failed.is_empty(),
            message: Some(message),
            launches: Some(launches),
        })
    }

    /// Cancel the caller's trip on a launch.
    async fn cancel_trip(&self, ctx: &Context<'_>, launch_id: ID) -> GqlResult<TripUpdateResponse> {
        let users = ctx.data::<UserApi>()?;

        let cancelled = match launch_id.parse::<i64>() {
            Ok(id) => users.cancel_trip(id).await?.then_some(id),
            Err(_) => None,
        };

        let Some(launch_id) = cancelled else {
            return Ok(TripUpdateResponse {
                success: false,
                message: Some("failed to cancel trip".to_string()),
                launches: None,
            });
        };

        let launch_api = ctx.data::<Arc<LaunchApi>>()?;
        let launch = launch_api.launch_by_id(launch_id).await?;

        Ok(TripUpdateResponse {
            success: true,
            message: Some("trip cancelled".to_string()),
            launches: Some(launch.into_iter().collect()),
        })
    }

    /// Log in (creating the user on first login). The returned `token` is the
    /// value to send in the `authorization` header.
    async fn login(&self, ctx: &Context<'_>, email: Option<String>) -> GqlResult<Option<User>> {
        let users = ctx.data::<UserApi>()?;

        let Some(record) = users.find_or_create_user(email.as_deref()).await? else {
            return Ok(None);
        };

        let mut user = User::from(record);
        user.token = Some(auth::encode_token(&user.email));
        tracing::info!(user = %user.email, "login");
        Ok(Some(user))
    }
}
