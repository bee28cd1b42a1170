use std::sync::Arc;

use async_graphql::{ComplexObject, Context, Enum, Result as GqlResult, SimpleObject, ID};

use crate::datasources::{LaunchApi, UserApi};
use crate::db::UserRecord;

// ============================================================================
// LAUNCH TYPES
// ============================================================================

/// A launch, shaped from the upstream launches provider.
#[derive(SimpleObject, Clone, Debug, PartialEq)]
#[graphql(complex)]
pub struct Launch {
    /// Upstream flight number.
    #[graphql(skip)]
    pub flight_number: i64,
    /// Pagination cursor (upstream launch date, unix seconds).
    #[graphql(skip)]
    pub cursor: String,
    pub site: Option<String>,
    pub mission: Mission,
    pub rocket: Rocket,
}

#[ComplexObject]
impl Launch {
    async fn id(&self) -> ID {
        ID(self.flight_number.to_string())
    }

    /// Whether the caller has a trip booked on this launch.
    async fn is_booked(&self, ctx: &Context<'_>) -> GqlResult<bool> {
        let users = ctx.data::<UserApi>()?;
        Ok(users.is_booked_on_launch(self.flight_number).await?)
    }
}

#[derive(SimpleObject, Clone, Debug, Default, PartialEq)]
#[graphql(complex)]
pub struct Mission {
    pub name: Option<String>,
    #[graphql(skip)]
    pub mission_patch_small: Option<String>,
    #[graphql(skip)]
    pub mission_patch_large: Option<String>,
}

#[ComplexObject]
impl Mission {
    /// Mission patch image URL.
    async fn mission_patch(&self, #[graphql(default)] size: PatchSize) -> Option<String> {
        match size {
            PatchSize::Small => self.mission_patch_small.clone(),
            PatchSize::Large => self.mission_patch_large.clone(),
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum PatchSize {
    Small,
    #[default]
    Large,
}

#[derive(SimpleObject, Clone, Debug, PartialEq)]
pub struct Rocket {
    pub id: ID,
    pub name: Option<String>,
    #[graphql(name = "type")]
    pub rocket_type: Option<String>,
}

/// A page of launches.
#[derive(SimpleObject, Clone, Debug)]
pub struct LaunchConnection {
    /// Cursor of the last launch on this page; pass it as `after` for the next page.
    pub cursor: Option<String>,
    pub has_more: bool,
    pub launches: Vec<Launch>,
}

// ============================================================================
// USER TYPES
// ============================================================================

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct User {
    pub id: ID,
    #[graphql(skip)]
    pub user_id: i64,
    pub email: String,
    pub profile_image: Option<String>,
    /// Value to send as the `authorization` header; only set by `login`.
    pub token: Option<String>,
}

#[ComplexObject]
impl User {
    /// Launches this user has booked.
    async fn trips(&self, ctx: &Context<'_>) -> GqlResult<Vec<Launch>> {
        let users = ctx.data::<UserApi>()?;
        let launch_ids = users.launch_ids_for(self.user_id).await?;
        if launch_ids.is_empty() {
            return Ok(Vec::new());
        }
        let launches = ctx.data::<Arc<LaunchApi>>()?;
        Ok(launches.launches_by_ids(&launch_ids).await?)
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: ID(record.id.to_string()),
            user_id: record.id,
            email: record.email,
            profile_image: record.profile_image,
            token: record.token,
        }
    }
}

// ============================================================================
// MUTATION TYPES
// ============================================================================

/// Outcome of booking or cancelling trips.
#[derive(SimpleObject, Clone, Debug)]
pub struct TripUpdateResponse {
    pub success: bool,
    pub message: Option<String>,
    pub launches: Option<Vec<Launch>>,
}
