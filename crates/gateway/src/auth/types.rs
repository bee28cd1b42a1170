use serde::{Deserialize, Serialize};

use crate::db::UserRecord;

/// Per-request identity, rebuilt from the `authorization` header on every request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RequestContext {
    /// `None` for anonymous callers
    pub user: Option<UserRecord>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self { user: None }
    }

    pub fn authenticated(user: UserRecord) -> Self {
        Self { user: Some(user) }
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}
