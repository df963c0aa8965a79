//! Caller identity and role-based scoping.
//!
//! Authentication lives in front of this service; each request arrives
//! with `X-User-Id` and `X-User-Role` headers resolved by the external
//! credential store. Role validity is checked per operation when a
//! `ScopePolicy` is built, so a misconfigured account gets a hard
//! authorization failure rather than a silent empty result.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::entities::loom::{self, LoomType};
use crate::errors::ServiceError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// Identity context for one request. The role is kept raw here and
/// validated when a `ScopePolicy` is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Caller {
    pub user_id: i32,
    pub role: String,
}

impl Caller {
    pub fn new(user_id: i32, role: impl Into<String>) -> Self {
        Self {
            user_id,
            role: role.into(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<i32>().ok())
            .ok_or_else(|| {
                ServiceError::AuthError("missing or malformed X-User-Id header".to_string())
            })?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| ServiceError::AuthError("missing X-User-Role header".to_string()))?;

        Ok(Caller { user_id, role })
    }
}

/// Recognized account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    HandloomFactory,
    OutsideHandloom,
    PowerloomFactory,
    OutsidePowerloom,
}

impl Role {
    /// The single loom category a non-owner role may see.
    pub fn category(self) -> Option<LoomType> {
        match self {
            Role::Owner => None,
            Role::HandloomFactory => Some(LoomType::Handloom),
            Role::PowerloomFactory => Some(LoomType::Powerloom),
            Role::OutsideHandloom => Some(LoomType::OutsideHandloom),
            Role::OutsidePowerloom => Some(LoomType::OutsidePowerloom),
        }
    }
}

/// Capability object answering every visibility question for one caller.
/// Built once per operation; replaces per-operation role-string branching.
#[derive(Debug, Clone, Copy)]
pub struct ScopePolicy {
    user_id: i32,
    role: Role,
}

impl ScopePolicy {
    /// Validates the caller's role. An unrecognized role is a hard
    /// denial on every scoped operation, distinguishing a misconfigured
    /// account from a view over no data.
    pub fn for_caller(caller: &Caller) -> Result<Self, ServiceError> {
        let role = caller.role.parse::<Role>().map_err(|_| {
            ServiceError::AuthorizationError("invalid role, contact admin".to_string())
        })?;

        Ok(Self {
            user_id: caller.user_id,
            role,
        })
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }

    /// The loom categories visible to this caller. Owner sees all four.
    pub fn visible_categories(&self) -> &'static [LoomType] {
        match self.role {
            Role::Owner => &LoomType::ALL,
            Role::HandloomFactory => &[LoomType::Handloom],
            Role::PowerloomFactory => &[LoomType::Powerloom],
            Role::OutsideHandloom => &[LoomType::OutsideHandloom],
            Role::OutsidePowerloom => &[LoomType::OutsidePowerloom],
        }
    }

    /// Ownership check for direct record access. Owner bypasses.
    pub fn can_access(&self, record_user_id: i32) -> bool {
        self.is_owner() || record_user_id == self.user_id
    }

    /// Full visibility check for a loom row: ownership plus category.
    pub fn can_see_loom(&self, loom: &loom::Model) -> bool {
        if self.is_owner() {
            return true;
        }
        loom.user_id == self.user_id
            && self
                .role
                .category()
                .is_some_and(|category| category == loom.loom_type)
    }
}
