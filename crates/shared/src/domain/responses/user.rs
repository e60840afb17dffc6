use crate::{
    domain::role::{ParseRoleError, Role},
    model::User,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The authenticated identity as the portal exposes it.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub role: Role,
    pub active: bool,
}

// model to response; a row with an unknown role never becomes a user
impl TryFrom<User> for UserResponse {
    type Error = ParseRoleError;

    fn try_from(value: User) -> Result<Self, Self::Error> {
        Ok(UserResponse {
            id: value.id,
            role: value.role.parse()?,
            username: value.username,
            name: value.name,
            active: value.active,
        })
    }
}

/// Outcome of a successful login: the identity plus the access token that
/// the HTTP layer hands back as a cookie.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub access_token: String,
}
