use crate::{
    domain::{
        requests::LoginRequest,
        responses::{ApiResponse, LoginResponse, UserResponse},
        session::Session,
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynLoginService = Arc<dyn LoginServiceTrait + Send + Sync>;
pub type DynIdentityService = Arc<dyn IdentityServiceTrait + Send + Sync>;

#[async_trait]
pub trait LoginServiceTrait {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ServiceError>;
}

#[async_trait]
pub trait IdentityServiceTrait {
    async fn get_me(&self, user_id: i32) -> Result<ApiResponse<UserResponse>, ServiceError>;
    async fn logout(&self, user_id: i32) -> Result<ApiResponse<bool>, ServiceError>;
    /// Loads the live session of `user_id`, re-checked against the user row,
    /// and pushes its expiry forward.
    async fn resume_session(&self, user_id: i32) -> Result<Session, ServiceError>;
}
