use crate::errors::ServiceError;
use std::sync::Arc;

pub type DynJwtService = Arc<dyn JwtServiceTrait + Send + Sync>;

pub trait JwtServiceTrait: Send + Sync + std::fmt::Debug {
    fn generate_token(&self, user_id: i32) -> Result<String, ServiceError>;
    fn verify_token(&self, token: &str) -> Result<i32, ServiceError>;
}
