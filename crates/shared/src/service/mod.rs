mod auth;
mod feed;

pub use self::auth::{AuthService, AuthServiceDeps, LOGIN_WINDOW_MINUTES, MAX_FAILED_ATTEMPTS};
pub use self::feed::{FeedService, FeedServiceDeps};
