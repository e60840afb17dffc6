mod auth;
mod feed;
mod hashing;
mod jwt;
mod session;
mod user;

pub use self::auth::{
    DynIdentityService, DynLoginService, IdentityServiceTrait, LoginServiceTrait,
};
pub use self::feed::{
    ActivityLogRepositoryTrait, CourseAssignmentRepositoryTrait, DynActivityLogRepository,
    DynCourseAssignmentRepository, DynFeedService, DynNotificationRepository, FeedServiceTrait,
    NotificationRepositoryTrait,
};
pub use self::hashing::{DynHashing, HashingTrait};
pub use self::jwt::{DynJwtService, JwtServiceTrait};
pub use self::session::{
    DynLoginThrottle, DynSessionStore, LoginThrottleTrait, SessionStoreTrait,
};
pub use self::user::{DynUserQueryRepository, UserQueryRepositoryTrait};
