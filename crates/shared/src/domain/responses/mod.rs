mod api;
mod feed;
mod user;

pub use self::api::ApiResponse;
pub use self::feed::{ActivityLogResponse, CourseAssignmentResponse, NotificationResponse};
pub use self::user::{LoginResponse, UserResponse};
