mod activity_log;
mod course_assignment;
mod notification;
mod user;

pub use self::activity_log::ActivityLog;
pub use self::course_assignment::CourseAssignment;
pub use self::notification::Notification;
pub use self::user::User;
