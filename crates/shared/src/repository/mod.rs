mod activity_log;
mod course_assignment;
mod notification;
mod user;

pub use self::activity_log::ActivityLogRepository;
pub use self::course_assignment::CourseAssignmentRepository;
pub use self::notification::NotificationRepository;
pub use self::user::UserQueryRepository;
