pub mod auth;
pub mod classrooms;
pub mod common;
pub mod dashboard;
pub mod enrollments;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 应用启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误代码
///
/// 按模块分段：1xxx 通用，2xxx 认证与账号，3xxx 学校业务实体。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserNameInvalid = 2002,
    UserEmailInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserAlreadyExists = 2005,

    StudentNotFound = 3000,
    StudentAlreadyExists = 3001,
    StudentInvalid = 3002,

    TeacherNotFound = 3100,
    TeacherAlreadyExists = 3101,
    TeacherInvalid = 3102,

    SubjectNotFound = 3200,
    SubjectInvalid = 3202,

    ClassroomNotFound = 3300,
    ClassroomInvalid = 3302,
    ClassroomFull = 3303,

    EnrollmentNotFound = 3400,
    EnrollmentAlreadyExists = 3401,
    EnrollmentInvalid = 3402,
}
