use super::entities::Teacher;
use crate::models::common::PaginatedResponse;

pub type TeacherListResponse = PaginatedResponse<Teacher>;
