use super::entities::Enrollment;
use crate::models::common::PaginatedResponse;
use serde::Serialize;
use ts_rs::TS;

// 选课记录及其解析出的学生、教室名称；引用已不存在时为 None
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub enrollment: Enrollment,
    pub student_name: Option<String>,
    pub classroom_name: Option<String>,
}

pub type EnrollmentListResponse = PaginatedResponse<EnrollmentDetail>;
