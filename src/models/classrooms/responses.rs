use super::entities::Classroom;
use crate::models::common::PaginatedResponse;
use crate::models::subjects::entities::Subject;
use crate::models::teachers::entities::Teacher;
use serde::Serialize;
use ts_rs::TS;

pub type ClassroomListResponse = PaginatedResponse<Classroom>;

// 教室详情，关联的科目和教师在读取时解析
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomDetailResponse {
    #[serde(flatten)]
    #[ts(flatten)]
    pub classroom: Classroom,
    pub subject_list: Vec<Subject>,
    pub teacher_list: Vec<Teacher>,
    pub class_teacher: Option<Teacher>,
    // 当前 ACTIVE 选课人数
    pub active_enrollments: i64,
}
