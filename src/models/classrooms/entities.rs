use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    // 上课时间描述，例如 "Mon-Fri 08:00-12:00"
    pub schedule: String,
    // 关联的科目 ID
    pub subjects: Vec<i64>,
    // 关联的教师 ID
    pub teachers: Vec<i64>,
    pub class_teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
