use serde::Serialize;
use ts_rs::TS;

// 各状态的选课数量
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct EnrollmentStatusCounts {
    pub active: i64,
    pub pending: i64,
    pub cancelled: i64,
    pub total: i64,
}

// 首页统计
#[derive(Debug, Clone, Default, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/dashboard.ts")]
pub struct DashboardStats {
    pub students: i64,
    pub teachers: i64,
    pub subjects: i64,
    pub classrooms: i64,
    pub enrollments: EnrollmentStatusCounts,
}
