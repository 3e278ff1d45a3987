use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    // 主讲科目（自由文本，与 Subject 实体无外键关系）
    pub subject: String,
    pub date_of_birth: chrono::NaiveDate,
    pub address: String,
    pub specialization: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
