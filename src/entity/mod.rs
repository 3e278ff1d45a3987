//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod classroom_subjects;
pub mod classroom_teachers;
pub mod classrooms;
pub mod enrollments;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

/// 数据库中的日期统一以 `YYYY-MM-DD` 字符串保存
pub(crate) fn parse_stored_date(value: &str) -> chrono::NaiveDate {
    chrono::NaiveDate::parse_from_str(value, crate::utils::validate::DATE_FORMAT)
        .unwrap_or_default()
}

pub(crate) fn timestamp_to_datetime(ts: i64) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::<chrono::Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
