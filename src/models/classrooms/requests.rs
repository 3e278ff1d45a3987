use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;
use crate::utils::validate::{require_text, validate_range};
use serde::Deserialize;
use ts_rs::TS;

pub const MIN_CAPACITY: i32 = 1;
pub const MAX_CAPACITY: i32 = 200;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct ClassroomQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct CreateClassroomRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub capacity: i32,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub subjects: Vec<i64>,
    #[serde(default)]
    pub teachers: Vec<i64>,
    pub class_teacher_id: Option<i64>,
}

impl CreateClassroomRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        validate_range("capacity", self.capacity, MIN_CAPACITY, MAX_CAPACITY)?;
        require_text("schedule", &self.schedule)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/classroom.ts")]
pub struct UpdateClassroomRequest {
    pub name: Option<String>,
    pub capacity: Option<i32>,
    pub schedule: Option<String>,
    // 提供时整体替换关联列表
    pub subjects: Option<Vec<i64>>,
    pub teachers: Option<Vec<i64>>,
    pub class_teacher_id: Option<i64>,
    // 为 true 时清除班主任
    #[serde(default)]
    pub clear_class_teacher: bool,
}

impl UpdateClassroomRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(capacity) = self.capacity {
            validate_range("capacity", capacity, MIN_CAPACITY, MAX_CAPACITY)?;
        }
        if let Some(schedule) = &self.schedule {
            require_text("schedule", schedule)?;
        }
        if self.clear_class_teacher && self.class_teacher_id.is_some() {
            return Err(
                "class_teacher_id cannot be set together with clear_class_teacher".to_string(),
            );
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClassroomListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub teacher_id: Option<i64>,
}

/// 去重并保持原有顺序
pub fn dedup_ids(ids: &[i64]) -> Vec<i64> {
    let mut seen = std::collections::HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_range() {
        let mut req = CreateClassroomRequest {
            name: "Room 101".to_string(),
            capacity: 0,
            schedule: "Mon-Fri 08:00-12:00".to_string(),
            ..Default::default()
        };
        assert_eq!(
            req.validate().unwrap_err(),
            "capacity must be between 1 and 200"
        );
        req.capacity = 35;
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_missing_capacity_defaults_to_invalid() {
        let req: CreateClassroomRequest =
            serde_json::from_str(r#"{"name": "Lab", "schedule": "Tue 14:00"}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_conflicting_class_teacher_update() {
        let req = UpdateClassroomRequest {
            class_teacher_id: Some(3),
            clear_class_teacher: true,
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_dedup_ids_keeps_order() {
        assert_eq!(dedup_ids(&[3, 1, 3, 2, 1]), vec![3, 1, 2]);
    }
}
