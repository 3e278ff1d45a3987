use crate::models::common::PaginationQuery;
use crate::utils::validate::{require_text, validate_range};
use serde::Deserialize;
use ts_rs::TS;

pub const MIN_WORKLOAD_HOURS: i32 = 1;
pub const MAX_WORKLOAD_HOURS: i32 = 500;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct SubjectQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub workload_hours: Option<i32>,
}

impl CreateSubjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        require_text("description", &self.description)?;
        if let Some(hours) = self.workload_hours {
            validate_range(
                "workload_hours",
                hours,
                MIN_WORKLOAD_HOURS,
                MAX_WORKLOAD_HOURS,
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct UpdateSubjectRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub workload_hours: Option<i32>,
}

impl UpdateSubjectRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(hours) = self.workload_hours {
            validate_range(
                "workload_hours",
                hours,
                MIN_WORKLOAD_HOURS,
                MAX_WORKLOAD_HOURS,
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workload_is_optional() {
        let req = CreateSubjectRequest {
            name: "History".to_string(),
            description: "World history survey".to_string(),
            workload_hours: None,
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_workload_range() {
        let mut req = CreateSubjectRequest {
            name: "Physics".to_string(),
            description: "Mechanics and waves".to_string(),
            workload_hours: Some(0),
        };
        assert!(req.validate().is_err());
        req.workload_hours = Some(MAX_WORKLOAD_HOURS);
        assert!(req.validate().is_ok());
        req.workload_hours = Some(MAX_WORKLOAD_HOURS + 1);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_description_required() {
        let req = CreateSubjectRequest {
            name: "Art".to_string(),
            ..Default::default()
        };
        assert_eq!(req.validate().unwrap_err(), "description is required");
    }
}
