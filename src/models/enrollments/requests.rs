use super::entities::EnrollmentStatus;
use crate::models::common::PaginationQuery;
use crate::models::common::pagination::deserialize_optional_i64;
use crate::utils::validate::parse_date;
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<EnrollmentStatus>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub student_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub classroom_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct CreateEnrollmentRequest {
    pub student_id: i64,
    pub classroom_id: i64,
    #[serde(default)]
    pub enrollment_date: String,
    pub status: EnrollmentStatus,
}

impl CreateEnrollmentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.student_id <= 0 {
            return Err("student_id is required".to_string());
        }
        if self.classroom_id <= 0 {
            return Err("classroom_id is required".to_string());
        }
        parse_date("enrollment_date", &self.enrollment_date)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct UpdateEnrollmentRequest {
    pub student_id: Option<i64>,
    pub classroom_id: Option<i64>,
    pub enrollment_date: Option<String>,
    pub status: Option<EnrollmentStatus>,
}

impl UpdateEnrollmentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if matches!(self.student_id, Some(id) if id <= 0) {
            return Err("student_id must be a positive id".to_string());
        }
        if matches!(self.classroom_id, Some(id) if id <= 0) {
            return Err("classroom_id must be a positive id".to_string());
        }
        if let Some(date) = &self.enrollment_date {
            parse_date("enrollment_date", date)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct EnrollmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<EnrollmentStatus>,
    pub student_id: Option<i64>,
    pub classroom_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_date() {
        let req: CreateEnrollmentRequest = serde_json::from_str(
            r#"{"student_id": 1, "classroom_id": 2, "status": "PENDING"}"#,
        )
        .unwrap();
        assert_eq!(req.validate().unwrap_err(), "enrollment_date is required");
    }

    #[test]
    fn test_create_rejects_non_positive_ids() {
        let req = CreateEnrollmentRequest {
            student_id: 0,
            classroom_id: 2,
            enrollment_date: "2024-02-01".to_string(),
            status: EnrollmentStatus::Active,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_validates_present_date() {
        let req = UpdateEnrollmentRequest {
            enrollment_date: Some("2024/02/01".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
        assert!(UpdateEnrollmentRequest::default().validate().is_ok());
    }
}
