use crate::models::common::PaginationQuery;
use crate::utils::validate::{require_text, validate_email, validate_past_date, validate_phone};
use serde::Deserialize;
use ts_rs::TS;

// 教师查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub address: String,
    pub specialization: Option<String>,
}

impl CreateTeacherRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        validate_email(self.email.trim()).map_err(str::to_string)?;
        validate_phone(&self.phone)?;
        require_text("subject", &self.subject)?;
        validate_past_date("date_of_birth", &self.date_of_birth)?;
        require_text("address", &self.address)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: Option<String>,
    // 传空字符串表示清除专长
    pub specialization: Option<String>,
}

impl UpdateTeacherRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email.trim()).map_err(str::to_string)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(subject) = &self.subject {
            require_text("subject", subject)?;
        }
        if let Some(date_of_birth) = &self.date_of_birth {
            validate_past_date("date_of_birth", date_of_birth)?;
        }
        if let Some(address) = &self.address {
            require_text("address", address)?;
        }
        Ok(())
    }
}

// 教师列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub subject: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateTeacherRequest {
        CreateTeacherRequest {
            name: "Marina Costa".to_string(),
            email: "marina.costa@school.edu".to_string(),
            phone: "+55 21 3456-7890".to_string(),
            subject: "Mathematics".to_string(),
            date_of_birth: "1985-09-02".to_string(),
            address: "Av. Atlântica, 500".to_string(),
            specialization: None,
        }
    }

    #[test]
    fn test_valid_teacher_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_subject_is_required() {
        let req = CreateTeacherRequest {
            subject: String::new(),
            ..valid_request()
        };
        assert_eq!(req.validate().unwrap_err(), "subject is required");
    }

    #[test]
    fn test_future_birth_date_rejected() {
        let req = CreateTeacherRequest {
            date_of_birth: "2999-01-01".to_string(),
            ..valid_request()
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_allows_clearing_specialization() {
        let req = UpdateTeacherRequest {
            specialization: Some(String::new()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());
    }
}
