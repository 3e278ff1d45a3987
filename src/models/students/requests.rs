use crate::models::common::PaginationQuery;
use crate::utils::validate::{require_text, validate_email, validate_past_date, validate_phone};
use serde::Deserialize;
use ts_rs::TS;

// 学生查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 创建学生请求，缺省字段按空字符串处理，由 validate 统一报错
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub enrollment_number: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

impl CreateStudentRequest {
    pub fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name)?;
        validate_email(self.email.trim()).map_err(str::to_string)?;
        validate_past_date("date_of_birth", &self.date_of_birth)?;
        require_text("enrollment_number", &self.enrollment_number)?;
        validate_phone(&self.phone)?;
        require_text("address", &self.address)?;
        Ok(())
    }
}

// 更新学生请求，仅校验出现的字段
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<String>,
    pub enrollment_number: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl UpdateStudentRequest {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email.trim()).map_err(str::to_string)?;
        }
        if let Some(date_of_birth) = &self.date_of_birth {
            validate_past_date("date_of_birth", date_of_birth)?;
        }
        if let Some(enrollment_number) = &self.enrollment_number {
            require_text("enrollment_number", enrollment_number)?;
        }
        if let Some(phone) = &self.phone {
            validate_phone(phone)?;
        }
        if let Some(address) = &self.address {
            require_text("address", address)?;
        }
        Ok(())
    }
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateStudentRequest {
        CreateStudentRequest {
            name: "Lucas Pereira".to_string(),
            email: "lucas.pereira@school.edu".to_string(),
            date_of_birth: "2009-03-14".to_string(),
            enrollment_number: "STU-2024-001".to_string(),
            phone: "+55 11 98765-4321".to_string(),
            address: "Rua das Flores, 120".to_string(),
        }
    }

    #[test]
    fn test_valid_student_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_missing_fields_are_reported() {
        let req = CreateStudentRequest {
            name: " ".to_string(),
            ..valid_request()
        };
        assert_eq!(req.validate().unwrap_err(), "name is required");

        let req = CreateStudentRequest {
            enrollment_number: String::new(),
            ..valid_request()
        };
        assert_eq!(req.validate().unwrap_err(), "enrollment_number is required");
    }

    #[test]
    fn test_missing_json_fields_default_to_empty() {
        let req: CreateStudentRequest =
            serde_json::from_str(r#"{"name": "Ana"}"#).expect("partial body parses");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_only_checks_present_fields() {
        let req = UpdateStudentRequest {
            phone: Some("+55 11 99999-0000".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        let req = UpdateStudentRequest {
            email: Some("broken".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
