use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 选课状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub enum EnrollmentStatus {
    Active,
    Pending,
    Cancelled,
}

impl EnrollmentStatus {
    pub const ACTIVE: &'static str = "active";
    pub const PENDING: &'static str = "pending";
    pub const CANCELLED: &'static str = "cancelled";
}

// 兼容旧版前端的大写写法（ACTIVE / PENDING / CANCELLED）
impl<'de> Deserialize<'de> for EnrollmentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<EnrollmentStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "无效的选课状态: '{s}'. 支持的状态: active, pending, cancelled"
            ))
        })
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnrollmentStatus::Active => write!(f, "{}", EnrollmentStatus::ACTIVE),
            EnrollmentStatus::Pending => write!(f, "{}", EnrollmentStatus::PENDING),
            EnrollmentStatus::Cancelled => write!(f, "{}", EnrollmentStatus::CANCELLED),
        }
    }
}

impl std::str::FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            EnrollmentStatus::ACTIVE => Ok(EnrollmentStatus::Active),
            EnrollmentStatus::PENDING => Ok(EnrollmentStatus::Pending),
            EnrollmentStatus::CANCELLED => Ok(EnrollmentStatus::Cancelled),
            _ => Err(format!("Invalid enrollment status: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub student_id: i64,
    pub classroom_id: i64,
    pub enrollment_date: chrono::NaiveDate,
    pub status: EnrollmentStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_accepts_legacy_uppercase() {
        let status: EnrollmentStatus = serde_json::from_str(r#""CANCELLED""#).unwrap();
        assert_eq!(status, EnrollmentStatus::Cancelled);
        let status: EnrollmentStatus = serde_json::from_str(r#""pending""#).unwrap();
        assert_eq!(status, EnrollmentStatus::Pending);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Active).unwrap(),
            r#""active""#
        );
    }

    #[test]
    fn test_unknown_status_rejected() {
        assert!(serde_json::from_str::<EnrollmentStatus>(r#""graduated""#).is_err());
    }
}
