pub mod auth;
pub mod classrooms;
pub mod dashboard;
pub mod enrollments;
pub mod students;
pub mod subjects;
pub mod teachers;

pub use auth::AuthService;
pub use classrooms::ClassroomService;
pub use dashboard::DashboardService;
pub use enrollments::EnrollmentService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, error::InternalError, web};
use std::sync::Arc;
use tracing::error;

use crate::errors::SchoolAdminError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app_data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    match request.app_data::<web::Data<Arc<dyn Storage>>>() {
        Some(storage) => Ok(storage.get_ref().clone()),
        None => {
            error!("Storage not found in app data");
            let response = HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Storage is not configured",
            ));
            Err(InternalError::from_response("storage not configured", response).into())
        }
    }
}

/// 存储层错误到 HTTP 响应的映射
///
/// `Validation` 为 400，`Conflict` 为 409，`NotFound` 为 404，其余记录日志后返回 500。
pub(crate) fn storage_error_response(
    context: &str,
    err: SchoolAdminError,
    invalid: ErrorCode,
    conflict: ErrorCode,
) -> HttpResponse {
    match err {
        SchoolAdminError::Validation(msg) => {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(invalid, msg))
        }
        SchoolAdminError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(conflict, msg))
        }
        SchoolAdminError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(ErrorCode::NotFound, msg))
        }
        other => {
            error!("{}: {}", context, other);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("{context}: {}", other.message()),
            ))
        }
    }
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
pub(crate) mod test_support {
    use serde_json::Value;
    use std::sync::Arc;

    use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

    pub async fn storage() -> Arc<dyn Storage> {
        Arc::new(SeaOrmStorage::in_memory().await.expect("in-memory storage"))
    }

    pub fn request() -> actix_web::HttpRequest {
        actix_web::test::TestRequest::default().to_http_request()
    }

    /// 读取响应体中的 JSON
    pub async fn body_json(response: actix_web::HttpResponse) -> Value {
        let bytes = actix_web::body::to_bytes(response.into_body())
            .await
            .expect("readable body");
        serde_json::from_slice(&bytes).expect("json body")
    }
}
