use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::EnrollmentService;
use crate::errors::Result as StorageResult;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{entities::Enrollment, responses::EnrollmentDetail},
};
use crate::services::{not_found, storage_error_response};
use crate::storage::Storage;

async fn with_names(
    storage: &Arc<dyn Storage>,
    enrollment: Enrollment,
) -> StorageResult<EnrollmentDetail> {
    let student_name = storage
        .get_student_by_id(enrollment.student_id)
        .await?
        .map(|student| student.name);
    let classroom_name = storage
        .get_classroom_by_id(enrollment.classroom_id)
        .await?
        .map(|classroom| classroom.name);

    Ok(EnrollmentDetail {
        enrollment,
        student_name,
        classroom_name,
    })
}

pub async fn get_enrollment(
    service: &EnrollmentService,
    enrollment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let detail = match storage.get_enrollment_by_id(enrollment_id).await {
        Ok(Some(enrollment)) => with_names(&storage, enrollment).await,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            ));
        }
        Err(e) => Err(e),
    };

    match detail {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Enrollment retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            "Failed to get enrollment",
            e,
            ErrorCode::EnrollmentInvalid,
            ErrorCode::EnrollmentAlreadyExists,
        )),
    }
}
