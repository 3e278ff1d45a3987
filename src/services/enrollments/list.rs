use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EnrollmentService;
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::requests::{EnrollmentListQuery, EnrollmentQueryParams},
};
use crate::services::storage_error_response;

pub async fn list_enrollments(
    service: &EnrollmentService,
    query: EnrollmentQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = EnrollmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        status: query.status,
        student_id: query.student_id,
        classroom_id: query.classroom_id,
    };

    match storage.list_enrollments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Enrollment list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            "Failed to retrieve enrollment list",
            e,
            ErrorCode::EnrollmentInvalid,
            ErrorCode::EnrollmentAlreadyExists,
        )),
    }
}
