use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::requests::{TeacherListQuery, TeacherQueryParams},
};
use crate::services::storage_error_response;

pub async fn list_teachers(
    service: &TeacherService,
    query: TeacherQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = TeacherListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        subject: query.subject,
    };

    match storage.list_teachers_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Teacher list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            "Failed to retrieve teacher list",
            e,
            ErrorCode::TeacherInvalid,
            ErrorCode::TeacherAlreadyExists,
        )),
    }
}
