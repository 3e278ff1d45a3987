use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassroomService;
use crate::models::{
    ApiResponse, ErrorCode,
    classrooms::requests::{ClassroomListQuery, ClassroomQueryParams},
};
use crate::services::storage_error_response;

pub async fn list_classrooms(
    service: &ClassroomService,
    query: ClassroomQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = ClassroomListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        teacher_id: query.teacher_id,
    };

    match storage.list_classrooms_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Classroom list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            "Failed to retrieve classroom list",
            e,
            ErrorCode::ClassroomInvalid,
            ErrorCode::ClassroomInvalid,
        )),
    }
}
