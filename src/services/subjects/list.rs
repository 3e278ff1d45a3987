use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::requests::{SubjectListQuery, SubjectQueryParams},
};
use crate::services::storage_error_response;

pub async fn list_subjects(
    service: &SubjectService,
    query: SubjectQueryParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let list_query = SubjectListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
    };

    match storage.list_subjects_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Subject list retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            "Failed to retrieve subject list",
            e,
            ErrorCode::SubjectInvalid,
            ErrorCode::SubjectInvalid,
        )),
    }
}
