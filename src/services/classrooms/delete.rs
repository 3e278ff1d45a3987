use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::ClassroomService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{not_found, storage_error_response};

pub async fn delete_classroom(
    service: &ClassroomService,
    classroom_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_classroom(classroom_id).await {
        Ok(true) => {
            info!("Classroom {} deleted together with its enrollments", classroom_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
                "Classroom deleted successfully",
            )))
        }
        Ok(false) => Ok(not_found(ErrorCode::ClassroomNotFound, "Classroom not found")),
        Err(e) => Ok(storage_error_response(
            "Classroom deletion failed",
            e,
            ErrorCode::ClassroomInvalid,
            ErrorCode::ClassroomInvalid,
        )),
    }
}
