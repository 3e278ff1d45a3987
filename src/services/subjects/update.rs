use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::UpdateSubjectRequest};
use crate::services::{bad_request, not_found, storage_error_response};

pub async fn update_subject(
    service: &SubjectService,
    subject_id: i64,
    update_data: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = update_data.validate() {
        return Ok(bad_request(ErrorCode::SubjectInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.update_subject(subject_id, update_data).await {
        Ok(Some(subject)) => {
            info!("Subject {} updated", subject.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                subject,
                "Subject updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::SubjectNotFound, "Subject not found")),
        Err(e) => Ok(storage_error_response(
            "Subject update failed",
            e,
            ErrorCode::SubjectInvalid,
            ErrorCode::SubjectInvalid,
        )),
    }
}
