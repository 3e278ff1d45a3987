use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::TeacherService;
use crate::models::{ApiResponse, ErrorCode, teachers::requests::CreateTeacherRequest};
use crate::services::{bad_request, storage_error_response};

pub async fn create_teacher(
    service: &TeacherService,
    teacher_data: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = teacher_data.validate() {
        return Ok(bad_request(ErrorCode::TeacherInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.create_teacher(teacher_data).await {
        Ok(teacher) => {
            info!("Teacher {} created ({})", teacher.id, teacher.subject);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                teacher,
                "Teacher created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            "Teacher creation failed",
            e,
            ErrorCode::TeacherInvalid,
            ErrorCode::TeacherAlreadyExists,
        )),
    }
}
