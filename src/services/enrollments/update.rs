use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EnrollmentService, check_enrollment, check_failed};
use crate::models::{
    ApiResponse, ErrorCode,
    enrollments::{entities::EnrollmentStatus, requests::UpdateEnrollmentRequest},
};
use crate::services::{bad_request, not_found, storage_error_response};

pub async fn update_enrollment(
    service: &EnrollmentService,
    enrollment_id: i64,
    update_data: UpdateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = update_data.validate() {
        return Ok(bad_request(ErrorCode::EnrollmentInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    let current = match storage.get_enrollment_by_id(enrollment_id).await {
        Ok(Some(enrollment)) => enrollment,
        Ok(None) => {
            return Ok(not_found(
                ErrorCode::EnrollmentNotFound,
                "Enrollment not found",
            ));
        }
        Err(e) => return Ok(check_failed(e)),
    };

    // 合并后的目标记录
    let student_id = update_data.student_id.unwrap_or(current.student_id);
    let classroom_id = update_data.classroom_id.unwrap_or(current.classroom_id);
    let status = update_data.status.unwrap_or(current.status);
    let already_counted =
        current.status == EnrollmentStatus::Active && current.classroom_id == classroom_id;

    match check_enrollment(
        &storage,
        student_id,
        classroom_id,
        status,
        Some(current.id),
        already_counted,
    )
    .await
    {
        Ok(None) => {}
        Ok(Some(rejection)) => return Ok(rejection.into_response()),
        Err(e) => return Ok(check_failed(e)),
    }

    match storage.update_enrollment(enrollment_id, update_data).await {
        Ok(Some(enrollment)) => {
            info!("Enrollment {} updated ({})", enrollment.id, enrollment.status);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollment,
                "Enrollment updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(
            ErrorCode::EnrollmentNotFound,
            "Enrollment not found",
        )),
        Err(e) => Ok(storage_error_response(
            "Enrollment update failed",
            e,
            ErrorCode::EnrollmentInvalid,
            ErrorCode::EnrollmentAlreadyExists,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, request, storage};
    use actix_web::http::StatusCode;

    #[tokio::test]
    async fn test_activating_into_full_classroom_is_conflict() {
        let storage = storage().await;
        storage.seed_fixtures().await.unwrap();
        let service = EnrollmentService::with_storage(storage.clone());

        // 第三间教室容量 12，已有 1 条 active 和 1 条 pending
        let shrink = crate::models::classrooms::requests::UpdateClassroomRequest {
            capacity: Some(1),
            ..Default::default()
        };
        storage.update_classroom(3, shrink).await.unwrap();

        let pending = storage
            .list_enrollments_with_pagination(
                crate::models::enrollments::requests::EnrollmentListQuery {
                    classroom_id: Some(3),
                    status: Some(EnrollmentStatus::Pending),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let pending_id = pending.items[0].enrollment.id;

        let update = UpdateEnrollmentRequest {
            status: Some(EnrollmentStatus::Active),
            ..Default::default()
        };
        let resp = service
            .update_enrollment(pending_id, update, &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::ClassroomFull as i32);
    }

    #[tokio::test]
    async fn test_active_enrollment_can_be_edited_in_full_classroom() {
        let storage = storage().await;
        storage.seed_fixtures().await.unwrap();
        let service = EnrollmentService::with_storage(storage.clone());

        let shrink = crate::models::classrooms::requests::UpdateClassroomRequest {
            capacity: Some(1),
            ..Default::default()
        };
        storage.update_classroom(3, shrink).await.unwrap();

        let active = storage
            .list_enrollments_with_pagination(
                crate::models::enrollments::requests::EnrollmentListQuery {
                    classroom_id: Some(3),
                    status: Some(EnrollmentStatus::Active),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let active_id = active.items[0].enrollment.id;

        let update = UpdateEnrollmentRequest {
            enrollment_date: Some("2024-03-02".to_string()),
            ..Default::default()
        };
        let resp = service
            .update_enrollment(active_id, update, &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["enrollment_date"], "2024-03-02");
    }
}
