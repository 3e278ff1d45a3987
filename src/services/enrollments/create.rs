use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{EnrollmentService, check_enrollment, check_failed};
use crate::models::{ApiResponse, ErrorCode, enrollments::requests::CreateEnrollmentRequest};
use crate::services::{bad_request, storage_error_response};

pub async fn create_enrollment(
    service: &EnrollmentService,
    enrollment_data: CreateEnrollmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = enrollment_data.validate() {
        return Ok(bad_request(ErrorCode::EnrollmentInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match check_enrollment(
        &storage,
        enrollment_data.student_id,
        enrollment_data.classroom_id,
        enrollment_data.status,
        None,
        false,
    )
    .await
    {
        Ok(None) => {}
        Ok(Some(rejection)) => return Ok(rejection.into_response()),
        Err(e) => return Ok(check_failed(e)),
    }

    match storage.create_enrollment(enrollment_data).await {
        Ok(enrollment) => {
            info!(
                "Enrollment {} created: student {} -> classroom {} ({})",
                enrollment.id, enrollment.student_id, enrollment.classroom_id, enrollment.status
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                enrollment,
                "Enrollment created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            "Enrollment creation failed",
            e,
            ErrorCode::EnrollmentInvalid,
            ErrorCode::EnrollmentAlreadyExists,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classrooms::requests::CreateClassroomRequest;
    use crate::models::enrollments::entities::EnrollmentStatus;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::services::test_support::{body_json, request, storage};
    use crate::storage::Storage;
    use actix_web::http::StatusCode;
    use std::sync::Arc;

    async fn student(storage: &Arc<dyn Storage>, n: u32) -> i64 {
        storage
            .create_student(CreateStudentRequest {
                name: format!("Student {n}"),
                email: format!("student{n}@school.edu"),
                date_of_birth: "2011-01-15".to_string(),
                enrollment_number: format!("E-{n:04}"),
                phone: "+55 31 90000-0000".to_string(),
                address: "Rua A, 1".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    async fn classroom(storage: &Arc<dyn Storage>, capacity: i32) -> i64 {
        storage
            .create_classroom(CreateClassroomRequest {
                name: "Tiny Room".to_string(),
                capacity,
                schedule: "Sat 09:00-11:00".to_string(),
                ..Default::default()
            })
            .await
            .unwrap()
            .id
    }

    fn enroll(
        student_id: i64,
        classroom_id: i64,
        status: EnrollmentStatus,
    ) -> CreateEnrollmentRequest {
        CreateEnrollmentRequest {
            student_id,
            classroom_id,
            enrollment_date: "2024-08-01".to_string(),
            status,
        }
    }

    #[tokio::test]
    async fn test_capacity_is_enforced_for_active_only() {
        let storage = storage().await;
        let service = EnrollmentService::with_storage(storage.clone());
        let room = classroom(&storage, 1).await;
        let first = student(&storage, 1).await;
        let second = student(&storage, 2).await;

        let resp = service
            .create_enrollment(enroll(first, room, EnrollmentStatus::Active), &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = service
            .create_enrollment(enroll(second, room, EnrollmentStatus::Active), &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::ClassroomFull as i32);

        // 待定状态不占名额
        let resp = service
            .create_enrollment(enroll(second, room, EnrollmentStatus::Pending), &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_duplicate_and_unknown_references() {
        let storage = storage().await;
        let service = EnrollmentService::with_storage(storage.clone());
        let room = classroom(&storage, 10).await;
        let pupil = student(&storage, 1).await;

        let resp = service
            .create_enrollment(enroll(pupil, room, EnrollmentStatus::Pending), &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = service
            .create_enrollment(enroll(pupil, room, EnrollmentStatus::Active), &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::EnrollmentAlreadyExists as i32);

        let resp = service
            .create_enrollment(enroll(999, room, EnrollmentStatus::Active), &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::EnrollmentInvalid as i32);
    }
}
