use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::StudentService;
use crate::models::{ApiResponse, ErrorCode, students::requests::CreateStudentRequest};
use crate::services::{bad_request, storage_error_response};

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = student_data.validate() {
        return Ok(bad_request(ErrorCode::StudentInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} created ({})", student.id, student.enrollment_number);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            "Student creation failed",
            e,
            ErrorCode::StudentInvalid,
            ErrorCode::StudentAlreadyExists,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, request, storage};
    use actix_web::http::StatusCode;

    fn payload(enrollment_number: &str, email: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            name: "Helena Costa".to_string(),
            email: email.to_string(),
            date_of_birth: "2010-06-01".to_string(),
            enrollment_number: enrollment_number.to_string(),
            phone: "+55 21 91234-5678".to_string(),
            address: "Av. Atlântica, 500".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_duplicate_enrollment_number() {
        let service = StudentService::with_storage(storage().await);

        let resp = service
            .create_student(payload("STU-9001", "helena@school.edu"), &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["enrollment_number"], "STU-9001");

        let resp = service
            .create_student(payload("STU-9001", "other@school.edu"), &request())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::StudentAlreadyExists as i32);
    }

    #[tokio::test]
    async fn test_invalid_payload_is_rejected_before_storage() {
        let service = StudentService::with_storage(storage().await);
        let mut data = payload("STU-9002", "helena@school.edu");
        data.date_of_birth = "2999-01-01".to_string();

        let resp = service.create_student(data, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::StudentInvalid as i32);
    }
}
