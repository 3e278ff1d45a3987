use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{ClassroomService, find_missing_references};
use crate::models::{ApiResponse, ErrorCode, classrooms::requests::CreateClassroomRequest};
use crate::services::{bad_request, storage_error_response};

pub async fn create_classroom(
    service: &ClassroomService,
    classroom_data: CreateClassroomRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = classroom_data.validate() {
        return Ok(bad_request(ErrorCode::ClassroomInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match find_missing_references(
        &storage,
        Some(&classroom_data.subjects),
        Some(&classroom_data.teachers),
        classroom_data.class_teacher_id,
    )
    .await
    {
        Ok(None) => {}
        Ok(Some(msg)) => return Ok(bad_request(ErrorCode::ClassroomInvalid, msg)),
        Err(e) => {
            return Ok(storage_error_response(
                "Failed to check classroom references",
                e,
                ErrorCode::ClassroomInvalid,
                ErrorCode::ClassroomInvalid,
            ));
        }
    }

    match storage.create_classroom(classroom_data).await {
        Ok(classroom) => {
            info!(
                "Classroom {} created with {} subjects and {} teachers",
                classroom.id,
                classroom.subjects.len(),
                classroom.teachers.len()
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                classroom,
                "Classroom created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            "Classroom creation failed",
            e,
            ErrorCode::ClassroomInvalid,
            ErrorCode::ClassroomInvalid,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, request, storage};
    use actix_web::http::StatusCode;

    fn payload() -> CreateClassroomRequest {
        CreateClassroomRequest {
            name: "Room 101".to_string(),
            capacity: 30,
            schedule: "Mon-Fri 08:00-12:00".to_string(),
            subjects: vec![],
            teachers: vec![],
            class_teacher_id: None,
        }
    }

    #[tokio::test]
    async fn test_capacity_bounds() {
        let service = ClassroomService::with_storage(storage().await);

        for capacity in [0, 201] {
            let data = CreateClassroomRequest {
                capacity,
                ..payload()
            };
            let resp = service.create_classroom(data, &request()).await.unwrap();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }

        let data = CreateClassroomRequest {
            capacity: 200,
            ..payload()
        };
        let resp = service.create_classroom(data, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_unknown_references_are_reported() {
        let service = ClassroomService::with_storage(storage().await);

        let data = CreateClassroomRequest {
            subjects: vec![404],
            ..payload()
        };
        let resp = service.create_classroom(data, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Unknown subject ids: [404]");

        let data = CreateClassroomRequest {
            class_teacher_id: Some(77),
            ..payload()
        };
        let resp = service.create_classroom(data, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["message"], "Unknown teacher ids: [77]");
    }
}
