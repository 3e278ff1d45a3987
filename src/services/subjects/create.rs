use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::SubjectService;
use crate::models::{ApiResponse, ErrorCode, subjects::requests::CreateSubjectRequest};
use crate::services::{bad_request, storage_error_response};

pub async fn create_subject(
    service: &SubjectService,
    subject_data: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = subject_data.validate() {
        return Ok(bad_request(ErrorCode::SubjectInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    match storage.create_subject(subject_data).await {
        Ok(subject) => {
            info!("Subject {} created: {}", subject.id, subject.name);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                subject,
                "Subject created successfully",
            )))
        }
        Err(e) => Ok(storage_error_response(
            "Subject creation failed",
            e,
            ErrorCode::SubjectInvalid,
            ErrorCode::SubjectInvalid,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{body_json, request, storage};
    use actix_web::http::StatusCode;

    #[tokio::test]
    async fn test_workload_out_of_range() {
        let service = SubjectService::with_storage(storage().await);
        let data = CreateSubjectRequest {
            name: "Chemistry".to_string(),
            description: "Organic and inorganic chemistry".to_string(),
            workload_hours: Some(501),
        };

        let resp = service.create_subject(data, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::SubjectInvalid as i32);
    }

    #[tokio::test]
    async fn test_workload_is_optional() {
        let service = SubjectService::with_storage(storage().await);
        let data = CreateSubjectRequest {
            name: "Arts".to_string(),
            description: "Drawing and painting".to_string(),
            workload_hours: None,
        };

        let resp = service.create_subject(data, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["name"], "Arts");
        assert!(body["data"]["workload_hours"].is_null());
    }
}
