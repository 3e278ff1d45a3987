use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::info;

use super::{ClassroomService, find_missing_references};
use crate::errors::Result as StorageResult;
use crate::models::{ApiResponse, ErrorCode, classrooms::requests::UpdateClassroomRequest};
use crate::services::{bad_request, not_found, storage_error_response};
use crate::storage::Storage;

/// 更新前的检查，返回需要直接回给客户端的响应
async fn precheck(
    storage: &Arc<dyn Storage>,
    classroom_id: i64,
    update_data: &UpdateClassroomRequest,
) -> StorageResult<Option<HttpResponse>> {
    if storage.get_classroom_by_id(classroom_id).await?.is_none() {
        return Ok(Some(not_found(
            ErrorCode::ClassroomNotFound,
            "Classroom not found",
        )));
    }

    if let Some(msg) = find_missing_references(
        storage,
        update_data.subjects.as_deref(),
        update_data.teachers.as_deref(),
        update_data.class_teacher_id,
    )
    .await?
    {
        return Ok(Some(bad_request(ErrorCode::ClassroomInvalid, msg)));
    }

    // 容量不能低于当前 active 人数
    if let Some(capacity) = update_data.capacity {
        let active = storage.count_active_enrollments(classroom_id).await?;
        if i64::from(capacity) < active {
            return Ok(Some(bad_request(
                ErrorCode::ClassroomInvalid,
                format!("capacity cannot be lower than the {active} active enrollments"),
            )));
        }
    }

    Ok(None)
}

pub async fn update_classroom(
    service: &ClassroomService,
    classroom_id: i64,
    update_data: UpdateClassroomRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(msg) = update_data.validate() {
        return Ok(bad_request(ErrorCode::ClassroomInvalid, msg));
    }

    let storage = service.get_storage(request)?;

    let checked = precheck(&storage, classroom_id, &update_data).await;

    match checked {
        Ok(None) => {}
        Ok(Some(response)) => return Ok(response),
        Err(e) => {
            return Ok(storage_error_response(
                "Failed to check classroom update",
                e,
                ErrorCode::ClassroomInvalid,
                ErrorCode::ClassroomInvalid,
            ));
        }
    }

    match storage.update_classroom(classroom_id, update_data).await {
        Ok(Some(classroom)) => {
            info!("Classroom {} updated", classroom.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                classroom,
                "Classroom updated successfully",
            )))
        }
        Ok(None) => Ok(not_found(ErrorCode::ClassroomNotFound, "Classroom not found")),
        Err(e) => Ok(storage_error_response(
            "Classroom update failed",
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

    #[tokio::test]
    async fn test_capacity_below_active_count_is_rejected() {
        let storage = storage().await;
        storage.seed_fixtures().await.unwrap();
        let service = ClassroomService::with_storage(storage.clone());
        assert_eq!(storage.count_active_enrollments(1).await.unwrap(), 3);

        let update = UpdateClassroomRequest {
            capacity: Some(2),
            ..Default::default()
        };
        let resp = service.update_classroom(1, update, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let update = UpdateClassroomRequest {
            capacity: Some(3),
            ..Default::default()
        };
        let resp = service.update_classroom(1, update, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        assert_eq!(body["data"]["capacity"], 3);
    }

    #[tokio::test]
    async fn test_update_missing_classroom_is_404() {
        let service = ClassroomService::with_storage(storage().await);
        let update = UpdateClassroomRequest {
            name: Some("Lab".to_string()),
            ..Default::default()
        };
        let resp = service.update_classroom(5, update, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
