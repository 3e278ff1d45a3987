use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::ClassroomService;
use crate::errors::Result as StorageResult;
use crate::models::{
    ApiResponse, ErrorCode,
    classrooms::{entities::Classroom, responses::ClassroomDetailResponse},
};
use crate::services::{not_found, storage_error_response};
use crate::storage::Storage;

/// 解析教室的科目、教师、班主任与当前人数
async fn resolve_detail(
    storage: &Arc<dyn Storage>,
    classroom: Classroom,
) -> StorageResult<ClassroomDetailResponse> {
    let subject_list = storage.get_subjects_by_ids(&classroom.subjects).await?;
    let teacher_list = storage.get_teachers_by_ids(&classroom.teachers).await?;
    let class_teacher = match classroom.class_teacher_id {
        Some(id) => match teacher_list.iter().find(|teacher| teacher.id == id) {
            Some(teacher) => Some(teacher.clone()),
            None => storage.get_teacher_by_id(id).await?,
        },
        None => None,
    };
    let active_enrollments = storage.count_active_enrollments(classroom.id).await?;

    Ok(ClassroomDetailResponse {
        classroom,
        subject_list,
        teacher_list,
        class_teacher,
        active_enrollments,
    })
}

pub async fn get_classroom(
    service: &ClassroomService,
    classroom_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let detail = match storage.get_classroom_by_id(classroom_id).await {
        Ok(Some(classroom)) => resolve_detail(&storage, classroom).await,
        Ok(None) => return Ok(not_found(ErrorCode::ClassroomNotFound, "Classroom not found")),
        Err(e) => Err(e),
    };

    match detail {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Classroom retrieved successfully",
        ))),
        Err(e) => Ok(storage_error_response(
            "Failed to get classroom",
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
    async fn test_detail_resolves_relationships() {
        let storage = storage().await;
        assert!(storage.seed_fixtures().await.unwrap());
        let service = ClassroomService::with_storage(storage.clone());

        let resp = service.get_classroom(1, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json(resp).await;
        let data = &body["data"];

        let subject_ids = data["subjects"].as_array().unwrap().len();
        assert_eq!(data["subject_list"].as_array().unwrap().len(), subject_ids);
        let teacher_ids = data["teachers"].as_array().unwrap().len();
        assert_eq!(data["teacher_list"].as_array().unwrap().len(), teacher_ids);
        assert_eq!(
            data["active_enrollments"].as_i64().unwrap(),
            storage.count_active_enrollments(1).await.unwrap()
        );
        if let Some(id) = data["class_teacher_id"].as_i64() {
            assert_eq!(data["class_teacher"]["id"].as_i64(), Some(id));
        }
    }

    #[tokio::test]
    async fn test_missing_classroom_is_404() {
        let service = ClassroomService::with_storage(storage().await);
        let resp = service.get_classroom(999, &request()).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::ClassroomNotFound as i32);
    }
}
