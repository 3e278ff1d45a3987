pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result as StorageResult;
use crate::models::ErrorCode;
use crate::models::enrollments::entities::EnrollmentStatus;
use crate::models::enrollments::requests::{
    CreateEnrollmentRequest, EnrollmentQueryParams, UpdateEnrollmentRequest,
};
use crate::services::{bad_request, storage_error_response};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub fn with_storage(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage: Some(storage),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    // 获取选课记录列表
    pub async fn list_enrollments(
        &self,
        query: EnrollmentQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_enrollments(self, query, request).await
    }

    // 创建选课记录
    pub async fn create_enrollment(
        &self,
        enrollment_data: CreateEnrollmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_enrollment(self, enrollment_data, request).await
    }

    // 根据ID获取选课记录
    pub async fn get_enrollment(
        &self,
        enrollment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_enrollment(self, enrollment_id, request).await
    }

    // 更新选课状态或日期
    pub async fn update_enrollment(
        &self,
        enrollment_id: i64,
        update_data: UpdateEnrollmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_enrollment(self, enrollment_id, update_data, request).await
    }

    // 删除选课记录（不影响学生与教室）
    pub async fn delete_enrollment(
        &self,
        enrollment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_enrollment(self, enrollment_id, request).await
    }
}

/// 选课写入前的检查结果
pub(crate) enum Rejection {
    Invalid(String),
    Duplicate,
    ClassroomFull { capacity: i32 },
}

impl Rejection {
    pub(crate) fn into_response(self) -> HttpResponse {
        match self {
            Rejection::Invalid(msg) => bad_request(ErrorCode::EnrollmentInvalid, msg),
            Rejection::Duplicate => HttpResponse::Conflict().json(
                crate::models::ApiResponse::error_empty(
                    ErrorCode::EnrollmentAlreadyExists,
                    "Student is already enrolled in this classroom",
                ),
            ),
            Rejection::ClassroomFull { capacity } => HttpResponse::Conflict().json(
                crate::models::ApiResponse::error_empty(
                    ErrorCode::ClassroomFull,
                    format!("Classroom is full (capacity {capacity})"),
                ),
            ),
        }
    }
}

/// 目标状态下的选课是否可写入
///
/// `existing_id` 为正在更新的记录，重复检查与容量统计都会排除它自己。
pub(crate) async fn check_enrollment(
    storage: &Arc<dyn Storage>,
    student_id: i64,
    classroom_id: i64,
    status: EnrollmentStatus,
    existing_id: Option<i64>,
    already_counted: bool,
) -> StorageResult<Option<Rejection>> {
    if storage.get_student_by_id(student_id).await?.is_none() {
        return Ok(Some(Rejection::Invalid(format!(
            "Student {student_id} does not exist"
        ))));
    }

    let Some(classroom) = storage.get_classroom_by_id(classroom_id).await? else {
        return Ok(Some(Rejection::Invalid(format!(
            "Classroom {classroom_id} does not exist"
        ))));
    };

    if let Some(other) = storage
        .get_enrollment_by_student_and_classroom(student_id, classroom_id)
        .await?
        && Some(other.id) != existing_id
    {
        return Ok(Some(Rejection::Duplicate));
    }

    // 已计入该教室 active 人数的记录不再占用新名额
    if status == EnrollmentStatus::Active && !already_counted {
        let active = storage.count_active_enrollments(classroom_id).await?;
        if active >= i64::from(classroom.capacity) {
            return Ok(Some(Rejection::ClassroomFull {
                capacity: classroom.capacity,
            }));
        }
    }

    Ok(None)
}

pub(crate) fn check_failed(e: crate::errors::SchoolAdminError) -> HttpResponse {
    storage_error_response(
        "Failed to check enrollment",
        e,
        ErrorCode::EnrollmentInvalid,
        ErrorCode::EnrollmentAlreadyExists,
    )
}
