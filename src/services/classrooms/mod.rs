pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::Result as StorageResult;
use crate::models::classrooms::requests::dedup_ids;
use crate::models::classrooms::requests::{
    ClassroomQueryParams, CreateClassroomRequest, UpdateClassroomRequest,
};
use crate::storage::Storage;

pub struct ClassroomService {
    storage: Option<Arc<dyn Storage>>,
}

impl ClassroomService {
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

    // 获取教室列表
    pub async fn list_classrooms(
        &self,
        query: ClassroomQueryParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_classrooms(self, query, request).await
    }

    // 创建教室
    pub async fn create_classroom(
        &self,
        classroom_data: CreateClassroomRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_classroom(self, classroom_data, request).await
    }

    // 根据ID获取教室
    pub async fn get_classroom(
        &self,
        classroom_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_classroom(self, classroom_id, request).await
    }

    // 更新教室信息
    pub async fn update_classroom(
        &self,
        classroom_id: i64,
        update_data: UpdateClassroomRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_classroom(self, classroom_id, update_data, request).await
    }

    // 删除教室
    pub async fn delete_classroom(
        &self,
        classroom_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_classroom(self, classroom_id, request).await
    }
}

/// 检查引用的科目、教师与班主任是否存在，返回第一个问题的描述
pub(crate) async fn find_missing_references(
    storage: &Arc<dyn Storage>,
    subjects: Option<&[i64]>,
    teachers: Option<&[i64]>,
    class_teacher_id: Option<i64>,
) -> StorageResult<Option<String>> {
    if let Some(ids) = subjects {
        let ids = dedup_ids(ids);
        let found: Vec<i64> = storage
            .get_subjects_by_ids(&ids)
            .await?
            .into_iter()
            .map(|subject| subject.id)
            .collect();
        let missing: Vec<i64> = ids.into_iter().filter(|id| !found.contains(id)).collect();
        if !missing.is_empty() {
            return Ok(Some(format!("Unknown subject ids: {missing:?}")));
        }
    }

    // 班主任与任课教师一起校验
    let mut teacher_ids = teachers.map(dedup_ids).unwrap_or_default();
    if let Some(id) = class_teacher_id
        && !teacher_ids.contains(&id)
    {
        teacher_ids.push(id);
    }
    if !teacher_ids.is_empty() {
        let found: Vec<i64> = storage
            .get_teachers_by_ids(&teacher_ids)
            .await?
            .into_iter()
            .map(|teacher| teacher.id)
            .collect();
        let missing: Vec<i64> = teacher_ids
            .into_iter()
            .filter(|id| !found.contains(id))
            .collect();
        if !missing.is_empty() {
            return Ok(Some(format!("Unknown teacher ids: {missing:?}")));
        }
    }

    Ok(None)
}
