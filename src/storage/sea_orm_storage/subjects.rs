//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::contains_literal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建科目
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            description: Set(req.description.trim().to_string()),
            workload_hours: Set(req.workload_hours),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("创建科目失败", e))?;

        Ok(result.into_subject())
    }

    /// 通过 ID 获取科目
    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目失败: {e}")))?;

        Ok(result.map(|m| m.into_subject()))
    }

    /// 按 ID 批量获取科目
    pub async fn get_subjects_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Subject>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let subjects = Subjects::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("批量查询科目失败: {e}")))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 分页列出科目
    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Subjects::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(contains_literal(Column::Name, term))
                    .add(contains_literal(Column::Description, term)),
            );
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目总数失败: {e}")))?;

        let subjects = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询科目列表失败: {e}")))?;

        Ok(SubjectListResponse {
            items: subjects.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新科目
    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        if self.get_subject_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name.trim().to_string());
        }
        if let Some(description) = update.description {
            model.description = Set(description.trim().to_string());
        }
        if let Some(workload_hours) = update.workload_hours {
            model.workload_hours = Set(Some(workload_hours));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("更新科目失败", e))?;

        Ok(Some(updated.into_subject()))
    }

    /// 删除科目，教室关联由外键清理
    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let result = Subjects::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除科目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::classrooms::requests::CreateClassroomRequest;

    #[tokio::test]
    async fn test_subject_crud() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Chemistry".to_string(),
                description: "Organic and inorganic chemistry".to_string(),
                workload_hours: None,
            })
            .await
            .unwrap();
        assert!(subject.workload_hours.is_none());

        let updated = storage
            .update_subject_impl(
                subject.id,
                UpdateSubjectRequest {
                    workload_hours: Some(80),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.workload_hours, Some(80));
        assert_eq!(updated.name, "Chemistry");

        let found = storage
            .list_subjects_with_pagination_impl(SubjectListQuery {
                search: Some("organic".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);

        assert!(storage.delete_subject_impl(subject.id).await.unwrap());
        assert!(storage.get_subject_by_id_impl(subject.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_subject_from_classrooms() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let subject = storage
            .create_subject_impl(CreateSubjectRequest {
                name: "Geography".to_string(),
                description: "Maps, climate and population".to_string(),
                workload_hours: Some(80),
            })
            .await
            .unwrap();
        let classroom = storage
            .create_classroom_impl(CreateClassroomRequest {
                name: "Room 8C".to_string(),
                capacity: 20,
                schedule: "Mon-Fri 13:00-17:30".to_string(),
                subjects: vec![subject.id],
                teachers: vec![],
                class_teacher_id: None,
            })
            .await
            .unwrap();
        assert_eq!(classroom.subjects, vec![subject.id]);

        assert!(storage.delete_subject_impl(subject.id).await.unwrap());

        let fetched = storage
            .get_classroom_by_id_impl(classroom.id)
            .await
            .unwrap()
            .unwrap();
        assert!(fetched.subjects.is_empty());
    }
}
