//! 教师存储操作

use super::{SeaOrmStorage, normalize_date};
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
};
use crate::utils::contains_literal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

/// 空白的专长视为未填写
fn normalize_specialization(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl SeaOrmStorage {
    /// 创建教师
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.trim().to_string()),
            phone: Set(req.phone.trim().to_string()),
            subject: Set(req.subject.trim().to_string()),
            date_of_birth: Set(normalize_date("date_of_birth", &req.date_of_birth)?),
            address: Set(req.address.trim().to_string()),
            specialization: Set(normalize_specialization(req.specialization)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("创建教师失败", e))?;

        Ok(result.into_teacher())
    }

    /// 通过 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 按 ID 批量获取教师
    pub async fn get_teachers_by_ids_impl(&self, ids: &[i64]) -> Result<Vec<Teacher>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let teachers = Teachers::find()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("批量查询教师失败: {e}")))?;

        Ok(teachers.into_iter().map(|m| m.into_teacher()).collect())
    }

    /// 分页列出教师
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Teachers::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(contains_literal(Column::Name, term))
                    .add(contains_literal(Column::Email, term))
                    .add(contains_literal(Column::Specialization, term)),
            );
        }

        // 按任教科目筛选
        if let Some(ref subject) = query.subject
            && !subject.trim().is_empty()
        {
            select = select.filter(Column::Subject.eq(subject.trim()));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教师总数失败: {e}")))?;

        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教师列表失败: {e}")))?;

        Ok(TeacherListResponse {
            items: teachers.into_iter().map(|m| m.into_teacher()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新教师信息
    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        if self.get_teacher_by_id_impl(id).await?.is_none() {
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
        if let Some(email) = update.email {
            model.email = Set(email.trim().to_string());
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone.trim().to_string());
        }
        if let Some(subject) = update.subject {
            model.subject = Set(subject.trim().to_string());
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(normalize_date("date_of_birth", &date_of_birth)?);
        }
        if let Some(address) = update.address {
            model.address = Set(address.trim().to_string());
        }
        // 传入空字符串表示清除
        if update.specialization.is_some() {
            model.specialization = Set(normalize_specialization(update.specialization));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("更新教师失败", e))?;

        Ok(Some(updated.into_teacher()))
    }

    /// 删除教师，教室关联由外键清理，班主任置空
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let result = Teachers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: u32, subject: &str) -> CreateTeacherRequest {
        CreateTeacherRequest {
            name: format!("Teacher {n}"),
            email: format!("teacher{n}@school.edu"),
            phone: "+55 21 3333-0000".to_string(),
            subject: subject.to_string(),
            date_of_birth: "1980-01-15".to_string(),
            address: "Rua do Ouvidor, 50".to_string(),
            specialization: Some("  ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_blank_specialization_is_none() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let teacher = storage
            .create_teacher_impl(sample(1, "Mathematics"))
            .await
            .unwrap();
        assert!(teacher.specialization.is_none());

        let updated = storage
            .update_teacher_impl(
                teacher.id,
                UpdateTeacherRequest {
                    specialization: Some("Algebra".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.specialization.as_deref(), Some("Algebra"));

        let cleared = storage
            .update_teacher_impl(
                teacher.id,
                UpdateTeacherRequest {
                    specialization: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(cleared.specialization.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage
            .create_teacher_impl(sample(1, "History"))
            .await
            .unwrap();
        let err = storage
            .create_teacher_impl(CreateTeacherRequest {
                name: "Someone Else".to_string(),
                ..sample(1, "Physics")
            })
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolAdminError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_filter_by_subject_and_batch_lookup() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let a = storage
            .create_teacher_impl(sample(1, "History"))
            .await
            .unwrap();
        storage
            .create_teacher_impl(sample(2, "Physics"))
            .await
            .unwrap();
        let c = storage
            .create_teacher_impl(sample(3, "History"))
            .await
            .unwrap();

        let history = storage
            .list_teachers_with_pagination_impl(TeacherListQuery {
                subject: Some("History".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(history.pagination.total, 2);

        let batch = storage
            .get_teachers_by_ids_impl(&[c.id, a.id, 777])
            .await
            .unwrap();
        let ids: Vec<i64> = batch.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
        assert!(storage.get_teachers_by_ids_impl(&[]).await.unwrap().is_empty());
    }
}
