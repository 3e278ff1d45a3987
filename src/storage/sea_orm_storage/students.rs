//! 学生存储操作

use super::{SeaOrmStorage, normalize_date};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
};
use crate::utils::contains_literal;
use sea_orm::{
    ActiveModelTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建学生
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            email: Set(req.email.trim().to_string()),
            date_of_birth: Set(normalize_date("date_of_birth", &req.date_of_birth)?),
            enrollment_number: Set(req.enrollment_number.trim().to_string()),
            phone: Set(req.phone.trim().to_string()),
            address: Set(req.address.trim().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("创建学生失败", e))?;

        Ok(result.into_student())
    }

    /// 通过 ID 获取学生
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Students::find();

        // 搜索姓名、邮箱、学号
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(contains_literal(Column::Name, term))
                    .add(contains_literal(Column::Email, term))
                    .add(contains_literal(Column::EnrollmentNumber, term)),
            );
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生总数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(StudentListResponse {
            items: students.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新学生信息
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if self.get_student_by_id_impl(id).await?.is_none() {
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
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(normalize_date("date_of_birth", &date_of_birth)?);
        }
        if let Some(enrollment_number) = update.enrollment_number {
            model.enrollment_number = Set(enrollment_number.trim().to_string());
        }
        if let Some(phone) = update.phone {
            model.phone = Set(phone.trim().to_string());
        }
        if let Some(address) = update.address {
            model.address = Set(address.trim().to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("更新学生失败", e))?;

        Ok(Some(updated.into_student()))
    }

    /// 删除学生，选课记录由外键级联删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(n: u32) -> CreateStudentRequest {
        CreateStudentRequest {
            name: format!("Student {n}"),
            email: format!("student{n}@school.edu"),
            date_of_birth: "2010-05-20".to_string(),
            enrollment_number: format!("STU-{n:04}"),
            phone: "+55 11 90000-0000".to_string(),
            address: "Rua Central, 1".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let created = storage.create_student_impl(sample(1)).await.unwrap();
        assert!(created.id > 0);

        let fetched = storage
            .get_student_by_id_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.enrollment_number, "STU-0001");
        assert_eq!(fetched.date_of_birth.to_string(), "2010-05-20");
        assert!(storage.get_student_by_id_impl(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_increase() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let a = storage.create_student_impl(sample(1)).await.unwrap();
        let b = storage.create_student_impl(sample(2)).await.unwrap();
        assert!(b.id > a.id);
    }

    #[tokio::test]
    async fn test_unique_enrollment_number_and_email() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.create_student_impl(sample(1)).await.unwrap();

        let dup_number = CreateStudentRequest {
            email: "other@school.edu".to_string(),
            ..sample(1)
        };
        let err = storage.create_student_impl(dup_number).await.unwrap_err();
        assert!(matches!(err, SchoolAdminError::Conflict(_)));

        let dup_email = CreateStudentRequest {
            enrollment_number: "STU-9999".to_string(),
            ..sample(1)
        };
        let err = storage.create_student_impl(dup_email).await.unwrap_err();
        assert!(matches!(err, SchoolAdminError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_list_search_and_pagination() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        for n in 1..=12 {
            storage.create_student_impl(sample(n)).await.unwrap();
        }

        let page = storage
            .list_students_with_pagination_impl(StudentListQuery {
                page: Some(2),
                size: Some(5),
                search: None,
            })
            .await
            .unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.pagination.total, 12);
        assert_eq!(page.pagination.total_pages, 3);
        assert_eq!(page.items[0].name, "Student 6");

        let found = storage
            .list_students_with_pagination_impl(StudentListQuery {
                search: Some("STU-0011".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(found.items.len(), 1);
        assert_eq!(found.items[0].email, "student11@school.edu");
    }

    #[tokio::test]
    async fn test_partial_update_and_delete() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let created = storage.create_student_impl(sample(1)).await.unwrap();

        let updated = storage
            .update_student_impl(
                created.id,
                UpdateStudentRequest {
                    address: Some("Av. Paulista, 900".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.address, "Av. Paulista, 900");
        assert_eq!(updated.name, created.name);

        let missing = storage
            .update_student_impl(404, UpdateStudentRequest::default())
            .await
            .unwrap();
        assert!(missing.is_none());

        assert!(storage.delete_student_impl(created.id).await.unwrap());
        assert!(!storage.delete_student_impl(created.id).await.unwrap());
    }
}
