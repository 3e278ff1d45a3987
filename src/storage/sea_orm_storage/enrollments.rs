//! 选课存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, normalize_date};
use crate::entity::classrooms::{self, Entity as Classrooms};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments, Model};
use crate::entity::students::{self, Entity as Students};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo,
    common::pagination::normalize_page,
    enrollments::{
        entities::{Enrollment, EnrollmentStatus},
        requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
        responses::{EnrollmentDetail, EnrollmentListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建选课记录
    pub async fn create_enrollment_impl(&self, req: CreateEnrollmentRequest) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(req.student_id),
            classroom_id: Set(req.classroom_id),
            enrollment_date: Set(normalize_date("enrollment_date", &req.enrollment_date)?),
            status: Set(req.status.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("创建选课记录失败", e))?;

        Ok(result.into_enrollment())
    }

    /// 通过 ID 获取选课记录
    pub async fn get_enrollment_by_id_impl(&self, id: i64) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 获取学生在指定教室的选课记录
    pub async fn get_enrollment_by_student_and_classroom_impl(
        &self,
        student_id: i64,
        classroom_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::ClassroomId.eq(classroom_id))
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 为选课记录补齐学生姓名与教室名称
    async fn resolve_names(&self, models: Vec<Model>) -> Result<Vec<EnrollmentDetail>> {
        let student_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();
        let classroom_ids: Vec<i64> = models.iter().map(|m| m.classroom_id).collect();

        let student_names: HashMap<i64, String> = if student_ids.is_empty() {
            HashMap::new()
        } else {
            Students::find()
                .select_only()
                .column(students::Column::Id)
                .column(students::Column::Name)
                .filter(students::Column::Id.is_in(student_ids))
                .into_tuple::<(i64, String)>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("查询学生姓名失败: {e}"))
                })?
                .into_iter()
                .collect()
        };

        let classroom_names: HashMap<i64, String> = if classroom_ids.is_empty() {
            HashMap::new()
        } else {
            Classrooms::find()
                .select_only()
                .column(classrooms::Column::Id)
                .column(classrooms::Column::Name)
                .filter(classrooms::Column::Id.is_in(classroom_ids))
                .into_tuple::<(i64, String)>()
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("查询教室名称失败: {e}"))
                })?
                .into_iter()
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| {
                let student_name = student_names.get(&m.student_id).cloned();
                let classroom_name = classroom_names.get(&m.classroom_id).cloned();
                EnrollmentDetail {
                    enrollment: m.into_enrollment(),
                    student_name,
                    classroom_name,
                }
            })
            .collect())
    }

    /// 分页列出选课记录
    pub async fn list_enrollments_with_pagination_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<EnrollmentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Enrollments::find();

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(classroom_id) = query.classroom_id {
            select = select.filter(Column::ClassroomId.eq(classroom_id));
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator.num_items().await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询选课记录总数失败: {e}"))
        })?;

        let models = paginator.fetch_page(page - 1).await.map_err(|e| {
            SchoolAdminError::database_operation(format!("查询选课记录列表失败: {e}"))
        })?;

        Ok(EnrollmentListResponse {
            items: self.resolve_names(models).await?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新选课记录
    pub async fn update_enrollment_impl(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>> {
        if self.get_enrollment_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(student_id) = update.student_id {
            model.student_id = Set(student_id);
        }
        if let Some(classroom_id) = update.classroom_id {
            model.classroom_id = Set(classroom_id);
        }
        if let Some(enrollment_date) = update.enrollment_date {
            model.enrollment_date = Set(normalize_date("enrollment_date", &enrollment_date)?);
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| SchoolAdminError::from_db("更新选课记录失败", e))?;

        Ok(Some(updated.into_enrollment()))
    }

    /// 删除选课记录
    pub async fn delete_enrollment_impl(&self, id: i64) -> Result<bool> {
        let result = Enrollments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除选课记录失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计教室内 active 状态的选课数
    pub async fn count_active_enrollments_impl(&self, classroom_id: i64) -> Result<i64> {
        let count = Enrollments::find()
            .filter(Column::ClassroomId.eq(classroom_id))
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| {
                SchoolAdminError::database_operation(format!("统计教室在读人数失败: {e}"))
            })?;

        Ok(count as i64)
    }
}
