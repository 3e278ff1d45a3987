//! 看板统计

use super::SeaOrmStorage;
use crate::entity::enrollments;
use crate::entity::prelude::{Classrooms, Enrollments, Students, Subjects, Teachers};
use crate::errors::{Result, SchoolAdminError};
use crate::models::dashboard::responses::{DashboardStats, EnrollmentStatusCounts};
use crate::models::enrollments::entities::EnrollmentStatus;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    async fn count_enrollments_with_status(&self, status: EnrollmentStatus) -> Result<i64> {
        let count = Enrollments::find()
            .filter(enrollments::Column::Status.eq(status.to_string()))
            .count(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("统计选课状态失败: {e}")))?;
        Ok(count as i64)
    }

    /// 汇总各实体数量与选课状态分布
    pub async fn dashboard_stats_impl(&self) -> Result<DashboardStats> {
        let db_err = |e: sea_orm::DbErr| {
            SchoolAdminError::database_operation(format!("统计看板数据失败: {e}"))
        };

        let students = Students::find().count(&self.db).await.map_err(db_err)?;
        let teachers = Teachers::find().count(&self.db).await.map_err(db_err)?;
        let subjects = Subjects::find().count(&self.db).await.map_err(db_err)?;
        let classrooms = Classrooms::find().count(&self.db).await.map_err(db_err)?;
        let total = Enrollments::find().count(&self.db).await.map_err(db_err)?;

        Ok(DashboardStats {
            students: students as i64,
            teachers: teachers as i64,
            subjects: subjects as i64,
            classrooms: classrooms as i64,
            enrollments: EnrollmentStatusCounts {
                active: self
                    .count_enrollments_with_status(EnrollmentStatus::Active)
                    .await?,
                pending: self
                    .count_enrollments_with_status(EnrollmentStatus::Pending)
                    .await?,
                cancelled: self
                    .count_enrollments_with_status(EnrollmentStatus::Cancelled)
                    .await?,
                total: total as i64,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_database_stats() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        let stats = storage.dashboard_stats_impl().await.unwrap();
        assert_eq!(stats.students, 0);
        assert_eq!(stats.enrollments.total, 0);
    }
}
