//! 教室存储操作
//!
//! 教室的科目与教师列表保存在 `classroom_subjects`、`classroom_teachers` 两张关联表中，
//! 写入时与教室行处于同一事务。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::classroom_subjects::{
    self, ActiveModel as ClassroomSubjectActiveModel, Entity as ClassroomSubjects,
};
use crate::entity::classroom_teachers::{
    self, ActiveModel as ClassroomTeacherActiveModel, Entity as ClassroomTeachers,
};
use crate::entity::classrooms::{ActiveModel, Column, Entity as Classrooms, Model};
use crate::errors::{Result, SchoolAdminError};
use crate::models::{
    PaginationInfo,
    classrooms::{
        entities::Classroom,
        requests::{
            ClassroomListQuery, CreateClassroomRequest, UpdateClassroomRequest, dedup_ids,
        },
        responses::ClassroomListResponse,
    },
    common::pagination::normalize_page,
};
use crate::utils::contains_literal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionError, TransactionTrait,
};

/// 覆盖写入教室的科目关联
async fn replace_subject_links<C: ConnectionTrait>(
    conn: &C,
    classroom_id: i64,
    subject_ids: &[i64],
) -> Result<()> {
    ClassroomSubjects::delete_many()
        .filter(classroom_subjects::Column::ClassroomId.eq(classroom_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolAdminError::from_db("清理教室科目关联失败", e))?;

    let links: Vec<ClassroomSubjectActiveModel> = dedup_ids(subject_ids)
        .into_iter()
        .map(|subject_id| ClassroomSubjectActiveModel {
            classroom_id: Set(classroom_id),
            subject_id: Set(subject_id),
        })
        .collect();

    if !links.is_empty() {
        ClassroomSubjects::insert_many(links)
            .exec(conn)
            .await
            .map_err(|e| SchoolAdminError::from_db("写入教室科目关联失败", e))?;
    }
    Ok(())
}

/// 覆盖写入教室的教师关联
async fn replace_teacher_links<C: ConnectionTrait>(
    conn: &C,
    classroom_id: i64,
    teacher_ids: &[i64],
) -> Result<()> {
    ClassroomTeachers::delete_many()
        .filter(classroom_teachers::Column::ClassroomId.eq(classroom_id))
        .exec(conn)
        .await
        .map_err(|e| SchoolAdminError::from_db("清理教室教师关联失败", e))?;

    let links: Vec<ClassroomTeacherActiveModel> = dedup_ids(teacher_ids)
        .into_iter()
        .map(|teacher_id| ClassroomTeacherActiveModel {
            classroom_id: Set(classroom_id),
            teacher_id: Set(teacher_id),
        })
        .collect();

    if !links.is_empty() {
        ClassroomTeachers::insert_many(links)
            .exec(conn)
            .await
            .map_err(|e| SchoolAdminError::from_db("写入教室教师关联失败", e))?;
    }
    Ok(())
}

fn flatten_transaction_error(err: TransactionError<SchoolAdminError>) -> SchoolAdminError {
    match err {
        TransactionError::Connection(e) => {
            SchoolAdminError::database_operation(format!("教室事务执行失败: {e}"))
        }
        TransactionError::Transaction(e) => e,
    }
}

impl SeaOrmStorage {
    /// 创建教室及其关联
    pub async fn create_classroom_impl(&self, req: CreateClassroomRequest) -> Result<Classroom> {
        let now = chrono::Utc::now().timestamp();
        // 与读取路径一致，按 ID 升序返回
        let mut subjects = dedup_ids(&req.subjects);
        subjects.sort_unstable();
        let mut teachers = dedup_ids(&req.teachers);
        teachers.sort_unstable();

        let model = ActiveModel {
            name: Set(req.name.trim().to_string()),
            capacity: Set(req.capacity),
            schedule: Set(req.schedule.trim().to_string()),
            class_teacher_id: Set(req.class_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let (link_subjects, link_teachers) = (subjects.clone(), teachers.clone());
        let classroom = self
            .db
            .transaction::<_, Model, SchoolAdminError>(|txn| {
                Box::pin(async move {
                    let classroom = model
                        .insert(txn)
                        .await
                        .map_err(|e| SchoolAdminError::from_db("创建教室失败", e))?;
                    replace_subject_links(txn, classroom.id, &link_subjects).await?;
                    replace_teacher_links(txn, classroom.id, &link_teachers).await?;
                    Ok(classroom)
                })
            })
            .await
            .map_err(flatten_transaction_error)?;

        Ok(classroom.into_classroom(subjects, teachers))
    }

    /// 通过 ID 获取教室
    pub async fn get_classroom_by_id_impl(&self, id: i64) -> Result<Option<Classroom>> {
        let result = Classrooms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教室失败: {e}")))?;

        match result {
            Some(model) => Ok(self.attach_links(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 为一组教室补齐关联的科目与教师 ID
    async fn attach_links(&self, models: Vec<Model>) -> Result<Vec<Classroom>> {
        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let subject_links = ClassroomSubjects::find()
            .filter(classroom_subjects::Column::ClassroomId.is_in(ids.clone()))
            .order_by_asc(classroom_subjects::Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教室科目失败: {e}")))?;

        let teacher_links = ClassroomTeachers::find()
            .filter(classroom_teachers::Column::ClassroomId.is_in(ids))
            .order_by_asc(classroom_teachers::Column::TeacherId)
            .all(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教室教师失败: {e}")))?;

        let mut subjects: HashMap<i64, Vec<i64>> = HashMap::new();
        for link in subject_links {
            subjects
                .entry(link.classroom_id)
                .or_default()
                .push(link.subject_id);
        }
        let mut teachers: HashMap<i64, Vec<i64>> = HashMap::new();
        for link in teacher_links {
            teachers
                .entry(link.classroom_id)
                .or_default()
                .push(link.teacher_id);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let id = m.id;
                m.into_classroom(
                    subjects.remove(&id).unwrap_or_default(),
                    teachers.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    /// 分页列出教室
    pub async fn list_classrooms_with_pagination_impl(
        &self,
        query: ClassroomListQuery,
    ) -> Result<ClassroomListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Classrooms::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let term = search.trim();
            select = select.filter(
                Condition::any()
                    .add(contains_literal(Column::Name, term))
                    .add(contains_literal(Column::Schedule, term)),
            );
        }

        // 教师筛选：班主任或任课教师
        if let Some(teacher_id) = query.teacher_id {
            let taught: Vec<i64> = ClassroomTeachers::find()
                .filter(classroom_teachers::Column::TeacherId.eq(teacher_id))
                .all(&self.db)
                .await
                .map_err(|e| {
                    SchoolAdminError::database_operation(format!("查询教师所在教室失败: {e}"))
                })?
                .into_iter()
                .map(|link| link.classroom_id)
                .collect();

            let mut condition = Condition::any().add(Column::ClassTeacherId.eq(teacher_id));
            if !taught.is_empty() {
                condition = condition.add(Column::Id.is_in(taught));
            }
            select = select.filter(condition);
        }

        select = select.order_by_asc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教室总数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教室列表失败: {e}")))?;

        Ok(ClassroomListResponse {
            items: self.attach_links(models).await?,
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 更新教室，提供的关联列表整体替换
    pub async fn update_classroom_impl(
        &self,
        id: i64,
        update: UpdateClassroomRequest,
    ) -> Result<Option<Classroom>> {
        if Classrooms::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("查询教室失败: {e}")))?
            .is_none()
        {
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
        if let Some(capacity) = update.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(schedule) = update.schedule {
            model.schedule = Set(schedule.trim().to_string());
        }
        if update.clear_class_teacher {
            model.class_teacher_id = Set(None);
        } else if let Some(class_teacher_id) = update.class_teacher_id {
            model.class_teacher_id = Set(Some(class_teacher_id));
        }

        let (subjects, teachers) = (update.subjects, update.teachers);
        self.db
            .transaction::<_, (), SchoolAdminError>(|txn| {
                Box::pin(async move {
                    model
                        .update(txn)
                        .await
                        .map_err(|e| SchoolAdminError::from_db("更新教室失败", e))?;
                    if let Some(ref subjects) = subjects {
                        replace_subject_links(txn, id, subjects).await?;
                    }
                    if let Some(ref teachers) = teachers {
                        replace_teacher_links(txn, id, teachers).await?;
                    }
                    Ok(())
                })
            })
            .await
            .map_err(flatten_transaction_error)?;

        self.get_classroom_by_id_impl(id).await
    }

    /// 删除教室，关联与选课记录由外键级联删除
    pub async fn delete_classroom_impl(&self, id: i64) -> Result<bool> {
        let result = Classrooms::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SchoolAdminError::database_operation(format!("删除教室失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
