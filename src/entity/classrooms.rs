//! 教室实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "classrooms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub capacity: i32,
    pub schedule: String,
    pub class_teacher_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::ClassTeacherId",
        to = "super::teachers::Column::Id",
        on_delete = "SetNull"
    )]
    ClassTeacher,
    #[sea_orm(has_many = "super::classroom_subjects::Entity")]
    ClassroomSubjects,
    #[sea_orm(has_many = "super::classroom_teachers::Entity")]
    ClassroomTeachers,
    #[sea_orm(has_many = "super::enrollments::Entity")]
    Enrollments,
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassTeacher.def()
    }
}

impl Related<super::classroom_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassroomSubjects.def()
    }
}

impl Related<super::classroom_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassroomTeachers.def()
    }
}

impl Related<super::enrollments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 关联列表存放在独立的关联表中，由存储层查询后传入
    pub fn into_classroom(
        self,
        subjects: Vec<i64>,
        teachers: Vec<i64>,
    ) -> crate::models::classrooms::entities::Classroom {
        use super::timestamp_to_datetime;
        use crate::models::classrooms::entities::Classroom;

        Classroom {
            id: self.id,
            name: self.name,
            capacity: self.capacity,
            schedule: self.schedule,
            subjects,
            teachers,
            class_teacher_id: self.class_teacher_id,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
