//! 科目实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "subjects")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub description: String,
    pub workload_hours: Option<i32>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::classroom_subjects::Entity")]
    ClassroomSubjects,
}

impl Related<super::classroom_subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassroomSubjects.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_subject(self) -> crate::models::subjects::entities::Subject {
        use super::timestamp_to_datetime;
        use crate::models::subjects::entities::Subject;

        Subject {
            id: self.id,
            name: self.name,
            description: self.description,
            workload_hours: self.workload_hours,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
