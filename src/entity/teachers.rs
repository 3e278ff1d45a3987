//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub date_of_birth: String,
    pub address: String,
    pub specialization: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    // 作为班主任负责的教室
    #[sea_orm(has_many = "super::classrooms::Entity")]
    HomeroomClassrooms,
    #[sea_orm(has_many = "super::classroom_teachers::Entity")]
    ClassroomTeachers,
}

impl Related<super::classrooms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HomeroomClassrooms.def()
    }
}

impl Related<super::classroom_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassroomTeachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        use super::{parse_stored_date, timestamp_to_datetime};
        use crate::models::teachers::entities::Teacher;

        Teacher {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            date_of_birth: parse_stored_date(&self.date_of_birth),
            address: self.address,
            specialization: self.specialization,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
