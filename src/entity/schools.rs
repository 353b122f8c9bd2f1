//! 学校实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "schools")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub intro: Option<String>,
    pub admin_telephone: String,
    pub disabled: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::courses::Entity")]
    Courses,
    #[sea_orm(has_many = "super::invite_codes::Entity")]
    InviteCodes,
    #[sea_orm(has_many = "super::school_teachers::Entity")]
    SchoolTeachers,
    #[sea_orm(has_many = "super::school_students::Entity")]
    SchoolStudents,
    #[sea_orm(has_many = "super::asks::Entity")]
    Asks,
}

impl Related<super::courses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courses.def()
    }
}

impl Related<super::invite_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InviteCodes.def()
    }
}

impl Related<super::school_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolTeachers.def()
    }
}

impl Related<super::school_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolStudents.def()
    }
}

impl Related<super::asks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_school(self) -> crate::models::schools::entities::School {
        use crate::models::schools::entities::School;
        use chrono::{DateTime, Utc};

        School {
            id: self.id,
            name: self.name,
            intro: self.intro,
            admin_telephone: self.admin_telephone,
            disabled: self.disabled,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
