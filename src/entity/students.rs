//! 学生实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nickname: String,
    pub realname: Option<String>,
    pub avatar_url: Option<String>,
    pub from_where: Option<String>,
    #[sea_orm(unique)]
    pub telephone: Option<String>,
    #[sea_orm(unique)]
    pub wx_openid: Option<String>,
    pub password_hash: Option<String>,
    pub disabled: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::school_students::Entity")]
    SchoolStudents,
    #[sea_orm(has_many = "super::asks::Entity")]
    Asks,
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
    pub fn into_student(self) -> crate::models::students::entities::Student {
        use crate::models::students::entities::Student;
        use chrono::{DateTime, Utc};

        Student {
            id: self.id,
            nickname: self.nickname,
            realname: self.realname,
            avatar_url: self.avatar_url,
            from_where: self.from_where,
            telephone: self.telephone,
            wx_openid: self.wx_openid,
            password_hash: self.password_hash,
            disabled: self.disabled,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
