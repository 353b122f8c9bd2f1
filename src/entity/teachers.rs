//! 教师实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "teachers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub nickname: String,
    pub realname: Option<String>,
    pub intro: Option<String>,
    pub avatar_url: Option<String>,
    pub email: Option<String>,
    #[sea_orm(unique)]
    pub telephone: String,
    pub gender: i32,
    #[sea_orm(unique)]
    pub wx_openid: Option<String>,
    pub password_hash: String,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::school_teachers::Entity")]
    SchoolTeachers,
}

impl Related<super::school_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SchoolTeachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_teacher(self) -> crate::models::teachers::entities::Teacher {
        use crate::models::teachers::entities::Teacher;
        use chrono::{DateTime, Utc};

        Teacher {
            id: self.id,
            nickname: self.nickname,
            realname: self.realname,
            intro: self.intro,
            avatar_url: self.avatar_url,
            email: self.email,
            telephone: self.telephone,
            gender: self.gender,
            wx_openid: self.wx_openid,
            password_hash: self.password_hash,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
