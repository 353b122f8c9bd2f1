//! 提问实体
//!
//! be_answered 是派生列，始终等于「该提问存在至少一条回答」。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "asks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub school_id: i64,
    pub student_id: i64,
    pub ask_text: Option<String>,
    pub voice_url: Option<String>,
    pub voice_duration: Option<i32>,
    pub img_ids: Option<String>,
    pub be_answered: bool,
    pub answer_grade: Option<i32>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::schools::Entity",
        from = "Column::SchoolId",
        to = "super::schools::Column::Id"
    )]
    School,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
}

impl Related<super::schools::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::School.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_ask(self) -> crate::models::asks::entities::Ask {
        use crate::models::asks::entities::Ask;
        use chrono::{DateTime, Utc};

        Ask {
            id: self.id,
            school_id: self.school_id,
            student_id: self.student_id,
            ask_text: self.ask_text,
            voice_url: self.voice_url,
            voice_duration: self.voice_duration,
            img_ids: self
                .img_ids
                .as_deref()
                .map(crate::utils::id_list::parse_id_list)
                .unwrap_or_default(),
            be_answered: self.be_answered,
            answer_grade: self.answer_grade,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
