//! 回答实体
//!
//! teacher_id 与 student_id 恰有一个非空，学生追问也以回答形式存储。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub ask_id: i64,
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
    pub answer_text: Option<String>,
    pub voice_url: Option<String>,
    pub voice_duration: Option<i32>,
    pub img_ids: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asks::Entity",
        from = "Column::AskId",
        to = "super::asks::Column::Id"
    )]
    Ask,
    #[sea_orm(
        belongs_to = "super::teachers::Entity",
        from = "Column::TeacherId",
        to = "super::teachers::Column::Id"
    )]
    Teacher,
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
}

impl Related<super::asks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ask.def()
    }
}

impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_answer(self) -> crate::models::answers::entities::Answer {
        use crate::models::answers::entities::Answer;
        use chrono::{DateTime, Utc};

        Answer {
            id: self.id,
            ask_id: self.ask_id,
            teacher_id: self.teacher_id,
            student_id: self.student_id,
            answer_text: self.answer_text,
            voice_url: self.voice_url,
            voice_duration: self.voice_duration,
            img_ids: self
                .img_ids
                .as_deref()
                .map(crate::utils::id_list::parse_id_list)
                .unwrap_or_default(),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
