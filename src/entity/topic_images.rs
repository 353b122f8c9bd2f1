//! 题目图片实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "topic_images")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub img_url: String,
    pub uploader_kind: String,
    pub uploader_id: i64,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_topic_image(self) -> crate::models::images::entities::TopicImage {
        use crate::models::images::entities::{TopicImage, UploaderKind};
        use chrono::{DateTime, Utc};

        TopicImage {
            id: self.id,
            img_url: self.img_url,
            uploader_kind: self
                .uploader_kind
                .parse::<UploaderKind>()
                .unwrap_or(UploaderKind::Student),
            uploader_id: self.uploader_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
