use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::topic_images::{ActiveModel, Column, Entity as TopicImages};
use crate::errors::{AskSystemError, Result};
use crate::models::images::entities::{TopicImage, UploaderKind};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 登记已上传的图片
    pub async fn register_topic_image_impl(
        &self,
        uploader_kind: UploaderKind,
        uploader_id: i64,
        img_url: &str,
    ) -> Result<TopicImage> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            img_url: Set(img_url.to_string()),
            uploader_kind: Set(uploader_kind.to_string()),
            uploader_id: Set(uploader_id),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("登记图片失败: {e}")))?;

        Ok(result.into_topic_image())
    }

    /// 通过 ID 获取图片
    pub async fn get_topic_image_by_id_impl(&self, image_id: i64) -> Result<Option<TopicImage>> {
        let result = TopicImages::find_by_id(image_id)
            .one(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询图片失败: {e}")))?;

        Ok(result.map(|m| m.into_topic_image()))
    }
}

/// 批量加载图片，返回 id 到图片的映射
pub(super) async fn load_topic_images<C: ConnectionTrait>(
    conn: &C,
    ids: &[i64],
) -> Result<HashMap<i64, TopicImage>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let images = TopicImages::find()
        .filter(Column::Id.is_in(ids.to_vec()))
        .all(conn)
        .await
        .map_err(|e| AskSystemError::database_operation(format!("批量查询图片失败: {e}")))?;

    Ok(images
        .into_iter()
        .map(|m| (m.id, m.into_topic_image()))
        .collect())
}

/// 校验引用的图片全部存在，引用了未登记的 id 按参数校验失败处理
pub(super) async fn assert_topic_images_exist<C: ConnectionTrait>(
    conn: &C,
    ids: &[i64],
) -> Result<()> {
    if ids.is_empty() {
        return Ok(());
    }

    let found = load_topic_images(conn, ids).await?;
    for id in ids {
        if !found.contains_key(id) {
            return Err(AskSystemError::validation(format!("图片 {id} 未登记")));
        }
    }

    Ok(())
}
