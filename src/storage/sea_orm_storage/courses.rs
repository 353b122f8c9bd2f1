use super::SeaOrmStorage;
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::errors::{AskSystemError, Result};
use crate::models::courses::{entities::Course, requests::CreateCourseRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建或更新学校的课程模板
    ///
    /// 学校已有课程时更新最早创建的那条，保持「一校一课」的额度模板语义。
    pub async fn upsert_course_impl(
        &self,
        school_id: i64,
        req: CreateCourseRequest,
    ) -> Result<Course> {
        let school = self.get_school_by_id_impl(school_id).await?;
        if school.is_none() {
            return Err(AskSystemError::not_found("学校不存在"));
        }

        let now = chrono::Utc::now().timestamp();

        let existing = Courses::find()
            .filter(Column::SchoolId.eq(school_id))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询课程失败: {e}")))?;

        let result = match existing {
            Some(course) => {
                let model = ActiveModel {
                    id: Set(course.id),
                    name: Set(req.name),
                    intro: Set(req.intro),
                    normal_times: Set(req.normal_times),
                    vip_times: Set(req.vip_times),
                    updated_at: Set(now),
                    ..Default::default()
                };

                model
                    .update(&self.db)
                    .await
                    .map_err(|e| AskSystemError::database_operation(format!("更新课程失败: {e}")))?
            }
            None => {
                let model = ActiveModel {
                    school_id: Set(school_id),
                    name: Set(req.name),
                    intro: Set(req.intro),
                    normal_times: Set(req.normal_times),
                    vip_times: Set(req.vip_times),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };

                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| AskSystemError::database_operation(format!("创建课程失败: {e}")))?
            }
        };

        Ok(result.into_course())
    }

    /// 获取学校的额度模板课程，取最早创建的一条
    pub async fn get_canonical_course_impl(&self, school_id: i64) -> Result<Option<Course>> {
        let result = Courses::find()
            .filter(Column::SchoolId.eq(school_id))
            .order_by_asc(Column::Id)
            .one(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询课程失败: {e}")))?;

        Ok(result.map(|m| m.into_course()))
    }
}
