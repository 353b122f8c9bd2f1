//! 提问存储操作
//!
//! 发起提问时，入学校验、图片校验、额度消耗与提问写入在同一事务内完成，
//! 任何一步失败整个事务回滚，额度不会被白白扣掉。

use super::SeaOrmStorage;
use super::quota::consume_quota_within;
use super::topic_images::{assert_topic_images_exist, load_topic_images};
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::asks::{ActiveModel, Column, Entity as Asks};
use crate::entity::school_students;
use crate::errors::{AskSystemError, Result};
use crate::models::{
    PaginationInfo,
    asks::{
        entities::Ask,
        requests::{AskListQuery, CreateAskRequest},
        responses::{AnswerView, AskListResponse, AskView},
    },
};
use crate::utils::id_list::join_id_list;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 发起提问
    pub async fn create_ask_impl(&self, student_id: i64, req: CreateAskRequest) -> Result<Ask> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let enrollment = school_students::Entity::find()
            .filter(
                Condition::all()
                    .add(school_students::Column::StudentId.eq(student_id))
                    .add(school_students::Column::SchoolId.eq(req.school_id)),
            )
            .one(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询入学记录失败: {e}")))?
            .ok_or_else(|| AskSystemError::forbidden("尚未加入该学校，无法提问"))?;

        // 图片校验在扣额度之前，引用失效不应消耗次数
        assert_topic_images_exist(&txn, &req.img_ids).await?;

        consume_quota_within(&txn, enrollment.id, now).await?;

        let model = ActiveModel {
            school_id: Set(req.school_id),
            student_id: Set(student_id),
            ask_text: Set(req.ask_text),
            voice_url: Set(req.voice_url),
            voice_duration: Set(req.voice_duration),
            img_ids: Set(join_id_list(&req.img_ids)),
            be_answered: Set(false),
            answer_grade: Set(None),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("创建提问失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_ask())
    }

    /// 通过 ID 获取提问
    pub async fn get_ask_by_id_impl(&self, ask_id: i64) -> Result<Option<Ask>> {
        let result = Asks::find_by_id(ask_id)
            .one(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询提问失败: {e}")))?;

        Ok(result.map(|m| m.into_ask()))
    }

    /// 获取提问详情，附带图片与全部回答
    pub async fn get_ask_detail_impl(&self, ask_id: i64) -> Result<Option<AskView>> {
        let result = Asks::find_by_id(ask_id)
            .one(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询提问失败: {e}")))?;

        let Some(model) = result else {
            return Ok(None);
        };

        let mut views = build_ask_views(&self.db, vec![model]).await?;
        Ok(views.pop())
    }

    /// 分页列出提问
    pub async fn list_asks_with_pagination_impl(
        &self,
        query: AskListQuery,
    ) -> Result<AskListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Asks::find();

        if let Some(school_id) = query.school_id {
            select = select.filter(Column::SchoolId.eq(school_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        if let Some(answered) = query.answered {
            select = select.filter(Column::BeAnswered.eq(answered));
        }

        // 最新的提问排在前面
        select = select.order_by_desc(Column::CreatedAt).order_by_desc(Column::Id);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询提问总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询提问页数失败: {e}")))?;

        let asks = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询提问列表失败: {e}")))?;

        let items = build_ask_views(&self.db, asks).await?;

        Ok(AskListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 删除提问，回答随外键级联删除
    pub async fn delete_ask_impl(&self, ask_id: i64, student_id: i64) -> Result<()> {
        let ask = Asks::find_by_id(ask_id)
            .one(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询提问失败: {e}")))?
            .ok_or_else(|| AskSystemError::not_found("提问不存在"))?;

        if ask.student_id != student_id {
            return Err(AskSystemError::forbidden("只能删除自己的提问"));
        }

        Asks::delete_by_id(ask_id)
            .exec(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("删除提问失败: {e}")))?;

        Ok(())
    }

    /// 评价回答
    pub async fn rate_answer_impl(&self, ask_id: i64, student_id: i64, grade: i32) -> Result<Ask> {
        if !(0..=2).contains(&grade) {
            return Err(AskSystemError::validation("评分只能是 0、1、2"));
        }

        let ask = Asks::find_by_id(ask_id)
            .one(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询提问失败: {e}")))?
            .ok_or_else(|| AskSystemError::not_found("提问不存在"))?;

        if ask.student_id != student_id {
            return Err(AskSystemError::forbidden("只有提问学生本人可以评价"));
        }

        if !ask.be_answered {
            return Err(AskSystemError::not_answered("提问尚未被回答，无法评价"));
        }

        let model = ActiveModel {
            id: Set(ask_id),
            answer_grade: Set(Some(grade)),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("评价回答失败: {e}")))?;

        Ok(result.into_ask())
    }

    /// 统计学生在学校内的提问数量
    pub async fn count_student_asks_impl(&self, student_id: i64, school_id: i64) -> Result<u64> {
        let count = Asks::find()
            .filter(
                Condition::all()
                    .add(Column::StudentId.eq(student_id))
                    .add(Column::SchoolId.eq(school_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("统计提问数量失败: {e}")))?;

        Ok(count)
    }
}

/// 把提问记录组装成视图：解析图片引用、挂上全部回答
pub(super) async fn build_ask_views<C: ConnectionTrait>(
    conn: &C,
    asks: Vec<crate::entity::asks::Model>,
) -> Result<Vec<AskView>> {
    if asks.is_empty() {
        return Ok(vec![]);
    }

    let ask_ids: Vec<i64> = asks.iter().map(|m| m.id).collect();

    let answer_rows = Answers::find()
        .filter(AnswerColumn::AskId.is_in(ask_ids))
        .order_by_asc(AnswerColumn::Id)
        .all(conn)
        .await
        .map_err(|e| AskSystemError::database_operation(format!("查询回答列表失败: {e}")))?;

    let asks: Vec<Ask> = asks.into_iter().map(|m| m.into_ask()).collect();
    let answers: Vec<crate::models::answers::entities::Answer> =
        answer_rows.into_iter().map(|m| m.into_answer()).collect();

    // 一次性取回所有被引用的图片
    let mut image_ids: Vec<i64> = asks.iter().flat_map(|a| a.img_ids.iter().copied()).collect();
    image_ids.extend(answers.iter().flat_map(|a| a.img_ids.iter().copied()));
    image_ids.sort_unstable();
    image_ids.dedup();

    let images = load_topic_images(conn, &image_ids).await?;

    let mut answers_by_ask: HashMap<i64, Vec<AnswerView>> = HashMap::new();
    for answer in answers {
        let view = AnswerView {
            images: resolve_images(&images, &answer.img_ids),
            answer,
        };
        answers_by_ask.entry(view.answer.ask_id).or_default().push(view);
    }

    Ok(asks
        .into_iter()
        .map(|ask| AskView {
            images: resolve_images(&images, &ask.img_ids),
            answers: answers_by_ask.remove(&ask.id).unwrap_or_default(),
            ask,
        })
        .collect())
}

fn resolve_images(
    images: &HashMap<i64, crate::models::images::entities::TopicImage>,
    ids: &[i64],
) -> Vec<crate::models::images::entities::TopicImage> {
    ids.iter().filter_map(|id| images.get(id).cloned()).collect()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{
        employ_teacher, enroll_with_quota, memory_storage, seed_course, seed_school, seed_student,
        seed_teacher,
    };
    use crate::errors::AskSystemError;
    use crate::models::answers::entities::AnswerAuthor;
    use crate::models::answers::requests::CreateAnswerRequest;
    use crate::models::asks::requests::{AskListQuery, CreateAskRequest};
    use crate::models::images::entities::UploaderKind;

    fn text_ask(school_id: i64, text: &str) -> CreateAskRequest {
        CreateAskRequest {
            school_id,
            ask_text: Some(text.to_string()),
            voice_url: None,
            voice_duration: None,
            img_ids: vec![],
        }
    }

    fn text_answer(text: &str) -> CreateAnswerRequest {
        CreateAnswerRequest {
            answer_text: Some(text.to_string()),
            voice_url: None,
            voice_duration: None,
            img_ids: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_ask_requires_enrollment() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "提问一中", "13800003001").await;
        seed_course(&storage, school_id, 5, -1).await;
        let outsider = seed_student(&storage, "13700003001").await;

        let err = storage
            .create_ask_impl(outsider, text_ask(school_id, "这道题怎么做？"))
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_create_ask_consumes_quota() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "提问二中", "13800003002").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700003002").await;
        enroll_with_quota(&storage, school_id, student_id, 2, 0, 0).await;

        let ask = storage
            .create_ask_impl(student_id, text_ask(school_id, "第一问"))
            .await
            .unwrap();
        assert!(!ask.be_answered);
        assert_eq!(ask.answer_grade, None);

        storage
            .create_ask_impl(student_id, text_ask(school_id, "第二问"))
            .await
            .unwrap();

        let enrollment = storage
            .get_enrollment_impl(student_id, school_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(enrollment.normal_times, 0);

        // 额度用尽后再提问被拒绝
        let err = storage
            .create_ask_impl(student_id, text_ask(school_id, "第三问"))
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::QuotaExceeded(_)));

        assert_eq!(
            storage.count_student_asks_impl(student_id, school_id).await.unwrap(),
            2
        );
    }

    #[tokio::test]
    async fn test_create_ask_missing_image_keeps_quota() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "提问三中", "13800003003").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700003003").await;
        enroll_with_quota(&storage, school_id, student_id, 1, 0, 0).await;

        let mut req = text_ask(school_id, "带图提问");
        req.img_ids = vec![9999];

        let err = storage.create_ask_impl(student_id, req).await.unwrap_err();
        assert!(matches!(err, AskSystemError::Validation(_)));

        // 图片校验失败不扣额度，也不落提问
        let enrollment = storage
            .get_enrollment_impl(student_id, school_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(enrollment.normal_times, 1);
        assert_eq!(
            storage.count_student_asks_impl(student_id, school_id).await.unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_create_ask_with_registered_images() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "提问四中", "13800003004").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700003004").await;
        enroll_with_quota(&storage, school_id, student_id, 1, 0, 0).await;

        let image = storage
            .register_topic_image_impl(UploaderKind::Student, student_id, "https://cdn.example.com/q1.png")
            .await
            .unwrap();

        let mut req = text_ask(school_id, "看图");
        req.img_ids = vec![image.id];
        let ask = storage.create_ask_impl(student_id, req).await.unwrap();
        assert_eq!(ask.img_ids, vec![image.id]);

        let detail = storage.get_ask_detail_impl(ask.id).await.unwrap().unwrap();
        assert_eq!(detail.images.len(), 1);
        assert_eq!(detail.images[0].img_url, "https://cdn.example.com/q1.png");
    }

    #[tokio::test]
    async fn test_concurrent_create_ask_single_slot() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "提问五中", "13800003005").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700003005").await;
        // 只有一次普通额度，无会员
        enroll_with_quota(&storage, school_id, student_id, 1, 0, 0).await;

        let (r1, r2, r3, r4) = tokio::join!(
            storage.create_ask_impl(student_id, text_ask(school_id, "并发一")),
            storage.create_ask_impl(student_id, text_ask(school_id, "并发二")),
            storage.create_ask_impl(student_id, text_ask(school_id, "并发三")),
            storage.create_ask_impl(student_id, text_ask(school_id, "并发四")),
        );

        let results = [r1, r2, r3, r4];
        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);

        for result in results.iter().filter(|r| r.is_err()) {
            assert!(matches!(
                result.as_ref().unwrap_err(),
                AskSystemError::QuotaExceeded(_)
            ));
        }

        // 额度扣到 0 为止，绝不为负
        let enrollment = storage
            .get_enrollment_impl(student_id, school_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(enrollment.normal_times, 0);
        assert_eq!(
            storage.count_student_asks_impl(student_id, school_id).await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_rate_answer_lifecycle() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "评价中学", "13800003006").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700003006").await;
        let other_student = seed_student(&storage, "13700003007").await;
        let teacher_id = seed_teacher(&storage, "13900003006").await;
        enroll_with_quota(&storage, school_id, student_id, 5, 0, 0).await;
        employ_teacher(&storage, school_id, teacher_id).await;

        let ask = storage
            .create_ask_impl(student_id, text_ask(school_id, "求解"))
            .await
            .unwrap();

        // 回答之前不能评价
        let err = storage.rate_answer_impl(ask.id, student_id, 2).await.unwrap_err();
        assert!(matches!(err, AskSystemError::NotAnswered(_)));

        storage
            .attach_answer_impl(ask.id, AnswerAuthor::Teacher(teacher_id), text_answer("解析如下"))
            .await
            .unwrap();

        // 只有提问学生本人可以评价
        let err = storage
            .rate_answer_impl(ask.id, other_student, 2)
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::Forbidden(_)));

        // 评分必须在闭集 {0,1,2} 内
        let err = storage.rate_answer_impl(ask.id, student_id, 5).await.unwrap_err();
        assert!(matches!(err, AskSystemError::Validation(_)));

        let rated = storage.rate_answer_impl(ask.id, student_id, 2).await.unwrap();
        assert_eq!(rated.answer_grade, Some(2));
    }

    #[tokio::test]
    async fn test_delete_ask_owner_only_and_cascades_answers() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "删除中学", "13800003007").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700003008").await;
        let other_student = seed_student(&storage, "13700003009").await;
        let teacher_id = seed_teacher(&storage, "13900003007").await;
        enroll_with_quota(&storage, school_id, student_id, 5, 0, 0).await;
        employ_teacher(&storage, school_id, teacher_id).await;

        let ask = storage
            .create_ask_impl(student_id, text_ask(school_id, "待删除"))
            .await
            .unwrap();
        storage
            .attach_answer_impl(ask.id, AnswerAuthor::Teacher(teacher_id), text_answer("回答"))
            .await
            .unwrap();

        let err = storage.delete_ask_impl(ask.id, other_student).await.unwrap_err();
        assert!(matches!(err, AskSystemError::Forbidden(_)));

        storage.delete_ask_impl(ask.id, student_id).await.unwrap();
        assert!(storage.get_ask_by_id_impl(ask.id).await.unwrap().is_none());
        assert!(storage.list_answers_for_ask_impl(ask.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_asks_filters() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "列表中学", "13800003008").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700003010").await;
        let teacher_id = seed_teacher(&storage, "13900003008").await;
        enroll_with_quota(&storage, school_id, student_id, 5, 0, 0).await;
        employ_teacher(&storage, school_id, teacher_id).await;

        let first = storage
            .create_ask_impl(student_id, text_ask(school_id, "已回答的"))
            .await
            .unwrap();
        storage
            .create_ask_impl(student_id, text_ask(school_id, "没回答的"))
            .await
            .unwrap();
        storage
            .attach_answer_impl(first.id, AnswerAuthor::Teacher(teacher_id), text_answer("好"))
            .await
            .unwrap();

        let all = storage
            .list_asks_with_pagination_impl(AskListQuery {
                school_id: Some(school_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 2);

        let answered = storage
            .list_asks_with_pagination_impl(AskListQuery {
                school_id: Some(school_id),
                answered: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(answered.pagination.total, 1);
        assert_eq!(answered.items[0].ask.id, first.id);
        assert_eq!(answered.items[0].answers.len(), 1);

        let unanswered = storage
            .list_asks_with_pagination_impl(AskListQuery {
                school_id: Some(school_id),
                answered: Some(false),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(unanswered.pagination.total, 1);
        assert!(unanswered.items[0].answers.is_empty());
    }
}
