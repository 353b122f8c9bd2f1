//! 回答存储操作
//!
//! 写入或删除回答时在同一事务内重算提问的 be_answered，
//! 保证该列始终等于「提问存在至少一条回答」。

use super::SeaOrmStorage;
use super::topic_images::{assert_topic_images_exist, load_topic_images};
use crate::entity::answers::{ActiveModel, Column, Entity as Answers};
use crate::entity::asks;
use crate::entity::school_teachers;
use crate::errors::{AskSystemError, Result};
use crate::models::answers::{
    entities::{Answer, AnswerAuthor},
    requests::CreateAnswerRequest,
};
use crate::models::asks::responses::AnswerView;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 提交回答或学生追问
    pub async fn attach_answer_impl(
        &self,
        ask_id: i64,
        author: AnswerAuthor,
        req: CreateAnswerRequest,
    ) -> Result<Answer> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let ask = asks::Entity::find_by_id(ask_id)
            .one(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询提问失败: {e}")))?
            .ok_or_else(|| AskSystemError::not_found("提问不存在"))?;

        match author {
            AnswerAuthor::Teacher(teacher_id) => {
                let employed = school_teachers::Entity::find()
                    .filter(
                        Condition::all()
                            .add(school_teachers::Column::SchoolId.eq(ask.school_id))
                            .add(school_teachers::Column::TeacherId.eq(teacher_id)),
                    )
                    .count(&txn)
                    .await
                    .map_err(|e| {
                        AskSystemError::database_operation(format!("查询雇佣关系失败: {e}"))
                    })?;

                if employed == 0 {
                    return Err(AskSystemError::forbidden("未受雇于提问所在学校，不能回答"));
                }
            }
            AnswerAuthor::Student(student_id) => {
                if student_id != ask.student_id {
                    return Err(AskSystemError::forbidden("只有提问学生本人可以追问"));
                }

                // 追问必须等提问已经有回答
                if !ask.be_answered {
                    return Err(AskSystemError::not_answered("提问尚未被回答，不能追问"));
                }
            }
        }

        assert_topic_images_exist(&txn, &req.img_ids).await?;

        let (teacher_id, student_id) = author.into_columns();
        let model = ActiveModel {
            ask_id: Set(ask_id),
            teacher_id: Set(teacher_id),
            student_id: Set(student_id),
            answer_text: Set(req.answer_text),
            voice_url: Set(req.voice_url),
            voice_duration: Set(req.voice_duration),
            img_ids: Set(crate::utils::id_list::join_id_list(&req.img_ids)),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("创建回答失败: {e}")))?;

        recompute_be_answered(&txn, ask_id).await?;

        txn.commit()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_answer())
    }

    /// 删除回答，只允许作者本人
    pub async fn remove_answer_impl(
        &self,
        ask_id: i64,
        answer_id: i64,
        requester: AnswerAuthor,
    ) -> Result<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let answer = Answers::find_by_id(answer_id)
            .filter(Column::AskId.eq(ask_id))
            .one(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询回答失败: {e}")))?
            .ok_or_else(|| AskSystemError::not_found("回答不存在"))?;

        let owned = match requester {
            AnswerAuthor::Teacher(teacher_id) => answer.teacher_id == Some(teacher_id),
            AnswerAuthor::Student(student_id) => answer.student_id == Some(student_id),
        };

        if !owned {
            return Err(AskSystemError::forbidden("只能删除自己的回答"));
        }

        Answers::delete_by_id(answer_id)
            .exec(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("删除回答失败: {e}")))?;

        recompute_be_answered(&txn, ask_id).await?;

        txn.commit()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(())
    }

    /// 列出提问下的全部回答，按提交顺序排列
    pub async fn list_answers_for_ask_impl(&self, ask_id: i64) -> Result<Vec<AnswerView>> {
        let rows = Answers::find()
            .filter(Column::AskId.eq(ask_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询回答列表失败: {e}")))?;

        let answers: Vec<Answer> = rows.into_iter().map(|m| m.into_answer()).collect();

        let mut image_ids: Vec<i64> =
            answers.iter().flat_map(|a| a.img_ids.iter().copied()).collect();
        image_ids.sort_unstable();
        image_ids.dedup();

        let images = load_topic_images(&self.db, &image_ids).await?;

        Ok(answers
            .into_iter()
            .map(|answer| AnswerView {
                images: answer
                    .img_ids
                    .iter()
                    .filter_map(|id| images.get(id).cloned())
                    .collect(),
                answer,
            })
            .collect())
    }
}

/// 按当前回答数重算提问的 be_answered 列
pub(super) async fn recompute_be_answered<C: ConnectionTrait>(
    conn: &C,
    ask_id: i64,
) -> Result<()> {
    let count = Answers::find()
        .filter(Column::AskId.eq(ask_id))
        .count(conn)
        .await
        .map_err(|e| AskSystemError::database_operation(format!("统计回答数量失败: {e}")))?;

    asks::Entity::update_many()
        .col_expr(asks::Column::BeAnswered, Expr::value(count > 0))
        .filter(asks::Column::Id.eq(ask_id))
        .exec(conn)
        .await
        .map_err(|e| AskSystemError::database_operation(format!("更新回答状态失败: {e}")))?;

    Ok(())
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
    use crate::models::asks::requests::CreateAskRequest;
    use crate::models::images::entities::UploaderKind;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

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

    /// 建好学校、在职教师与在读学生，返回 (school_id, teacher_id, student_id)
    async fn seed_classroom(storage: &SeaOrmStorage, tag: u32) -> (i64, i64, i64) {
        let school_id = seed_school(
            storage,
            &format!("回答测试{tag}中"),
            &format!("1380000{tag:04}"),
        )
        .await;
        seed_course(storage, school_id, 0, 0).await;
        let teacher_id = seed_teacher(storage, &format!("1390000{tag:04}")).await;
        let student_id = seed_student(storage, &format!("1370000{tag:04}")).await;
        employ_teacher(storage, school_id, teacher_id).await;
        enroll_with_quota(storage, school_id, student_id, 10, 0, 0).await;
        (school_id, teacher_id, student_id)
    }

    #[tokio::test]
    async fn test_attach_answer_marks_ask_answered() {
        let storage = memory_storage().await;
        let (school_id, teacher_id, student_id) = seed_classroom(&storage, 1).await;

        let ask = storage
            .create_ask_impl(student_id, text_ask(school_id, "这题怎么解"))
            .await
            .unwrap();
        assert!(!ask.be_answered);

        let answer = storage
            .attach_answer_impl(ask.id, AnswerAuthor::Teacher(teacher_id), text_answer("先设未知数"))
            .await
            .unwrap();
        assert_eq!(answer.teacher_id, Some(teacher_id));
        assert_eq!(answer.student_id, None);

        let refreshed = storage.get_ask_by_id_impl(ask.id).await.unwrap().unwrap();
        assert!(refreshed.be_answered);
    }

    #[tokio::test]
    async fn test_attach_answer_requires_employment() {
        let storage = memory_storage().await;
        let (school_id, _teacher_id, student_id) = seed_classroom(&storage, 2).await;
        let outsider = seed_teacher(&storage, "13911110002").await;

        let ask = storage
            .create_ask_impl(student_id, text_ask(school_id, "求帮忙"))
            .await
            .unwrap();

        let err = storage
            .attach_answer_impl(ask.id, AnswerAuthor::Teacher(outsider), text_answer("我来"))
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::Forbidden(_)));

        let refreshed = storage.get_ask_by_id_impl(ask.id).await.unwrap().unwrap();
        assert!(!refreshed.be_answered);
    }

    #[tokio::test]
    async fn test_attach_answer_unknown_ask() {
        let storage = memory_storage().await;
        let (_school_id, teacher_id, _student_id) = seed_classroom(&storage, 3).await;

        let err = storage
            .attach_answer_impl(9999, AnswerAuthor::Teacher(teacher_id), text_answer("在吗"))
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_student_follow_up_rules() {
        let storage = memory_storage().await;
        let (school_id, teacher_id, student_id) = seed_classroom(&storage, 4).await;
        let other_student = seed_student(&storage, "13711110004").await;

        let ask = storage
            .create_ask_impl(student_id, text_ask(school_id, "第一步看不懂"))
            .await
            .unwrap();

        // 没有回答之前不能追问
        let err = storage
            .attach_answer_impl(ask.id, AnswerAuthor::Student(student_id), text_answer("在吗？"))
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::NotAnswered(_)));

        storage
            .attach_answer_impl(ask.id, AnswerAuthor::Teacher(teacher_id), text_answer("先移项"))
            .await
            .unwrap();

        // 其他学生不能在别人的提问下追问
        let err = storage
            .attach_answer_impl(ask.id, AnswerAuthor::Student(other_student), text_answer("同问"))
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::Forbidden(_)));

        let follow_up = storage
            .attach_answer_impl(
                ask.id,
                AnswerAuthor::Student(student_id),
                text_answer("移项之后呢？"),
            )
            .await
            .unwrap();
        assert_eq!(follow_up.student_id, Some(student_id));
        assert_eq!(follow_up.teacher_id, None);
    }

    #[tokio::test]
    async fn test_remove_answer_recomputes_flag() {
        let storage = memory_storage().await;
        let (school_id, teacher_id, student_id) = seed_classroom(&storage, 5).await;

        let ask = storage
            .create_ask_impl(student_id, text_ask(school_id, "只有一条回答"))
            .await
            .unwrap();
        let answer = storage
            .attach_answer_impl(ask.id, AnswerAuthor::Teacher(teacher_id), text_answer("看这里"))
            .await
            .unwrap();

        // 别人删不掉
        let err = storage
            .remove_answer_impl(ask.id, answer.id, AnswerAuthor::Student(student_id))
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::Forbidden(_)));

        storage
            .remove_answer_impl(ask.id, answer.id, AnswerAuthor::Teacher(teacher_id))
            .await
            .unwrap();

        // 最后一条回答删除后，提问回到未回答状态
        let refreshed = storage.get_ask_by_id_impl(ask.id).await.unwrap().unwrap();
        assert!(!refreshed.be_answered);

        let err = storage
            .remove_answer_impl(ask.id, answer.id, AnswerAuthor::Teacher(teacher_id))
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_keeps_flag_while_answers_remain() {
        let storage = memory_storage().await;
        let (school_id, teacher_id, student_id) = seed_classroom(&storage, 6).await;

        let ask = storage
            .create_ask_impl(student_id, text_ask(school_id, "多轮讨论"))
            .await
            .unwrap();
        let teacher_answer = storage
            .attach_answer_impl(ask.id, AnswerAuthor::Teacher(teacher_id), text_answer("第一步"))
            .await
            .unwrap();
        let follow_up = storage
            .attach_answer_impl(
                ask.id,
                AnswerAuthor::Student(student_id),
                text_answer("然后呢"),
            )
            .await
            .unwrap();

        // 删掉教师回答后追问仍在，提问保持已回答
        storage
            .remove_answer_impl(ask.id, teacher_answer.id, AnswerAuthor::Teacher(teacher_id))
            .await
            .unwrap();
        let refreshed = storage.get_ask_by_id_impl(ask.id).await.unwrap().unwrap();
        assert!(refreshed.be_answered);

        storage
            .remove_answer_impl(ask.id, follow_up.id, AnswerAuthor::Student(student_id))
            .await
            .unwrap();
        let refreshed = storage.get_ask_by_id_impl(ask.id).await.unwrap().unwrap();
        assert!(!refreshed.be_answered);
    }

    #[tokio::test]
    async fn test_list_answers_with_images() {
        let storage = memory_storage().await;
        let (school_id, teacher_id, student_id) = seed_classroom(&storage, 7).await;

        let ask = storage
            .create_ask_impl(student_id, text_ask(school_id, "带图讲解"))
            .await
            .unwrap();

        let image = storage
            .register_topic_image_impl(
                UploaderKind::Teacher,
                teacher_id,
                "https://cdn.example.com/a1.png",
            )
            .await
            .unwrap();

        let mut req = text_answer("见图");
        req.img_ids = vec![image.id];
        storage
            .attach_answer_impl(ask.id, AnswerAuthor::Teacher(teacher_id), req)
            .await
            .unwrap();
        storage
            .attach_answer_impl(
                ask.id,
                AnswerAuthor::Student(student_id),
                text_answer("收到"),
            )
            .await
            .unwrap();

        let views = storage.list_answers_for_ask_impl(ask.id).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].images.len(), 1);
        assert_eq!(views[0].images[0].img_url, "https://cdn.example.com/a1.png");
        assert!(views[1].images.is_empty());
    }
}
