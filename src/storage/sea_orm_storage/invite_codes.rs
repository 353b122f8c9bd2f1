//! 邀请码存储操作
//!
//! 邀请码一码一次：教师凭码入职时，查码、建雇佣、删码必须在同一事务内完成，
//! 删除行数为 0 说明码已被并发消费，事务放弃。

use super::SeaOrmStorage;
use crate::entity::invite_codes::{ActiveModel, Column, Entity as InviteCodes};
use crate::entity::school_teachers;
use crate::entity::schools::Entity as Schools;
use crate::errors::{AskSystemError, Result};
use crate::models::{invites::entities::InviteCode, schools::entities::School};
use crate::utils::random_code::generate_random_code;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// 邀请码长度，字母数字随机串
const INVITE_CODE_LENGTH: usize = 12;

impl SeaOrmStorage {
    /// 批量生成邀请码
    ///
    /// 学校仍有未使用的邀请码时拒绝生成，避免码无限堆积。
    pub async fn generate_invite_codes_impl(
        &self,
        school_id: i64,
        quantity: u32,
    ) -> Result<Vec<InviteCode>> {
        let school = self.get_school_by_id_impl(school_id).await?;
        if school.is_none() {
            return Err(AskSystemError::not_found("学校不存在"));
        }

        let codes = (0..quantity)
            .map(|_| generate_random_code(INVITE_CODE_LENGTH))
            .collect();

        self.store_invite_code_batch(school_id, codes).await
    }

    /// 存量检查与整批写入在同一事务内完成
    ///
    /// 任何一条写入失败都回滚整批，不会留下残缺批次；
    /// 并发的生成请求在存量检查上串行化，只有一方成行。
    async fn store_invite_code_batch(
        &self,
        school_id: i64,
        codes: Vec<String>,
    ) -> Result<Vec<InviteCode>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let outstanding = InviteCodes::find()
            .filter(Column::SchoolId.eq(school_id))
            .count(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询邀请码数量失败: {e}")))?;

        if outstanding > 0 {
            return Err(AskSystemError::quota_conflict(
                "仍有未使用的邀请码，不能重新生成",
            ));
        }

        let now = chrono::Utc::now().timestamp();
        let mut saved = Vec::with_capacity(codes.len());

        for code in codes {
            let model = ActiveModel {
                school_id: Set(school_id),
                code: Set(code),
                created_at: Set(now),
                ..Default::default()
            };

            let result = model
                .insert(&txn)
                .await
                .map_err(|e| AskSystemError::database_operation(format!("生成邀请码失败: {e}")))?;

            saved.push(result.into_invite_code());
        }

        txn.commit()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(saved)
    }

    /// 列出学校未使用的邀请码
    pub async fn list_invite_codes_impl(&self, school_id: i64) -> Result<Vec<InviteCode>> {
        let codes = InviteCodes::find()
            .filter(Column::SchoolId.eq(school_id))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询邀请码列表失败: {e}")))?;

        Ok(codes.into_iter().map(|m| m.into_invite_code()).collect())
    }

    /// 教师凭邀请码加入学校
    ///
    /// 教师已受雇时返回 Conflict 并保留邀请码；删除行数为 0 说明码已被
    /// 并发消费，按 NotFound 处理。
    pub async fn consume_invite_code_impl(&self, code: &str, teacher_id: i64) -> Result<School> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let code_row = InviteCodes::find()
            .filter(Column::Code.eq(code))
            .one(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询邀请码失败: {e}")))?
            .ok_or_else(|| AskSystemError::not_found("邀请码不存在或已被使用"))?;

        let school = Schools::find_by_id(code_row.school_id)
            .one(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询学校失败: {e}")))?
            .ok_or_else(|| AskSystemError::not_found("学校不存在"))?;

        // 停用的学校不接受新教师，邀请码原样保留
        if school.disabled {
            return Err(AskSystemError::forbidden("学校已停用"));
        }

        // 已受雇时在删码之前返回，邀请码原样保留
        let employed = school_teachers::Entity::find()
            .filter(
                Condition::all()
                    .add(school_teachers::Column::SchoolId.eq(code_row.school_id))
                    .add(school_teachers::Column::TeacherId.eq(teacher_id)),
            )
            .count(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询雇佣关系失败: {e}")))?;

        if employed > 0 {
            return Err(AskSystemError::conflict("已受雇于该学校"));
        }

        let deleted = InviteCodes::delete_by_id(code_row.id)
            .exec(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("删除邀请码失败: {e}")))?;

        if deleted.rows_affected == 0 {
            return Err(AskSystemError::not_found("邀请码不存在或已被使用"));
        }

        let now = chrono::Utc::now().timestamp();
        let employment = school_teachers::ActiveModel {
            school_id: Set(code_row.school_id),
            teacher_id: Set(teacher_id),
            joined_at: Set(now),
            ..Default::default()
        };

        employment.insert(&txn).await.map_err(|e| {
            // 唯一索引兜住并发重复入职，与顺序路径同样报 Conflict
            if super::is_unique_violation(&e) {
                AskSystemError::conflict("已受雇于该学校")
            } else {
                AskSystemError::database_operation(format!("创建雇佣关系失败: {e}"))
            }
        })?;

        txn.commit()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(school.into_school())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, seed_school, seed_teacher};
    use crate::errors::AskSystemError;

    #[tokio::test]
    async fn test_generate_codes_unique_and_regeneration_refused() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "第一中学", "13800000001").await;

        let codes = storage.generate_invite_codes_impl(school_id, 5).await.unwrap();
        assert_eq!(codes.len(), 5);
        for code in &codes {
            assert_eq!(code.code.len(), 12);
        }

        let mut unique: Vec<&str> = codes.iter().map(|c| c.code.as_str()).collect();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 5);

        // 仍有未使用的邀请码，重新生成被拒绝
        let err = storage
            .generate_invite_codes_impl(school_id, 3)
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::QuotaConflict(_)));
    }

    #[tokio::test]
    async fn test_generate_codes_school_not_found() {
        let storage = memory_storage().await;

        let err = storage.generate_invite_codes_impl(999, 1).await.unwrap_err();
        assert!(matches!(err, AskSystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_failed_batch_insert_leaves_no_codes() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "第五中学", "13800000005").await;

        // 批内两个相同的码撞 code 唯一索引，整批回滚
        let err = storage
            .store_invite_code_batch(
                school_id,
                vec!["AAAABBBBCCCC".to_string(), "AAAABBBBCCCC".to_string()],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::DatabaseOperation(_)));
        assert!(storage.list_invite_codes_impl(school_id).await.unwrap().is_empty());

        // 失败的批次不占名额，重新生成照常成功
        let codes = storage.generate_invite_codes_impl(school_id, 3).await.unwrap();
        assert_eq!(codes.len(), 3);
    }

    #[tokio::test]
    async fn test_concurrent_generate_single_batch() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "第六中学", "13800000006").await;

        let (ra, rb) = tokio::join!(
            storage.generate_invite_codes_impl(school_id, 3),
            storage.generate_invite_codes_impl(school_id, 5),
        );

        // 一方成行，另一方撞上存量检查
        let (winner, loser) = match (ra, rb) {
            (Ok(codes), Err(e)) | (Err(e), Ok(codes)) => (codes, e),
            _ => panic!("恰好一方应当生成成功"),
        };
        assert!(matches!(loser, AskSystemError::QuotaConflict(_)));

        let outstanding = storage.list_invite_codes_impl(school_id).await.unwrap();
        assert_eq!(outstanding.len(), winner.len());
    }

    #[tokio::test]
    async fn test_consume_code_is_single_use() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "第二中学", "13800000002").await;
        let teacher_a = seed_teacher(&storage, "13900000001").await;
        let teacher_b = seed_teacher(&storage, "13900000002").await;

        let codes = storage.generate_invite_codes_impl(school_id, 1).await.unwrap();
        let code = codes[0].code.clone();

        let school = storage.consume_invite_code_impl(&code, teacher_a).await.unwrap();
        assert_eq!(school.id, school_id);
        assert!(storage.is_employed_impl(teacher_a, school_id).await.unwrap());

        // 第二次消费同一个码，不论是谁都拿不到
        let err = storage
            .consume_invite_code_impl(&code, teacher_b)
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::NotFound(_)));
        assert!(!storage.is_employed_impl(teacher_b, school_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_consume_preserves_code_when_already_employed() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "第三中学", "13800000003").await;
        let teacher_id = seed_teacher(&storage, "13900000003").await;

        let codes = storage.generate_invite_codes_impl(school_id, 2).await.unwrap();
        storage
            .consume_invite_code_impl(&codes[0].code, teacher_id)
            .await
            .unwrap();

        // 已受雇的教师再用第二个码，事务放弃且码保留
        let err = storage
            .consume_invite_code_impl(&codes[1].code, teacher_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::Conflict(_)));

        let remaining = storage.list_invite_codes_impl(school_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].code, codes[1].code);
    }

    #[tokio::test]
    async fn test_concurrent_consume_single_winner() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "第四中学", "13800000004").await;
        let teacher_a = seed_teacher(&storage, "13900000004").await;
        let teacher_b = seed_teacher(&storage, "13900000005").await;

        let codes = storage.generate_invite_codes_impl(school_id, 1).await.unwrap();
        let code = codes[0].code.clone();

        let (ra, rb) = tokio::join!(
            storage.consume_invite_code_impl(&code, teacher_a),
            storage.consume_invite_code_impl(&code, teacher_b),
        );

        let successes = [ra.is_ok(), rb.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);
        assert!(storage.list_invite_codes_impl(school_id).await.unwrap().is_empty());
    }
}
