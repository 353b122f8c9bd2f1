//! 提问额度引擎
//!
//! can_ask 是只读判断；实际消耗用条件更新完成，更新行数为 0 表示该分支
//! 已无额度，依次落到下一分支。并发下额度永远不会被扣成负数。
//!
//! 判定顺序与消耗顺序一致：会员有效期内先扣有限的 vip_times，-1 表示
//! 不限次、不消耗计数；会员过期或次数用尽后落到 normal_times。
//! 过期会员的 vip_times 不会被扣减。

use super::SeaOrmStorage;
use crate::entity::school_students::{Column, Entity as SchoolStudents};
use crate::errors::{AskSystemError, Result};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
};

impl SeaOrmStorage {
    /// 学生当前能否提问，入学记录不存在时一律为否
    pub async fn can_ask_impl(&self, student_id: i64, school_id: i64) -> Result<bool> {
        let enrollment = self.get_enrollment_impl(student_id, school_id).await?;
        let now = chrono::Utc::now().timestamp();

        Ok(enrollment.map(|e| e.has_quota(now)).unwrap_or(false))
    }
}

/// 在调用方的事务内消耗一次提问额度
///
/// 额度判断与扣减合并成条件更新，彻底关闭先查后扣的竞态窗口。
pub(super) async fn consume_quota_within<C: ConnectionTrait>(
    conn: &C,
    enrollment_id: i64,
    now: i64,
) -> Result<()> {
    // 1. 会员有效期内的有限次数，条件递减
    let vip = SchoolStudents::update_many()
        .col_expr(Column::VipTimes, Expr::col(Column::VipTimes).sub(1))
        .filter(
            Condition::all()
                .add(Column::Id.eq(enrollment_id))
                .add(Column::VipExpire.gt(now))
                .add(Column::VipTimes.gt(0)),
        )
        .exec(conn)
        .await
        .map_err(|e| AskSystemError::database_operation(format!("扣减会员次数失败: {e}")))?;

    if vip.rows_affected > 0 {
        return Ok(());
    }

    // 2. 会员期内不限次数，不消耗任何计数
    let unlimited = SchoolStudents::find()
        .filter(
            Condition::all()
                .add(Column::Id.eq(enrollment_id))
                .add(Column::VipExpire.gt(now))
                .add(Column::VipTimes.eq(-1)),
        )
        .count(conn)
        .await
        .map_err(|e| AskSystemError::database_operation(format!("查询会员状态失败: {e}")))?;

    if unlimited > 0 {
        return Ok(());
    }

    // 3. 普通次数，条件递减
    let normal = SchoolStudents::update_many()
        .col_expr(Column::NormalTimes, Expr::col(Column::NormalTimes).sub(1))
        .filter(
            Condition::all()
                .add(Column::Id.eq(enrollment_id))
                .add(Column::NormalTimes.gt(0)),
        )
        .exec(conn)
        .await
        .map_err(|e| AskSystemError::database_operation(format!("扣减普通次数失败: {e}")))?;

    if normal.rows_affected > 0 {
        return Ok(());
    }

    Err(AskSystemError::quota_exceeded("提问次数已用完"))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{
        enroll_with_quota, memory_storage, seed_course, seed_school, seed_student,
    };
    use super::SeaOrmStorage;
    use super::consume_quota_within;
    use crate::errors::AskSystemError;

    const DAY: i64 = 86400;

    #[tokio::test]
    async fn test_can_ask_truth_table() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "真值表中学", "13800002001").await;
        seed_course(&storage, school_id, 0, 0).await;
        let now = chrono::Utc::now().timestamp();

        // (normal, vip, expire, 预期)
        let rows = [
            (0, -1, now + DAY, true),  // 不限次会员
            (0, -1, now - DAY, false), // 会员过期且无普通次数
            (0, 0, now + DAY, false),  // 会员在期但次数用尽
            (0, 1, now + DAY, true),   // 会员在期且有次数
            (1, 0, now - DAY, true),   // 会员过期但普通次数尚存
        ];

        for (i, (normal, vip, expire, expected)) in rows.into_iter().enumerate() {
            let student_id = seed_student(&storage, &format!("1370000210{i}")).await;
            enroll_with_quota(&storage, school_id, student_id, normal, vip, expire).await;

            let got = storage.can_ask_impl(student_id, school_id).await.unwrap();
            assert_eq!(got, expected, "行 {i}: normal={normal} vip={vip}");
        }

        // 未入学的学生一律不能提问
        let outsider = seed_student(&storage, "13700002199").await;
        assert!(!storage.can_ask_impl(outsider, school_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_consume_prefers_valid_vip() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "消耗一中", "13800002002").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700002201").await;
        let now = chrono::Utc::now().timestamp();
        enroll_with_quota(&storage, school_id, student_id, 5, 2, now + DAY).await;

        consume_quota_within(&storage.db, enrollment_id(&storage, student_id, school_id).await, now)
            .await
            .unwrap();

        let after = storage
            .get_enrollment_impl(student_id, school_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.vip_times, 1);
        assert_eq!(after.normal_times, 5);
    }

    #[tokio::test]
    async fn test_consume_unlimited_vip_consumes_nothing() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "消耗二中", "13800002003").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700002202").await;
        let now = chrono::Utc::now().timestamp();
        enroll_with_quota(&storage, school_id, student_id, 3, -1, now + DAY).await;
        let id = enrollment_id(&storage, student_id, school_id).await;

        consume_quota_within(&storage.db, id, now).await.unwrap();
        consume_quota_within(&storage.db, id, now).await.unwrap();

        let after = storage
            .get_enrollment_impl(student_id, school_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.vip_times, -1);
        assert_eq!(after.normal_times, 3);
    }

    #[tokio::test]
    async fn test_consume_skips_expired_vip() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "消耗三中", "13800002004").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700002203").await;
        let now = chrono::Utc::now().timestamp();
        // 会员已过期但 vip_times 还有剩余，扣的必须是普通次数
        enroll_with_quota(&storage, school_id, student_id, 2, 5, now - DAY).await;

        consume_quota_within(&storage.db, enrollment_id(&storage, student_id, school_id).await, now)
            .await
            .unwrap();

        let after = storage
            .get_enrollment_impl(student_id, school_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.vip_times, 5);
        assert_eq!(after.normal_times, 1);
    }

    #[tokio::test]
    async fn test_vip_exhausted_falls_back_to_normal() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "消耗四中", "13800002005").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700002204").await;
        let now = chrono::Utc::now().timestamp();
        enroll_with_quota(&storage, school_id, student_id, 2, 0, now + DAY).await;

        consume_quota_within(&storage.db, enrollment_id(&storage, student_id, school_id).await, now)
            .await
            .unwrap();

        let after = storage
            .get_enrollment_impl(student_id, school_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.vip_times, 0);
        assert_eq!(after.normal_times, 1);
    }

    #[tokio::test]
    async fn test_consume_exhausted_quota_never_negative() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "消耗五中", "13800002006").await;
        seed_course(&storage, school_id, 0, 0).await;
        let student_id = seed_student(&storage, "13700002205").await;
        let now = chrono::Utc::now().timestamp();
        enroll_with_quota(&storage, school_id, student_id, 0, 0, now - DAY).await;
        let id = enrollment_id(&storage, student_id, school_id).await;

        let err = consume_quota_within(&storage.db, id, now).await.unwrap_err();
        assert!(matches!(err, AskSystemError::QuotaExceeded(_)));

        let after = storage
            .get_enrollment_impl(student_id, school_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after.vip_times, 0);
        assert_eq!(after.normal_times, 0);
    }

    async fn enrollment_id(storage: &SeaOrmStorage, student_id: i64, school_id: i64) -> i64 {
        storage
            .get_enrollment_impl(student_id, school_id)
            .await
            .unwrap()
            .unwrap()
            .id
    }
}
