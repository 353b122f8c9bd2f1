//! 雇佣与入学关系存储操作
//!
//! school_teachers / school_students 是一等公民的关联表，
//! 入学时从课程模板复制提问额度，此后只由额度引擎递减。

use super::SeaOrmStorage;
use crate::entity::courses::{Column as CourseColumn, Entity as Courses};
use crate::entity::school_students;
use crate::entity::school_teachers;
use crate::entity::schools::{Column as SchoolColumn, Entity as Schools};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::errors::{AskSystemError, Result};
use crate::models::{
    PaginationInfo,
    memberships::{
        entities::Enrollment,
        requests::{MembershipQueryParams, UpdateQuotaRequest},
        responses::{
            EmploymentListResponse, EnrollmentListResponse, StudentInSchool, TeacherInSchool,
        },
    },
    schools::{requests::SchoolListQuery, responses::SchoolListResponse},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 教师是否受雇于学校
    pub async fn is_employed_impl(&self, teacher_id: i64, school_id: i64) -> Result<bool> {
        let count = school_teachers::Entity::find()
            .filter(
                Condition::all()
                    .add(school_teachers::Column::TeacherId.eq(teacher_id))
                    .add(school_teachers::Column::SchoolId.eq(school_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询雇佣关系失败: {e}")))?;

        Ok(count > 0)
    }

    /// 教师是否为校管理员
    ///
    /// 手机号与学校登记的管理员手机号一致，且确实受雇于该校，缺一不可。
    pub async fn is_school_admin_impl(&self, teacher_id: i64, school_id: i64) -> Result<bool> {
        let Some(teacher) = self.get_teacher_by_id_impl(teacher_id).await? else {
            return Ok(false);
        };
        let Some(school) = self.get_school_by_id_impl(school_id).await? else {
            return Ok(false);
        };

        if teacher.telephone != school.admin_telephone {
            return Ok(false);
        }

        self.is_employed_impl(teacher_id, school_id).await
    }

    /// 解除雇佣关系
    pub async fn dismiss_employment_impl(&self, teacher_id: i64, school_id: i64) -> Result<()> {
        let result = school_teachers::Entity::delete_many()
            .filter(
                Condition::all()
                    .add(school_teachers::Column::TeacherId.eq(teacher_id))
                    .add(school_teachers::Column::SchoolId.eq(school_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("解除雇佣关系失败: {e}")))?;

        if result.rows_affected == 0 {
            return Err(AskSystemError::not_found("尚未受雇于该学校"));
        }

        Ok(())
    }

    /// 学生入学
    ///
    /// 课程不指定时使用该校最早创建的一条作为额度模板，
    /// 查重与写入在同一事务内完成。
    pub async fn enroll_student_impl(
        &self,
        student_id: i64,
        school_id: i64,
        course_id: Option<i64>,
    ) -> Result<Enrollment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let school = Schools::find_by_id(school_id)
            .one(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询学校失败: {e}")))?;
        if school.is_none() {
            return Err(AskSystemError::not_found("学校不存在"));
        }

        let existing = school_students::Entity::find()
            .filter(
                Condition::all()
                    .add(school_students::Column::StudentId.eq(student_id))
                    .add(school_students::Column::SchoolId.eq(school_id)),
            )
            .one(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询入学记录失败: {e}")))?;

        if existing.is_some() {
            return Err(AskSystemError::conflict("该学生已加入学校"));
        }

        let mut course_select = Courses::find().filter(CourseColumn::SchoolId.eq(school_id));
        course_select = match course_id {
            Some(id) => course_select.filter(CourseColumn::Id.eq(id)),
            None => course_select.order_by_asc(CourseColumn::Id),
        };

        let course = course_select
            .one(&txn)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询课程失败: {e}")))?
            .ok_or_else(|| AskSystemError::not_found("该学校尚未配置课程"))?;

        let now = chrono::Utc::now().timestamp();
        let model = school_students::ActiveModel {
            school_id: Set(school_id),
            student_id: Set(student_id),
            normal_times: Set(course.normal_times),
            vip_times: Set(course.vip_times),
            vip_expire: Set(0),
            joined_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&txn).await.map_err(|e| {
            // 唯一索引兜住并发重复入学，与顺序路径同样报 Conflict
            if super::is_unique_violation(&e) {
                AskSystemError::conflict("该学生已加入学校")
            } else {
                AskSystemError::database_operation(format!("创建入学记录失败: {e}"))
            }
        })?;

        txn.commit()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 学生是否已入学
    pub async fn is_enrolled_impl(&self, student_id: i64, school_id: i64) -> Result<bool> {
        let count = school_students::Entity::find()
            .filter(
                Condition::all()
                    .add(school_students::Column::StudentId.eq(student_id))
                    .add(school_students::Column::SchoolId.eq(school_id)),
            )
            .count(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询入学记录失败: {e}")))?;

        Ok(count > 0)
    }

    /// 获取学生的入学记录
    pub async fn get_enrollment_impl(
        &self,
        student_id: i64,
        school_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = school_students::Entity::find()
            .filter(
                Condition::all()
                    .add(school_students::Column::StudentId.eq(student_id))
                    .add(school_students::Column::SchoolId.eq(school_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询入学记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 调整入学记录的提问额度（充值/续费）
    pub async fn update_enrollment_quota_impl(
        &self,
        student_id: i64,
        school_id: i64,
        update: UpdateQuotaRequest,
    ) -> Result<Option<Enrollment>> {
        let existing = school_students::Entity::find()
            .filter(
                Condition::all()
                    .add(school_students::Column::StudentId.eq(student_id))
                    .add(school_students::Column::SchoolId.eq(school_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询入学记录失败: {e}")))?;

        let Some(enrollment) = existing else {
            return Ok(None);
        };

        let mut model = school_students::ActiveModel {
            id: Set(enrollment.id),
            ..Default::default()
        };

        if let Some(normal_times) = update.normal_times {
            model.normal_times = Set(normal_times);
        }

        if let Some(vip_times) = update.vip_times {
            model.vip_times = Set(vip_times);
        }

        if let Some(vip_expire) = update.vip_expire {
            model.vip_expire = Set(vip_expire);
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("更新提问额度失败: {e}")))?;

        Ok(Some(result.into_enrollment()))
    }

    /// 分页列出学校的在职教师
    pub async fn list_school_teachers_with_pagination_impl(
        &self,
        school_id: i64,
        query: MembershipQueryParams,
    ) -> Result<EmploymentListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        let school = self
            .get_school_by_id_impl(school_id)
            .await?
            .ok_or_else(|| AskSystemError::not_found("学校不存在"))?;

        // 查询该校全部雇佣记录，教师ID -> 雇佣记录
        let employment_rows = school_teachers::Entity::find()
            .filter(school_teachers::Column::SchoolId.eq(school_id))
            .all(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询雇佣关系失败: {e}")))?;

        let teacher_ids: Vec<i64> = employment_rows.iter().map(|m| m.teacher_id).collect();
        let employments: HashMap<i64, _> = employment_rows
            .into_iter()
            .map(|m| (m.teacher_id, m.into_employment()))
            .collect();

        if teacher_ids.is_empty() {
            return Ok(EmploymentListResponse {
                items: vec![],
                pagination: PaginationInfo {
                    page: page as i64,
                    page_size: size as i64,
                    total: 0,
                    total_pages: 0,
                },
            });
        }

        let mut select = Teachers::find().filter(TeacherColumn::Id.is_in(teacher_ids));

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(TeacherColumn::Nickname.contains(&escaped));
        }

        select = select.order_by_desc(TeacherColumn::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询教师总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询教师页数失败: {e}")))?;

        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询教师列表失败: {e}")))?;

        let items = teachers
            .into_iter()
            .filter_map(|m| {
                let teacher = m.into_teacher();
                employments.get(&teacher.id).cloned().map(|employment| {
                    let is_school_admin = teacher.telephone == school.admin_telephone;
                    TeacherInSchool {
                        teacher,
                        employment,
                        is_school_admin,
                    }
                })
            })
            .collect();

        Ok(EmploymentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 分页列出学校的在读学生
    pub async fn list_school_students_with_pagination_impl(
        &self,
        school_id: i64,
        query: MembershipQueryParams,
    ) -> Result<EnrollmentListResponse> {
        let page = query.pagination.page.max(1) as u64;
        let size = query.pagination.size.clamp(1, 100) as u64;

        // 查询该校全部入学记录，学生ID -> 入学记录
        let enrollment_rows = school_students::Entity::find()
            .filter(school_students::Column::SchoolId.eq(school_id))
            .all(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询入学记录失败: {e}")))?;

        let student_ids: Vec<i64> = enrollment_rows.iter().map(|m| m.student_id).collect();
        let enrollments: HashMap<i64, _> = enrollment_rows
            .into_iter()
            .map(|m| (m.student_id, m.into_enrollment()))
            .collect();

        if student_ids.is_empty() {
            return Ok(EnrollmentListResponse {
                items: vec![],
                pagination: PaginationInfo {
                    page: page as i64,
                    page_size: size as i64,
                    total: 0,
                    total_pages: 0,
                },
            });
        }

        let mut select = Students::find().filter(StudentColumn::Id.is_in(student_ids));

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(StudentColumn::Nickname.contains(&escaped));
        }

        select = select.order_by_desc(StudentColumn::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询学生页数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询学生列表失败: {e}")))?;

        let items = students
            .into_iter()
            .filter_map(|m| {
                let student = m.into_student();
                enrollments
                    .get(&student.id)
                    .cloned()
                    .map(|enrollment| StudentInSchool {
                        student,
                        enrollment,
                    })
            })
            .collect();

        Ok(EnrollmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 分页列出教师任职的学校
    pub async fn list_teacher_schools_with_pagination_impl(
        &self,
        teacher_id: i64,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse> {
        let employment_rows = school_teachers::Entity::find()
            .filter(school_teachers::Column::TeacherId.eq(teacher_id))
            .all(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询雇佣关系失败: {e}")))?;

        let school_ids: Vec<i64> = employment_rows.iter().map(|m| m.school_id).collect();
        self.list_schools_by_ids_with_pagination(school_ids, query)
            .await
    }

    /// 分页列出学生就读的学校
    pub async fn list_student_schools_with_pagination_impl(
        &self,
        student_id: i64,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse> {
        let enrollment_rows = school_students::Entity::find()
            .filter(school_students::Column::StudentId.eq(student_id))
            .all(&self.db)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询入学记录失败: {e}")))?;

        let school_ids: Vec<i64> = enrollment_rows.iter().map(|m| m.school_id).collect();
        self.list_schools_by_ids_with_pagination(school_ids, query)
            .await
    }

    /// 按学校ID集合分页查询学校
    async fn list_schools_by_ids_with_pagination(
        &self,
        school_ids: Vec<i64>,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        if school_ids.is_empty() {
            return Ok(SchoolListResponse {
                items: vec![],
                pagination: PaginationInfo {
                    page: page as i64,
                    page_size: size as i64,
                    total: 0,
                    total_pages: 0,
                },
            });
        }

        let mut select = Schools::find().filter(SchoolColumn::Id.is_in(school_ids));

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(SchoolColumn::Name.contains(&escaped));
        }

        select = select.order_by_desc(SchoolColumn::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询学校总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询学校页数失败: {e}")))?;

        let schools = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("查询学校列表失败: {e}")))?;

        Ok(SchoolListResponse {
            items: schools.into_iter().map(|m| m.into_school()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{
        memory_storage, seed_course, seed_school, seed_student, seed_teacher,
    };
    use super::SeaOrmStorage;
    use crate::entity::{courses, school_students};
    use crate::errors::AskSystemError;
    use crate::models::memberships::requests::UpdateQuotaRequest;
    use sea_orm::{ActiveModelTrait, Set};

    /// 直接插入一条课程，绕过 upsert 的一校一课约束，模拟历史多课数据
    async fn insert_course_row(
        storage: &SeaOrmStorage,
        school_id: i64,
        normal_times: i32,
        vip_times: i32,
    ) -> i64 {
        let now = chrono::Utc::now().timestamp();
        let model = courses::ActiveModel {
            school_id: Set(school_id),
            name: Set("附加课程".to_string()),
            intro: Set(None),
            normal_times: Set(normal_times),
            vip_times: Set(vip_times),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        model.insert(&storage.db).await.unwrap().id
    }

    #[tokio::test]
    async fn test_enroll_copies_canonical_course_quota() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "铁一中", "13800001001").await;
        let student_id = seed_student(&storage, "13700001001").await;
        seed_course(&storage, school_id, 5, 2).await;
        // 后插入的课程不应被选为额度模板
        insert_course_row(&storage, school_id, 99, 99).await;

        let enrollment = storage
            .enroll_student_impl(student_id, school_id, None)
            .await
            .unwrap();
        assert_eq!(enrollment.normal_times, 5);
        assert_eq!(enrollment.vip_times, 2);
        assert_eq!(enrollment.vip_expire, 0);

        // 重复入学
        let err = storage
            .enroll_student_impl(student_id, school_id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_enroll_with_explicit_course() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "铁二中", "13800001002").await;
        let student_id = seed_student(&storage, "13700001002").await;
        seed_course(&storage, school_id, 5, -1).await;
        let extra_course = insert_course_row(&storage, school_id, 20, 0).await;

        let enrollment = storage
            .enroll_student_impl(student_id, school_id, Some(extra_course))
            .await
            .unwrap();
        assert_eq!(enrollment.normal_times, 20);
        assert_eq!(enrollment.vip_times, 0);
    }

    #[tokio::test]
    async fn test_enroll_without_course_template() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "铁三中", "13800001003").await;
        let student_id = seed_student(&storage, "13700001003").await;

        let err = storage
            .enroll_student_impl(student_id, school_id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::NotFound(_)));
        assert!(!storage.is_enrolled_impl(student_id, school_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_enroll_single_enrollment() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "铁七中", "13800001007").await;
        let student_id = seed_student(&storage, "13700001007").await;
        seed_course(&storage, school_id, 5, 2).await;

        let (ra, rb) = tokio::join!(
            storage.enroll_student_impl(student_id, school_id, None),
            storage.enroll_student_impl(student_id, school_id, None),
        );

        // 并发重复入学与顺序重复一样报 Conflict
        let err = match (ra, rb) {
            (Ok(_), Err(e)) | (Err(e), Ok(_)) => e,
            _ => panic!("恰好一方应当入学成功"),
        };
        assert!(matches!(err, AskSystemError::Conflict(_)));
        assert!(storage.is_enrolled_impl(student_id, school_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_enrollment_index_reports_unique_violation() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "铁八中", "13800001008").await;
        let student_id = seed_student(&storage, "13700001008").await;
        seed_course(&storage, school_id, 5, 2).await;
        storage
            .enroll_student_impl(student_id, school_id, None)
            .await
            .unwrap();

        // 绕过查重直接撞唯一索引，错误应被识别为重复写入
        let now = chrono::Utc::now().timestamp();
        let duplicate = school_students::ActiveModel {
            school_id: Set(school_id),
            student_id: Set(student_id),
            normal_times: Set(5),
            vip_times: Set(2),
            vip_expire: Set(0),
            joined_at: Set(now),
            ..Default::default()
        };
        let err = duplicate.insert(&storage.db).await.unwrap_err();
        assert!(super::super::is_unique_violation(&err));
    }

    #[tokio::test]
    async fn test_dismiss_employment_round_trip() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "铁四中", "13800001004").await;
        let teacher_id = seed_teacher(&storage, "13900001004").await;

        let codes = storage.generate_invite_codes_impl(school_id, 1).await.unwrap();
        storage
            .consume_invite_code_impl(&codes[0].code, teacher_id)
            .await
            .unwrap();
        assert!(storage.is_employed_impl(teacher_id, school_id).await.unwrap());

        storage
            .dismiss_employment_impl(teacher_id, school_id)
            .await
            .unwrap();
        assert!(!storage.is_employed_impl(teacher_id, school_id).await.unwrap());

        // 再次解雇，雇佣关系已不存在
        let err = storage
            .dismiss_employment_impl(teacher_id, school_id)
            .await
            .unwrap_err();
        assert!(matches!(err, AskSystemError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_is_school_admin_requires_telephone_and_employment() {
        let storage = memory_storage().await;
        let admin_phone = "13800001005";
        let school_id = seed_school(&storage, "铁五中", admin_phone).await;
        let admin_teacher = seed_teacher(&storage, admin_phone).await;
        let other_teacher = seed_teacher(&storage, "13900001005").await;

        // 手机号匹配但尚未受雇
        assert!(!storage.is_school_admin_impl(admin_teacher, school_id).await.unwrap());

        let codes = storage.generate_invite_codes_impl(school_id, 2).await.unwrap();
        storage
            .consume_invite_code_impl(&codes[0].code, admin_teacher)
            .await
            .unwrap();
        storage
            .consume_invite_code_impl(&codes[1].code, other_teacher)
            .await
            .unwrap();

        assert!(storage.is_school_admin_impl(admin_teacher, school_id).await.unwrap());
        // 受雇但手机号不匹配
        assert!(!storage.is_school_admin_impl(other_teacher, school_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_update_enrollment_quota() {
        let storage = memory_storage().await;
        let school_id = seed_school(&storage, "铁六中", "13800001006").await;
        let student_id = seed_student(&storage, "13700001006").await;
        seed_course(&storage, school_id, 3, 0).await;

        storage
            .enroll_student_impl(student_id, school_id, None)
            .await
            .unwrap();

        let future = chrono::Utc::now().timestamp() + 86400;
        let updated = storage
            .update_enrollment_quota_impl(
                student_id,
                school_id,
                UpdateQuotaRequest {
                    normal_times: None,
                    vip_times: Some(10),
                    vip_expire: Some(future),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.normal_times, 3);
        assert_eq!(updated.vip_times, 10);
        assert_eq!(updated.vip_expire, future);

        // 不存在的入学记录
        let missing = storage
            .update_enrollment_quota_impl(
                student_id,
                school_id + 100,
                UpdateQuotaRequest {
                    normal_times: Some(1),
                    vip_times: None,
                    vip_expire: None,
                },
            )
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_membership_school_lists() {
        let storage = memory_storage().await;
        let school_a = seed_school(&storage, "列表一中", "13800001007").await;
        let school_b = seed_school(&storage, "列表二中", "13800001008").await;
        let teacher_id = seed_teacher(&storage, "13900001007").await;
        let student_id = seed_student(&storage, "13700001007").await;
        seed_course(&storage, school_a, 5, -1).await;

        let codes = storage.generate_invite_codes_impl(school_a, 1).await.unwrap();
        storage
            .consume_invite_code_impl(&codes[0].code, teacher_id)
            .await
            .unwrap();
        let codes = storage.generate_invite_codes_impl(school_b, 1).await.unwrap();
        storage
            .consume_invite_code_impl(&codes[0].code, teacher_id)
            .await
            .unwrap();
        storage
            .enroll_student_impl(student_id, school_a, None)
            .await
            .unwrap();

        let teacher_schools = storage
            .list_teacher_schools_with_pagination_impl(
                teacher_id,
                crate::models::schools::requests::SchoolListQuery {
                    page: None,
                    size: None,
                    search: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(teacher_schools.pagination.total, 2);

        let student_schools = storage
            .list_student_schools_with_pagination_impl(
                student_id,
                crate::models::schools::requests::SchoolListQuery {
                    page: None,
                    size: None,
                    search: Some("列表一".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(student_schools.pagination.total, 1);
        assert_eq!(student_schools.items[0].id, school_a);
    }
}
