//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod admins;
mod answers;
mod asks;
mod courses;
mod invite_codes;
mod memberships;
mod quota;
mod schools;
mod students;
mod teachers;
mod topic_images;

use crate::config::AppConfig;
use crate::errors::{AskSystemError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

/// 写入撞上唯一索引时返回 true
///
/// 并发重复写入由唯一索引兜底，调用方据此把数据库错误
/// 报成与顺序路径一致的 Conflict，而不是笼统的存储错误。
pub(super) fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    matches!(
        e.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| AskSystemError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AskSystemError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| AskSystemError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| AskSystemError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AskSystemError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    admins::entities::Admin,
    answers::{
        entities::{Answer, AnswerAuthor},
        requests::CreateAnswerRequest,
    },
    asks::{
        entities::Ask,
        requests::{AskListQuery, CreateAskRequest},
        responses::{AnswerView, AskListResponse, AskView},
    },
    courses::{entities::Course, requests::CreateCourseRequest},
    images::entities::{TopicImage, UploaderKind},
    invites::entities::InviteCode,
    memberships::{
        entities::Enrollment,
        requests::{MembershipQueryParams, UpdateQuotaRequest},
        responses::{EmploymentListResponse, EnrollmentListResponse},
    },
    schools::{
        entities::School,
        requests::{CreateSchoolRequest, SchoolListQuery, UpdateSchoolRequest},
        responses::SchoolListResponse,
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, UpdateStudentRequest},
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, UpdateTeacherRequest},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 平台管理员模块
    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin> {
        self.create_admin_impl(username, password_hash).await
    }

    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>> {
        self.get_admin_by_id_impl(id).await
    }

    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>> {
        self.get_admin_by_username_impl(username).await
    }

    async fn count_admins(&self) -> Result<u64> {
        self.count_admins_impl().await
    }

    // 教师账号模块
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_telephone(&self, telephone: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_telephone_impl(telephone).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    // 学生账号模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_telephone(&self, telephone: &str) -> Result<Option<Student>> {
        self.get_student_by_telephone_impl(telephone).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    // 学校模块
    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School> {
        self.create_school_impl(school).await
    }

    async fn get_school_by_id(&self, school_id: i64) -> Result<Option<School>> {
        self.get_school_by_id_impl(school_id).await
    }

    async fn get_school_by_name(&self, name: &str) -> Result<Option<School>> {
        self.get_school_by_name_impl(name).await
    }

    async fn list_schools_with_pagination(
        &self,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse> {
        self.list_schools_with_pagination_impl(query).await
    }

    async fn update_school(
        &self,
        school_id: i64,
        update: UpdateSchoolRequest,
    ) -> Result<Option<School>> {
        self.update_school_impl(school_id, update).await
    }

    // 课程模板模块
    async fn upsert_course(&self, school_id: i64, course: CreateCourseRequest) -> Result<Course> {
        self.upsert_course_impl(school_id, course).await
    }

    async fn get_canonical_course(&self, school_id: i64) -> Result<Option<Course>> {
        self.get_canonical_course_impl(school_id).await
    }

    // 邀请码模块
    async fn generate_invite_codes(
        &self,
        school_id: i64,
        quantity: u32,
    ) -> Result<Vec<InviteCode>> {
        self.generate_invite_codes_impl(school_id, quantity).await
    }

    async fn list_invite_codes(&self, school_id: i64) -> Result<Vec<InviteCode>> {
        self.list_invite_codes_impl(school_id).await
    }

    async fn consume_invite_code(&self, code: &str, teacher_id: i64) -> Result<School> {
        self.consume_invite_code_impl(code, teacher_id).await
    }

    // 雇佣与入学模块
    async fn is_employed(&self, teacher_id: i64, school_id: i64) -> Result<bool> {
        self.is_employed_impl(teacher_id, school_id).await
    }

    async fn is_school_admin(&self, teacher_id: i64, school_id: i64) -> Result<bool> {
        self.is_school_admin_impl(teacher_id, school_id).await
    }

    async fn dismiss_employment(&self, teacher_id: i64, school_id: i64) -> Result<()> {
        self.dismiss_employment_impl(teacher_id, school_id).await
    }

    async fn enroll_student(
        &self,
        student_id: i64,
        school_id: i64,
        course_id: Option<i64>,
    ) -> Result<Enrollment> {
        self.enroll_student_impl(student_id, school_id, course_id)
            .await
    }

    async fn is_enrolled(&self, student_id: i64, school_id: i64) -> Result<bool> {
        self.is_enrolled_impl(student_id, school_id).await
    }

    async fn get_enrollment(&self, student_id: i64, school_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(student_id, school_id).await
    }

    async fn update_enrollment_quota(
        &self,
        student_id: i64,
        school_id: i64,
        update: UpdateQuotaRequest,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_quota_impl(student_id, school_id, update)
            .await
    }

    async fn list_school_teachers_with_pagination(
        &self,
        school_id: i64,
        query: MembershipQueryParams,
    ) -> Result<EmploymentListResponse> {
        self.list_school_teachers_with_pagination_impl(school_id, query)
            .await
    }

    async fn list_school_students_with_pagination(
        &self,
        school_id: i64,
        query: MembershipQueryParams,
    ) -> Result<EnrollmentListResponse> {
        self.list_school_students_with_pagination_impl(school_id, query)
            .await
    }

    async fn list_teacher_schools_with_pagination(
        &self,
        teacher_id: i64,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse> {
        self.list_teacher_schools_with_pagination_impl(teacher_id, query)
            .await
    }

    async fn list_student_schools_with_pagination(
        &self,
        student_id: i64,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse> {
        self.list_student_schools_with_pagination_impl(student_id, query)
            .await
    }

    // 提问额度模块
    async fn can_ask(&self, student_id: i64, school_id: i64) -> Result<bool> {
        self.can_ask_impl(student_id, school_id).await
    }

    // 提问模块
    async fn create_ask(&self, student_id: i64, ask: CreateAskRequest) -> Result<Ask> {
        self.create_ask_impl(student_id, ask).await
    }

    async fn get_ask_by_id(&self, ask_id: i64) -> Result<Option<Ask>> {
        self.get_ask_by_id_impl(ask_id).await
    }

    async fn get_ask_detail(&self, ask_id: i64) -> Result<Option<AskView>> {
        self.get_ask_detail_impl(ask_id).await
    }

    async fn list_asks_with_pagination(&self, query: AskListQuery) -> Result<AskListResponse> {
        self.list_asks_with_pagination_impl(query).await
    }

    async fn delete_ask(&self, ask_id: i64, student_id: i64) -> Result<()> {
        self.delete_ask_impl(ask_id, student_id).await
    }

    async fn rate_answer(&self, ask_id: i64, student_id: i64, grade: i32) -> Result<Ask> {
        self.rate_answer_impl(ask_id, student_id, grade).await
    }

    async fn count_student_asks(&self, student_id: i64, school_id: i64) -> Result<u64> {
        self.count_student_asks_impl(student_id, school_id).await
    }

    // 回答模块
    async fn attach_answer(
        &self,
        ask_id: i64,
        author: AnswerAuthor,
        answer: CreateAnswerRequest,
    ) -> Result<Answer> {
        self.attach_answer_impl(ask_id, author, answer).await
    }

    async fn remove_answer(
        &self,
        ask_id: i64,
        answer_id: i64,
        requester: AnswerAuthor,
    ) -> Result<()> {
        self.remove_answer_impl(ask_id, answer_id, requester).await
    }

    async fn list_answers_for_ask(&self, ask_id: i64) -> Result<Vec<AnswerView>> {
        self.list_answers_for_ask_impl(ask_id).await
    }

    // 题目图片模块
    async fn register_topic_image(
        &self,
        uploader_kind: UploaderKind,
        uploader_id: i64,
        img_url: &str,
    ) -> Result<TopicImage> {
        self.register_topic_image_impl(uploader_kind, uploader_id, img_url)
            .await
    }

    async fn get_topic_image_by_id(&self, image_id: i64) -> Result<Option<TopicImage>> {
        self.get_topic_image_by_id_impl(image_id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! 存储层测试公用的内存库与造数工具

    use super::SeaOrmStorage;
    use crate::models::courses::requests::CreateCourseRequest;
    use crate::models::schools::requests::CreateSchoolRequest;
    use crate::models::students::requests::CreateStudentRequest;
    use crate::models::teachers::requests::CreateTeacherRequest;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    /// 单连接内存库，保证所有查询落在同一个 SQLite 实例上
    pub(crate) async fn memory_storage() -> SeaOrmStorage {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1).min_connections(1);

        let db = Database::connect(opt).await.unwrap();
        Migrator::up(&db, None).await.unwrap();

        SeaOrmStorage { db }
    }

    pub(crate) async fn seed_school(storage: &SeaOrmStorage, name: &str, admin_telephone: &str) -> i64 {
        let school = storage
            .create_school_impl(CreateSchoolRequest {
                name: name.to_string(),
                intro: None,
                admin_telephone: admin_telephone.to_string(),
            })
            .await
            .unwrap();
        school.id
    }

    pub(crate) async fn seed_teacher(storage: &SeaOrmStorage, telephone: &str) -> i64 {
        let teacher = storage
            .create_teacher_impl(CreateTeacherRequest {
                nickname: format!("教师{telephone}"),
                telephone: telephone.to_string(),
                password: "hashed-password".to_string(),
                email: None,
            })
            .await
            .unwrap();
        teacher.id
    }

    pub(crate) async fn seed_student(storage: &SeaOrmStorage, telephone: &str) -> i64 {
        let student = storage
            .create_student_impl(CreateStudentRequest {
                nickname: format!("学生{telephone}"),
                telephone: Some(telephone.to_string()),
                password: Some("hashed-password".to_string()),
                wx_openid: None,
                from_where: None,
            })
            .await
            .unwrap();
        student.id
    }

    pub(crate) async fn seed_course(
        storage: &SeaOrmStorage,
        school_id: i64,
        normal_times: i32,
        vip_times: i32,
    ) -> i64 {
        let course = storage
            .upsert_course_impl(
                school_id,
                CreateCourseRequest {
                    name: "默认课程".to_string(),
                    intro: None,
                    normal_times,
                    vip_times,
                },
            )
            .await
            .unwrap();
        course.id
    }

    /// 入学并把额度直接设置成指定状态，返回入学记录
    pub(crate) async fn enroll_with_quota(
        storage: &SeaOrmStorage,
        school_id: i64,
        student_id: i64,
        normal_times: i32,
        vip_times: i32,
        vip_expire: i64,
    ) -> crate::models::memberships::entities::Enrollment {
        storage
            .enroll_student_impl(student_id, school_id, None)
            .await
            .unwrap();
        storage
            .update_enrollment_quota_impl(
                student_id,
                school_id,
                crate::models::memberships::requests::UpdateQuotaRequest {
                    normal_times: Some(normal_times),
                    vip_times: Some(vip_times),
                    vip_expire: Some(vip_expire),
                },
            )
            .await
            .unwrap()
            .unwrap()
    }

    /// 让教师凭新生成的邀请码入职
    pub(crate) async fn employ_teacher(storage: &SeaOrmStorage, school_id: i64, teacher_id: i64) {
        let codes = storage
            .generate_invite_codes_impl(school_id, 1)
            .await
            .unwrap();
        storage
            .consume_invite_code_impl(&codes[0].code, teacher_id)
            .await
            .unwrap();
    }
}
