use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 平台管理员方法
    // 创建管理员（password_hash 为已加密的哈希）
    async fn create_admin(&self, username: &str, password_hash: &str) -> Result<Admin>;
    // 通过ID获取管理员
    async fn get_admin_by_id(&self, id: i64) -> Result<Option<Admin>>;
    // 通过用户名获取管理员
    async fn get_admin_by_username(&self, username: &str) -> Result<Option<Admin>>;
    // 统计管理员数量
    async fn count_admins(&self) -> Result<u64>;

    /// 教师账号方法
    // 注册教师
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    // 通过ID获取教师
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    // 通过手机号获取教师
    async fn get_teacher_by_telephone(&self, telephone: &str) -> Result<Option<Teacher>>;
    // 更新教师资料
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;

    /// 学生账号方法
    // 注册学生
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    // 通过ID获取学生
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    // 通过手机号获取学生
    async fn get_student_by_telephone(&self, telephone: &str) -> Result<Option<Student>>;
    // 更新学生资料
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;

    /// 学校管理方法
    // 创建学校
    async fn create_school(&self, school: CreateSchoolRequest) -> Result<School>;
    // 通过ID获取学校
    async fn get_school_by_id(&self, school_id: i64) -> Result<Option<School>>;
    // 通过名称获取学校
    async fn get_school_by_name(&self, name: &str) -> Result<Option<School>>;
    // 列出学校
    async fn list_schools_with_pagination(
        &self,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse>;
    // 更新学校信息（含停用标记）
    async fn update_school(
        &self,
        school_id: i64,
        update: UpdateSchoolRequest,
    ) -> Result<Option<School>>;

    /// 课程模板方法
    // 创建或更新学校的课程模板（已存在时更新最早创建的那条）
    async fn upsert_course(&self, school_id: i64, course: CreateCourseRequest) -> Result<Course>;
    // 获取学校的额度模板课程（最早创建的一条）
    async fn get_canonical_course(&self, school_id: i64) -> Result<Option<Course>>;

    /// 邀请码方法
    // 批量生成邀请码，仍有未使用的邀请码时拒绝
    async fn generate_invite_codes(
        &self,
        school_id: i64,
        quantity: u32,
    ) -> Result<Vec<InviteCode>>;
    // 列出学校未使用的邀请码
    async fn list_invite_codes(&self, school_id: i64) -> Result<Vec<InviteCode>>;
    // 教师凭邀请码加入学校，查码、建雇佣、删码在同一事务内完成
    async fn consume_invite_code(&self, code: &str, teacher_id: i64) -> Result<School>;

    /// 雇佣与入学方法
    // 教师是否受雇于学校
    async fn is_employed(&self, teacher_id: i64, school_id: i64) -> Result<bool>;
    // 教师是否为校管理员（手机号匹配且已受雇，两者缺一不可）
    async fn is_school_admin(&self, teacher_id: i64, school_id: i64) -> Result<bool>;
    // 解除雇佣关系
    async fn dismiss_employment(&self, teacher_id: i64, school_id: i64) -> Result<()>;
    // 学生入学，从课程模板复制提问额度
    async fn enroll_student(
        &self,
        student_id: i64,
        school_id: i64,
        course_id: Option<i64>,
    ) -> Result<Enrollment>;
    // 学生是否已入学
    async fn is_enrolled(&self, student_id: i64, school_id: i64) -> Result<bool>;
    // 获取学生的入学记录
    async fn get_enrollment(&self, student_id: i64, school_id: i64) -> Result<Option<Enrollment>>;
    // 调整入学记录的提问额度（充值/续费）
    async fn update_enrollment_quota(
        &self,
        student_id: i64,
        school_id: i64,
        update: UpdateQuotaRequest,
    ) -> Result<Option<Enrollment>>;
    // 列出学校的在职教师
    async fn list_school_teachers_with_pagination(
        &self,
        school_id: i64,
        query: MembershipQueryParams,
    ) -> Result<EmploymentListResponse>;
    // 列出学校的在读学生
    async fn list_school_students_with_pagination(
        &self,
        school_id: i64,
        query: MembershipQueryParams,
    ) -> Result<EnrollmentListResponse>;
    // 列出教师任职的学校
    async fn list_teacher_schools_with_pagination(
        &self,
        teacher_id: i64,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse>;
    // 列出学生就读的学校
    async fn list_student_schools_with_pagination(
        &self,
        student_id: i64,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse>;

    /// 提问额度方法
    // 学生当前能否提问（只读判断，实际消耗在 create_ask 事务内完成）
    async fn can_ask(&self, student_id: i64, school_id: i64) -> Result<bool>;

    /// 提问方法
    // 发起提问，入学校验、额度消耗与写入在同一事务内完成
    async fn create_ask(&self, student_id: i64, ask: CreateAskRequest) -> Result<Ask>;
    // 通过ID获取提问
    async fn get_ask_by_id(&self, ask_id: i64) -> Result<Option<Ask>>;
    // 获取提问详情（附图片与全部回答）
    async fn get_ask_detail(&self, ask_id: i64) -> Result<Option<AskView>>;
    // 列出提问
    async fn list_asks_with_pagination(&self, query: AskListQuery) -> Result<AskListResponse>;
    // 删除提问（仅提问学生本人），回答随之级联删除
    async fn delete_ask(&self, ask_id: i64, student_id: i64) -> Result<()>;
    // 评价回答（仅提问学生本人，且提问已有回答）
    async fn rate_answer(&self, ask_id: i64, student_id: i64, grade: i32) -> Result<Ask>;
    // 统计学生在学校内的提问数量
    async fn count_student_asks(&self, student_id: i64, school_id: i64) -> Result<u64>;

    /// 回答方法
    // 提交回答，写入与 be_answered 重算在同一事务内完成
    async fn attach_answer(
        &self,
        ask_id: i64,
        author: AnswerAuthor,
        answer: CreateAnswerRequest,
    ) -> Result<Answer>;
    // 删除回答（仅作者本人），删除与 be_answered 重算在同一事务内完成
    async fn remove_answer(
        &self,
        ask_id: i64,
        answer_id: i64,
        requester: AnswerAuthor,
    ) -> Result<()>;
    // 列出提问下的全部回答
    async fn list_answers_for_ask(&self, ask_id: i64) -> Result<Vec<AnswerView>>;

    /// 题目图片方法
    // 登记已上传的图片
    async fn register_topic_image(
        &self,
        uploader_kind: UploaderKind,
        uploader_id: i64,
        img_url: &str,
    ) -> Result<TopicImage>;
    // 通过ID获取图片
    async fn get_topic_image_by_id(&self, image_id: i64) -> Result<Option<TopicImage>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
