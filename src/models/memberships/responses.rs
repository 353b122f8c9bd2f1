use serde::Serialize;

use crate::models::memberships::entities::{Employment, Enrollment};
use crate::models::students::entities::Student;
use crate::models::teachers::entities::Teacher;
use crate::models::PaginationInfo;

/// 在校教师视图
#[derive(Debug, Serialize)]
pub struct TeacherInSchool {
    pub teacher: Teacher,
    pub employment: Employment,
    pub is_school_admin: bool,
}

/// 在校学生视图
#[derive(Debug, Serialize)]
pub struct StudentInSchool {
    pub student: Student,
    pub enrollment: Enrollment,
}

/// 在校教师列表响应
#[derive(Debug, Serialize)]
pub struct EmploymentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<TeacherInSchool>,
}

/// 在校学生列表响应
#[derive(Debug, Serialize)]
pub struct EnrollmentListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<StudentInSchool>,
}

/// 学生提问额度状态响应
#[derive(Debug, Serialize)]
pub struct QuotaStatusResponse {
    pub can_ask: bool,
    pub normal_times: i32,
    pub vip_times: i32,
    pub vip_expire: i64,
    pub vip_active: bool,
    pub asks_count: u64,
}
