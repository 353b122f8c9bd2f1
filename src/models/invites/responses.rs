use serde::Serialize;

use crate::models::invites::entities::InviteCode;
use crate::models::schools::entities::School;

/// 批量生成邀请码响应
#[derive(Debug, Serialize)]
pub struct GenerateInvitesResponse {
    pub codes: Vec<InviteCode>,
}

/// 凭邀请码加入学校响应，返回新任职的学校
#[derive(Debug, Serialize)]
pub struct BindSchoolResponse {
    pub school: School,
}
