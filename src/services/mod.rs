pub mod answers;
pub mod asks;
pub mod auth;
pub mod courses;
pub mod images;
pub mod invites;
pub mod memberships;
pub mod schools;

pub use answers::AnswerService;
pub use asks::AskService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use images::ImageService;
pub use invites::InviteService;
pub use memberships::MembershipService;
pub use schools::SchoolService;
