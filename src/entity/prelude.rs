//! 预导入模块，方便使用

pub use super::admins::{ActiveModel as AdminActiveModel, Entity as Admins, Model as AdminModel};
pub use super::answers::{
    ActiveModel as AnswerActiveModel, Entity as Answers, Model as AnswerModel,
};
pub use super::asks::{ActiveModel as AskActiveModel, Entity as Asks, Model as AskModel};
pub use super::courses::{
    ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel,
};
pub use super::invite_codes::{
    ActiveModel as InviteCodeActiveModel, Entity as InviteCodes, Model as InviteCodeModel,
};
pub use super::school_students::{
    ActiveModel as SchoolStudentActiveModel, Entity as SchoolStudents, Model as SchoolStudentModel,
};
pub use super::school_teachers::{
    ActiveModel as SchoolTeacherActiveModel, Entity as SchoolTeachers, Model as SchoolTeacherModel,
};
pub use super::schools::{
    ActiveModel as SchoolActiveModel, Entity as Schools, Model as SchoolModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::teachers::{
    ActiveModel as TeacherActiveModel, Entity as Teachers, Model as TeacherModel,
};
pub use super::topic_images::{
    ActiveModel as TopicImageActiveModel, Entity as TopicImages, Model as TopicImageModel,
};
