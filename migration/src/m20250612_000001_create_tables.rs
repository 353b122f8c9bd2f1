use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建管理员表
        manager
            .create_table(
                Table::create()
                    .table(Admins::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Admins::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Admins::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Admins::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Admins::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建学校表
        manager
            .create_table(
                Table::create()
                    .table(Schools::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Schools::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Schools::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Schools::Intro).text().null())
                    .col(
                        ColumnDef::new(Schools::AdminTelephone)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Schools::Disabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Schools::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Schools::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建教师表
        manager
            .create_table(
                Table::create()
                    .table(Teachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teachers::Nickname).string().not_null())
                    .col(ColumnDef::new(Teachers::Realname).string().null())
                    .col(ColumnDef::new(Teachers::Intro).text().null())
                    .col(ColumnDef::new(Teachers::AvatarUrl).string().null())
                    .col(ColumnDef::new(Teachers::Email).string().null())
                    .col(
                        ColumnDef::new(Teachers::Telephone)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Teachers::Gender)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Teachers::WxOpenid)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::PasswordHash).string().not_null())
                    .col(
                        ColumnDef::new(Teachers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Teachers::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::Nickname).string().not_null())
                    .col(ColumnDef::new(Students::Realname).string().null())
                    .col(ColumnDef::new(Students::AvatarUrl).string().null())
                    .col(ColumnDef::new(Students::FromWhere).string().null())
                    .col(
                        ColumnDef::new(Students::Telephone)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Students::WxOpenid)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Students::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(Students::Disabled)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Students::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Students::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .col(ColumnDef::new(Courses::Intro).text().null())
                    .col(
                        ColumnDef::new(Courses::NormalTimes)
                            .integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Courses::VipTimes)
                            .integer()
                            .not_null()
                            .default(-1),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建邀请码表
        manager
            .create_table(
                Table::create()
                    .table(InviteCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InviteCodes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InviteCodes::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InviteCodes::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(InviteCodes::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(InviteCodes::Table, InviteCodes::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学校教师关联表
        manager
            .create_table(
                Table::create()
                    .table(SchoolTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolTeachers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SchoolTeachers::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolTeachers::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolTeachers::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchoolTeachers::Table, SchoolTeachers::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchoolTeachers::Table, SchoolTeachers::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学校学生关联表
        manager
            .create_table(
                Table::create()
                    .table(SchoolStudents::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SchoolStudents::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SchoolStudents::SchoolId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolStudents::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SchoolStudents::NormalTimes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SchoolStudents::VipTimes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SchoolStudents::VipExpire)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(SchoolStudents::JoinedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchoolStudents::Table, SchoolStudents::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(SchoolStudents::Table, SchoolStudents::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提问表
        manager
            .create_table(
                Table::create()
                    .table(Asks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Asks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Asks::SchoolId).big_integer().not_null())
                    .col(ColumnDef::new(Asks::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Asks::AskText).text().null())
                    .col(ColumnDef::new(Asks::VoiceUrl).string().null())
                    .col(ColumnDef::new(Asks::VoiceDuration).integer().null())
                    .col(ColumnDef::new(Asks::ImgIds).string().null())
                    .col(
                        ColumnDef::new(Asks::BeAnswered)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Asks::AnswerGrade).integer().null())
                    .col(ColumnDef::new(Asks::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Asks::Table, Asks::SchoolId)
                            .to(Schools::Table, Schools::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Asks::Table, Asks::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建回答表
        manager
            .create_table(
                Table::create()
                    .table(Answers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Answers::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Answers::AskId).big_integer().not_null())
                    .col(ColumnDef::new(Answers::TeacherId).big_integer().null())
                    .col(ColumnDef::new(Answers::StudentId).big_integer().null())
                    .col(ColumnDef::new(Answers::AnswerText).text().null())
                    .col(ColumnDef::new(Answers::VoiceUrl).string().null())
                    .col(ColumnDef::new(Answers::VoiceDuration).integer().null())
                    .col(ColumnDef::new(Answers::ImgIds).string().null())
                    .col(ColumnDef::new(Answers::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answers::Table, Answers::AskId)
                            .to(Asks::Table, Asks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answers::Table, Answers::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Answers::Table, Answers::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建题目图片表
        manager
            .create_table(
                Table::create()
                    .table(TopicImages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TopicImages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(TopicImages::ImgUrl).string().not_null())
                    .col(
                        ColumnDef::new(TopicImages::UploaderKind)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TopicImages::UploaderId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TopicImages::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        // 邀请码表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_invite_codes_school_id")
                    .table(InviteCodes::Table)
                    .col(InviteCodes::SchoolId)
                    .to_owned(),
            )
            .await?;

        // 学校教师关联表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_school_teachers_school_id_teacher_id")
                    .table(SchoolTeachers::Table)
                    .col(SchoolTeachers::SchoolId)
                    .col(SchoolTeachers::TeacherId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_school_teachers_teacher_id")
                    .table(SchoolTeachers::Table)
                    .col(SchoolTeachers::TeacherId)
                    .to_owned(),
            )
            .await?;

        // 学校学生关联表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_school_students_school_id_student_id")
                    .table(SchoolStudents::Table)
                    .col(SchoolStudents::SchoolId)
                    .col(SchoolStudents::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_school_students_student_id")
                    .table(SchoolStudents::Table)
                    .col(SchoolStudents::StudentId)
                    .to_owned(),
            )
            .await?;

        // 提问表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_asks_school_id")
                    .table(Asks::Table)
                    .col(Asks::SchoolId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_asks_student_id")
                    .table(Asks::Table)
                    .col(Asks::StudentId)
                    .to_owned(),
            )
            .await?;

        // 回答表索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_answers_ask_id")
                    .table(Answers::Table)
                    .col(Answers::AskId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(TopicImages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Answers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Asks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchoolStudents::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SchoolTeachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InviteCodes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schools::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Admins::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Admins {
    #[sea_orm(iden = "admins")]
    Table,
    Id,
    Username,
    PasswordHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Schools {
    #[sea_orm(iden = "schools")]
    Table,
    Id,
    Name,
    Intro,
    AdminTelephone,
    Disabled,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
    Nickname,
    Realname,
    Intro,
    AvatarUrl,
    Email,
    Telephone,
    Gender,
    WxOpenid,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Nickname,
    Realname,
    AvatarUrl,
    FromWhere,
    Telephone,
    WxOpenid,
    PasswordHash,
    Disabled,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    SchoolId,
    Name,
    Intro,
    NormalTimes,
    VipTimes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum InviteCodes {
    #[sea_orm(iden = "invite_codes")]
    Table,
    Id,
    SchoolId,
    Code,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SchoolTeachers {
    #[sea_orm(iden = "school_teachers")]
    Table,
    Id,
    SchoolId,
    TeacherId,
    JoinedAt,
}

#[derive(DeriveIden)]
enum SchoolStudents {
    #[sea_orm(iden = "school_students")]
    Table,
    Id,
    SchoolId,
    StudentId,
    NormalTimes,
    VipTimes,
    VipExpire,
    JoinedAt,
}

#[derive(DeriveIden)]
enum Asks {
    #[sea_orm(iden = "asks")]
    Table,
    Id,
    SchoolId,
    StudentId,
    AskText,
    VoiceUrl,
    VoiceDuration,
    ImgIds,
    BeAnswered,
    AnswerGrade,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Answers {
    #[sea_orm(iden = "answers")]
    Table,
    Id,
    AskId,
    TeacherId,
    StudentId,
    AnswerText,
    VoiceUrl,
    VoiceDuration,
    ImgIds,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TopicImages {
    #[sea_orm(iden = "topic_images")]
    Table,
    Id,
    ImgUrl,
    UploaderKind,
    UploaderId,
    CreatedAt,
}
