use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_accounts::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 区（Wereda） ====================
        manager
            .create_table(
                Table::create()
                    .table(Weredas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Weredas::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Weredas::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Weredas::Population).big_integer().null())
                    .col(ColumnDef::new(Weredas::Area).double().null())
                    .col(
                        ColumnDef::new(Weredas::NumberOfSchools)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Weredas::NumberOfStudents)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Weredas::NumberOfTeachers)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Weredas::LiteracyRate).double().null())
                    .col(ColumnDef::new(Weredas::Status).string().not_null())
                    .col(ColumnDef::new(Weredas::ManagerId).big_integer().null())
                    .col(ColumnDef::new(Weredas::CreatedBy).big_integer().null())
                    .col(ColumnDef::new(Weredas::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Weredas::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Weredas::Table, Weredas::ManagerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Weredas::Table, Weredas::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 学校 / 院校 ====================
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
                    .col(ColumnDef::new(Schools::Name).string().not_null())
                    .col(ColumnDef::new(Schools::Code).string().not_null().unique_key())
                    .col(ColumnDef::new(Schools::Level).string().null())
                    .col(
                        ColumnDef::new(Schools::InstitutionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Schools::WeredaId).big_integer().null())
                    .col(
                        ColumnDef::new(Schools::StudentCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Schools::TeacherCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Schools::Principal).string().null())
                    .col(ColumnDef::new(Schools::Address).text().null())
                    .col(ColumnDef::new(Schools::Phone).string().null())
                    .col(ColumnDef::new(Schools::Email).string().null())
                    .col(ColumnDef::new(Schools::Established).integer().null())
                    .col(ColumnDef::new(Schools::Status).string().not_null())
                    .col(ColumnDef::new(Schools::ManagerId).big_integer().null())
                    .col(ColumnDef::new(Schools::SupervisorId).big_integer().null())
                    .col(ColumnDef::new(Schools::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Schools::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schools::Table, Schools::WeredaId)
                            .to(Weredas::Table, Weredas::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schools::Table, Schools::ManagerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Schools::Table, Schools::SupervisorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 公告 ====================
        manager
            .create_table(
                Table::create()
                    .table(Announcements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Announcements::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Announcements::Title).string().not_null())
                    .col(ColumnDef::new(Announcements::Content).text().not_null())
                    .col(
                        ColumnDef::new(Announcements::AnnouncementType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Announcements::Priority).string().not_null())
                    .col(ColumnDef::new(Announcements::AuthorId).big_integer().null())
                    .col(
                        ColumnDef::new(Announcements::TargetAudience)
                            .string()
                            .not_null()
                            .default("all"),
                    )
                    .col(
                        ColumnDef::new(Announcements::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Announcements::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Announcements::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Announcements::Table, Announcements::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AnnouncementReads::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AnnouncementReads::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AnnouncementReads::AnnouncementId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnnouncementReads::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AnnouncementReads::ReadAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnnouncementReads::Table, AnnouncementReads::AnnouncementId)
                            .to(Announcements::Table, Announcements::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AnnouncementReads::Table, AnnouncementReads::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_announcement_reads")
                    .table(AnnouncementReads::Table)
                    .col(AnnouncementReads::AnnouncementId)
                    .col(AnnouncementReads::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_schools_wereda_id")
                    .table(Schools::Table)
                    .col(Schools::WeredaId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_announcements_created_at")
                    .table(Announcements::Table)
                    .col(Announcements::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AnnouncementReads::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Announcements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Schools::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Weredas::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Weredas {
    #[sea_orm(iden = "weredas")]
    Table,
    Id,
    Name,
    Population,
    Area,
    NumberOfSchools,
    NumberOfStudents,
    NumberOfTeachers,
    LiteracyRate,
    Status,
    ManagerId,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Schools {
    #[sea_orm(iden = "schools")]
    Table,
    Id,
    Name,
    Code,
    Level,
    InstitutionType,
    WeredaId,
    StudentCount,
    TeacherCount,
    Principal,
    Address,
    Phone,
    Email,
    Established,
    Status,
    ManagerId,
    SupervisorId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Announcements {
    #[sea_orm(iden = "announcements")]
    Table,
    Id,
    Title,
    Content,
    AnnouncementType,
    Priority,
    AuthorId,
    TargetAudience,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AnnouncementReads {
    #[sea_orm(iden = "announcement_reads")]
    Table,
    Id,
    AnnouncementId,
    UserId,
    ReadAt,
}
