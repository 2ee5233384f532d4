use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建用户表
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::Email).string().null().unique_key())
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::FirstName).string().not_null())
                    .col(ColumnDef::new(Users::LastName).string().not_null())
                    .col(ColumnDef::new(Users::NationalId).string().null())
                    .col(ColumnDef::new(Users::ProfilePhoto).string().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 学生档案表
        manager
            .create_table(
                Table::create()
                    .table(StudentProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentProfiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::AdmissionNo)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::StudentId)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StudentProfiles::Department).string().null())
                    .col(ColumnDef::new(StudentProfiles::Year).integer().null())
                    .col(
                        ColumnDef::new(StudentProfiles::ClassSection)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::AcademicStatus)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::EnrollmentDate)
                            .date()
                            .null(),
                    )
                    .col(ColumnDef::new(StudentProfiles::Gender).string().null())
                    .col(ColumnDef::new(StudentProfiles::Dob).date().null())
                    .col(ColumnDef::new(StudentProfiles::Phone).string().null())
                    .col(ColumnDef::new(StudentProfiles::Address).text().null())
                    .col(ColumnDef::new(StudentProfiles::BloodGroup).string().null())
                    .col(
                        ColumnDef::new(StudentProfiles::MedicalCondition)
                            .text()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::ExtraActivities)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(StudentProfiles::Remarks).text().null())
                    .col(ColumnDef::new(StudentProfiles::FatherName).string().null())
                    .col(ColumnDef::new(StudentProfiles::MotherName).string().null())
                    .col(
                        ColumnDef::new(StudentProfiles::GuardianContact)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::GuardianEmail)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::GuardianRelation)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudentProfiles::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudentProfiles::Table, StudentProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 职员档案表
        manager
            .create_table(
                Table::create()
                    .table(StaffProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StaffProfiles::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StaffProfiles::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(StaffProfiles::StaffId)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(StaffProfiles::Department).string().not_null())
                    .col(ColumnDef::new(StaffProfiles::Subject).string().null())
                    .col(ColumnDef::new(StaffProfiles::HireDate).date().null())
                    .col(ColumnDef::new(StaffProfiles::Salary).double().null())
                    .col(ColumnDef::new(StaffProfiles::Qualifications).text().null())
                    .col(ColumnDef::new(StaffProfiles::Status).string().not_null())
                    .col(ColumnDef::new(StaffProfiles::Address).text().null())
                    .col(
                        ColumnDef::new(StaffProfiles::EmergencyContact)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(StaffProfiles::Notes).text().null())
                    .col(ColumnDef::new(StaffProfiles::Phone).string().null())
                    .col(
                        ColumnDef::new(StaffProfiles::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StaffProfiles::Table, StaffProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 教师表
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
                    .col(
                        ColumnDef::new(Teachers::UserId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Teachers::EmployeeId)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teachers::Department).string().not_null())
                    .col(ColumnDef::new(Teachers::HireDate).date().not_null())
                    .col(ColumnDef::new(Teachers::AcademicRank).string().not_null())
                    .col(ColumnDef::new(Teachers::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Teachers::Table, Teachers::UserId)
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
                    .name("idx_users_role")
                    .table(Users::Table)
                    .col(Users::Role)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_national_id")
                    .table(Users::Table)
                    .col(Users::NationalId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_student_profiles_class_section")
                    .table(StudentProfiles::Table)
                    .col(StudentProfiles::ClassSection)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_staff_profiles_department")
                    .table(StaffProfiles::Table)
                    .col(StaffProfiles::Department)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StaffProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StudentProfiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Status,
    FirstName,
    LastName,
    NationalId,
    ProfilePhoto,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudentProfiles {
    #[sea_orm(iden = "student_profiles")]
    Table,
    Id,
    UserId,
    AdmissionNo,
    StudentId,
    Department,
    Year,
    ClassSection,
    AcademicStatus,
    EnrollmentDate,
    Gender,
    Dob,
    Phone,
    Address,
    BloodGroup,
    MedicalCondition,
    ExtraActivities,
    Remarks,
    FatherName,
    MotherName,
    GuardianContact,
    GuardianEmail,
    GuardianRelation,
    CreatedAt,
}

#[derive(DeriveIden)]
enum StaffProfiles {
    #[sea_orm(iden = "staff_profiles")]
    Table,
    Id,
    UserId,
    StaffId,
    Department,
    Subject,
    HireDate,
    Salary,
    Qualifications,
    Status,
    Address,
    EmergencyContact,
    Notes,
    Phone,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
    UserId,
    EmployeeId,
    Department,
    HireDate,
    AcademicRank,
    CreatedAt,
}
