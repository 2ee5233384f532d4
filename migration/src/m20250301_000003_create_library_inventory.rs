use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_accounts::{Teachers, Users};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ==================== 图书馆 ====================
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Books::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Books::Isbn).string().not_null().unique_key())
                    .col(ColumnDef::new(Books::Title).string().not_null())
                    .col(ColumnDef::new(Books::Author).string().not_null())
                    .col(ColumnDef::new(Books::Publisher).string().null())
                    .col(ColumnDef::new(Books::YearPublished).integer().null())
                    .col(ColumnDef::new(Books::TotalCopies).integer().not_null())
                    .col(ColumnDef::new(Books::AvailableCopies).integer().not_null())
                    .col(ColumnDef::new(Books::LibraryBranch).string().not_null())
                    .col(ColumnDef::new(Books::CreatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BorrowRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BorrowRecords::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BorrowRecords::BookId).big_integer().not_null())
                    .col(
                        ColumnDef::new(BorrowRecords::BorrowerType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BorrowRecords::BorrowerTeacherId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BorrowRecords::BorrowerStudentId)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(BorrowRecords::BorrowDate).date().not_null())
                    .col(
                        ColumnDef::new(BorrowRecords::ExpectedReturnDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BorrowRecords::ActualReturnDate)
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(BorrowRecords::Returned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BorrowRecords::Table, BorrowRecords::BookId)
                            .to(Books::Table, Books::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BorrowRecords::Table, BorrowRecords::BorrowerTeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(BorrowRecords::Table, BorrowRecords::BorrowerStudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 仓库物资 ====================
        manager
            .create_table(
                Table::create()
                    .table(StoreMaterials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StoreMaterials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StoreMaterials::Name).string().not_null())
                    .col(ColumnDef::new(StoreMaterials::Description).text().null())
                    .col(
                        ColumnDef::new(StoreMaterials::QuantityTotal)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StoreMaterials::QuantityAvailable)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StoreMaterials::Unit)
                            .string()
                            .not_null()
                            .default("pcs"),
                    )
                    .col(ColumnDef::new(StoreMaterials::ManagedBy).big_integer().null())
                    .col(
                        ColumnDef::new(StoreMaterials::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StoreMaterials::Table, StoreMaterials::ManagedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(IssuedMaterials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(IssuedMaterials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(IssuedMaterials::MaterialId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(IssuedMaterials::IssuedTo)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(IssuedMaterials::Quantity).integer().not_null())
                    .col(ColumnDef::new(IssuedMaterials::IssueDate).date().not_null())
                    .col(
                        ColumnDef::new(IssuedMaterials::ExpectedReturnDate)
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(IssuedMaterials::ActualReturnDate)
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(IssuedMaterials::Returned)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(IssuedMaterials::Table, IssuedMaterials::MaterialId)
                            .to(StoreMaterials::Table, StoreMaterials::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(IssuedMaterials::Table, IssuedMaterials::IssuedTo)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ==================== 资产 ====================
        manager
            .create_table(
                Table::create()
                    .table(AssetCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssetCategories::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AssetCategories::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(AssetCategories::Description).text().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assets::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Assets::Name).string().not_null())
                    .col(
                        ColumnDef::new(Assets::SerialNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Assets::CategoryId).big_integer().null())
                    .col(ColumnDef::new(Assets::AssignedTo).string().null())
                    .col(ColumnDef::new(Assets::Location).string().null())
                    .col(ColumnDef::new(Assets::PurchaseDate).date().null())
                    .col(ColumnDef::new(Assets::Status).string().not_null())
                    .col(ColumnDef::new(Assets::InventoriedBy).big_integer().null())
                    .col(ColumnDef::new(Assets::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assets::Table, Assets::CategoryId)
                            .to(AssetCategories::Table, AssetCategories::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assets::Table, Assets::InventoriedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AssetAudits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AssetAudits::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AssetAudits::AssetId).big_integer().not_null())
                    .col(ColumnDef::new(AssetAudits::OfficerId).big_integer().null())
                    .col(ColumnDef::new(AssetAudits::AuditDate).date().not_null())
                    .col(ColumnDef::new(AssetAudits::Notes).text().null())
                    .col(
                        ColumnDef::new(AssetAudits::StatusAtAudit)
                            .string()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssetAudits::Table, AssetAudits::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AssetAudits::Table, AssetAudits::OfficerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // 索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_borrow_records_book_id")
                    .table(BorrowRecords::Table)
                    .col(BorrowRecords::BookId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_issued_materials_material_id")
                    .table(IssuedMaterials::Table)
                    .col(IssuedMaterials::MaterialId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_asset_audits_asset_id")
                    .table(AssetAudits::Table)
                    .col(AssetAudits::AssetId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AssetAudits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AssetCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(IssuedMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StoreMaterials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(BorrowRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Books {
    #[sea_orm(iden = "books")]
    Table,
    Id,
    Isbn,
    Title,
    Author,
    Publisher,
    YearPublished,
    TotalCopies,
    AvailableCopies,
    LibraryBranch,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BorrowRecords {
    #[sea_orm(iden = "borrow_records")]
    Table,
    Id,
    BookId,
    BorrowerType,
    BorrowerTeacherId,
    BorrowerStudentId,
    BorrowDate,
    ExpectedReturnDate,
    ActualReturnDate,
    Returned,
}

#[derive(DeriveIden)]
enum StoreMaterials {
    #[sea_orm(iden = "store_materials")]
    Table,
    Id,
    Name,
    Description,
    QuantityTotal,
    QuantityAvailable,
    Unit,
    ManagedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum IssuedMaterials {
    #[sea_orm(iden = "issued_materials")]
    Table,
    Id,
    MaterialId,
    IssuedTo,
    Quantity,
    IssueDate,
    ExpectedReturnDate,
    ActualReturnDate,
    Returned,
}

#[derive(DeriveIden)]
enum AssetCategories {
    #[sea_orm(iden = "asset_categories")]
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Assets {
    #[sea_orm(iden = "assets")]
    Table,
    Id,
    Name,
    SerialNumber,
    CategoryId,
    AssignedTo,
    Location,
    PurchaseDate,
    Status,
    InventoriedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum AssetAudits {
    #[sea_orm(iden = "asset_audits")]
    Table,
    Id,
    AssetId,
    OfficerId,
    AuditDate,
    Notes,
    StatusAtAudit,
}
