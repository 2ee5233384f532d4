//! 图书实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub publisher: Option<String>,
    pub year_published: Option<i32>,
    pub total_copies: i32,
    pub available_copies: i32,
    pub library_branch: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::borrow_records::Entity")]
    BorrowRecords,
}

impl Related<super::borrow_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BorrowRecords.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_book(self) -> crate::models::library::Book {
        crate::models::library::Book {
            id: self.id,
            isbn: self.isbn,
            title: self.title,
            author: self.author,
            publisher: self.publisher,
            year_published: self.year_published,
            total_copies: self.total_copies,
            available_copies: self.available_copies,
            library_branch: self.library_branch,
            created_at: super::to_datetime(self.created_at),
        }
    }
}
