//! 借阅记录实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "borrow_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub book_id: i64,
    pub borrower_type: String,
    pub borrower_teacher_id: Option<i64>,
    pub borrower_student_id: Option<i64>,
    pub borrow_date: Date,
    pub expected_return_date: Date,
    pub actual_return_date: Option<Date>,
    pub returned: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::books::Entity",
        from = "Column::BookId",
        to = "super::books::Column::Id"
    )]
    Book,
}

impl Related<super::books::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// `today` 用于计算是否逾期
    pub fn into_borrow_record(
        self,
        book_title: Option<String>,
        today: Date,
    ) -> crate::models::library::BorrowRecord {
        use crate::models::library::{BorrowRecord, BorrowerType};

        BorrowRecord {
            id: self.id,
            book_id: self.book_id,
            book_title,
            borrower_type: self
                .borrower_type
                .parse::<BorrowerType>()
                .unwrap_or(BorrowerType::Student),
            borrower_teacher_id: self.borrower_teacher_id,
            borrower_student_id: self.borrower_student_id,
            borrow_date: self.borrow_date,
            expected_return_date: self.expected_return_date,
            actual_return_date: self.actual_return_date,
            returned: self.returned,
            is_overdue: BorrowRecord::overdue_on(self.returned, self.expected_return_date, today),
        }
    }
}
