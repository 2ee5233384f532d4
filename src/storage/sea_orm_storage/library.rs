//! 图书馆存储操作：图书与借阅记录

use chrono::NaiveDate;

use super::SeaOrmStorage;
use super::counters::{decremented, incremented_capped};
use crate::entity::{books, borrow_records};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    library::{
        Book, BookListQuery, BookListResponse, BorrowRecord, BorrowRecordListQuery,
        BorrowRecordListResponse, CreateBookRequest, NewBorrowRecord, UpdateBookRequest,
        validate_copies,
    },
};
use crate::storage::LibraryStorage;
use crate::utils::{dates, escape_like_pattern};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

#[async_trait]
impl LibraryStorage for SeaOrmStorage {
    async fn create_book(&self, req: CreateBookRequest) -> Result<Book> {
        let model = books::ActiveModel {
            isbn: Set(req.isbn),
            title: Set(req.title),
            author: Set(req.author),
            publisher: Set(req.publisher),
            year_published: Set(req.year_published),
            total_copies: Set(req.total_copies),
            available_copies: Set(req.available_copies.unwrap_or(req.total_copies)),
            library_branch: Set(req.library_branch),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建图书失败", e))?;
        Ok(result.into_book())
    }

    async fn get_book(&self, id: i64) -> Result<Option<Book>> {
        let result = books::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询图书失败", e))?;
        Ok(result.map(|m| m.into_book()))
    }

    async fn list_books_with_pagination(&self, query: BookListQuery) -> Result<BookListResponse> {
        use books::Column;

        let mut select = books::Entity::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Title.contains(&escaped))
                    .add(Column::Author.contains(&escaped))
                    .add(Column::Isbn.contains(&escaped)),
            );
        }
        if let Some(ref branch) = query.library_branch {
            select = select.filter(Column::LibraryBranch.eq(branch.as_str()));
        }
        match query.available {
            Some(true) => select = select.filter(Column::AvailableCopies.gt(0)),
            Some(false) => select = select.filter(Column::AvailableCopies.eq(0)),
            None => {}
        }

        let paginator = select
            .order_by_asc(Column::Title)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询图书总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询图书页数失败", e))?;
        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询图书列表失败", e))?;

        Ok(BookListResponse {
            items: items.into_iter().map(|m| m.into_book()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn update_book(&self, id: i64, req: UpdateBookRequest) -> Result<Option<Book>> {
        let Some(existing) = books::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询图书失败", e))?
        else {
            return Ok(None);
        };

        let total = req.total_copies.unwrap_or(existing.total_copies);
        let available = req.available_copies.unwrap_or(existing.available_copies);
        validate_copies(total, available).map_err(SchoolError::validation)?;

        let (seen_total, seen_available) = (existing.total_copies, existing.available_copies);
        let mut model: books::ActiveModel = existing.into();
        if let Some(isbn) = req.isbn {
            model.isbn = Set(isbn);
        }
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(author) = req.author {
            model.author = Set(author);
        }
        if let Some(publisher) = req.publisher {
            model.publisher = Set(Some(publisher));
        }
        if let Some(year) = req.year_published {
            model.year_published = Set(Some(year));
        }
        model.total_copies = Set(total);
        model.available_copies = Set(available);
        if let Some(branch) = req.library_branch {
            model.library_branch = Set(branch);
        }

        // 以读取时的数量为条件写入，期间发生借还则返回冲突
        let updated = books::Entity::update(model)
            .validate()
            .map_err(|e| db_error("更新图书失败", e))?
            .filter(books::Column::TotalCopies.eq(seen_total))
            .filter(books::Column::AvailableCopies.eq(seen_available))
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    SchoolError::conflict("Book copies changed concurrently, please retry")
                }
                other => db_error("更新图书失败", other),
            })?;
        Ok(Some(updated.into_book()))
    }

    async fn delete_book(&self, id: i64) -> Result<bool> {
        let result = books::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除图书失败", e))?;
        Ok(result.rows_affected > 0)
    }

    async fn borrow_book(&self, record: NewBorrowRecord) -> Result<BorrowRecord> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let Some(book) = books::Entity::find_by_id(record.book_id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询图书失败", e))?
        else {
            return Err(SchoolError::not_found(format!(
                "Book {} not found",
                record.book_id
            )));
        };

        // 条件扣减，并发借阅不会让可借数量为负
        let taken = books::Entity::update_many()
            .col_expr(
                books::Column::AvailableCopies,
                decremented(books::Column::AvailableCopies, 1),
            )
            .filter(books::Column::Id.eq(book.id))
            .filter(books::Column::AvailableCopies.gt(0))
            .exec(&txn)
            .await
            .map_err(|e| db_error("扣减可借数量失败", e))?;
        if taken.rows_affected == 0 {
            return Err(SchoolError::conflict("No copies available"));
        }

        let model = borrow_records::ActiveModel {
            book_id: Set(book.id),
            borrower_type: Set(record.borrower_type.to_string()),
            borrower_teacher_id: Set(record.borrower_teacher_id),
            borrower_student_id: Set(record.borrower_student_id),
            borrow_date: Set(record.borrow_date),
            expected_return_date: Set(record.expected_return_date),
            actual_return_date: Set(None),
            returned: Set(false),
            ..Default::default()
        };
        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建借阅记录失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(inserted.into_borrow_record(Some(book.title), dates::today()))
    }

    async fn return_book(&self, record_id: i64, return_date: NaiveDate) -> Result<BorrowRecord> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let Some((record, book)) = borrow_records::Entity::find_by_id(record_id)
            .find_also_related(books::Entity)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询借阅记录失败", e))?
        else {
            return Err(SchoolError::not_found(format!(
                "Borrow record {record_id} not found"
            )));
        };

        // 以未归还为条件标记，重复归还返回冲突
        let marked = borrow_records::Entity::update_many()
            .col_expr(borrow_records::Column::Returned, Expr::value(true))
            .col_expr(
                borrow_records::Column::ActualReturnDate,
                Expr::value(return_date),
            )
            .filter(borrow_records::Column::Id.eq(record.id))
            .filter(borrow_records::Column::Returned.eq(false))
            .exec(&txn)
            .await
            .map_err(|e| db_error("标记归还失败", e))?;
        if marked.rows_affected == 0 {
            return Err(SchoolError::conflict("Book already returned"));
        }

        // 恢复可借数量，不超过馆藏总数
        books::Entity::update_many()
            .col_expr(
                books::Column::AvailableCopies,
                incremented_capped(books::Column::AvailableCopies, 1, books::Column::TotalCopies),
            )
            .filter(books::Column::Id.eq(record.book_id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("恢复可借数量失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        let returned = borrow_records::Model {
            returned: true,
            actual_return_date: Some(return_date),
            ..record
        };
        Ok(returned.into_borrow_record(book.map(|b| b.title), dates::today()))
    }

    async fn get_borrow_record(&self, id: i64) -> Result<Option<BorrowRecord>> {
        let result = borrow_records::Entity::find_by_id(id)
            .find_also_related(books::Entity)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询借阅记录失败", e))?;

        let today = dates::today();
        Ok(result.map(|(record, book)| record.into_borrow_record(book.map(|b| b.title), today)))
    }

    async fn list_borrow_records_with_pagination(
        &self,
        query: BorrowRecordListQuery,
    ) -> Result<BorrowRecordListResponse> {
        use borrow_records::Column;

        let today = dates::today();
        let mut select = borrow_records::Entity::find().find_also_related(books::Entity);

        if let Some(book_id) = query.book_id {
            select = select.filter(Column::BookId.eq(book_id));
        }
        if let Some(returned) = query.returned {
            select = select.filter(Column::Returned.eq(returned));
        }
        if let Some(borrower_type) = query.borrower_type {
            select = select.filter(Column::BorrowerType.eq(borrower_type.as_str()));
        }
        if let Some(student_id) = query.borrower_student_id {
            select = select.filter(Column::BorrowerStudentId.eq(student_id));
        }
        match query.overdue {
            Some(true) => {
                select = select
                    .filter(Column::Returned.eq(false))
                    .filter(Column::ExpectedReturnDate.lt(today));
            }
            Some(false) => {
                select = select.filter(
                    Condition::any()
                        .add(Column::Returned.eq(true))
                        .add(Column::ExpectedReturnDate.gte(today)),
                );
            }
            None => {}
        }

        let paginator = select
            .order_by_desc(Column::BorrowDate)
            .order_by_desc(Column::Id)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询借阅记录总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询借阅记录页数失败", e))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询借阅记录失败", e))?;

        Ok(BorrowRecordListResponse {
            items: rows
                .into_iter()
                .map(|(record, book)| record.into_borrow_record(book.map(|b| b.title), today))
                .collect(),
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::library::BorrowerType;
    use crate::models::users::{NewUser, UserRole};
    use crate::storage::UserStorage;

    async fn setup(copies: i32) -> (SeaOrmStorage, i64, i64) {
        let storage = memory_storage().await;
        let book = storage
            .create_book(CreateBookRequest {
                isbn: "978-99944-0-001-1".to_string(),
                title: "Fikir Eske Mekabir".to_string(),
                author: "Haddis Alemayehu".to_string(),
                publisher: None,
                year_published: Some(1968),
                total_copies: copies,
                available_copies: None,
                library_branch: "Main".to_string(),
            })
            .await
            .unwrap();
        let student = storage
            .create_user(NewUser {
                username: "selam0001".to_string(),
                email: None,
                password_hash: "hash".to_string(),
                role: UserRole::Student,
                first_name: "Selam".to_string(),
                last_name: "Girma".to_string(),
                national_id: None,
            })
            .await
            .unwrap();
        (storage, book.id, student.id)
    }

    fn borrow(book_id: i64, student_id: i64) -> NewBorrowRecord {
        NewBorrowRecord {
            book_id,
            borrower_type: BorrowerType::Student,
            borrower_teacher_id: None,
            borrower_student_id: Some(student_id),
            borrow_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            expected_return_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_borrow_and_return_adjust_available_copies() {
        let (storage, book_id, student_id) = setup(1).await;

        let record = storage.borrow_book(borrow(book_id, student_id)).await.unwrap();
        assert_eq!(record.book_title.as_deref(), Some("Fikir Eske Mekabir"));
        assert_eq!(storage.get_book(book_id).await.unwrap().unwrap().available_copies, 0);

        // 最后一本已借出
        let err = storage
            .borrow_book(borrow(book_id, student_id))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");

        let returned = storage
            .return_book(record.id, NaiveDate::from_ymd_opt(2025, 10, 20).unwrap())
            .await
            .unwrap();
        assert!(returned.returned);
        assert!(!returned.is_overdue);
        assert_eq!(storage.get_book(book_id).await.unwrap().unwrap().available_copies, 1);

        let err = storage
            .return_book(record.id, NaiveDate::from_ymd_opt(2025, 10, 21).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");
        assert_eq!(storage.get_book(book_id).await.unwrap().unwrap().available_copies, 1);
    }

    #[tokio::test]
    async fn test_overdue_filter() {
        let (storage, book_id, student_id) = setup(3).await;
        storage.borrow_book(borrow(book_id, student_id)).await.unwrap();

        let overdue = storage
            .list_borrow_records_with_pagination(BorrowRecordListQuery {
                page: 1,
                size: 10,
                overdue: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(overdue.items.len(), 1);
        assert!(overdue.items[0].is_overdue);
    }

    #[tokio::test]
    async fn test_return_never_exceeds_total_copies() {
        let (storage, book_id, student_id) = setup(2).await;
        let record = storage.borrow_book(borrow(book_id, student_id)).await.unwrap();

        // 借出期间补录为满架
        storage
            .update_book(
                book_id,
                UpdateBookRequest {
                    available_copies: Some(2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        storage
            .return_book(record.id, NaiveDate::from_ymd_opt(2025, 10, 10).unwrap())
            .await
            .unwrap();
        let book = storage.get_book(book_id).await.unwrap().unwrap();
        assert_eq!((book.total_copies, book.available_copies), (2, 2));
    }

    #[tokio::test]
    async fn test_update_rejects_copies_out_of_bounds() {
        let (storage, book_id, _) = setup(2).await;

        let err = storage
            .update_book(
                book_id,
                UpdateBookRequest {
                    total_copies: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), actix_web::http::StatusCode::BAD_REQUEST);
        assert_eq!(storage.get_book(book_id).await.unwrap().unwrap().total_copies, 2);

        let shrunk = storage
            .update_book(
                book_id,
                UpdateBookRequest {
                    total_copies: Some(1),
                    available_copies: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!((shrunk.total_copies, shrunk.available_copies), (1, 1));
    }

    #[tokio::test]
    async fn test_borrow_unknown_book() {
        let (storage, _, student_id) = setup(1).await;
        let err = storage.borrow_book(borrow(999, student_id)).await.unwrap_err();
        assert_eq!(err.code(), "E008");
    }
}
