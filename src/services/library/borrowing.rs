use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LibraryService, bad_request};
use crate::models::{
    ApiResponse, ErrorCode,
    library::{
        BorrowBookRequest, BorrowRecordListParams, BorrowRecordListQuery, BorrowerType,
        NewBorrowRecord, ReturnBookRequest,
    },
    users::UserRole,
};
use crate::utils::dates;

/// 借阅人字段需与借阅人类型一致，应还日期不早于借出日期
fn check_request(req: &BorrowBookRequest) -> Result<NewBorrowRecord, &'static str> {
    let (teacher_id, student_id) = match req.borrower_type {
        BorrowerType::Teacher => match req.borrower_teacher_id {
            Some(id) => (Some(id), None),
            None => return Err("borrower_teacher_id is required for teacher borrowers"),
        },
        BorrowerType::Student => match req.borrower_student_id {
            Some(id) => (None, Some(id)),
            None => return Err("borrower_student_id is required for student borrowers"),
        },
    };

    let borrow_date = req.borrow_date.unwrap_or_else(dates::today);
    if req.expected_return_date < borrow_date {
        return Err("expected_return_date must not be before borrow_date");
    }

    Ok(NewBorrowRecord {
        book_id: req.book_id,
        borrower_type: req.borrower_type,
        borrower_teacher_id: teacher_id,
        borrower_student_id: student_id,
        borrow_date,
        expected_return_date: req.expected_return_date,
    })
}

impl LibraryService {
    pub async fn borrow_book(
        &self,
        req: BorrowBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let record = match check_request(&req) {
            Ok(record) => record,
            Err(msg) => return Ok(bad_request(msg)),
        };
        let storage = self.get_storage(request);

        // 借阅人必须存在：教师按档案查，学生按账号查且角色为学生
        let borrower_exists = match (record.borrower_teacher_id, record.borrower_student_id) {
            (Some(teacher_id), _) => storage.get_teacher(teacher_id).await.map(|t| t.is_some()),
            (_, Some(user_id)) => storage
                .get_user_by_id(user_id)
                .await
                .map(|u| u.is_some_and(|u| u.role == UserRole::Student)),
            _ => Ok(false),
        };
        match borrower_exists {
            Ok(true) => {}
            Ok(false) => return Ok(bad_request("Borrower not found")),
            Err(e) => return Ok(e.to_response()),
        }

        match storage.borrow_book(record).await {
            Ok(record) => {
                tracing::info!(
                    "Book {} borrowed, record {}",
                    record.book_id,
                    record.id
                );
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(record, "Book borrowed successfully")))
            }
            Err(e) => Ok(e.to_response_with(ErrorCode::BookUnavailable, ErrorCode::BookNotFound)),
        }
    }

    pub async fn return_book(
        &self,
        record_id: i64,
        req: ReturnBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        let return_date = req.actual_return_date.unwrap_or_else(dates::today);

        match self
            .get_storage(request)
            .return_book(record_id, return_date)
            .await
        {
            Ok(record) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(record, "Book returned successfully"))),
            Err(e) => Ok(e.to_response_with(
                ErrorCode::AlreadyReturned,
                ErrorCode::BorrowRecordNotFound,
            )),
        }
    }

    pub async fn list_borrow_records(
        &self,
        params: BorrowRecordListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self
            .get_storage(request)
            .list_borrow_records_with_pagination(BorrowRecordListQuery::from(params))
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Borrow records retrieved successfully",
            ))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_borrow_record(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_borrow_record(id).await {
            Ok(Some(record)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                record,
                "Borrow record retrieved successfully",
            ))),
            Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BorrowRecordNotFound,
                "Borrow record not found",
            ))),
            Err(e) => Ok(e.to_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(borrower_type: BorrowerType) -> BorrowBookRequest {
        BorrowBookRequest {
            book_id: 1,
            borrower_type,
            borrower_teacher_id: Some(4),
            borrower_student_id: Some(9),
            borrow_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            expected_return_date: NaiveDate::from_ymd_opt(2025, 3, 15).unwrap(),
        }
    }

    #[test]
    fn test_borrower_fields_follow_type() {
        let record = check_request(&request(BorrowerType::Student)).unwrap();
        assert_eq!(record.borrower_student_id, Some(9));
        assert_eq!(record.borrower_teacher_id, None);

        let mut teacher = request(BorrowerType::Teacher);
        teacher.borrower_teacher_id = None;
        assert!(check_request(&teacher).is_err());
    }

    #[test]
    fn test_return_date_not_before_borrow_date() {
        let mut req = request(BorrowerType::Teacher);
        req.expected_return_date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        assert_eq!(
            check_request(&req).unwrap_err(),
            "expected_return_date must not be before borrow_date"
        );
    }
}
