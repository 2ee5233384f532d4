use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{LibraryService, bad_request, book_not_found};
use crate::models::{
    ApiResponse,
    library::{
        BookListParams, BookListQuery, CreateBookRequest, UpdateBookRequest, validate_copies,
    },
};
use crate::utils::validate::require_non_blank;

fn validate_create(req: &CreateBookRequest) -> Result<(), String> {
    require_non_blank(&req.isbn, "isbn")?;
    require_non_blank(&req.title, "title")?;
    require_non_blank(&req.author, "author")?;
    require_non_blank(&req.library_branch, "library_branch")?;
    validate_copies(
        req.total_copies,
        req.available_copies.unwrap_or(req.total_copies),
    )
    .map_err(str::to_string)
}

impl LibraryService {
    pub async fn create_book(
        &self,
        mut req: CreateBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        if let Err(msg) = validate_create(&req) {
            return Ok(bad_request(msg));
        }
        req.available_copies = Some(req.available_copies.unwrap_or(req.total_copies));

        match self.get_storage(request).create_book(req).await {
            Ok(book) => {
                tracing::info!("Book {} added ({} copies)", book.isbn, book.total_copies);
                Ok(HttpResponse::Created()
                    .json(ApiResponse::success(book, "Book created successfully")))
            }
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn list_books(
        &self,
        params: BookListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        match self
            .get_storage(request)
            .list_books_with_pagination(BookListQuery::from(params))
            .await
        {
            Ok(response) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(response, "Books retrieved successfully"))),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn get_book(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).get_book(id).await {
            Ok(Some(book)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(book, "Book retrieved successfully"))),
            Ok(None) => Ok(book_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn update_book(
        &self,
        id: i64,
        req: UpdateBookRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        // 数量上下限由存储层在同一条件写入中校验
        match self.get_storage(request).update_book(id, req).await {
            Ok(Some(book)) => Ok(HttpResponse::Ok()
                .json(ApiResponse::success(book, "Book updated successfully"))),
            Ok(None) => Ok(book_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }

    pub async fn delete_book(&self, id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        match self.get_storage(request).delete_book(id).await {
            Ok(true) => Ok(HttpResponse::Ok()
                .json(ApiResponse::<()>::success_empty("Book deleted successfully"))),
            Ok(false) => Ok(book_not_found()),
            Err(e) => Ok(e.to_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(total: i32, available: Option<i32>) -> CreateBookRequest {
        CreateBookRequest {
            isbn: "978-99944-0-000-1".to_string(),
            title: "Fikir Eske Mekabir".to_string(),
            author: "Haddis Alemayehu".to_string(),
            publisher: None,
            year_published: Some(1968),
            total_copies: total,
            available_copies: available,
            library_branch: "Main".to_string(),
        }
    }

    #[test]
    fn test_available_defaults_to_total() {
        assert!(validate_create(&request(3, None)).is_ok());
    }

    #[test]
    fn test_available_cannot_exceed_total() {
        assert_eq!(
            validate_create(&request(3, Some(4))).unwrap_err(),
            "available_copies must be between 0 and total_copies"
        );
        assert!(validate_copies(-1, 0).is_err());
    }
}
