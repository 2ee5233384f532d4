use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::library::requests::{
    BookListParams, BorrowBookRequest, BorrowRecordListParams, CreateBookRequest,
    ReturnBookRequest, UpdateBookRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::LibraryService;
use crate::utils::SafeIDI64;

static LIBRARY_SERVICE: Lazy<LibraryService> = Lazy::new(LibraryService::new_lazy);

pub async fn list_books(
    req: HttpRequest,
    query: web::Query<BookListParams>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.list_books(query.into_inner(), &req).await
}

pub async fn create_book(
    req: HttpRequest,
    body: web::Json<CreateBookRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.create_book(body.into_inner(), &req).await
}

pub async fn get_book(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.get_book(id.0, &req).await
}

pub async fn update_book(
    req: HttpRequest,
    id: SafeIDI64,
    body: web::Json<UpdateBookRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.update_book(id.0, body.into_inner(), &req).await
}

pub async fn delete_book(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.delete_book(id.0, &req).await
}

pub async fn list_borrow_records(
    req: HttpRequest,
    query: web::Query<BorrowRecordListParams>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE
        .list_borrow_records(query.into_inner(), &req)
        .await
}

pub async fn borrow_book(
    req: HttpRequest,
    body: web::Json<BorrowBookRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.borrow_book(body.into_inner(), &req).await
}

pub async fn get_borrow_record(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.get_borrow_record(id.0, &req).await
}

// 请求体可为空，归还日期默认今天
pub async fn return_book(
    req: HttpRequest,
    id: SafeIDI64,
    body: Option<web::Json<ReturnBookRequest>>,
) -> ActixResult<HttpResponse> {
    let body = body.map(web::Json::into_inner).unwrap_or_default();
    LIBRARY_SERVICE.return_book(id.0, body, &req).await
}

pub fn configure_library_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/library")
            .wrap(RequireRole::new_any(UserRole::library_roles()))
            .wrap(RequireJWT)
            .service(
                web::scope("/books")
                    .route("", web::get().to(list_books))
                    .route("", web::post().to(create_book))
                    .route("/{id}", web::get().to(get_book))
                    .route("/{id}", web::put().to(update_book))
                    .route("/{id}", web::delete().to(delete_book)),
            )
            .service(
                web::scope("/borrow-records")
                    .route("", web::get().to(list_borrow_records))
                    .route("", web::post().to(borrow_book))
                    .route("/{id}", web::get().to(get_borrow_record))
                    .route("/{id}/return", web::post().to(return_book)),
            ),
    );
}
