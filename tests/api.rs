//! 端到端接口测试：内存 SQLite + 完整路由

use actix_web::{App, http::StatusCode, test, web};
use serde_json::{Value, json};
use std::sync::Arc;

use rust_eschool_admin::models::users::{NewUser, UserRole};
use rust_eschool_admin::routes::configure_api_routes;
use rust_eschool_admin::storage::{Storage, UserStorage, sea_orm_storage::SeaOrmStorage};
use rust_eschool_admin::utils::password::hash_password;

const ADMIN_PASSWORD: &str = "Admin#12345";

async fn seeded_storage() -> Arc<dyn Storage> {
    let storage = SeaOrmStorage::connect(":memory:").await.unwrap();
    storage
        .create_user(NewUser {
            username: "admin".to_string(),
            email: Some("admin@school.et".to_string()),
            password_hash: hash_password(ADMIN_PASSWORD).unwrap(),
            role: UserRole::Admin,
            first_name: "System".to_string(),
            last_name: "Administrator".to_string(),
            national_id: None,
        })
        .await
        .unwrap();
    Arc::new(storage)
}

macro_rules! app {
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage.clone()))
                .configure(configure_api_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_unknown_user_cannot_log_in() {
    let storage = seeded_storage().await;
    let app = app!(storage);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "nobody", "password": "whatever" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let storage = seeded_storage().await;
    let app = app!(storage);

    let req = test::TestRequest::get().uri("/api/v1/students").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_admin_creates_student_who_can_log_in() {
    let storage = seeded_storage().await;
    let app = app!(storage);

    // 管理员登录
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "admin", "password": ADMIN_PASSWORD }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let admin_token = body["data"]["access_token"].as_str().unwrap().to_string();

    // 建档
    let req = test::TestRequest::post()
        .uri("/api/v1/students")
        .insert_header(("Authorization", format!("Bearer {admin_token}")))
        .set_json(json!({
            "admission_no": "ADM-001",
            "class_section": "Grade 9 - A",
            "first_name": "Abebe",
            "last_name": "Kebede",
            "dob": "15/03/2010"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert_eq!(data["student_id"], "STUD0001");
    assert_eq!(data["username"], "abebe0001");
    assert_eq!(data["password"], "Kebede#123");
    assert_eq!(data["student"]["dob"], "2010-03-15");

    // 学生使用默认密码登录
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "abebe0001", "password": "Kebede#123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let student_token = body["data"]["access_token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/v1/students/me")
        .insert_header(("Authorization", format!("Bearer {student_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 学生无权访问学籍管理
    let req = test::TestRequest::get()
        .uri("/api/v1/students")
        .insert_header(("Authorization", format!("Bearer {student_token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
