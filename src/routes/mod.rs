pub mod academics;

pub mod administration;

pub mod announcements;

pub mod auth;

pub mod inventory;

pub mod library;

pub mod records;

pub mod staff;

pub mod students;

pub mod teachers;

pub mod users;

pub use academics::configure_academics_routes;
pub use administration::configure_administration_routes;
pub use announcements::configure_announcement_routes;
pub use auth::configure_auth_routes;
pub use inventory::configure_inventory_routes;
pub use library::configure_library_routes;
pub use records::configure_record_routes;
pub use staff::configure_staff_routes;
pub use students::configure_student_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// 注册全部 API 路由，服务端与集成测试共用
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_student_routes)
        .configure(configure_staff_routes)
        .configure(configure_teacher_routes)
        .configure(configure_academics_routes)
        .configure(configure_record_routes)
        .configure(configure_library_routes)
        .configure(configure_inventory_routes)
        .configure(configure_administration_routes)
        .configure(configure_announcement_routes);
}
