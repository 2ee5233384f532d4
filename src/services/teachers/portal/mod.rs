//! 教师自助门户
//!
//! 成绩以教师档案 ID 记录（`teacher_id`），考勤以教师档案 ID 记录（`taken_by`），
//! 课表则以教师的账号 ID 关联（`schedule.teacher_id`）。

pub mod attendance;
pub mod classes;
pub mod dashboard;
pub mod grades;
pub mod profile;
pub mod reports;
pub mod schedule;
pub mod students;
pub mod subjects;
pub mod utilities;

use actix_web::{HttpRequest, HttpResponse};
use std::collections::HashMap;
use std::sync::Arc;

use super::TeacherService;
use crate::config::AppConfig;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    academics::Section,
    teachers::{Teacher, portal::SectionRef},
};
use crate::storage::Storage;

/// 当前登录教师及其存储句柄
pub(super) struct PortalContext {
    pub storage: Arc<dyn Storage>,
    pub user_id: i64,
    pub teacher: Teacher,
}

/// 解析当前账号对应的教师档案；未登录返回 401，无档案返回 404
pub(super) async fn current_teacher(
    service: &TeacherService,
    request: &HttpRequest,
) -> Result<PortalContext, HttpResponse> {
    let Some(user_id) = RequireJWT::extract_user_id(request) else {
        return Err(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };
    let storage = service.get_storage(request);

    match storage.get_teacher_by_user_id(user_id).await {
        Ok(Some(teacher)) => Ok(PortalContext {
            storage,
            user_id,
            teacher,
        }),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TeacherNotFound,
            "Teacher profile not found",
        ))),
        Err(e) => Err(e.to_response()),
    }
}

/// 教师端列表的条数上限
pub(super) fn record_limit() -> usize {
    AppConfig::get().accounts.list_record_limit as usize
}

pub(super) fn section_index(sections: Vec<Section>) -> HashMap<i64, Section> {
    sections.into_iter().map(|s| (s.id, s)).collect()
}

pub(super) fn section_ref(section: &Section) -> SectionRef {
    SectionRef {
        id: section.id,
        name: section.display_name(),
        class_group: section.class_group_name.clone(),
    }
}

/// 课表中展示的班级名，如 "Grade 10 - A"
pub(super) fn short_section_name(section: Option<&Section>) -> String {
    match section {
        Some(Section {
            class_group_name: Some(group),
            name,
            ..
        }) => format!("{group} - {name}"),
        Some(section) => section.name.clone(),
        None => "Unknown".to_string(),
    }
}
