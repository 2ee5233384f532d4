use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;

use crate::models::{
    ApiResponse,
    academics::ClassGroup,
    records::GradeType,
    teachers::portal::{AvailableSection, GradeTypeOption},
};
use crate::services::teachers::TeacherService;

pub async fn available_subjects(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_all_subjects().await {
        Ok(mut subjects) => {
            subjects.sort_by(|a, b| a.name.cmp(&b.name));
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                subjects,
                "Subjects retrieved successfully",
            )))
        }
        Err(e) => Ok(e.to_response()),
    }
}

/// 全部班级，按年级名、班名排序
pub async fn available_sections(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let (sections, groups) =
        match tokio::try_join!(storage.list_sections(None), storage.list_class_groups()) {
            Ok(results) => results,
            Err(e) => return Ok(e.to_response()),
        };
    let groups: HashMap<i64, ClassGroup> = groups.into_iter().map(|g| (g.id, g)).collect();

    let mut available: Vec<AvailableSection> = sections
        .iter()
        .map(|section| {
            let group = groups.get(&section.class_group_id);
            AvailableSection {
                id: section.id,
                name: section.display_name(),
                class_group: section.class_group_name.clone(),
                level: group.map(|g| g.level.clone()),
                program: group.map(|g| g.academic_program.clone()),
            }
        })
        .collect();
    available.sort_by(|a, b| (&a.class_group, &a.name).cmp(&(&b.class_group, &b.name)));

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        available,
        "Sections retrieved successfully",
    )))
}

pub(super) fn grade_type_options() -> Vec<GradeTypeOption> {
    GradeType::ALL
        .iter()
        .map(|value| GradeTypeOption {
            value: *value,
            label: value.label().to_string(),
        })
        .collect()
}

pub async fn grade_types() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        grade_type_options(),
        "Grade types retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_type_options() {
        let options = grade_type_options();
        assert_eq!(options.len(), 5);
        assert_eq!(options[0].value, GradeType::Assignment);
        assert_eq!(options[2].label, "Midterm Exam");
    }
}
