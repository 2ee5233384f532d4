use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{BTreeSet, HashMap};

use super::current_teacher;
use crate::models::{
    ApiResponse,
    academics::{ClassGroup, Schedule, ScheduleListParams, Section, Subject},
    students::Student,
    teachers::portal::MyClass,
};
use crate::services::teachers::TeacherService;

/// 参与方式：班主任按账号关联，点名教师按教师档案关联，任课以课表为准
pub(super) fn build_my_classes(
    user_id: i64,
    teacher_id: i64,
    sections: &[Section],
    groups: &HashMap<i64, ClassGroup>,
    schedules: &[Schedule],
    subjects: &HashMap<i64, Subject>,
    students: &[Student],
) -> Vec<MyClass> {
    let mut classes: Vec<MyClass> = sections
        .iter()
        .filter_map(|section| {
            let is_advisor = section.advisor_id == Some(user_id);
            let is_name_caller = section.name_caller_id == Some(teacher_id);
            let taught: BTreeSet<String> = schedules
                .iter()
                .filter(|s| s.section_id == section.id)
                .filter_map(|s| subjects.get(&s.subject_id).map(|subject| subject.name.clone()))
                .collect();
            let scheduled = schedules.iter().any(|s| s.section_id == section.id);
            if !(is_advisor || is_name_caller || scheduled) {
                return None;
            }

            let group = groups.get(&section.class_group_id);
            // 学生的 class_section 为自由文本，按年级名模糊匹配
            let student_count = match &section.class_group_name {
                Some(name) => {
                    let needle = name.to_lowercase();
                    students
                        .iter()
                        .filter(|s| s.class_section.to_lowercase().contains(&needle))
                        .count()
                }
                None => 0,
            };

            Some(MyClass {
                id: section.id,
                name: section.display_name(),
                class_group: section.class_group_name.clone(),
                section: section.name.clone(),
                level: group.map(|g| g.level.clone()),
                program: group.map(|g| g.academic_program.clone()),
                student_count,
                is_advisor,
                is_name_caller,
                subjects_taught: taught.into_iter().collect(),
            })
        })
        .collect();
    classes.sort_by(|a, b| (&a.class_group, &a.section).cmp(&(&b.class_group, &b.section)));
    classes
}

pub async fn my_classes(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let storage = &ctx.storage;

    let lookups = tokio::try_join!(
        storage.list_sections(None),
        storage.list_class_groups(),
        storage.list_schedules(ScheduleListParams {
            teacher_id: Some(ctx.user_id),
            ..Default::default()
        }),
        storage.list_all_subjects(),
        storage.list_all_students(),
    );
    let (sections, groups, schedules, subjects, students) = match lookups {
        Ok(results) => results,
        Err(e) => return Ok(e.to_response()),
    };

    let groups: HashMap<i64, ClassGroup> = groups.into_iter().map(|g| (g.id, g)).collect();
    let subjects: HashMap<i64, Subject> = subjects.into_iter().map(|s| (s.id, s)).collect();
    let classes = build_my_classes(
        ctx.user_id,
        ctx.teacher.id,
        &sections,
        &groups,
        &schedules,
        &subjects,
        &students,
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        classes,
        "Classes retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::academics::DayOfWeek;
    use chrono::NaiveTime;

    fn section(id: i64, name: &str, advisor: Option<i64>, name_caller: Option<i64>) -> Section {
        Section {
            id,
            class_group_id: 1,
            class_group_name: Some("Grade 9".to_string()),
            name: name.to_string(),
            advisor_id: advisor,
            name_caller_id: name_caller,
        }
    }

    fn lesson(section_id: i64, subject_id: i64) -> Schedule {
        Schedule {
            id: section_id * 10 + subject_id,
            section_id,
            subject_id,
            room_id: None,
            teacher_id: 7,
            day_of_week: DayOfWeek::Monday,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(8, 45, 0).unwrap(),
        }
    }

    fn subject(id: i64, name: &str) -> (i64, Subject) {
        let subject = Subject {
            id,
            name: name.to_string(),
            code: format!("SUB{id}"),
            credit_hours: 3,
            department: "Science".to_string(),
            level: "Secondary".to_string(),
        };
        (id, subject)
    }

    fn student(class_section: &str) -> Student {
        serde_json::from_value(serde_json::json!({
            "id": 1,
            "user_id": 1,
            "username": "abebe0001",
            "email": null,
            "first_name": "Abebe",
            "last_name": "Kebede",
            "national_id": null,
            "admission_no": "ADM-001",
            "student_id": "STUD0001",
            "department": null,
            "year": null,
            "class_section": class_section,
            "academic_status": "Active",
            "created_at": "2025-09-01T00:00:00Z",
        }))
        .unwrap()
    }

    #[test]
    fn test_classes_from_every_kind_of_involvement() {
        let sections = vec![
            section(1, "A", Some(7), None),
            section(2, "B", None, Some(3)),
            section(3, "C", None, None),
            section(4, "D", None, None),
        ];
        let groups = HashMap::from([(
            1,
            ClassGroup {
                id: 1,
                name: "Grade 9".to_string(),
                level: "Secondary".to_string(),
                academic_program: "Regular".to_string(),
            },
        )]);
        let schedules = vec![lesson(3, 1), lesson(3, 2), lesson(1, 1)];
        let subjects = HashMap::from([subject(1, "Physics"), subject(2, "Chemistry")]);
        let students = vec![student("grade 9 - A"), student("Grade 10 - A")];

        let classes =
            build_my_classes(7, 3, &sections, &groups, &schedules, &subjects, &students);

        assert_eq!(classes.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(classes[0].is_advisor && !classes[0].is_name_caller);
        assert_eq!(classes[0].subjects_taught, vec!["Physics"]);
        assert!(classes[1].is_name_caller);
        assert!(classes[1].subjects_taught.is_empty());
        assert_eq!(classes[2].subjects_taught, vec!["Chemistry", "Physics"]);
        assert_eq!(classes[2].name, "Grade 9 - Section C");
        assert_eq!(classes[2].level.as_deref(), Some("Secondary"));
        assert_eq!(classes[0].student_count, 1);
    }
}
