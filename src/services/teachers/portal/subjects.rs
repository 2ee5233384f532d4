use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{BTreeSet, HashSet};

use super::{current_teacher, section_index, section_ref};
use crate::models::{
    ApiResponse,
    academics::ScheduleListParams,
    records::{AttendanceFilter, AttendanceSummary, GradeFilter},
    teachers::portal::MySubject,
};
use crate::services::teachers::TeacherService;
use crate::utils::stats;

/// 我教授的课程：班级来自本人课表，统计来自本人录入的成绩与考勤
pub async fn my_subjects(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let storage = &ctx.storage;

    let schedules = storage.list_schedules(ScheduleListParams {
        teacher_id: Some(ctx.user_id),
        ..Default::default()
    });
    let sections = storage.list_sections(None);
    let grades = storage.list_grades(GradeFilter {
        teacher_id: Some(ctx.teacher.id),
        ..Default::default()
    });
    let attendance = storage.list_attendance(AttendanceFilter {
        taken_by: Some(ctx.teacher.id),
        ..Default::default()
    });

    let (schedules, sections, grades, attendance) =
        match tokio::try_join!(schedules, sections, grades, attendance) {
            Ok(results) => results,
            Err(e) => return Ok(e.to_response()),
        };
    let sections = section_index(sections);

    let subjects: Vec<MySubject> = ctx
        .teacher
        .subjects
        .iter()
        .map(|subject| {
            let section_ids: BTreeSet<i64> = schedules
                .iter()
                .filter(|s| s.subject_id == subject.id)
                .map(|s| s.section_id)
                .collect();
            let subject_grades: Vec<_> =
                grades.iter().filter(|g| g.subject_id == subject.id).collect();
            let students: HashSet<i64> = subject_grades.iter().map(|g| g.student_id).collect();
            let summary = AttendanceSummary::from_records(
                attendance
                    .iter()
                    .filter(|a| a.subject_id == Some(subject.id)),
            );

            MySubject {
                id: subject.id,
                name: subject.name.clone(),
                code: subject.code.clone(),
                credit_hours: subject.credit_hours,
                department: subject.department.clone(),
                level: subject.level.clone(),
                total_students: students.len(),
                average_grade: stats::average(subject_grades.iter().map(|g| g.percentage)),
                attendance_rate: summary.attendance_rate,
                sections: section_ids
                    .iter()
                    .filter_map(|id| sections.get(id))
                    .map(section_ref)
                    .collect(),
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        subjects,
        "Subjects retrieved successfully",
    )))
}
