use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::current_teacher;
use crate::models::{
    ApiResponse,
    records::{AttendanceFilter, AttendanceRecord, AttendanceSummary, Grade, GradeFilter},
    students::Student,
    teachers::portal::{
        AcademicPerformance, MyStudent, MyStudentsParams, MyStudentsResponse, RecentGrade,
    },
};
use crate::services::teachers::TeacherService;
use crate::utils::stats;

const MAX_STUDENTS: usize = 100;
const RECENT_GRADES: usize = 5;

/// 按学生账号汇总成绩与考勤；成绩已按日期倒序
pub(super) fn build_my_students(
    grades: &[Grade],
    attendance: &[AttendanceRecord],
    profiles: &HashMap<i64, Student>,
) -> Vec<MyStudent> {
    let mut by_student: BTreeMap<i64, Vec<&Grade>> = BTreeMap::new();
    for grade in grades {
        by_student.entry(grade.student_id).or_default().push(grade);
    }

    by_student
        .into_iter()
        .take(MAX_STUDENTS)
        .map(|(student_id, grades)| {
            let profile = profiles.get(&student_id);
            let student_name = profile
                .map(Student::full_name)
                .or_else(|| grades.iter().find_map(|g| g.student_name.clone()))
                .unwrap_or_else(|| format!("Student #{student_id}"));
            let subjects_taught: BTreeSet<String> = grades
                .iter()
                .filter_map(|g| g.subject_name.clone())
                .collect();

            MyStudent {
                student_id,
                student_name,
                admission_no: profile.map(|p| p.admission_no.clone()),
                student_id_number: profile.and_then(|p| p.student_id.clone()),
                class_section: profile.map(|p| p.class_section.clone()),
                email: profile.and_then(|p| p.email.clone()),
                academic_performance: AcademicPerformance {
                    average_grade: stats::average(grades.iter().map(|g| g.percentage)),
                    total_assessments: grades.len(),
                    subjects_taught: subjects_taught.into_iter().collect(),
                    recent_grades: grades
                        .iter()
                        .take(RECENT_GRADES)
                        .map(|g| RecentGrade {
                            subject: g.subject_name.clone().unwrap_or_default(),
                            score: g.score,
                            full_mark: g.full_mark,
                            percentage: g.percentage,
                            grade_type: g.grade_type,
                            date: g.date_recorded,
                        })
                        .collect(),
                },
                attendance_summary: AttendanceSummary::from_records(
                    attendance.iter().filter(|a| a.student_id == student_id),
                ),
            }
        })
        .collect()
}

/// 我教过的学生（以本人录入过成绩为准）
pub async fn my_students(
    service: &TeacherService,
    params: MyStudentsParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let storage = &ctx.storage;

    let lookups = tokio::try_join!(
        storage.list_grades(GradeFilter {
            teacher_id: Some(ctx.teacher.id),
            subject_id: params.subject,
            section_id: params.section,
            ..Default::default()
        }),
        storage.list_attendance(AttendanceFilter {
            taken_by: Some(ctx.teacher.id),
            ..Default::default()
        }),
        storage.list_all_students(),
    );
    let (grades, attendance, students) = match lookups {
        Ok(results) => results,
        Err(e) => return Ok(e.to_response()),
    };

    let profiles: HashMap<i64, Student> =
        students.into_iter().map(|s| (s.user_id, s)).collect();
    let students = build_my_students(&grades, &attendance, &profiles);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        MyStudentsResponse {
            total_students: students.len(),
            students,
        },
        "Students retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::{AttendanceStatus, GradeType};
    use chrono::NaiveDate;

    fn grade(id: i64, student_id: i64, subject: &str, percentage: f64, day: u32) -> Grade {
        Grade {
            id,
            student_id,
            student_name: Some(format!("Student {student_id}")),
            subject_id: 1,
            subject_name: Some(subject.to_string()),
            section_id: 1,
            teacher_id: Some(1),
            semester_id: 1,
            academic_year: "2025".to_string(),
            grade_type: GradeType::Assignment,
            score: percentage / 2.0,
            full_mark: 50.0,
            percentage,
            letter: stats::letter_grade(percentage).to_string(),
            date_recorded: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        }
    }

    fn attendance(student_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            student_id,
            student_name: None,
            section_id: 1,
            subject_id: None,
            subject_name: None,
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            status,
            taken_by: Some(1),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_students_are_grouped_with_recent_grades() {
        let mut grades: Vec<Grade> = (1..=6)
            .map(|day| grade(day as i64, 10, "Math", 80.0, 10 - day))
            .collect();
        grades.push(grade(7, 11, "Physics", 50.0, 2));
        grades.push(grade(8, 11, "Math", 70.0, 1));

        let records = vec![
            attendance(11, AttendanceStatus::Present),
            attendance(11, AttendanceStatus::Absent),
        ];
        let students = build_my_students(&grades, &records, &HashMap::new());

        assert_eq!(students.len(), 2);
        let first = &students[0];
        assert_eq!(first.student_id, 10);
        assert_eq!(first.student_name, "Student 10");
        assert_eq!(first.academic_performance.total_assessments, 6);
        assert_eq!(first.academic_performance.recent_grades.len(), 5);
        assert_eq!(first.attendance_summary.total_records, 0);

        let second = &students[1];
        assert_eq!(second.academic_performance.average_grade, 60.0);
        assert_eq!(
            second.academic_performance.subjects_taught,
            vec!["Math".to_string(), "Physics".to_string()]
        );
        assert_eq!(second.attendance_summary.attendance_rate, 50.0);
    }
}
