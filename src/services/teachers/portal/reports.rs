use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Duration, NaiveDate};
use std::collections::{BTreeMap, HashSet};

use super::current_teacher;
use crate::models::{
    ApiResponse,
    records::{AttendanceFilter, AttendanceRecord, AttendanceStatus, Grade, GradeFilter},
    teachers::portal::{
        RecentActivity, ReportGrade, ReportParams, ReportType, StudentAttendanceRow,
        StudentGradeRow, StudentPerformanceRow, TeacherReport,
    },
};
use crate::services::teachers::TeacherService;
use crate::utils::{dates, stats};

const MONTH_DAYS: i64 = 30;

fn grade_student_name(grade: &Grade) -> String {
    grade
        .student_name
        .clone()
        .unwrap_or_else(|| format!("Student #{}", grade.student_id))
}

fn attendance_student_name(record: &AttendanceRecord) -> String {
    record
        .student_name
        .clone()
        .unwrap_or_else(|| format!("Student #{}", record.student_id))
}

/// 按学生统计出勤，出勤率低的排在前面
pub(super) fn attendance_report(records: &[AttendanceRecord]) -> TeacherReport {
    let mut by_student: BTreeMap<i64, (String, usize, usize)> = BTreeMap::new();
    for record in records {
        let entry = by_student
            .entry(record.student_id)
            .or_insert_with(|| (attendance_student_name(record), 0, 0));
        match record.status {
            AttendanceStatus::Present => entry.1 += 1,
            AttendanceStatus::Absent => entry.2 += 1,
        }
    }

    let mut data: Vec<StudentAttendanceRow> = by_student
        .into_values()
        .map(|(student, present, absent)| StudentAttendanceRow {
            student,
            present_days: present,
            absent_days: absent,
            total_days: present + absent,
            attendance_rate: stats::rate(present, present + absent),
        })
        .collect();
    data.sort_by(|a, b| a.attendance_rate.total_cmp(&b.attendance_rate));

    let avg_rate = stats::average(data.iter().map(|r| r.attendance_rate));
    TeacherReport::Attendance {
        total_students: data.len(),
        avg_attendance_rate: stats::round_to(avg_rate, 1),
        students_below_75: data.iter().filter(|r| r.attendance_rate < 75.0).count(),
        data,
    }
}

/// 按学生汇总成绩，平均百分比低的排在前面
pub(super) fn grades_report(grades: &[Grade]) -> TeacherReport {
    let mut by_student: BTreeMap<i64, (String, Vec<ReportGrade>)> = BTreeMap::new();
    for grade in grades {
        by_student
            .entry(grade.student_id)
            .or_insert_with(|| (grade_student_name(grade), Vec::new()))
            .1
            .push(ReportGrade {
                subject: grade.subject_name.clone().unwrap_or_default(),
                grade_type: grade.grade_type,
                score: grade.score,
                full_mark: grade.full_mark,
                percentage: grade.percentage,
                date: grade.date_recorded,
            });
    }

    let mut data: Vec<StudentGradeRow> = by_student
        .into_values()
        .map(|(student, grades)| {
            let percentages = || grades.iter().map(|g| g.percentage);
            StudentGradeRow {
                student,
                average_percentage: stats::round_to(stats::average(percentages()), 1),
                total_assessments: grades.len(),
                highest_score: percentages().fold(0.0, f64::max),
                lowest_score: percentages().reduce(f64::min).unwrap_or(0.0),
                grades,
            }
        })
        .collect();
    data.sort_by(|a, b| a.average_percentage.total_cmp(&b.average_percentage));

    let class_average = stats::average(data.iter().map(|r| r.average_percentage));
    TeacherReport::Grades {
        total_students: data.len(),
        class_average: stats::round_to(class_average, 1),
        students_below_60: data.iter().filter(|r| r.average_percentage < 60.0).count(),
        students_above_90: data.iter().filter(|r| r.average_percentage >= 90.0).count(),
        data,
    }
}

/// 成绩与出勤的综合评级，仅覆盖有成绩的学生
pub(super) fn performance_report(
    grades: &[Grade],
    attendance: &[AttendanceRecord],
) -> TeacherReport {
    let mut by_student: BTreeMap<i64, Vec<&Grade>> = BTreeMap::new();
    for grade in grades {
        by_student.entry(grade.student_id).or_default().push(grade);
    }

    let data: Vec<StudentPerformanceRow> = by_student
        .into_iter()
        .map(|(student_id, grades)| {
            let average_grade = stats::average(grades.iter().map(|g| g.percentage));
            let attendance_rate = stats::rate(
                attendance
                    .iter()
                    .filter(|a| a.student_id == student_id)
                    .filter(|a| a.status == AttendanceStatus::Present)
                    .count(),
                attendance
                    .iter()
                    .filter(|a| a.student_id == student_id)
                    .count(),
            );
            StudentPerformanceRow {
                student: grade_student_name(grades[0]),
                average_grade,
                attendance_rate,
                total_assessments: grades.len(),
                performance_status: stats::performance_status(average_grade, attendance_rate)
                    .to_string(),
            }
        })
        .collect();

    TeacherReport::Performance {
        total_students: data.len(),
        excellent_performers: data
            .iter()
            .filter(|r| r.performance_status == "Excellent")
            .count(),
        at_risk_students: data
            .iter()
            .filter(|r| r.performance_status == "At Risk")
            .count(),
        data,
    }
}

pub(super) fn summary_report(
    subjects_taught: usize,
    grades: &[Grade],
    attendance: &[AttendanceRecord],
    today: NaiveDate,
) -> TeacherReport {
    let since = today - Duration::days(MONTH_DAYS);
    let students: HashSet<i64> = grades.iter().map(|g| g.student_id).collect();
    TeacherReport::Summary {
        subjects_taught,
        total_students: students.len(),
        total_grades_entered: grades.len(),
        total_attendance_records: attendance.len(),
        recent_activity: RecentActivity {
            grades_this_month: grades.iter().filter(|g| g.date_recorded >= since).count(),
            attendance_this_month: attendance.iter().filter(|a| a.date >= since).count(),
        },
    }
}

pub async fn reports(
    service: &TeacherService,
    params: ReportParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let storage = &ctx.storage;

    // 汇总与综合报表不受筛选条件限制
    let params = match params.report_type {
        ReportType::Attendance | ReportType::Grades => params,
        report_type => ReportParams {
            report_type,
            ..Default::default()
        },
    };

    let grade_filter = GradeFilter {
        teacher_id: Some(ctx.teacher.id),
        subject_id: params.subject,
        section_id: params.section,
        date_from: params.date_from,
        date_to: params.date_to,
        ..Default::default()
    };
    let attendance_filter = AttendanceFilter {
        taken_by: Some(ctx.teacher.id),
        subject_id: params.subject,
        section_id: params.section,
        date_from: params.date_from,
        date_to: params.date_to,
        ..Default::default()
    };

    let (grades, attendance) = match tokio::try_join!(
        storage.list_grades(grade_filter),
        storage.list_attendance(attendance_filter)
    ) {
        Ok(results) => results,
        Err(e) => return Ok(e.to_response()),
    };

    let report = match params.report_type {
        ReportType::Attendance => attendance_report(&attendance),
        ReportType::Grades => grades_report(&grades),
        ReportType::Performance => performance_report(&grades, &attendance),
        ReportType::Summary => summary_report(
            ctx.teacher.subjects.len(),
            &grades,
            &attendance,
            dates::today(),
        ),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        report,
        "Report generated successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::GradeType;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn grade(student_id: i64, percentage: f64) -> Grade {
        Grade {
            id: 1,
            student_id,
            student_name: Some(format!("Student {student_id}")),
            subject_id: 1,
            subject_name: Some("Math".to_string()),
            section_id: 1,
            teacher_id: Some(1),
            semester_id: 1,
            academic_year: "2025".to_string(),
            grade_type: GradeType::Midterm,
            score: percentage,
            full_mark: 100.0,
            percentage,
            letter: stats::letter_grade(percentage).to_string(),
            date_recorded: day(10),
        }
    }

    fn record(student_id: i64, status: AttendanceStatus) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            student_id,
            student_name: Some(format!("Student {student_id}")),
            section_id: 1,
            subject_id: None,
            subject_name: None,
            date: day(10),
            status,
            taken_by: Some(1),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_attendance_report_sorts_lowest_first() {
        let records = vec![
            record(1, AttendanceStatus::Present),
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::Present),
            record(2, AttendanceStatus::Absent),
        ];
        let TeacherReport::Attendance {
            data,
            total_students,
            avg_attendance_rate,
            students_below_75,
        } = attendance_report(&records)
        else {
            panic!("expected attendance report");
        };
        assert_eq!(total_students, 2);
        assert_eq!(data[0].student, "Student 2");
        assert_eq!(data[0].attendance_rate, 50.0);
        assert_eq!(avg_attendance_rate, 75.0);
        assert_eq!(students_below_75, 1);
    }

    #[test]
    fn test_grades_report_extremes() {
        let grades = vec![grade(1, 95.0), grade(1, 91.0), grade(2, 40.0)];
        let TeacherReport::Grades {
            data,
            students_below_60,
            students_above_90,
            ..
        } = grades_report(&grades)
        else {
            panic!("expected grades report");
        };
        assert_eq!(data[0].student, "Student 2");
        assert_eq!(data[1].highest_score, 95.0);
        assert_eq!(data[1].lowest_score, 91.0);
        assert_eq!(data[1].average_percentage, 93.0);
        assert_eq!(students_below_60, 1);
        assert_eq!(students_above_90, 1);
    }

    #[test]
    fn test_performance_report_statuses() {
        let grades = vec![grade(1, 90.0), grade(2, 30.0)];
        let attendance = vec![
            record(1, AttendanceStatus::Present),
            record(2, AttendanceStatus::Absent),
        ];
        let TeacherReport::Performance {
            data,
            excellent_performers,
            at_risk_students,
            ..
        } = performance_report(&grades, &attendance)
        else {
            panic!("expected performance report");
        };
        assert_eq!(data[0].performance_status, "Excellent");
        assert_eq!(excellent_performers, 1);
        assert_eq!(at_risk_students, 1);
    }

    #[test]
    fn test_summary_counts_last_month() {
        let grades = vec![grade(1, 80.0), grade(1, 70.0)];
        let TeacherReport::Summary {
            total_students,
            recent_activity,
            ..
        } = summary_report(2, &grades, &[], day(31))
        else {
            panic!("expected summary report");
        };
        assert_eq!(total_students, 1);
        assert_eq!(recent_activity.grades_this_month, 2);
        assert_eq!(recent_activity.attendance_this_month, 0);
    }
}
