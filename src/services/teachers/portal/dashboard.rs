use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::{HashMap, HashSet};

use super::{current_teacher, schedule::room_name, section_index, short_section_name};
use crate::models::{
    ApiResponse,
    academics::{DayOfWeek, Room, Schedule, ScheduleListParams, Subject},
    records::{AttendanceFilter, AttendanceRecord, Grade, GradeFilter},
    teachers::portal::{DashboardStatistics, DashboardSummary, TeacherInfo, TodaySlot},
};
use crate::services::teachers::TeacherService;
use crate::utils::{dates, stats};

const RECENT_DAYS: i64 = 7;
const PERFORMANCE_DAYS: i64 = 30;

/// 今日课表中尚未点名的课次（同一班级今天已有本人记录的考勤即视为已点名）
pub(super) fn pending_attendance(
    today_schedule: &[Schedule],
    attendance: &[AttendanceRecord],
    today: NaiveDate,
) -> usize {
    let taken: HashSet<i64> = attendance
        .iter()
        .filter(|a| a.date == today)
        .map(|a| a.section_id)
        .collect();
    today_schedule
        .iter()
        .filter(|s| !taken.contains(&s.section_id))
        .count()
}

pub(super) fn build_statistics(
    total_subjects: usize,
    grades: &[Grade],
    attendance: &[AttendanceRecord],
    today_schedule: &[Schedule],
    today: NaiveDate,
) -> DashboardStatistics {
    let recent_since = today - Duration::days(RECENT_DAYS);
    let performance_since = today - Duration::days(PERFORMANCE_DAYS);
    let students: HashSet<i64> = grades.iter().map(|g| g.student_id).collect();

    DashboardStatistics {
        total_subjects,
        total_students: students.len(),
        recent_grades_entered: grades
            .iter()
            .filter(|g| g.date_recorded >= recent_since)
            .count(),
        recent_attendance_taken: attendance
            .iter()
            .filter(|a| a.date >= recent_since)
            .count(),
        pending_attendance: pending_attendance(today_schedule, attendance, today),
        avg_class_performance: stats::average(
            grades
                .iter()
                .filter(|g| g.date_recorded >= performance_since)
                .map(|g| g.percentage),
        ),
    }
}

pub async fn dashboard_summary(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let storage = &ctx.storage;
    let today = dates::today();

    let lookups = tokio::try_join!(
        storage.list_grades(GradeFilter {
            teacher_id: Some(ctx.teacher.id),
            ..Default::default()
        }),
        storage.list_attendance(AttendanceFilter {
            taken_by: Some(ctx.teacher.id),
            ..Default::default()
        }),
        storage.list_schedules(ScheduleListParams {
            teacher_id: Some(ctx.user_id),
            day_of_week: Some(DayOfWeek::from_weekday(today.weekday())),
            ..Default::default()
        }),
        storage.list_all_subjects(),
        storage.list_sections(None),
        storage.list_rooms(),
    );
    let (grades, attendance, mut schedules, subjects, sections, rooms) = match lookups {
        Ok(results) => results,
        Err(e) => return Ok(e.to_response()),
    };
    schedules.sort_by_key(|s| s.start_time);

    let subjects: HashMap<i64, Subject> = subjects.into_iter().map(|s| (s.id, s)).collect();
    let sections = section_index(sections);
    let rooms: HashMap<i64, Room> = rooms.into_iter().map(|r| (r.id, r)).collect();

    let today_schedule = schedules
        .iter()
        .map(|s| TodaySlot {
            subject: subjects
                .get(&s.subject_id)
                .map(|subject| subject.name.clone())
                .unwrap_or_default(),
            section: short_section_name(sections.get(&s.section_id)),
            room: room_name(s.room_id, &rooms),
            time: format!(
                "{} - {}",
                s.start_time.format("%H:%M"),
                s.end_time.format("%H:%M")
            ),
        })
        .collect();

    let teacher = &ctx.teacher;
    let summary = DashboardSummary {
        teacher_info: TeacherInfo {
            name: teacher.full_name(),
            employee_id: teacher.employee_id.clone(),
            department: teacher.department.clone(),
            academic_rank: teacher.academic_rank.clone(),
        },
        statistics: build_statistics(
            teacher.subjects.len(),
            &grades,
            &attendance,
            &schedules,
            today,
        ),
        today_schedule,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        summary,
        "Dashboard summary retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::records::{AttendanceStatus, GradeType};
    use chrono::NaiveTime;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn slot(section_id: i64) -> Schedule {
        Schedule {
            id: section_id,
            section_id,
            subject_id: 1,
            room_id: None,
            teacher_id: 7,
            day_of_week: DayOfWeek::Monday,
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        }
    }

    fn record(section_id: i64, date: NaiveDate) -> AttendanceRecord {
        AttendanceRecord {
            id: 1,
            student_id: 1,
            student_name: None,
            section_id,
            subject_id: None,
            subject_name: None,
            date,
            status: AttendanceStatus::Present,
            taken_by: Some(1),
            created_at: chrono::Utc::now(),
        }
    }

    fn grade(student_id: i64, percentage: f64, date: NaiveDate) -> Grade {
        Grade {
            id: 1,
            student_id,
            student_name: None,
            subject_id: 1,
            subject_name: None,
            section_id: 1,
            teacher_id: Some(1),
            semester_id: 1,
            academic_year: "2025".to_string(),
            grade_type: GradeType::Quiz,
            score: percentage,
            full_mark: 100.0,
            percentage,
            letter: stats::letter_grade(percentage).to_string(),
            date_recorded: date,
        }
    }

    #[test]
    fn test_pending_attendance_ignores_other_days() {
        let today = day(31);
        let schedule = vec![slot(1), slot(2)];
        let attendance = vec![record(1, today), record(2, day(30))];
        assert_eq!(pending_attendance(&schedule, &attendance, today), 1);
    }

    #[test]
    fn test_recent_windows() {
        let today = day(31);
        let grades = vec![
            grade(1, 90.0, day(30)),
            grade(2, 70.0, day(20)),
            grade(2, 10.0, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
        ];
        let statistics = build_statistics(3, &grades, &[], &[], today);
        assert_eq!(statistics.total_students, 2);
        assert_eq!(statistics.recent_grades_entered, 1);
        assert_eq!(statistics.avg_class_performance, 80.0);
        assert_eq!(statistics.pending_attendance, 0);
    }
}
