use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::{BTreeMap, HashMap};

use super::{current_teacher, section_index, short_section_name};
use crate::models::{
    ApiResponse,
    academics::{DayOfWeek, Room, Schedule, ScheduleListParams, Section, Subject},
    teachers::portal::{ScheduleDay, ScheduleEntry},
};
use crate::services::teachers::TeacherService;

const TIME_FORMAT: &str = "%H:%M";

pub(super) fn room_name(room_id: Option<i64>, rooms: &HashMap<i64, Room>) -> String {
    room_id
        .and_then(|id| rooms.get(&id))
        .map(|room| room.name.clone())
        .unwrap_or_else(|| "TBA".to_string())
}

fn schedule_entry(
    schedule: &Schedule,
    subjects: &HashMap<i64, Subject>,
    sections: &HashMap<i64, Section>,
    rooms: &HashMap<i64, Room>,
) -> ScheduleEntry {
    let subject = subjects.get(&schedule.subject_id);
    ScheduleEntry {
        id: schedule.id,
        subject: subject.map(|s| s.name.clone()).unwrap_or_default(),
        subject_code: subject.map(|s| s.code.clone()).unwrap_or_default(),
        section: short_section_name(sections.get(&schedule.section_id)),
        room: room_name(schedule.room_id, rooms),
        start_time: schedule.start_time.format(TIME_FORMAT).to_string(),
        end_time: schedule.end_time.format(TIME_FORMAT).to_string(),
        duration_minutes: (schedule.end_time - schedule.start_time).num_minutes(),
    }
}

/// 按星期分组，组内按开始时间排序
pub(super) fn group_by_day(
    mut schedules: Vec<Schedule>,
    subjects: &HashMap<i64, Subject>,
    sections: &HashMap<i64, Section>,
    rooms: &HashMap<i64, Room>,
) -> Vec<ScheduleDay> {
    schedules.sort_by_key(|s| (s.day_of_week, s.start_time));

    let mut days: BTreeMap<DayOfWeek, Vec<ScheduleEntry>> = BTreeMap::new();
    for schedule in &schedules {
        days.entry(schedule.day_of_week)
            .or_default()
            .push(schedule_entry(schedule, subjects, sections, rooms));
    }
    days.into_iter()
        .map(|(day_of_week, entries)| ScheduleDay {
            day_of_week,
            entries,
        })
        .collect()
}

pub async fn my_schedule(
    service: &TeacherService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let ctx = match current_teacher(service, request).await {
        Ok(ctx) => ctx,
        Err(response) => return Ok(response),
    };
    let storage = &ctx.storage;

    let lookups = tokio::try_join!(
        storage.list_schedules(ScheduleListParams {
            teacher_id: Some(ctx.user_id),
            ..Default::default()
        }),
        storage.list_all_subjects(),
        storage.list_sections(None),
        storage.list_rooms(),
    );
    let (schedules, subjects, sections, rooms) = match lookups {
        Ok(results) => results,
        Err(e) => return Ok(e.to_response()),
    };

    let subjects: HashMap<i64, Subject> = subjects.into_iter().map(|s| (s.id, s)).collect();
    let rooms: HashMap<i64, Room> = rooms.into_iter().map(|r| (r.id, r)).collect();
    let days = group_by_day(schedules, &subjects, &section_index(sections), &rooms);

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        days,
        "Schedule retrieved successfully",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn slot(id: i64, day: DayOfWeek, start: (u32, u32), end: (u32, u32)) -> Schedule {
        Schedule {
            id,
            section_id: 1,
            subject_id: 1,
            room_id: None,
            teacher_id: 7,
            day_of_week: day,
            start_time: NaiveTime::from_hms_opt(start.0, start.1, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end.0, end.1, 0).unwrap(),
        }
    }

    #[test]
    fn test_group_by_day_orders_days_and_times() {
        let schedules = vec![
            slot(1, DayOfWeek::Wednesday, (10, 0), (10, 45)),
            slot(2, DayOfWeek::Monday, (13, 30), (14, 10)),
            slot(3, DayOfWeek::Monday, (8, 0), (9, 30)),
        ];
        let days = group_by_day(schedules, &HashMap::new(), &HashMap::new(), &HashMap::new());

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day_of_week, DayOfWeek::Monday);
        assert_eq!(days[0].entries[0].id, 3);
        assert_eq!(days[0].entries[0].start_time, "08:00");
        assert_eq!(days[0].entries[0].duration_minutes, 90);
        assert_eq!(days[0].entries[0].room, "TBA");
        assert_eq!(days[1].entries[0].duration_minutes, 45);
    }
}
