//! 教务基础数据存储：课程、学期、年级、教室、班级与课表

use super::SeaOrmStorage;
use crate::entity::{class_groups, rooms, schedules, sections, semesters, subjects};
use crate::errors::{Result, db_error};
use crate::models::{
    PaginationInfo,
    academics::{
        ClassGroup, CreateClassGroupRequest, CreateRoomRequest, CreateScheduleRequest,
        CreateSectionRequest, CreateSemesterRequest, CreateSubjectRequest, Room, Schedule,
        ScheduleListParams, Section, Semester, Subject, SubjectListQuery, SubjectListResponse,
        UpdateClassGroupRequest, UpdateRoomRequest, UpdateScheduleRequest, UpdateSectionRequest,
        UpdateSemesterRequest, UpdateSubjectRequest,
    },
};
use crate::storage::AcademicStorage;
use crate::utils::escape_like_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

#[async_trait]
impl AcademicStorage for SeaOrmStorage {
    // ---------- 课程 ----------

    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let model = subjects::ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            credit_hours: Set(req.credit_hours),
            department: Set(req.department),
            level: Set(req.level),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建课程失败", e))?;
        Ok(result.into_subject())
    }

    async fn get_subject(&self, id: i64) -> Result<Option<Subject>> {
        let result = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询课程失败", e))?;
        Ok(result.map(|m| m.into_subject()))
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        use subjects::Column;

        let mut select = subjects::Entity::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped)),
            );
        }
        if let Some(ref department) = query.department {
            select = select.filter(Column::Department.eq(department.as_str()));
        }
        if let Some(ref level) = query.level {
            select = select.filter(Column::Level.eq(level.as_str()));
        }

        let paginator = select
            .order_by_asc(Column::Code)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询课程总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询课程页数失败", e))?;
        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询课程列表失败", e))?;

        Ok(SubjectListResponse {
            items: items.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn list_all_subjects(&self) -> Result<Vec<Subject>> {
        let items = subjects::Entity::find()
            .order_by_asc(subjects::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询课程列表失败", e))?;
        Ok(items.into_iter().map(|m| m.into_subject()).collect())
    }

    async fn update_subject(
        &self,
        id: i64,
        req: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let Some(existing) = subjects::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询课程失败", e))?
        else {
            return Ok(None);
        };

        let mut model: subjects::ActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(code) = req.code {
            model.code = Set(code);
        }
        if let Some(credit_hours) = req.credit_hours {
            model.credit_hours = Set(credit_hours);
        }
        if let Some(department) = req.department {
            model.department = Set(department);
        }
        if let Some(level) = req.level {
            model.level = Set(level);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新课程失败", e))?;
        Ok(Some(updated.into_subject()))
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        let result = subjects::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除课程失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 学期 ----------

    async fn create_semester(&self, req: CreateSemesterRequest) -> Result<Semester> {
        let model = semesters::ActiveModel {
            name: Set(req.name),
            academic_year: Set(req.academic_year),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建学期失败", e))?;
        Ok(result.into_semester())
    }

    async fn get_semester(&self, id: i64) -> Result<Option<Semester>> {
        let result = semesters::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询学期失败", e))?;
        Ok(result.map(|m| m.into_semester()))
    }

    async fn list_semesters(&self) -> Result<Vec<Semester>> {
        let items = semesters::Entity::find()
            .order_by_desc(semesters::Column::StartDate)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询学期列表失败", e))?;
        Ok(items.into_iter().map(|m| m.into_semester()).collect())
    }

    async fn update_semester(
        &self,
        id: i64,
        req: UpdateSemesterRequest,
    ) -> Result<Option<Semester>> {
        let Some(existing) = semesters::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询学期失败", e))?
        else {
            return Ok(None);
        };

        let mut model: semesters::ActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(academic_year) = req.academic_year {
            model.academic_year = Set(academic_year);
        }
        if let Some(start_date) = req.start_date {
            model.start_date = Set(start_date);
        }
        if let Some(end_date) = req.end_date {
            model.end_date = Set(end_date);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新学期失败", e))?;
        Ok(Some(updated.into_semester()))
    }

    async fn delete_semester(&self, id: i64) -> Result<bool> {
        let result = semesters::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除学期失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 年级 ----------

    async fn create_class_group(&self, req: CreateClassGroupRequest) -> Result<ClassGroup> {
        let model = class_groups::ActiveModel {
            name: Set(req.name),
            level: Set(req.level),
            academic_program: Set(req.academic_program),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建年级失败", e))?;
        Ok(result.into_class_group())
    }

    async fn get_class_group(&self, id: i64) -> Result<Option<ClassGroup>> {
        let result = class_groups::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询年级失败", e))?;
        Ok(result.map(|m| m.into_class_group()))
    }

    async fn list_class_groups(&self) -> Result<Vec<ClassGroup>> {
        let items = class_groups::Entity::find()
            .order_by_asc(class_groups::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询年级列表失败", e))?;
        Ok(items.into_iter().map(|m| m.into_class_group()).collect())
    }

    async fn update_class_group(
        &self,
        id: i64,
        req: UpdateClassGroupRequest,
    ) -> Result<Option<ClassGroup>> {
        let Some(existing) = class_groups::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询年级失败", e))?
        else {
            return Ok(None);
        };

        let mut model: class_groups::ActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(level) = req.level {
            model.level = Set(level);
        }
        if let Some(academic_program) = req.academic_program {
            model.academic_program = Set(academic_program);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新年级失败", e))?;
        Ok(Some(updated.into_class_group()))
    }

    async fn delete_class_group(&self, id: i64) -> Result<bool> {
        let result = class_groups::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除年级失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 教室 ----------

    async fn create_room(&self, req: CreateRoomRequest) -> Result<Room> {
        let model = rooms::ActiveModel {
            name: Set(req.name),
            building: Set(req.building),
            capacity: Set(req.capacity),
            is_lab: Set(req.is_lab),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建教室失败", e))?;
        Ok(result.into_room())
    }

    async fn get_room(&self, id: i64) -> Result<Option<Room>> {
        let result = rooms::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询教室失败", e))?;
        Ok(result.map(|m| m.into_room()))
    }

    async fn list_rooms(&self) -> Result<Vec<Room>> {
        let items = rooms::Entity::find()
            .order_by_asc(rooms::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询教室列表失败", e))?;
        Ok(items.into_iter().map(|m| m.into_room()).collect())
    }

    async fn update_room(&self, id: i64, req: UpdateRoomRequest) -> Result<Option<Room>> {
        let Some(existing) = rooms::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询教室失败", e))?
        else {
            return Ok(None);
        };

        let mut model: rooms::ActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(building) = req.building {
            model.building = Set(Some(building));
        }
        if let Some(capacity) = req.capacity {
            model.capacity = Set(capacity);
        }
        if let Some(is_lab) = req.is_lab {
            model.is_lab = Set(is_lab);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新教室失败", e))?;
        Ok(Some(updated.into_room()))
    }

    async fn delete_room(&self, id: i64) -> Result<bool> {
        let result = rooms::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除教室失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 班级 ----------

    async fn create_section(&self, req: CreateSectionRequest) -> Result<Section> {
        let model = sections::ActiveModel {
            class_group_id: Set(req.class_group_id),
            name: Set(req.name),
            advisor_id: Set(req.advisor_id),
            name_caller_id: Set(req.name_caller_id),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建班级失败", e))?;
        let group = class_groups::Entity::find_by_id(result.class_group_id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询年级失败", e))?;
        Ok(result.into_section(group))
    }

    async fn get_section(&self, id: i64) -> Result<Option<Section>> {
        let result = sections::Entity::find_by_id(id)
            .find_also_related(class_groups::Entity)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询班级失败", e))?;
        Ok(result.map(|(section, group)| section.into_section(group)))
    }

    async fn list_sections(&self, class_group_id: Option<i64>) -> Result<Vec<Section>> {
        let mut select = sections::Entity::find().find_also_related(class_groups::Entity);
        if let Some(group_id) = class_group_id {
            select = select.filter(sections::Column::ClassGroupId.eq(group_id));
        }

        let items = select
            .order_by_asc(sections::Column::ClassGroupId)
            .order_by_asc(sections::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询班级列表失败", e))?;
        Ok(items
            .into_iter()
            .map(|(section, group)| section.into_section(group))
            .collect())
    }

    async fn update_section(
        &self,
        id: i64,
        req: UpdateSectionRequest,
    ) -> Result<Option<Section>> {
        let Some(existing) = sections::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询班级失败", e))?
        else {
            return Ok(None);
        };

        let mut model: sections::ActiveModel = existing.into();
        if let Some(class_group_id) = req.class_group_id {
            model.class_group_id = Set(class_group_id);
        }
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(advisor_id) = req.advisor_id {
            model.advisor_id = Set(Some(advisor_id));
        }
        if let Some(name_caller_id) = req.name_caller_id {
            model.name_caller_id = Set(Some(name_caller_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新班级失败", e))?;
        self.get_section(id).await
    }

    async fn delete_section(&self, id: i64) -> Result<bool> {
        let result = sections::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除班级失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 课表 ----------

    async fn create_schedule(&self, req: CreateScheduleRequest) -> Result<Schedule> {
        let model = schedules::ActiveModel {
            section_id: Set(req.section_id),
            subject_id: Set(req.subject_id),
            room_id: Set(req.room_id),
            teacher_id: Set(req.teacher_id),
            day_of_week: Set(req.day_of_week.to_string()),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建课表失败", e))?;
        Ok(result.into_schedule())
    }

    async fn get_schedule(&self, id: i64) -> Result<Option<Schedule>> {
        let result = schedules::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询课表失败", e))?;
        Ok(result.map(|m| m.into_schedule()))
    }

    async fn list_schedules(&self, params: ScheduleListParams) -> Result<Vec<Schedule>> {
        use schedules::Column;

        let mut select = schedules::Entity::find();
        if let Some(section_id) = params.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(teacher_id) = params.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(day) = params.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day.as_str()));
        }

        let mut items: Vec<Schedule> = select
            .order_by_asc(Column::StartTime)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询课表列表失败", e))?
            .into_iter()
            .map(|m| m.into_schedule())
            .collect();

        // 星期按自然顺序排列，数据库中为字符串
        items.sort_by_key(|s| (s.day_of_week, s.start_time));
        Ok(items)
    }

    async fn update_schedule(
        &self,
        id: i64,
        req: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>> {
        let Some(existing) = schedules::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询课表失败", e))?
        else {
            return Ok(None);
        };

        let mut model: schedules::ActiveModel = existing.into();
        if let Some(section_id) = req.section_id {
            model.section_id = Set(section_id);
        }
        if let Some(subject_id) = req.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(room_id) = req.room_id {
            model.room_id = Set(Some(room_id));
        }
        if let Some(teacher_id) = req.teacher_id {
            model.teacher_id = Set(teacher_id);
        }
        if let Some(day) = req.day_of_week {
            model.day_of_week = Set(day.to_string());
        }
        if let Some(start_time) = req.start_time {
            model.start_time = Set(start_time);
        }
        if let Some(end_time) = req.end_time {
            model.end_time = Set(end_time);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新课表失败", e))?;
        Ok(Some(updated.into_schedule()))
    }

    async fn delete_schedule(&self, id: i64) -> Result<bool> {
        let result = schedules::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除课表失败", e))?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;

    #[tokio::test]
    async fn test_duplicate_subject_code_conflicts() {
        let storage = memory_storage().await;
        let req = CreateSubjectRequest {
            name: "Mathematics".to_string(),
            code: "MATH10".to_string(),
            credit_hours: 4,
            department: "Science".to_string(),
            level: "Grade 10".to_string(),
        };

        storage.create_subject(req.clone()).await.unwrap();
        let err = storage.create_subject(req).await.unwrap_err();
        assert_eq!(err.code(), "E010");
    }

    #[tokio::test]
    async fn test_section_carries_class_group_name() {
        let storage = memory_storage().await;
        let group = storage
            .create_class_group(CreateClassGroupRequest {
                name: "Grade 10".to_string(),
                level: "Secondary".to_string(),
                academic_program: "Regular".to_string(),
            })
            .await
            .unwrap();
        let section = storage
            .create_section(CreateSectionRequest {
                class_group_id: group.id,
                name: "A".to_string(),
                advisor_id: None,
                name_caller_id: None,
            })
            .await
            .unwrap();

        assert_eq!(section.display_name(), "Grade 10 - Section A");
        assert_eq!(storage.list_sections(Some(group.id)).await.unwrap().len(), 1);
        assert!(storage.list_sections(Some(group.id + 1)).await.unwrap().is_empty());
    }
}
