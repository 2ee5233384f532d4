//! 成绩与考勤存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::{attendance, grades, subjects, users};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::records::{
    AttendanceFilter, AttendanceRecord, Grade, GradeFilter, NewAttendance, NewGrade,
    UpdateAttendanceRequest, UpdateGradeRequest,
};
use crate::storage::RecordStorage;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

/// 学生姓名与课程名称查找表
struct NameLookup {
    students: HashMap<i64, String>,
    subjects: HashMap<i64, String>,
}

impl NameLookup {
    async fn load<C: ConnectionTrait>(
        conn: &C,
        student_ids: HashSet<i64>,
        subject_ids: HashSet<i64>,
    ) -> Result<Self> {
        let students = if student_ids.is_empty() {
            HashMap::new()
        } else {
            users::Entity::find()
                .filter(users::Column::Id.is_in(student_ids))
                .all(conn)
                .await
                .map_err(|e| db_error("查询学生姓名失败", e))?
                .into_iter()
                .map(|u| (u.id, u.full_name()))
                .collect()
        };

        let subjects = if subject_ids.is_empty() {
            HashMap::new()
        } else {
            subjects::Entity::find()
                .filter(subjects::Column::Id.is_in(subject_ids))
                .all(conn)
                .await
                .map_err(|e| db_error("查询课程名称失败", e))?
                .into_iter()
                .map(|s| (s.id, s.name))
                .collect()
        };

        Ok(Self { students, subjects })
    }

    fn student(&self, id: i64) -> Option<String> {
        self.students.get(&id).cloned()
    }

    fn subject(&self, id: Option<i64>) -> Option<String> {
        id.and_then(|id| self.subjects.get(&id).cloned())
    }
}

impl SeaOrmStorage {
    async fn grades_with_names(&self, models: Vec<grades::Model>) -> Result<Vec<Grade>> {
        let lookup = NameLookup::load(
            &self.db,
            models.iter().map(|g| g.student_id).collect(),
            models.iter().map(|g| g.subject_id).collect(),
        )
        .await?;

        Ok(models
            .into_iter()
            .map(|g| {
                let student = lookup.student(g.student_id);
                let subject = lookup.subject(Some(g.subject_id));
                g.into_grade(student, subject)
            })
            .collect())
    }

    async fn attendance_with_names(
        &self,
        models: Vec<attendance::Model>,
    ) -> Result<Vec<AttendanceRecord>> {
        let lookup = NameLookup::load(
            &self.db,
            models.iter().map(|a| a.student_id).collect(),
            models.iter().filter_map(|a| a.subject_id).collect(),
        )
        .await?;

        Ok(models
            .into_iter()
            .map(|a| {
                let student = lookup.student(a.student_id);
                let subject = lookup.subject(a.subject_id);
                a.into_attendance(student, subject)
            })
            .collect())
    }
}

#[async_trait]
impl RecordStorage for SeaOrmStorage {
    // ---------- 成绩 ----------

    async fn create_grade(&self, grade: NewGrade) -> Result<Grade> {
        let model = grades::ActiveModel {
            student_id: Set(grade.student_id),
            subject_id: Set(grade.subject_id),
            section_id: Set(grade.section_id),
            teacher_id: Set(grade.teacher_id),
            semester_id: Set(grade.semester_id),
            academic_year: Set(grade.academic_year),
            grade_type: Set(grade.grade_type.to_string()),
            score: Set(grade.score),
            full_mark: Set(grade.full_mark),
            date_recorded: Set(grade.date_recorded),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match db_error("录入成绩失败", e) {
            SchoolError::Conflict(_) => SchoolError::conflict(
                "Grade already exists for this student, subject, semester and grade type",
            ),
            other => other,
        })?;

        let mut items = self.grades_with_names(vec![result]).await?;
        items
            .pop()
            .ok_or_else(|| SchoolError::database_operation("录入成绩后读取失败"))
    }

    async fn get_grade(&self, id: i64) -> Result<Option<Grade>> {
        let Some(model) = grades::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询成绩失败", e))?
        else {
            return Ok(None);
        };

        Ok(self.grades_with_names(vec![model]).await?.pop())
    }

    async fn list_grades(&self, filter: GradeFilter) -> Result<Vec<Grade>> {
        use grades::Column;

        let mut select = grades::Entity::find();
        if let Some(teacher_id) = filter.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(student_id) = filter.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = filter.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(section_id) = filter.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(semester_id) = filter.semester_id {
            select = select.filter(Column::SemesterId.eq(semester_id));
        }
        if let Some(grade_type) = filter.grade_type {
            select = select.filter(Column::GradeType.eq(grade_type.as_str()));
        }
        if let Some(from) = filter.date_from {
            select = select.filter(Column::DateRecorded.gte(from));
        }
        if let Some(to) = filter.date_to {
            select = select.filter(Column::DateRecorded.lte(to));
        }

        let models = select
            .order_by_desc(Column::DateRecorded)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询成绩列表失败", e))?;

        self.grades_with_names(models).await
    }

    async fn update_grade(&self, id: i64, req: UpdateGradeRequest) -> Result<Option<Grade>> {
        let Some(existing) = grades::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询成绩失败", e))?
        else {
            return Ok(None);
        };

        let mut model: grades::ActiveModel = existing.into();
        if let Some(score) = req.score {
            model.score = Set(score);
        }
        if let Some(full_mark) = req.full_mark {
            model.full_mark = Set(full_mark);
        }
        if let Some(grade_type) = req.grade_type {
            model.grade_type = Set(grade_type.to_string());
        }
        if let Some(academic_year) = req.academic_year {
            model.academic_year = Set(academic_year);
        }
        if let Some(date_recorded) = req.date_recorded {
            model.date_recorded = Set(date_recorded);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新成绩失败", e))?;
        Ok(self.grades_with_names(vec![updated]).await?.pop())
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        let result = grades::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除成绩失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 考勤 ----------

    async fn create_attendance(&self, record: NewAttendance) -> Result<AttendanceRecord> {
        use attendance::Column;

        // 唯一索引不约束 NULL 课程，按班级记录的考勤需手动查重
        if record.subject_id.is_none() {
            let existing = attendance::Entity::find()
                .filter(Column::StudentId.eq(record.student_id))
                .filter(Column::SectionId.eq(record.section_id))
                .filter(Column::SubjectId.is_null())
                .filter(Column::Date.eq(record.date))
                .count(&self.db)
                .await
                .map_err(|e| db_error("查询考勤失败", e))?;
            if existing > 0 {
                return Err(SchoolError::conflict(
                    "Attendance already recorded for this student on this date",
                ));
            }
        }

        let model = attendance::ActiveModel {
            student_id: Set(record.student_id),
            section_id: Set(record.section_id),
            subject_id: Set(record.subject_id),
            date: Set(record.date),
            status: Set(record.status.to_string()),
            taken_by: Set(record.taken_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match db_error("记录考勤失败", e) {
            SchoolError::Conflict(_) => SchoolError::conflict(
                "Attendance already recorded for this student on this date",
            ),
            other => other,
        })?;

        let mut items = self.attendance_with_names(vec![result]).await?;
        items
            .pop()
            .ok_or_else(|| SchoolError::database_operation("记录考勤后读取失败"))
    }

    async fn get_attendance(&self, id: i64) -> Result<Option<AttendanceRecord>> {
        let Some(model) = attendance::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询考勤失败", e))?
        else {
            return Ok(None);
        };

        Ok(self.attendance_with_names(vec![model]).await?.pop())
    }

    async fn list_attendance(&self, filter: AttendanceFilter) -> Result<Vec<AttendanceRecord>> {
        use attendance::Column;

        let mut select = attendance::Entity::find();
        if let Some(taken_by) = filter.taken_by {
            select = select.filter(Column::TakenBy.eq(taken_by));
        }
        if let Some(student_id) = filter.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(subject_id) = filter.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(section_id) = filter.section_id {
            select = select.filter(Column::SectionId.eq(section_id));
        }
        if let Some(status) = filter.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(from) = filter.date_from {
            select = select.filter(Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            select = select.filter(Column::Date.lte(to));
        }

        let models = select
            .order_by_desc(Column::Date)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询考勤列表失败", e))?;

        self.attendance_with_names(models).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>> {
        let Some(existing) = attendance::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询考勤失败", e))?
        else {
            return Ok(None);
        };

        let mut model: attendance::ActiveModel = existing.into();
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }
        if let Some(date) = req.date {
            model.date = Set(date);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新考勤失败", e))?;
        Ok(self.attendance_with_names(vec![updated]).await?.pop())
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        let result = attendance::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除考勤失败", e))?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::academics::{
        CreateClassGroupRequest, CreateSectionRequest, CreateSemesterRequest,
        CreateSubjectRequest,
    };
    use crate::models::records::{AttendanceStatus, GradeType};
    use crate::models::users::{NewUser, UserRole};
    use crate::storage::{AcademicStorage, UserStorage};
    use chrono::NaiveDate;

    struct Fixture {
        student: i64,
        subject: i64,
        section: i64,
        semester: i64,
    }

    async fn fixture(storage: &SeaOrmStorage) -> Fixture {
        let student = storage
            .create_user(NewUser {
                username: "meron0001".to_string(),
                email: None,
                password_hash: "hash".to_string(),
                role: UserRole::Student,
                first_name: "Meron".to_string(),
                last_name: "Tesfaye".to_string(),
                national_id: None,
            })
            .await
            .unwrap();
        let subject = storage
            .create_subject(CreateSubjectRequest {
                name: "Biology".to_string(),
                code: "BIO10".to_string(),
                credit_hours: 3,
                department: "Science".to_string(),
                level: "Grade 10".to_string(),
            })
            .await
            .unwrap();
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
                name: "B".to_string(),
                advisor_id: None,
                name_caller_id: None,
            })
            .await
            .unwrap();
        let semester = storage
            .create_semester(CreateSemesterRequest {
                name: "Semester 1".to_string(),
                academic_year: "2025/26".to_string(),
                start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                end_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            })
            .await
            .unwrap();

        Fixture {
            student: student.id,
            subject: subject.id,
            section: section.id,
            semester: semester.id,
        }
    }

    fn grade(f: &Fixture, grade_type: GradeType, score: f64) -> NewGrade {
        NewGrade {
            student_id: f.student,
            subject_id: f.subject,
            section_id: f.section,
            teacher_id: None,
            semester_id: f.semester,
            academic_year: "2025/26".to_string(),
            grade_type,
            score,
            full_mark: 100.0,
            date_recorded: NaiveDate::from_ymd_opt(2025, 10, 10).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_grade_uniqueness() {
        let storage = memory_storage().await;
        let f = fixture(&storage).await;

        let first = storage
            .create_grade(grade(&f, GradeType::Midterm, 78.0))
            .await
            .unwrap();
        assert_eq!(first.student_name.as_deref(), Some("Meron Tesfaye"));
        assert_eq!(first.subject_name.as_deref(), Some("Biology"));
        assert_eq!(first.percentage, 78.0);

        let err = storage
            .create_grade(grade(&f, GradeType::Midterm, 90.0))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");

        // 不同类型可以共存
        storage
            .create_grade(grade(&f, GradeType::Final, 88.0))
            .await
            .unwrap();
        let all = storage
            .list_grades(GradeFilter {
                student_id: Some(f.student),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_section_attendance_without_subject_conflicts() {
        let storage = memory_storage().await;
        let f = fixture(&storage).await;
        let record = NewAttendance {
            student_id: f.student,
            section_id: f.section,
            subject_id: None,
            date: NaiveDate::from_ymd_opt(2025, 10, 13).unwrap(),
            status: AttendanceStatus::Present,
            taken_by: None,
        };

        storage.create_attendance(record.clone()).await.unwrap();
        let err = storage.create_attendance(record).await.unwrap_err();
        assert_eq!(err.code(), "E010");
    }
}
