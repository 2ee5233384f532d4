//! 教师档案存储操作

use std::collections::{BTreeSet, HashMap};

use super::{SeaOrmStorage, accounts};
use crate::entity::{
    subjects::{self, Entity as Subjects},
    teacher_subjects::{self, Entity as TeacherSubjects},
    teachers::{ActiveModel, Column, Entity as Teachers, Model},
    users::{self, Entity as Users},
};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    teachers::{
        NewTeacherProfile, Teacher, TeacherListQuery, TeacherListResponse, TeacherProfileChanges,
    },
    users::{NewUser, UserChanges},
};
use crate::storage::TeacherStorage;
use crate::utils::escape_like_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 整体替换教师的授课科目，未知科目返回 Validation
async fn replace_subjects<C: ConnectionTrait>(
    conn: &C,
    teacher_id: i64,
    subject_ids: &[i64],
) -> Result<()> {
    let wanted: BTreeSet<i64> = subject_ids.iter().copied().collect();

    if !wanted.is_empty() {
        let found = Subjects::find()
            .filter(subjects::Column::Id.is_in(wanted.iter().copied()))
            .count(conn)
            .await
            .map_err(|e| db_error("查询课程失败", e))?;
        if found != wanted.len() as u64 {
            return Err(SchoolError::validation("One or more subjects do not exist"));
        }
    }

    TeacherSubjects::delete_many()
        .filter(teacher_subjects::Column::TeacherId.eq(teacher_id))
        .exec(conn)
        .await
        .map_err(|e| db_error("清除授课科目失败", e))?;

    if wanted.is_empty() {
        return Ok(());
    }

    let links = wanted.into_iter().map(|subject_id| teacher_subjects::ActiveModel {
        teacher_id: Set(teacher_id),
        subject_id: Set(subject_id),
        ..Default::default()
    });
    TeacherSubjects::insert_many(links)
        .exec(conn)
        .await
        .map_err(|e| db_error("写入授课科目失败", e))?;

    Ok(())
}

/// 批量读取一组教师的授课科目
async fn subjects_by_teacher<C: ConnectionTrait>(
    conn: &C,
    teacher_ids: &[i64],
) -> Result<HashMap<i64, Vec<subjects::Model>>> {
    let rows = TeacherSubjects::find()
        .find_also_related(Subjects)
        .filter(teacher_subjects::Column::TeacherId.is_in(teacher_ids.iter().copied()))
        .order_by_asc(teacher_subjects::Column::SubjectId)
        .all(conn)
        .await
        .map_err(|e| db_error("查询授课科目失败", e))?;

    let mut grouped: HashMap<i64, Vec<subjects::Model>> = HashMap::new();
    for (link, subject) in rows {
        if let Some(subject) = subject {
            grouped.entry(link.teacher_id).or_default().push(subject);
        }
    }
    Ok(grouped)
}

async fn load_teacher<C: ConnectionTrait>(
    conn: &C,
    teacher: Model,
    user: Option<users::Model>,
) -> Result<Teacher> {
    let user = user.ok_or_else(|| {
        SchoolError::database_operation(format!("教师档案 {} 缺少关联用户", teacher.id))
    })?;
    let subjects = teacher
        .find_related(Subjects)
        .order_by_asc(subjects::Column::Id)
        .all(conn)
        .await
        .map_err(|e| db_error("查询授课科目失败", e))?;
    Ok(teacher.into_teacher(user, subjects))
}

#[async_trait]
impl TeacherStorage for SeaOrmStorage {
    async fn create_teacher(&self, user: NewUser, profile: NewTeacherProfile) -> Result<Teacher> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let employee_id = accounts::next_employee_id(&txn).await?;
        let user_model = accounts::insert_user(&txn, user).await?;

        let model = ActiveModel {
            user_id: Set(user_model.id),
            employee_id: Set(employee_id),
            department: Set(profile.department),
            hire_date: Set(profile.hire_date),
            academic_rank: Set(profile.academic_rank),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        let teacher = model
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建教师档案失败", e))?;

        replace_subjects(&txn, teacher.id, &profile.subjects).await?;
        let result = load_teacher(&txn, teacher, Some(user_model)).await?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(result)
    }

    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>> {
        let found = Teachers::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询教师失败", e))?;

        match found {
            Some((teacher, user)) => Ok(Some(load_teacher(&self.db, teacher, user).await?)),
            None => Ok(None),
        }
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        let found = Teachers::find()
            .find_also_related(Users)
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询教师失败", e))?;

        match found {
            Some((teacher, user)) => Ok(Some(load_teacher(&self.db, teacher, user).await?)),
            None => Ok(None),
        }
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let mut select = Teachers::find().find_also_related(Users);

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(users::Column::FirstName.contains(&escaped))
                    .add(users::Column::LastName.contains(&escaped))
                    .add(Column::EmployeeId.contains(&escaped)),
            );
        }
        if let Some(ref department) = query.department {
            select = select.filter(Column::Department.eq(department.as_str()));
        }

        let paginator = select
            .order_by_desc(Column::Id)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询教师总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询教师页数失败", e))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询教师列表失败", e))?;

        let ids: Vec<i64> = rows.iter().map(|(t, _)| t.id).collect();
        let mut subjects = subjects_by_teacher(&self.db, &ids).await?;

        let mut items = Vec::with_capacity(rows.len());
        for (teacher, user) in rows {
            let user = user.ok_or_else(|| {
                SchoolError::database_operation(format!("教师档案 {} 缺少关联用户", teacher.id))
            })?;
            let taught = subjects.remove(&teacher.id).unwrap_or_default();
            items.push(teacher.into_teacher(user, taught));
        }

        Ok(TeacherListResponse {
            items,
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn update_teacher(
        &self,
        id: i64,
        user: UserChanges,
        changes: TeacherProfileChanges,
    ) -> Result<Option<Teacher>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let Some(existing) = Teachers::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询教师失败", e))?
        else {
            return Ok(None);
        };

        let user_model = accounts::apply_user_changes(&txn, existing.user_id, user)
            .await?
            .ok_or_else(|| SchoolError::not_found(format!("User of teacher {id} not found")))?;

        let unchanged = existing.clone();
        let mut model: ActiveModel = existing.into();
        if let Some(v) = changes.employee_id {
            model.employee_id = Set(v);
        }
        if let Some(v) = changes.department {
            model.department = Set(v);
        }
        if let Some(v) = changes.hire_date {
            model.hire_date = Set(v);
        }
        if let Some(v) = changes.academic_rank {
            model.academic_rank = Set(v);
        }

        let teacher = if model.is_changed() {
            model
                .update(&txn)
                .await
                .map_err(|e| db_error("更新教师档案失败", e))?
        } else {
            unchanged
        };

        if let Some(ref subject_ids) = changes.subjects {
            replace_subjects(&txn, teacher.id, subject_ids).await?;
        }
        let result = load_teacher(&txn, teacher, Some(user_model)).await?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(Some(result))
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        let Some(teacher) = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询教师失败", e))?
        else {
            return Ok(false);
        };

        let result = Users::delete_by_id(teacher.user_id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除教师失败", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::academics::CreateSubjectRequest;
    use crate::models::users::UserRole;
    use crate::storage::AcademicStorage;
    use chrono::NaiveDate;

    fn account() -> NewUser {
        NewUser {
            username: "dawit7788".to_string(),
            email: None,
            password_hash: "hash".to_string(),
            role: UserRole::Teacher,
            first_name: "Dawit".to_string(),
            last_name: "Haile".to_string(),
            national_id: Some("ET-55667788".to_string()),
        }
    }

    fn profile(subjects: Vec<i64>) -> NewTeacherProfile {
        NewTeacherProfile {
            department: "Science".to_string(),
            hire_date: NaiveDate::from_ymd_opt(2020, 9, 1).unwrap(),
            academic_rank: "Lecturer".to_string(),
            subjects,
        }
    }

    async fn subject(storage: &SeaOrmStorage, code: &str) -> i64 {
        storage
            .create_subject(CreateSubjectRequest {
                name: format!("Subject {code}"),
                code: code.to_string(),
                credit_hours: 3,
                department: "Science".to_string(),
                level: "Grade 10".to_string(),
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_teacher_with_subjects() {
        let storage = memory_storage().await;
        let math = subject(&storage, "MATH10").await;
        let phys = subject(&storage, "PHYS10").await;

        let teacher = storage
            .create_teacher(account(), profile(vec![phys, math, math]))
            .await
            .unwrap();

        assert_eq!(teacher.employee_id, "T0001");
        let ids: Vec<i64> = teacher.subjects.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![math, phys]);
    }

    #[tokio::test]
    async fn test_unknown_subject_rolls_back_teacher() {
        let storage = memory_storage().await;

        let err = storage
            .create_teacher(account(), profile(vec![404]))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");

        use crate::storage::UserStorage;
        assert_eq!(storage.count_users().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_update_replaces_subjects() {
        let storage = memory_storage().await;
        let math = subject(&storage, "MATH10").await;
        let chem = subject(&storage, "CHEM10").await;
        let teacher = storage
            .create_teacher(account(), profile(vec![math]))
            .await
            .unwrap();

        let changes = TeacherProfileChanges {
            subjects: Some(vec![chem]),
            ..Default::default()
        };
        let updated = storage
            .update_teacher(teacher.id, UserChanges::default(), changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.subjects.len(), 1);
        assert_eq!(updated.subjects[0].code, "CHEM10");
    }
}
