//! 学生档案存储操作

use super::{SeaOrmStorage, accounts};
use crate::entity::{
    student_profiles::{ActiveModel, Column, Entity as StudentProfiles, Model},
    users::{self, Entity as Users},
};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    students::{
        NewStudentProfile, Student, StudentListQuery, StudentListResponse, StudentProfileChanges,
    },
    users::{NewUser, UserChanges},
};
use crate::storage::StudentStorage;
use crate::utils::{accounts::student_username, escape_like_pattern};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 档案与账号合并，账号缺失视为数据不一致
fn join_student(profile: Model, user: Option<users::Model>) -> Result<Student> {
    let user = user.ok_or_else(|| {
        SchoolError::database_operation(format!("学生档案 {} 缺少关联用户", profile.id))
    })?;
    Ok(profile.into_student(user))
}

async fn find_student<C: ConnectionTrait>(
    conn: &C,
    filter: Condition,
) -> Result<Option<Student>> {
    let found = StudentProfiles::find()
        .find_also_related(Users)
        .filter(filter)
        .one(conn)
        .await
        .map_err(|e| db_error("查询学生失败", e))?;

    found.map(|(profile, user)| join_student(profile, user)).transpose()
}

#[async_trait]
impl StudentStorage for SeaOrmStorage {
    /// 学号为空时生成下一个编号；用户名总是由名字与学号推导
    async fn create_student(&self, mut user: NewUser, profile: NewStudentProfile) -> Result<Student> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let student_id = match profile.student_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => id,
            None => accounts::next_student_id(&txn).await?,
        };
        user.username = student_username(&user.first_name, &student_id);

        let user_model = accounts::insert_user(&txn, user).await?;

        let model = ActiveModel {
            user_id: Set(user_model.id),
            admission_no: Set(profile.admission_no),
            student_id: Set(Some(student_id)),
            department: Set(profile.department),
            year: Set(profile.year),
            class_section: Set(profile.class_section),
            academic_status: Set(profile.academic_status),
            enrollment_date: Set(profile.enrollment_date),
            gender: Set(profile.gender),
            dob: Set(profile.dob),
            phone: Set(profile.phone),
            address: Set(profile.address),
            blood_group: Set(profile.blood_group),
            medical_condition: Set(profile.medical_condition),
            extra_activities: Set(profile.extra_activities),
            remarks: Set(profile.remarks),
            father_name: Set(profile.father_name),
            mother_name: Set(profile.mother_name),
            guardian_contact: Set(profile.guardian_contact),
            guardian_email: Set(profile.guardian_email),
            guardian_relation: Set(profile.guardian_relation),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let profile_model = model
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建学生档案失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(profile_model.into_student(user_model))
    }

    async fn get_student(&self, id: i64) -> Result<Option<Student>> {
        find_student(&self.db, Condition::all().add(Column::Id.eq(id))).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        find_student(&self.db, Condition::all().add(Column::UserId.eq(user_id))).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let mut select = StudentProfiles::find().find_also_related(Users);

        // 姓名、入学号、学号模糊搜索
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(users::Column::FirstName.contains(&escaped))
                    .add(users::Column::LastName.contains(&escaped))
                    .add(Column::AdmissionNo.contains(&escaped))
                    .add(Column::StudentId.contains(&escaped)),
            );
        }
        if let Some(ref class_section) = query.class_section {
            select = select.filter(Column::ClassSection.eq(class_section.as_str()));
        }
        if let Some(ref status) = query.academic_status {
            select = select.filter(Column::AcademicStatus.eq(status.as_str()));
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
            .map_err(|e| db_error("查询学生总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询学生页数失败", e))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询学生列表失败", e))?;

        Ok(StudentListResponse {
            items: rows
                .into_iter()
                .map(|(profile, user)| join_student(profile, user))
                .collect::<Result<Vec<_>>>()?,
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn list_all_students(&self) -> Result<Vec<Student>> {
        StudentProfiles::find()
            .find_also_related(Users)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("导出学生失败", e))?
            .into_iter()
            .map(|(profile, user)| join_student(profile, user))
            .collect()
    }

    async fn update_student(
        &self,
        id: i64,
        user: UserChanges,
        changes: StudentProfileChanges,
    ) -> Result<Option<Student>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let Some(existing) = StudentProfiles::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询学生失败", e))?
        else {
            return Ok(None);
        };

        let user_model = accounts::apply_user_changes(&txn, existing.user_id, user)
            .await?
            .ok_or_else(|| SchoolError::not_found(format!("User of student {id} not found")))?;

        let unchanged = existing.clone();
        let mut model: ActiveModel = existing.into();
        if let Some(v) = changes.admission_no {
            model.admission_no = Set(v);
        }
        if let Some(v) = changes.student_id {
            model.student_id = Set(Some(v));
        }
        if let Some(v) = changes.class_section {
            model.class_section = Set(v);
        }
        if let Some(v) = changes.department {
            model.department = Set(Some(v));
        }
        if let Some(v) = changes.year {
            model.year = Set(Some(v));
        }
        if let Some(v) = changes.academic_status {
            model.academic_status = Set(v);
        }
        if let Some(v) = changes.enrollment_date {
            model.enrollment_date = Set(v);
        }
        if let Some(v) = changes.gender {
            model.gender = Set(Some(v));
        }
        if let Some(v) = changes.dob {
            model.dob = Set(v);
        }
        if let Some(v) = changes.phone {
            model.phone = Set(Some(v));
        }
        if let Some(v) = changes.address {
            model.address = Set(Some(v));
        }
        if let Some(v) = changes.blood_group {
            model.blood_group = Set(Some(v));
        }
        if let Some(v) = changes.medical_condition {
            model.medical_condition = Set(Some(v));
        }
        if let Some(v) = changes.extra_activities {
            model.extra_activities = Set(Some(v));
        }
        if let Some(v) = changes.remarks {
            model.remarks = Set(Some(v));
        }
        if let Some(v) = changes.father_name {
            model.father_name = Set(Some(v));
        }
        if let Some(v) = changes.mother_name {
            model.mother_name = Set(Some(v));
        }
        if let Some(v) = changes.guardian_contact {
            model.guardian_contact = Set(Some(v));
        }
        if let Some(v) = changes.guardian_email {
            model.guardian_email = Set(Some(v));
        }
        if let Some(v) = changes.guardian_relation {
            model.guardian_relation = Set(Some(v));
        }

        let profile_model = if model.is_changed() {
            model
                .update(&txn)
                .await
                .map_err(|e| db_error("更新学生档案失败", e))?
        } else {
            unchanged
        };

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(Some(profile_model.into_student(user_model)))
    }

    /// 删除账号，档案随外键级联删除
    async fn delete_student(&self, id: i64) -> Result<bool> {
        let Some(profile) = StudentProfiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询学生失败", e))?
        else {
            return Ok(false);
        };

        let result = Users::delete_by_id(profile.user_id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除学生失败", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::students::DEFAULT_ACADEMIC_STATUS;
    use crate::models::users::UserRole;

    fn account(first_name: &str) -> NewUser {
        NewUser {
            username: String::new(),
            email: None,
            password_hash: "hash".to_string(),
            role: UserRole::Student,
            first_name: first_name.to_string(),
            last_name: "Kebede".to_string(),
            national_id: None,
        }
    }

    fn profile(admission_no: &str) -> NewStudentProfile {
        NewStudentProfile {
            admission_no: admission_no.to_string(),
            class_section: "Grade 10 - Section A".to_string(),
            academic_status: DEFAULT_ACADEMIC_STATUS.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_student_ids_are_sequential() {
        let storage = memory_storage().await;

        let first = storage
            .create_student(account("Abebe"), profile("ADM-1"))
            .await
            .unwrap();
        let second = storage
            .create_student(account("Abebe"), profile("ADM-2"))
            .await
            .unwrap();

        assert_eq!(first.student_id.as_deref(), Some("STUD0001"));
        assert_eq!(first.username, "abebe0001");
        assert_eq!(second.student_id.as_deref(), Some("STUD0002"));
        assert_eq!(second.username, "abebe0002");
    }

    #[tokio::test]
    async fn test_duplicate_admission_number_rolls_back_user() {
        let storage = memory_storage().await;
        storage
            .create_student(account("Abebe"), profile("ADM-1"))
            .await
            .unwrap();

        let err = storage
            .create_student(account("Almaz"), profile("ADM-1"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E010");

        use crate::storage::UserStorage;
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_student_removes_account() {
        let storage = memory_storage().await;
        let student = storage
            .create_student(account("Abebe"), profile("ADM-1"))
            .await
            .unwrap();

        assert!(storage.delete_student(student.id).await.unwrap());
        assert!(storage.get_student(student.id).await.unwrap().is_none());
        assert!(!storage.delete_student(student.id).await.unwrap());
    }
}
