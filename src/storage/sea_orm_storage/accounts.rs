//! 账号写入的公共步骤
//!
//! 供学生、职员、教师与行政注册在同一事务内复用：
//! 顺序编号生成、用户名查重、用户行写入与更新。

use std::collections::HashSet;

use crate::entity::{
    staff_profiles, student_profiles, teachers,
    users::{self, ActiveModel, Column, Entity as Users},
};
use crate::errors::{Result, db_error};
use crate::models::users::{NewUser, UserChanges, UserStatus};
use crate::utils::accounts::{
    STAFF_ID_PREFIX, STUDENT_ID_PREFIX, TEACHER_ID_PREFIX, next_sequential_id,
    pick_available_username,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// 候选用户名重名时依次追加数字，`exclude` 为正在更新的用户自身
pub(super) async fn resolve_username<C: ConnectionTrait>(
    conn: &C,
    base: &str,
    exclude: Option<i64>,
) -> Result<String> {
    let mut select = Users::find()
        .select_only()
        .column(Column::Username)
        .filter(Column::Username.starts_with(base));
    if let Some(id) = exclude {
        select = select.filter(Column::Id.ne(id));
    }

    let taken: HashSet<String> = select
        .into_tuple::<String>()
        .all(conn)
        .await
        .map_err(|e| db_error("查询用户名失败", e))?
        .into_iter()
        .collect();

    Ok(pick_available_username(base, &taken))
}

/// 写入用户行，用户名经过查重
pub(super) async fn insert_user<C: ConnectionTrait>(
    conn: &C,
    user: NewUser,
) -> Result<users::Model> {
    let username = resolve_username(conn, &user.username, None).await?;
    let now = chrono::Utc::now().timestamp();

    let model = ActiveModel {
        username: Set(username),
        email: Set(user.email),
        password_hash: Set(user.password_hash),
        role: Set(user.role.to_string()),
        status: Set(UserStatus::Active.to_string()),
        first_name: Set(user.first_name),
        last_name: Set(user.last_name),
        national_id: Set(user.national_id),
        profile_photo: Set(None),
        last_login: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    model
        .insert(conn)
        .await
        .map_err(|e| db_error("创建用户失败", e))
}

/// 按变更更新用户行，用户不存在时返回 `None`
pub(super) async fn apply_user_changes<C: ConnectionTrait>(
    conn: &C,
    id: i64,
    changes: UserChanges,
) -> Result<Option<users::Model>> {
    let Some(existing) = Users::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| db_error("查询用户失败", e))?
    else {
        return Ok(None);
    };

    if changes.is_empty() {
        return Ok(Some(existing));
    }

    let mut model: ActiveModel = existing.into();
    model.updated_at = Set(chrono::Utc::now().timestamp());

    if let Some(base) = changes.username {
        model.username = Set(resolve_username(conn, &base, Some(id)).await?);
    }
    if let Some(email) = changes.email {
        // 空字符串表示清除邮箱
        model.email = Set(Some(email).filter(|e| !e.trim().is_empty()));
    }
    if let Some(password_hash) = changes.password_hash {
        model.password_hash = Set(password_hash);
    }
    if let Some(role) = changes.role {
        model.role = Set(role.to_string());
    }
    if let Some(status) = changes.status {
        model.status = Set(status.to_string());
    }
    if let Some(first_name) = changes.first_name {
        model.first_name = Set(first_name);
    }
    if let Some(last_name) = changes.last_name {
        model.last_name = Set(last_name);
    }
    if let Some(national_id) = changes.national_id {
        model.national_id = Set(Some(national_id));
    }
    if let Some(profile_photo) = changes.profile_photo {
        model.profile_photo = Set(Some(profile_photo));
    }

    let updated = model
        .update(conn)
        .await
        .map_err(|e| db_error("更新用户失败", e))?;
    Ok(Some(updated))
}

/// 下一个学号（STUD####）
pub(super) async fn next_student_id<C: ConnectionTrait>(conn: &C) -> Result<String> {
    let last = student_profiles::Entity::find()
        .select_only()
        .column(student_profiles::Column::StudentId)
        .filter(student_profiles::Column::StudentId.starts_with(STUDENT_ID_PREFIX))
        .order_by_desc(student_profiles::Column::Id)
        .into_tuple::<Option<String>>()
        .one(conn)
        .await
        .map_err(|e| db_error("查询最新学号失败", e))?
        .flatten();

    Ok(next_sequential_id(STUDENT_ID_PREFIX, last.as_deref()))
}

/// 下一个职员编号（STF####）
pub(super) async fn next_staff_id<C: ConnectionTrait>(conn: &C) -> Result<String> {
    let last = staff_profiles::Entity::find()
        .select_only()
        .column(staff_profiles::Column::StaffId)
        .filter(staff_profiles::Column::StaffId.starts_with(STAFF_ID_PREFIX))
        .order_by_desc(staff_profiles::Column::Id)
        .into_tuple::<Option<String>>()
        .one(conn)
        .await
        .map_err(|e| db_error("查询最新职员编号失败", e))?
        .flatten();

    Ok(next_sequential_id(STAFF_ID_PREFIX, last.as_deref()))
}

/// 下一个教师工号（T####）
pub(super) async fn next_employee_id<C: ConnectionTrait>(conn: &C) -> Result<String> {
    let last = teachers::Entity::find()
        .select_only()
        .column(teachers::Column::EmployeeId)
        .filter(teachers::Column::EmployeeId.starts_with(TEACHER_ID_PREFIX))
        .order_by_desc(teachers::Column::Id)
        .into_tuple::<String>()
        .one(conn)
        .await
        .map_err(|e| db_error("查询最新教师工号失败", e))?;

    Ok(next_sequential_id(TEACHER_ID_PREFIX, last.as_deref()))
}
