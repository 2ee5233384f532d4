//! 职员档案存储操作

use super::{SeaOrmStorage, accounts};
use crate::entity::{
    staff_profiles::{ActiveModel, Column, Entity as StaffProfiles, Model},
    users::{self, Entity as Users},
};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    staff::{NewStaffProfile, StaffListQuery, StaffListResponse, StaffMember, StaffProfileChanges},
    users::{NewUser, UserChanges},
};
use crate::storage::StaffStorage;
use crate::utils::escape_like_pattern;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

fn join_staff(profile: Model, user: Option<users::Model>) -> Result<StaffMember> {
    let user = user.ok_or_else(|| {
        SchoolError::database_operation(format!("职员档案 {} 缺少关联用户", profile.id))
    })?;
    Ok(profile.into_staff(user))
}

/// 写入职员档案，编号为空时生成下一个 `STF` 编号
pub(super) async fn insert_staff_profile<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    profile: NewStaffProfile,
) -> Result<Model> {
    let staff_id = match profile.staff_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => id,
        None => accounts::next_staff_id(conn).await?,
    };

    let model = ActiveModel {
        user_id: Set(user_id),
        staff_id: Set(Some(staff_id)),
        department: Set(profile.department),
        subject: Set(profile.subject),
        hire_date: Set(profile.hire_date),
        salary: Set(profile.salary),
        qualifications: Set(profile.qualifications),
        status: Set(profile.status.to_string()),
        address: Set(profile.address),
        emergency_contact: Set(profile.emergency_contact),
        notes: Set(profile.notes),
        phone: Set(profile.phone),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    model
        .insert(conn)
        .await
        .map_err(|e| db_error("创建职员档案失败", e))
}

#[async_trait]
impl StaffStorage for SeaOrmStorage {
    async fn create_staff(&self, user: NewUser, profile: NewStaffProfile) -> Result<StaffMember> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let user_model = accounts::insert_user(&txn, user).await?;
        let profile_model = insert_staff_profile(&txn, user_model.id, profile).await?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(profile_model.into_staff(user_model))
    }

    async fn get_staff(&self, id: i64) -> Result<Option<StaffMember>> {
        let found = StaffProfiles::find_by_id(id)
            .find_also_related(Users)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询职员失败", e))?;

        found.map(|(profile, user)| join_staff(profile, user)).transpose()
    }

    async fn get_staff_by_user_id(&self, user_id: i64) -> Result<Option<StaffMember>> {
        let found = StaffProfiles::find()
            .find_also_related(Users)
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询职员失败", e))?;

        found.map(|(profile, user)| join_staff(profile, user)).transpose()
    }

    async fn list_staff_with_pagination(&self, query: StaffListQuery) -> Result<StaffListResponse> {
        let mut select = StaffProfiles::find().find_also_related(Users);

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(users::Column::FirstName.contains(&escaped))
                    .add(users::Column::LastName.contains(&escaped))
                    .add(users::Column::Username.contains(&escaped))
                    .add(Column::StaffId.contains(&escaped)),
            );
        }
        if let Some(ref department) = query.department {
            select = select.filter(Column::Department.eq(department.as_str()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }

        let paginator = select
            .order_by_desc(Column::Id)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询职员总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询职员页数失败", e))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询职员列表失败", e))?;

        Ok(StaffListResponse {
            items: rows
                .into_iter()
                .map(|(profile, user)| join_staff(profile, user))
                .collect::<Result<Vec<_>>>()?,
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn update_staff(
        &self,
        id: i64,
        user: UserChanges,
        changes: StaffProfileChanges,
    ) -> Result<Option<StaffMember>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let Some(existing) = StaffProfiles::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询职员失败", e))?
        else {
            return Ok(None);
        };

        let user_model = accounts::apply_user_changes(&txn, existing.user_id, user)
            .await?
            .ok_or_else(|| SchoolError::not_found(format!("User of staff member {id} not found")))?;

        let unchanged = existing.clone();
        let mut model: ActiveModel = existing.into();
        if let Some(v) = changes.staff_id {
            model.staff_id = Set(Some(v));
        }
        if let Some(v) = changes.department {
            model.department = Set(v);
        }
        if let Some(v) = changes.subject {
            model.subject = Set(Some(v));
        }
        if let Some(v) = changes.hire_date {
            model.hire_date = Set(v);
        }
        if let Some(v) = changes.salary {
            model.salary = Set(Some(v));
        }
        if let Some(v) = changes.qualifications {
            model.qualifications = Set(Some(v));
        }
        if let Some(v) = changes.status {
            model.status = Set(v.to_string());
        }
        if let Some(v) = changes.address {
            model.address = Set(Some(v));
        }
        if let Some(v) = changes.emergency_contact {
            model.emergency_contact = Set(Some(v));
        }
        if let Some(v) = changes.notes {
            model.notes = Set(Some(v));
        }
        if let Some(v) = changes.phone {
            model.phone = Set(Some(v));
        }

        let profile_model = if model.is_changed() {
            model
                .update(&txn)
                .await
                .map_err(|e| db_error("更新职员档案失败", e))?
        } else {
            unchanged
        };

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(Some(profile_model.into_staff(user_model)))
    }

    async fn delete_staff(&self, id: i64) -> Result<bool> {
        let Some(profile) = StaffProfiles::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询职员失败", e))?
        else {
            return Ok(false);
        };

        let result = Users::delete_by_id(profile.user_id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除职员失败", e))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::staff::StaffStatus;
    use crate::models::users::UserRole;

    fn account(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: None,
            password_hash: "hash".to_string(),
            role: UserRole::Librarian,
            first_name: "Tigist".to_string(),
            last_name: "Alemu".to_string(),
            national_id: None,
        }
    }

    #[tokio::test]
    async fn test_staff_ids_are_generated_in_sequence() {
        let storage = memory_storage().await;

        let first = storage
            .create_staff(
                account("tigist0911"),
                NewStaffProfile::for_department("Library", Some("0911000000".into())),
            )
            .await
            .unwrap();
        let second = storage
            .create_staff(
                account("tigist0911"),
                NewStaffProfile::for_department("Library", None),
            )
            .await
            .unwrap();

        assert_eq!(first.staff_id.as_deref(), Some("STF0001"));
        assert_eq!(second.staff_id.as_deref(), Some("STF0002"));
        assert_eq!(second.username, "tigist09111");
        assert_eq!(first.status, StaffStatus::Active);
    }

    #[tokio::test]
    async fn test_update_staff_status() {
        let storage = memory_storage().await;
        let staff = storage
            .create_staff(
                account("tigist0911"),
                NewStaffProfile::for_department("Library", None),
            )
            .await
            .unwrap();

        let changes = StaffProfileChanges {
            status: Some(StaffStatus::OnLeave),
            ..Default::default()
        };
        let updated = storage
            .update_staff(staff.id, UserChanges::default(), changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.status, StaffStatus::OnLeave);
        assert!(storage.update_staff(9999, UserChanges::default(), StaffProfileChanges::default())
            .await
            .unwrap()
            .is_none());
    }
}
