//! 用户存储操作

use super::{SeaOrmStorage, accounts};
use crate::entity::users::{Column, Entity as Users};
use crate::errors::{Result, db_error};
use crate::models::{
    PaginationInfo,
    users::{NewUser, User, UserChanges, UserListQuery, UserListResponse},
};
use crate::storage::UserStorage;
use crate::utils::escape_like_pattern;
use async_trait::async_trait;
use sea_orm::{ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};

#[async_trait]
impl UserStorage for SeaOrmStorage {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let model = accounts::insert_user(&self.db, user).await?;
        Ok(model.into_user())
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询用户失败", e))?;

        Ok(result.map(|m| m.into_user()))
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::FirstName.contains(&escaped))
                    .add(Column::LastName.contains(&escaped)),
            );
        }

        // 角色筛选
        if let Some(role) = query.role {
            select = select.filter(Column::Role.eq(role.to_string()));
        }

        // 状态筛选
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询用户总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询用户页数失败", e))?;
        let users = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询用户列表失败", e))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>> {
        let updated = accounts::apply_user_changes(&self.db, id, changes).await?;
        Ok(updated.map(|m| m.into_user()))
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除用户失败", e))?;

        Ok(result.rows_affected > 0)
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| db_error("更新最后登录时间失败", e))?;

        Ok(result.rows_affected > 0)
    }

    async fn count_users(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| db_error("统计用户数量失败", e))
    }

    async fn national_id_exists(
        &self,
        national_id: &str,
        exclude_user: Option<i64>,
    ) -> Result<bool> {
        let mut select = Users::find().filter(Column::NationalId.eq(national_id));
        if let Some(id) = exclude_user {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select
            .count(&self.db)
            .await
            .map_err(|e| db_error("查询身份证号失败", e))?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::users::UserRole;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: None,
            password_hash: "hash".to_string(),
            role: UserRole::Student,
            first_name: "Abebe".to_string(),
            last_name: "Kebede".to_string(),
            national_id: None,
        }
    }

    #[tokio::test]
    async fn test_username_collision_gets_numeric_suffix() {
        let storage = memory_storage().await;

        let first = storage.create_user(new_user("abebe0042")).await.unwrap();
        let second = storage.create_user(new_user("abebe0042")).await.unwrap();
        let third = storage.create_user(new_user("abebe0042")).await.unwrap();

        assert_eq!(first.username, "abebe0042");
        assert_eq!(second.username, "abebe00421");
        assert_eq!(third.username, "abebe00422");
    }

    #[tokio::test]
    async fn test_rename_keeps_own_username() {
        let storage = memory_storage().await;
        let user = storage.create_user(new_user("sara23344")).await.unwrap();

        let changes = UserChanges {
            username: Some("sara23344".to_string()),
            ..Default::default()
        };
        let updated = storage.update_user(user.id, changes).await.unwrap().unwrap();
        assert_eq!(updated.username, "sara23344");
    }

    #[tokio::test]
    async fn test_login_lookup_by_email() {
        let storage = memory_storage().await;
        let mut user = new_user("hana56677");
        user.email = Some("hana@wereda.et".to_string());
        storage.create_user(user).await.unwrap();

        let found = storage
            .get_user_by_username_or_email("hana@wereda.et")
            .await
            .unwrap();
        assert_eq!(found.map(|u| u.username).as_deref(), Some("hana56677"));
        assert_eq!(storage.count_users().await.unwrap(), 1);
    }
}
