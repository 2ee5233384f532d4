//! 公告存储操作

use std::collections::HashSet;

use super::SeaOrmStorage;
use crate::entity::{
    announcement_reads,
    announcements::{ActiveModel, Column, Entity as Announcements, Model},
};
use crate::errors::{Result, db_error};
use crate::models::{
    PaginationInfo,
    announcements::{
        Announcement, AnnouncementListQuery, AnnouncementListResponse, NewAnnouncement,
        UpdateAnnouncementRequest,
    },
};
use crate::storage::AnnouncementStorage;
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, QueryTrait, Select, Set, sea_query::OnConflict,
};

/// 受众过滤：为空时不过滤（管理端，含停用公告），否则只保留启用且受众匹配的公告
fn audience_filter(select: Select<Announcements>, audiences: &[String]) -> Select<Announcements> {
    if audiences.is_empty() {
        return select;
    }
    select.filter(
        Condition::all()
            .add(Column::IsActive.eq(true))
            .add(Column::TargetAudience.is_in(audiences.iter().cloned())),
    )
}

impl SeaOrmStorage {
    /// 批量查询某用户已读的公告 ID
    async fn read_ids(&self, user_id: i64, ids: &[i64]) -> Result<HashSet<i64>> {
        if ids.is_empty() {
            return Ok(HashSet::new());
        }
        let read: Vec<i64> = announcement_reads::Entity::find()
            .select_only()
            .column(announcement_reads::Column::AnnouncementId)
            .filter(announcement_reads::Column::UserId.eq(user_id))
            .filter(announcement_reads::Column::AnnouncementId.is_in(ids.iter().copied()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询公告已读记录失败", e))?;
        Ok(read.into_iter().collect())
    }

    async fn with_read_flag(&self, model: Model, reader_id: i64) -> Result<Announcement> {
        let read = self.read_ids(reader_id, &[model.id]).await?;
        let is_read = read.contains(&model.id);
        Ok(model.into_announcement(is_read))
    }
}

#[async_trait]
impl AnnouncementStorage for SeaOrmStorage {
    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement> {
        let now = chrono::Utc::now().timestamp();
        let model = ActiveModel {
            title: Set(announcement.title),
            content: Set(announcement.content),
            announcement_type: Set(announcement.announcement_type.to_string()),
            priority: Set(announcement.priority.to_string()),
            author_id: Set(Some(announcement.author_id)),
            target_audience: Set(announcement.target_audience),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建公告失败", e))?;
        Ok(result.into_announcement(false))
    }

    async fn get_announcement(
        &self,
        id: i64,
        reader_id: i64,
        audiences: &[String],
    ) -> Result<Option<Announcement>> {
        let Some(model) = audience_filter(Announcements::find_by_id(id), audiences)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询公告失败", e))?
        else {
            return Ok(None);
        };
        Ok(Some(self.with_read_flag(model, reader_id).await?))
    }

    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
        reader_id: i64,
    ) -> Result<AnnouncementListResponse> {
        let mut select = audience_filter(Announcements::find(), &query.audiences);
        if let Some(kind) = query.announcement_type {
            select = select.filter(Column::AnnouncementType.eq(kind.as_str()));
        }
        if let Some(priority) = query.priority {
            select = select.filter(Column::Priority.eq(priority.as_str()));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询公告总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询公告页数失败", e))?;
        let models = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询公告列表失败", e))?;

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let read = self.read_ids(reader_id, &ids).await?;

        Ok(AnnouncementListResponse {
            items: models
                .into_iter()
                .map(|m| {
                    let is_read = read.contains(&m.id);
                    m.into_announcement(is_read)
                })
                .collect(),
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn update_announcement(
        &self,
        id: i64,
        req: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>> {
        let Some(existing) = Announcements::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询公告失败", e))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());
        if let Some(title) = req.title {
            model.title = Set(title);
        }
        if let Some(content) = req.content {
            model.content = Set(content);
        }
        if let Some(kind) = req.announcement_type {
            model.announcement_type = Set(kind.to_string());
        }
        if let Some(priority) = req.priority {
            model.priority = Set(priority.to_string());
        }
        if let Some(audience) = req.target_audience {
            model.target_audience = Set(audience);
        }
        if let Some(is_active) = req.is_active {
            model.is_active = Set(is_active);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新公告失败", e))?;
        Ok(Some(updated.into_announcement(false)))
    }

    async fn delete_announcement(&self, id: i64) -> Result<bool> {
        let result = Announcements::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除公告失败", e))?;
        Ok(result.rows_affected > 0)
    }

    async fn mark_announcement_read(
        &self,
        id: i64,
        user_id: i64,
        audiences: &[String],
    ) -> Result<bool> {
        let exists = audience_filter(Announcements::find_by_id(id), audiences)
            .count(&self.db)
            .await
            .map_err(|e| db_error("查询公告失败", e))?;
        if exists == 0 {
            return Ok(false);
        }

        let read = announcement_reads::ActiveModel {
            announcement_id: Set(id),
            user_id: Set(user_id),
            read_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        // 重复标记时忽略
        announcement_reads::Entity::insert(read)
            .on_conflict(
                OnConflict::columns([
                    announcement_reads::Column::AnnouncementId,
                    announcement_reads::Column::UserId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| db_error("标记公告已读失败", e))?;

        Ok(true)
    }

    async fn count_unread_announcements(&self, user_id: i64, audiences: &[String]) -> Result<u64> {
        let read_ids = announcement_reads::Entity::find()
            .select_only()
            .column(announcement_reads::Column::AnnouncementId)
            .filter(announcement_reads::Column::UserId.eq(user_id))
            .into_query();

        audience_filter(Announcements::find(), audiences)
            .filter(Column::Id.not_in_subquery(read_ids))
            .count(&self.db)
            .await
            .map_err(|e| db_error("统计未读公告失败", e))
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::announcements::{
        AnnouncementPriority, AnnouncementType, audiences_for,
    };
    use crate::models::users::{NewUser, UserRole};
    use crate::storage::UserStorage;

    async fn author(storage: &SeaOrmStorage) -> i64 {
        storage
            .create_user(NewUser {
                username: "admin".to_string(),
                email: None,
                password_hash: "hash".to_string(),
                role: UserRole::Admin,
                first_name: "Admin".to_string(),
                last_name: String::new(),
                national_id: None,
            })
            .await
            .unwrap()
            .id
    }

    fn notice(title: &str, author_id: i64, audience: &str) -> NewAnnouncement {
        NewAnnouncement {
            title: title.to_string(),
            content: "Details".to_string(),
            announcement_type: AnnouncementType::Exam,
            priority: AnnouncementPriority::High,
            author_id,
            target_audience: audience.to_string(),
        }
    }

    fn query(audiences: Vec<String>) -> AnnouncementListQuery {
        AnnouncementListQuery {
            page: 1,
            size: 20,
            audiences,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_audience_filter_hides_inactive_and_foreign() {
        let storage = memory_storage().await;
        let author_id = author(&storage).await;

        storage
            .create_announcement(notice("Everyone", author_id, "all"))
            .await
            .unwrap();
        storage
            .create_announcement(notice("Students", author_id, "students"))
            .await
            .unwrap();
        storage
            .create_announcement(notice("Teachers", author_id, "teachers"))
            .await
            .unwrap();
        let archived = storage
            .create_announcement(notice("Archived", author_id, "all"))
            .await
            .unwrap();
        storage
            .update_announcement(
                archived.id,
                UpdateAnnouncementRequest {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let student_view = storage
            .list_announcements_with_pagination(query(audiences_for(UserRole::Student)), author_id)
            .await
            .unwrap();
        let mut titles: Vec<_> = student_view.items.iter().map(|a| a.title.as_str()).collect();
        titles.sort();
        assert_eq!(titles, vec!["Everyone", "Students"]);

        let management = storage
            .list_announcements_with_pagination(query(Vec::new()), author_id)
            .await
            .unwrap();
        assert_eq!(management.pagination.total, 4);
    }

    #[tokio::test]
    async fn test_mark_read_is_idempotent() {
        let storage = memory_storage().await;
        let author_id = author(&storage).await;
        let audiences = audiences_for(UserRole::Admin);

        let first = storage
            .create_announcement(notice("Exam week", author_id, "all"))
            .await
            .unwrap();
        storage
            .create_announcement(notice("Fee reminder", author_id, "admin"))
            .await
            .unwrap();
        assert_eq!(
            storage
                .count_unread_announcements(author_id, &audiences)
                .await
                .unwrap(),
            2
        );

        assert!(
            storage
                .mark_announcement_read(first.id, author_id, &audiences)
                .await
                .unwrap()
        );
        assert!(
            storage
                .mark_announcement_read(first.id, author_id, &audiences)
                .await
                .unwrap()
        );
        assert!(
            !storage
                .mark_announcement_read(999, author_id, &audiences)
                .await
                .unwrap()
        );

        assert_eq!(
            storage
                .count_unread_announcements(author_id, &audiences)
                .await
                .unwrap(),
            1
        );
        let reloaded = storage
            .get_announcement(first.id, author_id, &audiences)
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.is_read);
    }

    #[tokio::test]
    async fn test_reader_cannot_reach_hidden_announcement_by_id() {
        let storage = memory_storage().await;
        let author_id = author(&storage).await;
        let student_audiences = audiences_for(UserRole::Student);

        let staff_only = storage
            .create_announcement(notice("Staff meeting", author_id, "teachers"))
            .await
            .unwrap();
        let archived = storage
            .create_announcement(notice("Old timetable", author_id, "students"))
            .await
            .unwrap();
        storage
            .update_announcement(
                archived.id,
                UpdateAnnouncementRequest {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        for id in [staff_only.id, archived.id] {
            assert!(
                storage
                    .get_announcement(id, 12345, &student_audiences)
                    .await
                    .unwrap()
                    .is_none()
            );
            assert!(
                !storage
                    .mark_announcement_read(id, 12345, &student_audiences)
                    .await
                    .unwrap()
            );
            // 管理端不过滤
            assert!(
                storage
                    .get_announcement(id, author_id, &[])
                    .await
                    .unwrap()
                    .is_some()
            );
        }
        assert_eq!(
            storage
                .count_unread_announcements(12345, &student_audiences)
                .await
                .unwrap(),
            0
        );
    }
}
