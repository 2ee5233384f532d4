//! 公告实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "announcements")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub announcement_type: String,
    pub priority: String,
    pub author_id: Option<i64>,
    pub target_audience: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::announcement_reads::Entity")]
    Reads,
}

impl Related<super::announcement_reads::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_announcement(self, is_read: bool) -> crate::models::announcements::Announcement {
        use crate::models::announcements::{AnnouncementPriority, AnnouncementType};

        crate::models::announcements::Announcement {
            id: self.id,
            title: self.title,
            content: self.content,
            announcement_type: self
                .announcement_type
                .parse::<AnnouncementType>()
                .unwrap_or(AnnouncementType::General),
            priority: self
                .priority
                .parse::<AnnouncementPriority>()
                .unwrap_or(AnnouncementPriority::Medium),
            author_id: self.author_id,
            target_audience: self.target_audience,
            is_active: self.is_active,
            is_read,
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
