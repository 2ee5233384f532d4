use serde::Deserialize;
use ts_rs::TS;

use super::entities::{AnnouncementPriority, AnnouncementType};
use crate::models::common::PaginationQuery;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct CreateAnnouncementRequest {
    pub title: String,
    pub content: String,
    pub announcement_type: Option<AnnouncementType>,
    pub priority: Option<AnnouncementPriority>,
    pub target_audience: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct UpdateAnnouncementRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub announcement_type: Option<AnnouncementType>,
    pub priority: Option<AnnouncementPriority>,
    pub target_audience: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/announcement.ts")]
pub struct AnnouncementListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub announcement_type: Option<AnnouncementType>,
    pub priority: Option<AnnouncementPriority>,
}

/// 存储层查询：按受众过滤、仅启用的公告
#[derive(Debug, Clone, Default)]
pub struct AnnouncementListQuery {
    pub page: u64,
    pub size: u64,
    pub audiences: Vec<String>,
    pub announcement_type: Option<AnnouncementType>,
    pub priority: Option<AnnouncementPriority>,
}

/// 写入存储层的公告
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: String,
    pub content: String,
    pub announcement_type: AnnouncementType,
    pub priority: AnnouncementPriority,
    pub author_id: i64,
    pub target_audience: String,
}
