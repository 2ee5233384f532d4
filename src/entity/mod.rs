//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod announcement_reads;
pub mod announcements;
pub mod asset_audits;
pub mod asset_categories;
pub mod assets;
pub mod attendance;
pub mod books;
pub mod borrow_records;
pub mod class_groups;
pub mod grades;
pub mod issued_materials;
pub mod rooms;
pub mod schedules;
pub mod schools;
pub mod sections;
pub mod semesters;
pub mod staff_profiles;
pub mod store_materials;
pub mod student_profiles;
pub mod subjects;
pub mod teacher_subjects;
pub mod teachers;
pub mod users;
pub mod weredas;

use chrono::{DateTime, Utc};

/// unix 秒转为 UTC 时间，越界时退回 epoch
pub(crate) fn to_datetime(ts: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()
}
