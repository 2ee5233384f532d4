//! 数据模型定义
//!
//! 每个业务域拆分为 `entities`（业务实体）、`requests`（请求参数）和 `responses`（响应结构）。

pub mod academics;
pub mod administration;
pub mod announcements;
pub mod auth;
pub mod common;
pub mod inventory;
pub mod library;
pub mod records;
pub mod staff;
pub mod students;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, OneOrMany, PaginatedResponse, PaginationInfo, PaginationQuery};

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// API 业务错误码
///
/// 以 `code as i32` 写入 [`ApiResponse::code`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    ValidationFailed = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证
    AuthFailed = 2000,
    AccountInactive = 2001,
    PasswordPolicyViolation = 2002,

    // 用户
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    UserNameInvalid = 3002,
    UserEmailInvalid = 3003,
    UserEmailAlreadyExists = 3004,
    CanNotDeleteCurrentUser = 3005,

    // 学生 / 职员 / 教师
    StudentNotFound = 3100,
    StaffNotFound = 3200,
    StaffRoleInvalid = 3201,
    TeacherNotFound = 3300,
    NationalIdAlreadyExists = 3301,

    // 教务
    SubjectNotFound = 4000,
    SemesterNotFound = 4001,
    ClassGroupNotFound = 4002,
    SectionNotFound = 4003,
    RoomNotFound = 4004,
    ScheduleNotFound = 4005,
    GradeNotFound = 4100,
    GradeAlreadyExists = 4101,
    AttendanceNotFound = 4200,
    AttendanceAlreadyExists = 4201,

    // 图书馆
    BookNotFound = 5000,
    BookUnavailable = 5001,
    BorrowRecordNotFound = 5002,
    AlreadyReturned = 5003,

    // 仓库与资产
    MaterialNotFound = 5100,
    InsufficientStock = 5101,
    IssueRecordNotFound = 5102,
    AssetNotFound = 5200,
    AssetCategoryNotFound = 5201,

    // 行政
    WeredaNotFound = 6000,
    SchoolNotFound = 6001,

    // 公告
    AnnouncementNotFound = 7000,

    // 导入导出
    FileUploadFailed = 8000,
    ImportFileParseFailed = 8001,
    ImportFileMissingColumn = 8002,
    ImportFileDataInvalid = 8003,
    ExportFailed = 8004,
}
