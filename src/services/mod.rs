pub mod academics;
pub mod administration;
pub mod announcements;
pub mod auth;
pub mod inventory;
pub mod library;
pub mod records;
pub mod staff;
pub mod students;
pub mod teachers;
pub mod users;

pub use academics::AcademicsService;
pub use administration::AdministrationService;
pub use announcements::AnnouncementService;
pub use auth::AuthService;
pub use inventory::InventoryService;
pub use library::LibraryService;
pub use records::RecordService;
pub use staff::StaffService;
pub use students::StudentService;
pub use teachers::TeacherService;
pub use users::UserService;
