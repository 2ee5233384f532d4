//! 预导入模块，方便使用

pub use super::announcement_reads::Entity as AnnouncementReads;
pub use super::announcements::Entity as Announcements;
pub use super::asset_audits::Entity as AssetAudits;
pub use super::asset_categories::Entity as AssetCategories;
pub use super::assets::Entity as Assets;
pub use super::attendance::Entity as Attendance;
pub use super::books::Entity as Books;
pub use super::borrow_records::Entity as BorrowRecords;
pub use super::class_groups::Entity as ClassGroups;
pub use super::grades::Entity as Grades;
pub use super::issued_materials::Entity as IssuedMaterials;
pub use super::rooms::Entity as Rooms;
pub use super::schedules::Entity as Schedules;
pub use super::schools::Entity as Schools;
pub use super::sections::Entity as Sections;
pub use super::semesters::Entity as Semesters;
pub use super::staff_profiles::Entity as StaffProfiles;
pub use super::store_materials::Entity as StoreMaterials;
pub use super::student_profiles::Entity as StudentProfiles;
pub use super::subjects::Entity as Subjects;
pub use super::teacher_subjects::Entity as TeacherSubjects;
pub use super::teachers::Entity as Teachers;
pub use super::users::Entity as Users;
pub use super::weredas::Entity as Weredas;
