//! 存储层抽象
//!
//! 每个业务域一个 trait，`Storage` 汇总全部域供 HTTP 层通过 `Arc<dyn Storage>` 使用。

use std::sync::Arc;

use chrono::NaiveDate;

use crate::errors::Result;
use crate::models::{
    academics::{
        ClassGroup, CreateClassGroupRequest, CreateRoomRequest, CreateScheduleRequest,
        CreateSectionRequest, CreateSemesterRequest, CreateSubjectRequest, Room, Schedule,
        ScheduleListParams, Section, Semester, Subject, SubjectListQuery, SubjectListResponse,
        UpdateClassGroupRequest, UpdateRoomRequest, UpdateScheduleRequest, UpdateSectionRequest,
        UpdateSemesterRequest, UpdateSubjectRequest,
    },
    administration::{
        CreateSchoolRequest, CreateWeredaRequest, School, SchoolListQuery, SchoolListResponse,
        UpdateSchoolRequest, UpdateWeredaRequest, Wereda,
    },
    announcements::{
        Announcement, AnnouncementListQuery, AnnouncementListResponse, NewAnnouncement,
        UpdateAnnouncementRequest,
    },
    inventory::{
        Asset, AssetAudit, AssetCategory, AssetListQuery, AssetListResponse,
        CreateAssetAuditRequest, CreateAssetCategoryRequest, CreateAssetRequest,
        CreateMaterialRequest, IssuedListParams, IssuedMaterial, MaterialListQuery,
        MaterialListResponse, NewIssue, StoreMaterial, StoreSummary, UpdateAssetRequest,
        UpdateMaterialRequest,
    },
    library::{
        Book, BookListQuery, BookListResponse, BorrowRecord, BorrowRecordListQuery,
        BorrowRecordListResponse, CreateBookRequest, NewBorrowRecord, UpdateBookRequest,
    },
    records::{
        AttendanceFilter, AttendanceRecord, Grade, GradeFilter, NewAttendance, NewGrade,
        UpdateAttendanceRequest, UpdateGradeRequest,
    },
    staff::{NewStaffProfile, StaffListQuery, StaffListResponse, StaffMember, StaffProfileChanges},
    students::{
        NewStudentProfile, Student, StudentListQuery, StudentListResponse, StudentProfileChanges,
    },
    teachers::{
        NewTeacherProfile, Teacher, TeacherListQuery, TeacherListResponse, TeacherProfileChanges,
    },
    users::{NewUser, User, UserChanges, UserListQuery, UserListResponse},
};

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait UserStorage: Send + Sync {
    // 创建用户，候选用户名重名时自动追加数字
    async fn create_user(&self, user: NewUser) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, changes: UserChanges) -> Result<Option<User>>;
    // 删除用户（档案级联删除）
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数（启动时判断是否需要初始化管理员）
    async fn count_users(&self) -> Result<u64>;
    // 身份证号是否已被其他用户使用
    async fn national_id_exists(&self, national_id: &str, exclude_user: Option<i64>)
    -> Result<bool>;
}

#[async_trait::async_trait]
pub trait StudentStorage: Send + Sync {
    // 在一个事务内创建用户与学生档案
    async fn create_student(&self, user: NewUser, profile: NewStudentProfile) -> Result<Student>;
    async fn get_student(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    // 导出用，不分页
    async fn list_all_students(&self) -> Result<Vec<Student>>;
    async fn update_student(
        &self,
        id: i64,
        user: UserChanges,
        profile: StudentProfileChanges,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait StaffStorage: Send + Sync {
    async fn create_staff(&self, user: NewUser, profile: NewStaffProfile) -> Result<StaffMember>;
    async fn get_staff(&self, id: i64) -> Result<Option<StaffMember>>;
    async fn get_staff_by_user_id(&self, user_id: i64) -> Result<Option<StaffMember>>;
    async fn list_staff_with_pagination(&self, query: StaffListQuery)
    -> Result<StaffListResponse>;
    async fn update_staff(
        &self,
        id: i64,
        user: UserChanges,
        profile: StaffProfileChanges,
    ) -> Result<Option<StaffMember>>;
    async fn delete_staff(&self, id: i64) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait TeacherStorage: Send + Sync {
    async fn create_teacher(&self, user: NewUser, profile: NewTeacherProfile) -> Result<Teacher>;
    async fn get_teacher(&self, id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher(
        &self,
        id: i64,
        user: UserChanges,
        profile: TeacherProfileChanges,
    ) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait AcademicStorage: Send + Sync {
    // 课程
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject(&self, id: i64) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    async fn list_all_subjects(&self) -> Result<Vec<Subject>>;
    async fn update_subject(&self, id: i64, req: UpdateSubjectRequest)
    -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    // 学期
    async fn create_semester(&self, req: CreateSemesterRequest) -> Result<Semester>;
    async fn get_semester(&self, id: i64) -> Result<Option<Semester>>;
    async fn list_semesters(&self) -> Result<Vec<Semester>>;
    async fn update_semester(
        &self,
        id: i64,
        req: UpdateSemesterRequest,
    ) -> Result<Option<Semester>>;
    async fn delete_semester(&self, id: i64) -> Result<bool>;

    // 年级
    async fn create_class_group(&self, req: CreateClassGroupRequest) -> Result<ClassGroup>;
    async fn get_class_group(&self, id: i64) -> Result<Option<ClassGroup>>;
    async fn list_class_groups(&self) -> Result<Vec<ClassGroup>>;
    async fn update_class_group(
        &self,
        id: i64,
        req: UpdateClassGroupRequest,
    ) -> Result<Option<ClassGroup>>;
    async fn delete_class_group(&self, id: i64) -> Result<bool>;

    // 教室
    async fn create_room(&self, req: CreateRoomRequest) -> Result<Room>;
    async fn get_room(&self, id: i64) -> Result<Option<Room>>;
    async fn list_rooms(&self) -> Result<Vec<Room>>;
    async fn update_room(&self, id: i64, req: UpdateRoomRequest) -> Result<Option<Room>>;
    async fn delete_room(&self, id: i64) -> Result<bool>;

    // 班级分部
    async fn create_section(&self, req: CreateSectionRequest) -> Result<Section>;
    async fn get_section(&self, id: i64) -> Result<Option<Section>>;
    async fn list_sections(&self, class_group_id: Option<i64>) -> Result<Vec<Section>>;
    async fn update_section(&self, id: i64, req: UpdateSectionRequest)
    -> Result<Option<Section>>;
    async fn delete_section(&self, id: i64) -> Result<bool>;

    // 课表
    async fn create_schedule(&self, req: CreateScheduleRequest) -> Result<Schedule>;
    async fn get_schedule(&self, id: i64) -> Result<Option<Schedule>>;
    async fn list_schedules(&self, params: ScheduleListParams) -> Result<Vec<Schedule>>;
    async fn update_schedule(
        &self,
        id: i64,
        req: UpdateScheduleRequest,
    ) -> Result<Option<Schedule>>;
    async fn delete_schedule(&self, id: i64) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait RecordStorage: Send + Sync {
    // 成绩，(学生, 课程, 学期, 类型) 重复时返回 Conflict
    async fn create_grade(&self, grade: NewGrade) -> Result<Grade>;
    async fn get_grade(&self, id: i64) -> Result<Option<Grade>>;
    // 按日期倒序返回全部匹配记录
    async fn list_grades(&self, filter: GradeFilter) -> Result<Vec<Grade>>;
    async fn update_grade(&self, id: i64, req: UpdateGradeRequest) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;

    // 考勤，(学生, 班级, 课程, 日期) 重复时返回 Conflict
    async fn create_attendance(&self, record: NewAttendance) -> Result<AttendanceRecord>;
    async fn get_attendance(&self, id: i64) -> Result<Option<AttendanceRecord>>;
    async fn list_attendance(&self, filter: AttendanceFilter) -> Result<Vec<AttendanceRecord>>;
    async fn update_attendance(
        &self,
        id: i64,
        req: UpdateAttendanceRequest,
    ) -> Result<Option<AttendanceRecord>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait LibraryStorage: Send + Sync {
    async fn create_book(&self, req: CreateBookRequest) -> Result<Book>;
    async fn get_book(&self, id: i64) -> Result<Option<Book>>;
    async fn list_books_with_pagination(&self, query: BookListQuery) -> Result<BookListResponse>;
    async fn update_book(&self, id: i64, req: UpdateBookRequest) -> Result<Option<Book>>;
    async fn delete_book(&self, id: i64) -> Result<bool>;

    // 借书：事务内条件扣减可借数量并写入记录
    async fn borrow_book(&self, record: NewBorrowRecord) -> Result<BorrowRecord>;
    // 还书：事务内标记归还并恢复可借数量
    async fn return_book(&self, record_id: i64, return_date: NaiveDate) -> Result<BorrowRecord>;
    async fn get_borrow_record(&self, id: i64) -> Result<Option<BorrowRecord>>;
    async fn list_borrow_records_with_pagination(
        &self,
        query: BorrowRecordListQuery,
    ) -> Result<BorrowRecordListResponse>;
}

#[async_trait::async_trait]
pub trait InventoryStorage: Send + Sync {
    // 仓库物资
    async fn create_material(&self, req: CreateMaterialRequest) -> Result<StoreMaterial>;
    async fn get_material(&self, id: i64) -> Result<Option<StoreMaterial>>;
    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse>;
    async fn update_material(
        &self,
        id: i64,
        req: UpdateMaterialRequest,
    ) -> Result<Option<StoreMaterial>>;
    async fn delete_material(&self, id: i64) -> Result<bool>;
    async fn issue_material(&self, issue: NewIssue) -> Result<IssuedMaterial>;
    async fn return_material(&self, issue_id: i64, return_date: NaiveDate)
    -> Result<IssuedMaterial>;
    async fn list_issued_materials(&self, params: IssuedListParams)
    -> Result<Vec<IssuedMaterial>>;
    async fn store_summary(&self, managed_by: i64) -> Result<StoreSummary>;

    // 资产分类
    async fn list_asset_categories(&self) -> Result<Vec<AssetCategory>>;
    async fn create_asset_category(&self, req: CreateAssetCategoryRequest)
    -> Result<AssetCategory>;
    async fn delete_asset_category(&self, id: i64) -> Result<bool>;

    // 资产
    async fn create_asset(&self, req: CreateAssetRequest, inventoried_by: i64) -> Result<Asset>;
    async fn get_asset(&self, id: i64) -> Result<Option<Asset>>;
    async fn list_assets_with_pagination(&self, query: AssetListQuery)
    -> Result<AssetListResponse>;
    async fn update_asset(&self, id: i64, req: UpdateAssetRequest) -> Result<Option<Asset>>;
    async fn delete_asset(&self, id: i64) -> Result<bool>;

    // 盘点：记录并同步资产状态
    async fn list_asset_audits(&self, asset_id: i64) -> Result<Vec<AssetAudit>>;
    async fn create_asset_audit(
        &self,
        asset_id: i64,
        officer_id: i64,
        req: CreateAssetAuditRequest,
    ) -> Result<AssetAudit>;
}

#[async_trait::async_trait]
pub trait AdministrationStorage: Send + Sync {
    // 区
    async fn create_wereda(&self, req: CreateWeredaRequest, created_by: i64) -> Result<Wereda>;
    async fn get_wereda(&self, id: i64) -> Result<Option<Wereda>>;
    async fn list_weredas(&self) -> Result<Vec<Wereda>>;
    async fn update_wereda(&self, id: i64, req: UpdateWeredaRequest) -> Result<Option<Wereda>>;
    async fn delete_wereda(&self, id: i64) -> Result<bool>;

    // 学校
    async fn create_school(&self, req: CreateSchoolRequest) -> Result<School>;
    async fn get_school(&self, id: i64) -> Result<Option<School>>;
    async fn list_schools_with_pagination(
        &self,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse>;
    async fn update_school(&self, id: i64, req: UpdateSchoolRequest) -> Result<Option<School>>;
    async fn delete_school(&self, id: i64) -> Result<bool>;

    // 行政账号注册，账号、档案与分配在同一事务内完成
    // 区教育官员的用户名在事务内按手机号或新职员编号生成，忽略传入值
    async fn register_wereda_officer(
        &self,
        user: NewUser,
        profile: NewStaffProfile,
        wereda_id: i64,
    ) -> Result<User>;
    async fn register_school_manager(
        &self,
        user: NewUser,
        profile: NewStaffProfile,
        school_id: i64,
    ) -> Result<User>;
    // 返回实际分配到的学校 ID
    async fn register_supervisor(
        &self,
        user: NewUser,
        profile: NewStaffProfile,
        school_ids: &[i64],
    ) -> Result<(User, Vec<i64>)>;
}

#[async_trait::async_trait]
pub trait AnnouncementStorage: Send + Sync {
    async fn create_announcement(&self, announcement: NewAnnouncement) -> Result<Announcement>;
    // audiences 为空时不做受众与启用过滤，用于管理端
    async fn get_announcement(
        &self,
        id: i64,
        reader_id: i64,
        audiences: &[String],
    ) -> Result<Option<Announcement>>;
    async fn list_announcements_with_pagination(
        &self,
        query: AnnouncementListQuery,
        reader_id: i64,
    ) -> Result<AnnouncementListResponse>;
    async fn update_announcement(
        &self,
        id: i64,
        req: UpdateAnnouncementRequest,
    ) -> Result<Option<Announcement>>;
    async fn delete_announcement(&self, id: i64) -> Result<bool>;
    // 幂等，返回该用户是否可见此公告
    async fn mark_announcement_read(
        &self,
        id: i64,
        user_id: i64,
        audiences: &[String],
    ) -> Result<bool>;
    async fn count_unread_announcements(&self, user_id: i64, audiences: &[String]) -> Result<u64>;
}

/// 全部存储能力的汇总
pub trait Storage:
    UserStorage
    + StudentStorage
    + StaffStorage
    + TeacherStorage
    + AcademicStorage
    + RecordStorage
    + LibraryStorage
    + InventoryStorage
    + AdministrationStorage
    + AnnouncementStorage
    + Send
    + Sync
{
}

impl<T> Storage for T where
    T: UserStorage
        + StudentStorage
        + StaffStorage
        + TeacherStorage
        + AcademicStorage
        + RecordStorage
        + LibraryStorage
        + InventoryStorage
        + AdministrationStorage
        + AnnouncementStorage
        + Send
        + Sync
{
}

/// 创建默认的存储实现
pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
