//! 行政存储操作：区、学校与行政账号注册

use super::{SeaOrmStorage, accounts, staff::insert_staff_profile};
use crate::entity::{schools, weredas};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    administration::{
        CreateSchoolRequest, CreateWeredaRequest, InstitutionType, OrgStatus, School,
        SchoolListQuery, SchoolListResponse, UpdateSchoolRequest, UpdateWeredaRequest, Wereda,
    },
    staff::NewStaffProfile,
    users::{NewUser, User},
};
use crate::storage::AdministrationStorage;
use crate::utils::{accounts::wereda_officer_username, escape_like_pattern};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait, sea_query::Expr,
};

#[async_trait]
impl AdministrationStorage for SeaOrmStorage {
    // ---------- 区 ----------

    async fn create_wereda(&self, req: CreateWeredaRequest, created_by: i64) -> Result<Wereda> {
        let now = chrono::Utc::now().timestamp();
        let model = weredas::ActiveModel {
            name: Set(req.name),
            population: Set(req.population),
            area: Set(req.area),
            number_of_schools: Set(req.number_of_schools),
            number_of_students: Set(req.number_of_students),
            number_of_teachers: Set(req.number_of_teachers),
            literacy_rate: Set(req.literacy_rate),
            status: Set(req.status.unwrap_or(OrgStatus::Active).to_string()),
            manager_id: Set(None),
            created_by: Set(Some(created_by)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建区失败", e))?;
        Ok(result.into_wereda())
    }

    async fn get_wereda(&self, id: i64) -> Result<Option<Wereda>> {
        let result = weredas::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询区失败", e))?;
        Ok(result.map(|m| m.into_wereda()))
    }

    async fn list_weredas(&self) -> Result<Vec<Wereda>> {
        let items = weredas::Entity::find()
            .order_by_asc(weredas::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询区列表失败", e))?;
        Ok(items.into_iter().map(|m| m.into_wereda()).collect())
    }

    async fn update_wereda(&self, id: i64, req: UpdateWeredaRequest) -> Result<Option<Wereda>> {
        let Some(existing) = weredas::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询区失败", e))?
        else {
            return Ok(None);
        };

        let mut model: weredas::ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(population) = req.population {
            model.population = Set(Some(population));
        }
        if let Some(area) = req.area {
            model.area = Set(Some(area));
        }
        if let Some(n) = req.number_of_schools {
            model.number_of_schools = Set(n);
        }
        if let Some(n) = req.number_of_students {
            model.number_of_students = Set(n);
        }
        if let Some(n) = req.number_of_teachers {
            model.number_of_teachers = Set(n);
        }
        if let Some(rate) = req.literacy_rate {
            model.literacy_rate = Set(Some(rate));
        }
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }
        if let Some(manager_id) = req.manager_id {
            model.manager_id = Set(Some(manager_id));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新区失败", e))?;
        Ok(Some(updated.into_wereda()))
    }

    async fn delete_wereda(&self, id: i64) -> Result<bool> {
        let result = weredas::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除区失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 学校 ----------

    async fn create_school(&self, req: CreateSchoolRequest) -> Result<School> {
        let now = chrono::Utc::now().timestamp();
        let model = schools::ActiveModel {
            name: Set(req.name),
            code: Set(req.code),
            level: Set(req.level),
            institution_type: Set(req
                .institution_type
                .unwrap_or(InstitutionType::School)
                .to_string()),
            wereda_id: Set(req.wereda_id),
            student_count: Set(req.student_count),
            teacher_count: Set(req.teacher_count),
            principal: Set(req.principal),
            address: Set(req.address),
            phone: Set(req.phone),
            email: Set(req.email),
            established: Set(req.established),
            status: Set(req.status.unwrap_or(OrgStatus::Active).to_string()),
            manager_id: Set(None),
            supervisor_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建学校失败", e))?;
        Ok(result.into_school())
    }

    async fn get_school(&self, id: i64) -> Result<Option<School>> {
        let result = schools::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询学校失败", e))?;
        Ok(result.map(|m| m.into_school()))
    }

    async fn list_schools_with_pagination(
        &self,
        query: SchoolListQuery,
    ) -> Result<SchoolListResponse> {
        use schools::Column;

        let mut select = schools::Entity::find();
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Code.contains(&escaped))
                    .add(Column::Principal.contains(&escaped)),
            );
        }
        if let Some(kind) = query.institution_type {
            select = select.filter(Column::InstitutionType.eq(kind.as_str()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(wereda_id) = query.wereda_id {
            select = select.filter(Column::WeredaId.eq(wereda_id));
        }

        let paginator = select
            .order_by_asc(Column::Name)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询学校总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询学校页数失败", e))?;
        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询学校列表失败", e))?;

        Ok(SchoolListResponse {
            items: items.into_iter().map(|m| m.into_school()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn update_school(&self, id: i64, req: UpdateSchoolRequest) -> Result<Option<School>> {
        let Some(existing) = schools::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询学校失败", e))?
        else {
            return Ok(None);
        };

        let mut model: schools::ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(code) = req.code {
            model.code = Set(code);
        }
        if let Some(level) = req.level {
            model.level = Set(Some(level));
        }
        if let Some(kind) = req.institution_type {
            model.institution_type = Set(kind.to_string());
        }
        if let Some(wereda_id) = req.wereda_id {
            model.wereda_id = Set(Some(wereda_id));
        }
        if let Some(n) = req.student_count {
            model.student_count = Set(n);
        }
        if let Some(n) = req.teacher_count {
            model.teacher_count = Set(n);
        }
        if let Some(principal) = req.principal {
            model.principal = Set(Some(principal));
        }
        if let Some(address) = req.address {
            model.address = Set(Some(address));
        }
        if let Some(phone) = req.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(email) = req.email {
            model.email = Set(Some(email));
        }
        if let Some(established) = req.established {
            model.established = Set(Some(established));
        }
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新学校失败", e))?;
        Ok(Some(updated.into_school()))
    }

    async fn delete_school(&self, id: i64) -> Result<bool> {
        let result = schools::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除学校失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 行政账号注册 ----------

    async fn register_wereda_officer(
        &self,
        user: NewUser,
        profile: NewStaffProfile,
        wereda_id: i64,
    ) -> Result<User> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let exists = weredas::Entity::find_by_id(wereda_id)
            .count(&txn)
            .await
            .map_err(|e| db_error("查询区失败", e))?;
        if exists == 0 {
            return Err(SchoolError::validation(format!(
                "Wereda {wereda_id} does not exist"
            )));
        }

        let staff_id = accounts::next_staff_id(&txn).await?;
        let username =
            wereda_officer_username(&user.first_name, profile.phone.as_deref(), &staff_id);
        let user_model = accounts::insert_user(&txn, NewUser { username, ..user }).await?;
        insert_staff_profile(
            &txn,
            user_model.id,
            NewStaffProfile {
                staff_id: Some(staff_id),
                ..profile
            },
        )
        .await?;

        weredas::Entity::update_many()
            .col_expr(weredas::Column::ManagerId, Expr::value(user_model.id))
            .col_expr(
                weredas::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(weredas::Column::Id.eq(wereda_id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("分配区负责人失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(user_model.into_user())
    }

    async fn register_school_manager(
        &self,
        user: NewUser,
        profile: NewStaffProfile,
        school_id: i64,
    ) -> Result<User> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let exists = schools::Entity::find_by_id(school_id)
            .count(&txn)
            .await
            .map_err(|e| db_error("查询学校失败", e))?;
        if exists == 0 {
            return Err(SchoolError::validation(format!(
                "School {school_id} does not exist"
            )));
        }

        let user_model = accounts::insert_user(&txn, user).await?;
        insert_staff_profile(&txn, user_model.id, profile).await?;

        schools::Entity::update_many()
            .col_expr(schools::Column::ManagerId, Expr::value(user_model.id))
            .col_expr(
                schools::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(schools::Column::Id.eq(school_id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("分配学校管理员失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(user_model.into_user())
    }

    async fn register_supervisor(
        &self,
        user: NewUser,
        profile: NewStaffProfile,
        school_ids: &[i64],
    ) -> Result<(User, Vec<i64>)> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        // 只分配实际存在的学校
        let valid: Vec<i64> = schools::Entity::find()
            .select_only()
            .column(schools::Column::Id)
            .filter(schools::Column::Id.is_in(school_ids.iter().copied()))
            .order_by_asc(schools::Column::Id)
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| db_error("查询学校失败", e))?;
        if valid.is_empty() {
            return Err(SchoolError::validation(
                "None of the given schools exist",
            ));
        }

        let user_model = accounts::insert_user(&txn, user).await?;
        insert_staff_profile(&txn, user_model.id, profile).await?;

        schools::Entity::update_many()
            .col_expr(schools::Column::SupervisorId, Expr::value(user_model.id))
            .col_expr(
                schools::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().timestamp()),
            )
            .filter(schools::Column::Id.is_in(valid.iter().copied()))
            .exec(&txn)
            .await
            .map_err(|e| db_error("分配督导学校失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok((user_model.into_user(), valid))
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::users::UserRole;
    use crate::storage::{StaffStorage, UserStorage};

    fn account(role: UserRole) -> NewUser {
        NewUser {
            username: "hsolomon512".to_string(),
            email: None,
            password_hash: "hash".to_string(),
            role,
            first_name: "Helen".to_string(),
            last_name: "Solomon".to_string(),
            national_id: None,
        }
    }

    fn school(code: &str) -> CreateSchoolRequest {
        CreateSchoolRequest {
            name: format!("School {code}"),
            code: code.to_string(),
            level: Some("Secondary".to_string()),
            institution_type: None,
            wereda_id: None,
            student_count: 0,
            teacher_count: 0,
            principal: None,
            address: None,
            phone: None,
            email: None,
            established: None,
            status: None,
        }
    }

    #[tokio::test]
    async fn test_school_manager_requires_existing_school() {
        let storage = memory_storage().await;

        let err = storage
            .register_school_manager(
                account(UserRole::School),
                NewStaffProfile::for_department("Administration", None),
                42,
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
        assert_eq!(storage.count_users().await.unwrap(), 0);

        let created = storage.create_school(school("SCH-1")).await.unwrap();
        let manager = storage
            .register_school_manager(
                account(UserRole::School),
                NewStaffProfile::for_department("Administration", None),
                created.id,
            )
            .await
            .unwrap();
        let reloaded = storage.get_school(created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.manager_id, Some(manager.id));
        assert_eq!(reloaded.institution_type, InstitutionType::School);
    }

    #[tokio::test]
    async fn test_supervisor_assigned_to_existing_schools_only() {
        let storage = memory_storage().await;
        let a = storage.create_school(school("SCH-A")).await.unwrap();
        let b = storage.create_school(school("SCH-B")).await.unwrap();

        let (user, assigned) = storage
            .register_supervisor(
                account(UserRole::Senate),
                NewStaffProfile::for_department("Supervision", None),
                &[a.id, 999, b.id],
            )
            .await
            .unwrap();

        assert_eq!(assigned, vec![a.id, b.id]);
        assert_eq!(
            storage.get_school(b.id).await.unwrap().unwrap().supervisor_id,
            Some(user.id)
        );

        let err = storage
            .register_supervisor(
                account(UserRole::Senate),
                NewStaffProfile::for_department("Supervision", None),
                &[999],
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), "E007");
    }

    #[tokio::test]
    async fn test_wereda_officer_becomes_manager() {
        let storage = memory_storage().await;
        let admin = storage.create_user(account(UserRole::Admin)).await.unwrap();
        let wereda = storage
            .create_wereda(
                CreateWeredaRequest {
                    name: "Bole".to_string(),
                    population: Some(328_900),
                    area: None,
                    number_of_schools: 0,
                    number_of_students: 0,
                    number_of_teachers: 0,
                    literacy_rate: None,
                    status: None,
                },
                admin.id,
            )
            .await
            .unwrap();
        assert_eq!(wereda.created_by, Some(admin.id));

        let officer = storage
            .register_wereda_officer(
                account(UserRole::WeredaOffice),
                NewStaffProfile::for_department("Wereda Office", Some("0911223344".into())),
                wereda.id,
            )
            .await
            .unwrap();

        assert_eq!(officer.username, "helen23344");
        assert_eq!(
            storage.get_wereda(wereda.id).await.unwrap().unwrap().manager_id,
            Some(officer.id)
        );

        // 手机号过短时取新职员编号的序号
        let second = storage
            .register_wereda_officer(
                account(UserRole::WeredaOffice),
                NewStaffProfile::for_department("Wereda Office", Some("123".into())),
                wereda.id,
            )
            .await
            .unwrap();
        assert_eq!(second.username, "helen2");
        let profile = storage
            .get_staff_by_user_id(second.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(profile.staff_id.as_deref(), Some("STF0002"));
    }
}
