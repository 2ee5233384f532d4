//! 库存存储操作：仓库物资、领用、资产与盘点

use chrono::NaiveDate;

use super::SeaOrmStorage;
use super::counters::{decremented, incremented_capped};
use crate::entity::{asset_audits, asset_categories, assets, issued_materials, store_materials};
use crate::errors::{Result, SchoolError, db_error};
use crate::models::{
    PaginationInfo,
    inventory::{
        Asset, AssetAudit, AssetCategory, AssetListQuery, AssetListResponse, AssetStatus,
        CreateAssetAuditRequest, CreateAssetCategoryRequest, CreateAssetRequest,
        CreateMaterialRequest, IssuedListParams, IssuedMaterial, MaterialListQuery,
        MaterialListResponse, NewIssue, StoreMaterial, StoreSummary, UpdateAssetRequest,
        UpdateMaterialRequest, validate_quantities,
    },
};
use crate::storage::InventoryStorage;
use crate::utils::{dates, escape_like_pattern};
use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

/// 缺省计量单位
const DEFAULT_UNIT: &str = "pcs";

#[async_trait]
impl InventoryStorage for SeaOrmStorage {
    // ---------- 仓库物资 ----------

    async fn create_material(&self, req: CreateMaterialRequest) -> Result<StoreMaterial> {
        let model = store_materials::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            quantity_total: Set(req.quantity_total),
            quantity_available: Set(req.quantity_available.unwrap_or(req.quantity_total)),
            unit: Set(req
                .unit
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UNIT.to_string())),
            managed_by: Set(req.managed_by),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建物资失败", e))?;
        Ok(result.into_material())
    }

    async fn get_material(&self, id: i64) -> Result<Option<StoreMaterial>> {
        let result = store_materials::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询物资失败", e))?;
        Ok(result.map(|m| m.into_material()))
    }

    async fn list_materials_with_pagination(
        &self,
        query: MaterialListQuery,
    ) -> Result<MaterialListResponse> {
        use store_materials::Column;

        let mut select = store_materials::Entity::find();
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Description.contains(&escaped)),
            );
        }
        if let Some(managed_by) = query.managed_by {
            select = select.filter(Column::ManagedBy.eq(managed_by));
        }

        let paginator = select
            .order_by_asc(Column::Name)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询物资总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询物资页数失败", e))?;
        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询物资列表失败", e))?;

        Ok(MaterialListResponse {
            items: items.into_iter().map(|m| m.into_material()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn update_material(
        &self,
        id: i64,
        req: UpdateMaterialRequest,
    ) -> Result<Option<StoreMaterial>> {
        let Some(existing) = store_materials::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询物资失败", e))?
        else {
            return Ok(None);
        };

        let total = req.quantity_total.unwrap_or(existing.quantity_total);
        let available = req.quantity_available.unwrap_or(existing.quantity_available);
        validate_quantities(total, available).map_err(SchoolError::validation)?;

        let (seen_total, seen_available) = (existing.quantity_total, existing.quantity_available);
        let mut model: store_materials::ActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(description) = req.description {
            model.description = Set(Some(description));
        }
        model.quantity_total = Set(total);
        model.quantity_available = Set(available);
        if let Some(unit) = req.unit {
            model.unit = Set(unit);
        }
        if let Some(managed_by) = req.managed_by {
            model.managed_by = Set(Some(managed_by));
        }

        let updated = store_materials::Entity::update(model)
            .validate()
            .map_err(|e| db_error("更新物资失败", e))?
            .filter(store_materials::Column::QuantityTotal.eq(seen_total))
            .filter(store_materials::Column::QuantityAvailable.eq(seen_available))
            .exec(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => {
                    SchoolError::conflict("Material quantity changed concurrently, please retry")
                }
                other => db_error("更新物资失败", other),
            })?;
        Ok(Some(updated.into_material()))
    }

    async fn delete_material(&self, id: i64) -> Result<bool> {
        let result = store_materials::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除物资失败", e))?;
        Ok(result.rows_affected > 0)
    }

    async fn issue_material(&self, issue: NewIssue) -> Result<IssuedMaterial> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let Some(material) = store_materials::Entity::find_by_id(issue.material_id)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询物资失败", e))?
        else {
            return Err(SchoolError::not_found(format!(
                "Material {} not found",
                issue.material_id
            )));
        };

        // 按数量条件扣减
        let taken = store_materials::Entity::update_many()
            .col_expr(
                store_materials::Column::QuantityAvailable,
                decremented(store_materials::Column::QuantityAvailable, issue.quantity),
            )
            .filter(store_materials::Column::Id.eq(material.id))
            .filter(store_materials::Column::QuantityAvailable.gte(issue.quantity))
            .exec(&txn)
            .await
            .map_err(|e| db_error("扣减物资数量失败", e))?;
        if taken.rows_affected == 0 {
            return Err(SchoolError::conflict(format!(
                "Insufficient quantity: {} {} available",
                material.quantity_available, material.unit
            )));
        }

        let model = issued_materials::ActiveModel {
            material_id: Set(material.id),
            issued_to: Set(issue.issued_to),
            quantity: Set(issue.quantity),
            issue_date: Set(issue.issue_date),
            expected_return_date: Set(issue.expected_return_date),
            actual_return_date: Set(None),
            returned: Set(false),
            ..Default::default()
        };
        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建领用记录失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(inserted.into_issued(Some(material.name)))
    }

    async fn return_material(
        &self,
        issue_id: i64,
        return_date: NaiveDate,
    ) -> Result<IssuedMaterial> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        let Some((issued, material)) = issued_materials::Entity::find_by_id(issue_id)
            .find_also_related(store_materials::Entity)
            .one(&txn)
            .await
            .map_err(|e| db_error("查询领用记录失败", e))?
        else {
            return Err(SchoolError::not_found(format!(
                "Issue record {issue_id} not found"
            )));
        };

        let marked = issued_materials::Entity::update_many()
            .col_expr(issued_materials::Column::Returned, Expr::value(true))
            .col_expr(
                issued_materials::Column::ActualReturnDate,
                Expr::value(return_date),
            )
            .filter(issued_materials::Column::Id.eq(issued.id))
            .filter(issued_materials::Column::Returned.eq(false))
            .exec(&txn)
            .await
            .map_err(|e| db_error("标记归还失败", e))?;
        if marked.rows_affected == 0 {
            return Err(SchoolError::conflict("Material already returned"));
        }

        // 归还不超过总量，期间可能已补录库存
        store_materials::Entity::update_many()
            .col_expr(
                store_materials::Column::QuantityAvailable,
                incremented_capped(
                    store_materials::Column::QuantityAvailable,
                    issued.quantity,
                    store_materials::Column::QuantityTotal,
                ),
            )
            .filter(store_materials::Column::Id.eq(issued.material_id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("恢复物资数量失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        let returned = issued_materials::Model {
            returned: true,
            actual_return_date: Some(return_date),
            ..issued
        };
        Ok(returned.into_issued(material.map(|m| m.name)))
    }

    async fn list_issued_materials(
        &self,
        params: IssuedListParams,
    ) -> Result<Vec<IssuedMaterial>> {
        use issued_materials::Column;

        let mut select =
            issued_materials::Entity::find().find_also_related(store_materials::Entity);
        if let Some(material_id) = params.material_id {
            select = select.filter(Column::MaterialId.eq(material_id));
        }
        if let Some(issued_to) = params.issued_to {
            select = select.filter(Column::IssuedTo.eq(issued_to));
        }
        if let Some(returned) = params.returned {
            select = select.filter(Column::Returned.eq(returned));
        }

        let rows = select
            .order_by_desc(Column::IssueDate)
            .order_by_desc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询领用记录失败", e))?;

        Ok(rows
            .into_iter()
            .map(|(issued, material)| issued.into_issued(material.map(|m| m.name)))
            .collect())
    }

    async fn store_summary(&self, managed_by: i64) -> Result<StoreSummary> {
        let materials = store_materials::Entity::find()
            .filter(store_materials::Column::ManagedBy.eq(managed_by))
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询物资汇总失败", e))?;

        let ids: Vec<i64> = materials.iter().map(|m| m.id).collect();
        let outstanding_issues = if ids.is_empty() {
            0
        } else {
            issued_materials::Entity::find()
                .filter(issued_materials::Column::MaterialId.is_in(ids))
                .filter(issued_materials::Column::Returned.eq(false))
                .count(&self.db)
                .await
                .map_err(|e| db_error("统计未归还领用失败", e))?
        };

        Ok(StoreSummary {
            managed_by,
            material_count: materials.len() as u64,
            total_available: materials
                .iter()
                .map(|m| i64::from(m.quantity_available))
                .sum(),
            outstanding_issues,
        })
    }

    // ---------- 资产分类 ----------

    async fn list_asset_categories(&self) -> Result<Vec<AssetCategory>> {
        let items = asset_categories::Entity::find()
            .order_by_asc(asset_categories::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询资产分类失败", e))?;
        Ok(items.into_iter().map(|m| m.into_category()).collect())
    }

    async fn create_asset_category(
        &self,
        req: CreateAssetCategoryRequest,
    ) -> Result<AssetCategory> {
        let model = asset_categories::ActiveModel {
            name: Set(req.name),
            description: Set(req.description),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("创建资产分类失败", e))?;
        Ok(result.into_category())
    }

    async fn delete_asset_category(&self, id: i64) -> Result<bool> {
        let result = asset_categories::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除资产分类失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 资产 ----------

    async fn create_asset(&self, req: CreateAssetRequest, inventoried_by: i64) -> Result<Asset> {
        let model = assets::ActiveModel {
            name: Set(req.name),
            serial_number: Set(req.serial_number),
            category_id: Set(req.category_id),
            assigned_to: Set(req.assigned_to),
            location: Set(req.location),
            purchase_date: Set(req.purchase_date),
            status: Set(req.status.unwrap_or(AssetStatus::Working).to_string()),
            inventoried_by: Set(Some(inventoried_by)),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| db_error("登记资产失败", e))?;
        Ok(result.into_asset())
    }

    async fn get_asset(&self, id: i64) -> Result<Option<Asset>> {
        let result = assets::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询资产失败", e))?;
        Ok(result.map(|m| m.into_asset()))
    }

    async fn list_assets_with_pagination(&self, query: AssetListQuery) -> Result<AssetListResponse> {
        use assets::Column;

        let mut select = assets::Entity::find();
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::SerialNumber.contains(&escaped))
                    .add(Column::Location.contains(&escaped)),
            );
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(category_id) = query.category_id {
            select = select.filter(Column::CategoryId.eq(category_id));
        }

        let paginator = select
            .order_by_desc(Column::Id)
            .paginate(&self.db, query.size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| db_error("查询资产总数失败", e))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| db_error("查询资产页数失败", e))?;
        let items = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| db_error("查询资产列表失败", e))?;

        Ok(AssetListResponse {
            items: items.into_iter().map(|m| m.into_asset()).collect(),
            pagination: PaginationInfo::new(query.page, query.size, total, pages),
        })
    }

    async fn update_asset(&self, id: i64, req: UpdateAssetRequest) -> Result<Option<Asset>> {
        let Some(existing) = assets::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("查询资产失败", e))?
        else {
            return Ok(None);
        };

        let mut model: assets::ActiveModel = existing.into();
        if let Some(name) = req.name {
            model.name = Set(name);
        }
        if let Some(serial_number) = req.serial_number {
            model.serial_number = Set(serial_number);
        }
        if let Some(category_id) = req.category_id {
            model.category_id = Set(Some(category_id));
        }
        if let Some(assigned_to) = req.assigned_to {
            model.assigned_to = Set(Some(assigned_to));
        }
        if let Some(location) = req.location {
            model.location = Set(Some(location));
        }
        if let Some(purchase_date) = req.purchase_date {
            model.purchase_date = Set(Some(purchase_date));
        }
        if let Some(status) = req.status {
            model.status = Set(status.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| db_error("更新资产失败", e))?;
        Ok(Some(updated.into_asset()))
    }

    async fn delete_asset(&self, id: i64) -> Result<bool> {
        let result = assets::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| db_error("删除资产失败", e))?;
        Ok(result.rows_affected > 0)
    }

    // ---------- 盘点 ----------

    async fn list_asset_audits(&self, asset_id: i64) -> Result<Vec<AssetAudit>> {
        let items = asset_audits::Entity::find()
            .filter(asset_audits::Column::AssetId.eq(asset_id))
            .order_by_desc(asset_audits::Column::AuditDate)
            .order_by_desc(asset_audits::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("查询盘点记录失败", e))?;
        Ok(items.into_iter().map(|m| m.into_audit()).collect())
    }

    async fn create_asset_audit(
        &self,
        asset_id: i64,
        officer_id: i64,
        req: CreateAssetAuditRequest,
    ) -> Result<AssetAudit> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("开启事务失败", e))?;

        // 同步资产当前状态
        let synced = assets::Entity::update_many()
            .col_expr(
                assets::Column::Status,
                Expr::value(req.status_at_audit.to_string()),
            )
            .filter(assets::Column::Id.eq(asset_id))
            .exec(&txn)
            .await
            .map_err(|e| db_error("更新资产状态失败", e))?;
        if synced.rows_affected == 0 {
            return Err(SchoolError::not_found(format!("Asset {asset_id} not found")));
        }

        let model = asset_audits::ActiveModel {
            asset_id: Set(asset_id),
            officer_id: Set(Some(officer_id)),
            audit_date: Set(req.audit_date.unwrap_or_else(dates::today)),
            notes: Set(req.notes),
            status_at_audit: Set(req.status_at_audit.to_string()),
            ..Default::default()
        };
        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| db_error("创建盘点记录失败", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("提交事务失败", e))?;

        Ok(inserted.into_audit())
    }
}

#[cfg(test)]
mod tests {
    use super::super::memory_storage;
    use super::*;
    use crate::models::users::{NewUser, UserRole};
    use crate::storage::UserStorage;

    async fn keeper(storage: &SeaOrmStorage) -> i64 {
        storage
            .create_user(NewUser {
                username: "kebede0912".to_string(),
                email: None,
                password_hash: "hash".to_string(),
                role: UserRole::StoreMan,
                first_name: "Kebede".to_string(),
                last_name: "Bekele".to_string(),
                national_id: None,
            })
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_issue_and_return_material() {
        let storage = memory_storage().await;
        let keeper = keeper(&storage).await;
        let chalk = storage
            .create_material(CreateMaterialRequest {
                name: "Chalk".to_string(),
                description: None,
                quantity_total: 10,
                quantity_available: None,
                unit: None,
                managed_by: Some(keeper),
            })
            .await
            .unwrap();
        assert_eq!(chalk.unit, "pcs");

        let issue = NewIssue {
            material_id: chalk.id,
            issued_to: keeper,
            quantity: 7,
            issue_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
            expected_return_date: None,
        };
        let issued = storage.issue_material(issue.clone()).await.unwrap();
        assert_eq!(
            storage.get_material(chalk.id).await.unwrap().unwrap().quantity_available,
            3
        );

        // 剩余不足
        let err = storage.issue_material(issue).await.unwrap_err();
        assert_eq!(err.code(), "E010");

        let summary = storage.store_summary(keeper).await.unwrap();
        assert_eq!(summary.total_available, 3);
        assert_eq!(summary.outstanding_issues, 1);

        storage
            .return_material(issued.id, NaiveDate::from_ymd_opt(2025, 10, 5).unwrap())
            .await
            .unwrap();
        assert_eq!(
            storage.get_material(chalk.id).await.unwrap().unwrap().quantity_available,
            10
        );
    }

    #[tokio::test]
    async fn test_return_after_restock_is_capped_at_total() {
        let storage = memory_storage().await;
        let keeper = keeper(&storage).await;
        let paper = storage
            .create_material(CreateMaterialRequest {
                name: "A4 Paper".to_string(),
                description: None,
                quantity_total: 5,
                quantity_available: None,
                unit: Some("ream".to_string()),
                managed_by: Some(keeper),
            })
            .await
            .unwrap();

        let issued = storage
            .issue_material(NewIssue {
                material_id: paper.id,
                issued_to: keeper,
                quantity: 3,
                issue_date: NaiveDate::from_ymd_opt(2025, 10, 1).unwrap(),
                expected_return_date: None,
            })
            .await
            .unwrap();

        storage
            .update_material(
                paper.id,
                UpdateMaterialRequest {
                    quantity_available: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        storage
            .return_material(issued.id, NaiveDate::from_ymd_opt(2025, 10, 3).unwrap())
            .await
            .unwrap();

        let reloaded = storage.get_material(paper.id).await.unwrap().unwrap();
        assert_eq!((reloaded.quantity_total, reloaded.quantity_available), (5, 5));
    }

    #[tokio::test]
    async fn test_update_rejects_available_above_total() {
        let storage = memory_storage().await;
        let keeper = keeper(&storage).await;
        let chairs = storage
            .create_material(CreateMaterialRequest {
                name: "Chairs".to_string(),
                description: None,
                quantity_total: 4,
                quantity_available: None,
                unit: None,
                managed_by: Some(keeper),
            })
            .await
            .unwrap();

        let err = storage
            .update_material(
                chairs.id,
                UpdateMaterialRequest {
                    quantity_available: Some(6),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), SchoolError::validation("").code());
        assert_eq!(
            storage.get_material(chairs.id).await.unwrap().unwrap().quantity_available,
            4
        );
    }

    #[tokio::test]
    async fn test_audit_updates_asset_status() {
        let storage = memory_storage().await;
        let officer = keeper(&storage).await;
        let asset = storage
            .create_asset(
                CreateAssetRequest {
                    name: "Projector".to_string(),
                    serial_number: "PRJ-001".to_string(),
                    category_id: None,
                    assigned_to: None,
                    location: Some("Lab 1".to_string()),
                    purchase_date: None,
                    status: None,
                },
                officer,
            )
            .await
            .unwrap();
        assert_eq!(asset.status, AssetStatus::Working);

        storage
            .create_asset_audit(
                asset.id,
                officer,
                CreateAssetAuditRequest {
                    audit_date: None,
                    notes: Some("Lamp broken".to_string()),
                    status_at_audit: AssetStatus::Damaged,
                },
            )
            .await
            .unwrap();

        let reloaded = storage.get_asset(asset.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, AssetStatus::Damaged);
        assert_eq!(storage.list_asset_audits(asset.id).await.unwrap().len(), 1);
    }
}
