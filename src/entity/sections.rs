//! 班级分部实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "sections")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub class_group_id: i64,
    pub name: String,
    pub advisor_id: Option<i64>,
    pub name_caller_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::class_groups::Entity",
        from = "Column::ClassGroupId",
        to = "super::class_groups::Column::Id"
    )]
    ClassGroup,
}

impl Related<super::class_groups::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassGroup.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_section(
        self,
        class_group: Option<super::class_groups::Model>,
    ) -> crate::models::academics::Section {
        crate::models::academics::Section {
            id: self.id,
            class_group_id: self.class_group_id,
            class_group_name: class_group.map(|g| g.name),
            name: self.name,
            advisor_id: self.advisor_id,
            name_caller_id: self.name_caller_id,
        }
    }
}
