//! Visit entity: one resolution of a known shortcut
//!
//! `shortcut_id` is a weak reference. The table carries no foreign key, so
//! visits outlive the shortcut they point at and simply drop out of joins.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "visits")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub timestamp: DateTimeUtc,
    pub shortcut_id: i64,
    pub ip_address: String,
    #[sea_orm(column_type = "Text")]
    pub path: String,
    #[sea_orm(column_type = "Text")]
    pub referer: String,
    pub utm_source: String,
    #[sea_orm(column_type = "Text")]
    pub user_agent: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::shortcut::Entity",
        from = "Column::ShortcutId",
        to = "super::shortcut::Column::Id"
    )]
    Shortcut,
}

impl Related<super::shortcut::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Shortcut.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
