//! Leaderboard 聚合查询
//!
//! Visits are grouped per shortcut and inner-joined to `shortcuts`, so
//! visits pointing at a deleted shortcut drop out of the result.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, sea_query::Expr,
};

use super::SeaOrmStorage;
use crate::errors::{Result, ShortcutsError};
use crate::storage::models::TopShortcut;

use migration::entities::{shortcut, visit};

/// 热门短链接查询结果行
#[derive(Debug, FromQueryResult)]
struct TopShortcutRow {
    id: i64,
    code: String,
    total_visits: i64,
}

impl From<TopShortcutRow> for TopShortcut {
    fn from(row: TopShortcutRow) -> Self {
        TopShortcut {
            id: row.id,
            code: row.code,
            total_visits: row.total_visits,
        }
    }
}

impl SeaOrmStorage {
    /// Most visited shortcuts with `start <= timestamp <= end`
    ///
    /// Ordered by visit count descending, ties by id ascending.
    pub async fn top_shortcuts_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        limit: u64,
    ) -> Result<Vec<TopShortcut>> {
        let rows = visit::Entity::find()
            .select_only()
            .column_as(visit::Column::ShortcutId, "id")
            .column_as(shortcut::Column::Code, "code")
            .column_as(visit::Column::Id.count(), "total_visits")
            .join(JoinType::InnerJoin, visit::Relation::Shortcut.def())
            .filter(visit::Column::Timestamp.gte(start))
            .filter(visit::Column::Timestamp.lte(end))
            .group_by(visit::Column::ShortcutId)
            .group_by(shortcut::Column::Code)
            .order_by_desc(Expr::cust("total_visits"))
            .order_by_asc(visit::Column::ShortcutId)
            .limit(limit)
            .into_model::<TopShortcutRow>()
            .all(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!("Failed to aggregate top shortcuts: {}", e))
            })?;

        Ok(rows.into_iter().map(TopShortcut::from).collect())
    }
}
