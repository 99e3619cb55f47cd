//! Visit log operations for SeaOrmStorage

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::{model_to_visit, new_visit_to_active_model};
use crate::analytics::VisitSink;
use crate::errors::{Result, ShortcutsError};
use crate::storage::models::{NewVisit, Visit};

use migration::entities::visit;

impl SeaOrmStorage {
    /// Append one visit; `shortcut_id` is not checked against `shortcuts`
    pub async fn insert_visit(&self, new: NewVisit) -> Result<i64> {
        let shortcut_id = new.shortcut_id;
        let result = visit::Entity::insert(new_visit_to_active_model(new))
            .exec(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!(
                    "Failed to record visit for shortcut {}: {}",
                    shortcut_id, e
                ))
            })?;

        debug!("Visit recorded for shortcut {}", shortcut_id);
        Ok(result.last_insert_id)
    }

    pub async fn count_visits(&self) -> Result<u64> {
        visit::Entity::find()
            .count(&self.db)
            .await
            .map_err(|e| ShortcutsError::storage(format!("Failed to count visits: {}", e)))
    }

    /// Visits of one shortcut, newest first
    pub async fn visits_for_shortcut(&self, shortcut_id: i64) -> Result<Vec<Visit>> {
        let models = visit::Entity::find()
            .filter(visit::Column::ShortcutId.eq(shortcut_id))
            .order_by_desc(visit::Column::Timestamp)
            .order_by_desc(visit::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ShortcutsError::storage(format!("Failed to load visits: {}", e)))?;

        Ok(models.into_iter().map(model_to_visit).collect())
    }
}

#[async_trait]
impl VisitSink for SeaOrmStorage {
    async fn record_visit(&self, visit: NewVisit) -> anyhow::Result<()> {
        self.insert_visit(visit).await?;
        Ok(())
    }
}
