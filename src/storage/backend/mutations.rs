//! Shortcut write operations for SeaOrmStorage
//!
//! Uniqueness of `code` is left to the database index: a duplicate insert or
//! a colliding update surfaces as a storage error.

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, sea_query::Expr};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::new_shortcut_to_active_model;
use crate::errors::{Result, ShortcutsError};
use crate::storage::models::{NewShortcut, ShortcutUpdate};

use migration::entities::shortcut;

impl SeaOrmStorage {
    /// Insert a shortcut and return its id
    pub async fn insert_shortcut(&self, new: &NewShortcut) -> Result<i64> {
        let active = new_shortcut_to_active_model(new, Utc::now());

        let result = shortcut::Entity::insert(active)
            .exec(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!("Failed to insert shortcut '{}': {}", new.code, e))
            })?;

        self.invalidate_count_cache();
        info!("Shortcut created: {} (id {})", new.code, result.last_insert_id);
        Ok(result.last_insert_id)
    }

    /// Overwrite code, url and editor; `updated` is set to the current time
    pub async fn update_shortcut(&self, update: &ShortcutUpdate) -> Result<()> {
        let result = shortcut::Entity::update_many()
            .col_expr(shortcut::Column::Code, Expr::value(update.code.clone()))
            .col_expr(shortcut::Column::Url, Expr::value(update.url.clone()))
            .col_expr(shortcut::Column::UpdatedBy, Expr::value(update.updated_by))
            .col_expr(shortcut::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(shortcut::Column::Id.eq(update.id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!(
                    "Failed to update shortcut {}: {}",
                    update.id, e
                ))
            })?;

        // MySQL reports zero affected rows when nothing changed, so confirm
        // the row is really missing before calling it not found.
        if result.rows_affected == 0 && self.get_shortcut_by_id(update.id).await?.is_none() {
            return Err(ShortcutsError::not_found(format!(
                "Shortcut {} does not exist",
                update.id
            )));
        }

        self.invalidate_count_cache();
        info!("Shortcut updated: {} (id {})", update.code, update.id);
        Ok(())
    }

    /// Physically delete a shortcut; deleting a missing id is not an error
    pub async fn delete_shortcut(&self, id: i64) -> Result<()> {
        let result = shortcut::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!("Failed to delete shortcut {}: {}", id, e))
            })?;

        if result.rows_affected > 0 {
            self.invalidate_count_cache();
            info!("Shortcut deleted: id {}", id);
        }
        Ok(())
    }
}
