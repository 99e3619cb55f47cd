//! Read-only shortcut queries for SeaOrmStorage

use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, sea_query::LikeExpr,
};
use tracing::debug;

use super::SeaOrmStorage;
use super::converters::model_to_shortcut;
use crate::errors::{Result, ShortcutsError};
use crate::storage::models::{Shortcut, ShortcutFilter};

use migration::entities::shortcut;

/// Largest page size honoured by `list_shortcuts`
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Escape LIKE wildcards so a prefix only matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl SeaOrmStorage {
    /// Exact, byte-for-byte code lookup
    pub async fn get_shortcut_by_code(&self, code: &str) -> Result<Option<Shortcut>> {
        let model = shortcut::Entity::find()
            .filter(shortcut::Column::Code.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!("Failed to look up code '{}': {}", code, e))
            })?;

        // Some collations compare case-insensitively; keep only exact matches
        Ok(model.filter(|m| m.code == code).map(model_to_shortcut))
    }

    pub async fn get_shortcut_by_id(&self, id: i64) -> Result<Option<Shortcut>> {
        let model = shortcut::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!("Failed to look up shortcut {}: {}", id, e))
            })?;

        Ok(model.map(model_to_shortcut))
    }

    /// 分页加载短链接（带 COUNT 缓存）
    ///
    /// Ordered by most recently updated first. The total counts every match
    /// of the prefix regardless of the page requested.
    pub async fn list_shortcuts(&self, filter: &ShortcutFilter) -> Result<(Vec<Shortcut>, u64)> {
        let prefix = filter.code_prefix.clone().unwrap_or_default();

        let mut query = shortcut::Entity::find();
        if !prefix.is_empty() {
            let pattern = format!("{}%", escape_like(&prefix));
            query = query.filter(shortcut::Column::Code.like(LikeExpr::new(pattern).escape('\\')));
        }
        let query = query
            .order_by_desc(shortcut::Column::UpdatedAt)
            .order_by_desc(shortcut::Column::Id);

        let cache_key = format!("count:prefix={}", prefix);
        let total = if let Some(cached) = self.count_cache.get(&cache_key) {
            debug!("count cache hit: key={}, value={}", cache_key, cached);
            cached
        } else {
            let count = query
                .clone()
                .count(&self.db)
                .await
                .map_err(|e| ShortcutsError::storage(format!("Failed to count shortcuts: {}", e)))?;
            self.count_cache.insert(cache_key, count);
            count
        };

        let models = if filter.limit > 0 {
            let limit = filter.limit.min(MAX_PAGE_SIZE);
            let page_index = filter.page.max(1) - 1;
            if page_index.checked_mul(limit).is_none() {
                return Err(ShortcutsError::validation(format!(
                    "Page {} is out of range",
                    filter.page
                )));
            }
            query
                .paginate(&self.db, limit as u64)
                .fetch_page(page_index as u64)
                .await
        } else {
            query.all(&self.db).await
        }
        .map_err(|e| ShortcutsError::storage(format!("Failed to list shortcuts: {}", e)))?;

        Ok((models.into_iter().map(model_to_shortcut).collect(), total))
    }
}
