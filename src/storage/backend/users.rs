//! User account operations for SeaOrmStorage

use chrono::Utc;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, sea_query::Expr};
use tracing::info;

use super::SeaOrmStorage;
use super::converters::{model_to_user, new_user_to_active_model};
use crate::errors::{Result, ShortcutsError};
use crate::storage::models::{NewUser, User, UserUpdate};

use migration::entities::user;

impl SeaOrmStorage {
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| ShortcutsError::storage(format!("Failed to look up user: {}", e)))?;

        Ok(model.map(model_to_user))
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ShortcutsError::storage(format!("Failed to look up user {}: {}", id, e)))?;

        Ok(model.map(model_to_user))
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let models = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| ShortcutsError::storage(format!("Failed to list users: {}", e)))?;

        Ok(models.into_iter().map(model_to_user).collect())
    }

    /// Insert a user; a duplicate email is a storage error
    pub async fn insert_user(&self, new: &NewUser) -> Result<i64> {
        let result = user::Entity::insert(new_user_to_active_model(new, Utc::now()))
            .exec(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!("Failed to insert user '{}': {}", new.email, e))
            })?;

        info!("User created: {} (id {})", new.email, result.last_insert_id);
        Ok(result.last_insert_id)
    }

    pub async fn update_user(&self, update: &UserUpdate) -> Result<()> {
        let result = user::Entity::update_many()
            .col_expr(user::Column::Name, Expr::value(update.name.clone()))
            .col_expr(user::Column::Email, Expr::value(update.email.clone()))
            .col_expr(user::Column::Active, Expr::value(update.active))
            .col_expr(user::Column::Admin, Expr::value(update.admin))
            .filter(user::Column::Id.eq(update.id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!("Failed to update user {}: {}", update.id, e))
            })?;

        if result.rows_affected == 0 && self.get_user(update.id).await?.is_none() {
            return Err(ShortcutsError::not_found(format!(
                "User {} does not exist",
                update.id
            )));
        }

        info!("User updated: {} (id {})", update.email, update.id);
        Ok(())
    }

    /// Deleting a missing id is not an error
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| ShortcutsError::storage(format!("Failed to delete user {}: {}", id, e)))?;

        if result.rows_affected > 0 {
            info!("User deleted: id {}", id);
        }
        Ok(())
    }

    pub async fn touch_last_logged_in(&self, id: i64) -> Result<()> {
        user::Entity::update_many()
            .col_expr(user::Column::LastLoggedIn, Expr::value(Some(Utc::now())))
            .filter(user::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                ShortcutsError::storage(format!(
                    "Failed to update last login for user {}: {}",
                    id, e
                ))
            })?;
        Ok(())
    }
}
