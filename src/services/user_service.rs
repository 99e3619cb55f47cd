//! User account management

use std::sync::Arc;

use tracing::info;

use crate::errors::{Result, ShortcutsError};
use crate::storage::{NewUser, SeaOrmStorage, User, UserUpdate};

/// Caller-supplied user fields
#[derive(Debug, Clone)]
pub struct UserInput {
    pub name: String,
    pub email: String,
    pub active: bool,
    pub admin: bool,
}

impl UserInput {
    fn validated(self) -> Result<Self> {
        let email = self.email.trim().to_string();
        if email.is_empty() || !email.contains('@') {
            return Err(ShortcutsError::validation(format!(
                "Invalid email address: '{}'",
                email
            )));
        }
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ShortcutsError::validation("Name cannot be empty"));
        }
        Ok(Self {
            name,
            email,
            ..self
        })
    }
}

pub struct UserService {
    storage: Arc<SeaOrmStorage>,
}

impl UserService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.storage.list_users().await
    }

    pub async fn get(&self, id: i64) -> Result<User> {
        self.storage
            .get_user(id)
            .await?
            .ok_or_else(|| ShortcutsError::not_found(format!("User {} does not exist", id)))
    }

    pub async fn find(&self, id: i64) -> Result<Option<User>> {
        self.storage.get_user(id).await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.storage.find_user_by_email(email).await
    }

    pub async fn create(&self, input: UserInput) -> Result<i64> {
        let input = input.validated()?;
        self.storage
            .insert_user(&NewUser {
                name: input.name,
                email: input.email,
                active: input.active,
                admin: input.admin,
            })
            .await
    }

    pub async fn update(&self, id: i64, input: UserInput) -> Result<i64> {
        let input = input.validated()?;
        self.storage
            .update_user(&UserUpdate {
                id,
                name: input.name,
                email: input.email,
                active: input.active,
                admin: input.admin,
            })
            .await?;
        Ok(id)
    }

    pub async fn delete(&self, id: i64) -> Result<i64> {
        self.storage.delete_user(id).await?;
        Ok(id)
    }

    pub async fn record_login(&self, id: i64) -> Result<()> {
        self.storage.touch_last_logged_in(id).await
    }

    /// Make sure an active admin with this email exists
    ///
    /// An existing account keeps its name and is promoted and reactivated.
    pub async fn ensure_admin(&self, email: &str, name: &str) -> Result<User> {
        let email = email.trim();
        match self.storage.find_user_by_email(email).await? {
            Some(user) if user.admin && user.active => Ok(user),
            Some(user) => {
                self.storage
                    .update_user(&UserUpdate {
                        id: user.id,
                        name: user.name.clone(),
                        email: user.email.clone(),
                        active: true,
                        admin: true,
                    })
                    .await?;
                info!("Promoted {} to active admin", user.email);
                self.get(user.id).await
            }
            None => {
                let id = self
                    .create(UserInput {
                        name: name.to_string(),
                        email: email.to_string(),
                        active: true,
                        admin: true,
                    })
                    .await?;
                info!("Created admin account {}", email);
                self.get(id).await
            }
        }
    }
}
