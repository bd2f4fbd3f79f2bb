use log::debug;
use std::sync::Arc;

use super::users_model::{NewUser, Role, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing user accounts.
///
/// Authentication (password verification, token issuance) lives at the HTTP
/// boundary; this service only owns the account records and their roles.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    fn get_users(&self) -> Result<Vec<User>> {
        self.repository.load_users()
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository
            .find_by_id(user_id)?
            .ok_or_else(|| Error::NotFound("User with this id not found".to_string()))
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository.find_by_username(username)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        if self
            .repository
            .find_by_username(&new_user.username)?
            .is_some()
        {
            return Err(Error::Conflict(
                "User with this username already exists".to_string(),
            ));
        }
        debug!("Creating user {}", new_user.username);
        self.repository.insert(new_user).await
    }

    async fn update_user_role(&self, user_id: String, role: Role) -> Result<User> {
        self.get_user(&user_id)?;
        self.repository.update_role(user_id, role).await
    }

    async fn delete_user(&self, user_id: String) -> Result<()> {
        self.get_user(&user_id)?;
        self.repository.delete(user_id).await?;
        Ok(())
    }
}
