use crate::errors::Result;
use crate::users::users_model::{NewUser, Role, User};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn load_users(&self) -> Result<Vec<User>>;
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn insert(&self, new_user: NewUser) -> Result<User>;
    async fn update_role(&self, user_id: String, role: Role) -> Result<User>;
    async fn delete(&self, user_id: String) -> Result<usize>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_users(&self) -> Result<Vec<User>>;
    fn get_user(&self, user_id: &str) -> Result<User>;
    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    async fn update_user_role(&self, user_id: String, role: Role) -> Result<User>;
    async fn delete_user(&self, user_id: String) -> Result<()>;
}
