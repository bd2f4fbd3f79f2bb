use pricetrack_core::errors::Result;
use pricetrack_core::users::{NewUser, Role, User, UserRepositoryTrait};

use super::model::UserDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::schema::users::dsl::*;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;
use uuid::Uuid;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn load_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let users_db = users
            .order(username.asc())
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;
        users_db.into_iter().map(User::try_from).collect()
    }

    fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        user_db.map(User::try_from).transpose()
    }

    fn find_by_username(&self, name: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user_db = users
            .filter(username.eq(name))
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        user_db.map(User::try_from).transpose()
    }

    async fn insert(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let user_db = UserDB::from_new(new_user, Uuid::new_v4().to_string());
                let result_db = diesel::insert_into(users::table)
                    .values(&user_db)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                User::try_from(result_db)
            })
            .await
    }

    async fn update_role(&self, user_id: String, new_role: Role) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let result_db = diesel::update(users.find(user_id))
                    .set(role.eq(new_role.as_str()))
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                User::try_from(result_db)
            })
            .await
    }

    async fn delete(&self, user_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(users.find(user_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
