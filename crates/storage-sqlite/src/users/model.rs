//! Database models for users.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use pricetrack_core::errors::{DatabaseError, Error};
use pricetrack_core::users::{NewUser, Role, User};

/// Database model for users. The role is stored as its canonical
/// upper-case string.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub username: String,
    pub password_hash: String,
    pub role: String,
}

impl TryFrom<UserDB> for User {
    type Error = Error;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        let role = Role::from_str_opt(&db.role).ok_or_else(|| {
            Error::Database(DatabaseError::Internal(format!(
                "Unknown role '{}' for user {}",
                db.role, db.id
            )))
        })?;
        Ok(Self {
            id: db.id,
            username: db.username,
            password_hash: db.password_hash,
            role,
        })
    }
}

impl UserDB {
    pub fn from_new(new: NewUser, id: String) -> Self {
        Self {
            id: new.id.unwrap_or(id),
            username: new.username,
            password_hash: new.password_hash,
            role: new.role.as_str().to_string(),
        }
    }
}
