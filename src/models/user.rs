use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// A registered user as stored in the `users` table
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    /// Integer primary key assigned by the database
    id: i32,

    /// Login email, unique across users
    email: String,

    /// Argon2 PHC string; never sent to clients
    #[serde(skip_serializing, default)]
    hashed_password: String,

    /// Whether the account is active
    is_active: bool,
}

impl User {
    pub fn new_with_fields(id: i32, email: String, hashed_password: String, is_active: bool) -> Self {
        Self {
            id,
            email,
            hashed_password,
            is_active,
        }
    }

    pub fn get_id(&self) -> i32 {
        self.id
    }

    pub fn get_email(&self) -> &str {
        &self.email
    }

    pub fn get_hashed_password(&self) -> &str {
        &self.hashed_password
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }
}

/// Insertable row for a new user
///
/// `is_active` is left out so the column default applies.
#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub hashed_password: &'a str,
}
