use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use super::User;

/// An item owned by a user, stored in the `items` table
///
/// `owner_id` is the single source of truth for ownership. The foreign key is
/// enforced by SQLite, so every stored item points at an existing user.
#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[diesel(belongs_to(User, foreign_key = owner_id))]
#[diesel(table_name = crate::schema::items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Item {
    /// Integer primary key assigned by the database
    id: i32,

    /// Short title of the item
    title: String,

    /// Free-form description
    description: String,

    /// The owning user's id
    owner_id: i32,
}

impl Item {
    pub fn new_with_fields(id: i32, title: String, description: String, owner_id: i32) -> Self {
        Self {
            id,
            title,
            description,
            owner_id,
        }
    }

    pub fn get_id(&self) -> i32 {
        self.id
    }

    pub fn get_title(&self) -> &str {
        &self.title
    }

    pub fn get_description(&self) -> &str {
        &self.description
    }

    pub fn get_owner_id(&self) -> i32 {
        self.owner_id
    }
}

/// Insertable row for a new item
#[derive(Insertable, Debug)]
#[diesel(table_name = crate::schema::items)]
pub struct NewItem<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub owner_id: i32,
}
