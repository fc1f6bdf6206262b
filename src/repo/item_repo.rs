use anyhow::{anyhow, Result};
use diesel::prelude::*;
use tracing::{debug, instrument};

use crate::db::DbPool;
use crate::models::{Item, NewItem, User};
use crate::schema::{items, users};

/// Creates an item owned by `owner_id`
///
/// ### Errors
///
/// Returns an error if the owner does not exist.
#[instrument(skip(pool, description))]
pub fn create_user_item(pool: &DbPool, owner_id: i32, title: &str, description: &str) -> Result<Item> {
    let conn = &mut pool.get()?;

    let owner_exists: bool = diesel::select(diesel::dsl::exists(users::table.find(owner_id)))
        .get_result(conn)?;
    if !owner_exists {
        return Err(anyhow!("Owner not found: {}", owner_id));
    }

    let item = diesel::insert_into(items::table)
        .values(&NewItem {
            title,
            description,
            owner_id,
        })
        .returning(Item::as_returning())
        .get_result(conn)?;

    debug!(item_id = item.get_id(), "created item");
    Ok(item)
}

/// Retrieves an item by id
pub fn get_item(pool: &DbPool, item_id: i32) -> Result<Option<Item>> {
    let conn = &mut pool.get()?;
    let item = items::table
        .find(item_id)
        .select(Item::as_select())
        .first(conn)
        .optional()?;
    Ok(item)
}

/// Lists items ordered by id, skipping `skip` rows and returning at most `limit`
pub fn list_items(pool: &DbPool, skip: i64, limit: i64) -> Result<Vec<Item>> {
    let conn = &mut pool.get()?;
    let result = items::table
        .order(items::id.asc())
        .offset(skip)
        .limit(limit)
        .select(Item::as_select())
        .load(conn)?;
    Ok(result)
}

/// Lists the items owned by `user`
pub fn items_for_user(pool: &DbPool, user: &User) -> Result<Vec<Item>> {
    let conn = &mut pool.get()?;
    let result = Item::belonging_to(user)
        .order(items::id.asc())
        .select(Item::as_select())
        .load(conn)?;
    Ok(result)
}

/// Looks up the owner of an item through its foreign key
pub fn get_item_owner(pool: &DbPool, item: &Item) -> Result<User> {
    let conn = &mut pool.get()?;
    let owner = users::table
        .find(item.get_owner_id())
        .select(User::as_select())
        .first(conn)?;
    Ok(owner)
}

#[cfg(test)]
mod tests;
