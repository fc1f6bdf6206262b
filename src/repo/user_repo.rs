use anyhow::{anyhow, Result};
use diesel::prelude::*;
use tracing::{debug, instrument};

use crate::db::DbPool;
use crate::models::{Item, NewUser, User, UserWithItems};
use crate::password;
use crate::schema::{items, users};

/// Creates a user with a freshly hashed password
///
/// ### Errors
///
/// Returns an error if a user with the same email already exists, or if the
/// insert itself fails.
#[instrument(skip(pool, plain_password))]
pub fn create_user(pool: &DbPool, email: &str, plain_password: &str) -> Result<User> {
    let conn = &mut pool.get()?;

    if get_user_by_email_conn(conn, email)?.is_some() {
        return Err(anyhow!("Email already registered: {}", email));
    }

    let hashed = password::hash_password(plain_password)?;
    let user = diesel::insert_into(users::table)
        .values(&NewUser {
            email,
            hashed_password: &hashed,
        })
        .returning(User::as_returning())
        .get_result(conn)?;

    debug!(user_id = user.get_id(), "created user");
    Ok(user)
}

/// Retrieves a user by id
pub fn get_user(pool: &DbPool, user_id: i32) -> Result<Option<User>> {
    let conn = &mut pool.get()?;
    let user = users::table
        .find(user_id)
        .select(User::as_select())
        .first(conn)
        .optional()?;
    Ok(user)
}

/// Retrieves a user by email
pub fn get_user_by_email(pool: &DbPool, email: &str) -> Result<Option<User>> {
    let conn = &mut pool.get()?;
    get_user_by_email_conn(conn, email)
}

fn get_user_by_email_conn(conn: &mut SqliteConnection, email: &str) -> Result<Option<User>> {
    let user = users::table
        .filter(users::email.eq(email))
        .select(User::as_select())
        .first(conn)
        .optional()?;
    Ok(user)
}

/// Lists users ordered by id, skipping `skip` rows and returning at most `limit`
pub fn list_users(pool: &DbPool, skip: i64, limit: i64) -> Result<Vec<User>> {
    let conn = &mut pool.get()?;
    let result = users::table
        .order(users::id.asc())
        .offset(skip)
        .limit(limit)
        .select(User::as_select())
        .load(conn)?;
    Ok(result)
}

/// Marks a user inactive
///
/// ### Errors
///
/// Returns an error if no user has the given id.
pub fn deactivate_user(pool: &DbPool, user_id: i32) -> Result<User> {
    let conn = &mut pool.get()?;
    let user = diesel::update(users::table.find(user_id))
        .set(users::is_active.eq(false))
        .returning(User::as_returning())
        .get_result(conn)
        .optional()?
        .ok_or_else(|| anyhow!("User not found: {}", user_id))?;
    Ok(user)
}

/// Checks an email/password pair
///
/// Returns the user when the password matches, `None` when the user does not
/// exist or the password is wrong.
pub fn verify_user_password(pool: &DbPool, email: &str, plain_password: &str) -> Result<Option<User>> {
    let Some(user) = get_user_by_email(pool, email)? else {
        return Ok(None);
    };
    if password::verify_password(plain_password, user.get_hashed_password())? {
        Ok(Some(user))
    } else {
        Ok(None)
    }
}

/// Loads every user along with the items they own
pub fn users_with_items(pool: &DbPool) -> Result<Vec<UserWithItems>> {
    let conn = &mut pool.get()?;
    let all_users = users::table
        .order(users::id.asc())
        .select(User::as_select())
        .load(conn)?;
    let owned = Item::belonging_to(&all_users)
        .order(items::id.asc())
        .select(Item::as_select())
        .load(conn)?
        .grouped_by(&all_users);
    Ok(UserWithItems::zip(all_users, owned))
}
