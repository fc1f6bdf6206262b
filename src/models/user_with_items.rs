use serde::Serialize;

use super::{Item, User};

/// A user together with the items that reference it
///
/// This is a read view assembled from a query. Nothing here is written back;
/// changing ownership means changing `Item::owner_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserWithItems {
    #[serde(flatten)]
    pub user: User,
    pub items: Vec<Item>,
}

impl UserWithItems {
    /// Pairs users with already-grouped items
    ///
    /// `grouped` must be the output of `Vec<Item>::grouped_by(&users)`, i.e. one
    /// entry per user in the same order.
    pub fn zip(users: Vec<User>, grouped: Vec<Vec<Item>>) -> Vec<Self> {
        users
            .into_iter()
            .zip(grouped)
            .map(|(user, items)| Self { user, items })
            .collect()
    }
}
