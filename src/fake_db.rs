//! Read-only in-process data served by the demo endpoints
use serde::Serialize;

/// Item names keyed by path id, served by `GET /items/{item_id}`
const ITEMS: &[(&str, &str)] = &[("foo", "The Foo Wrestlers")];

/// A row of the fake listing served by `GET /items/`
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeItem {
    pub item_name: &'static str,
}

const FAKE_ITEMS_DB: &[FakeItem] = &[
    FakeItem { item_name: "Foo" },
    FakeItem { item_name: "Bar" },
    FakeItem { item_name: "Baz" },
];

/// Looks up an item name by id
pub fn lookup_item(item_id: &str) -> Option<&'static str> {
    ITEMS
        .iter()
        .find(|(id, _)| *id == item_id)
        .map(|(_, name)| *name)
}

/// Returns `limit` rows starting at `skip`, clamped to the table
pub fn fake_items_page(skip: usize, limit: usize) -> &'static [FakeItem] {
    let start = skip.min(FAKE_ITEMS_DB.len());
    let end = start.saturating_add(limit).min(FAKE_ITEMS_DB.len());
    &FAKE_ITEMS_DB[start..end]
}
