use super::*;
use crate::repo::create_user;
use crate::repo::tests::setup_test_db;

#[test]
fn test_create_user_item() {
    let pool = setup_test_db();
    let owner = create_user(&pool, "owner@example.com", "pw").unwrap();

    let item = create_user_item(&pool, owner.get_id(), "Lamp", "Bright").unwrap();

    assert!(item.get_id() > 0);
    assert_eq!(item.get_title(), "Lamp");
    assert_eq!(item.get_description(), "Bright");
    assert_eq!(item.get_owner_id(), owner.get_id());
}

#[test]
fn test_create_user_item_requires_existing_owner() {
    let pool = setup_test_db();

    let result = create_user_item(&pool, 77, "Orphan", "No owner");

    assert!(result.is_err());
    assert!(list_items(&pool, 0, 100).unwrap().is_empty());
}

#[test]
fn test_foreign_key_is_enforced_by_database() {
    use diesel::RunQueryDsl;

    let pool = setup_test_db();
    let conn = &mut pool.get().unwrap();

    let result = diesel::insert_into(items::table)
        .values(&NewItem {
            title: "Orphan",
            description: "Bypasses the repo check",
            owner_id: 12345,
        })
        .execute(conn);

    assert!(result.is_err());
}

#[test]
fn test_get_item() {
    let pool = setup_test_db();
    let owner = create_user(&pool, "owner@example.com", "pw").unwrap();
    let item = create_user_item(&pool, owner.get_id(), "Chair", "Wooden").unwrap();

    assert_eq!(get_item(&pool, item.get_id()).unwrap(), Some(item));
    assert!(get_item(&pool, 9999).unwrap().is_none());
}

#[test]
fn test_list_items_skip_and_limit() {
    let pool = setup_test_db();
    let owner = create_user(&pool, "owner@example.com", "pw").unwrap();
    for title in ["A", "B", "C", "D"] {
        create_user_item(&pool, owner.get_id(), title, "desc").unwrap();
    }

    let page = list_items(&pool, 2, 10).unwrap();
    let titles: Vec<&str> = page.iter().map(|i| i.get_title()).collect();
    assert_eq!(titles, vec!["C", "D"]);
}

#[test]
fn test_items_for_user_and_owner_lookup() {
    let pool = setup_test_db();
    let alice = create_user(&pool, "alice@example.com", "pw").unwrap();
    let bob = create_user(&pool, "bob@example.com", "pw").unwrap();
    let lamp = create_user_item(&pool, alice.get_id(), "Lamp", "Bright").unwrap();
    create_user_item(&pool, bob.get_id(), "Rug", "Soft").unwrap();

    let alices = items_for_user(&pool, &alice).unwrap();
    assert_eq!(alices, vec![lamp.clone()]);

    let owner = get_item_owner(&pool, &lamp).unwrap();
    assert_eq!(owner.get_id(), alice.get_id());
}
