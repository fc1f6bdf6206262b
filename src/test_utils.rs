use crate::dto::{Image, Item};
use proptest::prelude::*;

/// Generates a strictly positive price
///
/// Quarters are exact in binary and print in a few digits, so JSON round
/// trips compare equal.
pub fn arb_price() -> impl Strategy<Value = f64> {
    (1u32..4_000_000u32).prop_map(|quarters| quarters as f64 / 4.0)
}

/// Generates a price that is zero or negative
pub fn arb_invalid_price() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(-0.0),
        (1u32..4_000_000u32).prop_map(|quarters| -(quarters as f64) / 4.0),
    ]
}

/// Generates an image with a well-formed https URL
pub fn arb_image() -> impl Strategy<Value = Image> {
    ("[a-z]{1,10}", "[a-z0-9]{1,10}").prop_map(|(host, name)| Image {
        url: format!("https://{}.example.com/{}.png", host, name),
        name,
    })
}

/// Generates an item satisfying every constraint
pub fn arb_valid_item() -> impl Strategy<Value = Item> {
    (
        "\\PC{1,40}",
        prop::option::of("\\PC{0,300}"),
        arb_price(),
        prop::option::of(arb_price()),
        prop::collection::btree_set("[a-z]{1,8}", 0..5),
        prop::option::of(prop::collection::vec(arb_image(), 0..3)),
    )
        .prop_map(|(name, description, price, tax, tags, images)| Item {
            name,
            description,
            price,
            tax,
            tags,
            images,
        })
}
