use std::borrow::Cow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::fake_db::FakeItem;
use crate::shape::{FieldCheck, Shape};

/// Accepts absolute `http`/`https` URLs with a host
fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    let accepted = url::Url::parse(url)
        .is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some());
    if accepted {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message(Cow::from("invalid or missing URL scheme")))
    }
}

/// An image attached to an item
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
pub struct Image {
    /// Where the image lives; an http(s) URL with a host
    #[validate(custom(function = validate_http_url))]
    pub url: String,

    pub name: String,
}

impl Shape for Image {
    fn check_shape(check: &mut FieldCheck<'_>) {
        check.string("url").string("name");
    }
}

/// The item schema accepted and returned by the item endpoints
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
pub struct Item {
    pub name: String,

    /// Optional description, at most 300 characters
    #[serde(default)]
    #[validate(length(max = 300, message = "ensure this value has at most 300 characters"))]
    pub description: Option<String>,

    /// Price, strictly greater than zero
    #[validate(range(exclusive_min = 0.0, message = "ensure this value is greater than 0"))]
    pub price: f64,

    #[serde(default)]
    pub tax: Option<f64>,

    /// Unique tags; duplicates in the input collapse and output is sorted
    #[serde(default)]
    pub tags: BTreeSet<String>,

    #[serde(default)]
    #[validate(nested)]
    pub images: Option<Vec<Image>>,
}

impl Shape for Item {
    fn check_shape(check: &mut FieldCheck<'_>) {
        check
            .string("name")
            .optional_string("description")
            .float("price")
            .optional_float("tax")
            .string_set("tags")
            .nested_list::<Image>("images", false);
    }
}

impl Item {
    /// An item with only the required fields set
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: None,
            price,
            tax: None,
            tags: BTreeSet::new(),
            images: None,
        }
    }
}

/// A bundle of items sold together
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
pub struct Offer {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub price: f64,

    #[validate(nested)]
    pub items: Vec<Item>,
}

impl Shape for Offer {
    fn check_shape(check: &mut FieldCheck<'_>) {
        check
            .string("name")
            .optional_string("description")
            .float("price")
            .nested_list::<Item>("items", true);
    }
}

/// A single item wrapped under an `item` key in the request body
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq)]
pub struct EmbeddedItem {
    #[validate(nested)]
    pub item: Item,
}

impl Shape for EmbeddedItem {
    fn check_shape(check: &mut FieldCheck<'_>) {
        check.nested::<Item>("item");
    }
}

/// Response for `PUT /items/{item_id}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UpdatedItem {
    pub item_id: i64,
    pub item: Item,
}

/// Public user fields
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq, Eq)]
pub struct BaseUser {
    pub username: String,

    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,

    #[serde(default)]
    pub full_name: Option<String>,
}

impl Shape for BaseUser {
    fn check_shape(check: &mut FieldCheck<'_>) {
        check.string("username").string("email").optional_string("full_name");
    }
}

/// Incoming user registration, the public fields plus a password
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserIn {
    #[serde(flatten)]
    pub base: BaseUser,

    pub password: String,
}

/// The public fields sit at the top level of the payload, so their errors do too
impl Validate for UserIn {
    fn validate(&self) -> Result<(), ValidationErrors> {
        self.base.validate()
    }
}

impl Shape for UserIn {
    fn check_shape(check: &mut FieldCheck<'_>) {
        BaseUser::check_shape(check);
        check.string("password");
    }
}

impl From<UserIn> for BaseUser {
    fn from(user: UserIn) -> Self {
        user.base
    }
}

/// Search and paging parameters shared by the listing endpoints
#[derive(Serialize, Deserialize, Validate, Debug, Clone, PartialEq, Eq)]
pub struct CommonQueryParams {
    #[serde(default)]
    pub q: Option<String>,

    #[serde(default)]
    pub skip: usize,

    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Shape for CommonQueryParams {
    fn check_shape(check: &mut FieldCheck<'_>) {
        check.optional_string("q").optional_unsigned("skip").optional_unsigned("limit");
    }
}

fn default_limit() -> usize {
    100
}

impl Default for CommonQueryParams {
    fn default() -> Self {
        Self {
            q: None,
            skip: 0,
            limit: default_limit(),
        }
    }
}

/// Response for `GET /items/`
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FakeItemPage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    pub items: Vec<FakeItem>,
}

/// Query string for `POST /item/`
#[derive(Deserialize, Validate, Debug, Clone)]
pub struct ItemNameQuery {
    pub name: String,
}

impl Shape for ItemNameQuery {
    fn check_shape(check: &mut FieldCheck<'_>) {
        check.string("name");
    }
}

/// Form body for `POST /login/`
#[derive(Deserialize, Serialize, Validate, Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl Shape for LoginForm {
    fn check_shape(check: &mut FieldCheck<'_>) {
        check.string("username").string("password");
    }
}
