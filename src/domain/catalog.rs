use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::tri_state::deserialize_some;

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct NewItemType{
    #[validate(length(min = 1, message = "item type name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "item type display name must not be empty"))]
    pub display_name: String
}

#[derive(Deserialize, Validate, Debug, Clone, Default)]
pub struct ItemTypePatch{
    #[validate(length(min = 1, message = "item type name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "item type display name must not be empty"))]
    pub display_name: Option<String>
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct NewItem{
    #[validate(length(min = 1, message = "item name must not be empty"))]
    pub name: String,
    pub abbreviation: String,
    #[validate(range(min = 0i64, max = 1_000_000_000_000i64, message = "price must be between 0 and 1000000000000"))]
    pub price: i64,
    pub key: String,
    pub item_type_id: Uuid,
    #[serde(default)]
    pub assignee: Option<String>
}

// Omitted fields keep their stored value, `"assignee": null` clears it
#[derive(Deserialize, Validate, Debug, Clone, Default)]
pub struct ItemPatch{
    #[validate(length(min = 1, message = "item name must not be empty"))]
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    #[validate(range(min = 0i64, max = 1_000_000_000_000i64, message = "price must be between 0 and 1000000000000"))]
    pub price: Option<i64>,
    pub key: Option<String>,
    pub item_type_id: Option<Uuid>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub assignee: Option<Option<String>>
}
