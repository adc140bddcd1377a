use chrono::{DateTime, Utc};
use diesel::prelude::{AsChangeset, Insertable, Queryable, Selectable};
use serde::Serialize;
use uuid::Uuid;

use crate::schema::{comments, item_types, items, order_items, order_work_items, orders};

#[derive(Queryable, Selectable, Insertable, AsChangeset, Serialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = item_types, primary_key(item_type_id))]
#[diesel(treat_none_as_null = true)]
pub struct ItemType{
    pub item_type_id: Uuid,
    pub name: String,
    pub display_name: String,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Serialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = items, primary_key(item_id))]
#[diesel(treat_none_as_null = true)]
pub struct Item{
    pub item_id: Uuid,
    pub name: String,
    pub abbreviation: String,
    pub price: i64,
    pub key: String,
    pub assignee: Option<String>,
    pub item_type_id: Uuid,
    #[serde(skip)]
    pub deleted_at: Option<DateTime<Utc>>
}

impl ItemType {
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

impl Item {
    pub fn is_live(&self) -> bool {
        self.deleted_at.is_none()
    }
}

#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = orders, primary_key(order_id))]
#[diesel(treat_none_as_null = true)]
pub struct OrderRecord{
    pub order_id: Uuid,
    pub order_number: i32,
    pub created_at: DateTime<Utc>,
    pub ready_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
    pub billing_amount: i64,
    pub received_amount: i64,
    pub discount_order_id: Option<Uuid>,
    pub discount_order_cups: i32
}

// One unit of an item within an order
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = order_items)]
pub struct OrderItemModel{
    pub order_item_id: Uuid,
    pub order_id: Uuid,
    pub item_id: Uuid,
    pub assignee: Option<String>,
    pub position: i32
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = order_work_items)]
pub struct WorkItemRecord{
    pub work_item_id: Uuid,
    pub order_item_id: Uuid,
    pub status: String,
    pub updated_at: DateTime<Utc>
}

#[derive(Queryable, Selectable, Insertable, Serialize, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = comments)]
pub struct Comment{
    pub comment_id: Uuid,
    pub order_id: Uuid,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>
}
