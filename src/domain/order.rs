use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Comment, Item, OrderItemModel, OrderRecord, WorkItemRecord};

use super::{tri_state::deserialize_some, work_status::WorkStatus};

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct NewComment{
    #[validate(length(min = 1, message = "comment author must not be empty"))]
    pub author: String,
    #[validate(length(min = 1, message = "comment text must not be empty"))]
    pub text: String
}

#[derive(Deserialize, Validate, Debug, Clone)]
pub struct NewOrder{
    pub order_number: i32,
    #[validate(range(min = 0, message = "billing amount must not be negative"))]
    pub billing_amount: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "received amount must not be negative"))]
    pub received_amount: i64,
    #[serde(default)]
    pub discount_order_id: Option<Uuid>,
    #[serde(default)]
    #[validate(range(min = 0, message = "discount cups must not be negative"))]
    pub discount_order_cups: i32,
    #[validate(length(min = 1, message = "an order needs at least one item"))]
    pub item_ids: Vec<Uuid>,
    #[serde(default)]
    #[validate(nested)]
    pub comments: Vec<NewComment>
}

/// Partial update of an order.
///
/// `item_ids` is tri-state: absent or `null` keeps the current items, a list
/// (even an empty one) replaces them wholesale.
#[derive(Deserialize, Validate, Debug, Clone, Default)]
pub struct OrderPatch{
    pub order_number: Option<i32>,
    pub ready_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
    #[validate(range(min = 0, message = "billing amount must not be negative"))]
    pub billing_amount: Option<i64>,
    #[validate(range(min = 0, message = "received amount must not be negative"))]
    pub received_amount: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub discount_order_id: Option<Option<Uuid>>,
    #[validate(range(min = 0, message = "discount cups must not be negative"))]
    pub discount_order_cups: Option<i32>,
    pub item_ids: Option<Vec<Uuid>>
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct OrderLine{
    pub order_item_id: Uuid,
    pub item_id: Uuid,
    pub name: String,
    pub abbreviation: String,
    pub price: i64,
    pub assignee: Option<String>
}

impl OrderLine {
    pub fn new(order_item: &OrderItemModel, item: &Item) -> Self {
        OrderLine{
            order_item_id: order_item.order_item_id,
            item_id: item.item_id,
            name: item.name.clone(),
            abbreviation: item.abbreviation.clone(),
            price: item.price,
            assignee: order_item.assignee.clone()
        }
    }
}

// Taken off the bill for each cup redeemed from an earlier order
pub const DISCOUNT_PER_CUP: i64 = 100;

/// An order together with its lines and comments, as handed to callers.
///
/// `billing_amount` is stored as the register sent it; `discount` is derived
/// from the redeemed cups and the number of lines.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Order{
    pub order_id: Uuid,
    pub order_number: i32,
    pub created_at: DateTime<Utc>,
    pub ready_at: Option<DateTime<Utc>>,
    pub served_at: Option<DateTime<Utc>>,
    pub billing_amount: i64,
    pub received_amount: i64,
    pub discount_order_id: Option<Uuid>,
    pub discount_order_cups: i32,
    pub total: i64,
    pub discount: i64,
    pub charge: i64,
    pub items: Vec<OrderLine>,
    pub comments: Vec<Comment>
}

impl Order {
    /// Builds the caller-facing order from its row and resolved lines.
    ///
    /// Fails only when the line prices do not fit in an `i64` total.
    pub fn assemble(record: OrderRecord, items: Vec<OrderLine>, comments: Vec<Comment>) -> Result<Self, String> {
        let total = items.iter()
            .try_fold(0_i64, |sum, line| sum.checked_add(line.price))
            .ok_or_else(|| format!("total of order {} exceeds the supported range", record.order_id))?;

        let cups = i64::try_from(items.len())
            .unwrap_or(i64::MAX)
            .min(i64::from(record.discount_order_cups));

        Ok(Order{
            order_id: record.order_id,
            order_number: record.order_number,
            created_at: record.created_at,
            ready_at: record.ready_at,
            served_at: record.served_at,
            billing_amount: record.billing_amount,
            received_amount: record.received_amount,
            discount_order_id: record.discount_order_id,
            discount_order_cups: record.discount_order_cups,
            total,
            discount: cups * DISCOUNT_PER_CUP,
            charge: record.received_amount - record.billing_amount,
            items,
            comments
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WorkItem{
    pub work_item_id: Uuid,
    pub order_item_id: Uuid,
    pub status: WorkStatus,
    pub updated_at: DateTime<Utc>
}

impl TryFrom<WorkItemRecord> for WorkItem {
    type Error = String;

    fn try_from(record: WorkItemRecord) -> Result<Self, Self::Error> {
        Ok(WorkItem{
            work_item_id: record.work_item_id,
            order_item_id: record.order_item_id,
            status: record.status.parse()?,
            updated_at: record.updated_at
        })
    }
}
