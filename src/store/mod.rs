//! Persistence seam for the order lifecycle.
//!
//! A [`Store`] hands out a [`Repository`] scoped to one transaction. Every
//! lifecycle operation runs inside exactly one transaction: returning `Err`
//! from the closure discards everything written through the repository.

mod memory;
mod postgres;

use std::{error::Error, fmt::Debug};

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::{models::{Comment, Item, ItemType, OrderItemModel, OrderRecord, WorkItemRecord}, utils::error_fmt_chain};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Error)]
pub enum StoreError{
    #[error("Failed to get connection from pool")]
    DbPoolError(#[from] r2d2::Error),
    #[error("Failed to run query")]
    RunQueryError(#[from] diesel::result::Error),
    #[error("Stored row is invalid: {0}")]
    CorruptRow(String)
}

impl Debug for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)?;
        error_fmt_chain(f, &self.source())
    }
}

/// Typed access to the tables, valid for the duration of one transaction.
///
/// Lookups by id return rows regardless of soft deletion; deciding whether a
/// tombstoned row is acceptable is left to the caller. Listing methods only
/// return live rows.
pub trait Repository {
    fn insert_item_type(&mut self, item_type: &ItemType) -> Result<(), StoreError>;
    fn find_item_type(&mut self, id: Uuid) -> Result<Option<ItemType>, StoreError>;
    fn find_live_item_type_by_name(&mut self, name: &str) -> Result<Option<ItemType>, StoreError>;
    /// Live item types ordered by name ascending
    fn list_item_types(&mut self) -> Result<Vec<ItemType>, StoreError>;
    fn update_item_type(&mut self, item_type: &ItemType) -> Result<usize, StoreError>;
    fn soft_delete_item_type(&mut self, id: Uuid, at: DateTime<Utc>) -> Result<usize, StoreError>;

    fn insert_item(&mut self, item: &Item) -> Result<(), StoreError>;
    fn find_item(&mut self, id: Uuid) -> Result<Option<Item>, StoreError>;
    fn find_items(&mut self, ids: &[Uuid]) -> Result<Vec<Item>, StoreError>;
    /// Live items ordered by name ascending
    fn list_items(&mut self) -> Result<Vec<Item>, StoreError>;
    fn update_item(&mut self, item: &Item) -> Result<usize, StoreError>;
    fn soft_delete_item(&mut self, id: Uuid, at: DateTime<Utc>) -> Result<usize, StoreError>;

    fn insert_order(&mut self, order: &OrderRecord) -> Result<(), StoreError>;
    fn find_order(&mut self, id: Uuid) -> Result<Option<OrderRecord>, StoreError>;
    /// All orders, newest first
    fn list_orders(&mut self) -> Result<Vec<OrderRecord>, StoreError>;
    fn update_order(&mut self, order: &OrderRecord) -> Result<usize, StoreError>;
    fn delete_order(&mut self, id: Uuid) -> Result<usize, StoreError>;
    /// Orders other than `excluding` whose discount references `target`
    fn count_discount_references(&mut self, target: Uuid, excluding: Uuid) -> Result<i64, StoreError>;
    fn clear_discount_references(&mut self, target: Uuid) -> Result<usize, StoreError>;

    fn insert_order_items(&mut self, order_items: &[OrderItemModel]) -> Result<(), StoreError>;
    /// Order items of one order in position order
    fn order_items_for(&mut self, order_id: Uuid) -> Result<Vec<OrderItemModel>, StoreError>;
    fn delete_order_items_for(&mut self, order_id: Uuid) -> Result<usize, StoreError>;

    fn insert_work_items(&mut self, work_items: &[WorkItemRecord]) -> Result<(), StoreError>;
    fn find_work_item(&mut self, id: Uuid) -> Result<Option<WorkItemRecord>, StoreError>;
    /// Exact match on the stored status text when a filter is given
    fn find_work_items(&mut self, status: Option<&str>) -> Result<Vec<WorkItemRecord>, StoreError>;
    fn update_work_item_status(&mut self, id: Uuid, status: &str, at: DateTime<Utc>) -> Result<usize, StoreError>;
    fn delete_work_items_for_order(&mut self, order_id: Uuid) -> Result<usize, StoreError>;

    fn insert_comments(&mut self, comments: &[Comment]) -> Result<(), StoreError>;
    /// Comments of one order, newest first
    fn comments_for(&mut self, order_id: Uuid) -> Result<Vec<Comment>, StoreError>;
    fn delete_comments_for(&mut self, order_id: Uuid) -> Result<usize, StoreError>;
}

pub trait Store: Send + Sync + 'static {
    /// Runs `f` in a transaction, committing only when it returns `Ok`.
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T, E>,
        E: From<StoreError>;
}
