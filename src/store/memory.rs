use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::{Comment, Item, ItemType, OrderItemModel, OrderRecord, WorkItemRecord};

use super::{Repository, Store, StoreError};

#[derive(Clone, Default)]
struct Tables{
    item_types: Vec<ItemType>,
    items: Vec<Item>,
    orders: Vec<OrderRecord>,
    order_items: Vec<OrderItemModel>,
    work_items: Vec<WorkItemRecord>,
    comments: Vec<Comment>
}

/// Process-local store used for tests and for running without postgres.
///
/// Transactions are serialized by the lock and work on a copy of the tables;
/// the copy replaces the live tables only when the closure succeeds, so a
/// panic inside one transaction leaves the store usable.
#[derive(Clone, Default)]
pub struct MemoryStore{
    tables: Arc<Mutex<Tables>>
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl Store for MemoryStore {
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T, E>,
        E: From<StoreError>
    {
        // A panicking transaction never swapped its copy in, so the tables are intact
        let mut guard = self.tables.lock().unwrap_or_else(PoisonError::into_inner);

        let mut repo = MemoryRepository{ tables: guard.clone() };
        let res = f(&mut repo)?;
        *guard = repo.tables;

        Ok(res)
    }
}

struct MemoryRepository{
    tables: Tables
}

impl Repository for MemoryRepository {
    fn insert_item_type(&mut self, item_type: &ItemType) -> Result<(), StoreError> {
        self.tables.item_types.push(item_type.clone());
        Ok(())
    }

    fn find_item_type(&mut self, id: Uuid) -> Result<Option<ItemType>, StoreError> {
        Ok(self.tables.item_types.iter().find(|t| t.item_type_id == id).cloned())
    }

    fn find_live_item_type_by_name(&mut self, name: &str) -> Result<Option<ItemType>, StoreError> {
        Ok(self.tables.item_types
            .iter()
            .find(|t| t.name == name && t.is_live())
            .cloned())
    }

    fn list_item_types(&mut self) -> Result<Vec<ItemType>, StoreError> {
        let mut res: Vec<ItemType> = self.tables.item_types
            .iter()
            .filter(|t| t.is_live())
            .cloned()
            .collect();
        res.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(res)
    }

    fn update_item_type(&mut self, item_type: &ItemType) -> Result<usize, StoreError> {
        Ok(replace_where(&mut self.tables.item_types, item_type, |t| t.item_type_id == item_type.item_type_id))
    }

    fn soft_delete_item_type(&mut self, id: Uuid, at: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut rows = 0;
        for item_type in self.tables.item_types.iter_mut().filter(|t| t.item_type_id == id && t.is_live()) {
            item_type.deleted_at = Some(at);
            rows += 1;
        }
        Ok(rows)
    }

    fn insert_item(&mut self, item: &Item) -> Result<(), StoreError> {
        self.tables.items.push(item.clone());
        Ok(())
    }

    fn find_item(&mut self, id: Uuid) -> Result<Option<Item>, StoreError> {
        Ok(self.tables.items.iter().find(|i| i.item_id == id).cloned())
    }

    fn find_items(&mut self, ids: &[Uuid]) -> Result<Vec<Item>, StoreError> {
        Ok(self.tables.items
            .iter()
            .filter(|i| ids.contains(&i.item_id))
            .cloned()
            .collect())
    }

    fn list_items(&mut self) -> Result<Vec<Item>, StoreError> {
        let mut res: Vec<Item> = self.tables.items
            .iter()
            .filter(|i| i.is_live())
            .cloned()
            .collect();
        res.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(res)
    }

    fn update_item(&mut self, item: &Item) -> Result<usize, StoreError> {
        Ok(replace_where(&mut self.tables.items, item, |i| i.item_id == item.item_id))
    }

    fn soft_delete_item(&mut self, id: Uuid, at: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut rows = 0;
        for item in self.tables.items.iter_mut().filter(|i| i.item_id == id && i.is_live()) {
            item.deleted_at = Some(at);
            rows += 1;
        }
        Ok(rows)
    }

    fn insert_order(&mut self, order: &OrderRecord) -> Result<(), StoreError> {
        self.tables.orders.push(order.clone());
        Ok(())
    }

    fn find_order(&mut self, id: Uuid) -> Result<Option<OrderRecord>, StoreError> {
        Ok(self.tables.orders.iter().find(|o| o.order_id == id).cloned())
    }

    fn list_orders(&mut self) -> Result<Vec<OrderRecord>, StoreError> {
        let mut res = self.tables.orders.clone();
        res.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(res)
    }

    fn update_order(&mut self, order: &OrderRecord) -> Result<usize, StoreError> {
        Ok(replace_where(&mut self.tables.orders, order, |o| o.order_id == order.order_id))
    }

    fn delete_order(&mut self, id: Uuid) -> Result<usize, StoreError> {
        Ok(remove_where(&mut self.tables.orders, |o| o.order_id == id))
    }

    fn count_discount_references(&mut self, target: Uuid, excluding: Uuid) -> Result<i64, StoreError> {
        let count = self.tables.orders
            .iter()
            .filter(|o| o.discount_order_id == Some(target) && o.order_id != excluding)
            .count();
        Ok(count as i64)
    }

    fn clear_discount_references(&mut self, target: Uuid) -> Result<usize, StoreError> {
        let mut rows = 0;
        for order in self.tables.orders.iter_mut().filter(|o| o.discount_order_id == Some(target)) {
            order.discount_order_id = None;
            rows += 1;
        }
        Ok(rows)
    }

    fn insert_order_items(&mut self, order_items: &[OrderItemModel]) -> Result<(), StoreError> {
        self.tables.order_items.extend_from_slice(order_items);
        Ok(())
    }

    fn order_items_for(&mut self, order_id: Uuid) -> Result<Vec<OrderItemModel>, StoreError> {
        let mut res: Vec<OrderItemModel> = self.tables.order_items
            .iter()
            .filter(|oi| oi.order_id == order_id)
            .cloned()
            .collect();
        res.sort_by_key(|oi| oi.position);
        Ok(res)
    }

    fn delete_order_items_for(&mut self, order_id: Uuid) -> Result<usize, StoreError> {
        Ok(remove_where(&mut self.tables.order_items, |oi| oi.order_id == order_id))
    }

    fn insert_work_items(&mut self, work_items: &[WorkItemRecord]) -> Result<(), StoreError> {
        self.tables.work_items.extend_from_slice(work_items);
        Ok(())
    }

    fn find_work_item(&mut self, id: Uuid) -> Result<Option<WorkItemRecord>, StoreError> {
        Ok(self.tables.work_items.iter().find(|w| w.work_item_id == id).cloned())
    }

    fn find_work_items(&mut self, status: Option<&str>) -> Result<Vec<WorkItemRecord>, StoreError> {
        let mut res: Vec<WorkItemRecord> = self.tables.work_items
            .iter()
            .filter(|w| status.map_or(true, |s| w.status == s))
            .cloned()
            .collect();
        res.sort_by_key(|w| w.updated_at);
        Ok(res)
    }

    fn update_work_item_status(&mut self, id: Uuid, status: &str, at: DateTime<Utc>) -> Result<usize, StoreError> {
        let mut rows = 0;
        for work_item in self.tables.work_items.iter_mut().filter(|w| w.work_item_id == id) {
            work_item.status = status.to_string();
            work_item.updated_at = at;
            rows += 1;
        }
        Ok(rows)
    }

    fn delete_work_items_for_order(&mut self, order_id: Uuid) -> Result<usize, StoreError> {
        let order_item_ids: Vec<Uuid> = self.tables.order_items
            .iter()
            .filter(|oi| oi.order_id == order_id)
            .map(|oi| oi.order_item_id)
            .collect();

        Ok(remove_where(&mut self.tables.work_items, |w| order_item_ids.contains(&w.order_item_id)))
    }

    fn insert_comments(&mut self, comments: &[Comment]) -> Result<(), StoreError> {
        self.tables.comments.extend_from_slice(comments);
        Ok(())
    }

    fn comments_for(&mut self, order_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        let mut res: Vec<Comment> = self.tables.comments
            .iter()
            .filter(|c| c.order_id == order_id)
            .cloned()
            .collect();
        res.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(res)
    }

    fn delete_comments_for(&mut self, order_id: Uuid) -> Result<usize, StoreError> {
        Ok(remove_where(&mut self.tables.comments, |c| c.order_id == order_id))
    }
}

fn replace_where<T: Clone>(rows: &mut [T], new: &T, matches: impl Fn(&T) -> bool) -> usize {
    let mut count = 0;
    for row in rows.iter_mut().filter(|row| matches(row)) {
        *row = new.clone();
        count += 1;
    }
    count
}

fn remove_where<T>(rows: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> usize {
    let before = rows.len();
    rows.retain(|row| !matches(row));
    before - rows.len()
}
