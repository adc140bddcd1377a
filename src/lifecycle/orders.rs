use std::collections::{HashMap, HashSet};

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{domain::{NewOrder, Order, OrderLine, OrderPatch, WorkStatus}, models::{Comment, Item, OrderItemModel, OrderRecord, WorkItemRecord}, store::{Repository, Store}};

use super::{Lifecycle, LifecycleError};

impl<S: Store> Lifecycle<S> {
    /// Creates an order with one line per entry of `item_ids`.
    ///
    /// Duplicated ids become separate lines. Every id is resolved against the
    /// live catalog before the order row is written.
    #[tracing::instrument(
        "Creating order",
        skip(self, new),
        fields(order_number = new.order_number, items = new.item_ids.len())
    )]
    pub fn create_order(&self, new: NewOrder) -> Result<Order, LifecycleError> {
        new.validate()?;

        self.store.transaction::<_, LifecycleError, _>(|repo| {
            let catalog = resolve_live_items(repo, &new.item_ids)?;

            let order_id = Uuid::new_v4();
            if let Some(discount_order_id) = new.discount_order_id {
                ensure_discount_available(repo, discount_order_id, order_id)?;
            }

            let now = Utc::now();
            let record = OrderRecord{
                order_id,
                order_number: new.order_number,
                created_at: now,
                ready_at: None,
                served_at: None,
                billing_amount: new.billing_amount,
                received_amount: new.received_amount,
                discount_order_id: new.discount_order_id,
                discount_order_cups: new.discount_order_cups
            };
            repo.insert_order(&record)?;

            attach_items(repo, order_id, &new.item_ids, &catalog)?;

            let comments: Vec<Comment> = new.comments
                .into_iter()
                .map(|comment| Comment{
                    comment_id: Uuid::new_v4(),
                    order_id,
                    author: comment.author,
                    text: comment.text,
                    created_at: now
                })
                .collect();
            repo.insert_comments(&comments)?;

            hydrate(repo, record)
        })
    }

    #[tracing::instrument(
        "Getting order",
        skip(self)
    )]
    pub fn get_order(&self, id: Uuid) -> Result<Order, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            let record = find_order(repo, id)?;
            hydrate(repo, record)
        })
    }

    #[tracing::instrument(
        "Listing orders",
        skip(self)
    )]
    pub fn list_orders(&self) -> Result<Vec<Order>, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            let records = repo.list_orders()?;
            let mut ret = Vec::with_capacity(records.len());

            for record in records {
                ret.push(hydrate(repo, record)?);
            }

            Ok(ret)
        })
    }

    /// Applies a partial update and, when `item_ids` is given, replaces the
    /// order's lines with exactly that list.
    ///
    /// New ids are resolved before the old lines are removed, so a rejected
    /// replacement leaves the order as it was.
    #[tracing::instrument(
        "Updating order",
        skip(self, patch)
    )]
    pub fn update_order(&self, id: Uuid, patch: OrderPatch) -> Result<Order, LifecycleError> {
        patch.validate()?;

        self.store.transaction::<_, LifecycleError, _>(|repo| {
            let mut record = find_order(repo, id)?;

            let replacement = match &patch.item_ids {
                Some(item_ids) => Some((item_ids, resolve_live_items(repo, item_ids)?)),
                None => None
            };

            if let Some(order_number) = patch.order_number {
                record.order_number = order_number;
            }
            if let Some(ready_at) = patch.ready_at {
                record.ready_at = Some(ready_at);
            }
            if let Some(served_at) = patch.served_at {
                record.served_at = Some(served_at);
            }
            if let Some(billing_amount) = patch.billing_amount {
                record.billing_amount = billing_amount;
            }
            if let Some(received_amount) = patch.received_amount {
                record.received_amount = received_amount;
            }
            if let Some(discount_order_cups) = patch.discount_order_cups {
                record.discount_order_cups = discount_order_cups;
            }
            if let Some(discount_order_id) = patch.discount_order_id {
                if let Some(target) = discount_order_id {
                    if record.discount_order_id != Some(target) {
                        ensure_discount_available(repo, target, id)?;
                    }
                }
                record.discount_order_id = discount_order_id;
            }

            if let (Some(ready_at), Some(served_at)) = (record.ready_at, record.served_at) {
                if served_at < ready_at {
                    return Err(LifecycleError::validation("served_at must not be earlier than ready_at"));
                }
            }

            repo.update_order(&record)?;

            if let Some((item_ids, catalog)) = replacement {
                let removed = detach_items(repo, id)?;
                attach_items(repo, id, item_ids, &catalog)?;
                tracing::info!(removed, added = item_ids.len(), "Replaced order items");
            }

            hydrate(repo, record)
        })
    }

    #[tracing::instrument(
        "Deleting order",
        skip(self)
    )]
    pub fn delete_order(&self, id: Uuid) -> Result<(), LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            find_order(repo, id)?;

            detach_items(repo, id)?;
            repo.delete_comments_for(id)?;
            repo.clear_discount_references(id)?;

            if repo.delete_order(id)? == 0 {
                return Err(LifecycleError::NotFound("order", id));
            }

            Ok(())
        })
    }

    /// Stamps `ready_at`. Marking an already ready order changes nothing;
    /// marking a served order is refused.
    #[tracing::instrument(
        "Marking order ready",
        skip(self)
    )]
    pub fn mark_ready(&self, id: Uuid) -> Result<Order, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            let mut record = find_order(repo, id)?;

            if record.served_at.is_some() {
                return Err(LifecycleError::Conflict(format!("order {} has already been served", id)));
            }

            if record.ready_at.is_none() {
                record.ready_at = Some(Utc::now());
                repo.update_order(&record)?;
            }

            hydrate(repo, record)
        })
    }

    /// Stamps `served_at`, never earlier than `ready_at`. Marking an already
    /// served order changes nothing.
    #[tracing::instrument(
        "Marking order served",
        skip(self)
    )]
    pub fn mark_served(&self, id: Uuid) -> Result<Order, LifecycleError> {
        self.store.transaction::<_, LifecycleError, _>(|repo| {
            let mut record = find_order(repo, id)?;

            if record.served_at.is_none() {
                let now = Utc::now();
                let served_at = match record.ready_at {
                    Some(ready_at) if ready_at > now => ready_at,
                    _ => now
                };
                record.served_at = Some(served_at);
                repo.update_order(&record)?;
            }

            hydrate(repo, record)
        })
    }
}

pub(super) fn find_order(repo: &mut dyn Repository, id: Uuid) -> Result<OrderRecord, LifecycleError> {
    repo.find_order(id)?
        .ok_or(LifecycleError::NotFound("order", id))
}

// Resolves the distinct ids, failing on the first one that is missing or deleted
fn resolve_live_items(repo: &mut dyn Repository, item_ids: &[Uuid]) -> Result<HashMap<Uuid, Item>, LifecycleError> {
    let mut distinct: Vec<Uuid> = Vec::new();
    let mut seen = HashSet::new();
    for id in item_ids {
        if seen.insert(*id) {
            distinct.push(*id);
        }
    }

    let found: HashMap<Uuid, Item> = repo.find_items(&distinct)?
        .into_iter()
        .filter(Item::is_live)
        .map(|item| (item.item_id, item))
        .collect();

    if let Some(missing) = distinct.iter().find(|id| !found.contains_key(*id)) {
        return Err(LifecycleError::validation(format!("item {} does not exist", missing)));
    }

    Ok(found)
}

fn ensure_discount_available(repo: &mut dyn Repository, target: Uuid, order_id: Uuid) -> Result<(), LifecycleError> {
    if target == order_id {
        return Err(LifecycleError::validation("an order cannot discount itself"));
    }

    let discount_order = repo.find_order(target)?
        .ok_or_else(|| LifecycleError::validation(format!("discount order {} does not exist", target)))?;

    if discount_order.served_at.is_none() {
        return Err(LifecycleError::validation(format!("discount order {} has not been served yet", target)));
    }

    if repo.count_discount_references(target, order_id)? > 0 {
        return Err(LifecycleError::validation(format!("discount order {} has already been used", target)));
    }

    Ok(())
}

// One order item per entry, each starting a pending work item
fn attach_items(
    repo: &mut dyn Repository,
    order_id: Uuid,
    item_ids: &[Uuid],
    catalog: &HashMap<Uuid, Item>
) -> Result<(), LifecycleError> {
    let now = Utc::now();

    let mut order_items = Vec::with_capacity(item_ids.len());
    for (index, item_id) in item_ids.iter().enumerate() {
        order_items.push(OrderItemModel{
            order_item_id: Uuid::new_v4(),
            order_id,
            item_id: *item_id,
            assignee: catalog.get(item_id).and_then(|item| item.assignee.clone()),
            position: line_position(index)?
        });
    }

    let work_items: Vec<WorkItemRecord> = order_items
        .iter()
        .map(|order_item| WorkItemRecord{
            work_item_id: Uuid::new_v4(),
            order_item_id: order_item.order_item_id,
            status: WorkStatus::Pending.to_string(),
            updated_at: now
        })
        .collect();

    repo.insert_order_items(&order_items)?;
    repo.insert_work_items(&work_items)?;

    Ok(())
}

fn line_position(index: usize) -> Result<i32, LifecycleError> {
    i32::try_from(index)
        .map_err(|_| LifecycleError::validation("an order has too many items"))
}

// Work items go first since they reference the order items
fn detach_items(repo: &mut dyn Repository, order_id: Uuid) -> Result<usize, LifecycleError> {
    repo.delete_work_items_for_order(order_id)?;
    Ok(repo.delete_order_items_for(order_id)?)
}

fn hydrate(repo: &mut dyn Repository, record: OrderRecord) -> Result<Order, LifecycleError> {
    let order_items = repo.order_items_for(record.order_id)?;

    let item_ids: Vec<Uuid> = order_items.iter().map(|oi| oi.item_id).collect();
    let items: HashMap<Uuid, Item> = repo.find_items(&item_ids)?
        .into_iter()
        .map(|item| (item.item_id, item))
        .collect();

    let mut lines = Vec::with_capacity(order_items.len());
    for order_item in order_items.iter() {
        let item = items.get(&order_item.item_id)
            .ok_or_else(|| LifecycleError::Internal(crate::store::StoreError::CorruptRow(
                format!("order item {} references missing item {}", order_item.order_item_id, order_item.item_id)
            )))?;
        lines.push(OrderLine::new(order_item, item));
    }

    let comments = repo.comments_for(record.order_id)?;

    Order::assemble(record, lines, comments)
        .map_err(LifecycleError::Validation)
}
