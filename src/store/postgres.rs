use chrono::{DateTime, Utc};
use diesel::{pg::Pg, Connection, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl, SelectableHelper};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use uuid::Uuid;

use crate::{models::{Comment, Item, ItemType, OrderItemModel, OrderRecord, WorkItemRecord}, schema::{comments, item_types, items, order_items, order_work_items, orders}, utils::{DbConnection, DbPool}};

use super::{Repository, Store, StoreError};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

#[derive(Clone)]
pub struct PgStore{
    pool: DbPool
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        PgStore{ pool }
    }

    #[tracing::instrument(
        "Running pending migrations",
        skip_all
    )]
    pub fn run_migrations(&self) -> Result<(), anyhow::Error> {
        let mut conn = self.pool.get()?;
        let applied = conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| anyhow::anyhow!("Failed to run migrations: {}", e))?;

        tracing::info!(count = applied.len(), "Applied pending migrations");
        Ok(())
    }
}

// Separates the caller's error from a failure of the transaction itself
enum TxError<E>{
    Aborted(E),
    Diesel(diesel::result::Error)
}

impl<E> From<diesel::result::Error> for TxError<E> {
    fn from(e: diesel::result::Error) -> Self {
        TxError::Diesel(e)
    }
}

impl Store for PgStore {
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Repository) -> Result<T, E>,
        E: From<StoreError>
    {
        let mut conn = self.pool.get().map_err(StoreError::from)?;

        conn.transaction::<T, TxError<E>, _>(|conn| {
            let mut repo = PgRepository{ conn };
            f(&mut repo).map_err(TxError::Aborted)
        })
        .map_err(|e| match e {
            TxError::Aborted(e) => e,
            TxError::Diesel(e) => StoreError::from(e).into()
        })
    }
}

struct PgRepository<'a>{
    conn: &'a mut DbConnection
}

impl Repository for PgRepository<'_> {
    fn insert_item_type(&mut self, item_type: &ItemType) -> Result<(), StoreError> {
        diesel::insert_into(item_types::table)
            .values(item_type)
            .execute(self.conn)?;
        Ok(())
    }

    fn find_item_type(&mut self, id: Uuid) -> Result<Option<ItemType>, StoreError> {
        let res = item_types::table
            .find(id)
            .select(ItemType::as_select())
            .first(self.conn)
            .optional()?;
        Ok(res)
    }

    fn find_live_item_type_by_name(&mut self, name: &str) -> Result<Option<ItemType>, StoreError> {
        let res = item_types::table
            .filter(item_types::name.eq(name))
            .filter(item_types::deleted_at.is_null())
            .select(ItemType::as_select())
            .first(self.conn)
            .optional()?;
        Ok(res)
    }

    fn list_item_types(&mut self) -> Result<Vec<ItemType>, StoreError> {
        let res = item_types::table
            .filter(item_types::deleted_at.is_null())
            .order(item_types::name.asc())
            .select(ItemType::as_select())
            .load(self.conn)?;
        Ok(res)
    }

    fn update_item_type(&mut self, item_type: &ItemType) -> Result<usize, StoreError> {
        let rows = diesel::update(item_types::table.find(item_type.item_type_id))
            .set(item_type)
            .execute(self.conn)?;
        Ok(rows)
    }

    fn soft_delete_item_type(&mut self, id: Uuid, at: DateTime<Utc>) -> Result<usize, StoreError> {
        let rows = diesel::update(item_types::table.find(id))
            .filter(item_types::deleted_at.is_null())
            .set(item_types::deleted_at.eq(Some(at)))
            .execute(self.conn)?;
        Ok(rows)
    }

    fn insert_item(&mut self, item: &Item) -> Result<(), StoreError> {
        diesel::insert_into(items::table)
            .values(item)
            .execute(self.conn)?;
        Ok(())
    }

    fn find_item(&mut self, id: Uuid) -> Result<Option<Item>, StoreError> {
        let res = items::table
            .find(id)
            .select(Item::as_select())
            .first(self.conn)
            .optional()?;
        Ok(res)
    }

    fn find_items(&mut self, ids: &[Uuid]) -> Result<Vec<Item>, StoreError> {
        let res = items::table
            .filter(items::item_id.eq_any(ids))
            .select(Item::as_select())
            .load(self.conn)?;
        Ok(res)
    }

    fn list_items(&mut self) -> Result<Vec<Item>, StoreError> {
        let res = items::table
            .filter(items::deleted_at.is_null())
            .order(items::name.asc())
            .select(Item::as_select())
            .load(self.conn)?;
        Ok(res)
    }

    fn update_item(&mut self, item: &Item) -> Result<usize, StoreError> {
        let rows = diesel::update(items::table.find(item.item_id))
            .set(item)
            .execute(self.conn)?;
        Ok(rows)
    }

    fn soft_delete_item(&mut self, id: Uuid, at: DateTime<Utc>) -> Result<usize, StoreError> {
        let rows = diesel::update(items::table.find(id))
            .filter(items::deleted_at.is_null())
            .set(items::deleted_at.eq(Some(at)))
            .execute(self.conn)?;
        Ok(rows)
    }

    fn insert_order(&mut self, order: &OrderRecord) -> Result<(), StoreError> {
        diesel::insert_into(orders::table)
            .values(order)
            .execute(self.conn)?;
        Ok(())
    }

    fn find_order(&mut self, id: Uuid) -> Result<Option<OrderRecord>, StoreError> {
        let res = orders::table
            .find(id)
            .select(OrderRecord::as_select())
            .first(self.conn)
            .optional()?;
        Ok(res)
    }

    fn list_orders(&mut self) -> Result<Vec<OrderRecord>, StoreError> {
        let res = orders::table
            .order(orders::created_at.desc())
            .select(OrderRecord::as_select())
            .load(self.conn)?;
        Ok(res)
    }

    fn update_order(&mut self, order: &OrderRecord) -> Result<usize, StoreError> {
        let rows = diesel::update(orders::table.find(order.order_id))
            .set(order)
            .execute(self.conn)?;
        Ok(rows)
    }

    fn delete_order(&mut self, id: Uuid) -> Result<usize, StoreError> {
        let rows = diesel::delete(orders::table.find(id))
            .execute(self.conn)?;
        Ok(rows)
    }

    fn count_discount_references(&mut self, target: Uuid, excluding: Uuid) -> Result<i64, StoreError> {
        let count = orders::table
            .filter(orders::discount_order_id.eq(target))
            .filter(orders::order_id.ne(excluding))
            .count()
            .get_result(self.conn)?;
        Ok(count)
    }

    fn clear_discount_references(&mut self, target: Uuid) -> Result<usize, StoreError> {
        let rows = diesel::update(orders::table)
            .filter(orders::discount_order_id.eq(target))
            .set(orders::discount_order_id.eq(None::<Uuid>))
            .execute(self.conn)?;
        Ok(rows)
    }

    fn insert_order_items(&mut self, order_items: &[OrderItemModel]) -> Result<(), StoreError> {
        if order_items.is_empty() {
            return Ok(());
        }

        diesel::insert_into(order_items::table)
            .values(order_items)
            .execute(self.conn)?;
        Ok(())
    }

    fn order_items_for(&mut self, order_id: Uuid) -> Result<Vec<OrderItemModel>, StoreError> {
        let res = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .order(order_items::position.asc())
            .select(OrderItemModel::as_select())
            .load(self.conn)?;
        Ok(res)
    }

    fn delete_order_items_for(&mut self, order_id: Uuid) -> Result<usize, StoreError> {
        let rows = diesel::delete(order_items::table)
            .filter(order_items::order_id.eq(order_id))
            .execute(self.conn)?;
        Ok(rows)
    }

    fn insert_work_items(&mut self, work_items: &[WorkItemRecord]) -> Result<(), StoreError> {
        if work_items.is_empty() {
            return Ok(());
        }

        diesel::insert_into(order_work_items::table)
            .values(work_items)
            .execute(self.conn)?;
        Ok(())
    }

    fn find_work_item(&mut self, id: Uuid) -> Result<Option<WorkItemRecord>, StoreError> {
        let res = order_work_items::table
            .find(id)
            .select(WorkItemRecord::as_select())
            .first(self.conn)
            .optional()?;
        Ok(res)
    }

    fn find_work_items(&mut self, status: Option<&str>) -> Result<Vec<WorkItemRecord>, StoreError> {
        let mut query = order_work_items::table
            .into_boxed::<Pg>();

        if let Some(status) = status {
            query = query.filter(order_work_items::status.eq(status));
        }

        let res = query
            .order(order_work_items::updated_at.asc())
            .select(WorkItemRecord::as_select())
            .load(self.conn)?;
        Ok(res)
    }

    fn update_work_item_status(&mut self, id: Uuid, status: &str, at: DateTime<Utc>) -> Result<usize, StoreError> {
        let rows = diesel::update(order_work_items::table.find(id))
            .set((
                order_work_items::status.eq(status),
                order_work_items::updated_at.eq(at)
            ))
            .execute(self.conn)?;
        Ok(rows)
    }

    fn delete_work_items_for_order(&mut self, order_id: Uuid) -> Result<usize, StoreError> {
        let order_item_ids = order_items::table
            .filter(order_items::order_id.eq(order_id))
            .select(order_items::order_item_id);

        let rows = diesel::delete(order_work_items::table)
            .filter(order_work_items::order_item_id.eq_any(order_item_ids))
            .execute(self.conn)?;
        Ok(rows)
    }

    fn insert_comments(&mut self, comments: &[Comment]) -> Result<(), StoreError> {
        if comments.is_empty() {
            return Ok(());
        }

        diesel::insert_into(comments::table)
            .values(comments)
            .execute(self.conn)?;
        Ok(())
    }

    fn comments_for(&mut self, order_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        let res = comments::table
            .filter(comments::order_id.eq(order_id))
            .order(comments::created_at.desc())
            .select(Comment::as_select())
            .load(self.conn)?;
        Ok(res)
    }

    fn delete_comments_for(&mut self, order_id: Uuid) -> Result<usize, StoreError> {
        let rows = diesel::delete(comments::table)
            .filter(comments::order_id.eq(order_id))
            .execute(self.conn)?;
        Ok(rows)
    }
}
