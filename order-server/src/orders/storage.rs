//! redb-based storage for order aggregates
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `orders` | `order_id` | `Order` (JSON) | Aggregate records |
//! | `user_orders` | `(user_id, order_id)` | `()` | Owner index |
//!
//! # Consistency
//!
//! redb commits are atomic and the database allows a single writer at a
//! time, so every mutation here happens inside one write transaction.
//! [`OrderStore::update`] reads, validates, and rewrites an order within
//! that one transaction, which is what serializes concurrent status
//! changes on the same order: the second writer observes the first
//! writer's committed state, never a stale view.
//!
//! Orders are never deleted; cancellation is a status, not a removal.

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::Order;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Table for order aggregates: key = order_id, value = JSON-serialized Order
const ORDERS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("orders");

/// Owner index: key = (user_id, order_id), value = empty (existence check)
const USER_ORDERS_TABLE: TableDefinition<(&str, &str), ()> = TableDefinition::new("user_orders");

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error(transparent)]
    Rejected(AppError),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::OrderNotFound(id) => {
                AppError::new(ErrorCode::OrderNotFound).with_detail("orderId", id)
            }
            StoreError::Rejected(app) => app,
            StoreError::Serialization(e) => {
                AppError::with_message(ErrorCode::StorageCorrupted, e.to_string())
            }
            other => AppError::storage(other.to_string()),
        }
    }
}

/// Order store backed by redb
#[derive(Clone)]
pub struct OrderStore {
    db: Arc<Database>,
}

impl OrderStore {
    /// Open or create the database at the given path
    ///
    /// redb commits with `Durability::Immediate`: once `commit()` returns
    /// the record is on disk, and a crash mid-write leaves the previous
    /// consistent state visible. A failed insert therefore never exposes a
    /// partial order.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;

        // Create tables up front so first reads don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(USER_ORDERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;

        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ORDERS_TABLE)?;
            let _ = write_txn.open_table(USER_ORDERS_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Persist a new order and its owner-index entry in one transaction
    pub fn insert(&self, order: &Order) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut orders = txn.open_table(ORDERS_TABLE)?;
            let value = serde_json::to_vec(order)?;
            orders.insert(order.id.as_str(), value.as_slice())?;

            let mut index = txn.open_table(USER_ORDERS_TABLE)?;
            index.insert((order.user_id.as_str(), order.id.as_str()), ())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Fetch one order by id
    pub fn get(&self, order_id: &str) -> StoreResult<Option<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;
        match table.get(order_id)? {
            Some(guard) => Ok(Some(serde_json::from_slice(guard.value())?)),
            None => Ok(None),
        }
    }

    /// Read-modify-write one order inside a single write transaction
    ///
    /// `mutate` sees the current committed state; if it returns an error
    /// the transaction is aborted and nothing is written. Because redb has
    /// one writer at a time, two concurrent callers are serialized and the
    /// later one validates against the earlier one's result.
    pub fn update<F>(&self, order_id: &str, mutate: F) -> StoreResult<Order>
    where
        F: FnOnce(&mut Order) -> AppResult<()>,
    {
        let txn = self.db.begin_write()?;
        let updated = {
            let mut table = txn.open_table(ORDERS_TABLE)?;
            let mut order: Order = match table.get(order_id)? {
                Some(guard) => serde_json::from_slice(guard.value())?,
                None => return Err(StoreError::OrderNotFound(order_id.to_string())),
            };

            mutate(&mut order).map_err(StoreError::Rejected)?;

            let value = serde_json::to_vec(&order)?;
            table.insert(order_id, value.as_slice())?;
            order
        };
        txn.commit()?;
        Ok(updated)
    }

    /// All orders belonging to one user, unsorted
    pub fn list_by_user(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(USER_ORDERS_TABLE)?;
        let orders = read_txn.open_table(ORDERS_TABLE)?;

        let mut result = Vec::new();
        for entry in index.range((user_id, "")..)? {
            let (key, _) = entry?;
            let (uid, order_id) = key.value();
            if uid != user_id {
                break;
            }
            if let Some(guard) = orders.get(order_id)? {
                result.push(serde_json::from_slice(guard.value())?);
            }
        }
        Ok(result)
    }

    /// Every order in the store, unsorted
    pub fn list_all(&self) -> StoreResult<Vec<Order>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORDERS_TABLE)?;

        let mut result = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            result.push(serde_json::from_slice(value.value())?);
        }
        Ok(result)
    }
}
