//! Catalog read store
//!
//! Read-only access to restaurants and menu items over SQLite. The catalog
//! itself is maintained by an external service; the order core consults it
//! to validate restaurant references at order time and to enrich order
//! listings with display names and images.

use shared::error::AppError;
use shared::models::{MenuItemRef, Restaurant};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::str::FromStr;

/// Catalog store holding the SQLite connection pool
#[derive(Clone)]
pub struct CatalogStore {
    pub pool: SqlitePool,
}

impl CatalogStore {
    /// Open the catalog database with WAL mode and run pending migrations
    pub async fn open(db_path: &str) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| AppError::database(format!("Invalid database path: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .pragma("foreign_keys", "ON");

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        // busy_timeout: wait 5s on write contention instead of failing fast
        sqlx::query("PRAGMA busy_timeout = 5000;")
            .execute(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to set busy_timeout: {e}")))?;

        tracing::info!("Catalog database connected (SQLite WAL, busy_timeout=5000ms)");

        sqlx::migrate!("./migrations")
            .set_ignore_missing(true)
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Catalog migrations applied");

        Ok(Self { pool })
    }

    /// Open an in-memory catalog (for testing)
    pub async fn open_in_memory() -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;

        Ok(Self { pool })
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, AppError> {
        let rows = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name, description, location, image FROM restaurants ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
        Ok(rows)
    }

    pub async fn get_restaurant(&self, id: &str) -> Result<Option<Restaurant>, AppError> {
        let row = sqlx::query_as::<_, Restaurant>(
            "SELECT id, name, description, location, image FROM restaurants WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
        Ok(row)
    }

    pub async fn restaurant_exists(&self, id: &str) -> Result<bool, AppError> {
        let found: Option<i64> = sqlx::query_scalar("SELECT 1 FROM restaurants WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        Ok(found.is_some())
    }

    pub async fn list_menu_items(&self, restaurant_id: &str) -> Result<Vec<MenuItemRef>, AppError> {
        let rows = sqlx::query_as::<_, MenuItemRef>(
            "SELECT id, item_name, price, category, image, restaurant_id \
             FROM menu_items WHERE restaurant_id = ? ORDER BY category, item_name",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
        Ok(rows)
    }

    pub async fn get_menu_item(&self, id: &str) -> Result<Option<MenuItemRef>, AppError> {
        let row = sqlx::query_as::<_, MenuItemRef>(
            "SELECT id, item_name, price, category, image, restaurant_id \
             FROM menu_items WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
        Ok(row)
    }
}
