//! Best-effort persistence of the three stores as keyed JSON documents.
//!
//! Reads and writes never take the application down: a failure is logged and
//! the caller carries on with its in-memory state.

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::{
    db::DbPool,
    models::{Product, Sale, ShopProfile},
};

pub const PRODUCTS_KEY: &str = "invento_products";
pub const SALES_KEY: &str = "invento_sales";
pub const SHOP_KEY: &str = "invento_shop";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable(#[from] sqlx::Error),

    #[error("could not encode {key}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// One encoded value waiting to be written under its key.
#[derive(Debug, Clone)]
pub struct Document {
    key: &'static str,
    json: String,
}

impl Document {
    pub fn encode<T: Serialize + ?Sized>(key: &'static str, value: &T) -> Result<Self, StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })?;
        Ok(Self { key, json })
    }

    pub fn products(products: &[Product]) -> Result<Self, StorageError> {
        Self::encode(PRODUCTS_KEY, products)
    }

    pub fn sales(sales: &[Sale]) -> Result<Self, StorageError> {
        Self::encode(SALES_KEY, sales)
    }

    pub fn shop(shop: &ShopProfile) -> Result<Self, StorageError> {
        Self::encode(SHOP_KEY, shop)
    }

    pub fn key(&self) -> &'static str {
        self.key
    }
}

#[derive(Clone, Debug)]
pub struct LocalStorage {
    pool: Option<DbPool>,
}

impl LocalStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Storage that keeps nothing; every read comes back empty.
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    pub async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(pool) = &self.pool else {
            return Ok(None);
        };
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    /// Writes every document in one transaction; either all keys change or none.
    pub async fn put(&self, documents: &[Document]) -> Result<(), StorageError> {
        let Some(pool) = &self.pool else {
            return Ok(());
        };
        let mut tx = pool.begin().await?;
        for doc in documents {
            sqlx::query(
                r#"
                INSERT INTO local_storage (key, value, updated_at)
                VALUES (?, ?, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
                ON CONFLICT (key) DO UPDATE
                SET value = excluded.value, updated_at = excluded.updated_at
                "#,
            )
            .bind(doc.key)
            .bind(&doc.json)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Reads and decodes `key`; absent, unreadable or corrupt values yield `None`.
    pub async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.get_item(key).await {
            Ok(raw) => raw?,
            Err(err) => {
                tracing::warn!(key, error = %err, "local storage read failed");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(key, error = %err, "ignoring unreadable stored value");
                None
            }
        }
    }

    /// Persists the documents, logging instead of failing. Returns whether the
    /// write reached the database.
    pub async fn save<I>(&self, documents: I) -> bool
    where
        I: IntoIterator<Item = Result<Document, StorageError>>,
    {
        let documents = match documents.into_iter().collect::<Result<Vec<_>, _>>() {
            Ok(documents) => documents,
            Err(err) => {
                tracing::warn!(error = %err, "skipping local storage write");
                return false;
            }
        };
        if !self.is_enabled() {
            return false;
        }
        match self.put(&documents).await {
            Ok(()) => {
                let keys: Vec<_> = documents.iter().map(Document::key).collect();
                tracing::debug!(?keys, "local storage updated");
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "local storage write failed; continuing in memory");
                false
            }
        }
    }
}
