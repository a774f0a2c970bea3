//! Backup documents: one JSON file holding the catalog, the ledger and the
//! shop profile.
//!
//! Restoring is destructive. A valid document replaces all three stores as
//! they are, without merging against what is already there.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::models::{Product, Sale, ShopProfile};

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackupError {
    #[error("invalid backup: {0}")]
    InvalidBackup(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub shop_info: ShopProfile,
    pub version: u32,
    pub exported_at: DateTime<Utc>,
}

/// Decoded contents of an uploaded backup, ready to replace current state.
#[derive(Debug, Clone, PartialEq)]
pub struct Restore {
    pub products: Vec<Product>,
    pub sales: Vec<Sale>,
    pub shop: ShopProfile,
    pub version: Option<u32>,
}

/// Lenient shape for uploads: everything optional so presence can be checked
/// before the document is trusted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct IncomingBackup {
    products: Option<Vec<Product>>,
    sales: Option<Vec<Sale>>,
    shop_info: Option<ShopProfile>,
    version: Option<u32>,
}

pub fn export(
    products: &[Product],
    sales: &[Sale],
    shop: &ShopProfile,
    now: DateTime<Utc>,
) -> BackupDocument {
    BackupDocument {
        products: products.to_vec(),
        sales: sales.to_vec(),
        shop_info: shop.clone(),
        version: FORMAT_VERSION,
        exported_at: now,
    }
}

/// Download name embedding the export instant.
pub fn file_name(exported_at: DateTime<Utc>) -> String {
    format!("invento-backup-{}.json", exported_at.timestamp_millis())
}

pub fn import(bytes: &[u8]) -> Result<Restore, BackupError> {
    let incoming: IncomingBackup = serde_json::from_slice(bytes)
        .map_err(|err| BackupError::InvalidBackup(err.to_string()))?;

    let products = incoming
        .products
        .ok_or_else(|| BackupError::InvalidBackup("missing products".into()))?;
    let sales = incoming
        .sales
        .ok_or_else(|| BackupError::InvalidBackup("missing sales".into()))?;

    if let Some(version) = incoming.version.filter(|v| *v != FORMAT_VERSION) {
        tracing::warn!(version, "restoring backup with unrecognised format version");
    }

    Ok(Restore {
        products,
        sales,
        shop: incoming.shop_info.unwrap_or_else(ShopProfile::blank),
        version: incoming.version,
    })
}
