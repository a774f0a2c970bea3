use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub price: Decimal,
    pub stock: u32,
    /// Records written without a threshold are treated as 0.
    #[serde(default)]
    pub low_stock_threshold: u32,
}

impl Product {
    pub fn is_low_stock(&self) -> bool {
        self.stock <= self.low_stock_threshold
    }
}

/// Point-in-time copy of a product line; never follows later product edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product_id: String,
    pub name: String,
    pub qty: u32,
    pub price: Decimal,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sale {
    pub id: String,
    pub date: DateTime<Utc>,
    pub items: Vec<SaleItem>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShopProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub contact: String,
}

impl ShopProfile {
    pub fn blank() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            contact: String::new(),
        }
    }
}

impl Default for ShopProfile {
    fn default() -> Self {
        Self {
            name: "Invento Store".to_string(),
            tagline: "Smart inventory & billing".to_string(),
            contact: String::new(),
        }
    }
}
