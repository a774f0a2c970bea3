//! Product catalog.
//!
//! Products are kept most-recently-added first; that order is what every
//! listing, search and low-stock report returns.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    ids::IdGenerator,
    models::{DEFAULT_LOW_STOCK_THRESHOLD, Product},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: &'static str, value: String },

    #[error("{0} must not be negative")]
    Negative(&'static str),

    #[error("{0} must be a whole number")]
    NotWhole(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("product {0} not found")]
    NotFound(String),
}

/// Fields for a new product, already coerced to numbers.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub sku: String,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub low_stock_threshold: Option<u32>,
}

/// Partial update; `None` leaves the field as it is.
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
    pub low_stock_threshold: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn add(
        &mut self,
        draft: ProductDraft,
        ids: &dyn IdGenerator,
    ) -> Result<Product, ValidationError> {
        if draft.name.trim().is_empty() {
            return Err(ValidationError::Missing("name"));
        }
        if draft.sku.trim().is_empty() {
            return Err(ValidationError::Missing("sku"));
        }
        let price = draft.price.ok_or(ValidationError::Missing("price"))?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ValidationError::Negative("price"));
        }

        let product = Product {
            id: ids.next_id(),
            name: draft.name,
            sku: draft.sku,
            price,
            stock: draft.stock.unwrap_or(0),
            low_stock_threshold: draft
                .low_stock_threshold
                .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD),
        };
        self.products.insert(0, product.clone());
        Ok(product)
    }

    pub fn update(&mut self, id: &str, patch: ProductPatch) -> Result<Product, CatalogError> {
        if patch.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ValidationError::Missing("name").into());
        }
        if patch.sku.as_ref().is_some_and(|s| s.trim().is_empty()) {
            return Err(ValidationError::Missing("sku").into());
        }
        if patch
            .price
            .is_some_and(|p| p.is_sign_negative() && !p.is_zero())
        {
            return Err(ValidationError::Negative("price").into());
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(sku) = patch.sku {
            product.sku = sku;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(threshold) = patch.low_stock_threshold {
            product.low_stock_threshold = threshold;
        }

        Ok(product.clone())
    }

    pub fn remove(&mut self, id: &str) -> Result<Product, CatalogError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        Ok(self.products.remove(index))
    }

    /// Case-insensitive substring match on name or SKU.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.products.iter().collect();
        }
        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle) || p.sku.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn low_stock(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_low_stock()).collect()
    }

    pub(crate) fn set_stock(&mut self, id: &str, stock: u32) -> bool {
        match self.products.iter_mut().find(|p| p.id == id) {
            Some(product) => {
                product.stock = stock;
                true
            }
            None => false,
        }
    }
}

/// Starter stationery catalog offered on a fresh install.
pub fn sample_products(ids: &dyn IdGenerator) -> Vec<Product> {
    [
        ("Notebook (A5)", "NB-A5", 89, 50, 10),
        ("Gel Pen (Blue)", "GP-BLUE", 15, 200, 30),
        ("Stapler", "ST-01", 149, 18, 5),
        ("Marker (Black)", "MK-BLK", 25, 100, 20),
    ]
    .into_iter()
    .map(|(name, sku, price, stock, threshold)| Product {
        id: ids.next_id(),
        name: name.to_string(),
        sku: sku.to_string(),
        price: Decimal::from(price),
        stock,
        low_stock_threshold: threshold,
    })
    .collect()
}
