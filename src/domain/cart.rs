//! Billing session: the unpersisted cart and the product search feeding it.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::{domain::catalog::Catalog, models::Product};

/// Results shown when no billing query is active.
pub const DEFAULT_RESULTS: usize = 10;
/// Cap on results for an active billing query.
pub const MAX_SEARCH_RESULTS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {0} is not in the cart")]
    NotInCart(String),

    #[error("cart amount is too large")]
    AmountTooLarge,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub price: Decimal,
    pub qty: u32,
}

impl CartLine {
    /// Copies name and price from the product as they are right now.
    pub fn snapshot(product: &Product, qty: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            qty: qty.max(1),
        }
    }

    pub fn checked_subtotal(&self) -> Option<Decimal> {
        self.price.checked_mul(Decimal::from(self.qty))
    }

    /// Saturates at `Decimal::MAX`; carts built through `Cart::add` never get there.
    pub fn subtotal(&self) -> Decimal {
        self.checked_subtotal().unwrap_or(Decimal::MAX)
    }
}

fn checked_total(lines: &[CartLine]) -> Option<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, line| acc.checked_add(line.checked_subtotal()?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Incremented,
    /// The line already holds as many units as the product has in stock.
    AtStockLimit,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds one unit of `product`. Refuses any change whose subtotal or cart
    /// total would not fit in a `Decimal`.
    pub fn add(&mut self, product: &Product) -> Result<AddOutcome, CartError> {
        let before = self.lines.clone();
        let outcome = match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) if line.qty < product.stock => {
                line.qty += 1;
                AddOutcome::Incremented
            }
            Some(_) => return Ok(AddOutcome::AtStockLimit),
            None => {
                self.lines.push(CartLine::snapshot(product, 1));
                AddOutcome::Added
            }
        };
        self.keep_in_range(before)?;
        Ok(outcome)
    }

    /// Shifts a line's quantity by `delta`, never below 1.
    pub fn change_quantity(&mut self, product_id: &str, delta: i64) -> Result<(), CartError> {
        let before = self.lines.clone();
        let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) else {
            return Err(CartError::NotInCart(product_id.to_string()));
        };
        let next = i64::from(line.qty)
            .saturating_add(delta)
            .clamp(1, i64::from(u32::MAX));
        line.qty = u32::try_from(next).unwrap_or(u32::MAX);
        self.keep_in_range(before)
    }

    fn keep_in_range(&mut self, before: Vec<CartLine>) -> Result<(), CartError> {
        if checked_total(&self.lines).is_none() {
            self.lines = before;
            return Err(CartError::AmountTooLarge);
        }
        Ok(())
    }

    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    pub fn total(&self) -> Decimal {
        checked_total(&self.lines).unwrap_or(Decimal::MAX)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[derive(Debug, Clone, Default)]
pub struct BillingSession {
    pub cart: Cart,
    query: String,
}

impl BillingSession {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn results<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        if self.query.trim().is_empty() {
            return catalog.products().iter().take(DEFAULT_RESULTS).collect();
        }
        let mut hits = catalog.search(&self.query);
        hits.truncate(MAX_SEARCH_RESULTS);
        hits
    }

    /// Resets the cart and the search filter after a completed sale.
    pub fn reset(&mut self) {
        self.cart.clear();
        self.query.clear();
    }
}
