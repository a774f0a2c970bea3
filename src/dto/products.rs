use std::str::FromStr;

use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    domain::{ProductDraft, ProductPatch, ValidationError},
    models::Product,
};

/// A number as typed into a form: either a JSON number or numeric text.
/// Empty text counts as "not given".
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum NumericInput {
    Number(Decimal),
    Text(String),
}

impl NumericInput {
    fn to_decimal(&self, field: &'static str) -> Result<Option<Decimal>, ValidationError> {
        match self {
            NumericInput::Number(value) => Ok(Some(*value)),
            NumericInput::Text(text) if text.trim().is_empty() => Ok(None),
            NumericInput::Text(text) => Decimal::from_str(text.trim())
                .map(Some)
                .map_err(|_| ValidationError::NotANumber {
                    field,
                    value: text.clone(),
                }),
        }
    }

    pub fn amount(&self, field: &'static str) -> Result<Option<Decimal>, ValidationError> {
        match self.to_decimal(field)? {
            Some(value) if value.is_sign_negative() && !value.is_zero() => {
                Err(ValidationError::Negative(field))
            }
            other => Ok(other),
        }
    }

    pub fn count(&self, field: &'static str) -> Result<Option<u32>, ValidationError> {
        let Some(value) = self.to_decimal(field)? else {
            return Ok(None);
        };
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::Negative(field));
        }
        if !value.fract().is_zero() {
            return Err(ValidationError::NotWhole(field));
        }
        value
            .to_u32()
            .map(Some)
            .ok_or_else(|| ValidationError::NotANumber {
                field,
                value: value.to_string(),
            })
    }
}

fn amount(input: Option<&NumericInput>, field: &'static str) -> Result<Option<Decimal>, ValidationError> {
    input.map_or(Ok(None), |i| i.amount(field))
}

fn count(input: Option<&NumericInput>, field: &'static str) -> Result<Option<u32>, ValidationError> {
    input.map_or(Ok(None), |i| i.count(field))
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sku: String,
    pub price: Option<NumericInput>,
    pub stock: Option<NumericInput>,
    pub low_stock_threshold: Option<NumericInput>,
}

impl TryFrom<CreateProductRequest> for ProductDraft {
    type Error = ValidationError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductDraft {
            price: amount(req.price.as_ref(), "price")?,
            stock: count(req.stock.as_ref(), "stock")?,
            low_stock_threshold: count(req.low_stock_threshold.as_ref(), "lowStockThreshold")?,
            name: req.name,
            sku: req.sku,
        })
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub price: Option<NumericInput>,
    pub stock: Option<NumericInput>,
    pub low_stock_threshold: Option<NumericInput>,
}

impl TryFrom<UpdateProductRequest> for ProductPatch {
    type Error = ValidationError;

    fn try_from(req: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductPatch {
            price: amount(req.price.as_ref(), "price")?,
            stock: count(req.stock.as_ref(), "stock")?,
            low_stock_threshold: count(req.low_stock_threshold.as_ref(), "lowStockThreshold")?,
            name: req.name,
            sku: req.sku,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ProductSearchQuery {
    /// Matches name or SKU, case-insensitively.
    pub q: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DeleteProductQuery {
    /// Must be `true`; deleting a product is never implicit.
    pub confirm: Option<bool>,
}
