use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::backup::Restore;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestoreSummary {
    pub products: usize,
    pub sales: usize,
    pub shop_name: String,
    pub version: Option<u32>,
}

impl From<&Restore> for RestoreSummary {
    fn from(restore: &Restore) -> Self {
        Self {
            products: restore.products.len(),
            sales: restore.sales.len(),
            shop_name: restore.shop.name.clone(),
            version: restore.version,
        }
    }
}
