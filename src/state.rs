use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    domain::{BillingSession, Catalog, Ledger},
    ids::{IdGenerator, UuidGenerator},
    models::{Product, Sale, ShopProfile},
    storage::{LocalStorage, PRODUCTS_KEY, SALES_KEY, SHOP_KEY},
};

/// Everything the shop works on. Guarded by a single lock so that each
/// request sees and leaves a consistent state.
#[derive(Debug, Default)]
pub struct Workspace {
    pub catalog: Catalog,
    pub ledger: Ledger,
    pub shop: ShopProfile,
    pub billing: BillingSession,
}

impl Workspace {
    /// Rebuild the stores from local storage, falling back to empty stores
    /// and the default profile for anything missing or unreadable.
    pub async fn load(storage: &LocalStorage) -> Self {
        let products: Vec<Product> = storage.load(PRODUCTS_KEY).await.unwrap_or_default();
        let sales: Vec<Sale> = storage.load(SALES_KEY).await.unwrap_or_default();
        let shop: ShopProfile = storage.load(SHOP_KEY).await.unwrap_or_default();

        tracing::info!(
            products = products.len(),
            sales = sales.len(),
            "workspace loaded"
        );

        Self {
            catalog: Catalog::new(products),
            ledger: Ledger::new(sales),
            shop,
            billing: BillingSession::default(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub storage: LocalStorage,
    pub workspace: Arc<Mutex<Workspace>>,
    pub ids: Arc<dyn IdGenerator>,
}

impl AppState {
    pub async fn load(storage: LocalStorage, ids: Arc<dyn IdGenerator>) -> Self {
        let workspace = Workspace::load(&storage).await;
        Self {
            storage,
            workspace: Arc::new(Mutex::new(workspace)),
            ids,
        }
    }

    /// State with no persistence behind it.
    pub fn in_memory() -> Self {
        Self {
            storage: LocalStorage::disabled(),
            workspace: Arc::new(Mutex::new(Workspace::default())),
            ids: Arc::new(UuidGenerator),
        }
    }
}
