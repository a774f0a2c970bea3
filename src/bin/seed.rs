use std::sync::Arc;

use invento::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    ids::UuidGenerator,
    services::catalog_service,
    state::AppState,
    storage::LocalStorage,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&pool).await?;

    let state = AppState::load(LocalStorage::new(pool), Arc::new(UuidGenerator)).await;
    if !state.workspace.lock().await.catalog.is_empty() {
        println!("Catalog already has products; nothing to seed.");
        return Ok(());
    }

    let resp = catalog_service::load_sample_data(&state).await?;
    let count = resp.data.map(|list| list.items.len()).unwrap_or_default();
    println!("Seed completed. {count} sample products added.");
    Ok(())
}
