use chrono::Utc;

use crate::{
    domain::{
        Catalog, Ledger,
        backup::{self, BackupDocument},
    },
    dto::backup::RestoreSummary,
    error::AppResult,
    response::{ApiResponse, Meta},
    state::AppState,
    storage::Document,
};

/// A backup ready for download together with its file name.
pub struct BackupExport {
    pub file_name: String,
    pub document: BackupDocument,
}

pub async fn export(state: &AppState) -> AppResult<BackupExport> {
    let workspace = state.workspace.lock().await;
    let now = Utc::now();
    let document = backup::export(
        workspace.catalog.products(),
        workspace.ledger.sales(),
        &workspace.shop,
        now,
    );
    tracing::info!(
        products = document.products.len(),
        sales = document.sales.len(),
        "backup exported"
    );
    Ok(BackupExport {
        file_name: backup::file_name(now),
        document,
    })
}

/// Replaces catalog, ledger and shop profile with the uploaded backup and
/// starts a fresh billing session. An invalid document leaves everything
/// untouched.
pub async fn import(state: &AppState, bytes: &[u8]) -> AppResult<ApiResponse<RestoreSummary>> {
    let restore = backup::import(bytes)?;
    let summary = RestoreSummary::from(&restore);

    let mut workspace = state.workspace.lock().await;
    let persisted = state
        .storage
        .save([
            Document::products(&restore.products),
            Document::sales(&restore.sales),
            Document::shop(&restore.shop),
        ])
        .await;

    workspace.catalog = Catalog::new(restore.products);
    workspace.ledger = Ledger::new(restore.sales);
    workspace.shop = restore.shop;
    workspace.billing.reset();

    tracing::info!(
        products = summary.products,
        sales = summary.sales,
        "backup restored"
    );
    Ok(ApiResponse::success(
        "Backup restored",
        summary,
        Some(Meta::persisted(persisted)),
    ))
}
