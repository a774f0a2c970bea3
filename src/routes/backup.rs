use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    domain::backup::BackupDocument,
    dto::backup::RestoreSummary,
    error::AppResult,
    response::ApiResponse,
    services::backup_service,
    state::AppState,
};

/// Largest backup accepted for restore.
pub const MAX_BACKUP_BYTES: usize = 10 * 1024 * 1024;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/export", get(export_backup))
        .route(
            "/import",
            post(import_backup).layer(DefaultBodyLimit::max(MAX_BACKUP_BYTES)),
        )
}

#[utoipa::path(
    get,
    path = "/api/backup/export",
    responses(
        (status = 200, description = "Backup file download", body = BackupDocument)
    ),
    tag = "Backup"
)]
pub async fn export_backup(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let export = backup_service::export(&state).await?;
    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok(([(header::CONTENT_DISPOSITION, disposition)], Json(export.document)))
}

#[utoipa::path(
    post,
    path = "/api/backup/import",
    request_body(content = BackupDocument, content_type = "application/json"),
    responses(
        (status = 200, description = "All stores replaced", body = ApiResponse<RestoreSummary>),
        (status = 400, description = "Not a usable backup; nothing changed"),
    ),
    tag = "Backup"
)]
pub async fn import_backup(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<ApiResponse<RestoreSummary>>> {
    Ok(Json(backup_service::import(&state, &body).await?))
}
