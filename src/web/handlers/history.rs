// History handlers.
//
// GET    /api/history      the caller's five most recent verifications
// DELETE /api/history/{id} remove one of the caller's entries
//
// With auth disabled there is a single anonymous caller, so every saved
// entry is theirs.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use tracing::error;

use crate::web::{api_error, AppState, AuthUser};

pub const HISTORY_LIMIT: u32 = 5;

pub async fn recent_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Response {
    match state.history.recent(user.0.as_deref(), HISTORY_LIMIT).await {
        Ok(records) => Json(serde_json::json!({ "history": records })).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to load history");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Gagal mengambil riwayat. Silakan coba lagi nanti.",
            )
        }
    }
}

pub async fn delete_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(history_id): Path<String>,
) -> Response {
    match state.history.delete(user.0.as_deref(), &history_id).await {
        Ok(true) => Json(serde_json::json!({ "detail": "Riwayat berhasil dihapus." })).into_response(),
        Ok(false) => api_error(
            StatusCode::NOT_FOUND,
            "Data riwayat tidak ditemukan atau bukan milik Anda.",
        ),
        Err(e) => {
            error!(history_id = %history_id, error = %e, "Failed to delete history");
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Gagal menghapus riwayat. Silakan coba lagi nanti.",
            )
        }
    }
}
