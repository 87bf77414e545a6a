// POST /api/verify: run one piece of content through the pipeline.
//
// The pipeline never fails outright. Stage problems, empty input included,
// come back inside the result's processing_message and prediction payload
// with a 200.

use axum::extract::State;
use axum::{Extension, Json};

use crate::pipeline::{ContentInput, VerificationResult};
use crate::web::{AppState, AuthUser};

pub async fn verify_content(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(input): Json<ContentInput>,
) -> Json<VerificationResult> {
    Json(state.verifier.verify(&input.content, user.0.as_deref()).await)
}
