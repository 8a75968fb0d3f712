//! Engine status handler

use axum::{extract::State, Json};
use smartcaptcha_core::EngineStatus;

use crate::AppState;

pub async fn engine_status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.engine.status())
}
