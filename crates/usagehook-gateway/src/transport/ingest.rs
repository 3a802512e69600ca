//! `POST /user-model-metrics` handler.
//!
//! Pipeline: authenticate -> read bounded body -> decode -> stamp receipt
//! time -> write. The first failing stage produces the response:
//! - auth: 401 with the rejection reason
//! - body read / decode: 400
//! - storage: 500, details only in the log
//!
//! Success is an empty 200.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
};
use usagehook_core::{
    error::UsageHookError,
    payload::parse_payload,
    record::EventRecord,
};

use crate::app_state::AppState;
use crate::transport::{codec::read_bounded, response::ApiError};

#[tracing::instrument(name = "ingest", skip_all)]
pub async fn ingest(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Body,
) -> Result<StatusCode, ApiError> {
    let auth_header = headers.get(AUTHORIZATION).map(|v| v.as_bytes());
    if let Err(e) = state.auth().verify(auth_header) {
        if let UsageHookError::Unauthorized(reason) = &e {
            tracing::info!(reason = reason.reason(), "{}", reason.message());
        }
        return Err(e.into());
    }

    let data = read_bounded(body, state.max_payload_bytes())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to read payload");
            e
        })?;

    let payload = parse_payload(&data).map_err(|e| {
        tracing::error!(error = %e, "failed to parse payload");
        e
    })?;
    let record = EventRecord::stamp(payload, state.clock().now());

    let writer = state.writer().clone();
    let written = tokio::task::spawn_blocking(move || writer.write(&record))
        .await
        .map_err(|e| UsageHookError::Internal(format!("storage task failed: {e}")))?;

    if let Err(e) = written {
        tracing::error!(error = %e, "failed to store user model metrics");
        return Err(UsageHookError::from(e).into());
    }

    Ok(StatusCode::OK)
}
