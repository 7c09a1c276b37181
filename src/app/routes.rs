//! HTTP surface of the gateway.
//!
//! Translator outcomes are always answered with 200; only errors the
//! translator does not absorb turn into other status codes.

use crate::core::payload::{parse_object, parse_payload};
use crate::core::{MapId, Reply, RequestTranslator, Statistics, TimeSeries};
use crate::domain::model::{
    ImageRequest, IndexTimeSeriesRequest, MosaicRequest, StatsRequest, TimeSeriesRequest,
};
use crate::utils::error::GatewayError;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::instrument;

type Handled<T> = Result<Json<Reply<T>>, GatewayError>;

pub fn router(translator: RequestTranslator) -> Router {
    Router::new()
        .route("/image", post(image))
        .route("/imageByMosaicCollection", post(image_by_mosaic_collection))
        .route("/timeSeriesIndex", post(time_series_index))
        .route("/timeSeriesIndex2", post(time_series_index2))
        .route("/getStats", post(get_stats))
        .route("/healthz", get(healthz))
        .with_state(translator)
}

#[instrument(skip_all)]
async fn image(State(translator): State<RequestTranslator>, body: Bytes) -> Handled<MapId> {
    let request = parse_payload::<ImageRequest>(&body)?;
    Ok(Json(translator.image(request).await?))
}

#[instrument(skip_all)]
async fn image_by_mosaic_collection(
    State(translator): State<RequestTranslator>,
    body: Bytes,
) -> Handled<MapId> {
    let request = parse_payload::<MosaicRequest>(&body)?;
    Ok(Json(translator.image_by_mosaic_collection(request).await?))
}

#[instrument(skip_all)]
async fn time_series_index(
    State(translator): State<RequestTranslator>,
    body: Bytes,
) -> Handled<TimeSeries> {
    let request = parse_payload::<TimeSeriesRequest>(&body)?;
    Ok(Json(translator.time_series_index(request).await?))
}

#[instrument(skip_all)]
async fn time_series_index2(
    State(translator): State<RequestTranslator>,
    body: Bytes,
) -> Handled<TimeSeries> {
    let request = parse_payload::<IndexTimeSeriesRequest>(&body)?;
    Ok(Json(translator.time_series_index2(request).await?))
}

#[instrument(skip_all)]
async fn get_stats(State(translator): State<RequestTranslator>, body: Bytes) -> Handled<Statistics> {
    let request = parse_object::<StatsRequest>(&body)?;
    Ok(Json(translator.get_stats(request).await?))
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if matches!(self, GatewayError::Engine(_)) {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(%status, "Request failed: {}", self);
        } else {
            tracing::warn!(%status, "Rejected request: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
