use crate::core::payload::{float_or_default, truthy};
use crate::domain::model::{
    CollectionTimeSeriesQuery, ImageQuery, ImageRequest, IndexTimeSeriesQuery,
    IndexTimeSeriesRequest, MapId, MosaicQuery, MosaicRequest, Statistics, StatisticsQuery,
    StatsRequest, TimeSeries, TimeSeriesRequest,
};
use crate::domain::ports::GeoEngine;
use crate::utils::error::{EngineError, GatewayError, Result};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;
use std::sync::Arc;

pub const DEFAULT_INDEX_NAME: &str = "NDVI";
pub const DEFAULT_SCALE: f64 = 30.0;

/// Outcome of a translated request that is answered with HTTP 200.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// A required field was missing; serialized as `{}`.
    Empty,
    Payload(T),
    /// The engine rejected the request; serialized as `{"errMsg": ...}`.
    Failed { message: String },
}

impl<T> Reply<T> {
    pub fn is_empty(&self) -> bool {
        matches!(self, Reply::Empty)
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            Reply::Payload(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Reply::Failed { message } => Some(message),
            _ => None,
        }
    }
}

impl<T: Serialize> Serialize for Reply<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Reply::Empty => serializer.serialize_map(Some(0))?.end(),
            Reply::Payload(payload) => payload.serialize(serializer),
            Reply::Failed { message } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("errMsg", message)?;
                map.end()
            }
        }
    }
}

/// Turns client payloads into engine calls and engine outcomes into replies.
///
/// Domain failures are absorbed into [`Reply::Failed`]; every other engine
/// failure is returned as an error for the HTTP layer to deal with.
#[derive(Clone)]
pub struct RequestTranslator {
    engine: Arc<dyn GeoEngine>,
}

impl RequestTranslator {
    pub fn new(engine: Arc<dyn GeoEngine>) -> Self {
        Self { engine }
    }

    pub async fn image(&self, request: Option<ImageRequest>) -> Result<Reply<MapId>> {
        let Some(request) = request else {
            return Ok(Reply::Empty);
        };
        let Some(image_name) = truthy(request.image_name) else {
            tracing::debug!("imageName missing, nothing to do");
            return Ok(Reply::Empty);
        };

        let query = ImageQuery {
            image_name,
            vis_params: request.vis_params,
        };
        tracing::debug!(image = %query.image_name, "Requesting map id for image");
        let outcome = self.engine.image_to_map_id(query).await;
        relay("imageToMapId", outcome.inspect(log_map_id))
    }

    pub async fn image_by_mosaic_collection(
        &self,
        request: Option<MosaicRequest>,
    ) -> Result<Reply<MapId>> {
        let Some(request) = request else {
            return Ok(Reply::Empty);
        };
        let Some(collection_name) = truthy(request.collection_name) else {
            tracing::debug!("collectionName missing, nothing to do");
            return Ok(Reply::Empty);
        };

        let query = MosaicQuery {
            collection_name,
            vis_params: request.vis_params,
            date_from: request.date_from,
            date_to: request.date_to,
        };
        tracing::debug!(
            collection = %query.collection_name,
            date_from = ?query.date_from,
            date_to = ?query.date_to,
            "Requesting map id for mosaic"
        );
        let outcome = self.engine.first_image_in_mosaic_to_map_id(query).await;
        relay("firstImageInMosaicToMapId", outcome.inspect(log_map_id))
    }

    pub async fn time_series_index(
        &self,
        request: Option<TimeSeriesRequest>,
    ) -> Result<Reply<TimeSeries>> {
        let Some(request) = request else {
            return Ok(Reply::Empty);
        };

        let collection_name = truthy(request.collection_name)
            .or_else(|| truthy(request.collection_name_time_series));
        let geometry = truthy(request.polygon).or_else(|| truthy(request.geometry));
        let (Some(collection_name), Some(geometry)) = (collection_name, geometry) else {
            tracing::debug!("collection or geometry missing, nothing to do");
            return Ok(Reply::Empty);
        };

        let query = CollectionTimeSeriesQuery {
            collection_name,
            index_name: index_name_or_default(request.index_name),
            scale: float_or_default("scale", request.scale.as_ref(), DEFAULT_SCALE)?,
            geometry,
            date_from: truthy(request.date_from).or(request.date_from_time_series),
            date_to: truthy(request.date_to).or(request.date_to_time_series),
        };
        tracing::debug!(
            collection = %query.collection_name,
            index = %query.index_name,
            scale = query.scale,
            "Requesting time series"
        );
        let outcome = self
            .engine
            .time_series_by_collection_and_index(query)
            .await
            .map(|timeseries| TimeSeries { timeseries });
        relay("getTimeSeriesByCollectionAndIndex", outcome)
    }

    pub async fn time_series_index2(
        &self,
        request: Option<IndexTimeSeriesRequest>,
    ) -> Result<Reply<TimeSeries>> {
        let Some(request) = request else {
            return Ok(Reply::Empty);
        };
        let Some(geometry) = truthy(request.polygon).or_else(|| truthy(request.geometry)) else {
            tracing::debug!("geometry missing, nothing to do");
            return Ok(Reply::Empty);
        };

        let query = IndexTimeSeriesQuery {
            index_name: index_name_or_default(request.index_name),
            scale: float_or_default("scale", request.scale.as_ref(), DEFAULT_SCALE)?,
            geometry,
        };
        tracing::debug!(index = %query.index_name, scale = query.scale, "Requesting time series");
        let outcome = self
            .engine
            .time_series_by_index(query)
            .await
            .map(|timeseries| TimeSeries { timeseries });
        relay("getTimeSeriesByIndex", outcome)
    }

    /// No presence checks here: whatever the client sent goes to the engine,
    /// including an empty object.
    pub async fn get_stats(&self, request: Option<StatsRequest>) -> Result<Reply<Statistics>> {
        let request = request.ok_or(GatewayError::MissingPayload)?;
        let query = StatisticsQuery {
            param_type: request.param_type,
            param_value: request.param_value,
        };
        let outcome = self.engine.statistics(query).await.inspect(|stats| {
            tracing::debug!(
                max_elev = ?stats.max_elev(),
                min_elev = ?stats.min_elev(),
                pop = ?stats.pop(),
                "Statistics computed"
            )
        });
        relay("getStatistics", outcome)
    }
}

fn index_name_or_default(index_name: Option<Value>) -> Value {
    index_name.unwrap_or_else(|| Value::from(DEFAULT_INDEX_NAME))
}

fn log_map_id(map_id: &MapId) {
    tracing::debug!(
        mapid = ?map_id.mapid(),
        has_token = map_id.token().is_some(),
        "Engine returned map id"
    );
}

fn relay<T>(operation: &str, outcome: std::result::Result<T, EngineError>) -> Result<Reply<T>> {
    match outcome {
        Ok(payload) => Ok(Reply::Payload(payload)),
        Err(EngineError::Domain { message }) => {
            tracing::error!(operation, "{}", message);
            Ok(Reply::Failed { message })
        }
        Err(other) => Err(GatewayError::Engine(other)),
    }
}
