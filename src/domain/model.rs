use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Request payloads, as posted by clients. Every field is optional and
// untyped; presence checks happen in the translator and values are passed
// on to the engine as sent.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub image_name: Option<Value>,
    pub vis_params: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicRequest {
    pub collection_name: Option<Value>,
    pub vis_params: Option<Value>,
    pub date_from: Option<Value>,
    pub date_to: Option<Value>,
}

/// Body of `/timeSeriesIndex`. Older clients send the `*TimeSeries` field
/// names and `polygon`; both spellings are kept side by side so neither wins
/// silently when both are present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesRequest {
    pub collection_name: Option<Value>,
    pub collection_name_time_series: Option<Value>,
    pub polygon: Option<Value>,
    pub geometry: Option<Value>,
    pub index_name: Option<Value>,
    pub scale: Option<Value>,
    pub date_from: Option<Value>,
    pub date_from_time_series: Option<Value>,
    pub date_to: Option<Value>,
    pub date_to_time_series: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexTimeSeriesRequest {
    pub polygon: Option<Value>,
    pub geometry: Option<Value>,
    pub index_name: Option<Value>,
    pub scale: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    pub param_type: Option<Value>,
    pub param_value: Option<Value>,
}

// ---------------------------------------------------------------------------
// Engine queries: the defaulted arguments of one engine operation.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageQuery {
    pub image_name: Value,
    pub vis_params: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicQuery {
    pub collection_name: Value,
    pub vis_params: Option<Value>,
    pub date_from: Option<Value>,
    pub date_to: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionTimeSeriesQuery {
    pub collection_name: Value,
    pub index_name: Value,
    pub scale: f64,
    pub geometry: Value,
    pub date_from: Option<Value>,
    pub date_to: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexTimeSeriesQuery {
    pub index_name: Value,
    pub scale: f64,
    pub geometry: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsQuery {
    pub param_type: Option<Value>,
    pub param_value: Option<Value>,
}

// ---------------------------------------------------------------------------
// Engine results, relayed to clients unchanged.
// ---------------------------------------------------------------------------

/// Opaque handle to a rendered tile layer (`mapid`, `token` and whatever
/// else the engine attaches).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(pub Map<String, Value>);

impl MapId {
    pub fn mapid(&self) -> Option<&str> {
        self.0.get("mapid").and_then(Value::as_str)
    }

    pub fn token(&self) -> Option<&str> {
        self.0.get("token").and_then(Value::as_str)
    }
}

/// One `[date, value]` row per image; `value` is null where the index
/// could not be computed.
pub type TimeSeriesRow = Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    pub timeseries: Vec<TimeSeriesRow>,
}

/// Zonal statistics as returned by the engine (`maxElev`, `minElev`, `pop`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Statistics(pub Map<String, Value>);

impl Statistics {
    pub fn max_elev(&self) -> Option<f64> {
        self.0.get("maxElev").and_then(Value::as_f64)
    }

    pub fn min_elev(&self) -> Option<f64> {
        self.0.get("minElev").and_then(Value::as_f64)
    }

    pub fn pop(&self) -> Option<f64> {
        self.0.get("pop").and_then(Value::as_f64)
    }
}
