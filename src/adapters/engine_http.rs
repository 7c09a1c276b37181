use crate::domain::model::{
    CollectionTimeSeriesQuery, ImageQuery, IndexTimeSeriesQuery, MapId, MosaicQuery, Statistics,
    StatisticsQuery, TimeSeriesRow,
};
use crate::domain::ports::{ConfigProvider, GeoEngine};
use crate::utils::error::{EngineError, GatewayError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// [`GeoEngine`] backed by a remote engine service.
///
/// Every operation is a `POST {endpoint}/{operationName}` with the query as a
/// camelCase JSON body. A non-2xx response that carries a message is the
/// engine's domain failure; anything else that goes wrong is reported as
/// transport or protocol trouble.
#[derive(Debug, Clone)]
pub struct HttpGeoEngine {
    client: Client,
    base_url: Url,
}

impl HttpGeoEngine {
    pub fn new(endpoint: &str, timeout: Duration, headers: &[(String, String)]) -> Result<Self> {
        let mut base_url =
            Url::parse(endpoint).map_err(|e| GatewayError::InvalidConfigValueError {
                field: "engine.endpoint".to_string(),
                value: endpoint.to_string(),
                reason: format!("Invalid URL format: {}", e),
            })?;
        // Url::join drops the last path segment unless it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(build_headers(headers)?)
            .build()
            .map_err(EngineError::Transport)?;

        Ok(Self { client, base_url })
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        Self::new(
            config.engine_endpoint(),
            Duration::from_secs(config.request_timeout_seconds()),
            &config.engine_headers(),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn call<Q, R>(&self, operation: &str, query: &Q) -> std::result::Result<R, EngineError>
    where
        Q: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(operation)
            .map_err(|e| EngineError::Protocol(format!("cannot build URL for {}: {}", operation, e)))?;

        tracing::debug!("Calling engine operation {} at {}", operation, url);
        let response = self.client.post(url).json(query).send().await?;
        let status = response.status();
        tracing::debug!("Engine response status for {}: {}", operation, status);

        if status.is_success() {
            let body = response.bytes().await?;
            return serde_json::from_slice(&body).map_err(|e| {
                EngineError::Protocol(format!("{} returned an undecodable body: {}", operation, e))
            });
        }

        let body = response.text().await.unwrap_or_default();
        match error_message(&body) {
            Some(message) => Err(EngineError::Domain { message }),
            None => {
                tracing::warn!("Engine operation {} failed with status {} and no message", operation, status);
                Err(EngineError::Protocol(format!(
                    "{} failed with status {}",
                    operation, status
                )))
            }
        }
    }
}

fn build_headers(headers: &[(String, String)]) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let invalid = |reason: String| GatewayError::InvalidConfigValueError {
            field: "engine.headers".to_string(),
            value: name.clone(),
            reason,
        };
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| invalid(format!("Invalid header name: {}", e)))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| invalid(format!("Invalid header value: {}", e)))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}

/// Pulls the failure message out of an engine error body.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let text = |v: Option<&Value>| v.and_then(Value::as_str).map(str::to_string);

    text(value.get("errMsg"))
        .or_else(|| text(value.get("message")))
        .or_else(|| text(value.get("error").and_then(|e| e.get("message"))))
}

#[async_trait]
impl GeoEngine for HttpGeoEngine {
    async fn image_to_map_id(&self, query: ImageQuery) -> std::result::Result<MapId, EngineError> {
        self.call("imageToMapId", &query).await
    }

    async fn first_image_in_mosaic_to_map_id(
        &self,
        query: MosaicQuery,
    ) -> std::result::Result<MapId, EngineError> {
        self.call("firstImageInMosaicToMapId", &query).await
    }

    async fn time_series_by_collection_and_index(
        &self,
        query: CollectionTimeSeriesQuery,
    ) -> std::result::Result<Vec<TimeSeriesRow>, EngineError> {
        self.call("getTimeSeriesByCollectionAndIndex", &query).await
    }

    async fn time_series_by_index(
        &self,
        query: IndexTimeSeriesQuery,
    ) -> std::result::Result<Vec<TimeSeriesRow>, EngineError> {
        self.call("getTimeSeriesByIndex", &query).await
    }

    async fn statistics(&self, query: StatisticsQuery) -> std::result::Result<Statistics, EngineError> {
        self.call("getStatistics", &query).await
    }
}
