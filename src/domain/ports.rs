use crate::domain::model::{
    CollectionTimeSeriesQuery, ImageQuery, IndexTimeSeriesQuery, MapId, MosaicQuery, Statistics,
    StatisticsQuery, TimeSeriesRow,
};
use crate::utils::error::EngineError;
use async_trait::async_trait;

/// The external geospatial engine. Each operation may fail with
/// [`EngineError::Domain`], which callers relay to clients as a message.
#[async_trait]
pub trait GeoEngine: Send + Sync {
    /// `imageToMapId`
    async fn image_to_map_id(&self, query: ImageQuery) -> Result<MapId, EngineError>;

    /// `firstImageInMosaicToMapId`
    async fn first_image_in_mosaic_to_map_id(
        &self,
        query: MosaicQuery,
    ) -> Result<MapId, EngineError>;

    /// `getTimeSeriesByCollectionAndIndex`
    async fn time_series_by_collection_and_index(
        &self,
        query: CollectionTimeSeriesQuery,
    ) -> Result<Vec<TimeSeriesRow>, EngineError>;

    /// `getTimeSeriesByIndex`
    async fn time_series_by_index(
        &self,
        query: IndexTimeSeriesQuery,
    ) -> Result<Vec<TimeSeriesRow>, EngineError>;

    /// `getStatistics`
    async fn statistics(&self, query: StatisticsQuery) -> Result<Statistics, EngineError>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> &str;
    fn engine_endpoint(&self) -> &str;
    fn request_timeout_seconds(&self) -> u64;
    fn engine_headers(&self) -> Vec<(String, String)>;
    fn json_logs(&self) -> bool;
}
