pub mod payload;
pub mod translator;

pub use crate::domain::model::{MapId, Statistics, TimeSeries};
pub use crate::domain::ports::{ConfigProvider, GeoEngine};
pub use crate::utils::error::Result;
pub use translator::{Reply, RequestTranslator};
