use async_trait::async_trait;
use std::fmt::Debug;

use crate::{error::Result, model::ForecastQuery, model::ForecastResponse};

pub mod weatherapi;

pub use weatherapi::WeatherApiClient;

/// Source of same-day forecasts. One call means one upstream request.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn get_forecast(&self, query: &ForecastQuery) -> Result<ForecastResponse>;
}
