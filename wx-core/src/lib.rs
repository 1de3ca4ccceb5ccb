//! Core library for the `wx` CLI.
//!
//! This crate defines:
//! - Configuration loading (`.env`, environment, optional config file)
//! - The weatherapi.com forecast client
//! - The forecast response model and hour selection
//! - Threshold shading for temperatures and rain chance
//!
//! It is used by `wx-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod shade;

pub use config::{FileConfig, Settings};
pub use error::{Error, Result};
pub use model::{
    Condition, Current, Forecast, ForecastDay, ForecastQuery, ForecastResponse, HourEntry, Location,
};
pub use provider::{ForecastProvider, WeatherApiClient};
pub use shade::Shade;
