use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Per-invocation request: where to look and which hours to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForecastQuery {
    /// `None` lets the upstream pick its own default location.
    pub location: Option<String>,
    pub show_all: bool,
}

impl ForecastQuery {
    /// A non-blank CLI argument wins over a non-blank default location.
    pub fn resolve(arg: Option<String>, default_location: Option<&str>, show_all: bool) -> Self {
        let location = arg
            .filter(|s| !s.trim().is_empty())
            .or_else(|| default_location.filter(|s| !s.trim().is_empty()).map(str::to_owned));

        Self { location, show_all }
    }
}

/// `null` decodes to the zero value, same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Location {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Current {
    #[serde(deserialize_with = "null_as_default")]
    pub temp_f: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub condition: Condition,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HourEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub time_epoch: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub temp_f: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub condition: Condition,
    #[serde(deserialize_with = "null_as_default")]
    pub chance_of_rain: f64,
}

impl HourEntry {
    /// Wall-clock time of this entry in the given zone.
    pub fn time_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.timestamp_opt(self.time_epoch, 0).single()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastDay {
    #[serde(deserialize_with = "null_as_default")]
    pub hour: Vec<HourEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Forecast {
    #[serde(rename = "forecastday", deserialize_with = "null_as_default")]
    pub days: Vec<ForecastDay>,
}

/// Body of `/v1/forecast.json`. Missing fields fall back to zero values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForecastResponse {
    #[serde(deserialize_with = "null_as_default")]
    pub location: Location,
    #[serde(deserialize_with = "null_as_default")]
    pub current: Current,
    #[serde(deserialize_with = "null_as_default")]
    pub forecast: Forecast,
}

impl ForecastResponse {
    pub fn from_json(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    pub fn first_day(&self) -> Result<&ForecastDay> {
        self.forecast.days.first().ok_or(Error::NoForecastDays)
    }
}

impl ForecastDay {
    /// Hours to display, in upstream order.
    ///
    /// Without `show_all` an hour is kept when it starts at or after the
    /// current second.
    pub fn visible_hours<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        show_all: bool,
    ) -> impl Iterator<Item = &HourEntry> {
        let cutoff = now.timestamp();
        self.hour
            .iter()
            .filter(move |h| show_all || h.time_epoch >= cutoff)
    }
}
