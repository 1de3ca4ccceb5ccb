use std::{fmt::Display, io::Write};

use anyhow::Context;
use chrono::{DateTime, Local, TimeZone};
use clap::Parser;
use tracing::debug;
use wx_core::{ForecastProvider, ForecastQuery, Settings, WeatherApiClient};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "wx", version, about = "Current weather and today's hourly forecast")]
pub struct Cli {
    /// Location name; falls back to DEFAULT_CITY, then to the API's own default.
    pub location: Option<String>,

    /// Display all hours, including ones already past.
    #[arg(short = 'a', long = "all")]
    pub all: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let settings = Settings::load().context("Failed to load configuration")?;
        debug!(?settings, "Configuration loaded");

        let query = ForecastQuery::resolve(
            self.location,
            settings.default_location.as_deref(),
            self.all,
        );
        let provider = WeatherApiClient::new(&settings)?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        show(&provider, &query, &mut out, &Local::now()).await
    }
}

/// Fetch once and print the result.
pub async fn show<P, W, Tz>(
    provider: &P,
    query: &ForecastQuery,
    out: &mut W,
    now: &DateTime<Tz>,
) -> anyhow::Result<()>
where
    P: ForecastProvider + ?Sized,
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let forecast = provider.get_forecast(query).await?;
    render::render(out, &forecast, now, query.show_all)?;
    out.flush()?;
    Ok(())
}
