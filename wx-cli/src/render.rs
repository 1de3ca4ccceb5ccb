use std::{fmt::Display, io::Write};

use chrono::{DateTime, TimeZone};
use colored::Colorize;
use tracing::warn;
use wx_core::{Current, ForecastResponse, HourEntry, Location, Shade};

fn paint(text: String, shade: Shade) -> String {
    match shade {
        Shade::Red => text.red().to_string(),
        Shade::Blue => text.blue().to_string(),
        Shade::Plain => text,
    }
}

fn temperature(temp_f: f64) -> String {
    paint(format!("{temp_f:.0}F"), Shade::for_temperature(temp_f))
}

fn rain_chance(pct: f64) -> String {
    paint(format!("{pct:.0}%"), Shade::for_rain_chance(pct))
}

pub fn current_line(location: &Location, current: &Current) -> String {
    format!(
        "{}, {}: {}, {}",
        location.name,
        location.country,
        temperature(current.temp_f),
        current.condition.text,
    )
}

/// `None` when the timestamp can't be placed on the clock.
pub fn hour_line<Tz: TimeZone>(hour: &HourEntry, tz: &Tz) -> Option<String>
where
    Tz::Offset: Display,
{
    let time = hour.time_in(tz)?;
    Some(format!(
        "{} - {}, {}, {}",
        time.format("%H:%M"),
        temperature(hour.temp_f),
        rain_chance(hour.chance_of_rain),
        hour.condition.text,
    ))
}

/// Write the current conditions, then the selected hours of the first day.
///
/// Nothing is written when the response has no forecast days.
pub fn render<W, Tz>(
    out: &mut W,
    forecast: &ForecastResponse,
    now: &DateTime<Tz>,
    show_all: bool,
) -> wx_core::Result<()>
where
    W: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let day = forecast.first_day()?;

    writeln!(out, "{}", current_line(&forecast.location, &forecast.current))?;

    let tz = now.timezone();
    for hour in day.visible_hours(now, show_all) {
        match hour_line(hour, &tz) {
            Some(line) => writeln!(out, "{line}")?,
            None => warn!(
                time_epoch = hour.time_epoch,
                "Skipping hour with out-of-range timestamp"
            ),
        }
    }

    Ok(())
}
