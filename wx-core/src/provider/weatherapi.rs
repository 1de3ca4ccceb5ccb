use async_trait::async_trait;
use reqwest::{Client, Request, StatusCode};
use tracing::{debug, warn};

use crate::{
    config::Settings,
    error::{Error, Result},
    model::{ForecastQuery, ForecastResponse},
};

use super::ForecastProvider;

const FORECAST_PATH: &str = "/v1/forecast.json";

#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    forecast_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_key: settings.api_key.clone(),
            forecast_url: format!("{}{}", settings.base_url, FORECAST_PATH),
            http: builder.build()?,
        })
    }

    /// Query parameters for one day of forecast, no AQI, no alerts.
    ///
    /// `q` is left out entirely when there is no location so the upstream
    /// falls back to its own default.
    pub fn query_pairs<'a>(&'a self, query: &'a ForecastQuery) -> Vec<(&'static str, &'a str)> {
        let mut pairs = vec![("key", self.api_key.as_str())];
        if let Some(location) = query.location.as_deref() {
            pairs.push(("q", location));
        }
        pairs.extend([("days", "1"), ("aqi", "no"), ("alerts", "no")]);
        if query.show_all {
            pairs.push(("a", "1"));
        }
        pairs
    }

    /// Build the GET request without sending it.
    pub fn build_request(&self, query: &ForecastQuery) -> Result<Request> {
        Ok(self
            .http
            .get(&self.forecast_url)
            .query(&self.query_pairs(query))
            .build()?)
    }

    async fn fetch_body(&self, query: &ForecastQuery) -> Result<Vec<u8>> {
        let request = self.build_request(query)?;

        debug!(
            location = query.location.as_deref().unwrap_or("<upstream default>"),
            show_all = query.show_all,
            "Requesting forecast"
        );

        let res = self.http.execute(request).await?;
        let status = res.status();

        if status != StatusCode::OK {
            let body = res.text().await.unwrap_or_default();
            warn!(%status, "Forecast request rejected");
            debug!(body = %truncate_body(&body), "Rejected response body");
            return Err(Error::Unavailable { status });
        }

        Ok(res.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ForecastProvider for WeatherApiClient {
    async fn get_forecast(&self, query: &ForecastQuery) -> Result<ForecastResponse> {
        let body = self.fetch_body(query).await?;
        ForecastResponse::from_json(&body)
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FileConfig, Settings};

    fn client(base_url: &str) -> WeatherApiClient {
        let file = FileConfig {
            api_key: Some("KEY".into()),
            base_url: Some(base_url.into()),
            ..Default::default()
        };
        let settings = Settings::from_sources(file, |_| None).unwrap();
        WeatherApiClient::new(&settings).unwrap()
    }

    fn pairs_of(req: &Request) -> Vec<(String, String)> {
        req.url().query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect()
    }

    #[test]
    fn builds_forecast_url_with_location() {
        let c = client("https://api.weatherapi.com");
        let q = ForecastQuery { location: Some("London".into()), show_all: false };

        let req = c.build_request(&q).unwrap();
        assert_eq!(req.method(), &reqwest::Method::GET);
        assert_eq!(req.url().path(), "/v1/forecast.json");
        assert_eq!(req.url().host_str(), Some("api.weatherapi.com"));
        assert_eq!(req.url().query(), Some("key=KEY&q=London&days=1&aqi=no&alerts=no"));
    }

    #[test]
    fn omits_q_when_no_location() {
        let c = client("https://api.weatherapi.com");
        let req = c.build_request(&ForecastQuery::default()).unwrap();

        let pairs = pairs_of(&req);
        assert!(pairs.iter().all(|(k, _)| k != "q"));
        assert_eq!(req.url().query(), Some("key=KEY&days=1&aqi=no&alerts=no"));
    }

    #[test]
    fn default_location_reaches_the_query() {
        let c = client("https://api.weatherapi.com");
        let q = ForecastQuery::resolve(Some(String::new()), Some("Austin"), false);

        let pairs = pairs_of(&c.build_request(&q).unwrap());
        assert!(pairs.contains(&("q".to_string(), "Austin".to_string())));
    }

    #[test]
    fn show_all_appends_marker() {
        let c = client("https://api.weatherapi.com");

        let q = ForecastQuery { location: Some("Austin".into()), show_all: true };
        let pairs = pairs_of(&c.build_request(&q).unwrap());
        assert_eq!(pairs.last(), Some(&("a".to_string(), "1".to_string())));

        let q = ForecastQuery { location: None, show_all: true };
        let pairs = pairs_of(&c.build_request(&q).unwrap());
        assert!(pairs.iter().any(|(k, v)| k == "a" && v == "1"));
    }

    #[test]
    fn location_is_percent_encoded() {
        let c = client("http://127.0.0.1:9");
        let q = ForecastQuery { location: Some("New York".into()), show_all: false };

        let req = c.build_request(&q).unwrap();
        assert!(req.url().query().unwrap().contains("q=New+York"));
        assert!(pairs_of(&req).contains(&("q".to_string(), "New York".to_string())));
    }

    #[test]
    fn invalid_base_url_is_a_network_error() {
        let c = client("not a url");
        let err = c.build_request(&ForecastQuery::default()).unwrap_err();
        assert!(matches!(err, Error::Network(_)));
    }

    #[test]
    fn truncate_body_caps_length() {
        let long = "x".repeat(500);
        assert_eq!(truncate_body(&long).len(), 200);
        assert_eq!(truncate_body("short"), "short");
    }
}
