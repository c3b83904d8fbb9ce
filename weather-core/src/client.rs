use serde_json::Value;
use std::sync::Arc;

use crate::{
    error::{Result, WeatherError},
    model::{Extent, Format, JsonMap, Source, WeatherPayload},
    response,
    transport::{HttpTransport, ReqwestTransport, TransportOptions},
    validate,
};

pub const DEFAULT_BASE_URL: &str = "https://restapi.amap.com";

const IP_PATH: &str = "/v3/ip";
const REGEO_PATH: &str = "/v3/geocode/regeo";
const WEATHER_PATH: &str = "/v3/weather/weatherInfo";

/// Client for the AMap IP, reverse-geocode and weather endpoints.
///
/// Every call is a single round trip: check the input, send one GET, decode
/// and check the body. No response is cached and nothing is retried.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    key: String,
    options: TransportOptions,
    transport: Arc<dyn HttpTransport>,
}

impl WeatherClient {
    /// The key is not validated; a bad key surfaces as an upstream error.
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_transport(key, Arc::new(ReqwestTransport::new()))
    }

    pub fn with_transport(key: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        Self { key: key.into(), options: TransportOptions::default(), transport }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Replace the transport options used by all subsequent requests.
    pub fn set_transport_options(&mut self, options: TransportOptions) {
        self.options = options;
    }

    /// Resolve a city from `source` (`ip`, `geo` or `city`) and `value`, then
    /// fetch its weather.
    ///
    /// All selectors are checked before the first request is sent.
    pub async fn resolve_and_fetch(
        &self,
        source: &str,
        value: &str,
        extent: &str,
        format: &str,
    ) -> Result<WeatherPayload> {
        let source = Source::try_from(source)?;
        let format = Format::try_from(format)?;
        let extent = Extent::try_from(extent)?;

        self.live_weather(source, value, extent, format).await
    }

    pub async fn live_weather(
        &self,
        source: Source,
        value: &str,
        extent: Extent,
        format: Format,
    ) -> Result<WeatherPayload> {
        let city = match source {
            Source::Ip => {
                let response = self.fetch_city_by_ip(value).await?;
                non_empty_str(response.get("city")).map(str::to_owned)
            }
            Source::Geo => {
                let response = self.fetch_city_by_geo(value).await?;
                let component =
                    response.get("regeocode").and_then(|regeo| regeo.get("addressComponent"));

                non_empty_str(component.and_then(|c| c.get("district")))
                    .or_else(|| non_empty_str(component.and_then(|c| c.get("city"))))
                    .map(str::to_owned)
            }
            Source::City => Some(value.to_owned()).filter(|city| !city.is_empty()),
        };

        let Some(city) = city else {
            return Err(WeatherError::invalid_argument(format!(
                "Unable to determine city from provided value: {value}"
            )));
        };

        tracing::debug!(%source, %city, "resolved city");

        self.weather(&city, extent, format).await
    }

    /// Look up the city an IP address belongs to.
    ///
    /// The upstream only knows mainland addresses; others come back with an
    /// empty `city`.
    pub async fn fetch_city_by_ip(&self, ip: &str) -> Result<JsonMap> {
        if !validate::is_valid_ip(ip) {
            return Err(WeatherError::invalid_argument("Invalid IP"));
        }

        self.get_json(IP_PATH, &[("key", self.key.as_str()), ("ip", ip)]).await
    }

    /// Reverse-geocode a `longitude,latitude` pair.
    pub async fn fetch_city_by_geo(&self, location: &str) -> Result<JsonMap> {
        if !validate::is_valid_location(location) {
            return Err(WeatherError::invalid_argument("Invalid Location"));
        }

        self.get_json(REGEO_PATH, &[("key", self.key.as_str()), ("location", location)]).await
    }

    /// Fetch weather for `city`; `extent` is `base`/`all` and `format` is
    /// `json`/`xml`, both case-insensitive.
    pub async fn fetch_weather(
        &self,
        city: &str,
        extent: &str,
        format: &str,
    ) -> Result<WeatherPayload> {
        let format = Format::try_from(format)?;
        let extent = Extent::try_from(extent)?;

        self.weather(city, extent, format).await
    }

    /// XML bodies are returned as-is without checking the upstream status.
    pub async fn weather(
        &self,
        city: &str,
        extent: Extent,
        format: Format,
    ) -> Result<WeatherPayload> {
        let body = self
            .send(
                WEATHER_PATH,
                &[
                    ("key", self.key.as_str()),
                    ("city", city),
                    ("output", format.as_str()),
                    ("extensions", extent.as_str()),
                ],
            )
            .await?;

        match format {
            Format::Json => {
                let response = response::decode(&body)?;
                response::check(&response)?;
                Ok(WeatherPayload::Json(response))
            }
            Format::Xml => Ok(WeatherPayload::Xml(body)),
        }
    }

    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<JsonMap> {
        let body = self.send(path, params).await?;
        let response = response::decode(&body)?;
        response::check(&response)?;
        Ok(response)
    }

    async fn send(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = self.endpoint(path);
        let query: Vec<(&str, &str)> =
            params.iter().copied().filter(|(_, value)| !value.is_empty()).collect();

        tracing::debug!(%url, "sending request");

        self.transport.get(&url, &query, &self.options).await.map_err(|err| {
            tracing::warn!(%url, "request failed: {err}");
            WeatherError::from(err)
        })
    }

    fn endpoint(&self, path: &str) -> String {
        let base = self.options.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}{path}", base.trim_end_matches('/'))
    }
}

// The upstream uses `[]` instead of `""` for unknown fields.
fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}
