use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

use crate::error::WeatherError;

/// Decoded JSON object returned by the upstream API.
pub type JsonMap = Map<String, Value>;

/// Where the city for a live weather lookup comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Ip,
    Geo,
    City,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Ip => "ip",
            Source::Geo => "geo",
            Source::City => "city",
        }
    }

    pub const fn all() -> &'static [Source] {
        &[Source::Ip, Source::Geo, Source::City]
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Source {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "ip" => Ok(Source::Ip),
            "geo" => Ok(Source::Geo),
            "city" => Ok(Source::City),
            _ => Err(WeatherError::invalid_argument(format!("Invalid type: {value}"))),
        }
    }
}

/// Weather data granularity: current conditions or the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Extent {
    #[default]
    Base,
    All,
}

impl Extent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Extent::Base => "base",
            Extent::All => "all",
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Extent {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "base" => Ok(Extent::Base),
            "all" => Ok(Extent::All),
            _ => Err(WeatherError::invalid_argument(format!(
                "Invalid type value(base/all): {value}"
            ))),
        }
    }
}

/// Body encoding requested from the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
    #[default]
    Json,
    Xml,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Xml => "xml",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Format {
    type Error = WeatherError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "xml" => Ok(Format::Xml),
            _ => Err(WeatherError::invalid_argument(format!("Invalid response format: {value}"))),
        }
    }
}

/// Result of a weather lookup: a decoded object for `json`, the untouched
/// body for `xml`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WeatherPayload {
    Json(JsonMap),
    Xml(String),
}

impl WeatherPayload {
    pub fn as_json(&self) -> Option<&JsonMap> {
        match self {
            WeatherPayload::Json(map) => Some(map),
            WeatherPayload::Xml(_) => None,
        }
    }

    pub fn as_xml(&self) -> Option<&str> {
        match self {
            WeatherPayload::Json(_) => None,
            WeatherPayload::Xml(body) => Some(body),
        }
    }
}
