//! Core library for the `amap-weather` CLI.
//!
//! This crate defines:
//! - `WeatherClient`, a thin client over the AMap IP, reverse-geocode and
//!   weather endpoints
//! - Input validation and upstream status/infocode handling
//! - The HTTP transport seam and its `reqwest` implementation
//! - Configuration & credentials handling
//!
//! It is used by `amap-weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod infocode;
pub mod model;
pub mod response;
pub mod transport;
pub mod validate;

pub use client::WeatherClient;
pub use config::{Config, TransportConfig};
pub use error::{Result, WeatherError};
pub use model::{Extent, Format, JsonMap, Source, WeatherPayload};
pub use transport::{HttpTransport, ReqwestTransport, TransportError, TransportOptions};
