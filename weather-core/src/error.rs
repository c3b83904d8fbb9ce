use thiserror::Error;

use crate::transport::TransportError;

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum WeatherError {
    /// Malformed input, rejected before any request is sent.
    #[error("{0}")]
    InvalidArgument(String),

    /// Transport failure, undecodable body, or an upstream `status != 1`.
    ///
    /// `code` is the HTTP status for transport failures and the numeric
    /// `infocode` for upstream API failures.
    #[error("{message}")]
    Http {
        message: String,
        code: Option<u32>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl WeatherError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn http(message: impl Into<String>, code: Option<u32>) -> Self {
        Self::Http { message: message.into(), code, source: None }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    pub fn code(&self) -> Option<u32> {
        match self {
            Self::InvalidArgument(_) => None,
            Self::Http { code, .. } => *code,
        }
    }
}

impl From<TransportError> for WeatherError {
    fn from(err: TransportError) -> Self {
        Self::Http {
            message: err.to_string(),
            code: err.status().map(u32::from),
            source: Some(Box::new(err)),
        }
    }
}
