use crate::libs::config::ConfigModule;
use crate::libs::error::{AppError, ServiceError};
use crate::libs::formatter::api_date;
use crate::libs::indicator::{IndicatorCode, IndicatorReading};
use crate::libs::messages::Message;
use crate::msg_print;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Input};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client, StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

pub const DEFAULT_BASE_URL: &str = "https://mindicador.cl/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 12;

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct IndicatorApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Honour `HTTP(S)_PROXY` from the environment.
    #[serde(default = "default_true")]
    pub use_system_proxy: bool,
}

impl Default for IndicatorApiConfig {
    fn default() -> Self {
        IndicatorApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            use_system_proxy: true,
        }
    }
}

impl IndicatorApiConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "indicators".to_string(),
            name: "Indicator API".to_string(),
        }
    }

    pub fn init(config: &IndicatorApiConfig) -> anyhow::Result<Self> {
        msg_print!(Message::ConfigModuleIndicators);
        Ok(Self {
            base_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptIndicatorUrl.to_string())
                .default(config.base_url.clone())
                .interact_text()?,
            timeout_secs: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptIndicatorTimeout.to_string())
                .default(config.timeout_secs)
                .interact_text()?,
            use_system_proxy: config.use_system_proxy,
        })
    }
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    #[serde(default, alias = "series")]
    serie: Option<Vec<SeriesPoint>>,
}

#[derive(Debug, Deserialize)]
struct SeriesPoint {
    fecha: String,
    valor: Value,
}

/// HTTP client for `GET {base}/{code}[/{dd-mm-yyyy}]`.
pub struct IndicatorClient {
    client: Client,
    config: IndicatorApiConfig,
}

impl IndicatorClient {
    pub fn new(config: &IndicatorApiConfig) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder()
            .user_agent(format!("{}/{}", APP_METADATA_NAME, APP_METADATA_VERSION))
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs));
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let client = builder.build().map_err(|e| ServiceError::Request(e.to_string()))?;
        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn url(&self, code: IndicatorCode, date: Option<NaiveDate>) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        match date {
            Some(date) => format!("{}/{}/{}", base, code, api_date(date)),
            None => format!("{}/{}", base, code),
        }
    }

    /// Fetches the first value of the series. `Ok(None)` when the service has
    /// no data for that code and date.
    pub async fn fetch(&self, code: IndicatorCode, date: Option<NaiveDate>) -> Result<Option<IndicatorReading>, AppError> {
        let url = self.url(code, date);
        debug!(%url, "requesting indicator");

        let response = self.client.get(&url).send().await.map_err(request_error)?;
        match response.status() {
            StatusCode::NOT_FOUND => return Err(ServiceError::NotFound.into()),
            status if !status.is_success() => {
                warn!(%url, status = status.as_u16(), "indicator service returned an error status");
                return Err(ServiceError::Status(status.as_u16()).into());
            }
            _ => {}
        }

        let body = response.text().await.map_err(request_error)?;
        parse_series(code, &body)
    }

    /// Like [`fetch`](Self::fetch) for a code typed by the user. Unknown codes
    /// fail validation without any request being sent.
    pub async fn fetch_code(&self, code: &str, date: Option<NaiveDate>) -> Result<Option<IndicatorReading>, AppError> {
        let code: IndicatorCode = code.parse()?;
        self.fetch(code, date).await
    }
}

fn request_error(e: reqwest::Error) -> AppError {
    warn!(error = %e, "indicator request failed");
    let error = if e.is_timeout() {
        ServiceError::Timeout
    } else if e.is_connect() {
        ServiceError::Unreachable
    } else {
        ServiceError::Request(e.to_string())
    };
    error.into()
}

/// Reads `serie[0]` from a response body.
pub fn parse_series(code: IndicatorCode, body: &str) -> Result<Option<IndicatorReading>, AppError> {
    let response: SeriesResponse = serde_json::from_str(body).map_err(|e| ServiceError::Malformed(e.to_string()))?;
    let Some(point) = response.serie.unwrap_or_default().into_iter().next() else {
        return Ok(None);
    };

    let date = point
        .fecha
        .get(..10)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .ok_or_else(|| ServiceError::Malformed(format!("unexpected fecha '{}'", point.fecha)))?;

    let value = match &point.valor {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|value| value.is_finite())
    .ok_or_else(|| ServiceError::Malformed(format!("unexpected valor '{}'", point.valor)))?;

    Ok(Some(IndicatorReading { code, date, value }))
}
