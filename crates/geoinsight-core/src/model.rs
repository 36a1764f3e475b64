// crates/geoinsight-core/src/model.rs

//! Wire model of the GeoInsight backend (camelCase JSON).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the backend aggregates for one country.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryInfo {
    pub country_name: String,
    #[serde(default)]
    pub capital: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub subregion: Option<String>,
    /// Square kilometres.
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// US dollars.
    #[serde(default)]
    pub gdp_per_capita: Option<f64>,
    /// 0–10, lower is more stable.
    #[serde(default)]
    pub geopolitical_risk_index: Option<f64>,
    /// Server-side cache timestamp (ISO-8601 local date-time), passed through.
    #[serde(default)]
    pub cached_at: Option<String>,
    #[serde(default)]
    pub weather: Option<WeatherData>,
    #[serde(default)]
    pub news: Vec<NewsArticle>,
    /// Set by the backend on error responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Current conditions in the capital.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    #[serde(default)]
    pub city: Option<String>,
    /// Degrees Celsius.
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub main_condition: Option<String>,
    /// Percent.
    #[serde(default)]
    pub humidity: Option<u32>,
    /// Metres per second.
    #[serde(default)]
    pub wind_speed: Option<f64>,
    /// hPa.
    #[serde(default)]
    pub pressure: Option<u32>,
    /// Metres.
    #[serde(default)]
    pub visibility: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Payload of `GET /health`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("UP")
    }
}

/// Payload of `GET /health/status`: component name -> state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceStatus(pub BTreeMap<String, String>);

impl ServiceStatus {
    /// The `overall` entry (`HEALTHY`, `DEGRADED`, ...), if present.
    pub fn overall(&self) -> Option<&str> {
        self.0.get("overall").map(String::as_str)
    }

    pub fn components(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(k, _)| k.as_str() != "overall")
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Error body shape used by the backend (`message` or `errorMessage`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message
            .or(self.error_message)
            .filter(|m| !m.trim().is_empty())
    }
}
