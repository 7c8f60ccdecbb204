use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_CITY: &str = "unknown";
pub const UNKNOWN_COUNTRY: &str = "XX";

/// Best-effort submitter location, read from edge-provided request headers.
/// Never required for correctness; missing or unreadable headers fall back
/// to the sentinel values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    pub city: String,
    pub country: String,
}

impl Default for GeoInfo {
    fn default() -> Self {
        GeoInfo {
            city: UNKNOWN_CITY.to_string(),
            country: UNKNOWN_COUNTRY.to_string(),
        }
    }
}

impl GeoInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        GeoInfo {
            city: header_value(headers, "cf-ipcity").unwrap_or_else(|| UNKNOWN_CITY.to_string()),
            country: header_value(headers, "cf-ipcountry")
                .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
