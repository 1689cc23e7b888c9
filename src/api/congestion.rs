use crate::models::{parse_congestion_payload, CongestionMap};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct CongestionRequest<'a> {
    #[serde(rename = "stationIds")]
    station_ids: &'a [String],
}

/// Fetch congestion levels for a set of stations
///
/// Sends `POST {base_url}/predict/congestion` with a bearer token.
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is not 2xx
/// - The body lacks `data.congestionLevels`
pub async fn fetch_congestion(base_url: &str, station_ids: &[String], token: &str) -> Result<CongestionMap, String> {
    let url = format!("{}/predict/congestion", base_url.trim_end_matches('/'));

    let response = reqwest::Client::new()
        .post(&url)
        .bearer_auth(token)
        .json(&CongestionRequest { station_ids })
        .send()
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {e}"))?;

    if !status.is_success() {
        return Err(error_message(status.as_u16(), &body));
    }

    parse_congestion_payload(&body)
}

/// Prefer the backend's `message` field when it sends one
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let ids = vec!["s1".to_string(), "s2".to_string()];
        let body = serde_json::to_value(CongestionRequest { station_ids: &ids }).unwrap();
        assert_eq!(body, serde_json::json!({"stationIds": ["s1", "s2"]}));
    }

    #[test]
    fn test_error_message_uses_backend_message() {
        assert_eq!(error_message(401, r#"{"message": "Token expired"}"#), "Token expired");
    }

    #[test]
    fn test_error_message_falls_back_to_status() {
        assert_eq!(error_message(502, "<html>Bad gateway</html>"), "HTTP error! status: 502");
        assert_eq!(error_message(500, r#"{"error": true}"#), "HTTP error! status: 500");
    }
}
