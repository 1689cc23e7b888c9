use crate::models::Station;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StationsPayload {
    Bare(Vec<serde_json::Value>),
    Wrapped { data: Vec<serde_json::Value> },
}

/// Parse a station list, either a bare array or `{ "data": [...] }`.
///
/// Records are decoded one at a time; an entry that is not a station object
/// is dropped with a warning and the rest of the list is kept.
///
/// # Errors
///
/// Returns an error if the body matches neither shape
pub fn parse_stations_payload(body: &str) -> Result<Vec<Station>, String> {
    let payload: StationsPayload = serde_json::from_str(body)
        .map_err(|e| format!("Failed to deserialize stations: {e}"))?;

    let (StationsPayload::Bare(records) | StationsPayload::Wrapped { data: records }) = payload;

    Ok(records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match Station::deserialize(record) {
            Ok(station) => Some(station),
            Err(e) => {
                leptos::logging::warn!("Skipping station record {}: {}", index, e);
                None
            }
        })
        .collect())
}

/// Fetch all charging stations from `GET {base_url}/chargers`
///
/// # Errors
///
/// Returns an error if:
/// - The HTTP request fails
/// - The response status is not ok
/// - The response body cannot be deserialized
pub async fn fetch_stations(base_url: &str) -> Result<Vec<Station>, String> {
    let url = format!("{}/chargers", base_url.trim_end_matches('/'));

    let response = reqwest::get(&url)
        .await
        .map_err(|e| format!("Request failed: {e}"))?;

    if !response.status().is_success() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| format!("Failed to read response: {e}"))?;

    parse_stations_payload(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_array() {
        let stations = parse_stations_payload(r#"[{"_id": "a", "latitude": 1.0, "longitude": 2.0}]"#).unwrap();
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].id, "a");
    }

    #[test]
    fn test_parse_wrapped() {
        let body = r#"{"success": true, "data": [{"_id": "a"}, {"_id": "b", "latitude": "abc"}]}"#;
        let stations = parse_stations_payload(body).unwrap();
        assert_eq!(stations.len(), 2);
        assert!(stations[1].position().is_none());
    }

    #[test]
    fn test_bad_records_do_not_drop_the_list() {
        let body = r#"[
            {"_id": "a", "latitude": -37.8, "longitude": 144.9},
            {"_id": "b", "latitude": null, "longitude": 144.9, "cost": 0.55},
            {"latitude": "-37.7", "longitude": "145.0", "charging_points": 1.5},
            "not a station",
            {"_id": "d", "latitude": -37.6, "longitude": 145.1, "cost": {"per_kwh": 0.4}}
        ]"#;

        let stations = parse_stations_payload(body).unwrap();
        let ids: Vec<&str> = stations.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "", "d"]);
        assert!(stations[1].position().is_none());
        assert_eq!(stations[1].price_cents(), Some(55.0));
        assert!(stations[2].position().is_some());
        assert!(stations[3].cost.is_none());
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(parse_stations_payload(r#"{"message": "error"}"#).is_err());
        assert!(parse_stations_payload("").is_err());
    }
}
