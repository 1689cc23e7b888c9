use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Coarse classification of how busy a charging station is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CongestionLevel {
    Low,
    Medium,
    High,
    #[serde(other)]
    Unknown,
}

impl CongestionLevel {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unknown => "Unknown",
        }
    }
}

/// Station identifier to congestion level, replaced wholesale on every poll
pub type CongestionMap = HashMap<String, CongestionLevel>;

#[derive(Debug, Deserialize)]
struct CongestionEntry {
    #[serde(rename = "chargerId")]
    charger_id: String,
    #[serde(default)]
    congestion_level: Option<CongestionLevel>,
}

#[derive(Debug, Deserialize)]
struct CongestionData {
    #[serde(rename = "congestionLevels")]
    congestion_levels: Option<Vec<CongestionEntry>>,
}

#[derive(Debug, Deserialize)]
struct CongestionEnvelope {
    data: Option<CongestionData>,
}

/// Parse the body of a `POST /predict/congestion` response
///
/// # Errors
///
/// Returns an error if the body is not JSON or lacks `data.congestionLevels`
pub fn parse_congestion_payload(body: &str) -> Result<CongestionMap, String> {
    let envelope: CongestionEnvelope = serde_json::from_str(body)
        .map_err(|e| format!("Failed to parse congestion response: {e}"))?;

    let entries = envelope
        .data
        .and_then(|d| d.congestion_levels)
        .ok_or_else(|| "Response missing data.congestionLevels".to_string())?;

    // Later entries for the same charger win
    Ok(entries
        .into_iter()
        .map(|entry| {
            let level = entry.congestion_level.unwrap_or(CongestionLevel::Unknown);
            (entry.charger_id, level)
        })
        .collect())
}
