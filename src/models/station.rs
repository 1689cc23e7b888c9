use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A coordinate as delivered by the backend, which may send numbers or strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Degrees(f64),
    Text(String),
}

impl Default for Coordinate {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl Coordinate {
    /// Parse the coordinate, returning `None` unless it is a finite number
    #[must_use]
    pub fn degrees(&self) -> Option<f64> {
        let value = match self {
            Self::Degrees(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        Self::Degrees(value)
    }
}

impl From<&str> for Coordinate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Access restriction flag; the backend stores it as the strings `"true"`/`"false"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccessFlag {
    Bool(bool),
    Text(String),
}

impl Default for AccessFlag {
    fn default() -> Self {
        Self::Bool(false)
    }
}

impl AccessFlag {
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        }
    }
}

/// Rated power, number or string depending on the data source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PowerRating {
    Kilowatts(f64),
    Text(String),
}

impl PowerRating {
    #[must_use]
    pub fn kilowatts(&self) -> Option<f64> {
        let value = match self {
            Self::Kilowatts(v) => *v,
            Self::Text(s) => s.trim().trim_end_matches("kW").trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Advertised price, either a bare dollar amount or free text such as `"$0.55/kWh"` or `"45c/kWh"`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Dollars(f64),
    Text(String),
}

impl Price {
    /// Price in cents per kWh. Text is read from its first number; a `c` or `¢`
    /// right after it means cents, anything else dollars. `"Free"` is zero.
    #[must_use]
    pub fn cents_per_kwh(&self) -> Option<f64> {
        let cents = match self {
            Self::Dollars(v) => dollars_to_cents(*v),
            Self::Text(s) => parse_price_text(s)?,
        };
        (cents.is_finite() && cents >= 0.0).then_some(cents)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dollars(v) => write!(f, "${v:.2}/kWh"),
            Self::Text(s) => f.write_str(s.trim()),
        }
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

fn parse_price_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("free") {
        return Some(0.0);
    }
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let number_len = text[start..]
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(text.len() - start);
    let value = text[start..start + number_len].parse::<f64>().ok()?;

    let unit = text[start + number_len..].trim_start();
    if unit.starts_with(['c', 'C', '¢']) {
        Some(value)
    } else {
        Some(dollars_to_cents(value))
    }
}

// Rounded to a hundredth of a cent
fn dollars_to_cents(dollars: f64) -> f64 {
    (dollars * 10_000.0).round() / 100.0
}

/// Falls back to the default for values of the wrong shape, so one bad field
/// costs only that field and not the whole record
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// A charging station record as served by `GET /chargers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "_id", default, deserialize_with = "identifier")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient")]
    pub latitude: Coordinate,
    #[serde(default, deserialize_with = "lenient")]
    pub longitude: Coordinate,
    #[serde(default, deserialize_with = "lenient")]
    pub operator: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub connection_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub power_output: Option<PowerRating>,
    #[serde(default, deserialize_with = "lenient")]
    pub cost: Option<Price>,
    #[serde(default, deserialize_with = "lenient")]
    pub access_key_required: AccessFlag,
    #[serde(default, deserialize_with = "lenient")]
    pub charging_points: Option<u32>,
}

impl Station {
    /// Create a station with only an identifier and a position
    #[must_use]
    pub fn new(id: impl Into<String>, latitude: impl Into<Coordinate>, longitude: impl Into<Coordinate>) -> Self {
        Self {
            id: id.into(),
            latitude: latitude.into(),
            longitude: longitude.into(),
            operator: None,
            connection_type: None,
            power_output: None,
            cost: None,
            access_key_required: AccessFlag::default(),
            charging_points: None,
        }
    }

    /// Position of the station, if both coordinates are finite numbers
    #[must_use]
    pub fn position(&self) -> Option<LatLng> {
        Some(LatLng::new(self.latitude.degrees()?, self.longitude.degrees()?))
    }

    #[must_use]
    pub fn is_restricted(&self) -> bool {
        self.access_key_required.is_set()
    }

    #[must_use]
    pub fn power_kw(&self) -> Option<f64> {
        self.power_output.as_ref().and_then(PowerRating::kilowatts)
    }

    #[must_use]
    pub fn price_cents(&self) -> Option<f64> {
        self.cost.as_ref().and_then(Price::cents_per_kwh)
    }
}
