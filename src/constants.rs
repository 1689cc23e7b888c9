use crate::models::LatLng;

/// Backend base URL, set at build time with `API_URL`
pub const API_URL: &str = match option_env!("API_URL") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

/// How often congestion levels are refreshed for the visible stations
pub const CONGESTION_REFRESH_MS: u32 = 120_000;

/// Initial map centre (Melbourne CBD)
pub const DEFAULT_CENTER: LatLng = LatLng {
    lat: -37.8136,
    lng: 144.9631,
};

pub const DEFAULT_ZOOM: f64 = 11.0;

/// Local storage key holding the signed-in user's access token
pub const TOKEN_STORAGE_KEY: &str = "charge_map_token";
