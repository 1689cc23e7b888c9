mod chargers;
mod congestion;

pub use chargers::{fetch_stations, parse_stations_payload};
pub use congestion::fetch_congestion;
