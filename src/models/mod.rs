mod congestion;
mod cost;
mod filter;
mod station;

pub use congestion::{parse_congestion_payload, CongestionLevel, CongestionMap};
pub use cost::{estimate_cost, format_estimate};
pub use filter::{connector_options, operator_options, price_bounds, ChargingSpeed, StationFilter};
pub use station::{AccessFlag, Coordinate, LatLng, PowerRating, Price, Station};
