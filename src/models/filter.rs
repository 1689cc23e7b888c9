use super::station::Station;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Charging speed buckets offered by the smart filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChargingSpeed {
    Under7,
    From7To22,
    From22To50,
    From50To150,
    From150To250,
    Over250,
}

impl ChargingSpeed {
    pub const ALL: [ChargingSpeed; 6] = [
        Self::Under7,
        Self::From7To22,
        Self::From22To50,
        Self::From50To150,
        Self::From150To250,
        Self::Over250,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Under7 => "<7kW",
            Self::From7To22 => "7-22kW",
            Self::From22To50 => "22-50kW",
            Self::From50To150 => "50-150kW",
            Self::From150To250 => "150kW-250kW",
            Self::Over250 => "250kW+",
        }
    }

    /// Bucket for a rated power; upper bounds are inclusive, so 22 kW is `7-22kW`
    #[must_use]
    pub fn for_power(kw: f64) -> Option<Self> {
        if !kw.is_finite() || kw < 0.0 {
            return None;
        }
        Some(match kw {
            k if k < 7.0 => Self::Under7,
            k if k <= 22.0 => Self::From7To22,
            k if k <= 50.0 => Self::From22To50,
            k if k <= 150.0 => Self::From50To150,
            k if k <= 250.0 => Self::From150To250,
            _ => Self::Over250,
        })
    }
}

/// Criteria narrowing the station list shown on the map.
/// An empty criterion does not restrict.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationFilter {
    pub connector_types: Vec<String>,
    pub speeds: Vec<ChargingSpeed>,
    pub operators: Vec<String>,
    /// Inclusive price window in cents per kWh; `None` is the full range
    pub price_range: Option<(f64, f64)>,
}

impl StationFilter {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.connector_types.is_empty()
            && self.speeds.is_empty()
            && self.operators.is_empty()
            && self.price_range.is_none()
    }

    #[must_use]
    pub fn matches(&self, station: &Station) -> bool {
        let connector_ok = self.connector_types.is_empty()
            || station
                .connection_type
                .as_ref()
                .is_some_and(|c| self.connector_types.contains(c));

        let speed_ok = self.speeds.is_empty()
            || station
                .power_kw()
                .and_then(ChargingSpeed::for_power)
                .is_some_and(|s| self.speeds.contains(&s));

        let operator_ok = self.operators.is_empty()
            || station
                .operator
                .as_ref()
                .is_some_and(|o| self.operators.contains(o));

        let price_ok = match self.price_range {
            None => true,
            Some((min, max)) => station.price_cents().is_some_and(|c| (min..=max).contains(&c)),
        };

        connector_ok && speed_ok && operator_ok && price_ok
    }

    /// Stations passing the filter, in their original order
    #[must_use]
    pub fn apply(&self, stations: &[Station]) -> Vec<Station> {
        if self.is_empty() {
            return stations.to_vec();
        }
        stations.iter().filter(|s| self.matches(s)).cloned().collect()
    }

    pub fn toggle_connector(&mut self, connector: &str) {
        toggle(&mut self.connector_types, connector.to_string());
    }

    pub fn toggle_operator(&mut self, operator: &str) {
        toggle(&mut self.operators, operator.to_string());
    }

    pub fn toggle_speed(&mut self, speed: ChargingSpeed) {
        toggle(&mut self.speeds, speed);
    }

    /// Current price window, or `bounds` when unrestricted
    #[must_use]
    pub fn price_window(&self, bounds: (f64, f64)) -> (f64, f64) {
        self.price_range.unwrap_or(bounds)
    }

    /// Move the lower price bound; it never passes the upper one
    pub fn set_price_min(&mut self, min: f64, bounds: (f64, f64)) {
        let (_, max) = self.price_window(bounds);
        self.price_range = Some((min.min(max), max));
    }

    /// Move the upper price bound; it never drops below the lower one
    pub fn set_price_max(&mut self, max: f64, bounds: (f64, f64)) {
        let (min, _) = self.price_window(bounds);
        self.price_range = Some((min, max.max(min)));
    }
}

fn toggle<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if let Some(pos) = items.iter().position(|i| *i == item) {
        items.remove(pos);
    } else {
        items.push(item);
    }
}

/// Distinct connector types present in the list, sorted
#[must_use]
pub fn connector_options(stations: &[Station]) -> Vec<String> {
    distinct(stations.iter().filter_map(|s| s.connection_type.as_deref()))
}

/// Distinct operators present in the list, sorted
#[must_use]
pub fn operator_options(stations: &[Station]) -> Vec<String> {
    distinct(stations.iter().filter_map(|s| s.operator.as_deref()))
}

/// Whole-cent span of the known prices in the list, if any station has one
#[must_use]
pub fn price_bounds(stations: &[Station]) -> Option<(f64, f64)> {
    stations
        .iter()
        .filter_map(Station::price_cents)
        .fold(None, |bounds, cents| match bounds {
            None => Some((cents, cents)),
            Some((min, max)) => Some((f64::min(min, cents), f64::max(max, cents))),
        })
        .map(|(min, max)| (min.floor(), max.ceil()))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::station::{PowerRating, Price};

    fn station(id: &str, connector: &str, operator: &str, kw: f64) -> Station {
        let mut s = Station::new(id, -37.8, 144.9);
        s.connection_type = Some(connector.to_string());
        s.operator = Some(operator.to_string());
        s.power_output = Some(PowerRating::Kilowatts(kw));
        s
    }

    fn sample() -> Vec<Station> {
        vec![
            station("a", "CCS", "Evie", 50.0),
            station("b", "Type 2", "Chargefox", 22.0),
            station("c", "CHAdeMO", "Evie", 6.5),
            station("d", "CCS", "Tesla", 250.0),
        ]
    }

    fn ids(stations: &[Station]) -> Vec<&str> {
        stations.iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        let filter = StationFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&sample()).len(), 4);
    }

    #[test]
    fn test_filter_by_connector() {
        let mut filter = StationFilter::default();
        filter.toggle_connector("CCS");
        assert_eq!(ids(&filter.apply(&sample())), vec!["a", "d"]);
    }

    #[test]
    fn test_filter_by_speed_bucket() {
        let mut filter = StationFilter::default();
        filter.toggle_speed(ChargingSpeed::From7To22);
        filter.toggle_speed(ChargingSpeed::Over250);
        assert_eq!(ids(&filter.apply(&sample())), vec!["b", "d"]);
    }

    #[test]
    fn test_criteria_combine() {
        let mut filter = StationFilter::default();
        filter.toggle_operator("Evie");
        filter.toggle_connector("CCS");
        assert_eq!(ids(&filter.apply(&sample())), vec!["a"]);
    }

    #[test]
    fn test_toggle_twice_removes() {
        let mut filter = StationFilter::default();
        filter.toggle_operator("Evie");
        filter.toggle_operator("Evie");
        assert!(filter.is_empty());
    }

    #[test]
    fn test_station_without_power_fails_speed_filter() {
        let mut filter = StationFilter::default();
        filter.toggle_speed(ChargingSpeed::Under7);
        let stations = vec![Station::new("x", 0.0, 0.0)];
        assert!(filter.apply(&stations).is_empty());
    }

    #[test]
    fn test_speed_bucket_boundaries() {
        assert_eq!(ChargingSpeed::for_power(0.0), Some(ChargingSpeed::Under7));
        assert_eq!(ChargingSpeed::for_power(6.9), Some(ChargingSpeed::Under7));
        assert_eq!(ChargingSpeed::for_power(7.0), Some(ChargingSpeed::From7To22));
        assert_eq!(ChargingSpeed::for_power(22.0), Some(ChargingSpeed::From7To22));
        assert_eq!(ChargingSpeed::for_power(22.1), Some(ChargingSpeed::From22To50));
        assert_eq!(ChargingSpeed::for_power(50.0), Some(ChargingSpeed::From22To50));
        assert_eq!(ChargingSpeed::for_power(150.0), Some(ChargingSpeed::From50To150));
        assert_eq!(ChargingSpeed::for_power(250.0), Some(ChargingSpeed::From150To250));
        assert_eq!(ChargingSpeed::for_power(350.0), Some(ChargingSpeed::Over250));
        assert_eq!(ChargingSpeed::for_power(-1.0), None);
    }

    #[test]
    fn test_options_are_sorted_and_distinct() {
        let stations = sample();
        assert_eq!(connector_options(&stations), vec!["CCS", "CHAdeMO", "Type 2"]);
        assert_eq!(operator_options(&stations), vec!["Chargefox", "Evie", "Tesla"]);
    }

    fn priced(id: &str, cost: &str) -> Station {
        let mut s = Station::new(id, -37.8, 144.9);
        s.cost = Some(Price::from(cost));
        s
    }

    fn priced_sample() -> Vec<Station> {
        vec![
            priced("cheap", "$0.30/kWh"),
            priced("mid", "45c/kWh"),
            priced("dear", "$0.79/kWh"),
            Station::new("unknown", -37.8, 144.9),
        ]
    }

    #[test]
    fn test_price_bounds() {
        assert_eq!(price_bounds(&priced_sample()), Some((30.0, 79.0)));
        assert_eq!(price_bounds(&[Station::new("x", 0.0, 0.0)]), None);
    }

    #[test]
    fn test_filter_by_price_range() {
        let stations = priced_sample();
        let bounds = (30.0, 79.0);
        let mut filter = StationFilter::default();
        filter.set_price_max(50.0, bounds);
        assert_eq!(filter.price_range, Some((30.0, 50.0)));
        assert_eq!(ids(&filter.apply(&stations)), vec!["cheap", "mid"]);

        filter.set_price_min(40.0, bounds);
        assert_eq!(ids(&filter.apply(&stations)), vec!["mid"]);
    }

    #[test]
    fn test_price_min_never_passes_max() {
        let bounds = (0.0, 100.0);
        let mut filter = StationFilter::default();
        filter.set_price_max(40.0, bounds);
        filter.set_price_min(70.0, bounds);
        assert_eq!(filter.price_range, Some((40.0, 40.0)));

        filter.set_price_max(10.0, bounds);
        assert_eq!(filter.price_range, Some((40.0, 40.0)));
    }

    #[test]
    fn test_reset_clears_price_range() {
        let mut filter = StationFilter::default();
        filter.set_price_min(20.0, (0.0, 100.0));
        assert!(!filter.is_empty());

        filter = StationFilter::default();
        assert!(filter.is_empty());
        assert_eq!(filter.price_window((0.0, 100.0)), (0.0, 100.0));
        assert_eq!(filter.apply(&priced_sample()).len(), 4);
    }
}
