use crate::models::CongestionLevel;

/// Marker graphic variants for charging stations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    Neutral,
    Green,
    Yellow,
    Red,
}

impl MarkerIcon {
    /// Border colour of the circular marker
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            Self::Neutral => "#333333",
            Self::Green => "#4CAF50",
            Self::Yellow => "#FFC107",
            Self::Red => "#F44336",
        }
    }

    #[must_use]
    pub fn class_name(self) -> &'static str {
        match self {
            Self::Neutral => "charger-icon charger-icon-neutral",
            Self::Green => "charger-icon charger-icon-green",
            Self::Yellow => "charger-icon charger-icon-yellow",
            Self::Red => "charger-icon charger-icon-red",
        }
    }

    /// Inner markup for a Leaflet `divIcon`
    #[must_use]
    pub fn html(self) -> String {
        format!(
            "<div class=\"charger-icon-disc\" style=\"border-color: {};\">\
             <span class=\"charger-icon-glyph\">&#9889;</span></div>",
            self.color()
        )
    }
}

/// Pick the marker icon for a station.
///
/// With the overlay disabled every station is neutral. Otherwise the
/// congestion level picks the colour, and unknown or missing levels fall
/// back to neutral.
#[must_use]
pub fn resolve_icon(overlay_enabled: bool, level: Option<CongestionLevel>) -> MarkerIcon {
    if !overlay_enabled {
        return MarkerIcon::Neutral;
    }
    match level {
        Some(CongestionLevel::Low) => MarkerIcon::Green,
        Some(CongestionLevel::Medium) => MarkerIcon::Yellow,
        Some(CongestionLevel::High) => MarkerIcon::Red,
        Some(CongestionLevel::Unknown) | None => MarkerIcon::Neutral,
    }
}
