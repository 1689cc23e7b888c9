use super::selection::SelectionDispatcher;
use crate::icons::{resolve_icon, MarkerIcon};
use crate::models::{CongestionMap, LatLng, Station};
use std::rc::Rc;

/// A marker ready to be placed on the map, bound to one station
#[derive(Clone)]
pub struct Marker {
    pub station_id: String,
    pub position: LatLng,
    pub icon: MarkerIcon,
    on_click: Rc<dyn Fn()>,
}

impl Marker {
    /// Invoke the marker's click handler
    pub fn click(&self) {
        (self.on_click)();
    }

    #[must_use]
    pub fn click_handler(&self) -> Rc<dyn Fn()> {
        self.on_click.clone()
    }
}

impl std::fmt::Debug for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Marker")
            .field("station_id", &self.station_id)
            .field("position", &self.position)
            .field("icon", &self.icon)
            .finish_non_exhaustive()
    }
}

/// The clustering layer a map library provides
pub trait MarkerLayer {
    /// Add the layer to its host map
    fn attach(&mut self);

    /// Remove the layer from its host map
    fn detach(&mut self);

    /// Remove every marker from the layer
    fn clear(&mut self);

    fn add_marker(&mut self, marker: Marker);
}

/// Sole owner and writer of the on-map marker set.
///
/// The layer is attached on construction and detached when the renderer is
/// dropped.
pub struct ClusterRenderer<L: MarkerLayer> {
    layer: L,
    dispatcher: SelectionDispatcher,
    marker_count: usize,
}

impl<L: MarkerLayer> ClusterRenderer<L> {
    pub fn new(mut layer: L, dispatcher: SelectionDispatcher) -> Self {
        layer.attach();
        Self {
            layer,
            dispatcher,
            marker_count: 0,
        }
    }

    /// Replace every marker with one per station that has a valid position.
    ///
    /// Returns the number of markers placed.
    pub fn rebuild(&mut self, stations: &[Station], levels: &CongestionMap, overlay_enabled: bool) -> usize {
        self.layer.clear();

        let mut count = 0;
        for marker in build_markers(stations, levels, overlay_enabled, &self.dispatcher) {
            self.layer.add_marker(marker);
            count += 1;
        }

        self.marker_count = count;
        count
    }

    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.marker_count
    }

    #[must_use]
    pub fn layer(&self) -> &L {
        &self.layer
    }
}

impl<L: MarkerLayer> Drop for ClusterRenderer<L> {
    fn drop(&mut self) {
        self.layer.clear();
        self.layer.detach();
    }
}

/// Build the markers for a station list; stations without finite coordinates are skipped
pub fn build_markers<'a>(
    stations: &'a [Station],
    levels: &'a CongestionMap,
    overlay_enabled: bool,
    dispatcher: &'a SelectionDispatcher,
) -> impl Iterator<Item = Marker> + 'a {
    stations.iter().filter_map(move |station| {
        let position = station.position()?;
        let icon = resolve_icon(overlay_enabled, levels.get(&station.id).copied());

        let dispatcher = dispatcher.clone();
        let bound = station.clone();
        Some(Marker {
            station_id: station.id.clone(),
            position,
            icon,
            on_click: Rc::new(move || dispatcher.dispatch(&bound)),
        })
    })
}
