use super::renderer::{Marker, MarkerLayer};
use crate::icons::MarkerIcon;
use crate::models::LatLng;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const ICON_SIZE: f64 = 32.0;

fn leaflet() -> Result<JsValue, JsValue> {
    let window = web_sys::window().ok_or("No window")?;
    let l = js_sys::Reflect::get(&window, &JsValue::from_str("L"))?;
    if l.is_undefined() {
        return Err("Leaflet (window.L) is not loaded".into());
    }
    Ok(l)
}

fn method(target: &JsValue, name: &str) -> Result<js_sys::Function, JsValue> {
    js_sys::Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| JsValue::from_str(&format!("{name} is not a function")))
}

fn lat_lng_array(position: LatLng) -> js_sys::Array {
    let coords = js_sys::Array::new();
    coords.push(&JsValue::from_f64(position.lat));
    coords.push(&JsValue::from_f64(position.lng));
    coords
}

/// Create a Leaflet map with an OpenStreetMap tile layer: `L.map(el).setView(center, zoom)`
///
/// # Errors
///
/// Returns an error if Leaflet is not loaded or any call fails
pub fn init_map(container: &web_sys::HtmlElement, center: LatLng, zoom: f64) -> Result<JsValue, JsValue> {
    let l = leaflet()?;

    let map = method(&l, "map")?.call1(&l, container)?;
    method(&map, "setView")?.call2(&map, &lat_lng_array(center), &JsValue::from_f64(zoom))?;

    let tile_options = js_sys::Object::new();
    js_sys::Reflect::set(&tile_options, &JsValue::from_str("attribution"), &JsValue::from_str("© OpenStreetMap contributors"))?;
    js_sys::Reflect::set(&tile_options, &JsValue::from_str("maxZoom"), &JsValue::from_f64(19.0))?;

    let tile_layer = method(&l, "tileLayer")?.call2(&l, &JsValue::from_str(TILE_URL), &tile_options)?;
    method(&tile_layer, "addTo")?.call1(&tile_layer, &map)?;

    Ok(map)
}

/// Destroy a map created by [`init_map`]
pub fn remove_map(map: &JsValue) {
    if let Err(e) = method(map, "remove").and_then(|f| f.call0(map)) {
        leptos::logging::warn!("Failed to remove map: {:?}", e);
    }
}

/// A `L.markerClusterGroup()` bound to one map
pub struct LeafletClusterLayer {
    map: JsValue,
    group: JsValue,
    // Kept alive while their markers are on the map
    click_handlers: Vec<Closure<dyn FnMut()>>,
}

impl LeafletClusterLayer {
    /// # Errors
    ///
    /// Returns an error if the markercluster plugin is not loaded
    pub fn new(map: JsValue) -> Result<Self, JsValue> {
        let l = leaflet()?;
        let group = method(&l, "markerClusterGroup")?.call0(&l)?;
        Ok(Self {
            map,
            group,
            click_handlers: Vec::new(),
        })
    }

    fn div_icon(l: &JsValue, icon: MarkerIcon) -> Result<JsValue, JsValue> {
        let size = js_sys::Array::of2(&JsValue::from_f64(ICON_SIZE), &JsValue::from_f64(ICON_SIZE));
        let anchor = js_sys::Array::of2(&JsValue::from_f64(ICON_SIZE / 2.0), &JsValue::from_f64(ICON_SIZE / 2.0));

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("html"), &JsValue::from_str(&icon.html()))?;
        js_sys::Reflect::set(&options, &JsValue::from_str("className"), &JsValue::from_str(icon.class_name()))?;
        js_sys::Reflect::set(&options, &JsValue::from_str("iconSize"), &size)?;
        js_sys::Reflect::set(&options, &JsValue::from_str("iconAnchor"), &anchor)?;

        method(l, "divIcon")?.call1(l, &options)
    }

    fn try_add_marker(&mut self, marker: &Marker) -> Result<(), JsValue> {
        let l = leaflet()?;

        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &JsValue::from_str("icon"), &Self::div_icon(&l, marker.icon)?)?;
        let js_marker = method(&l, "marker")?.call2(&l, &lat_lng_array(marker.position), &options)?;

        let on_click = marker.click_handler();
        let handler = Closure::wrap(Box::new(move || on_click()) as Box<dyn FnMut()>);
        method(&js_marker, "on")?.call2(&js_marker, &JsValue::from_str("click"), handler.as_ref())?;
        self.click_handlers.push(handler);

        method(&self.group, "addLayer")?.call1(&self.group, &js_marker)?;
        Ok(())
    }
}

impl MarkerLayer for LeafletClusterLayer {
    fn attach(&mut self) {
        if let Err(e) = method(&self.map, "addLayer").and_then(|f| f.call1(&self.map, &self.group)) {
            leptos::logging::error!("Failed to attach cluster layer: {:?}", e);
        }
    }

    fn detach(&mut self) {
        if let Err(e) = method(&self.map, "removeLayer").and_then(|f| f.call1(&self.map, &self.group)) {
            leptos::logging::error!("Failed to detach cluster layer: {:?}", e);
        }
    }

    fn clear(&mut self) {
        if let Err(e) = method(&self.group, "clearLayers").and_then(|f| f.call0(&self.group)) {
            leptos::logging::error!("Failed to clear markers: {:?}", e);
        }
        self.click_handlers.clear();
    }

    fn add_marker(&mut self, marker: Marker) {
        if let Err(e) = self.try_add_marker(&marker) {
            leptos::logging::error!("Failed to add marker for station {}: {:?}", marker.station_id, e);
        }
    }
}
