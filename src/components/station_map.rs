use crate::api::fetch_congestion;
use crate::constants::{API_URL, CONGESTION_REFRESH_MS, DEFAULT_CENTER, DEFAULT_ZOOM};
#[allow(unused_imports)]
use crate::logging::log;
use crate::models::{CongestionMap, Station};
use crate::overlay::leaflet::{init_map, remove_map, LeafletClusterLayer};
use crate::overlay::{ClusterRenderer, CongestionPoller, PollOutcome, SelectionDispatcher};
use chrono::{DateTime, Utc};
use gloo_timers::callback::Interval;
use leptos::{
    component, create_effect, create_memo, create_node_ref, create_signal, html, on_cleanup, spawn_local, view,
    Callable, Callback, IntoView, Signal, SignalGet, SignalSet, SignalUpdate, SignalWith,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsValue;

type LeafletRenderer = ClusterRenderer<LeafletClusterLayer>;

/// Leaflet map of charging stations with clustered markers and a congestion overlay
#[component]
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn StationMap(
    #[prop(into)] stations: Signal<Vec<Station>>,
    #[prop(into)] show_congestion: Signal<bool>,
    #[prop(into)] token: Signal<Option<String>>,
    on_select: Callback<Station>,
    #[prop(optional)] on_congestion_update: Option<Callback<DateTime<Utc>>>,
) -> impl IntoView {
    let container_ref = create_node_ref::<html::Div>();
    let (map_ready, set_map_ready) = create_signal(false);
    let (levels, set_levels) = create_signal(CongestionMap::new());
    let (refresh_tick, set_refresh_tick) = create_signal(0u32);

    let map_handle: Rc<RefCell<Option<JsValue>>> = Rc::default();
    let renderer: Rc<RefCell<Option<LeafletRenderer>>> = Rc::default();
    let poller = Rc::new(RefCell::new(CongestionPoller::new()));

    // Create the map and cluster layer once the container is mounted
    {
        let map_handle = map_handle.clone();
        let renderer = renderer.clone();
        create_effect(move |_| {
            let Some(container) = container_ref.get() else { return };
            if renderer.borrow().is_some() {
                return;
            }
            let container_element: &web_sys::HtmlElement = &container;

            let mounted = init_map(container_element, DEFAULT_CENTER, DEFAULT_ZOOM)
                .and_then(|map| Ok((map.clone(), LeafletClusterLayer::new(map)?)));

            match mounted {
                Ok((map, layer)) => {
                    let dispatcher = SelectionDispatcher::new(move |station: Station| {
                        log!("Selected station {}", station.id);
                        on_select.call(station);
                    });
                    *renderer.borrow_mut() = Some(ClusterRenderer::new(layer, dispatcher));
                    *map_handle.borrow_mut() = Some(map);
                    set_map_ready.set(true);
                }
                Err(e) => {
                    leptos::logging::error!("Failed to initialize Leaflet map: {:?}", e);
                }
            }
        });
    }

    // Rebuild all markers whenever stations, the toggle or the congestion map change
    {
        let renderer = renderer.clone();
        create_effect(move |_| {
            if !map_ready.get() {
                return;
            }
            let overlay_enabled = show_congestion.get();
            stations.with(|stations| {
                levels.with(|levels| {
                    if let Some(renderer) = renderer.borrow_mut().as_mut() {
                        let count = renderer.rebuild(stations, levels, overlay_enabled);
                        log!("Rendered {} of {} stations", count, stations.len());
                    }
                });
            });
        });
    }

    let station_ids = create_memo(move |_| {
        stations.with(|stations| stations.iter().map(|s| s.id.clone()).collect::<Vec<_>>())
    });

    // Poll congestion for the current station set; superseded results are discarded
    {
        let poller = poller.clone();
        create_effect(move |_| {
            let ids = station_ids.get();
            let token = token.get();
            refresh_tick.track();

            let Some(ticket) = poller.borrow_mut().issue(&ids, token.as_deref()) else {
                return;
            };

            let poller = poller.clone();
            spawn_local(async move {
                let result = fetch_congestion(API_URL, &ticket.station_ids, &ticket.token).await;
                let outcome = poller.borrow_mut().complete(&ticket, result);

                if let PollOutcome::Applied(count) = outcome {
                    log!("Applied congestion levels for {} stations", count);
                    let (applied, updated_at) = {
                        let poller = poller.borrow();
                        (poller.levels().clone(), poller.updated_at())
                    };
                    set_levels.set(applied);
                    if let (Some(callback), Some(updated_at)) = (on_congestion_update, updated_at) {
                        callback.call(updated_at);
                    }
                }
            });
        });
    }

    let refresh = Interval::new(CONGESTION_REFRESH_MS, move || {
        set_refresh_tick.update(|tick| *tick = tick.wrapping_add(1));
    });

    on_cleanup(move || {
        poller.borrow_mut().cancel();
        drop(refresh);
        renderer.borrow_mut().take();
        if let Some(map) = map_handle.borrow_mut().take() {
            remove_map(&map);
        }
    });

    view! {
        <div class="station-map" node_ref=container_ref></div>
    }
}
