use crate::api::fetch_stations;
use crate::components::congestion_legend::CongestionLegend;
use crate::components::filter_panel::FilterPanel;
use crate::components::station_map::StationMap;
use crate::components::station_panel::StationPanel;
use crate::constants::API_URL;
#[allow(unused_imports)]
use crate::logging::log;
use crate::models::{Station, StationFilter};
use crate::session;
use chrono::{DateTime, Utc};
use leptos::{
    component, create_memo, create_rw_signal, create_signal, event_target_value, spawn_local, view, Callback,
    IntoView, ReadSignal, Signal, SignalGet, SignalSet, SignalWith, WriteSignal,
};
use leptos_meta::{provide_meta_context, Title};

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let (all_stations, set_all_stations) = create_signal(Vec::<Station>::new());
    let (load_error, set_load_error) = create_signal(None::<String>);
    let filter = create_rw_signal(StationFilter::default());
    let visible_stations = create_memo(move |_| filter.with(|f| all_stations.with(|s| f.apply(s))));

    let (token, set_token) = create_signal(session::load_token());
    let (show_congestion, set_show_congestion) = create_signal(true);
    let (selected, set_selected) = create_signal(None::<Station>);
    let (updated_at, set_updated_at) = create_signal(None);

    spawn_local(async move {
        match fetch_stations(API_URL).await {
            Ok(stations) => {
                log!("Loaded {} stations", stations.len());
                set_all_stations.set(stations);
            }
            Err(e) => {
                leptos::logging::error!("Failed to load stations: {}", e);
                set_load_error.set(Some(e));
            }
        }
    });

    view! {
        <Title text="EV Charging Map"/>

        <div class="app">
            <div class="main-content">
                <StationMap
                    stations=visible_stations
                    show_congestion=show_congestion
                    token=token
                    on_select=Callback::new(move |station: Station| set_selected.set(Some(station)))
                    on_congestion_update=Callback::new(move |at: DateTime<Utc>| set_updated_at.set(Some(at)))
                />
                <StationPanel
                    station=selected
                    on_close=Callback::new(move |()| set_selected.set(None))
                />
            </div>
            <div class="sidebar">
                <div class="sidebar-header">
                    <h2>"EV Charging Map"</h2>
                    {move || load_error.get().map(|e| view! {
                        <div class="load-error">{format!("Could not load stations: {e}")}</div>
                    })}
                </div>
                <SessionBar token=token set_token=set_token />
                <CongestionLegend
                    show_congestion=show_congestion
                    set_show_congestion=set_show_congestion
                    updated_at=updated_at
                    signed_in=Signal::derive(move || token.with(Option::is_some))
                />
                <FilterPanel
                    stations=all_stations
                    filter=filter
                    visible_count=Signal::derive(move || visible_stations.with(Vec::len))
                />
            </div>
        </div>
    }
}

/// Paste-in access token; polling is disabled while signed out
#[component]
fn SessionBar(token: ReadSignal<Option<String>>, set_token: WriteSignal<Option<String>>) -> impl IntoView {
    let (draft, set_draft) = create_signal(String::new());

    let sign_in = move |_| {
        let value = draft.get();
        if value.trim().is_empty() {
            return;
        }
        match session::save_token(&value) {
            Ok(()) => {
                set_token.set(session::load_token());
                set_draft.set(String::new());
            }
            Err(e) => leptos::logging::error!("{}", e),
        }
    };

    let sign_out = move |_| {
        session::clear_token();
        set_token.set(None);
    };

    view! {
        <div class="session-bar">
            {move || if token.with(Option::is_some) {
                view! {
                    <span>"Signed in"</span>
                    <button on:click=sign_out>"Sign out"</button>
                }.into_view()
            } else {
                view! {
                    <input
                        type="password"
                        placeholder="Access token"
                        prop:value=draft
                        on:input=move |ev| set_draft.set(event_target_value(&ev))
                    />
                    <button class="primary" on:click=sign_in>"Sign in"</button>
                }.into_view()
            }}
        </div>
    }
}
