use crate::models::{format_estimate, Station};
use leptos::{component, create_signal, event_target_value, view, Callable, Callback, IntoView, Signal, SignalGet, SignalSet};

fn or_na(value: Option<String>) -> String {
    value.filter(|v| !v.trim().is_empty()).unwrap_or_else(|| "N/A".to_string())
}

/// Details of the selected station with a quick charging cost estimate
#[component]
#[must_use]
pub fn StationPanel(
    #[prop(into)] station: Signal<Option<Station>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let (kwh, set_kwh) = create_signal(String::new());
    let (price, set_price) = create_signal(String::new());

    let estimate = move || format_estimate(&kwh.get(), &price.get());

    view! {
        {move || station.get().map(|station| {
            let power = station
                .power_kw()
                .map_or_else(|| "N/A".to_string(), |kw| format!("{kw} kW"));
            let access = if station.is_restricted() { "Restricted" } else { "Open" };

            view! {
                <div class="station-panel">
                    <div class="station-panel-header">
                        <h3>{or_na(station.operator.clone())}</h3>
                        <button class="close" on:click=move |_| on_close.call(())>"×"</button>
                    </div>
                    <div class="detail-item">
                        <span class="detail-label">"Type:"</span>
                        <span class="detail-value">{or_na(station.connection_type.clone())}</span>
                    </div>
                    <div class="detail-item">
                        <span class="detail-label">"Power:"</span>
                        <span class="detail-value">{power}</span>
                    </div>
                    <div class="detail-item">
                        <span class="detail-label">"Cost:"</span>
                        <span class="detail-value">{or_na(station.cost.as_ref().map(ToString::to_string))}</span>
                    </div>
                    <div class="detail-item">
                        <span class="detail-label">"Access:"</span>
                        <span class="detail-value">{access}</span>
                    </div>
                    {station.charging_points.map(|points| view! {
                        <div class="detail-item">
                            <span class="detail-label">"Charging points:"</span>
                            <span class="detail-value">{points}</span>
                        </div>
                    })}

                    <div class="cost-estimate">
                        <h4>"Estimate charging cost"</h4>
                        <input
                            type="number"
                            placeholder="kWh"
                            prop:value=kwh
                            on:input=move |ev| set_kwh.set(event_target_value(&ev))
                        />
                        <input
                            type="number"
                            placeholder="$ per kWh"
                            prop:value=price
                            on:input=move |ev| set_price.set(event_target_value(&ev))
                        />
                        <p class="estimate">
                            {move || estimate().map_or_else(String::new, |cost| format!("Estimated cost: ${cost}"))}
                        </p>
                    </div>
                </div>
            }
        })}
    }
}
