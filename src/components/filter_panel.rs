use crate::models::{connector_options, operator_options, price_bounds, ChargingSpeed, Station, StationFilter};
use leptos::{
    component, create_memo, event_target_value, view, IntoView, RwSignal, Signal, SignalGet, SignalSet,
    SignalUpdate, SignalWith,
};

fn slider_value(ev: &web_sys::Event) -> Option<f64> {
    event_target_value(ev).parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Toggle buttons for connector type, charging speed and operator, plus a price range
#[component]
#[must_use]
pub fn FilterPanel(
    #[prop(into)] stations: Signal<Vec<Station>>,
    filter: RwSignal<StationFilter>,
    #[prop(into)] visible_count: Signal<usize>,
) -> impl IntoView {
    let connectors = move || stations.with(|s| connector_options(s));
    let operators = move || stations.with(|s| operator_options(s));
    let bounds = create_memo(move |_| stations.with(|s| price_bounds(s)));

    view! {
        <div class="filter-panel">
            <div class="filter-section">
                <h5>"Charger Type"</h5>
                <div class="filter-options">
                    {move || connectors().into_iter().map(|connector| {
                        let selected = {
                            let connector = connector.clone();
                            move || filter.with(|f| f.connector_types.contains(&connector))
                        };
                        let toggle = connector.clone();
                        view! {
                            <button
                                class="btn-options"
                                class:selected=selected
                                on:click=move |_| filter.update(|f| f.toggle_connector(&toggle))
                            >
                                {connector}
                            </button>
                        }
                    }).collect::<Vec<_>>()}
                </div>
            </div>

            <div class="filter-section">
                <h5>"Charging Speed"</h5>
                <div class="filter-options">
                    {ChargingSpeed::ALL.iter().map(|&speed| view! {
                        <button
                            class="btn-options"
                            class:selected=move || filter.with(|f| f.speeds.contains(&speed))
                            on:click=move |_| filter.update(|f| f.toggle_speed(speed))
                        >
                            {speed.label()}
                        </button>
                    }).collect::<Vec<_>>()}
                </div>
            </div>

            <div class="filter-section">
                <h5>"Charger Operator"</h5>
                <div class="filter-options">
                    {move || operators().into_iter().map(|operator| {
                        let selected = {
                            let operator = operator.clone();
                            move || filter.with(|f| f.operators.contains(&operator))
                        };
                        let toggle = operator.clone();
                        view! {
                            <button
                                class="btn-options"
                                class:selected=selected
                                on:click=move |_| filter.update(|f| f.toggle_operator(&toggle))
                            >
                                {operator}
                            </button>
                        }
                    }).collect::<Vec<_>>()}
                </div>
            </div>

            {move || bounds.get().map(|bounds| {
                let (lowest, highest) = bounds;
                let window = move || filter.with(|f| f.price_window(bounds));
                view! {
                    <div class="filter-section">
                        <h5>"Price Range (¢ per kWh)"</h5>
                        <div class="price-slider-container">
                            <input
                                type="range"
                                class="price-slider"
                                min=lowest
                                max=highest
                                prop:value=move || window().0
                                on:input=move |ev| {
                                    if let Some(min) = slider_value(&ev) {
                                        filter.update(|f| f.set_price_min(min, bounds));
                                    }
                                }
                            />
                            <input
                                type="range"
                                class="price-slider"
                                min=lowest
                                max=highest
                                prop:value=move || window().1
                                on:input=move |ev| {
                                    if let Some(max) = slider_value(&ev) {
                                        filter.update(|f| f.set_price_max(max, bounds));
                                    }
                                }
                            />
                        </div>
                        <div class="price-slider-labels">
                            <span>{lowest}</span>
                            <span>{move || {
                                let (min, max) = window();
                                format!("{min} - {max}")
                            }}</span>
                            <span>{highest}</span>
                        </div>
                    </div>
                }
            })}

            <div class="filter-footer">
                <span>{move || format!("{} stations shown", visible_count.get())}</span>
                <button on:click=move |_| filter.set(StationFilter::default())>"Reset"</button>
            </div>
        </div>
    }
}
