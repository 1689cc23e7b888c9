use crate::icons::MarkerIcon;
use crate::models::CongestionLevel;
use chrono::{DateTime, Local, Utc};
use leptos::{component, view, IntoView, ReadSignal, Signal, SignalGet, SignalSet, WriteSignal};

const LEGEND: [(MarkerIcon, CongestionLevel); 3] = [
    (MarkerIcon::Green, CongestionLevel::Low),
    (MarkerIcon::Yellow, CongestionLevel::Medium),
    (MarkerIcon::Red, CongestionLevel::High),
];

fn format_updated_at(updated_at: DateTime<Utc>) -> String {
    updated_at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

#[component]
#[must_use]
pub fn CongestionLegend(
    show_congestion: ReadSignal<bool>,
    set_show_congestion: WriteSignal<bool>,
    updated_at: ReadSignal<Option<DateTime<Utc>>>,
    #[prop(into)] signed_in: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="congestion-legend">
            <label class="toggle-holder">
                <input
                    type="checkbox"
                    prop:checked=show_congestion
                    on:change=move |_| set_show_congestion.set(!show_congestion.get())
                />
                " Show congestion"
            </label>

            {move || show_congestion.get().then(|| view! {
                <ul class="legend-items">
                    {LEGEND.iter().map(|(icon, level)| view! {
                        <li>
                            <span class="legend-swatch" style=format!("border-color: {}", icon.color())></span>
                            {level.label()}
                        </li>
                    }).collect::<Vec<_>>()}
                    <li>
                        <span class="legend-swatch" style=format!("border-color: {}", MarkerIcon::Neutral.color())></span>
                        {CongestionLevel::Unknown.label()}
                    </li>
                </ul>
            })}

            <p class="legend-status">
                {move || {
                    if !signed_in.get() {
                        "Sign in to see live congestion".to_string()
                    } else if let Some(at) = updated_at.get() {
                        format!("Updated {}", format_updated_at(at))
                    } else {
                        "Waiting for congestion data...".to_string()
                    }
                }}
            </p>
        </div>
    }
}
