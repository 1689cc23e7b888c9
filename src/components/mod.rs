#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod congestion_legend;
pub mod filter_panel;
pub mod station_map;
pub mod station_panel;
