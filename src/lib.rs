pub mod api;
pub mod components;
pub mod constants;
pub mod icons;
pub mod logging;
pub mod models;
pub mod overlay;
pub mod session;

pub use components::app::App;
