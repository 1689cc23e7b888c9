//! Station map overlay: marker clustering with a polled congestion layer

pub mod leaflet;
mod poller;
mod renderer;
mod selection;

pub use poller::{CongestionPoller, PollOutcome, PollTicket};
pub use renderer::{build_markers, ClusterRenderer, Marker, MarkerLayer};
pub use selection::SelectionDispatcher;
