use crate::models::Station;
use std::rc::Rc;

/// Forwards marker clicks to the parent view
#[derive(Clone)]
pub struct SelectionDispatcher {
    callback: Rc<dyn Fn(Station)>,
}

impl SelectionDispatcher {
    pub fn new(callback: impl Fn(Station) + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Dispatcher that drops every selection
    #[must_use]
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    pub fn dispatch(&self, station: &Station) {
        (self.callback)(station.clone());
    }
}

impl std::fmt::Debug for SelectionDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionDispatcher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_forwards_station_unchanged() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = received.clone();
        let dispatcher = SelectionDispatcher::new(move |s| sink.borrow_mut().push(s));

        let mut station = Station::new("A", -37.81, 144.96);
        station.operator = Some("Evie".to_string());

        dispatcher.dispatch(&station);
        dispatcher.dispatch(&station);

        let received = received.borrow();
        assert_eq!(received.len(), 2);
        assert_eq!(received[0], station);
    }

    #[test]
    fn test_noop_accepts_calls() {
        let dispatcher = SelectionDispatcher::noop();
        dispatcher.dispatch(&Station::new("A", 0.0, 0.0));
    }
}
