use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

/// Dashboard-wide event bus
///
/// Handlers are keyed by the concrete event type and run synchronously on
/// the publishing thread.
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;

    /// One-line, human readable description for the status bar
    fn describe(&self) -> String;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Events published by the dashboard controller
pub mod events {
    use super::*;
    use crate::filter::FilterThresholds;
    use crate::overlay::OverlayKind;

    /// A dataset finished loading
    #[derive(Debug, Clone)]
    pub struct DatasetLoaded {
        pub source_name: String,
        pub quake_count: usize,
    }

    /// The visible subset was recomputed
    #[derive(Debug, Clone)]
    pub struct FiltersApplied {
        pub thresholds: FilterThresholds,
        pub visible_count: usize,
    }

    /// The map was centered on one quake
    #[derive(Debug, Clone)]
    pub struct QuakeFocused {
        pub quake_id: String,
        pub label: String,
    }

    /// The map was centered on one year of activity
    #[derive(Debug, Clone)]
    pub struct YearFocused {
        pub year: i32,
        pub quake_count: usize,
    }

    /// An overlay layer was switched on or off
    #[derive(Debug, Clone)]
    pub struct OverlayToggled {
        pub kind: OverlayKind,
        pub enabled: bool,
    }

    /// Controls and map went back to their initial state
    #[derive(Debug, Clone)]
    pub struct DashboardReset;

    impl fmt::Display for DatasetLoaded {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Loaded {} earthquakes from {}", self.quake_count, self.source_name)
        }
    }

    impl fmt::Display for FiltersApplied {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "Showing {} earthquakes (magnitude {}, {})",
                self.visible_count,
                self.thresholds.magnitude_label(),
                self.thresholds.year_label()
            )
        }
    }

    impl fmt::Display for QuakeFocused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Focused {}", self.label)
        }
    }

    impl fmt::Display for YearFocused {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}: {} earthquakes", self.year, self.quake_count)
        }
    }

    impl fmt::Display for OverlayToggled {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let state = if self.enabled { "shown" } else { "hidden" };
            write!(f, "{} {}", self.kind, state)
        }
    }

    impl fmt::Display for DashboardReset {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("Dashboard reset")
        }
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn Any {
                        self
                    }

                    fn describe(&self) -> String {
                        self.to_string()
                    }
                }
            )*
        }
    }

    impl_event!(
        DatasetLoaded,
        FiltersApplied,
        QuakeFocused,
        YearFocused,
        OverlayToggled,
        DashboardReset
    );
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let type_id = TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers.entry(type_id).or_default().push(handler);
    }

    /// Publish an event to every handler of its type
    pub fn publish<E: Event>(&self, event: E) {
        let type_id = TypeId::of::<E>();
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&type_id) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscribed: usize = self.handlers.lock().values().map(Vec::len).sum();
        f.debug_struct("EventBus").field("handlers", &subscribed).finish()
    }
}

/// Event handler backed by a closure
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + Sync + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}

#[cfg(test)]
mod tests {
    use super::events::*;
    use super::*;
    use crate::overlay::OverlayKind;

    #[test]
    fn test_publish_reaches_matching_type_only() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<OverlayToggled>(handler_from_fn(move |event| {
            sink.lock().push(event.describe());
        }));

        bus.publish(OverlayToggled { kind: OverlayKind::FaultLines, enabled: true });
        bus.publish(DashboardReset);

        assert_eq!(*seen.lock(), vec!["Fault lines shown".to_string()]);
    }

    #[test]
    fn test_downcast() {
        let bus = EventBus::new();
        let year = Arc::new(Mutex::new(None));

        let sink = year.clone();
        bus.subscribe::<YearFocused>(handler_from_fn(move |event| {
            if let Some(e) = event.as_any().downcast_ref::<YearFocused>() {
                *sink.lock() = Some(e.year);
            }
        }));

        bus.publish(YearFocused { year: 2021, quake_count: 3 });
        assert_eq!(*year.lock(), Some(2021));
    }
}
