//! Observer bus for applied events.
//!
//! A session publishes each event after applying it. Observers are plain
//! callbacks run on the publishing thread in registration order; they can
//! record or report, but they never feed back into the session.

use parking_lot::RwLock;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Handle returned by [`EventBus::observe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl std::fmt::Display for ObserverId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Observer({})", self.0.simple())
    }
}

/// Which events an observer is shown.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Interest {
    #[default]
    Everything,
    Only(Vec<EventCategory>),
}

impl Interest {
    pub fn covers(&self, event: &AppEvent) -> bool {
        match self {
            Interest::Everything => true,
            Interest::Only(categories) => categories.contains(&event.category()),
        }
    }
}

type Callback = Box<dyn Fn(&AppEvent) + Send + Sync>;

struct Observer {
    id: ObserverId,
    interest: Interest,
    callback: Callback,
}

/// Registered observers, shared by reference.
#[derive(Default)]
pub struct EventBus {
    observers: RwLock<Vec<Observer>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events matching `interest`.
    pub fn observe<F>(&self, interest: Interest, callback: F) -> ObserverId
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let id = ObserverId(Uuid::new_v4());
        self.observers.write().push(Observer {
            id,
            interest,
            callback: Box::new(callback),
        });
        tracing::debug!("{} registered", id);
        id
    }

    /// Drop an observer. False if it was not registered.
    pub fn forget(&self, id: ObserverId) -> bool {
        let mut observers = self.observers.write();
        let before = observers.len();
        observers.retain(|o| o.id != id);
        before != observers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.read().len()
    }

    /// Show `event` to every interested observer; returns how many saw it.
    ///
    /// Callbacks must not register or forget observers on the same bus.
    pub fn publish(&self, event: &AppEvent) -> usize {
        let observers = self.observers.read();
        observers
            .iter()
            .filter(|o| o.interest.covers(event))
            .inspect(|o| (o.callback)(event))
            .count()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observer_count())
            .finish()
    }
}
