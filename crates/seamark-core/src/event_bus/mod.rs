//! Typed application events and the bus a session publishes them on.
//!
//! ```rust
//! use seamark_core::event_bus::{AppEvent, DrawEvent, EventBus, EventCategory, Interest};
//!
//! let bus = EventBus::new();
//! let id = bus.observe(Interest::Only(vec![EventCategory::Draw]), |event| {
//!     println!("applied: {}", event.description());
//! });
//!
//! assert_eq!(bus.publish(&AppEvent::Draw(DrawEvent::Deleted { layers: vec![] })), 1);
//! bus.forget(id);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
