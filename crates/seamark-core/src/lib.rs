//! # SeaMark Core
//!
//! Core types, traits, and utilities for SeaMark.
//! Provides the geometry model and its GeoJSON codec, the bucket
//! classification rule applied to drawn shapes, and the in-process
//! event bus used by the session dispatch loop.

pub mod classification;
pub mod error;
pub mod event_bus;
pub mod geometry;

pub use classification::{bucket, Bucket};

pub use error::{Error, GeometryError, Result};

pub use event_bus::{
    AppEvent, DrawEvent, EventBus, EventCategory, Interest, MapEvent, ObserverId, SearchEvent,
};

pub use geometry::{
    codec::{decode, encode, GeometryRecord},
    DrawTool, DrawnShape, Geometry, GeometryKind, LatLng, LayerId, Shape,
};
