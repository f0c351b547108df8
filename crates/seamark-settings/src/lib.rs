//! # SeaMark Settings
//!
//! Application configuration: initial map view, tile sources, where the
//! drawn features are stored and which draw tools are offered. Files are
//! JSON or TOML, chosen by extension.

pub mod config;
pub mod error;

pub use config::{Config, DrawSettings, MapSettings, StorageBackend, StorageSettings};
pub use error::{SettingsError, SettingsResult};
