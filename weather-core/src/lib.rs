//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather current-weather client
//! - Shared domain models (display record, icon set)
//!
//! It is used by `weather-tui`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod icons;
pub mod model;

pub use client::{FetchError, WeatherClient};
pub use config::Config;
pub use icons::{Icon, icon_for_code};
pub use model::{DisplayState, WeatherReading};
