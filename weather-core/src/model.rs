use serde::{Deserialize, Serialize};

use crate::icons::Icon;

/// The display record: the last successfully fetched weather values.
///
/// Built fresh on every successful lookup and replaced wholesale, never
/// patched field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Degrees in the requested unit system, truncated toward zero.
    pub temperature: i32,
    /// Relative humidity percent.
    pub humidity: u8,
    /// As returned by the provider, no conversion applied.
    pub wind_speed: f64,
    /// Location display name reported by the provider.
    pub location: String,
    pub icon: Icon,
}

/// What the result panel shows. Either fully absent or fully populated;
/// there is no partially filled state the renderer could observe.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DisplayState {
    #[default]
    Empty,
    Loaded(WeatherReading),
}

impl DisplayState {
    pub fn is_empty(&self) -> bool {
        matches!(self, DisplayState::Empty)
    }
}
