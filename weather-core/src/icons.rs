//! The fixed local icon set and the condition-code lookup table.

use serde::{Deserialize, Serialize};

/// One of the eight local icon assets. Five are weather conditions the
/// lookup table resolves to; the other three decorate the search button
/// and the two stat columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Icon {
    Clear,
    Cloud,
    Drizzle,
    Rain,
    Snow,
    Search,
    Humidity,
    Wind,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Clear => "clear",
            Icon::Cloud => "cloud",
            Icon::Drizzle => "drizzle",
            Icon::Rain => "rain",
            Icon::Snow => "snow",
            Icon::Search => "search",
            Icon::Humidity => "humidity",
            Icon::Wind => "wind",
        }
    }

    /// Terminal rendition of the asset.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Clear => "☀",
            Icon::Cloud => "☁",
            Icon::Drizzle => "🌦",
            Icon::Rain => "🌧",
            Icon::Snow => "❄",
            Icon::Search => "🔍",
            Icon::Humidity => "💧",
            Icon::Wind => "🌬",
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map an OpenWeather condition code (two digits plus a day/night
/// suffix) to its icon. Exact-key lookup; anything unmapped falls back
/// to [`Icon::Clear`].
pub fn icon_for_code(code: &str) -> Icon {
    match code {
        "01d" | "01n" => Icon::Clear,
        "02d" | "02n" | "03d" => Icon::Cloud,
        "04d" => Icon::Drizzle,
        "09d" | "09n" | "10d" | "10n" => Icon::Rain,
        "13d" | "13n" => Icon::Snow,
        _ => Icon::Clear,
    }
}
