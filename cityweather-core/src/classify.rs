use serde::{Deserialize, Serialize};

/// Display category of a provider condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    /// Fog, haze, mist, dust and the like.
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

impl Category {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "💥",
            Self::Drizzle => "💧",
            Self::Rain => "💦",
            Self::Snow => "⛄",
            Self::Atmosphere => "🌀",
            Self::Clear => "☼",
            Self::Clouds => "💨",
            Self::Unknown => "🌈",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "thunderstorm",
            Self::Drizzle => "drizzle",
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Atmosphere => "atmosphere",
            Self::Clear => "clear",
            Self::Clouds => "clouds",
            Self::Unknown => "unknown",
        }
    }

    pub const fn all() -> &'static [Category] {
        &[
            Category::Thunderstorm,
            Category::Drizzle,
            Category::Rain,
            Category::Snow,
            Category::Atmosphere,
            Category::Clear,
            Category::Clouds,
            Category::Unknown,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<i64> for Category {
    fn from(code: i64) -> Self {
        match code {
            200..300 => Self::Thunderstorm,
            300..400 => Self::Drizzle,
            500..600 => Self::Rain,
            600..700 => Self::Snow,
            700..800 => Self::Atmosphere,
            800 => Self::Clear,
            801..900 => Self::Clouds,
            _ => Self::Unknown,
        }
    }
}

/// Maps a condition code to its display symbol and category. Total over `i64`.
pub fn classify(code: i64) -> (&'static str, Category) {
    let category = Category::from(code);
    (category.symbol(), category)
}
