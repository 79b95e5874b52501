//! Static presentation tables.
//!
//! Everything here is pure: weather conditions go in, icon identifiers and
//! canned recommendation records come out.

use crate::model::{Condition, ContentItem};

pub const DEFAULT_ICON: &str = "clear-day";

/// Provider icon codes, day and night variants.
static ICON_BY_CODE: &[(&str, &str)] = &[
    ("01d", "clear-day"),
    ("01n", "clear-night"),
    ("02d", "partly-cloudy-day"),
    ("02n", "partly-cloudy-night"),
    ("03d", "cloudy"),
    ("03n", "cloudy"),
    ("04d", "cloudy"),
    ("04n", "cloudy"),
    ("09d", "rain"),
    ("09n", "rain"),
    ("10d", "rain-day"),
    ("10n", "rain-night"),
    ("11d", "thunderstorm"),
    ("11n", "thunderstorm"),
    ("13d", "snow"),
    ("13n", "snow"),
    ("50d", "mist"),
    ("50n", "mist"),
];

static ICON_BY_CONDITION: &[(&str, &str)] = &[
    ("Clear", "clear-day"),
    ("Clouds", "cloudy"),
    ("Rain", "rain"),
    ("Drizzle", "drizzle"),
    ("Thunderstorm", "thunderstorm"),
    ("Snow", "snow"),
    ("Mist", "mist"),
    ("Fog", "mist"),
];

/// Resolve an icon identifier: icon code first, then condition name, then
/// [`DEFAULT_ICON`].
pub fn icon_for(icon_code: &str, condition: &str) -> &'static str {
    find(ICON_BY_CODE, icon_code)
        .or_else(|| find(ICON_BY_CONDITION, condition))
        .unwrap_or(DEFAULT_ICON)
}

fn find(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// A canned recommendation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: &'static str,
    pub genre: &'static str,
    pub mood: &'static str,
}

impl Recommendation {
    pub fn to_item(self) -> ContentItem {
        ContentItem {
            title: self.title.to_string(),
            description: self.description.to_string(),
            source: self.genre.to_string(),
            label: self.mood.to_string(),
            url: None,
            published_at: None,
        }
    }
}

pub const SUMMER_VIBES: Recommendation = Recommendation {
    title: "Summer Vibes Playlist",
    description: "Perfect sunny day calls for upbeat tracks! Try some reggae, pop, or tropical house to match the bright weather.",
    genre: "Pop/Reggae",
    mood: "Energetic & Happy",
};

pub const CLEAR_SKIES_ACOUSTIC: Recommendation = Recommendation {
    title: "Clear Skies Acoustic",
    description: "Beautiful clear weather with a gentle breeze. Acoustic folk and indie tracks would complement this peaceful atmosphere.",
    genre: "Folk/Indie",
    mood: "Peaceful & Uplifting",
};

pub const RAINY_DAY_JAZZ: Recommendation = Recommendation {
    title: "Rainy Day Jazz",
    description: "Nothing beats smooth jazz or lo-fi hip hop when it's raining. Perfect for a cozy indoor vibe.",
    genre: "Jazz/Lo-fi",
    mood: "Cozy & Contemplative",
};

pub const STORM_ENERGY: Recommendation = Recommendation {
    title: "Storm Energy",
    description: "Dramatic weather calls for dramatic music! Try some epic orchestral pieces or powerful rock anthems.",
    genre: "Rock/Orchestral",
    mood: "Intense & Dramatic",
};

pub const WINTER_WONDERLAND: Recommendation = Recommendation {
    title: "Winter Wonderland",
    description: "Snowy weather pairs beautifully with classical music, ambient soundscapes, or cozy indie folk.",
    genre: "Classical/Ambient",
    mood: "Serene & Magical",
};

pub const CLOUDY_DAY_CHILL: Recommendation = Recommendation {
    title: "Cloudy Day Chill",
    description: "Overcast skies are perfect for mellow indie rock, alternative, or downtempo electronic music.",
    genre: "Indie/Alternative",
    mood: "Mellow & Reflective",
};

pub const WEATHER_MOOD_MIX: Recommendation = Recommendation {
    title: "Weather Mood Mix",
    description: "A versatile playlist that works for any weather - featuring a mix of genres to suit your current atmosphere.",
    genre: "Mixed",
    mood: "Versatile",
};

pub const HOT_SUMMER_BEATS: Recommendation = Recommendation {
    title: "Hot Summer Beats",
    description: "It's getting hot! Cool down with some chill electronic, bossa nova, or smooth R&B tracks.",
    genre: "Electronic/R&B",
    mood: "Cool & Smooth",
};

pub const WARM_WINTER_SOUNDS: Recommendation = Recommendation {
    title: "Warm Winter Sounds",
    description: "Bundle up with some warm, comforting music. Think cozy coffee shop vibes or heartwarming ballads.",
    genre: "Acoustic/Ballads",
    mood: "Warm & Comforting",
};

pub const MORNING_ENERGY_BOOST: Recommendation = Recommendation {
    title: "Morning Energy Boost",
    description: "Start your day right with some uplifting morning tunes that match today's weather vibe!",
    genre: "Upbeat/Motivational",
    mood: "Energizing",
};

pub const EVENING_WIND_DOWN: Recommendation = Recommendation {
    title: "Evening Wind Down",
    description: "As the day winds down, let the weather inspire your evening soundtrack with these relaxing suggestions.",
    genre: "Chill/Relaxing",
    mood: "Calming",
};

pub const MAX_ITEMS: usize = 3;

/// Derive up to three recommendations from the weather and the local hour.
pub fn recommend_music(condition: &Condition, temperature_c: f64, hour: u32) -> Vec<ContentItem> {
    let mut picks = Vec::with_capacity(3);

    picks.push(match condition {
        Condition::Clear if temperature_c > 25.0 => SUMMER_VIBES,
        Condition::Clear => CLEAR_SKIES_ACOUSTIC,
        Condition::Rain | Condition::Drizzle => RAINY_DAY_JAZZ,
        Condition::Thunderstorm => STORM_ENERGY,
        Condition::Snow => WINTER_WONDERLAND,
        Condition::Clouds => CLOUDY_DAY_CHILL,
        _ => WEATHER_MOOD_MIX,
    });

    if temperature_c > 30.0 {
        picks.push(HOT_SUMMER_BEATS);
    } else if temperature_c < 0.0 {
        picks.push(WARM_WINTER_SOUNDS);
    }

    if hour < 12 {
        picks.push(MORNING_ENERGY_BOOST);
    } else if hour > 18 {
        picks.push(EVENING_WIND_DOWN);
    }

    picks.truncate(MAX_ITEMS);
    picks.into_iter().map(Recommendation::to_item).collect()
}
