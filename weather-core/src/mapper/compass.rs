//! Wind degrees to one of 16 compass points.

use crate::model::Locale;

/// Lower bound (inclusive) of every sector after North. North owns
/// `[349, 360)` and `[0, 11)`.
const SECTOR_STARTS: [f64; 16] = [
    11.0, 34.0, 56.0, 79.0, 101.0, 124.0, 146.0, 169.0, 191.0, 214.0, 236.0, 259.0, 281.0, 304.0,
    326.0, 349.0,
];

const HUNGARIAN: [&str; 16] = [
    "É", "ÉÉK", "ÉK", "KÉK", "K", "KDK", "DK", "DDK", "D", "DDNY", "DNY", "NYDNY", "NY", "NYÉNY",
    "ÉNY", "ÉÉNY",
];

const ENGLISH: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Sector index, 0 being North and counting clockwise.
pub fn sector(degrees: f64) -> usize {
    let normalized = degrees.rem_euclid(360.0);
    SECTOR_STARTS.partition_point(|start| *start <= normalized) % 16
}

pub fn compass_label(degrees: f64, locale: Locale) -> &'static str {
    let labels = match locale {
        Locale::Hungarian => &HUNGARIAN,
        Locale::English => &ENGLISH,
    };
    labels[sector(degrees)]
}
