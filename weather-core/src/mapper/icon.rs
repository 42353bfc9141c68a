//! Provider condition codes to icon keys.

/// Inclusive `(first, last, icon)` code ranges, sorted and non-overlapping.
const ICONS: &[(u16, u16, &str)] = &[
    // thunderstorm
    (200, 202, "11d"),
    (210, 212, "11d"),
    (221, 221, "11d"),
    (230, 231, "11d"),
    // drizzle
    (300, 302, "09d"),
    (310, 314, "09d"),
    (321, 321, "09d"),
    // rain
    (500, 504, "10d"),
    // freezing rain
    (511, 511, "13d"),
    // shower rain
    (520, 522, "09d"),
    (531, 531, "09d"),
    // snow
    (600, 602, "13d"),
    (611, 613, "13d"),
    (615, 616, "13d"),
    (620, 622, "13d"),
    // atmosphere
    (701, 701, "50d"),
    (711, 711, "50d"),
    (721, 721, "50d"),
    (731, 731, "50d"),
    (741, 741, "50d"),
    (751, 751, "50d"),
    (761, 762, "50d"),
    (771, 771, "50d"),
    (781, 781, "50d"),
    // clear
    (800, 800, "01d"),
    // clouds
    (801, 801, "02d"),
    (802, 802, "03d"),
    (803, 804, "04d"),
];

/// Icon key for `code`, or `""` when the code is not in the table.
pub fn icon_key(code: u16) -> &'static str {
    let idx = ICONS.partition_point(|(first, _, _)| *first <= code);
    match idx.checked_sub(1).map(|i| ICONS[i]) {
        Some((_, last, icon)) if code <= last => icon,
        _ => "",
    }
}
