//! Allow-list validation of the submitted city name.

use crate::error::WeatherError;

/// Accented letters accepted on top of ASCII letters.
const ACCENTED: &str = "áéíóöőúüűÁÉÍÓÖŐÚÜŰ";

/// ASCII whitespace only; Unicode spaces such as NBSP are rejected.
fn is_allowed(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
        || ACCENTED.contains(c)
}

/// Accept `raw` unchanged, or reject it.
///
/// The input must be non-empty, carry no leading or trailing whitespace, and
/// consist only of letters and whitespace. Tags, backslashes, digits and
/// punctuation all fall outside the allowed set, so nothing is ever cleaned
/// up silently.
pub fn validate_city(raw: &str) -> Result<String, WeatherError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed != raw {
        return Err(WeatherError::InvalidInput);
    }
    if !raw.chars().all(is_allowed) {
        return Err(WeatherError::InvalidInput);
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_accented_names() {
        for city in [
            "Budapest",
            "Székesfehérvár",
            "Hódmezővásárhely",
            "Győr",
            "ÚJSZÁSZ",
            "Nagy Kanizsa",
            "Sopron",
        ] {
            assert_eq!(validate_city(city).as_deref(), Ok(city));
        }
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert_eq!(validate_city(""), Err(WeatherError::InvalidInput));
        assert_eq!(validate_city("   "), Err(WeatherError::InvalidInput));
        assert_eq!(validate_city("\t\n"), Err(WeatherError::InvalidInput));
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert!(validate_city(" Pécs").is_err());
        assert!(validate_city("Pécs ").is_err());
    }

    #[test]
    fn rejects_digits_and_punctuation() {
        for city in ["Budapest1", "Eger!", "Saint-Denis", "Eger,hu", "O'Hare", "a.b", "x;y"] {
            assert!(validate_city(city).is_err(), "{city} should be rejected");
        }
    }

    #[test]
    fn rejects_tags_and_escapes() {
        for city in [
            "<b>Debrecen</b>",
            "<script>alert</script>",
            "Debrecen<br>",
            "Deb\\recen",
            "Deb\\'recen",
        ] {
            assert!(validate_city(city).is_err(), "{city} should be rejected");
        }
    }

    #[test]
    fn rejects_letters_outside_the_allowed_set() {
        assert!(validate_city("München").is_ok());
        assert!(validate_city("Łódź").is_err());
        assert!(validate_city("Zürich").is_ok());
        assert!(validate_city("Île").is_err());
    }

    #[test]
    fn rejects_unicode_whitespace() {
        for city in ["Buda\u{00A0}pest", "Buda\u{3000}pest", "Buda\u{2003}pest"] {
            assert!(validate_city(city).is_err(), "{city:?} should be rejected");
        }
        assert!(validate_city("Nagy\tKanizsa").is_ok());
    }
}
