//! Field-level cleaning and coercion.
//!
//! Every fallback is a small pure function so each substitution can be tested
//! on its own:
//!
//! - [`clean_traffic`]: strip whitespace, parse, `0` when unparseable,
//!   negatives clamped to `0`.
//! - [`clean_city`]: `"Inconnue"` when missing, then title case.
//! - [`clean_network`]: `"Autre"` when missing, `Metro` shown as `Métro`.
//!
//! None of these report failures; malformed values are substituted silently.

use std::borrow::Cow;

pub const UNKNOWN_CITY: &str = "Inconnue";
pub const OTHER_NETWORK: &str = "Autre";

const METRO_RAW: &str = "Metro";
const METRO_DISPLAY: &str = "Métro";

/// Cell contents treated as "no value".
const MISSING_TOKENS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "NULL", "null", "None", "<NA>", "#N/A",
    "#NA",
];

pub fn is_missing(raw: &str) -> bool {
    MISSING_TOKENS.contains(&raw)
}

fn present(raw: Option<&str>) -> Option<&str> {
    raw.filter(|value| !is_missing(value))
}

pub fn strip_whitespace(raw: &str) -> Cow<'_, str> {
    if raw.chars().any(char::is_whitespace) {
        Cow::Owned(raw.chars().filter(|ch| !ch.is_whitespace()).collect())
    } else {
        Cow::Borrowed(raw)
    }
}

/// Parses a traffic count such as `"1 200 000"`.
///
/// Decimal text is truncated toward zero. Anything unparseable, including a
/// missing cell, becomes `0`, and negative counts are clamped to `0`.
pub fn clean_traffic(raw: Option<&str>) -> i64 {
    let Some(raw) = present(raw) else {
        return 0;
    };
    let compact = strip_whitespace(raw);
    let parsed = compact.parse::<i64>().ok().or_else(|| {
        compact
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(|value| value.trunc() as i64)
    });
    parsed.unwrap_or(0).max(0)
}

pub fn clean_city(raw: Option<&str>) -> String {
    match present(raw) {
        Some(value) => title_case(value).into_owned(),
        None => UNKNOWN_CITY.to_string(),
    }
}

pub fn clean_network(raw: Option<&str>) -> String {
    match present(raw) {
        Some(value) => value.replace(METRO_RAW, METRO_DISPLAY),
        None => OTHER_NETWORK.to_string(),
    }
}

/// Upper-cases the first letter of every word and lower-cases the rest.
///
/// A word starts at any letter not preceded by another letter, so
/// `"saint-ouen"` becomes `"Saint-Ouen"` and `"l'haÿ"` becomes `"L'Haÿ"`.
pub fn title_case(input: &str) -> Cow<'_, str> {
    let mut output = String::with_capacity(input.len());
    let mut previous_is_letter = false;
    for ch in input.chars() {
        if ch.is_alphabetic() {
            if previous_is_letter {
                output.extend(ch.to_lowercase());
            } else {
                output.extend(ch.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            output.push(ch);
            previous_is_letter = false;
        }
    }
    if output == input {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_traffic_strips_thousand_separators() {
        assert_eq!(clean_traffic(Some("1 200 000")), 1_200_000);
        assert_eq!(clean_traffic(Some("\u{a0}45\u{202f}310 ")), 45_310);
        assert_eq!(clean_traffic(Some("\t7\n")), 7);
    }

    #[test]
    fn clean_traffic_falls_back_to_zero() {
        assert_eq!(clean_traffic(None), 0);
        assert_eq!(clean_traffic(Some("")), 0);
        assert_eq!(clean_traffic(Some("   ")), 0);
        assert_eq!(clean_traffic(Some("n/a")), 0);
        assert_eq!(clean_traffic(Some("12,5")), 0);
        assert_eq!(clean_traffic(Some("inf")), 0);
    }

    #[test]
    fn clean_traffic_truncates_decimals_and_clamps_negatives() {
        assert_eq!(clean_traffic(Some("1234.9")), 1234);
        assert_eq!(clean_traffic(Some("1e3")), 1000);
        assert_eq!(clean_traffic(Some("-500")), 0);
        assert_eq!(clean_traffic(Some("- 12")), 0);
    }

    #[test]
    fn clean_city_substitutes_and_title_cases() {
        assert_eq!(clean_city(Some("paris")), "Paris");
        assert_eq!(clean_city(Some("SAINT-DENIS")), "Saint-Denis");
        assert_eq!(clean_city(Some("")), UNKNOWN_CITY);
        assert_eq!(clean_city(None), UNKNOWN_CITY);
    }

    #[test]
    fn clean_network_substitutes_and_accents_metro() {
        assert_eq!(clean_network(Some("Metro")), "Métro");
        assert_eq!(clean_network(Some("RER")), "RER");
        assert_eq!(clean_network(Some("Métro")), "Métro");
        assert_eq!(clean_network(Some("NaN")), OTHER_NETWORK);
        assert_eq!(clean_network(None), OTHER_NETWORK);
    }

    #[test]
    fn title_case_treats_non_letters_as_word_breaks() {
        assert_eq!(title_case("l'haÿ-les-roses").as_ref(), "L'Haÿ-Les-Roses");
        assert_eq!(title_case("2eme arrondissement").as_ref(), "2Eme Arrondissement");
        assert!(matches!(title_case("Paris"), Cow::Borrowed(_)));
    }

    #[test]
    fn strip_whitespace_borrows_when_clean() {
        assert!(matches!(strip_whitespace("1200"), Cow::Borrowed(_)));
        assert_eq!(strip_whitespace(" 1 2 ").as_ref(), "12");
    }
}
