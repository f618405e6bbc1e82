//! Heuristic normalization of scraped date and location text.
//!
//! Permissive by design: these functions return `None` or a sentinel on
//! messy input so a bad listing item drops out of the pipeline as data
//! instead of aborting the run.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{PREFECTURES, PREFECTURE_OTHER};

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\d{4})[年-](\d{1,2})[月-](\d{1,2})").expect("valid regex")
    })
}

/// Extract the first year/month/day triple from free text.
///
/// Accepts both the 年月日 separator style and the dash style. Returns
/// `None` when no pattern matches or the triple is not a calendar date.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let caps = date_pattern().captures(text)?;
    let year: i32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let day: u32 = caps[3].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Scan free text for the first prefecture name it contains.
///
/// Returns the `その他` sentinel when none match.
pub fn extract_prefecture(text: &str) -> &'static str {
    PREFECTURES
        .iter()
        .find(|p| text.contains(**p))
        .copied()
        .unwrap_or(PREFECTURE_OTHER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_both_separator_styles() {
        assert_eq!(parse_date("2024年12月15日"), Some(date(2024, 12, 15)));
        assert_eq!(parse_date("2024-12-15"), Some(date(2024, 12, 15)));
    }

    #[test]
    fn takes_the_first_match_in_surrounding_text() {
        assert_eq!(
            parse_date("開催: 2025年1月5日〜2025年1月7日"),
            Some(date(2025, 1, 5))
        );
    }

    #[test]
    fn no_match_yields_none() {
        assert_eq!(parse_date("no date here"), None);
        assert_eq!(parse_date("12月15日"), None);
    }

    #[test]
    fn invalid_calendar_triple_yields_none() {
        assert_eq!(parse_date("2024年13月40日"), None);
    }

    #[test]
    fn finds_prefecture_as_substring() {
        assert_eq!(extract_prefecture("会場: 東京都渋谷区"), "東京都");
        assert_eq!(extract_prefecture("北海道札幌市"), "北海道");
    }

    #[test]
    fn unknown_location_maps_to_sentinel() {
        assert_eq!(extract_prefecture("オンライン開催"), "その他");
        assert_eq!(extract_prefecture(""), "その他");
    }
}
