//! Publication dates guessed from URLs.
//!
//! News sites routinely put the publication day into article and image
//! paths (`/2019/06/12/`, `/201906/12/`, `20190612_photo.jpg`). The image
//! engine compares the date found in an image URL with the page's own date
//! to favour fresh photos over stock and archive pictures.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::{Captures, Regex};

/// Source of a calendar date for a URL.
///
/// Not finding a date is the common case and not an error.
pub trait DateSignal: Send + Sync {
    fn date_from_url(&self, url: &str) -> Option<NaiveDate>;
}

/// Years outside this range are version numbers, sizes or ids, not dates.
const MIN_YEAR: i32 = 1991;

struct DateRules {
    /// `2019-06-12`, `2019/6/12`, `2019_06_2`, `2019.6.1`
    separated: Regex,
    /// `20190612`
    compact: Regex,
    /// `201906/12`, `201906-12`
    month_path: Regex,
    /// `12/06/2019`
    day_first: Regex,
    /// `19-06-12`, read as 2019
    short_year: Regex,
}

// Each rule starts at the beginning of the input or right after a non-digit,
// so a date never begins in the middle of a longer number.
#[allow(clippy::expect_used)]
static RULES: LazyLock<DateRules> = LazyLock::new(|| DateRules {
    separated: Regex::new(r"(?:^|\D)([12][09]\d{2})[-_./]([01]?\d)[-_./]([0-3]?\d)\D")
        .expect("valid regex"),
    compact: Regex::new(r"(?:^|\D)([12][09]\d{2})([01]\d)([0-3]\d)").expect("valid regex"),
    month_path: Regex::new(r"(?:^|\D)([12][09]\d{2})([01]\d)[-_./]([0-3]?\d)\D")
        .expect("valid regex"),
    day_first: Regex::new(r"(?:^|\D)([0-3]?\d)/([01]?\d)/([12][09]\d{2})\D")
        .expect("valid regex"),
    short_year: Regex::new(r"(?:^|\D)(\d{2})[-_./]([01]?\d)[-_./]([0-3]?\d)\D")
        .expect("valid regex"),
});

/// Default [`DateSignal`]: pattern matching on the URL string.
#[derive(Debug, Default, Clone, Copy)]
pub struct UrlDateSignal;

impl UrlDateSignal {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Parse capture groups `y`, `m`, `d` as a calendar date.
fn ymd(caps: &Captures, y: usize, m: usize, d: usize) -> Option<NaiveDate> {
    let field = |i: usize| caps.get(i).and_then(|g| g.as_str().parse::<u32>().ok());
    let year = i32::try_from(field(y)?).ok()?;
    NaiveDate::from_ymd_opt(year, field(m)?, field(d)?)
}

/// First match of `re` only, as a full date from a four-digit year.
fn first_full_date(re: &Regex, url: &str, y: usize, m: usize, d: usize) -> Option<NaiveDate> {
    re.captures(url)
        .and_then(|caps| ymd(&caps, y, m, d))
        .filter(|date| chrono::Datelike::year(date) >= MIN_YEAR)
}

impl DateSignal for UrlDateSignal {
    fn date_from_url(&self, url: &str) -> Option<NaiveDate> {
        let url = url.trim();
        if url.is_empty() {
            return None;
        }

        first_full_date(&RULES.separated, url, 1, 2, 3)
            .or_else(|| first_full_date(&RULES.compact, url, 1, 2, 3))
            .or_else(|| first_full_date(&RULES.month_path, url, 1, 2, 3))
            .or_else(|| first_full_date(&RULES.day_first, url, 3, 2, 1))
            .or_else(|| {
                let caps = RULES.short_year.captures(url)?;
                let yy: i32 = caps.get(1)?.as_str().parse().ok()?;
                let mm: u32 = caps.get(2)?.as_str().parse().ok()?;
                let dd: u32 = caps.get(3)?.as_str().parse().ok()?;
                NaiveDate::from_ymd_opt(2000 + yy, mm, dd)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn parse(url: &str) -> Option<NaiveDate> {
        UrlDateSignal::new().date_from_url(url)
    }

    #[test]
    fn separated_dates_in_paths() {
        assert_eq!(parse("https://x.com/2019/06/12/story.html"), date(2019, 6, 12));
        assert_eq!(parse("https://x.com/news/2019-6-2/a"), date(2019, 6, 2));
        assert_eq!(parse("https://x.com/img/2021_11_30_cover.jpg"), date(2021, 11, 30));
    }

    #[test]
    fn compact_dates() {
        assert_eq!(parse("https://x.com/uploads/20190612/abc.jpg"), date(2019, 6, 12));
        assert_eq!(parse("https://x.com/p/20191399.jpg"), None);
    }

    #[test]
    fn year_month_directory_then_day() {
        assert_eq!(parse("https://x.com/content/201906/12/c1.html"), date(2019, 6, 12));
    }

    #[test]
    fn day_first_dates() {
        assert_eq!(parse("https://x.com/a?d=12/06/2019&x"), date(2019, 6, 12));
    }

    #[test]
    fn two_digit_years_are_this_century() {
        assert_eq!(parse("https://x.com/19-06-12/a.jpg"), date(2019, 6, 12));
    }

    #[test]
    fn calendar_validity_is_checked() {
        assert_eq!(parse("https://x.com/2019/02/30/a.html"), None);
    }

    #[test]
    fn digits_inside_longer_numbers_do_not_match() {
        assert_eq!(parse("https://x.com/id/912019/06/aa"), None);
    }

    #[test]
    fn no_date_is_none() {
        assert_eq!(parse("https://x.com/about/team.html"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("https://cdn.x.com/w1200/h800/photo.jpg"), None);
    }
}
