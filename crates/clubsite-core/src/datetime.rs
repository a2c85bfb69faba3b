//! Civil-time helpers for the site.
//!
//! Every printed time must match the venue's wall clock no matter where the
//! page is viewed, so all calendar-day and midnight checks run in one
//! configured [`Tz`] that callers thread through explicitly. Nothing in this
//! module reads the ambient local zone.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

/// Zone used when the site config does not name one.
pub const DEFAULT_SITE_TIMEZONE: &str = "America/New_York";

/// True when both instants fall on the same calendar day in the site zone.
#[must_use]
pub fn same_site_day(a: DateTime<Utc>, b: DateTime<Utc>, tz: Tz) -> bool {
    a.with_timezone(&tz).date_naive() == b.with_timezone(&tz).date_naive()
}

/// True when the instant is midnight on the site's wall clock.
///
/// Seconds are ignored: all-day records are entered with minute precision.
#[must_use]
pub fn is_site_midnight(dt: DateTime<Utc>, tz: Tz) -> bool {
    let local = dt.with_timezone(&tz);
    local.hour() == 0 && local.minute() == 0
}

/// Full date for list rows, e.g. `Mar 1, 2025`.
#[must_use]
pub fn format_date(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%b %-d, %Y").to_string()
}

/// Date without the year, e.g. `Mar 1`. The period selector already
/// disambiguates the year on every page that shows these.
#[must_use]
pub fn format_short_date(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%b %-d").to_string()
}

/// Clock time with no leading zero on the hour, e.g. `2:00 PM`.
#[must_use]
pub fn format_clock(dt: DateTime<Utc>, tz: Tz) -> String {
    dt.with_timezone(&tz).format("%-I:%M %p").to_string()
}

/// Human-readable range for a schedule row.
///
/// Three terminal shapes:
/// - same day, both midnight: the date alone (an all-day record);
/// - same day, timed: `{date}{separator}{start} - {end}`;
/// - different days: `{start date} - {end date}`, times and separator unused.
#[must_use]
pub fn format_range(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    separator: &str,
    tz: Tz,
) -> String {
    if same_site_day(start, end, tz) {
        let date = format_short_date(start, tz);

        if is_site_midnight(start, tz) && is_site_midnight(end, tz) {
            return date;
        }

        let start_time = format_clock(start, tz);
        let end_time = format_clock(end, tz);
        format!("{date}{separator}{start_time} - {end_time}")
    } else {
        format!(
            "{} - {}",
            format_short_date(start, tz),
            format_short_date(end, tz)
        )
    }
}

/// Serde for optional record dates that must never sink a whole collection.
///
/// Accepts RFC 3339 or plain `YYYY-MM-DD` (midnight UTC). Anything else is
/// logged and decoded as `None`, so one bad frontmatter line degrades a
/// single row instead of blanking the page.
pub mod lenient_date_serde {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::warn;

    pub fn serialize<S>(dt: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match dt {
            Some(value) => serializer.serialize_str(&value.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };

        Ok(parse_lenient(&raw))
    }

    pub(crate) fn parse_lenient(raw: &str) -> Option<DateTime<Utc>> {
        let token = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Some(DateTime::<Utc>::from_naive_utc_and_offset(midnight, Utc));
            }
        }

        warn!(raw = %token, "unparseable record date; treating as missing");
        None
    }
}
