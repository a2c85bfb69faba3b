//! Periods: the coarse time buckets used as the primary facet.
//!
//! Research pages bucket by calendar year, the schedule by academic
//! semester. Ordering is always computed on `(year, season)` pairs, never on
//! the rendered label, so `Spring 2025` sorts after `Fall 2024` and before
//! `Fall 2025`.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    Year(i32),
    Semester { year: i32, season: Season },
}

impl Period {
    fn sort_key(&self) -> (i32, u8) {
        match self {
            Period::Year(year) => (*year, 0),
            Period::Semester { year, season } => {
                let rank = match season {
                    Season::Spring => 1,
                    Season::Summer => 2,
                    Season::Fall => 3,
                };
                (*year, rank)
            }
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Year(year) => write!(f, "{year}"),
            Period::Semester { year, season } => {
                write!(f, "{} {year}", season.as_str())
            }
        }
    }
}

/// Which bucketing a collection uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodStyle {
    Year,
    Semester,
}

impl PeriodStyle {
    /// Bucket an instant, evaluated on the site's civil calendar.
    ///
    /// Semester boundaries: August through December is Fall, January through
    /// May is Spring, June and July are Summer.
    #[must_use]
    pub fn period_of(&self, dt: DateTime<Utc>, tz: Tz) -> Period {
        let local = dt.with_timezone(&tz);
        match self {
            PeriodStyle::Year => Period::Year(local.year()),
            PeriodStyle::Semester => {
                let season = match local.month() {
                    8.. => Season::Fall,
                    ..=5 => Season::Spring,
                    _ => Season::Summer,
                };
                Period::Semester {
                    year: local.year(),
                    season,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use chrono_tz::Tz;

    use super::{Period, PeriodStyle, Season};

    const UTC: Tz = chrono_tz::UTC;

    #[test]
    fn semesters_order_by_year_then_season() {
        let mut periods = vec![
            Period::Semester {
                year: 2024,
                season: Season::Spring,
            },
            Period::Semester {
                year: 2025,
                season: Season::Spring,
            },
            Period::Semester {
                year: 2024,
                season: Season::Fall,
            },
        ];
        periods.sort();
        periods.reverse();

        let labels: Vec<String> = periods.iter().map(ToString::to_string).collect();
        assert_eq!(labels, vec!["Spring 2025", "Fall 2024", "Spring 2024"]);
    }

    #[test]
    fn semester_boundaries_follow_the_academic_calendar() {
        let style = PeriodStyle::Semester;
        let cases = [
            (1, Season::Spring),
            (5, Season::Spring),
            (6, Season::Summer),
            (7, Season::Summer),
            (8, Season::Fall),
            (12, Season::Fall),
        ];
        for (month, season) in cases {
            let dt = Utc.with_ymd_and_hms(2025, month, 15, 12, 0, 0).unwrap();
            assert_eq!(
                style.period_of(dt, UTC),
                Period::Semester { year: 2025, season },
                "month {month}"
            );
        }
    }

    #[test]
    fn year_bucketing_uses_the_site_zone() {
        let eastern: Tz = "America/New_York".parse().unwrap();
        // New Year's Day 02:00 UTC is still the previous year in New York.
        let dt = Utc.with_ymd_and_hms(2025, 1, 1, 2, 0, 0).unwrap();
        assert_eq!(PeriodStyle::Year.period_of(dt, eastern), Period::Year(2024));
        assert_eq!(PeriodStyle::Year.period_of(dt, UTC), Period::Year(2025));
    }

    #[test]
    fn labels_render_year_and_semester_forms() {
        assert_eq!(Period::Year(2025).to_string(), "2025");
        assert_eq!(
            Period::Semester {
                year: 2025,
                season: Season::Fall
            }
            .to_string(),
            "Fall 2025"
        );
    }
}
