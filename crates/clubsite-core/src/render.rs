//! Row view models: the strings the templates print verbatim.
//!
//! The renderer owns the resolved zone and the display conventions so the
//! page layer never touches a raw instant. A record whose date failed to
//! parse still gets a row, just with no date line.

use chrono_tz::Tz;

use crate::config::SiteConfig;
use crate::datetime::{format_date, format_range};
use crate::facet::Selection;
use crate::period::{Period, PeriodStyle};
use crate::record::{ContentKind, ResearchRecord, ScheduleRecord};

/// A rendered list: either rows, or an explicit empty state the page turns
/// into a "no results" message. Distinct from "still loading", which is the
/// host's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView<T> {
    Empty,
    Rows(Vec<T>),
}

impl<T> ListView<T> {
    fn from_rows(rows: Vec<T>) -> Self {
        if rows.is_empty() {
            ListView::Empty
        } else {
            ListView::Rows(rows)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchRow {
    pub slug: String,
    pub title: String,
    pub date_line: Option<String>,
    pub badge: Option<String>,
    pub byline: String,
    pub kinds: Vec<ContentKind>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub slug: String,
    pub title: String,
    pub when: Option<String>,
    pub badge: Option<String>,
    pub location: Option<String>,
    pub hosts_line: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    tz: Tz,
    separator: String,
    fallback_byline: String,
}

impl Renderer {
    #[must_use]
    pub fn new(cfg: &SiteConfig) -> Self {
        Self {
            tz: cfg.tz(),
            separator: cfg.date_separator.clone(),
            fallback_byline: cfg.name.clone(),
        }
    }

    #[must_use]
    pub fn research_rows(&self, records: &[&ResearchRecord]) -> ListView<ResearchRow> {
        ListView::from_rows(records.iter().map(|r| self.research_row(r)).collect())
    }

    #[must_use]
    pub fn research_row(&self, record: &ResearchRecord) -> ResearchRow {
        let byline = if record.authors.is_empty() {
            self.fallback_byline.clone()
        } else {
            record
                .authors
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        ResearchRow {
            slug: record.slug.clone(),
            title: record.title.clone(),
            date_line: record.date.map(|d| format_date(d, self.tz)),
            badge: record.group.as_ref().map(|g| g.label()),
            byline,
            kinds: record.kinds(),
        }
    }

    #[must_use]
    pub fn schedule_rows(&self, records: &[&ScheduleRecord]) -> ListView<ScheduleRow> {
        ListView::from_rows(records.iter().map(|r| self.schedule_row(r)).collect())
    }

    #[must_use]
    pub fn schedule_row(&self, record: &ScheduleRecord) -> ScheduleRow {
        let when = record.start.map(|start| {
            let end = record.end.unwrap_or(start);
            format_range(start, end, &self.separator, self.tz)
        });

        let hosts_line = if record.hosts.is_empty() {
            None
        } else {
            Some(record.hosts.join(", "))
        };

        ScheduleRow {
            slug: record.slug.clone(),
            title: record.title.clone(),
            when,
            badge: record.group.as_ref().map(|g| g.label()),
            location: record.location.clone(),
            hosts_line,
        }
    }
}

/// Label for a period selector option.
#[must_use]
pub fn period_option_label(style: PeriodStyle, option: &Selection<Period>) -> String {
    match option {
        Selection::All => match style {
            PeriodStyle::Year => "All Years".to_string(),
            PeriodStyle::Semester => "All Semesters".to_string(),
        },
        Selection::Only(period) => period.to_string(),
    }
}

/// Label for a group selector option; group ids display uppercased.
#[must_use]
pub fn group_option_label(option: &Selection<String>) -> String {
    match option {
        Selection::All => "All Groups".to_string(),
        Selection::Only(id) => id.to_uppercase(),
    }
}

/// Label for a content-kind selector option.
#[must_use]
pub fn kind_option_label(option: &Selection<ContentKind>) -> String {
    match option {
        Selection::All => "All Types".to_string(),
        Selection::Only(kind) => kind.as_str().to_string(),
    }
}
