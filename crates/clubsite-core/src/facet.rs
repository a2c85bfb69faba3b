//! Facet derivation and the selection value object.
//!
//! The host UI holds a [`FilterSelection`] as its only state and re-derives
//! selector options from the records on every render. Derivations never
//! fail: an empty collection produces empty option lists, which the host
//! shows as a valid empty state.

use std::collections::BTreeSet;

use chrono_tz::Tz;
use tracing::debug;

use crate::period::{Period, PeriodStyle};
use crate::record::{ContentKind, Listable};

/// A facet choice: the synthetic "All" sentinel or one concrete value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T> Selection<T> {
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    #[must_use]
    pub fn as_only(&self) -> Option<&T> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }
}

/// Transient UI state for one list widget. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub period: Selection<Period>,
    pub group: Selection<String>,
    pub kind: Selection<ContentKind>,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            period: Selection::All,
            group: Selection::All,
            kind: Selection::All,
        }
    }
}

impl FilterSelection {
    /// Starting state: the newest derived period, or All when there is none.
    #[must_use]
    pub fn initial(periods: &[Period]) -> Self {
        Self {
            period: periods.first().map_or(Selection::All, |p| Selection::Only(*p)),
            ..Self::default()
        }
    }

    /// The cascade transition for changing the primary facet.
    ///
    /// Group options are scoped to the selected period, so a period change
    /// can invalidate the current group; it resets to All. The kind
    /// selection is period-independent and survives.
    #[must_use]
    pub fn with_period(self, period: Selection<Period>) -> Self {
        Self {
            period,
            group: Selection::All,
            kind: self.kind,
        }
    }
}

/// Distinct periods present in the collection, newest first.
///
/// When the widget is embedded on a group's own page, `locked_group` scopes
/// the derivation so only that group's periods are offered.
#[must_use]
pub fn derive_periods<R: Listable>(
    records: &[R],
    locked_group: Option<&str>,
    style: PeriodStyle,
    tz: Tz,
) -> Vec<Period> {
    let set: BTreeSet<Period> = records
        .iter()
        .filter(|r| in_locked_group(*r, locked_group))
        .filter_map(Listable::order_key)
        .map(|dt| style.period_of(dt, tz))
        .collect();

    let periods: Vec<Period> = set.into_iter().rev().collect();
    debug!(count = periods.len(), "derived period facet");
    periods
}

/// Group options scoped to the selected period, ascending by id, with the
/// leading All sentinel. Uncategorized records never contribute an option.
#[must_use]
pub fn derive_groups<R: Listable>(
    records: &[R],
    selected_period: &Selection<Period>,
    style: PeriodStyle,
    tz: Tz,
) -> Vec<Selection<String>> {
    let set: BTreeSet<String> = records
        .iter()
        .filter(|r| match selected_period.as_only() {
            Some(period) => r
                .order_key()
                .is_some_and(|dt| style.period_of(dt, tz) == *period),
            None => true,
        })
        .filter_map(|r| r.group_id().map(ToString::to_string))
        .collect();

    let mut options = vec![Selection::All];
    options.extend(set.into_iter().map(Selection::Only));
    options
}

pub(crate) fn in_locked_group<R: Listable>(record: &R, locked_group: Option<&str>) -> bool {
    match locked_group {
        Some(slug) => record
            .group_id()
            .is_some_and(|id| id.eq_ignore_ascii_case(slug)),
        None => true,
    }
}
