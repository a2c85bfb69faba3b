//! The filter/sort/window pipeline behind every list widget.
//!
//! One pure function over an in-memory collection, re-run in full on every
//! selection change. Filter order is fixed: scope, time filters, facet
//! filters, then direction and cap. Reversal happens after all filtering so
//! a row cap always takes the leading items of the chosen direction.

use std::cmp::Ordering;

use chrono::{DateTime, Days, Utc};
use chrono_tz::Tz;
use tracing::trace;

use crate::facet::{FilterSelection, in_locked_group};
use crate::period::PeriodStyle;
use crate::record::Listable;

/// Knobs supplied by the page embedding a widget.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Group slug baked into the page; overrides and hides the user-facing
    /// group selector. Matched case-insensitively.
    pub locked_group: Option<String>,

    /// When false, only records ending strictly after `now` survive.
    pub hide_past: bool,

    /// Only records starting strictly before `now + days` survive. Zero or
    /// `None` means no horizon; the "this week" widget passes 7.
    pub days_ahead: Option<u64>,

    /// Oldest first when true. The common direction is newest first.
    pub ascending: bool,

    /// Row cap, applied last. `None` returns the full filtered sequence.
    pub count: Option<usize>,
}

/// Apply the pipeline and return the rows to display, in display order.
///
/// `now` is sampled once by the caller per invocation; two invocations in
/// the same render may observe slightly different instants.
#[must_use]
pub fn filter_and_sort<'a, R: Listable>(
    records: &'a [R],
    selection: &FilterSelection,
    opts: &ListOptions,
    style: PeriodStyle,
    tz: Tz,
    now: DateTime<Utc>,
) -> Vec<&'a R> {
    let mut rows: Vec<&R> = records.iter().collect();

    // Canonical ascending order first; records with no usable date sort
    // after every dated record, stably.
    rows.sort_by(|a, b| cmp_order_key(a.order_key(), b.order_key()));

    if let Some(locked) = opts.locked_group.as_deref() {
        rows.retain(|r| in_locked_group(*r, Some(locked)));
    }

    if opts.hide_past {
        rows.retain(|r| r.ends_at().is_some_and(|end| end > now));
    }

    if let Some(days) = opts.days_ahead.filter(|d| *d > 0) {
        let horizon = now
            .checked_add_days(Days::new(days))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        rows.retain(|r| r.starts_at().is_some_and(|start| start < horizon));
    }

    if let Some(period) = selection.period.as_only() {
        rows.retain(|r| {
            r.order_key()
                .is_some_and(|dt| style.period_of(dt, tz) == *period)
        });
    }

    if opts.locked_group.is_none() {
        if let Some(group) = selection.group.as_only() {
            rows.retain(|r| r.group_id() == Some(group.as_str()));
        }
    }

    if let Some(kind) = selection.kind.as_only() {
        rows.retain(|r| r.has_kind(*kind));
    }

    if !opts.ascending {
        rows.reverse();
    }

    if let Some(count) = opts.count {
        rows.truncate(count);
    }

    trace!(
        total = records.len(),
        shown = rows.len(),
        "applied list pipeline"
    );
    rows
}

fn cmp_order_key(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
