//! Descriptive statistics over a prepared trip table.
//!
//! Each report type computes its aggregates up front and renders them via
//! `Display`, so callers can print, log or assert on them.

pub mod duration;
pub mod station;
pub mod time;
pub mod users;

use std::collections::BTreeMap;
use std::fmt;

use crate::data::model::TripTable;
use crate::error::{BikeshareError, Result};

pub use duration::DurationStats;
pub use station::StationStats;
pub use time::TimeStats;
pub use users::UserStats;

/// A block of statistics printed by the session.
pub trait Report: fmt::Display + Sized {
    /// Heading printed before the statistics are computed.
    const HEADING: &'static str;

    fn compute(table: &TripTable) -> Result<Self>;
}

// ---------------------------------------------------------------------------
// Shared reductions
// ---------------------------------------------------------------------------

/// Most frequent value. Ties go to the smallest value.
pub fn mode<T, I>(values: I, what: &'static str) -> Result<T>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }

    let mut best: Option<(T, usize)> = None;
    // Ascending order + strict `>` keeps the smallest of equally common values.
    for (value, count) in counts {
        if best.as_ref().map_or(true, |(_, c)| count > *c) {
            best = Some((value, count));
        }
    }
    best.map(|(v, _)| v)
        .ok_or(BikeshareError::EmptyAggregationInput(what))
}

/// Frequency table ordered by count (descending), then value.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Ord,
    I: IntoIterator<Item = T>,
{
    let mut counts: BTreeMap<T, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    let mut table: Vec<(T, usize)> = counts.into_iter().collect();
    // Stable sort keeps ascending value order among equal counts.
    table.sort_by(|a, b| b.1.cmp(&a.1));
    table
}

/// Render a frequency table with the labels padded to one column.
pub(crate) fn write_counts<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    counts: &[(T, usize)],
) -> fmt::Result {
    let labels: Vec<String> = counts.iter().map(|(v, _)| v.to_string()).collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    for (label, (_, count)) in labels.iter().zip(counts) {
        writeln!(f, "{label:<width$}    {count}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_returns_dominant_value() {
        assert_eq!(mode([3, 1, 3, 2, 3], "values").unwrap(), 3);
        assert_eq!(mode(["b", "a", "b"], "values").unwrap(), "b");
    }

    #[test]
    fn mode_tie_goes_to_smallest() {
        assert_eq!(mode([5, 2, 9, 2, 5, 9], "values").unwrap(), 2);
        assert_eq!(mode(["z", "m", "a"], "values").unwrap(), "a");
    }

    #[test]
    fn mode_of_nothing_is_an_error() {
        let err = mode(Vec::<i64>::new(), "birth years").unwrap_err();
        assert!(matches!(err, BikeshareError::EmptyAggregationInput("birth years")));
    }

    #[test]
    fn value_counts_orders_by_count_then_value() {
        let counts = value_counts(["Customer", "Subscriber", "Dependent", "Subscriber", "Customer", "Subscriber"]);
        assert_eq!(
            counts,
            vec![("Subscriber", 3), ("Customer", 2), ("Dependent", 1)]
        );
        let counts = value_counts(["b", "a"]);
        assert_eq!(counts, vec![("a", 1), ("b", 1)]);
    }
}
