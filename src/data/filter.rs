use std::fmt;

use super::model::{CellValue, TripTable};
use crate::config::{City, MONTHS, WEEK_DAYS, title_case};
use crate::error::{BikeshareError, Result};

/// Derived column: calendar month of `Start Time` (1 = January).
pub const MONTH_COLUMN: &str = "month";
/// Derived column: weekday of `Start Time` (0 = Monday).
pub const DAY_OF_WEEK_COLUMN: &str = "day_of_week";

// ---------------------------------------------------------------------------
// FilterSelection – validated city / month / day choice
// ---------------------------------------------------------------------------

/// The city to load plus the month and day filters, each either a name from
/// its option list or `"all"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub city: City,
    month: &'static str,
    day: &'static str,
}

fn lookup(options: &[&'static str], value: &str) -> Result<&'static str> {
    let wanted = value.trim().to_lowercase();
    options
        .iter()
        .copied()
        .find(|o| *o == wanted)
        .ok_or_else(|| BikeshareError::InvalidUserInput {
            input: value.to_string(),
            expected: options.join(", "),
        })
}

impl FilterSelection {
    /// Validate the three choices against their option sets.
    pub fn new(city: City, month: &str, day: &str) -> Result<Self> {
        Ok(FilterSelection {
            city,
            month: lookup(&MONTHS, month)?,
            day: lookup(&WEEK_DAYS, day)?,
        })
    }

    /// No month or day restriction.
    pub fn unfiltered(city: City) -> Self {
        FilterSelection {
            city,
            month: MONTHS[0],
            day: WEEK_DAYS[0],
        }
    }

    pub fn month(&self) -> &'static str {
        self.month
    }

    pub fn day(&self) -> &'static str {
        self.day
    }

    /// Calendar month number to keep, `None` for "all".
    pub fn month_number(&self) -> Option<i64> {
        if self.month == "all" {
            return None;
        }
        MONTHS.iter().position(|m| *m == self.month).map(|i| i as i64)
    }

    /// Weekday number (Monday = 0) to keep, `None` for "all".
    ///
    /// The option list is 1-indexed behind "all", hence the `- 1`.
    pub fn weekday_number(&self) -> Option<i64> {
        if self.day == "all" {
            return None;
        }
        WEEK_DAYS
            .iter()
            .position(|d| *d == self.day)
            .map(|i| i as i64 - 1)
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\tCity: {} \n\tMonth: {} \n\tDay: {}",
            self.city,
            title_case(self.month),
            title_case(self.day)
        )
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Keep rows whose derived `month` / `day_of_week` match the selection.
///
/// A filter set to "all" leaves the table untouched; row order is preserved.
pub fn apply_filters(table: &mut TripTable, selection: &FilterSelection) -> Result<()> {
    if let Some(month) = selection.month_number() {
        let idx = table.column_index(MONTH_COLUMN)?;
        table.retain_rows(|row| row[idx] == CellValue::Integer(month));
    }
    if let Some(weekday) = selection.weekday_number() {
        let idx = table.column_index(DAY_OF_WEEK_COLUMN)?;
        table.retain_rows(|row| row[idx] == CellValue::Integer(weekday));
    }
    log::debug!(
        "filter month={} day={} kept {} rows",
        selection.month(),
        selection.day(),
        table.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derived(rows: &[(i64, i64)]) -> TripTable {
        TripTable::new(
            vec![MONTH_COLUMN.into(), DAY_OF_WEEK_COLUMN.into()],
            rows.iter()
                .map(|(m, d)| vec![CellValue::Integer(*m), CellValue::Integer(*d)])
                .collect(),
        )
    }

    #[test]
    fn selection_rejects_unknown_names() {
        assert!(matches!(
            FilterSelection::new(City::Chicago, "july", "all"),
            Err(BikeshareError::InvalidUserInput { .. })
        ));
        assert!(FilterSelection::new(City::Chicago, "all", "funday").is_err());
        let sel = FilterSelection::new(City::Chicago, "March", " Friday ").unwrap();
        assert_eq!(sel.month(), "march");
        assert_eq!(sel.day(), "friday");
    }

    #[test]
    fn monday_maps_to_weekday_zero() {
        let sel = FilterSelection::new(City::Chicago, "all", "monday").unwrap();
        assert_eq!(sel.weekday_number(), Some(0));
        let sel = FilterSelection::new(City::Chicago, "all", "sunday").unwrap();
        assert_eq!(sel.weekday_number(), Some(6));
        let sel = FilterSelection::new(City::Chicago, "june", "all").unwrap();
        assert_eq!(sel.month_number(), Some(6));
        assert_eq!(sel.weekday_number(), None);
    }

    #[test]
    fn all_filter_is_idempotent() {
        let original = derived(&[(1, 0), (2, 3), (1, 6)]);
        let sel = FilterSelection::unfiltered(City::Washington);
        let mut once = original.clone();
        apply_filters(&mut once, &sel).unwrap();
        let mut twice = once.clone();
        apply_filters(&mut twice, &sel).unwrap();
        assert_eq!(once, original);
        assert_eq!(twice, original);
    }

    #[test]
    fn month_and_day_filters_combine() {
        let mut t = derived(&[(1, 0), (2, 0), (1, 1), (1, 0)]);
        let sel = FilterSelection::new(City::Chicago, "january", "monday").unwrap();
        apply_filters(&mut t, &sel).unwrap();
        assert_eq!(t.len(), 2);
        assert!(t.rows.iter().all(|r| r[0] == CellValue::Integer(1) && r[1] == CellValue::Integer(0)));
    }

    #[test]
    fn missing_derived_column_is_an_error() {
        let mut t = TripTable::new(vec!["x".into()], vec![]);
        let sel = FilterSelection::new(City::Chicago, "may", "all").unwrap();
        assert!(matches!(
            apply_filters(&mut t, &sel),
            Err(BikeshareError::MissingColumn(c)) if c == MONTH_COLUMN
        ));
    }

    #[test]
    fn display_echoes_title_cased_choices() {
        let sel = FilterSelection::new(City::NewYorkCity, "all", "tuesday").unwrap();
        let text = sel.to_string();
        assert!(text.contains("City: New York City"));
        assert!(text.contains("Month: All"));
        assert!(text.contains("Day: Tuesday"));
    }
}
