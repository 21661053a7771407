use std::fmt;

use super::{Report, mode, value_counts, write_counts};
use crate::data::model::{BIRTH_YEAR, CellValue, GENDER, TripTable, USER_TYPE};
use crate::error::{BikeshareError, Result};

// ---------------------------------------------------------------------------
// Birth years
// ---------------------------------------------------------------------------

/// Oldest, youngest and most common known birth year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearStats {
    pub earliest: i64,
    pub most_recent: i64,
    pub most_common: i64,
}

impl BirthYearStats {
    /// Summarise years, skipping the `0` / negative "unknown" sentinel.
    pub fn from_years<I: IntoIterator<Item = i64>>(years: I) -> Result<Self> {
        let known: Vec<i64> = years.into_iter().filter(|y| *y > 0).collect();
        let (Some(earliest), Some(most_recent)) =
            (known.iter().min().copied(), known.iter().max().copied())
        else {
            return Err(BikeshareError::EmptyAggregationInput("birth years"));
        };
        Ok(BirthYearStats {
            earliest,
            most_recent,
            most_common: mode(known, "birth years")?,
        })
    }
}

// ---------------------------------------------------------------------------
// UserStats
// ---------------------------------------------------------------------------

/// Who rides: user types, genders and birth years.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: Vec<(CellValue, usize)>,
    /// `None` when the city's layout has no `Gender` column.
    pub genders: Option<Vec<(CellValue, usize)>>,
    /// `None` when no trip has a known birth year.
    pub birth_years: Option<BirthYearStats>,
}

impl Report for UserStats {
    const HEADING: &'static str = "Calculating User Stats...";

    fn compute(table: &TripTable) -> Result<Self> {
        let user_types = value_counts(table.column(USER_TYPE)?.cloned());

        let genders = match table.column(GENDER) {
            Ok(col) => Some(value_counts(col.cloned())),
            Err(BikeshareError::MissingColumn(_)) => {
                log::warn!("no {GENDER} column, skipping gender distribution");
                None
            }
            Err(e) => return Err(e),
        };

        let years = table
            .column(BIRTH_YEAR)?
            .map(|c| match c {
                CellValue::Integer(y) => *y,
                _ => 0,
            });
        let birth_years = match BirthYearStats::from_years(years) {
            Ok(stats) => Some(stats),
            Err(e @ BikeshareError::EmptyAggregationInput(_)) => {
                log::warn!("{e}");
                None
            }
            Err(e) => return Err(e),
        };

        Ok(UserStats {
            user_types,
            genders,
            birth_years,
        })
    }
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User Type Distribution")?;
        write_counts(f, &self.user_types)?;

        writeln!(f, "\nGender Distribution")?;
        match &self.genders {
            Some(counts) => write_counts(f, counts)?,
            None => writeln!(f, "No gender data available for this city")?,
        }

        match &self.birth_years {
            Some(years) => {
                writeln!(f, "\nOldest Customer(s) year of birth is {}", years.earliest)?;
                writeln!(f, "Youngest Customer(s) year of birth is {}", years.most_recent)?;
                writeln!(f, "Most Common Birth Year is {}", years.most_common)
            }
            None => writeln!(f, "\nNo birth year data available for this selection"),
        }
    }
}
