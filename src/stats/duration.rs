use std::fmt;

use super::Report;
use crate::data::model::{TRIP_DURATION, TripTable};
use crate::error::{BikeshareError, Result};

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Total and average trip duration, in minutes.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total_minutes: f64,
    pub mean_minutes: f64,
}

impl DurationStats {
    /// Aggregate durations given in seconds.
    pub fn from_seconds(seconds: &[f64]) -> Result<Self> {
        if seconds.is_empty() {
            return Err(BikeshareError::EmptyAggregationInput("trip durations"));
        }
        let total: f64 = seconds.iter().sum();
        let mean = total / seconds.len() as f64;
        Ok(DurationStats {
            total_minutes: total / SECONDS_PER_MINUTE,
            mean_minutes: mean / SECONDS_PER_MINUTE,
        })
    }
}

impl Report for DurationStats {
    const HEADING: &'static str = "Calculating Trip Duration...";

    fn compute(table: &TripTable) -> Result<Self> {
        let seconds = table
            .column(TRIP_DURATION)?
            .enumerate()
            .map(|(row, cell)| {
                cell.as_f64().ok_or_else(|| BikeshareError::InvalidValue {
                    column: TRIP_DURATION.to_string(),
                    row,
                    value: cell.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        Self::from_seconds(&seconds)
    }
}

impl fmt::Display for DurationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total travel Time is {} minutes", self.total_minutes)?;
        writeln!(f, "Average travel Time is {} minutes", self.mean_minutes)
    }
}
