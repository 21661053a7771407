use std::fmt;

use chrono::Timelike;

use super::{Report, mode};
use crate::config::{MONTHS, WEEK_DAYS, title_case};
use crate::data::filter::{DAY_OF_WEEK_COLUMN, MONTH_COLUMN};
use crate::data::model::{CellValue, START_TIME, TripTable};
use crate::error::Result;

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    /// Calendar month, 1 = January.
    pub busiest_month: CellValue,
    /// Weekday, 0 = Monday.
    pub busiest_day: CellValue,
    /// Hour of day of `Start Time`.
    pub busiest_hour: u32,
}

impl Report for TimeStats {
    const HEADING: &'static str = "Calculating The Most Frequent Times of Travel...";

    fn compute(table: &TripTable) -> Result<Self> {
        let known = |c: &&CellValue| !c.is_null();
        let busiest_month = mode(
            table.column(MONTH_COLUMN)?.filter(known).cloned(),
            "months",
        )?;
        let busiest_day = mode(
            table.column(DAY_OF_WEEK_COLUMN)?.filter(known).cloned(),
            "weekdays",
        )?;
        let busiest_hour = mode(
            table
                .column(START_TIME)?
                .filter_map(|c| c.as_timestamp())
                .map(|ts| ts.hour()),
            "start hours",
        )?;
        Ok(TimeStats {
            busiest_month,
            busiest_day,
            busiest_hour,
        })
    }
}

fn month_name(month: &CellValue) -> String {
    match month {
        CellValue::Integer(m) if *m >= 1 => match MONTHS.get(*m as usize) {
            Some(name) => title_case(name),
            None => format!("month {m}"),
        },
        other => other.to_string(),
    }
}

fn weekday_name(day: &CellValue) -> String {
    match day {
        CellValue::Integer(d) if *d >= 0 => match WEEK_DAYS.get(*d as usize + 1) {
            Some(name) => title_case(name),
            None => format!("day {d}"),
        },
        other => other.to_string(),
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Busiest Month was {}", month_name(&self.busiest_month))?;
        writeln!(f, "Busiest Day of Week was {}", weekday_name(&self.busiest_day))?;
        writeln!(f, "Busiest Start Hour was {}:00", self.busiest_hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{derive_time_columns, read_csv_from};
    use crate::error::BikeshareError;

    fn table(csv: &str) -> TripTable {
        let mut t = read_csv_from(csv.as_bytes()).unwrap();
        derive_time_columns(&mut t).unwrap();
        t
    }

    #[test]
    fn picks_most_common_month_day_and_hour() {
        let t = table(
            "Start Time\n\
             2017-02-06 08:00:00\n\
             2017-02-06 08:30:00\n\
             2017-02-08 17:00:00\n\
             2017-05-05 17:10:00\n\
             2017-05-06 08:10:00\n",
        );
        let stats = TimeStats::compute(&t).unwrap();
        assert_eq!(stats.busiest_month, CellValue::Integer(2));
        assert_eq!(stats.busiest_day, CellValue::Integer(0));
        assert_eq!(stats.busiest_hour, 8);

        let text = stats.to_string();
        assert!(text.contains("Busiest Month was February"));
        assert!(text.contains("Busiest Day of Week was Monday"));
        assert!(text.contains("Busiest Start Hour was 8:00"));
    }

    #[test]
    fn uniform_tie_picks_smallest() {
        // one trip each in January..March, Wed/Thu/Fri, hours 9/10/11
        let t = table(
            "Start Time\n\
             2017-03-03 11:00:00\n\
             2017-02-02 10:00:00\n\
             2017-01-04 09:00:00\n",
        );
        let stats = TimeStats::compute(&t).unwrap();
        assert_eq!(stats.busiest_month, CellValue::Integer(1));
        assert_eq!(stats.busiest_day, CellValue::Integer(2));
        assert_eq!(stats.busiest_hour, 9);
    }

    #[test]
    fn missing_start_times_are_skipped() {
        // two unknown times outnumber any single month / weekday / hour
        let t = table(
            "Start Time,User Type\n\
             ,Customer\n\
             2017-04-04 15:00:00,Customer\n\
             ,Customer\n",
        );
        let stats = TimeStats::compute(&t).unwrap();
        assert_eq!(stats.busiest_month, CellValue::Integer(4));
        assert_eq!(stats.busiest_day, CellValue::Integer(1));
        assert_eq!(stats.busiest_hour, 15);
    }

    #[test]
    fn empty_table_is_reported() {
        let t = table("Start Time\n");
        assert!(matches!(
            TimeStats::compute(&t),
            Err(BikeshareError::EmptyAggregationInput(_))
        ));
    }

    #[test]
    fn names_fall_back_outside_option_lists() {
        assert_eq!(month_name(&CellValue::Integer(9)), "month 9");
        assert_eq!(weekday_name(&CellValue::Integer(6)), "Sunday");
    }
}
