use super::filter::{DAY_OF_WEEK_COLUMN, MONTH_COLUMN};
use super::loader::parse_timestamp_column;
use super::model::{
    BIRTH_YEAR, CellValue, END_TIME, START_TIME, TRIP_ID, TripTable, UNNAMED_INDEX,
};
use crate::config::City;
use crate::error::{BikeshareError, Result};

/// Missing times stay missing rather than becoming `0`.
const TIME_COLUMNS: [&str; 4] = [START_TIME, END_TIME, MONTH_COLUMN, DAY_OF_WEEK_COLUMN];

/// Prepare a loaded table for reporting:
///
/// * `End Time` is parsed to timestamps
/// * null cells outside the time columns become `0`
/// * a zero-filled `Birth Year` is added when the layout has none (Washington)
/// * `Birth Year` is coerced to integers
/// * the unnamed index column is renamed `Trip Id`
pub fn preprocess(mut table: TripTable, city: City) -> Result<TripTable> {
    parse_timestamp_column(&mut table, END_TIME)?;
    table.fill_null(&CellValue::Integer(0), &TIME_COLUMNS);

    if !table.has_column(BIRTH_YEAR) {
        if city != City::Washington {
            log::warn!("{city} data has no {BIRTH_YEAR} column, treating every year as unknown");
        }
        table.set_column(BIRTH_YEAR, vec![CellValue::Integer(0); table.len()]);
    }
    table.map_column(BIRTH_YEAR, coerce_year)?;

    if !table.rename_column(UNNAMED_INDEX, TRIP_ID) {
        log::debug!("no index column to rename");
    }
    Ok(table)
}

/// `1989.0` -> `1989`, truncating like an integer cast.
fn coerce_year(row: usize, cell: &CellValue) -> Result<CellValue> {
    let invalid = || BikeshareError::InvalidValue {
        column: BIRTH_YEAR.to_string(),
        row,
        value: cell.to_string(),
    };
    match cell {
        CellValue::Integer(_) => Ok(cell.clone()),
        CellValue::Float(f) if f.is_finite() => Ok(CellValue::Integer(f.trunc() as i64)),
        CellValue::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(CellValue::Integer(i));
            }
            match s.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(CellValue::Integer(f.trunc() as i64)),
                _ => Err(invalid()),
            }
        }
        _ => Err(invalid()),
    }
}
