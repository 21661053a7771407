use std::fs::File;
use std::io;
use std::path::Path;

use chrono::{Datelike, NaiveDateTime};

use super::filter::{DAY_OF_WEEK_COLUMN, FilterSelection, MONTH_COLUMN, apply_filters};
use super::model::{CellValue, START_TIME, TIMESTAMP_FORMAT, TripTable};
use crate::config::Config;
use crate::error::{BikeshareError, Result};

/// Accepted timestamp layouts, tried in order.
const TIMESTAMP_FORMATS: [&str; 4] = [
    TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the selected city's trips, derive `month` / `day_of_week` from
/// `Start Time`, and apply the month and day filters.
pub fn load_data(config: &Config, selection: &FilterSelection) -> Result<TripTable> {
    let path = config.data_path(selection.city);
    let mut table = read_csv(&path)?;
    log::info!("loaded {} trips from {}", table.len(), path.display());

    derive_time_columns(&mut table)?;
    apply_filters(&mut table, selection)?;
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read a trip file from disk. See [`read_csv_from`].
pub fn read_csv(path: &Path) -> Result<TripTable> {
    let file = File::open(path).map_err(|source| BikeshareError::DataFile {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_from(io::BufReader::new(file))
}

/// CSV layout: header row with column names, one trip per row.
/// Headers left empty (the exported row index) are named `Unnamed: <pos>`;
/// empty cells, and the missing tail of a short row, load as null.
/// A row longer than the header is an error.
pub fn read_csv_from<R: io::Read>(input: R) -> Result<TripTable> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim();
            if h.is_empty() {
                format!("Unnamed: {i}")
            } else {
                h.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result?;
        if record.len() > headers.len() {
            return Err(BikeshareError::RowLength {
                row: row_no,
                found: record.len(),
                expected: headers.len(),
            });
        }
        let mut cells: Vec<CellValue> = record.iter().map(guess_cell_type).collect();
        cells.resize(headers.len(), CellValue::Null);
        rows.push(cells);
    }

    Ok(TripTable::new(headers, rows))
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Timestamp columns
// ---------------------------------------------------------------------------

pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Convert every cell of `column` to a timestamp. Null cells stay null.
pub fn parse_timestamp_column(table: &mut TripTable, column: &str) -> Result<()> {
    table.map_column(column, |row, cell| match cell {
        CellValue::Timestamp(_) | CellValue::Null => Ok(cell.clone()),
        CellValue::String(s) => parse_timestamp(s)
            .map(CellValue::Timestamp)
            .ok_or_else(|| invalid(column, row, cell)),
        other => Err(invalid(column, row, other)),
    })
}

fn invalid(column: &str, row: usize, cell: &CellValue) -> BikeshareError {
    BikeshareError::InvalidValue {
        column: column.to_string(),
        row,
        value: cell.to_string(),
    }
}

/// Parse `Start Time` and append the derived `month` and `day_of_week` columns.
pub fn derive_time_columns(table: &mut TripTable) -> Result<()> {
    parse_timestamp_column(table, START_TIME)?;

    let (months, weekdays): (Vec<CellValue>, Vec<CellValue>) = table
        .column(START_TIME)?
        .map(|cell| match cell.as_timestamp() {
            Some(ts) => (
                CellValue::Integer(i64::from(ts.month())),
                CellValue::Integer(i64::from(ts.weekday().num_days_from_monday())),
            ),
            None => (CellValue::Null, CellValue::Null),
        })
        .unzip();

    table.set_column(MONTH_COLUMN, months);
    table.set_column(DAY_OF_WEEK_COLUMN, weekdays);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::config::City;

    const SAMPLE: &str = "\
,Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year
1,2017-01-02 09:07:57,2017-01-02 09:20:53,776,A,B,Subscriber,Male,1989.0
2,2017-03-07 18:10:01,2017-03-07 18:20:00,599,B,C,Customer,,
3,2017-03-13 07:00:00,2017-03-13 07:30:00,1800,A,C,Subscriber,Female,1992.0
";

    fn config_with(city: City, contents: &str) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(city.file_name()), contents).unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            pause: std::time::Duration::ZERO,
        };
        (dir, config)
    }

    #[test]
    fn empty_header_becomes_unnamed_and_empty_cells_null() {
        let table = read_csv_from(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.column_names[0], "Unnamed: 0");
        assert_eq!(table.len(), 3);
        assert!(table.rows[1][7].is_null());
        assert_eq!(table.rows[0][3], CellValue::Integer(776));
        assert_eq!(table.rows[0][8], CellValue::Float(1989.0));
    }

    #[test]
    fn derives_month_and_weekday() {
        let mut table = read_csv_from(SAMPLE.as_bytes()).unwrap();
        derive_time_columns(&mut table).unwrap();
        let months: Vec<_> = table.column(MONTH_COLUMN).unwrap().cloned().collect();
        let days: Vec<_> = table.column(DAY_OF_WEEK_COLUMN).unwrap().cloned().collect();
        assert_eq!(
            months,
            vec![CellValue::Integer(1), CellValue::Integer(3), CellValue::Integer(3)]
        );
        // 2017-01-02 Monday, 2017-03-07 Tuesday, 2017-03-13 Monday
        assert_eq!(
            days,
            vec![CellValue::Integer(0), CellValue::Integer(1), CellValue::Integer(0)]
        );
    }

    #[test]
    fn load_applies_month_and_day_filters() {
        let (_dir, config) = config_with(City::Chicago, SAMPLE);

        let sel = FilterSelection::new(City::Chicago, "march", "all").unwrap();
        let table = load_data(&config, &sel).unwrap();
        assert_eq!(table.len(), 2);

        let sel = FilterSelection::new(City::Chicago, "march", "monday").unwrap();
        let table = load_data(&config, &sel).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0], CellValue::Integer(3));

        let sel = FilterSelection::unfiltered(City::Chicago);
        assert_eq!(load_data(&config, &sel).unwrap().len(), 3);
    }

    #[test]
    fn missing_start_time_is_reported() {
        let (_dir, config) = config_with(City::Washington, "Trip Duration,User Type\n10,Customer\n");
        let err = load_data(&config, &FilterSelection::unfiltered(City::Washington)).unwrap_err();
        assert!(matches!(err, BikeshareError::MissingColumn(c) if c == START_TIME));
    }

    #[test]
    fn unparseable_timestamp_names_row_and_column() {
        let mut table = read_csv_from("Start Time\nyesterday\n".as_bytes()).unwrap();
        let err = derive_time_columns(&mut table).unwrap_err();
        assert!(matches!(err, BikeshareError::InvalidValue { row: 0, .. }));
    }

    #[test]
    fn missing_file_names_path() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            pause: std::time::Duration::ZERO,
        };
        let err = load_data(&config, &FilterSelection::unfiltered(City::Chicago)).unwrap_err();
        assert!(matches!(err, BikeshareError::DataFile { .. }));
    }

    #[test]
    fn short_rows_are_padded_with_null() {
        let table = read_csv_from(
            "Start Time,User Type,Gender,Birth Year\n\
             2017-01-02 09:07:57,Subscriber,Male,1989\n\
             2017-01-03 10:00:00,Customer\n"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1].len(), 4);
        assert!(table.rows[1][2].is_null());
        assert!(table.rows[1][3].is_null());
    }

    #[test]
    fn long_rows_are_rejected() {
        let err = read_csv_from("Start Time,User Type\na,b\nc,d,e\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            BikeshareError::RowLength {
                row: 1,
                found: 3,
                expected: 2
            }
        ));
    }

    #[test]
    fn blank_start_time_is_kept_and_skipped_by_filters() {
        let csv = SAMPLE.replace("2,2017-03-07 18:10:01,", "2,,");
        let mut table = read_csv_from(csv.as_bytes()).unwrap();
        derive_time_columns(&mut table).unwrap();
        assert!(table.rows[1][1].is_null());
        let months: Vec<_> = table.column(MONTH_COLUMN).unwrap().cloned().collect();
        assert_eq!(months[1], CellValue::Null);

        let (_dir, config) = config_with(City::Chicago, &csv);
        let sel = FilterSelection::new(City::Chicago, "march", "all").unwrap();
        let table = load_data(&config, &sel).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0], CellValue::Integer(3));
        assert_eq!(load_data(&config, &FilterSelection::unfiltered(City::Chicago)).unwrap().len(), 3);
    }

    #[test]
    fn accepts_fractional_and_iso_timestamps() {
        assert!(parse_timestamp("2017-06-30 23:59:59.123").is_some());
        assert!(parse_timestamp("2017-06-30T23:59:59").is_some());
        assert!(parse_timestamp("30/06/2017").is_none());
    }
}
