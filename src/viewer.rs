use std::io::{BufRead, Write};

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::data::model::{CellValue, TripTable};
use crate::error::Result;
use crate::prompt::Prompter;

pub const PAGE_SIZE: usize = 5;

/// Walks a table five rows at a time.
#[derive(Debug, Default)]
pub struct RowPager {
    start: usize,
}

impl RowPager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next window of rows; empty once past the end.
    pub fn next_page<'t>(&mut self, table: &'t TripTable) -> &'t [Vec<CellValue>] {
        let page = table.slice(self.start, PAGE_SIZE);
        self.start += PAGE_SIZE;
        page
    }
}

/// One row as a `column -> value` map, keeping column order.
struct RowRecord<'a> {
    columns: &'a [String],
    cells: &'a [CellValue],
}

impl Serialize for RowRecord<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, cell) in self.columns.iter().zip(self.cells) {
            map.serialize_entry(column, cell)?;
        }
        map.end()
    }
}

/// Write each row of a page as a JSON record on its own line.
pub fn write_page<W: Write>(out: &mut W, table: &TripTable, page: &[Vec<CellValue>]) -> Result<()> {
    for cells in page {
        let record = RowRecord {
            columns: &table.column_names,
            cells,
        };
        serde_json::to_writer(&mut *out, &record).map_err(std::io::Error::from)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Offer raw rows five at a time until the user says no.
pub fn view_rows<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    table: &TripTable,
) -> Result<()> {
    writeln!(prompter.output(), "\nSelected data contains {} rows.", table.len())?;

    let mut pager = RowPager::new();
    let mut wants_more =
        prompter.confirm("\nWould you like to view first 5 rows of data? Enter yes or no: ")?;
    while wants_more {
        let page = pager.next_page(table);
        write_page(prompter.output(), table, page)?;
        wants_more =
            prompter.confirm("\nWould you like to view next 5 rows of data? Enter yes or no: ")?;
    }
    writeln!(prompter.output(), "{}", "-".repeat(70))?;
    Ok(())
}
