/// Data layer: core types, loading, filtering and preparation.
///
/// Architecture:
/// ```text
///  chicago.csv / new_york_city.csv / washington.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TripTable, derive month / day_of_week
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  keep rows matching the month / day selection
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ preprocess │  fill nulls, parse End Time, Birth Year, Trip Id
///   └────────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod preprocess;
