//! Fixed lookup tables and runtime configuration.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{BikeshareError, Result};

// ---------------------------------------------------------------------------
// Lookup tables
// ---------------------------------------------------------------------------

/// Month options, "all" first so a month's position is its calendar number.
pub const MONTHS: [&str; 7] = [
    "all", "january", "february", "march", "april", "may", "june",
];

/// Weekday options, "all" first: a day's position minus one is its weekday
/// number counted from Monday = 0.
pub const WEEK_DAYS: [&str; 8] = [
    "all",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// The three cities with a trip-history file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name as typed at the prompt.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    /// Data file name inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }

    /// Option strings for prompting.
    pub fn names() -> Vec<&'static str> {
        City::ALL.iter().map(|c| c.name()).collect()
    }

    pub fn from_name(name: &str) -> Result<City> {
        let wanted = name.trim().to_lowercase();
        City::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| BikeshareError::InvalidUserInput {
                input: name.to_string(),
                expected: City::names().join(", "),
            })
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", title_case(self.name()))
    }
}

/// "new york city" -> "New York City".
pub fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Explore US bikeshare trip data interactively.
#[derive(Parser, Debug)]
#[command(name = "bikeshare-explorer")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long = "data-dir", env = "BIKESHARE_DATA_DIR", default_value = ".")]
    pub data_dir: PathBuf,

    /// Seconds to pause before each block of statistics (0 disables)
    #[arg(long = "pause", env = "BIKESHARE_PAUSE", default_value_t = 3.0)]
    pub pause: f64,

    /// Enable verbose logging (repeat for more)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Log filter matching the verbosity flag; `RUST_LOG` still wins.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Runtime settings for a session.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Cosmetic delay before echoing choices and before each report.
    pub pause: Duration,
}

impl Config {
    pub fn data_path(&self, city: City) -> PathBuf {
        self.data_dir.join(city.file_name())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            pause: Duration::from_secs(3),
        }
    }
}

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        Self {
            data_dir: args.data_dir.clone(),
            pause: Duration::try_from_secs_f64(args.pause).unwrap_or(Duration::ZERO),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn city_lookup_is_case_insensitive() {
        assert_eq!(City::from_name("New York City").unwrap(), City::NewYorkCity);
        assert_eq!(City::from_name(" washington ").unwrap(), City::Washington);
        assert!(matches!(
            City::from_name("boston"),
            Err(BikeshareError::InvalidUserInput { .. })
        ));
    }

    #[test]
    fn month_position_is_calendar_number() {
        assert_eq!(MONTHS.iter().position(|m| *m == "march"), Some(3));
        assert_eq!(WEEK_DAYS.iter().position(|d| *d == "monday"), Some(1));
    }

    #[test]
    fn title_case_each_word() {
        assert_eq!(title_case("new york city"), "New York City");
        assert_eq!(City::Chicago.to_string(), "Chicago");
    }

    #[test]
    fn args_defaults_and_negative_pause() {
        let args = Args::parse_from(["bikeshare-explorer", "--pause=-1"]);
        let config = Config::from(&args);
        assert_eq!(config.pause, Duration::ZERO);
        assert_eq!(config.data_path(City::Washington), PathBuf::from("./washington.csv"));

        let args = Args::parse_from(["bikeshare-explorer", "-vv"]);
        assert_eq!(args.log_filter(), "debug");
    }
}
