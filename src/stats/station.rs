use std::fmt;

use super::{Report, mode};
use crate::data::model::{END_STATION, START_STATION, TripTable};
use crate::error::Result;

const ROUTE_SEPARATOR: &str = " : ";

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationStats {
    pub start_station: String,
    pub end_station: String,
    /// `(start, end)` of the most frequent route.
    pub route: (String, String),
}

impl Report for StationStats {
    const HEADING: &'static str = "Calculating The Most Popular Stations and Trip...";

    fn compute(table: &TripTable) -> Result<Self> {
        let starts: Vec<String> = table.column(START_STATION)?.map(|c| c.to_string()).collect();
        let ends: Vec<String> = table.column(END_STATION)?.map(|c| c.to_string()).collect();

        let routes = starts
            .iter()
            .zip(&ends)
            .map(|(s, e)| format!("{s}{ROUTE_SEPARATOR}{e}"));
        let route = mode(routes, "routes")?;
        let route = match route.split_once(ROUTE_SEPARATOR) {
            Some((s, e)) => (s.to_string(), e.to_string()),
            None => (route, String::new()),
        };

        Ok(StationStats {
            start_station: mode(starts, "start stations")?,
            end_station: mode(ends, "end stations")?,
            route,
        })
    }
}

impl fmt::Display for StationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Most popular Start Station was {}", self.start_station)?;
        writeln!(f, "Most popular End Station was {}", self.end_station)?;
        writeln!(
            f,
            "Most popular Route was {} to {}",
            self.route.0, self.route.1
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::read_csv_from;
    use crate::error::BikeshareError;

    #[test]
    fn most_popular_stations_and_route() {
        let t = read_csv_from(
            "Start Station,End Station\n\
             Canal St,Clark St\n\
             Canal St,Lake Shore Dr\n\
             Lake Shore Dr,Clark St\n\
             Lake Shore Dr,Clark St\n\
             Canal St,Wells St\n"
                .as_bytes(),
        )
        .unwrap();
        let stats = StationStats::compute(&t).unwrap();
        assert_eq!(stats.start_station, "Canal St");
        assert_eq!(stats.end_station, "Clark St");
        assert_eq!(stats.route, ("Lake Shore Dr".to_string(), "Clark St".to_string()));
        assert!(stats
            .to_string()
            .contains("Most popular Route was Lake Shore Dr to Clark St"));
    }

    #[test]
    fn missing_end_station_is_reported() {
        let t = read_csv_from("Start Station\nA\n".as_bytes()).unwrap();
        assert!(matches!(
            StationStats::compute(&t),
            Err(BikeshareError::MissingColumn(c)) if c == END_STATION
        ));
    }
}
