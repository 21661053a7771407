//! Writes synthetic `chicago.csv`, `new_york_city.csv` and `washington.csv`
//! in the three trip-history layouts.
//!
//! Usage: `generate_sample [OUT_DIR] [ROWS]`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, n)`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

struct CityLayout {
    file_name: &'static str,
    stations: &'static [&'static str],
    user_types: &'static [&'static str],
    /// Chicago and New York City carry Gender and Birth Year.
    demographics: bool,
    /// Washington records fractional durations.
    fractional_durations: bool,
}

const LAYOUTS: [CityLayout; 3] = [
    CityLayout {
        file_name: "chicago.csv",
        stations: &[
            "Streeter Dr & Grand Ave",
            "Lake Shore Dr & Monroe St",
            "Clinton St & Washington Blvd",
            "Canal St & Adams St",
            "Michigan Ave & Oak St",
        ],
        user_types: &["Subscriber", "Subscriber", "Subscriber", "Customer"],
        demographics: true,
        fractional_durations: false,
    },
    CityLayout {
        file_name: "new_york_city.csv",
        stations: &[
            "Pershing Square North",
            "E 17 St & Broadway",
            "W 21 St & 6 Ave",
            "West St & Chambers St",
            "Broadway & E 22 St",
        ],
        user_types: &["Subscriber", "Subscriber", "Customer"],
        demographics: true,
        fractional_durations: false,
    },
    CityLayout {
        file_name: "washington.csv",
        stations: &[
            "Columbus Circle / Union Station",
            "Lincoln Memorial",
            "Jefferson Dr & 14th St SW",
            "Massachusetts Ave & Dupont Circle NW",
            "15th & P St NW",
        ],
        user_types: &["Subscriber", "Customer"],
        demographics: false,
        fractional_durations: true,
    },
];

/// Commute-heavy start hours.
const HOURS: [u32; 12] = [7, 8, 8, 9, 12, 13, 16, 17, 17, 17, 18, 22];

fn random_start(rng: &mut SimpleRng, first_day: NaiveDate) -> Result<NaiveDateTime> {
    // 2017-01-01 ..= 2017-06-30
    let day = first_day + Duration::days(rng.below(181) as i64);
    let hour = *rng.pick(&HOURS);
    let minute = rng.below(60) as u32;
    let second = rng.below(60) as u32;
    day.and_hms_opt(hour, minute, second)
        .context("building start time")
}

fn write_city(layout: &CityLayout, out_dir: &Path, rows: usize, rng: &mut SimpleRng) -> Result<PathBuf> {
    let first_day = NaiveDate::from_ymd_opt(2017, 1, 1).context("building first day")?;
    let path = out_dir.join(layout.file_name);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec![
        "",
        "Start Time",
        "End Time",
        "Trip Duration",
        "Start Station",
        "End Station",
        "User Type",
    ];
    if layout.demographics {
        header.extend(["Gender", "Birth Year"]);
    }
    writer.write_record(&header)?;

    for row_id in 0..rows {
        let start = random_start(rng, first_day)?;
        let millis = 60_000 + rng.below(3_540_000) as i64;
        let end = start + Duration::milliseconds(millis);
        let duration = if layout.fractional_durations {
            format!("{:.3}", millis as f64 / 1000.0)
        } else {
            (millis / 1000).to_string()
        };

        let mut record = vec![
            (row_id * 7 + rng.below(7) as usize).to_string(),
            start.format(TIMESTAMP_FORMAT).to_string(),
            end.format(TIMESTAMP_FORMAT).to_string(),
            duration,
            rng.pick(layout.stations).to_string(),
            rng.pick(layout.stations).to_string(),
            rng.pick(layout.user_types).to_string(),
        ];
        if layout.demographics {
            // roughly one in ten riders leaves gender / birth year blank
            if rng.below(10) == 0 {
                record.extend([String::new(), String::new()]);
            } else {
                let gender = if rng.below(3) == 0 { "Female" } else { "Male" };
                let year = 1940 + rng.below(62);
                record.extend([gender.to_string(), format!("{year}.0")]);
            }
        }
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(path)
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("invalid row count '{n}'"))?,
        None => 1000,
    };

    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    for layout in &LAYOUTS {
        let path = write_city(layout, &out_dir, rows, &mut rng)?;
        log::info!("wrote {}", path.display());
        println!("Wrote {rows} trips to {}", path.display());
    }
    Ok(())
}
