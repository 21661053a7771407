use std::io::{BufRead, Write};
use std::thread;
use std::time::Instant;

use crate::config::Config;
use crate::data::loader::load_data;
use crate::data::model::TripTable;
use crate::data::preprocess::preprocess;
use crate::error::Result;
use crate::prompt::{Prompter, collect_filters};
use crate::stats::{DurationStats, Report, StationStats, TimeStats, UserStats};
use crate::viewer::view_rows;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One interactive run: filter, load, report, view, repeat.
pub struct Session<R, W> {
    config: Config,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: Config, prompter: Prompter<R, W>) -> Self {
        Self { config, prompter }
    }

    #[cfg(test)]
    pub fn into_prompter(self) -> Prompter<R, W> {
        self.prompter
    }

    /// Loop until the user declines to restart.
    ///
    /// Stage failures are printed and the iteration moves on; only console
    /// I/O errors end the session with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.run_once()?;
            if !self.restart()? {
                return Ok(());
            }
        }
    }

    fn run_once(&mut self) -> Result<()> {
        let selection = collect_filters(&mut self.prompter)?;

        let out = self.prompter.output();
        writeln!(out, "{}", "-".repeat(70))?;
        writeln!(
            out,
            "\nYour choices for viewing statistics are \n{selection}\nIf incorrect, restart the program now by pressing ctrl+c. Else do nothing"
        )?;
        writeln!(out, "{}", "-".repeat(70))?;
        out.flush()?;
        self.pause();

        let table = match load_data(&self.config, &selection)
            .and_then(|table| preprocess(table, selection.city))
        {
            Ok(table) => table,
            Err(e) => {
                log::error!("could not prepare {} data: {e}", selection.city);
                writeln!(self.prompter.output(), "\nRaised Error: {e}")?;
                return Ok(());
            }
        };
        if table.is_empty() {
            log::warn!(
                "no {} trips match month={} day={}",
                selection.city,
                selection.month(),
                selection.day()
            );
        }

        self.report::<TimeStats>(&table)?;
        self.report::<StationStats>(&table)?;
        self.report::<DurationStats>(&table)?;
        self.report::<UserStats>(&table)?;

        view_rows(&mut self.prompter, &table)
    }

    /// Compute and print one block of statistics, or the reason it failed.
    fn report<T: Report>(&mut self, table: &TripTable) -> Result<()> {
        writeln!(self.prompter.output(), "\n{}\n", T::HEADING)?;
        self.prompter.output().flush()?;
        self.pause();

        let started = Instant::now();
        let result = T::compute(table);
        let elapsed = started.elapsed();
        log::debug!("{} took {elapsed:?}", T::HEADING);

        let out = self.prompter.output();
        match result {
            Ok(stats) => write!(out, "{stats}")?,
            Err(e) => {
                log::warn!("report failed: {e}");
                writeln!(out, "Raised Error: {e}")?;
            }
        }
        writeln!(out, "\nThis took {} seconds.", elapsed.as_secs_f64())?;
        writeln!(out, "{}", "-".repeat(40))?;
        Ok(())
    }

    fn restart(&mut self) -> Result<bool> {
        let answer = self
            .prompter
            .ask("\nWould you like to restart? Enter yes or no.\n")?;
        Ok(answer == "yes")
    }

    fn pause(&self) {
        if !self.config.pause.is_zero() {
            thread::sleep(self.config.pause);
        }
    }
}
