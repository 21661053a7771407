//! Console prompts and the filter collector.

use std::io::{self, BufRead, Write};

use crate::config::{City, MONTHS, WEEK_DAYS};
use crate::data::filter::FilterSelection;
use crate::error::{BikeshareError, Result};

const FILTER_KINDS: [&str; 4] = ["month", "day", "both", "none"];
const YES_NO: [&str; 2] = ["yes", "no"];

/// Line-oriented prompts over any reader / writer pair, so sessions can be
/// scripted in tests.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Prompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Where report text goes.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one trimmed, lower-cased line.
    ///
    /// End of input is an error: the caller would otherwise re-prompt forever.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(BikeshareError::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        Ok(line.trim().to_lowercase())
    }

    /// Ask until the answer is one of `options`.
    pub fn choose(&mut self, prompt: &str, options: &[&str]) -> Result<String> {
        let mut answer = self.ask(prompt)?;
        while !options.contains(&answer.as_str()) {
            log::debug!("rejected answer {answer:?}");
            let retry = format!(
                "Invalid Input. Please enter one of the following ; {}: ",
                options.join(", ")
            );
            answer = self.ask(&retry)?;
        }
        Ok(answer)
    }

    /// Yes/no question; re-prompts on anything else.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.choose(prompt, &YES_NO)? == "yes")
    }
}

// ---------------------------------------------------------------------------
// Filter collector
// ---------------------------------------------------------------------------

/// Ask for a city, which dimensions to filter on, then the month and/or day.
/// Dimensions the user does not filter on are "all".
pub fn collect_filters<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<FilterSelection> {
    writeln!(prompter.output(), "Hello! Let's explore some US bikeshare data!")?;

    let city = prompter.choose(
        "\nEnter the City (chicago, new york city, washington): ",
        &City::names(),
    )?;
    let city = City::from_name(&city)?;

    let kind = prompter.choose(
        "\nWould you like to filter by month, day, both or none: ",
        &FILTER_KINDS,
    )?;
    let (by_month, by_day) = match kind.as_str() {
        "month" => (true, false),
        "day" => (false, true),
        "both" => (true, true),
        _ => return Ok(FilterSelection::unfiltered(city)),
    };

    let month = if by_month {
        prompter.choose(
            "\nEnter the month (all, january, february, ... , june): ",
            &MONTHS,
        )?
    } else {
        "all".to_string()
    };

    let day = if by_day {
        prompter.choose(
            "\nEnter the day of week (all, monday, tuesday, ... sunday): ",
            &WEEK_DAYS,
        )?
    } else {
        "all".to_string()
    };

    FilterSelection::new(city, &month, &day)
}
