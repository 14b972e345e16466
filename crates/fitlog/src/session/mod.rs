//! Interactive session loop.
//!
//! A [`Session`] presents the menu, gathers input for new activities and
//! prints the summary. It reads from any [`BufRead`] and writes to any
//! [`Write`], so tests drive it with in-memory buffers.
//!
//! Every state returns to the menu except exit. Running out of input is
//! treated like choosing exit.

mod input;

use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use tracing::debug;

use crate::activity::Activity;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::storage::{LoadOutcome, Store};

pub use input::{parse_positive, InputError};

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Log a new activity.
    Add,
    /// Print every activity and the totals.
    Summary,
    /// Leave the program.
    Exit,
}

impl MenuChoice {
    /// Match a typed choice. Only the exact strings `1`, `2` and `3` count.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        match input {
            "1" => Some(Self::Add),
            "2" => Some(Self::Summary),
            "3" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// The interactive menu bound to a store.
#[derive(Debug)]
pub struct Session<R, W, C = SystemClock> {
    store: Store,
    input: R,
    output: W,
    clock: C,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session stamping activities with the system date.
    pub fn new(store: Store, input: R, output: W) -> Self {
        Self::with_clock(store, input, output, SystemClock)
    }
}

impl<R: BufRead, W: Write, C: Clock> Session<R, W, C> {
    /// Create a session with a custom date source.
    pub fn with_clock(store: Store, input: R, output: W, clock: C) -> Self {
        Self {
            store,
            input,
            output,
            clock,
        }
    }

    /// The store this session appends to.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Tear down the session, handing back the store and output.
    pub fn into_parts(self) -> (Store, W) {
        (self.store, self.output)
    }

    /// Tell the user how opening the store went.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn report_load(&mut self, outcome: &LoadOutcome) -> Result<()> {
        let path = self.store.path().display();
        match outcome {
            LoadOutcome::Missing => {
                writeln!(self.output, "[{path}] not found. Starting with empty data.")?;
            }
            LoadOutcome::Loaded { skipped, .. } => {
                for row in skipped {
                    writeln!(self.output, "Skipping invalid data row: {row}")?;
                }
            }
            LoadOutcome::Failed(e) => {
                writeln!(self.output, "Error reading file [{path}]: {e}")?;
            }
        }
        Ok(())
    }

    /// Run the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if the terminal itself fails. Store failures are
    /// reported to the user and the loop continues.
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "\n1. Add Activity")?;
            writeln!(self.output, "2. View Summary")?;
            writeln!(self.output, "3. Exit")?;

            let Some(choice) = self.prompt("Enter your choice: ")? else {
                debug!("Input closed at menu");
                break;
            };

            match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => {
                    if self.add_activity()?.is_break() {
                        break;
                    }
                }
                Some(MenuChoice::Summary) => self.view_summary()?,
                Some(MenuChoice::Exit) => break,
                None => {
                    debug!("Unrecognized menu choice {choice:?}");
                    writeln!(self.output, "Invalid choice. Please enter 1, 2, or 3.")?;
                }
            }
        }

        writeln!(self.output, "Goodbye!")?;
        self.output.flush()?;
        Ok(())
    }

    /// Prompt for a new activity and append it to the store.
    ///
    /// Duration and calories are asked for as a pair; if either is not a
    /// positive integer the pair starts over from duration. Returns
    /// [`ControlFlow::Break`] if input ends before the activity is complete.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output or reading input fails.
    pub fn add_activity(&mut self) -> Result<ControlFlow<()>> {
        let Some(activity_type) = self.prompt("Enter activity type: ")? else {
            return Ok(ControlFlow::Break(()));
        };

        let (duration, calories) = loop {
            let Some(duration) = self.prompt_positive("Enter duration in minutes: ")? else {
                return Ok(ControlFlow::Break(()));
            };
            let Ok(duration) = duration else { continue };

            let Some(calories) = self.prompt_positive("Enter calories burned: ")? else {
                return Ok(ControlFlow::Break(()));
            };
            let Ok(calories) = calories else { continue };

            break (duration, calories);
        };

        let activity = Activity::new(&self.clock, activity_type, duration, calories);
        match self.store.append(activity) {
            Ok(()) => writeln!(self.output, "Data saved successfully.")?,
            Err(e) => writeln!(
                self.output,
                "Error saving file [{}]: {e}",
                self.store.path().display()
            )?,
        }

        Ok(ControlFlow::Continue(()))
    }

    /// Print every activity followed by the totals.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn view_summary(&mut self) -> Result<()> {
        let summary = self.store.summary();
        debug!("Summarizing {} activities", summary.count());
        write!(self.output, "{summary}")?;
        Ok(())
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        Ok(input::prompt(&mut self.input, &mut self.output, message)?)
    }

    /// Ask for one positive number, telling the user when it is refused.
    fn prompt_positive(
        &mut self,
        message: &str,
    ) -> Result<Option<std::result::Result<i64, InputError>>> {
        let Some(text) = self.prompt(message)? else {
            return Ok(None);
        };

        let parsed = parse_positive(&text);
        if let Err(e) = &parsed {
            writeln!(self.output, "Invalid input: {e}. Please enter numeric values.")?;
        }
        Ok(Some(parsed))
    }
}
