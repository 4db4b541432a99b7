use std::{
    error::Error,
    fmt,
    io::{self, BufRead, Write},
    str::FromStr,
};

use log::{error, info};

use crate::{
    config::InvalidInputPolicy,
    session::Session,
    trainer::{IterationReport, TrainMode},
};

const MENU: &str = "1. Predict value\n2. Train model\n3. Predict during training\n-- q to close";

/// Errors that end the interactive loop.
#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    /// A selection or number could not be used and the policy is
    /// [`InvalidInputPolicy::Exit`].
    InvalidInput(String),
    /// The input ended under [`InvalidInputPolicy::Exit`].
    InputClosed,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "io error: {e}"),
            CliError::InvalidInput(input) => write!(f, "invalid input: {input:?}"),
            CliError::InputClosed => write!(f, "input closed"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::InvalidInput(_) | CliError::InputClosed => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// One entry of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Predict,
    Train,
    PredictDuringTraining,
}

impl FromStr for MenuOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Predict),
            "2" => Ok(Self::Train),
            "3" => Ok(Self::PredictDuringTraining),
            other => Err(other.to_string()),
        }
    }
}

enum Selection {
    Option(MenuOption),
    Quit,
    Invalid(String),
}

/// Menu-driven front end over a [`Session`].
///
/// Reads selections from `input` and writes prompts and results to
/// `output`. Per-iteration training details go to the log.
pub struct Cli<R, W> {
    input: R,
    output: W,
    session: Session,
    policy: InvalidInputPolicy,
}

impl<R: BufRead, W: Write> Cli<R, W> {
    /// Creates a new `Cli`.
    ///
    /// # Args
    /// * `input` - Where selections and numbers are read from.
    /// * `output` - Where the menu, prompts and results are written.
    /// * `session` - The session holding the dataset and model.
    /// * `policy` - How to react to unusable input.
    pub fn new(input: R, output: W, session: Session, policy: InvalidInputPolicy) -> Self {
        Self {
            input,
            output,
            session,
            policy,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the menu loop until the input ends or the user quits.
    ///
    /// Under [`InvalidInputPolicy::Exit`] anything but a menu option or a
    /// number ends the loop with an error, including `q` and end of input.
    ///
    /// # Errors
    /// Returns `CliError::Io` on read or write failures. Under
    /// [`InvalidInputPolicy::Exit`], returns `CliError::InvalidInput` for
    /// unusable input and `CliError::InputClosed` when the input ends.
    pub fn run(&mut self) -> Result<(), CliError> {
        let quits = self.policy == InvalidInputPolicy::Reprompt;

        loop {
            writeln!(self.output, "{MENU}")?;
            let selection = match self.prompt("Select option: ")? {
                None => {
                    self.input_closed()?;
                    break;
                }
                Some(line) => match line.trim() {
                    "q" | "quit" if quits => Selection::Quit,
                    other => match other.parse::<MenuOption>() {
                        Ok(option) => Selection::Option(option),
                        Err(input) => Selection::Invalid(input),
                    },
                },
            };

            let keep_going = match selection {
                Selection::Option(option) => self.dispatch(option)?,
                Selection::Quit => false,
                Selection::Invalid(input) => {
                    self.reject(input)?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        self.output.flush()?;
        Ok(())
    }

    /// Handles one menu selection. Returns `false` when the input has ended.
    fn dispatch(&mut self, option: MenuOption) -> Result<bool, CliError> {
        match option {
            MenuOption::Predict => {
                if self.session.model().is_none() {
                    writeln!(self.output, "\tTrain model first! Option no. 2")?;
                    return Ok(true);
                }

                let Some(x) = self.read_predictor()? else {
                    self.input_closed()?;
                    return Ok(false);
                };
                match self.session.predict(x) {
                    Ok(predicate) => {
                        info!(predicate = predicate; "predicate: {predicate}");
                        writeln!(self.output, "Prediction for {x}: {predicate}")?;
                    }
                    Err(e) => writeln!(self.output, "\t{e}")?,
                }
            }
            MenuOption::Train => self.train(TrainMode::Fit)?,
            MenuOption::PredictDuringTraining => {
                let Some(target) = self.read_predictor()? else {
                    self.input_closed()?;
                    return Ok(false);
                };
                self.train(TrainMode::FitAndPredict { target })?;
            }
        }

        Ok(true)
    }

    fn train(&mut self, mode: TrainMode) -> Result<(), CliError> {
        match self.session.train(mode) {
            Ok(reports) => self.summarize(&reports),
            Err(e) => {
                error!("training failed: {e}");
                writeln!(self.output, "\tTraining failed: {e}")?;
                Ok(())
            }
        }
    }

    fn summarize(&mut self, reports: &[IterationReport]) -> Result<(), CliError> {
        let Some(last) = reports.last() else {
            writeln!(self.output, "\tNot enough data to fit a line")?;
            return Ok(());
        };

        writeln!(
            self.output,
            "Trained over {} iteration(s): slope={} intercept={} R^2={}",
            reports.len(),
            last.model.slope,
            last.model.intercept,
            last.model.r_squared
        )?;
        if let Some(prediction) = last.prediction {
            writeln!(self.output, "Last prediction: {prediction}")?;
        }

        Ok(())
    }

    /// Reads an integer predictor, re-asking as the policy allows.
    /// `None` means the input has ended.
    fn read_predictor(&mut self) -> Result<Option<f64>, CliError> {
        loop {
            let Some(line) = self.prompt("Predict for: ")? else {
                return Ok(None);
            };

            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(Some(value as f64)),
                Err(_) => self.reject(line.trim().to_string())?,
            }
        }
    }

    fn reject(&mut self, input: String) -> Result<(), CliError> {
        match self.policy {
            InvalidInputPolicy::Reprompt => {
                writeln!(self.output, "\tInvalid input: {input:?}")?;
                Ok(())
            }
            InvalidInputPolicy::Exit => Err(CliError::InvalidInput(input)),
        }
    }

    fn input_closed(&self) -> Result<(), CliError> {
        match self.policy {
            InvalidInputPolicy::Reprompt => Ok(()),
            InvalidInputPolicy::Exit => Err(CliError::InputClosed),
        }
    }

    fn prompt(&mut self, message: &str) -> Result<Option<String>, CliError> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_menu_options() {
        assert_eq!("1".parse::<MenuOption>(), Ok(MenuOption::Predict));
        assert_eq!(" 2\n".parse::<MenuOption>(), Ok(MenuOption::Train));
        assert_eq!("3".parse::<MenuOption>(), Ok(MenuOption::PredictDuringTraining));
        assert_eq!("4".parse::<MenuOption>(), Err("4".to_string()));
    }
}
