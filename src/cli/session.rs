// ============================================================
// Layer 1 — Menu Session
// ============================================================
// The prompt loop. Each iteration:
//
//   1. print the menu (unless disabled)
//   2. read a selection
//   3. prompt for whatever the command needs (numbers, names)
//   4. hand a Request to the TrainOperator (Layer 2)
//   5. render the Outcome, or the error message
//
// Bad input and TrainErrors are reported and the loop goes on
// with the train untouched. Running out of input is treated
// like (Q). Only I/O failures end the session with an error.
//
// Generic over BufRead/Write so tests can drive it with
// in-memory buffers instead of a terminal.
//
// Reference: Rust Book §12 (I/O), §9 (Error Handling)

use std::io::{self, BufRead, Write};

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

use crate::application::operator::{Direction, Request, TrainOperator};
use crate::cli::commands::OutputFormat;
use crate::cli::menu::{MenuCommand, MENU};
use crate::cli::render::{renderer_for, Renderer};
use crate::domain::{error::TrainError, train::TrainLinkedList};

/// Session settings, built from the CLI arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionConfig {
    pub format:    OutputFormat,
    pub show_menu: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            format:    OutputFormat::Table,
            show_menu: true,
        }
    }
}

/// Why a single command could not be carried out
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Train(#[from] TrainError),

    #[error("Invalid input. Please only enter a number.")]
    InvalidNumber,

    #[error("{0}")]
    InputMismatch(String),

    /// Input ended in the middle of a command
    #[error("end of input")]
    EndOfInput,

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub struct TrainSession<R, W> {
    input:    R,
    output:   W,
    config:   SessionConfig,
    renderer: Box<dyn Renderer>,
    operator: TrainOperator,
}

impl<R: BufRead, W: Write> TrainSession<R, W> {
    pub fn new(input: R, output: W, config: SessionConfig) -> Self {
        Self {
            input,
            output,
            config,
            renderer: renderer_for(config.format),
            operator: TrainOperator::new(),
        }
    }

    /// Run until (Q) or end of input, then hand back the train.
    pub fn run(mut self) -> Result<TrainLinkedList> {
        tracing::info!("Session started ({:?} output)", self.config.format);
        tracing::debug!("Session config: {}", serde_json::to_string(&self.config)?);
        let mut handled = 0usize;

        loop {
            if self.config.show_menu {
                writeln!(self.output, "{MENU}")?;
            }

            let Some(selection) = self.prompt("Enter a selection: ")? else {
                break;
            };

            let Some(command) = MenuCommand::parse(&selection) else {
                writeln!(self.output, "Please only enter the following choices: \n")?;
                if !self.config.show_menu {
                    writeln!(self.output, "{MENU}")?;
                }
                continue;
            };

            if command == MenuCommand::Quit {
                writeln!(self.output, "Program terminating successfully...")?;
                break;
            }

            handled += 1;
            match self.handle(command) {
                Ok(()) => {}
                Err(CommandError::EndOfInput) => break,
                Err(CommandError::Io(e)) => return Err(e.into()),
                Err(e) => {
                    tracing::warn!("{:?} failed: {}", command, e);
                    self.renderer.error(&mut self.output, &e.to_string())?;
                }
            }
        }

        self.output.flush()?;
        tracing::info!(
            "Session ended after {} commands; train has {} cars",
            handled,
            self.operator.train().size()
        );
        Ok(self.operator.into_train())
    }

    /// Gather the command's input, execute it and render the outcome.
    fn handle(&mut self, command: MenuCommand) -> Result<(), CommandError> {
        tracing::debug!("Menu selection {:?}", command);

        let request = match command {
            MenuCommand::Forward  => Request::MoveCursor(Direction::Forward),
            MenuCommand::Backward => Request::MoveCursor(Direction::Backward),

            MenuCommand::Insert => {
                let length = self.prompt_number("Enter car length in meters: ")?;
                let weight = self.prompt_number("Enter car weight in tons: ")?;
                Request::InsertCar { length, weight }
            }

            MenuCommand::Remove => Request::RemoveCar,

            MenuCommand::SetLoad => {
                // Checked up front so the user isn't asked four questions for nothing
                if self.operator.train().is_empty() {
                    return Err(TrainError::EmptyList("Please insert a train car first.".into()).into());
                }
                let name      = self.prompt_line("Enter product name: ")?;
                let weight    = self.prompt_number("Enter product weight in tons: ")?;
                let value     = self.prompt_number("Enter product value in dollar: ")?;
                let dangerous = self.prompt_yes_no("Enter is product dangerous? (y/n): ")?;
                Request::SetLoad { name, weight, value, dangerous }
            }

            MenuCommand::Search => Request::FindProduct {
                name: self.prompt_line("Enter product name: ")?,
            },

            MenuCommand::ShowTrain       => Request::ShowTrain,
            MenuCommand::ShowManifest    => Request::ShowManifest,
            MenuCommand::RemoveDangerous => Request::RemoveDangerousCars,

            // Handled by the loop
            MenuCommand::Quit => return Ok(()),
        };

        let outcome = self.operator.execute(request)?;
        self.renderer.render(&mut self.output, &outcome)?;
        Ok(())
    }

    /// Print `text` and read one line without its line ending.
    /// `None` once the input is exhausted.
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn prompt_line(&mut self, text: &str) -> Result<String, CommandError> {
        self.prompt(text)?.ok_or(CommandError::EndOfInput)
    }

    fn prompt_number(&mut self, text: &str) -> Result<f64, CommandError> {
        self.prompt_line(text)?
            .trim()
            .parse()
            .map_err(|_| CommandError::InvalidNumber)
    }

    fn prompt_yes_no(&mut self, text: &str) -> Result<bool, CommandError> {
        match self.prompt_line(text)?.trim() {
            "y" | "Y" => Ok(true),
            "n" | "N" => Ok(false),
            _ => Err(CommandError::InputMismatch(
                "Invalid input. Please only enter [y|n].".to_string(),
            )),
        }
    }
}
