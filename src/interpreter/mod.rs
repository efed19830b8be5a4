mod cancel;
pub mod context;
pub mod error;

use crate::parser::{classify, StatementKind};
use crate::tokenizer::{Program, Statement, IMPORT_MARKER};
pub use cancel::CancellationToken;
pub use context::{BufferedConsole, StdioConsole};
use compact_str::{CompactString, ToCompactString};
use error::{RuntimeError, RuntimeErrorKind};
use std::collections::HashMap;

/// What a conditional reads for a variable that was never assigned.
const UNBOUND_DEFAULT: &str = "nothing";

/// Statements treated as language decoration and stepped over without
/// executing anything.
const DIRECTIVE_MARKERS: [&str; 3] = ["import", "int main()", "::"];

/// Abstract terminal collaborator driven by the engine.
///
/// A console may live on another thread than the engine; `write` must be
/// safe to call from the engine's thread of control, and `request_line`
/// blocks it until a line is committed. Cancellation unblocks a pending
/// request by delivering the empty sentinel.
pub trait Console {
    /// Appends `text` to the transcript, optionally styled as an error,
    /// optionally followed by a newline.
    fn write(&mut self, text: &str, is_error: bool, newline: bool);
    /// Empties the transcript. Called once at the start of every run.
    fn clear(&mut self);
    /// Echoes `prompt` without a newline, then blocks until a line is
    /// committed (or cancellation delivers the empty sentinel).
    fn request_line(&mut self, prompt: &str) -> String;
}

/// Outcome of executing one statement.
enum StepStatus {
    /// Fall through to the next statement.
    Continue,
    /// Jump over the brace-delimited block that follows.
    SkipBlock,
}

/// The Chalk++ execution engine.
///
/// Owns the variable store and the cancellation token. One run is active
/// at a time; the store is reset at the start of every run and discarded
/// at its end, so a failed run never leaks state into the next one.
pub struct Interpreter {
    variables: HashMap<CompactString, CompactString>,
    cancel: CancellationToken,
}

impl Interpreter {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Hands out the token a collaborator uses to stop the current run.
    /// The clone stays valid across runs.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Executes `program` to completion, cancellation or failure.
    ///
    /// All failures surface on the console as text; nothing propagates
    /// past the run boundary. A program without the `import chalk++`
    /// marker aborts before its first statement.
    pub fn run<C: Console>(&mut self, program: &Program, console: &mut C) {
        console.clear();
        self.variables.clear();
        self.cancel.arm();

        if !program.has_import_marker() {
            let message = format!("CRITICAL ERROR: '{IMPORT_MARKER}' missing!");
            console.write(&message, true, true);
            return;
        }

        if let Err(error) = self.dispatch(program, console) {
            console.write(&format!("ENGINE ERROR: {error}"), true, true);
        }
    }

    fn dispatch<C: Console>(
        &mut self,
        program: &Program,
        console: &mut C,
    ) -> Result<(), RuntimeError> {
        let mut cursor = 0;
        while cursor < program.len() && self.cancel.is_running() {
            let statement = program.get(cursor).expect("Cursor is bounds checked.");
            if DIRECTIVE_MARKERS.iter().any(|m| statement.text.contains(m)) {
                cursor += 1;
                continue;
            }
            if statement.text.contains("while true") {
                // The loop block is the tail of the program; there is no
                // break statement, so anything after it never executes.
                self.run_forever(program, cursor + 1, console)?;
                break;
            }
            if let StepStatus::SkipBlock = self.execute(statement, console)? {
                cursor = program.find_closing_brace(cursor);
            }
            cursor += 1;
        }
        Ok(())
    }

    /// Infinite-loop mode: rescans the block from `loop_start` until its
    /// terminating `}`, then starts the next iteration. Only cancellation
    /// gets out.
    fn run_forever<C: Console>(
        &mut self,
        program: &Program,
        loop_start: usize,
        console: &mut C,
    ) -> Result<(), RuntimeError> {
        while self.cancel.is_running() {
            let mut cursor = loop_start;
            while cursor < program.len() && self.cancel.is_running() {
                let statement = program.get(cursor).expect("Cursor is bounds checked.");
                if statement.text == "}" {
                    break;
                }
                if let StepStatus::SkipBlock = self.execute(statement, console)? {
                    cursor = program.find_closing_brace(cursor);
                }
                cursor += 1;
            }
        }
        Ok(())
    }

    fn execute<C: Console>(
        &mut self,
        statement: &Statement,
        console: &mut C,
    ) -> Result<StepStatus, RuntimeError> {
        let kind = classify(&statement.text).map_err(|kind| RuntimeError {
            kind: RuntimeErrorKind::from(kind),
            line: statement.line,
        })?;
        match kind {
            StatementKind::Input { target, prompt } => {
                let reply = console.request_line(&prompt);
                self.variables.insert(target, reply.to_compact_string());
                Ok(StepStatus::Continue)
            }
            StatementKind::Conditional { variable, expected } => {
                let current = self
                    .variables
                    .get(variable.as_str())
                    .map_or(UNBOUND_DEFAULT, CompactString::as_str)
                    .trim();
                if current.to_lowercase() == expected.to_lowercase() {
                    Ok(StepStatus::Continue)
                } else {
                    Ok(StepStatus::SkipBlock)
                }
            }
            StatementKind::Print { argument } => {
                let value = match self.variables.get(argument.as_str()) {
                    Some(bound) => bound.as_str(),
                    None => argument.trim_matches('"'),
                };
                console.write(value, false, true);
                Ok(StepStatus::Continue)
            }
            StatementKind::Assign { target, value } => {
                self.variables.insert(target, value);
                Ok(StepStatus::Continue)
            }
            StatementKind::NoOp => Ok(StepStatus::Continue),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
