use crate::session::Session;
use anyhow::Result;
use std::io::{BufRead, Write};

/// Status reported by a command: 0 for success, non-zero for failure.
pub type ExitCode = i32;

/// Object-safe trait for anything the shell can execute.
///
/// `stdin` is where a command reads follow-up answers (e.g. a confirmation);
/// everything meant for the user goes to `stdout`.
pub trait ExecutableCommand {
    fn execute(
        self: Box<Self>,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`.
pub trait CommandFactory {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>>;
}
