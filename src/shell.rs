use crate::command::{CommandFactory, ExitCode};
use crate::lexer;
use crate::session::Session;
use anyhow::Context;
use log::debug;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// Line-oriented front end over a [`Session`].
///
/// The shell owns the session it was given and a list of [`CommandFactory`]
/// objects that are queried to create commands by name. See [`Shell::with_session`]
/// for the commands included out of the box.
///
/// Example
/// ```
/// use student_records::Shell;
/// let mut sh = Shell::default();
/// let mut out = Vec::new();
/// let code = sh
///     .execute_line("add S001 \"Budi Santoso\" 10A", &mut std::io::empty(), &mut out)
///     .unwrap();
/// assert_eq!(code, 0);
/// assert_eq!(sh.session().students.len(), 1);
/// ```
pub struct Shell {
    session: Session,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Shell {
    /// Create a shell with a custom set of command factories.
    pub fn new(session: Session, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { session, commands }
    }

    /// Create a shell over `session` with every student command available.
    pub fn with_session(session: Session) -> Self {
        use crate::commands::*;
        Self::new(
            session,
            vec![
                Box::new(Factory::<Add>::default()),
                Box::new(Factory::<List>::default()),
                Box::new(Factory::<Find>::default()),
                Box::new(Factory::<Update>::default()),
                Box::new(Factory::<Remove>::default()),
                Box::new(Factory::<Grade>::default()),
                Box::new(Factory::<Top>::default()),
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Exit>::default()),
            ],
        )
    }

    /// The session this shell operates on.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Returns the command's exit code or an error if no command is registered
    /// under `name`.
    pub fn run(
        &mut self,
        name: &str,
        args: &[&str],
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                debug!("running {} {:?}", name, args);
                return cmd.execute(stdin, stdout, &mut self.session);
            }
        }
        Err(anyhow::anyhow!("unknown command: {}", name))
    }

    /// Split `line` into words and run it.
    ///
    /// Blank lines succeed without doing anything. Lexing errors and unknown
    /// commands are reported on `stdout` and yield exit code 1.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        let words = match lexer::split_into_words(line) {
            Ok(words) => words,
            Err(e) => {
                writeln!(stdout, "{}", e)?;
                return Ok(1);
            }
        };
        let Some((name, args)) = words.split_first() else {
            return Ok(0);
        };
        let args: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        match self.run(name, &args, stdin, stdout) {
            Ok(code) => Ok(code),
            Err(e) => {
                writeln!(stdout, "{} (type `help` for the list of commands)", e)?;
                Ok(1)
            }
        }
    }

    /// Execute every line of `input` until it is exhausted or `exit` runs.
    ///
    /// Commands that ask a question read the answer from the following line.
    /// Bytes that are not valid UTF-8 are replaced, so a garbled line fails on
    /// its own instead of ending the session.
    pub fn run_script(
        &mut self,
        input: &mut dyn BufRead,
        output: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let mut buf = Vec::new();
        while !self.session.should_exit {
            buf.clear();
            if input
                .read_until(b'\n', &mut buf)
                .context("failed to read input")?
                == 0
            {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.execute_line(&line, input, output)?;
        }
        Ok(())
    }

    /// Interactive Read-Eval-Print Loop on the terminal.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new().context("failed to initialise line editor")?;
        let mut stdout = io::stdout();

        if self.session.settings.banner {
            writeln!(stdout, "Welcome to the student grade manager!")?;
            writeln!(stdout, "Type `help` to see the available commands.")?;
        }

        while !self.session.should_exit {
            match rl.readline("students> ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    self.execute_line(&line, &mut io::stdin().lock(), &mut stdout)?;
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err).context("failed to read line"),
            }
        }

        Ok(())
    }
}

impl Default for Shell {
    /// A shell over a fresh session with default settings.
    fn default() -> Self {
        Self::with_session(Session::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn exec(sh: &mut Shell, line: &str) -> (ExitCode, String) {
        let mut out = Vec::new();
        let code = sh
            .execute_line(line, &mut Cursor::new(Vec::new()), &mut out)
            .unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_blank_line_is_noop() {
        let mut sh = Shell::default();
        assert_eq!(exec(&mut sh, "   \n"), (0, String::new()));
    }

    #[test]
    fn test_unknown_command() {
        let mut sh = Shell::default();
        let (code, out) = exec(&mut sh, "dance now");
        assert_eq!(code, 1);
        assert!(out.starts_with("unknown command: dance"));
    }

    #[test]
    fn test_unterminated_quote_is_reported() {
        let mut sh = Shell::default();
        let (code, out) = exec(&mut sh, "add S001 \"Budi 10A");
        assert_eq!(code, 1);
        assert_eq!(out, "unterminated quote\n");
        assert!(sh.session().students.is_empty());
    }

    #[test]
    fn test_quoted_name_is_single_argument() {
        let mut sh = Shell::default();
        let (code, _) = exec(&mut sh, "add S001 'Budi Santoso' 10A");
        assert_eq!(code, 0);
        assert_eq!(
            sh.session().students.find("S001").unwrap().name(),
            "Budi Santoso"
        );
    }

    #[test]
    fn test_run_with_custom_factories() {
        let factories: Vec<Box<dyn CommandFactory>> =
            vec![Box::new(Factory::<crate::commands::List>::default())];
        let mut sh = Shell::new(Session::default(), factories);

        let mut out = Vec::new();
        let code = sh
            .run("list", &[], &mut Cursor::new(Vec::new()), &mut out)
            .unwrap();
        assert_eq!(code, 0);
        assert!(
            sh.run("add", &["S1", "A", "B"], &mut Cursor::new(Vec::new()), &mut out)
                .is_err()
        );
    }

    #[test]
    fn test_run_script_stops_at_exit() {
        let mut sh = Shell::default();
        let mut input = Cursor::new(b"add S001 Budi 10A\nexit\nadd S002 Ani 10B\n".to_vec());
        let mut out = Vec::new();
        sh.run_script(&mut input, &mut out).unwrap();

        assert!(sh.session().should_exit);
        assert_eq!(sh.session().students.len(), 1);
    }

    #[test]
    fn test_run_script_survives_invalid_utf8() {
        let mut sh = Shell::default();
        let mut input = Cursor::new(b"add S1 Budi 10A\nfind \xff\xfe\nadd S2 Ani 10B\nlist\n".to_vec());
        let mut out = Vec::new();
        sh.run_script(&mut input, &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert_eq!(sh.session().students.len(), 2);
        assert!(out.contains("not found."));
        assert!(out.ends_with("Average : 0.00\n"));
    }
}
