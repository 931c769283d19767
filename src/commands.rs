use crate::collection::StudentPatch;
use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::error::{CollectionError, ValidationError};
use crate::session::Session;
use crate::shell::Factory;
use crate::student::Student;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};
use std::io::{BufRead, Write};

/// Commands known to the shell at compile time.
///
/// Commands are parsed using the [`argh`] crate (`FromArgs`) and run against
/// the session in-process.
pub(crate) trait MenuCommand: Sized + FromArgs {
    /// Names the command answers to; the first one is canonical.
    fn names() -> &'static [&'static str];

    /// Whether `args` should be read as positionals only, so that values such as
    /// `-5` are not mistaken for flags.
    fn positionals_only(_args: &[&str]) -> bool {
        false
    }

    /// Runs the command. Returns 0 on success and 1 when the request was refused.
    fn execute(
        self,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode>;
}

impl<T: MenuCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        match <T as MenuCommand>::execute(*self, stdin, stdout, session) {
            Ok(x) => Ok(x),
            Err(e) => {
                writeln!(stdout, "{:#}", e)?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        _session: &mut Session,
    ) -> Result<ExitCode> {
        writeln!(stdout, "{}", self.output.trim_end())?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: MenuCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if T::names().contains(&name) {
            let parsed = if T::positionals_only(args) {
                let mut all = Vec::with_capacity(args.len() + 1);
                all.push("--");
                all.extend_from_slice(args);
                T::from_args(&[name], &all)
            } else {
                T::from_args(&[name], args)
            };
            Some(match parsed {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

/// Text printed by `help`.
pub const MENU: &str = "\
=================================
STUDENT GRADE MANAGEMENT
=================================
add <id> <name> <class>        register a new student
list                           show all students
find <id>                      show one student
update <id> [--name N] [--class C]
                               change name and/or class
remove <id> [-y]               delete a student
grade <id> <subject> <score>   record a score (0-100)
top [-n N]                     show the best students
help                           show this menu
exit                           leave the program
=================================
Quote values containing spaces, e.g. add S001 \"Budi Santoso\" 10A";

fn not_found(stdout: &mut dyn Write, id: &str) -> Result<ExitCode> {
    writeln!(stdout, "Student with ID \"{}\" not found.", id.trim())?;
    Ok(1)
}

#[derive(FromArgs)]
/// register a new student with an empty grade list.
pub struct Add {
    #[argh(positional)]
    /// unique student id.
    pub id: String,
    #[argh(positional)]
    /// full name; quote it when it contains spaces.
    pub name: String,
    #[argh(positional)]
    /// class label, e.g. 10A.
    pub class: String,
}

impl MenuCommand for Add {
    fn names() -> &'static [&'static str] {
        &["add"]
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        if session.students.find(&self.id).is_some() {
            writeln!(
                stdout,
                "Failed: student with ID \"{}\" is already registered.",
                self.id.trim()
            )?;
            return Ok(1);
        }
        let student = match Student::new(&self.id, &self.name, &self.class) {
            Ok(s) => s,
            Err(e) => {
                writeln!(stdout, "Failed: {}.", e)?;
                return Ok(1);
            }
        };
        match session.students.add(student) {
            Ok(()) => {
                writeln!(stdout, "Student added.")?;
                Ok(0)
            }
            Err(e) => {
                writeln!(stdout, "Failed: {}.", e)?;
                Ok(1)
            }
        }
    }
}

#[derive(FromArgs)]
/// show every student in registration order.
pub struct List {}

impl MenuCommand for List {
    fn names() -> &'static [&'static str] {
        &["list"]
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        let all = session.students.all();
        if all.is_empty() {
            writeln!(stdout, "No students yet.")?;
            return Ok(0);
        }
        for (i, student) in all.iter().enumerate() {
            if i > 0 {
                writeln!(stdout)?;
            }
            writeln!(stdout, "{}", student)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// show a single student.
pub struct Find {
    #[argh(positional)]
    /// id of the student to look up.
    pub id: String,
}

impl MenuCommand for Find {
    fn names() -> &'static [&'static str] {
        &["find"]
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        match session.students.find(&self.id) {
            Some(student) => {
                writeln!(stdout, "{}", student)?;
                Ok(0)
            }
            None => not_found(stdout, &self.id),
        }
    }
}

#[derive(FromArgs)]
/// change the name and/or class of a student.
pub struct Update {
    #[argh(positional)]
    /// id of the student to change.
    pub id: String,
    #[argh(option)]
    /// new name.
    pub name: Option<String>,
    #[argh(option)]
    /// new class label.
    pub class: Option<String>,
}

impl MenuCommand for Update {
    fn names() -> &'static [&'static str] {
        &["update"]
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        if session.students.find(&self.id).is_none() {
            return not_found(stdout, &self.id);
        }
        let patch = StudentPatch {
            name: self.name,
            class: self.class,
        };
        if patch.is_empty() {
            writeln!(stdout, "No changes.")?;
            return Ok(0);
        }
        match session.students.update(&self.id, &patch) {
            Ok(()) => {
                writeln!(stdout, "Student updated.")?;
                Ok(0)
            }
            Err(CollectionError::NotFound(_)) => not_found(stdout, &self.id),
            Err(e) => {
                writeln!(stdout, "Failed: {}.", e)?;
                Ok(1)
            }
        }
    }
}

#[derive(FromArgs)]
/// delete a student after confirmation.
pub struct Remove {
    #[argh(positional)]
    /// id of the student to delete.
    pub id: String,
    #[argh(switch, short = 'y')]
    /// do not ask for confirmation.
    pub yes: bool,
}

impl Remove {
    fn confirmed(stdin: &mut dyn BufRead, stdout: &mut dyn Write) -> Result<bool> {
        write!(stdout, "Remove this student? (y/n): ")?;
        stdout.flush()?;
        let mut answer = Vec::new();
        stdin.read_until(b'\n', &mut answer)?;
        Ok(String::from_utf8_lossy(&answer)
            .trim()
            .eq_ignore_ascii_case("y"))
    }
}

impl MenuCommand for Remove {
    fn names() -> &'static [&'static str] {
        &["remove"]
    }

    fn execute(
        self,
        stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        let Some(student) = session.students.find(&self.id) else {
            return not_found(stdout, &self.id);
        };
        if !self.yes {
            writeln!(stdout, "{}", student)?;
            if !Self::confirmed(stdin, stdout)? {
                writeln!(stdout, "Removal cancelled.")?;
                return Ok(1);
            }
        }
        match session.students.remove(&self.id) {
            Ok(_) => {
                writeln!(stdout, "Student removed.")?;
                Ok(0)
            }
            Err(_) => not_found(stdout, &self.id),
        }
    }
}

#[derive(FromArgs)]
/// record or overwrite a score for one subject.
pub struct Grade {
    #[argh(positional)]
    /// id of the student.
    pub id: String,
    #[argh(positional)]
    /// subject name (case-sensitive).
    pub subject: String,
    #[argh(positional)]
    /// score between 0 and 100.
    pub score: String,
}

impl Grade {
    fn parse_score(&self) -> Result<f64, ValidationError> {
        self.score
            .trim()
            .parse()
            .map_err(|_| ValidationError::NotANumber {
                value: self.score.trim().to_string(),
            })
    }
}

impl MenuCommand for Grade {
    fn names() -> &'static [&'static str] {
        &["grade"]
    }

    fn positionals_only(args: &[&str]) -> bool {
        args.iter()
            .any(|a| a.starts_with('-') && a.parse::<f64>().is_ok())
            && !args.contains(&"--")
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        let score = match self.parse_score() {
            Ok(score) => score,
            Err(e) => {
                writeln!(stdout, "Invalid grade: {}.", e)?;
                return Ok(1);
            }
        };
        match session.students.add_grade(&self.id, &self.subject, score) {
            Ok(()) => {
                writeln!(stdout, "Score for \"{}\" saved.", self.subject.trim())?;
                Ok(0)
            }
            Err(CollectionError::NotFound(_)) => not_found(stdout, &self.id),
            Err(e) => {
                writeln!(stdout, "Invalid grade: {}.", e)?;
                Ok(1)
            }
        }
    }
}

#[derive(FromArgs)]
/// show the students with the highest average.
pub struct Top {
    #[argh(option, short = 'n')]
    /// how many students to show; defaults to the configured count.
    pub count: Option<usize>,
}

impl MenuCommand for Top {
    fn names() -> &'static [&'static str] {
        &["top"]
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        if session.students.is_empty() {
            writeln!(stdout, "No students yet.")?;
            return Ok(0);
        }
        let count = self.count.unwrap_or(session.settings.top_count);
        let ranked = session.students.top(count);
        for (i, student) in ranked.iter().enumerate() {
            if i > 0 {
                writeln!(stdout)?;
            }
            writeln!(stdout, "Rank {}:", i + 1)?;
            writeln!(stdout, "{}", student)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// list the available commands.
pub struct Help {}

impl MenuCommand for Help {
    fn names() -> &'static [&'static str] {
        &["help", "menu"]
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        stdout: &mut dyn Write,
        _session: &mut Session,
    ) -> Result<ExitCode> {
        writeln!(stdout, "{}", MENU)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// leave the program.
pub struct Exit {}

impl MenuCommand for Exit {
    fn names() -> &'static [&'static str] {
        &["exit", "quit"]
    }

    fn execute(
        self,
        _stdin: &mut dyn BufRead,
        _stdout: &mut dyn Write,
        session: &mut Session,
    ) -> Result<ExitCode> {
        session.should_exit = true;
        Ok(0)
    }
}
