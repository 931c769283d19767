use anyhow::{Context, Result};
use argh::FromArgs;
use log::{LevelFilter, info};
use std::io::{self, IsTerminal};
use student_records::{DEFAULT_TOP_COUNT, Session, Settings, Shell};

#[derive(FromArgs)]
/// Manage student records and grades from an interactive prompt.
/// When standard input is not a terminal, commands are read from it line by line.
struct Args {
    #[argh(option, default = "DEFAULT_TOP_COUNT")]
    /// number of students shown by `top` when no count is given.
    top: usize,

    #[argh(option, default = "LevelFilter::Warn")]
    /// log level written to stderr: off, error, warn, info, debug or trace.
    log_level: LevelFilter,

    #[argh(switch)]
    /// do not print the welcome banner.
    no_banner: bool,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .init();

    let session = Session::new(Settings {
        top_count: args.top,
        banner: !args.no_banner,
    });
    let mut shell = Shell::with_session(session);

    if io::stdin().is_terminal() {
        shell.repl()?;
        println!("\nThank you for using the student grade manager!");
    } else {
        shell
            .run_script(&mut io::stdin().lock(), &mut io::stdout())
            .context("failed to run commands from stdin")?;
    }

    info!(
        "session ended with {} student(s)",
        shell.session().students.len()
    );
    Ok(())
}
