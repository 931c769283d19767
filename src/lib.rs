//! An in-memory student grade manager with a small command shell on top.
//!
//! The core is [`Student`] (identity, class and per-subject scores) and
//! [`StudentCollection`], which owns students in insertion order, keeps ids
//! unique and ranks students by average. Neither prints anything; problems are
//! reported through [`ValidationError`] and [`CollectionError`].
//!
//! [`Shell`] drives a [`Session`] from text commands such as
//! `add S001 "Budi Santoso" 10A` or `top -n 5`, either interactively or from
//! any buffered reader.

mod collection;
pub mod command;
mod commands;
mod error;
mod lexer;
mod session;
mod shell;
mod student;

pub use collection::{StudentCollection, StudentPatch};
pub use error::{CollectionError, ValidationError};
pub use session::{DEFAULT_TOP_COUNT, Session, Settings};
/// Just a convenient re-export of the command runner.
///
/// See [`Shell`] for the high-level API and examples.
pub use shell::Shell;
pub use student::{MAX_SCORE, MIN_SCORE, Student};
