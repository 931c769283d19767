use crate::collection::StudentCollection;

/// Number of students shown by `top` when no count is given.
pub const DEFAULT_TOP_COUNT: usize = 3;

/// Tunables chosen at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Default length of the `top` ranking.
    pub top_count: usize,
    /// Print the welcome banner when the interactive loop starts.
    pub banner: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            top_count: DEFAULT_TOP_COUNT,
            banner: true,
        }
    }
}

/// Mutable state shared by every command of one run of the program.
///
/// The session owns the student collection; it is created by the entry point
/// and dropped when the program exits.
#[derive(Debug, Default)]
pub struct Session {
    pub students: StudentCollection,
    pub settings: Settings,
    /// When set to true, the interactive loop stops after the current command.
    pub should_exit: bool,
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        Self {
            students: StudentCollection::new(),
            settings,
            should_exit: false,
        }
    }
}
