use crate::error::ValidationError;
use std::collections::BTreeMap;
use std::fmt;

/// Lowest score accepted by [`Student::add_grade`].
pub const MIN_SCORE: f64 = 0.0;
/// Highest score accepted by [`Student::add_grade`].
pub const MAX_SCORE: f64 = 100.0;

/// A single student: identity, class label and per-subject scores.
///
/// Fields are private so the invariants hold for the whole lifetime of the value:
/// `id`, `name` and `class` are never blank, `id` never changes, and every score
/// lies in `MIN_SCORE..=MAX_SCORE`.
#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: String,
    name: String,
    class: String,
    grades: BTreeMap<String, f64>,
}

fn non_blank(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::EmptyField { field })
    } else {
        Ok(trimmed.to_string())
    }
}

impl Student {
    /// Create a student with no grades recorded.
    ///
    /// All three values are trimmed; a value that is empty after trimming is rejected.
    pub fn new(
        id: impl AsRef<str>,
        name: impl AsRef<str>,
        class: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: non_blank("id", id.as_ref())?,
            name: non_blank("name", name.as_ref())?,
            class: non_blank("class", class.as_ref())?,
            grades: BTreeMap::new(),
        })
    }

    /// Unique identifier; fixed at creation.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Full name of the student.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class or section label, e.g. `10A`.
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Recorded scores keyed by subject, ordered by subject name.
    pub fn grades(&self) -> &BTreeMap<String, f64> {
        &self.grades
    }

    /// Score for `subject`, if one was recorded. Subjects are case-sensitive.
    pub fn grade(&self, subject: &str) -> Option<f64> {
        self.grades.get(subject.trim()).copied()
    }

    /// Replace the name. A blank value is rejected and the old name kept.
    pub fn set_name(&mut self, name: impl AsRef<str>) -> Result<(), ValidationError> {
        self.name = non_blank("name", name.as_ref())?;
        Ok(())
    }

    /// Replace the class label. A blank value is rejected and the old label kept.
    pub fn set_class(&mut self, class: impl AsRef<str>) -> Result<(), ValidationError> {
        self.class = non_blank("class", class.as_ref())?;
        Ok(())
    }

    /// Record `score` for `subject`, overwriting any previous score for it.
    ///
    /// Fails without touching the grades when the subject is blank or the score is
    /// not a finite number in `0..=100`.
    pub fn add_grade(&mut self, subject: impl AsRef<str>, score: f64) -> Result<(), ValidationError> {
        let subject = non_blank("subject", subject.as_ref())?;
        if !score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(ValidationError::ScoreOutOfRange { score });
        }
        self.grades.insert(subject, score);
        Ok(())
    }

    /// Arithmetic mean of all recorded scores, `0.0` when nothing is recorded.
    pub fn average(&self) -> f64 {
        if self.grades.is_empty() {
            return 0.0;
        }
        self.grades.values().sum::<f64>() / self.grades.len() as f64
    }

    /// Multi-line, human-readable rendering used by the shell.
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID      : {}", self.id)?;
        writeln!(f, "Name    : {}", self.name)?;
        writeln!(f, "Class   : {}", self.class)?;
        if self.grades.is_empty() {
            writeln!(f, "Grades  : (no grades recorded)")?;
        } else {
            writeln!(f, "Grades  :")?;
            for (subject, score) in &self.grades {
                writeln!(f, "  - {}: {}", subject, score)?;
            }
        }
        write!(f, "Average : {:.2}", self.average())
    }
}
