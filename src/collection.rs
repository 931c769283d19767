use crate::error::CollectionError;
use crate::student::Student;
use log::{debug, info, warn};

/// Partial update for a student's mutable fields.
///
/// A field that is `None`, or blank after trimming, is left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub class: Option<String>,
}

impl StudentPatch {
    fn given(field: &Option<String>) -> Option<&str> {
        field.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    /// True when applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        Self::given(&self.name).is_none() && Self::given(&self.class).is_none()
    }
}

/// In-memory owner of all students, kept in insertion order.
///
/// No two students share an id. Lookups are linear scans.
#[derive(Debug, Default)]
pub struct StudentCollection {
    students: Vec<Student>,
}

impl StudentCollection {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of students currently held.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// True when no student is registered.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Read-only view of every student, in insertion order.
    pub fn all(&self) -> &[Student] {
        &self.students
    }

    fn position(&self, id: &str) -> Option<usize> {
        let id = id.trim();
        self.students.iter().position(|s| s.id() == id)
    }

    /// Append `student` unless its id is already taken.
    pub fn add(&mut self, student: Student) -> Result<(), CollectionError> {
        if self.position(student.id()).is_some() {
            warn!("rejected duplicate student id {}", student.id());
            return Err(CollectionError::DuplicateId(student.id().to_string()));
        }
        debug!("added student {}", student.id());
        self.students.push(student);
        Ok(())
    }

    /// Student with `id`, or `None` when no such student exists.
    pub fn find(&self, id: &str) -> Option<&Student> {
        self.position(id).map(|i| &self.students[i])
    }

    /// Mutable access to the student with `id`, for recording grades in place.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.position(id).map(move |i| &mut self.students[i])
    }

    /// Apply the non-blank fields of `patch` to the student with `id`.
    pub fn update(&mut self, id: &str, patch: &StudentPatch) -> Result<(), CollectionError> {
        let student = self
            .find_mut(id)
            .ok_or_else(|| CollectionError::NotFound(id.trim().to_string()))?;
        if let Some(name) = StudentPatch::given(&patch.name) {
            student.set_name(name)?;
        }
        if let Some(class) = StudentPatch::given(&patch.class) {
            student.set_class(class)?;
        }
        debug!("updated student {}", student.id());
        Ok(())
    }

    /// Remove and return the student with `id`. Remaining students keep their order.
    pub fn remove(&mut self, id: &str) -> Result<Student, CollectionError> {
        match self.position(id) {
            Some(i) => {
                let removed = self.students.remove(i);
                debug!("removed student {}", removed.id());
                Ok(removed)
            }
            None => {
                info!("nothing to remove for id {}", id.trim());
                Err(CollectionError::NotFound(id.trim().to_string()))
            }
        }
    }

    /// Record a score for the student with `id`.
    pub fn add_grade(&mut self, id: &str, subject: &str, score: f64) -> Result<(), CollectionError> {
        let student = self
            .find_mut(id)
            .ok_or_else(|| CollectionError::NotFound(id.trim().to_string()))?;
        student.add_grade(subject, score)?;
        debug!("student {}: {} = {}", student.id(), subject.trim(), score);
        Ok(())
    }

    /// Up to `n` students ordered by average, highest first.
    ///
    /// Students with equal averages stay in insertion order. The ranking is
    /// recomputed from current grades on every call.
    pub fn top(&self, n: usize) -> Vec<&Student> {
        let mut ranked: Vec<&Student> = self.students.iter().collect();
        ranked.sort_by(|a, b| b.average().total_cmp(&a.average()));
        ranked.truncate(n);
        ranked
    }
}
