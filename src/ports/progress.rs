//! Progress port consulted as the first conflict tie-break.

use crate::catalog::ExerciseRecord;

/// Reports whether a learner has recorded progress on an exercise.
///
/// Every record in a conflict group shares a number, so lookups take the
/// whole record and implementations key on its folder name or slug.
pub trait ProgressTracker: Send + Sync {
    /// Returns `true` if the exercise has been attempted or completed.
    fn has_progress(&self, exercise: &ExerciseRecord) -> bool;
}
