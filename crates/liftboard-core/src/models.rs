use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classifier;
use crate::time_utils;

/// Muscle groups a logged set can be attributed to.
///
/// The declaration order is the canonical display order used for chart
/// traces, heatmap rows and the summary table. `Unclassified` always sorts
/// last and is filtered out before any aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MuscleGroup {
    Chest,
    Back,
    Shoulders,
    Triceps,
    Biceps,
    Legs,
    Core,
    /// No classification rule matched the exercise name.
    Unclassified,
}

impl MuscleGroup {
    /// The seven real groups in canonical display order.
    pub const CLASSIFIED: [MuscleGroup; 7] = [
        MuscleGroup::Chest,
        MuscleGroup::Back,
        MuscleGroup::Shoulders,
        MuscleGroup::Triceps,
        MuscleGroup::Biceps,
        MuscleGroup::Legs,
        MuscleGroup::Core,
    ];

    /// Human-readable label shown on the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Triceps => "Triceps",
            MuscleGroup::Biceps => "Biceps",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Core => "Core",
            MuscleGroup::Unclassified => "Unclassified",
        }
    }

    /// Whether this group takes part in aggregation and rendering.
    pub fn is_classified(&self) -> bool {
        !matches!(self, MuscleGroup::Unclassified)
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One logged set from a workout-tracker CSV export.
///
/// A row describes a single set of a single exercise inside a named workout.
/// Weight and repetitions are optional because bodyweight and timed
/// exercises are exported with those cells empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutSet {
    /// Name of the workout this set belongs to (e.g. "Push Day").
    pub workout_title: String,
    /// When the workout containing this set started.
    pub start_time: NaiveDateTime,
    /// Exercise name as typed in the tracker (e.g. "Incline Bench Press").
    pub exercise: String,
    /// Zero-based position of this set within its exercise.
    pub set_index: u32,
    /// Load in kilograms, absent for bodyweight work.
    pub weight_kg: Option<f64>,
    /// Repetition count, absent for timed or distance work.
    pub reps: Option<u32>,
}

impl WorkoutSet {
    /// Training volume of this set in kilograms (`weight * reps`).
    ///
    /// `None` when either component is missing, so sets without a load never
    /// contribute to volume sums but still count towards set totals.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use liftboard_core::models::WorkoutSet;
    ///
    /// let mut set = WorkoutSet {
    ///     workout_title: "Push Day".to_string(),
    ///     start_time: NaiveDate::from_ymd_opt(2024, 3, 4)
    ///         .unwrap()
    ///         .and_hms_opt(18, 30, 0)
    ///         .unwrap(),
    ///     exercise: "Bench Press".to_string(),
    ///     set_index: 0,
    ///     weight_kg: Some(50.0),
    ///     reps: Some(10),
    /// };
    /// assert_eq!(set.volume(), Some(500.0));
    ///
    /// set.reps = None;
    /// assert_eq!(set.volume(), None);
    /// ```
    pub fn volume(&self) -> Option<f64> {
        match (self.weight_kg, self.reps) {
            (Some(weight), Some(reps)) => Some(weight * f64::from(reps)),
            _ => None,
        }
    }

    /// Muscle group this set is attributed to, derived from the exercise name.
    pub fn muscle_group(&self) -> MuscleGroup {
        classifier::classify(&self.exercise)
    }

    /// Calendar date the workout started on.
    pub fn date(&self) -> NaiveDate {
        self.start_time.date()
    }

    /// Calendar year the workout started in.
    pub fn year(&self) -> i32 {
        self.start_time.year()
    }

    /// Month bucket key in `YYYY-MM` form; sorts chronologically as a string.
    pub fn month_key(&self) -> String {
        time_utils::month_key(self.date())
    }

    /// Monday of the week the workout started in.
    pub fn week_start(&self) -> NaiveDate {
        time_utils::week_start(self.date())
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
