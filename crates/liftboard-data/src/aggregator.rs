//! Grouped reductions over the normalized workout-set table.
//!
//! Each public function independently reduces a slice of [`WorkoutSet`]s
//! into one chart-ready table; nothing here holds state between calls.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use liftboard_core::models::{MuscleGroup, WorkoutSet};
use liftboard_core::time_utils;

/// Minimum number of logged sets before an exercise shows up in the
/// per-exercise volume and frequency views.
pub const MIN_EXERCISE_SETS: u64 = 20;

// ── Aggregate rows ────────────────────────────────────────────────────────────

/// One (month, group) sample, e.g. 48 chest sets in 2024-03.
#[derive(Debug, Clone)]
pub struct MonthGroupCount {
    /// Month bucket key in `YYYY-MM` form.
    pub month: String,
    pub group: MuscleGroup,
    pub count: u64,
}

/// One (week, group) sample, keyed by dense week index.
#[derive(Debug, Clone)]
pub struct WeekGroupCount {
    /// 1-based dense index over the distinct training weeks, oldest first.
    pub week: u32,
    pub group: MuscleGroup,
    pub count: u64,
}

/// Per-week totals for the dual-series activity chart.
#[derive(Debug, Clone)]
pub struct WeeklyActivity {
    /// 1-based dense index over the distinct training weeks, oldest first.
    pub week: u32,
    /// Total sets logged that week.
    pub sets: u64,
    /// Distinct calendar days trained that week.
    pub training_days: u64,
}

/// Mean per-set volume for one frequently logged exercise.
#[derive(Debug, Clone)]
pub struct ExerciseVolume {
    pub exercise: String,
    pub group: MuscleGroup,
    /// Mean of the recorded per-set volumes; sets without weight or reps are
    /// skipped, mirroring how a spreadsheet mean ignores blank cells.
    pub mean_volume: f64,
    /// Total sets logged for the exercise.
    pub sets: u64,
}

/// Dense row-by-column matrix backing the heatmap charts.
///
/// `values[r][c]` pairs `rows[r]` with `columns[c]`; `None` marks a
/// combination with no data, which heatmaps render as a blank cell.
#[derive(Debug, Clone)]
pub struct HeatmapGrid {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl HeatmapGrid {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }
}

/// One summary-table row: lifetime totals for a muscle group.
#[derive(Debug, Clone)]
pub struct GroupSummary {
    pub group: MuscleGroup,
    /// Total sets logged for the group.
    pub sets: u64,
    /// Distinct (date, exercise) pairs logged for the group.
    pub workouts: u64,
    /// Sum of recorded per-set volumes in kilograms.
    pub volume: f64,
}

/// Headline numbers for the stat cards at the top of the page.
#[derive(Debug, Clone)]
pub struct QuickStats {
    /// Days between the last logged workout and today; `None` without data.
    /// Negative when the newest rows are in the future.
    pub days_since_last_workout: Option<i64>,
    /// Distinct (workout title, date) pairs in the current week.
    pub workouts_this_week: u64,
    /// Distinct (workout title, date) pairs in the current month.
    pub workouts_this_month: u64,
    /// Distinct (workout title, date) pairs in the current year.
    pub workouts_this_year: u64,
}

// ── WorkoutAggregator ─────────────────────────────────────────────────────────

/// Stateless helper that reduces workout sets into chart tables.
///
/// Callers pass the classified table: rows whose exercise maps to
/// [`MuscleGroup::Unclassified`] are filtered out upstream.
pub struct WorkoutAggregator;

impl WorkoutAggregator {
    /// Sets logged per (month, group).
    ///
    /// Returns rows sorted by month, then by canonical group order.
    pub fn sets_per_month(sets: &[WorkoutSet]) -> Vec<MonthGroupCount> {
        let mut counts: BTreeMap<(String, MuscleGroup), u64> = BTreeMap::new();
        for set in sets {
            *counts
                .entry((set.month_key(), set.muscle_group()))
                .or_default() += 1;
        }

        counts
            .into_iter()
            .map(|((month, group), count)| MonthGroupCount { month, group, count })
            .collect()
    }

    /// Distinct workouts (title + date) per (month, group).
    pub fn workouts_per_month(sets: &[WorkoutSet]) -> Vec<MonthGroupCount> {
        let mut unique: BTreeSet<(String, MuscleGroup, &str, NaiveDate)> = BTreeSet::new();
        for set in sets {
            unique.insert((
                set.month_key(),
                set.muscle_group(),
                set.workout_title.as_str(),
                set.date(),
            ));
        }

        let mut counts: BTreeMap<(String, MuscleGroup), u64> = BTreeMap::new();
        for (month, group, _, _) in unique {
            *counts.entry((month, group)).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|((month, group), count)| MonthGroupCount { month, group, count })
            .collect()
    }

    /// Distinct workouts (title + date) per (week, group).
    pub fn workouts_per_week(sets: &[WorkoutSet]) -> Vec<WeekGroupCount> {
        let index = Self::week_index(sets);

        let mut unique: BTreeSet<(u32, MuscleGroup, &str, NaiveDate)> = BTreeSet::new();
        for set in sets {
            let week = index[&set.week_start()];
            unique.insert((week, set.muscle_group(), set.workout_title.as_str(), set.date()));
        }

        let mut counts: BTreeMap<(u32, MuscleGroup), u64> = BTreeMap::new();
        for (week, group, _, _) in unique {
            *counts.entry((week, group)).or_default() += 1;
        }

        counts
            .into_iter()
            .map(|((week, group), count)| WeekGroupCount { week, group, count })
            .collect()
    }

    /// Total sets and distinct training days per week.
    pub fn weekly_activity(sets: &[WorkoutSet]) -> Vec<WeeklyActivity> {
        let index = Self::week_index(sets);

        let mut set_counts: BTreeMap<u32, u64> = BTreeMap::new();
        let mut days: BTreeMap<u32, BTreeSet<NaiveDate>> = BTreeMap::new();
        for set in sets {
            let week = index[&set.week_start()];
            *set_counts.entry(week).or_default() += 1;
            days.entry(week).or_default().insert(set.date());
        }

        set_counts
            .into_iter()
            .map(|(week, count)| WeeklyActivity {
                week,
                sets: count,
                training_days: days.get(&week).map(|d| d.len() as u64).unwrap_or(0),
            })
            .collect()
    }

    /// Mean per-set volume for exercises with at least
    /// [`MIN_EXERCISE_SETS`] logged sets, sorted by exercise name.
    ///
    /// Exercises whose sets never record a volume (pure bodyweight work)
    /// have no mean and are omitted.
    pub fn volume_by_exercise(sets: &[WorkoutSet]) -> Vec<ExerciseVolume> {
        struct Acc {
            total: f64,
            counted: u64,
            occurrences: u64,
            group: MuscleGroup,
        }

        let mut by_exercise: BTreeMap<&str, Acc> = BTreeMap::new();
        for set in sets {
            let acc = by_exercise.entry(set.exercise.as_str()).or_insert_with(|| Acc {
                total: 0.0,
                counted: 0,
                occurrences: 0,
                group: set.muscle_group(),
            });
            acc.occurrences += 1;
            if let Some(volume) = set.volume() {
                acc.total += volume;
                acc.counted += 1;
            }
        }

        by_exercise
            .into_iter()
            .filter(|(_, acc)| acc.occurrences >= MIN_EXERCISE_SETS && acc.counted > 0)
            .map(|(exercise, acc)| ExerciseVolume {
                exercise: exercise.to_string(),
                group: acc.group,
                mean_volume: acc.total / acc.counted as f64,
                sets: acc.occurrences,
            })
            .collect()
    }

    /// Exercise-by-month set counts for exercises with at least
    /// [`MIN_EXERCISE_SETS`] logged sets.
    ///
    /// Rows are exercises (alphabetical), columns the months in which those
    /// exercises appear (chronological); absent combinations count as zero.
    pub fn exercise_frequency(sets: &[WorkoutSet]) -> HeatmapGrid {
        let mut occurrences: BTreeMap<&str, u64> = BTreeMap::new();
        for set in sets {
            *occurrences.entry(set.exercise.as_str()).or_default() += 1;
        }

        let mut cells: BTreeMap<(&str, String), u64> = BTreeMap::new();
        let mut months: BTreeSet<String> = BTreeSet::new();
        for set in sets {
            if occurrences[set.exercise.as_str()] < MIN_EXERCISE_SETS {
                continue;
            }
            let month = set.month_key();
            months.insert(month.clone());
            *cells.entry((set.exercise.as_str(), month)).or_default() += 1;
        }

        let rows: Vec<String> = occurrences
            .iter()
            .filter(|(_, &count)| count >= MIN_EXERCISE_SETS)
            .map(|(exercise, _)| exercise.to_string())
            .collect();
        let columns: Vec<String> = months.into_iter().collect();

        let values = rows
            .iter()
            .map(|exercise| {
                columns
                    .iter()
                    .map(|month| {
                        let count = cells
                            .get(&(exercise.as_str(), month.clone()))
                            .copied()
                            .unwrap_or(0);
                        Some(count as f64)
                    })
                    .collect()
            })
            .collect();

        HeatmapGrid { rows, columns, values }
    }

    /// Mean volume per set for each (group, month) combination.
    ///
    /// The denominator counts every set in the combination, including sets
    /// without a recorded volume; combinations never logged stay `None`.
    pub fn volume_per_set(sets: &[WorkoutSet]) -> HeatmapGrid {
        let mut totals: BTreeMap<(MuscleGroup, String), (f64, u64)> = BTreeMap::new();
        let mut groups: BTreeSet<MuscleGroup> = BTreeSet::new();
        let mut months: BTreeSet<String> = BTreeSet::new();

        for set in sets {
            let group = set.muscle_group();
            let month = set.month_key();
            groups.insert(group);
            months.insert(month.clone());

            let cell = totals.entry((group, month)).or_insert((0.0, 0));
            if let Some(volume) = set.volume() {
                cell.0 += volume;
            }
            cell.1 += 1;
        }

        let row_groups: Vec<MuscleGroup> = groups.into_iter().collect();
        let columns: Vec<String> = months.into_iter().collect();

        let values = row_groups
            .iter()
            .map(|&group| {
                columns
                    .iter()
                    .map(|month| {
                        totals
                            .get(&(group, month.clone()))
                            .map(|&(total, count)| total / count as f64)
                    })
                    .collect()
            })
            .collect();

        HeatmapGrid {
            rows: row_groups.iter().map(|g| g.label().to_string()).collect(),
            columns,
            values,
        }
    }

    /// Lifetime totals per muscle group, in canonical group order.
    pub fn summary_by_group(sets: &[WorkoutSet]) -> Vec<GroupSummary> {
        let mut set_counts: BTreeMap<MuscleGroup, u64> = BTreeMap::new();
        let mut volumes: BTreeMap<MuscleGroup, f64> = BTreeMap::new();
        let mut pairs: BTreeSet<(MuscleGroup, NaiveDate, &str)> = BTreeSet::new();

        for set in sets {
            let group = set.muscle_group();
            *set_counts.entry(group).or_default() += 1;
            if let Some(volume) = set.volume() {
                *volumes.entry(group).or_default() += volume;
            }
            pairs.insert((group, set.date(), set.exercise.as_str()));
        }

        set_counts
            .into_iter()
            .map(|(group, count)| GroupSummary {
                group,
                sets: count,
                workouts: pairs.iter().filter(|(g, _, _)| *g == group).count() as u64,
                volume: volumes.get(&group).copied().unwrap_or(0.0),
            })
            .collect()
    }

    /// Headline numbers relative to `today`.
    pub fn quick_stats(sets: &[WorkoutSet], today: NaiveDate) -> QuickStats {
        let last_workout = sets.iter().map(WorkoutSet::date).max();
        let days_since_last_workout = last_workout.map(|date| (today - date).num_days());

        let current_week = time_utils::week_start(today);
        let mut week_pairs: BTreeSet<(&str, NaiveDate)> = BTreeSet::new();
        let mut month_pairs: BTreeSet<(&str, NaiveDate)> = BTreeSet::new();
        let mut year_pairs: BTreeSet<(&str, NaiveDate)> = BTreeSet::new();

        for set in sets {
            let date = set.date();
            let pair = (set.workout_title.as_str(), date);
            if time_utils::week_start(date) == current_week {
                week_pairs.insert(pair);
            }
            if date.year() == today.year() && date.month() == today.month() {
                month_pairs.insert(pair);
            }
            if date.year() == today.year() {
                year_pairs.insert(pair);
            }
        }

        QuickStats {
            days_since_last_workout,
            workouts_this_week: week_pairs.len() as u64,
            workouts_this_month: month_pairs.len() as u64,
            workouts_this_year: year_pairs.len() as u64,
        }
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// 1-based dense rank of the distinct week-start dates, oldest first.
    fn week_index(sets: &[WorkoutSet]) -> BTreeMap<NaiveDate, u32> {
        sets.iter()
            .map(WorkoutSet::week_start)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(i, week)| (week, i as u32 + 1))
            .collect()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
