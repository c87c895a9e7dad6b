//! Main analysis pipeline for the dashboard.
//!
//! Orchestrates loading the CSV export, dropping unclassifiable rows and
//! running every aggregation, returning a [`DashboardData`] ready for the
//! web layer.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use liftboard_core::error::Result;
use tracing::debug;

use crate::aggregator::{
    ExerciseVolume, GroupSummary, HeatmapGrid, MonthGroupCount, QuickStats, WeekGroupCount,
    WeeklyActivity, WorkoutAggregator,
};
use crate::reader::load_workout_sets;

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the dashboard tables.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Rows read from the export with a parseable timestamp.
    pub sets_loaded: usize,
    /// Rows whose exercise mapped to a known muscle group.
    pub sets_classified: usize,
    /// Rows dropped because no classification rule matched.
    pub sets_unclassified: usize,
    /// Wall-clock seconds spent reading the CSV file.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent classifying and aggregating.
    pub transform_time_seconds: f64,
}

/// The complete output of [`build_dashboard`]: every chart table plus the
/// summary, stat-card numbers and run metadata.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub sets_per_month: Vec<MonthGroupCount>,
    pub workouts_per_month: Vec<MonthGroupCount>,
    pub workouts_per_week: Vec<WeekGroupCount>,
    pub weekly_activity: Vec<WeeklyActivity>,
    pub volume_by_exercise: Vec<ExerciseVolume>,
    pub exercise_frequency: HeatmapGrid,
    pub volume_per_set: HeatmapGrid,
    /// Lifetime per-group totals, in canonical group order.
    pub summary: Vec<GroupSummary>,
    pub quick_stats: QuickStats,
    /// Sum of all recorded volumes (kg) across the classified table.
    pub total_volume: f64,
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full pipeline for one page render.
///
/// 1. Load and normalize the CSV export at `data_file`.
/// 2. Drop rows whose exercise no rule classifies.
/// 3. Reduce the classified table into the chart and summary tables.
///
/// `today` anchors the stat-card counters and is passed in explicitly so the
/// caller decides the timezone.
pub fn build_dashboard(data_file: &Path, today: NaiveDate) -> Result<DashboardData> {
    // ── Step 1: Load the export ───────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let mut sets = load_workout_sets(data_file)?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2: Classify ──────────────────────────────────────────────────────
    let transform_start = std::time::Instant::now();
    let sets_loaded = sets.len();
    sets.retain(|set| set.muscle_group().is_classified());
    let sets_classified = sets.len();
    let sets_unclassified = sets_loaded - sets_classified;
    if sets_unclassified > 0 {
        debug!(
            "{} of {} sets unclassified; excluded from all tables",
            sets_unclassified, sets_loaded
        );
    }

    // ── Step 3: Aggregate ─────────────────────────────────────────────────────
    let sets_per_month = WorkoutAggregator::sets_per_month(&sets);
    let workouts_per_month = WorkoutAggregator::workouts_per_month(&sets);
    let workouts_per_week = WorkoutAggregator::workouts_per_week(&sets);
    let weekly_activity = WorkoutAggregator::weekly_activity(&sets);
    let volume_by_exercise = WorkoutAggregator::volume_by_exercise(&sets);
    let exercise_frequency = WorkoutAggregator::exercise_frequency(&sets);
    let volume_per_set = WorkoutAggregator::volume_per_set(&sets);
    let summary = WorkoutAggregator::summary_by_group(&sets);
    let quick_stats = WorkoutAggregator::quick_stats(&sets, today);
    let total_volume: f64 = summary.iter().map(|row| row.volume).sum();
    let transform_time = transform_start.elapsed().as_secs_f64();

    // ── Step 4: Build result ──────────────────────────────────────────────────
    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        sets_loaded,
        sets_classified,
        sets_unclassified,
        load_time_seconds: load_time,
        transform_time_seconds: transform_time,
    };

    Ok(DashboardData {
        sets_per_month,
        workouts_per_month,
        workouts_per_week,
        weekly_activity,
        volume_by_exercise,
        exercise_frequency,
        volume_per_set,
        summary,
        quick_stats,
        total_volume,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const EXPORT_HEADER: &str =
        "title,start_time,end_time,exercise_title,set_index,set_type,weight_kg,reps";

    fn write_export(dir: &std::path::Path, name: &str, rows: &[String]) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", EXPORT_HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    fn row(title: &str, ts: &str, exercise: &str, weight: &str, reps: &str) -> String {
        format!(
            "{},\"{}\",\"{}\",{},0,normal,{},{}",
            title, ts, ts, exercise, weight, reps
        )
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    // ── build_dashboard ───────────────────────────────────────────────────────

    #[test]
    fn test_build_dashboard_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = build_dashboard(&dir.path().join("nope.csv"), today());
        assert!(result.is_err());
    }

    #[test]
    fn test_build_dashboard_basic_pipeline() {
        let dir = TempDir::new().unwrap();
        let path = write_export(
            dir.path(),
            "workouts.csv",
            &[
                row("Push Day", "10 Jan 2024, 18:00", "Bench Press", "60", "8"),
                row("Push Day", "10 Jan 2024, 18:05", "Bench Press", "60", "8"),
                row("Leg Day", "11 Jan 2024, 07:00", "Squat", "100", "5"),
                row("Odd", "11 Jan 2024, 07:30", "Mystery Machine", "10", "10"),
            ],
        );

        let data = build_dashboard(&path, today()).unwrap();

        assert_eq!(data.metadata.sets_loaded, 4);
        assert_eq!(data.metadata.sets_classified, 3);
        assert_eq!(data.metadata.sets_unclassified, 1);

        let sets_total: u64 = data.sets_per_month.iter().map(|r| r.count).sum();
        assert_eq!(sets_total, 3);
        assert!((data.total_volume - (480.0 + 480.0 + 500.0)).abs() < 1e-9);
    }

    #[test]
    fn test_build_dashboard_drops_bad_timestamps_before_counting() {
        let dir = TempDir::new().unwrap();
        let path = write_export(
            dir.path(),
            "workouts.csv",
            &[
                row("Push Day", "10 Jan 2024, 18:00", "Bench Press", "60", "8"),
                row("Push Day", "not a date", "Bench Press", "60", "8"),
            ],
        );

        let data = build_dashboard(&path, today()).unwrap();
        assert_eq!(data.metadata.sets_loaded, 1);
        assert_eq!(data.metadata.sets_classified, 1);
    }

    #[test]
    fn test_build_dashboard_metadata_populated() {
        let dir = TempDir::new().unwrap();
        let path = write_export(
            dir.path(),
            "workouts.csv",
            &[row("Push Day", "10 Jan 2024, 18:00", "Bench Press", "60", "8")],
        );

        let data = build_dashboard(&path, today()).unwrap();
        assert!(!data.metadata.generated_at.is_empty());
        assert!(data.metadata.load_time_seconds >= 0.0);
        assert!(data.metadata.transform_time_seconds >= 0.0);
    }

    #[test]
    fn test_build_dashboard_quick_stats_use_provided_today() {
        let dir = TempDir::new().unwrap();
        let path = write_export(
            dir.path(),
            "workouts.csv",
            &[row("Push Day", "10 Jan 2024, 18:00", "Bench Press", "60", "8")],
        );

        let data = build_dashboard(&path, today()).unwrap();
        assert_eq!(data.quick_stats.days_since_last_workout, Some(5));
        assert_eq!(data.quick_stats.workouts_this_year, 1);
    }

    #[test]
    fn test_build_dashboard_header_only_file() {
        let dir = TempDir::new().unwrap();
        let path = write_export(dir.path(), "workouts.csv", &[]);

        let data = build_dashboard(&path, today()).unwrap();
        assert_eq!(data.metadata.sets_loaded, 0);
        assert!(data.summary.is_empty());
        assert!(data.exercise_frequency.is_empty());
        assert_eq!(data.quick_stats.days_since_last_workout, None);
    }
}
