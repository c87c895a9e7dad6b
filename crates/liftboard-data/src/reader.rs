//! CSV export discovery and loading for Liftboard.
//!
//! Reads set records from a workout-tracker CSV export and converts them
//! into [`WorkoutSet`] structs for downstream aggregation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use liftboard_core::error::{DashboardError, Result};
use liftboard_core::models::WorkoutSet;
use liftboard_core::time_utils;
use serde::Deserialize;
use tracing::{debug, warn};

/// File name probed in the working directory before falling back to the
/// data directory scan.
const LOCAL_EXPORT_FILE: &str = "workouts.csv";

// ── Public API ────────────────────────────────────────────────────────────────

/// Default directory scanned for exports: `~/.liftboard`.
pub fn default_data_dir() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".liftboard")
}

/// Find all `.csv` files recursively under `data_path`, sorted by path.
pub fn find_csv_files(data_path: &Path) -> Vec<PathBuf> {
    if !data_path.exists() {
        warn!("Data path does not exist: {}", data_path.display());
        return Vec::new();
    }

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(data_path)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_file()
                && entry
                    .path()
                    .extension()
                    .map(|ext| ext == "csv")
                    .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}

/// Resolve which export file to load.
///
/// Priority:
/// 1. An explicit `--data-file` path, taken as-is.
/// 2. `workouts.csv` in the current working directory.
/// 3. The most recently modified `.csv` under `~/.liftboard/`.
pub fn resolve_data_file(explicit: Option<&Path>) -> Result<PathBuf> {
    resolve_data_file_with(explicit, Path::new(LOCAL_EXPORT_FILE), &default_data_dir())
}

/// Same as [`resolve_data_file`] but with explicit candidate paths, enabling
/// unit tests without touching the real home directory.
pub fn resolve_data_file_with(
    explicit: Option<&Path>,
    local_candidate: &Path,
    data_dir: &Path,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        // Taken verbatim; a missing file surfaces as a read error at load time.
        return Ok(path.to_path_buf());
    }

    if local_candidate.is_file() {
        return Ok(local_candidate.to_path_buf());
    }

    if !data_dir.exists() {
        return Err(DashboardError::DataPathNotFound(data_dir.to_path_buf()));
    }

    newest_csv_in(data_dir)
}

/// Load and parse a CSV export into [`WorkoutSet`] objects, sorted by start
/// time.
///
/// Rows whose timestamp does not match the export format are dropped; any
/// structural CSV problem (missing column, ragged row, bad number) is an
/// error.
pub fn load_workout_sets(path: &Path) -> Result<Vec<WorkoutSet>> {
    let file = std::fs::File::open(path).map_err(|e| DashboardError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut reader = csv::Reader::from_reader(file);

    let mut sets: Vec<WorkoutSet> = Vec::new();
    let mut rows_read = 0u64;
    let mut rows_dropped = 0u64;

    for result in reader.deserialize() {
        let raw: RawSetRecord = result?;
        rows_read += 1;

        match map_to_workout_set(raw) {
            Some(set) => sets.push(set),
            None => rows_dropped += 1,
        }
    }

    sets.sort_by_key(|s| s.start_time);

    debug!(
        "File {}: {} rows read, {} kept, {} dropped (unparseable timestamp)",
        path.display(),
        rows_read,
        sets.len(),
        rows_dropped,
    );

    Ok(sets)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// One raw CSV row. Field names match the export's column headers; columns
/// not listed here (end time, set type, RPE, ...) are ignored.
#[derive(Debug, Deserialize)]
struct RawSetRecord {
    title: String,
    start_time: String,
    exercise_title: String,
    set_index: u32,
    weight_kg: Option<f64>,
    reps: Option<u32>,
}

/// Map a raw row to a [`WorkoutSet`], returning `None` when the timestamp is
/// unparseable.
fn map_to_workout_set(raw: RawSetRecord) -> Option<WorkoutSet> {
    let start_time = time_utils::parse_export_timestamp(&raw.start_time)?;

    Some(WorkoutSet {
        workout_title: raw.title,
        start_time,
        exercise: raw.exercise_title,
        set_index: raw.set_index,
        weight_kg: raw.weight_kg,
        reps: raw.reps,
    })
}

/// Pick the most recently modified CSV file under `dir`.
fn newest_csv_in(dir: &Path) -> Result<PathBuf> {
    find_csv_files(dir)
        .into_iter()
        .max_by_key(|path| (modified_time(path), path.clone()))
        .ok_or_else(|| DashboardError::NoDataFiles(dir.to_path_buf()))
}

/// Filesystem modification time, or the epoch when unavailable.
fn modified_time(path: &Path) -> SystemTime {
    std::fs::metadata(path)
        .and_then(|meta| meta.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    const EXPORT_HEADER: &str =
        "title,start_time,end_time,exercise_title,set_index,set_type,weight_kg,reps";

    fn write_csv(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", EXPORT_HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    fn sample_row(title: &str, ts: &str, exercise: &str, weight: &str, reps: &str) -> String {
        format!("{},\"{}\",\"{}\",{},0,normal,{},{}", title, ts, ts, exercise, weight, reps)
    }

    // ── find_csv_files ────────────────────────────────────────────────────────

    #[test]
    fn test_find_csv_files_sorted() {
        let dir = TempDir::new().unwrap();
        write_csv(dir.path(), "c.csv", &[]);
        write_csv(dir.path(), "a.csv", &[]);
        write_csv(dir.path(), "b.csv", &[]);

        let files = find_csv_files(dir.path());
        let names: Vec<&str> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.csv", "b.csv", "c.csv"]);
    }

    #[test]
    fn test_find_csv_files_recursive_and_filtered() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("exports");
        std::fs::create_dir_all(&sub).unwrap();
        write_csv(dir.path(), "root.csv", &[]);
        write_csv(&sub, "nested.csv", &[]);
        std::fs::write(dir.path().join("notes.txt"), "not a csv").unwrap();

        let files = find_csv_files(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "csv"));
    }

    #[test]
    fn test_find_csv_files_nonexistent_path() {
        let files = find_csv_files(Path::new("/tmp/does-not-exist-liftboard-test"));
        assert!(files.is_empty());
    }

    // ── load_workout_sets ─────────────────────────────────────────────────────

    #[test]
    fn test_load_basic_row() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "workouts.csv",
            &[&sample_row("Push Day", "26 Feb 2024, 18:30", "Bench Press (Barbell)", "60", "8")],
        );

        let sets = load_workout_sets(&path).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].workout_title, "Push Day");
        assert_eq!(sets[0].exercise, "Bench Press (Barbell)");
        assert_eq!(sets[0].set_index, 0);
        assert_eq!(sets[0].weight_kg, Some(60.0));
        assert_eq!(sets[0].reps, Some(8));
        assert_eq!(sets[0].volume(), Some(480.0));
        assert_eq!(sets[0].month_key(), "2024-02");
    }

    #[test]
    fn test_load_empty_weight_and_reps_become_none() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "workouts.csv",
            &[&sample_row("Core Day", "26 Feb 2024, 18:30", "Plank", "", "")],
        );

        let sets = load_workout_sets(&path).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].weight_kg, None);
        assert_eq!(sets[0].reps, None);
        assert_eq!(sets[0].volume(), None);
    }

    #[test]
    fn test_load_drops_unparseable_timestamps() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "workouts.csv",
            &[
                &sample_row("Push Day", "not a date", "Bench Press", "60", "8"),
                &sample_row("Push Day", "26 Feb 2024, 18:30", "Bench Press", "60", "8"),
                &sample_row("Push Day", "", "Incline Bench Press", "40", "10"),
            ],
        );

        let sets = load_workout_sets(&path).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].exercise, "Bench Press");
    }

    #[test]
    fn test_load_sorted_by_start_time() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "workouts.csv",
            &[
                &sample_row("Later", "27 Feb 2024, 10:00", "Squat", "80", "5"),
                &sample_row("Earlier", "26 Feb 2024, 18:30", "Squat", "80", "5"),
            ],
        );

        let sets = load_workout_sets(&path).unwrap();
        assert_eq!(sets.len(), 2);
        assert!(sets[0].start_time < sets[1].start_time);
        assert_eq!(sets[0].workout_title, "Earlier");
    }

    #[test]
    fn test_load_extra_columns_ignored() {
        let dir = TempDir::new().unwrap();
        // Header carries end_time and set_type which the model does not use.
        let path = write_csv(
            dir.path(),
            "workouts.csv",
            &[&sample_row("Leg Day", "01 Mar 2024, 07:00", "Squat (Barbell)", "100", "3")],
        );

        let sets = load_workout_sets(&path).unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].weight_kg, Some(100.0));
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = load_workout_sets(Path::new("/tmp/liftboard-no-such-file.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::FileRead { .. }), "{err:?}");
    }

    #[test]
    fn test_load_ragged_row_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "{}", EXPORT_HEADER).unwrap();
        writeln!(file, "only,three,fields").unwrap();

        let err = load_workout_sets(&path).unwrap_err();
        assert!(matches!(err, DashboardError::CsvParse(_)), "{err:?}");
    }

    #[test]
    fn test_load_non_numeric_weight_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "workouts.csv",
            &[&sample_row("Push Day", "26 Feb 2024, 18:30", "Bench Press", "heavy", "8")],
        );

        let err = load_workout_sets(&path).unwrap_err();
        assert!(matches!(err, DashboardError::CsvParse(_)), "{err:?}");
    }

    // ── resolve_data_file ─────────────────────────────────────────────────────

    #[test]
    fn test_resolve_explicit_path_wins() {
        let dir = TempDir::new().unwrap();
        let explicit = dir.path().join("anywhere.csv");

        let resolved = resolve_data_file_with(
            Some(&explicit),
            &dir.path().join("workouts.csv"),
            dir.path(),
        )
        .unwrap();
        assert_eq!(resolved, explicit);
    }

    #[test]
    fn test_resolve_prefers_local_export() {
        let dir = TempDir::new().unwrap();
        let local = write_csv(dir.path(), "workouts.csv", &[]);
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        write_csv(&data_dir, "other.csv", &[]);

        let resolved = resolve_data_file_with(None, &local, &data_dir).unwrap();
        assert_eq!(resolved, local);
    }

    #[test]
    fn test_resolve_picks_newest_in_data_dir() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();
        write_csv(&data_dir, "older.csv", &[]);
        std::thread::sleep(std::time::Duration::from_millis(20));
        let newest = write_csv(&data_dir, "an-export.csv", &[]);

        let resolved =
            resolve_data_file_with(None, &dir.path().join("workouts.csv"), &data_dir).unwrap();
        assert_eq!(resolved, newest);
    }

    #[test]
    fn test_resolve_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let err = resolve_data_file_with(
            None,
            &dir.path().join("workouts.csv"),
            &dir.path().join("no-such-dir"),
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::DataPathNotFound(_)), "{err:?}");
    }

    #[test]
    fn test_resolve_empty_data_dir() {
        let dir = TempDir::new().unwrap();
        let data_dir = dir.path().join("data");
        std::fs::create_dir_all(&data_dir).unwrap();

        let err = resolve_data_file_with(None, &dir.path().join("workouts.csv"), &data_dir)
            .unwrap_err();
        assert!(matches!(err, DashboardError::NoDataFiles(_)), "{err:?}");
    }

    #[test]
    fn test_default_data_dir_under_home() {
        let dir = default_data_dir();
        assert!(dir.ends_with(".liftboard"));
    }
}
