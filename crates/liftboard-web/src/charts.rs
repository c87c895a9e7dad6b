//! Plotly figure builders for the seven dashboard charts.
//!
//! Each builder turns one aggregate table into a [`ChartSpec`] holding the
//! figure as plain JSON (`{"data": [...], "layout": {...}}`); the page embeds
//! that JSON and the browser-side plotly bundle does the drawing.

use liftboard_core::models::MuscleGroup;
use liftboard_data::aggregator::{
    ExerciseVolume, HeatmapGrid, MonthGroupCount, WeekGroupCount, WeeklyActivity,
};
use liftboard_data::analysis::DashboardData;
use serde_json::{json, Value};

use crate::theme::group_color;

/// Marker diameter in pixels for the largest bubble of the volume chart.
const MAX_MARKER_PX: f64 = 20.0;

/// One chart ready for embedding: a target element id, a heading shown above
/// the plot and the plotly figure as JSON.
#[derive(Debug, Clone)]
pub struct ChartSpec {
    pub element_id: &'static str,
    pub title: &'static str,
    pub figure: Value,
}

/// Build all seven charts in page order.
pub fn build_all(data: &DashboardData) -> Vec<ChartSpec> {
    vec![
        monthly_sets(&data.sets_per_month),
        monthly_workouts(&data.workouts_per_month),
        weekly_workouts(&data.workouts_per_week),
        weekly_activity(&data.weekly_activity),
        exercise_volume(&data.volume_by_exercise),
        exercise_frequency(&data.exercise_frequency),
        volume_per_set(&data.volume_per_set),
    ]
}

// ── Line and bar charts ───────────────────────────────────────────────────────

/// Chart 1: sets per month, one line per muscle group.
pub fn monthly_sets(rows: &[MonthGroupCount]) -> ChartSpec {
    let traces: Vec<Value> = month_group_series(rows)
        .into_iter()
        .map(|(group, months, counts)| {
            json!({
                "type": "scatter",
                "mode": "lines+markers",
                "name": group.label(),
                "x": months,
                "y": counts,
                "line": {"color": group_color(group)},
            })
        })
        .collect();

    ChartSpec {
        element_id: "chart-monthly-sets",
        title: "📈 Monthly sets by muscle group",
        figure: json!({
            "data": traces,
            "layout": {
                "margin": margin(),
                "xaxis": {"title": {"text": "Month"}, "categoryorder": "category ascending"},
                "yaxis": {"title": {"text": "Sets"}},
            },
        }),
    }
}

/// Chart 2: workouts per month, stacked by muscle group.
pub fn monthly_workouts(rows: &[MonthGroupCount]) -> ChartSpec {
    let traces: Vec<Value> = month_group_series(rows)
        .into_iter()
        .map(|(group, months, counts)| {
            json!({
                "type": "bar",
                "name": group.label(),
                "x": months,
                "y": counts,
                "marker": {"color": group_color(group)},
            })
        })
        .collect();

    ChartSpec {
        element_id: "chart-monthly-workouts",
        title: "Workouts per month",
        figure: json!({
            "data": traces,
            "layout": {
                "barmode": "stack",
                "margin": margin(),
                "xaxis": {"title": {"text": "Month"}, "categoryorder": "category ascending"},
                "yaxis": {"title": {"text": "Workouts"}},
            },
        }),
    }
}

/// Chart 3: workouts per week, stacked by muscle group.
pub fn weekly_workouts(rows: &[WeekGroupCount]) -> ChartSpec {
    let traces: Vec<Value> = MuscleGroup::CLASSIFIED
        .iter()
        .filter_map(|&group| {
            let mut weeks = Vec::new();
            let mut counts = Vec::new();
            for row in rows.iter().filter(|r| r.group == group) {
                weeks.push(row.week);
                counts.push(row.count);
            }
            if weeks.is_empty() {
                return None;
            }
            Some(json!({
                "type": "bar",
                "name": group.label(),
                "x": weeks,
                "y": counts,
                "marker": {"color": group_color(group)},
            }))
        })
        .collect();

    ChartSpec {
        element_id: "chart-weekly-workouts",
        title: "Workouts per week",
        figure: json!({
            "data": traces,
            "layout": {
                "barmode": "stack",
                "margin": margin(),
                "xaxis": {"title": {"text": "Week"}, "dtick": 1},
                "yaxis": {"title": {"text": "Workouts"}},
            },
        }),
    }
}

/// Chart 4: total sets (left axis) and distinct training days (right axis)
/// per week, as two lines.
pub fn weekly_activity(rows: &[WeeklyActivity]) -> ChartSpec {
    let weeks: Vec<u32> = rows.iter().map(|r| r.week).collect();
    let sets: Vec<u64> = rows.iter().map(|r| r.sets).collect();
    let days: Vec<u64> = rows.iter().map(|r| r.training_days).collect();

    ChartSpec {
        element_id: "chart-weekly-activity",
        title: "Weekly sets and training days",
        figure: json!({
            "data": [
                {
                    "type": "scatter",
                    "mode": "lines+markers",
                    "name": "Sets",
                    "x": weeks,
                    "y": sets,
                    "line": {"color": "#636efa"},
                },
                {
                    "type": "scatter",
                    "mode": "lines+markers",
                    "name": "Training days",
                    "x": weeks,
                    "y": days,
                    "yaxis": "y2",
                    "line": {"color": "#ef553b"},
                },
            ],
            "layout": {
                "margin": margin(),
                "xaxis": {"title": {"text": "Week"}, "dtick": 1},
                "yaxis": {"title": {"text": "Sets"}},
                "yaxis2": {
                    "title": {"text": "Training days"},
                    "overlaying": "y",
                    "side": "right",
                    "showgrid": false,
                },
            },
        }),
    }
}

// ── Scatter chart ─────────────────────────────────────────────────────────────

/// Chart 5: one bubble per frequently logged exercise, plotted over its
/// muscle group with the exercise name in the hover label and marker area
/// proportional to the mean volume.
pub fn exercise_volume(rows: &[ExerciseVolume]) -> ChartSpec {
    let max_volume = rows.iter().map(|r| r.mean_volume).fold(0.0_f64, f64::max);
    // Plotly area scaling: sizeref = 2 * max_value / max_diameter².
    let sizeref = if max_volume > 0.0 {
        2.0 * max_volume / (MAX_MARKER_PX * MAX_MARKER_PX)
    } else {
        1.0
    };

    let traces: Vec<Value> = MuscleGroup::CLASSIFIED
        .iter()
        .filter_map(|&group| {
            let of_group: Vec<&ExerciseVolume> =
                rows.iter().filter(|r| r.group == group).collect();
            if of_group.is_empty() {
                return None;
            }
            let x: Vec<&str> = of_group.iter().map(|_| group.label()).collect();
            let y: Vec<f64> = of_group.iter().map(|r| r.mean_volume).collect();
            let exercises: Vec<&str> = of_group.iter().map(|r| r.exercise.as_str()).collect();
            let sets: Vec<u64> = of_group.iter().map(|r| r.sets).collect();
            Some(json!({
                "type": "scatter",
                "mode": "markers",
                "name": group.label(),
                "x": x,
                "y": y,
                "text": exercises,
                "customdata": sets,
                "hovertemplate": "<b>%{text}</b><br>%{y:.0f} kg over %{customdata} sets<extra></extra>",
                "marker": {
                    "color": group_color(group),
                    "size": y,
                    "sizemode": "area",
                    "sizeref": sizeref,
                    "sizemin": 4,
                },
            }))
        })
        .collect();

    ChartSpec {
        element_id: "chart-exercise-volume",
        title: "💥 Mean volume per exercise (20+ sets logged)",
        figure: json!({
            "data": traces,
            "layout": {
                "showlegend": false,
                "margin": margin(),
                "xaxis": {"title": {"text": "Muscle group"}},
                "yaxis": {"title": {"text": "Mean volume (kg)"}},
            },
        }),
    }
}

// ── Heatmaps ──────────────────────────────────────────────────────────────────

/// Chart 6: sets per exercise per month for frequently logged exercises.
pub fn exercise_frequency(grid: &HeatmapGrid) -> ChartSpec {
    ChartSpec {
        element_id: "chart-exercise-frequency",
        title: "🗓️ Monthly exercise frequency (20+ sets logged)",
        figure: heatmap_figure(grid, "Sets"),
    }
}

/// Chart 7: mean volume per set for each (group, month) combination.
pub fn volume_per_set(grid: &HeatmapGrid) -> ChartSpec {
    ChartSpec {
        element_id: "chart-volume-per-set",
        title: "📊 Mean volume per set by muscle group",
        figure: heatmap_figure(grid, "kg / set"),
    }
}

// ── Private ───────────────────────────────────────────────────────────────────

/// Per-group month series in canonical group order, skipping groups with no
/// rows, so trace and legend order never vary between charts.
fn month_group_series(rows: &[MonthGroupCount]) -> Vec<(MuscleGroup, Vec<&str>, Vec<u64>)> {
    MuscleGroup::CLASSIFIED
        .iter()
        .filter_map(|&group| {
            let mut months = Vec::new();
            let mut counts = Vec::new();
            for row in rows.iter().filter(|r| r.group == group) {
                months.push(row.month.as_str());
                counts.push(row.count);
            }
            if months.is_empty() {
                None
            } else {
                Some((group, months, counts))
            }
        })
        .collect()
}

/// Shared heatmap figure; `None` cells serialize to JSON nulls, which plotly
/// leaves blank thanks to `hoverongaps: false`.
fn heatmap_figure(grid: &HeatmapGrid, colorbar_title: &str) -> Value {
    json!({
        "data": [{
            "type": "heatmap",
            "x": grid.columns,
            "y": grid.rows,
            "z": grid.values,
            "colorscale": "Viridis",
            "hoverongaps": false,
            "colorbar": {"title": {"text": colorbar_title}},
        }],
        "layout": {
            "margin": {"l": 160, "r": 30, "t": 20, "b": 60},
            "xaxis": {"title": {"text": "Month"}},
            "yaxis": {"autorange": "reversed"},
        },
    })
}

fn margin() -> Value {
    json!({"l": 60, "r": 30, "t": 20, "b": 60})
}

// ── Tests ─────────────────────────────────────────────────────────────────────
