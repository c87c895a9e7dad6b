//! Server-side page rendering.
//!
//! Fills the embedded HTML templates with the stat cards, summary table and
//! chart JSON.  Templates are compiled in with `include_str!` so rendering
//! never touches the filesystem.

use liftboard_core::formatting::{format_count, format_share, format_volume_kg};
use liftboard_data::aggregator::{GroupSummary, QuickStats};
use liftboard_data::analysis::DashboardData;
use serde_json::Value;

use crate::charts::{self, ChartSpec};
use crate::theme::{group_color, PageTheme};

const DASHBOARD_TEMPLATE: &str = include_str!("../templates/dashboard.html");
const ERROR_TEMPLATE: &str = include_str!("../templates/error.html");

/// Render the full dashboard page for one request.
pub fn render_dashboard(data: &DashboardData, theme: PageTheme) -> String {
    let charts = charts::build_all(data);

    DASHBOARD_TEMPLATE
        .replace("{{THEME}}", theme.attr())
        .replace("{{STAT_DAYS_SINCE}}", &days_since_cell(&data.quick_stats))
        .replace(
            "{{STAT_WEEK}}",
            &format_count(data.quick_stats.workouts_this_week),
        )
        .replace(
            "{{STAT_MONTH}}",
            &format_count(data.quick_stats.workouts_this_month),
        )
        .replace(
            "{{STAT_YEAR}}",
            &format_count(data.quick_stats.workouts_this_year),
        )
        .replace(
            "{{SUMMARY_ROWS}}",
            &summary_rows(&data.summary, data.total_volume),
        )
        .replace("{{CHART_SECTIONS}}", &chart_sections(&charts))
        .replace("{{CHART_CALLS}}", &chart_calls(&charts))
        .replace("{{GENERATED_AT}}", &data.metadata.generated_at)
        .replace(
            "{{SETS_CLASSIFIED}}",
            &format_count(data.metadata.sets_classified as u64),
        )
        .replace(
            "{{SETS_LOADED}}",
            &format_count(data.metadata.sets_loaded as u64),
        )
        .replace(
            "{{LOAD_MS}}",
            &format!("{:.1}", data.metadata.load_time_seconds * 1000.0),
        )
        .replace(
            "{{TRANSFORM_MS}}",
            &format!("{:.1}", data.metadata.transform_time_seconds * 1000.0),
        )
}

/// Render the standalone error page shown when the pipeline fails.
pub fn render_error(message: &str) -> String {
    ERROR_TEMPLATE.replace("{{MESSAGE}}", &html_escape::encode_text(message))
}

// ── Private ───────────────────────────────────────────────────────────────────

fn days_since_cell(stats: &QuickStats) -> String {
    match stats.days_since_last_workout {
        Some(days) => days.to_string(),
        None => "n/a".to_string(),
    }
}

/// Body rows of the summary table, one per muscle group plus a totals row.
fn summary_rows(summary: &[GroupSummary], total_volume: f64) -> String {
    let mut rows = String::new();
    let mut total_sets = 0u64;
    let mut total_workouts = 0u64;

    for row in summary {
        total_sets += row.sets;
        total_workouts += row.workouts;
        rows.push_str(&format!(
            "        <tr><td><span class=\"dot\" style=\"background:{}\"></span>{}</td>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            group_color(row.group),
            row.group.label(),
            format_count(row.sets),
            format_count(row.workouts),
            format_volume_kg(row.volume),
            format_share(row.volume, total_volume),
        ));
    }

    rows.push_str(&format!(
        "        <tr class=\"total\"><td>Total</td>\
         <td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
        format_count(total_sets),
        format_count(total_workouts),
        format_volume_kg(total_volume),
        format_share(total_volume, total_volume),
    ));
    rows
}

fn chart_sections(charts: &[ChartSpec]) -> String {
    charts
        .iter()
        .map(|chart| {
            format!(
                "    <section class=\"panel\">\n      <h2>{}</h2>\n      \
                 <div id=\"{}\" class=\"chart\"></div>\n    </section>\n",
                chart.title, chart.element_id,
            )
        })
        .collect()
}

fn chart_calls(charts: &[ChartSpec]) -> String {
    charts
        .iter()
        .map(|chart| {
            format!(
                "renderChart(\"{}\", {});\n",
                chart.element_id,
                figure_json(&chart.figure),
            )
        })
        .collect()
}

/// Serialize a figure for direct embedding inside a `<script>` block.
///
/// `<` is escaped so user-provided exercise names can never terminate the
/// script element early.
fn figure_json(figure: &Value) -> String {
    serde_json::to_string(figure)
        .unwrap_or_else(|_| String::from("{}"))
        .replace('<', "\\u003c")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
