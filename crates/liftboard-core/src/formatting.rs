//! Number formatting for the dashboard's summary table and stat cards.

/// Format an integer count with thousands separators.
///
/// # Examples
///
/// ```
/// use liftboard_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(999), "999");
/// assert_eq!(format_count(12_345), "12,345");
/// ```
pub fn format_count(count: u64) -> String {
    group_thousands(&count.to_string())
}

/// Format a training volume in kilograms, rounded to the nearest whole
/// kilogram with thousands separators.
///
/// # Examples
///
/// ```
/// use liftboard_core::formatting::format_volume_kg;
///
/// assert_eq!(format_volume_kg(0.0), "0 kg");
/// assert_eq!(format_volume_kg(512.4), "512 kg");
/// assert_eq!(format_volume_kg(1_234_567.8), "1,234,568 kg");
/// ```
pub fn format_volume_kg(kg: f64) -> String {
    let rounded = kg.round() as i64;
    if rounded < 0 {
        format!("-{} kg", group_thousands(&rounded.unsigned_abs().to_string()))
    } else {
        format!("{} kg", group_thousands(&rounded.to_string()))
    }
}

/// Calculate `(part / whole) * 100` rounded to one decimal place.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
///
/// # Examples
///
/// ```
/// use liftboard_core::formatting::share_percent;
///
/// assert_eq!(share_percent(50.0, 200.0), 25.0);
/// assert_eq!(share_percent(10.0, 0.0), 0.0);
/// ```
pub fn share_percent(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    (part / whole * 1000.0).round() / 10.0
}

/// Format a share of a total as a percentage string with one decimal place.
///
/// # Examples
///
/// ```
/// use liftboard_core::formatting::format_share;
///
/// assert_eq!(format_share(1.0, 3.0), "33.3%");
/// assert_eq!(format_share(100.0, 100.0), "100.0%");
/// ```
pub fn format_share(part: f64, whole: f64) -> String {
    format!("{:.1}%", share_percent(part, whole))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of a digit string.
fn group_thousands(digits: &str) -> String {
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(b as char);
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
