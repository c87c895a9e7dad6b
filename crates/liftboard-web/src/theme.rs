use liftboard_core::models::MuscleGroup;

/// Requested page colour scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTheme {
    Light,
    Dark,
    /// Defer to the browser's `prefers-color-scheme` media query.
    Auto,
}

impl PageTheme {
    /// Construct a theme by name.  Falls back to `Auto` for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::Light,
            "dark" => Self::Dark,
            _ => Self::Auto,
        }
    }

    /// Value for the page's `data-theme` attribute; the stylesheet keys its
    /// colour variables off this.
    pub fn attr(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

/// Chart colour for a muscle group, stable across every view so that a group
/// keeps its colour from one chart to the next.
pub fn group_color(group: MuscleGroup) -> &'static str {
    match group {
        MuscleGroup::Chest => "#636efa",
        MuscleGroup::Back => "#ef553b",
        MuscleGroup::Shoulders => "#00cc96",
        MuscleGroup::Triceps => "#ab63fa",
        MuscleGroup::Biceps => "#ffa15a",
        MuscleGroup::Legs => "#19d3f3",
        MuscleGroup::Core => "#ff6692",
        MuscleGroup::Unclassified => "#a3a8b5",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
