//! Keyword classifier mapping free-form exercise names to muscle groups.
//!
//! Exercise names in tracker exports are free text ("Incline Bench Press
//! (Dumbbell)", "Lat Pulldown - Wide Grip"), so classification works by
//! case-insensitive substring matching against an ordered rule table.

use crate::models::MuscleGroup;

/// One classification rule: matches when any keyword occurs in the
/// lower-cased exercise name and none of the excluded substrings do.
struct Rule {
    group: MuscleGroup,
    keywords: &'static [&'static str],
    excluded: &'static [&'static str],
}

/// Ordered rule table; the first matching rule wins.
///
/// Ordering is load-bearing: the leg-curl rule must precede the generic
/// "curl" biceps keyword, and the triceps rule skips any name containing
/// "chest" so chest-dip variants stay with the chest rule.
const RULES: &[Rule] = &[
    Rule {
        group: MuscleGroup::Legs,
        keywords: &["leg curl"],
        excluded: &[],
    },
    Rule {
        group: MuscleGroup::Chest,
        keywords: &["chest", "bench", "fly", "push up", "pullover"],
        excluded: &[],
    },
    Rule {
        group: MuscleGroup::Back,
        keywords: &["row", "pulldown", "pull up", "chin up", "back"],
        excluded: &[],
    },
    Rule {
        group: MuscleGroup::Shoulders,
        keywords: &[
            "shoulder",
            "deltoid",
            "arnold press",
            "front raise",
            "lateral raise",
            "alzate",
            "overhead press",
            "pike",
        ],
        excluded: &[],
    },
    Rule {
        group: MuscleGroup::Triceps,
        keywords: &["tricep", "skull", "dip"],
        excluded: &["chest"],
    },
    Rule {
        group: MuscleGroup::Biceps,
        keywords: &["bicep", "curl"],
        excluded: &[],
    },
    Rule {
        group: MuscleGroup::Legs,
        keywords: &["squat", "glute", "leg", "calf", "running"],
        excluded: &[],
    },
    Rule {
        group: MuscleGroup::Core,
        keywords: &["crunch", "plank", "sit up", "knee raise", "abs", "core", "flutter", "toes"],
        excluded: &[],
    },
];

/// Assigns a muscle group to an exercise name.
///
/// Pure function: the same name always yields the same group. Names that
/// match no rule come back as [`MuscleGroup::Unclassified`].
///
/// # Examples
///
/// ```
/// use liftboard_core::classifier::classify;
/// use liftboard_core::models::MuscleGroup;
///
/// assert_eq!(classify("Incline Bench Press"), MuscleGroup::Chest);
/// assert_eq!(classify("Seated Leg Curl"), MuscleGroup::Legs);
/// assert_eq!(classify("Overhead Press"), MuscleGroup::Shoulders);
/// assert_eq!(classify("Unknown Move"), MuscleGroup::Unclassified);
/// ```
pub fn classify(exercise: &str) -> MuscleGroup {
    let name = exercise.to_lowercase();
    for rule in RULES {
        let matched = rule.keywords.iter().any(|kw| name.contains(kw));
        let blocked = rule.excluded.iter().any(|kw| name.contains(kw));
        if matched && !blocked {
            return rule.group;
        }
    }
    MuscleGroup::Unclassified
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chest_keywords() {
        assert_eq!(classify("Bench Press (Barbell)"), MuscleGroup::Chest);
        assert_eq!(classify("Cable Fly Crossovers"), MuscleGroup::Chest);
        assert_eq!(classify("Push Up"), MuscleGroup::Chest);
        assert_eq!(classify("Dumbbell Pullover"), MuscleGroup::Chest);
    }

    #[test]
    fn test_back_keywords() {
        assert_eq!(classify("Bent Over Row"), MuscleGroup::Back);
        assert_eq!(classify("Lat Pulldown (Cable)"), MuscleGroup::Back);
        assert_eq!(classify("Chin Up"), MuscleGroup::Back);
        assert_eq!(classify("Back Extension"), MuscleGroup::Back);
    }

    #[test]
    fn test_shoulder_keywords() {
        assert_eq!(classify("Seated Shoulder Press"), MuscleGroup::Shoulders);
        assert_eq!(classify("Lateral Raise (Dumbbell)"), MuscleGroup::Shoulders);
        assert_eq!(classify("Arnold Press"), MuscleGroup::Shoulders);
        assert_eq!(classify("Overhead Press"), MuscleGroup::Shoulders);
    }

    #[test]
    fn test_arm_keywords() {
        assert_eq!(classify("Tricep Pushdown"), MuscleGroup::Triceps);
        assert_eq!(classify("Skullcrusher (Barbell)"), MuscleGroup::Triceps);
        assert_eq!(classify("Hammer Curl"), MuscleGroup::Biceps);
        assert_eq!(classify("Bicep Curl (Cable)"), MuscleGroup::Biceps);
    }

    #[test]
    fn test_leg_and_core_keywords() {
        assert_eq!(classify("Squat (Barbell)"), MuscleGroup::Legs);
        assert_eq!(classify("Glute Bridge"), MuscleGroup::Legs);
        assert_eq!(classify("Standing Calf Raise"), MuscleGroup::Legs);
        assert_eq!(classify("Running"), MuscleGroup::Legs);
        assert_eq!(classify("Decline Crunch"), MuscleGroup::Core);
        assert_eq!(classify("Plank"), MuscleGroup::Core);
        assert_eq!(classify("Hanging Knee Raise"), MuscleGroup::Core);
    }

    #[test]
    fn test_leg_curl_beats_biceps_curl() {
        assert_eq!(classify("Seated Leg Curl"), MuscleGroup::Legs);
        assert_eq!(classify("Lying Leg Curl (Machine)"), MuscleGroup::Legs);
        // Plain curls still land on biceps.
        assert_eq!(classify("Preacher Curl"), MuscleGroup::Biceps);
    }

    #[test]
    fn test_chest_dip_stays_chest() {
        assert_eq!(classify("Chest Dip"), MuscleGroup::Chest);
        assert_eq!(classify("Dip (Weighted)"), MuscleGroup::Triceps);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("BENCH PRESS"), MuscleGroup::Chest);
        assert_eq!(classify("bench press"), MuscleGroup::Chest);
    }

    #[test]
    fn test_unmatched_names() {
        assert_eq!(classify("Unknown Move"), MuscleGroup::Unclassified);
        assert_eq!(classify(""), MuscleGroup::Unclassified);
        assert_eq!(classify("Neck Harness"), MuscleGroup::Unclassified);
    }

    #[test]
    fn test_classification_is_stable() {
        for _ in 0..3 {
            assert_eq!(classify("Incline Bench Press"), MuscleGroup::Chest);
        }
    }
}
