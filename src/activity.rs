//! Activity rate table
//!
//! Maps an activity label to steps and calories per minute and derives the step and
//! calorie figures that get submitted. The table and the 0.04 calories-per-step factor
//! must match what the shared ledger already holds, so they are fixed here.

use serde::{Deserialize, Serialize};

/// Duration buttons offered by the form, in minutes
pub const DURATION_CHOICES: [u32; 5] = [15, 30, 45, 60, 90];

/// Activities offered by the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Activity {
    Walking,
    Running,
    Cycling,
    Swimming,
    WeightLifting,
    Football,
    Basketball,
}

impl Activity {
    /// Every activity, ordered alphabetically by label
    pub fn catalogue() -> [Activity; 7] {
        [
            Activity::Basketball,
            Activity::Walking,
            Activity::Cycling,
            Activity::Running,
            Activity::Football,
            Activity::WeightLifting,
            Activity::Swimming,
        ]
    }

    /// Label as stored in the ledger
    pub fn label(&self) -> &'static str {
        match self {
            Activity::Walking => "Caminar",
            Activity::Running => "Correr",
            Activity::Cycling => "Ciclismo",
            Activity::Swimming => "Nadar",
            Activity::WeightLifting => "Levantamiento de pesas",
            Activity::Football => "Fútbol",
            Activity::Basketball => "Baloncesto",
        }
    }

    pub fn from_label(label: &str) -> Option<Activity> {
        Activity::catalogue().into_iter().find(|a| a.label() == label)
    }

    pub fn rates(&self) -> Rates {
        let (steps_per_minute, calories_per_minute) = match self {
            Activity::Walking => (70, 5),
            Activity::Running => (150, 10),
            Activity::Cycling => (0, 8),
            Activity::Swimming => (0, 9),
            Activity::WeightLifting => (10, 6),
            Activity::Football => (120, 11),
            Activity::Basketball => (110, 10),
        };
        Rates {
            steps_per_minute,
            calories_per_minute,
        }
    }
}

impl std::fmt::Display for Activity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Per-minute rates for an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rates {
    pub steps_per_minute: u64,
    pub calories_per_minute: u64,
}

impl Rates {
    /// Look up rates by label; unknown labels get the walking rates
    pub fn for_label(label: &str) -> Rates {
        Activity::from_label(label)
            .unwrap_or(Activity::Walking)
            .rates()
    }
}

/// Steps and calories computed for one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Derived {
    pub steps: u64,
    pub calories: u64,
}

/// Compute submitted steps and calories.
///
/// `steps = steps_per_minute * duration + manual_steps` and
/// `calories = round(steps * 0.04)`. Calories are computed as `(4 * steps + 50) / 100`,
/// which equals the rounded product for every integer step count (the product is never
/// exactly halfway).
pub fn derive(label: &str, duration_minutes: u32, manual_steps: u64) -> Derived {
    let rates = Rates::for_label(label);
    let steps = rates
        .steps_per_minute
        .saturating_mul(u64::from(duration_minutes))
        .saturating_add(manual_steps);
    let calories = steps.saturating_mul(4).saturating_add(50) / 100;
    Derived { steps, calories }
}

/// Parse the manual step field.
///
/// Reads the leading integer the way a lenient form field would: surrounding whitespace
/// and trailing garbage are ignored. Empty, non-numeric and negative input all count
/// as zero steps.
pub fn parse_manual_steps(raw: &str) -> u64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: u64 = 0;
    let mut seen_digit = false;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(u64::from(b - b'0'));
    }

    if negative || !seen_digit {
        0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_scenario() {
        let derived = derive("Correr", 30, 500);
        assert_eq!(derived.steps, 5000);
        assert_eq!(derived.calories, 200);
    }

    #[test]
    fn test_cycling_has_no_steps() {
        let derived = derive("Ciclismo", 45, 0);
        assert_eq!(derived, Derived { steps: 0, calories: 0 });
    }

    #[test]
    fn test_unknown_activity_uses_walking_rates() {
        for label in ["Yoga", "", "correr", "Caminar"] {
            let rates = Rates::for_label(label);
            assert_eq!(rates.steps_per_minute, 70, "label {:?}", label);
            assert_eq!(rates.calories_per_minute, 5, "label {:?}", label);
        }
    }

    #[test]
    fn test_rate_table() {
        assert_eq!(Rates::for_label("Nadar").steps_per_minute, 0);
        assert_eq!(Rates::for_label("Nadar").calories_per_minute, 9);
        assert_eq!(Rates::for_label("Levantamiento de pesas").steps_per_minute, 10);
        assert_eq!(Rates::for_label("Fútbol").steps_per_minute, 120);
        assert_eq!(Rates::for_label("Fútbol").calories_per_minute, 11);
        assert_eq!(Rates::for_label("Baloncesto").steps_per_minute, 110);
    }

    #[test]
    fn test_calories_match_rounded_float_product() {
        for label in ["Caminar", "Correr", "Ciclismo", "Levantamiento de pesas", "Otro"] {
            for duration in [0, 15, 30, 45, 60, 90, 7] {
                for manual in [0, 1, 12, 13, 37, 999, 12_345] {
                    let derived = derive(label, duration, manual);
                    let expected = (derived.steps as f64 * 0.04).round() as u64;
                    assert_eq!(derived.calories, expected);
                }
            }
        }
    }

    #[test]
    fn test_catalogue_sorted_and_labels_round_trip() {
        let labels: Vec<_> = Activity::catalogue().iter().map(|a| a.label()).collect();
        let mut sorted = labels.clone();
        sorted.sort();
        assert_eq!(labels, sorted);

        for activity in Activity::catalogue() {
            assert_eq!(Activity::from_label(activity.label()), Some(activity));
        }
    }

    #[test]
    fn test_parse_manual_steps() {
        assert_eq!(parse_manual_steps("500"), 500);
        assert_eq!(parse_manual_steps("  42 "), 42);
        assert_eq!(parse_manual_steps("12abc"), 12);
        assert_eq!(parse_manual_steps("+7"), 7);
        assert_eq!(parse_manual_steps(""), 0);
        assert_eq!(parse_manual_steps("abc"), 0);
        assert_eq!(parse_manual_steps("-300"), 0);
        assert_eq!(parse_manual_steps("3.9"), 3);
    }
}
