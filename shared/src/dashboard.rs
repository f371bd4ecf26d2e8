//! Dashboard progress against the daily plan

use crate::macros::{Macro, MacroGramTargets};
use serde::{Deserialize, Serialize};

/// One logged food or meal
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IntakeEntry {
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_grams: f64,
    #[serde(default)]
    pub carb_grams: f64,
    #[serde(default)]
    pub fat_grams: f64,
}

/// Totals consumed so far today
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DailyIntake {
    pub calories: f64,
    pub protein_grams: f64,
    pub carb_grams: f64,
    pub fat_grams: f64,
}

impl DailyIntake {
    /// Sum logged entries; negative or non-finite amounts count as zero
    pub fn from_entries(entries: &[IntakeEntry]) -> Self {
        entries.iter().fold(Self::default(), |total, entry| Self {
            calories: total.calories + non_negative(entry.calories),
            protein_grams: total.protein_grams + non_negative(entry.protein_grams),
            carb_grams: total.carb_grams + non_negative(entry.carb_grams),
            fat_grams: total.fat_grams + non_negative(entry.fat_grams),
        })
    }

    pub fn grams(&self, nutrient: Macro) -> f64 {
        match nutrient {
            Macro::Protein => self.protein_grams,
            Macro::Carbs => self.carb_grams,
            Macro::Fat => self.fat_grams,
        }
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Consumption measured against one target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub consumed: f64,
    pub target: f64,
    /// Negative once the target is exceeded
    pub remaining: f64,
    /// Share of the target consumed, clamped to 0-100
    pub percent: f64,
    pub over_target: bool,
}

fn progress(consumed: f64, target: f64) -> Progress {
    let consumed = non_negative(consumed);
    let target = non_negative(target);

    let percent = if target == 0.0 {
        0.0
    } else {
        ((consumed / target) * 100.0).clamp(0.0, 100.0)
    };

    Progress {
        consumed,
        target,
        remaining: target - consumed,
        percent,
        over_target: target > 0.0 && consumed > target,
    }
}

/// Calories consumed against the daily target
pub fn calorie_progress(consumed: f64, target: u32) -> Progress {
    progress(consumed, f64::from(target))
}

/// Per-macronutrient progress
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroProgress {
    pub protein: Progress,
    pub carbs: Progress,
    pub fat: Progress,
}

impl MacroProgress {
    pub fn get(&self, nutrient: Macro) -> Progress {
        match nutrient {
            Macro::Protein => self.protein,
            Macro::Carbs => self.carbs,
            Macro::Fat => self.fat,
        }
    }
}

pub fn macro_progress(intake: &DailyIntake, targets: &MacroGramTargets) -> MacroProgress {
    let of = |nutrient: Macro| progress(intake.grams(nutrient), f64::from(targets.get(nutrient)));
    MacroProgress {
        protein: of(Macro::Protein),
        carbs: of(Macro::Carbs),
        fat: of(Macro::Fat),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_intake_sums_entries() {
        let entries = [
            IntakeEntry { calories: 450.0, protein_grams: 30.0, carb_grams: 50.0, fat_grams: 12.0 },
            IntakeEntry { calories: 620.5, protein_grams: 42.0, carb_grams: 65.0, fat_grams: 20.5 },
            IntakeEntry { calories: -100.0, protein_grams: f64::NAN, ..Default::default() },
        ];
        let intake = DailyIntake::from_entries(&entries);
        assert_eq!(intake.calories, 1070.5);
        assert_eq!(intake.protein_grams, 72.0);
        assert_eq!(intake.carb_grams, 115.0);
        assert_eq!(intake.fat_grams, 32.5);
        assert_eq!(DailyIntake::from_entries(&[]), DailyIntake::default());
    }

    #[test]
    fn test_calorie_progress_under_target() {
        let p = calorie_progress(1500.0, 2000);
        assert_eq!(p.remaining, 500.0);
        assert_eq!(p.percent, 75.0);
        assert!(!p.over_target);
    }

    #[test]
    fn test_calorie_progress_over_target() {
        let p = calorie_progress(2300.0, 2000);
        assert_eq!(p.remaining, -300.0);
        assert_eq!(p.percent, 100.0);
        assert!(p.over_target);
    }

    #[test]
    fn test_zero_target_gives_zero_percent() {
        let p = calorie_progress(800.0, 0);
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.remaining, -800.0);
        assert!(!p.over_target);
    }

    #[test]
    fn test_macro_progress() {
        let intake = DailyIntake { calories: 0.0, protein_grams: 75.0, carb_grams: 300.0, fat_grams: 0.0 };
        let targets = MacroGramTargets { protein_grams: 150, carb_grams: 200, fat_grams: 67 };
        let progress = macro_progress(&intake, &targets);
        assert_eq!(progress.protein.percent, 50.0);
        assert!(progress.get(Macro::Carbs).over_target);
        assert_eq!(progress.fat.remaining, 67.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_percent_always_clamped(consumed in -1000.0f64..10000.0, target in 0u32..5000) {
            let p = calorie_progress(consumed, target);
            prop_assert!((0.0..=100.0).contains(&p.percent));
            prop_assert_eq!(p.over_target, target > 0 && p.consumed > f64::from(target));
        }
    }
}
