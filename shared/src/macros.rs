//! Macronutrient split calculations
//!
//! Converts a percentage split and a calorie target into gram targets using
//! Atwater factors, and rebalances splits when one slider moves.

use crate::errors::ParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Kilocalories per gram of protein
pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
/// Kilocalories per gram of carbohydrate
pub const CARBS_KCAL_PER_GRAM: f64 = 4.0;
/// Kilocalories per gram of fat
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

/// A macronutrient tracked in the split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum Macro {
    Protein,
    Carbs,
    Fat,
}

impl Macro {
    pub const ALL: [Macro; 3] = [Macro::Protein, Macro::Carbs, Macro::Fat];

    /// Allowed share of daily calories, in percent
    pub fn percent_range(&self) -> RangeInclusive<i32> {
        match self {
            Macro::Protein => 10..=35,
            Macro::Carbs => 30..=65,
            Macro::Fat => 20..=35,
        }
    }

    /// Atwater factor for this macronutrient
    pub fn kcal_per_gram(&self) -> f64 {
        match self {
            Macro::Protein => PROTEIN_KCAL_PER_GRAM,
            Macro::Carbs => CARBS_KCAL_PER_GRAM,
            Macro::Fat => FAT_KCAL_PER_GRAM,
        }
    }

    /// Clamp a percentage into this macro's allowed range
    pub fn clamp_percent(&self, percent: i32) -> i32 {
        let range = self.percent_range();
        percent.clamp(*range.start(), *range.end())
    }

    fn others(&self) -> [Macro; 2] {
        match self {
            Macro::Protein => [Macro::Carbs, Macro::Fat],
            Macro::Carbs => [Macro::Protein, Macro::Fat],
            Macro::Fat => [Macro::Protein, Macro::Carbs],
        }
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Macro::Protein => "protein",
            Macro::Carbs => "carbs",
            Macro::Fat => "fat",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Macro {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "protein" | "proteins" => Ok(Macro::Protein),
            "carbs" | "carb" | "carbohydrate" | "carbohydrates" => Ok(Macro::Carbs),
            "fat" | "fats" => Ok(Macro::Fat),
            _ => Err(ParseError::Macro(s.to_string())),
        }
    }
}

impl TryFrom<String> for Macro {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Percentage split of daily calories across macronutrients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MacroSplit {
    pub protein_percent: i32,
    pub carbs_percent: i32,
    pub fat_percent: i32,
}

impl Default for MacroSplit {
    fn default() -> Self {
        Self::new(30, 40, 30)
    }
}

impl MacroSplit {
    pub fn new(protein_percent: i32, carbs_percent: i32, fat_percent: i32) -> Self {
        Self {
            protein_percent,
            carbs_percent,
            fat_percent,
        }
    }

    pub fn get(&self, nutrient: Macro) -> i32 {
        match nutrient {
            Macro::Protein => self.protein_percent,
            Macro::Carbs => self.carbs_percent,
            Macro::Fat => self.fat_percent,
        }
    }

    pub fn with_percent(mut self, nutrient: Macro, percent: i32) -> Self {
        match nutrient {
            Macro::Protein => self.protein_percent = percent,
            Macro::Carbs => self.carbs_percent = percent,
            Macro::Fat => self.fat_percent = percent,
        }
        self
    }

    /// Sum of the three percentages, widened so raw input cannot overflow
    pub fn total(&self) -> i64 {
        i64::from(self.protein_percent) + i64::from(self.carbs_percent) + i64::from(self.fat_percent)
    }

    /// Whether every macro sits inside its allowed range
    pub fn within_ranges(&self) -> bool {
        Macro::ALL
            .iter()
            .all(|nutrient| nutrient.percent_range().contains(&self.get(*nutrient)))
    }
}

/// True iff the percentages sum to exactly 100
pub fn validate_split(split: &MacroSplit) -> bool {
    split.total() == 100
}

/// Daily gram targets per macronutrient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MacroGramTargets {
    pub protein_grams: u32,
    pub carb_grams: u32,
    pub fat_grams: u32,
}

impl MacroGramTargets {
    pub fn get(&self, nutrient: Macro) -> u32 {
        match nutrient {
            Macro::Protein => self.protein_grams,
            Macro::Carbs => self.carb_grams,
            Macro::Fat => self.fat_grams,
        }
    }

    /// Calories these grams provide
    pub fn calories(&self) -> u32 {
        let kcal: f64 = Macro::ALL
            .iter()
            .map(|nutrient| f64::from(self.get(*nutrient)) * nutrient.kcal_per_gram())
            .sum();
        kcal.round() as u32
    }
}

/// Convert a calorie target and split into gram targets
///
/// Negative calories or percentages count as zero. The split is not
/// validated here; callers should check `validate_split` before treating
/// the result as final.
pub fn compute_grams(calories: f64, split: &MacroSplit) -> MacroGramTargets {
    let grams = |nutrient: Macro| -> u32 {
        let kcal = calories.max(0.0) * f64::from(split.get(nutrient).max(0)) / 100.0;
        let grams = (kcal / nutrient.kcal_per_gram()).round();
        if grams.is_finite() {
            grams.min(f64::from(u32::MAX)) as u32
        } else {
            0
        }
    };

    MacroGramTargets {
        protein_grams: grams(Macro::Protein),
        carb_grams: grams(Macro::Carbs),
        fat_grams: grams(Macro::Fat),
    }
}

/// Move one macro's slider and redistribute the change over the other two
///
/// The moved value is clamped to its range first. Each other macro absorbs
/// the change in proportion to its previous share, then is rounded and
/// clamped to its own range. After clamping the total may drift from 100.
pub fn rebalance_split(old: &MacroSplit, changed: Macro, new_value: i32) -> MacroSplit {
    let new_value = changed.clamp_percent(new_value);
    let delta = f64::from(new_value) - f64::from(old.get(changed));

    let [first, second] = changed.others();
    let first_old = f64::from(old.get(first));
    let second_old = f64::from(old.get(second));
    let others_total = first_old + second_old;

    let (first_share, second_share) = if others_total > 0.0 {
        (first_old / others_total, second_old / others_total)
    } else {
        (0.5, 0.5)
    };

    let adjust = |nutrient: Macro, old_value: f64, share: f64| -> i32 {
        nutrient.clamp_percent((old_value - delta * share).round() as i32)
    };

    old.with_percent(changed, new_value)
        .with_percent(first, adjust(first, first_old, first_share))
        .with_percent(second, adjust(second, second_old, second_share))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn test_validate_split() {
        assert!(validate_split(&MacroSplit::new(20, 50, 30)));
        assert!(!validate_split(&MacroSplit::new(20, 50, 29)));
        assert!(!validate_split(&MacroSplit::new(40, 40, 30)));
        assert!(validate_split(&MacroSplit::default()));
    }

    #[test]
    fn test_validate_split_extreme_values() {
        assert!(!validate_split(&MacroSplit::new(i32::MAX, i32::MAX, 102)));
        assert!(!validate_split(&MacroSplit::new(i32::MIN, i32::MIN, 100)));
        assert!(!validate_split(&MacroSplit::new(i32::MAX, 1, 0)));
        assert_eq!(MacroSplit::new(i32::MAX, i32::MAX, 102).total(), 2 * i64::from(i32::MAX) + 102);
    }

    #[test]
    fn test_within_ranges() {
        assert!(MacroSplit::new(20, 50, 30).within_ranges());
        assert!(!MacroSplit::new(40, 30, 30).within_ranges());
        assert!(!MacroSplit::new(10, 75, 15).within_ranges());
    }

    // =========================================================================
    // Gram Tests
    // =========================================================================

    #[test]
    fn test_compute_grams_reference() {
        let grams = compute_grams(2000.0, &MacroSplit::new(20, 50, 30));
        assert_eq!(
            grams,
            MacroGramTargets { protein_grams: 100, carb_grams: 250, fat_grams: 67 }
        );
    }

    #[test]
    fn test_compute_grams_clamps_negatives() {
        assert_eq!(compute_grams(-2000.0, &MacroSplit::default()), MacroGramTargets::default());

        let grams = compute_grams(2000.0, &MacroSplit::new(-10, 60, 50));
        assert_eq!(grams.protein_grams, 0);
        assert_eq!(grams.carb_grams, 300);
        assert_eq!(grams.fat_grams, 111);
    }

    #[test]
    fn test_compute_grams_zero_calories() {
        assert_eq!(compute_grams(0.0, &MacroSplit::default()), MacroGramTargets::default());
        assert_eq!(compute_grams(f64::NAN, &MacroSplit::default()), MacroGramTargets::default());
    }

    #[test]
    fn test_grams_back_to_calories() {
        let grams = compute_grams(2000.0, &MacroSplit::new(20, 50, 30));
        // 100*4 + 250*4 + 67*9 = 2003 (fat rounding)
        assert_eq!(grams.calories(), 2003);
    }

    // =========================================================================
    // Rebalance Tests
    // =========================================================================

    #[test]
    fn test_rebalance_proportional() {
        let next = rebalance_split(&MacroSplit::new(30, 40, 30), Macro::Protein, 35);
        assert_eq!(next, MacroSplit::new(35, 37, 28));
        assert!(validate_split(&next));
    }

    #[test]
    fn test_rebalance_lowering_fat() {
        let next = rebalance_split(&MacroSplit::new(20, 50, 30), Macro::Fat, 20);
        assert_eq!(next, MacroSplit::new(23, 57, 20));
    }

    #[test]
    fn test_rebalance_clamps_moved_value() {
        let next = rebalance_split(&MacroSplit::new(30, 40, 30), Macro::Protein, 90);
        assert_eq!(next.protein_percent, 35);
        assert_eq!(next, rebalance_split(&MacroSplit::new(30, 40, 30), Macro::Protein, 35));
    }

    #[test]
    fn test_rebalance_clamping_can_break_total() {
        let next = rebalance_split(&MacroSplit::new(35, 35, 30), Macro::Protein, 10);
        assert_eq!(next, MacroSplit::new(10, 48, 35));
        assert!(!validate_split(&next));
    }

    #[test]
    fn test_rebalance_with_empty_others_splits_evenly() {
        let next = rebalance_split(&MacroSplit::new(100, 0, 0), Macro::Protein, 30);
        // delta -70 split evenly, then clamped into range
        assert_eq!(next, MacroSplit::new(30, 35, 35));
    }

    #[test]
    fn test_rebalance_extreme_old_values() {
        let next = rebalance_split(&MacroSplit::new(i32::MIN, 40, 30), Macro::Protein, 30);
        assert_eq!(next.protein_percent, 30);
        assert!(next.within_ranges());

        let next = rebalance_split(&MacroSplit::new(i32::MAX, i32::MAX, i32::MAX), Macro::Fat, 25);
        assert!(next.within_ranges());
    }

    #[test]
    fn test_macro_parsing() {
        assert_eq!("Protein".parse::<Macro>().unwrap(), Macro::Protein);
        assert_eq!("carbohydrates".parse::<Macro>().unwrap(), Macro::Carbs);
        assert_eq!("FAT".parse::<Macro>().unwrap(), Macro::Fat);
        assert!("fiber".parse::<Macro>().is_err());
    }

    fn in_range_split() -> impl Strategy<Value = MacroSplit> {
        (10i32..=35, 20i32..=35).prop_filter_map("carbs out of range", |(protein, fat)| {
            let split = MacroSplit::new(protein, 100 - protein - fat, fat);
            split.within_ranges().then_some(split)
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Grams are never negative and scale with calories
        #[test]
        fn prop_grams_monotonic_in_calories(
            low in 0.0f64..3000.0,
            extra in 0.0f64..3000.0,
            split in in_range_split()
        ) {
            let a = compute_grams(low, &split);
            let b = compute_grams(low + extra, &split);
            prop_assert!(b.protein_grams >= a.protein_grams);
            prop_assert!(b.carb_grams >= a.carb_grams);
            prop_assert!(b.fat_grams >= a.fat_grams);
        }

        /// Property: Rebalanced macros always sit inside their ranges
        #[test]
        fn prop_rebalance_stays_in_range(
            split in in_range_split(),
            which in 0usize..3,
            value in -20i32..120
        ) {
            let next = rebalance_split(&split, Macro::ALL[which], value);
            prop_assert!(next.within_ranges(), "{:?} -> {:?}", split, next);
        }

        /// Property: Without clamping, the total stays within rounding of 100
        #[test]
        fn prop_rebalance_preserves_total_when_unclamped(
            split in in_range_split(),
            which in 0usize..3,
            step in -2i32..=2
        ) {
            let nutrient = Macro::ALL[which];
            let next = rebalance_split(&split, nutrient, split.get(nutrient) + step);
            let unclamped = Macro::ALL.iter().all(|m| {
                let range = m.percent_range();
                next.get(*m) > *range.start() && next.get(*m) < *range.end()
            });
            if unclamped {
                prop_assert!((next.total() - 100).abs() <= 1, "{:?} -> {:?}", split, next);
            }
        }
    }
}
