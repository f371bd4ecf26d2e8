//! Body Mass Index calculations
//!
//! BMI = weight(kg) / height(m)². Incomplete measurements give a BMI of `0`
//! and the `N/A` category rather than an error.

use crate::measurement::PersonalMeasurement;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the normal BMI band
pub const NORMAL_BMI_MIN: f64 = 18.5;
/// Lower bound of the overweight BMI band
pub const OVERWEIGHT_BMI_MIN: f64 = 25.0;
/// Lower bound of the obese BMI band
pub const OBESE_BMI_MIN: f64 = 30.0;

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BmiCategory {
    #[serde(rename = "N/A")]
    NotAvailable,
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Get the display label for this category
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::NotAvailable => "N/A",
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// BMI calculation result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// BMI value at full precision
    pub value: f64,
    pub category: BmiCategory,
}

impl BmiResult {
    /// BMI rounded to one decimal place for display
    pub fn display_value(&self) -> f64 {
        round_bmi(self.value)
    }
}

/// Calculate BMI from weight and height
///
/// Returns `0.0` unless both values are positive and finite.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    if !is_usable(weight_kg) || !is_usable(height_cm) {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Calculate BMI for a measurement
pub fn compute_bmi(measurement: &PersonalMeasurement) -> f64 {
    calculate_bmi(measurement.weight_kg(), measurement.height_cm())
}

/// Classify BMI into category
///
/// Each band includes its lower bound: 18.5 is Normal, 25 is Overweight,
/// 30 is Obese.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi.is_nan() || bmi <= 0.0 {
        BmiCategory::NotAvailable
    } else if bmi < NORMAL_BMI_MIN {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_BMI_MIN {
        BmiCategory::Normal
    } else if bmi < OBESE_BMI_MIN {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Round BMI to one decimal place
pub fn round_bmi(bmi: f64) -> f64 {
    (bmi * 10.0).round() / 10.0
}

/// Calculate the complete BMI result for a measurement
pub fn calculate_bmi_result(measurement: &PersonalMeasurement) -> BmiResult {
    let value = compute_bmi(measurement);
    BmiResult {
        value,
        category: classify_bmi(value),
    }
}

/// Calculate healthy weight range for a given height
///
/// Based on the normal BMI band (18.5-25). Returns `(0.0, 0.0)` for an
/// unusable height.
pub fn healthy_weight_range_kg(height_cm: f64) -> (f64, f64) {
    if !is_usable(height_cm) {
        return (0.0, 0.0);
    }
    let height_m = height_cm / 100.0;
    let height_m_sq = height_m * height_m;
    (NORMAL_BMI_MIN * height_m_sq, OVERWEIGHT_BMI_MIN * height_m_sq)
}

/// BMI change between the current and a target weight at the same height
///
/// Negative when the target is lighter. Kept at full precision.
pub fn bmi_change(weight_kg: f64, target_weight_kg: f64, height_cm: f64) -> f64 {
    let current = calculate_bmi(weight_kg, height_cm);
    let target = calculate_bmi(target_weight_kg, height_cm);
    if current == 0.0 || target == 0.0 {
        return 0.0;
    }
    target - current
}

fn is_usable(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::BiologicalSex;
    use crate::units::{HeightUnit, InputValue, WeightUnit};
    use proptest::prelude::*;
    use rstest::rstest;

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let bmi = calculate_bmi(70.0, 175.0);
        assert!((bmi - 22.857).abs() < 0.001);
        assert_eq!(round_bmi(bmi), 22.9);
    }

    #[test]
    fn test_bmi_from_imperial_measurement() {
        let m = PersonalMeasurement {
            age_years: Some(40),
            weight: Some(InputValue::from("180")),
            weight_unit: WeightUnit::Pounds,
            height: Some(InputValue::from("6'0\"")),
            height_unit: HeightUnit::FeetInches,
            sex: BiologicalSex::Male,
        };
        let result = calculate_bmi_result(&m);
        assert_eq!(result.display_value(), 24.4);
        assert_eq!(result.category, BmiCategory::Normal);
    }

    #[test]
    fn test_bmi_incomplete_measurement() {
        assert_eq!(calculate_bmi(0.0, 175.0), 0.0);
        assert_eq!(calculate_bmi(70.0, 0.0), 0.0);
        assert_eq!(calculate_bmi(f64::NAN, 175.0), 0.0);

        let mut m = PersonalMeasurement::metric(30, 70.0, 175.0, BiologicalSex::Male);
        m.weight = None;
        let result = calculate_bmi_result(&m);
        assert_eq!(result.value, 0.0);
        assert_eq!(result.category, BmiCategory::NotAvailable);
    }

    #[rstest]
    #[case(0.0, BmiCategory::NotAvailable)]
    #[case(-3.0, BmiCategory::NotAvailable)]
    #[case(f64::NAN, BmiCategory::NotAvailable)]
    #[case(15.0, BmiCategory::Underweight)]
    #[case(18.49, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.99, BmiCategory::Normal)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(29.99, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::Obese)]
    #[case(45.0, BmiCategory::Obese)]
    fn test_bmi_categories(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(classify_bmi(bmi), expected);
    }

    #[test]
    fn test_category_serializes_as_label() {
        assert_eq!(serde_json::to_string(&BmiCategory::NotAvailable).unwrap(), "\"N/A\"");
        assert_eq!(serde_json::to_string(&BmiCategory::Normal).unwrap(), "\"Normal\"");
    }

    #[test]
    fn test_healthy_weight_range() {
        // For 175cm, healthy range should be ~56.7-76.6 kg
        let (min, max) = healthy_weight_range_kg(175.0);
        assert!((min - 56.7).abs() < 0.5);
        assert!((max - 76.6).abs() < 0.5);
        assert_eq!(healthy_weight_range_kg(0.0), (0.0, 0.0));
    }

    #[test]
    fn test_bmi_change() {
        let delta = bmi_change(90.0, 80.0, 180.0);
        // 10kg at 1.8m is ~3.09 BMI points
        assert!((delta + 3.086).abs() < 0.001);
        assert_eq!(bmi_change(90.0, 80.0, 0.0), 0.0);
        assert_eq!(bmi_change(90.0, 0.0, 180.0), 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMI is always positive for valid inputs
        #[test]
        fn prop_bmi_positive(weight in 20.0f64..500.0, height in 100.0f64..250.0) {
            prop_assert!(calculate_bmi(weight, height) > 0.0);
        }

        /// Property: Heavier weight = higher BMI (same height)
        #[test]
        fn prop_bmi_increases_with_weight(
            weight1 in 50.0f64..100.0,
            weight2 in 100.1f64..150.0,
            height in 150.0f64..200.0
        ) {
            prop_assert!(calculate_bmi(weight2, height) > calculate_bmi(weight1, height));
        }

        /// Property: Taller height = lower BMI (same weight)
        #[test]
        fn prop_bmi_decreases_with_height(
            weight in 60.0f64..100.0,
            height1 in 150.0f64..170.0,
            height2 in 180.0f64..200.0
        ) {
            prop_assert!(calculate_bmi(weight, height1) > calculate_bmi(weight, height2));
        }

        /// Property: Healthy weight range contains weights that produce normal BMI
        #[test]
        fn prop_healthy_range_produces_normal_bmi(height in 150.0f64..200.0) {
            let (min, max) = healthy_weight_range_kg(height);
            let bmi = calculate_bmi((min + max) / 2.0, height);
            prop_assert_eq!(classify_bmi(bmi), BmiCategory::Normal);
        }

        /// Property: Same inputs always give bit-identical output
        #[test]
        fn prop_bmi_idempotent(weight in 20.0f64..500.0, height in 100.0f64..250.0) {
            let first = calculate_bmi(weight, height);
            let second = calculate_bmi(weight, height);
            prop_assert_eq!(first.to_bits(), second.to_bits());
        }
    }
}
