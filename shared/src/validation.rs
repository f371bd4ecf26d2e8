//! Input validation functions
//!
//! Per-field validators for the onboarding wizard steps. Whole-profile
//! validation uses the `validator` derive on `UserProfile`; its results are
//! converted into the same `ValidationError` type.

use crate::macros::{validate_split, Macro, MacroSplit};
use std::ops::RangeInclusive;

/// Validate age in years
/// Valid range: 1-150 years
pub fn validate_age(age_years: u32) -> Result<(), String> {
    if age_years < 1 {
        return Err("Age must be at least 1 year".to_string());
    }
    if age_years > 150 {
        return Err("Age cannot exceed 150 years".to_string());
    }
    Ok(())
}

/// Accepted body weight once the wizard has normalized it to kilograms
pub const WEIGHT_KG_RANGE: RangeInclusive<f64> = 20.0..=500.0;

/// Accepted height once the wizard has normalized it to centimeters
pub const HEIGHT_CM_RANGE: RangeInclusive<f64> = 50.0..=300.0;

/// Check a normalized weight, as produced by `to_kilograms`
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    check_normalized("Weight", weight_kg, &WEIGHT_KG_RANGE, "kg")
}

/// Check a normalized height, as produced by `to_centimeters`
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    check_normalized("Height", height_cm, &HEIGHT_CM_RANGE, "cm")
}

fn check_normalized(label: &str, value: f64, range: &RangeInclusive<f64>, unit: &str) -> Result<(), String> {
    if !value.is_finite() {
        return Err(format!("{} could not be converted to {}", label, unit));
    }
    if !range.contains(&value) {
        return Err(format!(
            "{} must be between {} and {} {} (entered value converts to {:.1} {})",
            label,
            range.start(),
            range.end(),
            unit,
            value,
            unit
        ));
    }
    Ok(())
}

/// Validate one macro percentage against its allowed range
pub fn validate_macro_percent(nutrient: Macro, percent: i32) -> Result<(), String> {
    let range = nutrient.percent_range();
    if !range.contains(&percent) {
        return Err(format!(
            "{} must be between {}% and {}%",
            capitalize(&nutrient.to_string()),
            range.start(),
            range.end()
        ));
    }
    Ok(())
}

/// Validate a whole macro split: each macro in range, total exactly 100
pub fn validate_macro_split(split: &MacroSplit) -> Result<(), String> {
    for nutrient in Macro::ALL {
        validate_macro_percent(nutrient, split.get(nutrient))?;
    }
    if !validate_split(split) {
        return Err(format!("Macros must add up to 100% (currently {}%)", split.total()));
    }
    Ok(())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "name" => "Name",
        "age" | "age_years" => "Age",
        "gender" => "Gender",
        "sex_for_bmr" => "Sex for Calorie Calculation",
        "weight" | "weight_kg" => "Current Weight",
        "height" | "height_cm" => "Height",
        "target_weight" | "target_weight_kg" => "Goal Weight",
        "activity_level" => "Activity Level",
        "primary_goal" => "Goal",
        "change_rate" => "Pace",
        "macro_split" => "Macro Split",
        "protein" | "protein_percent" => "Protein",
        "carbs" | "carbs_percent" => "Carbs",
        "fat" | "fat_percent" => "Fat",
        _ => field_name,
    }
}

/// Convert a list of technical field names to user-friendly labels
pub fn get_missing_fields_labels(fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .map(|f| get_field_display_label(f).to_string())
        .collect()
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }

    /// Flatten `validator` derive output into field errors, sorted by field
    pub fn from_validator(errors: &validator::ValidationErrors) -> Vec<Self> {
        let mut flattened: Vec<Self> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field = field.to_string();
                field_errors
                    .iter()
                    .map(|error| {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string());
                        ValidationError::new(&field, &message)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        flattened.sort_by(|a, b| a.field.cmp(&b.field));
        flattened
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{to_centimeters, to_kilograms, HeightUnit, InputValue, WeightUnit};
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_validate_age() {
        assert!(validate_age(30).is_ok());
        assert!(validate_age(1).is_ok());
        assert!(validate_age(150).is_ok());
        assert!(validate_age(0).is_err());
        assert!(validate_age(151).is_err());
    }

    #[rstest]
    #[case(70.0, WeightUnit::Kilograms, true)]
    #[case(44.1, WeightUnit::Pounds, true)]
    #[case(1102.0, WeightUnit::Pounds, true)]
    #[case(40.0, WeightUnit::Pounds, false)]
    #[case(1200.0, WeightUnit::Pounds, false)]
    #[case(19.9, WeightUnit::Kilograms, false)]
    fn test_validate_weight_after_conversion(#[case] entered: f64, #[case] unit: WeightUnit, #[case] accepted: bool) {
        let kg = to_kilograms(&InputValue::from(entered), unit);
        assert_eq!(validate_weight_kg(kg).is_ok(), accepted, "{} {:?} -> {} kg", entered, unit, kg);
    }

    #[rstest]
    #[case("5'9\"", true)]
    #[case("1'8\"", true)]
    #[case("9'10\"", true)]
    #[case("1'7\"", false)]
    #[case("10", false)]
    fn test_validate_height_after_conversion(#[case] entered: &str, #[case] accepted: bool) {
        let cm = to_centimeters(&InputValue::from(entered), HeightUnit::FeetInches);
        assert_eq!(validate_height_cm(cm).is_ok(), accepted, "{} -> {} cm", entered, cm);
    }

    #[test]
    fn test_normalized_messages_name_the_unit() {
        assert_eq!(
            validate_weight_kg(10.0),
            Err("Weight must be between 20 and 500 kg (entered value converts to 10.0 kg)".to_string())
        );
        assert_eq!(
            validate_height_cm(f64::NAN),
            Err("Height could not be converted to cm".to_string())
        );
        assert!(validate_weight_kg(f64::INFINITY).is_err());
        assert!(validate_height_cm(-10.0).is_err());
    }

    #[test]
    fn test_validate_macro_percent() {
        assert!(validate_macro_percent(Macro::Protein, 10).is_ok());
        assert!(validate_macro_percent(Macro::Protein, 35).is_ok());
        assert_eq!(
            validate_macro_percent(Macro::Protein, 36),
            Err("Protein must be between 10% and 35%".to_string())
        );
        assert!(validate_macro_percent(Macro::Carbs, 29).is_err());
        assert!(validate_macro_percent(Macro::Fat, 19).is_err());
    }

    #[test]
    fn test_validate_macro_split() {
        assert!(validate_macro_split(&MacroSplit::new(20, 50, 30)).is_ok());
        assert_eq!(
            validate_macro_split(&MacroSplit::new(20, 50, 29)),
            Err("Macros must add up to 100% (currently 99%)".to_string())
        );
        assert!(validate_macro_split(&MacroSplit::new(40, 30, 30)).is_err());
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("age_years"), "Age");
        assert_eq!(get_field_display_label("weight_kg"), "Current Weight");
        assert_eq!(get_field_display_label("height_cm"), "Height");
        assert_eq!(get_field_display_label("activity_level"), "Activity Level");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
        assert_eq!(
            get_missing_fields_labels(&["height", "age"]),
            vec!["Height".to_string(), "Age".to_string()]
        );
    }

    #[test]
    fn test_validation_error() {
        let err = ValidationError::new("height_cm", "must be between 50 and 300 cm");
        assert_eq!(err.field, "height_cm");
        assert_eq!(err.display_label, "Height");
        assert_eq!(err.user_message(), "Height: must be between 50 and 300 cm");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_pounds_inside_range_are_accepted(lbs in 45.0f64..=1100.0) {
            let kg = to_kilograms(&InputValue::from(lbs), WeightUnit::Pounds);
            prop_assert!(validate_weight_kg(kg).is_ok(), "{} lbs -> {} kg", lbs, kg);
        }

        #[test]
        fn prop_weight_verdict_matches_range(kg in -50.0f64..600.0) {
            prop_assert_eq!(validate_weight_kg(kg).is_ok(), WEIGHT_KG_RANGE.contains(&kg));
        }

        #[test]
        fn prop_height_verdict_matches_range(cm in -50.0f64..400.0) {
            prop_assert_eq!(validate_height_cm(cm).is_ok(), HEIGHT_CM_RANGE.contains(&cm));
        }

        #[test]
        fn prop_valid_age_range(age in 1u32..=150) {
            prop_assert!(validate_age(age).is_ok());
        }
    }
}
