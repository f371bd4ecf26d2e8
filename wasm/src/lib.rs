//! MacroMate WASM Module
//!
//! Browser bindings for the shared nutrition calculations. Each onboarding
//! screen and dashboard widget calls these instead of doing its own math.
//! Structured results cross the boundary as JSON strings.

use macromate_shared as shared;
use wasm_bindgen::prelude::*;

fn js_error(message: String) -> JsValue {
    JsValue::from_str(&message)
}

/// Normalize a weight entry to kilograms (`0` when unusable)
#[wasm_bindgen]
pub fn to_kilograms(value: &str, unit: &str) -> Result<f64, JsValue> {
    bridge::to_kilograms(value, unit).map_err(js_error)
}

/// Normalize a height entry to centimeters (`0` when unusable)
#[wasm_bindgen]
pub fn to_centimeters(value: &str, unit: &str) -> Result<f64, JsValue> {
    bridge::to_centimeters(value, unit).map_err(js_error)
}

/// Calculate BMI from weight (kg) and height (cm)
#[wasm_bindgen]
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    shared::bmi::calculate_bmi(weight_kg, height_cm)
}

#[wasm_bindgen]
pub fn bmi_category(bmi: f64) -> String {
    shared::bmi::classify_bmi(bmi).label().to_string()
}

/// Calculate BMR using the Mifflin-St Jeor equation
#[wasm_bindgen]
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: &str) -> Result<u32, JsValue> {
    bridge::calculate_bmr(weight_kg, height_cm, age_years, sex).map_err(js_error)
}

/// Calculate TDEE from a BMR and an activity level name or multiplier
#[wasm_bindgen]
pub fn calculate_tdee(bmr: u32, activity_level: &str) -> Result<u32, JsValue> {
    bridge::calculate_tdee(bmr, activity_level).map_err(js_error)
}

#[wasm_bindgen]
pub fn daily_calories(
    tdee: u32,
    goal: &str,
    change_rate: Option<String>,
    calorie_adjustment: Option<i32>,
) -> Result<String, JsValue> {
    bridge::daily_calories(tdee, goal, change_rate.as_deref(), calorie_adjustment).map_err(js_error)
}

#[wasm_bindgen]
pub fn macro_grams(calories: f64, protein: i32, carbs: i32, fat: i32) -> Result<String, JsValue> {
    bridge::macro_grams(calories, protein, carbs, fat).map_err(js_error)
}

/// Error message for an invalid split, or nothing when it is valid
#[wasm_bindgen]
pub fn validate_macro_split(protein: i32, carbs: i32, fat: i32) -> Option<String> {
    bridge::validate_macro_split(protein, carbs, fat)
}

#[wasm_bindgen]
pub fn rebalance_macros(protein: i32, carbs: i32, fat: i32, changed: &str, value: i32) -> Result<String, JsValue> {
    bridge::rebalance_macros(protein, carbs, fat, changed, value).map_err(js_error)
}

/// Validate one wizard field; returns the error message, if any
#[wasm_bindgen]
pub fn validate_field(field: &str, value: &str) -> Result<Option<String>, JsValue> {
    bridge::validate_field(field, value).map_err(js_error)
}

/// Compute the full plan for an onboarding draft (JSON in, JSON out)
#[wasm_bindgen]
pub fn plan_from_draft(draft_json: &str) -> Result<String, JsValue> {
    bridge::plan_from_draft(draft_json).map_err(js_error)
}

/// Labels of the answers a draft still needs, as a JSON array
#[wasm_bindgen]
pub fn draft_missing_fields(draft_json: &str) -> Result<String, JsValue> {
    bridge::draft_missing_fields(draft_json).map_err(js_error)
}

/// Pure implementations behind the bindings, testable off the browser
mod bridge {
    use super::shared;
    use serde::Serialize;
    use shared::{
        get_missing_fields_labels, parse_number, ActivityLevel, BiologicalSex, GoalSpec, HeightUnit, InputValue,
        Macro, MacroSplit, OnboardingDraft, WeightUnit,
    };

    fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
        serde_json::to_string(value).map_err(|e| e.to_string())
    }

    fn parse<T>(text: &str) -> Result<T, String>
    where
        T: std::str::FromStr<Err = shared::ParseError>,
    {
        text.parse().map_err(|e: shared::ParseError| e.to_string())
    }

    pub fn to_kilograms(value: &str, unit: &str) -> Result<f64, String> {
        let unit: WeightUnit = parse(unit)?;
        Ok(shared::to_kilograms(&InputValue::from(value), unit))
    }

    pub fn to_centimeters(value: &str, unit: &str) -> Result<f64, String> {
        let unit: HeightUnit = parse(unit)?;
        Ok(shared::to_centimeters(&InputValue::from(value), unit))
    }

    pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age_years: u32, sex: &str) -> Result<u32, String> {
        let sex: BiologicalSex = parse(sex)?;
        let measurement = shared::PersonalMeasurement::metric(age_years, weight_kg, height_cm, sex);
        Ok(shared::compute_bmr(&measurement))
    }

    pub fn calculate_tdee(bmr: u32, activity_level: &str) -> Result<u32, String> {
        let level: ActivityLevel = parse(activity_level)?;
        Ok(shared::tdee_from_bmr(bmr, level))
    }

    pub fn daily_calories(
        tdee: u32,
        goal: &str,
        change_rate: Option<&str>,
        calorie_adjustment: Option<i32>,
    ) -> Result<String, String> {
        let goal = GoalSpec::from_raw(goal, change_rate, calorie_adjustment.map(i64::from));
        to_json(&shared::compute_daily_calories(tdee, &goal))
    }

    pub fn macro_grams(calories: f64, protein: i32, carbs: i32, fat: i32) -> Result<String, String> {
        to_json(&shared::compute_grams(calories, &MacroSplit::new(protein, carbs, fat)))
    }

    pub fn validate_macro_split(protein: i32, carbs: i32, fat: i32) -> Option<String> {
        shared::validate_macro_split(&MacroSplit::new(protein, carbs, fat)).err()
    }

    pub fn rebalance_macros(protein: i32, carbs: i32, fat: i32, changed: &str, value: i32) -> Result<String, String> {
        let changed: Macro = parse(changed)?;
        to_json(&shared::rebalance_split(&MacroSplit::new(protein, carbs, fat), changed, value))
    }

    pub fn validate_field(field: &str, value: &str) -> Result<Option<String>, String> {
        let label = shared::get_field_display_label(field).to_string();
        let number = match parse_number(value) {
            Some(n) => n,
            None => return Ok(Some(format!("{} must be a valid number", label))),
        };

        let outcome = match field {
            "age" | "age_years" => whole(number, &label).and_then(|age| shared::validate_age(age.max(0) as u32)),
            "weight" | "weight_kg" | "target_weight" | "target_weight_kg" => shared::validate_weight_kg(number),
            "height" | "height_cm" => shared::validate_height_cm(number),
            other => match other.parse::<Macro>() {
                Ok(nutrient) => whole(number, &label).and_then(|p| shared::validate_macro_percent(nutrient, p)),
                Err(_) => return Err(format!("Unknown field: {}", field)),
            },
        };
        Ok(outcome.err())
    }

    fn whole(number: f64, label: &str) -> Result<i32, String> {
        if number.fract() != 0.0 || number.abs() > f64::from(i32::MAX) {
            return Err(format!("{} must be a whole number", label));
        }
        Ok(number as i32)
    }

    pub fn plan_from_draft(draft_json: &str) -> Result<String, String> {
        let draft = OnboardingDraft::from_json(draft_json).map_err(|e| e.to_string())?;
        to_json(&draft.preview_plan())
    }

    pub fn draft_missing_fields(draft_json: &str) -> Result<String, String> {
        let draft = OnboardingDraft::from_json(draft_json).map_err(|e| e.to_string())?;
        to_json(&get_missing_fields_labels(&draft.missing_fields()))
    }
}
