//! Energy expenditure calculations
//!
//! BMR uses the Mifflin-St Jeor equation; TDEE scales BMR by an activity
//! multiplier. Both report `0` for incomplete measurements.

use crate::errors::ParseError;
use crate::measurement::{BiologicalSex, PersonalMeasurement};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String", rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    VeryActive,
    /// Very hard exercise, physical job
    SuperActive,
}

impl ActivityLevel {
    /// All levels, least to most active
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::SuperActive,
    ];

    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::SuperActive => 1.9,
        }
    }

    /// Find the level with exactly this multiplier
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|level| (level.multiplier() - multiplier).abs() < 1e-9)
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::SuperActive => "Very hard exercise or physical job",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly_active",
            ActivityLevel::ModeratelyActive => "moderately_active",
            ActivityLevel::VeryActive => "very_active",
            ActivityLevel::SuperActive => "super_active",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ActivityLevel {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightly_active" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderately_active" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "very_active" => Ok(ActivityLevel::VeryActive),
            "super_active" | "extra_active" => Ok(ActivityLevel::SuperActive),
            other => other
                .parse::<f64>()
                .ok()
                .and_then(ActivityLevel::from_multiplier)
                .ok_or_else(|| ParseError::ActivityLevel(s.to_string())),
        }
    }
}

impl TryFrom<String> for ActivityLevel {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// BMR and TDEE in whole kilocalories per day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnergyResult {
    pub bmr: u32,
    pub tdee: u32,
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn calculate_bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> f64 {
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age_years) + sex.bmr_offset()
}

/// Calculate BMR for a measurement, rounded to the nearest kilocalorie
///
/// Age, weight and height are all required; a zero or missing value gives
/// `0`. A formula result below zero also reports `0`.
pub fn compute_bmr(measurement: &PersonalMeasurement) -> u32 {
    if !measurement.is_complete() {
        return 0;
    }
    let bmr = calculate_bmr_mifflin(
        measurement.weight_kg(),
        measurement.height_cm(),
        measurement.age(),
        measurement.sex,
    );
    round_kcal(bmr)
}

/// Scale a BMR by an activity level
///
/// A zero BMR stays zero.
pub fn tdee_from_bmr(bmr: u32, activity: ActivityLevel) -> u32 {
    if bmr == 0 {
        return 0;
    }
    round_kcal(f64::from(bmr) * activity.multiplier())
}

/// Calculate Total Daily Energy Expenditure
///
/// A missing activity level defaults to sedentary.
pub fn compute_tdee(measurement: &PersonalMeasurement, activity: Option<ActivityLevel>) -> u32 {
    tdee_from_bmr(compute_bmr(measurement), activity.unwrap_or_default())
}

/// Calculate both BMR and TDEE
pub fn compute_energy(measurement: &PersonalMeasurement, activity: Option<ActivityLevel>) -> EnergyResult {
    let bmr = compute_bmr(measurement);
    EnergyResult {
        bmr,
        tdee: tdee_from_bmr(bmr, activity.unwrap_or_default()),
    }
}

fn round_kcal(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round().min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}
