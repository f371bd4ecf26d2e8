//! Personal measurements fed into the calculation engines

use crate::errors::ParseError;
use crate::units::{to_centimeters, to_kilograms, HeightUnit, InputValue, WeightUnit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Biological sex as a BMR input
/// Note: This selects the Mifflin-St Jeor offset only; it is not the
/// user-facing gender choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl BiologicalSex {
    /// Mifflin-St Jeor constant for this sex
    pub fn bmr_offset(&self) -> f64 {
        match self {
            BiologicalSex::Male => 5.0,
            BiologicalSex::Female => -161.0,
        }
    }
}

impl fmt::Display for BiologicalSex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiologicalSex::Male => write!(f, "male"),
            BiologicalSex::Female => write!(f, "female"),
        }
    }
}

impl FromStr for BiologicalSex {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(ParseError::BiologicalSex(s.to_string())),
        }
    }
}

impl TryFrom<String> for BiologicalSex {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A person's physical stats at a point in time, as entered
///
/// Missing or unusable fields make the measurement incomplete; every engine
/// reads an incomplete measurement as "not enough data yet" and returns its
/// zero result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalMeasurement {
    #[serde(default)]
    pub age_years: Option<u32>,
    #[serde(default)]
    pub weight: Option<InputValue>,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    #[serde(default)]
    pub height: Option<InputValue>,
    #[serde(default)]
    pub height_unit: HeightUnit,
    pub sex: BiologicalSex,
}

impl PersonalMeasurement {
    /// Create a measurement from metric values
    pub fn metric(age_years: u32, weight_kg: f64, height_cm: f64, sex: BiologicalSex) -> Self {
        Self {
            age_years: Some(age_years),
            weight: Some(InputValue::from(weight_kg)),
            weight_unit: WeightUnit::Kilograms,
            height: Some(InputValue::from(height_cm)),
            height_unit: HeightUnit::Centimeters,
            sex,
        }
    }

    /// Weight normalized to kilograms, `0.0` when missing or unusable
    pub fn weight_kg(&self) -> f64 {
        self.weight
            .as_ref()
            .map(|w| to_kilograms(w, self.weight_unit))
            .unwrap_or(0.0)
    }

    /// Height normalized to centimeters, `0.0` when missing or unusable
    pub fn height_cm(&self) -> f64 {
        self.height
            .as_ref()
            .map(|h| to_centimeters(h, self.height_unit))
            .unwrap_or(0.0)
    }

    /// Age in years, `0` when missing
    pub fn age(&self) -> u32 {
        self.age_years.unwrap_or(0)
    }

    /// Whether weight and height are both usable
    pub fn has_body_size(&self) -> bool {
        self.weight_kg() > 0.0 && self.height_cm() > 0.0
    }

    /// Whether every field BMR needs is usable
    pub fn is_complete(&self) -> bool {
        self.age() > 0 && self.has_body_size()
    }
}
