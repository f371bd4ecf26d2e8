//! Unit conversion and normalization module
//!
//! Turns user-entered weight and height (numbers, decimal feet, or
//! `feet'inches"` strings) into canonical metric values used by every
//! calculation engine.
//!
//! # Design Principles
//!
//! 1. **Total Functions**: Conversions never fail; unusable input becomes `0`
//! 2. **One Constant**: Pounds and kilograms convert through `POUNDS_PER_KG` only
//! 3. **Conversion at Boundaries**: Engines only ever see kilograms and centimeters

use crate::errors::ParseError;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pounds in one kilogram
pub const POUNDS_PER_KG: f64 = 2.20462;
/// Centimeters in one inch
pub const CM_PER_INCH: f64 = 2.54;
/// Inches in one foot
pub const INCHES_PER_FOOT: f64 = 12.0;

static LEADING_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").expect("leading number pattern is valid")
});

/// Parse the leading numeric prefix of a string, the way form inputs are read.
///
/// `"70kg"` parses as `70`, `" 5.5"` as `5.5`, and `"abc"` or `""` as `None`.
/// Non-finite results are rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let found = LEADING_NUMBER.find(text.trim_start())?;
    found
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

// ============================================================================
// Raw Input Values
// ============================================================================

/// A value as the user entered it: either a number or free text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
}

impl InputValue {
    /// Numeric reading of this value, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            InputValue::Number(value) if value.is_finite() => Some(*value),
            InputValue::Number(_) => None,
            InputValue::Text(text) => parse_number(text),
        }
    }

    /// Numeric reading of this value when it is strictly positive
    pub fn positive(&self) -> Option<f64> {
        self.as_number().filter(|value| *value > 0.0)
    }
}

impl From<f64> for InputValue {
    fn from(value: f64) -> Self {
        InputValue::Number(value)
    }
}

impl From<u32> for InputValue {
    fn from(value: u32) -> Self {
        InputValue::Number(f64::from(value))
    }
}

impl From<&str> for InputValue {
    fn from(value: &str) -> Self {
        InputValue::Text(value.to_string())
    }
}

impl From<String> for InputValue {
    fn from(value: String) -> Self {
        InputValue::Text(value)
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Number(value) => write!(f, "{}", value),
            InputValue::Text(text) => write!(f, "{}", text),
        }
    }
}

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit selected on the onboarding form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilograms,
    #[serde(rename = "lbs")]
    Pounds,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kilograms => value,
            WeightUnit::Pounds => value / POUNDS_PER_KG,
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kilograms => kg,
            WeightUnit::Pounds => kg * POUNDS_PER_KG,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kilograms => "kg",
            WeightUnit::Pounds => "lbs",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for WeightUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" | "kgs" | "kilogram" | "kilograms" | "metric" => Ok(WeightUnit::Kilograms),
            "lb" | "lbs" | "pound" | "pounds" | "imperial" => Ok(WeightUnit::Pounds),
            _ => Err(ParseError::WeightUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for WeightUnit {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Normalize a user-entered weight to kilograms.
///
/// Returns `0.0` when the value is missing, unparsable, or not positive.
pub fn to_kilograms(value: &InputValue, unit: WeightUnit) -> f64 {
    value
        .positive()
        .map(|v| unit.to_kg(v))
        .filter(|kg| kg.is_finite())
        .unwrap_or(0.0)
}

// ============================================================================
// Height Units
// ============================================================================

/// Height unit selected on the onboarding form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum HeightUnit {
    #[default]
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "ft-in")]
    FeetInches,
}

impl HeightUnit {
    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            HeightUnit::Centimeters => "cm",
            HeightUnit::FeetInches => "ft/in",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl FromStr for HeightUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" | "metric" => Ok(HeightUnit::Centimeters),
            "ft" | "feet" | "ft-in" | "ft/in" | "feet-inches" | "feet/inches" | "imperial" => {
                Ok(HeightUnit::FeetInches)
            }
            _ => Err(ParseError::HeightUnit(s.to_string())),
        }
    }
}

impl TryFrom<String> for HeightUnit {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Normalize a user-entered height to centimeters.
///
/// Under `FeetInches`, text containing an apostrophe is read as
/// `feet'inches"`; anything else is read as a number of feet, so a bare
/// `"70"` means seventy feet. Returns `0.0` for missing, unparsable, or
/// non-positive heights.
pub fn to_centimeters(value: &InputValue, unit: HeightUnit) -> f64 {
    let cm = match unit {
        HeightUnit::Centimeters => value.as_number().unwrap_or(0.0),
        HeightUnit::FeetInches => total_inches(value) * CM_PER_INCH,
    };

    if cm.is_finite() && cm > 0.0 {
        cm
    } else {
        0.0
    }
}

fn total_inches(value: &InputValue) -> f64 {
    match value {
        InputValue::Number(feet) => feet * INCHES_PER_FOOT,
        InputValue::Text(text) if text.contains('\'') => {
            let mut parts = text.split('\'');
            let feet = parts.next().and_then(parse_number).unwrap_or(0.0);
            let inches = parts
                .next()
                .and_then(|part| parse_number(part.trim().trim_end_matches('"')))
                .unwrap_or(0.0);
            feet * INCHES_PER_FOOT + inches
        }
        InputValue::Text(text) => parse_number(text).unwrap_or(0.0) * INCHES_PER_FOOT,
    }
}

// ============================================================================
// Display Helpers
// ============================================================================

/// Represents height in feet and whole inches for display
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeetInchesHeight {
    pub feet: u32,
    pub inches: f64,
}

impl FeetInchesHeight {
    /// Create from centimeters, rounded to the nearest inch
    pub fn from_cm(cm: f64) -> Self {
        let total_inches = (cm.max(0.0) / CM_PER_INCH).round();
        Self {
            feet: (total_inches / INCHES_PER_FOOT).floor() as u32,
            inches: total_inches % INCHES_PER_FOOT,
        }
    }

    /// Convert to total inches
    pub fn to_total_inches(&self) -> f64 {
        f64::from(self.feet) * INCHES_PER_FOOT + self.inches
    }

    /// Convert to centimeters
    pub fn to_cm(&self) -> f64 {
        self.to_total_inches() * CM_PER_INCH
    }
}

impl fmt::Display for FeetInchesHeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{:.0}\"", self.feet, self.inches)
    }
}

/// Format a height in centimeters for display in the given unit
pub fn format_height(cm: f64, unit: HeightUnit) -> String {
    if cm.is_nan() || cm <= 0.0 {
        return "N/A".to_string();
    }
    match unit {
        HeightUnit::Centimeters => format!("{:.0} cm", cm),
        HeightUnit::FeetInches => FeetInchesHeight::from_cm(cm).to_string(),
    }
}

/// Format a weight in kilograms for display in the given unit
pub fn format_weight(kg: f64, unit: WeightUnit) -> String {
    if kg.is_nan() || kg <= 0.0 {
        return "N/A".to_string();
    }
    format!("{:.1} {}", unit.from_kg(kg), unit.abbreviation())
}
