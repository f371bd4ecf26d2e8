//! Onboarding aggregate
//!
//! `OnboardingDraft` accumulates answers as the wizard progresses and can be
//! previewed at any step. `finalize` turns a complete draft into an immutable,
//! validated `UserProfile`.

use crate::energy::ActivityLevel;
use crate::errors::{ParseError, ProfileError};
use crate::goals::{deserialize_adjustment, ChangeRate, GoalSpec, PrimaryGoal};
use crate::macros::{Macro, MacroSplit};
use crate::measurement::{BiologicalSex, PersonalMeasurement};
use crate::plan::{compute_plan, NutritionPlan};
use crate::units::{to_kilograms, HeightUnit, InputValue, WeightUnit};
use crate::validation::{get_missing_fields_labels, validate_macro_split, ValidationError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use validator::Validate;

/// User-facing gender choice from the onboarding form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
}

impl Gender {
    /// The BMR sex implied by this choice, if any
    pub fn bmr_sex(&self) -> Option<BiologicalSex> {
        match self {
            Gender::Male => Some(BiologicalSex::Male),
            Gender::Female => Some(BiologicalSex::Female),
            Gender::NonBinary | Gender::PreferNotToSay => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::NonBinary => "non_binary",
            Gender::PreferNotToSay => "prefer_not_to_say",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Gender {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "male" | "man" | "m" => Ok(Gender::Male),
            "female" | "woman" | "f" => Ok(Gender::Female),
            "non_binary" | "nonbinary" | "other" => Ok(Gender::NonBinary),
            "prefer_not_to_say" | "unspecified" => Ok(Gender::PreferNotToSay),
            _ => Err(ParseError::Gender(s.to_string())),
        }
    }
}

impl TryFrom<String> for Gender {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ============================================================================
// Onboarding Draft
// ============================================================================

/// Answers collected so far by the onboarding wizard
///
/// Every field is optional. Engines only see the draft through
/// `measurement()`, `goal_spec()` and `preview_plan()`, which read missing
/// answers as incomplete data instead of failing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OnboardingDraft {
    pub name: Option<String>,
    pub age_years: Option<u32>,
    pub gender: Option<Gender>,
    /// Explicit BMR sex; derived from `gender` when absent
    pub sex_for_bmr: Option<BiologicalSex>,
    pub weight: Option<InputValue>,
    pub weight_unit: WeightUnit,
    pub height: Option<InputValue>,
    pub height_unit: HeightUnit,
    /// Goal weight, in `weight_unit`
    pub target_weight: Option<InputValue>,
    pub activity_level: Option<ActivityLevel>,
    pub primary_goal: Option<PrimaryGoal>,
    pub change_rate: Option<ChangeRate>,
    /// Signed values are accepted; only the magnitude is kept
    #[serde(deserialize_with = "deserialize_adjustment")]
    pub calorie_adjustment: Option<u32>,
    pub macro_split: Option<MacroSplit>,
}

impl OnboardingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_age(mut self, age_years: u32) -> Self {
        self.age_years = Some(age_years);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_sex_for_bmr(mut self, sex: BiologicalSex) -> Self {
        self.sex_for_bmr = Some(sex);
        self
    }

    pub fn with_weight(mut self, value: impl Into<InputValue>, unit: WeightUnit) -> Self {
        self.weight = Some(value.into());
        self.weight_unit = unit;
        self
    }

    pub fn with_height(mut self, value: impl Into<InputValue>, unit: HeightUnit) -> Self {
        self.height = Some(value.into());
        self.height_unit = unit;
        self
    }

    pub fn with_target_weight(mut self, value: impl Into<InputValue>) -> Self {
        self.target_weight = Some(value.into());
        self
    }

    pub fn with_activity(mut self, level: ActivityLevel) -> Self {
        self.activity_level = Some(level);
        self
    }

    pub fn with_goal(mut self, goal: PrimaryGoal) -> Self {
        self.primary_goal = Some(goal);
        self
    }

    pub fn with_change_rate(mut self, rate: ChangeRate) -> Self {
        self.change_rate = Some(rate);
        self
    }

    pub fn with_calorie_adjustment(mut self, kcal: u32) -> Self {
        self.calorie_adjustment = Some(kcal);
        self
    }

    pub fn with_macro_split(mut self, split: MacroSplit) -> Self {
        self.macro_split = Some(split);
        self
    }

    /// Sex used for BMR
    ///
    /// Falls back to the gender choice, and to the female offset for any
    /// choice that is not male.
    pub fn bmr_sex(&self) -> BiologicalSex {
        self.sex_for_bmr
            .or_else(|| self.gender.and_then(|g| g.bmr_sex()))
            .unwrap_or(BiologicalSex::Female)
    }

    /// Current answers as an engine measurement
    pub fn measurement(&self) -> PersonalMeasurement {
        PersonalMeasurement {
            age_years: self.age_years,
            weight: self.weight.clone(),
            weight_unit: self.weight_unit,
            height: self.height.clone(),
            height_unit: self.height_unit,
            sex: self.bmr_sex(),
        }
    }

    pub fn goal_spec(&self) -> GoalSpec {
        GoalSpec {
            primary_goal: self.primary_goal.unwrap_or_default(),
            change_rate: self.change_rate,
            calorie_adjustment: self.calorie_adjustment,
        }
    }

    /// Chosen split, or the balanced default
    pub fn split(&self) -> MacroSplit {
        self.macro_split.unwrap_or_default()
    }

    /// Goal weight in kilograms, `None` when missing or unusable
    pub fn target_weight_kg(&self) -> Option<f64> {
        self.target_weight
            .as_ref()
            .map(|w| to_kilograms(w, self.weight_unit))
            .filter(|kg| *kg > 0.0)
    }

    /// Technical names of required answers that are still missing
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let measurement = self.measurement();
        let mut missing = Vec::new();
        if measurement.age() == 0 {
            missing.push("age");
        }
        if self.gender.is_none() && self.sex_for_bmr.is_none() {
            missing.push("gender");
        }
        if measurement.weight_kg() <= 0.0 {
            missing.push("weight");
        }
        if measurement.height_cm() <= 0.0 {
            missing.push("height");
        }
        if self.activity_level.is_none() {
            missing.push("activity_level");
        }
        if self.primary_goal.is_none() {
            missing.push("primary_goal");
        }
        missing
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Plan for the answers so far; zero targets until the measurement is complete
    pub fn preview_plan(&self) -> NutritionPlan {
        compute_plan(
            &self.measurement(),
            self.activity_level,
            &self.goal_spec(),
            &self.split(),
            self.target_weight_kg(),
        )
    }

    /// Validate the draft and freeze it into a profile
    pub fn finalize(self) -> Result<UserProfile, ProfileError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            debug!(missing = ?missing, "onboarding draft incomplete");
            return Err(ProfileError::MissingFields(get_missing_fields_labels(&missing)));
        }

        let measurement = self.measurement();
        let profile = UserProfile {
            name: self.name.clone().filter(|n| !n.trim().is_empty()),
            age_years: measurement.age(),
            gender: self.gender,
            sex_for_bmr: measurement.sex,
            weight_kg: measurement.weight_kg(),
            height_cm: measurement.height_cm(),
            target_weight_kg: self.target_weight_kg(),
            activity_level: self.activity_level.unwrap_or_default(),
            goal: self.goal_spec(),
            macro_split: self.split(),
        };

        if let Err(errors) = profile.validate() {
            let errors = ValidationError::from_validator(&errors);
            debug!(failed = errors.len(), "onboarding draft failed validation");
            return Err(ProfileError::Invalid(errors));
        }

        debug!(
            age_years = profile.age_years,
            goal = %profile.goal.primary_goal,
            activity = %profile.activity_level,
            "onboarding draft finalized"
        );
        Ok(profile)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// User Profile
// ============================================================================

/// A finalized, validated profile in metric units
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct UserProfile {
    name: Option<String>,
    #[validate(range(min = 1, max = 150, message = "Age must be between 1 and 150 years"))]
    age_years: u32,
    gender: Option<Gender>,
    sex_for_bmr: BiologicalSex,
    #[validate(range(min = 20.0, max = 500.0, message = "Weight must be between 20 and 500 kg"))]
    weight_kg: f64,
    #[validate(range(min = 50.0, max = 300.0, message = "Height must be between 50 and 300 cm"))]
    height_cm: f64,
    #[validate(range(min = 20.0, max = 500.0, message = "Goal weight must be between 20 and 500 kg"))]
    target_weight_kg: Option<f64>,
    activity_level: ActivityLevel,
    goal: GoalSpec,
    #[validate(custom(function = "check_macro_split"))]
    macro_split: MacroSplit,
}

fn check_macro_split(split: &MacroSplit) -> Result<(), validator::ValidationError> {
    validate_macro_split(split).map_err(|message| {
        let mut error = validator::ValidationError::new("macro_split");
        error.message = Some(Cow::Owned(message));
        error
    })
}

impl UserProfile {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn age_years(&self) -> u32 {
        self.age_years
    }

    pub fn gender(&self) -> Option<Gender> {
        self.gender
    }

    pub fn sex_for_bmr(&self) -> BiologicalSex {
        self.sex_for_bmr
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn target_weight_kg(&self) -> Option<f64> {
        self.target_weight_kg
    }

    pub fn activity_level(&self) -> ActivityLevel {
        self.activity_level
    }

    pub fn goal(&self) -> GoalSpec {
        self.goal
    }

    pub fn macro_split(&self) -> MacroSplit {
        self.macro_split
    }

    pub fn macro_percent(&self, nutrient: Macro) -> i32 {
        self.macro_split.get(nutrient)
    }

    pub fn measurement(&self) -> PersonalMeasurement {
        PersonalMeasurement::metric(self.age_years, self.weight_kg, self.height_cm, self.sex_for_bmr)
    }

    pub fn plan(&self) -> NutritionPlan {
        compute_plan(
            &self.measurement(),
            Some(self.activity_level),
            &self.goal,
            &self.macro_split,
            self.target_weight_kg,
        )
    }
}
