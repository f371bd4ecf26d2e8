//! Goal adjustment calculations
//!
//! Turns TDEE into a daily calorie target by applying a deficit or surplus,
//! with a 1200 kcal safety floor on genuinely computed targets.

use crate::errors::ParseError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest daily calorie target ever recommended
pub const MIN_DAILY_CALORIES: u32 = 1200;
/// Adjustment used when neither an explicit value nor a rate is given
pub const DEFAULT_CALORIE_ADJUSTMENT: u32 = 500;
/// Approximate energy content of one kilogram of body mass
pub const KCAL_PER_KG_BODY_MASS: f64 = 7700.0;

/// What the user wants to do with their weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum PrimaryGoal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl PrimaryGoal {
    /// Parse a goal, treating anything unrecognized as maintain
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(PrimaryGoal::Maintain)
    }

    /// Sign applied to the calorie adjustment
    pub fn direction(&self) -> i64 {
        match self {
            PrimaryGoal::Lose => -1,
            PrimaryGoal::Maintain => 0,
            PrimaryGoal::Gain => 1,
        }
    }
}

impl fmt::Display for PrimaryGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryGoal::Lose => write!(f, "lose"),
            PrimaryGoal::Maintain => write!(f, "maintain"),
            PrimaryGoal::Gain => write!(f, "gain"),
        }
    }
}

impl FromStr for PrimaryGoal {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "lose" | "lose_weight" | "weight_loss" | "cut" => Ok(PrimaryGoal::Lose),
            "maintain" | "maintain_weight" | "maintenance" => Ok(PrimaryGoal::Maintain),
            "gain" | "gain_weight" | "weight_gain" | "build_muscle" | "bulk" => Ok(PrimaryGoal::Gain),
            _ => Err(ParseError::Goal(s.to_string())),
        }
    }
}

impl From<String> for PrimaryGoal {
    fn from(value: String) -> Self {
        PrimaryGoal::parse_lenient(&value)
    }
}

/// How fast the user wants to change weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", rename_all = "lowercase")]
pub enum ChangeRate {
    Slow,
    Moderate,
    Faster,
    Aggressive,
}

impl ChangeRate {
    /// Daily calorie adjustment for this rate
    pub fn calorie_adjustment(&self) -> u32 {
        match self {
            ChangeRate::Slow => 250,
            ChangeRate::Moderate => 500,
            ChangeRate::Faster => 750,
            ChangeRate::Aggressive => 1000,
        }
    }
}

impl fmt::Display for ChangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeRate::Slow => "slow",
            ChangeRate::Moderate => "moderate",
            ChangeRate::Faster => "faster",
            ChangeRate::Aggressive => "aggressive",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ChangeRate {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "slow" => Ok(ChangeRate::Slow),
            "moderate" => Ok(ChangeRate::Moderate),
            "faster" | "fast" => Ok(ChangeRate::Faster),
            "aggressive" => Ok(ChangeRate::Aggressive),
            _ => Err(ParseError::ChangeRate(s.to_string())),
        }
    }
}

impl TryFrom<String> for ChangeRate {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The user's goal and how aggressively to pursue it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GoalSpec {
    #[serde(default)]
    pub primary_goal: PrimaryGoal,
    #[serde(default)]
    pub change_rate: Option<ChangeRate>,
    /// Explicit override; wins over `change_rate`, including an explicit 0
    #[serde(default, deserialize_with = "deserialize_adjustment")]
    pub calorie_adjustment: Option<u32>,
}

/// Magnitude of a signed adjustment; the goal alone decides the sign
pub fn adjustment_magnitude(kcal: i64) -> u32 {
    u32::try_from(kcal.unsigned_abs()).unwrap_or(u32::MAX)
}

/// Deserialize an optional adjustment that may have been stored signed
pub fn deserialize_adjustment<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.map(adjustment_magnitude))
}

impl GoalSpec {
    pub fn new(primary_goal: PrimaryGoal) -> Self {
        Self {
            primary_goal,
            ..Self::default()
        }
    }

    pub fn with_rate(mut self, rate: ChangeRate) -> Self {
        self.change_rate = Some(rate);
        self
    }

    pub fn with_adjustment(mut self, kcal: u32) -> Self {
        self.calorie_adjustment = Some(kcal);
        self
    }

    /// Build a goal from raw form values
    ///
    /// The goal text is read leniently and an unknown rate is ignored. A
    /// negative adjustment keeps only its magnitude, since the goal alone
    /// decides the sign.
    pub fn from_raw(goal: &str, rate: Option<&str>, adjustment: Option<i64>) -> Self {
        Self {
            primary_goal: PrimaryGoal::parse_lenient(goal),
            change_rate: rate.and_then(|r| r.parse().ok()),
            calorie_adjustment: adjustment.map(adjustment_magnitude),
        }
    }

    /// Unsigned daily adjustment in kilocalories
    pub fn adjustment(&self) -> u32 {
        self.calorie_adjustment
            .or_else(|| self.change_rate.map(|rate| rate.calorie_adjustment()))
            .unwrap_or(DEFAULT_CALORIE_ADJUSTMENT)
    }

    /// Adjustment with the goal's sign applied
    pub fn signed_adjustment(&self) -> i64 {
        self.primary_goal.direction() * i64::from(self.adjustment())
    }
}

/// Daily calorie target after goal adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DailyCalorieTarget {
    pub value: u32,
    /// True when the safety floor raised the target
    pub floored_at_minimum: bool,
}

/// Calculate the daily calorie target for a TDEE and goal
///
/// A zero TDEE means the measurement was incomplete: the result is zero and
/// the floor is not applied.
pub fn compute_daily_calories(tdee: u32, goal: &GoalSpec) -> DailyCalorieTarget {
    if tdee == 0 {
        return DailyCalorieTarget::default();
    }

    let computed = i64::from(tdee) + goal.signed_adjustment();
    let floor = i64::from(MIN_DAILY_CALORIES);

    if computed < floor {
        DailyCalorieTarget {
            value: MIN_DAILY_CALORIES,
            floored_at_minimum: true,
        }
    } else {
        DailyCalorieTarget {
            value: u32::try_from(computed).unwrap_or(u32::MAX),
            floored_at_minimum: false,
        }
    }
}

/// Expected weekly weight change in kilograms (negative when losing)
pub fn weekly_weight_change_kg(goal: &GoalSpec) -> f64 {
    goal.signed_adjustment() as f64 * 7.0 / KCAL_PER_KG_BODY_MASS
}

/// Estimated whole weeks to reach a target weight
///
/// `None` when the goal is maintain, the adjustment is zero, either weight is
/// unusable, or the target lies in the opposite direction of the goal.
pub fn weeks_to_target(current_kg: f64, target_kg: f64, goal: &GoalSpec) -> Option<u32> {
    if !(current_kg.is_finite() && target_kg.is_finite()) || current_kg <= 0.0 || target_kg <= 0.0 {
        return None;
    }
    let weekly = weekly_weight_change_kg(goal);
    if weekly == 0.0 {
        return None;
    }
    let weeks = (target_kg - current_kg) / weekly;
    if weeks < 0.0 {
        return None;
    }
    Some(weeks.ceil() as u32)
}
