//! End-to-end nutrition plan
//!
//! Chains the engines in order: units -> BMI and energy -> goal adjustment ->
//! macro grams. Incomplete measurements flow through as zero results.

use crate::bmi::{calculate_bmi_result, healthy_weight_range_kg, BmiResult};
use crate::energy::{compute_energy, ActivityLevel, EnergyResult};
use crate::goals::{compute_daily_calories, weekly_weight_change_kg, weeks_to_target, DailyCalorieTarget, GoalSpec};
use crate::macros::{compute_grams, validate_split, MacroGramTargets, MacroSplit};
use crate::measurement::PersonalMeasurement;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Everything the dashboard shows for one set of inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionPlan {
    pub bmi: BmiResult,
    pub energy: EnergyResult,
    pub daily_calories: DailyCalorieTarget,
    pub macro_split: MacroSplit,
    /// False means `macros` is provisional
    pub macro_split_valid: bool,
    pub macros: MacroGramTargets,
    pub healthy_weight_range_kg: (f64, f64),
    pub weekly_change_kg: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weeks_to_target: Option<u32>,
}

impl NutritionPlan {
    /// Whether the measurement was complete enough to produce targets
    pub fn is_complete(&self) -> bool {
        self.energy.tdee > 0
    }
}

/// Compute a full plan from a measurement, activity, goal and split
pub fn compute_plan(
    measurement: &PersonalMeasurement,
    activity: Option<ActivityLevel>,
    goal: &GoalSpec,
    split: &MacroSplit,
    target_weight_kg: Option<f64>,
) -> NutritionPlan {
    let weight_kg = measurement.weight_kg();
    let height_cm = measurement.height_cm();

    trace!(
        weight_kg,
        height_cm,
        age_years = measurement.age(),
        sex = %measurement.sex,
        activity = ?activity,
        goal = %goal.primary_goal,
        "computing nutrition plan"
    );

    let bmi = calculate_bmi_result(measurement);
    let energy = compute_energy(measurement, activity);
    let daily_calories = compute_daily_calories(energy.tdee, goal);
    let macros = compute_grams(f64::from(daily_calories.value), split);

    let plan = NutritionPlan {
        bmi,
        energy,
        daily_calories,
        macro_split: *split,
        macro_split_valid: validate_split(split),
        macros,
        healthy_weight_range_kg: healthy_weight_range_kg(height_cm),
        weekly_change_kg: weekly_weight_change_kg(goal),
        weeks_to_target: target_weight_kg.and_then(|target| weeks_to_target(weight_kg, target, goal)),
    };

    if !plan.is_complete() {
        debug!(
            has_age = measurement.age() > 0,
            has_weight = weight_kg > 0.0,
            has_height = height_cm > 0.0,
            "measurement incomplete, plan has zero targets"
        );
    }

    plan
}
