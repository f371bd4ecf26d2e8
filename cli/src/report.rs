//! Command results and their rendering
//!
//! Every report serializes to JSON as-is; pretty output uses the configured
//! display units.

use crate::config::{OutputConfig, OutputFormat};
use crate::error::CliError;
use macromate_shared::{
    format_height, format_weight, BmiResult, Macro, MacroGramTargets, MacroSplit, NutritionPlan, WeightUnit,
};
use serde::Serialize;

/// Human-readable rendering of a report
pub trait Render {
    fn pretty(&self, output: &OutputConfig) -> String;
}

/// Render a report in the configured format
pub fn render<T: Serialize + Render>(report: &T, output: &OutputConfig) -> Result<String, CliError> {
    match output.format {
        OutputFormat::Json => serde_json::to_string_pretty(report).map_err(CliError::Render),
        OutputFormat::Pretty => Ok(report.pretty(output)),
    }
}

fn line(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<16}{}", format!("{}:", label), value)
}

fn signed_weight(kg: f64, unit: WeightUnit) -> String {
    format!("{:+.2} {}", unit.from_kg(kg), unit.abbreviation())
}

fn split_summary(split: &MacroSplit) -> String {
    format!(
        "{}% protein / {}% carbs / {}% fat",
        split.protein_percent, split.carbs_percent, split.fat_percent
    )
}

fn gram_lines(grams: &MacroGramTargets) -> Vec<String> {
    Macro::ALL
        .iter()
        .map(|nutrient| {
            let label = match nutrient {
                Macro::Protein => "Protein",
                Macro::Carbs => "Carbs",
                Macro::Fat => "Fat",
            };
            line(label, format!("{} g", grams.get(*nutrient)))
        })
        .collect()
}

// ============================================================================
// Plan
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Computed from a validated profile
    Finalized,
    /// Computed from a draft that may be incomplete
    Preview,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanReport {
    pub status: PlanStatus,
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_fields: Vec<String>,
    pub plan: NutritionPlan,
}

impl Render for PlanReport {
    fn pretty(&self, output: &OutputConfig) -> String {
        let plan = &self.plan;
        let title = match self.status {
            PlanStatus::Finalized => "Nutrition plan",
            PlanStatus::Preview => "Nutrition plan (preview)",
        };

        let mut lines = vec![
            title.to_string(),
            line("Weight", format_weight(self.weight_kg, output.weight_unit)),
            line("Height", format_height(self.height_cm, output.height_unit)),
            line("BMI", format!("{:.1} ({})", plan.bmi.display_value(), plan.bmi.category)),
        ];

        let (low, high) = plan.healthy_weight_range_kg;
        if high > 0.0 {
            lines.push(line(
                "Healthy weight",
                format!(
                    "{} - {}",
                    format_weight(low, output.weight_unit),
                    format_weight(high, output.weight_unit)
                ),
            ));
        }

        if !plan.is_complete() {
            lines.push(line("Targets", "N/A (need age, weight and height)"));
        } else {
            lines.push(line("BMR", format!("{} kcal", plan.energy.bmr)));
            lines.push(line("TDEE", format!("{} kcal", plan.energy.tdee)));
            let floor_note = if plan.daily_calories.floored_at_minimum {
                " (raised to the safe minimum)"
            } else {
                ""
            };
            lines.push(line(
                "Daily target",
                format!("{} kcal{}", plan.daily_calories.value, floor_note),
            ));
            let split_note = if plan.macro_split_valid {
                String::new()
            } else {
                format!(" (provisional: adds up to {}%)", plan.macro_split.total())
            };
            lines.push(line("Split", format!("{}{}", split_summary(&plan.macro_split), split_note)));
            lines.extend(gram_lines(&plan.macros));
        }

        if plan.weekly_change_kg != 0.0 {
            lines.push(line(
                "Weekly change",
                signed_weight(plan.weekly_change_kg, output.weight_unit),
            ));
        }
        if let Some(weeks) = plan.weeks_to_target {
            lines.push(line("Weeks to goal", weeks));
        }
        if !self.missing_fields.is_empty() {
            lines.push(line("Missing", self.missing_fields.join(", ")));
        }

        lines.join("\n")
    }
}

// ============================================================================
// BMI
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiReport {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub bmi: BmiResult,
    pub healthy_weight_range_kg: (f64, f64),
}

impl Render for BmiReport {
    fn pretty(&self, output: &OutputConfig) -> String {
        let (low, high) = self.healthy_weight_range_kg;
        let range = if high > 0.0 {
            format!(
                "{} - {}",
                format_weight(low, output.weight_unit),
                format_weight(high, output.weight_unit)
            )
        } else {
            "N/A".to_string()
        };
        [
            line("Weight", format_weight(self.weight_kg, output.weight_unit)),
            line("Height", format_height(self.height_cm, output.height_unit)),
            line("BMI", format!("{:.1}", self.bmi.display_value())),
            line("Category", self.bmi.category),
            line("Healthy weight", range),
        ]
        .join("\n")
    }
}

// ============================================================================
// Macros
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroReport {
    pub calories: f64,
    pub split: MacroSplit,
    pub split_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    pub grams: MacroGramTargets,
}

impl Render for MacroReport {
    fn pretty(&self, _output: &OutputConfig) -> String {
        let mut lines = vec![
            line("Calories", format!("{:.0} kcal", self.calories.max(0.0))),
            line("Split", split_summary(&self.split)),
        ];
        lines.extend(gram_lines(&self.grams));
        if let Some(problem) = &self.problem {
            lines.push(line("Warning", problem));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RebalanceReport {
    pub before: MacroSplit,
    pub after: MacroSplit,
    pub changed: Macro,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
}

impl Render for RebalanceReport {
    fn pretty(&self, _output: &OutputConfig) -> String {
        let mut lines = vec![
            line("Before", split_summary(&self.before)),
            line("After", split_summary(&self.after)),
            line("Total", format!("{}%", self.total)),
        ];
        if let Some(problem) = &self.problem {
            lines.push(line("Warning", problem));
        }
        lines.join("\n")
    }
}
