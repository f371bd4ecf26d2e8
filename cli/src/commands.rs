//! Command-line surface and command execution

use crate::config::{AppConfig, OutputFormat};
use crate::draft::load_draft;
use crate::error::CliError;
use crate::report::{render, BmiReport, MacroReport, PlanReport, PlanStatus, RebalanceReport};
use clap::{Parser, Subcommand};
use macromate_shared::{
    calculate_bmi_result, compute_grams, get_missing_fields_labels, healthy_weight_range_kg, rebalance_split,
    validate_macro_split, BiologicalSex, HeightUnit, InputValue, Macro, MacroSplit, OnboardingDraft,
    PersonalMeasurement, WeightUnit,
};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Parser)]
#[command(name = "macromate")]
#[command(about = "MacroMate nutrition calculator", long_about = None, version)]
pub struct Cli {
    /// Print JSON regardless of the configured output format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the nutrition plan for a saved onboarding draft
    Plan {
        /// Draft file (.json or .toml)
        #[arg(long)]
        draft: PathBuf,
        /// Require a complete, valid profile instead of previewing
        #[arg(long)]
        finalize: bool,
    },
    /// Calculate BMI from a weight and height in any supported unit
    Bmi {
        #[arg(long)]
        weight: String,
        #[arg(long, default_value = "kg")]
        weight_unit: WeightUnit,
        /// Centimeters, or feet'inches" with --height-unit ft-in
        #[arg(long)]
        height: String,
        #[arg(long, default_value = "cm")]
        height_unit: HeightUnit,
    },
    /// Convert a calorie target into gram targets
    Macros {
        #[arg(long)]
        calories: f64,
        #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
        protein: i32,
        #[arg(long, default_value_t = 40, allow_negative_numbers = true)]
        carbs: i32,
        #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
        fat: i32,
    },
    /// Move one macro and redistribute the change over the other two
    Rebalance {
        #[arg(long)]
        protein: i32,
        #[arg(long)]
        carbs: i32,
        #[arg(long)]
        fat: i32,
        /// Macro being moved: protein, carbs or fat
        #[arg(long)]
        changed: Macro,
        /// New percentage for the moved macro
        #[arg(long, allow_negative_numbers = true)]
        value: i32,
    },
}

/// Run a parsed command and return the rendered output
pub fn run(cli: Cli, config: &AppConfig) -> Result<String, CliError> {
    let mut output = config.output.clone();
    if cli.json {
        output.format = OutputFormat::Json;
    }

    match cli.command {
        Command::Plan { draft, finalize } => {
            let draft = load_draft(&draft)?;
            render(&plan(draft, finalize)?, &output)
        }
        Command::Bmi {
            weight,
            weight_unit,
            height,
            height_unit,
        } => render(&bmi(&weight, weight_unit, &height, height_unit), &output),
        Command::Macros {
            calories,
            protein,
            carbs,
            fat,
        } => render(&macros(calories, MacroSplit::new(protein, carbs, fat)), &output),
        Command::Rebalance {
            protein,
            carbs,
            fat,
            changed,
            value,
        } => render(&rebalance(MacroSplit::new(protein, carbs, fat), changed, value), &output),
    }
}

/// Plan for a draft, finalizing it into a profile first when asked
pub fn plan(draft: OnboardingDraft, finalize: bool) -> Result<PlanReport, CliError> {
    if finalize {
        let profile = draft.finalize()?;
        info!("profile validated");
        return Ok(PlanReport {
            status: PlanStatus::Finalized,
            weight_kg: profile.weight_kg(),
            height_cm: profile.height_cm(),
            missing_fields: Vec::new(),
            plan: profile.plan(),
        });
    }

    let measurement = draft.measurement();
    let missing_fields = get_missing_fields_labels(&draft.missing_fields());
    if !missing_fields.is_empty() {
        debug!(missing = ?missing_fields, "previewing incomplete draft");
    }
    Ok(PlanReport {
        status: PlanStatus::Preview,
        weight_kg: measurement.weight_kg(),
        height_cm: measurement.height_cm(),
        missing_fields,
        plan: draft.preview_plan(),
    })
}

pub fn bmi(weight: &str, weight_unit: WeightUnit, height: &str, height_unit: HeightUnit) -> BmiReport {
    let measurement = PersonalMeasurement {
        age_years: None,
        weight: Some(InputValue::from(weight)),
        weight_unit,
        height: Some(InputValue::from(height)),
        height_unit,
        // BMI does not depend on sex
        sex: BiologicalSex::Female,
    };
    BmiReport {
        weight_kg: measurement.weight_kg(),
        height_cm: measurement.height_cm(),
        bmi: calculate_bmi_result(&measurement),
        healthy_weight_range_kg: healthy_weight_range_kg(measurement.height_cm()),
    }
}

pub fn macros(calories: f64, split: MacroSplit) -> MacroReport {
    let problem = validate_macro_split(&split).err();
    MacroReport {
        calories,
        split,
        split_valid: problem.is_none(),
        problem,
        grams: compute_grams(calories, &split),
    }
}

pub fn rebalance(before: MacroSplit, changed: Macro, value: i32) -> RebalanceReport {
    let after = rebalance_split(&before, changed, value);
    RebalanceReport {
        before,
        after,
        changed,
        total: after.total(),
        problem: validate_macro_split(&after).err(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "macromate",
            "bmi",
            "--weight",
            "154",
            "--weight-unit",
            "LBS",
            "--height",
            "5'10\"",
            "--height-unit",
            "ft-in",
        ])
        .unwrap();
        match cli.command {
            Command::Bmi {
                weight_unit,
                height_unit,
                ..
            } => {
                assert_eq!(weight_unit, WeightUnit::Pounds);
                assert_eq!(height_unit, HeightUnit::FeetInches);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_macro() {
        let result = Cli::try_parse_from([
            "macromate",
            "rebalance",
            "--protein",
            "30",
            "--carbs",
            "40",
            "--fat",
            "30",
            "--changed",
            "fiber",
            "--value",
            "20",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_macros_flags_invalid_split() {
        let report = macros(2000.0, MacroSplit::new(30, 40, 29));
        assert!(!report.split_valid);
        assert_eq!(
            report.problem.as_deref(),
            Some("Macros must add up to 100% (currently 99%)")
        );
        assert_eq!(report.grams.protein_grams, 150);
    }
}
