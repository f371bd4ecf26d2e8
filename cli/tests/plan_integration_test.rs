//! Integration tests for the plan command

use macromate_cli::{
    commands::{self, Cli},
    config::{AppConfig, OutputFormat},
    draft::load_draft,
    error::CliError,
    report::PlanStatus,
};
use clap::Parser;
use macromate_shared::{BmiCategory, ProfileError};
use serde_json::Value;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn json_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.output.format = OutputFormat::Json;
    config
}

#[test]
fn test_complete_draft_finalizes() {
    let draft = load_draft(&fixture("complete_draft.json")).unwrap();
    let report = commands::plan(draft, true).unwrap();

    assert_eq!(report.status, PlanStatus::Finalized);
    assert_eq!(report.plan.energy.bmr, 1649);
    assert_eq!(report.plan.energy.tdee, 2556);
    assert_eq!(report.plan.daily_calories.value, 2056);
    assert_eq!(report.plan.macros.protein_grams, 103);
    assert_eq!(report.plan.macros.carb_grams, 257);
    assert_eq!(report.plan.macros.fat_grams, 69);
    assert_eq!(report.plan.weeks_to_target, Some(11));
    assert_eq!(report.plan.bmi.category, BmiCategory::Normal);
}

#[test]
fn test_imperial_toml_draft() {
    let draft = load_draft(&fixture("imperial_draft.toml")).unwrap();
    let report = commands::plan(draft, true).unwrap();

    // non-binary falls back to the female offset
    assert_eq!(report.plan.energy.bmr, 1427);
    assert_eq!(report.plan.energy.tdee, 1962);
    assert_eq!(report.plan.daily_calories.value, 2212);
    assert_eq!(report.plan.macros.protein_grams, 166);
    assert_eq!(report.plan.macros.carb_grams, 221);
    assert_eq!(report.plan.macros.fat_grams, 74);
    assert!((report.height_cm - 167.64).abs() < 1e-9);
}

#[test]
fn test_partial_draft_previews() {
    let draft = load_draft(&fixture("partial_draft.json")).unwrap();
    let report = commands::plan(draft, false).unwrap();

    assert_eq!(report.status, PlanStatus::Preview);
    assert!(!report.plan.is_complete());
    assert_eq!(report.plan.daily_calories.value, 0);
    assert_eq!(report.plan.bmi.category, BmiCategory::Normal);
    assert_eq!(report.missing_fields, vec!["Age", "Activity Level", "Goal"]);
}

#[test]
fn test_partial_draft_fails_to_finalize() {
    let draft = load_draft(&fixture("partial_draft.json")).unwrap();
    let err = commands::plan(draft, true).unwrap_err();

    match &err {
        CliError::Profile(ProfileError::MissingFields(labels)) => {
            assert_eq!(labels, &vec!["Age", "Activity Level", "Goal"]);
        }
        other => panic!("expected missing fields, got {:?}", other),
    }
    assert_eq!(
        err.details(),
        vec!["Age: required", "Activity Level: required", "Goal: required"]
    );
}

#[test]
fn test_run_plan_as_json() {
    let path = fixture("complete_draft.json");
    let cli = Cli::try_parse_from([
        "macromate",
        "plan",
        "--draft",
        path.to_str().unwrap(),
        "--finalize",
    ])
    .unwrap();

    let output = commands::run(cli, &json_config()).unwrap();
    let value: Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["status"], "finalized");
    assert_eq!(value["plan"]["daily_calories"]["value"], 2056);
    assert!(value.get("missing_fields").is_none());
}

#[test]
fn test_run_plan_pretty() {
    let path = fixture("complete_draft.json");
    let cli = Cli::try_parse_from(["macromate", "plan", "--draft", path.to_str().unwrap()]).unwrap();

    let output = commands::run(cli, &AppConfig::default()).unwrap();
    assert!(output.starts_with("Nutrition plan (preview)"));
    assert!(output.contains("Daily target:   2056 kcal"));
    assert!(output.contains("Weeks to goal:  11"));
}

#[test]
fn test_missing_draft_file() {
    let cli = Cli::try_parse_from(["macromate", "plan", "--draft", "no/such/draft.json"]).unwrap();
    let err = commands::run(cli, &AppConfig::default()).unwrap_err();
    assert!(err.to_string().starts_with("Failed to read no/such/draft.json"));
}
