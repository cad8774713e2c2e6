//! Tests for scenario and age-group label resolution

use crate::utils::{int, raw_table, text};
use projection_explorer::algorithm::resolve::{
    AGE_GROUP_RULES, SCENARIO_RULES, resolve_from_values, select_label,
};
use projection_explorer::{ExplorerError, ResolutionError, resolve_labels};

#[test]
fn test_integer_scenario_has_priority() {
    let table = raw_table(&[
        ("AFG", int(1), "Both", text("15-24"), 2025, 5.0),
        ("AFG", int(2), "Both", text("15-24"), 2025, 4.0),
    ]);
    let labels = resolve_labels(&table).unwrap();
    assert_eq!(labels.scenario, int(1));
    assert_eq!(labels.age_group, text("15-24"));
}

#[test]
fn test_priority_holds_on_mixed_values() {
    let values = vec![text("SSP1"), int(1), text("1")];
    let (label, rule) = select_label(&values, &SCENARIO_RULES).unwrap();
    assert_eq!(label, &int(1));
    assert_eq!(rule.name, SCENARIO_RULES[0].name);
}

#[test]
fn test_tagged_scenario_labels() {
    let table = raw_table(&[
        ("AFG", text("SSP2"), "Both", text("15-24"), 2025, 5.0),
        ("AFG", text("SSP1"), "Both", text("15-24"), 2025, 5.5),
    ]);
    assert_eq!(resolve_labels(&table).unwrap().scenario, text("SSP1"));
}

#[test]
fn test_youth_fallback_to_broad_match() {
    let ages = vec![text("0-14"), text("25-64"), text("65+"), text("15+")];
    let labels = resolve_from_values(&[int(1)], &ages).unwrap();
    assert_eq!(labels.age_group, text("15+"));
}

#[test]
fn test_numeric_age_code() {
    let values = vec![int(1014), int(1524), int(2529)];
    let (label, _) = select_label(&values, &AGE_GROUP_RULES).unwrap();
    assert_eq!(label, &int(1524));
}

#[test]
fn test_missing_scenario_propagates_observed_values() {
    let table = raw_table(&[
        ("AFG", int(3), "Both", text("15-24"), 2025, 5.0),
        ("AFG", int(2), "Both", text("15-24"), 2025, 4.0),
    ]);
    match resolve_labels(&table) {
        Err(ExplorerError::Resolution(ResolutionError::ScenarioNotFound { observed })) => {
            assert_eq!(observed, vec![int(3), int(2)]);
        }
        other => panic!("expected ScenarioNotFound, got {other:?}"),
    }
}

#[test]
fn test_missing_age_group() {
    let table = raw_table(&[("AFG", int(1), "Both", text("25-64"), 2025, 5.0)]);
    let err = resolve_labels(&table).unwrap_err();
    assert!(err.to_string().contains("youth age-group label not found"));
    assert!(err.to_string().contains("\"25-64\""));
}
