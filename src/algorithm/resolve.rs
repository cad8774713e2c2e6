//! Slice label resolution
//!
//! The scenario and age-group columns are encoded differently across data
//! vintages (integer `1`, `"SSP1"`, `"1"`; `"15-24"`, `"15_24"`, `1524`).
//! Resolution walks an ordered list of rules and picks the first distinct
//! value, in encounter order, matched by the first rule that matches
//! anything. Rule order decides the outcome on ambiguous inputs.

use log::{debug, info};

use crate::error::{ResolutionError, Result};
use crate::loader::RawTable;
use crate::models::{LabelValue, SliceLabels};

/// Defines a criterion a label value must meet
pub trait FilterCriteria<T: ?Sized> {
    /// Determine if an entity meets the filter criteria
    fn meets_criteria(&self, entity: &T) -> bool;
}

/// A named predicate over label values
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    /// Human-readable description, used in logs
    pub name: &'static str,
    predicate: fn(&LabelValue) -> bool,
}

impl LabelRule {
    #[must_use]
    pub const fn new(name: &'static str, predicate: fn(&LabelValue) -> bool) -> Self {
        Self { name, predicate }
    }
}

impl FilterCriteria<LabelValue> for LabelRule {
    fn meets_criteria(&self, entity: &LabelValue) -> bool {
        (self.predicate)(entity)
    }
}

fn is_integer_one(value: &LabelValue) -> bool {
    value.is_int(1)
}

fn is_ssp1_tag(value: &LabelValue) -> bool {
    value.is_text("SSP1")
}

fn is_numeral_one(value: &LabelValue) -> bool {
    value.is_text("1")
}

/// Substrings that identify the 15-24 age band
const YOUTH_PATTERNS: [&str; 3] = ["15-24", "15_24", "1524"];

fn is_youth_band(value: &LabelValue) -> bool {
    let text = value.as_text();
    YOUTH_PATTERNS.iter().any(|pattern| text.contains(pattern))
}

fn mentions_fifteen(value: &LabelValue) -> bool {
    value.as_text().contains("15")
}

/// Scenario rules, highest priority first
pub const SCENARIO_RULES: [LabelRule; 3] = [
    LabelRule::new("integer 1", is_integer_one),
    LabelRule::new("string \"SSP1\"", is_ssp1_tag),
    LabelRule::new("string \"1\"", is_numeral_one),
];

/// Age-group rules, highest priority first
pub const AGE_GROUP_RULES: [LabelRule; 2] = [
    LabelRule::new("15-24 band", is_youth_band),
    LabelRule::new("mentions 15", mentions_fifteen),
];

/// Pick a label using an ordered rule list
///
/// Returns the first value matched by the highest-priority rule that matches
/// at least one value, together with that rule.
#[must_use]
pub fn select_label<'a>(
    values: &'a [LabelValue],
    rules: &[LabelRule],
) -> Option<(&'a LabelValue, LabelRule)> {
    rules.iter().find_map(|rule| {
        values
            .iter()
            .find(|value| rule.meets_criteria(value))
            .map(|value| (value, *rule))
    })
}

/// Every value a rule matches, in encounter order
#[must_use]
pub fn candidates<'a>(values: &'a [LabelValue], rule: &LabelRule) -> Vec<&'a LabelValue> {
    values.iter().filter(|value| rule.meets_criteria(value)).collect()
}

/// Detect the scenario label among the distinct scenario values
pub fn resolve_scenario_label(
    values: &[LabelValue],
) -> std::result::Result<LabelValue, ResolutionError> {
    match select_label(values, &SCENARIO_RULES) {
        Some((label, rule)) => {
            debug!("Scenario label {} matched rule '{}'", label.to_debug_string(), rule.name);
            Ok(label.clone())
        }
        None => Err(ResolutionError::ScenarioNotFound {
            observed: values.to_vec(),
        }),
    }
}

/// Detect the youth age-group label among the distinct age values
pub fn resolve_age_group_label(
    values: &[LabelValue],
) -> std::result::Result<LabelValue, ResolutionError> {
    match select_label(values, &AGE_GROUP_RULES) {
        Some((label, rule)) => {
            let matched = candidates(values, &rule);
            if matched.len() > 1 {
                debug!(
                    "Rule '{}' matched {} age groups; taking the first ({})",
                    rule.name,
                    matched.len(),
                    label.to_debug_string()
                );
            }
            Ok(label.clone())
        }
        None => Err(ResolutionError::AgeGroupNotFound {
            observed: values.to_vec(),
        }),
    }
}

/// Resolve both labels from their distinct value sets
pub fn resolve_from_values(
    scenario_values: &[LabelValue],
    age_values: &[LabelValue],
) -> std::result::Result<SliceLabels, ResolutionError> {
    Ok(SliceLabels {
        scenario: resolve_scenario_label(scenario_values)?,
        age_group: resolve_age_group_label(age_values)?,
    })
}

/// Resolve the scenario and age-group labels of a loaded table
pub fn resolve_labels(table: &RawTable) -> Result<SliceLabels> {
    let scenario_values = table.scenario_values()?;
    let age_values = table.age_values()?;
    debug!(
        "Distinct scenario values: {:?}; distinct age values: {:?}",
        scenario_values, age_values
    );

    let labels = resolve_from_values(&scenario_values, &age_values)?;
    info!(
        "Resolved scenario label {} and age group {}",
        labels.scenario.to_debug_string(),
        labels.age_group.to_debug_string()
    );
    Ok(labels)
}
