//! Property tests for the scope fold and the variable merge.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use tiers_core::config::{Configuration, EnvironmentVariable, merge_environment_variables};

const ENVIRONMENTS: [&str; 4] = ["development", "preview", "production", "acceptance"];

fn environment_set() -> impl Strategy<Value = BTreeSet<String>> {
    proptest::sample::subsequence(ENVIRONMENTS.to_vec(), 0..=ENVIRONMENTS.len())
        .prop_map(|envs| envs.into_iter().map(str::to_string).collect())
}

fn variable() -> impl Strategy<Value = EnvironmentVariable> {
    ("[A-D]", "[a-c]{1,2}", environment_set()).prop_map(|(key, value, environment)| {
        EnvironmentVariable {
            key,
            value,
            environment,
        }
    })
}

fn variables() -> impl Strategy<Value = Vec<EnvironmentVariable>> {
    proptest::collection::vec(variable(), 0..6)
}

fn optional_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![Just(None), Just(Some(String::new())), "[a-z]{1,6}".prop_map(Some)]
}

fn configuration() -> impl Strategy<Value = Configuration> {
    (
        optional_text(),
        optional_text(),
        proptest::option::of(any::<bool>()),
        variables(),
    )
        .prop_map(|(team_id, region, manual, environment_variables)| {
            let mut config = Configuration::new();
            config.team_id = team_id;
            config.project_config.serverless_function_region = region;
            config.project_config.manual_production_deployment = manual;
            config.project_config.environment_variables = environment_variables;
            config
        })
}

/// Lists with non-empty environment sets and no repeated `(key, environment)` slot.
fn distinct_slot_variables() -> impl Strategy<Value = Vec<EnvironmentVariable>> {
    proptest::collection::btree_map(
        ("[A-D]", proptest::sample::select(ENVIRONMENTS.to_vec())),
        "[a-c]{1,2}",
        0..10,
    )
    .prop_map(|by_slot| {
        by_slot
            .into_iter()
            .map(|((key, environment), value)| {
                EnvironmentVariable::new(key, value, [environment])
            })
            .collect()
    })
}

/// `(key, environment) -> value` with later entries winning.
fn slot_values(variables: &[EnvironmentVariable]) -> BTreeMap<(String, String), String> {
    let mut values = BTreeMap::new();
    for v in variables {
        for env in v.normalized_environments() {
            values.insert((v.key.clone(), env), v.value.clone());
        }
    }
    values
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Value each `(key, environment)` slot ends up with.
fn slots(variables: &[EnvironmentVariable]) -> BTreeSet<(String, String, String)> {
    variables
        .iter()
        .flat_map(|v| {
            v.normalized_environments()
                .into_iter()
                .map(move |env| (v.key.clone(), env, v.value.clone()))
        })
        .collect()
}

proptest! {
    #[test]
    fn merge_is_idempotent(parent in variables(), child in variables()) {
        let once = merge_environment_variables(&parent, &child);
        let twice = merge_environment_variables(&once, &child);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merging_a_list_with_itself_keeps_its_content(list in distinct_slot_variables()) {
        let merged = merge_environment_variables(&list, &list);
        prop_assert_eq!(slots(&merged), slots(&list));
    }

    #[test]
    fn uncovered_parent_slots_keep_parent_value(parent in variables(), child in variables()) {
        let merged = slot_values(&merge_environment_variables(&parent, &child));
        let covered = slot_values(&child);

        for (slot, value) in slot_values(&parent) {
            if !covered.contains_key(&slot) {
                prop_assert_eq!(merged.get(&slot), Some(&value));
            }
        }
    }

    #[test]
    fn child_slots_always_win(parent in variables(), child in variables()) {
        let merged = slots(&merge_environment_variables(&parent, &child));
        // Re-merging the child alone over nothing gives its own last-wins slots.
        for (key, env, value) in slots(&merge_environment_variables(&[], &child)) {
            prop_assert!(merged.contains(&(key, env, value)));
        }
    }

    #[test]
    fn every_slot_is_covered_exactly_once(parent in variables(), child in variables()) {
        let merged = merge_environment_variables(&parent, &child);

        let mut expected = BTreeSet::new();
        for v in parent.iter().chain(&child) {
            for env in v.normalized_environments() {
                expected.insert((v.key.clone(), env));
            }
        }

        let mut seen = BTreeSet::new();
        for v in &merged {
            prop_assert!(!v.environment.is_empty());
            for env in &v.environment {
                prop_assert!(seen.insert((v.key.clone(), env.clone())));
            }
        }
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn merged_values_are_grouped(parent in variables(), child in variables()) {
        let merged = merge_environment_variables(&parent, &child);
        let mut pairs = BTreeSet::new();
        for v in &merged {
            prop_assert!(pairs.insert((v.key.clone(), v.value.clone())));
        }
    }

    #[test]
    fn non_empty_child_scalar_wins(parent in configuration(), child in configuration()) {
        let merged = child.extend(&parent);

        match child.team_id.as_deref() {
            Some(team) if !team.is_empty() => {
                prop_assert_eq!(merged.team_id.as_deref(), Some(team));
            }
            _ => prop_assert_eq!(non_empty(&merged.team_id), non_empty(&parent.team_id)),
        }
        match child.project_config.manual_production_deployment {
            Some(flag) => prop_assert_eq!(merged.project_config.manual_production_deployment, Some(flag)),
            None => prop_assert_eq!(
                merged.project_config.manual_production_deployment,
                parent.project_config.manual_production_deployment
            ),
        }
    }

    #[test]
    fn extend_does_not_touch_inputs(parent in configuration(), child in configuration()) {
        let (parent_before, child_before) = (parent.clone(), child.clone());
        let _ = child.extend(&parent);
        prop_assert_eq!(parent, parent_before);
        prop_assert_eq!(child, child_before);
    }
}
