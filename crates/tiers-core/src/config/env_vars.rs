//! Environment variable list merging
//!
//! Lists are merged per `(key, environment)` slot: the parent list is laid
//! down first, then the child list, so the child wins any slot both cover and
//! slots only one side covers survive. Slots sharing a value are then folded
//! back into a single multi-environment entry.

use std::collections::{BTreeMap, BTreeSet};

use super::policy::Policy;
use super::policy::rules::MergeByKeyAndEnvironment;
use super::schema::EnvironmentVariable;

/// Merge `child` over `parent`.
///
/// Output is deterministic: sorted by key, then by each entry's (sorted)
/// environment list. Empty environment sets are expanded to the standard
/// environments before merging, so no output entry has an empty set.
pub fn merge_environment_variables(
    parent: &[EnvironmentVariable],
    child: &[EnvironmentVariable],
) -> Vec<EnvironmentVariable> {
    let mut slots: BTreeMap<&str, BTreeMap<String, &str>> = BTreeMap::new();

    for variable in parent.iter().chain(child) {
        let by_environment = slots.entry(variable.key.as_str()).or_default();
        for environment in variable.normalized_environments() {
            by_environment.insert(environment, variable.value.as_str());
        }
    }

    let mut merged = Vec::new();
    for (key, by_environment) in slots {
        let mut groups: BTreeMap<&str, BTreeSet<String>> = BTreeMap::new();
        for (environment, value) in by_environment {
            groups.entry(value).or_default().insert(environment);
        }

        let mut entries: Vec<EnvironmentVariable> = groups
            .into_iter()
            .map(|(value, environment)| EnvironmentVariable {
                key: key.to_string(),
                value: value.to_string(),
                environment,
            })
            .collect();
        entries.sort_by(|a, b| a.environment.cmp(&b.environment));
        merged.extend(entries);
    }

    merged
}

impl Policy<Vec<EnvironmentVariable>> for MergeByKeyAndEnvironment {
    fn apply(
        child: &Vec<EnvironmentVariable>,
        parent: &Vec<EnvironmentVariable>,
    ) -> Vec<EnvironmentVariable> {
        merge_environment_variables(parent, child)
    }

    fn is_unset(value: &Vec<EnvironmentVariable>) -> bool {
        value.is_empty()
    }
}
