//! Scope configuration merging
//!
//! Implements the fold of one scope over its parent:
//! Global -> Site -> Site-component
//!
//! Field policies are declared once per struct below; the inherit logic is
//! generated from them, so every scope level shares one implementation.

use super::policy::rules::{OverrideIfNonEmpty, Recurse};
use super::policy::{FieldPolicies, Inherit, OverridePolicy, Policy};
use super::schema::{
    Configuration, GitRepository, PasswordProtection, ProjectConfig, VercelAuthentication,
};
use crate::inherit_fields;

inherit_fields!(Configuration {
    team_id => OverrideIfNonEmpty,
    api_token => OverrideIfNonEmpty,
    project_config => Recurse,
});

inherit_fields!(ProjectConfig {
    name => OverrideIfNonEmpty,
    framework => OverrideIfNonEmpty,
    build_command => OverrideIfNonEmpty,
    ignore_command => OverrideIfNonEmpty,
    root_directory => OverrideIfNonEmpty,
    serverless_function_region => OverrideIfNonEmpty,
    manual_production_deployment => OverrideIfSet,
    git_repository => Recurse,
    vercel_authentication => Recurse,
    password_protection => Recurse,
    environment_variables => MergeByKeyAndEnvironment,
    domains => AppendCollection,
    protection_bypass_for_automation => OverrideIfSet,
});

inherit_fields!(GitRepository {
    production_branch => OverrideIfNonEmpty,
    vcs_type => OverrideIfNonEmpty,
    repo => OverrideIfNonEmpty,
});

inherit_fields!(VercelAuthentication {
    deployment_type => OverrideIfNonEmpty,
});

// A new password replaces the whole gate: it must not silently pick up the
// parent's deployment type.
impl Inherit for PasswordProtection {
    fn inherit(&self, parent: &Self) -> Self {
        if !OverrideIfNonEmpty::is_unset(&self.password) {
            return self.clone();
        }
        Self {
            password: OverrideIfNonEmpty::apply(&self.password, &parent.password),
            deployment_type: OverrideIfNonEmpty::apply(
                &self.deployment_type,
                &parent.deployment_type,
            ),
        }
    }

    fn is_unset(&self) -> bool {
        OverrideIfNonEmpty::is_unset(&self.password)
            && OverrideIfNonEmpty::is_unset(&self.deployment_type)
    }
}

impl FieldPolicies for PasswordProtection {
    const FIELD_POLICIES: &'static [(&'static str, OverridePolicy)] = &[
        ("password", OverridePolicy::OverrideIfNonEmpty),
        ("deployment_type", OverridePolicy::OverrideIfNonEmpty),
    ];
}

impl Configuration {
    /// Fold this (child) configuration over `parent`.
    ///
    /// Neither input is modified. An entirely unset child does not take part
    /// and the parent is returned as is. Over an unset parent the child keeps
    /// its values, with its variable list merged.
    pub fn extend(&self, parent: &Configuration) -> Configuration {
        Recurse::apply(self, parent)
    }

    /// True when every field is unset; such a scope is treated as absent.
    pub fn is_absent(&self) -> bool {
        Inherit::is_unset(self)
    }

    /// Declared policy of every leaf field, as dotted paths.
    pub fn field_policies() -> Vec<(String, OverridePolicy)> {
        let mut table = Vec::new();
        collect_policies(&mut table, "", Configuration::FIELD_POLICIES);
        table
    }
}

fn nested_fields(field: &str) -> Option<&'static [(&'static str, OverridePolicy)]> {
    match field {
        "project_config" => Some(ProjectConfig::FIELD_POLICIES),
        "git_repository" => Some(GitRepository::FIELD_POLICIES),
        "vercel_authentication" => Some(VercelAuthentication::FIELD_POLICIES),
        "password_protection" => Some(PasswordProtection::FIELD_POLICIES),
        _ => None,
    }
}

fn collect_policies(
    table: &mut Vec<(String, OverridePolicy)>,
    prefix: &str,
    fields: &[(&'static str, OverridePolicy)],
) {
    for &(field, policy) in fields {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match nested_fields(field) {
            Some(inner) if policy == OverridePolicy::Recurse => {
                collect_policies(table, &path, inner)
            }
            _ => table.push((path, policy)),
        }
    }
}
