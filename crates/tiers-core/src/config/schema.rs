//! Configuration schema for a single scope
//!
//! The same shape is used at every level:
//! - Global: defaults for every site
//! - Site: one deployable site
//! - Site-component: one component inside a site
//!
//! Every scalar is optional so that "unset" and an explicit `false`/`0` stay
//! distinguishable when scopes are folded together.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{TiersError, TiersResult};
use crate::types::{STANDARD_ENVIRONMENTS, Scope};

/// Placeholder written over secrets by [`Configuration::redacted`].
pub const REDACTED: &str = "[REDACTED]";

/// Root configuration for one scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Configuration {
    /// Team the project belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,

    /// Provider API token (usually an interpolation such as `${var.token}`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Project settings
    #[serde(default)]
    pub project_config: ProjectConfig,
}

/// Project settings nested in a [`Configuration`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Framework preset, e.g. `nextjs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,

    /// Command deciding whether a build is skipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_command: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_directory: Option<String>,

    /// Region identifier, e.g. `fra1`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serverless_function_region: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manual_production_deployment: Option<bool>,

    #[serde(default)]
    pub git_repository: GitRepository,

    #[serde(default)]
    pub vercel_authentication: VercelAuthentication,

    #[serde(default)]
    pub password_protection: PasswordProtection,

    #[serde(default)]
    pub environment_variables: Vec<EnvironmentVariable>,

    #[serde(default)]
    pub domains: Vec<DomainBinding>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protection_bypass_for_automation: Option<bool>,
}

/// Source repository the project deploys from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GitRepository {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_branch: Option<String>,

    /// VCS provider: github, gitlab, bitbucket
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub vcs_type: Option<String>,

    /// `owner/name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
}

/// Access-protection mode for deployments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VercelAuthentication {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_type: Option<String>,
}

/// Password gate in front of deployments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PasswordProtection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_type: Option<String>,
}

/// A key/value pair scoped to a set of environments.
///
/// The key alone is not unique within a list: the same key may carry
/// different values for different environments. An empty environment set
/// means "all standard environments".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentVariable {
    pub key: String,

    #[serde(default)]
    pub value: String,

    #[serde(default)]
    pub environment: BTreeSet<String>,
}

/// A domain attached to the project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainBinding {
    pub domain: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git_branch: Option<String>,

    /// Domain to redirect to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_status_code: Option<u16>,
}

impl Configuration {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an untyped key/value tree registered for `scope`.
    ///
    /// Unknown keys are ignored.
    pub fn from_value(
        scope: Scope,
        target: Option<&str>,
        data: serde_json::Value,
    ) -> TiersResult<Self> {
        serde_json::from_value(data)
            .map_err(|e| TiersError::decode(scope, target.map(str::to_string), e))
    }

    /// Copy with credentials replaced by [`REDACTED`].
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.api_token.is_some() {
            copy.api_token = Some(REDACTED.to_string());
        }
        let protection = &mut copy.project_config.password_protection;
        if protection.password.is_some() {
            protection.password = Some(REDACTED.to_string());
        }
        copy
    }
}

impl EnvironmentVariable {
    pub fn new<I, S>(key: impl Into<String>, value: impl Into<String>, environment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key: key.into(),
            value: value.into(),
            environment: environment.into_iter().map(Into::into).collect(),
        }
    }

    /// Environment set with the empty set expanded to the standard three.
    pub fn normalized_environments(&self) -> BTreeSet<String> {
        if self.environment.is_empty() {
            standard_environments()
        } else {
            self.environment.clone()
        }
    }
}

impl DomainBinding {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            git_branch: None,
            redirect: None,
            redirect_status_code: None,
        }
    }
}

pub fn standard_environments() -> BTreeSet<String> {
    STANDARD_ENVIRONMENTS.iter().map(|e| e.to_string()).collect()
}
