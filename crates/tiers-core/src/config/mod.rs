//! Scope configuration: schema, field policies and merging
//!
//! Three scopes are folded child-over-parent:
//! - Global: defaults for every site
//! - Site: one deployable site
//! - Site-component: one component within a site

pub mod env_vars;
pub mod manifest;
pub mod merge;
pub mod parser;
pub mod policy;
pub mod schema;

pub use env_vars::merge_environment_variables;
pub use manifest::{PluginSettings, ScopeManifest, SiteEntry};
pub use parser::{parse_manifest, parse_manifest_str, to_toml};
pub use policy::{FieldPolicies, Inherit, OverridePolicy};
pub use schema::{
    Configuration, DomainBinding, EnvironmentVariable, GitRepository, PasswordProtection,
    ProjectConfig, REDACTED, VercelAuthentication, standard_environments,
};
