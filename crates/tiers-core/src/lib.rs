//! Tiers Core Library
//!
//! Resolves Vercel project configuration declared at three nested scopes
//! (global, site, site component) into one effective configuration per
//! deployable unit, and renders it as Terraform variables.

pub mod config;
pub mod error;
pub mod plugin;
pub mod registry;
pub mod render;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{
        Configuration, DomainBinding, EnvironmentVariable, GitRepository, OverridePolicy,
        PasswordProtection, ProjectConfig, ScopeManifest, VercelAuthentication,
        merge_environment_variables,
    };

    // Resolution
    pub use crate::registry::ScopeRegistry;
    pub use crate::types::{STANDARD_ENVIRONMENTS, Scope};

    // Plugin
    pub use crate::error::{TiersError, TiersResult};
    pub use crate::plugin::VercelPlugin;
    pub use crate::render::ComponentVariables;
}
