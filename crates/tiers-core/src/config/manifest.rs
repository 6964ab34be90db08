//! Scope manifest: every scope of a deployment in one TOML document
//!
//! ```toml
//! [plugin]
//! environment = "test"
//!
//! [global]
//! team_id = "acme"
//!
//! [sites.shop]
//! api_token = "${var.vercel_token}"
//!
//! [sites.shop.components.web.project_config]
//! name = "shop-web"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::schema::Configuration;
use crate::registry::ScopeRegistry;

/// Root of a scope manifest file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScopeManifest {
    /// Plugin-level settings
    #[serde(default)]
    pub plugin: PluginSettings,

    /// Global scope, shared by every site
    #[serde(default)]
    pub global: Option<Configuration>,

    /// Site scopes keyed by site identifier
    #[serde(default)]
    pub sites: BTreeMap<String, SiteEntry>,
}

/// Settings for the plugin itself rather than for any scope
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PluginSettings {
    /// Deployment environment name (e.g. `test`, `production`)
    #[serde(default)]
    pub environment: Option<String>,

    /// Provider version or constraint
    #[serde(default)]
    pub provider_version: Option<String>,
}

/// One site: its own configuration plus per-component overrides
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SiteEntry {
    #[serde(flatten)]
    pub config: Configuration,

    /// Component scopes keyed by component name
    #[serde(default)]
    pub components: BTreeMap<String, Configuration>,
}

impl ScopeManifest {
    /// Register every scope in the manifest.
    pub fn to_registry(&self) -> ScopeRegistry {
        let mut registry = ScopeRegistry::new();
        if let Some(global) = &self.global {
            registry.set_global(global.clone());
        }
        for (site, entry) in &self.sites {
            registry.set_site(site, entry.config.clone());
            for (component, config) in &entry.components {
                registry.set_site_component(site, component, config.clone());
            }
        }
        registry
    }

    /// Site identifiers in the manifest, sorted
    pub fn site_names(&self) -> impl Iterator<Item = &str> {
        self.sites.keys().map(String::as_str)
    }
}
