//! Vercel plugin: scope registration and rendering entry points.
//!
//! The host registers raw configuration per scope (in any order) and later
//! asks for rendered output per site or per site component. Registration
//! takes a short write lock to swap in an `Arc`; resolving only reads.

use parking_lot::RwLock;
use tracing::debug;

use crate::config::{Configuration, ScopeManifest};
use crate::error::{TiersError, TiersResult};
use crate::registry::ScopeRegistry;
use crate::render::{self, ComponentVariables};
use crate::types::Scope;

/// Provider version used when the host does not configure one.
pub const DEFAULT_PROVIDER_VERSION: &str = "0.15.1";

#[derive(Debug)]
pub struct VercelPlugin {
    environment: String,
    provider_version: String,
    registry: RwLock<ScopeRegistry>,
}

impl Default for VercelPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl VercelPlugin {
    pub fn new() -> Self {
        Self::with_registry(ScopeRegistry::new())
    }

    pub fn with_registry(registry: ScopeRegistry) -> Self {
        Self {
            environment: String::new(),
            provider_version: DEFAULT_PROVIDER_VERSION.to_string(),
            registry: RwLock::new(registry),
        }
    }

    /// Build a configured plugin with every scope of `manifest` registered.
    pub fn from_manifest(manifest: &ScopeManifest) -> Self {
        let mut plugin = Self::with_registry(manifest.to_registry());
        plugin.configure(
            manifest.plugin.environment.as_deref().unwrap_or_default(),
            manifest.plugin.provider_version.as_deref().unwrap_or_default(),
        );
        plugin
    }

    /// Set the deployment environment; an empty provider version keeps the current one.
    pub fn configure(&mut self, environment: &str, provider_version: &str) {
        self.environment = environment.to_string();
        if !provider_version.is_empty() {
            self.provider_version = provider_version.to_string();
        }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn provider_version(&self) -> &str {
        &self.provider_version
    }

    /// True once any scope has been registered.
    pub fn is_enabled(&self) -> bool {
        !self.registry.read().is_empty()
    }

    pub fn set_global_config(&self, data: serde_json::Value) -> TiersResult<()> {
        let config = Configuration::from_value(Scope::Global, None, data)?;
        self.registry.write().set_global(config);
        Ok(())
    }

    pub fn set_site_config(&self, site: &str, data: serde_json::Value) -> TiersResult<()> {
        let config = Configuration::from_value(Scope::Site, Some(site), data)?;
        self.registry.write().set_site(site, config);
        Ok(())
    }

    pub fn set_site_component_config(
        &self,
        site: &str,
        component: &str,
        data: serde_json::Value,
    ) -> TiersResult<()> {
        let target = format!("{site}/{component}");
        let config = Configuration::from_value(Scope::SiteComponent, Some(&target), data)?;
        self.registry
            .write()
            .set_site_component(site, component, config);
        Ok(())
    }

    /// Effective configuration for `(site, component)`.
    pub fn resolve(&self, site: &str, component: Option<&str>) -> Configuration {
        self.registry.read().resolve(site, component)
    }

    /// Scopes contributing to `(site, component)`, innermost first.
    pub fn contributing_scopes(&self, site: &str, component: Option<&str>) -> Vec<Scope> {
        self.registry.read().contributing_scopes(site, component)
    }

    /// `required_providers` entry; empty when nothing is registered.
    pub fn render_providers(&self, site: &str) -> TiersResult<String> {
        if !self.is_enabled() {
            debug!(site, "nothing registered, skipping providers");
            return Ok(String::new());
        }
        render::providers_block(&self.provider_version).map_err(|source| TiersError::Render {
            what: "providers",
            source,
        })
    }

    /// `provider "vercel"` block for a site; empty when nothing is registered.
    pub fn render_resources(&self, site: &str) -> TiersResult<String> {
        if !self.is_enabled() {
            debug!(site, "nothing registered, skipping resources");
            return Ok(String::new());
        }
        let config = self.resolve(site, None);
        render::provider_resource(&config).map_err(|source| TiersError::Render {
            what: "resources",
            source,
        })
    }

    /// Module variables for one component; `None` when nothing is registered.
    pub fn render_component(
        &self,
        site: &str,
        component: &str,
    ) -> TiersResult<Option<ComponentVariables>> {
        if !self.is_enabled() {
            debug!(site, component, "nothing registered, skipping component");
            return Ok(None);
        }
        let config = self.resolve(site, Some(component));
        let variables =
            render::component_variables(&config).map_err(|source| TiersError::Render {
                what: "component variables",
                source,
            })?;
        Ok(Some(ComponentVariables { variables }))
    }
}
