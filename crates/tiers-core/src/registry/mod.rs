//! Scope registry and resolution
//!
//! Holds the configuration registered for each scope and folds the chain
//! `site-component -> site -> global` into one effective configuration.
//! Stored scopes are shared behind `Arc` and never modified by a resolve.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::{Configuration, merge_environment_variables};
use crate::types::Scope;

#[derive(Debug, Clone, Default)]
pub struct ScopeRegistry {
    global: Option<Arc<Configuration>>,
    sites: HashMap<String, Arc<Configuration>>,
    components: HashMap<String, HashMap<String, Arc<Configuration>>>,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_global(&mut self, config: Configuration) {
        debug!(scope = %Scope::Global, "registering configuration");
        self.global = Some(Arc::new(config));
    }

    pub fn set_site(&mut self, site: &str, config: Configuration) {
        debug!(scope = %Scope::Site, site, "registering configuration");
        self.sites.insert(site.to_string(), Arc::new(config));
    }

    pub fn set_site_component(&mut self, site: &str, component: &str, config: Configuration) {
        debug!(scope = %Scope::SiteComponent, site, component, "registering configuration");
        self.components
            .entry(site.to_string())
            .or_default()
            .insert(component.to_string(), Arc::new(config));
    }

    pub fn global(&self) -> Option<&Configuration> {
        self.global.as_deref()
    }

    pub fn site(&self, site: &str) -> Option<&Configuration> {
        self.sites.get(site).map(Arc::as_ref)
    }

    pub fn site_component(&self, site: &str, component: &str) -> Option<&Configuration> {
        self.components
            .get(site)
            .and_then(|components| components.get(component))
            .map(Arc::as_ref)
    }

    /// True when no scope has been registered at any level.
    pub fn is_empty(&self) -> bool {
        self.global.is_none() && self.sites.is_empty() && self.components.is_empty()
    }

    /// Scopes that take part in resolving `(site, component)`, innermost first.
    ///
    /// Registered but entirely unset scopes are left out.
    pub fn contributing_scopes(&self, site: &str, component: Option<&str>) -> Vec<Scope> {
        let mut scopes = Vec::new();
        if let Some(config) = component.and_then(|c| self.site_component(site, c))
            && !config.is_absent()
        {
            scopes.push(Scope::SiteComponent);
        }
        if self.site(site).is_some_and(|config| !config.is_absent()) {
            scopes.push(Scope::Site);
        }
        if self.global().is_some_and(|config| !config.is_absent()) {
            scopes.push(Scope::Global);
        }
        scopes
    }

    /// Effective configuration for a site, optionally narrowed to a component.
    ///
    /// Missing scopes are skipped rather than reported: with nothing
    /// registered at any level the result is an empty configuration. The
    /// variable list in the result is merged: sorted by key, one value per
    /// `(key, environment)` slot, no empty environment set.
    pub fn resolve(&self, site: &str, component: Option<&str>) -> Configuration {
        let global = self.global().cloned().unwrap_or_default();
        let site_config = self.site(site).map(|config| config.extend(&global));
        let component_config = component.and_then(|c| self.site_component(site, c));

        let mut effective = match (component_config, site_config) {
            (Some(component_config), Some(site_config)) => component_config.extend(&site_config),
            (Some(component_config), None) => {
                debug!(site, ?component, "no site configuration, folding component over global");
                component_config.extend(&global)
            }
            (None, Some(site_config)) => {
                if let Some(component) = component {
                    debug!(site, component, "no component configuration, using site");
                }
                site_config
            }
            (None, None) => {
                debug!(site, ?component, "no site configuration, using global");
                global
            }
        };

        // A scope that short-circuited the fold may still carry unmerged variables.
        let variables = &mut effective.project_config.environment_variables;
        *variables = merge_environment_variables(&[], variables);
        trace!(
            site,
            ?component,
            environment_variables = effective.project_config.environment_variables.len(),
            domains = effective.project_config.domains.len(),
            "resolved configuration"
        );

        effective
    }
}
