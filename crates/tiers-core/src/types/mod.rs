//! Shared core types used across the configuration and registry layers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environments a variable applies to when none are listed.
pub const STANDARD_ENVIRONMENTS: [&str; 3] = ["development", "preview", "production"];

/// Inheritance levels, outermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scope {
    /// Defaults shared by every site.
    Global,
    /// One deployable site.
    Site,
    /// A single component deployed within a site.
    SiteComponent,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Global => f.write_str("global"),
            Scope::Site => f.write_str("site"),
            Scope::SiteComponent => f.write_str("site-component"),
        }
    }
}
