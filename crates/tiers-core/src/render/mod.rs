//! Rendering of effective configuration into Terraform text

pub mod hcl;
pub mod terraform;

pub use hcl::{HclValue, HclWriter, display_list, quote, version_constraint};
pub use terraform::{PROVIDER_SOURCE, component_variables, provider_resource, providers_block};

/// Variables rendered for one site component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentVariables {
    pub variables: String,
}
