//! Terraform snippets for the Vercel provider

use std::fmt;

use super::hcl::{HclWriter, version_constraint};
use crate::config::{Configuration, Inherit};

pub const PROVIDER_SOURCE: &str = "vercel/vercel";

/// Entry for the `required_providers` block.
pub fn providers_block(provider_version: &str) -> Result<String, fmt::Error> {
    let mut writer = HclWriter::new();
    writer.open("vercel = {")?;
    writer.property("source", PROVIDER_SOURCE)?;
    writer.property("version", version_constraint(provider_version).as_str())?;
    writer.close("}")?;
    Ok(writer.finish())
}

/// `provider "vercel"` configuration block.
pub fn provider_resource(config: &Configuration) -> Result<String, fmt::Error> {
    let mut writer = HclWriter::new();
    writer.open("provider \"vercel\" {")?;
    writer.property("api_token", &config.api_token)?;
    writer.property("team", &config.team_id)?;
    writer.close("}")?;
    Ok(writer.finish())
}

/// Module variables describing the project of one component.
pub fn component_variables(config: &Configuration) -> Result<String, fmt::Error> {
    let project = &config.project_config;
    let mut writer = HclWriter::new();

    writer.property("vercel_team_id", &config.team_id)?;
    writer.property("vercel_project_name", &project.name)?;
    writer.property("vercel_project_framework", &project.framework)?;
    writer.property("vercel_project_build_command", &project.build_command)?;
    writer.property("vercel_project_ignore_command", &project.ignore_command)?;
    writer.property("vercel_project_root_directory", &project.root_directory)?;
    writer.property(
        "vercel_project_serverless_function_region",
        &project.serverless_function_region,
    )?;
    writer.property(
        "vercel_project_manual_production_deployment",
        &project.manual_production_deployment,
    )?;
    writer.property(
        "vercel_project_protection_bypass_for_automation",
        &project.protection_bypass_for_automation,
    )?;

    let git = &project.git_repository;
    if !git.is_unset() {
        writer.open("vercel_project_git_repository = {")?;
        writer.property("production_branch", &git.production_branch)?;
        writer.property("type", &git.vcs_type)?;
        writer.property("repo", &git.repo)?;
        writer.close("}")?;
    }

    let authentication = &project.vercel_authentication;
    if !authentication.is_unset() {
        writer.open("vercel_project_vercel_authentication = {")?;
        writer.property("deployment_type", &authentication.deployment_type)?;
        writer.close("}")?;
    }

    let protection = &project.password_protection;
    if !protection.is_unset() {
        writer.open("vercel_project_password_protection = {")?;
        writer.property("password", &protection.password)?;
        writer.property("deployment_type", &protection.deployment_type)?;
        writer.close("}")?;
    }

    writer.open("vercel_project_environment_variables = [")?;
    for variable in &project.environment_variables {
        writer.open("{")?;
        writer.property("key", &variable.key)?;
        writer.string_property("value", &variable.value)?;
        writer.property("environment", &variable.normalized_environments())?;
        writer.close("},")?;
    }
    writer.close("]")?;

    writer.open("vercel_project_domains = [")?;
    for domain in &project.domains {
        writer.open("{")?;
        writer.property("domain", &domain.domain)?;
        writer.property("git_branch", &domain.git_branch)?;
        writer.property("redirect", &domain.redirect)?;
        writer.property("redirect_status_code", &domain.redirect_status_code)?;
        writer.close("},")?;
    }
    writer.close("]")?;

    Ok(writer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DomainBinding, EnvironmentVariable};

    #[test]
    fn test_providers_block() {
        let block = providers_block("0.15.1").unwrap();
        assert_eq!(
            block,
            "vercel = {\n  source = \"vercel/vercel\"\n  version = \"~> 0.15.1\"\n}\n"
        );
    }

    #[test]
    fn test_provider_resource_raw_token() {
        let mut config = Configuration::new();
        config.api_token = Some(r#"${sops.data.output["api_token"]}"#.into());
        config.team_id = Some("acme".into());

        let block = provider_resource(&config).unwrap();

        assert!(block.contains(r#"api_token = sops.data.output["api_token"]"#));
        assert!(block.contains("team = \"acme\""));
    }

    #[test]
    fn test_unset_nested_blocks_are_omitted() {
        let variables = component_variables(&Configuration::new()).unwrap();

        assert!(!variables.contains("vercel_project_git_repository"));
        assert!(!variables.contains("vercel_project_password_protection"));
        assert!(variables.contains("vercel_project_environment_variables = [\n]"));
    }

    #[test]
    fn test_environment_variable_entry_layout() {
        let mut config = Configuration::new();
        config.project_config.environment_variables =
            vec![EnvironmentVariable::new("A", "1", ["production", "preview"])];

        let variables = component_variables(&config).unwrap();

        assert!(variables.contains(
            "  {\n    key = \"A\"\n    value = \"1\"\n    environment = [\"preview\", \"production\"]\n  },\n"
        ));
    }

    #[test]
    fn test_empty_variable_value_is_written() {
        let mut config = Configuration::new();
        config.project_config.environment_variables =
            vec![EnvironmentVariable::new("EMPTY", "", ["preview"])];

        let variables = component_variables(&config).unwrap();

        assert!(variables.contains("    key = \"EMPTY\"\n    value = \"\"\n"));
    }

    #[test]
    fn test_explicit_false_flag_is_rendered() {
        let mut config = Configuration::new();
        config.project_config.manual_production_deployment = Some(false);

        let variables = component_variables(&config).unwrap();

        assert!(variables.contains("vercel_project_manual_production_deployment = false"));
    }

    #[test]
    fn test_domain_entry() {
        let mut config = Configuration::new();
        config.project_config.domains = vec![DomainBinding {
            redirect_status_code: Some(307),
            ..DomainBinding::new("test-domain.com")
        }];

        let variables = component_variables(&config).unwrap();

        assert!(variables.contains("domain = \"test-domain.com\""));
        assert!(variables.contains("redirect_status_code = 307"));
        assert!(!variables.contains("git_branch"));
    }
}
