//! TOML manifest parser with helpful error messages

use super::manifest::ScopeManifest;
use anyhow::{Context, Result};
use std::path::Path;

/// Parse a scope manifest with detailed error messages
pub fn parse_manifest(path: &Path) -> Result<ScopeManifest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest: {}", path.display()))?;

    parse_manifest_str(&content)
        .with_context(|| format!("Failed to parse manifest: {}", path.display()))
}

/// Parse a scope manifest from a string
pub fn parse_manifest_str(content: &str) -> Result<ScopeManifest> {
    toml::from_str(content).map_err(|e| enhance_toml_error(e, content))
}

/// Enhance TOML parsing errors with the lines around the failure
fn enhance_toml_error(error: toml::de::Error, content: &str) -> anyhow::Error {
    let message = error.message().to_string();

    match error.span() {
        Some(span) => {
            let line_num = content[..span.start.min(content.len())]
                .matches('\n')
                .count()
                + 1;
            let context = get_line_context(content, line_num);
            anyhow::anyhow!(
                "TOML parsing error at line {}:\n{}\n\nError: {}",
                line_num,
                context,
                message
            )
        }
        None => anyhow::anyhow!("TOML parsing error: {}", message),
    }
}

/// Get context lines around an error
fn get_line_context(content: &str, line_num: usize) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let start = line_num.saturating_sub(2);
    let end = (line_num + 1).min(lines.len());

    lines[start.min(end)..end]
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let num = start + i + 1;
            let marker = if num == line_num { ">>>" } else { "   " };
            format!("{} {:4} | {}", marker, num, line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Serialize a manifest to a TOML string
pub fn to_toml(manifest: &ScopeManifest) -> Result<String> {
    toml::to_string_pretty(manifest).with_context(|| "Failed to serialize manifest to TOML")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_valid_manifest() {
        let toml = r#"
[plugin]
environment = "test"

[global]
team_id = "acme"

[global.project_config]
serverless_function_region = "fra1"

[sites.shop]
api_token = "token"

[sites.shop.components.web.project_config]
name = "shop-web"
manual_production_deployment = true
"#;

        let manifest = parse_manifest_str(toml).unwrap();

        assert_eq!(manifest.plugin.environment.as_deref(), Some("test"));
        let global = manifest.global.as_ref().unwrap();
        assert_eq!(global.team_id.as_deref(), Some("acme"));
        let shop = &manifest.sites["shop"];
        assert_eq!(shop.config.api_token.as_deref(), Some("token"));
        assert_eq!(
            shop.components["web"].project_config.manual_production_deployment,
            Some(true)
        );
    }

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = parse_manifest_str("").unwrap();
        assert!(manifest.global.is_none());
        assert!(manifest.sites.is_empty());
    }

    #[test]
    fn test_parse_invalid_toml_reports_line() {
        let toml = "[global]\nteam_id = \"acme\"\n[sites.shop\napi_token = \"x\"\n";

        let err = parse_manifest_str(toml).unwrap_err().to_string();

        assert!(err.contains("TOML parsing error at line"), "{err}");
        assert!(err.contains(">>>"), "{err}");
    }

    #[test]
    fn test_parse_wrong_type_is_error() {
        let toml = "[global.project_config]\nmanual_production_deployment = \"yes\"\n";
        assert!(parse_manifest_str(toml).is_err());
    }

    #[test]
    fn test_parse_environment_variables_table_array() {
        let toml = r#"
[[global.project_config.environment_variables]]
key = "API_URL"
value = "https://api.example.com"
environment = ["production", "preview"]

[[global.project_config.environment_variables]]
key = "DEBUG"
value = "false"
"#;

        let manifest = parse_manifest_str(toml).unwrap();
        let variables = &manifest.global.unwrap().project_config.environment_variables;

        assert_eq!(variables.len(), 2);
        assert_eq!(variables[0].environment.len(), 2);
        assert!(variables[1].environment.is_empty());
    }

    #[test]
    fn test_parse_manifest_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[sites.shop]\nteam_id = \"acme\"").unwrap();

        let manifest = parse_manifest(file.path()).unwrap();

        assert!(manifest.sites.contains_key("shop"));
    }

    #[test]
    fn test_parse_missing_file_names_path() {
        let err = parse_manifest(Path::new("/nonexistent/tiers.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/tiers.toml"));
    }

    #[test]
    fn test_to_toml_roundtrip_keeps_sites() {
        let manifest = parse_manifest_str("[sites.shop]\nteam_id = \"acme\"\n").unwrap();

        let rendered = to_toml(&manifest).unwrap();
        let reparsed = parse_manifest_str(&rendered).unwrap();

        assert_eq!(reparsed.sites["shop"].config.team_id.as_deref(), Some("acme"));
    }
}
