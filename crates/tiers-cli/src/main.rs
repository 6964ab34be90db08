//! Tiers - layered Vercel configuration resolver
//!
//! Usage:
//!   tiers resolve <manifest> --site S [--component C]   # Effective configuration
//!   tiers render <manifest> --site S [--component C]    # Terraform snippets
//!   tiers sites <manifest>                              # Sites in a manifest
//!   tiers policies                                      # Field override policies

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiers_core::config::{Configuration, parse_manifest};
use tiers_core::plugin::VercelPlugin;

#[derive(Parser)]
#[command(name = "tiers")]
#[command(about = "Layered Vercel configuration resolver", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration of a site or site component
    Resolve {
        #[command(flatten)]
        target: TargetArgs,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Print credentials instead of a placeholder
        #[arg(long)]
        show_secrets: bool,
    },

    /// Render Terraform snippets for a site or site component
    Render {
        #[command(flatten)]
        target: TargetArgs,

        /// Which snippet to render
        #[arg(long, default_value = "all")]
        part: RenderPart,
    },

    /// List the sites declared in a manifest
    Sites {
        /// Path to the scope manifest
        manifest: PathBuf,
    },

    /// List the override policy of every configuration field
    Policies,
}

#[derive(Args)]
struct TargetArgs {
    /// Path to the scope manifest
    manifest: PathBuf,

    /// Site identifier
    #[arg(long)]
    site: String,

    /// Component within the site
    #[arg(long)]
    component: Option<String>,

    /// Deployment environment (overrides the manifest)
    #[arg(long)]
    environment: Option<String>,

    /// Provider version or constraint (overrides the manifest)
    #[arg(long)]
    provider_version: Option<String>,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Json,
    Toml,
}

#[derive(Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum RenderPart {
    Providers,
    Resources,
    Component,
    #[default]
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries rendered output only
    let default_filter = if cli.verbose { "tiers=debug,info" } else { "tiers=info,warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Resolve {
            target,
            format,
            show_secrets,
        } => run_resolve(&target, format, show_secrets),
        Commands::Render { target, part } => run_render(&target, part),
        Commands::Sites { manifest } => run_sites(&manifest),
        Commands::Policies => {
            run_policies();
            Ok(())
        }
    }
}

fn load_plugin(target: &TargetArgs) -> Result<VercelPlugin> {
    let manifest = parse_manifest(&target.manifest)?;
    let mut plugin = VercelPlugin::from_manifest(&manifest);

    if target.environment.is_some() || target.provider_version.is_some() {
        let environment = target
            .environment
            .clone()
            .unwrap_or_else(|| plugin.environment().to_string());
        plugin.configure(&environment, target.provider_version.as_deref().unwrap_or(""));
    }

    debug!(
        manifest = %target.manifest.display(),
        environment = plugin.environment(),
        provider_version = plugin.provider_version(),
        "loaded manifest"
    );
    Ok(plugin)
}

fn run_resolve(target: &TargetArgs, format: OutputFormat, show_secrets: bool) -> Result<()> {
    let plugin = load_plugin(target)?;
    let component = target.component.as_deref();

    debug!(
        site = %target.site,
        ?component,
        scopes = ?plugin.contributing_scopes(&target.site, component),
        "resolving"
    );

    let effective = plugin.resolve(&target.site, component);
    let effective = if show_secrets {
        effective
    } else {
        effective.redacted()
    };

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&effective)
            .context("Failed to serialize configuration to JSON")?,
        OutputFormat::Toml => toml::to_string_pretty(&effective)
            .context("Failed to serialize configuration to TOML")?,
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn run_render(target: &TargetArgs, part: RenderPart) -> Result<()> {
    let plugin = load_plugin(target)?;
    let site = target.site.as_str();
    let mut sections = Vec::new();

    if matches!(part, RenderPart::Providers | RenderPart::All) {
        sections.push(plugin.render_providers(site)?);
    }
    if matches!(part, RenderPart::Resources | RenderPart::All) {
        sections.push(plugin.render_resources(site)?);
    }
    if matches!(part, RenderPart::Component | RenderPart::All) {
        match target.component.as_deref() {
            Some(component) => {
                if let Some(rendered) = plugin.render_component(site, component)? {
                    sections.push(rendered.variables);
                }
            }
            None if part == RenderPart::Component => {
                anyhow::bail!("--component is required to render component variables")
            }
            None => {}
        }
    }

    let sections: Vec<String> = sections.into_iter().filter(|s| !s.is_empty()).collect();
    if sections.is_empty() {
        eprintln!("Nothing registered for site '{site}'");
    } else {
        print!("{}", sections.join("\n"));
    }
    Ok(())
}

fn run_sites(path: &Path) -> Result<()> {
    let manifest = parse_manifest(path)?;
    let sites: Vec<&str> = manifest.site_names().collect();

    if sites.is_empty() {
        println!("No sites declared.");
        return Ok(());
    }
    for site in sites {
        let components: Vec<&str> = manifest.sites[site]
            .components
            .keys()
            .map(String::as_str)
            .collect();
        if components.is_empty() {
            println!("{site}");
        } else {
            println!("{site}: {}", components.join(", "));
        }
    }
    Ok(())
}

fn run_policies() {
    let table = Configuration::field_policies();
    let width = table.iter().map(|(path, _)| path.len()).max().unwrap_or(0);

    println!("{:<width$}  Policy", "Field");
    println!("{}", "-".repeat(width + 30));
    for (path, policy) in table {
        println!("{path:<width$}  {policy}");
    }
}
