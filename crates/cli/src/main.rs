//! Swagger Import CLI
//!
//! Command-line interface for importing Swagger/OpenAPI descriptions as
//! gateway API definitions.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use swagger_import_common::{ApiDraft, ImportDescriptor, ImporterConfig, Policy};
use swagger_import_importer::Importer;
use swagger_import_policy::flow_schema;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "swagger-import")]
#[command(version, about = "Import Swagger/OpenAPI descriptions into gateway API definitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Importer configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an API description and print the resulting API definition
    #[command(after_help = "EXAMPLES:\n  \
        # Import a local OpenAPI document\n  \
        swagger-import import petstore.yaml\n\n  \
        # Import a remote Swagger 2.0 document with mock policies\n  \
        swagger-import import https://petstore.swagger.io/v2/swagger.json \\\n    \
        --policies mock \\\n    \
        --with-policy-paths \\\n    \
        --output petstore-api.json\n\n  \
        # Import a document piped on stdin\n  \
        cat openapi.json | swagger-import import --inline")]
    Import {
        /// File path or URL of the description (stdin with --inline)
        #[arg(required_unless_present = "inline")]
        source: Option<String>,

        /// Read the description content from stdin
        #[arg(long, conflicts_with = "source")]
        inline: bool,

        /// Comma-separated list of policy ids to generate (e.g. mock,json-validation)
        #[arg(short, long, value_delimiter = ',')]
        policies: Vec<String>,

        /// Include path parameters in generated policies and derive a
        /// context path from the title when there is no server
        #[arg(long)]
        with_policy_paths: bool,

        /// Write the API definition to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the policies and policy generators available to imports
    Policies,

    /// Check a policy configuration against the policy schema
    #[command(after_help = "EXAMPLES:\n  \
        swagger-import validate-config --policy mock \\\n    \
        --configuration '{\"status\": \"200\", \"content\": \"ok\"}'\n\n  \
        # Read the configuration from a file\n  \
        swagger-import validate-config --policy json-validation --configuration @config.json")]
    ValidateConfig {
        /// Policy id
        #[arg(short, long)]
        policy: String,

        /// Configuration as JSON text, or @path to read it from a file
        #[arg(long)]
        configuration: String,
    },

    /// Print the JSON Schema of flow configurations
    FlowSchema,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => ImporterConfig::load(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => ImporterConfig::default(),
    };

    match cli.command {
        Commands::Import {
            source,
            inline,
            policies,
            with_policy_paths,
            output,
        } => {
            let descriptor = descriptor(source, inline)?
                .with_policies(policies)
                .with_policy_paths(with_policy_paths);
            import_command(&config, &descriptor, output.as_deref())?;
        }
        Commands::Policies => {
            policies_command(&config)?;
        }
        Commands::ValidateConfig {
            policy,
            configuration,
        } => {
            validate_config_command(&config, &policy, &configuration)?;
        }
        Commands::FlowSchema => {
            print!("{}", flow_schema());
        }
    }

    Ok(())
}

/// Diagnostics are written to stderr
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn descriptor(source: Option<String>, inline: bool) -> Result<ImportDescriptor> {
    if inline {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read API description from stdin")?;
        return Ok(ImportDescriptor::inline(content));
    }

    match source {
        Some(source) => Ok(ImportDescriptor::url(source)),
        None => bail!("An API description source or --inline is required"),
    }
}

fn import_command(
    config: &ImporterConfig,
    descriptor: &ImportDescriptor,
    output: Option<&Path>,
) -> Result<()> {
    let importer = Importer::new(config).context("Failed to create importer")?;

    let draft = importer
        .create_api(descriptor)
        .context("Failed to import API description")?;
    let json = serde_json::to_string_pretty(&draft).context("Failed to serialize API definition")?;

    let Some(output) = output else {
        println!("{}", json);
        return Ok(());
    };

    fs::write(output, format!("{}\n", json))
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{}", "✓ Import complete!".green().bold());
    print_summary(&draft);
    println!("\n  📄 {}", output.display());
    Ok(())
}

fn print_summary(draft: &ApiDraft) {
    println!("\n{}", "API Definition:".bold());
    println!("  Name: {}", draft.name.yellow());
    println!("  Version: {}", draft.version.yellow());
    if let Some(host) = draft.proxy.virtual_hosts.first() {
        println!("  Context path: {}", host.path);
    }

    let targets = draft.endpoint_targets();
    println!("  Endpoints: {}", targets.len());
    for target in targets {
        println!("    • {}", target.cyan());
    }

    let policies: usize = draft
        .paths
        .values()
        .flat_map(|path| &path.rules)
        .map(|rule| rule.policies.len())
        .sum();
    println!("  Paths: {}", draft.paths.len());
    println!("  Generated policies: {}", policies);
}

fn policies_command(config: &ImporterConfig) -> Result<()> {
    let importer = Importer::new(config).context("Failed to create importer")?;
    let manager = importer.manager();

    println!("{}", "Policies:".bold());
    for policy in manager.validator().catalog().find_all() {
        println!(
            "  • {} ({}) {}",
            policy.id.cyan(),
            policy.name,
            policy.version.as_deref().unwrap_or("-")
        );
        if let Some(description) = &policy.description {
            println!("    {}", description);
        }
    }

    println!("\n{}", "Policy generators:".bold());
    for visitor in manager.policy_visitors() {
        println!("  • {} ({})", visitor.id().cyan(), visitor.name());
    }

    Ok(())
}

fn validate_config_command(config: &ImporterConfig, policy: &str, configuration: &str) -> Result<()> {
    let configuration = match configuration.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file {}", path))?,
        None => configuration.to_string(),
    };

    let importer = Importer::new(config).context("Failed to create importer")?;
    let validator = importer.manager().validator();
    if validator.catalog().find_by_id(policy).is_none() {
        eprintln!("{} Unknown policy '{}', no schema to check against", "⚠".yellow(), policy);
    }

    let mut policy = Policy::new(policy, configuration);
    validator
        .validate(&mut policy)
        .with_context(|| format!("Configuration of policy '{}' is invalid", policy.name))?;

    println!("{} Configuration of {} is valid", "✓".green().bold(), policy.name.cyan());
    if !policy.configuration.is_empty() {
        println!("\n{}", policy.configuration);
    }
    Ok(())
}
