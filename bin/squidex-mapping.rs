use anyhow::{Context, Result};
use clap::Parser;
use squidex_mapping::{Mapping, PropertyMapping, ResolverSettings};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "squidex-mapping")]
#[command(about = "Resolve field references against an index mapping", long_about = None)]
struct Args {
    /// Mapping definition (JSON)
    #[arg(long, env = "SQUIDEX_MAPPING")]
    mapping: PathBuf,

    /// Optional resolver settings (JSON)
    #[arg(long, env = "SQUIDEX_RESOLVER_SETTINGS")]
    settings: Option<PathBuf>,

    /// Print the alias table
    #[arg(long)]
    show_aliases: bool,

    /// Print every addressable leaf field
    #[arg(long)]
    list_fields: bool,

    /// Print the mapping after defaults are filled
    #[arg(long)]
    show_mapping: bool,

    /// Field references to resolve (aliases are followed)
    paths: Vec<String>,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    info!("squidex-mapping v{}", squidex_mapping::VERSION);

    let settings = match &args.settings {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read settings {}", path.display()))?;
            ResolverSettings::from_json_str(&json)
                .with_context(|| format!("invalid settings {}", path.display()))?
        }
        None => ResolverSettings::default(),
    };

    let raw = std::fs::read(&args.mapping)
        .with_context(|| format!("failed to read mapping {}", args.mapping.display()))?;
    let mapping = Mapping::from_json_slice(&raw)
        .with_context(|| format!("invalid mapping {}", args.mapping.display()))?;
    let property_mapping =
        PropertyMapping::with_settings(mapping, settings).context("mapping rejected")?;

    if args.show_mapping {
        println!("{}", serde_json::to_string_pretty(property_mapping.mapping())?);
    }

    if args.show_aliases {
        let mut aliases: Vec<_> = property_mapping.field_aliases().iter().collect();
        aliases.sort();
        for (alias, target) in aliases {
            println!("{alias} -> {target}");
        }
    }

    if args.list_fields {
        for name in property_mapping.mapping().field_names() {
            println!("{name}");
        }
    }

    for path in &args.paths {
        match property_mapping.resolve_field(path) {
            Ok(resolved) if resolved.is_empty() => {
                warn!("No field matches '{}'", path);
            }
            Ok(resolved) => {
                let sorted: std::collections::BTreeMap<_, _> = resolved.iter().collect();
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            }
            Err(e) => {
                warn!("Cannot resolve '{}': {}", path, e);
            }
        }
    }

    Ok(())
}
