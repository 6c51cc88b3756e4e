use blockpress::types::Site;
use blockpress::{SiteBuilder, config, manifest, output};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shared flags for commands that build a site.
#[derive(clap::Args, Clone)]
struct SiteArgs {
    /// Site snapshot (JSON) to build
    #[arg(long, default_value = "site.json")]
    snapshot: PathBuf,

    /// Directory containing blockpress.toml
    #[arg(long, default_value = ".")]
    config: PathBuf,
}

#[derive(Parser)]
#[command(name = "blockpress")]
#[command(about = "Static site compiler for block-based CMS sites")]
#[command(long_about = "\
Static site compiler for block-based CMS sites

A site snapshot is a JSON document with the brand, colours, template and
pages of one tenant site. Every published page becomes an HTML file built
from its content blocks and the template; the template CSS becomes
styles.css and its JavaScript, if any, scripts.js.

Snapshot structure:

  {
    \"brand_name\": \"Acme\",
    \"custom_colors\": { \"primary\": \"#ff0000\" },
    \"template_footprint\": { \"footer_html\": \"<footer>…</footer>\" },
    \"template\": { \"base_html\": \"…{{content}}…\", \"base_css\": \"…\", \"base_js\": null },
    \"pages\": [
      { \"slug\": \"home\", \"title\": \"Home\", \"order\": 0, \"is_published\": true,
        \"blocks\": [ { \"block_type\": \"hero\", \"order\": 0, \"content\": { \"title\": \"Hi\" } } ] }
    ]
  }

Template tokens: {{brand_name}} {{page_title}} {{meta_title}}
{{meta_description}} {{content}} {{navigation}} {{footer}} {{scripts}}

Run 'blockpress gen-config' to generate a documented blockpress.toml.")]
#[command(version)]
struct Cli {
    /// Log progress (same as RUST_LOG=info; warnings are always logged)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build a site snapshot into an output directory
    Build {
        #[command(flatten)]
        site: SiteArgs,

        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,

        /// Rewrite every file and keep files from previous builds
        #[arg(long)]
        no_manifest: bool,
    },
    /// Build a site snapshot in memory and report, without writing files
    Check(SiteArgs),
    /// Print a stock blockpress.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Build {
            site: args,
            output: output_dir,
            no_manifest,
        } => {
            let build = build_site(&args)?;
            output::print_build_output(&build);
            let stats = manifest::write_output(&build, &output_dir, !no_manifest)?;
            output::print_write_stats(&stats, &output_dir);
        }
        Command::Check(args) => {
            println!("==> Checking {}", args.snapshot.display());
            let build = build_site(&args)?;
            output::print_build_output(&build);
            println!("==> Site is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config and snapshot, then build in memory.
fn build_site(args: &SiteArgs) -> Result<blockpress::BuildOutput, Box<dyn std::error::Error>> {
    let config = config::load_config(&args.config)?;
    init_thread_pool(&config.processing);
    let site = load_snapshot(&args.snapshot)?;
    Ok(SiteBuilder::new(config.build_options()).build(&site)?)
}

fn load_snapshot(path: &Path) -> Result<Site, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read snapshot {}: {e}", path.display()))?;
    let site: Site = serde_json::from_str(&content)
        .map_err(|e| format!("invalid snapshot {}: {e}", path.display()))?;
    tracing::info!(
        snapshot = %path.display(),
        site = %site.brand_name,
        pages = site.pages.len(),
        "Loaded site snapshot"
    );
    Ok(site)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; config can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
