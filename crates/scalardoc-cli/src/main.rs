use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use scalardoc_core::config::{self, CONFIG_FILE_NAME, DocConfig};
use scalardoc_core::load::DEFAULT_BASE_FILE_NAME;
use scalardoc_core::{DocPage, Spec, load_from_dir};

#[derive(Parser)]
#[command(
    name = "scalardoc",
    about = "Render multi-file OpenAPI specs as API reference pages",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the reference page to a static HTML file
    Build {
        /// Path to the config file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        config: PathBuf,

        /// Root directory of the spec (holds the base file and paths/ schemas/ responses/)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Base file name inside the spec directory
        #[arg(long)]
        base_file: Option<String>,

        /// Link a remote spec instead of embedding a local one
        #[arg(long)]
        url: Option<String>,

        /// Output HTML file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the merged spec
    Inspect {
        /// Root directory of the spec
        #[arg(short, long)]
        dir: PathBuf,

        /// Base file name inside the spec directory
        #[arg(long, default_value = DEFAULT_BASE_FILE_NAME)]
        base_file: String,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: InspectFormat,
    },

    /// List documented operations as METHOD path pairs
    Paths {
        /// Root directory of the spec
        #[arg(short, long)]
        dir: PathBuf,

        /// Base file name inside the spec directory
        #[arg(long, default_value = DEFAULT_BASE_FILE_NAME)]
        base_file: String,
    },

    /// Initialize a new scalardoc configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum InspectFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            dir,
            base_file,
            url,
            output,
        } => cmd_build(&config, dir, base_file, url, output),

        Commands::Inspect {
            dir,
            base_file,
            format,
        } => cmd_inspect(&dir, &base_file, format),

        Commands::Paths { dir, base_file } => cmd_paths(&dir, &base_file),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "scalardoc", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn load_spec(dir: &Path, base_file: &str) -> Result<Spec> {
    load_from_dir(dir, base_file).with_context(|| {
        format!(
            "failed to load spec from {}",
            dir.join(base_file).display()
        )
    })
}

fn cmd_build(
    config_path: &Path,
    dir: Option<PathBuf>,
    base_file: Option<String>,
    url: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut cfg = config::load_config(config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?
        .unwrap_or_else(|| {
            log::info!("no {} found, using defaults", config_path.display());
            DocConfig::default()
        });

    if let Some(dir) = dir {
        cfg.spec.dir = Some(dir);
        cfg.spec.url = None;
    }
    if let Some(base_file) = base_file {
        cfg.spec.base_file_name = base_file;
    }
    if let Some(url) = url {
        cfg.spec.url = Some(url);
    }
    if let Some(output) = output {
        cfg.output = output;
    }

    let html = DocPage::from_config(&cfg)
        .render()
        .context("failed to render reference page")?;

    if let Some(parent) = cfg.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::write(&cfg.output, html)
        .with_context(|| format!("failed to write {}", cfg.output.display()))?;
    eprintln!("Wrote {}", cfg.output.display());
    Ok(())
}

fn cmd_inspect(dir: &Path, base_file: &str, format: InspectFormat) -> Result<()> {
    let spec = load_spec(dir, base_file)?;

    match format {
        InspectFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(&spec)?;
            print!("{}", yaml);
        }
        InspectFormat::Json => {
            let json = serde_json::to_string_pretty(&spec)?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn cmd_paths(dir: &Path, base_file: &str) -> Result<()> {
    let spec = load_spec(dir, base_file)?;

    let mut paths = spec.documented_paths();
    paths.sort();
    for path in &paths {
        println!("{}", path);
    }

    eprintln!(
        "{} operations across {} paths in {}",
        paths.len(),
        spec.paths.len(),
        spec.info.title
    );
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
