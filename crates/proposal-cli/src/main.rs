use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr};
use proposal_core::{BasicFields, ThemeBindings, list_image_srcs};
use proposal_export::assets::ProposalAssets;
use proposal_export::build::ProposalInputs;
use proposal_export::layout::LayoutSettings;
use proposal_export::template::{load_template, write_atomic};
use tracing_subscriber::EnvFilter;

mod config;

use config::ProposalConfig;

/// Build self-contained proposal HTML from a template.
#[derive(Parser)]
#[command(name = "proposal", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Config file (defaults to `<config dir>/proposal/config.json`).
    #[arg(long, global = true, env = "PROPOSAL_CONFIG")]
    config: Option<PathBuf>,

    /// Session directory holding `proposal_assets/`. Overrides the config.
    #[arg(long, global = true, env = "PROPOSAL_BASE_DIR")]
    base_dir: Option<PathBuf>,

    /// Debug-level logging (same as `RUST_LOG=debug`).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Fill in fields, theme colours and images, and write the document.
    Build(BuildArgs),
    /// Print the image references a template still points at.
    Scan {
        /// Template to scan (defaults to the one in the assets directory).
        template: Option<PathBuf>,
    },
    /// Store an image for one of the template's image slots.
    Slot {
        /// Slot key or label, see `proposal slots`.
        key: String,
        file: PathBuf,
    },
    /// List image slots and whether an image has been stored for each.
    Slots,
    /// Show or change page layout settings.
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
    /// Create or print the config file.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
struct BuildArgs {
    #[arg(long)]
    recipient: Option<String>,
    #[arg(long)]
    proposer: Option<String>,
    #[arg(long)]
    tel: Option<String>,
    /// Primary theme colour (`--primary-purple`).
    #[arg(long)]
    primary: Option<String>,
    /// Accent theme colour (`--accent-gold`).
    #[arg(long)]
    accent: Option<String>,
    /// Extra style variable, e.g. `--var=--page-bg=#fff`. Repeatable.
    #[arg(
        long = "var",
        value_name = "NAME=VALUE",
        value_parser = parse_binding,
        allow_hyphen_values = true
    )]
    vars: Vec<(String, String)>,
    /// Template to use instead of the one in the assets directory.
    #[arg(long)]
    template: Option<PathBuf>,
    /// Directory of attachment page images. Overrides the config.
    #[arg(long, conflicts_with = "no_attachments")]
    attachments: Option<PathBuf>,
    /// Skip attachment pages even if the config names a directory.
    #[arg(long)]
    no_attachments: bool,
    /// Output file; the document goes to stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum LayoutAction {
    Show,
    /// Update one or more settings, e.g. `page_gap_px=24`.
    Set {
        #[arg(required = true, value_name = "KEY=VALUE", value_parser = parse_setting)]
        settings: Vec<(String, u32)>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing config file.
        #[arg(long)]
        force: bool,
    },
    Show,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.json_logs);

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };
    let mut config = config::load_config(&config_path)?;
    if let Some(base_dir) = &cli.base_dir {
        config.base_dir = base_dir.clone();
    }

    match cli.command {
        Command::Build(args) => build(&config, args),
        Command::Scan { template } => scan(&config, template),
        Command::Slot { key, file } => {
            let bytes = std::fs::read(&file)
                .wrap_err_with(|| format!("failed to read {}", file.display()))?;
            let path = ProposalAssets::create(&config.base_dir)?.save_slot_image(&key, &bytes)?;
            println!("{}", path.display());
            Ok(())
        }
        Command::Slots => {
            let assets = ProposalAssets::new(&config.base_dir);
            for (slot, path) in assets.slot_images() {
                let status = if path.is_some() { "set" } else { "-" };
                println!("{}\t{}\t{}\t{}", slot.key, status, slot.placeholder, slot.label);
            }
            Ok(())
        }
        Command::Layout { action } => layout(&config, action),
        Command::Config { action } => match action {
            ConfigAction::Init { force } => {
                if config_path.exists() && !force {
                    eyre::bail!(
                        "config already exists at {} (use --force to overwrite)",
                        config_path.display()
                    );
                }
                config::save_config(&config_path, &config)?;
                println!("{}", config_path.display());
                Ok(())
            }
            ConfigAction::Show => {
                println!("{}", serde_json::to_string_pretty(&config)?);
                Ok(())
            }
        },
    }
}

fn init_tracing(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build(config: &ProposalConfig, args: BuildArgs) -> Result<()> {
    let mut assets = ProposalAssets::create(&config.base_dir)?;
    if let Some(template) = args.template {
        assets = assets.with_template(template);
    }

    let defaults = &config.defaults;
    let inputs = ProposalInputs {
        fields: BasicFields {
            recipient: args.recipient.unwrap_or_else(|| defaults.recipient.clone()),
            proposer: args.proposer.unwrap_or_else(|| defaults.proposer.clone()),
            tel: args.tel.unwrap_or_else(|| defaults.tel.clone()),
        },
        primary: args.primary.unwrap_or_else(|| defaults.primary.clone()),
        accent: args.accent.unwrap_or_else(|| defaults.accent.clone()),
        extra_theme: args.vars.into_iter().collect::<ThemeBindings>(),
    };

    let attachments_dir = if args.no_attachments {
        None
    } else {
        args.attachments.or_else(|| config.attachments_dir.clone())
    };

    let report = assets.build(&inputs, attachments_dir.as_deref())?;
    for src in &report.unresolved {
        tracing::warn!(src = %src, "image not found, reference kept");
    }

    match args.output {
        Some(path) => {
            write_atomic(&path, report.html.as_bytes())?;
            tracing::info!(path = %path.display(), bytes = report.html.len(), "proposal written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(report.html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn scan(config: &ProposalConfig, template: Option<PathBuf>) -> Result<()> {
    let path = template.unwrap_or_else(|| ProposalAssets::new(&config.base_dir).template_path);
    let html = load_template(&path)?;
    for src in list_image_srcs(&html) {
        println!("{src}");
    }
    Ok(())
}

fn layout(config: &ProposalConfig, action: LayoutAction) -> Result<()> {
    let assets = ProposalAssets::new(&config.base_dir);
    let mut settings = assets.load_layout()?;

    if let LayoutAction::Set { settings: updates } = action {
        for (key, value) in updates {
            settings.set(&key, value)?;
        }
        ProposalAssets::create(&config.base_dir)?.save_layout(&settings)?;
    }

    for key in LayoutSettings::keys() {
        if let Some(value) = settings.get(key) {
            println!("{key} = {value}");
        }
    }
    Ok(())
}

fn parse_binding(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in `{raw}`"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

fn parse_setting(raw: &str) -> Result<(String, u32), String> {
    let (key, value) = parse_binding(raw)?;
    let value = value
        .parse::<u32>()
        .map_err(|e| format!("invalid value for {key}: {e}"))?;
    Ok((key, value))
}
