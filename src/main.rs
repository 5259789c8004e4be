use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

use flag_audit::cli::{handle_audit_command, AuditCommands};
use flag_audit::config::{AuditPaths, Settings};

/// Environment variable holding a tracing filter directive
const LOG_ENV: &str = "FLAG_AUDIT_LOG";

#[derive(Parser)]
#[command(
    name = "flag-audit",
    version,
    about = "Browse feature-flag audit logs and their diffs",
    long_about = "flag-audit reads audit log records exported from a feature-flag \
                  platform, classifies each change, and shows what changed \
                  between the entity snapshots before and after the event."
)]
struct Cli {
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Audit(AuditCommands),

    /// Show current configuration and paths, writing defaults on first run
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let paths = AuditPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    debug!(base_dir = %paths.base_dir().display(), "resolved paths");

    match cli.command {
        Some(Commands::Audit(cmd)) => handle_audit_command(&paths, &settings, cmd)?,
        Some(Commands::Config) => {
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
                info!(path = %paths.settings_file().display(), "wrote default settings");
            }

            println!("flag-audit Configuration");
            println!("========================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Audit log store:  {}", paths.audit_log_store().display());
            println!();
            println!("Settings:");
            println!("  Page size:          {}", settings.page_size);
            println!("  Date format:        {}", settings.date_format);
            println!("  Diff context lines: {}", settings.diff_context_lines);
            println!("  Default order:      {}", settings.default_order);
        }
        None => {
            println!("flag-audit - Browse feature-flag audit logs");
            println!();
            println!("Run 'flag-audit --help' for usage information.");
            println!("Run 'flag-audit import <file>' to load records.");
        }
    }

    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
