use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Confirm, Select, theme::ColorfulTheme};
use ejectr_core::command::SystemRunner;
use ejectr_core::config::{Config, IgnoreList};
use ejectr_core::platform::Platform;
use ejectr_core::toast::{Toast, ToastStyle};
use ejectr_core::volume::Volume;
use ejectr_core::{eject, list};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "ejectr")]
#[command(about = "A safe, interactive tool for ejecting removable volumes", version)]
struct Cli {
    /// Comma-separated volume names to hide (e.g. "Macintosh HD,E:")
    #[arg(long = "ignore", value_name = "LIST", env = "EJECTR_IGNORED_VOLUMES", global = true)]
    ignored_volumes: Option<String>,

    /// Directory containing RemoveDrive.exe (Windows only)
    #[arg(long, value_name = "DIR", env = "EJECTR_ASSETS_DIR", global = true)]
    assets_dir: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List mounted removable volumes
    List {
        /// Print the volumes as JSON
        #[arg(long)]
        json: bool,
    },
    /// Eject a removable volume, picking it interactively if no name is given
    Eject {
        /// Exact name of the volume, as printed by `list`
        name: Option<String>,

        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Installs a stderr subscriber. `RUST_LOG` overrides the default filter.
fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "ejectr=debug,ejectr_core=debug,info"
    } else {
        "warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .compact(),
        )
        .init();
}

/// Renders a toast from the core library on stderr.
fn show_toast(toast: &Toast) {
    match toast.style {
        ToastStyle::Success => eprintln!(
            "✨ {} {}",
            style(&toast.title).green().bold(),
            toast.message
        ),
        ToastStyle::Failure => eprintln!(
            "❌ {} {}",
            style(&toast.title).red().bold(),
            toast.message
        ),
    }
}

/// Presents an interactive menu for the user to select a volume.
fn select_volume(volumes: &[Volume], prompt: &str) -> Result<Volume> {
    if volumes.is_empty() {
        return Err(anyhow!("No removable volumes found."));
    }

    let items: Vec<String> = volumes.iter().map(|v| v.to_string()).collect();

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    Ok(volumes[selection].clone())
}

/// Looks up a volume by the exact name `list` printed for it.
fn find_volume(volumes: &[Volume], name: &str) -> Result<Volume> {
    volumes
        .iter()
        .find(|v| v.name == name)
        .cloned()
        .ok_or_else(|| anyhow!("No removable volume named '{}'.", name))
}

/// Presents a final "Yes/No" confirmation to the user.
fn confirm_operation(prompt: &str) -> Result<bool> {
    let confirmation = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    Ok(confirmation)
}

fn eject_spinner(volume: &Volume) -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.blue} [{elapsed_precise}] {msg}")?,
    );
    spinner.set_message(format!("Ejecting {}", style(volume).cyan()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    Ok(spinner)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let platform = Platform::current()?;
    tracing::debug!(?platform, "resolved platform");
    let config = Config::new(
        IgnoreList::from_preference(cli.ignored_volumes.as_deref()),
        cli.assets_dir,
    );

    match cli.command {
        Commands::List { json } => {
            let volumes = list::run(platform, &config, &SystemRunner, |t| show_toast(&t)).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&volumes)?);
                return Ok(ExitCode::SUCCESS);
            }

            if volumes.is_empty() {
                println!("No removable volumes found.");
                return Ok(ExitCode::SUCCESS);
            }

            println!("Found {} removable volumes:\n", volumes.len());
            for volume in &volumes {
                println!("  {}", style(volume).cyan());
            }
        }
        Commands::Eject { name, yes } => {
            let volumes = list::run(platform, &config, &SystemRunner, |t| show_toast(&t)).await;
            let volume = match name {
                Some(name) => find_volume(&volumes, &name)?,
                None => select_volume(&volumes, "Select the volume to EJECT")?,
            };

            if !yes && !confirm_operation(&format!("Eject '{}'?", volume))? {
                println!("Eject cancelled.");
                return Ok(ExitCode::SUCCESS);
            }

            let spinner = eject_spinner(&volume)?;
            let result = eject::run(platform, &volume, &config, &SystemRunner).await;
            spinner.finish_and_clear();

            // The core leaves eject failures to us; report them as a toast.
            match result {
                Ok(()) => show_toast(&Toast::success(
                    "Volume ejected",
                    format!("{} can be safely removed.", volume),
                )),
                Err(e) => {
                    show_toast(&Toast::failure("Error ejecting volume", e.to_string()));
                    return Ok(ExitCode::FAILURE);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_options_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "ejectr",
            "eject",
            "E: (Kingston)",
            "--yes",
            "--ignore",
            "Backup",
            "--assets-dir",
            "assets",
        ])
        .unwrap();

        assert_eq!(cli.ignored_volumes.as_deref(), Some("Backup"));
        assert_eq!(cli.assets_dir, Some(PathBuf::from("assets")));
        match cli.command {
            Commands::Eject { name, yes } => {
                assert_eq!(name.as_deref(), Some("E: (Kingston)"));
                assert!(yes);
            }
            Commands::List { .. } => panic!("expected eject"),
        }
    }

    #[test]
    fn find_volume_requires_an_exact_name() {
        let volumes = vec![Volume::new("E: (Kingston)"), Volume::new("F:")];
        assert_eq!(find_volume(&volumes, "F:").unwrap(), Volume::new("F:"));
        assert!(find_volume(&volumes, "E:").is_err());
    }

    #[test]
    fn selecting_from_nothing_fails_without_prompting() {
        assert!(select_volume(&[], "pick").is_err());
    }
}
