//! ln2t-watchdog-setup - Main entry point
//!
//! Thin binary over the library: parse the CLI, wire up the real
//! collaborators, run the requested procedure, and render its report.

use anyhow::{Context, Result};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use watchdog_setup::cli::{Cli, Commands};
use watchdog_setup::environment::InstallScope;
use watchdog_setup::error::SetupError;
use watchdog_setup::lifecycle::{Lifecycle, UninstallReport};
use watchdog_setup::package_manager::PipPackageManager;
use watchdog_setup::paths::{self, Paths};
use watchdog_setup::sanity;
use watchdog_setup::service_manager::SystemctlManager;
use watchdog_setup::status;
use watchdog_setup::units::TIMER_UNIT;

/// Initialize the logger with appropriate settings
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    if let Err(e) = run(cli) {
        error!("{e:#}");
        eprintln!("✗ {e:#}");
        // Fatal external commands pass their own exit code through
        let code = e
            .downcast_ref::<SetupError>()
            .and_then(SetupError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = Paths::resolve()?;
    let pip = PipPackageManager::new();
    let systemctl = SystemctlManager::new();
    let lifecycle = Lifecycle::new(&pip, &systemctl, paths.clone()).with_dry_run(cli.dry_run);

    if cli.dry_run {
        println!("🔎 Dry run: no changes will be made");
    }

    match cli.command {
        Commands::Install { package_dir } => {
            info!("install requested");
            sanity::run_preflight_checks()?;
            let package_root = paths::resolve_package_root(package_dir.as_deref())?;
            let scope = InstallScope::detect();

            println!(
                "🔧 Installing ln2t-watchdog from {}",
                package_root.display()
            );
            let report = lifecycle
                .install(&package_root, scope)
                .context("install aborted")?;

            if report.dry_run {
                println!("\n🔎 Dry run complete; nothing was changed");
            } else {
                println!("\n✅ Install complete");
                println!("   Check the timer with: systemctl --user status {TIMER_UNIT}");
            }
        }
        Commands::Uninstall => {
            info!("uninstall requested");
            println!("🔧 Uninstalling ln2t-watchdog");
            let report = lifecycle.uninstall().context("uninstall aborted")?;
            render_uninstall(&report);
        }
        Commands::Status { json } => {
            let scope = InstallScope::detect();
            let report = status::collect(&pip, &systemctl, &paths, scope);
            if json {
                let rendered = report
                    .to_json()
                    .context("rendering the status report as JSON")?;
                println!("{rendered}");
            } else {
                print!("{}", report.render());
            }
        }
    }

    Ok(())
}

fn render_uninstall(report: &UninstallReport) {
    if report.dry_run {
        println!("\n🔎 Dry run complete; nothing was changed");
    } else if report.warnings.is_empty() {
        println!("\n✅ Uninstall complete");
    } else {
        println!(
            "\n✅ Uninstall complete ({} step(s) were already done or unavailable)",
            report.warnings.len()
        );
    }
    println!(
        "   Run history is kept at {}; remove it manually with `rm -r` if you no longer need it.",
        report.state_dir.display()
    );
}
