//! fpm-pools
//!
//! Renders FastCGI process-manager pools for a set of websites and keeps
//! the managed service in step with them.
//!
//! # Architecture Overview
//!
//! ```text
//!   site set (TOML/JSON) ──▶ config::loader ──▶ FpmGateway::create_configuration
//!                                                  │
//!                                                  ├─▶ pool::render_pool ─▶ <id>.conf
//!                                                  │
//!                                                  └─▶ apply_configuration
//!                                                         │ schedule()
//!                                                         ▼
//!                                                  RestartCoalescer::apply
//!                                                         │ start | restart
//!                                                         ▼
//!                                                  SystemdService (systemctl)
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use fpm_pools::config::watcher::SiteWatcher;
use fpm_pools::config::{load_config, load_sites, ManagerConfig, SiteSet};
use fpm_pools::observability::logging;
use fpm_pools::pool::render_global;
use fpm_pools::{
    ConfigRenderer, Error, FpmGateway, ManagedService, RestartCoalescer, Restartable,
    SystemdService,
};

#[derive(Parser)]
#[command(name = "fpm-pools")]
#[command(about = "FastCGI pool configuration manager", long_about = None)]
struct Cli {
    /// Manager configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render pools once, then apply a single restart
    Render {
        #[arg(short, long)]
        sites: PathBuf,

        /// Write files without touching the service
        #[arg(long)]
        no_restart: bool,
    },
    /// Render pools and re-render on every site set change
    Watch {
        #[arg(short, long)]
        sites: PathBuf,
    },
    /// Run health checks
    Check,
    /// Write the global process manager config file
    Global,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ManagerConfig::default(),
    };

    logging::init(&config.observability.log_level);

    match run(cli.command, config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "fpm-pools failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    command: Commands,
    config: ManagerConfig,
) -> Result<ExitCode, Box<dyn std::error::Error + Send + Sync>> {
    tracing::info!(
        backend_kind = %config.fpm.backend_kind,
        config_path = %config.fpm.config_path,
        service = %config.service.name,
        "Configuration loaded"
    );

    let service: Arc<dyn ManagedService> = Arc::new(SystemdService::new(
        config.service.name.clone(),
        config.service.systemctl.clone(),
    ));
    let restarts = Arc::new(RestartCoalescer::new(service.clone()));
    let gateway = Arc::new(FpmGateway::new(config.fpm.clone(), service, restarts));

    match command {
        Commands::Render { sites, no_restart } => {
            let sites = load_sites(&sites, &config.fpm.backend_kind)?;
            reconfigure(&gateway, &sites, !no_restart)?;
        }
        Commands::Watch { sites: path } => {
            let sites = load_sites(&path, &config.fpm.backend_kind)?;
            reconfigure(&gateway, &sites, true)?;

            let (watcher, mut updates) = SiteWatcher::new(&path, &config.fpm.backend_kind);
            let _watcher = watcher.run()?;

            let ctrl_c = tokio::signal::ctrl_c();
            tokio::pin!(ctrl_c);

            loop {
                tokio::select! {
                    Some(sites) = updates.recv() => {
                        let gateway = gateway.clone();
                        let result =
                            tokio::task::spawn_blocking(move || reconfigure(&gateway, &sites, true))
                                .await?;
                        // The next change retries; keep watching.
                        if let Err(e) = result {
                            tracing::error!(error = %e, "Reconfiguration failed");
                        }
                    }
                    _ = &mut ctrl_c => {
                        tracing::info!("Interrupted, stopping watcher");
                        break;
                    }
                }
            }
        }
        Commands::Check => {
            let mut healthy = true;
            for check in gateway.checks() {
                match check.check() {
                    Ok(true) => println!("{}: ok", check.title()),
                    Ok(false) => {
                        println!("{}: not running", check.title());
                        healthy = false;
                    }
                    Err(e) => {
                        println!("{}: error: {}", check.title(), e);
                        healthy = false;
                    }
                }
            }
            if !healthy {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Global => {
            let include = format!(
                "include={}",
                Path::new(&config.fpm.config_path).join("*.conf").display()
            );
            let path = PathBuf::from(&config.fpm.config_file);
            std::fs::write(&path, render_global(&config.fpm, &include))
                .map_err(|source| Error::Write { path: path.clone(), source })?;
            tracing::info!(path = %path.display(), "Global config written");
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// One configuration pass followed by at most one service action.
fn reconfigure(gateway: &FpmGateway, sites: &SiteSet, restart: bool) -> fpm_pools::Result<()> {
    gateway.create_configuration(&sites.websites)?;
    gateway.apply_configuration();
    if restart {
        gateway.restarts().apply()?;
    }
    Ok(())
}
