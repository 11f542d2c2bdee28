use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solana-bounty-service")]
#[command(about = "Reconciles issue bounty labels with on-chain bounty state", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Config profile to apply ([profiles.<name>] overrides)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Override the webhook listen address
    #[arg(short, long)]
    pub listen: Option<String>,

    /// Log level (trace, debug, info, warn, error); overrides the
    /// configured `log_level`
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn apply_to_env(&self) {
        if let Some(config_path) = &self.config {
            std::env::set_var(bounty_core::foundation::CONFIG_PATH_ENV, config_path);
        }

        if let Some(profile) = &self.profile {
            std::env::set_var(bounty_core::foundation::PROFILE_ENV, profile);
        }

        if let Some(listen) = &self.listen {
            std::env::set_var(bounty_core::foundation::LISTEN_ADDR_ENV, listen);
        }
    }
}
