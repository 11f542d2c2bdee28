use bounty_core::foundation::{BountyError, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH, PROFILE_ENV};
use bounty_core::infrastructure::config::{self, AppConfig};
use log::info;
use std::path::PathBuf;

/// The CLI flag wins over the configured level.
pub fn effective_log_level<'a>(cli: Option<&'a str>, configured: &'a str) -> &'a str {
    match cli {
        Some(level) if !level.trim().is_empty() => level,
        _ => configured,
    }
}

pub fn init_logging(level: &str) -> Result<(), BountyError> {
    let filter = tracing_subscriber::EnvFilter::try_new(level)
        .or_else(|_| tracing_subscriber::EnvFilter::try_from_default_env())
        .map_err(|err| BountyError::Message(err.to_string()))?;
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_thread_ids(true).try_init();
    Ok(())
}

/// Loads the configuration named by the environment, applying the
/// `[profiles.<name>]` overlay when one is selected.
pub fn load_config() -> Result<AppConfig, BountyError> {
    let path = std::env::var(CONFIG_PATH_ENV).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    match std::env::var(PROFILE_ENV) {
        Ok(profile) if !profile.trim().is_empty() => {
            info!("loading config profile profile={}", profile.trim());
            config::load_config_with_profile(&path, profile.trim())
        }
        _ => config::load_config(&path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_level_applies_unless_the_flag_overrides_it() {
        assert_eq!(effective_log_level(None, "debug"), "debug");
        assert_eq!(effective_log_level(Some("warn"), "debug"), "warn");
        assert_eq!(effective_log_level(Some("  "), "debug"), "debug");
    }
}
