//! Configuration loader using Figment for layered config management.
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. TOML config file
//! 3. Profile overrides from `[profiles.<name>]`
//! 4. Environment variables (BOUNTY_* prefix)

use crate::foundation::{
    BountyError, Result, DEFAULT_COMMITMENT, DEFAULT_CONFIRM_TIMEOUT_SECS, DEFAULT_LISTEN_ADDR,
    DEFAULT_RPC_URL, DEFAULT_TRACKER_API_BASE, DEFAULT_TRACKER_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::infrastructure::config::types::AppConfig;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::value::Dict;
use figment::{Figment, Profile};
use log::{debug, info};
use std::path::Path;

/// Environment variable prefix for config overrides.
///
/// Example: `BOUNTY_LEDGER__RPC_URL` -> `ledger.rpc_url`
const ENV_PREFIX: &str = "BOUNTY_";

const DEFAULT_LOG_LEVEL: &str = "info";

/// Load configuration from a file path, or from defaults and environment
/// alone when the file does not exist.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    info!("loading configuration path={}", path.display());
    let figment = figment_base(path).merge(Env::prefixed(ENV_PREFIX).split("__"));
    let mut config: AppConfig = figment
        .extract()
        .map_err(|e| BountyError::ConfigError(format!("config extraction failed: {e}")))?;
    postprocess(&mut config);
    validate(&config)?;
    debug!(
        "configuration loaded tracker_api_base={} ledger_rpc_url={} listen_addr={}",
        config.tracker.api_base, config.ledger.rpc_url, config.http.listen_addr
    );
    Ok(config)
}

/// Load configuration with overrides from `[profiles.<name>]`.
pub fn load_config_with_profile(path: &Path, profile: &str) -> Result<AppConfig> {
    info!("loading configuration path={} profile={}", path.display(), profile);

    // Extract once to access `profiles.<name>` overrides from the file.
    let base_config: AppConfig = figment_base(path)
        .extract()
        .map_err(|e| BountyError::ConfigError(format!("config extraction failed: {e}")))?;

    let overrides = profile_overrides(&base_config, profile)?;

    let figment = figment_base(path)
        .merge(Serialized::from(overrides, Profile::Default))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let mut config: AppConfig = figment
        .extract()
        .map_err(|e| BountyError::ConfigError(format!("config extraction failed for profile '{profile}': {e}")))?;
    postprocess(&mut config);
    validate(&config)?;
    Ok(config)
}

fn figment_base(path: &Path) -> Figment {
    let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));
    if path.exists() {
        figment = figment.merge(Toml::file(path));
    } else {
        debug!("configuration file missing; using defaults and env only path={}", path.display());
    }
    figment
}

fn profile_overrides(config: &AppConfig, profile: &str) -> Result<Dict> {
    let profiles = config
        .profiles
        .as_ref()
        .ok_or_else(|| BountyError::ConfigError("no profiles section in config".to_string()))?;

    profiles
        .get(profile)
        .cloned()
        .ok_or_else(|| BountyError::ConfigError(format!("profile '{profile}' not found in config")))
}

fn postprocess(config: &mut AppConfig) {
    if config.tracker.api_base.trim().is_empty() {
        config.tracker.api_base = DEFAULT_TRACKER_API_BASE.to_string();
    }
    if config.tracker.user_agent.trim().is_empty() {
        config.tracker.user_agent = DEFAULT_USER_AGENT.to_string();
    }
    if config.tracker.timeout_secs == 0 {
        config.tracker.timeout_secs = DEFAULT_TRACKER_TIMEOUT_SECS;
    }

    if config.ledger.rpc_url.trim().is_empty() {
        config.ledger.rpc_url = DEFAULT_RPC_URL.to_string();
    }
    if config.ledger.commitment.trim().is_empty() {
        config.ledger.commitment = DEFAULT_COMMITMENT.to_string();
    }
    if config.ledger.confirm_timeout_secs == 0 {
        config.ledger.confirm_timeout_secs = DEFAULT_CONFIRM_TIMEOUT_SECS;
    }

    if config.http.listen_addr.trim().is_empty() {
        config.http.listen_addr = DEFAULT_LISTEN_ADDR.to_string();
    }
    if config.log_level.trim().is_empty() {
        config.log_level = DEFAULT_LOG_LEVEL.to_string();
    }
}

fn validate(config: &AppConfig) -> Result<()> {
    let mut missing = Vec::new();
    if config.tracker.api_token.trim().is_empty() {
        missing.push("tracker.api_token");
    }
    if config.tracker.webhook_secret.trim().is_empty() {
        missing.push("tracker.webhook_secret");
    }
    if config.ledger.program_id.trim().is_empty() {
        missing.push("ledger.program_id");
    }
    if config.ledger.keypair_path.trim().is_empty() {
        missing.push("ledger.keypair_path");
    }
    if !missing.is_empty() {
        return Err(BountyError::ConfigError(format!("missing required settings: {}", missing.join(", "))));
    }

    if !matches!(config.ledger.commitment.as_str(), "processed" | "confirmed" | "finalized") {
        return Err(BountyError::ConfigError(format!(
            "unknown commitment level: {}",
            config.ledger.commitment
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PROGRAM_ID: &str = "11111111111111111111111111111111";

    fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bounty-config.toml");
        std::fs::write(&path, contents).unwrap();
        (dir, path)
    }

    fn minimal_toml() -> String {
        format!(
            r#"
            [tracker]
            api_token = "ghp_token"
            webhook_secret = "hook-secret"

            [ledger]
            program_id = "{PROGRAM_ID}"
            keypair_path = "/keys/authority.json"
        "#
        )
    }

    #[test]
    fn minimal_file_fills_defaults() {
        let (_dir, path) = write_config(&minimal_toml());

        let config = load_config(&path).unwrap();
        assert_eq!(config.tracker.api_base, "https://api.github.com");
        assert_eq!(config.tracker.user_agent, "solana-bounty-service");
        assert_eq!(config.ledger.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(config.ledger.commitment, "confirmed");
        assert_eq!(config.http.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.log_level, "info");
        assert!(config.ledger.program_id().is_ok());
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let (_dir, path) = write_config(
            r#"
            [ledger]
            rpc_url = "http://127.0.0.1:8899"
        "#,
        );

        let err = load_config(&path).unwrap_err();
        let rendered = err.to_string();
        assert!(rendered.contains("tracker.api_token"), "got: {rendered}");
        assert!(rendered.contains("ledger.program_id"), "got: {rendered}");
    }

    #[test]
    fn unknown_commitment_is_rejected() {
        let toml = format!(
            r#"
            [tracker]
            api_token = "t"
            webhook_secret = "s"

            [ledger]
            program_id = "{PROGRAM_ID}"
            keypair_path = "/keys/authority.json"
            commitment = "instant"
        "#
        );
        let (_dir, path) = write_config(&toml);

        assert!(load_config(&path).is_err());
    }

    #[test]
    fn profile_overrides_apply() {
        let toml = format!(
            r#"
            [tracker]
            api_token = "ghp_token"
            webhook_secret = "hook-secret"

            [ledger]
            rpc_url = "http://127.0.0.1:8899"
            program_id = "{PROGRAM_ID}"
            keypair_path = "/keys/authority.json"

            [profiles.devnet.ledger]
            rpc_url = "https://api.devnet.solana.com"
        "#
        );
        let (_dir, path) = write_config(&toml);

        let config = load_config_with_profile(&path, "devnet").unwrap();
        assert_eq!(config.ledger.rpc_url, "https://api.devnet.solana.com");

        assert!(load_config_with_profile(&path, "mainnet").is_err());
    }

    #[test]
    fn missing_file_uses_defaults_and_fails_validation() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(load_config(&path).is_err());
    }
}
