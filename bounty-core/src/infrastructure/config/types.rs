use crate::foundation::{BountyError, Result};
use figment::value::{Dict, Map};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Issue tracker access and webhook authentication.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// REST base, e.g. `https://api.github.com`.
    #[serde(default)]
    pub api_base: String,
    /// Token used as the bearer credential for label and comment calls.
    #[serde(default)]
    pub api_token: String,
    #[serde(default)]
    pub user_agent: String,
    /// Shared secret GitHub signs webhook deliveries with.
    #[serde(default)]
    pub webhook_secret: String,
    #[serde(default)]
    pub timeout_secs: u64,
}

impl TrackerConfig {
    pub fn api_token(&self) -> SecretString {
        SecretString::from(self.api_token.clone())
    }

    pub fn webhook_secret(&self) -> SecretString {
        SecretString::from(self.webhook_secret.clone())
    }
}

/// Ledger RPC endpoint and signing identity.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub rpc_url: String,
    /// Address of the deployed bounty program.
    #[serde(default)]
    pub program_id: String,
    /// Path to the authority keypair file (JSON byte array).
    #[serde(default)]
    pub keypair_path: String,
    /// Commitment level for reads and confirmations: processed, confirmed
    /// or finalized.
    #[serde(default)]
    pub commitment: String,
    #[serde(default)]
    pub confirm_timeout_secs: u64,
}

impl LedgerConfig {
    pub fn program_id(&self) -> Result<Pubkey> {
        let trimmed = self.program_id.trim();
        if trimmed.is_empty() {
            return Err(BountyError::MissingProgramAddress);
        }
        Pubkey::from_str(trimmed).map_err(|err| BountyError::invalid_address(trimmed, err.to_string()))
    }
}

/// Webhook ingress listener.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default)]
    pub listen_addr: String,
    /// Bearer token guarding the ready and metrics endpoints. Unset means
    /// both are open.
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    /// Log filter directive, e.g. `info` or `bounty_core=debug,info`.
    #[serde(default)]
    pub log_level: String,
    #[serde(default, skip_serializing)]
    pub profiles: Option<Map<String, Dict>>,
}
