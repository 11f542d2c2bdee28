//! System-wide constants for bounty reconciliation.

/// Mint of the asset every bounty escrows. Fixed program parameter, passed on
/// every initialize call.
pub const ACCEPTED_MINT: &str = "AeqUCoS56RdzPU2P4L59hkxQKMtEFTqfvbJb77oqm5CT";

/// Base URL of the transaction explorer used in notification comments.
pub const EXPLORER_BASE_URL: &str = "https://explorer.solana.com/tx";

/// Default ledger RPC endpoint (local validator).
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8899";

/// Default commitment level for ledger reads and commits.
pub const DEFAULT_COMMITMENT: &str = "confirmed";

/// Default transaction confirmation timeout in seconds.
///
/// Deliberately longer than the client library default so that commits are
/// not reported failed while the ledger is still finalizing.
pub const DEFAULT_CONFIRM_TIMEOUT_SECS: u64 = 120;

/// Default issue-tracker REST endpoint.
pub const DEFAULT_TRACKER_API_BASE: &str = "https://api.github.com";

/// REST API version header value sent on every tracker request.
pub const TRACKER_API_VERSION: &str = "2022-11-28";

/// Default user agent for tracker requests.
pub const DEFAULT_USER_AGENT: &str = "solana-bounty-service";

/// Default tracker request timeout in seconds.
pub const DEFAULT_TRACKER_TIMEOUT_SECS: u64 = 30;

/// Default HTTP listen address for the webhook server.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "bounty.toml";

/// Environment variable naming the configuration file path.
pub const CONFIG_PATH_ENV: &str = "BOUNTY_CONFIG_PATH";

/// Environment variable selecting a `[profiles.<name>]` overlay.
pub const PROFILE_ENV: &str = "BOUNTY_PROFILE";

/// Environment variable overriding `http.listen_addr`.
pub const LISTEN_ADDR_ENV: &str = "BOUNTY_HTTP__LISTEN_ADDR";

/// Maximum accepted webhook body size in bytes (1 MB).
pub const MAX_WEBHOOK_BODY_BYTES: usize = 1024 * 1024;

/// Size of an account or instruction discriminator in bytes.
pub const DISCRIMINATOR_SIZE: usize = 8;
