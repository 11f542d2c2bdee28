//! Ledger client against a Solana RPC node.
//!
//! Reads use the configured commitment; writes are signed by the service
//! authority and follow the two-phase discipline, with program logs pulled
//! out of simulation results and preflight failures for user-facing
//! diagnostics.

use crate::domain::address::derive_bounty_addresses;
use crate::domain::model::BountyScope;
use crate::domain::record::{instruction_discriminator, BountyRecord};
use crate::foundation::{BountyError, Result, TxSignature, ACCEPTED_MINT};
use crate::infrastructure::config::LedgerConfig;
use crate::infrastructure::ledger::BountyLedger;
use async_trait::async_trait;
use borsh::BorshSerialize;
use log::{debug, info};
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::{RpcError, RpcResponseErrorData};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use solana_sdk::system_program;
use solana_sdk::transaction::Transaction;
use std::str::FromStr;
use std::time::Duration;

pub struct SolanaLedger {
    client: RpcClient,
    program_id: Pubkey,
    authority: Keypair,
    accepted_mint: Pubkey,
    commitment: CommitmentConfig,
    rpc_url: String,
}

#[derive(BorshSerialize)]
struct InitializeBountyArgs {
    repository_id: u32,
    issue_number: u32,
}

#[derive(BorshSerialize)]
struct CloseBountyArgs {
    repository_id: u32,
    issue_number: u32,
    bounty_hunter: Option<String>,
}

pub fn parse_commitment(level: &str) -> Result<CommitmentConfig> {
    match level {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(BountyError::ConfigError(format!("unknown commitment level: {}", other))),
    }
}

impl SolanaLedger {
    pub fn new(config: &LedgerConfig) -> Result<Self> {
        let commitment = parse_commitment(&config.commitment)?;
        let program_id = config.program_id()?;
        let authority = read_keypair_file(&config.keypair_path)
            .map_err(|err| BountyError::keypair(&config.keypair_path, err.to_string()))?;
        let accepted_mint = Pubkey::from_str(ACCEPTED_MINT)?;
        // Confirmation can lag well behind submission; the client timeout is
        // extended so slow finality is not reported as a commit failure.
        let client = RpcClient::new_with_timeout_and_commitment(
            config.rpc_url.clone(),
            Duration::from_secs(config.confirm_timeout_secs),
            commitment,
        );
        info!("ledger client ready rpc_url={} program_id={} authority={}", config.rpc_url, program_id, authority.pubkey());
        Ok(Self { client, program_id, authority, accepted_mint, commitment, rpc_url: config.rpc_url.clone() })
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    fn initialize_instruction(&self, scope: BountyScope) -> Result<Instruction> {
        let addresses = derive_bounty_addresses(&self.program_id, scope);
        let args =
            InitializeBountyArgs { repository_id: scope.repository.value(), issue_number: scope.issue.value() };
        let mut data = instruction_discriminator("initialize_bounty").to_vec();
        data.extend_from_slice(&encode_args(&args)?);
        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(addresses.board, false),
                AccountMeta::new(addresses.bounty, false),
                AccountMeta::new_readonly(self.accepted_mint, false),
                AccountMeta::new(self.authority.pubkey(), true),
                AccountMeta::new_readonly(system_program::id(), false),
            ],
            data,
        })
    }

    fn close_instruction(&self, scope: BountyScope, bounty_hunter: Option<&str>) -> Result<Instruction> {
        let addresses = derive_bounty_addresses(&self.program_id, scope);
        let args = CloseBountyArgs {
            repository_id: scope.repository.value(),
            issue_number: scope.issue.value(),
            bounty_hunter: bounty_hunter.map(str::to_string),
        };
        let mut data = instruction_discriminator("close_bounty").to_vec();
        data.extend_from_slice(&encode_args(&args)?);
        Ok(Instruction {
            program_id: self.program_id,
            accounts: vec![
                AccountMeta::new(addresses.board, false),
                AccountMeta::new(addresses.bounty, false),
                AccountMeta::new(self.authority.pubkey(), true),
            ],
            data,
        })
    }

    async fn signed_transaction(&self, instruction: Instruction, operation: &str) -> Result<Transaction> {
        let blockhash =
            self.client.get_latest_blockhash().await.map_err(|err| transport_error(operation, err))?;
        Ok(Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.authority.pubkey()),
            &[&self.authority],
            blockhash,
        ))
    }

    async fn simulate(&self, transaction: &Transaction, operation: &str) -> Result<()> {
        let response =
            self.client.simulate_transaction(transaction).await.map_err(|err| transport_error(operation, err))?;
        let result = response.value;
        if let Some(err) = result.err {
            let mut logs = result.logs.unwrap_or_default();
            if logs.is_empty() {
                logs.push(err.to_string());
            }
            debug!("simulation rejected operation={} err={}", operation, err);
            return Err(BountyError::SimulationRejected { operation: operation.to_string(), logs });
        }
        Ok(())
    }

    async fn commit(&self, transaction: &Transaction, operation: &str) -> Result<TxSignature> {
        match self.client.send_and_confirm_transaction(transaction).await {
            Ok(signature) => {
                info!("commit confirmed operation={} signature={}", operation, signature);
                Ok(TxSignature::new(signature.to_string()))
            }
            Err(err) => Err(commit_error(operation, err)),
        }
    }
}

fn encode_args<T: BorshSerialize>(args: &T) -> Result<Vec<u8>> {
    args.try_to_vec().map_err(|err| BountyError::SerializationError {
        format: "borsh".to_string(),
        details: err.to_string(),
    })
}

fn transport_error(operation: &str, err: ClientError) -> BountyError {
    BountyError::transport(operation, err.to_string())
}

/// Submission errors that carry a preflight simulation keep its program
/// logs; anything else keeps only the rendered message.
fn commit_error(operation: &str, err: ClientError) -> BountyError {
    if let ClientErrorKind::RpcError(RpcError::RpcResponseError {
        data: RpcResponseErrorData::SendTransactionPreflightFailure(simulation),
        ..
    }) = &err.kind
    {
        let logs = simulation.logs.clone().unwrap_or_default();
        return BountyError::commit_failed(operation, err.to_string(), logs);
    }
    BountyError::commit_failed(operation, err.to_string(), Vec::new())
}

#[async_trait]
impl BountyLedger for SolanaLedger {
    async fn fetch_record(&self, scope: BountyScope) -> Result<Option<BountyRecord>> {
        let addresses = derive_bounty_addresses(&self.program_id, scope);
        let response = self
            .client
            .get_account_with_commitment(&addresses.bounty, self.commitment)
            .await
            .map_err(|err| transport_error("fetch_record", err))?;
        match response.value {
            None => {
                debug!("no bounty record scope={} address={}", scope, addresses.bounty);
                Ok(None)
            }
            Some(account) => BountyRecord::from_account_data(&account.data).map(Some),
        }
    }

    async fn simulate_initialize(&self, scope: BountyScope) -> Result<()> {
        let instruction = self.initialize_instruction(scope)?;
        let transaction = self.signed_transaction(instruction, "initialize_bounty").await?;
        self.simulate(&transaction, "initialize_bounty").await
    }

    async fn commit_initialize(&self, scope: BountyScope) -> Result<TxSignature> {
        let instruction = self.initialize_instruction(scope)?;
        let transaction = self.signed_transaction(instruction, "initialize_bounty").await?;
        self.commit(&transaction, "initialize_bounty").await
    }

    async fn simulate_close(&self, scope: BountyScope, bounty_hunter: Option<&str>) -> Result<()> {
        let instruction = self.close_instruction(scope, bounty_hunter)?;
        let transaction = self.signed_transaction(instruction, "close_bounty").await?;
        self.simulate(&transaction, "close_bounty").await
    }

    async fn commit_close(&self, scope: BountyScope, bounty_hunter: Option<&str>) -> Result<TxSignature> {
        let instruction = self.close_instruction(scope, bounty_hunter)?;
        let transaction = self.signed_transaction(instruction, "close_bounty").await?;
        self.commit(&transaction, "close_bounty").await
    }

    async fn health_check(&self) -> Result<()> {
        self.client.get_health().await.map_err(|err| transport_error("health", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::DISCRIMINATOR_SIZE;

    fn test_ledger() -> SolanaLedger {
        SolanaLedger {
            client: RpcClient::new_with_timeout_and_commitment(
                "http://127.0.0.1:8899".to_string(),
                Duration::from_secs(1),
                CommitmentConfig::processed(),
            ),
            program_id: Pubkey::new_unique(),
            authority: Keypair::new(),
            accepted_mint: Pubkey::new_unique(),
            commitment: CommitmentConfig::processed(),
            rpc_url: "http://127.0.0.1:8899".to_string(),
        }
    }

    #[test]
    fn initialize_instruction_layout() {
        let ledger = test_ledger();
        let scope = BountyScope::new(1296269.into(), 1347.into());
        let instruction = ledger.initialize_instruction(scope).expect("instruction");

        assert_eq!(instruction.program_id, ledger.program_id);
        assert_eq!(&instruction.data[..DISCRIMINATOR_SIZE], &instruction_discriminator("initialize_bounty"));
        // Two u32 arguments after the discriminator.
        assert_eq!(instruction.data.len(), DISCRIMINATOR_SIZE + 8);
        assert_eq!(&instruction.data[DISCRIMINATOR_SIZE..DISCRIMINATOR_SIZE + 4], &1296269u32.to_le_bytes());

        let addresses = derive_bounty_addresses(&ledger.program_id, scope);
        assert_eq!(instruction.accounts[0].pubkey, addresses.board);
        assert_eq!(instruction.accounts[1].pubkey, addresses.bounty);
        assert_eq!(instruction.accounts[2].pubkey, ledger.accepted_mint);
        assert!(instruction.accounts[3].is_signer);
        assert_eq!(instruction.accounts[4].pubkey, system_program::id());
    }

    #[test]
    fn close_instruction_encodes_the_nullable_hunter() {
        let ledger = test_ledger();
        let scope = BountyScope::new(42.into(), 7.into());

        let without = ledger.close_instruction(scope, None).expect("instruction");
        assert_eq!(&without.data[..DISCRIMINATOR_SIZE], &instruction_discriminator("close_bounty"));
        // Two u32s plus the one-byte None tag.
        assert_eq!(without.data.len(), DISCRIMINATOR_SIZE + 8 + 1);

        let with = ledger.close_instruction(scope, Some("octocat")).expect("instruction");
        // Some tag, string length prefix, then the seven bytes of the login.
        assert_eq!(with.data.len(), DISCRIMINATOR_SIZE + 8 + 1 + 4 + 7);
        assert_eq!(with.accounts.len(), 3);
        assert!(with.accounts[2].is_signer);
    }

    #[test]
    fn commitment_levels_parse() {
        assert!(parse_commitment("processed").is_ok());
        assert!(parse_commitment("confirmed").is_ok());
        assert!(parse_commitment("finalized").is_ok());
        assert!(parse_commitment("instant").is_err());
    }
}
