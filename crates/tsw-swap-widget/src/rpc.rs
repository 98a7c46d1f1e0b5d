// ----- standard library imports
use std::str::FromStr;
use std::time::Duration;
// ----- extra library imports
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use base64::prelude::*;
use serde_json::{json, Value};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_request::RpcRequest;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
// ----- local imports
use crate::service::{BlockReference, Confirmation, Network, SendOptions};

// ----- end imports

/// `sendTransaction` parameters for an already serialized transaction.
pub fn send_params(raw: &[u8], options: SendOptions, commitment: CommitmentConfig) -> Value {
    json!([
        BASE64_STANDARD.encode(raw),
        {
            "encoding": "base64",
            "skipPreflight": options.skip_preflight,
            "preflightCommitment": commitment.commitment,
            "maxRetries": options.max_retries,
        }
    ])
}

/// Solana JSON-RPC backed network access.
pub struct RpcNetwork {
    client: RpcClient,
    commitment: CommitmentConfig,
    poll_interval: Duration,
}

impl RpcNetwork {
    pub fn new(url: String, commitment: CommitmentConfig, poll_interval: Duration) -> Self {
        Self::with_client(
            RpcClient::new_with_commitment(url, commitment),
            commitment,
            poll_interval,
        )
    }

    pub fn with_client(
        client: RpcClient,
        commitment: CommitmentConfig,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            commitment,
            poll_interval,
        }
    }

    async fn status(&self, signature: &Signature) -> AnyResult<Option<Confirmation>> {
        let statuses = self.client.get_signature_statuses(&[*signature]).await?;
        let Some(Some(status)) = statuses.value.into_iter().next() else {
            return Ok(None);
        };
        if let Some(err) = status.err {
            return Ok(Some(Confirmation::Failed(err.to_string())));
        }
        if status.satisfies_commitment(self.commitment) {
            return Ok(Some(Confirmation::Confirmed));
        }
        Ok(None)
    }
}

#[async_trait]
impl Network for RpcNetwork {
    async fn latest_blockhash(&self) -> AnyResult<BlockReference> {
        let (blockhash, last_valid_block_height) = self
            .client
            .get_latest_blockhash_with_commitment(self.commitment)
            .await?;
        Ok(BlockReference {
            blockhash,
            last_valid_block_height,
        })
    }

    async fn send_raw_transaction(
        &self,
        raw: &[u8],
        options: SendOptions,
    ) -> AnyResult<Signature> {
        let params = send_params(raw, options, self.commitment);
        let signature: String = self
            .client
            .send(RpcRequest::SendTransaction, params)
            .await?;
        Ok(Signature::from_str(&signature)?)
    }

    /// Polls until the transaction lands or the block height passes the
    /// reference's last valid block height. RPC errors are retried.
    async fn confirm_transaction(
        &self,
        reference: &BlockReference,
        signature: &Signature,
    ) -> AnyResult<Confirmation> {
        loop {
            match self.status(signature).await {
                Ok(Some(confirmation)) => return Ok(confirmation),
                Ok(None) => {}
                Err(e) => tracing::debug!("status of {signature} unavailable: {e}"),
            }
            match self
                .client
                .get_block_height_with_commitment(self.commitment)
                .await
            {
                Ok(height) if height > reference.last_valid_block_height => {
                    // one last look, it may have landed in the meantime
                    return match self.status(signature).await {
                        Ok(Some(confirmation)) => Ok(confirmation),
                        _ => Ok(Confirmation::Expired),
                    };
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("block height unavailable: {e}"),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
