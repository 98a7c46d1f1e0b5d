// ----- standard library imports
use std::path::Path;
// ----- extra library imports
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use solana_sdk::transaction::VersionedTransaction;
// ----- local imports
use crate::error::WalletError;
use crate::service::Wallet;

// ----- end imports

/// Signs with a local keypair, never asks anyone.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn from_file(path: &Path) -> AnyResult<Self> {
        let keypair = read_keypair_file(path)
            .map_err(|e| anyhow::anyhow!("reading keypair {}: {e}", path.display()))?;
        Ok(Self::new(keypair))
    }
}

#[async_trait]
impl Wallet for KeypairWallet {
    fn public_key(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, WalletError> {
        VersionedTransaction::try_new(transaction.message, &[&self.keypair])
            .map_err(|e| WalletError::Failed(e.into()))
    }
}
