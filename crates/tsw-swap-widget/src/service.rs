// ----- standard library imports
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
// ----- extra library imports
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use solana_sdk::hash::Hash;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use tokio_util::sync::CancellationToken;
use tsw_webapi::quotes::{Quote, QuoteRequest};
use tsw_webapi::tokens::Token;
// ----- local imports
use crate::error::{Error, Result, WalletError};
use crate::form::FormState;
use crate::notifications::Notification;

// ----- end imports

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Aggregator: Send + Sync {
    async fn tokens(&self) -> AnyResult<Vec<Token>>;
    async fn quote(&self, request: &QuoteRequest) -> AnyResult<Quote>;
    /// base64 encoded, unsigned
    async fn swap_transaction(&self, quote: &Quote, user: &Pubkey) -> AnyResult<String>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Wallet: Send + Sync {
    /// `None` while disconnected
    fn public_key(&self) -> Option<Pubkey>;
    async fn sign_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> std::result::Result<VersionedTransaction, WalletError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockReference {
    pub blockhash: Hash,
    pub last_valid_block_height: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SendOptions {
    pub skip_preflight: bool,
    pub max_retries: usize,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            skip_preflight: true,
            max_retries: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    /// landed but its execution failed
    Failed(String),
    /// block height moved past the reference's last valid block height
    Expired,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Network: Send + Sync {
    async fn latest_blockhash(&self) -> AnyResult<BlockReference>;
    async fn send_raw_transaction(&self, raw: &[u8], options: SendOptions)
        -> AnyResult<Signature>;
    async fn confirm_transaction(
        &self,
        reference: &BlockReference,
        signature: &Signature,
    ) -> AnyResult<Confirmation>;
}

#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub debounce: Duration,
    pub slippage_bps: u16,
    pub send: SendOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            slippage_bps: tsw_webapi::quotes::DEFAULT_SLIPPAGE_BPS,
            send: SendOptions::default(),
        }
    }
}

/// The swap form workflow. Clones share state.
///
/// Edits schedule quote fetches with `tokio::spawn`, so they must happen
/// inside a tokio runtime.
pub struct Widget<Aggr, Net, Ntfy> {
    pub aggregator: Arc<Aggr>,
    pub network: Arc<Net>,
    pub notifier: Arc<Ntfy>,
    pub settings: Settings,
    pub(crate) form: Arc<Mutex<FormState>>,
    pub(crate) pending: Arc<Mutex<Option<CancellationToken>>>,
}

impl<Aggr, Net, Ntfy> Clone for Widget<Aggr, Net, Ntfy> {
    fn clone(&self) -> Self {
        Self {
            aggregator: self.aggregator.clone(),
            network: self.network.clone(),
            notifier: self.notifier.clone(),
            settings: self.settings,
            form: self.form.clone(),
            pending: self.pending.clone(),
        }
    }
}

impl<Aggr, Net, Ntfy> Widget<Aggr, Net, Ntfy> {
    pub fn new(aggregator: Aggr, network: Net, notifier: Ntfy, settings: Settings) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
            network: Arc::new(network),
            notifier: Arc::new(notifier),
            settings,
            form: Default::default(),
            pending: Default::default(),
        }
    }

    pub(crate) fn lock_form(&self) -> MutexGuard<'_, FormState> {
        self.form.lock().expect("form state lock poisoned")
    }

    /// A copy of the current form state.
    pub fn state(&self) -> FormState {
        self.lock_form().clone()
    }

    /// Whether the swap button should be enabled.
    pub fn can_swap(&self, wallet_connected: bool) -> bool {
        let form = self.lock_form();
        wallet_connected
            && !form.swapping
            && !form.loading_quote
            && form.has_complete_input()
            && form.current_quote().is_some()
    }

    pub fn search_tokens(&self, query: &str) -> Vec<Token> {
        let form = self.lock_form();
        form.tokens
            .iter()
            .filter(|token| token.matches(query))
            .cloned()
            .collect()
    }
}

impl<Aggr, Net, Ntfy> Widget<Aggr, Net, Ntfy>
where
    Aggr: Aggregator,
    Ntfy: Notifier,
{
    pub async fn load_tokens(&self) -> Result<Vec<Token>> {
        self.lock_form().loading_tokens = true;
        let result = self.aggregator.tokens().await;
        let mut form = self.lock_form();
        form.loading_tokens = false;
        match result {
            Ok(tokens) => {
                tracing::info!("loaded {} tokens", tokens.len());
                form.tokens = tokens.clone();
                Ok(tokens)
            }
            Err(e) => {
                drop(form);
                let e = Error::TokenListFetchFailed(e);
                tracing::error!("{e}");
                self.notifier.notify(e.notification());
                Err(e)
            }
        }
    }
}
