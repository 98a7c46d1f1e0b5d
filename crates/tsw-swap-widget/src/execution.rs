// ----- standard library imports
// ----- extra library imports
use base64::prelude::*;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use tsw_webapi::quotes::Quote;
// ----- local imports
use crate::error::{Error, Result, WalletError};
use crate::form::ZERO_AMOUNT;
use crate::notifications::Notification;
use crate::service::{Aggregator, Confirmation, Network, Notifier, Wallet, Widget};

// ----- end imports

pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction> {
    let raw = BASE64_STANDARD
        .decode(encoded)
        .map_err(|e| Error::MalformedTransaction(e.into()))?;
    bincode::deserialize(&raw).map_err(|e| Error::MalformedTransaction(e.into()))
}

impl<Aggr, Net, Ntfy> Widget<Aggr, Net, Ntfy>
where
    Aggr: Aggregator + 'static,
    Net: Network + 'static,
    Ntfy: Notifier + 'static,
{
    /// Turns the current quote into a confirmed transaction.
    ///
    /// Every outcome is also reported through the notifier. On success the
    /// amounts are reset, on failure the form is left as it was.
    pub async fn execute_swap<Wlt>(&self, wallet: Option<&Wlt>) -> Result<Signature>
    where
        Wlt: Wallet + ?Sized,
    {
        let result = self.try_execute_swap(wallet).await;
        match &result {
            Ok(signature) => {
                tracing::info!("swap {signature} confirmed");
                self.notifier.notify(Notification::success(
                    "Swap successful!",
                    format!("Transaction ID: {signature}"),
                ));
                self.edit(|form| {
                    form.sell_amount = String::from(ZERO_AMOUNT);
                    form.buy_amount = String::from(ZERO_AMOUNT);
                });
            }
            Err(Error::SigningRejected) => {
                tracing::info!("swap not signed");
                self.notifier.notify(Error::SigningRejected.notification());
            }
            Err(e) => {
                tracing::error!("swap failed: {e}");
                self.notifier.notify(e.notification());
            }
        }
        result
    }

    async fn try_execute_swap<Wlt>(&self, wallet: Option<&Wlt>) -> Result<Signature>
    where
        Wlt: Wallet + ?Sized,
    {
        let (wallet, user) = wallet
            .and_then(|wallet| wallet.public_key().map(|user| (wallet, user)))
            .ok_or(Error::WalletNotConnected)?;
        let quote = {
            let mut form = self.lock_form();
            if !form.has_complete_input() {
                return Err(Error::IncompleteInput);
            }
            let quote = form
                .current_quote()
                .cloned()
                .ok_or(Error::NoQuoteAvailable)?;
            if form.swapping {
                return Err(Error::SwapInProgress);
            }
            form.swapping = true;
            quote
        };
        let result = self.swap(wallet, &user, &quote).await;
        self.lock_form().swapping = false;
        result
    }

    async fn swap<Wlt>(&self, wallet: &Wlt, user: &Pubkey, quote: &Quote) -> Result<Signature>
    where
        Wlt: Wallet + ?Sized,
    {
        let encoded = self
            .aggregator
            .swap_transaction(quote, user)
            .await
            .map_err(Error::QuoteBuildFailed)?;
        let transaction = decode_transaction(&encoded)?;
        tracing::debug!("swap transaction built for {user}");

        let signed = wallet
            .sign_transaction(transaction)
            .await
            .map_err(|e| match e {
                WalletError::Rejected => Error::SigningRejected,
                WalletError::Failed(e) => Error::SigningFailed(e),
            })?;

        let reference = self
            .network
            .latest_blockhash()
            .await
            .map_err(Error::SubmissionFailed)?;
        let raw = bincode::serialize(&signed).map_err(|e| Error::SubmissionFailed(e.into()))?;
        let signature = self
            .network
            .send_raw_transaction(&raw, self.settings.send)
            .await
            .map_err(Error::SubmissionFailed)?;
        tracing::info!(
            "swap {signature} submitted, valid until block {}",
            reference.last_valid_block_height
        );
        self.notifier.notify(Notification::info(
            "Transaction submitted",
            "Waiting for confirmation...",
        ));

        match self.network.confirm_transaction(&reference, &signature).await {
            Ok(Confirmation::Confirmed) => Ok(signature),
            Ok(Confirmation::Failed(reason)) => Err(Error::TransactionFailed { signature, reason }),
            Ok(Confirmation::Expired) => Err(Error::ConfirmationTimeout { signature }),
            Err(e) => {
                tracing::warn!("confirmation of {signature} interrupted: {e}");
                Err(Error::ConfirmationTimeout { signature })
            }
        }
    }
}
