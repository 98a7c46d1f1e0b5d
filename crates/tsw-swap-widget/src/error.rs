// ----- standard library imports
// ----- extra library imports
use anyhow::Error as AnyError;
use solana_sdk::signature::Signature;
use thiserror::Error;
// ----- local imports
use crate::notifications::Notification;

pub type Result<T> = std::result::Result<T, Error>;
#[derive(Debug, Error, strum::EnumDiscriminants)]
#[strum_discriminants(name(ErrorKind), derive(Hash))]
pub enum Error {
    // external errors wrappers
    #[error("configuration error {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid amount {0}")]
    InvalidAmount(#[from] tsw_utils::amounts::Error),

    #[error("token list fetch failed: {0}")]
    TokenListFetchFailed(AnyError),
    #[error("quote unavailable: {0}")]
    QuoteUnavailable(AnyError),
    #[error("wallet not connected")]
    WalletNotConnected,
    #[error("incomplete input")]
    IncompleteInput,
    #[error("no quote available")]
    NoQuoteAvailable,
    #[error("a swap is already in progress")]
    SwapInProgress,
    #[error("swap transaction build failed: {0}")]
    QuoteBuildFailed(AnyError),
    #[error("malformed transaction: {0}")]
    MalformedTransaction(AnyError),
    #[error("signing rejected by the user")]
    SigningRejected,
    #[error("wallet failed to sign: {0}")]
    SigningFailed(AnyError),
    #[error("transaction submission failed: {0}")]
    SubmissionFailed(AnyError),
    #[error("transaction {signature} not confirmed before its blockhash expired")]
    ConfirmationTimeout { signature: Signature },
    #[error("transaction {signature} failed: {reason}")]
    TransactionFailed {
        signature: Signature,
        reason: String,
    },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from(self)
    }

    pub fn notification(&self) -> Notification {
        match self {
            Error::SigningRejected => Notification::info(
                "Swap cancelled",
                "The transaction was not signed. Nothing was submitted.",
            ),
            Error::WalletNotConnected => Notification::error(
                "Wallet not connected.",
                "Please connect your wallet, and try again",
            ),
            Error::IncompleteInput | Error::InvalidAmount(_) => Notification::error(
                "Incomplete data.",
                "Please select tokens and enter a valid amount.",
            ),
            Error::NoQuoteAvailable | Error::QuoteUnavailable(_) => Notification::error(
                "Quote unavailable",
                "Could not get quote. Please verify your inputs.",
            ),
            Error::SwapInProgress => Notification::error(
                "Swap in progress",
                "Wait for the current swap to finish.",
            ),
            Error::TokenListFetchFailed(e) => {
                Notification::error("Error fetching tokens", e.to_string())
            }
            Error::ConfirmationTimeout { signature } => Notification::error(
                "Swap not confirmed",
                format!("Transaction {signature} was submitted but not confirmed in time. It may still land."),
            ),
            Error::TransactionFailed { signature, reason } => Notification::error(
                "Swap Failed",
                format!("Transaction {signature} failed: {reason}"),
            ),

            Error::QuoteBuildFailed(_)
            | Error::MalformedTransaction(_)
            | Error::SigningFailed(_)
            | Error::SubmissionFailed(_)
            | Error::Config(_) => {
                Notification::error("Swap Failed", "An error occurred during the swap.")
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("request rejected by the user")]
    Rejected,
    #[error("wallet error {0}")]
    Failed(AnyError),
}
