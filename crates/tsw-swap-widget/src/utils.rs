// ----- standard library imports
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
// ----- extra library imports
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use base64::prelude::*;
use solana_sdk::message::{Message, VersionedMessage};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::transaction::VersionedTransaction;
use tsw_webapi::quotes::{Quote, QuoteRequest};
use tsw_webapi::tokens::Token;
// ----- local imports
use crate::notifications::Notification;
use crate::service::{Aggregator, Notifier};

// ----- end imports

pub fn quote(out_amount: u64) -> Quote {
    Quote::try_from(serde_json::json!({
        "outAmount": out_amount.to_string(),
        "routePlan": [],
    }))
    .expect("valid quote")
}

/// A transaction paying nothing, as the aggregator would hand it out: signature slots empty.
pub fn unsigned_transaction(payer: &Pubkey) -> VersionedTransaction {
    let message = Message::new(&[], Some(payer));
    let signatures =
        vec![Signature::default(); usize::from(message.header.num_required_signatures)];
    VersionedTransaction {
        signatures,
        message: VersionedMessage::Legacy(message),
    }
}

pub fn encode_transaction(transaction: &VersionedTransaction) -> String {
    let raw = bincode::serialize(transaction).expect("bincode serialize");
    BASE64_STANDARD.encode(raw)
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    recorded: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn recorded(&self) -> Vec<Notification> {
        self.recorded.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.recorded.lock().unwrap().push(notification);
    }
}

/// Quotes `multiplier * amount`, optionally taking its time for given amounts.
///
/// Used instead of a mock wherever quotes are fetched from spawned tasks.
#[derive(Debug, Default)]
pub struct FakeAggregator {
    pub tokens: Vec<Token>,
    pub tokens_delay: Option<Duration>,
    pub requests: Arc<Mutex<Vec<QuoteRequest>>>,
    pub multiplier: u64,
    pub delays: HashMap<u64, Duration>,
    pub fail: bool,
}

impl FakeAggregator {
    pub fn new(multiplier: u64) -> Self {
        Self {
            multiplier,
            ..Default::default()
        }
    }
}

#[async_trait]
impl Aggregator for FakeAggregator {
    async fn tokens(&self) -> AnyResult<Vec<Token>> {
        if let Some(delay) = self.tokens_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.tokens.clone())
    }

    async fn quote(&self, request: &QuoteRequest) -> AnyResult<Quote> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delays.get(&request.amount) {
            tokio::time::sleep(*delay).await;
        }
        if self.fail {
            anyhow::bail!("400 COULD_NOT_FIND_ANY_ROUTE");
        }
        Ok(quote(request.amount * self.multiplier))
    }

    async fn swap_transaction(&self, _quote: &Quote, user: &Pubkey) -> AnyResult<String> {
        Ok(encode_transaction(&unsigned_transaction(user)))
    }
}
