// ----- standard library imports
// ----- extra library imports
use tokio_util::sync::CancellationToken;
use tsw_webapi::quotes::{Quote, QuoteRequest};
use tsw_webapi::tokens::Token;
// ----- local imports
use crate::error::{Error, Result};
use crate::form::{build_quote_request, FormState, StampedQuote, QUOTE_ERROR_MESSAGE, ZERO_AMOUNT};
use crate::service::{Aggregator, Notifier, Widget};

// ----- end imports

/// A quote together with its `outAmount` rendered in the output token's units.
#[derive(Debug, Clone)]
pub struct PricedQuote {
    pub quote: Quote,
    pub buy_amount: String,
}

impl<Aggr, Net, Ntfy> Widget<Aggr, Net, Ntfy>
where
    Aggr: Aggregator + 'static,
    Net: Send + Sync + 'static,
    Ntfy: Notifier + 'static,
{
    pub fn set_sell_amount(&self, amount: impl Into<String>) {
        let amount = amount.into();
        self.edit(move |form| form.sell_amount = amount);
    }

    pub fn select_input(&self, token: Token) {
        self.edit(move |form| form.input = Some(token));
    }

    pub fn select_output(&self, token: Token) {
        self.edit(move |form| form.output = Some(token));
    }

    /// Asks the aggregator right away, no debouncing, no state changes.
    pub async fn request_quote(
        &self,
        input: &Token,
        output: &Token,
        amount: &str,
    ) -> Result<PricedQuote> {
        let request = build_quote_request(input, output, amount, self.settings.slippage_bps)?;
        self.fetch(&request, output.decimals).await
    }

    async fn fetch(&self, request: &QuoteRequest, output_decimals: u8) -> Result<PricedQuote> {
        let quote = self
            .aggregator
            .quote(request)
            .await
            .map_err(Error::QuoteUnavailable)?;
        let out = tsw_utils::from_smallest_units(quote.out_amount, output_decimals)
            .map_err(|e| Error::QuoteUnavailable(e.into()))?;
        Ok(PricedQuote {
            quote,
            buy_amount: tsw_utils::format_amount(out),
        })
    }

    pub(crate) fn edit<F>(&self, change: F)
    where
        F: FnOnce(&mut FormState),
    {
        // lock order: pending slot, then form
        let mut pending = self.pending.lock().expect("pending quote lock poisoned");
        if let Some(timer) = pending.take() {
            timer.cancel();
        }
        let scheduled = {
            let mut form = self.lock_form();
            change(&mut *form);
            let generation = form.invalidate();
            form.quote_error = None;
            let request = form.quote_request(self.settings.slippage_bps);
            let output_decimals = form.output.as_ref().map(|token| token.decimals);
            match request.zip(output_decimals) {
                Some((request, decimals)) => {
                    form.loading_quote = true;
                    Some((generation, request, decimals))
                }
                None => {
                    form.loading_quote = false;
                    form.buy_amount = String::from(ZERO_AMOUNT);
                    None
                }
            }
        };
        let Some((generation, request, output_decimals)) = scheduled else {
            return;
        };

        let timer = CancellationToken::new();
        *pending = Some(timer.clone());
        let widget = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = timer.cancelled() => {
                    tracing::trace!("quote for generation {generation} superseded");
                    return;
                }
                _ = tokio::time::sleep(widget.settings.debounce) => {}
            }
            let result = widget.fetch(&request, output_decimals).await;
            widget.apply_quote(generation, result);
        });
    }

    fn apply_quote(&self, generation: u64, result: Result<PricedQuote>) {
        let mut form = self.lock_form();
        if form.generation != generation {
            tracing::debug!(
                "discarding quote for generation {generation}, now at {}",
                form.generation
            );
            return;
        }
        form.loading_quote = false;
        match result {
            Ok(PricedQuote { quote, buy_amount }) => {
                tracing::debug!("quote for generation {generation}: {buy_amount}");
                form.buy_amount = buy_amount;
                form.quote = Some(StampedQuote { generation, quote });
                form.quote_error = None;
            }
            Err(e) => {
                tracing::warn!("quote for generation {generation} failed: {e}");
                form.buy_amount = String::from(ZERO_AMOUNT);
                form.quote = None;
                form.quote_error = Some(String::from(QUOTE_ERROR_MESSAGE));
                drop(form);
                self.notifier.notify(e.notification());
            }
        }
    }
}
