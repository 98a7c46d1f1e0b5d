// ----- standard library imports
// ----- extra library imports
use tsw_webapi::quotes::{Quote, QuoteRequest};
use tsw_webapi::tokens::Token;
// ----- local imports
use crate::error::{Error, Result};

// ----- end imports

pub const QUOTE_ERROR_MESSAGE: &str = "Could not get quote. Please verify your inputs.";
pub const ZERO_AMOUNT: &str = "0";

/// A quote tagged with the input generation it was requested for.
#[derive(Debug, Clone)]
pub struct StampedQuote {
    pub generation: u64,
    pub quote: Quote,
}

/// Everything the swap form shows, plus the bookkeeping behind it.
#[derive(Debug, Clone)]
pub struct FormState {
    pub tokens: Vec<Token>,
    pub loading_tokens: bool,
    pub input: Option<Token>,
    pub output: Option<Token>,
    pub sell_amount: String,
    pub buy_amount: String,
    /// bumped on every edit of input, output or sell amount
    pub generation: u64,
    pub quote: Option<StampedQuote>,
    pub loading_quote: bool,
    pub quote_error: Option<String>,
    pub swapping: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            loading_tokens: false,
            input: Some(Token::wrapped_sol()),
            output: None,
            sell_amount: String::from(ZERO_AMOUNT),
            buy_amount: String::from(ZERO_AMOUNT),
            generation: 0,
            quote: None,
            loading_quote: false,
            quote_error: None,
            swapping: false,
        }
    }
}

/// Builds the aggregator request for selling `amount` of `input` for `output`.
///
/// The amount must be positive once expressed in the input token's smallest units.
pub fn build_quote_request(
    input: &Token,
    output: &Token,
    amount: &str,
    slippage_bps: u16,
) -> Result<QuoteRequest> {
    let amount = tsw_utils::parse_amount(amount)?;
    let raw = tsw_utils::to_smallest_units(amount, input.decimals)?;
    if raw == 0 {
        return Err(Error::IncompleteInput);
    }
    Ok(QuoteRequest {
        input_mint: input.address.clone(),
        output_mint: output.address.clone(),
        amount: raw,
        slippage_bps,
    })
}

impl FormState {
    /// The request a quote fetch would issue now, if the form is complete.
    pub fn quote_request(&self, slippage_bps: u16) -> Option<QuoteRequest> {
        let (input, output) = self.input.as_ref().zip(self.output.as_ref())?;
        build_quote_request(input, output, &self.sell_amount, slippage_bps).ok()
    }

    pub fn has_complete_input(&self) -> bool {
        // slippage plays no part in completeness
        self.quote_request(0).is_some()
    }

    /// The stored quote, only if no edit happened since it was requested.
    pub fn current_quote(&self) -> Option<&Quote> {
        self.quote
            .as_ref()
            .filter(|stamped| stamped.generation == self.generation)
            .map(|stamped| &stamped.quote)
    }

    pub(crate) fn invalidate(&mut self) -> u64 {
        self.generation += 1;
        self.quote = None;
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsw_webapi::test_utils::usdc;

    fn quote(out_amount: u64) -> Quote {
        Quote::try_from(serde_json::json!({"outAmount": out_amount.to_string()})).unwrap()
    }

    #[test]
    fn default_sells_wrapped_sol() {
        let form = FormState::default();
        assert_eq!(form.input, Some(Token::wrapped_sol()));
        assert_eq!(form.sell_amount, "0");
        assert_eq!(form.buy_amount, "0");
        assert!(form.quote_request(50).is_none());
    }

    #[test]
    fn build_quote_request_sol() {
        let request = build_quote_request(&Token::wrapped_sol(), &usdc(), "1.5", 50).unwrap();
        assert_eq!(request.amount, 1_500_000_000);
        assert_eq!(request.input_mint, tsw_webapi::tokens::WSOL_MINT);
        assert_eq!(request.output_mint, tsw_webapi::test_utils::USDC_MINT);
        assert_eq!(request.slippage_bps, 50);
    }

    #[test]
    fn build_quote_request_non_positive() {
        let sol = Token::wrapped_sol();
        let usdc = usdc();
        for amount in ["0", "-1", "abc", "", "0.0000000001"] {
            assert!(
                build_quote_request(&sol, &usdc, amount, 50).is_err(),
                "{amount}"
            );
        }
    }

    #[test]
    fn quote_request_needs_output() {
        let mut form = FormState {
            sell_amount: String::from("2"),
            ..Default::default()
        };
        assert!(form.quote_request(50).is_none());
        form.output = Some(usdc());
        assert!(form.quote_request(50).is_some());
        assert!(form.has_complete_input());
    }

    #[test]
    fn current_quote_follows_generation() {
        let mut form = FormState::default();
        form.quote = Some(StampedQuote {
            generation: form.generation,
            quote: quote(10),
        });
        assert_eq!(form.current_quote().map(|q| q.out_amount), Some(10));

        form.generation += 1;
        assert!(form.current_quote().is_none());
    }

    #[test]
    fn invalidate_clears_quote() {
        let mut form = FormState::default();
        form.quote = Some(StampedQuote {
            generation: 0,
            quote: quote(10),
        });
        assert_eq!(form.invalidate(), 1);
        assert!(form.quote.is_none());
    }
}
