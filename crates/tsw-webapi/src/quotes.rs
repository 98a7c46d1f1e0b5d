// ----- standard library imports
// ----- extra library imports
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
// ----- local imports

// ----- end imports

pub const DEFAULT_SLIPPAGE_BPS: u16 = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("quote response has no outAmount")]
    MissingOutAmount,
    #[error("invalid outAmount {0}")]
    InvalidOutAmount(String),
}

///--------------------------- Quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub input_mint: String,
    pub output_mint: String,
    /// smallest units of the input token
    pub amount: u64,
    pub slippage_bps: u16,
}

/// Aggregator quote. `raw` is replayed verbatim when building the swap,
/// only `outAmount` is ever interpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub raw: Value,
    pub out_amount: u64,
}

impl TryFrom<Value> for Quote {
    type Error = Error;
    fn try_from(raw: Value) -> Result<Self, Self::Error> {
        let out_amount = match raw.get("outAmount") {
            Some(Value::String(amount)) => amount
                .parse::<u64>()
                .map_err(|_| Error::InvalidOutAmount(amount.clone()))?,
            Some(Value::Number(amount)) => amount
                .as_u64()
                .ok_or_else(|| Error::InvalidOutAmount(amount.to_string()))?,
            Some(other) => return Err(Error::InvalidOutAmount(other.to_string())),
            None => return Err(Error::MissingOutAmount),
        };
        Ok(Self { raw, out_amount })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_from_string_out_amount() {
        let raw = json!({"inAmount": "1500000000", "outAmount": "2000000000", "routePlan": []});
        let quote = Quote::try_from(raw.clone()).unwrap();
        assert_eq!(quote.out_amount, 2_000_000_000);
        assert_eq!(quote.raw, raw);
    }

    #[test]
    fn quote_missing_out_amount() {
        let raw = json!({"error": "Could not find any route"});
        assert_eq!(Quote::try_from(raw), Err(Error::MissingOutAmount));
    }

    #[test]
    fn quote_invalid_out_amount() {
        let raw = json!({"outAmount": "-3"});
        assert!(matches!(
            Quote::try_from(raw),
            Err(Error::InvalidOutAmount(_))
        ));
        let raw = json!({"outAmount": [1]});
        assert!(matches!(
            Quote::try_from(raw),
            Err(Error::InvalidOutAmount(_))
        ));
    }

    #[test]
    fn quote_request_query_names() {
        let request = QuoteRequest {
            input_mint: String::from("in"),
            output_mint: String::from("out"),
            amount: 10,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({"inputMint": "in", "outputMint": "out", "amount": 10, "slippageBps": 50})
        );
    }
}
