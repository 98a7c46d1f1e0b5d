// ----- standard library imports
// ----- extra library imports
use thiserror::Error;
use tsw_webapi::quotes as web_quotes;
use tsw_webapi::swap as web_swap;
use tsw_webapi::tokens::Token;
// ----- local modules
// ----- local imports
pub use reqwest::Url;

// ----- end imports

pub const DEFAULT_TOKENS_URL: &str = "https://token.jup.ag/strict";
pub const DEFAULT_BASE_URL: &str = "https://quote-api.jup.ag";

pub type Result<T> = std::result::Result<T, Error>;
#[derive(Debug, Error)]
pub enum Error {
    #[error("aggregator replied {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("malformed quote {0}")]
    MalformedQuote(#[from] web_quotes::Error),

    #[error("internal error {0}")]
    Reqwest(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct AggregatorClient {
    cl: reqwest::Client,
    tokens_url: reqwest::Url,
    base: reqwest::Url,
}

impl AggregatorClient {
    pub fn new(tokens_url: reqwest::Url, base: reqwest::Url) -> Self {
        Self {
            cl: reqwest::Client::new(),
            tokens_url,
            base,
        }
    }

    async fn check_status(res: reqwest::Response) -> Result<reqwest::Response> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        Err(Error::Status { status, body })
    }

    pub async fn tokens(&self) -> Result<Vec<Token>> {
        let res = self.cl.get(self.tokens_url.clone()).send().await?;
        let res = Self::check_status(res).await?;
        let tokens = res.json::<Vec<Token>>().await?;
        tracing::debug!("fetched {} tokens from {}", tokens.len(), self.tokens_url);
        Ok(tokens)
    }

    pub async fn quote(&self, request: &web_quotes::QuoteRequest) -> Result<web_quotes::Quote> {
        let url = self.base.join("/v6/quote").expect("quote relative path");
        let res = self.cl.get(url).query(request).send().await?;
        let res = Self::check_status(res).await?;
        let raw = res.json::<serde_json::Value>().await?;
        let quote = web_quotes::Quote::try_from(raw)?;
        Ok(quote)
    }

    /// returns the base64 encoded unsigned transaction
    pub async fn swap_transaction(
        &self,
        quote: &web_quotes::Quote,
        user_public_key: &str,
    ) -> Result<String> {
        let url = self.base.join("/v6/swap").expect("swap relative path");
        let request = web_swap::SwapRequest {
            quote_response: quote.raw.clone(),
            user_public_key: String::from(user_public_key),
        };
        let res = self.cl.post(url).json(&request).send().await?;
        let res = Self::check_status(res).await?;
        let reply = res.json::<web_swap::SwapResponse>().await?;
        Ok(reply.swap_transaction)
    }
}
