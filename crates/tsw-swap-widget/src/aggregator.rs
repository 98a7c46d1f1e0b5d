// ----- standard library imports
// ----- extra library imports
use anyhow::Result as AnyResult;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use tsw_aggregator_client::{AggregatorClient, Url};
use tsw_webapi::quotes::{Quote, QuoteRequest};
use tsw_webapi::tokens::Token;
// ----- local imports
use crate::service::Aggregator;

// ----- end imports

#[derive(Debug, Clone, serde::Deserialize)]
pub struct AggregatorConfig {
    pub tokens_url: Url,
    pub base_url: Url,
}

#[derive(Debug, Clone)]
pub struct AggregatorRestHandler(AggregatorClient);

impl AggregatorRestHandler {
    pub fn new(cfg: AggregatorConfig) -> Self {
        Self(AggregatorClient::new(cfg.tokens_url, cfg.base_url))
    }
}

#[async_trait]
impl Aggregator for AggregatorRestHandler {
    async fn tokens(&self) -> AnyResult<Vec<Token>> {
        let tokens = self.0.tokens().await?;
        Ok(tokens)
    }

    async fn quote(&self, request: &QuoteRequest) -> AnyResult<Quote> {
        let quote = self.0.quote(request).await?;
        Ok(quote)
    }

    async fn swap_transaction(&self, quote: &Quote, user: &Pubkey) -> AnyResult<String> {
        let encoded = self.0.swap_transaction(quote, &user.to_string()).await?;
        Ok(encoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tsw_webapi::test_utils::{build_test_server, usdc, MockAggregator};

    fn handler(server: &axum_test::TestServer) -> AggregatorRestHandler {
        let base = server.server_address().expect("address");
        AggregatorRestHandler::new(AggregatorConfig {
            tokens_url: base.join("/strict").expect("tokens path"),
            base_url: base,
        })
    }

    #[tokio::test]
    async fn quote_through_handler() {
        let server = build_test_server(MockAggregator {
            tokens: vec![Token::wrapped_sol(), usdc()],
            out_amount: 150_000_000,
            swap_transaction: String::from("AQID"),
        });
        let handler = handler(&server);

        let request = crate::form::build_quote_request(&Token::wrapped_sol(), &usdc(), "1", 50)
            .expect("request");
        let quote = handler.quote(&request).await.unwrap();
        assert_eq!(quote.out_amount, 150_000_000);

        let encoded = handler
            .swap_transaction(&quote, &Pubkey::new_unique())
            .await
            .unwrap();
        assert_eq!(encoded, "AQID");
    }

    #[tokio::test]
    async fn unknown_pair_is_an_error() {
        let server = build_test_server(MockAggregator {
            tokens: vec![Token::wrapped_sol()],
            out_amount: 1,
            swap_transaction: String::new(),
        });
        let handler = handler(&server);

        let request = crate::form::build_quote_request(&Token::wrapped_sol(), &usdc(), "1", 50)
            .expect("request");
        let e = handler.quote(&request).await.unwrap_err();
        assert!(e.to_string().contains("400"));
    }
}
