// ----- standard library imports
// ----- extra library imports
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{json, Value};
// ----- local imports
use crate::quotes::QuoteRequest;
use crate::swap::{SwapRequest, SwapResponse};
use crate::tokens::Token;
// ----- end imports

pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

pub fn usdc() -> Token {
    Token {
        address: String::from(USDC_MINT),
        symbol: String::from("USDC"),
        name: String::from("USD Coin"),
        decimals: 6,
        logo_uri: Some(String::from("https://example.org/usdc.png")),
    }
}

pub fn random_token(decimals: u8) -> Token {
    let mut rng = rand::thread_rng();
    let address: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(44)
        .map(char::from)
        .collect();
    let symbol: String = (&mut rng)
        .sample_iter(&Alphanumeric)
        .take(4)
        .map(char::from)
        .collect::<String>()
        .to_uppercase();
    Token {
        address,
        name: format!("{symbol} token"),
        symbol,
        decimals,
        logo_uri: None,
    }
}

// mimics the shape of an aggregator quote, routing data included
pub fn quote_response(request: &QuoteRequest, out_amount: u64) -> Value {
    json!({
        "inputMint": request.input_mint,
        "inAmount": request.amount.to_string(),
        "outputMint": request.output_mint,
        "outAmount": out_amount.to_string(),
        "otherAmountThreshold": out_amount.to_string(),
        "swapMode": "ExactIn",
        "slippageBps": request.slippage_bps,
        "priceImpactPct": "0",
        "routePlan": [{
            "swapInfo": {
                "ammKey": "mock-amm",
                "label": "Mock",
                "inputMint": request.input_mint,
                "outputMint": request.output_mint,
            },
            "percent": 100
        }],
    })
}

///--------------------------- in-process aggregator
#[derive(Debug, Clone)]
pub struct MockAggregator {
    pub tokens: Vec<Token>,
    pub out_amount: u64,
    pub swap_transaction: String,
}

async fn list_tokens(State(mock): State<MockAggregator>) -> Json<Vec<Token>> {
    Json(mock.tokens)
}

async fn quote(
    State(mock): State<MockAggregator>,
    Query(request): Query<QuoteRequest>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let known = |mint: &str| mock.tokens.iter().any(|token| token.address == mint);
    let routable = known(&request.input_mint)
        && known(&request.output_mint)
        && request.input_mint != request.output_mint
        && request.amount > 0;
    if !routable {
        let body = json!({
            "error": "Could not find any route",
            "errorCode": "COULD_NOT_FIND_ANY_ROUTE",
        });
        return Err((StatusCode::BAD_REQUEST, Json(body)));
    }
    Ok(Json(quote_response(&request, mock.out_amount)))
}

async fn swap(
    State(mock): State<MockAggregator>,
    Json(request): Json<SwapRequest>,
) -> Result<Json<SwapResponse>, StatusCode> {
    if request.quote_response.get("outAmount").is_none() || request.user_public_key.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(SwapResponse {
        swap_transaction: mock.swap_transaction,
    }))
}

pub fn routes(mock: MockAggregator) -> Router {
    Router::new()
        .route("/strict", get(list_tokens))
        .route("/v6/quote", get(quote))
        .route("/v6/swap", post(swap))
        .with_state(mock)
}

pub fn build_test_server(mock: MockAggregator) -> axum_test::TestServer {
    let cfg = axum_test::TestServerConfig {
        transport: Some(axum_test::Transport::HttpRandomPort),
        ..Default::default()
    };
    axum_test::TestServer::new_with_config(routes(mock), cfg).expect("failed to start test server")
}
