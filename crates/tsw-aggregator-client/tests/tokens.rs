// ----- standard library imports
// ----- extra library imports
use tsw_aggregator_client::{AggregatorClient, Error};
use tsw_webapi::test_utils::{self as web_utils, MockAggregator};
use tsw_webapi::tokens::Token;
// ----- local imports

#[tokio::test]
async fn tokens() {
    let mock = MockAggregator {
        tokens: vec![Token::wrapped_sol(), web_utils::usdc()],
        out_amount: 0,
        swap_transaction: String::new(),
    };
    let server = web_utils::build_test_server(mock);
    let server_url = server.server_address().expect("address");
    let tokens_url = server_url.join("/strict").expect("tokens url");
    let client = AggregatorClient::new(tokens_url, server_url);

    let tokens = client.tokens().await.expect("tokens");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0], Token::wrapped_sol());
    assert_eq!(tokens[1].symbol, "USDC");
}

#[tokio::test]
async fn tokens_not_found() {
    let mock = MockAggregator {
        tokens: vec![],
        out_amount: 0,
        swap_transaction: String::new(),
    };
    let server = web_utils::build_test_server(mock);
    let server_url = server.server_address().expect("address");
    let tokens_url = server_url.join("/missing").expect("tokens url");
    let client = AggregatorClient::new(tokens_url, server_url);

    let response = client.tokens().await;
    assert!(matches!(
        response.unwrap_err(),
        Error::Status { status, .. } if status == 404
    ));
}
