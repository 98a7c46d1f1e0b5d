// ----- standard library imports
// ----- extra library imports
use serde::{Deserialize, Serialize};
use serde_json::Value;
// ----- local imports

///--------------------------- Swap transaction build
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapRequest {
    pub quote_response: Value,
    pub user_public_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapResponse {
    /// base64 encoded, unsigned, serialized transaction
    pub swap_transaction: String,
}
