// ----- standard library imports
// ----- extra library imports
use serde::{Deserialize, Serialize};
// ----- local imports

/// mint address of wrapped SOL
pub const WSOL_MINT: &str = "So11111111111111111111111111111111111111112";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: Option<String>,
}

impl Token {
    pub fn wrapped_sol() -> Self {
        Self {
            address: String::from(WSOL_MINT),
            symbol: String::from("SOL"),
            name: String::from("Solana"),
            decimals: 9,
            logo_uri: None,
        }
    }

    /// case-insensitive match against symbol or name
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.symbol.to_lowercase().contains(&query) || self.name.to_lowercase().contains(&query)
    }
}
