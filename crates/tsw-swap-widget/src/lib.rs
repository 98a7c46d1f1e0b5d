// ----- standard library imports
use std::time::Duration;
// ----- extra library imports
use solana_sdk::commitment_config::{CommitmentConfig, CommitmentLevel};
// ----- local modules
pub mod aggregator;
pub mod error;
pub mod execution;
pub mod form;
pub mod notifications;
pub mod quoting;
pub mod rpc;
pub mod service;
#[cfg(test)]
mod utils;
pub mod wallet;
// ----- local imports
pub use error::{Error, ErrorKind, Result};
pub use service::Widget;

// ----- end imports

pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";
pub const ENV_PREFIX: &str = "TOKENSWAP";

type ProdAggregator = aggregator::AggregatorRestHandler;
type ProdNetwork = rpc::RpcNetwork;
pub type ProdWidget<Ntfy> = service::Widget<ProdAggregator, ProdNetwork, Ntfy>;

#[derive(Clone, Debug, serde::Deserialize)]
pub struct AppConfig {
    pub rpc_url: String,
    pub commitment: CommitmentLevel,
    pub aggregator: aggregator::AggregatorConfig,
    pub debounce_ms: u64,
    pub slippage_bps: u16,
    pub skip_preflight: bool,
    pub max_retries: usize,
    pub confirm_poll_ms: u64,
}

impl AppConfig {
    /// Defaults overridden by `TOKENSWAP_*` variables, nested keys split on `__`.
    pub fn from_env() -> Result<Self> {
        let settings = Self::with_defaults(config::Config::builder())?
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    pub fn with_defaults(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        let builder = builder
            .set_default("rpc_url", DEFAULT_RPC_URL)?
            .set_default("commitment", "confirmed")?
            .set_default(
                "aggregator.tokens_url",
                tsw_aggregator_client::DEFAULT_TOKENS_URL,
            )?
            .set_default("aggregator.base_url", tsw_aggregator_client::DEFAULT_BASE_URL)?
            .set_default("debounce_ms", 500)?
            .set_default(
                "slippage_bps",
                i64::from(tsw_webapi::quotes::DEFAULT_SLIPPAGE_BPS),
            )?
            .set_default("skip_preflight", true)?
            .set_default("max_retries", 2)?
            .set_default("confirm_poll_ms", 2_000)?;
        Ok(builder)
    }

    pub fn settings(&self) -> service::Settings {
        service::Settings {
            debounce: Duration::from_millis(self.debounce_ms),
            slippage_bps: self.slippage_bps,
            send: service::SendOptions {
                skip_preflight: self.skip_preflight,
                max_retries: self.max_retries,
            },
        }
    }
}

pub fn build_widget<Ntfy>(cfg: AppConfig, notifier: Ntfy) -> ProdWidget<Ntfy>
where
    Ntfy: service::Notifier,
{
    let settings = cfg.settings();
    tracing::info!(
        "swap widget on {} via {}",
        cfg.rpc_url,
        cfg.aggregator.base_url
    );
    let aggregator = aggregator::AggregatorRestHandler::new(cfg.aggregator);
    let network = rpc::RpcNetwork::new(
        cfg.rpc_url,
        CommitmentConfig {
            commitment: cfg.commitment,
        },
        Duration::from_millis(cfg.confirm_poll_ms),
    );
    service::Widget::new(aggregator, network, notifier, settings)
}
