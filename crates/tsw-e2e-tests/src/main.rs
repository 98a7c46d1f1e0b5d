// ----- standard library imports
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
// ----- extra library imports
use anyhow::{anyhow, Result};
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, prelude::*};
use tsw_swap_widget::form::FormState;
use tsw_swap_widget::notifications::ChannelNotifier;
use tsw_swap_widget::wallet::KeypairWallet;
use tsw_swap_widget::{AppConfig, ProdWidget};
use tsw_webapi::tokens::Token;
// ----- end imports

#[derive(Debug, serde::Deserialize)]
struct MainConfig {
    log_level: String,
    keypair_path: PathBuf,
    output_mint: String,
    sell_amount: String,
    execute: bool,
    quote_timeout_secs: u64,
    appcfg: AppConfig,
}

fn setup_tracing(log_level: &str) {
    tracing_log::LogTracer::init().expect("LogTracer init");
    let level_filter = LevelFilter::from_str(log_level).expect("log level");
    let stdout_log = tracing_subscriber::fmt::layer().with_filter(level_filter);
    let subscriber = tracing_subscriber::registry().with(stdout_log);
    tracing::subscriber::set_global_default(subscriber)
        .expect("tracing::subscriber::set_global_default");
}

async fn wait_for_quote(widget: &ProdWidget<ChannelNotifier>, timeout: Duration) -> Result<()> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let state = widget.state();
        if !state.loading_quote {
            if let Some(e) = state.quote_error.as_ref() {
                return Err(anyhow!(e.clone()));
            }
            return state
                .current_quote()
                .map(|_| ())
                .ok_or_else(|| anyhow!("no quote for the current input"));
        }
        if tokio::time::Instant::now() > deadline {
            return Err(anyhow!("quote not received within {timeout:?}"));
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}

async fn swap_roundtrip(cfg: MainConfig) -> Result<()> {
    info!("START SWAP TEST");

    let (notifier, mut notifications) = ChannelNotifier::new();
    tokio::spawn(async move {
        while let Some(notification) = notifications.recv().await {
            info!(kind = %notification.kind, "{}: {}", notification.title, notification.description);
        }
    });
    let widget = tsw_swap_widget::build_widget(cfg.appcfg, notifier);

    let tokens = widget.load_tokens().await?;
    info!(count = tokens.len(), "Token list loaded");
    let output = tokens
        .iter()
        .find(|token| token.address == cfg.output_mint)
        .cloned()
        .ok_or_else(|| anyhow!("{} not in the token list", cfg.output_mint))?;
    let input = tokens
        .iter()
        .find(|token| token.address == tsw_webapi::tokens::WSOL_MINT)
        .cloned()
        .unwrap_or_else(Token::wrapped_sol);
    info!(input = %input.symbol, output = %output.symbol, amount = %cfg.sell_amount, "Requesting quote");

    widget.select_input(input);
    widget.select_output(output);
    widget.set_sell_amount(cfg.sell_amount.clone());
    wait_for_quote(&widget, Duration::from_secs(cfg.quote_timeout_secs)).await?;
    let state = widget.state();
    info!(sell = %state.sell_amount, buy = %state.buy_amount, "Quote received");

    if !cfg.execute {
        info!("execute disabled, stopping before the swap");
        return Ok(());
    }

    let wallet = KeypairWallet::from_file(&cfg.keypair_path)?;
    let signature = widget.execute_swap(Some(&wallet)).await?;
    info!(%signature, "Swap confirmed");
    ensure_reset(&widget.state())
}

fn ensure_reset(state: &FormState) -> Result<()> {
    if state.sell_amount != "0" || state.buy_amount != "0" {
        return Err(anyhow!(
            "amounts not reset after the swap: sell {}, buy {}",
            state.sell_amount,
            state.buy_amount
        ));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("e2e.toml"))
        .add_source(
            config::Environment::with_prefix("TOKENSWAP_E2E")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .expect("Failed to build e2e config");
    let cfg: MainConfig = settings
        .try_deserialize()
        .expect("Failed to parse configuration");

    setup_tracing(&cfg.log_level);
    swap_roundtrip(cfg).await.expect("swap roundtrip");
}
