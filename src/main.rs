//! USDC bridge relay service.
//!
//! Binds one provider per configured chain with a shared signing key, wires
//! the contract wrappers into the connection registry, and serves the bridge
//! HTTP API until interrupted.

use std::sync::Arc;

use alloy_network::EthereumWallet;
use alloy_provider::ProviderBuilder;
use alloy_signer_local::PrivateKeySigner;
use tokio::net::TcpListener;
use tracing::info;

use usdc_bridge_relay::{
    router, BridgeChain, BridgeError, BridgeRegistry, Config, Erc20Contract, LockChainConnection,
    LockerContract, ManagerContract, MintChainConnection, MinterContract, Relay, Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = Config::from_env()?;

    let signer: PrivateKeySigner = config
        .private_key
        .trim()
        .parse()
        .map_err(|e| BridgeError::InvalidConfig(format!("PRIVATE_KEY: {e}")))?;
    let wallet_address = signer.address();
    let wallet = EthereumWallet::from(signer);
    info!(wallet = %wallet_address, event = "bridge_wallet_loaded");

    let eth_provider = ProviderBuilder::new()
        .wallet(wallet.clone())
        .connect_http(config.eth_rpc.clone());
    let arb_provider = ProviderBuilder::new()
        .wallet(wallet.clone())
        .connect_http(config.arb_rpc.clone());
    let xdc_provider = ProviderBuilder::new()
        .wallet(wallet)
        .connect_http(config.xdc_rpc.clone());

    let eth = LockChainConnection::builder()
        .chain(BridgeChain::EthereumSepolia)
        .locker(Arc::new(
            LockerContract::new(config.eth_locker_address, eth_provider.clone())
                .with_confirmation_timeout(config.confirmation_timeout),
        ))
        .token(Arc::new(
            Erc20Contract::new(config.eth_usdc_address, eth_provider)
                .with_confirmation_timeout(config.confirmation_timeout),
        ))
        .wallet(wallet_address)
        .locker_address(config.eth_locker_address)
        .build();

    let arb = LockChainConnection::builder()
        .chain(BridgeChain::ArbitrumSepolia)
        .locker(Arc::new(
            LockerContract::new(config.arb_locker_address, arb_provider.clone())
                .with_confirmation_timeout(config.confirmation_timeout),
        ))
        .token(Arc::new(
            Erc20Contract::new(config.arb_usdc_address, arb_provider)
                .with_confirmation_timeout(config.confirmation_timeout),
        ))
        .wallet(wallet_address)
        .locker_address(config.arb_locker_address)
        .build();

    let xdc = MintChainConnection::builder()
        .chain(BridgeChain::XdcApothem)
        .minter(Arc::new(
            MinterContract::new(config.minter_address, xdc_provider.clone())
                .with_confirmation_timeout(config.confirmation_timeout),
        ))
        .manager(Arc::new(ManagerContract::new(
            config.manager_address,
            xdc_provider,
        )))
        .minter_address(config.minter_address)
        .build();

    let registry = BridgeRegistry::new([eth, arb], xdc)?;
    let relay = Relay::builder().registry(registry).build();
    let app = router(Arc::new(relay));

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!(port = config.port, event = "relay_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    info!(event = "relay_stopped");
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,usdc_bridge_relay=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

async fn wait_for_shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown");
        }
    }
}
