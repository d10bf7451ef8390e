//! # usdc-bridge-relay
//!
//! A relay service bridging USDC between two EVM lock chains (Ethereum
//! Sepolia, Arbitrum Sepolia) and one mint chain (XDC Apothem).
//!
//! Transfers run in one of two directions: lock-and-mint custodies USDC in a
//! locker contract on the source chain so issued supply appears on the mint
//! chain, and burn-and-release burns issued supply on the mint chain so
//! custody is released on the destination. The relay submits exactly one
//! state-changing call per transfer and reports its transaction hash; the
//! on-chain contracts complete the other half of the operation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use usdc_bridge_relay::{
//!     BridgeChain, BridgeError, BridgeRegistry, LockChainConnection, MintChainConnection,
//!     Relay, Route, TransferRequest,
//! };
//!
//! # async fn example(
//! #     eth: LockChainConnection,
//! #     arb: LockChainConnection,
//! #     xdc: MintChainConnection,
//! # ) -> Result<(), BridgeError> {
//! let registry = BridgeRegistry::new([eth, arb], xdc)?;
//! let relay = Relay::builder().registry(registry).build();
//!
//! let request = TransferRequest::builder()
//!     .route(Route::resolve("eth", "xdc")?)
//!     .recipient("0x742d35Cc6634C0532925a3b844Bc9e7595f8fA0d".parse()?)
//!     .amount(usdc_bridge_relay::parse_usdc("12.50")?)
//!     .build();
//!
//! let tx_hash = relay.execute(&request).await?;
//! println!("settled: {tx_hash}");
//! # Ok(())
//! # }
//! ```
//!
//! ## HTTP Surface
//!
//! [`router`] exposes the same execution path over HTTP for the
//! conversational front-end: `POST /bridge/{source}-to-{destination}` with
//! `{ "to": ..., "amount": ... }`, answering
//! `{ "success": true, "txHash": "0x..." }` or `{ "error": ... }`.
//!
//! ## Architecture
//!
//! - [`Route`] resolves label pairs to one of the four configured directions.
//! - [`traits`] defines the contract gateway seam; [`contracts`](LockerContract)
//!   wrappers are the production implementations, [`testing`] holds fakes.
//! - The transfer guard runs the ordered pause, capacity, and allowance
//!   checks before anything is submitted.
//! - [`Relay`] orchestrates one transfer end to end, serializing
//!   state-changing submissions per chain signer.

mod amount;
mod chain;
mod config;
mod contracts;
mod error;
mod guard;
mod providers;
mod registry;
mod relay;
mod route;
mod server;
pub mod spans;
pub mod testing;
pub mod traits;

pub use amount::{format_usdc, parse_usdc, USDC_DECIMALS};
pub use chain::{
    BridgeChain, ARBITRUM_SEPOLIA_LOCKER_ADDRESS, ARBITRUM_SEPOLIA_USDC_ADDRESS,
    ETHEREUM_SEPOLIA_LOCKER_ADDRESS, ETHEREUM_SEPOLIA_USDC_ADDRESS,
};
pub use config::Config;
pub use contracts::{
    Erc20Contract, LockerContract, ManagerContract, MinterContract, DEFAULT_CONFIRMATION_TIMEOUT,
};
pub use error::{BridgeError, Result};
pub use providers::TokioClock;
pub use registry::{BridgeRegistry, LockChainConnection, MintChainConnection};
pub use relay::{Relay, TransferRequest};
pub use route::{OperationKind, Route};
pub use server::{router, BridgeErrorBody, BridgeRequestBody, BridgeSuccessBody};
