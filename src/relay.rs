//! Bridge orchestrator: executes one transfer end to end.
//!
//! Composes route resolution, the transfer guard, and the contract gateways:
//! resolve the route, run the guard, read the current fee, submit the single
//! state-changing call with the fee attached as native value, wait for
//! confirmation, and report the transaction hash. Any failure short-circuits
//! into a structured error; a request either settles with a concrete
//! transaction hash or fails with none.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, TxHash, U256};
use bon::Builder;
use tracing::{info, Instrument};

use crate::error::Result;
use crate::guard::{self, ReadRetry};
use crate::providers::TokioClock;
use crate::registry::BridgeRegistry;
use crate::route::{OperationKind, Route};
use crate::spans;
use crate::traits::Clock;

/// A validated transfer request.
///
/// Constructed at the boundary after route resolution and amount/address
/// validation; the orchestrator never sees raw request bodies.
#[derive(Builder, Debug, Clone, Copy)]
pub struct TransferRequest {
    route: Route,
    recipient: Address,
    /// Amount in USDC base units.
    amount: U256,
}

impl TransferRequest {
    pub fn route(&self) -> Route {
        self.route
    }

    pub fn recipient(&self) -> Address {
        self.recipient
    }

    pub fn amount(&self) -> U256 {
        self.amount
    }
}

/// The bridge orchestrator.
///
/// Holds the chain connection registry built at startup; per-request state
/// never outlives [`Relay::execute`].
///
/// # Example
///
/// ```rust,no_run
/// # use usdc_bridge_relay::{BridgeRegistry, Relay};
/// # fn example(registry: BridgeRegistry) {
/// let relay = Relay::builder().registry(registry).build();
/// # }
/// ```
#[derive(Builder)]
pub struct Relay {
    registry: BridgeRegistry,
    #[builder(default = Arc::new(TokioClock))]
    clock: Arc<dyn Clock>,
    /// Attempts for read-only chain calls before giving up.
    #[builder(default = 3)]
    read_retry_attempts: u32,
    /// Base backoff between read retries; grows linearly per attempt.
    #[builder(default = Duration::from_millis(500))]
    read_retry_backoff: Duration,
}

impl Relay {
    pub fn registry(&self) -> &BridgeRegistry {
        &self.registry
    }

    /// Executes one transfer end to end, returning the settled transaction
    /// hash.
    ///
    /// Guard failures are terminal with nothing submitted. After submission
    /// the outcome is either a confirmed hash or an error describing it; a
    /// confirmation timeout means the outcome is unknown and chain state
    /// must be re-queried before resubmitting.
    pub async fn execute(&self, request: &TransferRequest) -> Result<TxHash> {
        let span =
            spans::execute_transfer(&request.route(), &request.recipient(), &request.amount());

        async move {
            let result = match request.route().kind() {
                OperationKind::LockAndMint => self.execute_lock_and_mint(request).await,
                OperationKind::BurnAndRelease => self.execute_burn_and_release(request).await,
            };

            match &result {
                Ok(tx_hash) => {
                    info!(
                        route = %request.route(),
                        tx_hash = %tx_hash,
                        event = "transfer_settled"
                    );
                }
                Err(e) => spans::record_error(e),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn execute_lock_and_mint(&self, request: &TransferRequest) -> Result<TxHash> {
        let source = self.registry.lock_chain(request.route().source())?;
        let mint = self.registry.mint_chain();
        let reads = self.reads();

        guard::preflight_lock_and_mint(source, mint, request.amount(), &reads).await?;

        // The permit serializes this signer's submissions: the conditional
        // approve and the lock it enables go out back to back, and no other
        // request on this chain can interleave between them.
        let _permit = source.acquire_submission().await;

        guard::ensure_allowance(source, request.amount(), &reads).await?;

        let destination_chain_id = request.route().destination().chain_id();
        let locker = source.locker().clone();
        // Fee schedules are external state; read fresh immediately before
        // submission, never cached across requests.
        let fee = reads
            .run(|| {
                let locker = locker.clone();
                async move { locker.current_fee(destination_chain_id).await }
            })
            .await?;

        let span = spans::submit_state_change(&source.chain(), &OperationKind::LockAndMint, &fee);
        source
            .locker()
            .lock(
                destination_chain_id,
                request.recipient(),
                request.amount(),
                fee,
            )
            .instrument(span)
            .await
    }

    async fn execute_burn_and_release(&self, request: &TransferRequest) -> Result<TxHash> {
        let mint = self.registry.mint_chain();
        let reads = self.reads();

        guard::preflight_burn_and_release(
            mint,
            request.route().destination(),
            request.amount(),
            &reads,
        )
        .await?;

        let _permit = mint.acquire_submission().await;

        let destination_chain_id = request.route().destination().chain_id();
        let minter = mint.minter().clone();
        let fee = reads
            .run(|| {
                let minter = minter.clone();
                async move { minter.current_fee(destination_chain_id).await }
            })
            .await?;

        let span = spans::submit_state_change(&mint.chain(), &OperationKind::BurnAndRelease, &fee);
        mint.minter()
            .burn(
                destination_chain_id,
                request.recipient(),
                request.amount(),
                fee,
            )
            .instrument(span)
            .await
    }

    fn reads(&self) -> ReadRetry<'_> {
        ReadRetry {
            clock: self.clock.as_ref(),
            attempts: self.read_retry_attempts,
            backoff: self.read_retry_backoff,
        }
    }
}
