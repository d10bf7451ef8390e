//! Transfer guard: the ordered precondition pipeline run before any
//! state-changing call.
//!
//! Checks run in strict order and short-circuit on the first failure:
//!
//! 1. Pause check on the contract that will receive the state-changing call.
//! 2. Capacity check against the applicable on-chain bound. Advisory: the
//!    contract remains the final authority and a submission may still revert
//!    if capacity moves between check and submission; the guard exists to
//!    avoid spending gas on requests almost certain to fail.
//! 3. Allowance check (lock-and-mint only), raising the token allowance with
//!    a confirmed approve when it is short of the requested amount.
//!
//! A guard failure is terminal for the request; nothing has been submitted
//! when one fires.

use std::future::Future;
use std::time::Duration;

use alloy_primitives::U256;
use tracing::{debug, info, warn};

use crate::chain::BridgeChain;
use crate::error::{BridgeError, Result};
use crate::registry::{LockChainConnection, MintChainConnection};
use crate::traits::Clock;

/// Bounded linear-backoff retry for read-only chain calls.
///
/// Only read errors are retried; anything else propagates on the first
/// attempt. State-changing calls never go through this path.
pub(crate) struct ReadRetry<'a> {
    pub clock: &'a dyn Clock,
    pub attempts: u32,
    pub backoff: Duration,
}

impl ReadRetry<'_> {
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Err(e) if e.is_read_retryable() && attempt < self.attempts => {
                    warn!(
                        attempt = attempt,
                        max_attempts = self.attempts,
                        error = %e,
                        event = "read_retry"
                    );
                    self.clock.sleep(self.backoff * attempt).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

/// Pause and capacity checks for the lock-and-mint direction.
pub(crate) async fn preflight_lock_and_mint(
    source: &LockChainConnection,
    mint: &MintChainConnection,
    amount: U256,
    reads: &ReadRetry<'_>,
) -> Result<()> {
    let locker = source.locker().clone();
    let paused = reads
        .run(|| {
            let locker = locker.clone();
            async move { locker.is_paused().await }
        })
        .await?;
    if paused {
        warn!(chain = %source.chain(), event = "bridge_paused");
        return Err(BridgeError::BridgePaused);
    }

    let manager = mint.manager().clone();
    let minter = mint.minter_address();
    let available = reads
        .run(|| {
            let manager = manager.clone();
            async move { manager.remaining_mint_allowance(minter).await }
        })
        .await?;
    check_capacity(amount, available)?;

    Ok(())
}

/// Pause and capacity checks for the burn-and-release direction.
pub(crate) async fn preflight_burn_and_release(
    mint: &MintChainConnection,
    destination: BridgeChain,
    amount: U256,
    reads: &ReadRetry<'_>,
) -> Result<()> {
    let minter = mint.minter().clone();
    let paused = reads
        .run(|| {
            let minter = minter.clone();
            async move { minter.is_paused().await }
        })
        .await?;
    if paused {
        warn!(chain = %mint.chain(), event = "bridge_paused");
        return Err(BridgeError::BridgePaused);
    }

    let minter = mint.minter().clone();
    let destination_chain_id = destination.chain_id();
    let available = reads
        .run(|| {
            let minter = minter.clone();
            async move { minter.locked_for(destination_chain_id).await }
        })
        .await?;
    check_capacity(amount, available)?;

    Ok(())
}

/// Raises the bridge wallet's token allowance for the locker when it is
/// short of the requested amount, waiting for the approval to confirm
/// before the lock is attempted. Idempotent: a sufficient allowance issues
/// no approve at all.
///
/// Callers hold the chain's submission permit across this call and the lock
/// that follows it.
pub(crate) async fn ensure_allowance(
    source: &LockChainConnection,
    amount: U256,
    reads: &ReadRetry<'_>,
) -> Result<()> {
    let token = source.token().clone();
    let owner = source.wallet();
    let spender = source.locker_address();

    let allowance = reads
        .run(|| {
            let token = token.clone();
            async move { token.allowance(owner, spender).await }
        })
        .await?;

    if allowance >= amount {
        debug!(
            allowance = %allowance,
            amount = %amount,
            event = "allowance_sufficient"
        );
        return Ok(());
    }

    info!(
        allowance = %allowance,
        amount = %amount,
        spender = %spender,
        event = "allowance_approval_required"
    );

    match token.approve(spender, amount).await {
        Ok(tx_hash) => {
            info!(tx_hash = %tx_hash, event = "allowance_raised");
            Ok(())
        }
        Err(e) => Err(BridgeError::AllowanceApprovalFailed {
            reason: e.to_string(),
        }),
    }
}

fn check_capacity(requested: U256, available: U256) -> Result<()> {
    if requested > available {
        warn!(
            requested = %requested,
            available = %available,
            event = "capacity_exceeded"
        );
        return Err(BridgeError::InsufficientCapacity {
            requested,
            available,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{LockChainConnection, MintChainConnection};
    use crate::testing::{FakeClock, FakeLocker, FakeManager, FakeMinter, FakeToken};
    use alloy_primitives::Address;
    use std::sync::Arc;

    fn reads(clock: &FakeClock) -> ReadRetry<'_> {
        ReadRetry {
            clock,
            attempts: 3,
            backoff: Duration::from_millis(100),
        }
    }

    fn lock_connection(locker: FakeLocker, token: FakeToken) -> LockChainConnection {
        LockChainConnection::builder()
            .chain(crate::BridgeChain::EthereumSepolia)
            .locker(Arc::new(locker))
            .token(Arc::new(token))
            .wallet(Address::repeat_byte(0xAA))
            .locker_address(Address::repeat_byte(0xBB))
            .build()
    }

    fn mint_connection(minter: FakeMinter, manager: FakeManager) -> MintChainConnection {
        MintChainConnection::builder()
            .chain(crate::BridgeChain::XdcApothem)
            .minter(Arc::new(minter))
            .manager(Arc::new(manager))
            .minter_address(Address::repeat_byte(0xCC))
            .build()
    }

    #[tokio::test]
    async fn pause_short_circuits_before_the_capacity_read() {
        let locker = FakeLocker::new();
        locker.set_paused(true);
        let manager = FakeManager::new();
        manager.set_allowance(U256::from(1_000_000u64));

        let source = lock_connection(locker, FakeToken::new());
        let mint = mint_connection(FakeMinter::new(), manager.clone());
        let clock = FakeClock::new();

        let result =
            preflight_lock_and_mint(&source, &mint, U256::from(1u64), &reads(&clock)).await;

        assert!(matches!(result, Err(BridgeError::BridgePaused)));
        assert_eq!(manager.allowance_call_count(), 0);
    }

    #[tokio::test]
    async fn capacity_check_reports_requested_and_available() {
        let manager = FakeManager::new();
        manager.set_allowance(U256::from(100u64));

        let source = lock_connection(FakeLocker::new(), FakeToken::new());
        let mint = mint_connection(FakeMinter::new(), manager);
        let clock = FakeClock::new();

        let result =
            preflight_lock_and_mint(&source, &mint, U256::from(101u64), &reads(&clock)).await;

        match result {
            Err(BridgeError::InsufficientCapacity {
                requested,
                available,
            }) => {
                assert_eq!(requested, U256::from(101u64));
                assert_eq!(available, U256::from(100u64));
            }
            other => panic!("expected InsufficientCapacity, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sufficient_allowance_issues_no_approve() {
        let token = FakeToken::new();
        token.set_allowance(U256::from(500u64));
        let source = lock_connection(FakeLocker::new(), token.clone());
        let clock = FakeClock::new();

        ensure_allowance(&source, U256::from(500u64), &reads(&clock))
            .await
            .unwrap();

        assert_eq!(token.approve_call_count(), 0);
    }

    #[tokio::test]
    async fn short_allowance_issues_exactly_one_approve_for_the_amount() {
        let token = FakeToken::new();
        token.set_allowance(U256::from(10u64));
        let source = lock_connection(FakeLocker::new(), token.clone());
        let clock = FakeClock::new();

        ensure_allowance(&source, U256::from(500u64), &reads(&clock))
            .await
            .unwrap();

        let approvals = token.approve_calls();
        assert_eq!(approvals.len(), 1);
        assert_eq!(approvals[0].spender, Address::repeat_byte(0xBB));
        assert!(approvals[0].amount >= U256::from(500u64));
    }

    #[tokio::test]
    async fn failed_approve_surfaces_as_allowance_approval_failed() {
        let token = FakeToken::new();
        token.set_allowance(U256::ZERO);
        token.fail_approvals("out of gas");
        let source = lock_connection(FakeLocker::new(), token.clone());
        let clock = FakeClock::new();

        let result = ensure_allowance(&source, U256::from(500u64), &reads(&clock)).await;

        assert!(matches!(
            result,
            Err(BridgeError::AllowanceApprovalFailed { .. })
        ));
    }

    #[tokio::test]
    async fn transient_read_failures_are_retried_with_backoff() {
        let minter = FakeMinter::new();
        minter.fail_reads_once("connection reset");
        minter.set_locked(11155111, U256::from(1_000u64));
        let mint = mint_connection(minter, FakeManager::new());
        let clock = FakeClock::new();

        preflight_burn_and_release(
            &mint,
            crate::BridgeChain::EthereumSepolia,
            U256::from(1u64),
            &reads(&clock),
        )
        .await
        .unwrap();

        assert_eq!(clock.sleep_count(), 1);
    }
}
