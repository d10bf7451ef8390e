//! Contract gateway trait abstractions.
//!
//! These traits are the seam between the orchestration logic and the chains:
//! the relay only ever talks to contracts through them, which lets tests
//! substitute fakes that simulate pauses, capacity races, reverts, and slow
//! confirmations without a live network. Production implementations live in
//! [`crate::contracts`] and bind to the on-chain contracts via alloy.
//!
//! Read operations never mutate and may be retried freely. State-changing
//! operations (`lock`, `burn`, `approve`) return only once the transaction is
//! confirmed and must not be retried blindly: a resubmission after an unknown
//! outcome risks double movement of funds.

use std::time::{Duration, Instant};

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;

use crate::error::Result;

/// Source-chain custody contract for the lock-and-mint direction.
#[async_trait]
pub trait LockerGateway: Send + Sync {
    /// Current relay fee for the given destination, paid as native value
    /// alongside the lock call.
    async fn current_fee(&self, destination_chain_id: u64) -> Result<U256>;

    /// Global pause flag. While set, no state-changing call may be submitted
    /// to this contract.
    async fn is_paused(&self) -> Result<bool>;

    /// Moves `amount` from the caller's balance into custody, emitting the
    /// event that triggers minting for `recipient` on the destination chain.
    async fn lock(
        &self,
        destination_chain_id: u64,
        recipient: Address,
        amount: U256,
        fee: U256,
    ) -> Result<TxHash>;
}

/// Mint-chain issuance contract for the burn-and-release direction.
#[async_trait]
pub trait MinterGateway: Send + Sync {
    /// Current relay fee for the given destination, paid as native value
    /// alongside the burn call.
    async fn current_fee(&self, destination_chain_id: u64) -> Result<U256>;

    /// Global pause flag. While set, no state-changing call may be submitted
    /// to this contract.
    async fn is_paused(&self) -> Result<bool>;

    /// Amount previously locked on `chain_id` and available to release back
    /// to it. This is the capacity bound for burn-and-release.
    async fn locked_for(&self, chain_id: u64) -> Result<U256>;

    /// Burns `amount` of issued supply, emitting the event that releases
    /// custody to `recipient` on the destination chain.
    async fn burn(
        &self,
        destination_chain_id: u64,
        recipient: Address,
        amount: U256,
        fee: U256,
    ) -> Result<TxHash>;
}

/// Mint-chain allowance registry.
#[async_trait]
pub trait ManagerGateway: Send + Sync {
    /// Remaining amount the given minter identity may still mint. This is
    /// the capacity bound for lock-and-mint.
    async fn remaining_mint_allowance(&self, minter: Address) -> Result<U256>;
}

/// ERC-20 token on a lock chain.
#[async_trait]
pub trait TokenGateway: Send + Sync {
    /// Current approved spending amount from `owner` to `spender`.
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256>;

    /// Approves `spender` for `amount`, returning once confirmed.
    async fn approve(&self, spender: Address, amount: U256) -> Result<TxHash>;
}

/// Time abstraction so backoff and polling logic can be tested without
/// waiting.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Asynchronously sleeps for the given duration.
    async fn sleep(&self, duration: Duration);

    /// Returns the current instant in time.
    fn now(&self) -> Instant;
}
