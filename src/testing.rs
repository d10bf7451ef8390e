//! Test fakes for the contract gateway traits.
//!
//! These fakes let tests drive the orchestrator through pause, capacity,
//! allowance, revert, and concurrency scenarios without a live network.
//! Every state-changing fake records its calls so tests can assert exactly
//! what was (or was not) submitted, and tracks how many submissions were
//! in flight at once so serialization can be verified.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use alloy_primitives::{keccak256, Address, TxHash, U256};
use async_trait::async_trait;

use crate::error::{BridgeError, Result};
use crate::traits::{Clock, LockerGateway, ManagerGateway, MinterGateway, TokenGateway};

fn fake_tx_hash(tag: &str, counter: u64) -> TxHash {
    keccak256(format!("{tag}:{counter}"))
}

/// A recorded `lock` submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockCall {
    pub destination_chain_id: u64,
    pub recipient: Address,
    pub amount: U256,
    pub fee: U256,
}

/// A recorded `burn` submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnCall {
    pub destination_chain_id: u64,
    pub recipient: Address,
    pub amount: U256,
    pub fee: U256,
}

/// A recorded `approve` submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproveCall {
    pub spender: Address,
    pub amount: U256,
}

#[derive(Default)]
struct LockerState {
    paused: bool,
    fee: U256,
    submission_delay: Duration,
    fail_submission: Option<String>,
    calls: Vec<LockCall>,
    attempts: usize,
    in_flight: u32,
    max_in_flight: u32,
    mint_capacity: Option<Arc<Mutex<U256>>>,
    tx_counter: u64,
}

/// Fake locker contract for a lock chain.
///
/// Optionally linked to a capacity cell (normally the fake manager's) which
/// a successful lock decrements, mirroring the destination-side allowance
/// consumption a real lock eventually causes.
#[derive(Clone, Default)]
pub struct FakeLocker {
    inner: Arc<Mutex<LockerState>>,
}

impl FakeLocker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_paused(&self, paused: bool) {
        self.inner.lock().unwrap().paused = paused;
    }

    pub fn set_fee(&self, fee: U256) {
        self.inner.lock().unwrap().fee = fee;
    }

    /// Links the capacity cell a successful lock consumes.
    pub fn link_mint_capacity(&self, capacity: Arc<Mutex<U256>>) {
        self.inner.lock().unwrap().mint_capacity = Some(capacity);
    }

    /// Makes submissions dwell before completing, so tests can observe
    /// overlap (or its absence).
    pub fn set_submission_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().submission_delay = delay;
    }

    /// Makes every subsequent lock submission revert.
    pub fn fail_submissions(&self, reason: &str) {
        self.inner.lock().unwrap().fail_submission = Some(reason.to_string());
    }

    pub fn lock_calls(&self) -> Vec<LockCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn lock_call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    /// Number of lock submissions attempted, counting failed ones.
    pub fn lock_attempt_count(&self) -> usize {
        self.inner.lock().unwrap().attempts
    }

    /// Highest number of lock submissions that were ever in flight at once.
    pub fn max_in_flight(&self) -> u32 {
        self.inner.lock().unwrap().max_in_flight
    }
}

#[async_trait]
impl LockerGateway for FakeLocker {
    async fn current_fee(&self, _destination_chain_id: u64) -> Result<U256> {
        Ok(self.inner.lock().unwrap().fee)
    }

    async fn is_paused(&self) -> Result<bool> {
        Ok(self.inner.lock().unwrap().paused)
    }

    async fn lock(
        &self,
        destination_chain_id: u64,
        recipient: Address,
        amount: U256,
        fee: U256,
    ) -> Result<TxHash> {
        let delay = {
            let mut state = self.inner.lock().unwrap();
            state.attempts += 1;
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.submission_delay
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.inner.lock().unwrap();
        state.in_flight -= 1;
        if let Some(reason) = state.fail_submission.clone() {
            return Err(BridgeError::SubmissionReverted { reason });
        }

        state.calls.push(LockCall {
            destination_chain_id,
            recipient,
            amount,
            fee,
        });
        if let Some(capacity) = &state.mint_capacity {
            let mut capacity = capacity.lock().unwrap();
            *capacity = capacity.saturating_sub(amount);
        }
        state.tx_counter += 1;
        Ok(fake_tx_hash("lock", state.tx_counter))
    }
}

#[derive(Default)]
struct MinterState {
    paused: bool,
    fee: U256,
    locked: HashMap<u64, U256>,
    submission_delay: Duration,
    fail_submission: Option<String>,
    fail_next_read: Option<String>,
    calls: Vec<BurnCall>,
    attempts: usize,
    in_flight: u32,
    max_in_flight: u32,
    tx_counter: u64,
}

/// Fake minter contract for the mint chain.
///
/// Tracks a locked balance per origin chain; a successful burn decrements
/// the destination's entry the way a real burn consumes release capacity.
#[derive(Clone, Default)]
pub struct FakeMinter {
    inner: Arc<Mutex<MinterState>>,
}

impl FakeMinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_paused(&self, paused: bool) {
        self.inner.lock().unwrap().paused = paused;
    }

    pub fn set_fee(&self, fee: U256) {
        self.inner.lock().unwrap().fee = fee;
    }

    pub fn set_locked(&self, chain_id: u64, amount: U256) {
        self.inner.lock().unwrap().locked.insert(chain_id, amount);
    }

    pub fn locked(&self, chain_id: u64) -> U256 {
        self.inner
            .lock()
            .unwrap()
            .locked
            .get(&chain_id)
            .copied()
            .unwrap_or(U256::ZERO)
    }

    pub fn set_submission_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().submission_delay = delay;
    }

    pub fn fail_submissions(&self, reason: &str) {
        self.inner.lock().unwrap().fail_submission = Some(reason.to_string());
    }

    /// Makes the next read-only call fail with an RPC error, then recover.
    pub fn fail_reads_once(&self, reason: &str) {
        self.inner.lock().unwrap().fail_next_read = Some(reason.to_string());
    }

    pub fn burn_calls(&self) -> Vec<BurnCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn burn_call_count(&self) -> usize {
        self.inner.lock().unwrap().calls.len()
    }

    /// Number of burn submissions attempted, counting failed ones.
    pub fn burn_attempt_count(&self) -> usize {
        self.inner.lock().unwrap().attempts
    }

    /// Highest number of burn submissions that were ever in flight at once.
    pub fn max_in_flight(&self) -> u32 {
        self.inner.lock().unwrap().max_in_flight
    }

    fn take_read_failure(&self) -> Option<String> {
        self.inner.lock().unwrap().fail_next_read.take()
    }
}

#[async_trait]
impl MinterGateway for FakeMinter {
    async fn current_fee(&self, _destination_chain_id: u64) -> Result<U256> {
        if let Some(reason) = self.take_read_failure() {
            return Err(BridgeError::RpcUnavailable(reason));
        }
        Ok(self.inner.lock().unwrap().fee)
    }

    async fn is_paused(&self) -> Result<bool> {
        if let Some(reason) = self.take_read_failure() {
            return Err(BridgeError::RpcUnavailable(reason));
        }
        Ok(self.inner.lock().unwrap().paused)
    }

    async fn locked_for(&self, chain_id: u64) -> Result<U256> {
        if let Some(reason) = self.take_read_failure() {
            return Err(BridgeError::RpcUnavailable(reason));
        }
        Ok(self.locked(chain_id))
    }

    async fn burn(
        &self,
        destination_chain_id: u64,
        recipient: Address,
        amount: U256,
        fee: U256,
    ) -> Result<TxHash> {
        let delay = {
            let mut state = self.inner.lock().unwrap();
            state.attempts += 1;
            state.in_flight += 1;
            state.max_in_flight = state.max_in_flight.max(state.in_flight);
            state.submission_delay
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.inner.lock().unwrap();
        state.in_flight -= 1;
        if let Some(reason) = state.fail_submission.clone() {
            return Err(BridgeError::SubmissionReverted { reason });
        }

        state.calls.push(BurnCall {
            destination_chain_id,
            recipient,
            amount,
            fee,
        });
        let entry = state
            .locked
            .entry(destination_chain_id)
            .or_insert(U256::ZERO);
        *entry = entry.saturating_sub(amount);
        state.tx_counter += 1;
        Ok(fake_tx_hash("burn", state.tx_counter))
    }
}

/// Fake minter manager holding the remaining mint allowance.
///
/// The allowance lives in a shared cell so a linked [`FakeLocker`] can
/// consume it on lock, letting tests observe the capacity decrease on a
/// follow-up read.
#[derive(Clone, Default)]
pub struct FakeManager {
    allowance: Arc<Mutex<U256>>,
    call_count: Arc<Mutex<usize>>,
}

impl FakeManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_allowance(&self, allowance: U256) {
        *self.allowance.lock().unwrap() = allowance;
    }

    pub fn allowance(&self) -> U256 {
        *self.allowance.lock().unwrap()
    }

    /// The shared capacity cell, for linking into a [`FakeLocker`].
    pub fn capacity_cell(&self) -> Arc<Mutex<U256>> {
        self.allowance.clone()
    }

    pub fn allowance_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

#[async_trait]
impl ManagerGateway for FakeManager {
    async fn remaining_mint_allowance(&self, _minter: Address) -> Result<U256> {
        *self.call_count.lock().unwrap() += 1;
        Ok(self.allowance())
    }
}

#[derive(Default)]
struct TokenState {
    allowance: U256,
    approve_calls: Vec<ApproveCall>,
    fail_approve: Option<String>,
    tx_counter: u64,
}

/// Fake ERC-20 token tracking the bridge wallet's locker allowance.
#[derive(Clone, Default)]
pub struct FakeToken {
    inner: Arc<Mutex<TokenState>>,
}

impl FakeToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_allowance(&self, allowance: U256) {
        self.inner.lock().unwrap().allowance = allowance;
    }

    /// Makes every subsequent approve submission revert.
    pub fn fail_approvals(&self, reason: &str) {
        self.inner.lock().unwrap().fail_approve = Some(reason.to_string());
    }

    pub fn approve_calls(&self) -> Vec<ApproveCall> {
        self.inner.lock().unwrap().approve_calls.clone()
    }

    pub fn approve_call_count(&self) -> usize {
        self.inner.lock().unwrap().approve_calls.len()
    }
}

#[async_trait]
impl TokenGateway for FakeToken {
    async fn allowance(&self, _owner: Address, _spender: Address) -> Result<U256> {
        Ok(self.inner.lock().unwrap().allowance)
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<TxHash> {
        let mut state = self.inner.lock().unwrap();
        if let Some(reason) = state.fail_approve.clone() {
            return Err(BridgeError::SubmissionReverted { reason });
        }
        state.approve_calls.push(ApproveCall { spender, amount });
        state.allowance = amount;
        state.tx_counter += 1;
        Ok(fake_tx_hash("approve", state.tx_counter))
    }
}

/// A fake clock that records sleeps and fast-forwards instead of waiting.
#[derive(Clone)]
pub struct FakeClock {
    current_time: Arc<Mutex<Instant>>,
    sleep_log: Arc<Mutex<Vec<Duration>>>,
}

impl Default for FakeClock {
    fn default() -> Self {
        Self {
            current_time: Arc::new(Mutex::new(Instant::now())),
            sleep_log: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fast-forward the clock by the given duration.
    pub fn advance(&self, duration: Duration) {
        let mut time = self.current_time.lock().unwrap();
        *time += duration;
    }

    /// Total time "slept" through this clock.
    pub fn total_sleep_time(&self) -> Duration {
        self.sleep_log.lock().unwrap().iter().sum()
    }

    /// Number of times sleep was called.
    pub fn sleep_count(&self) -> usize {
        self.sleep_log.lock().unwrap().len()
    }
}

#[async_trait]
impl Clock for FakeClock {
    async fn sleep(&self, duration: Duration) {
        self.sleep_log.lock().unwrap().push(duration);
        self.advance(duration);
    }

    fn now(&self) -> Instant {
        *self.current_time.lock().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fake_clock_tracks_sleep_calls() {
        let clock = FakeClock::new();

        clock.sleep(Duration::from_secs(60)).await;
        clock.sleep(Duration::from_secs(120)).await;

        assert_eq!(clock.sleep_count(), 2);
        assert_eq!(clock.total_sleep_time(), Duration::from_secs(180));
    }

    #[tokio::test]
    async fn linked_locker_consumes_manager_capacity() {
        let manager = FakeManager::new();
        manager.set_allowance(U256::from(1_000u64));
        let locker = FakeLocker::new();
        locker.link_mint_capacity(manager.capacity_cell());

        locker
            .lock(51, Address::ZERO, U256::from(300u64), U256::ZERO)
            .await
            .unwrap();

        assert_eq!(manager.allowance(), U256::from(700u64));
    }

    #[tokio::test]
    async fn burn_consumes_locked_balance() {
        let minter = FakeMinter::new();
        minter.set_locked(11155111, U256::from(500u64));

        minter
            .burn(11155111, Address::ZERO, U256::from(200u64), U256::ZERO)
            .await
            .unwrap();

        assert_eq!(minter.locked(11155111), U256::from(300u64));
    }

    #[tokio::test]
    async fn failed_lock_counts_as_an_attempt() {
        let locker = FakeLocker::new();
        locker.fail_submissions("reverted");

        let result = locker
            .lock(51, Address::ZERO, U256::from(1u64), U256::ZERO)
            .await;

        assert!(result.is_err());
        assert_eq!(locker.lock_attempt_count(), 1);
        assert_eq!(locker.lock_call_count(), 0);
    }

    #[tokio::test]
    async fn minter_read_failure_is_one_shot() {
        let minter = FakeMinter::new();
        minter.fail_reads_once("boom");

        assert!(minter.is_paused().await.is_err());
        assert!(minter.is_paused().await.is_ok());
    }

    #[tokio::test]
    async fn approve_records_and_raises_allowance() {
        let token = FakeToken::new();
        let spender = Address::repeat_byte(0x11);

        token.approve(spender, U256::from(500u64)).await.unwrap();

        assert_eq!(token.approve_call_count(), 1);
        assert_eq!(
            token.allowance(Address::ZERO, spender).await.unwrap(),
            U256::from(500u64)
        );
    }
}
