//! Locker contract bindings for source-chain USDC custody.
//!
//! The locker takes custody of USDC on a lock chain and emits the event that
//! triggers minting on the destination chain. The relay fee is paid in the
//! chain's native currency as call value.

use std::time::Duration;

use alloy_network::Ethereum;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;
use crate::traits::LockerGateway;

use super::{confirm, read_error, submit_error, DEFAULT_CONFIRMATION_TIMEOUT};
use BridgeLocker::BridgeLockerInstance;

/// Locker contract wrapper for one lock chain.
pub struct LockerContract<P: Provider<Ethereum>> {
    instance: BridgeLockerInstance<P>,
    confirmation_timeout: Duration,
}

impl<P: Provider<Ethereum>> LockerContract<P> {
    /// Create a new locker wrapper bound to the given deployment.
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "locker_contract_initialized"
        );
        Self {
            instance: BridgeLockerInstance::new(address, provider),
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Overrides the bound on the confirmation wait for lock submissions.
    pub fn with_confirmation_timeout(mut self, timeout: Duration) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Returns the contract address.
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

#[async_trait]
impl<P: Provider<Ethereum> + Clone + Send + Sync + 'static> LockerGateway for LockerContract<P> {
    async fn current_fee(&self, destination_chain_id: u64) -> Result<U256> {
        let fee = self
            .instance
            .fees(U256::from(destination_chain_id))
            .call()
            .await
            .map_err(read_error)?;

        debug!(
            destination_chain_id = destination_chain_id,
            fee = %fee,
            contract_address = %self.instance.address(),
            event = "locker_fee_retrieved"
        );

        Ok(fee)
    }

    async fn is_paused(&self) -> Result<bool> {
        let paused = self
            .instance
            .globalPaused()
            .call()
            .await
            .map_err(read_error)?;

        debug!(
            paused = paused,
            contract_address = %self.instance.address(),
            event = "locker_pause_state_retrieved"
        );

        Ok(paused)
    }

    async fn lock(
        &self,
        destination_chain_id: u64,
        recipient: Address,
        amount: U256,
        fee: U256,
    ) -> Result<TxHash> {
        let pending = self
            .instance
            .userLock(U256::from(destination_chain_id), recipient, amount)
            .value(fee)
            .send()
            .await
            .map_err(submit_error)?;

        info!(
            destination_chain_id = destination_chain_id,
            recipient = %recipient,
            amount = %amount,
            fee = %fee,
            tx_hash = %pending.tx_hash(),
            contract_address = %self.instance.address(),
            event = "lock_submitted"
        );

        let tx_hash = confirm(pending.watch(), self.confirmation_timeout).await?;

        info!(
            tx_hash = %tx_hash,
            event = "lock_confirmed"
        );

        Ok(tx_hash)
    }
}

// Minimal locker interface used by the relay
sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract BridgeLocker {
        function fees(uint256 destChainId) external view returns (uint256);
        function globalPaused() external view returns (bool);
        function userLock(uint256 destChainId, address to, uint256 amount) external payable;
    }
);
