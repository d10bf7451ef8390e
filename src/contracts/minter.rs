//! Minter contract bindings for mint-chain issuance and redemption.
//!
//! The minter burns issued USDC on the mint chain, emitting the event that
//! releases previously locked tokens on the destination chain. It also
//! reports how much is locked per origin chain, which bounds the
//! burn-and-release capacity.

use std::time::Duration;

use alloy_network::Ethereum;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;
use crate::traits::MinterGateway;

use super::{confirm, read_error, submit_error, DEFAULT_CONFIRMATION_TIMEOUT};
use BridgeMinter::BridgeMinterInstance;

/// Minter contract wrapper for the mint chain.
pub struct MinterContract<P: Provider<Ethereum>> {
    instance: BridgeMinterInstance<P>,
    confirmation_timeout: Duration,
}

impl<P: Provider<Ethereum>> MinterContract<P> {
    /// Create a new minter wrapper bound to the given deployment.
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "minter_contract_initialized"
        );
        Self {
            instance: BridgeMinterInstance::new(address, provider),
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Overrides the bound on the confirmation wait for burn submissions.
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
impl<P: Provider<Ethereum> + Clone + Send + Sync + 'static> MinterGateway for MinterContract<P> {
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
            event = "minter_fee_retrieved"
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
            event = "minter_pause_state_retrieved"
        );

        Ok(paused)
    }

    async fn locked_for(&self, chain_id: u64) -> Result<U256> {
        let locked = self
            .instance
            .lockedOn(U256::from(chain_id))
            .call()
            .await
            .map_err(read_error)?;

        debug!(
            chain_id = chain_id,
            locked = %locked,
            contract_address = %self.instance.address(),
            event = "locked_amount_retrieved"
        );

        Ok(locked)
    }

    async fn burn(
        &self,
        destination_chain_id: u64,
        recipient: Address,
        amount: U256,
        fee: U256,
    ) -> Result<TxHash> {
        let pending = self
            .instance
            .userBurn(U256::from(destination_chain_id), recipient, amount)
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
            event = "burn_submitted"
        );

        let tx_hash = confirm(pending.watch(), self.confirmation_timeout).await?;

        info!(
            tx_hash = %tx_hash,
            event = "burn_confirmed"
        );

        Ok(tx_hash)
    }
}

// Minimal minter interface used by the relay
sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract BridgeMinter {
        function fees(uint256 destChainId) external view returns (uint256);
        function globalPaused() external view returns (bool);
        function lockedOn(uint256 chainId) external view returns (uint256);
        function userBurn(uint256 destChainId, address to, uint256 amount) external payable;
    }
);
