//! Minter manager bindings for the mint-chain allowance registry.
//!
//! The manager tracks how much each minter identity may still mint, which
//! bounds the lock-and-mint capacity for every inbound direction.

use alloy_network::Ethereum;
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::traits::ManagerGateway;

use super::read_error;
use MinterManager::MinterManagerInstance;

/// Manager contract wrapper for the mint chain.
pub struct ManagerContract<P: Provider<Ethereum>> {
    instance: MinterManagerInstance<P>,
}

impl<P: Provider<Ethereum>> ManagerContract<P> {
    /// Create a new manager wrapper bound to the given deployment.
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "manager_contract_initialized"
        );
        Self {
            instance: MinterManagerInstance::new(address, provider),
        }
    }

    /// Returns the contract address.
    pub fn address(&self) -> Address {
        *self.instance.address()
    }
}

#[async_trait]
impl<P: Provider<Ethereum> + Clone + Send + Sync + 'static> ManagerGateway for ManagerContract<P> {
    async fn remaining_mint_allowance(&self, minter: Address) -> Result<U256> {
        let allowance = self
            .instance
            .minterAllowance(minter)
            .call()
            .await
            .map_err(read_error)?;

        debug!(
            minter = %minter,
            remaining = %allowance,
            contract_address = %self.instance.address(),
            event = "mint_allowance_retrieved"
        );

        Ok(allowance)
    }
}

// Minimal manager interface used by the relay
sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract MinterManager {
        function minterAllowance(address minter) external view returns (uint256);
    }
);
