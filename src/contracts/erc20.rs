//! ERC20 contract bindings for allowance and approval operations.
//!
//! The bridge wallet must grant the locker contract an allowance before a
//! lock call can move USDC into custody; this wrapper reads the current
//! allowance and issues the approval when it is short.

use std::time::Duration;

use alloy_network::Ethereum;
use alloy_primitives::{Address, TxHash, U256};
use alloy_provider::Provider;
use alloy_sol_types::sol;
use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::Result;
use crate::traits::TokenGateway;

use super::{confirm, read_error, submit_error, DEFAULT_CONFIRMATION_TIMEOUT};
use Erc20::Erc20Instance;

/// ERC20 wrapper for the USDC deployment on one lock chain.
pub struct Erc20Contract<P: Provider<Ethereum>> {
    instance: Erc20Instance<P>,
    confirmation_timeout: Duration,
}

impl<P: Provider<Ethereum>> Erc20Contract<P> {
    /// Create a new ERC20 wrapper bound to the given token deployment.
    pub fn new(address: Address, provider: P) -> Self {
        debug!(
            contract_address = %address,
            event = "erc20_contract_initialized"
        );
        Self {
            instance: Erc20Instance::new(address, provider),
            confirmation_timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Overrides the bound on the confirmation wait for approvals.
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
impl<P: Provider<Ethereum> + Clone + Send + Sync + 'static> TokenGateway for Erc20Contract<P> {
    async fn allowance(&self, owner: Address, spender: Address) -> Result<U256> {
        let allowance = self
            .instance
            .allowance(owner, spender)
            .call()
            .await
            .map_err(read_error)?;

        debug!(
            owner = %owner,
            spender = %spender,
            allowance = %allowance,
            contract_address = %self.instance.address(),
            event = "allowance_retrieved"
        );

        Ok(allowance)
    }

    async fn approve(&self, spender: Address, amount: U256) -> Result<TxHash> {
        let pending = self
            .instance
            .approve(spender, amount)
            .send()
            .await
            .map_err(submit_error)?;

        info!(
            spender = %spender,
            amount = %amount,
            tx_hash = %pending.tx_hash(),
            contract_address = %self.instance.address(),
            event = "approve_submitted"
        );

        let tx_hash = confirm(pending.watch(), self.confirmation_timeout).await?;

        info!(
            tx_hash = %tx_hash,
            event = "approve_confirmed"
        );

        Ok(tx_hash)
    }
}

// Minimal ERC20 interface for approval operations
sol!(
    #[allow(missing_docs)]
    #[sol(rpc)]
    contract Erc20 {
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
        function balanceOf(address account) external view returns (uint256);
    }
);
