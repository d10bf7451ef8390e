//! Chain connection registry.
//!
//! One connection per network, constructed once at startup from
//! configuration and immutable for the process lifetime. Each connection
//! bundles the bound contract handles for its chain together with the
//! submission permit that serializes state-changing calls from the chain's
//! signing identity (two concurrent submissions from the same signer would
//! race on the account sequence number).

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::Address;
use bon::Builder;
use tokio::sync::{Mutex, MutexGuard};

use crate::chain::BridgeChain;
use crate::error::{BridgeError, Result};
use crate::traits::{LockerGateway, ManagerGateway, MinterGateway, TokenGateway};

/// A lock chain's contract handles and signing identity.
#[derive(Builder)]
pub struct LockChainConnection {
    chain: BridgeChain,
    locker: Arc<dyn LockerGateway>,
    token: Arc<dyn TokenGateway>,
    /// The bridge wallet on this chain; owner side of the token allowance.
    wallet: Address,
    /// The locker deployment; spender side of the token allowance.
    locker_address: Address,
    #[builder(skip)]
    submission: Mutex<()>,
}

impl LockChainConnection {
    pub fn chain(&self) -> BridgeChain {
        self.chain
    }

    pub fn locker(&self) -> &Arc<dyn LockerGateway> {
        &self.locker
    }

    pub fn token(&self) -> &Arc<dyn TokenGateway> {
        &self.token
    }

    pub fn wallet(&self) -> Address {
        self.wallet
    }

    pub fn locker_address(&self) -> Address {
        self.locker_address
    }

    /// Acquires the submission permit for this chain's signer.
    ///
    /// Held across every state-changing call (including a conditional
    /// approve and the lock it enables) so submissions from the same signer
    /// never interleave. Reads do not take the permit.
    pub async fn acquire_submission(&self) -> MutexGuard<'_, ()> {
        self.submission.lock().await
    }
}

/// The mint chain's contract handles.
#[derive(Builder)]
pub struct MintChainConnection {
    chain: BridgeChain,
    minter: Arc<dyn MinterGateway>,
    manager: Arc<dyn ManagerGateway>,
    /// The minter identity whose remaining allowance bounds lock-and-mint
    /// capacity.
    minter_address: Address,
    #[builder(skip)]
    submission: Mutex<()>,
}

impl MintChainConnection {
    pub fn chain(&self) -> BridgeChain {
        self.chain
    }

    pub fn minter(&self) -> &Arc<dyn MinterGateway> {
        &self.minter
    }

    pub fn manager(&self) -> &Arc<dyn ManagerGateway> {
        &self.manager
    }

    pub fn minter_address(&self) -> Address {
        self.minter_address
    }

    /// Acquires the submission permit for the mint chain's signer.
    pub async fn acquire_submission(&self) -> MutexGuard<'_, ()> {
        self.submission.lock().await
    }
}

/// All chain connections, keyed for route lookup.
///
/// Replaces the ambient per-module contract singletons of a typical relay
/// script: the registry is built once and passed by reference to the
/// orchestrator.
pub struct BridgeRegistry {
    lock_chains: HashMap<BridgeChain, LockChainConnection>,
    mint_chain: MintChainConnection,
}

impl BridgeRegistry {
    /// Builds the registry, rejecting connections bound to the wrong side
    /// of the bridge.
    pub fn new(
        lock_chains: impl IntoIterator<Item = LockChainConnection>,
        mint_chain: MintChainConnection,
    ) -> Result<Self> {
        if mint_chain.chain().is_lock_chain() {
            return Err(BridgeError::InvalidConfig(format!(
                "{} is a lock chain, not the mint chain",
                mint_chain.chain()
            )));
        }

        let mut by_chain = HashMap::new();
        for connection in lock_chains {
            if !connection.chain().is_lock_chain() {
                return Err(BridgeError::InvalidConfig(format!(
                    "{} is not a lock chain",
                    connection.chain()
                )));
            }
            by_chain.insert(connection.chain(), connection);
        }

        Ok(Self {
            lock_chains: by_chain,
            mint_chain,
        })
    }

    /// Looks up the connection for a lock chain.
    pub fn lock_chain(&self, chain: BridgeChain) -> Result<&LockChainConnection> {
        self.lock_chains.get(&chain).ok_or_else(|| {
            BridgeError::InvalidConfig(format!("no connection configured for {chain}"))
        })
    }

    /// Returns the mint chain connection.
    pub fn mint_chain(&self) -> &MintChainConnection {
        &self.mint_chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeLocker, FakeManager, FakeMinter, FakeToken};

    fn lock_connection(chain: BridgeChain) -> LockChainConnection {
        LockChainConnection::builder()
            .chain(chain)
            .locker(Arc::new(FakeLocker::new()))
            .token(Arc::new(FakeToken::new()))
            .wallet(Address::ZERO)
            .locker_address(Address::ZERO)
            .build()
    }

    fn mint_connection(chain: BridgeChain) -> MintChainConnection {
        MintChainConnection::builder()
            .chain(chain)
            .minter(Arc::new(FakeMinter::new()))
            .manager(Arc::new(FakeManager::new()))
            .minter_address(Address::ZERO)
            .build()
    }

    #[test]
    fn registry_accepts_the_configured_topology() {
        let registry = BridgeRegistry::new(
            [
                lock_connection(BridgeChain::EthereumSepolia),
                lock_connection(BridgeChain::ArbitrumSepolia),
            ],
            mint_connection(BridgeChain::XdcApothem),
        )
        .unwrap();

        assert!(registry.lock_chain(BridgeChain::EthereumSepolia).is_ok());
        assert!(registry.lock_chain(BridgeChain::ArbitrumSepolia).is_ok());
        assert_eq!(registry.mint_chain().chain(), BridgeChain::XdcApothem);
    }

    #[test]
    fn registry_rejects_a_lock_chain_as_mint_chain() {
        let result = BridgeRegistry::new(
            [lock_connection(BridgeChain::EthereumSepolia)],
            mint_connection(BridgeChain::ArbitrumSepolia),
        );
        assert!(matches!(result, Err(BridgeError::InvalidConfig(_))));
    }

    #[test]
    fn registry_rejects_the_mint_chain_as_lock_chain() {
        let result = BridgeRegistry::new(
            [lock_connection(BridgeChain::XdcApothem)],
            mint_connection(BridgeChain::XdcApothem),
        );
        assert!(matches!(result, Err(BridgeError::InvalidConfig(_))));
    }

    #[test]
    fn missing_lock_chain_is_a_configuration_error() {
        let registry = BridgeRegistry::new(
            [lock_connection(BridgeChain::EthereumSepolia)],
            mint_connection(BridgeChain::XdcApothem),
        )
        .unwrap();

        let result = registry.lock_chain(BridgeChain::ArbitrumSepolia);
        assert!(matches!(result, Err(BridgeError::InvalidConfig(_))));
    }
}
