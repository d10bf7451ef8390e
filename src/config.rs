//! Relay configuration loaded from the environment.
//!
//! All chain bindings are fixed at startup: RPC endpoints, the shared
//! signing key, and the mint-chain contract addresses are required; the
//! lock-chain deployments default to the known testnet addresses and can be
//! overridden per environment.

use std::time::Duration;

use alloy_primitives::Address;
use url::Url;

use crate::chain::{
    ARBITRUM_SEPOLIA_LOCKER_ADDRESS, ARBITRUM_SEPOLIA_USDC_ADDRESS,
    ETHEREUM_SEPOLIA_LOCKER_ADDRESS, ETHEREUM_SEPOLIA_USDC_ADDRESS,
};
use crate::error::{BridgeError, Result};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 120;

/// Startup configuration for the relay process.
#[derive(Debug, Clone)]
pub struct Config {
    pub eth_rpc: Url,
    pub arb_rpc: Url,
    pub xdc_rpc: Url,
    /// Hex-encoded private key for the bridge wallet, shared across chains.
    pub private_key: String,
    /// Minter deployment on the mint chain.
    pub minter_address: Address,
    /// Minter manager deployment on the mint chain.
    pub manager_address: Address,
    pub eth_locker_address: Address,
    pub arb_locker_address: Address,
    pub eth_usdc_address: Address,
    pub arb_usdc_address: Address,
    /// HTTP listen port.
    pub port: u16,
    /// Bound on each state-changing call's confirmation wait.
    pub confirmation_timeout: Duration,
}

impl Config {
    /// Loads configuration from the environment, reading `.env` first if
    /// present.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env");
        }

        Ok(Self {
            eth_rpc: parse_url("ETH_RPC", &required("ETH_RPC")?)?,
            arb_rpc: parse_url("ARB_RPC", &required("ARB_RPC")?)?,
            xdc_rpc: parse_url("XDC_RPC", &required("XDC_RPC")?)?,
            private_key: required("PRIVATE_KEY")?,
            minter_address: parse_address("MINTER_CONTRACT", &required("MINTER_CONTRACT")?)?,
            manager_address: parse_address("MINTER_MANAGER", &required("MINTER_MANAGER")?)?,
            eth_locker_address: optional_address("ETH_LOCKER", ETHEREUM_SEPOLIA_LOCKER_ADDRESS)?,
            arb_locker_address: optional_address("ARB_LOCKER", ARBITRUM_SEPOLIA_LOCKER_ADDRESS)?,
            eth_usdc_address: optional_address("ETH_USDC", ETHEREUM_SEPOLIA_USDC_ADDRESS)?,
            arb_usdc_address: optional_address("ARB_USDC", ARBITRUM_SEPOLIA_USDC_ADDRESS)?,
            port: match std::env::var("PORT") {
                Ok(raw) => raw.parse().map_err(|_| {
                    BridgeError::InvalidConfig(format!("PORT: {raw:?} is not a port number"))
                })?,
                Err(_) => DEFAULT_PORT,
            },
            confirmation_timeout: match std::env::var("CONFIRMATION_TIMEOUT_SECS") {
                Ok(raw) => Duration::from_secs(raw.parse().map_err(|_| {
                    BridgeError::InvalidConfig(format!(
                        "CONFIRMATION_TIMEOUT_SECS: {raw:?} is not a number of seconds"
                    ))
                })?),
                Err(_) => Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS),
            },
        })
    }
}

fn required(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| BridgeError::InvalidConfig(format!("{name} required")))
}

fn parse_url(name: &str, raw: &str) -> Result<Url> {
    raw.parse()
        .map_err(|e| BridgeError::InvalidConfig(format!("{name}: {e}")))
}

fn parse_address(name: &str, raw: &str) -> Result<Address> {
    raw.trim()
        .parse()
        .map_err(|e| BridgeError::InvalidConfig(format!("{name}: {e}")))
}

fn optional_address(name: &str, default: Address) -> Result<Address> {
    match std::env::var(name) {
        Ok(raw) => parse_address(name, &raw),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_parsing_accepts_checksummed_and_lowercase() {
        let checksummed =
            parse_address("MINTER_CONTRACT", "0xA3272527814B500F5233c97C1571baCAC244a7a3")
                .unwrap();
        let lowercase =
            parse_address("MINTER_CONTRACT", "0xa3272527814b500f5233c97c1571bacac244a7a3")
                .unwrap();
        assert_eq!(checksummed, lowercase);
    }

    #[test]
    fn bad_address_is_a_configuration_error() {
        let err = parse_address("MINTER_CONTRACT", "not-an-address").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidConfig(_)));
    }

    #[test]
    fn bad_url_is_a_configuration_error() {
        let err = parse_url("ETH_RPC", "not a url").unwrap_err();
        assert!(matches!(err, BridgeError::InvalidConfig(_)));
    }
}
