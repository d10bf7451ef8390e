//! Supported networks and the bridge contract deployments on each.
//!
//! The relay serves exactly three networks: two lock chains holding native
//! USDC in custody, and one mint/burn chain carrying the issued supply.
//! The set is fixed at compile time; endpoints and the mint-chain contract
//! addresses come from configuration at startup.

use std::fmt;

use alloy_primitives::{address, Address};

/// A network the relay can bridge between.
///
/// # Example
///
/// ```rust
/// use usdc_bridge_relay::BridgeChain;
///
/// assert_eq!(BridgeChain::from_label("ETH"), Some(BridgeChain::EthereumSepolia));
/// assert_eq!(BridgeChain::EthereumSepolia.chain_id(), 11155111);
/// assert_eq!(BridgeChain::from_label("bsc"), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeChain {
    /// Ethereum Sepolia (chain id 11155111), lock chain
    EthereumSepolia,
    /// Arbitrum Sepolia (chain id 421614), lock chain
    ArbitrumSepolia,
    /// XDC Apothem (chain id 51), mint/burn chain
    XdcApothem,
}

impl BridgeChain {
    /// Returns the numeric chain id used in contract calls.
    pub const fn chain_id(self) -> u64 {
        match self {
            Self::EthereumSepolia => 11155111,
            Self::ArbitrumSepolia => 421614,
            Self::XdcApothem => 51,
        }
    }

    /// Returns the canonical short label used in route directions.
    pub const fn label(self) -> &'static str {
        match self {
            Self::EthereumSepolia => "eth",
            Self::ArbitrumSepolia => "arb",
            Self::XdcApothem => "xdc",
        }
    }

    /// Parses a chain label, case-insensitively.
    ///
    /// Returns `None` for unknown labels; callers surface that the same way
    /// as an unsupported direction.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "eth" | "ethereum" | "sepolia" => Some(Self::EthereumSepolia),
            "arb" | "arbitrum" => Some(Self::ArbitrumSepolia),
            "xdc" | "apothem" => Some(Self::XdcApothem),
            _ => None,
        }
    }

    /// Whether this chain custodies USDC for the lock-and-mint direction.
    pub const fn is_lock_chain(self) -> bool {
        !matches!(self, Self::XdcApothem)
    }
}

impl fmt::Display for BridgeChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// Lock-chain contract deployments. The mint-chain minter and manager are
// environment-specific and come from configuration.

pub const ETHEREUM_SEPOLIA_LOCKER_ADDRESS: Address =
    address!("a3272527814b500f5233c97c1571bacac244a7a3");

pub const ARBITRUM_SEPOLIA_LOCKER_ADDRESS: Address =
    address!("b08a3886210de9462391d3001dc6af58b49c8f13");

/// <https://sepolia.etherscan.io/address/0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238>
pub const ETHEREUM_SEPOLIA_USDC_ADDRESS: Address =
    address!("1c7d4b196cb0c7b01d743fbc6116a902379c7238");

/// <https://sepolia.arbiscan.io/address/0x75faf114eafb1BDbe2F0316DF893fd58CE46AA4d>
pub const ARBITRUM_SEPOLIA_USDC_ADDRESS: Address =
    address!("75faf114eafb1bdbe2f0316df893fd58ce46aa4d");

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("eth", BridgeChain::EthereumSepolia)]
    #[case("ETH", BridgeChain::EthereumSepolia)]
    #[case("Arbitrum", BridgeChain::ArbitrumSepolia)]
    #[case(" xdc ", BridgeChain::XdcApothem)]
    fn label_parsing_is_case_insensitive(#[case] label: &str, #[case] expected: BridgeChain) {
        assert_eq!(BridgeChain::from_label(label), Some(expected));
    }

    #[rstest]
    #[case("bsc")]
    #[case("")]
    #[case("eth-to-xdc")]
    fn unknown_labels_fail(#[case] label: &str) {
        assert_eq!(BridgeChain::from_label(label), None);
    }

    #[test]
    fn lock_chain_partition() {
        assert!(BridgeChain::EthereumSepolia.is_lock_chain());
        assert!(BridgeChain::ArbitrumSepolia.is_lock_chain());
        assert!(!BridgeChain::XdcApothem.is_lock_chain());
    }

    #[test]
    fn display_matches_label() {
        assert_eq!(BridgeChain::XdcApothem.to_string(), "xdc");
    }
}
