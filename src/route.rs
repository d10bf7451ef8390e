//! Route resolution for the four configured bridge directions.
//!
//! Resolution is a pure lookup with no I/O: a (source, destination) label
//! pair either maps to one of the four configured directions or fails with
//! [`BridgeError::UnsupportedRoute`]. Unknown labels fail the same way as
//! known-but-unsupported directions; callers see a single error kind.

use std::fmt;

use crate::chain::BridgeChain;
use crate::error::{BridgeError, Result};

/// The two bridging operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Custody USDC on the source lock chain, mint on the destination.
    LockAndMint,
    /// Burn issued supply on the mint chain, release custody on the destination.
    BurnAndRelease,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LockAndMint => "lock-and-mint",
            Self::BurnAndRelease => "burn-and-release",
        })
    }
}

/// A resolved bridge direction.
///
/// Only four directions exist: each lock chain to the mint chain, and the
/// mint chain back to each lock chain.
///
/// # Example
///
/// ```rust
/// use usdc_bridge_relay::{OperationKind, Route};
///
/// let route = Route::resolve("eth", "xdc").unwrap();
/// assert_eq!(route.kind(), OperationKind::LockAndMint);
/// assert!(Route::resolve("eth", "arb").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Route {
    source: BridgeChain,
    destination: BridgeChain,
    kind: OperationKind,
}

impl Route {
    /// Resolves a label pair to a configured direction.
    ///
    /// Deterministic and side-effect free; same input always yields the
    /// same route.
    pub fn resolve(source_label: &str, destination_label: &str) -> Result<Self> {
        let source = BridgeChain::from_label(source_label)
            .ok_or_else(|| unsupported(source_label, destination_label))?;
        let destination = BridgeChain::from_label(destination_label)
            .ok_or_else(|| unsupported(source_label, destination_label))?;

        let kind = match (source.is_lock_chain(), destination.is_lock_chain()) {
            (true, false) => OperationKind::LockAndMint,
            (false, true) => OperationKind::BurnAndRelease,
            _ => return Err(unsupported(source_label, destination_label)),
        };

        Ok(Self {
            source,
            destination,
            kind,
        })
    }

    /// The chain the state-changing call is submitted on.
    ///
    /// For lock-and-mint this is the source lock chain; for burn-and-release
    /// it is the mint chain. Either way it equals [`Route::source`].
    pub fn submission_chain(&self) -> BridgeChain {
        self.source
    }

    pub fn source(&self) -> BridgeChain {
        self.source
    }

    pub fn destination(&self) -> BridgeChain {
        self.destination
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-to-{}", self.source, self.destination)
    }
}

fn unsupported(source_label: &str, destination_label: &str) -> BridgeError {
    BridgeError::UnsupportedRoute(format!(
        "{}-to-{}",
        source_label.trim().to_ascii_lowercase(),
        destination_label.trim().to_ascii_lowercase()
    ))
}
