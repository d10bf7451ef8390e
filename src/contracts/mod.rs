//! Typed contract wrappers for the four bridge contract roles.
//!
//! Each wrapper binds an alloy `sol!`-generated instance and implements the
//! corresponding gateway trait from [`crate::traits`]. State-changing calls
//! submit through the wrapper's provider (which carries the signing
//! identity) and wait for confirmation with a bounded timeout.

mod erc20;
mod locker;
mod manager;
mod minter;

use std::future::Future;
use std::time::Duration;

use alloy_primitives::TxHash;

use crate::error::{BridgeError, Result};

pub use self::erc20::Erc20Contract;
pub use self::locker::LockerContract;
pub use self::manager::ManagerContract;
pub use self::minter::MinterContract;

/// Default bound on the confirmation wait for state-changing calls.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(120);

/// Waits for a submitted transaction to confirm, bounded by `timeout`.
///
/// On expiry the outcome is unknown, not failed: the transaction may still
/// land, so the error tells the caller to re-query chain state before
/// resubmitting.
pub(crate) async fn confirm<F, E>(watch: F, timeout: Duration) -> Result<TxHash>
where
    F: Future<Output = std::result::Result<TxHash, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(timeout, watch).await {
        Ok(Ok(tx_hash)) => Ok(tx_hash),
        Ok(Err(e)) => Err(BridgeError::RpcUnavailable(format!(
            "confirmation watch failed: {e}"
        ))),
        Err(_) => Err(BridgeError::ConfirmationTimeout {
            timeout_secs: timeout.as_secs(),
        }),
    }
}

/// Maps a failed read-only contract call onto the error taxonomy.
pub(crate) fn read_error(e: alloy_contract::Error) -> BridgeError {
    BridgeError::RpcUnavailable(e.to_string())
}

/// Maps a failed state-changing submission onto the error taxonomy.
///
/// A rejection carrying revert data means the chain refused the call itself
/// (for example a capacity race the advisory guard check missed); anything
/// else is a transport failure.
pub(crate) fn submit_error(e: alloy_contract::Error) -> BridgeError {
    let reason = e.to_string();
    if reason.contains("revert") {
        BridgeError::SubmissionReverted { reason }
    } else {
        BridgeError::RpcUnavailable(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use std::future;

    #[tokio::test(start_paused = true)]
    async fn expired_confirmation_wait_reports_the_bound() {
        let watch = future::pending::<std::result::Result<TxHash, Infallible>>();

        let result = confirm(watch, Duration::from_secs(30)).await;

        match result {
            Err(BridgeError::ConfirmationTimeout { timeout_secs }) => {
                assert_eq!(timeout_secs, 30);
            }
            other => panic!("expected ConfirmationTimeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn confirmed_hash_passes_through() {
        let tx_hash = TxHash::from([0x12u8; 32]);
        let watch = future::ready(Ok::<_, Infallible>(tx_hash));

        assert_eq!(confirm(watch, Duration::from_secs(30)).await.unwrap(), tx_hash);
    }

    #[tokio::test]
    async fn watch_failure_is_not_a_timeout() {
        let watch = future::ready(Err::<TxHash, _>("receipt stream closed"));

        let result = confirm(watch, Duration::from_secs(30)).await;

        assert!(matches!(result, Err(BridgeError::RpcUnavailable(_))));
    }
}
