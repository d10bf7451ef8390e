use alloy_primitives::U256;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Unsupported route: {0}")]
    UnsupportedRoute(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid recipient address: {0}")]
    InvalidAddress(String),

    #[error("Bridge paused")]
    BridgePaused,

    #[error("Amount exceeds available")]
    InsufficientCapacity { requested: U256, available: U256 },

    #[error("Allowance approval failed: {reason}")]
    AllowanceApprovalFailed { reason: String },

    #[error("Submission reverted: {reason}")]
    SubmissionReverted { reason: String },

    #[error("Confirmation not observed within {timeout_secs}s; transaction may still land")]
    ConfirmationTimeout { timeout_secs: u64 },

    #[error("RPC unavailable: {0}")]
    RpcUnavailable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("RPC error: {0}")]
    Rpc(#[from] alloy_json_rpc::RpcError<alloy_transport::TransportErrorKind>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Hex conversion error: {0}")]
    Hex(#[from] alloy_primitives::hex::FromHexError),
}

impl BridgeError {
    /// Whether the failed operation was a read that is safe to retry.
    ///
    /// State-changing failures (`SubmissionReverted`, `ConfirmationTimeout`)
    /// are never retryable: the original transaction may still land, and a
    /// resubmission risks double movement of funds.
    pub fn is_read_retryable(&self) -> bool {
        matches!(self, Self::RpcUnavailable(_) | Self::Rpc(_))
    }

    /// Whether the failure was detected locally or by a guard check, before
    /// any state-changing call was submitted.
    pub fn is_rejected_before_submission(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedRoute(_)
                | Self::InvalidAmount(_)
                | Self::InvalidAddress(_)
                | Self::BridgePaused
                | Self::InsufficientCapacity { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
