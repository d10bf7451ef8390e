//! OpenTelemetry span helpers for relay operations.
//!
//! Orthogonal span instrumentation following production conventions: static
//! span names, structured attributes, and separation from business logic.
//! Used internally by the orchestrator and exposed for advanced users who
//! want to integrate custom instrumentation.

use alloy_primitives::{Address, U256};
use tracing::Span;

use crate::chain::BridgeChain;
use crate::route::{OperationKind, Route};

/// Create span for one end-to-end transfer execution.
///
/// Parent: request-handler span (auto-attached by tracing)
/// Children: guard reads, submission span
#[inline]
pub fn execute_transfer(route: &Route, recipient: &Address, amount: &U256) -> Span {
    tracing::info_span!(
        "bridge_relay.execute_transfer",
        route = %route,
        operation = %route.kind(),
        recipient = %recipient,
        amount = %amount,
        error.type = tracing::field::Empty,
        error.message = tracing::field::Empty,
        otel.status_code = "OK",
    )
}

/// Create span for the state-changing submission and its confirmation wait.
///
/// Parent: bridge_relay.execute_transfer
/// Children: provider RPC calls
#[inline]
pub fn submit_state_change(chain: &BridgeChain, kind: &OperationKind, fee: &U256) -> Span {
    tracing::debug_span!(
        "bridge_relay.submit_state_change",
        chain = %chain,
        operation = %kind,
        fee = %fee,
    )
}

/// Record error attributes on the current span.
///
/// Follows OpenTelemetry semantic conventions for error tracking:
/// - error.type: The error type/variant
/// - error.message: Human-readable error message
pub fn record_error<E: std::error::Error>(error: &E) {
    let current_span = Span::current();
    current_span.record(
        "error.type",
        error.to_string().split(':').next().unwrap_or("Unknown"),
    );
    current_span.record("error.message", error.to_string());
    current_span.record("otel.status_code", "ERROR");
}
