//! HTTP surface translating inbound transfer requests into orchestrator
//! calls.
//!
//! One endpoint serves every configured direction:
//! `POST /bridge/{source}-to-{destination}` with a body of
//! `{ "to": "<address>", "amount": "<decimal string>" }`. Responses are the
//! shapes the conversational front-end consumes:
//!
//! - `200 { "success": true, "txHash": "0x..." }` on settlement
//! - `400 { "error": "Bridge paused" }` when the pause check fails
//! - `400 { "error": "Amount exceeds available" }` when capacity is short
//! - `400`/`500 { "error": <message> }` for validation and execution failures
//!
//! All boundary validation (direction, address, amount) happens here; the
//! orchestrator only ever sees a typed [`TransferRequest`].

use std::sync::Arc;

use alloy_primitives::{Address, TxHash};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::amount::parse_usdc;
use crate::error::{BridgeError, Result};
use crate::relay::{Relay, TransferRequest};
use crate::route::Route;

/// Inbound transfer request body.
#[derive(Debug, Deserialize)]
pub struct BridgeRequestBody {
    /// Recipient address on the destination chain.
    pub to: String,
    /// Human-readable decimal USDC amount.
    pub amount: String,
}

/// Settled transfer response body.
#[derive(Debug, Serialize)]
pub struct BridgeSuccessBody {
    pub success: bool,
    #[serde(rename = "txHash")]
    pub tx_hash: String,
}

/// Failure response body.
#[derive(Debug, Serialize)]
pub struct BridgeErrorBody {
    pub error: String,
}

/// Builds the relay's HTTP router.
pub fn router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route("/bridge/{direction}", post(handle_bridge))
        .route("/health", get(health))
        .with_state(relay)
}

async fn health() -> &'static str {
    "OK"
}

async fn handle_bridge(
    State(relay): State<Arc<Relay>>,
    Path(direction): Path<String>,
    Json(body): Json<BridgeRequestBody>,
) -> Response {
    match bridge(&relay, &direction, &body).await {
        Ok(tx_hash) => (
            StatusCode::OK,
            Json(BridgeSuccessBody {
                success: true,
                tx_hash: tx_hash.to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

async fn bridge(relay: &Relay, direction: &str, body: &BridgeRequestBody) -> Result<TxHash> {
    let (source, destination) = direction
        .split_once("-to-")
        .ok_or_else(|| BridgeError::UnsupportedRoute(direction.to_string()))?;
    let route = Route::resolve(source, destination)?;

    let recipient: Address = body
        .to
        .trim()
        .parse()
        .map_err(|e| BridgeError::InvalidAddress(format!("{:?}: {e}", body.to)))?;
    let amount = parse_usdc(&body.amount)?;

    let request = TransferRequest::builder()
        .route(route)
        .recipient(recipient)
        .amount(amount)
        .build();

    relay.execute(&request).await
}

/// Maps the error taxonomy onto the HTTP contract.
///
/// Deterministic rejections (bad direction, bad input, guard failures) are
/// the caller's problem and return 400; everything downstream of a chain
/// call returns 500.
pub(crate) fn error_response(e: &BridgeError) -> Response {
    let status = if e.is_rejected_before_submission() {
        warn!(error = %e, event = "request_rejected");
        StatusCode::BAD_REQUEST
    } else {
        error!(error = %e, event = "transfer_failed");
        StatusCode::INTERNAL_SERVER_ERROR
    };

    (
        status,
        Json(BridgeErrorBody {
            error: e.to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::U256;

    #[test]
    fn guard_rejections_are_client_errors() {
        assert_eq!(
            error_response(&BridgeError::BridgePaused).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(&BridgeError::InsufficientCapacity {
                requested: U256::from(2u64),
                available: U256::from(1u64),
            })
            .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(&BridgeError::UnsupportedRoute("eth-to-arb".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(&BridgeError::InvalidAmount("0".into())).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn execution_failures_are_server_errors() {
        for e in [
            BridgeError::SubmissionReverted {
                reason: "capacity race".into(),
            },
            BridgeError::ConfirmationTimeout { timeout_secs: 120 },
            BridgeError::RpcUnavailable("connection refused".into()),
            BridgeError::AllowanceApprovalFailed {
                reason: "reverted".into(),
            },
        ] {
            assert_eq!(
                error_response(&e).status(),
                StatusCode::INTERNAL_SERVER_ERROR,
                "{e}"
            );
        }
    }

    #[test]
    fn pause_and_capacity_bodies_match_the_contract() {
        insta::assert_snapshot!(
            serde_json::to_string(&BridgeErrorBody {
                error: BridgeError::BridgePaused.to_string()
            })
            .unwrap(),
            @r#"{"error":"Bridge paused"}"#
        );
        insta::assert_snapshot!(
            serde_json::to_string(&BridgeErrorBody {
                error: BridgeError::InsufficientCapacity {
                    requested: U256::from(2u64),
                    available: U256::from(1u64),
                }
                .to_string()
            })
            .unwrap(),
            @r#"{"error":"Amount exceeds available"}"#
        );
    }

    #[test]
    fn success_body_uses_the_tx_hash_field_name() {
        let body = BridgeSuccessBody {
            success: true,
            tx_hash: TxHash::from([0x12u8; 32]).to_string(),
        };
        insta::assert_snapshot!(
            serde_json::to_string(&body).unwrap(),
            @r#"{"success":true,"txHash":"0x1212121212121212121212121212121212121212121212121212121212121212"}"#
        );
    }
}
