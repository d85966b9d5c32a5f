// SPDX-FileCopyrightText: 2026 Modmail Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP interactions endpoint.
//!
//! Discord POSTs each interaction, signed with the application's Ed25519
//! key, and expects the initial response as the HTTP body within three
//! seconds. The event is dispatched on its own task; the handler's first
//! `respond` call is routed back to the waiting request through
//! [`PendingResponses`]. Follow-ups still go over REST.

use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::{
    Json, Router,
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use http_body::{Frame, SizeHint};
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde_json::{Value, json};
use serenity::all::Interaction;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use modmail_core::ModmailError;
use modmail_interactions::Dispatcher;

use crate::{PendingReply, PendingResponses, convert};

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Discord drops interactions not answered within this window.
pub const RESPONSE_DEADLINE: Duration = Duration::from_secs(3);

const PING: u64 = 1;
const PONG: u64 = 1;

/// Shared state for the endpoint handler.
#[derive(Clone)]
pub struct EndpointState {
    pub dispatcher: Arc<Dispatcher>,
    pub pending: PendingResponses,
    pub public_key: VerifyingKey,
}

/// Listener settings (mirrors the `http_server` config section).
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    pub address: String,
    pub port: u16,
    pub path: String,
}

/// Parses the hex-encoded application public key.
pub fn parse_public_key(hex_key: &str) -> Result<VerifyingKey, ModmailError> {
    let bytes = hex::decode(hex_key.trim())
        .map_err(|e| ModmailError::Config(format!("discord.pub_key is not valid hex: {e}")))?;
    let bytes: [u8; 32] = bytes.try_into().map_err(|b: Vec<u8>| {
        ModmailError::Config(format!(
            "discord.pub_key must be 32 bytes, got {}",
            b.len()
        ))
    })?;
    VerifyingKey::from_bytes(&bytes)
        .map_err(|e| ModmailError::Config(format!("discord.pub_key is not a valid key: {e}")))
}

/// Checks the request signature over `timestamp || body`.
pub fn verify_request(key: &VerifyingKey, headers: &HeaderMap, body: &[u8]) -> bool {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());
    let (Some(signature), Some(timestamp)) = (header(SIGNATURE_HEADER), header(TIMESTAMP_HEADER))
    else {
        return false;
    };
    let Ok(signature) = hex::decode(signature) else {
        return false;
    };
    let Ok(signature) = Signature::from_slice(&signature) else {
        return false;
    };

    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);
    key.verify(&message, &signature).is_ok()
}

pub fn router(path: &str, state: EndpointState) -> Router {
    Router::new()
        .route(path, post(handle_interaction))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn handle_interaction(
    State(state): State<EndpointState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !verify_request(&state.public_key, &headers, &body) {
        debug!("rejected interaction with bad signature");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let raw: Value = match serde_json::from_slice(&body) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "interaction body is not JSON");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    if raw.get("type").and_then(Value::as_u64) == Some(PING) {
        return Json(json!({ "type": PONG })).into_response();
    }

    let interaction: Interaction = match serde_json::from_value(raw) {
        Ok(interaction) => interaction,
        Err(e) => {
            warn!(error = %e, "failed to decode interaction");
            return StatusCode::BAD_REQUEST.into_response();
        }
    };
    let Some(event) = convert::interaction_event(&interaction) else {
        debug!(kind = ?interaction.kind(), "ignoring unsupported interaction kind");
        return StatusCode::BAD_REQUEST.into_response();
    };

    let key = event.id.get();
    let (tx, rx) = oneshot::channel();
    state.pending.insert(key, tx);

    let pending = Arc::clone(&state.pending);
    let dispatcher = Arc::clone(&state.dispatcher);
    tokio::spawn(async move {
        if let Err(e) = dispatcher.dispatch(&event).await {
            error!(error = %e, interaction_id = %event.id, "interaction handler failed");
        }
        // Unanswered: drop the sender so the request stops waiting.
        pending.remove(&key);
    });

    match tokio::time::timeout(RESPONSE_DEADLINE, rx).await {
        Ok(Ok(reply)) => written_response(reply),
        Ok(Err(_)) => {
            debug!(interaction_id = key, "handler produced no initial response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
        Err(_) => {
            state.pending.remove(&key);
            warn!(interaction_id = key, "no initial response within the deadline");
            StatusCode::GATEWAY_TIMEOUT.into_response()
        }
    }
}

/// JSON response whose body reports back once the connection has taken it.
fn written_response(reply: PendingReply) -> Response {
    let data = match serde_json::to_vec(&reply.body) {
        Ok(data) => data,
        Err(e) => {
            error!(error = %e, "failed to encode interaction response");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };
    let body = WrittenBody {
        data: Some(Bytes::from(data)),
        written: Some(reply.written),
    };
    (
        [(header::CONTENT_TYPE, "application/json")],
        Body::new(body),
    )
        .into_response()
}

/// Single-chunk body that fires `written` after its data has been polled.
///
/// Dropping it early drops `written`, so the responder sees the request
/// as closed.
struct WrittenBody {
    data: Option<Bytes>,
    written: Option<oneshot::Sender<()>>,
}

impl http_body::Body for WrittenBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Bytes>, Infallible>>> {
        let this = self.get_mut();
        if let Some(data) = this.data.take() {
            return Poll::Ready(Some(Ok(Frame::data(data))));
        }
        if let Some(written) = this.written.take() {
            let _ = written.send(());
        }
        Poll::Ready(None)
    }

    fn is_end_stream(&self) -> bool {
        self.data.is_none() && self.written.is_none()
    }

    fn size_hint(&self) -> SizeHint {
        let len = self.data.as_ref().map_or(0, |data| data.len() as u64);
        SizeHint::with_exact(len)
    }
}

/// Serves the endpoint until `cancel` fires.
pub async fn serve(
    config: &EndpointConfig,
    state: EndpointState,
    cancel: CancellationToken,
) -> Result<(), ModmailError> {
    let addr = format!("{}:{}", config.address, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ModmailError::Transport {
            message: format!("failed to bind interactions endpoint to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    info!("interactions endpoint listening on http://{addr}{}", config.path);

    axum::serve(listener, router(&config.path, state))
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| ModmailError::Transport {
            message: format!("interactions endpoint error: {e}"),
            source: Some(Box::new(e)),
        })
}
