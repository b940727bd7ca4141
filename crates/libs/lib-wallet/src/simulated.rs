//! In-process wallet backend.
//!
//! Scripted per wallet kind: approve with an account and network, reject with
//! a [`BackendError`], or hold a negotiation open until the caller releases
//! it. Used by the demo binary and by tests; unknown kinds answer
//! [`BackendError::NotInstalled`].

use std::collections::HashMap;
use std::time::Duration;

use async_channel::{Receiver, Sender};
use async_trait::async_trait;
use futures::stream::BoxStream;
use parking_lot::Mutex;
use shared::WalletKind;
use tokio::sync::oneshot;

use crate::backend::{BackendEvent, Negotiated, NegotiationRequest, WalletBackend};
use crate::error::BackendError;

#[derive(Debug, Default)]
enum Teardown {
    #[default]
    Succeed,
    Fail(BackendError),
    Hang,
}

#[derive(Debug)]
struct Hold {
    started: oneshot::Sender<()>,
    release: oneshot::Receiver<()>,
}

#[derive(Debug, Default)]
struct SimState {
    responses: HashMap<WalletKind, Result<Negotiated, BackendError>>,
    holds: HashMap<WalletKind, Hold>,
    negotiations: Vec<WalletKind>,
    disconnects: usize,
    teardown: Teardown,
}

/// Handle on a negotiation held open by [`SimulatedBackend::hold`].
#[derive(Debug)]
pub struct NegotiationGate {
    started: Option<oneshot::Receiver<()>>,
    release: Option<oneshot::Sender<()>>,
}

impl NegotiationGate {
    /// Resolves once the held negotiation has been entered.
    pub async fn started(&mut self) {
        if let Some(rx) = self.started.take() {
            let _ = rx.await;
        }
    }

    /// Let the held negotiation answer with the scripted response.
    pub fn release(mut self) {
        if let Some(tx) = self.release.take() {
            let _ = tx.send(());
        }
    }
}

#[derive(Debug)]
pub struct SimulatedBackend {
    state: Mutex<SimState>,
    latency: Duration,
    events_tx: Sender<BackendEvent>,
    events_rx: Receiver<BackendEvent>,
}

impl Default for SimulatedBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedBackend {
    pub fn new() -> Self {
        let (events_tx, events_rx) = async_channel::unbounded();
        Self {
            state: Mutex::new(SimState::default()),
            latency: Duration::ZERO,
            events_tx,
            events_rx,
        }
    }

    /// Delay every negotiation and teardown, like a user clicking through a
    /// wallet popup.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn approve(&self, kind: impl Into<WalletKind>, negotiated: Negotiated) {
        self.state.lock().responses.insert(kind.into(), Ok(negotiated));
    }

    pub fn reject(&self, kind: impl Into<WalletKind>, error: BackendError) {
        self.state.lock().responses.insert(kind.into(), Err(error));
    }

    /// Hold the next negotiation of `kind` until the gate is released.
    pub fn hold(&self, kind: impl Into<WalletKind>) -> NegotiationGate {
        let (started_tx, started_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.state.lock().holds.insert(
            kind.into(),
            Hold {
                started: started_tx,
                release: release_rx,
            },
        );
        NegotiationGate {
            started: Some(started_rx),
            release: Some(release_tx),
        }
    }

    pub fn fail_teardown(&self, error: BackendError) {
        self.state.lock().teardown = Teardown::Fail(error);
    }

    /// Make `disconnect` never answer.
    pub fn hang_teardown(&self) {
        self.state.lock().teardown = Teardown::Hang;
    }

    /// Push a backend notification to the event stream.
    pub fn emit(&self, event: BackendEvent) {
        let _ = self.events_tx.try_send(event);
    }

    /// End the event stream.
    pub fn close_events(&self) {
        self.events_tx.close();
    }

    /// Wallet kinds negotiated so far, in call order.
    pub fn negotiations(&self) -> Vec<WalletKind> {
        self.state.lock().negotiations.clone()
    }

    pub fn disconnect_count(&self) -> usize {
        self.state.lock().disconnects
    }
}

#[async_trait]
impl WalletBackend for SimulatedBackend {
    async fn negotiate(&self, request: NegotiationRequest<'_>) -> Result<Negotiated, BackendError> {
        let hold = {
            let mut state = self.state.lock();
            state.negotiations.push(request.kind.clone());
            state.holds.remove(request.kind)
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(hold) = hold {
            let _ = hold.started.send(());
            let _ = hold.release.await;
        }

        let response = self.state.lock().responses.get(request.kind).cloned();
        response.unwrap_or_else(|| Err(BackendError::NotInstalled(request.kind.clone())))
    }

    async fn disconnect(&self) -> Result<(), BackendError> {
        let outcome = {
            let mut state = self.state.lock();
            state.disconnects += 1;
            match &state.teardown {
                Teardown::Succeed => Some(Ok(())),
                Teardown::Fail(e) => Some(Err(e.clone())),
                Teardown::Hang => None,
            }
        };

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match outcome {
            Some(result) => result,
            None => futures::future::pending().await,
        }
    }

    fn events(&self) -> BoxStream<'static, BackendEvent> {
        Box::pin(self.events_rx.clone())
    }
}
