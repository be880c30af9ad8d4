//! Long-poll event dispatcher
//!
//! The gateway pushes asynchronous events (plugin results, offers, keep
//! alives) through a blocking `GET /{session}`. [`Session::long_poll`]
//! issues those requests one after another, classifies each envelope into
//! an [`Event`] and hands it to a [`LongPollHandler`].

use async_trait::async_trait;
use reqwest::Method;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::protocol::{Envelope, Jsep, STATUS_PREPARING};
use crate::session::Session;

/// Long-poll loop state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No loop running
    Idle,
    /// A loop is waiting on or dispatching an event
    Polling,
    /// The session was closed
    Terminated,
}

/// A classified long-poll event
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The streaming plugin prepared an offer
    StreamingPreparing {
        /// Transaction of the request that triggered the offer
        transaction: Option<String>,
        /// The offer
        jsep: Jsep,
    },
    /// A plugin result with a status nothing handles
    Status {
        /// Plugin name
        plugin: String,
        /// Reported status, if any
        status: Option<String>,
        /// Raw envelope
        envelope: Envelope,
    },
    /// An event without plugin payload (ack, keepalive, webrtcup...)
    Unknown(Envelope),
}

impl Event {
    /// Classify an envelope returned by a long poll
    ///
    /// Fails when the plugin reports an error, or when a `preparing`
    /// result comes without `jsep`.
    pub fn classify(envelope: Envelope) -> Result<Event> {
        if envelope.plugin_payload().is_none() {
            return Ok(Event::Unknown(envelope));
        }
        envelope.check_plugin_error()?;

        let status = envelope
            .plugin_payload()
            .and_then(|payload| payload.status())
            .map(str::to_string);
        if status.as_deref() == Some(STATUS_PREPARING) {
            let jsep = envelope.jsep.ok_or(Error::MissingJsep)?;
            return Ok(Event::StreamingPreparing {
                transaction: envelope.transaction,
                jsep,
            });
        }

        let plugin = envelope
            .plugin_data
            .as_ref()
            .map(|p| p.plugin.clone())
            .unwrap_or_default();
        Ok(Event::Status {
            plugin,
            status,
            envelope,
        })
    }
}

/// Callbacks invoked by [`Session::long_poll`]
///
/// Every method defaults to a no-op. An error returned by a callback stops
/// the loop and is returned as [`Error::Callback`].
#[async_trait]
pub trait LongPollHandler: Send {
    /// The streaming plugin sent an offer for the request tagged `transaction`
    async fn streaming_preparing(
        &mut self,
        _transaction: Option<String>,
        _jsep: Jsep,
    ) -> anyhow::Result<()> {
        Ok(())
    }

    /// An event without plugin payload arrived
    async fn unknown(&mut self, _envelope: Envelope) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Clears the polling flag when the loop exits, even if its future is dropped
struct PollGuard<'a>(&'a AtomicBool);

impl Drop for PollGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl Session {
    /// Get the long-poll state
    pub fn poll_state(&self) -> PollState {
        if self.polling.load(Ordering::SeqCst) {
            PollState::Polling
        } else if self.is_closed() {
            PollState::Terminated
        } else {
            PollState::Idle
        }
    }

    /// Wait for the next event and classify it, without dispatching it
    pub async fn poll(&self) -> Result<Event> {
        let envelope = self
            .client
            .send(Method::GET, &self.path(), None, &self.cancel)
            .await?;
        Event::classify(envelope)
    }

    /// Poll events until an error occurs
    ///
    /// Events are dispatched in the order the gateway returns them. The
    /// loop never ends on its own: it returns the first transport, gateway,
    /// classification or callback error, or [`Error::Cancelled`] once the
    /// session is closed. Only one loop may run per session.
    pub async fn long_poll<H: LongPollHandler>(&self, handler: &mut H) -> Result<()> {
        if self.is_closed() {
            return Err(Error::Cancelled);
        }
        if self
            .polling
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(Error::AlreadyPolling(self.id().0));
        }
        let _guard = PollGuard(&self.polling);

        debug!("Long polling session {}", self.id());

        loop {
            let result = self.poll().await;

            // Closing wins over whatever the last round trip returned
            if self.is_closed() {
                debug!("Long poll of session {} cancelled", self.id());
                return Err(Error::Cancelled);
            }

            if let Err(err) = self.dispatch(result?, handler).await {
                warn!("Long poll of session {} failed: {}", self.id(), err);
                return Err(err);
            }
        }
    }

    async fn dispatch<H: LongPollHandler>(&self, event: Event, handler: &mut H) -> Result<()> {
        match event {
            Event::StreamingPreparing { transaction, jsep } => {
                debug!(
                    "Session {}: streaming preparing, transaction={:?}",
                    self.id(),
                    transaction
                );
                handler
                    .streaming_preparing(transaction, jsep)
                    .await
                    .map_err(Error::Callback)
            }
            Event::Unknown(envelope) => {
                debug!("Session {}: {} event", self.id(), envelope.janus);
                handler.unknown(envelope).await.map_err(Error::Callback)
            }
            Event::Status { plugin, status, .. } => {
                debug!(
                    "Session {}: ignoring {} status {:?}",
                    self.id(),
                    plugin,
                    status
                );
                Ok(())
            }
        }
    }
}
