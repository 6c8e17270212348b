//! Query session: one conversation, one turn at a time.
//!
//! A turn runs `Idle -> Connecting -> Streaming -> {Completed, Failed}` and
//! settles back to `Idle`. Every chunk is decoded and applied before the
//! next one is awaited, and every state change is published on a watch
//! channel for presentation layers.

use std::time::Duration;

use bytes::Bytes;
use futures::StreamExt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::adapters::ReqwestHttpClient;
use crate::client::AssistantClient;
use crate::error::{NetworkError, ReploitError, StreamError};
use crate::models::QueryRequest;
use crate::sse::{FrameResult, SseParser};
use crate::state::{SessionState, TurnPhase};
use crate::traits::{ByteStream, HttpClient};

/// Why a submission did not start a turn.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejected {
    #[error("nothing to send")]
    Empty,
    #[error("a query is already streaming")]
    Busy,
}

/// How a submitted turn ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// The stream ended normally. An in-band `error` event may still have
    /// set the banner.
    Completed,
    /// The transport failed, went idle or was cancelled.
    Failed(ReploitError),
    /// No turn was started; state is unchanged.
    Rejected(SubmitRejected),
}

impl TurnOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, TurnOutcome::Completed)
    }
}

/// Owns a conversation and drives its turns against the backend.
pub struct QuerySession<H: HttpClient = ReqwestHttpClient> {
    client: AssistantClient<H>,
    state: SessionState,
    idle_timeout: Option<Duration>,
    snapshots: watch::Sender<SessionState>,
}

impl<H: HttpClient> QuerySession<H> {
    /// Start a conversation, optionally opened by a synthetic greeting.
    pub fn new(client: AssistantClient<H>, greeting: Option<String>) -> Self {
        let state = match greeting {
            Some(greeting) => SessionState::with_greeting(greeting),
            None => SessionState::new(),
        };
        let (snapshots, _) = watch::channel(state.clone());
        Self {
            client,
            state,
            idle_timeout: None,
            snapshots,
        }
    }

    /// Abandon a turn when no chunk arrives within `timeout`.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_streaming(&self) -> bool {
        self.state.is_streaming
    }

    /// Receive a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.snapshots.subscribe()
    }

    /// Run one turn for `input` to completion.
    ///
    /// Empty input and submissions while a turn is streaming are rejected
    /// without touching state. Triggering `cancel` drops the transport and
    /// fails the turn with [`NetworkError::Cancelled`].
    pub async fn submit(&mut self, input: &str, cancel: &CancellationToken) -> TurnOutcome {
        let request = match self.begin_turn(input) {
            Ok(request) => request,
            Err(rejected) => {
                tracing::debug!("Submission rejected: {}", rejected);
                return TurnOutcome::Rejected(rejected);
            }
        };

        let mut turn = ActiveTurn {
            session: self,
            finished: false,
        };
        let result = turn.read(request, cancel).await;
        turn.complete(result)
    }

    fn begin_turn(&mut self, input: &str) -> Result<QueryRequest, SubmitRejected> {
        if input.trim().is_empty() {
            return Err(SubmitRejected::Empty);
        }
        if self.state.is_streaming {
            return Err(SubmitRejected::Busy);
        }

        let request = QueryRequest::new(input, self.state.log.history().to_vec());
        self.state.begin_turn(input);
        self.publish();
        tracing::info!("Turn started ({} messages of history)", request.history.len());
        Ok(request)
    }

    fn apply_frames(&mut self, results: Vec<FrameResult>) {
        for result in results {
            match result {
                Ok(event) => {
                    tracing::debug!("Dispatching {} event", event.event_type_name());
                    self.state.apply(&event);
                }
                Err(e) => {
                    let err = StreamError::from(e);
                    tracing::warn!("Dropping frame [{}]: {}", err.error_code(), err);
                    self.state.record_decode_error();
                }
            }
            self.publish();
        }
    }

    fn finish(&mut self, phase: TurnPhase, error: Option<String>) {
        self.state.finish_turn(phase, error);
        self.publish();
        self.state.settle();
        self.publish();
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.state.clone());
    }
}

/// A turn in flight. Dropping it before `complete` fails the turn so the
/// streaming gate is never left raised.
struct ActiveTurn<'a, H: HttpClient> {
    session: &'a mut QuerySession<H>,
    finished: bool,
}

impl<'a, H: HttpClient> ActiveTurn<'a, H> {
    async fn read(
        &mut self,
        request: QueryRequest,
        cancel: &CancellationToken,
    ) -> Result<(), ReploitError> {
        let session = &mut *self.session;

        let mut body = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(NetworkError::Cancelled.into()),
            result = session.client.stream_query(&request) => result?,
        };
        session.state.mark_streaming();
        session.publish();

        let mut parser = SseParser::new();
        loop {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(NetworkError::Cancelled.into()),
                next = next_chunk(&mut body, session.idle_timeout) => next?,
            };

            match next {
                Some(chunk) => session.apply_frames(parser.feed(&chunk)),
                None => {
                    session.apply_frames(parser.finish());
                    return Ok(());
                }
            }
        }
    }

    fn complete(mut self, result: Result<(), ReploitError>) -> TurnOutcome {
        self.finished = true;
        let session = &mut *self.session;

        match result {
            Ok(()) => {
                tracing::info!("Turn completed");
                session.finish(TurnPhase::Completed, None);
                TurnOutcome::Completed
            }
            Err(err) => {
                if err.is_cancellation() {
                    tracing::info!("Turn cancelled");
                } else {
                    tracing::error!(
                        "Turn failed [{} {}]: {}",
                        err.category(),
                        err.error_code(),
                        err
                    );
                }
                session.finish(TurnPhase::Failed, Some(err.user_message()));
                TurnOutcome::Failed(err)
            }
        }
    }
}

impl<'a, H: HttpClient> Drop for ActiveTurn<'a, H> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!("Turn dropped while in flight");
            self.session.finish(
                TurnPhase::Failed,
                Some(NetworkError::Cancelled.user_message()),
            );
        }
    }
}

async fn next_chunk(
    body: &mut ByteStream,
    idle_timeout: Option<Duration>,
) -> Result<Option<Bytes>, ReploitError> {
    let next = match idle_timeout {
        Some(limit) => tokio::time::timeout(limit, body.next())
            .await
            .map_err(|_| StreamError::IdleTimeout { limit })?,
        None => body.next().await,
    };

    match next {
        Some(Ok(chunk)) => Ok(Some(chunk)),
        Some(Err(e)) => Err(StreamError::ConnectionLost {
            message: e.to_string(),
        }
        .into()),
        None => Ok(None),
    }
}
