// Scoped recorder - session lifecycle with guaranteed release

use std::future::Future;
use std::path::Path;

use tracing::{debug, warn};

use super::errors::{AdapterError, DispatchError};
use super::models::FetchedItem;
use super::traits::{RecordSink, RecorderFactory, RecorderOptions};

/// An open recording session. Owned by one dispatch call; the sink is
/// closed exactly once, on every exit path, by [`with_session`].
pub struct RecordingSession {
    sink: Box<dyn RecordSink>,
    records_written: u64,
    closed: bool,
}

impl RecordingSession {
    fn new(sink: Box<dyn RecordSink>) -> Self {
        Self {
            sink,
            records_written: 0,
            closed: false,
        }
    }

    pub async fn write(&mut self, item: &FetchedItem) -> Result<(), AdapterError> {
        self.sink.write(item).await?;
        self.records_written += 1;
        Ok(())
    }

    pub async fn write_all(&mut self, items: &[FetchedItem]) -> Result<(), AdapterError> {
        for item in items {
            self.write(item).await?;
        }
        Ok(())
    }

    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    async fn close(&mut self) -> Result<(), AdapterError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.sink.close().await
    }
}

/// Acquire a session from `factory`, run `body` with it, and close the
/// sink exactly once whether `body` succeeded or failed.
///
/// `body` receives the session by value and must hand it back alongside
/// its result; this keeps the release in one place without borrowing
/// gymnastics across the await.
///
/// Acquisition failure is fatal and `body` never runs.
pub async fn with_session<T, F, Fut>(
    factory: &dyn RecorderFactory,
    root: &Path,
    options: &RecorderOptions,
    body: F,
) -> Result<T, DispatchError>
where
    F: FnOnce(RecordingSession) -> Fut,
    Fut: Future<Output = (RecordingSession, Result<T, DispatchError>)>,
{
    let sink = factory
        .open(root, options)
        .await
        .map_err(DispatchError::Resource)?;
    debug!(label = %options.label, "recording session opened");

    let session = RecordingSession::new(sink);
    let (mut session, outcome) = body(session).await;

    let written = session.records_written();
    match session.close().await {
        Ok(()) => debug!(label = %options.label, written, "recording session closed"),
        Err(close_err) => {
            // A close failure must not mask the body's own error.
            if outcome.is_ok() {
                return Err(DispatchError::Adapter(close_err));
            }
            warn!(label = %options.label, error = %close_err, "failed to close recording session");
        }
    }

    outcome
}
