use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Handle to a running background poller.
///
/// `stop` requests a graceful shutdown and waits for the task. Dropping the
/// handle without calling `stop` signals the task and aborts it if it is
/// still running.
#[derive(Debug)]
pub struct PollHandle {
    inner: Option<JoinHandle<()>>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl PollHandle {
    /// Wrap a spawned task and its stop channel.
    #[must_use]
    pub const fn new(inner: JoinHandle<()>, stop_tx: oneshot::Sender<()>) -> Self {
        Self {
            inner: Some(inner),
            stop_tx: Some(stop_tx),
        }
    }

    /// Return `true` if the poller task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.inner.as_ref().is_none_or(JoinHandle::is_finished)
    }

    /// Signal the poller to stop and wait for it to finish.
    pub async fn stop(mut self) {
        self.signal_stop();
        if let Some(h) = self.inner.take() {
            let _ = h.await;
        }
    }

    /// Abort the poller immediately without waiting for the current cycle.
    pub fn abort(mut self) {
        if let Some(h) = self.inner.take() {
            h.abort();
        }
    }

    // The receiver may already be gone if the task exited on its own.
    fn signal_stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.signal_stop();
        if let Some(h) = self.inner.take()
            && !h.is_finished()
        {
            h.abort();
        }
    }
}
