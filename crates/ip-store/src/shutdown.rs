//! # Shutdown Signalling
//!
//! `stop()` never blocks. It hands back a [`StopHandle`] that resolves to
//! the teardown result exactly once, either by `.await` or by
//! [`StopHandle::wait_blocking`] from synchronous code. Once the result has
//! been handed out, further waits report [`IpStoreError::Stopped`].

use crate::domain::IpStoreError;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

type StopResult = Result<(), IpStoreError>;

/// Sending half, owned by the teardown task.
#[derive(Debug)]
pub struct StopSignal {
    tx: oneshot::Sender<StopResult>,
}

impl StopSignal {
    /// Deliver the teardown result. A caller that dropped its handle is ignored.
    pub fn complete(self, result: StopResult) {
        let _ = self.tx.send(result);
    }
}

/// Receiving half returned by `stop()`.
#[derive(Debug)]
#[must_use = "a StopHandle does nothing unless awaited or waited on"]
pub struct StopHandle {
    rx: oneshot::Receiver<StopResult>,
    delivered: bool,
}

impl StopHandle {
    /// Create a connected signal/handle pair.
    pub fn channel() -> (StopSignal, StopHandle) {
        let (tx, rx) = oneshot::channel();
        (
            StopSignal { tx },
            StopHandle {
                rx,
                delivered: false,
            },
        )
    }

    /// A handle that is already resolved.
    pub fn ready(result: StopResult) -> Self {
        let (signal, handle) = Self::channel();
        signal.complete(result);
        handle
    }

    /// Block the current thread until teardown finishes.
    ///
    /// # Panics
    ///
    /// Panics when called from within an async runtime; `.await` the handle there.
    pub fn wait_blocking(self) -> StopResult {
        if self.delivered {
            return Err(IpStoreError::Stopped);
        }
        self.rx.blocking_recv().unwrap_or_else(|_| Err(signal_dropped()))
    }

    /// Poll without blocking. Returns `Some` once, then `None`.
    pub fn try_result(&mut self) -> Option<StopResult> {
        if self.delivered {
            return None;
        }
        let result = match self.rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => Err(signal_dropped()),
        };
        self.delivered = true;
        Some(result)
    }
}

impl Future for StopHandle {
    type Output = StopResult;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.delivered {
            return Poll::Ready(Err(IpStoreError::Stopped));
        }
        let received = match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(received) => received,
            Poll::Pending => return Poll::Pending,
        };
        self.delivered = true;
        Poll::Ready(received.unwrap_or_else(|_| Err(signal_dropped())))
    }
}

fn signal_dropped() -> IpStoreError {
    IpStoreError::ShutdownFailure("teardown ended without reporting a result".to_string())
}
