//! Trailing-edge debouncing for rapid selection changes.
//!
//! Values arriving within one window of each other collapse into the last
//! one; it is forwarded once the input has been quiet for the whole window.
//! [`Debouncer::flush`] forwards it early, for callers that must order other
//! events after the latest value.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::{D2cError, Result};

/// Sender half plus the background task that coalesces values.
pub struct Debouncer<T> {
    input: mpsc::Sender<T>,
    flushes: mpsc::Sender<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the coalescing task; settled values arrive on the returned receiver.
    pub fn spawn(window: Duration, capacity: usize) -> (Self, mpsc::Receiver<T>) {
        let (input, rx) = mpsc::channel(capacity.max(1));
        let (flushes, flush_rx) = mpsc::channel(1);
        let (output, settled) = mpsc::channel(capacity.max(1));
        let task = tokio::spawn(run(rx, flush_rx, output, window));
        (
            Self {
                input,
                flushes,
                task,
            },
            settled,
        )
    }

    /// Queue a value. Fails only once the task has stopped.
    pub async fn push(&self, value: T) -> std::result::Result<(), mpsc::error::SendError<T>> {
        self.input.send(value).await
    }

    /// Forward the pending value without waiting out the window. Resolves once
    /// every value pushed before this call has reached the output channel.
    pub async fn flush(&self) -> Result<()> {
        let (ack, done) = oneshot::channel();
        self.flushes
            .send(ack)
            .await
            .map_err(|_| D2cError::pipeline("debouncer stopped"))?;
        done.await.map_err(|_| D2cError::pipeline("debouncer stopped"))
    }

    /// Stop accepting input; a pending value is still flushed.
    pub async fn close(self) {
        drop(self.input);
        drop(self.flushes);
        let _ = self.task.await;
    }
}

async fn run<T>(
    mut input: mpsc::Receiver<T>,
    mut flushes: mpsc::Receiver<oneshot::Sender<()>>,
    output: mpsc::Sender<T>,
    window: Duration,
) {
    let mut pending: Option<T> = None;
    let mut coalesced = 0usize;
    loop {
        // Input is polled first so a flush never overtakes an earlier push.
        tokio::select! {
            biased;
            next = input.recv() => match next {
                Some(value) => {
                    if pending.replace(value).is_some() {
                        coalesced += 1;
                    }
                }
                None => break,
            },
            Some(ack) = flushes.recv() => {
                if !settle(&mut pending, &mut coalesced, &output).await {
                    return;
                }
                let _ = ack.send(());
            }
            _ = tokio::time::sleep(window), if pending.is_some() => {
                if !settle(&mut pending, &mut coalesced, &output).await {
                    return;
                }
            }
        }
    }
    settle(&mut pending, &mut coalesced, &output).await;
}

/// Send the pending value, if any. False once the receiver is gone.
async fn settle<T>(
    pending: &mut Option<T>,
    coalesced: &mut usize,
    output: &mpsc::Sender<T>,
) -> bool {
    let Some(value) = pending.take() else {
        return true;
    };
    if *coalesced > 0 {
        debug!(coalesced = *coalesced, "debounced rapid changes");
        *coalesced = 0;
    }
    output.send(value).await.is_ok()
}
