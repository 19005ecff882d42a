//! Background typing worker.
//!
//! The sequencer blocks its thread for the whole key delay of every event,
//! so a long message holds a thread for seconds.  [`TypingWorker`] runs each
//! job on Tokio's blocking pool and hands back a [`TypingHandle`] that the
//! async side can cancel or await.
//!
//! # Cancellation (for beginners)
//!
//! A job and its handle share an `Arc<AtomicBool>`.  `cancel()` sets the
//! flag; the sequencer checks it before every character and the chat
//! dispatcher before every message.  A key that is already down is always
//! released before the job notices, so cancelling never leaves a key stuck.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

use crate::application::{
    dispatch_chat::{ChatDispatcher, DispatchError, DispatchReport},
    type_text::{SequenceError, TypeOutcome},
};

/// Error type for worker jobs.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// The blocking task panicked or was aborted.
    #[error("typing task failed: {0}")]
    Join(#[from] JoinError),
}

/// A unit of work for the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingJob {
    /// Type a string character by character.
    Type(String),
    /// Tap named keys in order.
    Tap(Vec<String>),
    /// Run the chat macro for a list of messages.
    Chat(Vec<String>),
}

/// What a finished job did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobOutcome {
    Typed(TypeOutcome),
    Tapped { tapped: usize, cancelled: bool },
    Chat(DispatchReport),
}

impl JobOutcome {
    pub fn is_cancelled(&self) -> bool {
        match self {
            JobOutcome::Typed(outcome) => outcome.is_cancelled(),
            JobOutcome::Tapped { cancelled, .. } => *cancelled,
            JobOutcome::Chat(report) => report.cancelled,
        }
    }
}

/// Runs typing jobs off the async executor.
#[derive(Clone)]
pub struct TypingWorker {
    dispatcher: Arc<ChatDispatcher>,
}

impl TypingWorker {
    pub fn new(dispatcher: Arc<ChatDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Starts `job` on the blocking pool.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(&self, job: TypingJob) -> TypingHandle {
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let dispatcher = Arc::clone(&self.dispatcher);

        let join = tokio::task::spawn_blocking(move || run_job(&dispatcher, job, &flag));

        TypingHandle { cancel, join }
    }
}

/// Handle to a running job.
pub struct TypingHandle {
    cancel: Arc<AtomicBool>,
    join: JoinHandle<Result<JobOutcome, WorkerError>>,
}

impl TypingHandle {
    /// Asks the job to stop at the next character boundary.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Shared cancel flag, for wiring into signal handlers.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Waits for the job to finish.
    ///
    /// # Errors
    ///
    /// The job's own error, or [`WorkerError::Join`] if the task panicked.
    pub async fn wait(self) -> Result<JobOutcome, WorkerError> {
        self.join.await?
    }
}

fn run_job(
    dispatcher: &ChatDispatcher,
    job: TypingJob,
    cancel: &AtomicBool,
) -> Result<JobOutcome, WorkerError> {
    let sequencer = dispatcher.sequencer();

    let outcome = match job {
        TypingJob::Type(text) => JobOutcome::Typed(sequencer.type_text_until(&text, cancel)?),
        TypingJob::Tap(keys) => {
            let mut tapped = 0;
            let mut cancelled = false;
            for key in &keys {
                if cancel.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
                sequencer.tap(key)?;
                tapped += 1;
            }
            JobOutcome::Tapped { tapped, cancelled }
        }
        TypingJob::Chat(messages) => JobOutcome::Chat(dispatcher.dispatch(&messages, cancel)?),
    };

    if outcome.is_cancelled() {
        info!(?outcome, "typing job cancelled");
    } else {
        debug!(?outcome, "typing job finished");
    }
    Ok(outcome)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
