//! Worker threads for llama.
//!
//! Preview loading and the delayed search-clear timer run off the event loop.
//! Requests [WorkerTask] come in from the AppState via channels, and results
//! [WorkerResponse] go back on a single response channel that the event loop
//! drains between frames. The AppState is the only writer of model state; a
//! response is applied only if its id is still current.
//!
//! # Caution:
//! This module is a protocol boundary. Adding or editing variants may require
//! corresponding changes in the response handling of the AppState.

use crate::core::preview::{PreviewContent, load_preview};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

/// Manages worker thread channels for the different task types.
///
/// Each task type has its own dedicated thread. The preview worker coalesces
/// queued requests so only the newest selection is loaded when the cursor
/// moves faster than files can be read.
pub struct Workers {
    preview_tx: Sender<WorkerTask>,
    timer_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
}

impl Workers {
    /// Create the worker set and spawn the preview and timer threads.
    pub fn spawn() -> Self {
        let (preview_tx, preview_rx) = unbounded::<WorkerTask>();
        let (timer_tx, timer_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_preview_worker(preview_rx, res_tx.clone());
        start_timer_worker(timer_rx, res_tx);

        Self {
            preview_tx,
            timer_tx,
            response_rx,
        }
    }

    /// Accessor for the preview worker task sender.
    pub fn preview_tx(&self) -> &Sender<WorkerTask> {
        &self.preview_tx
    }

    /// Accessor for the timer worker task sender.
    pub fn timer_tx(&self) -> &Sender<WorkerTask> {
        &self.timer_tx
    }

    /// Accessor for the worker response receiver.
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }
}

/// Tasks sent to the worker threads.
#[derive(Debug)]
pub enum WorkerTask {
    LoadPreview {
        path: PathBuf,
        max_bytes: u64,
        request_id: u64,
    },
    /// Ask for a [WorkerResponse::SearchExpired] once `delay` has passed.
    ClearSearch { session_id: u64, delay: Duration },
}

/// Responses sent from the worker threads back to the event loop.
#[derive(Debug)]
pub enum WorkerResponse {
    PreviewLoaded {
        path: PathBuf,
        content: PreviewContent,
        request_id: u64,
    },
    SearchExpired {
        session_id: u64,
    },
}

/// Starts the preview worker thread.
///
/// # Arguments
/// * `task_rx` - Receiver channel for incoming tasks
/// * `res_tx` - Sender channel for outgoing responses
fn start_preview_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::LoadPreview {
                mut path,
                mut max_bytes,
                mut request_id,
            } = task
            else {
                continue;
            };

            // Coalesce queued LoadPreview tasks to only process the latest
            while let Ok(next) = task_rx.try_recv() {
                if let WorkerTask::LoadPreview {
                    path: p,
                    max_bytes: m,
                    request_id: id,
                } = next
                {
                    path = p;
                    max_bytes = m;
                    request_id = id;
                }
            }

            let content = load_preview(&path, max_bytes);
            if res_tx
                .send(WorkerResponse::PreviewLoaded {
                    path,
                    content,
                    request_id,
                })
                .is_err()
            {
                break;
            }
        }
    });
}

/// Starts the timer worker thread.
///
/// Keeps every pending deadline and fires them in order. Timers are never
/// cancelled; a stale one is ignored by the session id check on arrival.
fn start_timer_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>) {
    thread::spawn(move || {
        let mut pending: Vec<(Instant, u64)> = Vec::new();
        loop {
            let now = Instant::now();
            let mut i = 0;
            while i < pending.len() {
                if pending[i].0 <= now {
                    let (_, session_id) = pending.swap_remove(i);
                    if res_tx
                        .send(WorkerResponse::SearchExpired { session_id })
                        .is_err()
                    {
                        return;
                    }
                } else {
                    i += 1;
                }
            }

            let next_deadline = pending.iter().map(|(deadline, _)| *deadline).min();
            let task = match next_deadline {
                Some(deadline) => {
                    match task_rx.recv_timeout(deadline.saturating_duration_since(now)) {
                        Ok(task) => task,
                        Err(RecvTimeoutError::Timeout) => continue,
                        Err(RecvTimeoutError::Disconnected) => return,
                    }
                }
                None => match task_rx.recv() {
                    Ok(task) => task,
                    Err(_) => return,
                },
            };

            if let WorkerTask::ClearSearch { session_id, delay } = task {
                pending.push((Instant::now() + delay, session_id));
            }
        }
    });
}
