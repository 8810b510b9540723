// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Background copy workers so the UI thread never blocks on I/O.
//!
//! Jobs go in through one channel and outcomes come back through another;
//! the UI drains outcomes with [`CopyWorker::try_recv`] once per frame.

use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, SendError, Sender};

use crate::utils::temp_file::{
    ByteSource, CopyError, CopyOptions, TemporaryFile, copy_to_temporary_file_with,
};

/// One copy request. `id` is echoed back in the matching [`CopyOutcome`].
pub struct CopyJob {
    pub id: u64,
    pub source: Box<dyn ByteSource + Send>,
    pub options: CopyOptions,
}

/// Result of a finished [`CopyJob`].
#[derive(Debug)]
pub struct CopyOutcome {
    pub id: u64,
    pub result: Result<TemporaryFile, CopyError>,
}

/// Pool of threads running copies off the calling thread.
pub struct CopyWorker {
    job_tx: Option<Sender<CopyJob>>,
    outcome_rx: Receiver<CopyOutcome>,
    handles: Vec<JoinHandle<()>>,
}

impl Default for CopyWorker {
    fn default() -> Self {
        let threads = std::thread::available_parallelism()
            .map(|n| n.get().max(2))
            .unwrap_or(2);
        Self::new(threads)
    }
}

impl CopyWorker {
    /// Spawn `threads` workers (at least one).
    pub fn new(threads: usize) -> Self {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<CopyJob>();
        let (outcome_tx, outcome_rx) = crossbeam_channel::unbounded::<CopyOutcome>();

        let handles = (0..threads.max(1))
            .map(|_| {
                let job_rx = job_rx.clone();
                let outcome_tx = outcome_tx.clone();
                std::thread::spawn(move || {
                    for job in job_rx.iter() {
                        let _ = outcome_tx.send(run_job(job));
                    }
                })
            })
            .collect();

        Self {
            job_tx: Some(job_tx),
            outcome_rx,
            handles,
        }
    }

    /// Queue a job. Fails only when every worker thread has exited.
    pub fn submit(&self, job: CopyJob) -> Result<(), SendError<CopyJob>> {
        match &self.job_tx {
            Some(tx) => tx.send(job),
            None => Err(SendError(job)),
        }
    }

    /// Next finished outcome, if any, without blocking.
    pub fn try_recv(&self) -> Option<CopyOutcome> {
        self.outcome_rx.try_recv().ok()
    }

    /// Block until the next outcome arrives.
    pub fn recv(&self) -> Option<CopyOutcome> {
        self.outcome_rx.recv().ok()
    }
}

impl Drop for CopyWorker {
    fn drop(&mut self) {
        // Closing the job channel ends each worker loop.
        self.job_tx.take();
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                log::error!("Copy worker thread panicked");
            }
        }
    }
}

fn run_job(mut job: CopyJob) -> CopyOutcome {
    log::debug!("Running copy job {}", job.id);
    let result = copy_to_temporary_file_with(Some(&mut *job.source), &job.options);
    if let Err(err) = &result {
        log::warn!("Copy job {} failed: {err}", job.id);
    }
    CopyOutcome { id: job.id, result }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::fs;
    use std::io::Cursor;

    use tempfile::TempDir;

    use super::{CopyJob, CopyWorker};
    use crate::utils::temp_file::CopyOptions;

    #[test]
    fn jobs_are_copied_and_reported_by_id() {
        let tmp = TempDir::new().unwrap();
        let options = CopyOptions {
            extension: "bin".into(),
            temp_dir: tmp.path().to_path_buf(),
            ..Default::default()
        };
        let worker = CopyWorker::new(2);

        for id in 0..4u64 {
            worker
                .submit(CopyJob {
                    id,
                    source: Box::new(Cursor::new(vec![id as u8; 16])),
                    options: options.clone(),
                })
                .unwrap();
        }

        let mut outcomes = HashMap::new();
        for _ in 0..4 {
            let outcome = worker.recv().expect("worker alive");
            outcomes.insert(outcome.id, outcome.result.expect("copy succeeds"));
        }

        assert_eq!(outcomes.len(), 4);
        for (id, file) in &outcomes {
            assert_eq!(fs::read(file.path()).unwrap(), vec![*id as u8; 16]);
        }
        assert!(worker.try_recv().is_none());
    }
}
