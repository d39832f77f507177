//! Background backup scheduler
//!
//! Runs a [`BackupManager`] on a dedicated thread. Every poll the worker
//! checks whether a full backup period has passed since the last bundle and
//! creates one if so, then sweeps expired files. Failures are reported and
//! retried on the next poll; only [`BackupScheduler::stop`] ends the loop.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use chrono::{DateTime, Local};
use tracing::{debug, error, info};

use super::manager::BackupManager;
use crate::archive::{ArchiveEncoder, ZipEncoder};
use crate::clock::{Clock, SystemClock};
use crate::config::parameters::BackupParameters;
use crate::error::{BackupError, BackupResult};
use crate::storage::filesystem::{Filesystem, LocalFilesystem};

/// How often the worker wakes up to check for due work
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Callback receiving every failure the background loop runs into
pub type ErrorHook = Arc<dyn Fn(&BackupError) + Send + Sync>;

/// Periodically backs up a set of files and expires old bundles
///
/// The parameters are snapshotted when the worker starts. Changing them via
/// [`parameters_mut`](Self::parameters_mut) while running only takes effect
/// after the next [`start`](Self::start) or [`restart`](Self::restart).
pub struct BackupScheduler {
    parameters: BackupParameters,
    encoder: Arc<dyn ArchiveEncoder>,
    filesystem: Arc<dyn Filesystem>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    error_hook: Option<ErrorHook>,
    worker: Option<WorkerHandle>,
}

struct WorkerHandle {
    stop: Sender<()>,
    thread: JoinHandle<()>,
}

impl BackupScheduler {
    /// Create a scheduler writing zip bundles to the local disk
    pub fn new(parameters: BackupParameters) -> Self {
        Self::with_capabilities(parameters, Arc::new(ZipEncoder), Arc::new(LocalFilesystem))
    }

    /// Create a scheduler with a custom encoder and filesystem
    pub fn with_capabilities(
        parameters: BackupParameters,
        encoder: Arc<dyn ArchiveEncoder>,
        filesystem: Arc<dyn Filesystem>,
    ) -> Self {
        Self {
            parameters,
            encoder,
            filesystem,
            clock: Arc::new(SystemClock),
            poll_interval: DEFAULT_POLL_INTERVAL,
            error_hook: None,
            worker: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Register a callback for failures inside the background loop
    ///
    /// Failures are always logged; the hook lets the host react to them too.
    pub fn with_error_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&BackupError) + Send + Sync + 'static,
    {
        self.error_hook = Some(Arc::new(hook));
        self
    }

    pub fn parameters(&self) -> &BackupParameters {
        &self.parameters
    }

    pub fn parameters_mut(&mut self) -> &mut BackupParameters {
        &mut self.parameters
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Whether the background loop is active
    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .map_or(false, |worker| !worker.thread.is_finished())
    }

    /// Start the background loop, restarting it if it is already running
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the parameters are invalid and a
    /// storage error if the backup directory cannot be created. In both cases
    /// a loop that was already running keeps running.
    pub fn start(&mut self) -> BackupResult<()> {
        self.parameters.validate()?;

        let manager = BackupManager::with_capabilities(
            self.parameters.clone(),
            Arc::clone(&self.encoder),
            Arc::clone(&self.filesystem),
        );
        manager.ensure_backup_dir()?;

        self.stop();

        let (stop_tx, stop_rx) = mpsc::channel();
        let clock = Arc::clone(&self.clock);
        let hook = self.error_hook.clone();
        let poll_interval = self.poll_interval;

        let thread = thread::Builder::new()
            .name("file-backup".into())
            .spawn(move || {
                let mut worker = Worker::new(manager, hook, clock.now());
                loop {
                    match stop_rx.recv_timeout(poll_interval) {
                        Err(RecvTimeoutError::Timeout) => worker.tick(clock.now()),
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
            })
            .map_err(|e| BackupError::Worker(format!("Failed to spawn backup thread: {}", e)))?;

        self.worker = Some(WorkerHandle {
            stop: stop_tx,
            thread,
        });

        info!(
            backup_path = %self.parameters.backup_path.display(),
            files = self.parameters.file_list.len(),
            frequency_secs = self.parameters.backup_frequency.as_secs(),
            expiry_secs = self.parameters.expiry.as_secs(),
            "Backup scheduler started"
        );

        Ok(())
    }

    /// Stop and start again with the current parameters
    pub fn restart(&mut self) -> BackupResult<()> {
        self.start()
    }

    /// Stop the background loop and wait for it to exit
    ///
    /// An operation in progress is allowed to finish first. Calling this when
    /// the scheduler is not running does nothing.
    pub fn stop(&mut self) {
        let Some(worker) = self.worker.take() else {
            return;
        };

        // The worker may already be gone if it panicked
        let _ = worker.stop.send(());

        if worker.thread.join().is_err() {
            error!("Backup worker thread panicked");
        }

        info!("Backup scheduler stopped");
    }
}

impl Drop for BackupScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// State owned by the background thread
struct Worker {
    manager: BackupManager,
    hook: Option<ErrorHook>,
    last_backup_at: DateTime<Local>,
}

impl Worker {
    fn new(manager: BackupManager, hook: Option<ErrorHook>, started_at: DateTime<Local>) -> Self {
        Self {
            manager,
            hook,
            last_backup_at: started_at,
        }
    }

    fn backup_due(&self, now: &DateTime<Local>) -> bool {
        // A clock stepping backwards counts as no time elapsed
        let elapsed = now
            .signed_duration_since(self.last_backup_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        elapsed >= self.manager.parameters().backup_frequency
    }

    /// One poll: back up if due, then sweep expired files
    fn tick(&mut self, now: DateTime<Local>) {
        if self.backup_due(&now) {
            match self.manager.create_backup(&now) {
                Ok(_) => self.last_backup_at = now,
                Err(e) => {
                    error!(error = %e, "Backup failed, retrying next poll");
                    self.notify(&e);
                }
            }
        }

        match self.manager.sweep_expired(&now) {
            Ok(report) => {
                for failure in &report.failures {
                    self.notify(failure);
                }
            }
            Err(e) => {
                error!(error = %e, "Expiry sweep failed");
                self.notify(&e);
            }
        }

        debug!(last_backup_at = %self.last_backup_at, "Backup poll complete");
    }

    fn notify(&self, err: &BackupError) {
        if let Some(hook) = &self.hook {
            hook(err);
        }
    }
}
