//! Repeating background jobs (broadcast, news polling).
//!
//! Each job runs on its own task: first after `first_delay`, then every
//! `period`. A slow run delays the next tick instead of bunching ticks up.
//! All jobs share one cancellation token so shutdown stops them together.

use std::{future::Future, sync::Mutex, time::Duration};

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct JobSpec {
    pub name: &'static str,
    pub first_delay: Duration,
    pub period: Duration,
}

#[derive(Default)]
pub struct JobScheduler {
    cancel: CancellationToken,
    handles: Mutex<Vec<(JobSpec, JoinHandle<()>)>>,
}

impl JobScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a repeating job. Errors from a run are logged; the job keeps its schedule.
    pub fn spawn<F, Fut>(&self, spec: JobSpec, job: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let cancel = self.cancel.child_token();
        let handle = tokio::spawn(job_loop(spec, job, cancel));
        info!(
            job = spec.name,
            first_in_secs = spec.first_delay.as_secs(),
            every_secs = spec.period.as_secs(),
            "scheduled job"
        );
        if let Ok(mut handles) = self.handles.lock() {
            handles.push((spec, handle));
        }
    }

    pub fn jobs(&self) -> Vec<JobSpec> {
        self.handles
            .lock()
            .map(|h| h.iter().map(|(spec, _)| *spec).collect())
            .unwrap_or_default()
    }

    /// Cancel every job and wait for the tasks to exit.
    ///
    /// Cancellation is checked between runs, so a run already in progress
    /// completes before this returns.
    pub async fn stop(&self) {
        self.cancel.cancel();
        let handles = match self.handles.lock() {
            Ok(mut handles) => std::mem::take(&mut *handles),
            Err(_) => return,
        };
        for (spec, handle) in handles {
            if let Err(e) = handle.await {
                warn!(job = spec.name, "job task ended abnormally: {e}");
            }
            debug!(job = spec.name, "job stopped");
        }
    }
}

async fn job_loop<F, Fut>(spec: JobSpec, job: F, cancel: CancellationToken)
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    let mut ticker = interval_at(Instant::now() + spec.first_delay, spec.period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
          _ = cancel.cancelled() => break,
          _ = ticker.tick() => {
            debug!(job = spec.name, "running scheduled job");
            if let Err(e) = job().await {
              error!(job = spec.name, "scheduled job failed: {e}");
            }
          }
        }
    }
}
