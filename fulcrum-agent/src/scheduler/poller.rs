//! Poll scheduler
//!
//! Drives the job processor from a single control loop so poll cycles never
//! overlap. Stopping is a two-step handoff: the stop request itself never
//! blocks (a watch send), and awaiting [`SchedulerHandle::stop`] completes
//! once the loop has acknowledged the signal, letting an in-flight cycle
//! finish first.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::service::JobProcessor;

/// Periodically runs poll cycles until stopped.
pub struct PollScheduler {
    processor: Arc<JobProcessor>,
    interval: Duration,
}

impl PollScheduler {
    /// Creates a scheduler over the given processor.
    pub fn new(processor: Arc<JobProcessor>, interval: Duration) -> Self {
        Self {
            processor,
            interval,
        }
    }

    /// Spawns the control loop and returns its stop handle.
    pub fn start(self) -> SchedulerHandle {
        let (shutdown, mut signal) = watch::channel(false);

        let task = tokio::spawn(async move {
            info!(interval = ?self.interval, "starting job poll loop");

            let mut ticker = time::interval(self.interval);
            // After a cycle that overruns the interval, wait a full period
            // instead of firing immediately.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;

                    _ = signal.changed() => {
                        info!("stopping job poll loop");
                        break;
                    }
                    _ = ticker.tick() => {
                        debug!("polling jobs");
                        if let Err(e) = self.processor.poll_and_process().await {
                            error!("Error during poll cycle: {:#}", e);
                        }
                    }
                }
            }
        });

        SchedulerHandle { shutdown, task }
    }
}

/// Handle for stopping a running scheduler.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    task: tokio::task::JoinHandle<()>,
}

impl SchedulerHandle {
    /// Requests shutdown and waits for the control loop to acknowledge.
    ///
    /// The request itself cannot block, so an in-flight poll cycle delays
    /// the acknowledgment but can never deadlock the caller.
    pub async fn stop(self) -> Result<()> {
        // An Err here just means the loop already exited.
        let _ = self.shutdown.send(true);
        self.task.await?;
        Ok(())
    }
}
