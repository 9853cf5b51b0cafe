//! Scheduler layer
//!
//! Runs the job processor on a fixed cadence and owns the cooperative
//! start/stop protocol.

pub mod poller;

pub use poller::{PollScheduler, SchedulerHandle};
