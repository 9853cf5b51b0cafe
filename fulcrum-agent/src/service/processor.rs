//! Job processing engine
//!
//! One poll cycle: fetch pending jobs, claim the first, dispatch on its
//! action kind, report the outcome. Strictly sequential; the agent never
//! has two jobs in flight.

use anyhow::{Context, Result};
use fulcrum_client::{DeploymentApi, FulcrumApi};
use fulcrum_core::domain::job::{Job, JobAction};
use fulcrum_core::dto::deployment::DeploymentManifest;
use fulcrum_core::dto::job::{JobReport, ReportedResources};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Snapshot of the processing counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobStats {
    pub processed: u64,
    pub succeeded: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    processed: AtomicU64,
    succeeded: AtomicU64,
    failed: AtomicU64,
}

/// Processes jobs from the Fulcrum Core queue.
pub struct JobProcessor {
    fulcrum: Arc<dyn FulcrumApi>,
    deployments: Arc<dyn DeploymentApi>,
    counters: Counters,
}

impl JobProcessor {
    /// Creates a new processor over the given clients.
    pub fn new(fulcrum: Arc<dyn FulcrumApi>, deployments: Arc<dyn DeploymentApi>) -> Self {
        Self {
            fulcrum,
            deployments,
            counters: Counters::default(),
        }
    }

    /// Runs one poll cycle: claim at most one pending job and report its
    /// outcome.
    ///
    /// Fetch and claim failures abort the cycle; the next scheduled tick is
    /// the retry mechanism. A failure in the completion/failure report call
    /// itself also aborts the cycle and leaves the job claimed on the queue
    /// (an orphaned claim; nothing here self-heals it).
    pub async fn poll_and_process(&self) -> Result<()> {
        let jobs = self
            .fulcrum
            .pending_jobs()
            .await
            .context("failed to get pending jobs")?;

        let Some(job) = jobs.first() else {
            debug!("no pending jobs");
            return Ok(());
        };
        self.counters.processed.fetch_add(1, Ordering::Relaxed);

        if let Err(e) = self.fulcrum.claim_job(&job.id).await {
            self.counters.failed.fetch_add(1, Ordering::Relaxed);
            return Err(e).with_context(|| format!("failed to claim job {}", job.id));
        }

        match self.process_job(job).await {
            Ok(report) => {
                let payload =
                    serde_json::to_value(&report).context("failed to serialize job report")?;
                self.fulcrum
                    .complete_job(&job.id, payload)
                    .await
                    .with_context(|| format!("failed to mark job {} as completed", job.id))?;
                self.counters.succeeded.fetch_add(1, Ordering::Relaxed);
                info!(job_id = %job.id, action = %job.action, "job completed");
            }
            Err(e) => {
                self.counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(job_id = %job.id, action = %job.action, error = %e, "job processing failed");
                self.fulcrum
                    .fail_job(&job.id, &e.to_string())
                    .await
                    .with_context(|| format!("failed to mark job {} as failed", job.id))?;
            }
        }

        Ok(())
    }

    /// Dispatches a claimed job to the handler for its action kind.
    async fn process_job(&self, job: &Job) -> Result<JobReport> {
        debug!(job_id = %job.id, action = %job.action, "processing job");

        match &job.action {
            JobAction::ServiceCreate => self.handle_service_create(job).await,
            JobAction::ServiceStart => self.handle_service_start(job).await,
            JobAction::ServiceStop => self.handle_service_stop(job).await,
            JobAction::ServiceHotUpdate => self.handle_service_hot_update(job).await,
            JobAction::ServiceColdUpdate => self.handle_service_cold_update(job).await,
            JobAction::ServiceDelete => self.handle_service_delete(job).await,
            JobAction::Other(action) => Err(anyhow::anyhow!("unknown job action: {action}")),
        }
    }

    // Each action kind gets its own handler so the mappings can diverge.
    // TODO: replace the shared test deployment with per-action process-manager
    // workflows once the mapping for each kind is defined.

    async fn handle_service_create(&self, job: &Job) -> Result<JobReport> {
        self.submit_deployment(job).await
    }

    async fn handle_service_start(&self, job: &Job) -> Result<JobReport> {
        self.submit_deployment(job).await
    }

    async fn handle_service_stop(&self, job: &Job) -> Result<JobReport> {
        self.submit_deployment(job).await
    }

    async fn handle_service_hot_update(&self, job: &Job) -> Result<JobReport> {
        self.submit_deployment(job).await
    }

    async fn handle_service_cold_update(&self, job: &Job) -> Result<JobReport> {
        self.submit_deployment(job).await
    }

    async fn handle_service_delete(&self, job: &Job) -> Result<JobReport> {
        self.submit_deployment(job).await
    }

    /// Submits the deployment manifest for a job and builds its report.
    async fn submit_deployment(&self, job: &Job) -> Result<JobReport> {
        let manifest = DeploymentManifest {
            deployment_type: "test.deployment".to_string(),
            id: Uuid::new_v4().to_string(),
            payload: serde_json::Map::new(),
        };

        self.deployments
            .create_deployment(&manifest)
            .await
            .with_context(|| format!("failed to submit deployment for job {}", job.id))?;

        Ok(JobReport {
            resources: ReportedResources {
                ts: chrono::Utc::now(),
            },
            external_id: job.service.external_id.clone(),
        })
    }

    /// Returns a snapshot of the processing counters. Safe to call while a
    /// cycle is in flight.
    pub fn stats(&self) -> JobStats {
        JobStats {
            processed: self.counters.processed.load(Ordering::Relaxed),
            succeeded: self.counters.succeeded.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{Call, FakeDeployments, FakeQueue, job};
    use super::*;

    fn processor(queue: Arc<FakeQueue>, deployments: Arc<FakeDeployments>) -> JobProcessor {
        JobProcessor::new(queue, deployments)
    }

    #[tokio::test]
    async fn test_empty_queue_is_a_quiet_cycle() {
        let queue = Arc::new(FakeQueue::default());
        let deployments = Arc::new(FakeDeployments::default());
        let processor = processor(Arc::clone(&queue), deployments);

        processor.poll_and_process().await.unwrap();

        assert!(queue.calls().is_empty());
        assert_eq!(processor.stats(), JobStats::default());
    }

    #[tokio::test]
    async fn test_completes_first_pending_job() {
        let queue = Arc::new(FakeQueue::with_pending(vec![job(
            "J1",
            JobAction::ServiceStart,
        )]));
        let deployments = Arc::new(FakeDeployments::default());
        let processor = processor(Arc::clone(&queue), Arc::clone(&deployments));

        processor.poll_and_process().await.unwrap();

        let calls = queue.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::Claim("J1".to_string()));
        match &calls[1] {
            Call::Complete(id, payload) => {
                assert_eq!(id, "J1");
                assert_eq!(payload["externalId"], "ext-1");
                assert!(payload["resources"]["ts"].is_string());
            }
            other => panic!("expected completion, got {other:?}"),
        }

        let manifests = deployments.manifests.lock().unwrap();
        assert_eq!(manifests.len(), 1);
        assert_eq!(manifests[0].deployment_type, "test.deployment");

        assert_eq!(
            processor.stats(),
            JobStats {
                processed: 1,
                succeeded: 1,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_claims_only_the_first_job() {
        let queue = Arc::new(FakeQueue::with_pending(vec![
            job("J1", JobAction::ServiceCreate),
            job("J2", JobAction::ServiceStart),
        ]));
        let deployments = Arc::new(FakeDeployments::default());
        let processor = processor(Arc::clone(&queue), deployments);

        processor.poll_and_process().await.unwrap();

        let claims: Vec<_> = queue
            .calls()
            .into_iter()
            .filter(|call| matches!(call, Call::Claim(_)))
            .collect();
        assert_eq!(claims, vec![Call::Claim("J1".to_string())]);
        assert_eq!(processor.stats().processed, 1);
    }

    #[tokio::test]
    async fn test_unknown_action_is_reported_as_failure() {
        let queue = Arc::new(FakeQueue::with_pending(vec![job(
            "J2",
            JobAction::Other("Unknown".to_string()),
        )]));
        let deployments = Arc::new(FakeDeployments::default());
        let processor = processor(Arc::clone(&queue), Arc::clone(&deployments));

        // A domain error is a job failure, not a cycle failure.
        processor.poll_and_process().await.unwrap();

        let calls = queue.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], Call::Claim("J2".to_string()));
        assert_eq!(
            calls[1],
            Call::Fail("J2".to_string(), "unknown job action: Unknown".to_string())
        );

        assert!(deployments.manifests.lock().unwrap().is_empty());
        assert_eq!(
            processor.stats(),
            JobStats {
                processed: 1,
                succeeded: 0,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_claim_rejection_aborts_the_cycle() {
        let queue = Arc::new(FakeQueue {
            pending: std::sync::Mutex::new(vec![job("J1", JobAction::ServiceStart)]),
            claim_error: Some(409),
            ..FakeQueue::default()
        });
        let deployments = Arc::new(FakeDeployments::default());
        let processor = processor(Arc::clone(&queue), deployments);

        let err = processor.poll_and_process().await.unwrap_err();
        assert!(err.to_string().contains("failed to claim job J1"));

        // No completion or failure report is attempted after a lost claim.
        assert_eq!(queue.calls(), vec![Call::Claim("J1".to_string())]);
        assert_eq!(
            processor.stats(),
            JobStats {
                processed: 1,
                succeeded: 0,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_fetch_failure_leaves_stats_untouched() {
        let queue = Arc::new(FakeQueue {
            fail_fetch: true,
            ..FakeQueue::default()
        });
        let deployments = Arc::new(FakeDeployments::default());
        let processor = processor(Arc::clone(&queue), deployments);

        let err = processor.poll_and_process().await.unwrap_err();
        assert!(err.to_string().contains("failed to get pending jobs"));

        assert!(queue.calls().is_empty());
        assert_eq!(processor.stats(), JobStats::default());
    }

    #[tokio::test]
    async fn test_completion_report_failure_propagates() {
        let queue = Arc::new(FakeQueue {
            pending: std::sync::Mutex::new(vec![job("J1", JobAction::ServiceStart)]),
            complete_error: Some(500),
            ..FakeQueue::default()
        });
        let deployments = Arc::new(FakeDeployments::default());
        let processor = processor(Arc::clone(&queue), deployments);

        let err = processor.poll_and_process().await.unwrap_err();
        assert!(err.to_string().contains("failed to mark job J1 as completed"));

        // The job is orphaned in Processing on the queue; succeeded is only
        // incremented once the report lands.
        assert_eq!(
            processor.stats(),
            JobStats {
                processed: 1,
                succeeded: 0,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_failure_report_failure_propagates() {
        let queue = Arc::new(FakeQueue {
            pending: std::sync::Mutex::new(vec![job(
                "J2",
                JobAction::Other("Unknown".to_string()),
            )]),
            fail_error: Some(500),
            ..FakeQueue::default()
        });
        let deployments = Arc::new(FakeDeployments::default());
        let processor = processor(Arc::clone(&queue), deployments);

        let err = processor.poll_and_process().await.unwrap_err();
        assert!(err.to_string().contains("failed to mark job J2 as failed"));
        assert_eq!(processor.stats().failed, 1);
    }

    #[tokio::test]
    async fn test_deployment_error_fails_the_job() {
        let queue = Arc::new(FakeQueue::with_pending(vec![job(
            "J1",
            JobAction::ServiceCreate,
        )]));
        let deployments = Arc::new(FakeDeployments {
            fail: true,
            ..FakeDeployments::default()
        });
        let processor = processor(Arc::clone(&queue), deployments);

        processor.poll_and_process().await.unwrap();

        let calls = queue.calls();
        assert_eq!(
            calls[1],
            Call::Fail(
                "J1".to_string(),
                "failed to submit deployment for job J1".to_string()
            )
        );
        assert_eq!(
            processor.stats(),
            JobStats {
                processed: 1,
                succeeded: 0,
                failed: 1
            }
        );
    }

    #[tokio::test]
    async fn test_counters_accumulate_across_cycles() {
        let queue = Arc::new(FakeQueue::with_pending(vec![job(
            "J1",
            JobAction::ServiceStop,
        )]));
        let deployments = Arc::new(FakeDeployments::default());
        let processor = processor(Arc::clone(&queue), deployments);

        processor.poll_and_process().await.unwrap();
        processor.poll_and_process().await.unwrap();

        let stats = processor.stats();
        assert_eq!(stats.processed, 2);
        assert_eq!(stats.succeeded, 2);
    }
}
