//! The [`Backend`] trait.
//!
//! A circuit goes through `check()`, then `submit()`; the returned job is
//! polled with `status()` until finished and its counts fetched with
//! `result()`. [`Backend::wait`] does the polling.

use std::time::Duration;

use async_trait::async_trait;
use qlab_ir::{Circuit, Operation};
use tracing::debug;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// Cadence and patience of [`Backend::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub interval: Duration,
    /// Status queries before giving up with [`HalError::Timeout`].
    pub max_polls: u32,
}

impl PollPolicy {
    /// Poll every `interval` for at most `timeout`, at least once.
    pub fn with_timeout(interval: Duration, timeout: Duration) -> Self {
        let polls = timeout.as_millis() / interval.as_millis().max(1);
        Self {
            interval,
            max_polls: u32::try_from(polls).unwrap_or(u32::MAX).max(1),
        }
    }

    pub fn timeout(&self) -> Duration {
        self.interval * self.max_polls
    }
}

impl Default for PollPolicy {
    /// Every half second for five minutes.
    fn default() -> Self {
        Self::with_timeout(Duration::from_millis(500), Duration::from_secs(300))
    }
}

/// Whether a backend takes jobs right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    Online { queue: Option<u32> },
    Offline { reason: String },
}

impl Availability {
    pub fn is_online(&self) -> bool {
        matches!(self, Availability::Online { .. })
    }
}

/// Something that runs circuits and returns counts.
///
/// Count keys in a result are `circuit.num_clbits()` characters wide with
/// classical bit 0 rightmost.
#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    /// Fixed at construction.
    fn capabilities(&self) -> &Capabilities;

    async fn availability(&self) -> HalResult<Availability> {
        Ok(Availability::Online { queue: Some(0) })
    }

    /// Refuse circuits that are too wide or use gates the backend lacks.
    fn check(&self, circuit: &Circuit) -> HalResult<()> {
        let caps = self.capabilities();
        if circuit.num_qubits() > caps.num_qubits as usize {
            return Err(HalError::InvalidCircuit(format!(
                "{} needs {} qubits, {} has {}",
                circuit.name(),
                circuit.num_qubits(),
                caps.name,
                caps.num_qubits
            )));
        }
        for op in circuit.operations() {
            if let Operation::Gate { gate, .. } = op {
                if !caps.supports_gate(gate.name()) {
                    return Err(HalError::InvalidCircuit(format!(
                        "{} does not support '{}'",
                        caps.name,
                        gate.name()
                    )));
                }
            }
        }
        Ok(())
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Counts of a `Done` job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    fn poll_policy(&self) -> PollPolicy {
        PollPolicy::default()
    }

    /// Poll until the job finishes, then fetch its result.
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let policy = self.poll_policy();
        for _ in 0..policy.max_polls {
            let status = self.status(job_id).await?;
            if !status.is_finished() {
                debug!(job_id = %job_id, %status, "waiting");
                tokio::time::sleep(policy.interval).await;
                continue;
            }
            return match status {
                JobStatus::Done => self.result(job_id).await,
                JobStatus::Failed(reason) => Err(HalError::JobFailed(reason)),
                _ => Err(HalError::JobCancelled),
            };
        }
        Err(HalError::Timeout(job_id.to_string()))
    }
}
