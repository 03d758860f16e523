//! One IBM Quantum device as a [`Backend`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use qlab_hal::{
    Availability, Backend, Capabilities, ExecutionResult, HalError, HalResult, JobId, JobStatus,
    PollPolicy,
};
use qlab_ir::Circuit;
use rustc_hash::FxHashMap;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::api::{Device, IbmClient, SamplerResults};
use crate::error::IbmError;
use crate::readout;

/// Device details older than this are fetched again.
const DEVICE_TTL: Duration = Duration::from_secs(300);

/// Shot limit for devices that do not publish one.
const DEFAULT_MAX_SHOTS: u32 = 100_000;

pub struct IbmBackend {
    client: Arc<IbmClient>,
    capabilities: Capabilities,
    poll_policy: PollPolicy,
    device: RwLock<(Device, Instant)>,
    /// Jobs submitted here and not yet collected.
    pending: RwLock<FxHashMap<String, Submitted>>,
}

/// What the sampler output alone cannot tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Submitted {
    /// Classical width, to pad sampled keys.
    width: usize,
    shots: u32,
}

impl IbmBackend {
    pub fn new(client: Arc<IbmClient>, device: Device, poll_policy: PollPolicy) -> Self {
        let caps = Capabilities::remote(
            &device.name,
            device.num_qubits,
            device.max_shots.unwrap_or(DEFAULT_MAX_SHOTS),
        );
        Self {
            client,
            capabilities: if device.simulator { caps.as_simulator() } else { caps },
            poll_policy,
            device: RwLock::new((device, Instant::now())),
            pending: RwLock::new(FxHashMap::default()),
        }
    }

    async fn device(&self) -> HalResult<Device> {
        {
            let cached = self.device.read().await;
            if cached.1.elapsed() < DEVICE_TTL {
                return Ok(cached.0.clone());
            }
        }
        let fresh = self.client.device(&self.capabilities.name).await?;
        *self.device.write().await = (fresh.clone(), Instant::now());
        Ok(fresh)
    }

    /// Decode a finished job's output and forget the job.
    ///
    /// Reports the requested shots; rounded quasi-probabilities may sum to
    /// slightly more or less. Jobs not submitted through this backend fall
    /// back to the observed total.
    async fn collect(&self, job_id: &JobId, results: &SamplerResults) -> ExecutionResult {
        let submitted = self.pending.write().await.remove(&job_id.0);
        let counts = readout::counts(results, submitted.map(|s| s.width));
        let shots = submitted.map_or_else(
            || u32::try_from(counts.total_shots()).unwrap_or(u32::MAX),
            |s| s.shots,
        );
        ExecutionResult::new(counts, shots).with_backend(self.name())
    }
}

#[async_trait]
impl Backend for IbmBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn poll_policy(&self) -> PollPolicy {
        self.poll_policy
    }

    async fn availability(&self) -> HalResult<Availability> {
        let device = match self.device().await {
            Ok(device) => device,
            Err(e) => {
                warn!(device = self.name(), error = %e, "status lookup failed");
                return Ok(Availability::Offline {
                    reason: format!("status unknown: {e}"),
                });
            }
        };
        if device.operational {
            Ok(Availability::Online {
                queue: Some(device.queue),
            })
        } else {
            Ok(Availability::Offline {
                reason: device.note.unwrap_or_else(|| "not operational".into()),
            })
        }
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.check(circuit)?;
        let device = self.device().await?;
        if !device.operational {
            return Err(HalError::Unavailable(device.name));
        }

        let qasm = qlab_qasm3::emit(circuit).map_err(IbmError::Emit)?;
        let id = self
            .client
            .run_sampler(&device.name, qasm, shots)
            .await
            .map_err(|e| HalError::Submission(e.to_string()))?;
        info!(device = %device.name, job_id = %id, queue = device.queue, "sampler job created");

        self.pending.write().await.insert(
            id.clone(),
            Submitted {
                width: circuit.num_clbits(),
                shots,
            },
        );
        Ok(JobId::new(id))
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        Ok(self.client.job(&job_id.0).await?.to_status())
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        match self.status(job_id).await? {
            JobStatus::Done => {}
            JobStatus::Failed(reason) => return Err(HalError::JobFailed(reason)),
            JobStatus::Cancelled => return Err(HalError::JobCancelled),
            pending => {
                return Err(HalError::Remote(format!("job {job_id} is still {pending}")));
            }
        }

        let results = self.client.job_results(&job_id.0).await?;
        Ok(self.collect(job_id, &results).await)
    }
}
