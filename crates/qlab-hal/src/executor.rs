//! Backend selection and circuit execution.
//!
//! The [`Executor`] always owns a local backend. Remote execution needs a
//! [`RemoteAccess`], built once from an authenticated [`DeviceProvider`] and
//! handed to [`Executor::with_remote`]. Without it, remote requests fail with
//! [`HalError::RemoteNotInitialized`].
//!
//! ```text
//!   select(selector) ──→ Target ──→ execute(target, circuit, shots) ──→ ExecutionResult
//!        │                              │
//!        └─ Remote: devices() ──→ least_busy() ──→ open()
//!                                       └─ shots check ──→ check() ──→ submit() ──→ wait()
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use qlab_ir::Circuit;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::backend::{Availability, Backend};
use crate::error::{HalError, HalResult};
use crate::result::ExecutionResult;

/// A remote device as reported by its provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device name, e.g. `ibm_brisbane`.
    pub name: String,
    /// Number of qubits.
    pub num_qubits: u32,
    /// Whether the device is a cloud-hosted simulator.
    pub simulator: bool,
    /// Whether the device currently accepts jobs.
    pub operational: bool,
    /// Jobs waiting in the device queue.
    pub pending_jobs: u32,
}

/// A source of remote devices.
#[async_trait]
pub trait DeviceProvider: Send + Sync {
    /// Provider name for display.
    fn name(&self) -> &str;

    /// List the devices visible to the authenticated account.
    async fn devices(&self) -> HalResult<Vec<DeviceInfo>>;

    /// Open a device as a backend.
    async fn open(&self, device: &DeviceInfo) -> HalResult<Arc<dyn Backend>>;
}

/// Initialised remote session.
///
/// Constructing one is the single initialisation step for remote execution.
#[derive(Clone)]
pub struct RemoteAccess {
    provider: Arc<dyn DeviceProvider>,
}

impl RemoteAccess {
    /// Wrap an authenticated provider.
    pub fn new(provider: Arc<dyn DeviceProvider>) -> Self {
        Self { provider }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &dyn DeviceProvider {
        self.provider.as_ref()
    }
}

impl fmt::Debug for RemoteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteAccess")
            .field("provider", &self.provider.name())
            .finish()
    }
}

/// Which kind of backend to run on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendSelector {
    /// The local simulator.
    Simulator,
    /// The least busy operational remote device.
    Remote,
}

impl fmt::Display for BackendSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendSelector::Simulator => write!(f, "simulator"),
            BackendSelector::Remote => write!(f, "remote"),
        }
    }
}

/// A resolved backend ready to run circuits.
#[derive(Clone)]
pub struct Target {
    /// Display name of the backend.
    pub name: String,
    /// The backend itself.
    pub backend: Arc<dyn Backend>,
}

impl Target {
    /// Whether the target runs on real hardware.
    pub fn is_hardware(&self) -> bool {
        !self.backend.capabilities().is_simulator
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Target").field("name", &self.name).finish()
    }
}

/// Pick the least busy operational hardware device.
///
/// Simulators and non-operational devices are skipped. Ties go to the device
/// listed first.
pub fn least_busy(devices: &[DeviceInfo]) -> Option<&DeviceInfo> {
    let mut best: Option<&DeviceInfo> = None;
    for device in devices {
        if device.simulator || !device.operational {
            continue;
        }
        if best.is_none_or(|b| device.pending_jobs < b.pending_jobs) {
            best = Some(device);
        }
    }
    best
}

/// Runs circuits on the local simulator or a remote device.
pub struct Executor {
    local: Arc<dyn Backend>,
    remote: Option<RemoteAccess>,
}

impl Executor {
    /// Create an executor around a local backend.
    pub fn new(local: Arc<dyn Backend>) -> Self {
        Self {
            local,
            remote: None,
        }
    }

    /// Enable remote execution.
    pub fn with_remote(mut self, remote: RemoteAccess) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Whether remote execution has been initialised.
    pub fn is_remote_ready(&self) -> bool {
        self.remote.is_some()
    }

    /// The remote session, if initialised.
    pub fn remote(&self) -> Option<&RemoteAccess> {
        self.remote.as_ref()
    }

    /// Resolve a selector to a concrete backend.
    #[instrument(skip(self))]
    pub async fn select(&self, selector: BackendSelector) -> HalResult<Target> {
        match selector {
            BackendSelector::Simulator => Ok(Target {
                name: self.local.name().to_string(),
                backend: Arc::clone(&self.local),
            }),
            BackendSelector::Remote => {
                let remote = self.remote.as_ref().ok_or(HalError::RemoteNotInitialized)?;
                let provider = remote.provider();
                let devices = provider.devices().await?;

                for device in devices.iter().filter(|d| !d.simulator && !d.operational) {
                    warn!(device = %device.name, "skipping non-operational device");
                }

                let device = least_busy(&devices).ok_or_else(|| {
                    HalError::NoDeviceAvailable(format!(
                        "{} reported {} device(s), none operational hardware",
                        provider.name(),
                        devices.len()
                    ))
                })?;
                info!(
                    device = %device.name,
                    pending_jobs = device.pending_jobs,
                    "selected least busy device"
                );

                let backend = provider.open(device).await?;
                Ok(Target {
                    name: device.name.clone(),
                    backend,
                })
            }
        }
    }

    /// Run a circuit on a resolved target and wait for its counts.
    #[instrument(skip(self, target, circuit), fields(target = %target.name, circuit = circuit.name()))]
    pub async fn execute(
        &self,
        target: &Target,
        circuit: &Circuit,
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        let backend = target.backend.as_ref();
        let max_shots = backend.capabilities().max_shots;
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested, {} allows at most {max_shots}",
                target.name
            )));
        }

        backend.check(circuit)?;
        if let Availability::Offline { reason } = backend.availability().await? {
            return Err(HalError::Unavailable(format!("{}: {reason}", target.name)));
        }

        let start = Instant::now();
        let job_id = backend.submit(circuit, shots).await?;
        info!(job_id = %job_id, shots, "job submitted");

        let mut result = backend.wait(&job_id).await?;
        if result.execution_time_ms.is_none() {
            let elapsed = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
            result.execution_time_ms = Some(elapsed);
        }
        if result.backend.is_none() {
            result.backend = Some(target.name.clone());
        }
        Ok(result)
    }

    /// Select a backend and run a circuit on it.
    pub async fn run(
        &self,
        selector: BackendSelector,
        circuit: &Circuit,
        shots: u32,
    ) -> HalResult<ExecutionResult> {
        let target = self.select(selector).await?;
        self.execute(&target, circuit, shots).await
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("local", &self.local.name())
            .field("remote", &self.remote)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::capability::Capabilities;
    use crate::job::{JobId, JobStatus};
    use crate::result::Counts;

    /// Backend that answers every job with all shots on the zero string.
    struct FixedBackend {
        name: String,
        capabilities: Capabilities,
        submitted: Mutex<Vec<u32>>,
    }

    impl FixedBackend {
        fn new(name: &str, capabilities: Capabilities) -> Self {
            Self {
                name: name.into(),
                capabilities,
                submitted: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Backend for FixedBackend {
        fn name(&self) -> &str {
            &self.name
        }

        fn capabilities(&self) -> &Capabilities {
            &self.capabilities
        }

        async fn submit(&self, _circuit: &Circuit, shots: u32) -> HalResult<JobId> {
            self.submitted.lock().unwrap().push(shots);
            Ok(JobId::new("fixed"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            Ok(JobStatus::Done)
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            let shots = self.submitted.lock().unwrap().last().copied().unwrap_or(0);
            Ok(ExecutionResult::new(
                Counts::from_pairs([("0", u64::from(shots))]),
                shots,
            ))
        }
    }

    struct FakeProvider {
        devices: Vec<DeviceInfo>,
    }

    #[async_trait]
    impl DeviceProvider for FakeProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn devices(&self) -> HalResult<Vec<DeviceInfo>> {
            Ok(self.devices.clone())
        }

        async fn open(&self, device: &DeviceInfo) -> HalResult<Arc<dyn Backend>> {
            Ok(Arc::new(FixedBackend::new(
                &device.name,
                Capabilities::remote(&device.name, device.num_qubits, 8192),
            )))
        }
    }

    fn device(name: &str, simulator: bool, operational: bool, pending_jobs: u32) -> DeviceInfo {
        DeviceInfo {
            name: name.into(),
            num_qubits: 5,
            simulator,
            operational,
            pending_jobs,
        }
    }

    fn executor() -> Executor {
        Executor::new(Arc::new(FixedBackend::new(
            "simulator",
            Capabilities::simulator(4),
        )))
    }

    fn one_qubit() -> Circuit {
        let mut circuit = Circuit::with_size("one", 1, 1);
        circuit.measure_all().unwrap();
        circuit
    }

    #[test]
    fn test_least_busy_skips_simulators_and_offline() {
        let devices = vec![
            device("sim", true, true, 0),
            device("down", false, false, 0),
            device("busy", false, true, 40),
            device("quiet", false, true, 3),
            device("also_quiet", false, true, 3),
        ];
        assert_eq!(least_busy(&devices).unwrap().name, "quiet");
        assert!(least_busy(&devices[..2]).is_none());
        assert!(least_busy(&[]).is_none());
    }

    #[tokio::test]
    async fn test_run_on_simulator() {
        let result = executor()
            .run(BackendSelector::Simulator, &one_qubit(), 100)
            .await
            .unwrap();
        assert_eq!(result.counts.total_shots(), 100);
        assert_eq!(result.backend.as_deref(), Some("simulator"));
        assert!(result.execution_time_ms.is_some());
    }

    #[tokio::test]
    async fn test_remote_requires_initialisation() {
        let executor = executor();
        assert!(!executor.is_remote_ready());
        let err = executor.select(BackendSelector::Remote).await.unwrap_err();
        assert!(matches!(err, HalError::RemoteNotInitialized));
    }

    #[tokio::test]
    async fn test_remote_selects_least_busy() {
        let provider = FakeProvider {
            devices: vec![
                device("ibm_a", false, true, 12),
                device("ibm_b", false, true, 2),
                device("ibmq_qasm_simulator", true, true, 0),
            ],
        };
        let executor = executor().with_remote(RemoteAccess::new(Arc::new(provider)));
        assert!(executor.is_remote_ready());

        let target = executor.select(BackendSelector::Remote).await.unwrap();
        assert_eq!(target.name, "ibm_b");
        assert!(target.is_hardware());
    }

    #[tokio::test]
    async fn test_remote_without_devices() {
        let provider = FakeProvider {
            devices: vec![device("offline", false, false, 0)],
        };
        let executor = executor().with_remote(RemoteAccess::new(Arc::new(provider)));
        let err = executor.select(BackendSelector::Remote).await.unwrap_err();
        assert!(matches!(err, HalError::NoDeviceAvailable(_)));
    }

    #[tokio::test]
    async fn test_execute_rejects_bad_shots() {
        let executor = executor();
        let target = executor.select(BackendSelector::Simulator).await.unwrap();

        let zero = executor.execute(&target, &one_qubit(), 0).await;
        assert!(matches!(zero, Err(HalError::InvalidShots(_))));

        let too_many = executor.execute(&target, &one_qubit(), 100_001).await;
        assert!(matches!(too_many, Err(HalError::InvalidShots(_))));
    }

    #[tokio::test]
    async fn test_execute_rejects_invalid_circuit() {
        let executor = executor();
        let circuit = Circuit::with_size("wide", 5, 0);
        let err = executor
            .run(BackendSelector::Simulator, &circuit, 10)
            .await
            .unwrap_err();
        assert!(matches!(err, HalError::InvalidCircuit(msg) if msg.contains("needs 5 qubits")));
    }
}
