//! The [`SimulatorBackend`].

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use async_trait::async_trait;
use qlab_hal::{
    Backend, Capabilities, Counts, ExecutionResult, HalError, HalResult, JobId, JobStatus,
};
use qlab_ir::{Circuit, Gate, Operation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashMap;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::statevector::{Statevector, sample_index};

/// Widest circuit [`SimulatorBackend::new`] accepts.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// A circuit flattened to plain indices.
enum Step {
    Apply(Gate, Vec<usize>),
    /// `(qubit, clbit)` pairs.
    Read(Vec<(usize, usize)>),
    Reset(usize),
}

struct Program {
    steps: Vec<Step>,
    qubits: usize,
    clbits: usize,
}

impl Program {
    fn lower(circuit: &Circuit) -> Self {
        let steps = circuit
            .operations()
            .filter_map(|op| match op {
                Operation::Gate { gate, qubits } => Some(Step::Apply(
                    *gate,
                    qubits.iter().map(|q| q.0 as usize).collect(),
                )),
                Operation::Measure { pairs } => Some(Step::Read(
                    pairs
                        .iter()
                        .map(|(q, c)| (q.0 as usize, c.0 as usize))
                        .collect(),
                )),
                Operation::Reset { qubit } => Some(Step::Reset(qubit.0 as usize)),
                Operation::Barrier { .. } => None,
            })
            .collect();
        Self {
            steps,
            qubits: circuit.num_qubits(),
            clbits: circuit.num_clbits(),
        }
    }

    /// No gate or reset after the first readout: the final state can be
    /// sampled instead of re-running every shot.
    fn reads_only_at_end(&self) -> bool {
        let first_read = self.steps.iter().position(|s| matches!(s, Step::Read(_)));
        let after = first_read.map_or(&[][..], |i| &self.steps[i..]);
        !self.steps.iter().any(|s| matches!(s, Step::Reset(_)))
            && after.iter().all(|s| matches!(s, Step::Read(_)))
    }

    fn sample<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> Counts {
        let mut state = Statevector::new(self.qubits);
        let mut wiring = Vec::new();
        for step in &self.steps {
            match step {
                Step::Apply(gate, qubits) => state.apply_gate(gate, qubits),
                Step::Read(pairs) => wiring.extend_from_slice(pairs),
                Step::Reset(_) => {}
            }
        }

        let cumulative = state.cumulative_probabilities();
        let mut tally: BTreeMap<usize, u64> = BTreeMap::new();
        for _ in 0..shots {
            *tally.entry(sample_index(&cumulative, rng)).or_default() += 1;
        }

        let mut counts = Counts::new();
        for (basis, hits) in tally {
            let mut bits = vec![false; self.clbits];
            for &(qubit, clbit) in &wiring {
                bits[clbit] = (basis >> qubit) & 1 == 1;
            }
            counts.insert(key(&bits), hits);
        }
        counts
    }

    fn replay<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> Counts {
        let mut counts = Counts::new();
        let mut bits = vec![false; self.clbits];
        for _ in 0..shots {
            let mut state = Statevector::new(self.qubits);
            bits.fill(false);
            for step in &self.steps {
                match step {
                    Step::Apply(gate, qubits) => state.apply_gate(gate, qubits),
                    Step::Read(pairs) => {
                        for &(qubit, clbit) in pairs {
                            bits[clbit] = state.measure(qubit, rng);
                        }
                    }
                    Step::Reset(qubit) => state.reset(*qubit, rng),
                }
            }
            counts.insert(key(&bits), 1);
        }
        counts
    }
}

/// Count key for a classical register, bit 0 last.
fn key(bits: &[bool]) -> String {
    bits.iter().rev().map(|&b| if b { '1' } else { '0' }).collect()
}

/// In-process statevector backend.
///
/// `submit()` runs the circuit before returning, so a job is `Done` the
/// first time anyone asks. `result()` hands the counts over once; after that
/// the id is unknown.
pub struct SimulatorBackend {
    capabilities: Capabilities,
    finished: Mutex<FxHashMap<String, ExecutionResult>>,
    rng: Mutex<StdRng>,
}

impl SimulatorBackend {
    pub fn new() -> Self {
        Self::with_max_qubits(DEFAULT_MAX_QUBITS)
    }

    pub fn with_max_qubits(max_qubits: u32) -> Self {
        Self {
            capabilities: Capabilities::simulator(max_qubits),
            finished: Mutex::new(FxHashMap::default()),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Make sampling reproducible.
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    #[instrument(skip_all, fields(circuit = circuit.name(), shots = shots))]
    fn simulate(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let started = Instant::now();
        let program = Program::lower(circuit);
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);

        let counts = if program.reads_only_at_end() {
            program.sample(shots, &mut *rng)
        } else {
            debug!("state collapses mid-circuit, replaying each shot");
            program.replay(shots, &mut *rng)
        };

        let elapsed = started.elapsed();
        debug!(?elapsed, outcomes = counts.len(), "simulation finished");
        ExecutionResult::new(counts, shots)
            .with_execution_time(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
            .with_backend(self.capabilities.name.clone())
    }

    fn finished(&self) -> MutexGuard<'_, FxHashMap<String, ExecutionResult>> {
        self.finished.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        self.check(circuit)?;
        let result = self.simulate(circuit, shots);
        let job_id = JobId::new(Uuid::new_v4().to_string());
        debug!(job_id = %job_id, "job stored");
        self.finished().insert(job_id.0.clone(), result);
        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        if self.finished().contains_key(&job_id.0) {
            Ok(JobStatus::Done)
        } else {
            Err(HalError::UnknownJob(job_id.0.clone()))
        }
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        self.finished()
            .remove(&job_id.0)
            .ok_or_else(|| HalError::UnknownJob(job_id.0.clone()))
    }
}
