//! Shared helpers for CLI commands.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use qlab_adapter_sim::SimulatorBackend;
use qlab_demos::{create_spinner, print_section};
use qlab_hal::{BackendSelector, ExecutionResult, Executor, QlabConfig, RemoteAccess, Target};
use qlab_ir::Circuit;

/// Where experiments run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendChoice {
    /// Local statevector simulator
    #[value(alias = "simulator")]
    Sim,
    /// Least busy IBM Quantum device
    #[value(alias = "ibm")]
    Real,
    /// Simulator first, then the IBM Quantum device
    Both,
}

impl BackendChoice {
    /// Selectors in execution order.
    pub fn selectors(self) -> Vec<BackendSelector> {
        match self {
            BackendChoice::Sim => vec![BackendSelector::Simulator],
            BackendChoice::Real => vec![BackendSelector::Remote],
            BackendChoice::Both => vec![BackendSelector::Simulator, BackendSelector::Remote],
        }
    }

    /// Whether remote credentials are needed.
    pub fn needs_remote(self) -> bool {
        !matches!(self, BackendChoice::Sim)
    }
}

/// Options shared by every experiment.
#[derive(Debug, Clone)]
pub struct RunOptions<'a> {
    pub backend: BackendChoice,
    pub config: Option<&'a Path>,
    pub seed: Option<u64>,
}

impl RunOptions<'_> {
    /// Random source for an experiment's own choices (oracle, password).
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// An executor with its resolved targets.
pub struct Session {
    pub executor: Executor,
    pub targets: Vec<Target>,
}

/// Build the executor and resolve every target the options ask for.
pub async fn open_session(options: &RunOptions<'_>) -> Result<Session> {
    let simulator = match options.seed {
        Some(seed) => SimulatorBackend::new().with_seed(seed),
        None => SimulatorBackend::new(),
    };
    let mut executor = Executor::new(Arc::new(simulator));

    if options.backend.needs_remote() {
        let config = QlabConfig::load(options.config).context("Failed to load configuration")?;
        executor = executor.with_remote(connect_remote(&config).await?);
    }

    let mut targets = Vec::new();
    for selector in options.backend.selectors() {
        let target = executor
            .select(selector)
            .await
            .with_context(|| format!("Failed to select the {selector} backend"))?;
        info!(selector = %selector, target = %target.name, "target resolved");
        targets.push(target);
    }

    Ok(Session { executor, targets })
}

/// Authenticate with IBM Quantum.
#[cfg(feature = "ibm")]
pub async fn connect_remote(config: &QlabConfig) -> Result<RemoteAccess> {
    use qlab_adapter_ibm::IbmProvider;

    let credentials = config
        .credentials()
        .context("IBM Quantum is not configured")?;
    println!("  Connecting to IBM Quantum...");
    let provider = IbmProvider::connect(&credentials)
        .await
        .context("Failed to connect to IBM Quantum")?;
    Ok(RemoteAccess::new(Arc::new(provider)))
}

/// Authenticate with IBM Quantum.
#[cfg(not(feature = "ibm"))]
pub async fn connect_remote(_config: &QlabConfig) -> Result<RemoteAccess> {
    anyhow::bail!("IBM Quantum support not available. Rebuild with --features ibm");
}

/// Announce the target an experiment is about to run on.
pub fn announce(target: &Target) {
    if target.is_hardware() {
        print_section(&format!("Running on {}", target.name));
    } else {
        print_section("Running on the simulator");
    }
}

/// Execute a circuit, with a spinner while a remote job is pending.
pub async fn execute(
    executor: &Executor,
    target: &Target,
    circuit: &Circuit,
    shots: u32,
) -> Result<ExecutionResult> {
    if !target.is_hardware() {
        return Ok(executor.execute(target, circuit, shots).await?);
    }

    let spinner = create_spinner(&format!("Waiting for {}...", target.name));
    let result = executor.execute(target, circuit, shots).await;
    spinner.finish_and_clear();

    result.with_context(|| format!("Job on {} failed", target.name))
}

/// Print the raw counts, then the histogram and timing.
pub fn print_execution(result: &ExecutionResult) {
    println!("  {}", result.counts);
    qlab_demos::print_counts(&result.counts);
    if let Some(time_ms) = result.execution_time_ms {
        println!("  {} {} ms", style("Execution time:").dim(), style(time_ms).yellow());
    }
}
