//! Backends command implementation.

use std::path::Path;

use anyhow::Result;
use console::style;

use qlab_adapter_sim::SimulatorBackend;
use qlab_hal::{Backend, DeviceInfo, QlabConfig, least_busy};

use super::common::connect_remote;

/// List the simulator and, when configured, the IBM Quantum devices.
pub async fn execute(config: Option<&Path>) -> Result<()> {
    println!("{} Available backends:\n", style("qlab").cyan().bold());

    let sim = SimulatorBackend::new();
    let caps = sim.capabilities();
    let available = sim.availability().await?.is_online();

    println!(
        "  {} {} (local)",
        if available {
            style("●").green()
        } else {
            style("○").red()
        },
        style("simulator").bold()
    );
    println!("    Qubits: {}", caps.num_qubits);
    println!("    Max shots: {}", caps.max_shots);
    println!("    Gates: {}", caps.gates.join(", "));
    println!();

    let config = QlabConfig::load(config)?;
    if config.credentials().is_err() {
        println!(
            "  {} {} (not configured)",
            style("○").dim(),
            style("ibm").dim()
        );
        println!("    Add an 'ibm.key' to ~/.qlab/config.yaml or set QLAB_IBM_TOKEN to enable");
        return Ok(());
    }

    let remote = connect_remote(&config).await?;
    let devices = remote.provider().devices().await?;
    let best = least_busy(&devices).map(|d| d.name.clone());

    println!("  {} IBM Quantum:", style("─").dim());
    for device in &devices {
        print_device(device, best.as_deref() == Some(device.name.as_str()));
    }
    if devices.is_empty() {
        println!("    No devices visible to this account");
    }
    Ok(())
}

fn print_device(device: &DeviceInfo, least_busy: bool) {
    println!(
        "  {} {}{}{}",
        if device.operational {
            style("●").green()
        } else {
            style("○").yellow()
        },
        style(&device.name).bold(),
        if device.simulator { " (simulator)" } else { "" },
        if least_busy {
            style(" ← least busy").cyan().to_string()
        } else {
            String::new()
        }
    );
    println!("    Qubits: {}", device.num_qubits);
    println!("    Pending jobs: {}", device.pending_jobs);
    if !device.operational {
        println!("    Status: offline or maintenance");
    }
}
