//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - quantum computing experiments for the terminal",
        style("qlab").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qlab-ir            Circuit builder");
    println!("  qlab-qasm3         OpenQASM emitter");
    println!("  qlab-hal           Backends, configuration and execution");
    println!("  qlab-decode        Result interpretation");
    println!("  qlab-adapter-sim   Local statevector simulator");
    if cfg!(feature = "ibm") {
        println!("  qlab-adapter-ibm   IBM Quantum");
    }
    println!("  qlab-cli           Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/hiq-lab/qlab").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
