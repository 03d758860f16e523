//! qlab experiments
//!
//! Small educational quantum programs. Each one builds a circuit, runs it on
//! the local simulator or an IBM Quantum device through
//! [`qlab_hal::Executor`], and interprets the counts with `qlab-decode`:
//!
//! - **Hello / basic**: measure a fresh qubit
//! - **Superposition**: Bell pairs and superdense coding
//! - **Clone**: why `cx` does not copy a superposition
//! - **Deutsch-Jozsa**: constant or balanced oracle in one query
//! - **Search**: Grover search for a four-bit password
//! - **Random**: random numbers from qubits in superposition
//! - **8-ball**: one shot, eight answers
//! - **Unicorn**: a flight game driven by a partially rotated qubit
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use qlab_adapter_sim::SimulatorBackend;
//! use qlab_demos::runners::RandomNumberRunner;
//! use qlab_hal::{BackendSelector, Executor};
//!
//! let executor = Executor::new(Arc::new(SimulatorBackend::new()));
//! let target = executor.select(BackendSelector::Simulator).await?;
//! let values = RandomNumberRunner::new(100).with_count(10).run(&executor, &target).await?;
//! ```

pub mod circuits;
pub mod error;
pub mod runners;

pub use error::{DemoError, DemoResult};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use qlab_hal::Counts;

/// Width of the bars drawn by [`print_counts`].
const BAR_WIDTH: usize = 40;

/// Create a spinner for waiting on a backend.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print counts as a histogram, most frequent first.
pub fn print_counts(counts: &Counts) {
    let total = counts.total_shots();
    if total == 0 {
        println!("  (no counts)");
        return;
    }
    for (bitstring, count) in counts.sorted() {
        println!("  {}", histogram_line(bitstring, count, total));
    }
}

fn histogram_line(bitstring: &str, count: u64, total: u64) -> String {
    let share = count as f64 / total as f64;
    let bar_len = (share * BAR_WIDTH as f64).round() as usize;
    format!(
        "|{bitstring}⟩ {} {count:>6} ({:5.1}%)",
        style("█".repeat(bar_len)).cyan(),
        share * 100.0
    )
}
