//! Random number command.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use qlab_demos::runners::{DecodeMode, RandomNumberRunner};
use qlab_demos::{print_header, print_result};

use super::common::{RunOptions, announce, open_session};

/// Generate random numbers from qubits in superposition.
pub async fn execute(
    options: &RunOptions<'_>,
    max: u64,
    count: usize,
    marginal: bool,
    shots: u32,
) -> Result<()> {
    print_header("Quantum Random Numbers");
    let mode = if marginal {
        DecodeMode::Marginal
    } else {
        DecodeMode::Outcome
    };
    let runner = RandomNumberRunner::new(max)
        .with_count(count)
        .with_shots(shots)
        .with_mode(mode);
    print_result("Qubits", runner.num_qubits()?);
    print_result("Decode", mode);

    let session = open_session(options).await?;

    for target in &session.targets {
        announce(target);
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::with_template("{spinner:.cyan} Generating {msg} values...")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.set_message(count.to_string());
        progress.enable_steady_tick(std::time::Duration::from_millis(100));
        let values = runner.run(&session.executor, target).await;
        progress.finish_and_clear();

        println!("{:?}", values?);
    }
    Ok(())
}
