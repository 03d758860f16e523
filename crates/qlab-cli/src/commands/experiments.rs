//! Single-execution experiments.

use anyhow::Result;
use clap::ValueEnum;
use console::style;

use qlab_decode::{OracleVerdict, eight_ball};
use qlab_demos::circuits::eight_ball::EIGHT_BALL_SHOTS;
use qlab_demos::circuits::{
    Oracle, basic_circuit, clone_circuit, deutsch_jozsa_circuit, eight_ball_circuit,
    hello_circuit, superposition_circuits,
};
use qlab_demos::{print_header, print_info, print_result, print_success, print_warning};

use super::common::{RunOptions, announce, execute, open_session, print_execution};

/// Oracle choice for Deutsch-Jozsa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OracleArg {
    /// Always returns 0
    ConstantZero,
    /// Always returns 1
    ConstantOne,
    /// Returns the parity of the input bits selected by n
    Balanced,
}

impl From<OracleArg> for Oracle {
    fn from(arg: OracleArg) -> Self {
        match arg {
            OracleArg::ConstantZero => Oracle::Constant(false),
            OracleArg::ConstantOne => Oracle::Constant(true),
            OracleArg::Balanced => Oracle::Balanced,
        }
    }
}

/// Measure a fresh qubit and greet.
pub async fn hello(options: &RunOptions<'_>, shots: u32) -> Result<()> {
    print_header("Hello World");
    let circuit = hello_circuit()?;
    let session = open_session(options).await?;

    for target in &session.targets {
        announce(target);
        let result = execute(&session.executor, target, &circuit, shots).await?;
        println!("Hello World! {}", result.counts);
    }
    Ok(())
}

/// Measure a fresh qubit.
pub async fn basic(options: &RunOptions<'_>, shots: u32) -> Result<()> {
    print_header("Basic Measurement");
    let circuit = basic_circuit()?;
    let session = open_session(options).await?;

    for target in &session.targets {
        announce(target);
        let result = execute(&session.executor, target, &circuit, shots).await?;
        print_execution(&result);
    }
    Ok(())
}

/// Bell pairs and superdense coding.
pub async fn superposition(options: &RunOptions<'_>, shots: u32) -> Result<()> {
    const STAGES: [&str; 3] = [
        "Initial state |00⟩",
        "Entangled pair with X on q0",
        "Superdense decode",
    ];

    print_header("Superposition and Entanglement");
    let circuits = superposition_circuits()?;
    let session = open_session(options).await?;

    for target in &session.targets {
        announce(target);
        for (stage, circuit) in STAGES.iter().zip(&circuits) {
            println!("\n  {}", style(stage).bold());
            let result = execute(&session.executor, target, circuit, shots).await?;
            print_execution(&result);
        }
    }
    Ok(())
}

/// Show that `cx` does not copy a superposition.
pub async fn clone(options: &RunOptions<'_>, shots: u32) -> Result<()> {
    print_header("No-Cloning");
    let circuit = clone_circuit()?;
    let session = open_session(options).await?;

    for target in &session.targets {
        announce(target);
        let result = execute(&session.executor, target, &circuit, shots).await?;
        print_execution(&result);
    }
    Ok(())
}

/// Decide whether an oracle is constant or balanced in one query.
pub async fn deutsch_jozsa(
    options: &RunOptions<'_>,
    inputs: u32,
    oracle: Option<OracleArg>,
    shots: u32,
) -> Result<()> {
    print_header("Deutsch-Jozsa");
    let oracle = match oracle {
        Some(arg) => Oracle::from(arg),
        None => Oracle::random(&mut options.rng()),
    };
    let expected = if oracle.is_constant() {
        OracleVerdict::Constant
    } else {
        OracleVerdict::Balanced
    };
    println!("The oracle is {oracle}.");
    print_result("Input qubits", inputs);

    let circuit = deutsch_jozsa_circuit(inputs, oracle)?;
    let session = open_session(options).await?;

    for target in &session.targets {
        announce(target);
        let result = execute(&session.executor, target, &circuit, shots).await?;
        print_execution(&result);

        match OracleVerdict::from_counts(&result.counts) {
            Some(verdict) if verdict == expected => {
                print_success(&format!("Measured a {verdict} oracle"));
            }
            Some(verdict) => print_warning(&format!("Measured a {verdict} oracle (noise?)")),
            None => print_warning("No counts returned"),
        }
    }
    Ok(())
}

/// Ask the quantum 8-ball a question.
pub async fn eight_ball_answer(options: &RunOptions<'_>) -> Result<()> {
    print_header("Quantum 8-Ball");
    print_info("Think of a yes/no question...");
    let circuit = eight_ball_circuit()?;
    let session = open_session(options).await?;

    for target in &session.targets {
        announce(target);
        let result = execute(&session.executor, target, &circuit, EIGHT_BALL_SHOTS).await?;
        let answer = eight_ball(&result.counts)?;
        println!("The Quantum 8-ball says:");
        println!("  {}", style(answer).magenta().bold());
    }
    Ok(())
}
