//! Print the OpenQASM source of an experiment.

use anyhow::{Context, Result};
use clap::ValueEnum;
use console::style;
use rand::Rng;

use qlab_demos::circuits::deutsch_jozsa::DEFAULT_INPUTS;
use qlab_demos::circuits::random::DEFAULT_MAX;
use qlab_demos::circuits::{
    Lift, Oracle, Password, basic_circuit, clone_circuit, deutsch_jozsa_circuit,
    eight_ball_circuit, hello_circuit, password_search_circuit, random_circuit,
    superposition_circuits, unicorn_circuit,
};
use qlab_demos::runners::RandomNumberRunner;
use qlab_demos::runners::unicorn::{GOAL, STEP};
use qlab_ir::Circuit;

/// Experiments whose circuits can be printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Experiment {
    Hello,
    Basic,
    Superposition,
    Clone,
    DeutschJozsa,
    Search,
    Random,
    EightBall,
    Unicorn,
}

impl Experiment {
    /// Build the circuits this experiment runs.
    ///
    /// Hidden choices (oracle, password) are drawn from `rng`. The unicorn
    /// circuit is the first climb from the ground.
    pub fn circuits<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Vec<Circuit>> {
        let circuits = match self {
            Experiment::Hello => vec![hello_circuit()?],
            Experiment::Basic => vec![basic_circuit()?],
            Experiment::Superposition => superposition_circuits()?,
            Experiment::Clone => vec![clone_circuit()?],
            Experiment::DeutschJozsa => {
                vec![deutsch_jozsa_circuit(DEFAULT_INPUTS, Oracle::random(rng))?]
            }
            Experiment::Search => vec![password_search_circuit(Password::random(rng))?],
            Experiment::Random => {
                let num_qubits = RandomNumberRunner::new(DEFAULT_MAX).num_qubits()?;
                vec![random_circuit(num_qubits)?]
            }
            Experiment::EightBall => vec![eight_ball_circuit()?],
            Experiment::Unicorn => {
                let lift = Lift::from_fraction(STEP as f64 / GOAL as f64);
                vec![unicorn_circuit(lift)?]
            }
        };
        Ok(circuits)
    }
}

/// Emit each circuit of `experiment`.
pub fn render<R: Rng + ?Sized>(experiment: Experiment, qasm2: bool, rng: &mut R) -> Result<String> {
    let mut sources = Vec::new();
    for circuit in experiment.circuits(rng)? {
        let source = if qasm2 {
            qlab_qasm3::emit_qasm2(&circuit)
        } else {
            qlab_qasm3::emit(&circuit)
        }
        .with_context(|| format!("Failed to emit circuit '{}'", circuit.name()))?;
        sources.push(source);
    }
    Ok(sources.join("\n"))
}

/// Execute the qasm command.
pub fn execute<R: Rng + ?Sized>(experiment: Experiment, qasm2: bool, rng: &mut R) -> Result<()> {
    let source = render(experiment, qasm2, rng)?;
    eprintln!("{} {experiment:?}", style("OpenQASM for").dim());
    print!("{source}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_hello_qasm3() {
        let source = render(Experiment::Hello, false, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(source.starts_with("OPENQASM 3.0;"));
        assert!(source.contains("qubit[1] q;"));
        assert!(source.contains("measure"));
    }

    #[test]
    fn test_superposition_has_three_programs() {
        let source =
            render(Experiment::Superposition, false, &mut StdRng::seed_from_u64(0)).unwrap();
        assert_eq!(source.matches("OPENQASM 3.0;").count(), 3);
    }

    #[test]
    fn test_qasm2_dialect() {
        let source = render(Experiment::EightBall, true, &mut StdRng::seed_from_u64(0)).unwrap();
        assert!(source.starts_with("OPENQASM 2.0;"));
        assert!(source.contains("qreg q[3];"));
    }

    #[test]
    fn test_every_experiment_renders() {
        let mut rng = StdRng::seed_from_u64(42);
        for experiment in Experiment::value_variants() {
            assert!(render(*experiment, false, &mut rng).is_ok(), "{experiment:?}");
        }
    }

    #[test]
    fn test_unicorn_first_climb_is_partial() {
        let circuits = Experiment::Unicorn
            .circuits(&mut StdRng::seed_from_u64(0))
            .unwrap();
        let source = qlab_qasm3::emit(&circuits[0]).unwrap();
        assert!(source.contains("u("));
    }
}
