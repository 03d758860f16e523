//! The one-qubit circuit behind the unicorn flight game.

use std::f64::consts::PI;

use qlab_ir::{Circuit, IrResult};

/// Rotation applied to the unicorn qubit before it is measured.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lift {
    /// Leave the qubit in `|0⟩`.
    Grounded,
    /// `u3(fraction·π, 0, 0)`: measures `1` with probability `sin²(fraction·π/2)`.
    Partial(f64),
    /// `x`: measures `1` every shot.
    Full,
}

impl Lift {
    /// Lift for a target altitude expressed as a fraction of the goal.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction >= 1.0 {
            Lift::Full
        } else if fraction > 0.0 {
            Lift::Partial(fraction)
        } else {
            Lift::Grounded
        }
    }
}

/// Apply `lift` to a single qubit and measure it.
pub fn unicorn_circuit(lift: Lift) -> IrResult<Circuit> {
    let mut circuit = Circuit::new("unicorn");
    let q = circuit.add_qreg("unicorn", 1);
    let c = circuit.add_creg("altitude", 1);
    let qubit = q.get(0)?;

    match lift {
        Lift::Grounded => {}
        Lift::Partial(fraction) => {
            circuit.u3(fraction * PI, 0.0, 0.0, qubit)?;
        }
        Lift::Full => {
            circuit.x(qubit)?;
        }
    }
    circuit.measure_register(&q, &c)?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_from_fraction() {
        assert_eq!(Lift::from_fraction(1.0), Lift::Full);
        assert_eq!(Lift::from_fraction(1.3), Lift::Full);
        assert_eq!(Lift::from_fraction(0.15), Lift::Partial(0.15));
        assert_eq!(Lift::from_fraction(0.0), Lift::Grounded);
        assert_eq!(Lift::from_fraction(-0.15), Lift::Grounded);
    }

    #[test]
    fn test_unicorn_circuit_gates() {
        let names = |lift| {
            unicorn_circuit(lift)
                .unwrap()
                .operations()
                .map(|op| op.name().to_string())
                .collect::<Vec<_>>()
        };
        assert_eq!(names(Lift::Grounded), ["measure"]);
        assert_eq!(names(Lift::Full), ["x", "measure"]);
        assert_eq!(names(Lift::Partial(0.5)), ["u", "measure"]);
    }
}
