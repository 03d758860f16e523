//! Gates the experiments are built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A gate with its angles already bound.
///
/// Names follow `stdgates.inc`; [`Gate::name`] is what the emitter writes
/// and what backends list in their capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Gate {
    Id,
    X,
    Y,
    Z,
    H,
    S,
    T,
    Rx(f64),
    Ry(f64),
    Rz(f64),
    /// `U(theta, phi, lambda)`, the general single-qubit rotation.
    U(f64, f64, f64),
    Cx,
    Cz,
    /// Controlled phase, `cu1` in OpenQASM 2.
    CPhase(f64),
    Swap,
}

impl Gate {
    /// Every gate name the builder can produce.
    pub const NAMES: [&'static str; 15] = [
        "id", "x", "y", "z", "h", "s", "t", "rx", "ry", "rz", "u", "cx", "cz", "cp", "swap",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Gate::Id => "id",
            Gate::X => "x",
            Gate::Y => "y",
            Gate::Z => "z",
            Gate::H => "h",
            Gate::S => "s",
            Gate::T => "t",
            Gate::Rx(_) => "rx",
            Gate::Ry(_) => "ry",
            Gate::Rz(_) => "rz",
            Gate::U(..) => "u",
            Gate::Cx => "cx",
            Gate::Cz => "cz",
            Gate::CPhase(_) => "cp",
            Gate::Swap => "swap",
        }
    }

    /// How many qubits the gate acts on.
    pub fn arity(&self) -> usize {
        match self {
            Gate::Cx | Gate::Cz | Gate::CPhase(_) | Gate::Swap => 2,
            _ => 1,
        }
    }

    /// Bound angles in declaration order; empty for fixed gates.
    pub fn angles(&self) -> Vec<f64> {
        match *self {
            Gate::Rx(a) | Gate::Ry(a) | Gate::Rz(a) | Gate::CPhase(a) => vec![a],
            Gate::U(theta, phi, lambda) => vec![theta, phi, lambda],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        let angles = self.angles();
        if !angles.is_empty() {
            let rendered: Vec<String> = angles.iter().map(|a| format!("{a:.4}")).collect();
            write!(f, "({})", rendered.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_names_cover_every_variant() {
        let gates = [
            Gate::Id,
            Gate::X,
            Gate::Y,
            Gate::Z,
            Gate::H,
            Gate::S,
            Gate::T,
            Gate::Rx(0.0),
            Gate::Ry(0.0),
            Gate::Rz(0.0),
            Gate::U(0.0, 0.0, 0.0),
            Gate::Cx,
            Gate::Cz,
            Gate::CPhase(0.0),
            Gate::Swap,
        ];
        let names: Vec<_> = gates.iter().map(Gate::name).collect();
        assert_eq!(names, Gate::NAMES);
    }

    #[test]
    fn test_arity() {
        assert_eq!(Gate::H.arity(), 1);
        assert_eq!(Gate::U(PI, 0.0, 0.0).arity(), 1);
        assert_eq!(Gate::CPhase(PI).arity(), 2);
        assert_eq!(Gate::Swap.arity(), 2);
    }

    #[test]
    fn test_display_with_angles() {
        assert_eq!(Gate::H.to_string(), "h");
        assert_eq!(Gate::Ry(0.5).to_string(), "ry(0.5000)");
        assert_eq!(Gate::U(1.0, 0.0, 0.25).to_string(), "u(1.0000, 0.0000, 0.2500)");
    }
}
