//! Circuit to OpenQASM text.

use std::f64::consts::PI;
use std::fmt::Write;

use qlab_ir::{Circuit, Gate, Operation, QubitId};

use crate::error::{EmitError, EmitResult};

/// Render a circuit as OpenQASM 3.0, gate names per `stdgates.inc`.
pub fn emit(circuit: &Circuit) -> EmitResult<String> {
    Dialect::Qasm3.render(circuit)
}

/// Render a circuit as OpenQASM 2.0 against `qelib1.inc`.
///
/// Registers become `qreg`/`creg`, readout becomes `measure q[i] -> c[j];`,
/// and `u`, `cp` are spelled `u3`, `cu1`.
pub fn emit_qasm2(circuit: &Circuit) -> EmitResult<String> {
    Dialect::Qasm2.render(circuit)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Qasm2,
    Qasm3,
}

impl Dialect {
    fn header(self) -> &'static str {
        match self {
            Dialect::Qasm2 => "OPENQASM 2.0;\ninclude \"qelib1.inc\";",
            Dialect::Qasm3 => "OPENQASM 3.0;\ninclude \"stdgates.inc\";",
        }
    }

    fn qubits_decl(self, n: usize) -> String {
        match self {
            Dialect::Qasm2 => format!("qreg q[{n}];"),
            Dialect::Qasm3 => format!("qubit[{n}] q;"),
        }
    }

    fn clbits_decl(self, n: usize) -> String {
        match self {
            Dialect::Qasm2 => format!("creg c[{n}];"),
            Dialect::Qasm3 => format!("bit[{n}] c;"),
        }
    }

    fn readout(self, qubit: QubitId, clbit: u32) -> String {
        match self {
            Dialect::Qasm2 => format!("measure q[{}] -> c[{clbit}];", qubit.0),
            Dialect::Qasm3 => format!("c[{clbit}] = measure q[{}];", qubit.0),
        }
    }

    fn spell(self, gate: &Gate) -> &'static str {
        match (self, gate) {
            (Dialect::Qasm2, Gate::U(..)) => "u3",
            (Dialect::Qasm2, Gate::CPhase(_)) => "cu1",
            _ => gate.name(),
        }
    }

    fn render(self, circuit: &Circuit) -> EmitResult<String> {
        let mut out = String::new();
        writeln!(out, "{}", self.header())?;
        writeln!(out)?;

        let (nq, nc) = (circuit.num_qubits(), circuit.num_clbits());
        if nq > 0 {
            writeln!(out, "{}", self.qubits_decl(nq))?;
        }
        if nc > 0 {
            writeln!(out, "{}", self.clbits_decl(nc))?;
        }
        if nq + nc > 0 {
            writeln!(out)?;
        }

        for op in circuit.operations() {
            match op {
                Operation::Gate { gate, qubits } => {
                    let operands = operand_list(qubits);
                    let angles = angle_list(gate)?;
                    if angles.is_empty() {
                        writeln!(out, "{} {operands};", self.spell(gate))?;
                    } else {
                        writeln!(out, "{}({angles}) {operands};", self.spell(gate))?;
                    }
                }
                Operation::Measure { pairs } => {
                    for (q, c) in pairs {
                        writeln!(out, "{}", self.readout(*q, c.0))?;
                    }
                }
                Operation::Reset { qubit } => writeln!(out, "reset q[{}];", qubit.0)?,
                Operation::Barrier { qubits } if qubits.is_empty() => writeln!(out, "barrier;")?,
                Operation::Barrier { qubits } => {
                    writeln!(out, "barrier {};", operand_list(qubits))?;
                }
            }
        }
        Ok(out)
    }
}

fn operand_list(qubits: &[QubitId]) -> String {
    let names: Vec<String> = qubits.iter().map(|q| format!("q[{}]", q.0)).collect();
    names.join(", ")
}

fn angle_list(gate: &Gate) -> EmitResult<String> {
    let angles = gate
        .angles()
        .into_iter()
        .map(|value| {
            if value.is_finite() {
                Ok(angle(value))
            } else {
                Err(EmitError::NonFiniteAngle {
                    gate: gate.name(),
                    value,
                })
            }
        })
        .collect::<EmitResult<Vec<_>>>()?;
    Ok(angles.join(", "))
}

/// Quarter, half and whole turns of pi print symbolically.
fn angle(value: f64) -> String {
    const SYMBOLIC: [(f64, &str); 3] = [(PI, "pi"), (PI / 2.0, "pi/2"), (PI / 4.0, "pi/4")];
    for (magnitude, text) in SYMBOLIC {
        if (value.abs() - magnitude).abs() < 1e-10 {
            let sign = if value < 0.0 { "-" } else { "" };
            return format!("{sign}{text}");
        }
    }
    format!("{value:.6}")
}
