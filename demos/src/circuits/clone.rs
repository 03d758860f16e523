//! An attempt to copy a qubit with `cx`, showing that the copy only works for
//! basis states.

use qlab_ir::{Circuit, IrResult};

/// Shots for the clone run.
pub const CLONE_SHOTS: u32 = 100;

/// Prepare `|1⟩` (the two `h` cancel), copy it onto q1 with `cx`, then
/// apply `h` twice on both qubits. Measures `11` every shot.
pub fn clone_circuit() -> IrResult<Circuit> {
    let mut circuit = Circuit::new("clone");
    let q = circuit.add_qreg("q", 2);
    let c = circuit.add_creg("c", 2);
    let (q0, q1) = (q.get(0)?, q.get(1)?);

    circuit.x(q0)?.h(q0)?.h(q0)?;
    circuit.cx(q0, q1)?;
    circuit.h(q0)?.h(q1)?.h(q0)?.h(q1)?;
    circuit.measure_register(&q, &c)?;
    Ok(circuit)
}
