//! Three qubits in superposition, measured once.

use qlab_ir::{Circuit, IrResult};

/// The 8-ball is asked exactly once.
pub const EIGHT_BALL_SHOTS: u32 = 1;

/// Uniform superposition over eight answers.
pub fn eight_ball_circuit() -> IrResult<Circuit> {
    let mut circuit = Circuit::new("eight_ball");
    let q = circuit.add_qreg("q", 3);
    let c = circuit.add_creg("c", 3);
    circuit.h_all(&q)?;
    circuit.measure_register(&q, &c)?;
    Ok(circuit)
}
