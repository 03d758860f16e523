//! Single-register warm-up circuits: measuring fresh qubits, Bell pairs and
//! superdense coding.

use qlab_ir::{Circuit, IrResult};

/// Shots for the hello world run.
pub const HELLO_SHOTS: u32 = 100;
/// Shots for the basic and superposition runs.
pub const BASIC_SHOTS: u32 = 1024;

/// One qubit measured straight away.
pub fn hello_circuit() -> IrResult<Circuit> {
    measure_fresh("hello", 1)
}

/// Same as [`hello_circuit`], run with more shots.
pub fn basic_circuit() -> IrResult<Circuit> {
    measure_fresh("basic", 1)
}

fn measure_fresh(name: &str, size: u32) -> IrResult<Circuit> {
    let mut circuit = Circuit::new(name);
    let q = circuit.add_qreg("q", size);
    let c = circuit.add_creg("c", size);
    circuit.measure_register(&q, &c)?;
    Ok(circuit)
}

/// The three superposition examples, in order.
///
/// 1. Two qubits measured in their initial state: always `00`.
/// 2. A Bell pair with `x` on the first qubit: `01` and `10`.
/// 3. The same pair decoded again with `cx` and `h`: always `10` (q1 set,
///    clbit 0 rightmost).
pub fn superposition_circuits() -> IrResult<Vec<Circuit>> {
    Ok(vec![
        measure_fresh("initial_state", 2)?,
        bell_with_x("bell_x", false)?,
        bell_with_x("superdense", true)?,
    ])
}

fn bell_with_x(name: &str, decode: bool) -> IrResult<Circuit> {
    let mut circuit = Circuit::new(name);
    let q = circuit.add_qreg("q", 2);
    let c = circuit.add_creg("c", 2);
    let (q0, q1) = (q.get(0)?, q.get(1)?);

    circuit.h(q0)?.cx(q0, q1)?.x(q0)?;
    if decode {
        circuit.cx(q0, q1)?.h(q0)?;
    }
    circuit.measure_register(&q, &c)?;
    Ok(circuit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_measures_one_qubit() {
        let circuit = hello_circuit().unwrap();
        assert_eq!(circuit.num_qubits(), 1);
        assert_eq!(circuit.num_clbits(), 1);
        assert_eq!(circuit.dag().num_ops(), 1);
    }

    #[test]
    fn test_superposition_shapes() {
        let circuits = superposition_circuits().unwrap();
        let ops: Vec<usize> = circuits.iter().map(|c| c.dag().num_ops()).collect();
        // measure | h cx x measure | h cx x cx h measure
        assert_eq!(ops, [1, 4, 6]);
        assert!(circuits.iter().all(|c| c.num_clbits() == 2));
    }
}
