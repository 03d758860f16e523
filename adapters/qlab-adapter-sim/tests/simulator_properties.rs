//! Properties of simulated counts, checked through the `Backend` interface.

use proptest::prelude::*;
use qlab_adapter_sim::SimulatorBackend;
use qlab_hal::{Backend, Counts};
use qlab_ir::{Circuit, ClbitId, QubitId};
use tokio::runtime::Runtime;

fn run(circuit: &Circuit, shots: u32, seed: u64) -> Counts {
    let rt = Runtime::new().unwrap();
    rt.block_on(async {
        let backend = SimulatorBackend::new().with_seed(seed);
        let job_id = backend.submit(circuit, shots).await.unwrap();
        backend.wait(&job_id).await.unwrap().counts
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// N qubits in superposition, all measured: counts sum to the shot count
    /// and every key is N characters wide.
    #[test]
    fn counts_sum_to_shots(n in 1_u32..6, shots in 1_u32..400, seed in any::<u64>()) {
        let mut circuit = Circuit::new("uniform");
        let q = circuit.add_qreg("q", n);
        let c = circuit.add_creg("c", n);
        circuit.h_all(&q).unwrap();
        circuit.measure_register(&q, &c).unwrap();

        let counts = run(&circuit, shots, seed);
        prop_assert_eq!(counts.total_shots(), u64::from(shots));
        for key in counts.keys() {
            prop_assert_eq!(key.len(), n as usize);
        }
    }

    /// Classical bits never targeted by a measurement always read 0, even
    /// when every qubit is flipped to 1.
    #[test]
    fn unmeasured_positions_read_zero(mask in 0_u32..16) {
        let mut circuit = Circuit::with_size("masked", 4, 4);
        for i in 0..4 {
            circuit.x(QubitId(i)).unwrap();
        }
        for i in (0..4).filter(|i| mask & (1 << i) != 0) {
            circuit.measure(QubitId(i), ClbitId(i)).unwrap();
        }

        let counts = run(&circuit, 20, 0);
        let expected: String = (0..4)
            .rev()
            .map(|i| if mask & (1 << i) != 0 { '1' } else { '0' })
            .collect();
        prop_assert_eq!(counts.get(&expected), 20);
    }
}
