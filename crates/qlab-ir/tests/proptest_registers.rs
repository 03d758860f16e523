//! Property-based tests for register addressing and measurement bookkeeping.

use qlab_ir::{Circuit, IrError};
use proptest::prelude::*;

proptest! {
    /// Every position below the register size resolves, every other one fails.
    #[test]
    fn register_bounds(size in 0_u32..16, index in 0_u32..32) {
        let mut circuit = Circuit::new("bounds");
        let _pad = circuit.add_qreg("pad", 3);
        let q = circuit.add_qreg("q", size);

        match q.get(index) {
            Ok(id) => {
                prop_assert!(index < size);
                prop_assert_eq!(id.0, 3 + index);
            }
            Err(IrError::RegisterIndexOutOfRange { index: i, size: s, .. }) => {
                prop_assert!(index >= size);
                prop_assert_eq!(i, index);
                prop_assert_eq!(s, size);
            }
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    /// Measured clbits are exactly the measurement targets.
    #[test]
    fn measured_clbits_match_targets(mask in 0_u32..256) {
        let mut circuit = Circuit::new("mask");
        let q = circuit.add_qreg("q", 8);
        let c = circuit.add_creg("c", 8);
        circuit.h_all(&q).unwrap();

        let mut expected = vec![];
        for i in 0..8 {
            if mask & (1 << i) != 0 {
                circuit.measure(q.get(i).unwrap(), c.get(i).unwrap()).unwrap();
                expected.push(c.get(i).unwrap());
            }
        }

        prop_assert_eq!(circuit.measured_clbits(), expected);
    }

    /// A register-wide measurement never makes the circuit shallower.
    #[test]
    fn depth_grows_with_measurement(n in 1_u32..8) {
        let mut circuit = Circuit::new("depth");
        let q = circuit.add_qreg("q", n);
        let c = circuit.add_creg("c", n);
        circuit.h_all(&q).unwrap();
        let before = circuit.depth();
        circuit.measure_register(&q, &c).unwrap();
        prop_assert_eq!(circuit.depth(), before + 1);
    }
}
