//! Fluent circuit builder.

use std::collections::BTreeSet;

use crate::dag::{CircuitDag, Wire};
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::operation::Operation;
use crate::qubit::{ClassicalRegister, ClbitId, QuantumRegister, QubitId};

/// A named circuit built from registers.
///
/// Every builder method checks its operands and returns the circuit again,
/// so calls chain with `?`:
///
/// ```rust
/// # use qlab_ir::Circuit;
/// let mut circuit = Circuit::new("flip");
/// let q = circuit.add_qreg("q", 1);
/// let c = circuit.add_creg("c", 1);
/// circuit.x(q.get(0)?)?.measure(q.get(0)?, c.get(0)?)?;
/// # Ok::<(), qlab_ir::IrError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Circuit {
    name: String,
    qregs: Vec<QuantumRegister>,
    cregs: Vec<ClassicalRegister>,
    dag: CircuitDag,
    qubit_count: u32,
    clbit_count: u32,
}

impl Circuit {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qregs: Vec::new(),
            cregs: Vec::new(),
            dag: CircuitDag::new(),
            qubit_count: 0,
            clbit_count: 0,
        }
    }

    /// A circuit with anonymous qubits `0..num_qubits` and bits `0..num_clbits`.
    pub fn with_size(name: impl Into<String>, num_qubits: u32, num_clbits: u32) -> Self {
        let mut circuit = Self::new(name);
        circuit.grow_qubits(num_qubits);
        circuit.grow_clbits(num_clbits);
        circuit
    }

    fn grow_qubits(&mut self, n: u32) -> u32 {
        let offset = self.qubit_count;
        for id in offset..offset + n {
            self.dag.add_wire(Wire::Qubit(QubitId(id)));
        }
        self.qubit_count += n;
        offset
    }

    fn grow_clbits(&mut self, n: u32) -> u32 {
        let offset = self.clbit_count;
        for id in offset..offset + n {
            self.dag.add_wire(Wire::Clbit(ClbitId(id)));
        }
        self.clbit_count += n;
        offset
    }

    /// Append `size` fresh qubits under `name`.
    pub fn add_qreg(&mut self, name: impl Into<String>, size: u32) -> QuantumRegister {
        let register = QuantumRegister::new(name, self.grow_qubits(size), size);
        self.qregs.push(register.clone());
        register
    }

    /// Append `size` fresh classical bits under `name`.
    pub fn add_creg(&mut self, name: impl Into<String>, size: u32) -> ClassicalRegister {
        let register = ClassicalRegister::new(name, self.grow_clbits(size), size);
        self.cregs.push(register.clone());
        register
    }

    /// Apply any gate to explicit operands.
    pub fn apply(
        &mut self,
        gate: Gate,
        qubits: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.dag.push(Operation::gate(gate, qubits))?;
        Ok(self)
    }

    pub fn id(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Id, [qubit])
    }

    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::X, [qubit])
    }

    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Y, [qubit])
    }

    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Z, [qubit])
    }

    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::H, [qubit])
    }

    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::S, [qubit])
    }

    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::T, [qubit])
    }

    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Rx(theta), [qubit])
    }

    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Ry(theta), [qubit])
    }

    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Rz(theta), [qubit])
    }

    pub fn u(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::U(theta, phi, lambda), [qubit])
    }

    /// Same as [`Circuit::u`]; OpenQASM 2 calls it `u3`.
    pub fn u3(&mut self, theta: f64, phi: f64, lambda: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.u(theta, phi, lambda, qubit)
    }

    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Cx, [control, target])
    }

    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Cz, [control, target])
    }

    pub fn cp(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::CPhase(theta), [control, target])
    }

    /// Same as [`Circuit::cp`]; OpenQASM 2 calls it `cu1`.
    pub fn cu1(&mut self, theta: f64, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.cp(theta, control, target)
    }

    pub fn swap(&mut self, a: QubitId, b: QubitId) -> IrResult<&mut Self> {
        self.apply(Gate::Swap, [a, b])
    }

    /// Hadamard on every qubit of `qreg`.
    pub fn h_all(&mut self, qreg: &QuantumRegister) -> IrResult<&mut Self> {
        qreg.iter().try_for_each(|q| self.h(q).map(drop))?;
        Ok(self)
    }

    /// Pauli-X on every qubit of `qreg`.
    pub fn x_all(&mut self, qreg: &QuantumRegister) -> IrResult<&mut Self> {
        qreg.iter().try_for_each(|q| self.x(q).map(drop))?;
        Ok(self)
    }

    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.dag.push(Operation::measure([(qubit, clbit)]))?;
        Ok(self)
    }

    /// Measure `qreg[i]` into `creg[i]` for every position.
    pub fn measure_register(
        &mut self,
        qreg: &QuantumRegister,
        creg: &ClassicalRegister,
    ) -> IrResult<&mut Self> {
        if qreg.len() != creg.len() {
            return Err(IrError::RegisterSizeMismatch {
                qreg: qreg.name().to_string(),
                qsize: qreg.len(),
                creg: creg.name().to_string(),
                csize: creg.len(),
            });
        }
        self.dag.push(Operation::measure(qreg.iter().zip(creg.iter())))?;
        Ok(self)
    }

    /// Measure qubit `i` into bit `i` for every qubit, adding bits as needed.
    pub fn measure_all(&mut self) -> IrResult<&mut Self> {
        if self.clbit_count < self.qubit_count {
            self.grow_clbits(self.qubit_count - self.clbit_count);
        }
        let pairs = (0..self.qubit_count).map(|i| (QubitId(i), ClbitId(i)));
        self.dag.push(Operation::measure(pairs))?;
        Ok(self)
    }

    /// Return `qubit` to |0⟩.
    pub fn reset(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.dag.push(Operation::Reset { qubit })?;
        Ok(self)
    }

    pub fn barrier(&mut self, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<&mut Self> {
        self.dag.push(Operation::Barrier {
            qubits: qubits.into_iter().collect(),
        })?;
        Ok(self)
    }

    pub fn barrier_all(&mut self) -> IrResult<&mut Self> {
        self.barrier((0..self.qubit_count).map(QubitId))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_qubits(&self) -> usize {
        self.qubit_count as usize
    }

    pub fn num_clbits(&self) -> usize {
        self.clbit_count as usize
    }

    pub fn depth(&self) -> usize {
        self.dag.depth()
    }

    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Operations in the order they were added.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.dag.operations()
    }

    pub fn qregs(&self) -> &[QuantumRegister] {
        &self.qregs
    }

    pub fn cregs(&self) -> &[ClassicalRegister] {
        &self.cregs
    }

    /// Qubits read out by some measurement, ascending.
    pub fn measured_qubits(&self) -> Vec<QubitId> {
        let qubits: BTreeSet<_> = self.measurement_pairs().map(|(q, _)| q).collect();
        qubits.into_iter().collect()
    }

    /// Classical bits written by some measurement, ascending.
    pub fn measured_clbits(&self) -> Vec<ClbitId> {
        let clbits: BTreeSet<_> = self.measurement_pairs().map(|(_, c)| c).collect();
        clbits.into_iter().collect()
    }

    fn measurement_pairs(&self) -> impl Iterator<Item = (QubitId, ClbitId)> + '_ {
        self.operations().flat_map(|op| match op {
            Operation::Measure { pairs } => pairs.clone(),
            _ => Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_registers_are_laid_out_in_order() {
        let mut circuit = Circuit::new("layout");
        let a = circuit.add_qreg("a", 2);
        let b = circuit.add_qreg("b", 3);
        let c = circuit.add_creg("c", 4);

        assert_eq!(circuit.name(), "layout");
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_clbits(), 4);
        assert_eq!(a.get(1).unwrap(), QubitId(1));
        assert_eq!(b.get(0).unwrap(), QubitId(2));
        assert_eq!(c.get(3).unwrap(), ClbitId(3));
        assert_eq!(circuit.qregs()[1].name(), "b");
        assert_eq!(circuit.cregs().len(), 1);
    }

    #[test]
    fn test_bad_position_adds_nothing() {
        let mut circuit = Circuit::new("bounds");
        let q = circuit.add_qreg("q", 2);
        let result = q.get(2).and_then(|id| circuit.h(id).map(|_| ()));
        assert!(matches!(result, Err(IrError::RegisterIndexOutOfRange { .. })));
        assert_eq!(circuit.dag().num_ops(), 0);
    }

    #[test]
    fn test_bell_pair_depth() {
        let mut circuit = Circuit::with_size("bell", 2, 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_aliases_share_a_gate() {
        let mut circuit = Circuit::with_size("alias", 2, 0);
        circuit
            .u3(PI / 2.0, 0.0, 0.0, QubitId(0))
            .unwrap()
            .cu1(PI / 4.0, QubitId(0), QubitId(1))
            .unwrap();

        let names: Vec<_> = circuit.operations().map(Operation::name).collect();
        assert_eq!(names, ["u", "cp"]);
    }

    #[test]
    fn test_measure_register_sizes_must_match() {
        let mut circuit = Circuit::new("mismatch");
        let q = circuit.add_qreg("q", 3);
        let c = circuit.add_creg("c", 2);
        let err = circuit.measure_register(&q, &c).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot measure register 'q' (3 qubits) into 'c' (2 bits)"
        );
    }

    #[test]
    fn test_measured_bits_skip_ancilla() {
        let mut circuit = Circuit::new("dj");
        let q = circuit.add_qreg("q", 4);
        let c = circuit.add_creg("c", 3);
        circuit.h_all(&q).unwrap();
        for i in 0..3 {
            circuit.measure(q.get(i).unwrap(), c.get(i).unwrap()).unwrap();
        }

        assert_eq!(circuit.measured_qubits(), [QubitId(0), QubitId(1), QubitId(2)]);
        assert_eq!(circuit.measured_clbits().len(), 3);
    }

    #[test]
    fn test_measure_all_grows_clbits() {
        let mut circuit = Circuit::with_size("all", 3, 1);
        circuit.measure_all().unwrap();
        assert_eq!(circuit.num_clbits(), 3);
        assert_eq!(circuit.measured_clbits().len(), 3);
    }

    #[test]
    fn test_reset_and_barrier() {
        let mut circuit = Circuit::with_size("fence", 2, 0);
        circuit
            .x(QubitId(0))
            .unwrap()
            .barrier_all()
            .unwrap()
            .reset(QubitId(1))
            .unwrap();
        assert_eq!(circuit.depth(), 3);
        assert!(circuit.reset(QubitId(7)).is_err());
    }
}
