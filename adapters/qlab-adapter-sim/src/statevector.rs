//! Dense state of a small register.
//!
//! Bit `k` of a basis index is the value of qubit `k`. Every gate is a 2x2
//! matrix on one target, optionally conditioned on control bits; `swap` is
//! the only gate applied as a permutation.

use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;
use rand::Rng;

use qlab_ir::Gate;

type Matrix = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

fn diagonal(phase: f64) -> Matrix {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, phase)]]
}

/// Matrix acting on the target qubit (the last operand).
fn target_matrix(gate: &Gate) -> Matrix {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    match *gate {
        Gate::Id => [[ONE, ZERO], [ZERO, ONE]],
        Gate::X | Gate::Cx => [[ZERO, ONE], [ONE, ZERO]],
        Gate::Y => [[ZERO, -I], [I, ZERO]],
        Gate::Z | Gate::Cz => diagonal(std::f64::consts::PI),
        Gate::H => [[h, h], [h, -h]],
        Gate::S => diagonal(std::f64::consts::FRAC_PI_2),
        Gate::T => diagonal(std::f64::consts::FRAC_PI_4),
        Gate::CPhase(theta) => diagonal(theta),
        Gate::Rx(theta) => {
            let (s, c) = (theta / 2.0).sin_cos();
            [[c.into(), -I * s], [-I * s, c.into()]]
        }
        Gate::Ry(theta) => {
            let (s, c) = (theta / 2.0).sin_cos();
            [[c.into(), (-s).into()], [s.into(), c.into()]]
        }
        Gate::Rz(theta) => [
            [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
            [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
        ],
        Gate::U(theta, phi, lambda) => {
            let (s, c) = (theta / 2.0).sin_cos();
            [
                [c.into(), -Complex64::from_polar(s, lambda)],
                [Complex64::from_polar(s, phi), Complex64::from_polar(c, phi + lambda)],
            ]
        }
        // permutation, handled by the caller
        Gate::Swap => [[ONE, ZERO], [ZERO, ONE]],
    }
}

#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// |0…0⟩ on `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self { amplitudes }
    }

    /// Apply `gate` to `qubits`, controls first and target last.
    pub fn apply_gate(&mut self, gate: &Gate, qubits: &[usize]) {
        match (gate, qubits) {
            (Gate::Id, _) => {}
            (Gate::Swap, &[a, b]) => self.swap(a, b),
            (_, &[target]) => self.transform(0, target, &target_matrix(gate)),
            (_, &[control, target]) => self.transform(1 << control, target, &target_matrix(gate)),
            _ => {}
        }
    }

    /// Multiply the target's pair of amplitudes by `m` wherever every
    /// control bit is set.
    fn transform(&mut self, controls: usize, target: usize, m: &Matrix) {
        let bit = 1 << target;
        for low in 0..self.amplitudes.len() {
            if low & bit != 0 || low & controls != controls {
                continue;
            }
            let high = low | bit;
            let (a, b) = (self.amplitudes[low], self.amplitudes[high]);
            self.amplitudes[low] = m[0][0] * a + m[0][1] * b;
            self.amplitudes[high] = m[1][0] * a + m[1][1] * b;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        let (bit_a, bit_b) = (1 << a, 1 << b);
        for index in 0..self.amplitudes.len() {
            if index & bit_a != 0 && index & bit_b == 0 {
                self.amplitudes.swap(index, index ^ bit_a ^ bit_b);
            }
        }
    }

    /// Chance of reading `1` on `qubit`.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let bit = 1 << qubit;
        (0..self.amplitudes.len())
            .filter(|index| index & bit != 0)
            .map(|index| self.amplitudes[index].norm_sqr())
            .sum()
    }

    /// Read `qubit` and project onto the value seen.
    pub fn measure<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) -> bool {
        let p_one = self.probability_one(qubit);
        let one = rng.r#gen::<f64>() < p_one;
        let kept = if one { p_one } else { 1.0 - p_one };
        let scale = if kept > 0.0 { 1.0 / kept.sqrt() } else { 0.0 };

        let bit = 1 << qubit;
        for (index, amp) in self.amplitudes.iter_mut().enumerate() {
            *amp = if (index & bit != 0) == one { *amp * scale } else { ZERO };
        }
        one
    }

    /// Return `qubit` to |0⟩.
    pub fn reset<R: Rng + ?Sized>(&mut self, qubit: usize, rng: &mut R) {
        if self.measure(qubit, rng) {
            self.transform(0, qubit, &target_matrix(&Gate::X));
        }
    }

    /// Running sum of basis probabilities, ready for [`sample_index`].
    pub fn cumulative_probabilities(&self) -> Vec<f64> {
        self.amplitudes
            .iter()
            .scan(0.0, |sum, amp| {
                *sum += amp.norm_sqr();
                Some(*sum)
            })
            .collect()
    }
}

/// Pick a basis index according to a running sum of probabilities.
pub fn sample_index<R: Rng + ?Sized>(cumulative: &[f64], rng: &mut R) -> usize {
    let Some(&total) = cumulative.last() else {
        return 0;
    };
    let draw = rng.r#gen::<f64>() * total;
    cumulative
        .partition_point(|&upto| upto <= draw)
        .min(cumulative.len() - 1)
}
