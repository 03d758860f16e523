//! What a backend can run.

use qlab_ir::Gate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    pub name: String,
    pub num_qubits: u32,
    pub max_shots: u32,
    /// Cloud-hosted simulators count too.
    pub is_simulator: bool,
    /// Gate names accepted as-is. Empty means the device transpiles
    /// whatever it is sent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub gates: Vec<String>,
}

impl Capabilities {
    /// The local simulator runs every gate the builder can produce.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            max_shots: 100_000,
            is_simulator: true,
            gates: Gate::NAMES.iter().map(|name| (*name).to_owned()).collect(),
        }
    }

    pub fn remote(name: impl Into<String>, num_qubits: u32, max_shots: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            max_shots,
            is_simulator: false,
            gates: Vec::new(),
        }
    }

    pub fn as_simulator(self) -> Self {
        Self {
            is_simulator: true,
            ..self
        }
    }

    pub fn supports_gate(&self, name: &str) -> bool {
        self.gates.is_empty() || self.gates.iter().any(|g| g == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_runs_every_builder_gate() {
        let caps = Capabilities::simulator(10);
        assert_eq!(caps.num_qubits, 10);
        assert_eq!(caps.max_shots, 100_000);
        assert!(caps.is_simulator);
        for name in Gate::NAMES {
            assert!(caps.supports_gate(name), "missing {name}");
        }
        assert!(!caps.supports_gate("prx"));
    }

    #[test]
    fn test_remote_accepts_anything() {
        let caps = Capabilities::remote("ibm_brisbane", 127, 100_000);
        assert!(!caps.is_simulator);
        assert!(caps.supports_gate("ecr"));
        assert!(Capabilities::remote("sim", 32, 1000).as_simulator().is_simulator);
    }
}
