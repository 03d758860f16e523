//! Wire dependency graph behind a [`Circuit`](crate::Circuit).
//!
//! Each operation is a node. An edge runs from the previous operation on a
//! wire to the next one, labelled with that wire. Node indices grow in
//! insertion order, which is also a valid execution order.

use std::fmt;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::operation::Operation;
use crate::qubit::{ClbitId, QubitId};

/// A quantum or classical wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wire {
    Qubit(QubitId),
    Clbit(ClbitId),
}

impl fmt::Display for Wire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wire::Qubit(q) => write!(f, "q[{}]", q.0),
            Wire::Clbit(c) => write!(f, "c[{}]", c.0),
        }
    }
}

fn wires_of(op: &Operation) -> Vec<Wire> {
    op.qubits()
        .into_iter()
        .map(Wire::Qubit)
        .chain(op.clbits().into_iter().map(Wire::Clbit))
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CircuitDag {
    graph: DiGraph<Operation, Wire>,
    wires: FxHashSet<Wire>,
    /// Latest operation on each wire that has seen one.
    frontier: FxHashMap<Wire, NodeIndex>,
    /// Layer of every node, indexed like the graph.
    layers: Vec<usize>,
    num_qubits: usize,
    num_clbits: usize,
}

impl CircuitDag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a wire. Declaring it twice is a no-op.
    pub fn add_wire(&mut self, wire: Wire) {
        if self.wires.insert(wire) {
            match wire {
                Wire::Qubit(_) => self.num_qubits += 1,
                Wire::Clbit(_) => self.num_clbits += 1,
            }
        }
    }

    /// Append an operation after everything already on its wires.
    ///
    /// Operands are checked first; on error the graph is untouched.
    pub fn push(&mut self, op: Operation) -> IrResult<NodeIndex> {
        if let Operation::Gate { gate, qubits } = &op {
            if gate.arity() != qubits.len() {
                return Err(IrError::Arity {
                    gate: gate.name(),
                    expected: gate.arity(),
                    got: qubits.len(),
                });
            }
        }

        let wires = wires_of(&op);
        let mut seen = FxHashSet::default();
        for &wire in &wires {
            if !self.wires.contains(&wire) {
                return Err(IrError::UnknownWire { op: op.name(), wire });
            }
            if !seen.insert(wire) {
                return Err(IrError::RepeatedWire { op: op.name(), wire });
            }
        }

        let layer = 1 + wires
            .iter()
            .filter_map(|w| self.frontier.get(w))
            .map(|prev| self.layers[prev.index()])
            .max()
            .unwrap_or(0);

        let node = self.graph.add_node(op);
        self.layers.push(layer);
        for wire in wires {
            if let Some(prev) = self.frontier.insert(wire, node) {
                self.graph.add_edge(prev, node, wire);
            }
        }
        Ok(node)
    }

    /// Operations in the order they were pushed.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        self.graph.node_indices().map(move |n| &self.graph[n])
    }

    /// Operations that must run right before `node`.
    pub fn predecessors(&self, node: NodeIndex) -> Vec<&Operation> {
        self.graph
            .neighbors_directed(node, Direction::Incoming)
            .map(|n| &self.graph[n])
            .collect()
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn num_clbits(&self) -> usize {
        self.num_clbits
    }

    pub fn num_ops(&self) -> usize {
        self.graph.node_count()
    }

    /// Longest chain of dependent operations. Barriers occupy a layer.
    pub fn depth(&self) -> usize {
        self.layers.iter().copied().max().unwrap_or(0)
    }
}
