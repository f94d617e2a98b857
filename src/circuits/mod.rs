// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! operations (`qtour::operations::Operation`).

use crate::core::QubitId;
use crate::operations::Operation;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// An ordered sequence of operations applied to a set of qubits.
///
/// Qubits are registered implicitly as operations mention them; when the
/// circuit is run every registered qubit starts in |0>.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// The unique set of qubits involved across all operations.
    qubits: HashSet<QubitId>,
    /// The ordered sequence of operations.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Creates a new, empty circuit.
    pub fn new() -> Self {
        Self {
            qubits: HashSet::new(),
            operations: Vec::new(),
        }
    }

    /// Appends an operation, registering the qubits it references.
    pub fn add_operation(&mut self, op: Operation) {
        for qubit in op.involved_qubits() {
            self.qubits.insert(qubit);
        }
        self.operations.push(op);
    }

    /// Appends every operation yielded by `ops`.
    pub fn add_operations<I>(&mut self, ops: I)
    where
        I: IntoIterator<Item = Operation>,
    {
        for op in ops {
            self.add_operation(op);
        }
    }

    /// The set of unique qubits involved in this circuit.
    pub fn qubits(&self) -> &HashSet<QubitId> {
        &self.qubits
    }

    /// The qubits in ascending id order.
    pub fn sorted_qubits(&self) -> Vec<QubitId> {
        let mut sorted: Vec<QubitId> = self.qubits.iter().copied().collect();
        sorted.sort();
        sorted
    }

    /// The ordered sequence of operations.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Number of operations in the circuit.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the circuit contains no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl Default for Circuit {
    fn default() -> Self {
        Self::new()
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// Builds a [`Circuit`] through method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a new, empty builder.
    pub fn new() -> Self {
        Self { circuit: Circuit::new() }
    }

    /// Adds a single operation.
    pub fn add_op(mut self, op: Operation) -> Self {
        self.circuit.add_operation(op);
        self
    }

    /// Adds multiple operations.
    pub fn add_ops<I>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = Operation>,
    {
        self.circuit.add_operations(ops);
        self
    }

    /// Finalizes the construction process and returns the built `Circuit`.
    pub fn build(self) -> Circuit {
        self.circuit
    }
}

impl Default for CircuitBuilder {
    fn default() -> Self {
        Self::new()
    }
}

const GATE_WIDTH: usize = 7; // e.g. "───H───"
const WIRE: &str = "───────";
const V_WIRE: char = '│';
const H_WIRE: char = '─';

fn format_gate(symbol: &str) -> String {
    let slen = symbol.chars().count();
    if slen >= GATE_WIDTH {
        symbol.chars().take(GATE_WIDTH).collect()
    } else {
        let total = GATE_WIDTH - slen;
        let pre = total / 2;
        let post = total - pre;
        format!(
            "{}{}{}",
            H_WIRE.to_string().repeat(pre),
            symbol,
            H_WIRE.to_string().repeat(post)
        )
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.operations.is_empty() {
            return writeln!(f, "Circuit[0 operations on 0 qubits]");
        }

        let ops = &self.operations;
        let num_ops = ops.len();
        let sorted = self.sorted_qubits();
        let num_qubits = sorted.len();
        let row_of: HashMap<QubitId, usize> = sorted.iter().enumerate().map(|(i, q)| (*q, i)).collect();

        let label_width = sorted.iter().map(|q| q.to_string().len()).max().unwrap_or(0) + 2;
        let label_padding = " ".repeat(label_width);

        // op_grid[row][time] holds the segment drawn on that wire
        let mut op_grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_ops]; num_qubits];
        // v_connect[row][time] holds the connector drawn below that row
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_ops]; num_qubits];

        fn connect(v_connect: &mut [Vec<char>], r1: usize, r2: usize, t: usize) {
            let (lo, hi) = (r1.min(r2), r1.max(r2));
            for row in v_connect.iter_mut().take(hi).skip(lo) {
                row[t] = V_WIRE;
            }
        }

        for (t, op) in ops.iter().enumerate() {
            match op {
                Operation::Apply { target, gate } => {
                    if let Some(r) = row_of.get(target) {
                        op_grid[*r][t] = format_gate(gate.symbol());
                    }
                }
                Operation::Controlled { control, target, gate } => {
                    if let (Some(rc), Some(rt)) = (row_of.get(control), row_of.get(target)) {
                        op_grid[*rc][t] = format_gate("@");
                        op_grid[*rt][t] = format_gate(gate.symbol());
                        connect(&mut v_connect, *rc, *rt, t);
                    }
                }
                Operation::Swap { a, b } => {
                    if let (Some(ra), Some(rb)) = (row_of.get(a), row_of.get(b)) {
                        op_grid[*ra][t] = format_gate("x");
                        op_grid[*rb][t] = format_gate("x");
                        connect(&mut v_connect, *ra, *rb, t);
                    }
                }
                Operation::Measure { targets } => {
                    for q in targets {
                        if let Some(r) = row_of.get(q) {
                            op_grid[*r][t] = format_gate("M");
                        }
                    }
                }
                Operation::Reset { target } => {
                    if let Some(r) = row_of.get(target) {
                        op_grid[*r][t] = format_gate("|0>");
                    }
                }
            }
        }

        writeln!(f, "Circuit[{} operations on {} qubits]", num_ops, num_qubits)?;
        for r in 0..num_qubits {
            let label = format!("{}: ", sorted[r]);
            write!(f, "{:<width$}", label, width = label_width)?;
            writeln!(f, "{}", op_grid[r].join(""))?;

            if r < num_qubits - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_ops {
                    let pad = GATE_WIDTH.saturating_sub(1);
                    let pre = pad / 2;
                    write!(f, "{}{}{}", " ".repeat(pre), v_connect[r][t], " ".repeat(pad - pre))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::Gate;

    #[test]
    fn builder_registers_qubits_in_order_of_operations() {
        let (q0, q1) = (QubitId(0), QubitId(1));
        let circuit = CircuitBuilder::new()
            .add_op(Operation::apply(q0, Gate::H))
            .add_op(Operation::cnot(q0, q1))
            .add_op(Operation::measure(vec![q0, q1]))
            .build();
        assert_eq!(circuit.len(), 3);
        assert_eq!(circuit.sorted_qubits(), vec![q0, q1]);
    }

    #[test]
    fn diagram_shows_gates_controls_and_measurements() {
        let (q0, q1) = (QubitId(0), QubitId(1));
        let circuit = CircuitBuilder::new()
            .add_op(Operation::apply(q0, Gate::H))
            .add_op(Operation::cnot(q0, q1))
            .add_op(Operation::measure(vec![q0, q1]))
            .build();
        let diagram = circuit.to_string();
        assert!(diagram.starts_with("Circuit[3 operations on 2 qubits]"));
        assert!(diagram.contains("q0: ───H──────@──────M───"));
        assert!(diagram.contains("q1: ──────────X──────M───"));
        assert!(diagram.contains('│'));
    }

    #[test]
    fn empty_circuit_display() {
        assert_eq!(Circuit::new().to_string(), "Circuit[0 operations on 0 qubits]\n");
    }
}
