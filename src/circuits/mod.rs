// src/circuits/mod.rs

//! Defines structures for representing and building ordered sequences of
//! reversible gates (`pumpq::operations::Gate`).
//!
//! A `Circuit` is an immutable value: a register width, the classical literals
//! encoded into its input bits, the ordered gate list, and the bits to decode
//! once every gate has been applied. Circuits are assembled with
//! `CircuitBuilder` and never change after `build`.

pub mod pump;

use crate::core::{BitId, PumpqError};
use crate::operations::Gate;
use crate::validation::validate_circuit;
use std::collections::BTreeMap;
use std::fmt;

/// An ordered sequence of reversible gates over a fixed-width register.
///
/// Analogy: similar to `qiskit.QuantumCircuit` restricted to `x`, `cx`, `ccx`
/// and `measure`, with the input basis state stored alongside the gates.
#[derive(Clone, PartialEq)]
pub struct Circuit {
    /// Number of bits in the register the circuit runs on.
    width: usize,
    /// Literal values written into input bits before any gate runs.
    encoding: Vec<(BitId, bool)>,
    /// The gates, in application order.
    gates: Vec<Gate>,
    /// Gate positions preceded by a barrier. Only used for rendering.
    barriers: Vec<usize>,
    /// Bits read back after the last gate, in decode order.
    outputs: Vec<BitId>,
    /// Optional human-readable names for bits.
    labels: BTreeMap<BitId, String>,
}

impl Circuit {
    /// Register width the circuit expects.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Input bits with the literal encoded into each.
    pub fn encoding(&self) -> &[(BitId, bool)] {
        &self.encoding
    }

    /// Input bit indices, in encoding order.
    pub fn inputs(&self) -> Vec<BitId> {
        self.encoding.iter().map(|(bit, _)| *bit).collect()
    }

    /// The ordered gate sequence.
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Output bit indices, in decode order.
    pub fn outputs(&self) -> &[BitId] {
        &self.outputs
    }

    /// Gate positions that a barrier precedes.
    pub fn barriers(&self) -> &[usize] {
        &self.barriers
    }

    /// The label attached to `bit`, if any.
    pub fn label(&self, bit: BitId) -> Option<&str> {
        self.labels.get(&bit).map(String::as_str)
    }

    /// Total number of gates.
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns `true` if the circuit has no gates.
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Basis-state index of the encoded input (bit `i` of the index is register bit `i`).
    ///
    /// Returns `None` if a set input lies at or beyond `usize::BITS`, where
    /// no basis index can represent it.
    pub fn initial_basis_index(&self) -> Option<usize> {
        self.encoding
            .iter()
            .filter(|(_, value)| *value)
            .try_fold(0usize, |acc, (bit, _)| {
                let shift = u32::try_from(bit.0).ok()?;
                Some(acc | 1usize.checked_shl(shift)?)
            })
    }
}

//-------------------------------------------------------------------------
// Circuit Builder
//-------------------------------------------------------------------------

/// A helper struct for programmatically constructing `Circuit` instances using method chaining.
pub struct CircuitBuilder {
    circuit: Circuit,
}

impl CircuitBuilder {
    /// Creates a builder for a register of `width` bits.
    pub fn new(width: usize) -> Self {
        Self {
            circuit: Circuit {
                width,
                encoding: Vec::new(),
                gates: Vec::new(),
                barriers: Vec::new(),
                outputs: Vec::new(),
                labels: BTreeMap::new(),
            },
        }
    }

    /// Current register width.
    pub fn width(&self) -> usize {
        self.circuit.width
    }

    /// Grows the register to at least `width` bits. Never shrinks it.
    pub fn widen(mut self, width: usize) -> Self {
        self.circuit.width = self.circuit.width.max(width);
        self
    }

    pub(crate) fn widen_in_place(&mut self, width: usize) {
        self.circuit.width = self.circuit.width.max(width);
    }

    /// Names a bit for schematics.
    pub fn label(mut self, bit: BitId, name: impl Into<String>) -> Self {
        self.circuit.labels.insert(bit, name.into());
        self
    }

    /// Records `value` as the initial literal of input `bit`.
    pub fn encode(mut self, bit: BitId, value: bool) -> Self {
        self.circuit.encoding.push((bit, value));
        self
    }

    /// Appends a single gate.
    pub fn add_gate(mut self, gate: Gate) -> Self {
        self.push(gate);
        self
    }

    /// Appends multiple gates in order.
    pub fn add_gates<I>(mut self, gates: I) -> Self
    where
        I: IntoIterator<Item = Gate>,
    {
        for gate in gates {
            self.push(gate);
        }
        self
    }

    /// Appends `X(target)`.
    pub fn x(self, target: BitId) -> Self {
        self.add_gate(Gate::x(target))
    }

    /// Appends `CX(control -> target)`.
    pub fn cx(self, control: BitId, target: BitId) -> Self {
        self.add_gate(Gate::cx(control, target))
    }

    /// Appends `CCX(control1, control2 -> target)`.
    pub fn ccx(self, control1: BitId, control2: BitId, target: BitId) -> Self {
        self.add_gate(Gate::ccx(control1, control2, target))
    }

    /// Writes `NOT source` into a zeroed `target` by copying then inverting.
    /// `source` is left unchanged.
    pub fn copy_inverted(self, source: BitId, target: BitId) -> Self {
        self.cx(source, target).x(target)
    }

    /// Flips `target` when `source` is false, leaving `source` unchanged:
    /// invert the source, use it as a control, invert it back.
    pub fn flip_if_clear(self, source: BitId, target: BitId) -> Self {
        self.x(source).cx(source, target).x(source)
    }

    /// Writes the AND of `operands` into a zeroed `target` using a chain of
    /// doubly-controlled flips.
    ///
    /// Each ancilla receives the AND of the previous partial result and the
    /// next operand; the last operand is combined straight into `target`.
    /// Requires `operands.len() - 2` ancillas for two or more operands. The
    /// ancillas keep their partial results afterwards.
    ///
    /// # Errors
    /// Returns `PumpqError::InvalidOperation` if fewer than two operands are
    /// given or the ancilla count does not match.
    pub fn and_cascade(self, operands: &[BitId], ancillas: &[BitId], target: BitId) -> Result<Self, PumpqError> {
        if operands.len() < 2 {
            return Err(PumpqError::InvalidOperation {
                message: format!("AND cascade needs at least two operands, got {}", operands.len()),
            });
        }
        if ancillas.len() != operands.len() - 2 {
            return Err(PumpqError::InvalidOperation {
                message: format!(
                    "AND cascade over {} operands needs {} ancillas, got {}",
                    operands.len(),
                    operands.len() - 2,
                    ancillas.len()
                ),
            });
        }

        Ok(self.and_chain(operands, ancillas, target))
    }

    /// Unchecked core of [`CircuitBuilder::and_cascade`]: link `k` writes into
    /// `ancillas[k]`, and the first link past the ancillas writes into
    /// `target`. Callers guarantee the operand and ancilla counts match.
    pub(crate) fn and_chain(mut self, operands: &[BitId], ancillas: &[BitId], target: BitId) -> Self {
        let Some((first, rest)) = operands.split_first() else {
            return self;
        };
        let mut partial = *first;
        for (i, next) in rest.iter().enumerate() {
            let dest = ancillas.get(i).copied().unwrap_or(target);
            self.push(Gate::ccx(partial, *next, dest));
            partial = dest;
        }
        self
    }

    /// Marks a stage boundary for the schematic. Has no effect on evaluation.
    pub fn barrier(mut self) -> Self {
        let at = self.circuit.gates.len();
        if self.circuit.barriers.last() != Some(&at) {
            self.circuit.barriers.push(at);
        }
        self
    }

    /// Declares `bit` as the next output to decode.
    pub fn measure(mut self, bit: BitId) -> Self {
        self.circuit.outputs.push(bit);
        self
    }

    pub(crate) fn push(&mut self, gate: Gate) {
        self.circuit.gates.push(gate);
    }

    /// Finalizes the construction process after checking that every bit is in
    /// range and no gate repeats an operand.
    ///
    /// # Errors
    /// Returns the first `PumpqError` reported by `validate_circuit`.
    pub fn build(self) -> Result<Circuit, PumpqError> {
        validate_circuit(&self.circuit)?;
        Ok(self.circuit)
    }

    /// Finalizes without validation, for circuits that are valid by construction.
    pub(crate) fn build_unchecked(self) -> Circuit {
        self.circuit
    }
}

//-------------------------------------------------------------------------
// Schematic
//-------------------------------------------------------------------------

/// One column of the rendered schematic.
enum Column<'a> {
    Encode,
    Barrier,
    Gate(&'a Gate),
    Measure,
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.width == 0 {
            return writeln!(f, "pumpq::Circuit[0 gates on 0 bits]");
        }

        // --- Setup ---
        let mut columns: Vec<Column<'_>> = Vec::new();
        if self.encoding.iter().any(|(_, value)| *value) {
            columns.push(Column::Encode);
        }
        for (t, gate) in self.gates.iter().enumerate() {
            if self.barriers.contains(&t) {
                columns.push(Column::Barrier);
            }
            columns.push(Column::Gate(gate));
        }
        if self.barriers.contains(&self.gates.len()) {
            columns.push(Column::Barrier);
        }
        if !self.outputs.is_empty() {
            columns.push(Column::Measure);
        }
        let num_cols = columns.len();

        let row_labels: Vec<String> = (0..self.width)
            .map(|i| {
                let bit = BitId(i);
                match self.label(bit) {
                    Some(name) => format!("{} {}: ", bit, name),
                    None => format!("{}: ", bit),
                }
            })
            .collect();
        let max_label_width = row_labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let label_padding = " ".repeat(max_label_width);

        const GATE_WIDTH: usize = 7; // e.g., "───X───"
        const WIRE: &str = "───────";
        const V_WIRE: char = '│';
        const H_WIRE: char = '─';

        // grid[row][col] holds the cell text, v_connect[row][col] the connector below it
        let mut grid: Vec<Vec<String>> = vec![vec![WIRE.to_string(); num_cols]; self.width];
        let mut v_connect: Vec<Vec<char>> = vec![vec![' '; num_cols]; self.width];

        fn format_gate(symbol: &str) -> String {
            let slen = symbol.chars().count();
            if slen >= GATE_WIDTH {
                symbol.chars().take(GATE_WIDTH).collect()
            } else {
                let total_dashes = GATE_WIDTH - slen;
                let pre_dashes = total_dashes / 2;
                let post_dashes = total_dashes - pre_dashes;
                format!("{}{}{}", H_WIRE.to_string().repeat(pre_dashes), symbol, H_WIRE.to_string().repeat(post_dashes))
            }
        }

        // --- Populate Grids ---
        for (t, column) in columns.iter().enumerate() {
            match column {
                Column::Encode => {
                    for (bit, value) in &self.encoding {
                        if *value && bit.0 < self.width {
                            grid[bit.0][t] = format_gate("X");
                        }
                    }
                }
                Column::Barrier => {
                    for row in grid.iter_mut() {
                        row[t] = format_gate("░");
                    }
                }
                Column::Gate(gate) => {
                    let target = gate.target().0;
                    let controls: Vec<usize> = gate.controls().iter().map(|c| c.0).collect();
                    if target < self.width {
                        grid[target][t] = format_gate("X");
                    }
                    for c in &controls {
                        if *c < self.width {
                            grid[*c][t] = format_gate("@");
                        }
                    }
                    if let (Some(r_min), Some(r_max)) = (
                        controls.iter().chain(std::iter::once(&target)).min(),
                        controls.iter().chain(std::iter::once(&target)).max(),
                    ) {
                        for row_vec in v_connect.iter_mut().take((*r_max).min(self.width)).skip(*r_min) {
                            row_vec[t] = V_WIRE;
                        }
                    }
                }
                Column::Measure => {
                    for (slot, bit) in self.outputs.iter().enumerate() {
                        if bit.0 < self.width {
                            grid[bit.0][t] = format_gate(&format!("M{}", slot));
                        }
                    }
                }
            }
        }

        // --- Format Output String ---
        writeln!(f, "pumpq::Circuit[{} gates on {} bits]", self.gates.len(), self.width)?;
        for r in 0..self.width {
            write!(f, "{:<width$}", row_labels[r], width = max_label_width)?;
            writeln!(f, "{}", grid[r].join(""))?;

            if r < self.width - 1 {
                write!(f, "{}", label_padding)?;
                for t in 0..num_cols {
                    let connector = v_connect[r][t];
                    let padding_needed = GATE_WIDTH.saturating_sub(1);
                    let pre_pad = padding_needed / 2;
                    let post_pad = padding_needed - pre_pad;
                    write!(f, "{}{}{}", " ".repeat(pre_pad), connector, " ".repeat(post_pad))?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

// Keep the Debug impl delegating to Display
impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
