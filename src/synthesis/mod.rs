// src/synthesis/mod.rs

//! Lowers boolean formulas over register bits into reversible gate cascades.
//!
//! The lowering only ever writes into freshly allocated ancilla bits, which
//! start at zero, so every intermediate value is produced without touching
//! its operands:
//! - `NOT e` copies `e` into an ancilla and inverts the copy.
//! - `AND(e1..en)` is a chain of doubly-controlled flips, one ancilla per link.
//! - `OR(e1..en)` is rewritten as `NOT AND(NOT e1..NOT en)`.
//!
//! Ancillas are never uncomputed. The resulting circuit must therefore run on
//! a fresh register each time.

use crate::circuits::CircuitBuilder;
use crate::core::{BitId, Register};
use crate::operations::Gate;
use std::collections::HashMap;
use std::fmt;

/// A boolean formula over register bits.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// The current value of a bit.
    Var(BitId),
    /// Negation.
    Not(Box<Expr>),
    /// Conjunction. Empty means `true`.
    And(Vec<Expr>),
    /// Disjunction. Empty means `false`.
    Or(Vec<Expr>),
}

impl Expr {
    /// The value of `bit`.
    pub fn var(bit: BitId) -> Self {
        Expr::Var(bit)
    }

    /// Negation of `expr`.
    #[allow(clippy::should_implement_trait)]
    pub fn not(expr: Expr) -> Self {
        Expr::Not(Box::new(expr))
    }

    /// Conjunction of `terms`, in order.
    pub fn and<I: IntoIterator<Item = Expr>>(terms: I) -> Self {
        Expr::And(terms.into_iter().collect())
    }

    /// Disjunction of `terms`, in order.
    pub fn or<I: IntoIterator<Item = Expr>>(terms: I) -> Self {
        Expr::Or(terms.into_iter().collect())
    }

    /// Negation with double negation removed.
    fn negated(&self) -> Expr {
        match self {
            Expr::Not(inner) => (**inner).clone(),
            other => Expr::not(other.clone()),
        }
    }

    /// Evaluates the formula directly against `register`, without gates.
    pub fn evaluate(&self, register: &Register) -> bool {
        match self {
            Expr::Var(bit) => register.get(*bit),
            Expr::Not(inner) => !inner.evaluate(register),
            Expr::And(terms) => terms.iter().all(|t| t.evaluate(register)),
            Expr::Or(terms) => terms.iter().any(|t| t.evaluate(register)),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, terms: &[Expr], op: &str, empty: &str) -> fmt::Result {
            if terms.is_empty() {
                return write!(f, "{}", empty);
            }
            write!(f, "(")?;
            for (i, t) in terms.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", op)?;
                }
                write!(f, "{}", t)?;
            }
            write!(f, ")")
        }

        match self {
            Expr::Var(bit) => write!(f, "{}", bit),
            Expr::Not(inner) => write!(f, "¬{}", inner),
            Expr::And(terms) => join(f, terms, "∧", "⊤"),
            Expr::Or(terms) => join(f, terms, "∨", "⊥"),
        }
    }
}

/// Allocates ancillas and emits gates for `Expr` values into a `CircuitBuilder`.
///
/// Lowered sub-expressions are memoized, so a formula that mentions the same
/// sub-expression twice computes it once. Existing bits can be bound to a
/// sub-expression up front with [`Synthesizer::bind`].
///
/// A synthesizer belongs to exactly one `CircuitBuilder`: its memo table
/// records bits computed by gates already pushed to that builder, so lowering
/// against another builder would hand back bits that were never computed
/// there. Create a new synthesizer for every circuit.
#[derive(Debug)]
pub struct Synthesizer {
    next_free: usize,
    memo: HashMap<Expr, BitId>,
}

impl Synthesizer {
    /// Creates a synthesizer that allocates ancillas starting at bit `first_free`.
    pub fn new(first_free: usize) -> Self {
        Self { next_free: first_free, memo: HashMap::new() }
    }

    /// Declares that `bit` already holds the value of `expr`.
    pub fn bind(&mut self, expr: Expr, bit: BitId) {
        self.memo.insert(expr, bit);
    }

    /// First bit not yet allocated; equals the register width required so far.
    pub fn next_free(&self) -> usize {
        self.next_free
    }

    fn alloc(&mut self, builder: &mut CircuitBuilder) -> BitId {
        let bit = BitId(self.next_free);
        self.next_free += 1;
        builder.widen_in_place(self.next_free);
        bit
    }

    /// Emits the gates computing `expr` and returns the bit that holds its value.
    ///
    /// For a bare variable (or a bound sub-expression) no gates are emitted.
    /// The builder is widened to cover every ancilla allocated.
    pub fn lower(&mut self, expr: &Expr, builder: &mut CircuitBuilder) -> BitId {
        if let Some(bit) = self.memo.get(expr) {
            return *bit;
        }

        let bit = match expr {
            Expr::Var(bit) => return *bit,
            Expr::Not(inner) => {
                if let Expr::Not(twice) = inner.as_ref() {
                    return self.lower(twice, builder);
                }
                let source = self.lower(inner, builder);
                let dest = self.alloc(builder);
                builder.push(Gate::cx(source, dest));
                builder.push(Gate::x(dest));
                dest
            }
            Expr::And(terms) => {
                if terms.is_empty() {
                    let dest = self.alloc(builder);
                    builder.push(Gate::x(dest));
                    dest
                } else {
                    let mut operands: Vec<BitId> = Vec::with_capacity(terms.len());
                    for term in terms {
                        let b = self.lower(term, builder);
                        // AND is idempotent, and a repeated control would break the gate
                        if !operands.contains(&b) {
                            operands.push(b);
                        }
                    }
                    let mut partial = operands[0];
                    for next in &operands[1..] {
                        let dest = self.alloc(builder);
                        builder.push(Gate::ccx(partial, *next, dest));
                        partial = dest;
                    }
                    partial
                }
            }
            Expr::Or(terms) => {
                if terms.is_empty() {
                    self.alloc(builder)
                } else {
                    let conjunction = Expr::and(terms.iter().map(Expr::negated));
                    self.lower(&Expr::not(conjunction), builder)
                }
            }
        };

        self.memo.insert(expr.clone(), bit);
        bit
    }

    /// Lowers `expr` and copies its value into `target`, which must be zero
    /// when the gates run.
    pub fn synthesize_into(&mut self, expr: &Expr, target: BitId, builder: &mut CircuitBuilder) {
        let source = self.lower(expr, builder);
        builder.push(Gate::cx(source, target));
    }
}
