//! RPN Eval - stack machine for the RPN calculator.
//!
//! This crate holds everything that gives a token its meaning. Reading files,
//! prompting and printing live in `rpnc`.
//!
//! # Architecture
//!
//! - `Stack`: LIFO store of `f64` values, lenient on underflow
//! - `VariableTable`: insertion-ordered name to value bindings
//! - `OperatorRegistry`: spelling to `Op` lookup, built once per process
//! - `evaluate_op`: direct enum-based dispatch of operator semantics
//! - `Calculator`: classifies one token and applies it to the stack and table
//!
//! # Operand Order
//!
//! Operators read their operands in pop order: `a` is the top of the stack,
//! `b` the value below it, `c` the one below that. `10 3 -` therefore computes
//! `3 - 10`.

mod calculator;
pub mod errors;
mod operators;
mod registry;
mod stack;
mod variables;

pub use calculator::{Calculator, Outcome, UnderflowPolicy};
pub use errors::{EvalError, EvalResult};
pub use operators::{evaluate_op, Operands, Pushed};
pub use registry::{Op, OperatorRegistry};
pub use stack::{Stack, EMPTY_VALUE};
pub use variables::{SetOutcome, Variable, VariableTable};
