//! Operator semantics.
//!
//! Provides direct enum-based dispatch over [`Op`]. Each operator is a pure
//! function from its operands to the values it pushes back; the calculator
//! does the popping and pushing, so a rejected operator never half-applies.

use std::f64::consts::PI;

use rand::Rng;
use smallvec::{smallvec, SmallVec};

use crate::errors::{invalid_operand, EvalResult};
use crate::registry::Op;
use crate::stack::Stack;

/// Values an operator pushes, in push order (the last one ends up on top).
pub type Pushed = SmallVec<[f64; 2]>;

/// The three topmost stack values in pop order.
///
/// Slots the stack cannot fill hold [`EMPTY_VALUE`](crate::EMPTY_VALUE).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Operands {
    /// First pop (the top).
    pub a: f64,
    /// Second pop.
    pub b: f64,
    /// Third pop.
    pub c: f64,
}

impl Operands {
    /// Read operands from the stack without removing anything.
    pub fn read(stack: &Stack) -> Self {
        Operands {
            a: stack.peek(0),
            b: stack.peek(1),
            c: stack.peek(2),
        }
    }
}

/// 1.0 for true, 0.0 for false.
#[inline]
fn truth(holds: bool) -> f64 {
    if holds {
        1.0
    } else {
        0.0
    }
}

/// Truncate toward zero for the bitwise operators (saturating at the `i64` range).
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    reason = "bitwise operators work on the truncated integer part"
)]
fn truncate_int(value: f64) -> i64 {
    value as i64
}

#[inline]
#[allow(
    clippy::cast_precision_loss,
    reason = "results are stored back as f64 like every other value"
)]
fn int_value(int: i64) -> f64 {
    int as f64
}

/// Evaluate `op` over `args`.
///
/// `height` is the stack height before the operator runs (read by `hgt`).
/// `rng` backs `rand` and `irand`.
pub fn evaluate_op<R: Rng + ?Sized>(
    op: Op,
    args: Operands,
    height: usize,
    rng: &mut R,
) -> EvalResult<Pushed> {
    let Operands { a, b, c } = args;
    let pushed: Pushed = match op {
        // Arithmetic
        Op::Add => smallvec![a + b],
        Op::Sub => smallvec![a - b],
        Op::Mul => smallvec![a * b],
        Op::Div => smallvec![b / a],
        Op::RevDiv => smallvec![a / b],
        Op::Pow => smallvec![a.powf(b)],
        Op::Sqrt => smallvec![a.sqrt()],
        Op::Mod => smallvec![a % b],
        Op::Abs => smallvec![a.abs()],
        Op::Neg => smallvec![-a],

        // Min/max
        Op::Min => smallvec![a.min(b)],
        Op::Max => smallvec![a.max(b)],
        Op::ZeroMax => smallvec![a.min(b).max(0.0)],

        // Random
        Op::Rand => smallvec![rng.gen::<f64>()],
        Op::IRand => smallvec![random_below(a, rng)?],

        // Trigonometry
        Op::Sin => smallvec![a.sin()],
        Op::Cos => smallvec![a.cos()],
        Op::Tan => smallvec![a.tan()],
        Op::SinCos => {
            let (sin, cos) = a.sin_cos();
            smallvec![sin, cos]
        }
        Op::Asin => smallvec![a.asin()],
        Op::Acos => smallvec![a.acos()],
        Op::Atan => smallvec![a.atan()],
        Op::Atan2 => smallvec![a.atan2(b)],

        // Comparison
        Op::Lt => smallvec![truth(a < b)],
        Op::LtEq => smallvec![truth(a <= b)],
        Op::Gt => smallvec![truth(a > b)],
        Op::GtEq => smallvec![truth(a >= b)],
        #[allow(clippy::float_cmp, reason = "exact equality is the operator's contract")]
        Op::Eq => smallvec![truth(a == b)],
        #[allow(clippy::float_cmp, reason = "exact equality is the operator's contract")]
        Op::NotEq => smallvec![truth(a != b)],

        // Bitwise
        Op::BitAnd => smallvec![int_value(truncate_int(a) & truncate_int(b))],
        Op::BitOr => smallvec![int_value(truncate_int(a) | truncate_int(b))],
        Op::BitXor => smallvec![int_value(truncate_int(a) ^ truncate_int(b))],
        Op::BitNot => smallvec![int_value(!truncate_int(a))],

        // Conditional
        Op::Select => smallvec![if c == 0.0 { b } else { a }],

        // Stack
        Op::Dup => smallvec![a],
        Op::Swap => smallvec![a, b],
        Op::Drop => SmallVec::new(),
        Op::Height => smallvec![int_value(i64::try_from(height).unwrap_or(i64::MAX))],

        // Constants
        Op::Pi => smallvec![PI],
        Op::Tau => smallvec![2.0 * PI],
        Op::InvPi => smallvec![1.0 / PI],
        Op::InvTau => smallvec![1.0 / (2.0 * PI)],
    };
    Ok(pushed)
}

/// Uniform integer in `[0, bound)` where `bound` is truncated toward zero.
fn random_below<R: Rng + ?Sized>(bound: f64, rng: &mut R) -> EvalResult<f64> {
    let upper = truncate_int(bound);
    if bound.is_nan() || upper < 1 {
        return Err(invalid_operand(
            "irand",
            format!("upper bound must be at least 1, got {bound}"),
        ));
    }
    Ok(int_value(rng.gen_range(0..upper)))
}
