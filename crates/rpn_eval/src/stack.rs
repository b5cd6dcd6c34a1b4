//! The numeric evaluation stack.
//!
//! Reading past the bottom never fails: `pop`, `top` and `peek` return
//! [`EMPTY_VALUE`] for a missing slot and leave the stack as it was. Strict
//! callers compare [`Stack::height`] against the operand count first.

/// Stand-in for an operand the stack does not have.
pub const EMPTY_VALUE: f64 = 0.0;

/// LIFO store of calculator values. The last element of `values` is the top.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stack {
    values: Vec<f64>,
}

impl Stack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Stack { values: Vec::new() }
    }

    /// Push `value` as the new top.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Remove and return the top, or [`EMPTY_VALUE`] when empty.
    #[inline]
    pub fn pop(&mut self) -> f64 {
        self.values.pop().unwrap_or(EMPTY_VALUE)
    }

    /// Return the top without removing it, or [`EMPTY_VALUE`] when empty.
    #[inline]
    pub fn top(&self) -> f64 {
        self.peek(0)
    }

    /// Return the value `depth` slots below the top (`0` is the top itself).
    pub fn peek(&self, depth: usize) -> f64 {
        self.values
            .len()
            .checked_sub(depth)
            .and_then(|above| above.checked_sub(1))
            .and_then(|index| self.values.get(index))
            .copied()
            .unwrap_or(EMPTY_VALUE)
    }

    /// Drop up to `count` values from the top.
    pub fn discard(&mut self, count: usize) {
        let keep = self.values.len().saturating_sub(count);
        self.values.truncate(keep);
    }

    /// Number of values on the stack.
    #[inline]
    pub fn height(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values from bottom to top.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
