//! Per-token evaluation errors.
//!
//! None of these are fatal. The calculator checks every failure condition
//! before it touches the stack or the variable table, so a rejected token
//! leaves the session exactly as it found it.

/// Result of evaluating a single token.
pub type EvalResult<T> = Result<T, EvalError>;

/// Why a token could not be applied.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Not a literal, not an operator, not a bind, and not a bound name.
    /// Carries the lowercased spelling that was looked up.
    #[error("failed to interpret `{token}`")]
    UnknownToken { token: String },

    /// Raised only under [`UnderflowPolicy::Strict`](crate::UnderflowPolicy::Strict).
    #[error("stack underflow in `{op}`: needs {needed} operand(s), stack holds {available}")]
    StackUnderflow {
        op: &'static str,
        needed: usize,
        available: usize,
    },

    /// The operands are present but outside the operator's domain.
    #[error("invalid operand for `{op}`: {reason}")]
    InvalidOperand { op: &'static str, reason: String },

    /// `@` or `@^` with nothing left after stripping the markers.
    #[error("variable binding `{token}` has no name")]
    EmptyVariableName { token: String },
}

#[cold]
pub(crate) fn unknown_token(token: &str) -> EvalError {
    EvalError::UnknownToken {
        token: token.to_string(),
    }
}

#[cold]
pub(crate) fn stack_underflow(op: &'static str, needed: usize, available: usize) -> EvalError {
    EvalError::StackUnderflow {
        op,
        needed,
        available,
    }
}

#[cold]
pub(crate) fn invalid_operand(op: &'static str, reason: impl Into<String>) -> EvalError {
    EvalError::InvalidOperand {
        op,
        reason: reason.into(),
    }
}
