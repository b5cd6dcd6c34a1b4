//! Token evaluator.
//!
//! A [`Calculator`] owns one stack and one variable table for a whole session.
//! Each token is classified by trying, in order:
//!
//! 1. numeric literal: pushed as-is
//! 2. operator: looked up case-insensitively in the [`OperatorRegistry`]
//! 3. bind: `@name` binds the top (peek), `@name^` pops and binds
//! 4. reference: a bound variable's value is pushed
//!
//! Anything left over is an [`EvalError::UnknownToken`].

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::errors::{stack_underflow, unknown_token, EvalError, EvalResult};
use crate::operators::{evaluate_op, Operands};
use crate::registry::{Op, OperatorRegistry};
use crate::stack::Stack;
use crate::variables::{SetOutcome, VariableTable};

/// What to do when an operator needs more values than the stack holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnderflowPolicy {
    /// Missing operands read as `0.0`.
    #[default]
    Lenient,
    /// Reject the token with [`EvalError::StackUnderflow`].
    Strict,
}

/// How a token was applied.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Empty or whitespace-only token; nothing happened.
    Skipped,
    /// A numeric literal was pushed.
    Literal(f64),
    /// An operator was applied.
    Operator(Op),
    /// A variable was bound.
    Bound {
        name: String,
        value: f64,
        /// `true` for `@name^` (the value was popped).
        consumed: bool,
        change: SetOutcome,
    },
    /// A bound variable's value was pushed.
    Recalled { name: String, value: f64 },
}

/// Stack machine state for one session.
#[derive(Debug)]
pub struct Calculator {
    stack: Stack,
    variables: VariableTable,
    registry: &'static OperatorRegistry,
    policy: UnderflowPolicy,
    rng: StdRng,
}

impl Calculator {
    /// Create a calculator with an entropy-seeded random generator.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a calculator whose `rand`/`irand` sequence is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Calculator {
            stack: Stack::new(),
            variables: VariableTable::new(),
            registry: OperatorRegistry::global(),
            policy: UnderflowPolicy::default(),
            rng,
        }
    }

    /// Set the underflow policy.
    #[must_use]
    pub fn with_policy(mut self, policy: UnderflowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn stack(&self) -> &Stack {
        &self.stack
    }

    pub fn variables(&self) -> &VariableTable {
        &self.variables
    }

    /// Current top of the stack (`0.0` when empty).
    #[inline]
    pub fn top(&self) -> f64 {
        self.stack.top()
    }

    /// Evaluate one token.
    ///
    /// On error the stack and variable table are left untouched.
    pub fn eval_token(&mut self, token: &str) -> EvalResult<Outcome> {
        let token = token.trim();
        if token.is_empty() {
            return Ok(Outcome::Skipped);
        }

        if let Ok(value) = token.parse::<f64>() {
            trace!(value, "literal");
            self.stack.push(value);
            return Ok(Outcome::Literal(value));
        }

        let lowered = token.to_lowercase();

        if let Some(op) = self.registry.lookup(&lowered) {
            self.apply(op)?;
            return Ok(Outcome::Operator(op));
        }

        if let Some(binding) = lowered.strip_prefix('@') {
            return self.bind(token, binding);
        }

        self.recall(token, &lowered)
    }

    /// Evaluate every whitespace-separated token in `source`, stopping at the
    /// first error. Returns the final top of the stack.
    pub fn eval_str(&mut self, source: &str) -> EvalResult<f64> {
        for token in source.split_whitespace() {
            self.eval_token(token)?;
        }
        Ok(self.top())
    }

    fn check_height(&self, op: &'static str, needed: usize) -> EvalResult<()> {
        let available = self.stack.height();
        if self.policy == UnderflowPolicy::Strict && available < needed {
            return Err(stack_underflow(op, needed, available));
        }
        Ok(())
    }

    fn apply(&mut self, op: Op) -> EvalResult<()> {
        self.check_height(op.name(), op.arity())?;

        let height = self.stack.height();
        let args = Operands::read(&self.stack);
        let pushed = evaluate_op(op, args, height, &mut self.rng)?;

        self.stack.discard(op.consumes());
        for &value in &pushed {
            self.stack.push(value);
        }
        debug!(op = op.name(), height = self.stack.height(), top = self.top(), "applied");
        Ok(())
    }

    fn bind(&mut self, token: &str, binding: &str) -> EvalResult<Outcome> {
        let (name, consumed) = match binding.strip_suffix('^') {
            Some(name) => (name, true),
            None => (binding, false),
        };
        if name.is_empty() {
            return Err(EvalError::EmptyVariableName {
                token: token.to_string(),
            });
        }
        self.check_height(if consumed { "@^" } else { "@" }, 1)?;

        let value = if consumed {
            self.stack.pop()
        } else {
            self.stack.top()
        };
        let change = self.variables.set(name, value);
        debug!(name, value, consumed, ?change, "bound");

        Ok(Outcome::Bound {
            name: name.to_string(),
            value,
            consumed,
            change,
        })
    }

    fn recall(&mut self, token: &str, name: &str) -> EvalResult<Outcome> {
        let Some(variable) = self.variables.get(name) else {
            debug!(token, known = self.variables.count(), "lookup failed");
            return Err(unknown_token(name));
        };
        let value = variable.value;
        self.stack.push(value);
        Ok(Outcome::Recalled {
            name: name.to_string(),
            value,
        })
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
