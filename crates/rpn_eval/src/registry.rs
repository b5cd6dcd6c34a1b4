//! Operator registry: token spelling to [`Op`].
//!
//! The spelling table is fixed at compile time. [`OperatorRegistry::global`]
//! turns it into a hash index once per process; every calculator borrows that
//! same instance.
//!
//! # Spelling Collisions
//!
//! A spelling registered more than once resolves to its FIRST registration.
//! The only collision in the table is `^`, listed under arithmetic (power)
//! before bitwise (xor), so `^` is power and xor is spelled `xor`.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

/// Every operator the calculator understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    RevDiv,
    Pow,
    Sqrt,
    Mod,
    Abs,
    Neg,

    // Min/max
    Min,
    Max,
    ZeroMax,

    // Random
    Rand,
    IRand,

    // Trigonometry
    Sin,
    Cos,
    Tan,
    SinCos,
    Asin,
    Acos,
    Atan,
    Atan2,

    // Comparison
    Lt,
    LtEq,
    Gt,
    GtEq,
    Eq,
    NotEq,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,
    BitNot,

    // Conditional
    Select,

    // Stack
    Dup,
    Swap,
    Drop,
    Height,

    // Constants
    Pi,
    Tau,
    InvPi,
    InvTau,
}

impl Op {
    /// Number of stack values the operator reads.
    pub const fn arity(self) -> usize {
        match self {
            Op::Rand | Op::Height | Op::Pi | Op::Tau | Op::InvPi | Op::InvTau => 0,
            Op::Sqrt
            | Op::Abs
            | Op::Neg
            | Op::IRand
            | Op::Sin
            | Op::Cos
            | Op::Tan
            | Op::SinCos
            | Op::Asin
            | Op::Acos
            | Op::Atan
            | Op::BitNot
            | Op::Dup
            | Op::Drop => 1,
            Op::Select => 3,
            _ => 2,
        }
    }

    /// Number of stack values the operator removes before pushing its results.
    ///
    /// Equal to [`Op::arity`] except for `dup`, which reads the top but
    /// leaves it in place.
    pub const fn consumes(self) -> usize {
        match self {
            Op::Dup => 0,
            _ => self.arity(),
        }
    }

    /// Canonical spelling, used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Op::Add => "+",
            Op::Sub => "-",
            Op::Mul => "*",
            Op::Div => "/",
            Op::RevDiv => "\\",
            Op::Pow => "pow",
            Op::Sqrt => "sqrt",
            Op::Mod => "%",
            Op::Abs => "abs",
            Op::Neg => "neg",
            Op::Min => "min",
            Op::Max => "max",
            Op::ZeroMax => "zmax",
            Op::Rand => "rand",
            Op::IRand => "irand",
            Op::Sin => "sin",
            Op::Cos => "cos",
            Op::Tan => "tan",
            Op::SinCos => "sincos",
            Op::Asin => "asin",
            Op::Acos => "acos",
            Op::Atan => "atan",
            Op::Atan2 => "atan2",
            Op::Lt => "<",
            Op::LtEq => "<=",
            Op::Gt => ">",
            Op::GtEq => ">=",
            Op::Eq => "==",
            Op::NotEq => "!=",
            Op::BitAnd => "and",
            Op::BitOr => "or",
            Op::BitXor => "xor",
            Op::BitNot => "not",
            Op::Select => "?",
            Op::Dup => "dup",
            Op::Swap => "swap",
            Op::Drop => "pop",
            Op::Height => "hgt",
            Op::Pi => "pi",
            Op::Tau => "tau",
            Op::InvPi => "ipi",
            Op::InvTau => "itau",
        }
    }
}

/// All spellings in registration order. Aliases share an `Op`.
const SPELLINGS: &[(&str, Op)] = &[
    // Arithmetic
    ("+", Op::Add),
    ("-", Op::Sub),
    ("/", Op::Div),
    ("*", Op::Mul),
    ("\\", Op::RevDiv),
    ("^", Op::Pow),
    ("pow", Op::Pow),
    ("sqrt", Op::Sqrt),
    ("%", Op::Mod),
    ("abs", Op::Abs),
    ("neg", Op::Neg),
    // Min/max
    ("min", Op::Min),
    ("max", Op::Max),
    ("zmax", Op::ZeroMax),
    // Random
    ("rand", Op::Rand),
    ("irand", Op::IRand),
    // Trigonometry
    ("sin", Op::Sin),
    ("cos", Op::Cos),
    ("tan", Op::Tan),
    ("sincos", Op::SinCos),
    ("asin", Op::Asin),
    ("acos", Op::Acos),
    ("atan", Op::Atan),
    ("atan2", Op::Atan2),
    // Comparison
    ("<", Op::Lt),
    ("<=", Op::LtEq),
    ("=<", Op::LtEq),
    (">", Op::Gt),
    (">=", Op::GtEq),
    ("=>", Op::GtEq),
    ("==", Op::Eq),
    ("!=", Op::NotEq),
    ("=!", Op::NotEq),
    // Bitwise
    ("and", Op::BitAnd),
    ("&", Op::BitAnd),
    ("or", Op::BitOr),
    ("|", Op::BitOr),
    ("xor", Op::BitXor),
    ("^", Op::BitXor),
    ("not", Op::BitNot),
    ("~", Op::BitNot),
    // Conditional
    ("?", Op::Select),
    // Stack
    ("dup", Op::Dup),
    ("swap", Op::Swap),
    ("pop", Op::Drop),
    ("hgt", Op::Height),
    // Constants
    ("pi", Op::Pi),
    ("tau", Op::Tau),
    ("ipi", Op::InvPi),
    ("itau", Op::InvTau),
];

/// Global registry singleton.
static GLOBAL_REGISTRY: OnceLock<OperatorRegistry> = OnceLock::new();

/// Lookup table from lowercase spelling to operator.
#[derive(Debug)]
pub struct OperatorRegistry {
    by_spelling: FxHashMap<&'static str, Op>,
}

impl OperatorRegistry {
    /// Build the index from the spelling table.
    pub fn new() -> Self {
        let mut by_spelling = FxHashMap::default();
        for &(spelling, op) in SPELLINGS {
            // First registration wins
            by_spelling.entry(spelling).or_insert(op);
        }
        OperatorRegistry { by_spelling }
    }

    /// The process-wide registry (lazily initialized).
    pub fn global() -> &'static OperatorRegistry {
        GLOBAL_REGISTRY.get_or_init(OperatorRegistry::new)
    }

    /// Resolve a spelling. Callers lowercase the token first.
    #[inline]
    pub fn lookup(&self, spelling: &str) -> Option<Op> {
        self.by_spelling.get(spelling).copied()
    }

    /// Every spelling that resolves to `op`, in registration order.
    pub fn spellings_of(&self, op: Op) -> impl Iterator<Item = &'static str> + '_ {
        SPELLINGS
            .iter()
            .filter(move |&&(spelling, entry)| entry == op && self.lookup(spelling) == Some(op))
            .map(|&(spelling, _)| spelling)
    }

    /// Number of distinct spellings.
    pub fn len(&self) -> usize {
        self.by_spelling.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_spelling.is_empty()
    }
}

impl Default for OperatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
