//! RPN calculator CLI.

use std::io;
use std::process::ExitCode;

use rpn_eval::{Op, OperatorRegistry};
use rpnc::{init_tracing, parse_args, Command, OutputSink, Session};

/// Operators listed by `--help`, grouped for display.
const OPERATOR_GROUPS: &[(&str, &[Op])] = &[
    (
        "arithmetic",
        &[
            Op::Add,
            Op::Sub,
            Op::Mul,
            Op::Div,
            Op::RevDiv,
            Op::Pow,
            Op::Sqrt,
            Op::Mod,
            Op::Abs,
            Op::Neg,
        ],
    ),
    ("min/max", &[Op::Min, Op::Max, Op::ZeroMax]),
    ("random", &[Op::Rand, Op::IRand]),
    (
        "trig",
        &[
            Op::Sin,
            Op::Cos,
            Op::Tan,
            Op::SinCos,
            Op::Asin,
            Op::Acos,
            Op::Atan,
            Op::Atan2,
        ],
    ),
    (
        "comparison",
        &[Op::Lt, Op::LtEq, Op::Gt, Op::GtEq, Op::Eq, Op::NotEq],
    ),
    ("bitwise", &[Op::BitAnd, Op::BitOr, Op::BitXor, Op::BitNot]),
    ("conditional", &[Op::Select]),
    ("stack", &[Op::Dup, Op::Swap, Op::Drop, Op::Height]),
    ("constants", &[Op::Pi, Op::Tau, Op::InvPi, Op::InvTau]),
];

fn main() -> ExitCode {
    init_tracing();

    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("Run `rpn --help` for usage.");
            return exit_code(err.exit_code());
        }
    };

    match command {
        Command::Help => {
            print_usage();
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("rpn {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Command::Run { config, inputs } => {
            let mut session = Session::new(config, OutputSink::Stdout);
            let result = if inputs.is_empty() {
                session.run_interactive(io::stdin().lock())
            } else {
                session.run_inputs(&inputs)
            };
            if let Err(err) = result {
                eprintln!("error: {err}");
                return exit_code(err.exit_code());
            }
            session.finish();
            ExitCode::SUCCESS
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn print_usage() {
    println!("RPN calculator");
    println!();
    println!("Usage: rpn [options] [tokens or files.rpn ...]");
    println!();
    println!("With no tokens, reads from standard input until `exit` or `quit`.");
    println!();
    println!("Options:");
    println!("  --quiet            Only report the final top of stack");
    println!("  --strict           Reject operators that would underflow the stack");
    println!("  --seed=<n>         Seed for rand/irand");
    println!("  --ext=<suffix>     File extension that triggers a load (default: .rpn)");
    println!("  --max-depth=<n>    Maximum nesting of file loads (default: 64)");
    println!("  --help             Show this help message");
    println!("  --version          Show version information");
    println!("  --                 Treat remaining arguments as tokens");
    println!();
    println!("Operators:");
    let registry = OperatorRegistry::global();
    for (group, ops) in OPERATOR_GROUPS {
        let spellings: Vec<&str> = ops
            .iter()
            .flat_map(|&op| registry.spellings_of(op))
            .collect();
        println!("  {group:<12} {}", spellings.join(" "));
    }
    println!();
    println!("Variables:");
    println!("  @name    bind the top of stack to name");
    println!("  @name^   pop the top of stack and bind it to name");
    println!("  name     push the value bound to name");
}
