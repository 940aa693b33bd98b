use clap::Parser as _;
use exprule::{
    ast::Expr,
    interpreter::{evaluator::core::Context, parser::core::Parser},
};

/// exprule parses mathematical expressions with an ordered list of grammar
/// rules and evaluates or simplifies them.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Prints the simplified tree instead of evaluating it.
    #[arg(short, long)]
    simplify: bool,

    /// Prints every intermediate rewrite before the result.
    #[arg(short = 't', long)]
    steps: bool,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,

    /// Expressions to run, in order. Assignments carry over to the
    /// expressions that follow.
    #[arg(required = true)]
    expressions: Vec<String>,
}

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt().with_max_level(args.log_level)
                             .with_target(false)
                             .with_writer(std::io::stderr)
                             .init();

    let mut parser = Parser::new();
    let mut context = Context::with_builtins();
    let mut failed = false;

    for source in &args.expressions {
        let tree = match parser.parse(source) {
            Ok(tree) => tree,
            Err(e) => {
                eprintln!("{e}");
                failed = true;
                continue;
            },
        };

        if args.steps {
            print_steps(&tree, args.simplify, &context);
        }

        let result = if args.simplify {
            tree.simplify()
        } else {
            tree.evaluate(&mut context)
        };

        match result {
            Ok(value) => println!("{value}"),
            Err(e) => {
                eprintln!("{e}");
                failed = true;
            },
        }
    }

    if failed {
        std::process::exit(1);
    }
}

/// Prints each single-step rewrite of `tree` until it stops changing.
///
/// Stepping an assignment writes it into `context`, so a scratch copy is
/// stepped and the real context is left to the full reduction.
fn print_steps(tree: &Expr, simplify: bool, context: &Context) {
    let mut scratch = context.clone();
    let mut current = tree.clone();

    println!("  {current}");
    for _ in 0..scratch.max_iterations {
        let next = if simplify {
            current.step_simplify()
        } else {
            current.step_evaluate(&mut scratch)
        };

        if next == current {
            return;
        }
        println!("= {next}");
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::Args;

    #[test]
    fn log_level_defaults_to_warn() {
        let args = Args::try_parse_from(["exprule", "1 + 2"]).unwrap();

        assert_eq!(args.log_level, tracing::Level::WARN);
        assert_eq!(args.expressions, vec!["1 + 2"]);
    }

    #[test]
    fn log_level_is_configurable() {
        let args = Args::try_parse_from(["exprule", "--log-level", "trace", "-t", "x = 1"]).unwrap();

        assert_eq!(args.log_level, tracing::Level::TRACE);
        assert!(args.steps);
        assert!(Args::try_parse_from(["exprule", "--log-level", "loud", "1"]).is_err());
    }
}
