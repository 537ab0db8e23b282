use std::collections::BTreeMap;

use clap::Parser;

use system_fsub::{evaluate, is_subtype, type_of, Binding, Context, Term, Type};

/// Runs one of the built-in demonstration scenarios.
#[derive(Parser)]
#[command(name = "system-fsub")]
struct Cli {
    /// One of: record-query, church-zero, arrow-variance
    scenario: String,

    /// Emit the judgment trace on stderr
    #[arg(long)]
    trace: bool,
}

fn main() {
    let cli = Cli::parse();
    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trace")),
            )
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.scenario.as_str() {
        "record-query" => run_record_query(),
        "church-zero" => run_church_zero(),
        "arrow-variance" => run_arrow_variance(),
        other => {
            eprintln!("Unknown scenario: {}", other);
            eprintln!("Expected one of: record-query, church-zero, arrow-variance");
            std::process::exit(1);
        }
    }
}

/// Asks whether a record literal subsumes into `any` and branches on the
/// answer, under a context carrying one evaluator alias.
fn run_record_query() {
    let ctx = Context::new().extended("T", Binding::Alias(Term::Bool(false)));
    let shape = Term::Record(BTreeMap::from([("a".to_string(), Term::Bool(true))]));
    let query = Term::If(
        Box::new(Term::SubtypeOf(Box::new(shape), Box::new(Term::Any))),
        Box::new(Term::Nat(114514)),
        Box::new(Term::Nat(45234523452345)),
    );

    println!("Context: {}", ctx);
    println!("Query: {}", query);
    println!();

    match evaluate(&ctx, &query) {
        Ok(result) => println!("Result: {}", result),
        Err(e) => {
            eprintln!("Evaluation error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Synthesizes the type of the Church numeral zero, quantified over the
/// element, successor and zero types.
fn run_church_zero() {
    let var = |name: &str| Type::Var(name.to_string(), true);
    let zero = Term::TAbs(
        "X".to_string(),
        Type::Top,
        Box::new(Term::TAbs(
            "S".to_string(),
            var("X"),
            Box::new(Term::TAbs(
                "Z".to_string(),
                var("X"),
                Box::new(Term::Abs(
                    "x".to_string(),
                    Type::Arrow(Box::new(var("X")), Box::new(var("S"))),
                    Box::new(Term::Abs(
                        "z".to_string(),
                        var("Z"),
                        Box::new(Term::Var("z".to_string())),
                    )),
                )),
            )),
        )),
    );

    println!("Term: {}", zero);
    println!();

    match type_of(&Context::new(), &zero) {
        Ok(ty) => println!("Type: {}", ty),
        Err(e) => {
            eprintln!("Type synthesis error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Shows the arrow rule accepting a wider domain and rejecting a
/// narrower one.
fn run_arrow_variance() {
    let ctx = Context::new();
    let wide_domain = Type::Arrow(Box::new(Type::Top), Box::new(Type::Nat));
    let narrow_domain = Type::Arrow(Box::new(Type::Nat), Box::new(Type::Nat));

    for (left, right) in [
        (&wide_domain, &narrow_domain),
        (&narrow_domain, &wide_domain),
    ] {
        println!("{} <: {} is {}", left, right, is_subtype(&ctx, left, right));
    }
}
