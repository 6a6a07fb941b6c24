use clap::Parser;

use robdd::bdd::Bdd;
use robdd::expr::{Expr, ExprOracle};
use robdd::variables::VariableOrder;

/// Check two boolean expressions for equivalence via canonical ROBDDs.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// First boolean expression, e.g. "A & B | !C"
    expr1: String,

    /// Second boolean expression, e.g. "A & (B | !C)"
    expr2: String,

    /// Comma-separated variable order
    #[arg(long, default_value = "A,B,C")]
    variables: String,

    /// Print the truth tables of both expressions
    #[arg(long)]
    truth_tables: bool,

    /// Print the reduced diagrams in DOT format
    #[arg(long)]
    dot: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Warn
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let order = VariableOrder::new(
        args.variables
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from),
    )?;

    let expr1: Expr = args.expr1.parse()?;
    let expr2: Expr = args.expr2.parse()?;
    let oracle1 = ExprOracle::new(&expr1, &order)?;
    let oracle2 = ExprOracle::new(&expr2, &order)?;

    let bdd = Bdd::new(order);

    let tree1 = bdd.build(&oracle1);
    let tree2 = bdd.build(&oracle2);
    let robdd1 = bdd.reduce(tree1);
    let robdd2 = bdd.reduce(tree2);

    println!("f = {}", expr1);
    println!("g = {}", expr2);
    println!(
        "f: full tree of {} nodes, reduced to {} nodes ({} decisions)",
        bdd.size(tree1),
        bdd.size(robdd1),
        bdd.decision_count(robdd1)
    );
    println!(
        "g: full tree of {} nodes, reduced to {} nodes ({} decisions)",
        bdd.size(tree2),
        bdd.size(robdd2),
        bdd.decision_count(robdd2)
    );
    println!(
        "f has {} satisfying assignments, g has {}",
        bdd.sat_count(robdd1),
        bdd.sat_count(robdd2)
    );

    if args.truth_tables {
        println!();
        for name in bdd.order().names() {
            print!("{}\t", name);
        }
        println!("f\tg");
        for assignment in bdd.order().assignments() {
            for &value in assignment.values() {
                print!("{}\t", value as u8);
            }
            println!(
                "{}\t{}",
                bdd.evaluate(robdd1, &assignment) as u8,
                bdd.evaluate(robdd2, &assignment) as u8
            );
        }
    }

    if args.dot {
        println!();
        println!("{}", bdd.to_dot(&[robdd1, robdd2])?);
    }

    println!();
    if bdd.equivalent(robdd1, robdd2) {
        println!("The two boolean functions are equivalent.");
    } else {
        println!("The two boolean functions are NOT equivalent.");
    }

    Ok(())
}
