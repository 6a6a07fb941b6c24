use robdd::bdd::Bdd;
use robdd::types::Var;
use robdd::variables::{Assignment, VariableOrder};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let order = VariableOrder::new(["A", "B", "C"])?;
    let bdd = Bdd::new(order);
    println!("bdd = {:?}", bdd);

    // `A & B`: independent of C, so every C-decision collapses.
    let conj = |a: &Assignment| a.value(Var::new(0)) && a.value(Var::new(1));

    let tree = bdd.build(&conj);
    println!(
        "full tree: {} nodes, {} leaves",
        bdd.size(tree),
        bdd.terminal_count(tree)
    );

    let reduced = bdd.reduce(tree);
    println!(
        "reduced: {} nodes, {} decisions",
        bdd.size(reduced),
        bdd.decision_count(reduced)
    );
    println!("satisfying assignments: {}", bdd.sat_count(reduced));
    println!("one model: {:?}", bdd.one_sat(reduced));

    println!("{}", bdd.to_dot(&[reduced])?);

    Ok(())
}
