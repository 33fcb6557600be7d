// gridloc_sim/examples/01_reference_scenario.rs

//! Localizes on the reference map step by step, printing the belief after
//! every move-and-sense cycle.
//!
//! To run this example:
//! `cargo run --example 01_reference_scenario`

use gridloc_sim::prelude::*;

fn main() -> std::result::Result<(), SimError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            "info,gridloc_core=debug",
        ))
        .init();

    let map = ColorMap::parse_rows(&["RGGRR", "RRGRR", "RRGGR", "RRRRR"])?;
    let params = FilterParams::new(0.7, 0.8)?;
    let mut filter = HistogramFilter::new(map, &params)?;

    let motions = ["stay", "right", "down", "down", "right"];
    for name in motions {
        let motion: Displacement = name.parse()?;
        filter.step(motion, &Label::from("G"))?;
        println!("after moving {motion} and seeing G:\n{}\n", filter.belief());
    }

    let (row, col) = filter.belief().most_likely();
    println!(
        "most likely cell: ({row}, {col}), entropy = {:.4} nats",
        filter.belief().entropy()
    );
    Ok(())
}
