//! Print the collision map summary of a synthetic SRS plan.
//!
//! Usage:
//!   cargo run -p collision-map --example phantom_map -- [seed]
//!
//! Prints one line per series (name, point count) and the overall extent.

use collision_map::phantom::{demo_plan, PhantomCfg};
use collision_map::{build_collision_map, MapCfg};

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(2025);
    let plan = demo_plan(&PhantomCfg {
        seed,
        ..PhantomCfg::default()
    });
    let map = match build_collision_map(Some(&plan), &MapCfg::default()) {
        Ok(map) => map,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    let summary = map.summary();
    for (name, n) in &summary.counts {
        println!("{name:>14}  {n:>6} points");
    }
    if let Some(e) = summary.extent {
        println!(
            "couch [{:.1}, {:.1}]  gantry [{:.1}, {:.1}]",
            e.couch_min, e.couch_max, e.gantry_min, e.gantry_max
        );
    }
}
