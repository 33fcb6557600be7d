// gridloc_sim/src/prelude.rs

// Re-export the entire gridloc_core prelude so you can easily access
// pure types like `Distribution`, `ColorMap`, `HistogramFilter`, etc.
pub use gridloc_core::prelude::*;

// Re-export common simulation-specific types.
pub use crate::error::SimError;
pub use crate::simulation::config::structs::*;
pub use crate::simulation::config::{load_scenario, PrefabCatalog};
pub use crate::simulation::core::agent::{simulate, CommandSource, SimulatedAgent, SimulatedRun};
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::report::{check_expected, RunReport};
pub use crate::simulation::{run, RunOptions};
